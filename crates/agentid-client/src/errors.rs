//! Error types for agentid-client.
//!
//! "Not found" is never an error: lookups return `Ok(None)` for absent
//! accounts. Everything below is a real failure the caller can match on.

use thiserror::Error;

pub type IdentityResult<T> = Result<T, IdentityError>;

/// Structural violations found while decoding an identity account.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("invalid account length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("metadata uri length {uri_len} exceeds the {available} bytes available")]
    MalformedUri { uri_len: usize, available: usize },

    #[error("record truncated: needs {needed} bytes, account holds {actual}")]
    TruncatedRecord { needed: usize, actual: usize },

    #[error("metadata uri is not valid utf-8")]
    InvalidUtf8,

    #[error("metadata uri is {len} bytes, maximum is {max}")]
    UriTooLong { len: usize, max: usize },
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("malformed identity record: {0}")]
    MalformedRecord(#[from] LayoutError),

    #[error("invalid address: {0}")]
    Address(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    #[error("metadata unavailable: {0}")]
    MetadataUnavailable(String),

    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IdentityError {
    pub fn address(msg: impl Into<String>) -> Self {
        Self::Address(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::TransactionRejected(msg.into())
    }

    pub fn wallet(msg: impl Into<String>) -> Self {
        Self::Wallet(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
