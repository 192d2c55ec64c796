//! Client configuration.
//!
//! All settings are explicit. The library never reads environment variables;
//! the CLI layers flags and env over these defaults.

use std::str::FromStr;

use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;

use crate::constants::{
    default_program_id, default_treasury, DEFAULT_FEE_BUFFER_LAMPORTS,
    DEFAULT_VERIFICATION_FEE_LAMPORTS,
};
use crate::errors::{IdentityError, IdentityResult};

/// Known Solana clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    Testnet,
    Mainnet,
    Localnet,
}

impl Cluster {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Mainnet => "https://api.mainnet-beta.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet-beta",
            Self::Localnet => "localnet",
        }
    }
}

impl FromStr for Cluster {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "devnet" | "d" => Ok(Self::Devnet),
            "testnet" | "t" => Ok(Self::Testnet),
            "mainnet" | "mainnet-beta" | "m" => Ok(Self::Mainnet),
            "localnet" | "localhost" | "l" => Ok(Self::Localnet),
            other => Err(IdentityError::config(format!("unknown cluster: {other}"))),
        }
    }
}

/// Commitment levels accepted by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn to_config(self) -> CommitmentConfig {
        match self {
            Self::Processed => CommitmentConfig::processed(),
            Self::Confirmed => CommitmentConfig::confirmed(),
            Self::Finalized => CommitmentConfig::finalized(),
        }
    }
}

impl FromStr for Commitment {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(IdentityError::config(format!("unknown commitment: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub commitment: Commitment,
    pub program_id: Pubkey,
    pub treasury: Pubkey,
    pub verification_fee_lamports: u64,
    pub fee_buffer_lamports: u64,
    /// Request timeout of the metadata HTTP client.
    pub http_timeout_ms: u64,
    /// Bare hosts that only serve cross-origin requests under `www.`.
    ///
    /// Deployment configuration: no host is rewritten unless listed here
    /// (CLI `--www-host`). Matching is on the exact lowercased host.
    pub www_hosts: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_cluster(Cluster::Devnet)
    }
}

impl ClientConfig {
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            rpc_url: cluster.rpc_url().to_string(),
            commitment: Commitment::Confirmed,
            program_id: default_program_id(),
            treasury: default_treasury(),
            verification_fee_lamports: DEFAULT_VERIFICATION_FEE_LAMPORTS,
            fee_buffer_lamports: DEFAULT_FEE_BUFFER_LAMPORTS,
            http_timeout_ms: 10_000,
            www_hosts: Vec::new(),
        }
    }

    pub fn devnet() -> Self {
        Self::for_cluster(Cluster::Devnet)
    }

    pub fn mainnet() -> Self {
        Self::for_cluster(Cluster::Mainnet)
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_treasury(mut self, treasury: Pubkey) -> Self {
        self.treasury = treasury;
        self
    }

    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    pub fn with_www_host(mut self, host: impl Into<String>) -> Self {
        self.www_hosts.push(host.into().to_ascii_lowercase());
        self
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &ClientConfig) -> IdentityResult<()> {
    let url = url::Url::parse(&cfg.rpc_url)
        .map_err(|e| IdentityError::config(format!("invalid rpc url {}: {e}", cfg.rpc_url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(IdentityError::config("rpc url must be http or https"));
    }

    if cfg.program_id == Pubkey::default() {
        return Err(IdentityError::config("program id must not be the default key"));
    }

    if cfg.treasury == cfg.program_id {
        return Err(IdentityError::config("treasury must differ from program id"));
    }

    if cfg.http_timeout_ms == 0 {
        return Err(IdentityError::config("http timeout must be greater than zero"));
    }

    Ok(())
}
