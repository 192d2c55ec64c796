use agentid_client::{AgentCard, IdentityRecord};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct RecordOut {
    pub owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_address: Option<String>,
    pub metadata_uri: String,
    pub status: &'static str,
    pub registered_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at_utc: Option<String>,
    pub is_verified: bool,
    pub verified_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at_utc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<AgentCard>,
}

impl RecordOut {
    pub fn new(identity: Option<&Pubkey>, record: &IdentityRecord, card: Option<AgentCard>) -> Self {
        Self {
            owner: record.owner.to_string(),
            identity_address: identity.map(|p| p.to_string()),
            metadata_uri: record.metadata_uri.clone(),
            status: record.status().as_str(),
            registered_at: record.registered_at,
            registered_at_utc: format_unix(record.registered_at),
            is_verified: record.is_verified,
            verified_at: record.verified_at,
            verified_at_utc: if record.is_verified { format_unix(record.verified_at) } else { None },
            card,
        }
    }
}

/// RFC 3339 rendering of a unix timestamp; `None` for 0 or out-of-range values.
pub fn format_unix(ts: i64) -> Option<String> {
    if ts <= 0 {
        return None;
    }
    OffsetDateTime::from_unix_timestamp(ts).ok()?.format(&Rfc3339).ok()
}
