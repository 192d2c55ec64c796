//! Off-chain proof-of-ownership checks run before submitting verification.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

use crate::args::ProofMethod;
use crate::io::input;

#[derive(Debug, Error)]
pub enum ProofError {
    #[error("--target is required for --method {0}")]
    MissingTarget(&'static str),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("wallet {wallet} not found at {url}")]
    WalletNotMentioned { wallet: String, url: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ProofOutcome {
    pub method: &'static str,
    pub checked_url: String,
}

pub async fn check_ownership(
    method: ProofMethod,
    target: Option<&str>,
    wallet: &Pubkey,
) -> Result<ProofOutcome, ProofError> {
    let target = target
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ProofError::MissingTarget(method.as_str()))?;
    let url = proof_url(method, target)?;
    tracing::debug!(method = method.as_str(), %url, "checking ownership proof");

    let body = input::fetch_url_text(&url)
        .await
        .map_err(|e| ProofError::Fetch { url: url.clone(), reason: e.to_string() })?;

    let wallet_str = wallet.to_string();
    let found = match method {
        ProofMethod::Domain => well_known_names_wallet(&body, &wallet_str),
        ProofMethod::Social | ProofMethod::Repo => body.contains(&wallet_str),
    };
    if !found {
        return Err(ProofError::WalletNotMentioned { wallet: wallet_str, url });
    }
    Ok(ProofOutcome { method: method.as_str(), checked_url: url })
}

fn proof_url(method: ProofMethod, target: &str) -> Result<String, ProofError> {
    match method {
        ProofMethod::Social => {
            if !input::looks_like_url(target) {
                return Err(ProofError::InvalidTarget(format!("profile must be an http(s) url: {target}")));
            }
            Ok(target.to_string())
        }
        ProofMethod::Domain => {
            let domain = target
                .trim_start_matches("https://")
                .trim_start_matches("http://")
                .trim_end_matches('/');
            if domain.is_empty() || domain.contains('/') {
                return Err(ProofError::InvalidTarget(format!("expected a bare domain: {target}")));
            }
            Ok(format!("https://{domain}/.well-known/agent-identity.json"))
        }
        ProofMethod::Repo => {
            input::github_raw_url(target).map_err(|e| ProofError::InvalidTarget(e.to_string()))
        }
    }
}

/// `{"wallet": "..."}`, `{"wallets": [...]}`, or a plain mention.
fn well_known_names_wallet(body: &str, wallet: &str) -> bool {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => {
            let single = v.get("wallet").and_then(|w| w.as_str()) == Some(wallet);
            let listed = v
                .get("wallets")
                .and_then(|w| w.as_array())
                .map(|ws| ws.iter().any(|w| w.as_str() == Some(wallet)))
                .unwrap_or(false);
            single || listed
        }
        Err(_) => body.contains(wallet),
    }
}
