use std::path::Path;

use anyhow::{anyhow, Context, Result};
use solana_sdk::signature::Keypair;
use url::Url;

/// Load a wallet file (JSON byte array).
pub fn load_keypair<P: AsRef<Path>>(path: P) -> Result<Keypair> {
    let path = path.as_ref();
    agentid_client::wallet::read_wallet(path).with_context(|| format!("loading wallet {}", path.display()))
}

pub async fn fetch_url_text(url: &str) -> Result<String> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http error: {status}"));
    }
    Ok(resp.text().await?)
}

pub fn looks_like_url(s: &str) -> bool {
    Url::parse(s).map(|u| matches!(u.scheme(), "http" | "https")).unwrap_or(false)
}

/// GitHub shorthand resolves to raw.githubusercontent.com.
/// Format: owner/repo[@ref][:path]
/// Defaults: ref `main`, path `AGENT_ID.md`.
pub fn github_raw_url(s: &str) -> Result<String> {
    let (repo, ref_opt, path_opt) = parse_github_shorthand(s)?;
    let path = path_opt.unwrap_or_else(|| "AGENT_ID.md".to_string());
    let r = ref_opt.unwrap_or_else(|| "main".to_string());
    Ok(format!("https://raw.githubusercontent.com/{repo}/{r}/{}", path.trim_start_matches('/')))
}

fn parse_github_shorthand(s: &str) -> Result<(String, Option<String>, Option<String>)> {
    // owner/repo[@ref][:path]
    let mut repo_part = s.trim().to_string();
    let mut ref_part: Option<String> = None;
    let mut path_part: Option<String> = None;

    if let Some(idx) = repo_part.find(':') {
        path_part = Some(repo_part[idx + 1..].to_string()).filter(|p| !p.is_empty());
        repo_part = repo_part[..idx].to_string();
    }
    if let Some(idx) = repo_part.find('@') {
        ref_part = Some(repo_part[idx + 1..].to_string()).filter(|r| !r.is_empty());
        repo_part = repo_part[..idx].to_string();
    }

    let parts: Vec<&str> = repo_part.split('/').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(anyhow!("invalid github shorthand: {s}"));
    }
    Ok((repo_part, ref_part, path_part))
}
