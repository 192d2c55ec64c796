use std::path::Path;

use anyhow::{Context, Result};
use agentid_client::wallet::write_wallet;
use agentid_client::CreateOptions;
use serde::Serialize;

use crate::args::Cli;
use crate::io::input;
use crate::output;
use crate::solana::client::connect;

#[derive(Debug, Serialize)]
pub struct CreateOut {
    pub address: String,
    pub identity_address: String,
    pub signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_file: Option<String>,
    /// Only printed when the wallet was not saved to a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_signature: Option<String>,
}

pub async fn run(
    cli: &Cli,
    funder: &str,
    uri: &str,
    out: Option<&str>,
    force: bool,
    verify: bool,
    extra_lamports: u64,
) -> Result<()> {
    // The wallet only exists in memory until saved; refuse before spending anything.
    if let Some(path) = out {
        if Path::new(path).exists() && !force {
            anyhow::bail!("{path} already exists (use --force to overwrite)");
        }
    }

    let client = connect(cli)?;
    let funder = input::load_keypair(funder)?;
    let options = CreateOptions { extra_lamports, ..CreateOptions::default() };

    let pb = output::spinner("creating identity")?;
    let (created, verified, verification_signature) = if verify {
        let res = client.create_and_verify(&options, &funder, uri).await;
        pb.finish_and_clear();
        let res = res?;
        let sig = res.verification_signature.map(|s| s.to_string());
        (res.created, Some(res.verified), sig)
    } else {
        let res = client.create_identity(&options, &funder, uri).await;
        pb.finish_and_clear();
        (res?, None, None)
    };

    if verified == Some(false) {
        output::status("identity created but verification failed; retry with `agentid verify`", false);
    }

    let wallet_file = match out {
        Some(path) => {
            write_wallet(path, &created.wallet, force)
                .with_context(|| format!("identity created, but saving the wallet to {path} failed; secret: {}", created.secret_key))?;
            Some(path.to_string())
        }
        None => None,
    };

    output::print(&CreateOut {
        address: created.address.to_string(),
        identity_address: created.identity_address.to_string(),
        signature: created.signature.to_string(),
        secret_key: if wallet_file.is_none() { Some(created.secret_key.clone()) } else { None },
        wallet_file,
        verified,
        verification_signature,
    })
}
