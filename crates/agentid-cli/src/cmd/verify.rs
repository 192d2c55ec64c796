use anyhow::{anyhow, Result};
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::args::{Cli, ProofMethod};
use crate::io::{input, proof};
use crate::output;
use crate::solana::client::connect;

#[derive(Debug, Serialize)]
pub struct VerifyOut {
    pub wallet: String,
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<proof::ProofOutcome>,
}

pub async fn run(cli: &Cli, keypair: &str, method: Option<ProofMethod>, target: Option<&str>) -> Result<()> {
    let client = connect(cli)?;
    let wallet = input::load_keypair(keypair)?;
    let owner = wallet.pubkey();

    let Some(record) = client.lookup(&owner).await? else {
        return Err(anyhow!("{owner} has no identity; run `agentid register` first"));
    };
    if record.is_verified {
        output::status("identity is already verified", true);
        return output::print(&VerifyOut { wallet: owner.to_string(), verified: true, signature: None, proof: None });
    }

    let proof = match method {
        Some(m) => Some(proof::check_ownership(m, target, &owner).await?),
        None => None,
    };

    let pb = output::spinner("submitting verification")?;
    let res = client.submit_verification(&wallet).await;
    pb.finish_and_clear();
    let sig = res?;

    output::print(&VerifyOut {
        wallet: owner.to_string(),
        verified: true,
        signature: Some(sig.to_string()),
        proof,
    })
}
