use anyhow::Result;
use agentid_client::{derive_identity, identity_client::parse_pubkey};
use serde::Serialize;

use crate::args::Cli;
use crate::output;
use crate::solana::client::config_from_cli;

#[derive(Debug, Serialize)]
pub struct PdaOut {
    pub wallet: String,
    pub program_id: String,
    pub identity_address: String,
    pub bump: u8,
}

pub fn run(cli: &Cli, wallet: &str) -> Result<()> {
    let cfg = config_from_cli(cli)?;
    let owner = parse_pubkey(wallet)?;
    let (identity, bump) = derive_identity(&cfg.program_id, &owner);
    output::print(&PdaOut {
        wallet: owner.to_string(),
        program_id: cfg.program_id.to_string(),
        identity_address: identity.to_string(),
        bump,
    })
}
