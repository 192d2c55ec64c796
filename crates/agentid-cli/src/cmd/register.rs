use anyhow::Result;
use serde::Serialize;
use solana_sdk::signature::Signer;

use crate::args::Cli;
use crate::io::input;
use crate::output;
use crate::solana::client::connect;

#[derive(Debug, Serialize)]
pub struct RegisterOut {
    pub wallet: String,
    pub identity_address: String,
    pub signature: String,
}

pub async fn run(cli: &Cli, keypair: &str, uri: &str, funder: Option<&str>) -> Result<()> {
    let client = connect(cli)?;
    let wallet = input::load_keypair(keypair)?;
    let funder = funder.map(input::load_keypair).transpose()?;

    let pb = output::spinner("registering identity")?;
    let res = client.register_existing(&wallet, uri, funder.as_ref()).await;
    pb.finish_and_clear();
    let reg = res?;

    output::print(&RegisterOut {
        wallet: wallet.pubkey().to_string(),
        identity_address: reg.identity_address.to_string(),
        signature: reg.signature.to_string(),
    })
}
