use anyhow::Result;
use agentid_client::wallet::write_wallet;
use serde::Serialize;
use solana_sdk::signature::{Keypair, Signer};

use crate::io::input;
use crate::output;

#[derive(Debug, Serialize)]
pub struct WalletOut {
    pub address: String,
    pub path: String,
}

pub fn new(out: &str, force: bool) -> Result<()> {
    let kp = Keypair::new();
    write_wallet(out, &kp, force)?;
    output::status(&format!("wrote {out}; keep it secret, it is not encrypted"), true);
    output::print(&WalletOut { address: kp.pubkey().to_string(), path: out.to_string() })
}

pub fn show(path: &str) -> Result<()> {
    let kp = input::load_keypair(path)?;
    output::print(&WalletOut { address: kp.pubkey().to_string(), path: path.to_string() })
}
