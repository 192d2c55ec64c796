//! Wallet files.
//!
//! A wallet file is a JSON array of the 64 secret-key bytes, the same format
//! the Solana CLI writes. No encryption, no passphrase.

use std::fs;
use std::path::Path;

use solana_sdk::signature::Keypair;

use crate::errors::{IdentityError, IdentityResult};

pub fn read_wallet<P: AsRef<Path>>(path: P) -> IdentityResult<Keypair> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .map_err(|e| IdentityError::wallet(format!("read {}: {e}", path.display())))?;
    parse_wallet_json(&raw)
}

pub fn parse_wallet_json(raw: &str) -> IdentityResult<Keypair> {
    let bytes: Vec<u8> = serde_json::from_str(raw)
        .map_err(|e| IdentityError::wallet(format!("invalid wallet json: {e}")))?;
    keypair_from_bytes(&bytes)
}

pub fn keypair_from_bytes(bytes: &[u8]) -> IdentityResult<Keypair> {
    if bytes.len() != 64 {
        return Err(IdentityError::wallet(format!(
            "secret key must be 64 bytes, got {}",
            bytes.len()
        )));
    }
    Keypair::from_bytes(bytes).map_err(|e| IdentityError::wallet(format!("invalid secret key: {e}")))
}

/// Write `keypair` to `path`. Refuses to overwrite unless `force` is set.
pub fn write_wallet<P: AsRef<Path>>(path: P, keypair: &Keypair, force: bool) -> IdentityResult<()> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(IdentityError::wallet(format!("{} already exists", path.display())));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| IdentityError::wallet(format!("create {}: {e}", parent.display())))?;
    }
    let json = wallet_json(keypair)?;
    fs::write(path, json).map_err(|e| IdentityError::wallet(format!("write {}: {e}", path.display())))
}

pub fn wallet_json(keypair: &Keypair) -> IdentityResult<String> {
    serde_json::to_string(&keypair.to_bytes().to_vec())
        .map_err(|e| IdentityError::wallet(format!("serialize wallet: {e}")))
}

/// Base58 of the full 64-byte secret, as wallets import it.
pub fn secret_key_base58(keypair: &Keypair) -> String {
    bs58::encode(keypair.to_bytes()).into_string()
}
