//! Instruction builders for the identity program.
//!
//! Payloads are an 8-byte discriminator followed by Borsh-style arguments.

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;

use crate::constants::{MAX_METADATA_URI_LEN, REGISTER_DISCRIMINATOR, VERIFY_DISCRIMINATOR};
use crate::errors::LayoutError;

/// Build `register_agent(metadata_uri)`.
///
/// Accounts: identity (w), owner (w, signer), system program.
pub fn register_identity(
    program_id: &Pubkey,
    identity: &Pubkey,
    owner: &Pubkey,
    metadata_uri: &str,
) -> Result<Instruction, LayoutError> {
    Ok(Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*identity, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: register_data(metadata_uri)?,
    })
}

/// Build `get_verified()`.
///
/// Accounts: identity (w), owner (w, signer), treasury (w), system program.
pub fn verify_identity(
    program_id: &Pubkey,
    identity: &Pubkey,
    owner: &Pubkey,
    treasury: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*identity, false),
            AccountMeta::new(*owner, true),
            AccountMeta::new(*treasury, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: VERIFY_DISCRIMINATOR.to_vec(),
    }
}

fn register_data(metadata_uri: &str) -> Result<Vec<u8>, LayoutError> {
    let uri = metadata_uri.as_bytes();
    if uri.len() > MAX_METADATA_URI_LEN {
        return Err(LayoutError::UriTooLong { len: uri.len(), max: MAX_METADATA_URI_LEN });
    }
    let mut out = Vec::with_capacity(8 + 4 + uri.len());
    out.extend_from_slice(&REGISTER_DISCRIMINATOR);
    out.extend_from_slice(&(uri.len() as u32).to_le_bytes());
    out.extend_from_slice(uri);
    Ok(out)
}

/// True when `ix` targets `get_verified`.
pub fn is_verify_instruction(ix: &Instruction) -> bool {
    ix.data.as_slice() == VERIFY_DISCRIMINATOR
}

/// True when `ix` targets `register_agent`.
pub fn is_register_instruction(ix: &Instruction) -> bool {
    ix.data.starts_with(&REGISTER_DISCRIMINATOR)
}
