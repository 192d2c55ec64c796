//! PDA derivation helpers for the identity program.
//!
//! These helpers must match the on-chain program's seeds exactly; a different
//! seed or ordering yields an address the program never writes to.

use solana_program::pubkey::Pubkey;

use crate::constants::IDENTITY_SEED;

/// Derive the identity PDA of `owner`.
///
/// Uses the canonical bump search (255 downward, first off-curve hash).
pub fn derive_identity(program_id: &Pubkey, owner: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&identity_seeds(owner), program_id)
}

/// Seeds used for the identity PDA, bump excluded.
pub fn identity_seeds(owner: &Pubkey) -> [&[u8]; 2] {
    [IDENTITY_SEED, owner.as_ref()]
}
