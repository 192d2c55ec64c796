//! Constants shared between the on-chain identity program and clients.
//!
//! Keep these stable because they affect PDA derivation and account layout.

use solana_program::pubkey::Pubkey;

/// PDA seed for identity accounts. The owner's public key follows it.
pub const IDENTITY_SEED: &[u8] = b"agent_identity";

/// Allocated size of every identity account, padding included.
pub const IDENTITY_ACCOUNT_SIZE: usize = 263;

/// Offset of the variable-length metadata URI.
pub const URI_OFFSET: usize = 8 + 32 + 4;

/// registered_at (8) + is_verified (1) + verified_at (8).
pub const FIXED_SUFFIX_LEN: usize = 8 + 1 + 8;

/// Longest metadata URI that fits in an identity account.
pub const MAX_METADATA_URI_LEN: usize = IDENTITY_ACCOUNT_SIZE - URI_OFFSET - FIXED_SUFFIX_LEN;

/// Account discriminator of `AgentIdentity`.
pub const IDENTITY_ACCOUNT_DISCRIMINATOR: [u8; 8] = [11, 149, 31, 27, 186, 76, 241, 72];

/// Instruction discriminator of `register_agent`.
pub const REGISTER_DISCRIMINATOR: [u8; 8] = [135, 157, 66, 195, 2, 113, 175, 30];

/// Instruction discriminator of `get_verified`.
pub const VERIFY_DISCRIMINATOR: [u8; 8] = [132, 231, 2, 30, 115, 74, 23, 26];

/// Default identity program id.
///
/// Override through `ClientConfig` when targeting another deployment.
pub const DEFAULT_PROGRAM_ID: &str = "AFJKADuJvA3jbfi1gjiyvW9Wpf8JD5k5bkz3uHJSi8KQ";

/// Default treasury receiving verification fees.
pub const DEFAULT_TREASURY: &str = "6XtksAwpYMUFYDSQn11sPHUiTQUCGBAkDxsgi3LsxByK";

/// Lamports the program debits from the owner on verification.
pub const DEFAULT_VERIFICATION_FEE_LAMPORTS: u64 = 10_000_000;

/// Extra lamports sent along with rent so the new wallet can pay future fees.
pub const DEFAULT_FEE_BUFFER_LAMPORTS: u64 = 1_000_000;

pub fn default_program_id() -> Pubkey {
    DEFAULT_PROGRAM_ID.parse().unwrap_or_else(|_| Pubkey::default())
}

pub fn default_treasury() -> Pubkey {
    DEFAULT_TREASURY.parse().unwrap_or_else(|_| Pubkey::default())
}
