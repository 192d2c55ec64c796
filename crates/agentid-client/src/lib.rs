//! agentid-client
//!
//! A small, focused Rust client for the on-chain agent identity program.
//!
//! It includes:
//! - the 263-byte identity account layout (decode/encode)
//! - PDA derivation for an owner's identity account
//! - register / verify instruction builders
//! - an identity client for lookups, listings and transaction submission
//! - agent card (off-chain metadata) fetching
//! - wallet file helpers
//!
//! The program id, treasury and fees are configuration; the defaults in
//! `constants` target the devnet deployment.

pub mod card;
pub mod config;
pub mod constants;
pub mod errors;
pub mod identity_client;
pub mod instructions;
pub mod layout;
pub mod pda;
pub mod rpc;
pub mod wallet;

pub use card::{AgentCard, CardFetcher, HttpCardFetcher};
pub use config::{validate_config, ClientConfig, Cluster, Commitment};
pub use constants::*;
pub use errors::{IdentityError, IdentityResult, LayoutError};
pub use identity_client::*;
pub use layout::{IdentityRecord, IdentityStatus};
pub use pda::derive_identity;
pub use rpc::{ChainRpc, SolanaRpc};
