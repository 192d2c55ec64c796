//! Chain access used by the identity client.
//!
//! `ChainRpc` is the seam between client logic and the network. `SolanaRpc`
//! is the production implementation over the nonblocking `RpcClient`.

use async_trait::async_trait;
use solana_account_decoder::UiAccountEncoding;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::RpcFilterType;
use solana_program::instruction::Instruction;
use solana_program::message::Message;
use solana_program::pubkey::Pubkey;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::transaction::Transaction;

use crate::errors::{IdentityError, IdentityResult};

#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Raw data of `address`, `None` when the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> IdentityResult<Option<Vec<u8>>>;

    /// All accounts owned by `program_id` whose data is exactly `data_size` bytes.
    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        data_size: u64,
    ) -> IdentityResult<Vec<(Pubkey, Vec<u8>)>>;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> IdentityResult<u64>;

    /// Sign `instructions` with `signers`, submit, and wait for confirmation.
    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> IdentityResult<Signature>;

    /// Node version string, used as a health check.
    async fn health(&self) -> IdentityResult<String>;
}

pub struct SolanaRpc {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl SolanaRpc {
    pub fn new(rpc_url: &str, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(rpc_url.to_string(), commitment),
            commitment,
        }
    }
}

#[async_trait]
impl ChainRpc for SolanaRpc {
    async fn account_data(&self, address: &Pubkey) -> IdentityResult<Option<Vec<u8>>> {
        tracing::debug!(%address, "get_account");
        let resp = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .await
            .map_err(|e| IdentityError::network(e.to_string()))?;
        Ok(resp.value.map(|acc| acc.data))
    }

    async fn program_accounts(
        &self,
        program_id: &Pubkey,
        data_size: u64,
    ) -> IdentityResult<Vec<(Pubkey, Vec<u8>)>> {
        tracing::debug!(%program_id, data_size, "get_program_accounts");
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::DataSize(data_size)]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };
        let accounts = self
            .rpc
            .get_program_accounts_with_config(program_id, config)
            .await
            .map_err(|e| IdentityError::network(e.to_string()))?;
        Ok(accounts.into_iter().map(|(key, acc)| (key, acc.data)).collect())
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> IdentityResult<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(data_len)
            .await
            .map_err(|e| IdentityError::network(e.to_string()))
    }

    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> IdentityResult<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| IdentityError::network(e.to_string()))?;

        let mut tx = Transaction::new_unsigned(Message::new(instructions, Some(payer)));
        tx.try_sign(signers, blockhash)
            .map_err(|e| IdentityError::rejected(format!("signing failed: {e}")))?;

        let sig = self
            .rpc
            .send_and_confirm_transaction(&tx)
            .await
            .map_err(|e| IdentityError::rejected(e.to_string()))?;
        tracing::info!(signature = %sig, "transaction confirmed");
        Ok(sig)
    }

    async fn health(&self) -> IdentityResult<String> {
        let version = self
            .rpc
            .get_version()
            .await
            .map_err(|e| IdentityError::network(e.to_string()))?;
        Ok(version.solana_core)
    }
}
