//! In-memory chain and card source for client tests.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use agentid_client::instructions::is_verify_instruction;
use agentid_client::{
    AgentCard, CardFetcher, ChainRpc, IdentityError, IdentityRecord, IdentityResult,
    IDENTITY_ACCOUNT_DISCRIMINATOR,
};
use async_trait::async_trait;
use solana_program::instruction::Instruction;
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};

pub const RENT: u64 = 2_721_360;

#[derive(Debug, Clone)]
pub struct SentTx {
    pub instructions: Vec<Instruction>,
    pub payer: Pubkey,
    pub signers: Vec<Pubkey>,
    pub signature: Signature,
}

#[derive(Default)]
pub struct MockChain {
    pub accounts: Mutex<BTreeMap<Pubkey, Vec<u8>>>,
    pub sent: Mutex<Vec<SentTx>>,
    pub fail_reads: bool,
    pub fail_scan: bool,
    pub reject_verify: bool,
    pub reject_all: bool,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, address: Pubkey, data: Vec<u8>) {
        self.accounts.lock().unwrap().insert(address, data);
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChainRpc for MockChain {
    async fn account_data(&self, address: &Pubkey) -> IdentityResult<Option<Vec<u8>>> {
        if self.fail_reads {
            return Err(IdentityError::network("connection refused"));
        }
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }

    async fn program_accounts(
        &self,
        _program_id: &Pubkey,
        data_size: u64,
    ) -> IdentityResult<Vec<(Pubkey, Vec<u8>)>> {
        if self.fail_scan {
            return Err(IdentityError::network("scan timed out"));
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, data)| data.len() as u64 == data_size)
            .map(|(k, d)| (*k, d.clone()))
            .collect())
    }

    async fn minimum_balance_for_rent_exemption(&self, _data_len: usize) -> IdentityResult<u64> {
        Ok(RENT)
    }

    async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        payer: &Pubkey,
        signers: &[&Keypair],
    ) -> IdentityResult<Signature> {
        if self.reject_all {
            return Err(IdentityError::rejected("blockhash not found"));
        }
        if self.reject_verify && instructions.iter().any(is_verify_instruction) {
            return Err(IdentityError::rejected("custom program error: 0x1"));
        }
        let mut sent = self.sent.lock().unwrap();
        let signature = Signature::from([sent.len() as u8 + 1; 64]);
        sent.push(SentTx {
            instructions: instructions.to_vec(),
            payer: *payer,
            signers: signers.iter().map(|k| k.pubkey()).collect(),
            signature,
        });
        Ok(signature)
    }

    async fn health(&self) -> IdentityResult<String> {
        Ok("mock".to_string())
    }
}

#[derive(Default)]
pub struct MockCards {
    pub cards: HashMap<String, AgentCard>,
}

impl MockCards {
    pub fn with(mut self, uri: &str, name: &str) -> Self {
        let card = AgentCard::from_json(serde_json::json!({ "name": name }));
        self.cards.insert(uri.to_string(), card);
        self
    }
}

#[async_trait]
impl CardFetcher for MockCards {
    async fn fetch_card(&self, uri: &str) -> IdentityResult<AgentCard> {
        self.cards
            .get(uri)
            .cloned()
            .ok_or_else(|| IdentityError::MetadataUnavailable(format!("unreachable: {uri}")))
    }
}

pub fn record(owner: Pubkey, uri: &str, verified: bool) -> IdentityRecord {
    IdentityRecord {
        discriminator: IDENTITY_ACCOUNT_DISCRIMINATOR,
        owner,
        metadata_uri: uri.to_string(),
        registered_at: 1_700_000_000,
        is_verified: verified,
        verified_at: if verified { 1_700_000_500 } else { 0 },
    }
}
