//! Identity client.
//!
//! This client can:
//! - derive identity PDAs and look records up (strict: corrupt data and
//!   network failures are errors, absent accounts are `Ok(None)`)
//! - list every identity with optional agent cards fetched concurrently
//! - build and submit register / verify transactions
//!
//! There is no global instance; construct one with `IdentityClient::from_config`
//! or `IdentityClient::new` with custom `ChainRpc` / `CardFetcher` backends.

use futures::future::join_all;
use solana_program::pubkey::Pubkey;
use solana_program::system_instruction;
use solana_sdk::signature::{Keypair, Signature, Signer};

use crate::card::{AgentCard, CardFetcher, HttpCardFetcher};
use crate::config::{validate_config, ClientConfig};
use crate::constants::IDENTITY_ACCOUNT_SIZE;
use crate::errors::{IdentityError, IdentityResult};
use crate::instructions;
use crate::layout::IdentityRecord;
use crate::pda;
use crate::rpc::{ChainRpc, SolanaRpc};
use crate::wallet::secret_key_base58;

#[derive(Debug, Clone, PartialEq)]
pub struct ListedIdentity {
    pub address: Pubkey,
    pub record: IdentityRecord,
    pub card: Option<AgentCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FullIdentity {
    pub identity_address: Pubkey,
    pub record: IdentityRecord,
    pub card: Option<AgentCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IdentityStats {
    pub total: usize,
    pub verified: usize,
}

/// Options for creating a brand-new agent wallet.
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    /// Lamports sent to the new wallet on top of rent and the fee buffer.
    pub extra_lamports: u64,
    /// Overrides `ClientConfig::fee_buffer_lamports`.
    pub fee_buffer_lamports: Option<u64>,
}

#[derive(Debug)]
pub struct CreatedIdentity {
    pub wallet: Keypair,
    pub address: Pubkey,
    pub secret_key: String,
    pub identity_address: Pubkey,
    pub signature: Signature,
}

#[derive(Debug)]
pub struct CreatedAndVerified {
    pub created: CreatedIdentity,
    pub verified: bool,
    pub verification_signature: Option<Signature>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub identity_address: Pubkey,
    pub signature: Signature,
}

pub struct IdentityClient<R = SolanaRpc, F = HttpCardFetcher> {
    config: ClientConfig,
    rpc: R,
    cards: F,
}

impl IdentityClient<SolanaRpc, HttpCardFetcher> {
    /// Client over a live RPC endpoint and HTTP card fetcher.
    pub fn from_config(config: ClientConfig) -> IdentityResult<Self> {
        validate_config(&config)?;
        let rpc = SolanaRpc::new(&config.rpc_url, config.commitment.to_config());
        let cards = HttpCardFetcher::new(config.http_timeout_ms, config.www_hosts.clone())?;
        Ok(Self { config, rpc, cards })
    }

    pub fn devnet() -> IdentityResult<Self> {
        Self::from_config(ClientConfig::devnet())
    }
}

impl<R: ChainRpc, F: CardFetcher> IdentityClient<R, F> {
    pub fn new(config: ClientConfig, rpc: R, cards: F) -> Self {
        Self { config, rpc, cards }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn derive_identity(&self, owner: &Pubkey) -> (Pubkey, u8) {
        pda::derive_identity(&self.config.program_id, owner)
    }

    pub async fn lookup(&self, owner: &Pubkey) -> IdentityResult<Option<IdentityRecord>> {
        let (identity, _bump) = self.derive_identity(owner);
        self.lookup_by_address(&identity).await
    }

    pub async fn lookup_str(&self, owner: &str) -> IdentityResult<Option<IdentityRecord>> {
        let owner = parse_pubkey(owner)?;
        self.lookup(&owner).await
    }

    pub async fn lookup_by_address(&self, identity: &Pubkey) -> IdentityResult<Option<IdentityRecord>> {
        let Some(data) = self.rpc.account_data(identity).await? else {
            tracing::debug!(%identity, "identity account not found");
            return Ok(None);
        };
        if data.len() != IDENTITY_ACCOUNT_SIZE {
            tracing::debug!(%identity, len = data.len(), "account size does not match identity layout");
            return Ok(None);
        }
        Ok(Some(IdentityRecord::decode(&data)?))
    }

    pub async fn is_verified(&self, owner: &Pubkey) -> IdentityResult<bool> {
        Ok(self.lookup(owner).await?.map(|r| r.is_verified).unwrap_or(false))
    }

    pub async fn is_registered(&self, owner: &Pubkey) -> IdentityResult<bool> {
        Ok(self.lookup(owner).await?.is_some())
    }

    /// Agent card of `owner`. Card failures are logged and yield `None`.
    pub async fn fetch_card(&self, owner: &Pubkey) -> IdentityResult<Option<AgentCard>> {
        let Some(record) = self.lookup(owner).await? else {
            return Ok(None);
        };
        Ok(self.card_for_uri(&record.metadata_uri).await)
    }

    pub async fn get_full_identity(&self, owner: &Pubkey) -> IdentityResult<Option<FullIdentity>> {
        let (identity_address, _bump) = self.derive_identity(owner);
        let Some(record) = self.lookup_by_address(&identity_address).await? else {
            return Ok(None);
        };
        let card = self.card_for_uri(&record.metadata_uri).await;
        Ok(Some(FullIdentity { identity_address, record, card }))
    }

    /// Every identity account of the program.
    ///
    /// A failed scan yields an empty list; undecodable accounts are skipped.
    pub async fn list_all(&self, include_cards: bool) -> Vec<ListedIdentity> {
        let accounts = match self
            .rpc
            .program_accounts(&self.config.program_id, IDENTITY_ACCOUNT_SIZE as u64)
            .await
        {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!(error = %e, "identity scan failed");
                return Vec::new();
            }
        };

        let mut listed: Vec<ListedIdentity> = accounts
            .into_iter()
            .filter_map(|(address, data)| match IdentityRecord::decode(&data) {
                Ok(record) => Some(ListedIdentity { address, record, card: None }),
                Err(e) => {
                    tracing::warn!(%address, error = %e, "skipping undecodable identity");
                    None
                }
            })
            .collect();

        if include_cards {
            let cards = join_all(listed.iter().map(|l| self.card_for_uri(&l.record.metadata_uri))).await;
            for (entry, card) in listed.iter_mut().zip(cards) {
                entry.card = card;
            }
        }

        listed
    }

    pub async fn stats(&self) -> IdentityStats {
        let all = self.list_all(false).await;
        IdentityStats {
            total: all.len(),
            verified: all.iter().filter(|l| l.record.is_verified).count(),
        }
    }

    /// Generate a wallet, fund it from `funder`, and register it in one transaction.
    pub async fn create_identity(
        &self,
        options: &CreateOptions,
        funder: &Keypair,
        metadata_uri: &str,
    ) -> IdentityResult<CreatedIdentity> {
        let wallet = Keypair::new();
        let address = wallet.pubkey();
        let (identity_address, _bump) = self.derive_identity(&address);

        let register = instructions::register_identity(
            &self.config.program_id,
            &identity_address,
            &address,
            metadata_uri,
        )?;

        let rent = self.rpc.minimum_balance_for_rent_exemption(IDENTITY_ACCOUNT_SIZE).await?;
        let buffer = options.fee_buffer_lamports.unwrap_or(self.config.fee_buffer_lamports);
        let lamports = rent
            .checked_add(buffer)
            .and_then(|v| v.checked_add(options.extra_lamports))
            .ok_or_else(|| IdentityError::config("funding amount overflows u64"))?;

        let fund = system_instruction::transfer(&funder.pubkey(), &address, lamports);
        tracing::info!(wallet = %address, identity = %identity_address, lamports, "creating identity");

        let signature = self
            .rpc
            .send_and_confirm(&[fund, register], &funder.pubkey(), &[funder, &wallet])
            .await?;

        let secret_key = secret_key_base58(&wallet);
        Ok(CreatedIdentity { wallet, address, secret_key, identity_address, signature })
    }

    /// Register an already-funded wallet. `funder`, when given, pays the fees.
    pub async fn register_existing(
        &self,
        wallet: &Keypair,
        metadata_uri: &str,
        funder: Option<&Keypair>,
    ) -> IdentityResult<Registration> {
        let owner = wallet.pubkey();
        let (identity_address, _bump) = self.derive_identity(&owner);
        let register =
            instructions::register_identity(&self.config.program_id, &identity_address, &owner, metadata_uri)?;

        let signature = match funder {
            Some(funder) => {
                self.rpc
                    .send_and_confirm(&[register], &funder.pubkey(), &[funder, wallet])
                    .await?
            }
            None => self.rpc.send_and_confirm(&[register], &owner, &[wallet]).await?,
        };
        tracing::info!(wallet = %owner, identity = %identity_address, "identity registered");
        Ok(Registration { identity_address, signature })
    }

    /// Submit `get_verified`; the program debits the fee from `wallet`.
    pub async fn submit_verification(&self, wallet: &Keypair) -> IdentityResult<Signature> {
        let owner = wallet.pubkey();
        let (identity_address, _bump) = self.derive_identity(&owner);
        let verify = instructions::verify_identity(
            &self.config.program_id,
            &identity_address,
            &owner,
            &self.config.treasury,
        );
        let signature = self.rpc.send_and_confirm(&[verify], &owner, &[wallet]).await?;
        tracing::info!(wallet = %owner, identity = %identity_address, "identity verified");
        Ok(signature)
    }

    /// Create, then fund and submit verification.
    ///
    /// Verification runs after creation has committed. If funding or
    /// verification fails the created identity is returned with
    /// `verified: false`; nothing is rolled back.
    pub async fn create_and_verify(
        &self,
        options: &CreateOptions,
        funder: &Keypair,
        metadata_uri: &str,
    ) -> IdentityResult<CreatedAndVerified> {
        let created = self.create_identity(options, funder, metadata_uri).await?;

        match self.fund_and_verify(options, funder, &created.wallet).await {
            Ok(sig) => Ok(CreatedAndVerified {
                created,
                verified: true,
                verification_signature: Some(sig),
            }),
            Err(e) => {
                tracing::warn!(wallet = %created.address, error = %e, "verification failed after creation");
                Ok(CreatedAndVerified { created, verified: false, verification_signature: None })
            }
        }
    }

    async fn fund_and_verify(
        &self,
        options: &CreateOptions,
        funder: &Keypair,
        wallet: &Keypair,
    ) -> IdentityResult<Signature> {
        let buffer = options.fee_buffer_lamports.unwrap_or(self.config.fee_buffer_lamports);
        let lamports = self
            .config
            .verification_fee_lamports
            .checked_add(buffer)
            .ok_or_else(|| IdentityError::config("verification funding overflows u64"))?;
        let fund = system_instruction::transfer(&funder.pubkey(), &wallet.pubkey(), lamports);
        self.rpc.send_and_confirm(&[fund], &funder.pubkey(), &[funder]).await?;
        self.submit_verification(wallet).await
    }

    async fn card_for_uri(&self, uri: &str) -> Option<AgentCard> {
        if uri.trim().is_empty() {
            return None;
        }
        match self.cards.fetch_card(uri).await {
            Ok(card) => Some(card),
            Err(e) => {
                tracing::warn!(%uri, error = %e, "agent card unavailable");
                None
            }
        }
    }
}

/// Parse a base58 wallet or identity address.
pub fn parse_pubkey(s: &str) -> IdentityResult<Pubkey> {
    s.trim()
        .parse()
        .map_err(|_| IdentityError::address(format!("not a base58 public key: {s}")))
}
