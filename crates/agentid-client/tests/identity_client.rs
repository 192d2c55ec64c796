mod common;

use agentid_client::{
    derive_identity, instructions, ClientConfig, CreateOptions, IdentityClient, IdentityError,
    LayoutError, IDENTITY_ACCOUNT_SIZE,
};
use assert_matches::assert_matches;
use common::{record, MockCards, MockChain, RENT};
use solana_program::pubkey::Pubkey;
use solana_program::system_instruction;
use solana_sdk::signature::{Keypair, Signer};

fn client(chain: MockChain, cards: MockCards) -> IdentityClient<MockChain, MockCards> {
    IdentityClient::new(ClientConfig::devnet(), chain, cards)
}

fn seed_identity(chain: &MockChain, owner: Pubkey, uri: &str, verified: bool) -> Pubkey {
    let (identity, _) = derive_identity(&ClientConfig::devnet().program_id, &owner);
    chain.insert(identity, record(owner, uri, verified).encode().unwrap());
    identity
}

#[tokio::test]
async fn lookup_returns_decoded_record() {
    let chain = MockChain::new();
    let owner = Pubkey::new_unique();
    seed_identity(&chain, owner, "https://agents.example/a.json", true);
    let c = client(chain, MockCards::default());

    let rec = c.lookup(&owner).await.unwrap().unwrap();
    assert_eq!(rec.owner, owner);
    assert_eq!(rec.metadata_uri, "https://agents.example/a.json");
    assert!(rec.is_verified);

    let by_str = c.lookup_str(&owner.to_string()).await.unwrap();
    assert_eq!(by_str, Some(rec));
}

#[tokio::test]
async fn missing_account_is_none_and_not_verified() {
    let c = client(MockChain::new(), MockCards::default());
    let owner = Pubkey::new_unique();

    assert_eq!(c.lookup(&owner).await.unwrap(), None);
    assert!(!c.is_verified(&owner).await.unwrap());
    assert!(!c.is_registered(&owner).await.unwrap());
    assert!(c.fetch_card(&owner).await.unwrap().is_none());
    assert!(c.get_full_identity(&owner).await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_sized_account_is_none() {
    let chain = MockChain::new();
    let owner = Pubkey::new_unique();
    let (identity, _) = derive_identity(&ClientConfig::devnet().program_id, &owner);
    chain.insert(identity, vec![0u8; 100]);
    let c = client(chain, MockCards::default());

    assert_eq!(c.lookup(&owner).await.unwrap(), None);
}

#[tokio::test]
async fn corrupt_record_is_an_error() {
    let chain = MockChain::new();
    let owner = Pubkey::new_unique();
    let (identity, _) = derive_identity(&ClientConfig::devnet().program_id, &owner);
    let mut data = vec![0u8; IDENTITY_ACCOUNT_SIZE];
    data[40..44].copy_from_slice(&5000u32.to_le_bytes());
    chain.insert(identity, data);
    let c = client(chain, MockCards::default());

    assert_matches!(
        c.lookup(&owner).await,
        Err(IdentityError::MalformedRecord(LayoutError::MalformedUri { uri_len: 5000, .. }))
    );
}

#[tokio::test]
async fn network_failure_propagates_on_lookup() {
    let chain = MockChain { fail_reads: true, ..MockChain::default() };
    let c = client(chain, MockCards::default());
    assert_matches!(c.lookup(&Pubkey::new_unique()).await, Err(IdentityError::Network(_)));
}

#[tokio::test]
async fn bad_address_string_is_address_error() {
    let c = client(MockChain::new(), MockCards::default());
    assert_matches!(c.lookup_str("not-a-key").await, Err(IdentityError::Address(_)));
}

#[tokio::test]
async fn full_identity_tolerates_missing_card() {
    let chain = MockChain::new();
    let owner = Pubkey::new_unique();
    let identity = seed_identity(&chain, owner, "https://down.example/card.json", false);
    let c = client(chain, MockCards::default());

    let full = c.get_full_identity(&owner).await.unwrap().unwrap();
    assert_eq!(full.identity_address, identity);
    assert!(full.card.is_none());
}

#[tokio::test]
async fn fetch_card_returns_card() {
    let chain = MockChain::new();
    let owner = Pubkey::new_unique();
    seed_identity(&chain, owner, "https://up.example/card.json", false);
    let c = client(chain, MockCards::default().with("https://up.example/card.json", "scout"));

    let card = c.fetch_card(&owner).await.unwrap().unwrap();
    assert_eq!(card.name(), Some("scout"));
}

#[tokio::test]
async fn list_all_isolates_card_failures() {
    let chain = MockChain::new();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let dead = Pubkey::new_unique();
    seed_identity(&chain, a, "https://a.example/card.json", true);
    seed_identity(&chain, b, "https://b.example/card.json", false);
    seed_identity(&chain, dead, "https://unreachable.example/card.json", false);
    let cards = MockCards::default()
        .with("https://a.example/card.json", "alpha")
        .with("https://b.example/card.json", "beta");
    let c = client(chain, cards);

    let listed = c.list_all(true).await;
    assert_eq!(listed.len(), 3);
    for entry in &listed {
        if entry.record.owner == dead {
            assert!(entry.card.is_none());
        } else {
            assert!(entry.card.is_some(), "card missing for {}", entry.record.owner);
        }
    }

    let without_cards = c.list_all(false).await;
    assert!(without_cards.iter().all(|l| l.card.is_none()));
}

#[tokio::test]
async fn list_all_skips_foreign_sizes_and_corrupt_records() {
    let chain = MockChain::new();
    seed_identity(&chain, Pubkey::new_unique(), "https://a.example/card.json", false);
    chain.insert(Pubkey::new_unique(), vec![1u8; 64]);
    let mut corrupt = vec![0u8; IDENTITY_ACCOUNT_SIZE];
    corrupt[40..44].copy_from_slice(&u32::MAX.to_le_bytes());
    chain.insert(Pubkey::new_unique(), corrupt);
    let c = client(chain, MockCards::default());

    assert_eq!(c.list_all(false).await.len(), 1);
}

#[tokio::test]
async fn failed_scan_yields_empty_list() {
    let chain = MockChain { fail_scan: true, ..MockChain::default() };
    let c = client(chain, MockCards::default());
    assert!(c.list_all(true).await.is_empty());
    assert_eq!(c.stats().await.total, 0);
}

#[tokio::test]
async fn stats_count_verified() {
    let chain = MockChain::new();
    seed_identity(&chain, Pubkey::new_unique(), "u1", true);
    seed_identity(&chain, Pubkey::new_unique(), "u2", false);
    seed_identity(&chain, Pubkey::new_unique(), "u3", true);
    let c = client(chain, MockCards::default());

    let stats = c.stats().await;
    assert_eq!(stats.total, 3);
    assert_eq!(stats.verified, 2);
}

#[tokio::test]
async fn create_identity_funds_and_registers_atomically() {
    let c = client(MockChain::new(), MockCards::default());
    let funder = Keypair::new();
    let options = CreateOptions { extra_lamports: 7, fee_buffer_lamports: Some(1_000) };

    let created = c.create_identity(&options, &funder, "https://a.example/card.json").await.unwrap();
    assert_eq!(created.address, created.wallet.pubkey());
    assert_eq!(created.identity_address, c.derive_identity(&created.address).0);
    assert_eq!(bs58::decode(&created.secret_key).into_vec().unwrap(), created.wallet.to_bytes().to_vec());

    let sent = c.rpc().sent();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(tx.signature, created.signature);
    assert_eq!(tx.payer, funder.pubkey());
    assert_eq!(tx.signers, vec![funder.pubkey(), created.address]);
    assert_eq!(tx.instructions.len(), 2);
    assert_eq!(
        tx.instructions[0],
        system_instruction::transfer(&funder.pubkey(), &created.address, RENT + 1_000 + 7)
    );
    assert!(instructions::is_register_instruction(&tx.instructions[1]));
}

#[tokio::test]
async fn create_identity_surfaces_rejection() {
    let chain = MockChain { reject_all: true, ..MockChain::default() };
    let c = client(chain, MockCards::default());
    let res = c.create_identity(&CreateOptions::default(), &Keypair::new(), "u").await;
    assert_matches!(res, Err(IdentityError::TransactionRejected(_)));
}

#[tokio::test]
async fn create_identity_rejects_oversized_uri_before_sending() {
    let c = client(MockChain::new(), MockCards::default());
    let uri = "x".repeat(300);
    let res = c.create_identity(&CreateOptions::default(), &Keypair::new(), &uri).await;
    assert_matches!(res, Err(IdentityError::MalformedRecord(LayoutError::UriTooLong { .. })));
    assert!(c.rpc().sent().is_empty());
}

#[tokio::test]
async fn create_and_verify_keeps_creation_when_verification_rejected() {
    let chain = MockChain { reject_verify: true, ..MockChain::default() };
    let c = client(chain, MockCards::default());
    let funder = Keypair::new();

    let out = c
        .create_and_verify(&CreateOptions::default(), &funder, "https://a.example/card.json")
        .await
        .unwrap();

    assert!(!out.verified);
    assert!(out.verification_signature.is_none());
    assert_eq!(out.created.address, out.created.wallet.pubkey());
    assert_eq!(out.created.identity_address, c.derive_identity(&out.created.address).0);

    let sent = c.rpc().sent();
    assert_eq!(sent.len(), 2, "creation and verification funding went through");
    assert_eq!(sent[0].signature, out.created.signature);
}

#[tokio::test]
async fn create_and_verify_success() {
    let c = client(MockChain::new(), MockCards::default());
    let funder = Keypair::new();
    let out = c.create_and_verify(&CreateOptions::default(), &funder, "u").await.unwrap();

    assert!(out.verified);
    let sent = c.rpc().sent();
    assert_eq!(sent.len(), 3);
    let cfg = ClientConfig::devnet();
    assert_eq!(
        sent[1].instructions[0],
        system_instruction::transfer(
            &funder.pubkey(),
            &out.created.address,
            cfg.verification_fee_lamports + cfg.fee_buffer_lamports
        )
    );
    assert_eq!(sent[2].payer, out.created.address);
    assert_eq!(sent[2].signers, vec![out.created.address]);
    assert_eq!(out.verification_signature, Some(sent[2].signature));
}

#[tokio::test]
async fn register_existing_uses_funder_as_payer() {
    let c = client(MockChain::new(), MockCards::default());
    let wallet = Keypair::new();
    let funder = Keypair::new();

    let reg = c.register_existing(&wallet, "u", Some(&funder)).await.unwrap();
    assert_eq!(reg.identity_address, c.derive_identity(&wallet.pubkey()).0);

    let reg_self = c.register_existing(&wallet, "u", None).await.unwrap();
    let sent = c.rpc().sent();
    assert_eq!(sent[0].payer, funder.pubkey());
    assert_eq!(sent[0].signers, vec![funder.pubkey(), wallet.pubkey()]);
    assert_eq!(sent[1].payer, wallet.pubkey());
    assert_eq!(sent[1].signers, vec![wallet.pubkey()]);
    assert_eq!(reg_self.signature, sent[1].signature);
}

#[tokio::test]
async fn submit_verification_targets_treasury() {
    let c = client(MockChain::new(), MockCards::default());
    let wallet = Keypair::new();
    c.submit_verification(&wallet).await.unwrap();

    let sent = c.rpc().sent();
    let ix = &sent[0].instructions[0];
    assert!(instructions::is_verify_instruction(ix));
    assert_eq!(ix.accounts[1].pubkey, wallet.pubkey());
    assert_eq!(ix.accounts[2].pubkey, ClientConfig::devnet().treasury);
}
