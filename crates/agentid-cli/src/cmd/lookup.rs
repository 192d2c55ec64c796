use anyhow::Result;
use serde::Serialize;

use crate::args::Cli;
use crate::io::export::RecordOut;
use crate::output;
use crate::solana::client::connect;
use agentid_client::identity_client::parse_pubkey;
use agentid_client::AgentCard;

#[derive(Debug, Serialize)]
pub struct LookupOut {
    pub wallet: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<RecordOut>,
}

#[derive(Debug, Serialize)]
pub struct CardOut {
    pub wallet: String,
    pub card: Option<AgentCard>,
}

#[derive(Debug, Serialize)]
pub struct ListOut {
    pub count: usize,
    pub identities: Vec<RecordOut>,
}

#[derive(Debug, Serialize)]
pub struct StatsOut {
    pub total: usize,
    pub verified: usize,
    pub unverified: usize,
}

pub async fn lookup(cli: &Cli, wallet: &str, with_card: bool) -> Result<()> {
    let client = connect(cli)?;
    let owner = parse_pubkey(wallet)?;

    let identity = if with_card {
        client
            .get_full_identity(&owner)
            .await?
            .map(|full| RecordOut::new(Some(&full.identity_address), &full.record, full.card))
    } else {
        let (address, _) = client.derive_identity(&owner);
        client.lookup_by_address(&address).await?.map(|rec| RecordOut::new(Some(&address), &rec, None))
    };

    output::print(&LookupOut { wallet: owner.to_string(), found: identity.is_some(), identity })
}

pub async fn card(cli: &Cli, wallet: &str) -> Result<()> {
    let client = connect(cli)?;
    let owner = parse_pubkey(wallet)?;
    let card = client.fetch_card(&owner).await?;
    if card.is_none() {
        output::status("no agent card available", false);
    }
    output::print(&CardOut { wallet: owner.to_string(), card })
}

pub async fn list(cli: &Cli, cards: bool, verified_only: bool) -> Result<()> {
    let client = connect(cli)?;
    let pb = output::spinner("scanning identities")?;
    let listed = client.list_all(cards).await;
    pb.finish_and_clear();

    let identities: Vec<RecordOut> = listed
        .into_iter()
        .filter(|l| !verified_only || l.record.is_verified)
        .map(|l| RecordOut::new(Some(&l.address), &l.record, l.card))
        .collect();
    output::print(&ListOut { count: identities.len(), identities })
}

pub async fn stats(cli: &Cli) -> Result<()> {
    let client = connect(cli)?;
    let stats = client.stats().await;
    output::print(&StatsOut {
        total: stats.total,
        verified: stats.verified,
        unverified: stats.total - stats.verified,
    })
}
