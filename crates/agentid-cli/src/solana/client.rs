use anyhow::{Context, Result};
use agentid_client::{
    identity_client::parse_pubkey, validate_config, ClientConfig, Cluster, Commitment, IdentityClient,
};

use crate::args::Cli;

/// Resolve flags and env over the cluster defaults.
pub fn config_from_cli(cli: &Cli) -> Result<ClientConfig> {
    if cli.cluster.trim().is_empty() {
        anyhow::bail!("cluster must not be empty");
    }
    let cluster: Cluster = cli.cluster.parse()?;
    let commitment: Commitment = cli.commitment.parse()?;

    let mut cfg = ClientConfig::for_cluster(cluster).with_commitment(commitment);
    if let Some(url) = &cli.rpc_url {
        cfg = cfg.with_rpc_url(url.clone());
    }
    if let Some(id) = &cli.program_id {
        cfg = cfg.with_program_id(parse_pubkey(id).context("--program-id")?);
    }
    if let Some(t) = &cli.treasury {
        cfg = cfg.with_treasury(parse_pubkey(t).context("--treasury")?);
    }
    for host in &cli.www_hosts {
        cfg = cfg.with_www_host(host.clone());
    }

    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn connect(cli: &Cli) -> Result<IdentityClient> {
    let cfg = config_from_cli(cli)?;
    tracing::debug!(rpc = %cfg.rpc_url, program = %cfg.program_id, "connecting");
    Ok(IdentityClient::from_config(cfg)?)
}
