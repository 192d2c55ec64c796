use anyhow::Result;
use agentid_client::{ChainRpc, Cluster};
use serde::Serialize;

use crate::args::Cli;
use crate::output;
use crate::solana::client::{config_from_cli, connect};

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();

    let cfg = config_from_cli(cli);
    checks.push(Check {
        name: "config".to_string(),
        ok: cfg.is_ok(),
        detail: match &cfg {
            Ok(c) => {
                let cluster = cli.cluster.parse::<Cluster>().map(|c| c.as_str()).unwrap_or("custom");
                format!("cluster {cluster} rpc {} program {}", c.rpc_url, c.program_id)
            }
            Err(e) => e.to_string(),
        },
    });

    if cfg.is_ok() {
        let health = match connect(cli) {
            Ok(client) => client.rpc().health().await.map_err(anyhow::Error::from),
            Err(e) => Err(e),
        };
        checks.push(Check {
            name: "rpc".to_string(),
            ok: health.is_ok(),
            detail: match health {
                Ok(v) => format!("solana-core {v}"),
                Err(e) => e.to_string(),
            },
        });
    }

    // Solana tooling is optional.
    checks.push(Check {
        name: "solana".to_string(),
        ok: which_ok("solana"),
        detail: "optional (wallet management outside agentid)".to_string(),
    });

    let ok = checks.iter().all(|c| c.ok || c.name == "solana");
    output::print(&DoctorOut { ok, checks })?;
    if !ok {
        anyhow::bail!("doctor found problems");
    }
    Ok(())
}

fn which_ok(cmd: &str) -> bool {
    std::env::var_os("PATH").and_then(|paths| {
        for p in std::env::split_paths(&paths) {
            let full = p.join(cmd);
            if full.exists() {
                return Some(());
            }
            #[cfg(windows)]
            {
                let full_exe = p.join(format!("{cmd}.exe"));
                if full_exe.exists() {
                    return Some(());
                }
            }
        }
        None
    }).is_some()
}
