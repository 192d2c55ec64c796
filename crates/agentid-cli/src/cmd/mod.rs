use anyhow::Result;

use crate::args::{Cli, Command, WalletCommand};

mod create;
mod doctor;
mod lookup;
mod pda;
mod register;
mod verify;
mod wallet;

pub async fn dispatch(cli: Cli) -> Result<()> {
    match &cli.command {
        Command::Wallet(WalletCommand::New { out, force }) => wallet::new(out, *force),
        Command::Wallet(WalletCommand::Show { path }) => wallet::show(path),
        Command::Register { keypair, uri, funder } => register::run(&cli, keypair, uri, funder.as_deref()).await,
        Command::Create { funder, uri, out, force, verify, extra_lamports } => {
            create::run(&cli, funder, uri, out.as_deref(), *force, *verify, *extra_lamports).await
        }
        Command::Verify { keypair, method, target } => verify::run(&cli, keypair, *method, target.as_deref()).await,
        Command::Lookup { wallet, card } => lookup::lookup(&cli, wallet, *card).await,
        Command::Card { wallet } => lookup::card(&cli, wallet).await,
        Command::List { cards, verified_only } => lookup::list(&cli, *cards, *verified_only).await,
        Command::Stats => lookup::stats(&cli).await,
        Command::Pda { wallet } => pda::run(&cli, wallet),
        Command::Doctor => doctor::run(&cli).await,
    }
}
