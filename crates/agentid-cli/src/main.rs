use anyhow::Result;

mod args;
mod cmd;
mod io;
mod output;
mod solana;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = args::Cli::parse_args();
    output::init(cli.json);
    output::init_logging(cli.verbose);

    cmd::dispatch(cli).await
}
