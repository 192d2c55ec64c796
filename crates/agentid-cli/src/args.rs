use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(name = "agentid", version, about = "Agent identity CLI")]
pub struct Cli {
    /// Emit JSON output on stdout.
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Cluster: devnet|testnet|mainnet|localnet
    #[arg(long, global = true, env = "AGENTID_CLUSTER", default_value = "devnet")]
    pub cluster: String,

    /// RPC endpoint; overrides the cluster default.
    #[arg(long, global = true, env = "AGENTID_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Identity program id.
    #[arg(long, global = true, env = "AGENTID_PROGRAM_ID")]
    pub program_id: Option<String>,

    /// Treasury receiving verification fees.
    #[arg(long, global = true, env = "AGENTID_TREASURY")]
    pub treasury: Option<String>,

    /// Commitment: processed|confirmed|finalized
    #[arg(long, global = true, default_value = "confirmed")]
    pub commitment: String,

    /// Bare metadata host that must be fetched under `www.` (repeatable).
    #[arg(long = "www-host", global = true)]
    pub www_hosts: Vec<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate or inspect wallet files.
    #[command(subcommand)]
    Wallet(WalletCommand),

    /// Register an existing, funded wallet.
    Register {
        /// Wallet file (JSON byte array).
        #[arg(long, env = "AGENTID_KEYPAIR")]
        keypair: String,
        /// Metadata URI pointing at the agent card.
        #[arg(long)]
        uri: String,
        /// Separate wallet paying fees; signs alongside the agent wallet.
        #[arg(long)]
        funder: Option<String>,
    },

    /// Create a new agent wallet, fund it, and register it.
    Create {
        /// Wallet paying rent and fees.
        #[arg(long, env = "AGENTID_KEYPAIR")]
        funder: String,
        #[arg(long)]
        uri: String,
        /// Where to save the new wallet.
        #[arg(long)]
        out: Option<String>,
        /// Overwrite an existing `--out` file.
        #[arg(long)]
        force: bool,
        /// Also fund and submit verification.
        #[arg(long)]
        verify: bool,
        /// Extra lamports sent to the new wallet.
        #[arg(long, default_value_t = 0)]
        extra_lamports: u64,
    },

    /// Submit verification, optionally after an off-chain ownership proof.
    Verify {
        #[arg(long, env = "AGENTID_KEYPAIR")]
        keypair: String,
        #[arg(long, value_enum)]
        method: Option<ProofMethod>,
        /// Profile URL (social), domain (domain), or owner/repo[@ref][:path] (repo).
        #[arg(long)]
        target: Option<String>,
    },

    /// Look up the identity of a wallet.
    Lookup {
        wallet: String,
        /// Also fetch the agent card.
        #[arg(long)]
        card: bool,
    },

    /// Fetch the agent card of a wallet.
    Card { wallet: String },

    /// List all registered identities.
    List {
        /// Fetch agent cards concurrently.
        #[arg(long)]
        cards: bool,
        #[arg(long)]
        verified_only: bool,
    },

    /// Count registered and verified identities.
    Stats,

    /// Print the identity PDA of a wallet.
    Pda { wallet: String },

    /// Check configuration and RPC connectivity.
    Doctor,
}

#[derive(Subcommand, Debug, Clone)]
pub enum WalletCommand {
    /// Generate a new wallet file.
    New {
        #[arg(long, default_value = "agent-wallet.json")]
        out: String,
        #[arg(long)]
        force: bool,
    },
    /// Print the public key of a wallet file.
    Show { path: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofMethod {
    /// Profile page must mention the wallet.
    Social,
    /// https://<domain>/.well-known/agent-identity.json must name the wallet.
    Domain,
    /// A file in a GitHub repository must mention the wallet.
    Repo,
}

impl ProofMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Social => "social",
            Self::Domain => "domain",
            Self::Repo => "repo",
        }
    }
}
