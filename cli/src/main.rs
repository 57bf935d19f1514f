//! Dark-pool CLI
//!
//! Offline tooling around the commit/reveal flow: salts, commitments and
//! nullifiers, the pending-commitment record, and Groth16 proof handling.

mod commitment;
mod proof;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use darkpool_config::DarkpoolConfig;

#[derive(Parser, Debug)]
#[command(name = "darkpool")]
#[command(about = "Dark-pool commitment and proof tooling", long_about = None)]
struct Cli {
    /// Config file (defaults to DP_CONFIG, ./darkpool.toml, ~/.darkpool/config.toml)
    #[arg(long, global = true, env = "DP_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a fresh random salt
    Salt {
        /// Random bits (128..=256); defaults to commitment.salt_bits
        #[arg(long)]
        bits: Option<u16>,
    },
    /// Compute or check an order commitment
    #[command(subcommand)]
    Commitment(commitment::CommitmentCommand),
    /// Compute the nullifier for a salt
    Nullifier {
        #[arg(long)]
        salt: String,
    },
    /// Inspect or discard the locally stored pending commitment
    #[command(subcommand)]
    Pending(commitment::PendingCommand),
    /// Convert public signals between native and verifier order
    Signals {
        /// Decimal signal values
        #[arg(required = true)]
        values: Vec<String>,
        /// Treat the values as verifier order and convert back
        #[arg(long)]
        inverse: bool,
    },
    /// Generate, verify or pack Groth16 proofs
    #[command(subcommand)]
    Proof(proof::ProofCommand),
    /// Config file helpers
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print a sample config file
    Sample,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Config(ConfigCommand::Sample) = cli.command {
        print!("{}", DarkpoolConfig::generate_sample());
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => DarkpoolConfig::load_from(path)?,
        None => DarkpoolConfig::load()?,
    };

    match cli.command {
        Command::Salt { bits } => commitment::salt(&config, bits),
        Command::Commitment(cmd) => commitment::run(cmd),
        Command::Nullifier { salt } => commitment::nullifier(&salt),
        Command::Pending(cmd) => commitment::pending(&config, cmd),
        Command::Signals { values, inverse } => proof::reorder(&config, &values, inverse),
        Command::Proof(cmd) => proof::run(&config, cmd).await,
        Command::Config(_) => Ok(()),
    }
}
