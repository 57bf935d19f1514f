//! Salt, commitment and pending-record commands

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Subcommand;

use darkpool_commitment::{
    CommitmentOpening, Hash256, SaltPolicy, U256, check_salt_input, compute_nullifier,
};
use darkpool_config::{DarkpoolConfig, StorageBackendKind};
use darkpool_core::{CommitmentStore, FileBackend, MemoryBackend, StorageBackend};

#[derive(Subcommand, Debug)]
pub enum CommitmentCommand {
    /// Print the commitment and nullifier for an opening
    Compute {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        min_out: String,
        #[arg(long)]
        salt: String,
    },
    /// Check that an opening reproduces a known commitment
    Verify {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        min_out: String,
        #[arg(long)]
        salt: String,
        /// 32-byte hex commitment
        #[arg(long)]
        expected: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum PendingCommand {
    /// Print the pending commitment record
    Show {
        /// Include the salt in the output
        #[arg(long)]
        show_salt: bool,
    },
    /// Discard the pending record. Funds already committed on-chain stay there.
    Reset,
}

pub fn salt(config: &DarkpoolConfig, bits: Option<u16>) -> Result<()> {
    let policy = match bits {
        Some(bits) => SaltPolicy::new(bits)?,
        None => config.salt_policy()?,
    };
    println!("{}", policy.generate()?);
    Ok(())
}

pub fn run(cmd: CommitmentCommand) -> Result<()> {
    match cmd {
        CommitmentCommand::Compute {
            amount,
            min_out,
            salt,
        } => {
            let opening = CommitmentOpening::new(
                parse_u256("amount", &amount)?,
                parse_u256("min-out", &min_out)?,
                parse_u256("salt", &salt)?,
            );
            println!("commitment: {}", opening.commitment());
            println!("nullifier:  {}", opening.nullifier());
            Ok(())
        }
        CommitmentCommand::Verify {
            amount,
            min_out,
            salt,
            expected,
        } => {
            let expected: Hash256 = expected
                .parse()
                .context("expected must be 32 bytes of hex")?;
            let salt = check_salt_input(
                &salt,
                &parse_u256("amount", &amount)?,
                &parse_u256("min-out", &min_out)?,
                &expected,
            )?;
            println!("✅ opening matches {}", expected);
            println!("nullifier:  {}", compute_nullifier(&salt));
            Ok(())
        }
    }
}

pub fn nullifier(salt: &str) -> Result<()> {
    println!("{}", compute_nullifier(&parse_u256("salt", salt)?));
    Ok(())
}

pub fn pending(config: &DarkpoolConfig, cmd: PendingCommand) -> Result<()> {
    let store = open_store(config)?;
    match cmd {
        PendingCommand::Show { show_salt } => {
            let Some(record) = store.pending()? else {
                println!("No pending commitment");
                return Ok(());
            };
            println!("commitment:   {}", record.commitment);
            println!("nullifier:    {}", record.nullifier);
            println!("amount:       {}", record.amount);
            println!("min out:      {}", record.min_out);
            println!("pair:         {} -> {}", record.from_asset, record.to_asset);
            println!("reveal block: {}", record.reveal_block);
            if show_salt {
                println!("salt:         {}", record.salt);
            } else {
                println!("salt:         (hidden, pass --show-salt)");
            }
            Ok(())
        }
        PendingCommand::Reset => {
            if store.reset()? {
                println!("Pending commitment discarded");
            } else {
                println!("No pending commitment");
            }
            Ok(())
        }
    }
}

fn open_store(config: &DarkpoolConfig) -> Result<CommitmentStore<Box<dyn StorageBackend>>> {
    let backend: Box<dyn StorageBackend> = match config.storage.backend {
        StorageBackendKind::File => {
            let dir = PathBuf::from(&config.storage.path);
            Box::new(
                FileBackend::open(&dir)
                    .with_context(|| format!("Failed to open store at {}", dir.display()))?,
            )
        }
        StorageBackendKind::Memory => {
            tracing::warn!("memory storage selected; nothing persists between runs");
            Box::new(MemoryBackend::new())
        }
    };
    Ok(CommitmentStore::new(backend))
}

pub(crate) fn parse_u256(what: &str, raw: &str) -> Result<U256> {
    match raw.parse() {
        Ok(v) => Ok(v),
        Err(e) => bail!("invalid {}: {}", what, e),
    }
}
