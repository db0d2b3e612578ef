//! Obscura CLI - photo provenance attestation tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod client;
mod commands;
mod exit_codes;
mod receipt;
mod utils;

use exit_codes::ExitCode;

const DEFAULT_REGISTRY_URL: &str = "http://127.0.0.1:3000";

const EXIT_CODES_HELP: &str = "Exit codes:
  0   success
  1   general error
  65  ownership proof failed or receipt corrupt
  66  cannot read input file
  69  registry, network, or blockchain unavailable
  74  cannot write output file";

#[derive(Parser)]
#[command(name = "obscura")]
#[command(author, version, about = "Photo provenance attestation", long_about = None)]
#[command(after_help = EXIT_CODES_HELP)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a photo and derive a commitment; writes a receipt next to the file
    Commit {
        /// Path to the photo file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Overwrite an existing receipt
        #[arg(long)]
        force: bool,
    },

    /// Register a receipt's hash and commitment with the registry
    Register {
        /// Path to the receipt file (.attest)
        #[arg(value_name = "RECEIPT")]
        receipt: PathBuf,

        /// Owner address recorded for the attestation (hex, 20 bytes)
        #[arg(long, env = "OBSCURA_OWNER")]
        owner: String,

        /// Registry base URL
        #[arg(long, env = "REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
        registry_url: String,
    },

    /// Prove ownership by revealing the receipt's secret to the registry
    Prove {
        /// Path to the receipt file (.attest)
        #[arg(value_name = "RECEIPT")]
        receipt: PathBuf,

        /// Only check the receipt locally; do not reveal the secret
        #[arg(long)]
        local: bool,

        /// Registry base URL
        #[arg(long, env = "REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
        registry_url: String,
    },

    /// Show the registry's attestation record for a receipt or hash
    Status {
        /// Receipt file path, or a photo hash (hex, 32 bytes)
        #[arg(value_name = "RECEIPT_OR_HASH")]
        target: String,

        /// Registry base URL
        #[arg(long, env = "REGISTRY_URL", default_value = DEFAULT_REGISTRY_URL)]
        registry_url: String,
    },

    /// Anchor the attestation tuple to Solana Devnet (external ledger)
    Anchor {
        /// Path to the receipt file (.attest)
        #[arg(value_name = "RECEIPT")]
        receipt: PathBuf,

        /// Update the receipt file with the transaction ID
        #[arg(long)]
        update_receipt: bool,

        /// Build and print the memo without sending a transaction
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Commit { file, force } => commands::commit::execute(file, force).await,
        Commands::Register {
            receipt,
            owner,
            registry_url,
        } => commands::register::execute(receipt, owner, registry_url).await,
        Commands::Prove {
            receipt,
            local,
            registry_url,
        } => commands::prove::execute(receipt, local, registry_url).await,
        Commands::Status {
            target,
            registry_url,
        } => commands::status::execute(target, registry_url).await,
        Commands::Anchor {
            receipt,
            update_receipt,
            dry_run,
        } => commands::anchor::execute(receipt, update_receipt, dry_run).await,
    };

    if let Err(err) = result {
        let exit = ExitCode::from_anyhow(&err);
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(exit.code);
    }
}
