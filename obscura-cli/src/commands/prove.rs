//! Prove command - reveal the receipt's secret to prove ownership.

use std::path::PathBuf;

use anyhow::{bail, Result};
use colored::Colorize;
use tracing::debug;

use obscura_core::commitment;

use crate::client::RegistryClient;
use crate::receipt::Receipt;

/// Execute the prove command.
pub async fn execute(receipt_path: PathBuf, local: bool, registry_url: String) -> Result<()> {
    let receipt = Receipt::load(&receipt_path)?;
    let photo_hash = receipt.photo_hash()?;
    let committed = receipt.commitment()?;
    let secret = receipt.secret()?;

    // Sanity-check locally before revealing the secret anywhere.
    if !commitment::check(&photo_hash, &committed, &secret) {
        bail!("Ownership proof failed: receipt secret does not open its own commitment");
    }
    debug!(photo_hash = %photo_hash, "Local commitment check passed");

    if local {
        println!();
        println!("{}", "Local check passed.".green().bold());
        println!();
        println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
        println!(
            "   {}",
            "The secret was not revealed; run without --local to prove against the registry."
                .dimmed()
        );
        return Ok(());
    }

    // Revealing the secret here discloses it to the registry and anyone
    // observing the call; that is inherent to the commitment scheme.
    let client = RegistryClient::new(&registry_url)?;
    let valid = client.verify_proof(&photo_hash, &secret.reveal()).await?;

    if !valid {
        bail!("Ownership proof failed: the registry rejected the revealed secret");
    }

    println!();
    println!("{}", "Ownership proven!".green().bold());
    println!();
    println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
    println!("   {} {}", "Registry:".dimmed(), registry_url);

    Ok(())
}
