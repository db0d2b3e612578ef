//! Commit command - hash a photo and derive its commitment.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing::{debug, info};

use obscura_core::commitment;

use crate::receipt::Receipt;
use crate::utils::build_receipt_path;

/// Execute the commit command.
pub async fn execute(file: PathBuf, force: bool) -> Result<()> {
    // Read the file content
    let content =
        std::fs::read(&file).with_context(|| format!("Failed to read file: {}", file.display()))?;

    info!(path = %file.display(), bytes = content.len(), "Read file");

    let receipt_path = build_receipt_path(&file);
    if receipt_path.exists() && !force {
        bail!(
            "Receipt already exists: {} (use --force to overwrite and discard its secret)",
            receipt_path.display()
        );
    }

    // Hash the content and derive the binding
    let photo_hash = commitment::content_digest(&content);
    debug!(photo_hash = %photo_hash, "Computed content digest");

    let (secret, committed) = commitment::generate(&photo_hash)
        .context("Failed to generate commitment")?;

    let receipt = Receipt::new(photo_hash, &secret, committed);
    receipt
        .save(&receipt_path)
        .context("Failed to write receipt")?;

    info!(path = %receipt_path.display(), "Receipt saved");

    println!();
    println!("{}", "Commitment generated!".green().bold());
    println!();
    println!("   {} {}", "Receipt saved:".dimmed(), receipt_path.display());
    println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
    println!("   {} {}", "Commitment:".dimmed(), committed);
    println!();
    println!(
        "   {}",
        "Keep the receipt private: it holds the secret that proves ownership.".yellow()
    );
    println!(
        "   {}",
        "If it is lost, the attestation stays valid but the proof is gone forever.".dimmed()
    );

    Ok(())
}
