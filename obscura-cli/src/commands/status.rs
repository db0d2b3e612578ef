//! Status command - read-only registry lookup.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use obscura_core::Word;

use crate::client::RegistryClient;
use crate::receipt::Receipt;
use crate::utils::format_timestamp;

/// Execute the status command.
///
/// `target` is either a receipt file path or a bare photo hash.
pub async fn execute(target: String, registry_url: String) -> Result<()> {
    let photo_hash = if Path::new(&target).exists() {
        Receipt::load(Path::new(&target))?.photo_hash()?
    } else {
        Word::from_hex(target.trim())
            .context("Target is neither a readable receipt file nor a 32-byte hex hash")?
    };

    let client = RegistryClient::new(&registry_url)?;
    let info = client.get_attestation(&photo_hash).await?;

    println!();
    if info.verified {
        println!("{}", "Registered".green().bold());
        println!();
        println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
        println!("   {} {}", "Owner:".dimmed(), info.owner);
        println!(
            "   {} {}",
            "Verified at:".dimmed(),
            format_timestamp(info.verified_at)
        );
        println!("   {} {}", "Commitment:".dimmed(), info.commitment);
    } else {
        println!("{}", "Not registered".yellow().bold());
        println!();
        println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
    }

    Ok(())
}
