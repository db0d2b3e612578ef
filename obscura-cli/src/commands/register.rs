//! Register command - submit a receipt's binding to the registry.
//!
//! The pipeline is idempotent per photo hash: a hash that is already
//! registered is treated as success-with-no-op, whether we learn that from
//! the pre-check or from losing the write race. Nothing here rolls back an
//! earlier step.

use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{debug, info};

use obscura_core::OwnerId;

use crate::client::{RegisterOutcome, RegistryClient};
use crate::receipt::{Receipt, RegistrationInfo};
use crate::utils::format_timestamp;

/// Execute the register command.
pub async fn execute(receipt_path: PathBuf, owner: String, registry_url: String) -> Result<()> {
    let mut receipt = Receipt::load(&receipt_path)?;
    let photo_hash = receipt.photo_hash()?;
    let commitment = receipt.commitment()?;

    let owner = OwnerId::from_hex(owner.trim())
        .context("Invalid owner address (expected 20 bytes of hex)")?;

    let client = RegistryClient::new(&registry_url)?;

    // Re-attempts must be no-ops: check before writing.
    if client.is_verified(&photo_hash).await? {
        debug!(photo_hash = %photo_hash, "Hash already registered");
        let info = client.get_attestation(&photo_hash).await?;
        finish_already_registered(&receipt_path, &mut receipt, &registry_url, &info.owner, info.verified_at)?;
        return Ok(());
    }

    match client.register(&photo_hash, &commitment, &owner).await? {
        RegisterOutcome::Registered { verified_at } => {
            info!(photo_hash = %photo_hash, verified_at, "Attestation registered");

            receipt.registration = Some(RegistrationInfo {
                verified_at,
                owner: owner.to_hex(),
                registry_url: registry_url.clone(),
            });
            receipt.save(&receipt_path)?;

            println!();
            println!("{}", "Attestation registered!".green().bold());
            println!();
            println!("   {} {}", "Photo hash:".dimmed(), photo_hash);
            println!("   {} {}", "Owner:".dimmed(), owner);
            println!(
                "   {} {}",
                "Verified at:".dimmed(),
                format_timestamp(verified_at)
            );
        }
        RegisterOutcome::AlreadyRegistered => {
            // Lost the ordering race; the record exists, which is what we wanted.
            let info = client.get_attestation(&photo_hash).await?;
            finish_already_registered(&receipt_path, &mut receipt, &registry_url, &info.owner, info.verified_at)?;
        }
    }

    Ok(())
}

fn finish_already_registered(
    receipt_path: &std::path::Path,
    receipt: &mut Receipt,
    registry_url: &str,
    owner: &str,
    verified_at: u64,
) -> Result<()> {
    if receipt.registration.is_none() {
        receipt.registration = Some(RegistrationInfo {
            verified_at,
            owner: owner.trim_start_matches("0x").to_string(),
            registry_url: registry_url.to_string(),
        });
        receipt.save(receipt_path)?;
    }

    println!();
    println!("{}", "Already registered - nothing to do.".yellow().bold());
    println!();
    println!("   {} {}", "Owner:".dimmed(), owner);
    println!(
        "   {} {}",
        "Verified at:".dimmed(),
        format_timestamp(verified_at)
    );

    Ok(())
}
