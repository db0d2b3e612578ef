//! Anchor command - publish the attestation tuple to Solana.
//!
//! This is the optional external attestation path: the same
//! (photo hash, commitment) pair recorded in a separate, differently-keyed
//! ledger. The registry neither depends on nor observes it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use solana_client::rpc_client::RpcClient;
#[allow(deprecated)]
use solana_sdk::system_instruction;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    message::Message,
    native_token::LAMPORTS_PER_SOL,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use spl_memo::build_memo;

use crate::receipt::{AnchorInfo, Receipt};

/// Solana Devnet RPC endpoint.
const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Airdrop amount in SOL.
const AIRDROP_SOL: u64 = 1;

/// Maximum retries for airdrop.
const AIRDROP_RETRIES: u32 = 3;

/// Execute the anchor command.
pub async fn execute(receipt_path: PathBuf, update_receipt: bool, dry_run: bool) -> Result<()> {
    println!(
        "{}",
        format!("🔏 Loading receipt from {}", receipt_path.display()).dimmed()
    );

    let receipt = Receipt::load(&receipt_path)?;
    let photo_hash = receipt.photo_hash()?;
    let committed = receipt.commitment()?;

    // Memo carries the same tuple the registry stores; the secret stays home.
    let memo_text = format!("OBSCURA:{}:{}", photo_hash.to_hex(), committed.to_hex());

    if dry_run {
        println!();
        println!("{}", "Dry run - no transaction sent.".yellow().bold());
        println!();
        println!("   {} {}", "Memo:".dimmed(), memo_text);
        println!("   {} {}", "Cluster:".dimmed(), "solana-devnet");
        return Ok(());
    }

    // Generate a burner keypair
    println!("{}", "🔑 Generating burner keypair...".dimmed());
    let payer = Keypair::new();
    println!("{}", format!("   Pubkey: {}", payer.pubkey()).dimmed());

    // Connect to Devnet
    println!("{}", "🌐 Connecting to Solana Devnet...".dimmed());
    let client = RpcClient::new_with_timeout_and_commitment(
        DEVNET_RPC_URL.to_string(),
        Duration::from_secs(30),
        CommitmentConfig::confirmed(),
    );

    // Request airdrop
    println!(
        "{}",
        format!("💰 Requesting {} SOL airdrop...", AIRDROP_SOL).dimmed()
    );
    request_airdrop_with_retry(&client, &payer.pubkey(), AIRDROP_SOL)?;

    // Wait for airdrop to confirm
    println!("{}", "⏳ Waiting for airdrop confirmation...".dimmed());
    wait_for_balance(&client, &payer.pubkey(), AIRDROP_SOL * LAMPORTS_PER_SOL)?;

    // Build the memo instruction
    let memo_ix = build_memo(memo_text.as_bytes(), &[&payer.pubkey()]);

    // Build a minimal transfer instruction (0 SOL to self, just to carry the memo)
    let transfer_ix = system_instruction::transfer(&payer.pubkey(), &payer.pubkey(), 0);

    // Build and send the transaction
    println!("{}", "📤 Sending transaction...".dimmed());
    let recent_blockhash = client
        .get_latest_blockhash()
        .context("Failed to get recent blockhash")?;

    let message = Message::new(&[transfer_ix, memo_ix], Some(&payer.pubkey()));
    let transaction = Transaction::new(&[&payer], message, recent_blockhash);

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .context("Failed to send transaction")?;

    let tx_id = signature.to_string();
    let explorer_url = format!("https://explorer.solana.com/tx/{}?cluster=devnet", tx_id);

    // Success!
    println!();
    println!("{}", "⚓ Anchored to Solana Devnet!".green().bold());
    println!();
    println!("   {} {}", "Transaction:".dimmed(), tx_id);
    println!("   {} {}", "Explorer:".dimmed(), explorer_url.cyan());
    println!("   {} {}", "Memo:".dimmed(), memo_text);

    // Optionally update the receipt file
    if update_receipt {
        update_receipt_with_anchor(&receipt_path, &receipt, &tx_id)?;
        println!();
        println!("{}", "📝 Updated receipt with anchor reference".green());
    }

    Ok(())
}

/// Request airdrop with retries.
fn request_airdrop_with_retry(client: &RpcClient, pubkey: &Pubkey, sol_amount: u64) -> Result<()> {
    let lamports = sol_amount * LAMPORTS_PER_SOL;

    for attempt in 1..=AIRDROP_RETRIES {
        match client.request_airdrop(pubkey, lamports) {
            Ok(sig) => {
                println!(
                    "{}",
                    format!("   Airdrop requested (attempt {}): {}", attempt, sig).dimmed()
                );
                return Ok(());
            }
            Err(e) => {
                if attempt == AIRDROP_RETRIES {
                    bail!("Airdrop failed after {} attempts: {}", AIRDROP_RETRIES, e);
                }
                println!(
                    "{}",
                    format!("   Airdrop attempt {} failed, retrying...", attempt).yellow()
                );
                std::thread::sleep(Duration::from_secs(2));
            }
        }
    }

    unreachable!()
}

/// Wait for the account to have at least the specified balance.
fn wait_for_balance(client: &RpcClient, pubkey: &Pubkey, min_lamports: u64) -> Result<()> {
    for _ in 0..30 {
        match client.get_balance(pubkey) {
            Ok(balance) if balance >= min_lamports => {
                println!(
                    "{}",
                    format!(
                        "   Balance: {} SOL",
                        balance as f64 / LAMPORTS_PER_SOL as f64
                    )
                    .dimmed()
                );
                return Ok(());
            }
            _ => {
                std::thread::sleep(Duration::from_millis(500));
            }
        }
    }

    bail!("Timeout waiting for airdrop to confirm")
}

/// Update the receipt file with the anchor reference.
fn update_receipt_with_anchor(receipt_path: &Path, receipt: &Receipt, tx_id: &str) -> Result<()> {
    let mut updated = receipt.clone();
    updated.anchor = Some(AnchorInfo {
        chain: "solana-devnet".to_string(),
        tx_id: tx_id.to_string(),
    });
    updated.save(receipt_path)
}
