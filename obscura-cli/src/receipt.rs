//! Capture receipts.
//!
//! A receipt is the client's durable record of one capture: the photo hash,
//! the commitment submitted to the registry, and the secret that opens it.
//! It lives next to the photo as `<file>.attest` (pretty JSON, hex-encoded
//! values). The secret is stored in the clear; the registry makes no
//! confidentiality claim about client-side storage, and losing this file
//! permanently forfeits the ownership proof for the hash while leaving the
//! attestation record itself valid.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use obscura_core::{Secret, Word};

/// Current receipt format version.
pub const RECEIPT_VERSION: u32 = 1;

/// Registration outcome recorded after a successful (or no-op) register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationInfo {
    /// Ledger timestamp assigned by the registry (Unix epoch milliseconds)
    pub verified_at: u64,
    /// Owner recorded for the attestation (hex)
    pub owner: String,
    /// Registry the record lives in
    pub registry_url: String,
}

/// External anchor reference (separate, differently-keyed ledger).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorInfo {
    /// Chain identifier (e.g., "solana-devnet")
    pub chain: String,
    /// Transaction ID carrying the memo
    pub tx_id: String,
}

/// Client-side record of one capture binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    /// Receipt format version
    pub version: u32,
    /// Keccak-256 content digest of the photo bytes (hex)
    pub photo_hash: String,
    /// Client-held secret; keep this file private (hex)
    pub secret: String,
    /// `keccak256(photo_hash ‖ secret)` as submitted to the registry (hex)
    pub commitment: String,
    /// When the commitment was generated (RFC 3339)
    pub created_at: String,
    /// Set once the hash is registered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<RegistrationInfo>,
    /// Set once anchored to an external ledger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<AnchorInfo>,
}

impl Receipt {
    /// Build a fresh receipt for a newly generated binding.
    pub fn new(photo_hash: Word, secret: &Secret, commitment: Word) -> Self {
        Self {
            version: RECEIPT_VERSION,
            photo_hash: photo_hash.to_hex(),
            secret: secret.to_hex(),
            commitment: commitment.to_hex(),
            created_at: chrono::Utc::now().to_rfc3339(),
            registration: None,
            anchor: None,
        }
    }

    /// Load and parse a receipt file.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read receipt file: {}", path.display()))?;

        let receipt: Receipt = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse receipt file: {}", path.display()))?;

        Ok(receipt)
    }

    /// Write the receipt as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize receipt")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write receipt file: {}", path.display()))?;
        Ok(())
    }

    pub fn photo_hash(&self) -> Result<Word> {
        Word::from_hex(&self.photo_hash).context("Receipt has a malformed photo_hash")
    }

    pub fn commitment(&self) -> Result<Word> {
        Word::from_hex(&self.commitment).context("Receipt has a malformed commitment")
    }

    pub fn secret(&self) -> Result<Secret> {
        Secret::from_hex(&self.secret).context("Receipt has a malformed secret")
    }
}
