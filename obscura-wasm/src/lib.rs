//! WebAssembly bindings for the Obscura commitment protocol.
//!
//! This module runs the client-side half of the protocol directly in the
//! browser at capture time: derive a (secret, commitment) pair for a photo
//! hash, and sanity-check a binding before submitting a proof. The secret
//! never leaves the caller's context; registry calls are the host
//! application's job.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use obscura_core::{check, content_digest, generate, Secret, Word};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A freshly generated binding for one photo hash.
#[derive(Serialize, Deserialize)]
pub struct GeneratedCommitment {
    /// The photo hash the pair is bound to (hex)
    pub photo_hash: String,
    /// The secret to retain; proves ownership later (hex)
    pub secret: String,
    /// The commitment to submit to the registry (hex)
    pub commitment: String,
    /// Error message if generation failed
    pub error: Option<String>,
}

/// Result of a local commitment check.
#[derive(Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the secret opens the commitment for this hash
    pub valid: bool,
    /// Error message if the inputs could not be parsed
    pub error: Option<String>,
}

/// Compute the keccak256 content digest of raw photo bytes.
///
/// Returns the hex-encoded 256-bit hash to use as `photo_hash`.
#[wasm_bindgen]
pub fn hash_content(content: &[u8]) -> String {
    content_digest(content).to_hex()
}

/// Generate a (secret, commitment) pair for a photo hash.
///
/// # Arguments
/// * `photo_hash_hex` - The photo's content hash (hex, 32 bytes)
///
/// # Returns
/// A JSON string with `photo_hash`, `secret` and `commitment`; the caller
/// must retain the secret and submit only the commitment.
#[wasm_bindgen]
pub fn generate_commitment(photo_hash_hex: &str) -> String {
    let result = match generate_internal(photo_hash_hex) {
        Ok(result) => result,
        Err(e) => GeneratedCommitment {
            photo_hash: String::new(),
            secret: String::new(),
            commitment: String::new(),
            error: Some(e),
        },
    };

    serde_json::to_string(&result)
        .unwrap_or_else(|e| format!(r#"{{"error":"Serialization error: {}"}}"#, e))
}

fn generate_internal(photo_hash_hex: &str) -> Result<GeneratedCommitment, String> {
    let photo_hash =
        Word::from_hex(photo_hash_hex).map_err(|e| format!("Invalid photo hash: {}", e))?;

    let (secret, commitment) =
        generate(&photo_hash).map_err(|e| format!("Failed to generate secret: {}", e))?;

    Ok(GeneratedCommitment {
        photo_hash: photo_hash.to_hex(),
        secret: secret.to_hex(),
        commitment: commitment.to_hex(),
        error: None,
    })
}

/// Check a binding locally without revealing the secret anywhere.
///
/// # Arguments
/// * `photo_hash_hex` - The photo's content hash (hex, 32 bytes)
/// * `commitment_hex` - The stored commitment (hex, 32 bytes)
/// * `secret_hex` - The retained secret (hex, 32 bytes)
///
/// # Returns
/// A JSON string with a `valid` flag.
#[wasm_bindgen]
pub fn check_commitment(photo_hash_hex: &str, commitment_hex: &str, secret_hex: &str) -> String {
    let result = match check_internal(photo_hash_hex, commitment_hex, secret_hex) {
        Ok(valid) => CheckResult { valid, error: None },
        Err(e) => CheckResult {
            valid: false,
            error: Some(e),
        },
    };

    serde_json::to_string(&result)
        .unwrap_or_else(|_| r#"{"valid":false,"error":"Unknown error"}"#.to_string())
}

fn check_internal(
    photo_hash_hex: &str,
    commitment_hex: &str,
    secret_hex: &str,
) -> Result<bool, String> {
    let photo_hash =
        Word::from_hex(photo_hash_hex).map_err(|e| format!("Invalid photo hash: {}", e))?;
    let commitment =
        Word::from_hex(commitment_hex).map_err(|e| format!("Invalid commitment: {}", e))?;
    let secret = Secret::from_hex(secret_hex).map_err(|e| format!("Invalid secret: {}", e))?;

    Ok(check(&photo_hash, &commitment, &secret))
}

/// Get the library version.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_then_check_roundtrip() {
        let photo_hash = content_digest(b"browser capture").to_hex();

        let generated: GeneratedCommitment =
            serde_json::from_str(&generate_commitment(&photo_hash)).unwrap();
        assert!(generated.error.is_none());
        assert_eq!(generated.photo_hash, photo_hash);

        let checked: CheckResult = serde_json::from_str(&check_commitment(
            &photo_hash,
            &generated.commitment,
            &generated.secret,
        ))
        .unwrap();
        assert!(checked.valid);
    }

    #[test]
    fn test_check_rejects_wrong_secret() {
        let photo_hash = content_digest(b"browser capture").to_hex();
        let generated: GeneratedCommitment =
            serde_json::from_str(&generate_commitment(&photo_hash)).unwrap();

        let checked: CheckResult = serde_json::from_str(&check_commitment(
            &photo_hash,
            &generated.commitment,
            &"99".repeat(32),
        ))
        .unwrap();
        assert!(!checked.valid);
    }

    #[test]
    fn test_invalid_hash_reports_error() {
        let generated: GeneratedCommitment =
            serde_json::from_str(&generate_commitment("nope")).unwrap();
        assert!(generated.error.is_some());
    }

    #[test]
    fn test_hash_content_matches_keccak256() {
        // Known keccak256("abc") vector
        assert_eq!(
            hash_content(b"abc"),
            "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45"
        );
    }
}
