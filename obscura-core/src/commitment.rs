//! Client-side commitment protocol.
//!
//! At capture time the client draws a random 256-bit [`Secret`], derives
//! `commitment = keccak256(photo_hash ‖ secret)` and submits only the
//! commitment to the registry. Revealing the secret later proves the caller
//! generated the original binding. The derivation hashes the concatenation
//! of the two 32-byte values (a single 64-byte preimage), never the values
//! separately, so a secret cannot be mixed and matched across photo hashes.
//!
//! This is a hash commitment, not a zero-knowledge proof: revealing the
//! secret during a proof check discloses it to any observer of that call.
//! Callers depend on exactly this trade-off; do not strengthen it here.

use std::fmt;

use sha3::{Digest, Keccak256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CommitmentError;
use crate::types::{ParseValueError, Word, WORD_BYTES};

/// 256-bit client-held secret, zeroized on drop.
///
/// The registry never stores it; losing it permanently disables the
/// ownership proof for the bound hash while leaving the attestation record
/// itself intact. How callers store the secret is outside this crate's
/// contract.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; WORD_BYTES]);

impl Secret {
    /// Draw a fresh secret from the OS entropy source over the full
    /// 256-bit space.
    pub fn generate() -> Result<Self, CommitmentError> {
        let mut bytes = [0u8; WORD_BYTES];
        getrandom::fill(&mut bytes)
            .map_err(|e| CommitmentError::EntropyUnavailable(e.to_string()))?;
        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ParseValueError> {
        Word::from_hex(s).map(|w| Self(w.0))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Copy the secret out as a plain [`Word`] for a proof submission.
    ///
    /// The copy is not zeroized; call this only at the point of reveal.
    pub fn reveal(&self) -> Word {
        Word(self.0)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

/// Compute `keccak256(photo_hash ‖ secret)` over the 64-byte concatenation.
///
/// Shared by [`generate`]/[`check`] on the client and the registry's proof
/// check; both sides must produce byte-identical digests.
pub fn commitment_digest(photo_hash: &Word, secret: &Word) -> Word {
    let mut hasher = Keccak256::new();
    hasher.update(photo_hash.as_bytes());
    hasher.update(secret.as_bytes());
    let digest = hasher.finalize();

    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&digest);
    Word(out)
}

/// Keccak-256 content digest of raw media bytes.
///
/// Convenience for clients that hash captured content locally before
/// registration; the registry itself never recomputes content hashes.
pub fn content_digest(content: &[u8]) -> Word {
    let mut hasher = Keccak256::new();
    hasher.update(content);
    let digest = hasher.finalize();

    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&digest);
    Word(out)
}

/// Generate a fresh (secret, commitment) pair for a photo hash.
///
/// The caller is responsible for submitting the commitment to the registry
/// and retaining the secret indefinitely.
pub fn generate(photo_hash: &Word) -> Result<(Secret, Word), CommitmentError> {
    let secret = Secret::generate()?;
    let commitment = commitment_digest(photo_hash, &secret.reveal());
    Ok((secret, commitment))
}

/// Local pre-submission check: does this secret open this commitment?
///
/// Identical computation to the registry's proof check, with no network
/// round trip; useful as a sanity pass before revealing the secret.
pub fn check(photo_hash: &Word, commitment: &Word, secret: &Secret) -> bool {
    commitment_digest(photo_hash, &secret.reveal()) == *commitment
}

#[cfg(test)]
mod tests {
    use super::*;

    // Independently computed keccak256(0xAA..AA ‖ 0x11..11); pins the
    // derivation so it cannot drift from the ledger's recompute.
    const DIGEST_AA_11: &str = "1ffe515422bec9c1f262bbd464ae9986bc7277a39eb22df243526de89b2da5f9";
    const DIGEST_AA_22: &str = "7b88860d4280ebb0ab4a65ddae9853952423658eea7321b20f253c2bfef1822e";

    #[test]
    fn test_commitment_digest_matches_reference_vectors() {
        let photo_hash = Word::from_bytes([0xAA; 32]);

        let digest = commitment_digest(&photo_hash, &Word::from_bytes([0x11; 32]));
        assert_eq!(digest.to_hex(), DIGEST_AA_11);

        let digest = commitment_digest(&photo_hash, &Word::from_bytes([0x22; 32]));
        assert_eq!(digest.to_hex(), DIGEST_AA_22);
    }

    #[test]
    fn test_generate_produces_checkable_pair() {
        let photo_hash = Word::from_bytes([0x5C; 32]);
        let (secret, commitment) = generate(&photo_hash).unwrap();

        assert!(check(&photo_hash, &commitment, &secret));
    }

    #[test]
    fn test_wrong_secret_fails_check() {
        let photo_hash = Word::from_bytes([0x5C; 32]);
        let (_, commitment) = generate(&photo_hash).unwrap();

        let other = Secret::from_bytes([0x99; 32]);
        assert!(!check(&photo_hash, &commitment, &other));
    }

    #[test]
    fn test_same_secret_different_hash_fails_check() {
        let (secret, commitment) = generate(&Word::from_bytes([0x01; 32])).unwrap();

        assert!(!check(&Word::from_bytes([0x02; 32]), &commitment, &secret));
    }

    #[test]
    fn test_generated_secrets_are_distinct() {
        let photo_hash = Word::from_bytes([0x5C; 32]);
        let (a, _) = generate(&photo_hash).unwrap();
        let (b, _) = generate(&photo_hash).unwrap();

        assert_ne!(a.reveal(), b.reveal());
    }

    #[test]
    fn test_secret_hex_roundtrip() {
        let secret = Secret::from_bytes([0x11; 32]);
        let restored = Secret::from_hex(&secret.to_hex()).unwrap();
        assert_eq!(secret.reveal(), restored.reveal());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::from_bytes([0x11; 32]);
        assert_eq!(format!("{:?}", secret), "Secret(..)");
    }

    #[test]
    fn test_content_digest_differs_per_content() {
        assert_ne!(content_digest(b"Content A"), content_digest(b"Content B"));
        assert_eq!(content_digest(b"Content A"), content_digest(b"Content A"));
    }
}
