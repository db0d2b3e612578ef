//! Obscura Core - photo attestation registry and commitment protocol
//!
//! This crate provides the core of the Obscura provenance system: an
//! append-only registry binding a photo's content hash to a caller identity,
//! a ledger timestamp and a hash commitment, plus the client-side protocol
//! that generates the commitment and later proves ownership by revealing
//! its secret.
//!
//! # Features
//!
//! - Write-once attestation records keyed by 256-bit photo hash
//! - Hash-commitment ownership proofs (`keccak256(photo_hash ‖ secret)`)
//! - Injected storage abstraction with an in-memory implementation
//! - Secure secret zeroization on drop
//!
//! # Example
//!
//! ```no_run
//! use obscura_core::{commitment, AttestationRegistry, MemoryAttestationStore, OwnerId};
//!
//! # async fn example() -> obscura_core::Result<()> {
//! let registry = AttestationRegistry::new(MemoryAttestationStore::new());
//!
//! // Client side: hash the capture, derive a (secret, commitment) pair.
//! let photo_hash = commitment::content_digest(b"raw image bytes");
//! let (secret, committed) = commitment::generate(&photo_hash).expect("entropy");
//!
//! // Register the binding; identity and ledger time come from the host.
//! let owner = OwnerId::from_bytes([0x42; 20]);
//! registry.register(photo_hash, committed, owner, 1_700_000_000_000).await?;
//!
//! // Later: reveal the secret to prove ownership.
//! assert!(registry.verify_proof(&photo_hash, &secret.reveal()).await?);
//! # Ok(())
//! # }
//! ```

pub mod commitment;
pub mod error;
#[cfg(feature = "registry")]
pub mod registry;
#[cfg(feature = "registry")]
pub mod store;
pub mod types;

// Re-export main types for convenience
pub use commitment::{check, commitment_digest, content_digest, generate, Secret};
pub use error::CommitmentError;
pub use types::{OwnerId, ParseValueError, Word, OWNER_ID_BYTES, WORD_BYTES};

#[cfg(feature = "registry")]
pub use error::{RegistryError, Result, StoreError};
#[cfg(feature = "registry")]
pub use registry::{AttestationRecord, AttestationRegistry};
#[cfg(feature = "registry")]
pub use store::{AttestationStore, MemoryAttestationStore};
