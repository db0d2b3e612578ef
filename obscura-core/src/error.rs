use thiserror::Error;

#[cfg(feature = "registry")]
use crate::types::Word;

/// Errors from the client-side commitment protocol.
#[derive(Debug, Error)]
pub enum CommitmentError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Errors from the attestation registry.
///
/// Absence is not an error: lookups on unregistered hashes return zeroed
/// values, and a failed ownership proof is a plain `false`. The only write
/// failure is a duplicate registration.
#[cfg(feature = "registry")]
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A record already exists for this photo hash; writes are once-only.
    #[error("photo hash {0} is already registered")]
    AlreadyRegistered(Word),

    /// The ledger clock is always positive; zero is the absent sentinel.
    #[error("ledger time must be positive, got {0}")]
    InvalidTimestamp(u64),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Storage-layer errors, distinct from registry semantics.
#[cfg(feature = "registry")]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage connection error: {0}")]
    Connection(String),

    #[error("storage migration error: {0}")]
    Migration(String),

    #[error("storage query error: {0}")]
    Query(String),
}

#[cfg(feature = "registry")]
pub type Result<T> = std::result::Result<T, RegistryError>;
