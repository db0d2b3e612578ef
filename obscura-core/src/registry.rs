//! Append-only attestation registry.
//!
//! Single source of truth for "hash X was attested by identity Y at time T
//! with commitment C", and the authority for ownership-proof checks. The
//! per-key state machine is `Unregistered -> Registered` and `Registered`
//! is terminal: no revoke, no update, no transfer. The guarantee is
//! immutability of provenance, not mutability of ownership.
//!
//! Caller identity and ledger time are explicit inputs to [`register`];
//! the registry reads no ambient context, so it runs unchanged against any
//! [`AttestationStore`] and in tests without a host.
//!
//! [`register`]: AttestationRegistry::register

use crate::commitment::commitment_digest;
use crate::error::{RegistryError, Result};
use crate::store::AttestationStore;
use crate::types::{OwnerId, Word};

/// One attestation per photo hash.
///
/// All fields are immutable once written. A zeroed record (in particular
/// `verified_at == 0`) means "no record"; the ledger clock is always
/// positive, so the sentinel is never a legitimate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttestationRecord {
    /// Ledger clock at write time, Unix epoch milliseconds. Zero ⇒ absent.
    pub verified_at: u64,
    /// Identity of the registering caller.
    pub owner: OwnerId,
    /// `keccak256(photo_hash ‖ secret)`, opaque to the registry: never
    /// decomposed, only re-derived and compared at proof time.
    pub commitment: Word,
}

impl AttestationRecord {
    /// The zeroed record returned for absent keys.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_present(&self) -> bool {
        self.verified_at != 0
    }
}

/// The attestation registry over an injected store.
pub struct AttestationRegistry<S> {
    store: S,
}

impl<S: AttestationStore> AttestationRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a photo hash with its commitment.
    ///
    /// `caller` and `ledger_time` come from the host (identity provider and
    /// ledger clock). Fails with [`RegistryError::AlreadyRegistered`] when a
    /// record exists, with no partial state change; the stored record keeps
    /// its original owner, timestamp and commitment. Returns the assigned
    /// `verified_at`.
    pub async fn register(
        &self,
        photo_hash: Word,
        commitment: Word,
        caller: OwnerId,
        ledger_time: u64,
    ) -> Result<u64> {
        if ledger_time == 0 {
            return Err(RegistryError::InvalidTimestamp(ledger_time));
        }

        let record = AttestationRecord {
            verified_at: ledger_time,
            owner: caller,
            commitment,
        };

        if !self.store.insert_if_absent(&photo_hash, &record).await? {
            return Err(RegistryError::AlreadyRegistered(photo_hash));
        }

        tracing::debug!(
            photo_hash = %photo_hash,
            owner = %caller,
            verified_at = ledger_time,
            "Attestation registered"
        );

        Ok(ledger_time)
    }

    /// Pure lookup; zeroed record when absent, never a "not found" error.
    pub async fn get_attestation(&self, photo_hash: &Word) -> Result<AttestationRecord> {
        Ok(self.store.get(photo_hash).await?.unwrap_or_default())
    }

    /// Whether a record exists for this hash.
    pub async fn is_verified(&self, photo_hash: &Word) -> Result<bool> {
        Ok(self.get_attestation(photo_hash).await?.is_present())
    }

    /// Owner of the record, or the zero identity when absent.
    pub async fn get_owner_of(&self, photo_hash: &Word) -> Result<OwnerId> {
        Ok(self.get_attestation(photo_hash).await?.owner)
    }

    /// Ownership proof: recompute `keccak256(photo_hash ‖ secret)` and
    /// compare byte-for-byte against the stored commitment.
    ///
    /// Returns `false`, not an error, for absent records and wrong
    /// secrets alike. Read-only and freely repeatable: third parties may
    /// call it any number of times without cost or side effects, and a
    /// false result carries no signal about which part of the guess was
    /// wrong.
    pub async fn verify_proof(&self, photo_hash: &Word, secret: &Word) -> Result<bool> {
        let record = match self.store.get(photo_hash).await? {
            Some(record) => record,
            None => return Ok(false),
        };

        Ok(commitment_digest(photo_hash, secret) == record.commitment)
    }

    /// Number of records registered by `owner`.
    pub async fn owner_photo_count(&self, owner: &OwnerId) -> Result<u64> {
        Ok(self.store.owner_count(owner).await?)
    }

    /// Total number of registered photo hashes.
    pub async fn photo_count(&self) -> Result<u64> {
        Ok(self.store.total_count().await?)
    }
}
