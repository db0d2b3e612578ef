//! Storage abstraction for attestation records.
//!
//! The registry owns the semantics (write-once, atomic counters); a store
//! only persists records and answers counts. The in-memory implementation
//! lives here and backs development and tests; obscura-server provides a
//! PostgreSQL implementation behind the same trait.

mod memory;

pub use memory::MemoryAttestationStore;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::registry::AttestationRecord;
use crate::types::{OwnerId, Word};

/// Durable mapping `photo_hash -> AttestationRecord` plus derived counters.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait AttestationStore: Send + Sync {
    /// Fetch the record for a photo hash, `None` when absent.
    async fn get(&self, photo_hash: &Word) -> Result<Option<AttestationRecord>, StoreError>;

    /// Insert the record if and only if the key is unpopulated.
    ///
    /// Returns `Ok(false)` without touching any state when a record already
    /// exists. The test-and-set must be atomic: concurrent inserts for the
    /// same hash admit exactly one winner.
    async fn insert_if_absent(
        &self,
        photo_hash: &Word,
        record: &AttestationRecord,
    ) -> Result<bool, StoreError>;

    /// Number of records registered by `owner`.
    async fn owner_count(&self, owner: &OwnerId) -> Result<u64, StoreError>;

    /// Total number of populated records.
    async fn total_count(&self) -> Result<u64, StoreError>;
}

#[async_trait]
impl<T: AttestationStore + ?Sized> AttestationStore for std::sync::Arc<T> {
    async fn get(&self, photo_hash: &Word) -> Result<Option<AttestationRecord>, StoreError> {
        (**self).get(photo_hash).await
    }

    async fn insert_if_absent(
        &self,
        photo_hash: &Word,
        record: &AttestationRecord,
    ) -> Result<bool, StoreError> {
        (**self).insert_if_absent(photo_hash, record).await
    }

    async fn owner_count(&self, owner: &OwnerId) -> Result<u64, StoreError> {
        (**self).owner_count(owner).await
    }

    async fn total_count(&self) -> Result<u64, StoreError> {
        (**self).total_count().await
    }
}
