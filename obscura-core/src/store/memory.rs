//! In-memory attestation store for development and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::AttestationStore;
use crate::error::StoreError;
use crate::registry::AttestationRecord;
use crate::types::{OwnerId, Word};

/// Non-persistent store; records are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryAttestationStore {
    records: DashMap<Word, AttestationRecord>,
    owner_counts: DashMap<OwnerId, u64>,
    total: AtomicU64,
}

impl MemoryAttestationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttestationStore for MemoryAttestationStore {
    async fn get(&self, photo_hash: &Word) -> Result<Option<AttestationRecord>, StoreError> {
        Ok(self.records.get(photo_hash).map(|entry| *entry.value()))
    }

    async fn insert_if_absent(
        &self,
        photo_hash: &Word,
        record: &AttestationRecord,
    ) -> Result<bool, StoreError> {
        match self.records.entry(*photo_hash) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(*record);
                *self.owner_counts.entry(record.owner).or_insert(0) += 1;
                self.total.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }
        }
    }

    async fn owner_count(&self, owner: &OwnerId) -> Result<u64, StoreError> {
        Ok(self.owner_counts.get(owner).map(|c| *c).unwrap_or(0))
    }

    async fn total_count(&self) -> Result<u64, StoreError> {
        Ok(self.total.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner: u8) -> AttestationRecord {
        AttestationRecord {
            verified_at: 1_700_000_000_000,
            owner: OwnerId::from_bytes([owner; 20]),
            commitment: Word::from_bytes([0xC0; 32]),
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = MemoryAttestationStore::new();
        let hash = Word::from_bytes([0x01; 32]);

        assert!(store.insert_if_absent(&hash, &record(1)).await.unwrap());
        assert_eq!(store.get(&hash).await.unwrap(), Some(record(1)));
    }

    #[tokio::test]
    async fn test_second_insert_is_rejected() {
        let store = MemoryAttestationStore::new();
        let hash = Word::from_bytes([0x01; 32]);

        assert!(store.insert_if_absent(&hash, &record(1)).await.unwrap());
        assert!(!store.insert_if_absent(&hash, &record(2)).await.unwrap());

        // Loser left no trace: record and counters still reflect the winner.
        assert_eq!(store.get(&hash).await.unwrap(), Some(record(1)));
        assert_eq!(store.total_count().await.unwrap(), 1);
        assert_eq!(
            store.owner_count(&OwnerId::from_bytes([2; 20])).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_counts_track_owners() {
        let store = MemoryAttestationStore::new();

        store
            .insert_if_absent(&Word::from_bytes([0x01; 32]), &record(1))
            .await
            .unwrap();
        store
            .insert_if_absent(&Word::from_bytes([0x02; 32]), &record(1))
            .await
            .unwrap();
        store
            .insert_if_absent(&Word::from_bytes([0x03; 32]), &record(2))
            .await
            .unwrap();

        assert_eq!(store.total_count().await.unwrap(), 3);
        assert_eq!(
            store.owner_count(&OwnerId::from_bytes([1; 20])).await.unwrap(),
            2
        );
        assert_eq!(
            store.owner_count(&OwnerId::from_bytes([2; 20])).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let store = MemoryAttestationStore::new();
        assert_eq!(
            store.get(&Word::from_bytes([0xFF; 32])).await.unwrap(),
            None
        );
    }
}
