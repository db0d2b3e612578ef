//! Registry storage backends.
//!
//! Attestations persist in PostgreSQL when `DATABASE_URL` is set; otherwise
//! the server falls back to the in-memory store from obscura-core (useful
//! for development, but records are lost on restart).

mod postgres;

pub use postgres::PgAttestationStore;

use async_trait::async_trait;
use obscura_core::{
    AttestationRecord, AttestationStore, MemoryAttestationStore, OwnerId, StoreError, Word,
};

use crate::config::Config;

/// Storage backend behind the attestation registry.
pub enum RegistryStore {
    /// PostgreSQL storage (production)
    Postgres(PgAttestationStore),
    /// In-memory storage (development fallback)
    Memory(MemoryAttestationStore),
}

impl RegistryStore {
    /// Create storage with PostgreSQL backend.
    pub async fn with_postgres(database_url: &str, config: &Config) -> Result<Self, StoreError> {
        let pg_store =
            PgAttestationStore::new(database_url, config.database_max_connections).await?;
        pg_store.migrate().await?;

        Ok(Self::Postgres(pg_store))
    }

    /// Create storage with in-memory backend (development only).
    pub fn in_memory() -> Self {
        tracing::warn!("Using in-memory attestation storage - records will be lost on restart!");
        Self::Memory(MemoryAttestationStore::new())
    }

    /// Create storage from environment.
    ///
    /// Uses PostgreSQL if `DATABASE_URL` is set, otherwise falls back to
    /// in-memory.
    pub async fn from_env(config: &Config) -> Result<Self, StoreError> {
        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.is_empty() => {
                tracing::info!("Using PostgreSQL attestation storage");
                Self::with_postgres(&url, config).await
            }
            _ => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage");
                Ok(Self::in_memory())
            }
        }
    }

    /// Check if using persistent storage.
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Postgres(_))
    }

    /// Check storage health (always Ok for the memory backend).
    pub async fn check_health(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pg) => pg.check_health().await,
            Self::Memory(_) => Ok(()),
        }
    }
}

#[async_trait]
impl AttestationStore for RegistryStore {
    async fn get(&self, photo_hash: &Word) -> Result<Option<AttestationRecord>, StoreError> {
        match self {
            Self::Postgres(pg) => pg.get(photo_hash).await,
            Self::Memory(mem) => mem.get(photo_hash).await,
        }
    }

    async fn insert_if_absent(
        &self,
        photo_hash: &Word,
        record: &AttestationRecord,
    ) -> Result<bool, StoreError> {
        match self {
            Self::Postgres(pg) => pg.insert_if_absent(photo_hash, record).await,
            Self::Memory(mem) => mem.insert_if_absent(photo_hash, record).await,
        }
    }

    async fn owner_count(&self, owner: &OwnerId) -> Result<u64, StoreError> {
        match self {
            Self::Postgres(pg) => pg.owner_count(owner).await,
            Self::Memory(mem) => mem.owner_count(owner).await,
        }
    }

    async fn total_count(&self) -> Result<u64, StoreError> {
        match self {
            Self::Postgres(pg) => pg.total_count().await,
            Self::Memory(mem) => mem.total_count().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_is_not_persistent() {
        let store = RegistryStore::in_memory();
        assert!(!store.is_persistent());
    }
}
