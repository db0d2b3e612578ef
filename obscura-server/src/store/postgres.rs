//! PostgreSQL implementation of the attestation store.
//!
//! Write-once semantics come from the primary key on `photo_hash` combined
//! with `INSERT ... ON CONFLICT DO NOTHING`: exactly one concurrent insert
//! wins, the rest report the key as populated. Counters are derived from
//! the table, so they can never drift from the record population.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};

use obscura_core::{
    AttestationRecord, AttestationStore, OwnerId, StoreError, Word, OWNER_ID_BYTES, WORD_BYTES,
};

/// PostgreSQL-backed attestation store.
#[derive(Clone)]
pub struct PgAttestationStore {
    pool: PgPool,
}

/// Row type for database queries.
#[derive(FromRow)]
struct AttestationRow {
    verified_at: i64,
    owner_id: Vec<u8>,
    commitment: Vec<u8>,
}

impl AttestationRow {
    fn into_record(self) -> Result<AttestationRecord, StoreError> {
        if self.owner_id.len() != OWNER_ID_BYTES || self.commitment.len() != WORD_BYTES {
            return Err(StoreError::Query(format!(
                "corrupt attestation row: owner {} bytes, commitment {} bytes",
                self.owner_id.len(),
                self.commitment.len()
            )));
        }

        let mut owner = [0u8; OWNER_ID_BYTES];
        owner.copy_from_slice(&self.owner_id);
        let mut commitment = [0u8; WORD_BYTES];
        commitment.copy_from_slice(&self.commitment);

        Ok(AttestationRecord {
            verified_at: self.verified_at as u64,
            owner: OwnerId::from_bytes(owner),
            commitment: Word::from_bytes(commitment),
        })
    }
}

impl PgAttestationStore {
    /// Create a new store connected to the given database URL.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        tracing::info!("Connected to PostgreSQL database");
        Ok(Self { pool })
    }

    /// Create from an existing pool (for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Check database connection health.
    pub async fn check_health(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl AttestationStore for PgAttestationStore {
    async fn get(&self, photo_hash: &Word) -> Result<Option<AttestationRecord>, StoreError> {
        let row: Option<AttestationRow> = sqlx::query_as(
            r#"
            SELECT verified_at, owner_id, commitment
            FROM attestations
            WHERE photo_hash = $1
            "#,
        )
        .bind(photo_hash.as_bytes().as_slice())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        row.map(AttestationRow::into_record).transpose()
    }

    async fn insert_if_absent(
        &self,
        photo_hash: &Word,
        record: &AttestationRecord,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attestations (photo_hash, verified_at, owner_id, commitment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (photo_hash) DO NOTHING
            "#,
        )
        .bind(photo_hash.as_bytes().as_slice())
        .bind(record.verified_at as i64)
        .bind(record.owner.as_bytes().as_slice())
        .bind(record.commitment.as_bytes().as_slice())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn owner_count(&self, owner: &OwnerId) -> Result<u64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attestations WHERE owner_id = $1")
                .bind(owner.as_bytes().as_slice())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(count as u64)
    }

    async fn total_count(&self) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attestations")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(count as u64)
    }
}
