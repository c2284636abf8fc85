//! Postgres-backed document store.
//!
//! All collections share a single `documents` table: `id UUID`,
//! `collection TEXT`, `doc JSONB`, plus a `seq BIGSERIAL` that fixes the
//! insertion order `list` reports. The schema lives in `migrations/` and is
//! applied at startup via the embedded [`MIGRATOR`].
//!
//! Queries use the runtime-checked sqlx API; the table shape is fixed by
//! the migration.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use orchard_core::DocumentId;

use super::{Document, DocumentStore, StoreDiagnostics, StoreError};

/// Embedded migrations for the `documents` table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// How many collection names the diagnostics report lists at most.
const DIAGNOSTICS_COLLECTION_LIMIT: i64 = 10;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Document store over a shared Postgres pool.
///
/// The pool is created once at startup and injected here; cloning is cheap
/// and every clone talks to the same pool.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, doc: &Value) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(collection)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Value>, StoreError> {
        let row: Option<(Value,)> =
            sqlx::query_as("SELECT doc FROM documents WHERE collection = $1 AND id = $2")
                .bind(collection)
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(doc,)| doc))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<(Uuid, Value)> =
            sqlx::query_as("SELECT id, doc FROM documents WHERE collection = $1 ORDER BY seq")
                .bind(collection)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows
            .into_iter()
            .map(|(id, doc)| Document {
                id: DocumentId::from(id),
                doc,
            })
            .collect())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError> {
        // Best-effort: an unreachable database is a report, not an error.
        if sqlx::query("SELECT 1").execute(&self.pool).await.is_err() {
            return Ok(StoreDiagnostics {
                connected: false,
                collections: Vec::new(),
            });
        }

        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT DISTINCT collection FROM documents ORDER BY collection LIMIT $1",
        )
        .bind(DIAGNOSTICS_COLLECTION_LIMIT)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_default();

        Ok(StoreDiagnostics {
            connected: true,
            collections: rows.into_iter().map(|(name,)| name).collect(),
        })
    }
}
