//! Generic document store.
//!
//! Products and orders are persisted as schemaless JSON documents in named
//! collections, keyed by an opaque [`DocumentId`]. The [`DocumentStore`]
//! trait is the only persistence seam the rest of the crate sees; backends
//! provide no transactions, no secondary indexes, and no filtering beyond
//! lookup-by-id.
//!
//! Two backends exist:
//! - [`postgres::PgDocumentStore`] - production, one JSONB table
//! - [`memory::MemoryDocumentStore`] - tests and local development

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use orchard_core::DocumentId;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backend rejected the operation or is unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A stored document together with its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// The document body.
    pub doc: Value,
}

/// Best-effort connection report backing the `/test` endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoreDiagnostics {
    /// Whether the backend answered a ping.
    pub connected: bool,
    /// Collection names known to the store (may be truncated).
    pub collections: Vec<String>,
}

/// Create/read/list over named collections of JSON documents.
///
/// Collection names are passed in explicitly; callers take them from
/// [`crate::config::Collections`] rather than deriving them from type
/// names.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Persist a document and return its newly assigned id.
    async fn create(&self, collection: &str, doc: &Value) -> Result<DocumentId, StoreError>;

    /// Look up a single document by id.
    ///
    /// Returns `Ok(None)` if no document with this id exists in the
    /// collection.
    async fn find_one(&self, collection: &str, id: DocumentId)
    -> Result<Option<Value>, StoreError>;

    /// List every document in a collection, in insertion order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Report connection state for the diagnostics endpoint.
    ///
    /// Backends answer best-effort: an unreachable store yields
    /// `connected: false` rather than an error.
    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError>;
}
