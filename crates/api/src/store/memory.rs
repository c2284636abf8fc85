//! Thread-safe in-memory document store.
//!
//! Used by tests and local development where persistence is not required.
//! Collections are vectors, so insertion order falls out naturally.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;

use orchard_core::DocumentId;

use super::{Document, DocumentStore, StoreDiagnostics, StoreError};

/// In-memory document store.
///
/// Cloning is cheap; clones share the same underlying collections.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryDocumentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in a collection.
    ///
    /// Test helper for asserting that failed operations left nothing
    /// behind.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .expect("RwLock poisoned")
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Whether a collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, collection: &str, doc: &Value) -> Result<DocumentId, StoreError> {
        let id = DocumentId::generate();
        let mut collections = self.collections.write().expect("RwLock poisoned");
        collections
            .entry(collection.to_owned())
            .or_default()
            .push(Document {
                id,
                doc: doc.clone(),
            });
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: DocumentId,
    ) -> Result<Option<Value>, StoreError> {
        let collections = self.collections.read().expect("RwLock poisoned");
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .map(|d| d.doc.clone()))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().expect("RwLock poisoned");
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError> {
        let collections = self.collections.read().expect("RwLock poisoned");
        let mut names: Vec<String> = collections.keys().cloned().collect();
        names.sort_unstable();
        Ok(StoreDiagnostics {
            connected: true,
            collections: names,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryDocumentStore::new();
        let doc = json!({"title": "iPhone 15"});
        let id = store.create("product", &doc).await.unwrap();

        let found = store.find_one("product", id).await.unwrap();
        assert_eq!(found, Some(doc));
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let store = MemoryDocumentStore::new();
        let found = store
            .find_one("product", DocumentId::generate())
            .await
            .unwrap();
        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        let id = store.create("product", &json!({"a": 1})).await.unwrap();
        assert_eq!(store.find_one("order", id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = MemoryDocumentStore::new();
        let first = store.create("product", &json!({"n": 1})).await.unwrap();
        let second = store.create("product", &json!({"n": 2})).await.unwrap();

        let docs = store.list("product").await.unwrap();
        assert_eq!(
            docs.iter().map(|d| d.id).collect::<Vec<_>>(),
            vec![first, second]
        );
    }

    #[tokio::test]
    async fn test_diagnostics() {
        let store = MemoryDocumentStore::new();
        store.create("product", &json!({})).await.unwrap();
        store.create("order", &json!({})).await.unwrap();

        let report = store.diagnostics().await.unwrap();
        assert!(report.connected);
        assert_eq!(report.collections, vec!["order", "product"]);
    }
}
