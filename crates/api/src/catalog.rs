//! Product catalog over the document store.
//!
//! Thin repository wrapper: validates products before the single write,
//! parses raw client ids before the single read, and never exposes the
//! store's internal document shape to callers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use orchard_core::{DocumentId, IdError, Product, ProductError};

use crate::store::{DocumentStore, StoreError};

/// Errors from catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A client-supplied id is not a well-formed store identifier.
    #[error("invalid product id: {id}")]
    InvalidId {
        /// The offending input.
        id: String,
        #[source]
        source: IdError,
    },

    /// No product with this id exists.
    #[error("product not found: {0}")]
    NotFound(DocumentId),

    /// The product fails catalog constraints.
    #[error("invalid product: {0}")]
    Validation(#[from] ProductError),

    /// A stored document no longer decodes as a product.
    #[error("data corruption: {0}")]
    Corrupt(String),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A catalog product together with its store-assigned id.
///
/// This is the shape the API returns; the store's internal document never
/// leaks through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogProduct {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// The product fields.
    #[serde(flatten)]
    pub product: Product,
}

/// Repository for catalog operations.
pub struct ProductCatalog {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl ProductCatalog {
    /// Create a catalog over a store and collection name.
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Validate and persist a product; returns its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the product fails field
    /// constraints, or `CatalogError::Store` if the write fails. Nothing is
    /// written on validation failure.
    pub async fn create(&self, product: &Product) -> Result<DocumentId, CatalogError> {
        product.validate()?;
        let doc = serde_json::to_value(product).map_err(StoreError::from)?;
        Ok(self.store.create(&self.collection, &doc).await?)
    }

    /// Resolve a raw client-supplied id to a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidId` if `raw_id` is malformed,
    /// `CatalogError::NotFound` if no product matches, and
    /// `CatalogError::Corrupt` if the stored document does not decode.
    pub async fn find(&self, raw_id: &str) -> Result<CatalogProduct, CatalogError> {
        let id = DocumentId::parse(raw_id).map_err(|source| CatalogError::InvalidId {
            id: raw_id.to_owned(),
            source,
        })?;

        let doc = self
            .store
            .find_one(&self.collection, id)
            .await?
            .ok_or(CatalogError::NotFound(id))?;

        let product: Product = serde_json::from_value(doc)
            .map_err(|e| CatalogError::Corrupt(format!("product {id} does not decode: {e}")))?;

        Ok(CatalogProduct { id, product })
    }

    /// List every product in the catalog, in store insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` on store failure and
    /// `CatalogError::Corrupt` if any stored document does not decode.
    pub async fn list(&self) -> Result<Vec<CatalogProduct>, CatalogError> {
        self.store
            .list(&self.collection)
            .await?
            .into_iter()
            .map(|stored| {
                let id = stored.id;
                let product: Product = serde_json::from_value(stored.doc).map_err(|e| {
                    CatalogError::Corrupt(format!("product {id} does not decode: {e}"))
                })?;
                Ok(CatalogProduct { id, product })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::store::memory::MemoryDocumentStore;

    use super::*;

    fn catalog(store: &MemoryDocumentStore) -> ProductCatalog {
        ProductCatalog::new(Arc::new(store.clone()), "product")
    }

    fn iphone() -> Product {
        Product {
            title: "iPhone 15".to_owned(),
            description: None,
            price: Decimal::new(79900, 2),
            category: "iPhone".to_owned(),
            in_stock: true,
            image: None,
            storage: Some("128GB".to_owned()),
            color: None,
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let store = MemoryDocumentStore::new();
        let catalog = catalog(&store);

        let id = catalog.create(&iphone()).await.unwrap();
        let found = catalog.find(&id.to_string()).await.unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.product, iphone());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_product() {
        let store = MemoryDocumentStore::new();
        let catalog = catalog(&store);

        let mut bad = iphone();
        bad.price = Decimal::new(-1, 0);
        assert!(matches!(
            catalog.create(&bad).await,
            Err(CatalogError::Validation(ProductError::NegativePrice(_)))
        ));
        // Validation failures never reach the store.
        assert!(store.is_empty("product"));
    }

    #[tokio::test]
    async fn test_find_malformed_id() {
        let store = MemoryDocumentStore::new();
        let result = catalog(&store).find("not-a-real-id").await;
        assert!(matches!(
            result,
            Err(CatalogError::InvalidId { ref id, .. }) if id == "not-a-real-id"
        ));
    }

    #[tokio::test]
    async fn test_find_unknown_id() {
        let store = MemoryDocumentStore::new();
        let missing = DocumentId::generate();
        let result = catalog(&store).find(&missing.to_string()).await;
        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == missing));
    }

    #[tokio::test]
    async fn test_list_returns_each_product_once_with_id() {
        let store = MemoryDocumentStore::new();
        let catalog = catalog(&store);

        let first = catalog.create(&iphone()).await.unwrap();
        let mut pro = iphone();
        pro.title = "iPhone 15 Pro".to_owned();
        let second = catalog.create(&pro).await.unwrap();

        let products = catalog.list().await.unwrap();
        assert_eq!(
            products.iter().map(|p| p.id).collect::<Vec<_>>(),
            vec![first, second]
        );
    }

    #[tokio::test]
    async fn test_serialized_product_has_id_and_no_internal_fields() {
        let store = MemoryDocumentStore::new();
        let catalog = catalog(&store);
        let id = catalog.create(&iphone()).await.unwrap();

        let listed = catalog.list().await.unwrap();
        let body = serde_json::to_value(&listed).unwrap();
        assert_eq!(body[0]["id"], json!(id.to_string()));
        assert_eq!(body[0]["title"], json!("iPhone 15"));
        assert!(body[0].get("_id").is_none());
        assert!(body[0].get("doc").is_none());
    }

    #[tokio::test]
    async fn test_corrupt_document() {
        let store = MemoryDocumentStore::new();
        let id = store
            .create("product", &json!({"nonsense": true}))
            .await
            .unwrap();
        let result = catalog(&store).find(&id.to_string()).await;
        assert!(matches!(result, Err(CatalogError::Corrupt(_))));
    }
}
