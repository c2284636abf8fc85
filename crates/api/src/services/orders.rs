//! Order assembly.
//!
//! Turns a client-submitted cart into a persisted order with a
//! server-computed price snapshot and total. Client input contributes only
//! product references and quantities; every price and title in the stored
//! order comes from the catalog at assembly time.
//!
//! There is no isolation between the per-item catalog reads and the final
//! order write: a product's price can change in between, and the snapshot
//! written here is the price observed during this call. That staleness is
//! accepted for this domain.

use std::sync::Arc;

use thiserror::Error;

use orchard_core::{CartItem, CustomerInfo, DocumentId, EmptyOrder, Order, OrderItem};

use crate::catalog::{CatalogError, ProductCatalog};
use crate::store::{DocumentStore, StoreError};

/// Title recorded for a product whose stored title is blank.
const FALLBACK_TITLE: &str = "Product";

/// Errors from order assembly.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The submitted cart has no items.
    #[error(transparent)]
    EmptyCart(#[from] EmptyOrder),

    /// A cart item failed to resolve (malformed id, unknown product).
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The assembled order could not be persisted.
    #[error("failed to persist order: {0}")]
    Store(#[from] StoreError),
}

/// Assembles and persists orders.
pub struct OrderService {
    catalog: ProductCatalog,
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl OrderService {
    /// Create an order service over a store and the orders collection name.
    pub fn new(
        catalog: ProductCatalog,
        store: Arc<dyn DocumentStore>,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            store,
            collection: collection.into(),
        }
    }

    /// Assemble an order from a cart and persist it once.
    ///
    /// Each cart item is resolved against the catalog in input order, one
    /// read per item, and snapshotted with the product's current title and
    /// price. Quantities below 1 are clamped up to 1. The total is the sum
    /// of line totals rounded to 2 decimal places (round-half-up, see
    /// [`Order::from_items`]).
    ///
    /// Exactly one write happens, and only after every item resolved: any
    /// failure aborts the assembly with nothing persisted.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyCart`] for an empty cart (before any store
    ///   access)
    /// - [`OrderError::Catalog`] for a malformed or unknown product id
    /// - [`OrderError::Store`] if the final write fails
    pub async fn assemble(
        &self,
        cart: &[CartItem],
        customer: CustomerInfo,
    ) -> Result<DocumentId, OrderError> {
        if cart.is_empty() {
            return Err(EmptyOrder.into());
        }

        let mut items = Vec::with_capacity(cart.len());
        for cart_item in cart {
            let found = self.catalog.find(&cart_item.product_id).await?;

            let title = if found.product.title.trim().is_empty() {
                FALLBACK_TITLE.to_owned()
            } else {
                found.product.title
            };

            items.push(OrderItem {
                product_id: found.id,
                title,
                price: found.product.price,
                quantity: cart_item.clamped_quantity(),
            });
        }

        let order = Order::from_items(items, customer)?;

        let doc = serde_json::to_value(&order).map_err(StoreError::from)?;
        let id = self.store.create(&self.collection, &doc).await?;

        tracing::info!(
            order_id = %id,
            items = order.items.len(),
            total = %order.total,
            "order created"
        );

        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use orchard_core::{DocumentId, Email, Product};

    use crate::store::memory::MemoryDocumentStore;
    use crate::store::{Document, StoreDiagnostics};

    use super::*;

    const PRODUCTS: &str = "product";
    const ORDERS: &str = "order";

    fn service(store: &MemoryDocumentStore) -> OrderService {
        let store: Arc<dyn DocumentStore> = Arc::new(store.clone());
        OrderService::new(
            ProductCatalog::new(Arc::clone(&store), PRODUCTS),
            store,
            ORDERS,
        )
    }

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ada Lovelace".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            address: "12 Analytical Way".to_owned(),
        }
    }

    fn cart_item(id: &str, quantity: i64) -> CartItem {
        CartItem {
            product_id: id.to_owned(),
            quantity,
        }
    }

    async fn seed_product(store: &MemoryDocumentStore, title: &str, price: &str) -> DocumentId {
        let product = Product {
            title: title.to_owned(),
            description: None,
            price: price.parse().unwrap(),
            category: "iPhone".to_owned(),
            in_stock: true,
            image: None,
            storage: None,
            color: None,
        };
        store
            .create(PRODUCTS, &serde_json::to_value(&product).unwrap())
            .await
            .unwrap()
    }

    async fn stored_order(store: &MemoryDocumentStore, id: DocumentId) -> Order {
        let doc = store.find_one(ORDERS, id).await.unwrap().unwrap();
        serde_json::from_value(doc).unwrap()
    }

    #[tokio::test]
    async fn test_assemble_snapshots_product() {
        let store = MemoryDocumentStore::new();
        let p1 = seed_product(&store, "iPhone 15", "799.00").await;

        let id = service(&store)
            .assemble(&[cart_item(&p1.to_string(), 2)], customer())
            .await
            .unwrap();

        let order = stored_order(&store, id).await;
        assert_eq!(order.items.len(), 1);
        let line = &order.items[0];
        assert_eq!(line.product_id, p1);
        assert_eq!(line.title, "iPhone 15");
        assert_eq!(line.price, Decimal::new(79900, 2));
        assert_eq!(line.quantity, 2);
        assert_eq!(order.total, Decimal::new(159_800, 2));
        assert_eq!(order.status, orchard_core::OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_assemble_two_products() {
        let store = MemoryDocumentStore::new();
        let p1 = seed_product(&store, "Case", "10.00").await;
        let p2 = seed_product(&store, "Charger", "20.50").await;

        let id = service(&store)
            .assemble(
                &[cart_item(&p1.to_string(), 1), cart_item(&p2.to_string(), 3)],
                customer(),
            )
            .await
            .unwrap();

        // 10.00 + 61.50 = 71.50
        let order = stored_order(&store, id).await;
        assert_eq!(order.total, Decimal::new(7150, 2));
        assert_eq!(
            order.items.iter().map(|i| i.product_id).collect::<Vec<_>>(),
            vec![p1, p2]
        );
    }

    #[tokio::test]
    async fn test_assemble_clamps_negative_quantity() {
        let store = MemoryDocumentStore::new();
        let p1 = seed_product(&store, "iPhone 15 Pro", "999.00").await;

        let id = service(&store)
            .assemble(&[cart_item(&p1.to_string(), -3)], customer())
            .await
            .unwrap();

        let order = stored_order(&store, id).await;
        assert_eq!(order.items[0].quantity, 1);
        assert_eq!(order.total, Decimal::new(99900, 2));
    }

    #[tokio::test]
    async fn test_assemble_empty_cart() {
        let store = MemoryDocumentStore::new();
        let result = service(&store).assemble(&[], customer()).await;
        assert!(matches!(result, Err(OrderError::EmptyCart(_))));
        assert!(store.is_empty(ORDERS));
    }

    #[tokio::test]
    async fn test_assemble_malformed_id_aborts_without_write() {
        let store = MemoryDocumentStore::new();
        let p1 = seed_product(&store, "iPhone 15", "799.00").await;

        let result = service(&store)
            .assemble(
                &[cart_item(&p1.to_string(), 1), cart_item("garbage", 1)],
                customer(),
            )
            .await;

        assert!(matches!(
            result,
            Err(OrderError::Catalog(CatalogError::InvalidId { .. }))
        ));
        assert!(store.is_empty(ORDERS));
    }

    #[tokio::test]
    async fn test_assemble_unknown_product_aborts_without_write() {
        let store = MemoryDocumentStore::new();
        seed_product(&store, "iPhone 15", "799.00").await;
        let missing = DocumentId::generate();

        let result = service(&store)
            .assemble(&[cart_item(&missing.to_string(), 1)], customer())
            .await;

        assert!(matches!(
            result,
            Err(OrderError::Catalog(CatalogError::NotFound(id))) if id == missing
        ));
        assert!(store.is_empty(ORDERS));
    }

    #[tokio::test]
    async fn test_assemble_blank_title_snapshot_falls_back() {
        let store = MemoryDocumentStore::new();
        // Seed a raw document that predates title validation.
        let id = store
            .create(PRODUCTS, &json!({"title": "", "price": "5.00"}))
            .await
            .unwrap();

        let order_id = service(&store)
            .assemble(&[cart_item(&id.to_string(), 1)], customer())
            .await
            .unwrap();

        let order = stored_order(&store, order_id).await;
        assert_eq!(order.items[0].title, "Product");
    }

    /// Store wrapper whose writes fail, for exercising persistence errors.
    struct ReadOnlyStore(MemoryDocumentStore);

    #[async_trait]
    impl DocumentStore for ReadOnlyStore {
        async fn create(&self, _: &str, _: &Value) -> Result<DocumentId, StoreError> {
            Err(StoreError::Unavailable("write rejected".to_owned()))
        }

        async fn find_one(
            &self,
            collection: &str,
            id: DocumentId,
        ) -> Result<Option<Value>, StoreError> {
            self.0.find_one(collection, id).await
        }

        async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
            self.0.list(collection).await
        }

        async fn diagnostics(&self) -> Result<StoreDiagnostics, StoreError> {
            self.0.diagnostics().await
        }
    }

    #[tokio::test]
    async fn test_assemble_surfaces_write_failure() {
        let inner = MemoryDocumentStore::new();
        let p1 = seed_product(&inner, "iPhone 15", "799.00").await;

        let failing: Arc<dyn DocumentStore> = Arc::new(ReadOnlyStore(inner.clone()));
        let service = OrderService::new(
            ProductCatalog::new(Arc::clone(&failing), PRODUCTS),
            failing,
            ORDERS,
        );

        let result = service
            .assemble(&[cart_item(&p1.to_string(), 1)], customer())
            .await;
        assert!(matches!(result, Err(OrderError::Store(_))));
        assert!(inner.is_empty(ORDERS));
    }
}
