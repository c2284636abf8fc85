//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::ProductCatalog;
use crate::config::ApiConfig;
use crate::services::OrderService;
use crate::store::DocumentStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the configuration and the process-wide
/// document store handle, initialized once at startup and injected into the
/// catalog and order services built per request.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ApiConfig,
    store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create a new application state over a store backend.
    #[must_use]
    pub fn new(config: ApiConfig, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a handle to the document store.
    #[must_use]
    pub fn store(&self) -> Arc<dyn DocumentStore> {
        Arc::clone(&self.inner.store)
    }

    /// Build a product catalog over the configured products collection.
    #[must_use]
    pub fn catalog(&self) -> ProductCatalog {
        ProductCatalog::new(self.store(), self.inner.config.collections.products.as_str())
    }

    /// Build an order service over the configured collections.
    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::new(
            self.catalog(),
            self.store(),
            self.inner.config.collections.orders.as_str(),
        )
    }
}
