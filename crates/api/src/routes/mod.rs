//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Liveness message
//! GET  /test             - Document store diagnostics
//!
//! # Products
//! GET  /api/products     - List catalog products
//! POST /api/products     - Create a catalog product
//!
//! # Orders
//! POST /api/orders       - Assemble and persist an order
//! ```

pub mod diagnostics;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(diagnostics::root))
        .route("/test", get(diagnostics::store_diagnostics))
        .route(
            "/api/products",
            get(products::list_products).post(products::add_product),
        )
        .route("/api/orders", post(orders::create_order))
}
