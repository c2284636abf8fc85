//! Product API routes.

use axum::{Json, extract::State};

use orchard_core::{DocumentId, Product};

use crate::catalog::CatalogProduct;
use crate::error::Result;
use crate::state::AppState;

/// List every product in the catalog.
///
/// GET /api/products
///
/// # Errors
///
/// Returns a 500-mapped error if the store is unreachable.
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<CatalogProduct>>> {
    Ok(Json(state.catalog().list().await?))
}

/// Validate and create a product; responds with its new id.
///
/// POST /api/products
///
/// # Errors
///
/// Returns a 400-mapped error for an invalid product and a 500-mapped error
/// on store failure.
pub async fn add_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<Json<DocumentId>> {
    let id = state.catalog().create(&product).await?;
    tracing::info!(product_id = %id, title = %product.title, "product created");
    Ok(Json(id))
}
