//! Order API routes.

use axum::{Json, extract::State};
use serde::Deserialize;

use orchard_core::{CartItem, CustomerInfo, DocumentId};

use crate::error::Result;
use crate::state::AppState;

/// Request body for order creation.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Cart entries to price and snapshot.
    pub items: Vec<CartItem>,
    /// Customer contact details.
    pub customer: CustomerInfo,
}

/// Assemble an order from a cart and persist it; responds with the new id.
///
/// POST /api/orders
///
/// # Errors
///
/// Returns a 400-mapped error for an empty cart or malformed product id, a
/// 404-mapped error for an unknown product, and a 500-mapped error on store
/// failure.
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<Json<DocumentId>> {
    let id = state.orders().assemble(&payload.items, payload.customer).await?;
    Ok(Json(id))
}
