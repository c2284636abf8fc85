//! Liveness and store diagnostics routes.
//!
//! Best-effort health adapter. Nothing here affects order-assembly
//! correctness; the diagnostics endpoint reports whatever the store says
//! about itself and always answers 200.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Liveness response body.
#[derive(Debug, Serialize)]
pub struct Liveness {
    message: &'static str,
}

/// Liveness message.
///
/// GET /
pub async fn root() -> Json<Liveness> {
    Json(Liveness {
        message: "Orchard Store backend is running",
    })
}

/// Diagnostics response body.
#[derive(Debug, Serialize)]
pub struct Diagnostics {
    backend: &'static str,
    database: &'static str,
    connection_status: &'static str,
    collections: Vec<String>,
}

/// Report document store connectivity.
///
/// GET /test
///
/// Always 200; connection problems are reported in the body.
pub async fn store_diagnostics(State(state): State<AppState>) -> Json<Diagnostics> {
    let report = state.store().diagnostics().await;

    let response = match report {
        Ok(report) if report.connected => Diagnostics {
            backend: "running",
            database: "available",
            connection_status: "connected",
            collections: report.collections,
        },
        Ok(_) => Diagnostics {
            backend: "running",
            database: "unavailable",
            connection_status: "disconnected",
            collections: Vec::new(),
        },
        Err(err) => {
            tracing::warn!(error = %err, "store diagnostics failed");
            Diagnostics {
                backend: "running",
                database: "error",
                connection_status: "disconnected",
                collections: Vec::new(),
            }
        }
    };

    Json(response)
}
