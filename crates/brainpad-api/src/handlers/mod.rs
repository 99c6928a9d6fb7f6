//! HTTP handlers for brainpad-api.

pub mod notes;

use axum::Json;

use brainpad_core::HealthResponse;

pub use notes::{create_note, delete_note, list_notes, search_notes, update_note};

/// Liveness check.
#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse)))]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
