//! System endpoints: health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `"healthy"` when the store answers, `"degraded"` otherwise.
    pub status: String,
    /// Store backend in use (`postgres` or `memory`).
    pub storage: String,
    /// Crate version.
    pub version: String,
}

/// `GET /health` — Liveness plus a round trip to the booking store.
///
/// Needs no token.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports the service version and whether the booking store is reachable.",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (status, code) = match state.store.ping().await {
        Ok(()) => ("healthy", StatusCode::OK),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            ("degraded", StatusCode::SERVICE_UNAVAILABLE)
        }
    };
    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            storage: state.store.backend().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
