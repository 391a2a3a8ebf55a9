//! Liveness check.

use axum::{Json, Router, routing::get};

use crate::api::dto::HealthResponse;
use crate::state::AppState;

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
