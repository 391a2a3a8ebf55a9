//! Router configuration for the API.

use axum::{Router, http::Uri, middleware};

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::error::AppError;
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Global error handler - wraps plain-text errors in an envelope
///
/// # Routes
/// - `/health` - liveness check
/// - `/user/*` - reader account endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/user", handlers::user::user_routes(state.clone()))
        .fallback(route_not_found)
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        entity: "route".to_string(),
        field: "path".to_string(),
        value: uri.path().to_string(),
    }
}
