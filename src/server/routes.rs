//! Route definitions for the API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Creates the main application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // Create CORS layer (the API is read-only and unauthenticated, so any
    // dashboard origin may call it)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with routes
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Impression breakdowns
        .route(
            "/api/analytics/channels",
            get(handlers::get_channel_impressions),
        )
        .route(
            "/api/analytics/regions",
            get(handlers::get_region_impressions),
        )
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
