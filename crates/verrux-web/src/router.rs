//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    catalog::api_catalog,
    health::health,
    predict::api_predict,
    rank::api_rank,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/health",      get(health))

        // API endpoints
        .route("/api/catalog", get(api_catalog))
        .route("/api/predict", post(api_predict))
        .route("/api/rank",    post(api_rank))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
