//! Draftwise HTTP API server.
//!
//! Exposes the draft advisor as a small REST API: a knowledge-base meta
//! report, a role-assignment solver, and next-action recommendations.

pub mod error;
pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the complete axum router with all API routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/draft/meta", get(routes::draft::meta))
        .route("/draft/assign", post(routes::draft::assign))
        .route("/draft/recommend", post(routes::draft::recommend))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
