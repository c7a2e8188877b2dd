//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for funds, transactions, and reports
//! - Application state shared across handlers
//! - JSON error bodies with machine-readable error codes

pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use baitulmal_core::cache::SummaryCache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Recompute-on-next-read cache for report views.
    pub summaries: Arc<SummaryCache>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
