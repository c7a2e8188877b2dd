//! API route definitions.

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::AppState;

pub mod funds;
pub mod health;
pub mod reports;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(funds::routes())
        .merge(transactions::routes())
        .merge(reports::routes())
}

/// Builds a JSON error response with a machine-readable code.
pub(crate) fn error_response(status: u16, code: &str, message: &str) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": code,
            "message": message,
        })),
    )
        .into_response()
}

/// Builds the generic 500 response for persistence failures.
///
/// Persistence failures are not retried here; the caller presents the
/// retry affordance.
pub(crate) fn internal_error_response() -> Response {
    error_response(500, "INTERNAL_ERROR", "An error occurred")
}
