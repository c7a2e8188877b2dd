//! Fund routes.
//!
//! Every mutation invalidates the `funds` and `finance` cache tags before
//! reporting success, so derived views recompute on their next read.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use baitulmal_core::cache::ResourceTag;
use baitulmal_core::fund::{FundPatch, NewFund};
use baitulmal_db::repositories::{FundRepository, FundStoreError};

use super::{error_response, internal_error_response};
use crate::AppState;

/// Creates the fund routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/funds", get(list_funds).post(create_fund))
        .route("/funds/order", put(reorder_funds))
        .route(
            "/funds/{id}",
            get(get_fund).patch(update_fund).delete(delete_fund),
        )
}

/// Query parameters for listing funds.
#[derive(Debug, Deserialize)]
pub struct ListFundsQuery {
    /// Include deactivated funds in the listing.
    #[serde(default)]
    pub include_inactive: bool,
}

/// Request body for reordering funds.
#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    /// Fund IDs in the desired display order.
    pub ids: Vec<Uuid>,
}

/// Maps a fund store error to a JSON error response.
fn fund_error_response(err: &FundStoreError) -> Response {
    match err {
        FundStoreError::Domain(e) => {
            error_response(e.http_status_code(), e.error_code(), &e.to_string())
        }
        FundStoreError::Database(e) => {
            error!(error = %e, "Fund store database error");
            internal_error_response()
        }
        FundStoreError::Internal(msg) => {
            error!(message = %msg, "Fund store internal error");
            internal_error_response()
        }
    }
}

/// Publishes invalidation for everything a fund mutation can affect.
fn invalidate_fund_views(state: &AppState) {
    state.summaries.invalidate(ResourceTag::Funds);
    state.summaries.invalidate(ResourceTag::Finance);
}

/// GET /funds
async fn list_funds(
    State(state): State<AppState>,
    Query(query): Query<ListFundsQuery>,
) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.list_funds(query.include_inactive).await {
        Ok(funds) => (StatusCode::OK, Json(funds)).into_response(),
        Err(e) => fund_error_response(&e),
    }
}

/// POST /funds
async fn create_fund(
    State(state): State<AppState>,
    Json(input): Json<NewFund>,
) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.create_fund(input).await {
        Ok(fund) => {
            invalidate_fund_views(&state);
            (StatusCode::CREATED, Json(fund)).into_response()
        }
        Err(e) => fund_error_response(&e),
    }
}

/// GET /funds/{id}
async fn get_fund(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.get_fund(id).await {
        Ok(fund) => (StatusCode::OK, Json(fund)).into_response(),
        Err(e) => fund_error_response(&e),
    }
}

/// PATCH /funds/{id}
async fn update_fund(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FundPatch>,
) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.update_fund(id, patch).await {
        Ok(fund) => {
            invalidate_fund_views(&state);
            (StatusCode::OK, Json(fund)).into_response()
        }
        Err(e) => fund_error_response(&e),
    }
}

/// DELETE /funds/{id}
///
/// A fund still referenced by transactions is rejected with 409
/// `FUND_IN_USE`; the message tells the caller to deactivate instead.
async fn delete_fund(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.delete_fund(id).await {
        Ok(()) => {
            invalidate_fund_views(&state);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => fund_error_response(&e),
    }
}

/// PUT /funds/order
async fn reorder_funds(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> impl IntoResponse {
    let repo = FundRepository::new((*state.db).clone());

    match repo.reorder_funds(&request.ids).await {
        Ok(()) => {
            invalidate_fund_views(&state);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => fund_error_response(&e),
    }
}
