//! Transaction routes.
//!
//! Every mutation invalidates the `finance` cache tag before reporting
//! success.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::error;
use uuid::Uuid;

use baitulmal_core::cache::ResourceTag;
use baitulmal_core::finance::{Category, NewTransaction, TransactionPatch, TransactionType};
use baitulmal_db::repositories::{
    TransactionFilter, TransactionRepository, TransactionStoreError,
};
use baitulmal_shared::types::{PageRequest, PageResponse};

use super::{error_response, internal_error_response};
use crate::AppState;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .route(
            "/transactions/{id}",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by fund attribution.
    pub fund_id: Option<Uuid>,
    /// Filter by transaction type (`income` or `expense`).
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// Filter by category.
    pub category: Option<String>,
    /// Filter by date range start (inclusive).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (inclusive).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Maps a transaction store error to a JSON error response.
fn transaction_error_response(err: &TransactionStoreError) -> Response {
    match err {
        TransactionStoreError::Domain(e) => {
            error_response(e.http_status_code(), e.error_code(), &e.to_string())
        }
        TransactionStoreError::Fund(e) => {
            error_response(e.http_status_code(), e.error_code(), &e.to_string())
        }
        TransactionStoreError::NotFound(id) => error_response(
            404,
            "TRANSACTION_NOT_FOUND",
            &format!("Transaction not found: {id}"),
        ),
        TransactionStoreError::Database(e) => {
            error!(error = %e, "Transaction store database error");
            internal_error_response()
        }
        TransactionStoreError::Internal(msg) => {
            error!(message = %msg, "Transaction store internal error");
            internal_error_response()
        }
    }
}

/// GET /transactions
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let mut filter = TransactionFilter {
        fund_id: query.fund_id,
        date_from: query.from,
        date_to: query.to,
        ..TransactionFilter::default()
    };

    if let Some(raw) = &query.transaction_type {
        match raw.parse::<TransactionType>() {
            Ok(tx_type) => filter.transaction_type = Some(tx_type),
            Err(e) => {
                return error_response(e.http_status_code(), e.error_code(), &e.to_string());
            }
        }
    }
    if let Some(raw) = &query.category {
        match raw.parse::<Category>() {
            Ok(category) => filter.category = Some(category),
            Err(e) => {
                return error_response(e.http_status_code(), e.error_code(), &e.to_string());
            }
        }
    }

    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(20).clamp(1, 100),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list_transactions(&filter, &page).await {
        Ok((items, total)) => {
            let response = PageResponse::new(items, page.page, page.per_page, total);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// POST /transactions
async fn create_transaction(
    State(state): State<AppState>,
    Json(input): Json<NewTransaction>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.create_transaction(input).await {
        Ok(transaction) => {
            state.summaries.invalidate(ResourceTag::Finance);
            (StatusCode::CREATED, Json(transaction)).into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// GET /transactions/{id}
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.get_transaction(id).await {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(e) => transaction_error_response(&e),
    }
}

/// PATCH /transactions/{id}
async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<TransactionPatch>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.update_transaction(id, patch).await {
        Ok(transaction) => {
            state.summaries.invalidate(ResourceTag::Finance);
            (StatusCode::OK, Json(transaction)).into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}

/// DELETE /transactions/{id}
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());

    match repo.delete_transaction(id).await {
        Ok(()) => {
            state.summaries.invalidate(ResourceTag::Finance);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => transaction_error_response(&e),
    }
}
