//! Report routes.
//!
//! Reads go through the summary cache: a cached view is served as-is, a
//! miss recomputes from the store and fills the cache. Mutations elsewhere
//! invalidate the `finance` tag, so the next read after any change
//! recomputes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use baitulmal_core::cache::ResourceTag;
use baitulmal_core::finance::{
    DateRange, FinanceSummary, monthly_series, summarize,
};
use baitulmal_db::repositories::{TransactionRepository, TransactionStoreError};

use super::{error_response, internal_error_response};
use crate::AppState;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/summary", get(get_summary))
        .route("/reports/monthly", get(get_monthly_series))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the period summary report.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Start date (defaults to the first day of the current month).
    pub from: Option<NaiveDate>,
    /// End date (defaults to today).
    pub to: Option<NaiveDate>,
}

/// Query parameters for the monthly series report.
#[derive(Debug, Deserialize)]
pub struct MonthlySeriesQuery {
    /// Calendar year to report on.
    pub year: i32,
}

// ============================================================================
// Response Types
// ============================================================================

/// One category's summed amount.
#[derive(Debug, Serialize)]
pub struct CategoryAmount {
    /// Category name.
    pub category: &'static str,
    /// Summed amount.
    pub amount: Decimal,
}

/// Response for the period summary report.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Range start (inclusive).
    pub from: NaiveDate,
    /// Range end (inclusive).
    pub to: NaiveDate,
    /// Total income in the period.
    pub total_income: Decimal,
    /// Total expense in the period.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub balance: Decimal,
    /// Income per category, in fixed category order.
    pub income_by_category: Vec<CategoryAmount>,
    /// Expense per category, in fixed category order.
    pub expense_by_category: Vec<CategoryAmount>,
}

/// One month within the yearly series.
#[derive(Debug, Serialize)]
pub struct MonthlyReportResponse {
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Total income in the month.
    pub total_income: Decimal,
    /// Total expense in the month.
    pub total_expense: Decimal,
    /// Income minus expense.
    pub balance: Decimal,
    /// Income per category, in fixed category order.
    pub income_by_category: Vec<CategoryAmount>,
    /// Expense per category, in fixed category order.
    pub expense_by_category: Vec<CategoryAmount>,
}

/// Response for the monthly series report.
#[derive(Debug, Serialize)]
pub struct MonthlySeriesResponse {
    /// The reported year.
    pub year: i32,
    /// One report per month, ascending. Chart rendering relies on this
    /// ordering.
    pub months: Vec<MonthlyReportResponse>,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn income_rows(summary: &FinanceSummary) -> Vec<CategoryAmount> {
    summary
        .income_by_category
        .iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.as_str(),
            amount: *amount,
        })
        .collect()
}

fn expense_rows(summary: &FinanceSummary) -> Vec<CategoryAmount> {
    summary
        .expense_by_category
        .iter()
        .map(|(category, amount)| CategoryAmount {
            category: category.as_str(),
            amount: *amount,
        })
        .collect()
}

fn store_error_response(err: &TransactionStoreError) -> Response {
    error!(error = %err, "Failed to load transactions for report");
    internal_error_response()
}

/// Serves a cached view or computes, caches, and serves a fresh one.
async fn cached_report<F>(
    state: &AppState,
    key: String,
    compute: F,
) -> Response
where
    F: AsyncFnOnce() -> Result<serde_json::Value, Response>,
{
    if let Some(cached) = state.summaries.get(ResourceTag::Finance, &key) {
        return (StatusCode::OK, Json((*cached).clone())).into_response();
    }

    match compute().await {
        Ok(value) => {
            state
                .summaries
                .insert(ResourceTag::Finance, key, value.clone());
            (StatusCode::OK, Json(value)).into_response()
        }
        Err(response) => response,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /reports/summary
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let from = query.from.unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today)
    });
    let to = query.to.unwrap_or(today);

    let range = match DateRange::new(from, to) {
        Ok(range) => range,
        Err(e) => {
            return error_response(e.http_status_code(), e.error_code(), &e.to_string());
        }
    };

    let key = format!("summary:{from}:{to}");
    cached_report(&state, key, async || {
        let repo = TransactionRepository::new((*state.db).clone());
        let transactions = repo
            .list_in_range(&range)
            .await
            .map_err(|e| store_error_response(&e))?;

        let summary = summarize(&transactions, &range);
        let response = SummaryResponse {
            from,
            to,
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            balance: summary.balance,
            income_by_category: income_rows(&summary),
            expense_by_category: expense_rows(&summary),
        };

        serde_json::to_value(response).map_err(|e| {
            error!(error = %e, "Failed to serialize summary report");
            internal_error_response()
        })
    })
    .await
}

/// GET /reports/monthly
async fn get_monthly_series(
    State(state): State<AppState>,
    Query(query): Query<MonthlySeriesQuery>,
) -> impl IntoResponse {
    let year = query.year;
    let Some(range) = DateRange::year(year) else {
        return error_response(400, "INVALID_RANGE", &format!("Year {year} is out of range"));
    };

    let key = format!("monthly:{year}");
    cached_report(&state, key, async || {
        let repo = TransactionRepository::new((*state.db).clone());
        let transactions = repo
            .list_in_range(&range)
            .await
            .map_err(|e| store_error_response(&e))?;

        let months = monthly_series(&transactions, year)
            .into_iter()
            .map(|report| MonthlyReportResponse {
                month: report.month,
                total_income: report.summary.total_income,
                total_expense: report.summary.total_expense,
                balance: report.summary.balance,
                income_by_category: income_rows(&report.summary),
                expense_by_category: expense_rows(&report.summary),
            })
            .collect();

        let response = MonthlySeriesResponse { year, months };
        serde_json::to_value(response).map_err(|e| {
            error!(error = %e, "Failed to serialize monthly report");
            internal_error_response()
        })
    })
    .await
}
