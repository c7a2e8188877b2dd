//! Transactions, categories, and period aggregation.
//!
//! This module implements the finance ledger core:
//! - Domain types for income/expense transactions
//! - Category universe, partitioned by transaction type
//! - Input validation rules
//! - Pure aggregation into period summaries and monthly series
//! - Error types for finance operations

pub mod error;
pub mod service;
pub mod summary;
pub mod types;

#[cfg(test)]
mod summary_props;

pub use error::FinanceError;
pub use service::FinanceService;
pub use summary::{
    DateRange, FinanceSummary, MonthlyFinanceReport, monthly_series, summarize,
};
pub use types::{
    Category, ExpenseCategory, IncomeCategory, NewTransaction, PaymentMethod, Transaction,
    TransactionPatch, TransactionType,
};
