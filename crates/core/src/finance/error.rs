//! Finance error types for validation and reporting errors.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{Category, TransactionType};

/// Errors that can occur during finance operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinanceError {
    // ========== Validation Errors ==========
    /// Transaction description is required.
    #[error("Transaction description must not be empty")]
    EmptyDescription,

    /// Amounts are non-negative.
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    /// IDR carries no fractional sub-unit.
    #[error("Amount must be a whole number of rupiah, got {0}")]
    FractionalAmount(Decimal),

    /// Category does not belong to the transaction type's partition.
    #[error("Category '{category}' is not valid for {transaction_type} transactions")]
    CategoryTypeMismatch {
        /// The offending category.
        category: Category,
        /// The transaction type it was paired with.
        transaction_type: TransactionType,
    },

    /// Unknown transaction type string.
    #[error("Unknown transaction type: {0}")]
    UnknownTransactionType(String),

    /// Unknown category string.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown payment method string.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    // ========== Reporting Errors ==========
    /// Reporting range with start after end.
    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested range start.
        start: NaiveDate,
        /// Requested range end.
        end: NaiveDate,
    },
}

impl FinanceError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "EMPTY_DESCRIPTION",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::FractionalAmount(_) => "FRACTIONAL_AMOUNT",
            Self::CategoryTypeMismatch { .. } => "CATEGORY_TYPE_MISMATCH",
            Self::UnknownTransactionType(_) => "UNKNOWN_TRANSACTION_TYPE",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::UnknownPaymentMethod(_) => "UNKNOWN_PAYMENT_METHOD",
            Self::InvalidRange { .. } => "INVALID_RANGE",
        }
    }

    /// Returns the HTTP status code for this error.
    ///
    /// Every variant is a caller mistake; none are retryable.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyDescription
            | Self::NegativeAmount(_)
            | Self::FractionalAmount(_)
            | Self::CategoryTypeMismatch { .. }
            | Self::UnknownTransactionType(_)
            | Self::UnknownCategory(_)
            | Self::UnknownPaymentMethod(_)
            | Self::InvalidRange { .. } => 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::types::IncomeCategory;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(FinanceError::EmptyDescription.error_code(), "EMPTY_DESCRIPTION");
        assert_eq!(
            FinanceError::NegativeAmount(dec!(-5)).error_code(),
            "NEGATIVE_AMOUNT"
        );
        assert_eq!(
            FinanceError::CategoryTypeMismatch {
                category: Category::Income(IncomeCategory::Zakat),
                transaction_type: TransactionType::Expense,
            }
            .error_code(),
            "CATEGORY_TYPE_MISMATCH"
        );
        assert_eq!(
            FinanceError::InvalidRange {
                start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            }
            .error_code(),
            "INVALID_RANGE"
        );
    }

    #[test]
    fn test_error_display() {
        let err = FinanceError::CategoryTypeMismatch {
            category: Category::Income(IncomeCategory::Zakat),
            transaction_type: TransactionType::Expense,
        };
        assert_eq!(
            err.to_string(),
            "Category 'zakat' is not valid for expense transactions"
        );

        let err = FinanceError::InvalidRange {
            start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid range: start 2024-02-01 is after end 2024-01-01"
        );
    }

    #[test]
    fn test_all_validation_errors_are_bad_request() {
        assert_eq!(FinanceError::EmptyDescription.http_status_code(), 400);
        assert_eq!(
            FinanceError::UnknownCategory("x".into()).http_status_code(),
            400
        );
    }
}
