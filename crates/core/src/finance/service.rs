//! Finance service for transaction validation.
//!
//! Validation runs before anything touches persistence; a failed check is
//! surfaced to the caller immediately and never retried.

use rust_decimal::Decimal;

use super::error::FinanceError;
use super::types::{Category, NewTransaction, TransactionPatch, TransactionType};

/// Finance service for transaction validation.
///
/// Pure business logic with no database dependencies.
pub struct FinanceService;

impl FinanceService {
    /// Validates input for a new transaction.
    ///
    /// Checks, in order:
    /// 1. Description is non-empty after trimming
    /// 2. Amount is non-negative
    /// 3. Amount is a whole number of rupiah
    /// 4. Category belongs to the transaction type's partition
    ///
    /// # Errors
    ///
    /// Returns `FinanceError` if any check fails.
    pub fn validate_new_transaction(input: &NewTransaction) -> Result<(), FinanceError> {
        Self::validate_description(&input.description)?;
        Self::validate_amount(input.amount)?;
        Self::validate_category(input.transaction_type, input.category)?;
        Ok(())
    }

    /// Validates a patch against the transaction's effective state after
    /// the merge.
    ///
    /// `effective_type` and `effective_category` are the values the
    /// transaction would hold once absent patch fields are filled from the
    /// stored record; the pair must still match the partition.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError` if any supplied field fails validation.
    pub fn validate_patch(
        patch: &TransactionPatch,
        effective_type: TransactionType,
        effective_category: Category,
    ) -> Result<(), FinanceError> {
        if let Some(description) = &patch.description {
            Self::validate_description(description)?;
        }
        if let Some(amount) = patch.amount {
            Self::validate_amount(amount)?;
        }
        Self::validate_category(effective_type, effective_category)?;
        Ok(())
    }

    /// Validates that a description is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::EmptyDescription` for blank input.
    pub fn validate_description(description: &str) -> Result<(), FinanceError> {
        if description.trim().is_empty() {
            return Err(FinanceError::EmptyDescription);
        }
        Ok(())
    }

    /// Validates that an amount is a non-negative whole number of rupiah.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::NegativeAmount` or
    /// `FinanceError::FractionalAmount`.
    pub fn validate_amount(amount: Decimal) -> Result<(), FinanceError> {
        if amount < Decimal::ZERO {
            return Err(FinanceError::NegativeAmount(amount));
        }
        if !amount.fract().is_zero() {
            return Err(FinanceError::FractionalAmount(amount));
        }
        Ok(())
    }

    /// Validates that a category belongs to the transaction type.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::CategoryTypeMismatch` when the pair crosses
    /// the partition.
    pub fn validate_category(
        transaction_type: TransactionType,
        category: Category,
    ) -> Result<(), FinanceError> {
        if category.transaction_type() != transaction_type {
            return Err(FinanceError::CategoryTypeMismatch {
                category,
                transaction_type,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::types::{ExpenseCategory, IncomeCategory, PaymentMethod};
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn make_input(category: Category, amount: Decimal) -> NewTransaction {
        NewTransaction {
            transaction_type: category.transaction_type(),
            category,
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            fund_id: None,
            description: "Friday collection".to_string(),
            donor_name: None,
            payment_method: PaymentMethod::Cash,
            is_anonymous: false,
        }
    }

    #[test]
    fn test_valid_transaction_passes() {
        let input = make_input(IncomeCategory::Infaq.into(), dec!(100_000));
        assert!(FinanceService::validate_new_transaction(&input).is_ok());
    }

    #[test]
    fn test_zero_amount_is_allowed() {
        let input = make_input(IncomeCategory::Infaq.into(), Decimal::ZERO);
        assert!(FinanceService::validate_new_transaction(&input).is_ok());
    }

    #[rstest]
    #[case(dec!(-1))]
    #[case(dec!(-100_000))]
    #[case(dec!(-0.01))]
    fn test_negative_amount_rejected(#[case] amount: Decimal) {
        let input = make_input(IncomeCategory::Infaq.into(), amount);
        assert!(matches!(
            FinanceService::validate_new_transaction(&input),
            Err(FinanceError::NegativeAmount(_))
        ));
    }

    #[rstest]
    #[case(dec!(1000.50))]
    #[case(dec!(0.5))]
    #[case(dec!(99.999))]
    fn test_fractional_amount_rejected(#[case] amount: Decimal) {
        let input = make_input(IncomeCategory::Infaq.into(), amount);
        assert!(matches!(
            FinanceService::validate_new_transaction(&input),
            Err(FinanceError::FractionalAmount(_))
        ));
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut input = make_input(IncomeCategory::Infaq.into(), dec!(100));
        input.description = "   ".to_string();
        assert!(matches!(
            FinanceService::validate_new_transaction(&input),
            Err(FinanceError::EmptyDescription)
        ));
    }

    #[test]
    fn test_category_type_mismatch_rejected() {
        let mut input = make_input(IncomeCategory::Zakat.into(), dec!(100));
        input.transaction_type = TransactionType::Expense;
        assert!(matches!(
            FinanceService::validate_new_transaction(&input),
            Err(FinanceError::CategoryTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_patch_keeps_partition_consistent() {
        // Changing only the type while the stored category stays income
        // must fail.
        let patch = TransactionPatch {
            transaction_type: Some(TransactionType::Expense),
            ..TransactionPatch::default()
        };
        let result = FinanceService::validate_patch(
            &patch,
            TransactionType::Expense,
            IncomeCategory::Infaq.into(),
        );
        assert!(matches!(
            result,
            Err(FinanceError::CategoryTypeMismatch { .. })
        ));

        // Changing both sides together is fine.
        let patch = TransactionPatch {
            transaction_type: Some(TransactionType::Expense),
            category: Some(ExpenseCategory::Sosial.into()),
            ..TransactionPatch::default()
        };
        let result = FinanceService::validate_patch(
            &patch,
            TransactionType::Expense,
            ExpenseCategory::Sosial.into(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_patch_validates_supplied_fields_only() {
        let patch = TransactionPatch {
            amount: Some(dec!(-5)),
            ..TransactionPatch::default()
        };
        let result = FinanceService::validate_patch(
            &patch,
            TransactionType::Income,
            IncomeCategory::Infaq.into(),
        );
        assert!(matches!(result, Err(FinanceError::NegativeAmount(_))));
    }
}
