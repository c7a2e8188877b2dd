//! Property-based tests for period aggregation.
//!
//! These properties hold for every transaction set and every valid range:
//! - balance is exactly income minus expense
//! - totals equal the sum of their category breakdowns
//! - the monthly decomposition of a year is consistent with the yearly total
//! - aggregation is order-independent

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::summary::{DateRange, monthly_series, summarize};
use super::types::{
    Category, ExpenseCategory, IncomeCategory, PaymentMethod, Transaction,
};

fn category_strategy() -> impl Strategy<Value = Category> {
    prop_oneof![
        prop::sample::select(IncomeCategory::ALL.to_vec()).prop_map(Category::Income),
        prop::sample::select(ExpenseCategory::ALL.to_vec()).prop_map(Category::Expense),
    ]
}

/// Whole-rupiah amounts up to 100 million IDR.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(Decimal::from)
}

/// Dates within the year 2024.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12, 1u32..=28).prop_map(|(m, d)| NaiveDate::from_ymd_opt(2024, m, d).unwrap())
}

fn transaction_strategy() -> impl Strategy<Value = Transaction> {
    (category_strategy(), amount_strategy(), date_strategy()).prop_map(
        |(category, amount, date)| Transaction {
            id: Uuid::new_v4(),
            transaction_type: category.transaction_type(),
            category,
            amount,
            date,
            fund_id: None,
            description: "prop".to_string(),
            donor_name: None,
            payment_method: PaymentMethod::Cash,
            is_anonymous: false,
        },
    )
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(transaction_strategy(), 0..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For any transaction set and range, balance == income - expense.
    #[test]
    fn prop_balance_is_income_minus_expense(
        transactions in transactions_strategy(),
    ) {
        let range = DateRange::year(2024).unwrap();
        let summary = summarize(&transactions, &range);
        prop_assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    /// Totals always equal the sum of the category breakdowns.
    #[test]
    fn prop_totals_match_breakdowns(
        transactions in transactions_strategy(),
    ) {
        let range = DateRange::year(2024).unwrap();
        let summary = summarize(&transactions, &range);

        let income_sum: Decimal = summary.income_by_category.values().copied().sum();
        let expense_sum: Decimal = summary.expense_by_category.values().copied().sum();

        prop_assert_eq!(summary.total_income, income_sum);
        prop_assert_eq!(summary.total_expense, expense_sum);
    }

    /// Summing the twelve monthly balances reproduces the yearly balance.
    #[test]
    fn prop_monthly_decomposition_consistent(
        transactions in transactions_strategy(),
    ) {
        let yearly = summarize(&transactions, &DateRange::year(2024).unwrap());

        let series = monthly_series(&transactions, 2024);
        prop_assert_eq!(series.len(), 12);

        let monthly_balance: Decimal = series.iter().map(|r| r.summary.balance).sum();
        let monthly_income: Decimal = series.iter().map(|r| r.summary.total_income).sum();
        let monthly_expense: Decimal = series.iter().map(|r| r.summary.total_expense).sum();

        prop_assert_eq!(monthly_balance, yearly.balance);
        prop_assert_eq!(monthly_income, yearly.total_income);
        prop_assert_eq!(monthly_expense, yearly.total_expense);
    }

    /// Accumulation is commutative: shuffling the input changes nothing.
    #[test]
    fn prop_order_independent(
        transactions in transactions_strategy(),
    ) {
        let range = DateRange::year(2024).unwrap();
        let forward = summarize(&transactions, &range);

        let mut reversed = transactions;
        reversed.reverse();
        let backward = summarize(&reversed, &range);

        prop_assert_eq!(forward, backward);
    }

    /// The category maps are always zero-filled over the full universe.
    #[test]
    fn prop_category_maps_complete(
        transactions in transactions_strategy(),
    ) {
        let range = DateRange::year(2024).unwrap();
        let summary = summarize(&transactions, &range);

        prop_assert_eq!(summary.income_by_category.len(), IncomeCategory::ALL.len());
        prop_assert_eq!(summary.expense_by_category.len(), ExpenseCategory::ALL.len());
    }

    /// Narrowing the range never increases totals.
    #[test]
    fn prop_subrange_totals_bounded(
        transactions in transactions_strategy(),
        month in 1u32..=12,
    ) {
        let year_summary = summarize(&transactions, &DateRange::year(2024).unwrap());
        let month_summary = summarize(
            &transactions,
            &DateRange::month(2024, month).unwrap(),
        );

        prop_assert!(month_summary.total_income <= year_summary.total_income);
        prop_assert!(month_summary.total_expense <= year_summary.total_expense);
    }
}
