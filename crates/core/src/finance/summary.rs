//! Pure aggregation of transactions into period summaries.
//!
//! Aggregation is a single pass with commutative accumulation, so iteration
//! order never affects the result. All arithmetic is exact decimal; the
//! category maps are zero-filled over the full category universe so chart
//! consumers always see every category in a fixed order.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::FinanceError;
use super::types::{Category, ExpenseCategory, IncomeCategory, Transaction};

/// An inclusive-inclusive calendar date range.
///
/// Construction enforces `start <= end`, so a held `DateRange` is always
/// valid and aggregation over it cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns `FinanceError::InvalidRange` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FinanceError> {
        if start > end {
            return Err(FinanceError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The span of a single calendar month, or `None` for an invalid
    /// year/month pair.
    #[must_use]
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month = if month == 12 {
            NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let end = next_month.pred_opt()?;
        Some(Self { start, end })
    }

    /// The span of a full calendar year, or `None` for an unrepresentable
    /// year.
    #[must_use]
    pub fn year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self { start, end })
    }

    /// Range start (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Range end (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls within the range, boundaries included.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Derived, read-only aggregation over transactions for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Sum of all income amounts in the period.
    pub total_income: Decimal,
    /// Sum of all expense amounts in the period.
    pub total_expense: Decimal,
    /// `total_income - total_expense`, exactly.
    pub balance: Decimal,
    /// Income per category, zero-filled over the full category universe.
    pub income_by_category: BTreeMap<IncomeCategory, Decimal>,
    /// Expense per category, zero-filled over the full category universe.
    pub expense_by_category: BTreeMap<ExpenseCategory, Decimal>,
}

impl FinanceSummary {
    /// An all-zero summary with every category present.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            balance: Decimal::ZERO,
            income_by_category: IncomeCategory::ALL
                .into_iter()
                .map(|c| (c, Decimal::ZERO))
                .collect(),
            expense_by_category: ExpenseCategory::ALL
                .into_iter()
                .map(|c| (c, Decimal::ZERO))
                .collect(),
        }
    }
}

impl Default for FinanceSummary {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// One month's summary within a yearly series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFinanceReport {
    /// Calendar month, 1..=12.
    pub month: u32,
    /// The month's aggregation.
    #[serde(flatten)]
    pub summary: FinanceSummary,
}

/// Reduces a transaction collection over `range` into a summary.
///
/// Transactions outside the range are excluded; a transaction exactly on a
/// boundary date is included. The result guarantees
/// `balance == total_income - total_expense`.
#[must_use]
pub fn summarize(transactions: &[Transaction], range: &DateRange) -> FinanceSummary {
    let mut summary = FinanceSummary::zeroed();

    for tx in transactions {
        if !range.contains(tx.date) {
            continue;
        }
        match tx.category {
            Category::Income(c) => {
                summary.total_income += tx.amount;
                *summary.income_by_category.entry(c).or_default() += tx.amount;
            }
            Category::Expense(c) => {
                summary.total_expense += tx.amount;
                *summary.expense_by_category.entry(c).or_default() += tx.amount;
            }
        }
    }

    summary.balance = summary.total_income - summary.total_expense;
    summary
}

/// Produces one report per calendar month of `year`, months ascending.
///
/// Empty months yield zero totals. The ascending order is a contract
/// consumed by chart rendering.
#[must_use]
pub fn monthly_series(transactions: &[Transaction], year: i32) -> Vec<MonthlyFinanceReport> {
    (1..=12)
        .filter_map(|month| {
            let range = DateRange::month(year, month)?;
            Some(MonthlyFinanceReport {
                month,
                summary: summarize(transactions, &range),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::types::{PaymentMethod, TransactionType};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(category: Category, amount: Decimal, date: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            transaction_type: category.transaction_type(),
            category,
            amount,
            date,
            fund_id: None,
            description: "test".to_string(),
            donor_name: None,
            payment_method: PaymentMethod::Cash,
            is_anonymous: false,
        }
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let result = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(result, Err(FinanceError::InvalidRange { .. })));
    }

    #[test]
    fn test_range_boundaries_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2023, 12, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_month_span_handles_december() {
        let dec_range = DateRange::month(2024, 12).unwrap();
        assert_eq!(dec_range.start(), date(2024, 12, 1));
        assert_eq!(dec_range.end(), date(2024, 12, 31));
    }

    #[test]
    fn test_month_span_handles_leap_february() {
        let feb = DateRange::month(2024, 2).unwrap();
        assert_eq!(feb.end(), date(2024, 2, 29));

        let feb = DateRange::month(2023, 2).unwrap();
        assert_eq!(feb.end(), date(2023, 2, 28));
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let summary = summarize(&[], &range);

        assert_eq!(summary.total_income, Decimal::ZERO);
        assert_eq!(summary.total_expense, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.income_by_category.len(), IncomeCategory::ALL.len());
        assert_eq!(
            summary.expense_by_category.len(),
            ExpenseCategory::ALL.len()
        );
        assert!(summary.income_by_category.values().all(Decimal::is_zero));
        assert!(summary.expense_by_category.values().all(Decimal::is_zero));
    }

    #[test]
    fn test_summarize_excludes_out_of_range() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let transactions = vec![
            tx(IncomeCategory::Infaq.into(), dec!(100_000), date(2024, 1, 15)),
            tx(IncomeCategory::Infaq.into(), dec!(999_999), date(2024, 2, 1)),
        ];

        let summary = summarize(&transactions, &range);
        assert_eq!(summary.total_income, dec!(100_000));
    }

    #[test]
    fn test_summarize_boundary_dates_included() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let transactions = vec![
            tx(IncomeCategory::Donasi.into(), dec!(10_000), date(2024, 1, 1)),
            tx(IncomeCategory::Donasi.into(), dec!(20_000), date(2024, 1, 31)),
        ];

        let summary = summarize(&transactions, &range);
        assert_eq!(summary.total_income, dec!(30_000));
    }

    #[test]
    fn test_totals_match_category_breakdown() {
        let range = DateRange::year(2024).unwrap();
        let transactions = vec![
            tx(IncomeCategory::Infaq.into(), dec!(100_000), date(2024, 3, 5)),
            tx(IncomeCategory::Zakat.into(), dec!(250_000), date(2024, 4, 1)),
            tx(
                ExpenseCategory::Operasional.into(),
                dec!(40_000),
                date(2024, 3, 20),
            ),
        ];

        let summary = summarize(&transactions, &range);
        let income_sum: Decimal = summary.income_by_category.values().copied().sum();
        let expense_sum: Decimal = summary.expense_by_category.values().copied().sum();

        assert_eq!(summary.total_income, income_sum);
        assert_eq!(summary.total_expense, expense_sum);
        assert_eq!(summary.balance, summary.total_income - summary.total_expense);
    }

    // The worked example: Jan has 100k infaq income and 40k operational
    // expense, Feb has 250k zakat income, the rest of the year is quiet.
    #[test]
    fn test_monthly_series_worked_example() {
        let transactions = vec![
            tx(IncomeCategory::Infaq.into(), dec!(100_000), date(2024, 1, 5)),
            tx(
                ExpenseCategory::Operasional.into(),
                dec!(40_000),
                date(2024, 1, 20),
            ),
            tx(IncomeCategory::Zakat.into(), dec!(250_000), date(2024, 2, 1)),
        ];

        let series = monthly_series(&transactions, 2024);
        assert_eq!(series.len(), 12);

        assert_eq!(series[0].month, 1);
        assert_eq!(series[0].summary.total_income, dec!(100_000));
        assert_eq!(series[0].summary.total_expense, dec!(40_000));
        assert_eq!(series[0].summary.balance, dec!(60_000));

        assert_eq!(series[1].month, 2);
        assert_eq!(series[1].summary.total_income, dec!(250_000));
        assert_eq!(series[1].summary.total_expense, Decimal::ZERO);
        assert_eq!(series[1].summary.balance, dec!(250_000));

        for report in &series[2..] {
            assert_eq!(report.summary.total_income, Decimal::ZERO);
            assert_eq!(report.summary.total_expense, Decimal::ZERO);
            assert_eq!(report.summary.balance, Decimal::ZERO);
        }
    }

    #[test]
    fn test_monthly_series_is_month_ascending() {
        let series = monthly_series(&[], 2024);
        let months: Vec<u32> = series.iter().map(|r| r.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn test_monthly_decomposition_matches_yearly_total() {
        let transactions = vec![
            tx(IncomeCategory::Infaq.into(), dec!(75_000), date(2024, 1, 31)),
            tx(IncomeCategory::Wakaf.into(), dec!(500_000), date(2024, 6, 15)),
            tx(
                ExpenseCategory::Kegiatan.into(),
                dec!(120_000),
                date(2024, 6, 15),
            ),
            tx(
                ExpenseCategory::Sosial.into(),
                dec!(30_000),
                date(2024, 12, 31),
            ),
        ];

        let yearly = summarize(&transactions, &DateRange::year(2024).unwrap());
        let monthly_sum: Decimal = monthly_series(&transactions, 2024)
            .iter()
            .map(|r| r.summary.balance)
            .sum();

        assert_eq!(monthly_sum, yearly.balance);
    }
}
