//! Finance domain types for transaction creation and validation.
//!
//! The category universe is partitioned by transaction type: a category
//! value is only valid for the type it belongs to. String forms are
//! disjoint across the partition, so a bare category string always
//! identifies its transaction type.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FinanceError;

/// Transaction type: either Income or Expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in (donations, zakat, infaq).
    Income,
    /// Money going out (operations, social programs).
    Expense,
}

impl TransactionType {
    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(FinanceError::UnknownTransactionType(other.to_string())),
        }
    }
}

/// Income categories.
///
/// Ordering is part of the reporting contract: charts render categories in
/// this declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    /// Voluntary giving for the mosque's general needs.
    Infaq,
    /// General donations.
    Donasi,
    /// Obligatory alms.
    Zakat,
    /// Endowment contributions.
    Wakaf,
    /// Sacrificial animal contributions.
    Qurban,
}

impl IncomeCategory {
    /// Every income category, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Infaq,
        Self::Donasi,
        Self::Zakat,
        Self::Wakaf,
        Self::Qurban,
    ];

    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infaq => "infaq",
            Self::Donasi => "donasi",
            Self::Zakat => "zakat",
            Self::Wakaf => "wakaf",
            Self::Qurban => "qurban",
        }
    }
}

impl fmt::Display for IncomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expense categories.
///
/// Ordering is part of the reporting contract: charts render categories in
/// this declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Day-to-day operational costs (electricity, water, supplies).
    Operasional,
    /// Social programs and charitable disbursements.
    Sosial,
    /// Construction and renovation.
    Pembangunan,
    /// Events and religious activities.
    Kegiatan,
    /// Everything else.
    Lainnya,
}

impl ExpenseCategory {
    /// Every expense category, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Operasional,
        Self::Sosial,
        Self::Pembangunan,
        Self::Kegiatan,
        Self::Lainnya,
    ];

    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operasional => "operasional",
            Self::Sosial => "sosial",
            Self::Pembangunan => "pembangunan",
            Self::Kegiatan => "kegiatan",
            Self::Lainnya => "lainnya",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category from either side of the partition.
///
/// Serializes as the bare category string; the partition's string forms are
/// disjoint, so deserialization is unambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    /// An income category.
    Income(IncomeCategory),
    /// An expense category.
    Expense(ExpenseCategory),
}

impl Category {
    /// Returns the transaction type this category belongs to.
    #[must_use]
    pub const fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Income(_) => TransactionType::Income,
            Self::Expense(_) => TransactionType::Expense,
        }
    }

    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income(c) => c.as_str(),
            Self::Expense(c) => c.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for c in IncomeCategory::ALL {
            if c.as_str() == s {
                return Ok(Self::Income(c));
            }
        }
        for c in ExpenseCategory::ALL {
            if c.as_str() == s {
                return Ok(Self::Expense(c));
            }
        }
        Err(FinanceError::UnknownCategory(s.to_string()))
    }
}

impl From<IncomeCategory> for Category {
    fn from(c: IncomeCategory) -> Self {
        Self::Income(c)
    }
}

impl From<ExpenseCategory> for Category {
    fn from(c: ExpenseCategory) -> Self {
        Self::Expense(c)
    }
}

/// How a transaction was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash, typically via the donation box.
    Cash,
    /// Bank transfer.
    Transfer,
    /// QRIS payment.
    Qris,
}

impl PaymentMethod {
    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Qris => "qris",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = FinanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "transfer" => Ok(Self::Transfer),
            "qris" => Ok(Self::Qris),
            other => Err(FinanceError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

/// A dated, typed, categorized monetary record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned at creation, immutable.
    pub id: Uuid,
    /// Whether this is income or expense.
    pub transaction_type: TransactionType,
    /// Category within the transaction type's partition.
    pub category: Category,
    /// Amount in whole rupiah (IDR has no fractional sub-unit).
    pub amount: Decimal,
    /// Calendar date; reporting granularity carries no time of day.
    pub date: NaiveDate,
    /// Fund this transaction is attributed to; `None` means the general fund.
    pub fund_id: Option<Uuid>,
    /// What the money was for.
    pub description: String,
    /// Donor name, when known and not anonymous.
    pub donor_name: Option<String>,
    /// How the transaction was settled.
    pub payment_method: PaymentMethod,
    /// Whether the donor asked not to be named.
    pub is_anonymous: bool,
}

/// Input for creating a new transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// Whether this is income or expense.
    pub transaction_type: TransactionType,
    /// Category; must belong to `transaction_type`.
    pub category: Category,
    /// Amount in whole rupiah; must be non-negative.
    pub amount: Decimal,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
    /// Fund attribution; `None` means the general fund.
    pub fund_id: Option<Uuid>,
    /// What the money was for; required non-empty.
    pub description: String,
    /// Donor name, if any.
    pub donor_name: Option<String>,
    /// How the transaction was settled.
    pub payment_method: PaymentMethod,
    /// Whether the donor asked not to be named.
    #[serde(default)]
    pub is_anonymous: bool,
}

/// Field-level partial update for a transaction.
///
/// Absent fields are left unchanged. The effective (type, category) pair
/// after the merge must still match the partition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPatch {
    /// New transaction type.
    pub transaction_type: Option<TransactionType>,
    /// New category.
    pub category: Option<Category>,
    /// New amount in whole rupiah.
    pub amount: Option<Decimal>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New fund attribution; `Some(None)` moves to the general fund.
    #[serde(default, with = "double_option")]
    pub fund_id: Option<Option<Uuid>>,
    /// New description.
    pub description: Option<String>,
    /// New donor name; `Some(None)` clears it.
    #[serde(default, with = "double_option")]
    pub donor_name: Option<Option<String>>,
    /// New payment method.
    pub payment_method: Option<PaymentMethod>,
    /// New anonymity flag.
    pub is_anonymous: Option<bool>,
}

/// Serde adapter distinguishing "field absent" from "field set to null".
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(de).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_partition_is_disjoint() {
        for income in IncomeCategory::ALL {
            for expense in ExpenseCategory::ALL {
                assert_ne!(income.as_str(), expense.as_str());
            }
        }
    }

    #[test]
    fn test_category_round_trip() {
        for c in IncomeCategory::ALL {
            let parsed: Category = c.as_str().parse().unwrap();
            assert_eq!(parsed, Category::Income(c));
            assert_eq!(parsed.transaction_type(), TransactionType::Income);
        }
        for c in ExpenseCategory::ALL {
            let parsed: Category = c.as_str().parse().unwrap();
            assert_eq!(parsed, Category::Expense(c));
            assert_eq!(parsed.transaction_type(), TransactionType::Expense);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result = Category::from_str("sedekah_laut");
        assert!(matches!(result, Err(FinanceError::UnknownCategory(_))));
    }

    #[test]
    fn test_category_serde_is_bare_string() {
        let json = serde_json::to_string(&Category::Income(IncomeCategory::Zakat)).unwrap();
        assert_eq!(json, "\"zakat\"");

        let back: Category = serde_json::from_str("\"operasional\"").unwrap();
        assert_eq!(back, Category::Expense(ExpenseCategory::Operasional));
    }

    #[test]
    fn test_transaction_type_round_trip() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert!("revenue".parse::<TransactionType>().is_err());
    }

    #[test]
    fn test_patch_double_option() {
        let patch: TransactionPatch =
            serde_json::from_str(r#"{"fund_id": null, "amount": "5000"}"#).unwrap();
        assert_eq!(patch.fund_id, Some(None));
        assert!(patch.amount.is_some());
        assert!(patch.donor_name.is_none());
    }
}
