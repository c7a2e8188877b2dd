//! Fund domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::FundError;

/// Fund classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundType {
    /// General operational money.
    Operasional,
    /// Social programs.
    Sosial,
    /// Zakat collection and disbursement (restricted).
    Zakat,
    /// Endowments (restricted).
    Wakaf,
    /// Sacrificial animal fund (restricted, seasonal).
    Qurban,
    /// Construction and renovation.
    Pembangunan,
    /// Everything else.
    Lainnya,
}

impl FundType {
    /// Every fund type.
    pub const ALL: [Self; 7] = [
        Self::Operasional,
        Self::Sosial,
        Self::Zakat,
        Self::Wakaf,
        Self::Qurban,
        Self::Pembangunan,
        Self::Lainnya,
    ];

    /// Returns the string form used on the wire and in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Operasional => "operasional",
            Self::Sosial => "sosial",
            Self::Zakat => "zakat",
            Self::Wakaf => "wakaf",
            Self::Qurban => "qurban",
            Self::Pembangunan => "pembangunan",
            Self::Lainnya => "lainnya",
        }
    }
}

impl fmt::Display for FundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundType {
    type Err = FundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FundError::UnknownFundType(s.to_string()))
    }
}

/// A named bucket financial transactions are attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Fund classification.
    pub fund_type: FundType,
    /// Whether the fund's use is earmarked (zakat, qurban) as opposed to
    /// general operational money.
    pub is_restricted: bool,
    /// Inactive funds stay on record but accept no new attribution in the
    /// admin UI.
    pub is_active: bool,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Display ordering; renumbered in bulk by reorder.
    pub order_index: i32,
}

/// Input for creating a new fund.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFund {
    /// Display name; required non-empty.
    pub name: String,
    /// Fund classification.
    pub fund_type: FundType,
    /// Whether the fund is earmarked.
    #[serde(default)]
    pub is_restricted: bool,
    /// Optional free-form description.
    pub description: Option<String>,
}

/// Field-level partial update for a fund. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FundPatch {
    /// New display name.
    pub name: Option<String>,
    /// New classification.
    pub fund_type: Option<FundType>,
    /// New earmark flag.
    pub is_restricted: Option<bool>,
    /// Activate or deactivate.
    pub is_active: Option<bool>,
    /// New description; `Some(None)` clears it.
    #[serde(default, with = "double_option")]
    pub description: Option<Option<String>>,
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
