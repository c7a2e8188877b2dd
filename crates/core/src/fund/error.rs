//! Fund error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during fund operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FundError {
    /// Fund name is required.
    #[error("Fund name must not be empty")]
    EmptyName,

    /// Unknown fund type string.
    #[error("Unknown fund type: {0}")]
    UnknownFundType(String),

    /// Fund deletion blocked by existing transaction references.
    #[error(
        "Fund {fund_id} is referenced by {references} transaction(s) and cannot be deleted; deactivate the fund instead"
    )]
    FundInUse {
        /// The fund that was targeted for deletion.
        fund_id: Uuid,
        /// How many transactions reference it.
        references: u64,
    },

    /// Fund not found.
    #[error("Fund not found: {0}")]
    NotFound(Uuid),
}

impl FundError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "EMPTY_NAME",
            Self::UnknownFundType(_) => "UNKNOWN_FUND_TYPE",
            Self::FundInUse { .. } => "FUND_IN_USE",
            Self::NotFound(_) => "FUND_NOT_FOUND",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::EmptyName | Self::UnknownFundType(_) => 400,
            Self::FundInUse { .. } => 409,
            Self::NotFound(_) => 404,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FundError::EmptyName.error_code(), "EMPTY_NAME");
        assert_eq!(
            FundError::FundInUse {
                fund_id: Uuid::nil(),
                references: 3,
            }
            .error_code(),
            "FUND_IN_USE"
        );
        assert_eq!(FundError::NotFound(Uuid::nil()).error_code(), "FUND_NOT_FOUND");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(FundError::EmptyName.http_status_code(), 400);
        assert_eq!(
            FundError::FundInUse {
                fund_id: Uuid::nil(),
                references: 1,
            }
            .http_status_code(),
            409
        );
        assert_eq!(FundError::NotFound(Uuid::nil()).http_status_code(), 404);
    }

    #[test]
    fn test_in_use_message_carries_remediation_hint() {
        let err = FundError::FundInUse {
            fund_id: Uuid::nil(),
            references: 2,
        };
        assert!(err.to_string().contains("deactivate the fund instead"));
    }
}
