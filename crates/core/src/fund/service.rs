//! Fund service for lifecycle rule checks.

use uuid::Uuid;

use super::error::FundError;
use super::types::NewFund;

/// Fund service for lifecycle rule checks.
///
/// Pure decision logic; the repository executes these checks inside its
/// database transaction so check and act form one unit.
pub struct FundService;

impl FundService {
    /// Validates input for a new fund.
    ///
    /// # Errors
    ///
    /// Returns `FundError::EmptyName` for a blank name.
    pub fn validate_new_fund(input: &NewFund) -> Result<(), FundError> {
        Self::validate_name(&input.name)
    }

    /// Validates a fund name.
    ///
    /// # Errors
    ///
    /// Returns `FundError::EmptyName` for blank input.
    pub fn validate_name(name: &str) -> Result<(), FundError> {
        if name.trim().is_empty() {
            return Err(FundError::EmptyName);
        }
        Ok(())
    }

    /// Decides whether a fund with `references` referencing transactions
    /// may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `FundError::FundInUse` when any reference exists; the
    /// message tells the caller to deactivate instead.
    pub fn validate_delete(fund_id: Uuid, references: u64) -> Result<(), FundError> {
        if references > 0 {
            return Err(FundError::FundInUse {
                fund_id,
                references,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fund::types::FundType;

    #[test]
    fn test_valid_fund_passes() {
        let input = NewFund {
            name: "Kas Pembangunan".to_string(),
            fund_type: FundType::Pembangunan,
            is_restricted: false,
            description: None,
        };
        assert!(FundService::validate_new_fund(&input).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let input = NewFund {
            name: "  ".to_string(),
            fund_type: FundType::Operasional,
            is_restricted: false,
            description: None,
        };
        assert!(matches!(
            FundService::validate_new_fund(&input),
            Err(FundError::EmptyName)
        ));
    }

    #[test]
    fn test_delete_with_no_references_allowed() {
        assert!(FundService::validate_delete(Uuid::new_v4(), 0).is_ok());
    }

    #[test]
    fn test_delete_with_references_blocked() {
        let fund_id = Uuid::new_v4();
        let result = FundService::validate_delete(fund_id, 5);
        assert!(matches!(
            result,
            Err(FundError::FundInUse { references: 5, .. })
        ));
    }
}
