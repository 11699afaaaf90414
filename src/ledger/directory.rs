use crate::errors::{LedgerError, Result};
use crate::loanee::Loanee;
use crate::types::{DuplicateField, LoaneeId};

/// reject identity fields already present in the directory
///
/// comparison is case-sensitive on the stored strings; `exempt` skips
/// the loanee being edited so saving unchanged fields stays legal
pub fn ensure_unique(
    loanees: &[Loanee],
    national_id: &str,
    mobile: &str,
    exempt: Option<LoaneeId>,
) -> Result<()> {
    for loanee in loanees {
        if exempt == Some(loanee.id) {
            continue;
        }
        if loanee.national_id == national_id {
            return Err(LedgerError::DuplicateLoanee {
                field: DuplicateField::NationalId,
                value: national_id.to_string(),
            });
        }
        if loanee.mobile == mobile {
            return Err(LedgerError::DuplicateLoanee {
                field: DuplicateField::Mobile,
                value: mobile.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loanee::LoaneeProfile;
    use crate::types::EmploymentStatus;
    use chrono::NaiveDate;

    fn loanee(name: &str, national_id: &str, mobile: &str) -> Loanee {
        Loanee::new(
            LoaneeProfile {
                name: name.to_string(),
                national_id: national_id.to_string(),
                mobile: mobile.to_string(),
                email: None,
                employment_status: EmploymentStatus::Employed,
            },
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn test_fresh_identity_passes() {
        let directory = vec![loanee("Jane", "11111111", "0711111111")];
        assert!(ensure_unique(&directory, "22222222", "0722222222", None).is_ok());
    }

    #[test]
    fn test_duplicate_national_id_rejected() {
        let directory = vec![loanee("Jane", "11111111", "0711111111")];
        let err = ensure_unique(&directory, "11111111", "0722222222", None).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::DuplicateLoanee {
                field: DuplicateField::NationalId,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_mobile_rejected() {
        let directory = vec![loanee("Jane", "11111111", "0711111111")];
        let err = ensure_unique(&directory, "22222222", "0711111111", None).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::DuplicateLoanee {
                field: DuplicateField::Mobile,
                ..
            }
        ));
    }

    #[test]
    fn test_exempt_id_may_keep_own_fields() {
        let existing = loanee("Jane", "11111111", "0711111111");
        let id = existing.id;
        let directory = vec![existing];
        assert!(ensure_unique(&directory, "11111111", "0711111111", Some(id)).is_ok());
    }

    #[test]
    fn test_exempt_id_still_blocked_by_others() {
        let first = loanee("Jane", "11111111", "0711111111");
        let second = loanee("John", "22222222", "0722222222");
        let id = first.id;
        let directory = vec![first, second];
        let err = ensure_unique(&directory, "22222222", "0711111111", Some(id)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::DuplicateLoanee {
                field: DuplicateField::NationalId,
                ..
            }
        ));
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let directory = vec![loanee("Jane", "AB123456", "0711111111")];
        assert!(ensure_unique(&directory, "ab123456", "0722222222", None).is_ok());
    }
}
