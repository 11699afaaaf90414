use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::types::{EmploymentStatus, LoaneeId};

/// a registered borrower in the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loanee {
    pub id: LoaneeId,
    pub name: String,
    pub national_id: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub employment_status: EmploymentStatus,
    pub date_added: NaiveDate,
}

/// the editable identity of a loanee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaneeProfile {
    pub name: String,
    pub national_id: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub employment_status: EmploymentStatus,
}

impl LoaneeProfile {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(LedgerError::Validation {
                message: "loanee name is required".to_string(),
            });
        }
        if self.national_id.is_empty() {
            return Err(LedgerError::Validation {
                message: "national id is required".to_string(),
            });
        }
        if self.mobile.is_empty() {
            return Err(LedgerError::Validation {
                message: "mobile number is required".to_string(),
            });
        }
        Ok(())
    }
}

impl Loanee {
    /// register a new loanee with a fresh id
    pub fn new(profile: LoaneeProfile, date_added: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: profile.name,
            national_id: profile.national_id,
            mobile: profile.mobile,
            email: profile.email.filter(|email| !email.is_empty()),
            employment_status: profile.employment_status,
            date_added,
        }
    }

    /// shallow merge of a patch; id and date_added never change
    pub fn patched(&self, patch: &LoaneePatch) -> Loanee {
        let mut loanee = self.clone();
        if let Some(name) = &patch.name {
            loanee.name = name.clone();
        }
        if let Some(national_id) = &patch.national_id {
            loanee.national_id = national_id.clone();
        }
        if let Some(mobile) = &patch.mobile {
            loanee.mobile = mobile.clone();
        }
        if let Some(email) = &patch.email {
            loanee.email = if email.is_empty() {
                None
            } else {
                Some(email.clone())
            };
        }
        if let Some(employment_status) = patch.employment_status {
            loanee.employment_status = employment_status;
        }
        loanee
    }
}

/// partial update to a loanee; fields left as None stay unchanged,
/// an empty email string clears the stored address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaneePatch {
    pub name: Option<String>,
    pub national_id: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
}

impl From<LoaneeProfile> for LoaneePatch {
    fn from(profile: LoaneeProfile) -> Self {
        Self {
            name: Some(profile.name),
            national_id: Some(profile.national_id),
            mobile: Some(profile.mobile),
            email: Some(profile.email.unwrap_or_default()),
            employment_status: Some(profile.employment_status),
        }
    }
}
