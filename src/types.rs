use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment
pub type RepaymentId = Uuid;

/// unique identifier for a loanee
pub type LoaneeId = Uuid;

/// loan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// outstanding balance remains
    Running,
    /// both balances cleared
    Repaid,
}

/// unit of the repayment term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Days,
    Weeks,
    Months,
}

impl FromStr for PeriodUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "days" => Ok(PeriodUnit::Days),
            "weeks" => Ok(PeriodUnit::Weeks),
            "months" => Ok(PeriodUnit::Months),
            other => Err(format!("unknown period unit: {other}")),
        }
    }
}

/// employment status of a borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
}

impl FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "employed" => Ok(EmploymentStatus::Employed),
            "self-employed" => Ok(EmploymentStatus::SelfEmployed),
            other => Err(format!("unknown employment status: {other}")),
        }
    }
}

/// which identity field collided in the loanee directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateField {
    NationalId,
    Mobile,
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateField::NationalId => write!(f, "national id"),
            DuplicateField::Mobile => write!(f, "mobile"),
        }
    }
}

/// borrower identity captured on the loan at issuance; edits to the
/// loanee directory never reach back into it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowerProfile {
    pub name: String,
    pub national_id: String,
    pub mobile: String,
    #[serde(default)]
    pub email: Option<String>,
    pub employment_status: EmploymentStatus,
}

/// who made a repayment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerDetails {
    pub name: String,
    pub national_id: String,
    pub mobile: String,
}

impl PayerDetails {
    /// placeholder payer for repayments recorded without a matched loan
    pub fn unknown() -> Self {
        Self {
            name: "Unknown".to_string(),
            national_id: "Unknown".to_string(),
            mobile: "Unknown".to_string(),
        }
    }
}

impl From<&BorrowerProfile> for PayerDetails {
    fn from(borrower: &BorrowerProfile) -> Self {
        Self {
            name: borrower.name.clone(),
            national_id: borrower.national_id.clone(),
            mobile: borrower.mobile.clone(),
        }
    }
}
