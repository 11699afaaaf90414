use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::DuplicateField;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
    },

    #[error("duplicate loanee {field}: {value}")]
    DuplicateLoanee {
        field: DuplicateField,
        value: String,
    },

    #[error("amount must be positive: {amount}")]
    NonPositiveAmount {
        amount: Money,
    },

    #[error("repayment amount cannot be negative: {amount}")]
    NegativeAmount {
        amount: Money,
    },

    #[error("date {date} is in the future")]
    DateInFuture {
        date: NaiveDate,
    },

    #[error("snapshot decode failed: {message}")]
    SnapshotDecode {
        message: String,
    },

    #[error("persistence failure: {message}")]
    Persistence {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
