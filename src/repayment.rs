use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{PayerDetails, RepaymentId};

/// a recorded repayment
///
/// repayments are append-only; they are never edited or deleted, and they
/// reference the loan by number rather than id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
    pub id: RepaymentId,
    pub loan_number: String,
    pub date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub payer: PayerDetails,
    pub payment_channel: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Repayment {
    /// total of both portions
    pub fn total(&self) -> Money {
        self.principal_amount + self.interest_amount
    }
}

/// validated repayment request
///
/// `payer` may be left out; the ledger fills it from the matched loan's
/// borrower, or with placeholder details when no loan matches
#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentDraft {
    pub loan_number: String,
    pub date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub payer: Option<PayerDetails>,
    pub payment_channel: String,
    pub notes: Option<String>,
}

impl RepaymentDraft {
    /// validate and assemble the repayment record
    pub fn build(self, payer_fallback: Option<PayerDetails>, today: NaiveDate) -> Result<Repayment> {
        if self.loan_number.is_empty() {
            return Err(LedgerError::Validation {
                message: "loan number is required".to_string(),
            });
        }
        if self.payment_channel.is_empty() {
            return Err(LedgerError::Validation {
                message: "payment channel is required".to_string(),
            });
        }
        if self.principal_amount.is_negative() {
            return Err(LedgerError::NegativeAmount {
                amount: self.principal_amount,
            });
        }
        if self.interest_amount.is_negative() {
            return Err(LedgerError::NegativeAmount {
                amount: self.interest_amount,
            });
        }
        if self.principal_amount.is_zero() && self.interest_amount.is_zero() {
            return Err(LedgerError::Validation {
                message: "either principal or interest amount is required".to_string(),
            });
        }
        if self.date > today {
            return Err(LedgerError::DateInFuture { date: self.date });
        }

        let payer = self
            .payer
            .or(payer_fallback)
            .unwrap_or_else(PayerDetails::unknown);

        Ok(Repayment {
            id: Uuid::new_v4(),
            loan_number: self.loan_number,
            date: self.date,
            principal_amount: self.principal_amount,
            interest_amount: self.interest_amount,
            payer,
            payment_channel: self.payment_channel,
            notes: self.notes.filter(|notes| !notes.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RepaymentDraft {
        RepaymentDraft {
            loan_number: "JMSFinancialServices_Ln_001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 15).unwrap(),
            principal_amount: Money::from_major(8_000),
            interest_amount: Money::from_major(1_200),
            payer: None,
            payment_channel: "Mobile Money".to_string(),
            notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_build_with_fallback_payer() {
        let payer = PayerDetails {
            name: "John Doe".to_string(),
            national_id: "12345678".to_string(),
            mobile: "0712345678".to_string(),
        };

        let repayment = draft().build(Some(payer.clone()), today()).unwrap();
        assert_eq!(repayment.payer, payer);
        assert_eq!(repayment.total(), Money::from_major(9_200));
    }

    #[test]
    fn test_build_without_payer_uses_placeholder() {
        let repayment = draft().build(None, today()).unwrap();
        assert_eq!(repayment.payer, PayerDetails::unknown());
    }

    #[test]
    fn test_build_rejects_both_amounts_zero() {
        let mut request = draft();
        request.principal_amount = Money::ZERO;
        request.interest_amount = Money::ZERO;

        let err = request.build(None, today()).unwrap_err();
        assert!(matches!(err, LedgerError::Validation { .. }));
    }

    #[test]
    fn test_build_accepts_single_portion() {
        let mut request = draft();
        request.principal_amount = Money::ZERO;

        let repayment = request.build(None, today()).unwrap();
        assert_eq!(repayment.principal_amount, Money::ZERO);
        assert_eq!(repayment.interest_amount, Money::from_major(1_200));
    }

    #[test]
    fn test_build_rejects_negative_amount() {
        let mut request = draft();
        request.interest_amount = Money::from_major(-50);

        let err = request.build(None, today()).unwrap_err();
        assert!(matches!(err, LedgerError::NegativeAmount { .. }));
    }

    #[test]
    fn test_build_rejects_future_date() {
        let mut request = draft();
        request.date = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();

        let err = request.build(None, today()).unwrap_err();
        assert!(matches!(err, LedgerError::DateInFuture { .. }));
    }
}
