use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::settings::Settings;
use crate::types::{BorrowerProfile, LoanId, LoanStatus, PeriodUnit};

/// a disbursed loan and its outstanding balances
///
/// the loan number is assigned at issuance and never changes; the borrower
/// block is a point-in-time snapshot, not a reference into the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub loan_number: String,
    pub borrower: BorrowerProfile,
    pub amount: Money,
    pub interest_rate: Rate,
    pub total_interest: Money,
    pub repayment_period: PeriodUnit,
    pub repayment_period_value: u32,
    pub issuance_date: NaiveDate,
    pub due_date: NaiveDate,
    pub expected_repayment_amount: Money,
    #[serde(default)]
    pub loan_type: String,
    pub principal_balance: Money,
    pub interest_balance: Money,
    pub status: LoanStatus,
    #[serde(default)]
    pub last_repayment_date: Option<NaiveDate>,
}

impl Loan {
    /// combined outstanding balance
    pub fn outstanding(&self) -> Money {
        self.principal_balance + self.interest_balance
    }

    /// strictly past the due date while still running
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == LoanStatus::Running && today > self.due_date
    }
}

/// final calendar date of the repayment term
pub fn due_date_for(issued: NaiveDate, unit: PeriodUnit, value: u32) -> NaiveDate {
    match unit {
        PeriodUnit::Months => issued + Months::new(value),
        PeriodUnit::Weeks => issued + Days::new(7 * value as u64),
        PeriodUnit::Days => issued + Days::new(value as u64),
    }
}

/// per-period installment: (principal + interest) / periods, rounded to
/// whole currency units
pub fn expected_repayment(amount: Money, total_interest: Money, periods: u32) -> Money {
    let periods = periods.max(1);
    ((amount + total_interest) / rust_decimal::Decimal::from(periods)).round_whole()
}

/// validated loan issuance request
///
/// `interest_rate` falls back to the settings default; `total_interest`
/// falls back to the flat-rate derivation `amount x rate`
#[derive(Debug, Clone, PartialEq)]
pub struct LoanDraft {
    pub borrower: BorrowerProfile,
    pub amount: Money,
    pub interest_rate: Option<Rate>,
    pub total_interest: Option<Money>,
    pub repayment_period: PeriodUnit,
    pub repayment_period_value: u32,
    pub issuance_date: NaiveDate,
    pub loan_type: String,
}

impl LoanDraft {
    /// validate and derive the full loan record
    pub fn build(self, settings: &Settings, sequence: u32, today: NaiveDate) -> Result<Loan> {
        if self.borrower.name.is_empty() {
            return Err(LedgerError::Validation {
                message: "loanee name is required".to_string(),
            });
        }
        if self.borrower.national_id.is_empty() {
            return Err(LedgerError::Validation {
                message: "national id is required".to_string(),
            });
        }
        if self.borrower.mobile.is_empty() {
            return Err(LedgerError::Validation {
                message: "mobile number is required".to_string(),
            });
        }
        if self.loan_type.is_empty() {
            return Err(LedgerError::Validation {
                message: "loan type is required".to_string(),
            });
        }
        if !self.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount {
                amount: self.amount,
            });
        }
        if self.repayment_period_value == 0 {
            return Err(LedgerError::Validation {
                message: "repayment period value must be at least 1".to_string(),
            });
        }
        if self.issuance_date > today {
            return Err(LedgerError::DateInFuture {
                date: self.issuance_date,
            });
        }

        let interest_rate = self
            .interest_rate
            .unwrap_or(settings.default_interest_rate);
        let total_interest = self
            .total_interest
            .unwrap_or_else(|| self.amount.percentage(interest_rate.as_percentage()));
        if total_interest.is_negative() {
            return Err(LedgerError::NegativeAmount {
                amount: total_interest,
            });
        }

        let mut borrower = self.borrower;
        borrower.email = borrower.email.filter(|email| !email.is_empty());

        let due_date = due_date_for(
            self.issuance_date,
            self.repayment_period,
            self.repayment_period_value,
        );

        Ok(Loan {
            id: Uuid::new_v4(),
            loan_number: settings.format_loan_number(sequence),
            borrower,
            amount: self.amount,
            interest_rate,
            total_interest,
            repayment_period: self.repayment_period,
            repayment_period_value: self.repayment_period_value,
            issuance_date: self.issuance_date,
            due_date,
            expected_repayment_amount: expected_repayment(
                self.amount,
                total_interest,
                self.repayment_period_value,
            ),
            loan_type: self.loan_type,
            principal_balance: self.amount,
            interest_balance: total_interest,
            status: LoanStatus::Running,
            last_repayment_date: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmploymentStatus;

    fn borrower() -> BorrowerProfile {
        BorrowerProfile {
            name: "John Doe".to_string(),
            national_id: "12345678".to_string(),
            mobile: "0712345678".to_string(),
            email: Some("john@email.com".to_string()),
            employment_status: EmploymentStatus::Employed,
        }
    }

    fn draft() -> LoanDraft {
        LoanDraft {
            borrower: borrower(),
            amount: Money::from_major(50_000),
            interest_rate: None,
            total_interest: None,
            repayment_period: PeriodUnit::Months,
            repayment_period_value: 6,
            issuance_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            loan_type: "Personal Loan".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[test]
    fn test_due_date_by_unit() {
        let issued = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert_eq!(
            due_date_for(issued, PeriodUnit::Months, 6),
            NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
        );
        assert_eq!(
            due_date_for(issued, PeriodUnit::Weeks, 2),
            NaiveDate::from_ymd_opt(2024, 1, 29).unwrap()
        );
        assert_eq!(
            due_date_for(issued, PeriodUnit::Days, 10),
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap()
        );
    }

    #[test]
    fn test_due_date_month_end_clamps() {
        let issued = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            due_date_for(issued, PeriodUnit::Months, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_expected_repayment_rounds_to_whole_units() {
        // (50,000 + 7,500) / 6 = 9,583.33
        assert_eq!(
            expected_repayment(Money::from_major(50_000), Money::from_major(7_500), 6),
            Money::from_major(9_583)
        );
    }

    #[test]
    fn test_build_derives_interest_from_settings_default() {
        let loan = draft().build(&Settings::default(), 1, today()).unwrap();

        assert_eq!(loan.interest_rate, Rate::from_percentage(15));
        assert_eq!(loan.total_interest, Money::from_major(7_500));
        assert_eq!(loan.principal_balance, Money::from_major(50_000));
        assert_eq!(loan.interest_balance, Money::from_major(7_500));
        assert_eq!(loan.status, LoanStatus::Running);
        assert_eq!(loan.loan_number, "JMSFinancialServices_Ln_001");
        assert_eq!(loan.expected_repayment_amount, Money::from_major(9_583));
        assert_eq!(loan.last_repayment_date, None);
    }

    #[test]
    fn test_build_keeps_explicit_flat_interest() {
        let mut request = draft();
        request.total_interest = Some(Money::from_major(5_000));

        let loan = request.build(&Settings::default(), 1, today()).unwrap();
        assert_eq!(loan.total_interest, Money::from_major(5_000));
        assert_eq!(loan.interest_balance, Money::from_major(5_000));
    }

    #[test]
    fn test_build_rejects_future_issuance_date() {
        let mut request = draft();
        request.issuance_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let err = request.build(&Settings::default(), 1, today()).unwrap_err();
        assert!(matches!(err, LedgerError::DateInFuture { .. }));
    }

    #[test]
    fn test_build_rejects_zero_amount() {
        let mut request = draft();
        request.amount = Money::ZERO;

        let err = request.build(&Settings::default(), 1, today()).unwrap_err();
        assert!(matches!(err, LedgerError::NonPositiveAmount { .. }));
    }

    #[test]
    fn test_build_rejects_missing_borrower_fields() {
        let mut request = draft();
        request.borrower.mobile = String::new();

        assert!(request.build(&Settings::default(), 1, today()).is_err());
    }

    #[test]
    fn test_build_drops_empty_email() {
        let mut request = draft();
        request.borrower.email = Some(String::new());

        let loan = request.build(&Settings::default(), 1, today()).unwrap();
        assert_eq!(loan.borrower.email, None);
    }

    #[test]
    fn test_overdue_is_strictly_after_due_date() {
        let loan = draft().build(&Settings::default(), 1, today()).unwrap();

        assert!(!loan.is_overdue(loan.due_date));
        assert!(loan.is_overdue(loan.due_date + Days::new(1)));
    }
}
