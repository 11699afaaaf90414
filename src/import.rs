use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::ledger::Ledger;
use crate::loan::LoanDraft;
use crate::repayment::RepaymentDraft;
use crate::settings::DEFAULT_LOAN_TYPE;
use crate::types::{BorrowerProfile, PayerDetails, PeriodUnit};

/// one already-parsed loan row
///
/// file parsing stays outside the crate; rows arrive with borrower
/// details inline and the derived fields missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    /// keeps a caller-supplied number instead of assigning the next one
    #[serde(default)]
    pub loan_number: Option<String>,
    pub borrower: BorrowerProfile,
    pub amount: Money,
    #[serde(default)]
    pub interest_rate: Option<Rate>,
    pub repayment_period: PeriodUnit,
    pub repayment_period_value: u32,
    pub issuance_date: NaiveDate,
    #[serde(default)]
    pub loan_type: Option<String>,
}

/// one already-parsed repayment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepaymentRecord {
    pub loan_number: String,
    pub date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    #[serde(default)]
    pub payer: Option<PayerDetails>,
    pub payment_channel: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// outcome of a bulk submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    /// 1-based position in the input
    pub row: usize,
    pub message: String,
}

/// book a batch of loan rows through the standard issuance path
///
/// each row derives interest, balances, due date, and expected
/// repayment exactly as interactive issuance does. rows carrying their
/// own loan number keep it; the issuance counter advances either way.
/// bad rows are reported per row and do not stop the batch
pub fn import_loans(
    ledger: &mut Ledger,
    records: &[LoanRecord],
    time_provider: &SafeTimeProvider,
) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, record) in records.iter().enumerate() {
        match import_loan(ledger, record.clone(), time_provider) {
            Ok(()) => report.imported += 1,
            Err(e) => report.errors.push(ImportError {
                row: index + 1,
                message: e.to_string(),
            }),
        }
    }
    report
}

fn import_loan(
    ledger: &mut Ledger,
    record: LoanRecord,
    time_provider: &SafeTimeProvider,
) -> Result<()> {
    let today = time_provider.now().date_naive();
    let draft = LoanDraft {
        borrower: record.borrower,
        amount: record.amount,
        interest_rate: record.interest_rate,
        total_interest: None,
        repayment_period: record.repayment_period,
        repayment_period_value: record.repayment_period_value,
        issuance_date: record.issuance_date,
        loan_type: record
            .loan_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_LOAN_TYPE.to_string()),
    };
    let mut loan = draft.build(ledger.settings(), ledger.next_loan_number(), today)?;
    if let Some(number) = record.loan_number.filter(|n| !n.is_empty()) {
        loan.loan_number = number;
    }
    ledger.admit_loan(loan)?;
    Ok(())
}

/// book a batch of repayment rows through the standard recording path
///
/// rows naming a loan nobody holds still land in the log, matching
/// interactive recording
pub fn import_repayments(
    ledger: &mut Ledger,
    records: &[RepaymentRecord],
    time_provider: &SafeTimeProvider,
) -> ImportReport {
    let mut report = ImportReport::default();
    for (index, record) in records.iter().enumerate() {
        let draft = RepaymentDraft {
            loan_number: record.loan_number.clone(),
            date: record.date,
            principal_amount: record.principal_amount,
            interest_amount: record.interest_amount,
            payer: record.payer.clone(),
            payment_channel: record.payment_channel.clone(),
            notes: record.notes.clone(),
        };
        match ledger.record_repayment(draft, time_provider) {
            Ok(_) => report.imported += 1,
            Err(e) => report.errors.push(ImportError {
                row: index + 1,
                message: e.to_string(),
            }),
        }
    }
    report
}
