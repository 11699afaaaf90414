use serde::{Deserialize, Serialize};

use crate::loan::Loan;
use crate::loanee::Loanee;
use crate::repayment::Repayment;
use crate::settings::Settings;
use crate::types::{LoanStatus, LoaneeId};

/// the full bookkeeping state
///
/// a single aggregate: every command produces the next state from the
/// previous one, and the whole thing is what gets persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    pub loans: Vec<Loan>,
    pub repayments: Vec<Repayment>,
    pub loanees: Vec<Loanee>,
    pub settings: Settings,
    pub next_loan_number: u32,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self {
            loans: Vec::new(),
            repayments: Vec::new(),
            loanees: Vec::new(),
            settings: Settings::default(),
            next_loan_number: 1,
        }
    }
}

impl LedgerState {
    /// first loan carrying the given number
    pub fn loan_by_number(&self, loan_number: &str) -> Option<&Loan> {
        self.loans.iter().find(|loan| loan.loan_number == loan_number)
    }

    pub fn loanee(&self, id: LoaneeId) -> Option<&Loanee> {
        self.loanees.iter().find(|loanee| loanee.id == id)
    }

    pub fn running_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.status == LoanStatus::Running)
    }

    pub fn repaid_loans(&self) -> impl Iterator<Item = &Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.status == LoanStatus::Repaid)
    }

    /// repayments recorded against the given loan number, in entry order
    pub fn repayments_for_loan<'a>(
        &'a self,
        loan_number: &'a str,
    ) -> impl Iterator<Item = &'a Repayment> {
        self.repayments
            .iter()
            .filter(move |repayment| repayment.loan_number == loan_number)
    }
}
