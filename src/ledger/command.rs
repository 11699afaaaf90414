use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::ledger::state::LedgerState;
use crate::loan::Loan;
use crate::loanee::{Loanee, LoaneePatch};
use crate::repayment::Repayment;
use crate::settings::SettingsPatch;
use crate::types::{LoanStatus, LoaneeId};

/// the closed set of state transitions
///
/// commands carry already-validated records; applying one is pure and
/// total, so validation failures can never leave the state half-changed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// append a loan and advance the issuance counter
    AddLoan(Loan),
    /// append a repayment and apply it to matching loans
    RecordRepayment(Repayment),
    /// append a loanee to the directory
    AddLoanee(Loanee),
    /// patch a loanee in place; no-op when the id is unknown
    UpdateLoanee { id: LoaneeId, patch: LoaneePatch },
    /// drop a loanee; no-op when the id is unknown
    DeleteLoanee { id: LoaneeId },
    /// shallow-merge a settings patch
    UpdateSettings(SettingsPatch),
}

impl Command {
    /// produce the next state
    pub fn apply(self, state: &LedgerState) -> LedgerState {
        let mut next = state.clone();
        match self {
            Command::AddLoan(loan) => {
                next.loans.push(loan);
                next.next_loan_number += 1;
            }
            Command::RecordRepayment(repayment) => {
                let (loans, _) = apply_repayment_to_loans(&next.loans, &repayment);
                next.loans = loans;
                // the log keeps every repayment, matched or not
                next.repayments.push(repayment);
            }
            Command::AddLoanee(loanee) => {
                next.loanees.push(loanee);
            }
            Command::UpdateLoanee { id, patch } => {
                next.loanees = next
                    .loanees
                    .iter()
                    .map(|loanee| {
                        if loanee.id == id {
                            loanee.patched(&patch)
                        } else {
                            loanee.clone()
                        }
                    })
                    .collect();
            }
            Command::DeleteLoanee { id } => {
                next.loanees.retain(|loanee| loanee.id != id);
            }
            Command::UpdateSettings(patch) => {
                next.settings.apply(patch);
            }
        }
        next
    }
}

/// apply one repayment across the loan book
///
/// every loan carrying the repayment's number has its balances reduced,
/// clamped at zero; status flips to repaid only when both balances reach
/// zero, and the last repayment date is stamped even for zero amounts.
/// the bool reports whether any loan matched
pub fn apply_repayment_to_loans(loans: &[Loan], repayment: &Repayment) -> (Vec<Loan>, bool) {
    let mut matched = false;
    let updated = loans
        .iter()
        .map(|loan| {
            if loan.loan_number != repayment.loan_number {
                return loan.clone();
            }
            matched = true;

            let mut loan = loan.clone();
            loan.principal_balance =
                (loan.principal_balance - repayment.principal_amount).max(Money::ZERO);
            loan.interest_balance =
                (loan.interest_balance - repayment.interest_amount).max(Money::ZERO);
            loan.status = if loan.principal_balance.is_zero() && loan.interest_balance.is_zero() {
                LoanStatus::Repaid
            } else {
                LoanStatus::Running
            };
            loan.last_repayment_date = Some(repayment.date);
            loan
        })
        .collect();
    (updated, matched)
}
