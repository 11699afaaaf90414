use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::decimal::{Money, Rate};
use crate::ledger::LedgerState;
use crate::loan::Loan;
use crate::loanee::Loanee;
use crate::repayment::Repayment;
use crate::types::{LoanStatus, PeriodUnit};

/// whole-book totals
///
/// issued and charged figures cover every loan ever booked; the
/// outstanding figures cover running loans only
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_loans: usize,
    pub running_loans: usize,
    pub repaid_loans: usize,
    pub principal_issued: Money,
    pub interest_charged: Money,
    pub outstanding_principal: Money,
    pub outstanding_interest: Money,
    pub principal_collected: Money,
    pub interest_collected: Money,
    pub overdue_loans: usize,
}

pub fn portfolio_summary(state: &LedgerState, today: NaiveDate) -> PortfolioSummary {
    PortfolioSummary {
        total_loans: state.loans.len(),
        running_loans: state.running_loans().count(),
        repaid_loans: state.repaid_loans().count(),
        principal_issued: state.loans.iter().map(|loan| loan.amount).sum(),
        interest_charged: state.loans.iter().map(|loan| loan.total_interest).sum(),
        outstanding_principal: state.running_loans().map(|loan| loan.principal_balance).sum(),
        outstanding_interest: state.running_loans().map(|loan| loan.interest_balance).sum(),
        principal_collected: state
            .repayments
            .iter()
            .map(|repayment| repayment.principal_amount)
            .sum(),
        interest_collected: state
            .repayments
            .iter()
            .map(|repayment| repayment.interest_amount)
            .sum(),
        overdue_loans: overdue_loans(state, today).len(),
    }
}

/// per-type issuance and completion counts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTypePerformance {
    pub loan_type: String,
    pub loans: usize,
    pub amount_issued: Money,
    pub repaid: usize,
}

/// grouped by loan type, ordered by type name
pub fn loan_type_performance(state: &LedgerState) -> Vec<LoanTypePerformance> {
    let mut by_type: BTreeMap<&str, LoanTypePerformance> = BTreeMap::new();
    for loan in &state.loans {
        let entry = by_type
            .entry(loan.loan_type.as_str())
            .or_insert_with(|| LoanTypePerformance {
                loan_type: loan.loan_type.clone(),
                loans: 0,
                amount_issued: Money::ZERO,
                repaid: 0,
            });
        entry.loans += 1;
        entry.amount_issued += loan.amount;
        if loan.status == LoanStatus::Repaid {
            entry.repaid += 1;
        }
    }
    by_type.into_values().collect()
}

/// per-borrower figures recomputed from the loan book
///
/// loans are matched to the loanee through the borrower snapshot's
/// national id, not a stored reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaneeStats {
    pub total_loans: usize,
    pub running_loans: usize,
    pub total_borrowed: Money,
    pub total_outstanding: Money,
}

pub fn loanee_stats(state: &LedgerState, loanee: &Loanee) -> LoaneeStats {
    let mut stats = LoaneeStats {
        total_loans: 0,
        running_loans: 0,
        total_borrowed: Money::ZERO,
        total_outstanding: Money::ZERO,
    };
    for loan in state
        .loans
        .iter()
        .filter(|loan| loan.borrower.national_id == loanee.national_id)
    {
        stats.total_loans += 1;
        stats.total_borrowed += loan.amount;
        stats.total_outstanding += loan.outstanding();
        if loan.status == LoanStatus::Running {
            stats.running_loans += 1;
        }
    }
    stats
}

/// totals over an inclusive date window
///
/// loans are selected by issuance date, repayments by repayment date;
/// outstanding figures are the selected loans' current balances.
/// `collection_rate` is principal repaid over principal issued, zero
/// when nothing was issued in the window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub loans_issued: usize,
    pub principal_issued: Money,
    pub interest_charged: Money,
    pub outstanding_principal: Money,
    pub outstanding_interest: Money,
    pub repayments_received: usize,
    pub principal_repaid: Money,
    pub interest_repaid: Money,
    pub collection_rate: Rate,
}

pub fn period_report(state: &LedgerState, from: NaiveDate, to: NaiveDate) -> PeriodReport {
    let loans: Vec<&Loan> = state
        .loans
        .iter()
        .filter(|loan| loan.issuance_date >= from && loan.issuance_date <= to)
        .collect();
    let repayments: Vec<&Repayment> = state
        .repayments
        .iter()
        .filter(|repayment| repayment.date >= from && repayment.date <= to)
        .collect();

    let principal_issued: Money = loans.iter().map(|loan| loan.amount).sum();
    let principal_repaid: Money = repayments.iter().map(|r| r.principal_amount).sum();
    let collection_rate = if principal_issued.is_positive() {
        Rate::from_decimal(principal_repaid.as_decimal() / principal_issued.as_decimal())
    } else {
        Rate::ZERO
    };

    PeriodReport {
        from,
        to,
        loans_issued: loans.len(),
        principal_issued,
        interest_charged: loans.iter().map(|loan| loan.total_interest).sum(),
        outstanding_principal: loans.iter().map(|loan| loan.principal_balance).sum(),
        outstanding_interest: loans.iter().map(|loan| loan.interest_balance).sum(),
        repayments_received: repayments.len(),
        principal_repaid,
        interest_repaid: repayments.iter().map(|r| r.interest_amount).sum(),
        collection_rate,
    }
}

/// one loan's full payment history with the headline totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanStatement {
    pub loan: Loan,
    pub repayments: Vec<Repayment>,
    pub total_paid: Money,
    pub total_due: Money,
    pub balance_remaining: Money,
}

/// statement for the loan holding the given number
///
/// `balance_remaining` is plain arithmetic over the log, so collecting
/// past the due total drives it negative rather than clamping
pub fn loan_statement(state: &LedgerState, loan_number: &str) -> Option<LoanStatement> {
    let loan = state.loan_by_number(loan_number)?.clone();
    let repayments: Vec<Repayment> = state.repayments_for_loan(loan_number).cloned().collect();
    let total_paid: Money = repayments.iter().map(|r| r.total()).sum();
    let total_due = loan.amount + loan.total_interest;

    Some(LoanStatement {
        loan,
        repayments,
        total_paid,
        total_due,
        balance_remaining: total_due - total_paid,
    })
}

/// running loans strictly past their due date
pub fn overdue_loans(state: &LedgerState, today: NaiveDate) -> Vec<&Loan> {
    state
        .loans
        .iter()
        .filter(|loan| loan.is_overdue(today))
        .collect()
}

/// conventional days per repayment period unit
pub fn payment_interval_days(unit: PeriodUnit) -> i64 {
    match unit {
        PeriodUnit::Days => 1,
        PeriodUnit::Weeks => 7,
        PeriodUnit::Months => 30,
    }
}

/// how recently a loan has been paid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepaymentRecency {
    /// nothing recorded against the loan yet
    NoPaymentsYet,
    /// last payment landed within one expected interval
    OnSchedule { days_since_last: i64 },
    /// quiet for longer than one expected interval
    Stale { days_since_last: i64 },
}

pub fn repayment_recency(loan: &Loan, today: NaiveDate) -> RepaymentRecency {
    match loan.last_repayment_date {
        None => RepaymentRecency::NoPaymentsYet,
        Some(last) => {
            let days_since_last = (today - last).num_days();
            if days_since_last > payment_interval_days(loan.repayment_period) {
                RepaymentRecency::Stale { days_since_last }
            } else {
                RepaymentRecency::OnSchedule { days_since_last }
            }
        }
    }
}
