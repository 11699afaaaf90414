use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, LoaneeId, RepaymentId};

/// all events that can be emitted by ledger operations
///
/// events are a transient notification channel drained by the caller;
/// ledger state is never rebuilt from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // loan events
    LoanIssued {
        loan_id: LoanId,
        loan_number: String,
        amount: Money,
        total_interest: Money,
        due_date: NaiveDate,
    },
    LoanSettled {
        loan_id: LoanId,
        loan_number: String,
        date: NaiveDate,
    },

    // repayment events
    RepaymentRecorded {
        repayment_id: RepaymentId,
        loan_number: String,
        principal_amount: Money,
        interest_amount: Money,
        date: NaiveDate,
    },
    RepaymentUnmatched {
        repayment_id: RepaymentId,
        loan_number: String,
    },

    // directory events
    LoaneeAdded {
        loanee_id: LoaneeId,
        name: String,
    },
    LoaneeUpdated {
        loanee_id: LoaneeId,
    },
    LoaneeRemoved {
        loanee_id: LoaneeId,
    },

    // configuration events
    SettingsUpdated {
        company_name: String,
    },
    SnapshotRestored {
        loans: usize,
        repayments: usize,
        loanees: usize,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
