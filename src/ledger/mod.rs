pub mod command;
pub mod directory;
pub mod snapshot;
pub mod state;

use hourglass_rs::SafeTimeProvider;
use tracing::{debug, warn};

use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::loan::{Loan, LoanDraft};
use crate::loanee::{Loanee, LoaneePatch, LoaneeProfile};
use crate::persistence::{MemorySnapshotStore, SnapshotStore};
use crate::repayment::{Repayment, RepaymentDraft};
use crate::settings::{Settings, SettingsPatch};
use crate::types::{LoanId, LoanStatus, LoaneeId, PayerDetails};

pub use command::{apply_repayment_to_loans, Command};
pub use snapshot::Snapshot;
pub use state::LedgerState;

/// the bookkeeping handle
///
/// owns the aggregate state, a snapshot store, and the event channel.
/// every mutating method validates its input, applies a command, and
/// persists the whole snapshot before returning
pub struct Ledger {
    state: LedgerState,
    store: Box<dyn SnapshotStore>,
    events: EventStore,
}

impl Ledger {
    /// open a ledger over a snapshot store
    ///
    /// a missing blob starts empty; an unreadable or unparseable one
    /// also starts empty, with a warning, rather than failing the open
    pub fn open(store: Box<dyn SnapshotStore>) -> Self {
        let mut events = EventStore::new();
        let state = match store.load() {
            Ok(Some(raw)) => match Snapshot::decode(&raw) {
                Ok(snapshot) => {
                    let state = snapshot.restore();
                    events.emit(LedgerEvent::SnapshotRestored {
                        loans: state.loans.len(),
                        repayments: state.repayments.len(),
                        loanees: state.loanees.len(),
                    });
                    state
                }
                Err(e) => {
                    warn!(error = %e, "snapshot unreadable, starting empty");
                    LedgerState::default()
                }
            },
            Ok(None) => LedgerState::default(),
            Err(e) => {
                warn!(error = %e, "snapshot load failed, starting empty");
                LedgerState::default()
            }
        };
        Self {
            state,
            store,
            events,
        }
    }

    /// open an ephemeral ledger for tests and trials
    pub fn new_in_memory() -> Self {
        Self::open(Box::new(MemorySnapshotStore::new()))
    }

    /// apply a command and persist the result
    ///
    /// the command is applied before the save, so a failed save leaves
    /// the applied state in memory and returns the persistence error
    pub fn submit(&mut self, command: Command) -> Result<()> {
        self.state = command.apply(&self.state);
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let raw = Snapshot::from_state(&self.state).encode()?;
        self.store.save(&raw)?;
        debug!(
            loans = self.state.loans.len(),
            repayments = self.state.repayments.len(),
            loanees = self.state.loanees.len(),
            "snapshot persisted"
        );
        Ok(())
    }

    /// validate a draft, assign the next loan number, and book the loan
    pub fn issue_loan(
        &mut self,
        draft: LoanDraft,
        time_provider: &SafeTimeProvider,
    ) -> Result<Loan> {
        let today = time_provider.now().date_naive();
        let loan = draft.build(&self.state.settings, self.state.next_loan_number, today)?;
        self.admit_loan(loan)
    }

    /// book an already-formed loan, advancing the issuance counter
    pub(crate) fn admit_loan(&mut self, loan: Loan) -> Result<Loan> {
        self.submit(Command::AddLoan(loan.clone()))?;
        self.events.emit(LedgerEvent::LoanIssued {
            loan_id: loan.id,
            loan_number: loan.loan_number.clone(),
            amount: loan.amount,
            total_interest: loan.total_interest,
            due_date: loan.due_date,
        });
        Ok(loan)
    }

    /// validate and book a repayment against the loan book
    ///
    /// a repayment whose loan number matches nothing is still logged;
    /// the mismatch is surfaced through an event and a warning
    pub fn record_repayment(
        &mut self,
        draft: RepaymentDraft,
        time_provider: &SafeTimeProvider,
    ) -> Result<Repayment> {
        let today = time_provider.now().date_naive();
        let payer_fallback = self
            .state
            .loan_by_number(&draft.loan_number)
            .map(|loan| PayerDetails::from(&loan.borrower));
        let repayment = draft.build(payer_fallback, today)?;

        let matched = self.state.loan_by_number(&repayment.loan_number).is_some();
        let running_before: Vec<LoanId> = self
            .state
            .loans
            .iter()
            .filter(|loan| {
                loan.loan_number == repayment.loan_number && loan.status == LoanStatus::Running
            })
            .map(|loan| loan.id)
            .collect();

        self.submit(Command::RecordRepayment(repayment.clone()))?;

        self.events.emit(LedgerEvent::RepaymentRecorded {
            repayment_id: repayment.id,
            loan_number: repayment.loan_number.clone(),
            principal_amount: repayment.principal_amount,
            interest_amount: repayment.interest_amount,
            date: repayment.date,
        });
        if !matched {
            warn!(loan_number = %repayment.loan_number, "repayment matches no loan");
            self.events.emit(LedgerEvent::RepaymentUnmatched {
                repayment_id: repayment.id,
                loan_number: repayment.loan_number.clone(),
            });
        }

        let settled: Vec<(LoanId, String)> = self
            .state
            .loans
            .iter()
            .filter(|loan| running_before.contains(&loan.id) && loan.status == LoanStatus::Repaid)
            .map(|loan| (loan.id, loan.loan_number.clone()))
            .collect();
        for (loan_id, loan_number) in settled {
            self.events.emit(LedgerEvent::LoanSettled {
                loan_id,
                loan_number,
                date: repayment.date,
            });
        }

        Ok(repayment)
    }

    /// validate identity fields and add a loanee to the directory
    pub fn add_loanee(
        &mut self,
        profile: LoaneeProfile,
        time_provider: &SafeTimeProvider,
    ) -> Result<Loanee> {
        profile.validate()?;
        directory::ensure_unique(
            &self.state.loanees,
            &profile.national_id,
            &profile.mobile,
            None,
        )?;
        let loanee = Loanee::new(profile, time_provider.now().date_naive());
        self.submit(Command::AddLoanee(loanee.clone()))?;
        self.events.emit(LedgerEvent::LoaneeAdded {
            loanee_id: loanee.id,
            name: loanee.name.clone(),
        });
        Ok(loanee)
    }

    /// patch a loanee, re-checking uniqueness when identity fields change
    pub fn update_loanee(&mut self, id: LoaneeId, patch: LoaneePatch) -> Result<Loanee> {
        let current = self
            .state
            .loanee(id)
            .cloned()
            .ok_or_else(|| LedgerError::Validation {
                message: format!("unknown loanee id: {id}"),
            })?;
        if patch.national_id.is_some() || patch.mobile.is_some() {
            let national_id = patch
                .national_id
                .as_deref()
                .unwrap_or(current.national_id.as_str());
            let mobile = patch.mobile.as_deref().unwrap_or(current.mobile.as_str());
            directory::ensure_unique(&self.state.loanees, national_id, mobile, Some(id))?;
        }
        let updated = current.patched(&patch);
        self.submit(Command::UpdateLoanee { id, patch })?;
        self.events.emit(LedgerEvent::LoaneeUpdated { loanee_id: id });
        Ok(updated)
    }

    /// drop a loanee from the directory
    ///
    /// loan borrower snapshots are unaffected; an unknown id is a no-op
    pub fn remove_loanee(&mut self, id: LoaneeId) -> Result<()> {
        if self.state.loanee(id).is_none() {
            return Ok(());
        }
        self.submit(Command::DeleteLoanee { id })?;
        self.events.emit(LedgerEvent::LoaneeRemoved { loanee_id: id });
        Ok(())
    }

    /// shallow-merge a settings patch
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        self.submit(Command::UpdateSettings(patch))?;
        self.events.emit(LedgerEvent::SettingsUpdated {
            company_name: self.state.settings.company_name.clone(),
        });
        Ok(())
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn loans(&self) -> &[Loan] {
        &self.state.loans
    }

    pub fn running_loans(&self) -> impl Iterator<Item = &Loan> {
        self.state.running_loans()
    }

    pub fn repaid_loans(&self) -> impl Iterator<Item = &Loan> {
        self.state.repaid_loans()
    }

    pub fn loan_by_number(&self, loan_number: &str) -> Option<&Loan> {
        self.state.loan_by_number(loan_number)
    }

    pub fn repayments(&self) -> &[Repayment] {
        &self.state.repayments
    }

    pub fn repayments_for_loan<'a>(
        &'a self,
        loan_number: &'a str,
    ) -> impl Iterator<Item = &'a Repayment> {
        self.state.repayments_for_loan(loan_number)
    }

    pub fn loanees(&self) -> &[Loanee] {
        &self.state.loanees
    }

    pub fn loanee(&self, id: LoaneeId) -> Option<&Loanee> {
        self.state.loanee(id)
    }

    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    pub fn next_loan_number(&self) -> u32 {
        self.state.next_loan_number
    }

    /// drain events emitted since the last call
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        self.events.take_events()
    }

    pub fn events(&self) -> &[LedgerEvent] {
        self.events.events()
    }
}
