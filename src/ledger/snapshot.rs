use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};
use crate::ledger::state::LedgerState;
use crate::loan::Loan;
use crate::loanee::Loanee;
use crate::repayment::Repayment;
use crate::settings::{Settings, SettingsPatch, DEFAULT_LOAN_TYPE};

fn default_next_loan_number() -> u32 {
    1
}

/// the whole-ledger persistence blob
///
/// every field is lenient on decode: collections default to empty,
/// settings are stored as a patch merged over defaults, and unknown
/// fields from older writers are ignored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub repayments: Vec<Repayment>,
    #[serde(default)]
    pub loanees: Vec<Loanee>,
    #[serde(default)]
    pub settings: SettingsPatch,
    #[serde(default = "default_next_loan_number")]
    pub next_loan_number: u32,
}

impl Snapshot {
    pub fn from_state(state: &LedgerState) -> Self {
        Snapshot {
            loans: state.loans.clone(),
            repayments: state.repayments.clone(),
            loanees: state.loanees.clone(),
            settings: SettingsPatch::from(state.settings.clone()),
            next_loan_number: state.next_loan_number,
        }
    }

    pub fn encode(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Persistence {
            message: e.to_string(),
        })
    }

    pub fn decode(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| LedgerError::SnapshotDecode {
            message: e.to_string(),
        })
    }

    /// reconcile the blob into a usable state
    ///
    /// settings fields absent from the blob keep their defaults, loans
    /// written before loan types existed get the default type, and the
    /// issuance counter never restores below one. restoring the same
    /// snapshot twice yields the same state
    pub fn restore(self) -> LedgerState {
        let settings = Settings::default().merged(&self.settings);
        let loans = self
            .loans
            .into_iter()
            .map(|mut loan| {
                if loan.loan_type.is_empty() {
                    loan.loan_type = DEFAULT_LOAN_TYPE.to_string();
                }
                loan
            })
            .collect();
        LedgerState {
            loans,
            repayments: self.repayments,
            loanees: self.loanees,
            settings,
            next_loan_number: self.next_loan_number.max(1),
        }
    }
}
