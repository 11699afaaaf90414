pub mod decimal;
pub mod errors;
pub mod events;
pub mod import;
pub mod ledger;
pub mod loan;
pub mod loanee;
pub mod persistence;
pub mod repayment;
pub mod reports;
pub mod settings;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use import::{
    import_loans, import_repayments, ImportError, ImportReport, LoanRecord, RepaymentRecord,
};
pub use ledger::{apply_repayment_to_loans, Command, Ledger, LedgerState, Snapshot};
pub use loan::{due_date_for, expected_repayment, Loan, LoanDraft};
pub use loanee::{Loanee, LoaneePatch, LoaneeProfile};
pub use persistence::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use repayment::{Repayment, RepaymentDraft};
pub use reports::{
    loan_statement, loan_type_performance, loanee_stats, overdue_loans, period_report,
    portfolio_summary, repayment_recency, LoanStatement, LoanTypePerformance, LoaneeStats,
    PeriodReport, PortfolioSummary, RepaymentRecency,
};
pub use settings::{Settings, SettingsPatch, DEFAULT_LOAN_TYPE};
pub use types::{
    BorrowerProfile, DuplicateField, EmploymentStatus, LoanId, LoanStatus, LoaneeId, PayerDetails,
    PeriodUnit, RepaymentId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
