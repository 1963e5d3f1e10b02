//! Financial report generation.
//!
//! This module provides pure business logic for generating financial
//! reports from posted ledger lines:
//! - Trial Balance
//! - Balance Sheet
//! - Income Statement
//! - Account / party statements with running balances
//!
//! The store feeds these functions only live (non-deleted), posted lines.

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::{
    AccountRef, AccountStatementReport, BalanceSheetReport, BalanceSheetRow, BalanceSheetSection,
    IncomeStatementReport, IncomeStatementRow, IncomeStatementSection, LedgerLine, StatementEntry,
    TrialBalanceReport, TrialBalanceRow,
};
