//! Report repository.
//!
//! Snapshots the chart of accounts and the live ledger view under a read
//! guard, then hands aggregation to the core report service.

use chrono::NaiveDate;
use ledgerly_core::reports::error::ReportError;
use ledgerly_core::reports::service::ReportService;
use ledgerly_core::reports::types::{
    AccountStatementReport, BalanceSheetReport, IncomeStatementReport, TrialBalanceReport,
};
use ledgerly_shared::AppResult;
use ledgerly_shared::types::AccountId;

use crate::store::MemoryStore;

/// Repository for financial reports.
pub struct ReportRepository;

impl ReportRepository {
    /// Trial balance over all live lines dated on or before `as_of`.
    #[must_use]
    pub fn trial_balance(store: &MemoryStore, as_of: NaiveDate) -> TrialBalanceReport {
        let tables = store.read();
        ReportService::trial_balance(as_of, &tables.account_refs(), &tables.live_lines())
    }

    /// Balance sheet as of `as_of`, with net income folded into equity.
    #[must_use]
    pub fn balance_sheet(store: &MemoryStore, as_of: NaiveDate) -> BalanceSheetReport {
        let tables = store.read();
        ReportService::balance_sheet(as_of, &tables.account_refs(), &tables.live_lines())
    }

    /// Income statement over `[start, end]`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an inverted date range.
    pub fn income_statement(
        store: &MemoryStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<IncomeStatementReport> {
        let tables = store.read();
        let report =
            ReportService::income_statement(start, end, &tables.account_refs(), &tables.live_lines())?;
        Ok(report)
    }

    /// Statement for one account over `[start, end]`, with opening,
    /// running, and closing balances.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing account and a validation error for
    /// an inverted date range.
    pub fn account_statement(
        store: &MemoryStore,
        account_id: AccountId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<AccountStatementReport> {
        let tables = store.read();
        let account = tables
            .account_refs()
            .into_iter()
            .find(|a| a.id == account_id)
            .ok_or(ReportError::AccountNotFound(account_id))?;
        let report = ReportService::account_statement(&account, start, end, &tables.live_lines())?;
        Ok(report)
    }
}
