//! Report data types.

use chrono::NaiveDate;
use ledgerly_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::types::AccountType;

/// Account metadata needed by the report aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRef {
    /// Account ID.
    pub id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
}

/// A posted ledger line flattened for aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// Transaction date.
    pub date: NaiveDate,
    /// Transaction description.
    pub description: String,
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One row of the trial balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Raw total debit.
    pub total_debit: Decimal,
    /// Raw total credit.
    pub total_credit: Decimal,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date (inclusive cutoff).
    pub as_of: NaiveDate,
    /// Per-account rows, ordered by account code.
    pub rows: Vec<TrialBalanceRow>,
    /// Total debit over all rows.
    pub total_debit: Decimal,
    /// Total credit over all rows.
    pub total_credit: Decimal,
    /// Whether debits equal credits within the report tolerance.
    pub is_balanced: bool,
}

/// One row of a balance sheet section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetRow {
    /// Account ID; `None` for synthetic rows (current period earnings).
    pub account_id: Option<AccountId>,
    /// Row label.
    pub name: String,
    /// Classified balance.
    pub balance: Decimal,
}

/// Balance sheet section (assets, liabilities, equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total.
    pub total: Decimal,
    /// Rows in this section.
    pub rows: Vec<BalanceSheetRow>,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date (inclusive cutoff).
    pub as_of: NaiveDate,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section (includes the synthetic current-period-earnings row).
    pub equity: BalanceSheetSection,
    /// Net income folded into equity.
    pub net_income: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity within tolerance.
    pub is_balanced: bool,
}

/// One row of an income statement section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account name.
    pub name: String,
    /// Classified balance over the period.
    pub balance: Decimal,
}

/// Income statement section (revenue or expenses).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatementSection {
    /// Section total.
    pub total: Decimal,
    /// Rows in this section.
    pub rows: Vec<IncomeStatementRow>,
}

/// Income statement report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// Revenue section.
    pub revenue: IncomeStatementSection,
    /// Expenses section.
    pub expenses: IncomeStatementSection,
    /// Net income (revenue − expenses).
    pub net_income: Decimal,
}

/// One entry of an account statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Entry date.
    pub date: NaiveDate,
    /// The owning transaction.
    pub transaction_id: TransactionId,
    /// Transaction description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this entry.
    pub running_balance: Decimal,
}

/// Account (or party control account) statement over a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatementReport {
    /// The account.
    pub account_id: AccountId,
    /// Period start (inclusive).
    pub period_start: NaiveDate,
    /// Period end (inclusive).
    pub period_end: NaiveDate,
    /// Classified balance of everything strictly before the period.
    pub opening_balance: Decimal,
    /// In-period entries in chronological order.
    pub entries: Vec<StatementEntry>,
    /// Opening balance plus all in-period deltas.
    pub closing_balance: Decimal,
}
