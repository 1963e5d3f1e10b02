//! Reconciliation data types.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerly_shared::types::{AccountId, ReconciliationId, ReconciliationItemId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a reconciliation. Transitions are one-way:
/// Pending → InProgress → Completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStatus {
    /// Opened, no items added yet.
    Pending,
    /// At least one item added.
    InProgress,
    /// Finished. Terminal; the reconciliation can no longer be amended
    /// or deleted.
    Completed,
}

impl std::fmt::Display for ReconciliationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// State of a single statement item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Not yet matched to a ledger transaction.
    Pending,
    /// Matched to a ledger transaction.
    Matched,
}

/// One line of the external bank statement being reconciled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconciliationItem {
    /// Item ID.
    pub id: ReconciliationItemId,
    /// Statement line date.
    pub date: NaiveDate,
    /// Statement line description.
    pub description: String,
    /// Signed statement amount (deposits positive, withdrawals negative).
    pub amount: Decimal,
    /// Matching state.
    pub status: ItemStatus,
    /// The matched transaction, once matched.
    pub transaction_id: Option<TransactionId>,
}

/// A reconciliation of one ledger account against an external statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Reconciliation ID.
    pub id: ReconciliationId,
    /// The ledger account being reconciled.
    pub account_id: AccountId,
    /// Statement cutoff date.
    pub statement_date: NaiveDate,
    /// Ending balance reported by the bank.
    pub statement_balance: Decimal,
    /// Book balance: Σ(debit − credit) over the account's live posted
    /// lines dated on or before the statement date.
    pub book_balance: Decimal,
    /// `statement_balance − book_balance`.
    pub difference: Decimal,
    /// Lifecycle state.
    pub status: ReconciliationStatus,
    /// Set when the reconciliation is completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Owned statement items.
    pub items: Vec<ReconciliationItem>,
}
