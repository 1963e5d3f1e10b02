//! Stored entity records.
//!
//! These are the persisted shapes of the domain; the pure types they embed
//! (statuses, amounts, lines) come from `ledgerly-core`.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerly_core::ledger::types::{AccountType, TransactionStatus, TransactionType};
use ledgerly_shared::types::{AccountId, LineId, PartyId, ProductId, TransactionId, WarehouseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A chart-of-accounts entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID.
    pub id: AccountId,
    /// Unique human-readable code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional parent for hierarchy.
    pub parent_id: Option<AccountId>,
    /// Inactive accounts cannot be posted to.
    pub active: bool,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Whether the account is visible in the live view.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// A sellable product with its posting accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Default cost price, used to value adjustments into empty stock.
    pub cost_price: Decimal,
    /// Selling price per unit.
    pub selling_price: Decimal,
    /// The inventory asset account credited when stock is issued.
    pub inventory_account_id: AccountId,
    /// The COGS expense account debited when stock is issued.
    pub cogs_account_id: AccountId,
}

/// A warehouse holding stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// Warehouse ID.
    pub id: WarehouseId,
    /// Warehouse name.
    pub name: String,
}

/// A customer or vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Party ID.
    pub id: PartyId,
    /// Party name.
    pub name: String,
}

/// A posted ledger transaction with its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Transaction classification.
    pub transaction_type: TransactionType,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Optional external reference.
    pub reference: Option<String>,
    /// Lifecycle status.
    pub status: TransactionStatus,
    /// Set when a reconciliation item matches this transaction.
    pub reconciled: bool,
    /// Soft-delete marker, set on cancellation.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Total debit over the lines.
    pub total_debit: Decimal,
    /// Total credit over the lines (equal to total debit).
    pub total_credit: Decimal,
    /// The owned lines, deleted together with the transaction.
    pub lines: Vec<TransactionLine>,
}

impl Transaction {
    /// Whether the transaction contributes to the live ledger view.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none() && self.status == TransactionStatus::Posted
    }
}

/// One line of a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Line ID.
    pub id: LineId,
    /// The account posted to.
    pub account_id: AccountId,
    /// Debit amount (zero on credit lines).
    pub debit: Decimal,
    /// Credit amount (zero on debit lines).
    pub credit: Decimal,
    /// Optional memo.
    pub memo: Option<String>,
}
