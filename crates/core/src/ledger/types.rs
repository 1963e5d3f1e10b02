//! Ledger domain types for transaction creation and validation.
//!
//! This module defines the core types used for creating and validating
//! financial transactions in the double-entry bookkeeping system.

use chrono::NaiveDate;
use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::balance::NormalBalance;

/// Account type classification.
///
/// Every account belongs to one of the five fundamental types, which
/// determines its normal balance direction and report grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, inventory, receivables).
    Asset,
    /// Obligations owed (payables, loans).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// Returns the normal balance direction for this account type.
    ///
    /// Asset/Expense accounts are debit-normal; Liability/Equity/Revenue
    /// accounts are credit-normal.
    #[must_use]
    pub const fn normal_balance(self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns true for types reported on the balance sheet.
    #[must_use]
    pub const fn is_balance_sheet(self) -> bool {
        matches!(self, Self::Asset | Self::Liability | Self::Equity)
    }
}

/// Entry type: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

/// Transaction type classification.
///
/// Categorizes transactions for reporting and workflow purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Sale to a customer.
    Sale,
    /// Purchase from a vendor.
    Purchase,
    /// Outgoing payment.
    Payment,
    /// Incoming receipt.
    Receipt,
    /// General journal entry.
    Journal,
    /// Adjustment entry.
    Adjustment,
}

/// Transaction lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction is being drafted.
    Draft,
    /// Transaction has been posted to the ledger (immutable).
    Posted,
    /// Transaction has been cancelled (soft-deleted, kept for audit).
    Cancelled,
}

impl TransactionStatus {
    /// Returns true if the transaction counts toward balances.
    #[must_use]
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns true if the transaction has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Input for a single line in a transaction.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Whether this is a debit or credit line.
    pub entry_type: EntryType,
    /// The amount (must be positive).
    pub amount: Decimal,
    /// Optional memo/description for this line.
    pub memo: Option<String>,
}

impl LineInput {
    /// Convenience constructor for a debit line.
    #[must_use]
    pub const fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            entry_type: EntryType::Debit,
            amount,
            memo: None,
        }
    }

    /// Convenience constructor for a credit line.
    #[must_use]
    pub const fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            entry_type: EntryType::Credit,
            amount,
            memo: None,
        }
    }
}

/// Input for recording a new transaction.
#[derive(Debug, Clone)]
pub struct RecordTransactionInput {
    /// The type of transaction.
    pub transaction_type: TransactionType,
    /// The date of the transaction.
    pub date: NaiveDate,
    /// A description of the transaction.
    pub description: String,
    /// Optional reference (e.g., sale or statement number).
    pub reference: Option<String>,
    /// The lines to post (must have at least 2, and must balance).
    pub lines: Vec<LineInput>,
}

/// A validated line ready to be persisted.
///
/// Exactly one of `debit`/`credit` is non-zero, both are non-negative and
/// rounded to the currency scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedLine {
    /// The account posted to.
    pub account_id: AccountId,
    /// The debit amount (zero for credit lines).
    pub debit: Decimal,
    /// The credit amount (zero for debit lines).
    pub credit: Decimal,
    /// Optional memo/description.
    pub memo: Option<String>,
}

/// Transaction totals for validation and display.
#[derive(Debug, Clone)]
pub struct TransactionTotals {
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
    /// Whether the transaction is balanced (debits == credits).
    pub is_balanced: bool,
}

impl TransactionTotals {
    /// Creates new transaction totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_normal_balance_per_type() {
        assert_eq!(AccountType::Asset.normal_balance(), NormalBalance::Debit);
        assert_eq!(AccountType::Expense.normal_balance(), NormalBalance::Debit);
        assert_eq!(
            AccountType::Liability.normal_balance(),
            NormalBalance::Credit
        );
        assert_eq!(AccountType::Equity.normal_balance(), NormalBalance::Credit);
        assert_eq!(AccountType::Revenue.normal_balance(), NormalBalance::Credit);
    }

    #[test]
    fn test_balance_sheet_types() {
        assert!(AccountType::Asset.is_balance_sheet());
        assert!(AccountType::Liability.is_balance_sheet());
        assert!(AccountType::Equity.is_balance_sheet());
        assert!(!AccountType::Revenue.is_balance_sheet());
        assert!(!AccountType::Expense.is_balance_sheet());
    }

    #[test]
    fn test_transaction_status() {
        assert!(TransactionStatus::Posted.is_posted());
        assert!(!TransactionStatus::Draft.is_posted());
        assert!(TransactionStatus::Cancelled.is_cancelled());
        assert!(!TransactionStatus::Posted.is_cancelled());
    }

    #[test]
    fn test_transaction_totals_balanced() {
        let totals = TransactionTotals::new(dec!(100.00), dec!(100.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_transaction_totals_unbalanced() {
        let totals = TransactionTotals::new(dec!(100.00), dec!(50.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(50.00));
    }
}
