//! Ledger error types for validation and state errors.

use ledgerly_shared::AppError;
use ledgerly_shared::types::{AccountId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// Transaction must have at least 2 lines.
    #[error("Transaction must have at least 2 lines")]
    InsufficientLines,

    /// Transaction is not balanced (debits != credits).
    #[error("Imbalanced entry. Debit: {debit}, Credit: {credit}")]
    ImbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amount cannot be zero.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line amount cannot be negative.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    // ========== Account Errors ==========
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Account has been soft-deleted.
    #[error("Account {0} has been deleted")]
    AccountDeleted(AccountId),

    // ========== Transaction State Errors ==========
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Cannot cancel a reconciled transaction.
    #[error("Cannot cancel transaction {0}: already reconciled")]
    AlreadyReconciled(TransactionId),

    /// Transaction is already cancelled.
    #[error("Transaction {0} is already cancelled")]
    AlreadyCancelled(TransactionId),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::ImbalancedEntry { .. } => "IMBALANCED_ENTRY",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountDeleted(_) => "ACCOUNT_DELETED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::AlreadyReconciled(_) => "ALREADY_RECONCILED",
            Self::AlreadyCancelled(_) => "ALREADY_CANCELLED",
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ImbalancedEntry { debit, credit } => {
                Self::ImbalancedEntry { debit, credit }
            }
            LedgerError::InsufficientLines | LedgerError::ZeroAmount | LedgerError::NegativeAmount => {
                Self::Validation(err.to_string())
            }
            LedgerError::AccountNotFound(_)
            | LedgerError::AccountDeleted(_)
            | LedgerError::TransactionNotFound(_) => Self::NotFound(err.to_string()),
            LedgerError::AccountInactive(_)
            | LedgerError::AlreadyReconciled(_)
            | LedgerError::AlreadyCancelled(_) => Self::State(err.to_string()),
        }
    }
}
