//! Reconciliation error types.

use ledgerly_shared::AppError;
use ledgerly_shared::types::{ReconciliationId, ReconciliationItemId};
use thiserror::Error;

/// Errors that can occur in the reconciliation lifecycle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconciliationError {
    /// Reconciliation not found.
    #[error("Reconciliation not found: {0}")]
    NotFound(ReconciliationId),

    /// The reconciliation is completed and can no longer be amended.
    #[error("Reconciliation {0} is completed and cannot be amended")]
    AlreadyCompleted(ReconciliationId),

    /// A completed reconciliation cannot be deleted.
    #[error("Reconciliation {0} is completed and cannot be deleted")]
    CannotDeleteCompleted(ReconciliationId),

    /// Statement item not found on this reconciliation.
    #[error("Reconciliation item not found: {0}")]
    ItemNotFound(ReconciliationItemId),

    /// The item is already matched to a transaction.
    #[error("Reconciliation item {0} is already matched")]
    ItemAlreadyMatched(ReconciliationItemId),
}

impl ReconciliationError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "RECONCILIATION_NOT_FOUND",
            Self::AlreadyCompleted(_) => "RECONCILIATION_COMPLETED",
            Self::CannotDeleteCompleted(_) => "RECONCILIATION_DELETE_COMPLETED",
            Self::ItemNotFound(_) => "RECONCILIATION_ITEM_NOT_FOUND",
            Self::ItemAlreadyMatched(_) => "RECONCILIATION_ITEM_MATCHED",
        }
    }
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        match err {
            ReconciliationError::NotFound(_) | ReconciliationError::ItemNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            ReconciliationError::AlreadyCompleted(_)
            | ReconciliationError::CannotDeleteCompleted(_)
            | ReconciliationError::ItemAlreadyMatched(_) => Self::State(err.to_string()),
        }
    }
}
