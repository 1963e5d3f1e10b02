//! Sales workflow error types.

use ledgerly_shared::AppError;
use ledgerly_shared::types::SaleId;
use thiserror::Error;

use crate::inventory::InventoryError;
use crate::ledger::LedgerError;

use super::types::SaleStatus;

/// Errors that can occur during the sale workflow.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Sale not found.
    #[error("Sale not found: {0}")]
    SaleNotFound(SaleId),

    /// Only draft sales can be confirmed.
    #[error("Sale {sale_id} cannot be confirmed from status {status}")]
    NotDraft {
        /// The sale.
        sale_id: SaleId,
        /// Its current status.
        status: SaleStatus,
    },

    /// Only draft sales can be cancelled.
    #[error("Sale {sale_id} cannot be cancelled from status {status}")]
    CannotCancel {
        /// The sale.
        sale_id: SaleId,
        /// Its current status.
        status: SaleStatus,
    },

    /// Confirmation requires at least one line item.
    #[error("Sale {0} has no line items")]
    NoItems(SaleId),

    /// A required posting account is not configured.
    #[error("Posting account not configured: {0}")]
    MissingPostingAccount(&'static str),

    /// Inventory rejected the sale.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// The ledger rejected the posting.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl SalesError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SaleNotFound(_) => "SALE_NOT_FOUND",
            Self::NotDraft { .. } => "SALE_NOT_DRAFT",
            Self::CannotCancel { .. } => "SALE_CANNOT_CANCEL",
            Self::NoItems(_) => "SALE_NO_ITEMS",
            Self::MissingPostingAccount(_) => "MISSING_POSTING_ACCOUNT",
            Self::Inventory(err) => err.error_code(),
            Self::Ledger(err) => err.error_code(),
        }
    }
}

impl From<SalesError> for AppError {
    fn from(err: SalesError) -> Self {
        match err {
            SalesError::SaleNotFound(_) => Self::NotFound(err.to_string()),
            SalesError::NotDraft { .. } | SalesError::CannotCancel { .. } => {
                Self::State(err.to_string())
            }
            SalesError::NoItems(_) => Self::Validation(err.to_string()),
            SalesError::MissingPostingAccount(_) => Self::Configuration(err.to_string()),
            SalesError::Inventory(inner) => inner.into(),
            SalesError::Ledger(inner) => inner.into(),
        }
    }
}
