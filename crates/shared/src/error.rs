//! Application-wide error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
///
/// Domain modules define their own error enums and convert into this type at
/// the crate boundary, so the API layer sees one uniform surface.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or soft-deleted entity.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate unique key.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested quantity exceeds availability.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The product that is short.
        product_id: Uuid,
        /// Quantity the caller asked for.
        requested: Decimal,
        /// Quantity actually on hand.
        available: Decimal,
    },

    /// Ledger posting where total debits do not equal total credits.
    #[error("Imbalanced entry: debit {debit}, credit {credit}")]
    ImbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Operation invalid for the entity's current lifecycle state.
    #[error("Invalid state: {0}")]
    State(String),

    /// Required linked account or setting is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::ImbalancedEntry { .. } => 400,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::InsufficientStock { .. } | Self::State(_) | Self::Configuration(_) => 422,
            Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::ImbalancedEntry { .. } => "IMBALANCED_ENTRY",
            Self::State(_) => "INVALID_STATE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AppError::Validation(String::new()).status_code(), 400);
        assert_eq!(AppError::NotFound(String::new()).status_code(), 404);
        assert_eq!(AppError::Conflict(String::new()).status_code(), 409);
        assert_eq!(AppError::State(String::new()).status_code(), 422);
        assert_eq!(AppError::Configuration(String::new()).status_code(), 422);
        assert_eq!(AppError::Internal(String::new()).status_code(), 500);
        assert_eq!(
            AppError::ImbalancedEntry {
                debit: dec!(100),
                credit: dec!(50)
            }
            .status_code(),
            400
        );
        assert_eq!(
            AppError::InsufficientStock {
                product_id: Uuid::nil(),
                requested: dec!(10),
                available: dec!(5)
            }
            .status_code(),
            422
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Conflict(String::new()).error_code(), "CONFLICT");
        assert_eq!(AppError::State(String::new()).error_code(), "INVALID_STATE");
        assert_eq!(
            AppError::Configuration(String::new()).error_code(),
            "CONFIGURATION_ERROR"
        );
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_insufficient_stock_display_carries_shortfall() {
        let err = AppError::InsufficientStock {
            product_id: Uuid::nil(),
            requested: dec!(10),
            available: dec!(5),
        };
        let msg = err.to_string();
        assert!(msg.contains("requested 10"));
        assert!(msg.contains("available 5"));
    }

    #[test]
    fn test_imbalanced_entry_display() {
        let err = AppError::ImbalancedEntry {
            debit: dec!(100.00),
            credit: dec!(50.00),
        };
        assert_eq!(
            err.to_string(),
            "Imbalanced entry: debit 100.00, credit 50.00"
        );
    }
}
