//! Inventory error types.

use ledgerly_shared::AppError;
use ledgerly_shared::types::ProductId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Requested quantity exceeds what is on hand.
    ///
    /// Carries the product and the shortfall so callers can present an
    /// actionable message (available vs. required).
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// The product that is short.
        product_id: ProductId,
        /// Quantity requested.
        requested: Decimal,
        /// Quantity on hand.
        available: Decimal,
    },

    /// Movement quantity must be positive.
    #[error("Movement quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Adjustment delta cannot be zero.
    #[error("Adjustment delta cannot be zero")]
    ZeroAdjustment,

    /// Unit cost cannot be negative.
    #[error("Unit cost cannot be negative, got {0}")]
    NegativeUnitCost(Decimal),
}

impl InventoryError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::NonPositiveQuantity(_) => "NON_POSITIVE_QUANTITY",
            Self::ZeroAdjustment => "ZERO_ADJUSTMENT",
            Self::NegativeUnitCost(_) => "NEGATIVE_UNIT_COST",
        }
    }
}

impl From<InventoryError> for AppError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::InsufficientStock {
                product_id,
                requested,
                available,
            } => Self::InsufficientStock {
                product_id: product_id.into_inner(),
                requested,
                available,
            },
            InventoryError::NonPositiveQuantity(_)
            | InventoryError::ZeroAdjustment
            | InventoryError::NegativeUnitCost(_) => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_stock_carries_shortfall() {
        let err = InventoryError::InsufficientStock {
            product_id: ProductId::new(),
            requested: dec!(10),
            available: dec!(5),
        };
        assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
        let msg = err.to_string();
        assert!(msg.contains("requested 10"));
        assert!(msg.contains("available 5"));
    }

    #[test]
    fn test_app_error_conversion() {
        let err: AppError = InventoryError::InsufficientStock {
            product_id: ProductId::new(),
            requested: dec!(10),
            available: dec!(5),
        }
        .into();
        assert!(matches!(err, AppError::InsufficientStock { .. }));

        let err: AppError = InventoryError::ZeroAdjustment.into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
