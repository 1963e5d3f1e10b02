//! Inventory domain types.

use chrono::NaiveDate;
use ledgerly_shared::types::{MovementId, ProductId, TransactionId, WarehouseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// On-hand stock for one (product, warehouse) pair.
///
/// This is the single source of truth for quantity and average cost. It is
/// mutated only through [`crate::inventory::CostingService`] transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    /// The product.
    pub product_id: ProductId,
    /// The warehouse.
    pub warehouse_id: WarehouseId,
    /// On-hand quantity. Never negative.
    pub quantity: Decimal,
    /// Running weighted-average unit cost.
    pub average_cost: Decimal,
    /// Mutation counter, bumped on every accepted transition.
    pub version: i64,
}

impl StockLevel {
    /// Creates an empty stock level for a (product, warehouse) pair.
    #[must_use]
    pub fn empty(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self {
            product_id,
            warehouse_id,
            quantity: Decimal::ZERO,
            average_cost: Decimal::ZERO,
            version: 0,
        }
    }

    /// Derived total value: quantity × average cost.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.quantity * self.average_cost
    }
}

/// Type of an inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Stock received from a purchase.
    Purchase,
    /// Stock issued for a sale.
    Sale,
    /// Manual correction.
    Adjustment,
    /// Transfer between warehouses.
    Transfer,
}

/// Immutable audit record of a quantity change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryMovement {
    /// Movement ID.
    pub id: MovementId,
    /// The product moved.
    pub product_id: ProductId,
    /// The warehouse affected.
    pub warehouse_id: WarehouseId,
    /// The ledger transaction this movement originated from, if any.
    pub transaction_id: Option<TransactionId>,
    /// Movement classification.
    pub movement_type: MovementType,
    /// Signed quantity (+ inbound, − outbound).
    pub quantity: Decimal,
    /// Unit cost at the time of the movement.
    pub unit_cost: Decimal,
    /// Date of the movement.
    pub date: NaiveDate,
    /// Free-form reason (adjustments).
    pub reason: Option<String>,
}

/// Result of an availability check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Availability {
    /// Whether the requested quantity can be fulfilled.
    pub available: bool,
    /// The quantity currently on hand.
    pub on_hand: Decimal,
}

/// Result of a costing transition: the next stock level plus the movement
/// data to record.
#[derive(Debug, Clone)]
pub struct CostedMovement {
    /// The stock level after the transition.
    pub level: StockLevel,
    /// Movement classification.
    pub movement_type: MovementType,
    /// Signed quantity of the movement.
    pub quantity: Decimal,
    /// Unit cost the movement was valued at.
    pub unit_cost: Decimal,
    /// Cost of goods sold for sale movements (quantity × average cost,
    /// rounded to the currency scale); zero otherwise.
    pub cogs: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_stock_level() {
        let level = StockLevel::empty(ProductId::new(), WarehouseId::new());
        assert_eq!(level.quantity, Decimal::ZERO);
        assert_eq!(level.average_cost, Decimal::ZERO);
        assert_eq!(level.total_value(), Decimal::ZERO);
        assert_eq!(level.version, 0);
    }

    #[test]
    fn test_total_value() {
        let level = StockLevel {
            product_id: ProductId::new(),
            warehouse_id: WarehouseId::new(),
            quantity: dec!(15),
            average_cost: dec!(6),
            version: 2,
        };
        assert_eq!(level.total_value(), dec!(90));
    }
}
