//! Weighted-average costing transitions.
//!
//! Purchases fold their unit cost into the running weighted average; sales
//! and adjustments are valued at the current average and never change it.
//! Quantity can never go negative: any transition that would cross zero is
//! rejected whole, not clamped.

use ledgerly_shared::types::money::{round_cost, round_currency};
use ledgerly_shared::types::{ProductId, WarehouseId};
use rust_decimal::Decimal;

use super::error::InventoryError;
use super::types::{Availability, CostedMovement, MovementType, StockLevel};

/// Pure inventory costing engine.
///
/// All functions take the current stock level (or `None` when the pair has
/// never held stock) and return the transition result without mutating
/// anything; the store applies results under per-key serialization.
pub struct CostingService;

impl CostingService {
    /// Checks whether `quantity` units can be taken from the level.
    ///
    /// Read-only; a `None` level reports zero on hand.
    #[must_use]
    pub fn check_availability(level: Option<&StockLevel>, quantity: Decimal) -> Availability {
        let on_hand = level.map_or(Decimal::ZERO, |l| l.quantity);
        Availability {
            available: quantity <= on_hand,
            on_hand,
        }
    }

    /// Applies a purchase of `quantity` units at `unit_cost`.
    ///
    /// Recomputes the weighted average:
    /// `new_avg = (old_qty·old_avg + qty·unit_cost) / (old_qty + qty)`.
    /// A first purchase creates the level with `average_cost = unit_cost`.
    ///
    /// # Errors
    ///
    /// Returns an error for non-positive quantity or negative unit cost.
    pub fn apply_purchase(
        level: Option<StockLevel>,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
        unit_cost: Decimal,
    ) -> Result<CostedMovement, InventoryError> {
        if quantity <= Decimal::ZERO {
            return Err(InventoryError::NonPositiveQuantity(quantity));
        }
        if unit_cost < Decimal::ZERO {
            return Err(InventoryError::NegativeUnitCost(unit_cost));
        }

        let mut level = level.unwrap_or_else(|| StockLevel::empty(product_id, warehouse_id));
        let unit_cost = round_cost(unit_cost);

        let new_quantity = level.quantity + quantity;
        let new_average = if level.quantity.is_zero() {
            unit_cost
        } else {
            round_cost(
                (level.quantity * level.average_cost + quantity * unit_cost) / new_quantity,
            )
        };

        level.quantity = new_quantity;
        level.average_cost = new_average;
        level.version += 1;

        Ok(CostedMovement {
            level,
            movement_type: MovementType::Purchase,
            quantity,
            unit_cost,
            cogs: Decimal::ZERO,
        })
    }

    /// Applies a sale of `quantity` units.
    ///
    /// Valued at the **current** average cost — sales only decrement the
    /// quantity, the average never moves. Returns the COGS amount
    /// (`quantity × average_cost`, currency-rounded) for the caller to post.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` when `quantity` exceeds what is on hand.
    pub fn apply_sale(
        level: Option<StockLevel>,
        product_id: ProductId,
        quantity: Decimal,
    ) -> Result<CostedMovement, InventoryError> {
        if quantity <= Decimal::ZERO {
            return Err(InventoryError::NonPositiveQuantity(quantity));
        }

        let on_hand = level.as_ref().map_or(Decimal::ZERO, |l| l.quantity);
        if quantity > on_hand {
            return Err(InventoryError::InsufficientStock {
                product_id,
                requested: quantity,
                available: on_hand,
            });
        }

        // on_hand >= quantity > 0 implies the level exists
        let mut level = level.expect("stock level must exist when on_hand > 0");
        let unit_cost = level.average_cost;
        level.quantity -= quantity;
        level.version += 1;

        Ok(CostedMovement {
            level,
            movement_type: MovementType::Sale,
            quantity: -quantity,
            unit_cost,
            cogs: round_currency(quantity * unit_cost),
        })
    }

    /// Applies a manual adjustment of `delta` units (positive or negative).
    ///
    /// Valued at the current average cost, or `fallback_unit_cost` (the
    /// product's configured cost price) when the pair has no stock level
    /// yet. A delta that would drive the quantity negative is rejected.
    ///
    /// # Errors
    ///
    /// Returns `ZeroAdjustment` for a zero delta or `InsufficientStock` when
    /// the delta would cross zero.
    pub fn apply_adjustment(
        level: Option<StockLevel>,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Decimal,
        fallback_unit_cost: Decimal,
    ) -> Result<CostedMovement, InventoryError> {
        if delta.is_zero() {
            return Err(InventoryError::ZeroAdjustment);
        }

        let existed = level.is_some();
        let mut level = level.unwrap_or_else(|| StockLevel::empty(product_id, warehouse_id));

        let new_quantity = level.quantity + delta;
        if new_quantity < Decimal::ZERO {
            return Err(InventoryError::InsufficientStock {
                product_id,
                requested: -delta,
                available: level.quantity,
            });
        }

        let unit_cost = if existed && !level.average_cost.is_zero() {
            level.average_cost
        } else {
            round_cost(fallback_unit_cost)
        };

        level.quantity = new_quantity;
        if !existed {
            level.average_cost = unit_cost;
        }
        level.version += 1;

        Ok(CostedMovement {
            level,
            movement_type: MovementType::Adjustment,
            quantity: delta,
            unit_cost,
            cogs: Decimal::ZERO,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn keys() -> (ProductId, WarehouseId) {
        (ProductId::new(), WarehouseId::new())
    }

    #[test]
    fn test_first_purchase_creates_level_at_unit_cost() {
        let (p, w) = keys();
        let result = CostingService::apply_purchase(None, p, w, dec!(10), dec!(5)).unwrap();

        assert_eq!(result.level.quantity, dec!(10));
        assert_eq!(result.level.average_cost, dec!(5));
        assert_eq!(result.level.version, 1);
        assert_eq!(result.quantity, dec!(10));
        assert_eq!(result.movement_type, MovementType::Purchase);
    }

    #[test]
    fn test_weighted_average_recomputed_on_purchase() {
        // Scenario: 10 units @ $5 then 10 units @ $7 -> avg $6
        let (p, w) = keys();
        let first = CostingService::apply_purchase(None, p, w, dec!(10), dec!(5)).unwrap();
        let second =
            CostingService::apply_purchase(Some(first.level), p, w, dec!(10), dec!(7)).unwrap();

        assert_eq!(second.level.quantity, dec!(20));
        assert_eq!(second.level.average_cost, dec!(6));
        assert_eq!(second.level.total_value(), dec!(120));
    }

    #[test]
    fn test_sale_keeps_average_and_returns_cogs() {
        // Continue the scenario: sell 5 -> qty 15, avg still $6, COGS $30
        let (p, w) = keys();
        let first = CostingService::apply_purchase(None, p, w, dec!(10), dec!(5)).unwrap();
        let second =
            CostingService::apply_purchase(Some(first.level), p, w, dec!(10), dec!(7)).unwrap();
        let sale = CostingService::apply_sale(Some(second.level), p, dec!(5)).unwrap();

        assert_eq!(sale.level.quantity, dec!(15));
        assert_eq!(sale.level.average_cost, dec!(6));
        assert_eq!(sale.cogs, dec!(30));
        assert_eq!(sale.quantity, dec!(-5));
        assert_eq!(sale.unit_cost, dec!(6));
    }

    #[test]
    fn test_oversell_rejected_with_shortfall() {
        let (p, w) = keys();
        let purchase = CostingService::apply_purchase(None, p, w, dec!(5), dec!(4)).unwrap();
        let result = CostingService::apply_sale(Some(purchase.level.clone()), p, dec!(10));

        assert!(matches!(
            result,
            Err(InventoryError::InsufficientStock {
                requested,
                available,
                ..
            }) if requested == dec!(10) && available == dec!(5)
        ));
        // input level untouched by the failed call
        assert_eq!(purchase.level.quantity, dec!(5));
    }

    #[test]
    fn test_sale_from_empty_rejected() {
        let (p, _) = keys();
        let result = CostingService::apply_sale(None, p, dec!(1));
        assert!(matches!(
            result,
            Err(InventoryError::InsufficientStock { available, .. }) if available == Decimal::ZERO
        ));
    }

    #[test]
    fn test_adjustment_down_valued_at_average() {
        let (p, w) = keys();
        let purchase = CostingService::apply_purchase(None, p, w, dec!(10), dec!(5)).unwrap();
        let adj =
            CostingService::apply_adjustment(Some(purchase.level), p, w, dec!(-3), dec!(9)).unwrap();

        assert_eq!(adj.level.quantity, dec!(7));
        assert_eq!(adj.unit_cost, dec!(5)); // average, not the fallback
        assert_eq!(adj.movement_type, MovementType::Adjustment);
    }

    #[test]
    fn test_adjustment_without_level_uses_fallback_cost() {
        let (p, w) = keys();
        let adj = CostingService::apply_adjustment(None, p, w, dec!(4), dec!(2.50)).unwrap();

        assert_eq!(adj.level.quantity, dec!(4));
        assert_eq!(adj.level.average_cost, dec!(2.50));
        assert_eq!(adj.unit_cost, dec!(2.50));
    }

    #[test]
    fn test_adjustment_below_zero_rejected() {
        let (p, w) = keys();
        let purchase = CostingService::apply_purchase(None, p, w, dec!(2), dec!(5)).unwrap();
        let result =
            CostingService::apply_adjustment(Some(purchase.level), p, w, dec!(-3), dec!(5));
        assert!(matches!(
            result,
            Err(InventoryError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn test_zero_adjustment_rejected() {
        let (p, w) = keys();
        let result = CostingService::apply_adjustment(None, p, w, dec!(0), dec!(5));
        assert!(matches!(result, Err(InventoryError::ZeroAdjustment)));
    }

    #[test]
    fn test_availability() {
        let (p, w) = keys();
        let purchase = CostingService::apply_purchase(None, p, w, dec!(5), dec!(4)).unwrap();

        let avail = CostingService::check_availability(Some(&purchase.level), dec!(5));
        assert!(avail.available);
        assert_eq!(avail.on_hand, dec!(5));

        let avail = CostingService::check_availability(Some(&purchase.level), dec!(6));
        assert!(!avail.available);

        let avail = CostingService::check_availability(None, dec!(1));
        assert!(!avail.available);
        assert_eq!(avail.on_hand, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_average_rounded_to_cost_scale() {
        let (p, w) = keys();
        let first = CostingService::apply_purchase(None, p, w, dec!(3), dec!(1)).unwrap();
        let second =
            CostingService::apply_purchase(Some(first.level), p, w, dec!(3), dec!(2)).unwrap();

        // (3*1 + 3*2) / 6 = 1.5
        assert_eq!(second.level.average_cost, dec!(1.5));

        let third =
            CostingService::apply_purchase(Some(second.level), p, w, dec!(1), dec!(1)).unwrap();
        // (6*1.5 + 1*1) / 7 = 1.428571... -> 1.4286 at cost scale
        assert_eq!(third.level.average_cost, dec!(1.4286));
    }
}
