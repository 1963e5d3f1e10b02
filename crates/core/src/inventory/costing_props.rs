//! Property-based tests for the weighted-average costing engine.

use ledgerly_shared::types::money::round_cost;
use ledgerly_shared::types::{ProductId, WarehouseId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::costing::CostingService;
use super::error::InventoryError;
use super::types::StockLevel;

/// Strategy for quantities (1 to 1,000 whole units).
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000i64).prop_map(Decimal::from)
}

/// Strategy for unit costs (0.01 to 100.00).
fn cost_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// An arbitrary inventory operation.
#[derive(Debug, Clone)]
enum Op {
    Purchase(Decimal, Decimal),
    Sale(Decimal),
    Adjustment(Decimal),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (quantity_strategy(), cost_strategy()).prop_map(|(q, c)| Op::Purchase(q, c)),
        quantity_strategy().prop_map(Op::Sale),
        (-500i64..500i64).prop_map(|d| Op::Adjustment(Decimal::from(d))),
    ]
}

fn apply(level: Option<StockLevel>, op: &Op, p: ProductId, w: WarehouseId) -> Option<StockLevel> {
    let result = match op {
        Op::Purchase(qty, cost) => CostingService::apply_purchase(level.clone(), p, w, *qty, *cost),
        Op::Sale(qty) => CostingService::apply_sale(level.clone(), p, *qty),
        Op::Adjustment(delta) => {
            CostingService::apply_adjustment(level.clone(), p, w, *delta, Decimal::ONE)
        }
    };
    match result {
        Ok(outcome) => Some(outcome.level),
        // rejected ops leave the level unchanged
        Err(_) => level,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Quantity is never negative after any sequence of accepted operations.
    #[test]
    fn prop_quantity_never_negative(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let p = ProductId::new();
        let w = WarehouseId::new();
        let mut level: Option<StockLevel> = None;
        for op in &ops {
            level = apply(level, op, p, w);
            if let Some(ref l) = level {
                prop_assert!(l.quantity >= Decimal::ZERO);
            }
        }
    }

    /// The weighted-average formula holds for a purchase into existing stock.
    #[test]
    fn prop_weighted_average_formula(
        qty0 in quantity_strategy(),
        avg0 in cost_strategy(),
        qty_p in quantity_strategy(),
        cost_p in cost_strategy(),
    ) {
        let p = ProductId::new();
        let w = WarehouseId::new();
        let level = StockLevel {
            product_id: p,
            warehouse_id: w,
            quantity: qty0,
            average_cost: avg0,
            version: 1,
        };

        let outcome =
            CostingService::apply_purchase(Some(level), p, w, qty_p, cost_p).unwrap();

        let expected = round_cost((qty0 * avg0 + qty_p * cost_p) / (qty0 + qty_p));
        prop_assert_eq!(outcome.level.average_cost, expected);
        prop_assert_eq!(outcome.level.quantity, qty0 + qty_p);
    }

    /// Sales never change the average cost, only the quantity, and COGS is
    /// quantity × average.
    #[test]
    fn prop_sale_preserves_average(
        qty0 in quantity_strategy(),
        avg0 in cost_strategy(),
        sold in quantity_strategy(),
    ) {
        prop_assume!(sold <= qty0);
        let p = ProductId::new();
        let w = WarehouseId::new();
        let level = StockLevel {
            product_id: p,
            warehouse_id: w,
            quantity: qty0,
            average_cost: avg0,
            version: 1,
        };

        let outcome = CostingService::apply_sale(Some(level), p, sold).unwrap();
        prop_assert_eq!(outcome.level.average_cost, avg0);
        prop_assert_eq!(outcome.level.quantity, qty0 - sold);
        prop_assert_eq!(
            outcome.cogs,
            ledgerly_shared::types::money::round_currency(sold * avg0)
        );
    }

    /// An oversell is always rejected with the exact shortfall reported.
    #[test]
    fn prop_oversell_reports_shortfall(
        qty0 in quantity_strategy(),
        extra in quantity_strategy(),
    ) {
        let p = ProductId::new();
        let w = WarehouseId::new();
        let level = StockLevel {
            product_id: p,
            warehouse_id: w,
            quantity: qty0,
            average_cost: Decimal::ONE,
            version: 1,
        };

        let result = CostingService::apply_sale(Some(level), p, qty0 + extra);
        prop_assert!(
            matches!(
                result,
                Err(InventoryError::InsufficientStock { requested, available, .. })
                    if requested == qty0 + extra && available == qty0
            ),
            "expected InsufficientStock with requested/available shortfall, got {result:?}"
        );
    }
}
