//! Inventory repository: stock levels and movements.
//!
//! Every mutation holds the (product, warehouse) key lock across the whole
//! check-then-act sequence, then commits level and movement under the
//! table write guard.

use chrono::NaiveDate;
use ledgerly_core::inventory::CostingService;
use ledgerly_core::inventory::types::{Availability, CostedMovement, InventoryMovement, StockLevel};
use ledgerly_shared::types::{MovementId, ProductId, TransactionId, WarehouseId};
use ledgerly_shared::{AppError, AppResult};
use rust_decimal::Decimal;

use crate::store::{MemoryStore, lock_all};

/// Repository for stock levels and inventory movements.
pub struct InventoryRepository;

impl InventoryRepository {
    /// Read-only availability check for one (product, warehouse) pair.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown product.
    pub fn check_availability(
        store: &MemoryStore,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
    ) -> AppResult<Availability> {
        let tables = store.read();
        require_product(&tables, product_id)?;
        let level = tables.stock_levels.get(&(product_id, warehouse_id));
        Ok(CostingService::check_availability(level, quantity))
    }

    /// Receives `quantity` units at `unit_cost`, folding the cost into the
    /// weighted average.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown product or warehouse and the core
    /// validation errors for bad quantities or costs.
    pub fn apply_purchase(
        store: &MemoryStore,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
        unit_cost: Decimal,
        date: NaiveDate,
        transaction_id: Option<TransactionId>,
    ) -> AppResult<InventoryMovement> {
        let locks = store.stock_locks_for([(product_id, warehouse_id)]);
        let _guards = lock_all(&locks);

        let mut tables = store.write();
        require_product(&tables, product_id)?;
        require_warehouse(&tables, warehouse_id)?;

        let key = (product_id, warehouse_id);
        let level = tables.stock_levels.get(&key).cloned();
        let costed =
            CostingService::apply_purchase(level, product_id, warehouse_id, quantity, unit_cost)?;

        let movement = commit(&mut tables, key, costed, date, transaction_id, None);
        tracing::info!(
            product = %product_id,
            warehouse = %warehouse_id,
            %quantity,
            cost = %unit_cost,
            "purchase received"
        );
        Ok(movement)
    }

    /// Issues `quantity` units at the current average cost.
    ///
    /// Returns the movement together with the COGS amount for the caller
    /// to post.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientStock` with the shortfall when `quantity`
    /// exceeds what is on hand.
    pub fn apply_sale(
        store: &MemoryStore,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: Decimal,
        date: NaiveDate,
        transaction_id: Option<TransactionId>,
    ) -> AppResult<(InventoryMovement, Decimal)> {
        let locks = store.stock_locks_for([(product_id, warehouse_id)]);
        let _guards = lock_all(&locks);

        let mut tables = store.write();
        require_product(&tables, product_id)?;

        let key = (product_id, warehouse_id);
        let level = tables.stock_levels.get(&key).cloned();
        let costed = CostingService::apply_sale(level, product_id, quantity)?;
        let cogs = costed.cogs;

        let movement = commit(&mut tables, key, costed, date, transaction_id, None);
        tracing::info!(
            product = %product_id,
            warehouse = %warehouse_id,
            %quantity,
            %cogs,
            "stock issued"
        );
        Ok((movement, cogs))
    }

    /// Applies a manual correction of `delta` units, valued at the current
    /// average cost (or the product's cost price into empty stock).
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero delta and `InsufficientStock`
    /// when the delta would drive the quantity negative.
    pub fn apply_adjustment(
        store: &MemoryStore,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        delta: Decimal,
        reason: &str,
        date: NaiveDate,
    ) -> AppResult<InventoryMovement> {
        let locks = store.stock_locks_for([(product_id, warehouse_id)]);
        let _guards = lock_all(&locks);

        let mut tables = store.write();
        let fallback_cost = tables
            .products
            .get(&product_id)
            .ok_or_else(|| AppError::NotFound(format!("product not found: {product_id}")))?
            .cost_price;
        require_warehouse(&tables, warehouse_id)?;

        let key = (product_id, warehouse_id);
        let level = tables.stock_levels.get(&key).cloned();
        let costed = CostingService::apply_adjustment(
            level,
            product_id,
            warehouse_id,
            delta,
            fallback_cost,
        )?;

        let movement = commit(&mut tables, key, costed, date, None, Some(reason.to_string()));
        tracing::info!(
            product = %product_id,
            warehouse = %warehouse_id,
            %delta,
            reason,
            "stock adjusted"
        );
        Ok(movement)
    }

    /// The current stock level for a pair, if any stock has ever moved.
    pub fn stock_level(
        store: &MemoryStore,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Option<StockLevel> {
        store
            .read()
            .stock_levels
            .get(&(product_id, warehouse_id))
            .cloned()
    }

    /// All movements recorded for a product, in insertion order.
    pub fn movements_for(store: &MemoryStore, product_id: ProductId) -> Vec<InventoryMovement> {
        store
            .read()
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect()
    }
}

fn commit(
    tables: &mut crate::store::Tables,
    key: (ProductId, WarehouseId),
    costed: CostedMovement,
    date: NaiveDate,
    transaction_id: Option<TransactionId>,
    reason: Option<String>,
) -> InventoryMovement {
    let movement = InventoryMovement {
        id: MovementId::new(),
        product_id: key.0,
        warehouse_id: key.1,
        transaction_id,
        movement_type: costed.movement_type,
        quantity: costed.quantity,
        unit_cost: costed.unit_cost,
        date,
        reason,
    };
    tables.stock_levels.insert(key, costed.level);
    tables.movements.push(movement.clone());
    movement
}

fn require_product(tables: &crate::store::Tables, id: ProductId) -> AppResult<()> {
    if !tables.products.contains_key(&id) {
        return Err(AppError::NotFound(format!("product not found: {id}")));
    }
    Ok(())
}

fn require_warehouse(tables: &crate::store::Tables, id: WarehouseId) -> AppResult<()> {
    if !tables.warehouses.contains_key(&id) {
        return Err(AppError::NotFound(format!("warehouse not found: {id}")));
    }
    Ok(())
}
