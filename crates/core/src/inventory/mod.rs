//! Stock levels and weighted-average inventory costing.
//!
//! This module implements the inventory costing engine:
//! - Stock level tracking per (product, warehouse)
//! - Weighted-average cost recomputation on purchase
//! - COGS valuation on sale (at current average cost)
//! - Stock adjustments
//! - Availability checks
//!
//! All transitions are pure: they take the current stock level and return
//! the next one plus the movement to record. Persistence and per-key
//! serialization are the store's concern.

pub mod costing;
pub mod error;
pub mod types;

#[cfg(test)]
mod costing_props;

pub use costing::CostingService;
pub use error::InventoryError;
pub use types::{
    Availability, CostedMovement, InventoryMovement, MovementType, StockLevel,
};
