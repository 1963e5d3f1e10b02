//! Storage engine and operation facade for Ledgerly.
//!
//! This crate provides:
//! - An in-memory store with the transactional semantics a SQL backend
//!   would give: one commit lock for multi-table units of work, per-key
//!   serialization for stock mutations, and a single "live view" filter
//!   for soft-deleted rows
//! - Repository facades over the store, one per aggregate
//!
//! All business rules live in `ledgerly-core`; the repositories only wire
//! them to stored state and commit the results atomically.

pub mod entities;
pub mod repositories;
pub mod store;

pub use repositories::{
    AccountRepository, InventoryRepository, PartyRepository, ProductRepository,
    ReconciliationRepository, ReportRepository, SaleRepository, TransactionRepository,
    WarehouseRepository,
};
pub use store::MemoryStore;
