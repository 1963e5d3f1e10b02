//! Repository facades over the store, one per aggregate.

pub mod account;
pub mod catalog;
pub mod inventory;
pub mod reconciliation;
pub mod report;
pub mod sale;
pub mod transaction;

pub use account::AccountRepository;
pub use catalog::{PartyRepository, ProductRepository, WarehouseRepository};
pub use inventory::InventoryRepository;
pub use reconciliation::ReconciliationRepository;
pub use report::ReportRepository;
pub use sale::SaleRepository;
pub use transaction::TransactionRepository;
