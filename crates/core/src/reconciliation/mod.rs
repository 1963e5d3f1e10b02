//! Bank reconciliation engine.
//!
//! A reconciliation compares an external bank statement against the book
//! balance of one ledger account. It moves through a one-way lifecycle,
//! Pending → InProgress → Completed, and owns statement items that are
//! matched against posted transactions.

pub mod error;
pub mod service;
pub mod types;

pub use error::ReconciliationError;
pub use service::ReconciliationService;
pub use types::{ItemStatus, Reconciliation, ReconciliationItem, ReconciliationStatus};
