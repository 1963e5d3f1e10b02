//! Core business logic for Ledgerly.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here. Services are parameterized by lookup closures so they can be
//! exercised without any storage backend.
//!
//! # Modules
//!
//! - `ledger` - Double-entry bookkeeping logic
//! - `inventory` - Stock levels and weighted-average costing
//! - `sales` - Sale lifecycle and confirmation workflow
//! - `reports` - Trial balance, balance sheet, income statement, statements
//! - `reconciliation` - Bank statement reconciliation

pub mod inventory;
pub mod ledger;
pub mod reconciliation;
pub mod reports;
pub mod sales;
