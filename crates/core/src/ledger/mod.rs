//! Double-entry bookkeeping logic.
//!
//! This module implements the core ledger functionality:
//! - Account types and the normal-balance classifier
//! - Domain types for transaction creation
//! - Error types for ledger operations
//! - Ledger service for transaction validation and posting rules

pub mod balance;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use balance::{AccountBalance, NormalBalance};
pub use error::LedgerError;
pub use service::{AccountInfo, LedgerService};
pub use types::{
    AccountType, EntryType, LineInput, PostedLine, RecordTransactionInput, TransactionStatus,
    TransactionTotals, TransactionType,
};
