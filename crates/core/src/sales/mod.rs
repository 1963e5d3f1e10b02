//! Sale lifecycle and confirmation workflow.
//!
//! A sale is drafted, then either confirmed (posting revenue and COGS to the
//! ledger and issuing stock) or cancelled. Both outcomes are terminal. The
//! pure parts of the workflow live here: state transition rules, posting
//! account selection, and ledger line construction. The store executes the
//! full confirmation atomically.

pub mod error;
pub mod types;
pub mod workflow;

pub use error::SalesError;
pub use types::{PaymentType, ProductPostingAccounts, Sale, SaleItem, SaleStatus};
pub use workflow::SaleWorkflow;
