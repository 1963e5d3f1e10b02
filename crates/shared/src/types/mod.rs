//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{report_tolerance, round_cost, round_currency, within_tolerance};
