//! Account balance calculations.
//!
//! The normal-balance classifier is the single implementation of the
//! debit/credit sign convention. Reports, statements and reconciliation all
//! call into it so the sign rules cannot drift between consumers.

use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Normal balance direction of an account type.
///
/// - Asset/Expense: balance += debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance += credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    Credit,
}

impl NormalBalance {
    /// Calculates the signed contribution of a (debit, credit) pair to the
    /// account's balance.
    #[must_use]
    pub fn signed_balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Raw debit/credit accumulator for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// The account ID.
    pub account_id: AccountId,
    /// Total debit amount.
    pub total_debit: Decimal,
    /// Total credit amount.
    pub total_credit: Decimal,
}

impl AccountBalance {
    /// Creates a new, empty account balance.
    #[must_use]
    pub fn new(account_id: AccountId) -> Self {
        Self {
            account_id,
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
        }
    }

    /// Adds a debit amount.
    pub fn add_debit(&mut self, amount: Decimal) {
        self.total_debit += amount;
    }

    /// Adds a credit amount.
    pub fn add_credit(&mut self, amount: Decimal) {
        self.total_credit += amount;
    }

    /// Returns the classified (signed) balance for the given direction.
    #[must_use]
    pub fn signed(&self, normal: NormalBalance) -> Decimal {
        normal.signed_balance(self.total_debit, self.total_credit)
    }
}
