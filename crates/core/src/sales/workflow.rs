//! Sale confirmation workflow rules.
//!
//! The confirmation itself is executed by the store inside one atomic unit
//! of work; this module holds the pure pieces: transition guards, posting
//! account selection, and ledger line construction.

use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;

use crate::ledger::types::LineInput;

use super::error::SalesError;
use super::types::{PaymentType, ProductPostingAccounts, Sale};

/// Pure rules of the sale lifecycle.
pub struct SaleWorkflow;

impl SaleWorkflow {
    /// Validates that a sale can be confirmed: it must be a draft with at
    /// least one line item.
    ///
    /// # Errors
    ///
    /// Returns `NotDraft` or `NoItems`.
    pub fn validate_confirmable(sale: &Sale) -> Result<(), SalesError> {
        if !sale.status.can_confirm() {
            return Err(SalesError::NotDraft {
                sale_id: sale.id,
                status: sale.status,
            });
        }
        if sale.items.is_empty() {
            return Err(SalesError::NoItems(sale.id));
        }
        Ok(())
    }

    /// Validates that a sale can be cancelled (draft only).
    ///
    /// # Errors
    ///
    /// Returns `CannotCancel` for confirmed or already-cancelled sales.
    pub fn validate_cancellable(sale: &Sale) -> Result<(), SalesError> {
        if !sale.status.can_cancel() {
            return Err(SalesError::CannotCancel {
                sale_id: sale.id,
                status: sale.status,
            });
        }
        Ok(())
    }

    /// Selects the account to debit for the sale total: the cash account
    /// for cash sales, accounts receivable otherwise.
    ///
    /// # Errors
    ///
    /// Returns `MissingPostingAccount` naming the unresolved account.
    pub fn select_debit_account(
        payment_type: PaymentType,
        cash_account: Option<AccountId>,
        receivable_account: Option<AccountId>,
    ) -> Result<AccountId, SalesError> {
        match payment_type {
            PaymentType::Cash => {
                cash_account.ok_or(SalesError::MissingPostingAccount("cash account"))
            }
            PaymentType::Credit => receivable_account
                .ok_or(SalesError::MissingPostingAccount("accounts receivable account")),
        }
    }

    /// Builds the revenue pair: debit the selected account, credit revenue,
    /// both at the sale total.
    #[must_use]
    pub fn revenue_lines(
        total: Decimal,
        debit_account: AccountId,
        revenue_account: AccountId,
    ) -> [LineInput; 2] {
        [
            LineInput::debit(debit_account, total),
            LineInput::credit(revenue_account, total),
        ]
    }

    /// Builds the COGS pair for one item: debit the product's COGS account,
    /// credit its inventory account, both at the COGS amount.
    #[must_use]
    pub fn cogs_lines(cogs: Decimal, accounts: ProductPostingAccounts) -> [LineInput; 2] {
        [
            LineInput::debit(accounts.cogs_account_id, cogs),
            LineInput::credit(accounts.inventory_account_id, cogs),
        ]
    }
}
