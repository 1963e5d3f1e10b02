//! Ledger service for transaction validation.
//!
//! This module provides the core business logic for validating financial
//! transactions before they are persisted. The double-entry invariant
//! (total debits == total credits) is enforced here unconditionally; no
//! posting path may bypass it.

use ledgerly_shared::types::AccountId;
use ledgerly_shared::types::money::round_currency;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{
    EntryType, PostedLine, RecordTransactionInput, TransactionStatus, TransactionTotals,
};

/// Information about an account needed for validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether the account has been soft-deleted.
    pub is_deleted: bool,
}

/// Ledger service for transaction validation.
///
/// Contains pure business logic with no storage dependencies. Account
/// existence is checked through a caller-supplied lookup closure.
pub struct LedgerService;

impl LedgerService {
    /// Validates a transaction and resolves its lines for posting.
    ///
    /// Performs all validation steps:
    /// 1. Requires at least 2 lines
    /// 2. Validates each line's amount (positive, non-zero) and rounds it
    ///    to the currency scale
    /// 3. Validates every referenced account (exists, active, not deleted)
    /// 4. Validates the balance invariant (debits == credits)
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ImbalancedEntry` when the lines do not balance,
    /// or the first validation error encountered.
    pub fn validate_and_post<A>(
        input: &RecordTransactionInput,
        account_lookup: A,
    ) -> Result<(Vec<PostedLine>, TransactionTotals), LedgerError>
    where
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        if input.lines.len() < 2 {
            return Err(LedgerError::InsufficientLines);
        }

        let mut posted = Vec::with_capacity(input.lines.len());

        for line in &input.lines {
            if line.amount == Decimal::ZERO {
                return Err(LedgerError::ZeroAmount);
            }
            if line.amount < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount);
            }

            let account = account_lookup(line.account_id)?;
            if account.is_deleted {
                return Err(LedgerError::AccountDeleted(line.account_id));
            }
            if !account.is_active {
                return Err(LedgerError::AccountInactive(line.account_id));
            }

            let amount = round_currency(line.amount);
            let (debit, credit) = match line.entry_type {
                EntryType::Debit => (amount, Decimal::ZERO),
                EntryType::Credit => (Decimal::ZERO, amount),
            };

            posted.push(PostedLine {
                account_id: line.account_id,
                debit,
                credit,
                memo: line.memo.clone(),
            });
        }

        let totals = Self::calculate_totals(&posted);
        if !totals.is_balanced {
            return Err(LedgerError::ImbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok((posted, totals))
    }

    /// Calculates transaction totals from posted lines.
    #[must_use]
    pub fn calculate_totals(lines: &[PostedLine]) -> TransactionTotals {
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();

        TransactionTotals::new(total_debit, total_credit)
    }

    /// Validates that a transaction can be cancelled.
    ///
    /// A reconciled transaction is pinned by its bank statement and cannot
    /// be cancelled; a cancelled transaction cannot be cancelled twice.
    ///
    /// # Errors
    ///
    /// Returns a state error if the transaction is reconciled or already
    /// cancelled.
    pub fn validate_can_cancel(
        id: ledgerly_shared::types::TransactionId,
        status: TransactionStatus,
        reconciled: bool,
    ) -> Result<(), LedgerError> {
        if reconciled {
            return Err(LedgerError::AlreadyReconciled(id));
        }
        if status.is_cancelled() {
            return Err(LedgerError::AlreadyCancelled(id));
        }
        Ok(())
    }
}
