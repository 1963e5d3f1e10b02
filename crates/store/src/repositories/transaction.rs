//! Ledger transaction repository.

use chrono::Utc;
use ledgerly_core::ledger::LedgerService;
use ledgerly_core::ledger::error::LedgerError;
use ledgerly_core::ledger::types::{RecordTransactionInput, TransactionStatus};
use ledgerly_shared::types::{LineId, TransactionId};
use ledgerly_shared::{AppError, AppResult};

use crate::entities::{Transaction, TransactionLine};
use crate::store::MemoryStore;

/// Repository for ledger transactions.
pub struct TransactionRepository;

impl TransactionRepository {
    /// Records a transaction in Posted status.
    ///
    /// Validation (accounts, amounts, the double-entry invariant) runs in
    /// the core; the transaction and its lines are inserted under one
    /// write guard, so the posting is all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns the core validation error, including `ImbalancedEntry` when
    /// debits and credits do not match.
    pub fn record(store: &MemoryStore, input: RecordTransactionInput) -> AppResult<Transaction> {
        let mut tables = store.write();

        let (posted, totals) =
            LedgerService::validate_and_post(&input, |id| tables.account_info(id))?;

        let transaction = Transaction {
            id: TransactionId::new(),
            transaction_type: input.transaction_type,
            date: input.date,
            description: input.description,
            reference: input.reference,
            status: TransactionStatus::Posted,
            reconciled: false,
            deleted_at: None,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
            lines: posted
                .into_iter()
                .map(|line| TransactionLine {
                    id: LineId::new(),
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.memo,
                })
                .collect(),
        };
        tables.transactions.insert(transaction.id, transaction.clone());

        tracing::info!(
            id = %transaction.id,
            total = %totals.total_debit,
            lines = transaction.lines.len(),
            "transaction posted"
        );
        Ok(transaction)
    }

    /// Cancels a transaction: soft-deletes it, keeping the lines for audit
    /// while removing them from the live ledger view.
    ///
    /// # Errors
    ///
    /// Returns a state error when the transaction is reconciled or already
    /// cancelled, and not-found when it does not exist.
    pub fn cancel(store: &MemoryStore, id: TransactionId) -> AppResult<Transaction> {
        let mut tables = store.write();
        let transaction = tables
            .transactions
            .get_mut(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        LedgerService::validate_can_cancel(id, transaction.status, transaction.reconciled)?;

        transaction.status = TransactionStatus::Cancelled;
        transaction.deleted_at = Some(Utc::now());

        tracing::info!(%id, "transaction cancelled");
        Ok(transaction.clone())
    }

    /// Flags a transaction as reconciled, pinning it against cancellation.
    ///
    /// # Errors
    ///
    /// Returns not-found when the transaction does not exist or is not in
    /// the live view.
    pub fn mark_reconciled(store: &MemoryStore, id: TransactionId) -> AppResult<()> {
        let mut tables = store.write();
        let transaction = tables
            .transactions
            .get_mut(&id)
            .filter(|t| t.is_live())
            .ok_or(LedgerError::TransactionNotFound(id))?;
        transaction.reconciled = true;
        Ok(())
    }

    /// Fetches a transaction by id, cancelled ones included.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id.
    pub fn get(store: &MemoryStore, id: TransactionId) -> AppResult<Transaction> {
        store
            .read()
            .transactions
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::from(LedgerError::TransactionNotFound(id)))
    }
}
