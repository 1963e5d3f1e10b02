//! Reconciliation repository.

use chrono::{NaiveDate, Utc};
use ledgerly_core::ledger::error::LedgerError;
use ledgerly_core::reconciliation::error::ReconciliationError;
use ledgerly_core::reconciliation::service::ReconciliationService;
use ledgerly_core::reconciliation::types::Reconciliation;
use ledgerly_shared::types::{AccountId, ReconciliationId, ReconciliationItemId, TransactionId};
use ledgerly_shared::{AppError, AppResult};
use rust_decimal::Decimal;

use crate::store::MemoryStore;

/// Repository for bank reconciliations.
pub struct ReconciliationRepository;

impl ReconciliationRepository {
    /// Opens a reconciliation for an account against an external
    /// statement. The book balance is computed from the live ledger view,
    /// cut off at the statement date.
    ///
    /// # Errors
    ///
    /// Returns not-found for a missing or soft-deleted account.
    pub fn open(
        store: &MemoryStore,
        account_id: AccountId,
        statement_date: NaiveDate,
        statement_balance: Decimal,
    ) -> AppResult<Reconciliation> {
        let mut tables = store.write();
        if tables.live_account(account_id).is_none() {
            return Err(AppError::NotFound(format!(
                "account not found: {account_id}"
            )));
        }

        let lines = tables.live_lines();
        let reconciliation =
            ReconciliationService::open(account_id, statement_date, statement_balance, &lines);
        tables
            .reconciliations
            .insert(reconciliation.id, reconciliation.clone());

        tracing::info!(
            id = %reconciliation.id,
            account = %account_id,
            book = %reconciliation.book_balance,
            difference = %reconciliation.difference,
            "reconciliation opened"
        );
        Ok(reconciliation)
    }

    /// Appends a statement item. The first item moves the reconciliation
    /// to in-progress.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown reconciliation and a state error
    /// once it is completed.
    pub fn add_item(
        store: &MemoryStore,
        reconciliation_id: ReconciliationId,
        date: NaiveDate,
        description: &str,
        amount: Decimal,
    ) -> AppResult<ReconciliationItemId> {
        let mut tables = store.write();
        let reconciliation = tables
            .reconciliations
            .get_mut(&reconciliation_id)
            .ok_or(ReconciliationError::NotFound(reconciliation_id))?;
        let item_id = ReconciliationService::add_item(
            reconciliation,
            date,
            description.to_string(),
            amount,
        )?;
        Ok(item_id)
    }

    /// Matches a statement item against a posted transaction and flags
    /// the transaction as reconciled, pinning it against cancellation.
    /// Both writes commit under one guard.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown reconciliation, item, or
    /// transaction, and a state error for completed reconciliations or
    /// already-matched items.
    pub fn match_item(
        store: &MemoryStore,
        reconciliation_id: ReconciliationId,
        item_id: ReconciliationItemId,
        transaction_id: TransactionId,
    ) -> AppResult<()> {
        let mut tables = store.write();
        if !tables
            .transactions
            .get(&transaction_id)
            .is_some_and(crate::entities::Transaction::is_live)
        {
            return Err(LedgerError::TransactionNotFound(transaction_id).into());
        }

        let reconciliation = tables
            .reconciliations
            .get_mut(&reconciliation_id)
            .ok_or(ReconciliationError::NotFound(reconciliation_id))?;
        let matched = ReconciliationService::match_item(reconciliation, item_id, transaction_id)?;

        if let Some(transaction) = tables.transactions.get_mut(&matched) {
            transaction.reconciled = true;
        }

        tracing::info!(
            reconciliation = %reconciliation_id,
            item = %item_id,
            transaction = %transaction_id,
            "reconciliation item matched"
        );
        Ok(())
    }

    /// Completes the reconciliation. Terminal.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown reconciliation and a state error
    /// if it was already completed.
    pub fn complete(
        store: &MemoryStore,
        reconciliation_id: ReconciliationId,
    ) -> AppResult<Reconciliation> {
        let mut tables = store.write();
        let reconciliation = tables
            .reconciliations
            .get_mut(&reconciliation_id)
            .ok_or(ReconciliationError::NotFound(reconciliation_id))?;
        ReconciliationService::complete(reconciliation, Utc::now())?;

        tracing::info!(id = %reconciliation_id, "reconciliation completed");
        Ok(reconciliation.clone())
    }

    /// Deletes a reconciliation. Refused once completed.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown reconciliation and a state error
    /// for a completed one.
    pub fn delete(store: &MemoryStore, reconciliation_id: ReconciliationId) -> AppResult<()> {
        let mut tables = store.write();
        let reconciliation = tables
            .reconciliations
            .get(&reconciliation_id)
            .ok_or(ReconciliationError::NotFound(reconciliation_id))?;
        ReconciliationService::validate_can_delete(reconciliation)?;

        tables.reconciliations.remove(&reconciliation_id);
        tracing::info!(id = %reconciliation_id, "reconciliation deleted");
        Ok(())
    }

    /// Fetches a reconciliation.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id.
    pub fn get(
        store: &MemoryStore,
        reconciliation_id: ReconciliationId,
    ) -> AppResult<Reconciliation> {
        store
            .read()
            .reconciliations
            .get(&reconciliation_id)
            .cloned()
            .ok_or_else(|| AppError::from(ReconciliationError::NotFound(reconciliation_id)))
    }
}
