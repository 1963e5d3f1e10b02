//! Reconciliation lifecycle logic.
//!
//! Pure state-machine transitions over [`Reconciliation`] values. The store
//! supplies the ledger lines when opening and persists the results.

use chrono::{DateTime, NaiveDate, Utc};
use ledgerly_shared::types::{AccountId, ReconciliationId, ReconciliationItemId, TransactionId};
use rust_decimal::Decimal;

use crate::reports::types::LedgerLine;

use super::error::ReconciliationError;
use super::types::{ItemStatus, Reconciliation, ReconciliationItem, ReconciliationStatus};

/// Service for the bank reconciliation state machine.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Opens a reconciliation for `account_id` against an external
    /// statement.
    ///
    /// Book balance is the raw `Σ(debit − credit)` over the account's
    /// lines dated on or before the statement date; lines after the cutoff
    /// never leak into the statement period. The caller passes only live
    /// posted lines.
    #[must_use]
    pub fn open(
        account_id: AccountId,
        statement_date: NaiveDate,
        statement_balance: Decimal,
        lines: &[LedgerLine],
    ) -> Reconciliation {
        let book_balance: Decimal = lines
            .iter()
            .filter(|l| l.account_id == account_id && l.date <= statement_date)
            .map(|l| l.debit - l.credit)
            .sum();

        Reconciliation {
            id: ReconciliationId::new(),
            account_id,
            statement_date,
            statement_balance,
            book_balance,
            difference: statement_balance - book_balance,
            status: ReconciliationStatus::Pending,
            completed_at: None,
            items: Vec::new(),
        }
    }

    /// Appends a statement item.
    ///
    /// The first item advances the reconciliation from Pending to
    /// InProgress.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` when the reconciliation is completed.
    pub fn add_item(
        reconciliation: &mut Reconciliation,
        date: NaiveDate,
        description: String,
        amount: Decimal,
    ) -> Result<ReconciliationItemId, ReconciliationError> {
        Self::ensure_open(reconciliation)?;

        let item = ReconciliationItem {
            id: ReconciliationItemId::new(),
            date,
            description,
            amount,
            status: ItemStatus::Pending,
            transaction_id: None,
        };
        let id = item.id;
        reconciliation.items.push(item);

        if reconciliation.status == ReconciliationStatus::Pending {
            reconciliation.status = ReconciliationStatus::InProgress;
        }
        Ok(id)
    }

    /// Matches a statement item against a ledger transaction.
    ///
    /// Returns the transaction id so the caller can flag the transaction
    /// as reconciled.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted`, `ItemNotFound`, or `ItemAlreadyMatched`.
    pub fn match_item(
        reconciliation: &mut Reconciliation,
        item_id: ReconciliationItemId,
        transaction_id: TransactionId,
    ) -> Result<TransactionId, ReconciliationError> {
        Self::ensure_open(reconciliation)?;

        let item = reconciliation
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(ReconciliationError::ItemNotFound(item_id))?;
        if item.status == ItemStatus::Matched {
            return Err(ReconciliationError::ItemAlreadyMatched(item_id));
        }

        item.status = ItemStatus::Matched;
        item.transaction_id = Some(transaction_id);
        Ok(transaction_id)
    }

    /// Completes the reconciliation. Terminal.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCompleted` if completed before.
    pub fn complete(
        reconciliation: &mut Reconciliation,
        now: DateTime<Utc>,
    ) -> Result<(), ReconciliationError> {
        Self::ensure_open(reconciliation)?;
        reconciliation.status = ReconciliationStatus::Completed;
        reconciliation.completed_at = Some(now);
        Ok(())
    }

    /// Checks that the reconciliation may be deleted.
    ///
    /// # Errors
    ///
    /// Returns `CannotDeleteCompleted` once the reconciliation is
    /// completed.
    pub fn validate_can_delete(
        reconciliation: &Reconciliation,
    ) -> Result<(), ReconciliationError> {
        if reconciliation.status == ReconciliationStatus::Completed {
            return Err(ReconciliationError::CannotDeleteCompleted(reconciliation.id));
        }
        Ok(())
    }

    fn ensure_open(reconciliation: &Reconciliation) -> Result<(), ReconciliationError> {
        if reconciliation.status == ReconciliationStatus::Completed {
            return Err(ReconciliationError::AlreadyCompleted(reconciliation.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ledgerly_shared::types::TransactionId;
    use rust_decimal_macros::dec;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, d).unwrap()
    }

    fn line(account_id: AccountId, d: u32, debit: Decimal, credit: Decimal) -> LedgerLine {
        LedgerLine {
            transaction_id: TransactionId::new(),
            date: day(d),
            description: "test".to_string(),
            account_id,
            debit,
            credit,
        }
    }

    #[test]
    fn test_open_computes_book_balance_with_cutoff() {
        let bank = AccountId::new();
        let other = AccountId::new();
        let lines = vec![
            line(bank, 1, dec!(500), dec!(0)),
            line(bank, 10, dec!(0), dec!(200)),
            // After the statement date: must not count.
            line(bank, 20, dec!(999), dec!(0)),
            // Different account: must not count.
            line(other, 5, dec!(50), dec!(0)),
        ];

        let rec = ReconciliationService::open(bank, day(15), dec!(310), &lines);

        assert_eq!(rec.book_balance, dec!(300));
        assert_eq!(rec.difference, dec!(10));
        assert_eq!(rec.status, ReconciliationStatus::Pending);
        assert!(rec.items.is_empty());
        assert!(rec.completed_at.is_none());
    }

    #[test]
    fn test_open_with_no_lines_books_zero() {
        let rec = ReconciliationService::open(AccountId::new(), day(15), dec!(100), &[]);
        assert_eq!(rec.book_balance, dec!(0));
        assert_eq!(rec.difference, dec!(100));
    }

    #[test]
    fn test_first_item_advances_to_in_progress() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);

        ReconciliationService::add_item(&mut rec, day(3), "Deposit".to_string(), dec!(100))
            .unwrap();
        assert_eq!(rec.status, ReconciliationStatus::InProgress);
        assert_eq!(rec.items.len(), 1);
        assert_eq!(rec.items[0].status, ItemStatus::Pending);

        // Further items keep the status.
        ReconciliationService::add_item(&mut rec, day(4), "Fee".to_string(), dec!(-5)).unwrap();
        assert_eq!(rec.status, ReconciliationStatus::InProgress);
    }

    #[test]
    fn test_match_item_records_transaction() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);
        let item_id =
            ReconciliationService::add_item(&mut rec, day(3), "Deposit".to_string(), dec!(100))
                .unwrap();

        let tx_id = TransactionId::new();
        let matched = ReconciliationService::match_item(&mut rec, item_id, tx_id).unwrap();

        assert_eq!(matched, tx_id);
        assert_eq!(rec.items[0].status, ItemStatus::Matched);
        assert_eq!(rec.items[0].transaction_id, Some(tx_id));
    }

    #[test]
    fn test_match_item_twice_fails() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);
        let item_id =
            ReconciliationService::add_item(&mut rec, day(3), "Deposit".to_string(), dec!(100))
                .unwrap();
        ReconciliationService::match_item(&mut rec, item_id, TransactionId::new()).unwrap();

        let err = ReconciliationService::match_item(&mut rec, item_id, TransactionId::new())
            .unwrap_err();
        assert_eq!(err, ReconciliationError::ItemAlreadyMatched(item_id));
    }

    #[test]
    fn test_match_unknown_item_fails() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);
        let missing = ReconciliationItemId::new();
        let err = ReconciliationService::match_item(&mut rec, missing, TransactionId::new())
            .unwrap_err();
        assert_eq!(err, ReconciliationError::ItemNotFound(missing));
    }

    #[test]
    fn test_complete_is_terminal() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);
        ReconciliationService::complete(&mut rec, Utc::now()).unwrap();

        assert_eq!(rec.status, ReconciliationStatus::Completed);
        assert!(rec.completed_at.is_some());

        let err = ReconciliationService::add_item(
            &mut rec,
            day(3),
            "Late".to_string(),
            dec!(10),
        )
        .unwrap_err();
        assert_eq!(err, ReconciliationError::AlreadyCompleted(rec.id));

        let err = ReconciliationService::complete(&mut rec, Utc::now()).unwrap_err();
        assert_eq!(err, ReconciliationError::AlreadyCompleted(rec.id));
    }

    #[test]
    fn test_delete_refused_once_completed() {
        let mut rec = ReconciliationService::open(AccountId::new(), day(15), dec!(0), &[]);
        assert!(ReconciliationService::validate_can_delete(&rec).is_ok());

        ReconciliationService::complete(&mut rec, Utc::now()).unwrap();
        let err = ReconciliationService::validate_can_delete(&rec).unwrap_err();
        assert_eq!(err, ReconciliationError::CannotDeleteCompleted(rec.id));
    }
}
