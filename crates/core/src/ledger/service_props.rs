//! Property-based tests for LedgerService.
//!
//! The double-entry invariant is the contract of the ledger core: every
//! accepted transaction balances, every imbalanced input is rejected.

use chrono::NaiveDate;
use ledgerly_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::service::{AccountInfo, LedgerService};
use super::types::{LineInput, RecordTransactionInput, TransactionType};

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn ok_account_lookup(id: AccountId) -> Result<AccountInfo, LedgerError> {
    Ok(AccountInfo {
        id,
        is_active: true,
        is_deleted: false,
    })
}

fn make_input(lines: Vec<LineInput>) -> RecordTransactionInput {
    RecordTransactionInput {
        transaction_type: TransactionType::Journal,
        date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        description: "property test".to_string(),
        reference: None,
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any set of amounts mirrored into matching debit/credit pairs is
    /// accepted, and its totals balance exactly.
    #[test]
    fn prop_mirrored_lines_always_balance(
        amounts in prop::collection::vec(positive_amount(), 1..10),
    ) {
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(LineInput::debit(AccountId::new(), *amount));
            lines.push(LineInput::credit(AccountId::new(), *amount));
        }
        let input = make_input(lines);

        let (posted, totals) =
            LedgerService::validate_and_post(&input, ok_account_lookup).unwrap();

        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);
        prop_assert_eq!(posted.len(), amounts.len() * 2);
    }

    /// A transaction with a surplus on one side is always rejected with
    /// ImbalancedEntry, never silently adjusted.
    #[test]
    fn prop_surplus_rejected(
        amount in positive_amount(),
        surplus in positive_amount(),
    ) {
        let input = make_input(vec![
            LineInput::debit(AccountId::new(), amount + surplus),
            LineInput::credit(AccountId::new(), amount),
        ]);

        let result = LedgerService::validate_and_post(&input, ok_account_lookup);
        prop_assert!(
            matches!(result, Err(LedgerError::ImbalancedEntry { .. })),
            "expected ImbalancedEntry error, got {result:?}"
        );
    }

    /// Every accepted line has exactly one non-zero side and both sides
    /// non-negative.
    #[test]
    fn prop_lines_have_one_side(
        amounts in prop::collection::vec(positive_amount(), 1..10),
    ) {
        let mut lines = Vec::new();
        for amount in &amounts {
            lines.push(LineInput::debit(AccountId::new(), *amount));
            lines.push(LineInput::credit(AccountId::new(), *amount));
        }
        let input = make_input(lines);

        let (posted, _) = LedgerService::validate_and_post(&input, ok_account_lookup).unwrap();
        for line in &posted {
            prop_assert!(line.debit >= Decimal::ZERO);
            prop_assert!(line.credit >= Decimal::ZERO);
            prop_assert!((line.debit > Decimal::ZERO) != (line.credit > Decimal::ZERO));
        }
    }
}
