//! Money rounding policy and report tolerance.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`. Posted currency amounts are kept
//! at 2 decimal places and unit costs at 4, both with Banker's Rounding so
//! repeated roundings do not drift in one direction.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for posted currency amounts.
pub const CURRENCY_SCALE: u32 = 2;

/// Decimal places for unit costs (average cost carries extra precision so
/// COGS valuation does not lose cents across many small movements).
pub const COST_SCALE: u32 = 4;

/// Rounds a currency amount to [`CURRENCY_SCALE`] using Banker's Rounding.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// Rounds a unit cost to [`COST_SCALE`] using Banker's Rounding.
#[must_use]
pub fn round_cost(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(COST_SCALE, RoundingStrategy::MidpointNearestEven)
}

/// The tolerance used for balance-equality checks in reports.
///
/// Two totals are considered equal when they differ by less than 0.01,
/// absorbing rounding residue from per-line rounding.
#[must_use]
pub fn report_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Returns true if `a` and `b` are equal within [`report_tolerance`].
#[must_use]
pub fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    (a - b).abs() < report_tolerance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(10.005), dec!(10.00))] // midpoint rounds to even
    #[case(dec!(10.015), dec!(10.02))]
    #[case(dec!(10.014), dec!(10.01))]
    #[case(dec!(-10.005), dec!(-10.00))]
    fn test_round_currency_bankers(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_currency(input), expected);
    }

    #[rstest]
    #[case(dec!(5.00005), dec!(5.0000))]
    #[case(dec!(5.00015), dec!(5.0002))]
    #[case(dec!(6.123456), dec!(6.1235))]
    fn test_round_cost_bankers(#[case] input: Decimal, #[case] expected: Decimal) {
        assert_eq!(round_cost(input), expected);
    }

    #[test]
    fn test_within_tolerance() {
        assert!(within_tolerance(dec!(100.00), dec!(100.00)));
        assert!(within_tolerance(dec!(100.005), dec!(100.00)));
        assert!(!within_tolerance(dec!(100.01), dec!(100.00)));
        assert!(!within_tolerance(dec!(100.02), dec!(100.00)));
    }

    #[test]
    fn test_tolerance_is_one_cent() {
        assert_eq!(report_tolerance(), dec!(0.01));
    }
}
