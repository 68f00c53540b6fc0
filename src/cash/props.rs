//! Property-based tests for cash rounding and ledger aggregation.

use chrono::{TimeZone, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use proptest::prelude::*;

use super::{CashRegisterLedger, CurrencyRounder};
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::types::PaymentMethod;

/// signed amounts between -100,000.00 and 100,000.00
fn any_amount() -> impl Strategy<Value = Money> {
    (-10_000_000i64..=10_000_000i64).prop_map(Money::from_minor)
}

/// positive payments between 0.01 and 5,000.00
fn payment() -> impl Strategy<Value = (Money, PaymentMethod)> {
    (
        (1i64..=500_000i64).prop_map(Money::from_minor),
        prop_oneof![Just(PaymentMethod::Cash), Just(PaymentMethod::Digital)],
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// a rounded amount needs no further adjustment
    #[test]
    fn prop_rounding_is_idempotent(amount in any_amount()) {
        let rounder = CurrencyRounder::new();
        let once = rounder.round(amount);
        let twice = rounder.round(once.rounded_amount);

        prop_assert_eq!(twice.adjustment, Money::ZERO);
        prop_assert_eq!(twice.rounded_amount, once.rounded_amount);
    }

    /// adjustments are whole cents no larger than 0.05 and land on a 0.05 multiple
    #[test]
    fn prop_rounding_bounds(amount in any_amount()) {
        let result = CurrencyRounder::new().round(amount);

        prop_assert!(result.adjustment.abs() <= Money::from_minor(5));
        prop_assert_eq!(result.rounded_amount, amount + result.adjustment);
        prop_assert_eq!(result.rounded_amount.minor_units() % 5, 0);
    }

    /// negative amounts mirror positive ones
    #[test]
    fn prop_rounding_is_symmetric(amount in any_amount()) {
        let rounder = CurrencyRounder::new();
        let positive = rounder.round(amount);
        let negative = rounder.round(-amount);

        prop_assert_eq!(negative.adjustment, -positive.adjustment);
        prop_assert_eq!(negative.rounded_amount, -positive.rounded_amount);
    }

    /// the theoretical total is the opening balance plus settled cash
    #[test]
    fn prop_summary_matches_log(
        opening in (0i64..=100_000i64).prop_map(Money::from_minor),
        payments in prop::collection::vec(payment(), 0..40),
    ) {
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).unwrap(),
        ));
        let mut ledger = CashRegisterLedger::new(LedgerConfig::default());
        ledger.open(opening, "op1", &time).unwrap();

        let mut expected_cash = Money::ZERO;
        let mut expected_digital = Money::ZERO;
        for (amount, method) in &payments {
            let tx = ledger.record_payment(*amount, *method, "client", &time).unwrap();
            prop_assert_eq!(tx.settled_amount, tx.nominal_amount + tx.rounding_adjustment);
            match method {
                PaymentMethod::Cash => expected_cash += tx.settled_amount,
                PaymentMethod::Digital => {
                    prop_assert_eq!(tx.rounding_adjustment, Money::ZERO);
                    expected_digital += tx.settled_amount;
                }
            }
        }

        let summary = ledger.summary();
        prop_assert_eq!(summary.cash_entries, expected_cash);
        prop_assert_eq!(summary.digital_entries, expected_digital);
        prop_assert_eq!(summary.theoretical_total, opening + expected_cash);
        prop_assert_eq!(summary.payment_count, payments.len());

        let result = ledger.close(summary.theoretical_total, &time).unwrap();
        prop_assert!(result.is_balanced);
        prop_assert_eq!(result.difference, Money::ZERO);
    }
}
