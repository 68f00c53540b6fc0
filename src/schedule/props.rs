//! Property-based tests for amortization schedules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{AmortizationCalculator, LoanTerms};
use crate::decimal::{Money, Rate};

/// principal between 10,000.00 and 100,000.00, large enough that no
/// installment rounds to zero or below
fn principal() -> impl Strategy<Value = Money> {
    (1_000_000i64..10_000_000i64).prop_map(Money::from_minor)
}

/// annual rate between 0.00% and 60.00%
fn annual_rate() -> impl Strategy<Value = Rate> {
    (0i64..=6_000i64).prop_map(|bp| Rate::from_percent(Decimal::new(bp, 2)))
}

fn start_date() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// the schedule always has one row per installment and closes at zero
    #[test]
    fn prop_schedule_closes_exactly(
        principal in principal(),
        rate in annual_rate(),
        start in start_date(),
        count in 1u32..=120,
    ) {
        let terms = LoanTerms::new(principal, rate, start, count).unwrap();
        let installments = AmortizationCalculator::new().compute_schedule(&terms).unwrap();

        prop_assert_eq!(installments.len(), count as usize);
        prop_assert_eq!(installments.last().unwrap().remaining_balance, Money::ZERO);
        prop_assert!(installments.iter().all(|i| i.amount.is_positive()));

        // replaying the principal reductions lands on zero
        let mut balance = principal;
        for installment in &installments {
            balance -= installment.principal_portion;
        }
        prop_assert_eq!(balance, Money::ZERO);
    }

    /// every installment but the last pays the same rounded amount
    #[test]
    fn prop_installments_are_level(
        principal in principal(),
        rate in annual_rate(),
        start in start_date(),
        count in 2u32..=60,
    ) {
        let terms = LoanTerms::new(principal, rate, start, count).unwrap();
        let calculator = AmortizationCalculator::new();
        let base = calculator.base_payment(&terms).unwrap();
        let installments = calculator.compute_schedule(&terms).unwrap();

        for installment in &installments[..installments.len() - 1] {
            prop_assert_eq!(installment.amount, base);
            prop_assert_eq!(
                installment.amount,
                installment.interest_portion + installment.principal_portion
            );
        }

        // due dates strictly increase month over month
        for pair in installments.windows(2) {
            prop_assert!(pair[0].due_date < pair[1].due_date);
        }
    }
}
