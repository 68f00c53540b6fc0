pub mod amortization;
#[cfg(test)]
mod props;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};

pub use amortization::{AmortizationCalculator, AmortizationSchedule, Installment};

/// terms of a loan as agreed at origination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub start_date: NaiveDate,
    pub installment_count: u32,
}

impl LoanTerms {
    /// create validated loan terms
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        start_date: NaiveDate,
        installment_count: u32,
    ) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            start_date,
            installment_count,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LedgerError::InvalidPrincipal {
                amount: self.principal,
            });
        }

        if self.annual_rate.is_negative() {
            return Err(LedgerError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }

        if self.installment_count == 0 {
            return Err(LedgerError::InvalidInstallmentCount {
                count: self.installment_count,
            });
        }

        Ok(())
    }

    /// interest rate applied per installment period
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[test]
    fn test_valid_terms() {
        let terms = LoanTerms::new(
            Money::from_major(1_000),
            Rate::from_percent(dec!(24)),
            start(),
            3,
        )
        .unwrap();

        assert_eq!(terms.monthly_rate().as_decimal(), dec!(0.02));
    }

    #[rstest]
    #[case(dec!(0), dec!(24), 3)]
    #[case(dec!(-100), dec!(24), 3)]
    #[case(dec!(1000), dec!(-1), 3)]
    #[case(dec!(1000), dec!(24), 0)]
    fn test_invalid_terms_rejected(
        #[case] principal: rust_decimal::Decimal,
        #[case] rate_percent: rust_decimal::Decimal,
        #[case] count: u32,
    ) {
        let err = LoanTerms::new(
            Money::from_decimal(principal),
            Rate::from_percent(rate_percent),
            start(),
            count,
        )
        .unwrap_err();

        assert!(err.is_validation());
    }

    #[test]
    fn test_zero_rate_is_valid() {
        assert!(LoanTerms::new(Money::from_major(1_200), Rate::ZERO, start(), 12).is_ok());
    }

    #[test]
    fn test_terms_deserialize_from_json() {
        let json = r#"{
            "principal": "1200.00",
            "annual_rate": "0.18",
            "start_date": "2025-03-15",
            "installment_count": 6
        }"#;

        let terms: LoanTerms = serde_json::from_str(json).unwrap();
        assert_eq!(terms.principal, Money::from_major(1_200));
        assert_eq!(terms.annual_rate.as_percentage(), dec!(18));
        assert_eq!(terms.start_date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert!(terms.validate().is_ok());
    }
}
