use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// outcome of nudging an amount to a payable cash value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundingResult {
    pub original_amount: Money,
    pub adjustment: Money,
    pub rounded_amount: Money,
}

impl RoundingResult {
    pub fn is_adjusted(&self) -> bool {
        !self.adjustment.is_zero()
    }
}

/// rounds amounts to what a drawer holding 0.05 and 0.10 coins can settle
///
/// Cent digits 0 and 5 are payable as-is. 1 through 4 go down to the tenth
/// below, 6 through 9 go up to the tenth above. Negative amounts mirror the
/// rule around zero, so `round(-x) == -round(x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrencyRounder;

impl CurrencyRounder {
    pub fn new() -> Self {
        Self
    }

    pub fn round(&self, amount: Money) -> RoundingResult {
        let cents = amount.minor_units();
        let last_digit = (cents.unsigned_abs() % 10) as i64;

        let step = match last_digit {
            0 | 5 => 0,
            1..=4 => -last_digit,
            _ => 10 - last_digit,
        };
        let adjustment = if cents < 0 {
            Money::from_minor(-step)
        } else {
            Money::from_minor(step)
        };

        RoundingResult {
            original_amount: amount,
            adjustment,
            rounded_amount: amount + adjustment,
        }
    }
}
