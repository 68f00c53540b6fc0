use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::schedule::LoanTerms;

/// one row of a repayment schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installment {
    pub installment_number: u32,
    pub due_date: NaiveDate,
    pub amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub remaining_balance: Money,
}

/// full repayment schedule for a loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub terms: LoanTerms,
    pub base_payment: Money,
    pub installments: Vec<Installment>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(terms: LoanTerms) -> Result<Self> {
        let calculator = AmortizationCalculator::new();
        let base_payment = calculator.base_payment(&terms)?;
        let installments = calculator.compute_schedule(&terms)?;

        let total_interest = installments.iter().map(|i| i.interest_portion).sum();
        let total_payment = installments.iter().map(|i| i.amount).sum();

        tracing::info!(
            principal = %terms.principal,
            rate = %terms.annual_rate,
            installments = terms.installment_count,
            %base_payment,
            %total_interest,
            "amortization schedule generated"
        );

        Ok(Self {
            terms,
            base_payment,
            installments,
            total_interest,
            total_payment,
        })
    }

    /// get installment by its 1-based number
    pub fn installment(&self, installment_number: u32) -> Option<&Installment> {
        let index = installment_number.checked_sub(1)?;
        self.installments.get(index as usize)
    }

    pub fn final_balance(&self) -> Money {
        self.installments
            .last()
            .map(|i| i.remaining_balance)
            .unwrap_or(self.terms.principal)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// equal-installment (french) amortization
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// installment amount paid every period except the last
    pub fn base_payment(&self, terms: &LoanTerms) -> Result<Money> {
        terms.validate()?;

        let monthly_rate = terms.monthly_rate().as_decimal();
        let n = terms.installment_count;

        if monthly_rate.is_zero() {
            return positive_payment(terms, terms.principal / Decimal::from(n));
        }

        // P * r * (1 + r)^n / ((1 + r)^n - 1)
        let base = Decimal::ONE + monthly_rate;
        let mut compound = Decimal::ONE;
        for _ in 0..n {
            compound = compound
                .checked_mul(base)
                .ok_or_else(|| overflow("compounding factor"))?;
        }

        let numerator = terms
            .principal
            .as_decimal()
            .checked_mul(monthly_rate)
            .and_then(|x| x.checked_mul(compound))
            .ok_or_else(|| overflow("annuity numerator"))?;
        let denominator = compound - Decimal::ONE;
        let payment = numerator
            .checked_div(denominator)
            .ok_or_else(|| overflow("annuity division"))?;

        positive_payment(terms, Money::from_decimal(payment))
    }

    /// calculate full amortization schedule
    ///
    /// Interest and the running balance stay at full precision; only the
    /// emitted rows are in cents. The last installment pays off whatever is
    /// left, so the remaining balance after it is exactly zero.
    pub fn compute_schedule(&self, terms: &LoanTerms) -> Result<Vec<Installment>> {
        let base_payment = self.base_payment(terms)?;
        let monthly_rate = terms.monthly_rate().as_decimal();
        let n = terms.installment_count;

        let mut installments = Vec::with_capacity(n as usize);
        let mut balance = terms.principal.as_decimal();
        let mut shown_balance = terms.principal;

        for i in 1..=n {
            let due_date = add_months(terms.start_date, i)?;
            let interest = balance
                .checked_mul(monthly_rate)
                .ok_or_else(|| overflow("period interest"))?;

            let (payment, amount) = if i == n {
                let payment = balance + interest;
                (payment, Money::from_decimal(payment))
            } else {
                (base_payment.as_decimal(), base_payment)
            };

            if !amount.is_positive() {
                return Err(LedgerError::InstallmentTooSmall {
                    principal: terms.principal,
                    count: n,
                });
            }

            balance = if i == n {
                Decimal::ZERO
            } else {
                balance - (payment - interest)
            };

            // cent portions telescope so they sum to the principal exactly
            let remaining_balance = Money::from_decimal(balance);
            let principal_portion = shown_balance - remaining_balance;
            let interest_portion = amount - principal_portion;
            shown_balance = remaining_balance;

            installments.push(Installment {
                installment_number: i,
                due_date,
                amount,
                interest_portion,
                principal_portion,
                remaining_balance,
            });
        }

        debug!(installments = n, %base_payment, "schedule computed");

        Ok(installments)
    }
}

fn positive_payment(terms: &LoanTerms, payment: Money) -> Result<Money> {
    if payment.is_positive() {
        Ok(payment)
    } else {
        Err(LedgerError::InstallmentTooSmall {
            principal: terms.principal,
            count: terms.installment_count,
        })
    }
}

fn overflow(what: &str) -> LedgerError {
    LedgerError::CalculationError {
        message: format!("{} overflowed", what),
    }
}

/// add calendar months, clamping to the last day of shorter months
fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| LedgerError::CalculationError {
            message: format!("due date out of range: {} + {} months", date, months),
        })
}
