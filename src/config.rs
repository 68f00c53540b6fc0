use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::clients::ClientProfile;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::schedule::LoanTerms;

/// full configuration for the computational core
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub lending: LendingPolicy,
}

impl CoreConfig {
    /// parse and validate a json document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CoreConfig = serde_json::from_str(json).map_err(|e| {
            LedgerError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.ledger.validate()?;
        self.lending.validate()
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// cash register settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub currency_code: String,
    /// a closing difference strictly below this counts as balanced
    pub balance_tolerance: Money,
    /// largest single cash payment accepted, if any
    pub max_cash_payment: Option<Money>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency_code: "PEN".to_string(),
            balance_tolerance: Money::CENT,
            max_cash_payment: None,
        }
    }
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.currency_code.len() != 3 || !self.currency_code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("currency code must be three uppercase letters, got {:?}", self.currency_code),
            });
        }

        if !self.balance_tolerance.is_positive() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("balance tolerance must be positive, got {}", self.balance_tolerance),
            });
        }

        if let Some(limit) = self.max_cash_payment {
            if !limit.is_positive() {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("max cash payment must be positive, got {}", limit),
                });
            }
        }

        Ok(())
    }
}

/// compliance paperwork a loan may require before disbursement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Declaration {
    /// sworn statement for politically exposed persons
    PoliticallyExposedPerson,
    /// source-of-funds statement for amounts above one tax unit
    UitThreshold,
}

/// loan origination rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingPolicy {
    /// value of one statutory tax unit (UIT)
    pub uit_value: Money,
    pub max_installment_count: u32,
    pub max_annual_rate_percent: Option<Decimal>,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            uit_value: Money::from_decimal(dec!(5150)),
            max_installment_count: 60,
            max_annual_rate_percent: None,
        }
    }
}

impl LendingPolicy {
    pub fn validate(&self) -> Result<()> {
        if !self.uit_value.is_positive() {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("uit value must be positive, got {}", self.uit_value),
            });
        }

        if self.max_installment_count == 0 {
            return Err(LedgerError::InvalidConfiguration {
                message: "max installment count must be positive".to_string(),
            });
        }

        if let Some(cap) = self.max_annual_rate_percent {
            if cap < Decimal::ZERO {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("annual rate cap must not be negative, got {}", cap),
                });
            }
        }

        Ok(())
    }

    /// check loan terms against origination limits
    pub fn check_terms(&self, terms: &LoanTerms) -> Result<()> {
        terms.validate()?;

        if terms.installment_count > self.max_installment_count {
            return Err(LedgerError::PolicyViolation {
                message: format!(
                    "{} installments exceeds the maximum of {}",
                    terms.installment_count, self.max_installment_count
                ),
            });
        }

        if let Some(cap) = self.max_annual_rate_percent {
            if terms.annual_rate.as_percentage() > cap {
                return Err(LedgerError::PolicyViolation {
                    message: format!("annual rate {} exceeds the cap of {}%", terms.annual_rate, cap),
                });
            }
        }

        Ok(())
    }

    pub fn exceeds_uit(&self, principal: Money) -> bool {
        principal > self.uit_value
    }

    /// declarations the borrower must sign for this loan
    pub fn required_declarations(&self, client: &ClientProfile, principal: Money) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        if client.is_pep() {
            declarations.push(Declaration::PoliticallyExposedPerson);
        }
        if self.exceeds_uit(principal) {
            declarations.push(Declaration::UitThreshold);
        }
        declarations
    }
}
