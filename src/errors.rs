use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::{SessionId, SessionStatus};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid principal: {amount} (must be positive)")]
    InvalidPrincipal {
        amount: Money,
    },

    #[error("invalid interest rate: {rate} (must not be negative)")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid installment count: {count} (must be positive)")]
    InvalidInstallmentCount {
        count: u32,
    },

    #[error("principal {principal} cannot be split into {count} positive installments")]
    InstallmentTooSmall {
        principal: Money,
        count: u32,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid opening balance: {amount}")]
    InvalidOpeningBalance {
        amount: Money,
    },

    #[error("invalid counted cash: {amount}")]
    InvalidCountedCash {
        amount: Money,
    },

    #[error("invalid adjustment: {message}")]
    InvalidAdjustment {
        message: String,
    },

    #[error("invalid client profile: {message}")]
    InvalidClientProfile {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("lending policy violation: {message}")]
    PolicyViolation {
        message: String,
    },

    #[error("a cash register session is already open: {session_id}")]
    SessionAlreadyOpen {
        session_id: SessionId,
    },

    #[error("no cash register session is open")]
    NoOpenSession,

    #[error("cash register session {session_id} is not open: current status is {status:?}")]
    SessionNotOpen {
        session_id: SessionId,
        status: SessionStatus,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("session not found: {session_id}")]
    SessionNotFound {
        session_id: SessionId,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// coarse classification callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// malformed or out-of-range input from the caller
    Validation,
    /// operation invoked in the wrong session state (a sequencing bug)
    LedgerState,
    /// arithmetic that cannot be represented
    Arithmetic,
    /// storing or loading records
    Persistence,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidPrincipal { .. }
            | LedgerError::InvalidInterestRate { .. }
            | LedgerError::InvalidInstallmentCount { .. }
            | LedgerError::InstallmentTooSmall { .. }
            | LedgerError::InvalidPaymentAmount { .. }
            | LedgerError::InvalidOpeningBalance { .. }
            | LedgerError::InvalidCountedCash { .. }
            | LedgerError::InvalidAdjustment { .. }
            | LedgerError::InvalidClientProfile { .. }
            | LedgerError::InvalidConfiguration { .. }
            | LedgerError::PolicyViolation { .. } => ErrorKind::Validation,
            LedgerError::SessionAlreadyOpen { .. }
            | LedgerError::NoOpenSession
            | LedgerError::SessionNotOpen { .. } => ErrorKind::LedgerState,
            LedgerError::CalculationError { .. } => ErrorKind::Arithmetic,
            LedgerError::SessionNotFound { .. } | LedgerError::Serialization(_) => {
                ErrorKind::Persistence
            }
        }
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    pub fn is_state_violation(&self) -> bool {
        self.kind() == ErrorKind::LedgerState
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
