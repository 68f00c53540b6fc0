use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a cash register session
pub type SessionId = Uuid;

/// unique identifier for a ledger transaction
pub type TransactionId = Uuid;

/// cash register session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// accepting payments
    Open,
    /// reconciled, terminal
    Closed,
}

/// kind of entry in a session's transaction log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Opening,
    Payment,
    Closing,
    Adjustment,
}

/// how a payment was collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// physical coins and notes, subject to denomination rounding
    Cash,
    /// wallet, card or transfer; settles to the cent
    Digital,
}

impl PaymentMethod {
    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Cash)
    }
}
