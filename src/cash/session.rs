use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cash::rounding::RoundingResult;
use crate::decimal::Money;
use crate::types::{PaymentMethod, SessionId, SessionStatus, TransactionId, TransactionKind};

/// immutable entry in a session's transaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    /// amount owed before rounding
    pub nominal_amount: Money,
    pub rounding_adjustment: Money,
    /// what actually moved: nominal plus adjustment
    pub settled_amount: Money,
    pub client_ref: Option<String>,
    pub note: Option<String>,
}

impl Transaction {
    pub(crate) fn opening(amount: Money, timestamp: DateTime<Utc>) -> Self {
        Self::flat(TransactionKind::Opening, amount, timestamp)
    }

    pub(crate) fn cash_payment(
        rounding: RoundingResult,
        client_ref: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind: TransactionKind::Payment,
            method: PaymentMethod::Cash,
            nominal_amount: rounding.original_amount,
            rounding_adjustment: rounding.adjustment,
            settled_amount: rounding.rounded_amount,
            client_ref: Some(client_ref.to_string()),
            note: None,
        }
    }

    pub(crate) fn digital_payment(
        amount: Money,
        client_ref: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            method: PaymentMethod::Digital,
            client_ref: Some(client_ref.to_string()),
            ..Self::flat(TransactionKind::Payment, amount, timestamp)
        }
    }

    pub(crate) fn adjustment(amount: Money, reason: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            note: Some(reason.to_string()),
            ..Self::flat(TransactionKind::Adjustment, amount, timestamp)
        }
    }

    pub(crate) fn closing(counted_cash: Money, timestamp: DateTime<Utc>) -> Self {
        Self::flat(TransactionKind::Closing, counted_cash, timestamp)
    }

    fn flat(kind: TransactionKind, amount: Money, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            kind,
            method: PaymentMethod::Cash,
            nominal_amount: amount,
            rounding_adjustment: Money::ZERO,
            settled_amount: amount,
            client_ref: None,
            note: None,
        }
    }

    pub fn is_cash_payment(&self) -> bool {
        self.kind == TransactionKind::Payment && self.method.is_cash()
    }

    pub fn is_digital_payment(&self) -> bool {
        self.kind == TransactionKind::Payment && !self.method.is_cash()
    }
}

/// aggregates derived from a session's transaction log
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub session_id: Option<SessionId>,
    pub status: Option<SessionStatus>,
    pub opening_balance: Money,
    pub cash_entries: Money,
    pub digital_entries: Money,
    pub total_rounding_adjustment: Money,
    pub manual_adjustments: Money,
    /// cash that should be in the drawer
    pub theoretical_total: Money,
    pub payment_count: usize,
}

/// one business day of a cash drawer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashRegisterSession {
    pub id: SessionId,
    pub operator_id: String,
    pub opening_balance: Money,
    pub opened_at: DateTime<Utc>,
    pub status: SessionStatus,
    pub closed_at: Option<DateTime<Utc>>,
    pub counted_cash_at_close: Option<Money>,
    /// reconciliation outcome decided at close, under the tolerance then in force
    #[serde(default)]
    pub balanced_at_close: Option<bool>,
    transactions: Vec<Transaction>,
}

impl CashRegisterSession {
    /// start a session with its opening entry already in the log
    pub(crate) fn open(opening_balance: Money, operator_id: &str, opened_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator_id: operator_id.to_string(),
            opening_balance,
            opened_at,
            status: SessionStatus::Open,
            closed_at: None,
            counted_cash_at_close: None,
            balanced_at_close: None,
            transactions: vec![Transaction::opening(opening_balance, opened_at)],
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == SessionStatus::Open
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn closing_transaction(&self) -> Option<&Transaction> {
        self.transactions
            .iter()
            .rev()
            .find(|t| t.kind == TransactionKind::Closing)
    }

    pub(crate) fn append(&mut self, transaction: Transaction) -> &Transaction {
        self.transactions.push(transaction);
        &self.transactions[self.transactions.len() - 1]
    }

    pub(crate) fn mark_closed(
        &mut self,
        counted_cash: Money,
        is_balanced: bool,
        closed_at: DateTime<Utc>,
    ) {
        self.status = SessionStatus::Closed;
        self.closed_at = Some(closed_at);
        self.counted_cash_at_close = Some(counted_cash);
        self.balanced_at_close = Some(is_balanced);
    }

    /// fold the transaction log into running totals
    pub fn summary(&self) -> LedgerSummary {
        let mut summary = LedgerSummary {
            session_id: Some(self.id),
            status: Some(self.status),
            ..LedgerSummary::default()
        };

        for transaction in &self.transactions {
            match transaction.kind {
                TransactionKind::Opening => summary.opening_balance += transaction.settled_amount,
                TransactionKind::Payment if transaction.method.is_cash() => {
                    summary.cash_entries += transaction.settled_amount;
                    summary.total_rounding_adjustment += transaction.rounding_adjustment;
                    summary.payment_count += 1;
                }
                TransactionKind::Payment => {
                    summary.digital_entries += transaction.settled_amount;
                    summary.payment_count += 1;
                }
                TransactionKind::Adjustment => {
                    summary.manual_adjustments += transaction.settled_amount
                }
                TransactionKind::Closing => {}
            }
        }

        summary.theoretical_total =
            summary.opening_balance + summary.cash_entries + summary.manual_adjustments;
        summary
    }
}
