use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cash::repository::SessionRepository;
use crate::cash::rounding::CurrencyRounder;
use crate::cash::session::{CashRegisterSession, LedgerSummary, Transaction};
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent};
use crate::types::{PaymentMethod, SessionId};

/// outcome of the end-of-day count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosureResult {
    pub session_id: SessionId,
    pub theoretical_total: Money,
    pub counted_cash: Money,
    /// counted minus theoretical; negative means cash is missing
    pub difference: Money,
    pub is_balanced: bool,
    pub closing_transaction: Transaction,
}

/// single-writer state machine over one cash drawer
///
/// At most one session is open at a time. Closing is terminal for that
/// session; the next `open` starts a new one. Callers that share a ledger
/// between threads must serialize access themselves.
#[derive(Debug)]
pub struct CashRegisterLedger {
    config: LedgerConfig,
    rounder: CurrencyRounder,
    session: Option<CashRegisterSession>,
    pub events: EventStore,
}

impl CashRegisterLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            rounder: CurrencyRounder::new(),
            session: None,
            events: EventStore::new(),
        }
    }

    /// rebuild a ledger around a previously persisted session
    pub fn resume(config: LedgerConfig, session: CashRegisterSession) -> Self {
        info!(session_id = %session.id, status = ?session.status, "cash register session resumed");
        Self {
            session: Some(session),
            ..Self::new(config)
        }
    }

    /// reattach to whatever session the repository has open, if any
    pub fn resume_open<R: SessionRepository>(config: LedgerConfig, repository: &R) -> Result<Self> {
        Ok(match repository.find_open()? {
            Some(session) => Self::resume(config, session),
            None => Self::new(config),
        })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// current or most recently closed session
    pub fn session(&self) -> Option<&CashRegisterSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.is_open())
    }

    pub fn into_session(self) -> Option<CashRegisterSession> {
        self.session
    }

    /// open a new session with the cash already in the drawer
    pub fn open(
        &mut self,
        initial_balance: Money,
        operator_id: &str,
        time_provider: &SafeTimeProvider,
    ) -> Result<&CashRegisterSession> {
        if let Some(current) = self.session.as_ref().filter(|s| s.is_open()) {
            warn!(session_id = %current.id, "rejected open: a session is already open");
            return Err(LedgerError::SessionAlreadyOpen {
                session_id: current.id,
            });
        }

        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidOpeningBalance {
                amount: initial_balance,
            });
        }

        let now = time_provider.now();
        let session = CashRegisterSession::open(initial_balance, operator_id, now);

        info!(
            session_id = %session.id,
            operator_id,
            opening_balance = %initial_balance,
            "cash register opened"
        );
        self.events.emit(LedgerEvent::SessionOpened {
            session_id: session.id,
            operator_id: operator_id.to_string(),
            opening_balance: initial_balance,
            timestamp: now,
        });

        Ok(&*self.session.insert(session))
    }

    /// record a collected payment, rounding cash to payable denominations
    pub fn record_payment(
        &mut self,
        amount: Money,
        method: PaymentMethod,
        client_ref: &str,
        time_provider: &SafeTimeProvider,
    ) -> Result<Transaction> {
        let session = open_session_mut(&mut self.session)?;

        if !amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }

        let now = time_provider.now();
        let transaction = match method {
            PaymentMethod::Cash => {
                if let Some(limit) = self.config.max_cash_payment {
                    if amount > limit {
                        return Err(LedgerError::InvalidPaymentAmount { amount });
                    }
                }
                Transaction::cash_payment(self.rounder.round(amount), client_ref, now)
            }
            PaymentMethod::Digital => Transaction::digital_payment(amount, client_ref, now),
        };

        let recorded = session.append(transaction).clone();

        debug!(
            session_id = %session.id,
            method = ?recorded.method,
            nominal = %recorded.nominal_amount,
            adjustment = %recorded.rounding_adjustment,
            settled = %recorded.settled_amount,
            "payment recorded"
        );
        self.events.emit(LedgerEvent::PaymentRecorded {
            session_id: session.id,
            transaction_id: recorded.id,
            method: recorded.method,
            nominal_amount: recorded.nominal_amount,
            rounding_adjustment: recorded.rounding_adjustment,
            settled_amount: recorded.settled_amount,
            timestamp: now,
        });

        Ok(recorded)
    }

    /// record a manual correction to the drawer (positive or negative)
    pub fn record_adjustment(
        &mut self,
        amount: Money,
        reason: &str,
        time_provider: &SafeTimeProvider,
    ) -> Result<Transaction> {
        let session = open_session_mut(&mut self.session)?;

        if amount.is_zero() {
            return Err(LedgerError::InvalidAdjustment {
                message: "adjustment amount must not be zero".to_string(),
            });
        }
        if reason.trim().is_empty() {
            return Err(LedgerError::InvalidAdjustment {
                message: "adjustment requires a reason".to_string(),
            });
        }

        let now = time_provider.now();
        let recorded = session
            .append(Transaction::adjustment(amount, reason, now))
            .clone();

        info!(session_id = %session.id, %amount, reason, "manual adjustment recorded");
        self.events.emit(LedgerEvent::AdjustmentRecorded {
            session_id: session.id,
            transaction_id: recorded.id,
            amount,
            reason: reason.to_string(),
            timestamp: now,
        });

        Ok(recorded)
    }

    /// totals for the current or last session; all zero before the first open
    pub fn summary(&self) -> LedgerSummary {
        self.session
            .as_ref()
            .map(CashRegisterSession::summary)
            .unwrap_or_default()
    }

    /// reconcile counted cash and close the session, balanced or not
    pub fn close(
        &mut self,
        counted_cash: Money,
        time_provider: &SafeTimeProvider,
    ) -> Result<ClosureResult> {
        let session = open_session_mut(&mut self.session)?;

        if counted_cash.is_negative() {
            return Err(LedgerError::InvalidCountedCash {
                amount: counted_cash,
            });
        }

        let theoretical_total = session.summary().theoretical_total;
        let difference = counted_cash - theoretical_total;
        let is_balanced = difference.abs() < self.config.balance_tolerance;

        let now = time_provider.now();
        let closing_transaction = session
            .append(Transaction::closing(counted_cash, now))
            .clone();
        session.mark_closed(counted_cash, is_balanced, now);

        if is_balanced {
            info!(session_id = %session.id, %theoretical_total, "cash register closed balanced");
        } else {
            warn!(
                session_id = %session.id,
                %theoretical_total,
                %counted_cash,
                %difference,
                "cash register closed with a discrepancy"
            );
        }
        self.events.emit(LedgerEvent::SessionClosed {
            session_id: session.id,
            theoretical_total,
            counted_cash,
            difference,
            is_balanced,
            timestamp: now,
        });

        Ok(ClosureResult {
            session_id: session.id,
            theoretical_total,
            counted_cash,
            difference,
            is_balanced,
            closing_transaction,
        })
    }

    /// hand the current session to durable storage
    pub fn save_to<R: SessionRepository>(&self, repository: &mut R) -> Result<()> {
        match &self.session {
            Some(session) => repository.save(session),
            None => Err(LedgerError::NoOpenSession),
        }
    }
}

fn open_session_mut(session: &mut Option<CashRegisterSession>) -> Result<&mut CashRegisterSession> {
    match session {
        Some(s) if !s.is_open() => {
            warn!(session_id = %s.id, "rejected operation: session is closed");
            Err(LedgerError::SessionNotOpen {
                session_id: s.id,
                status: s.status,
            })
        }
        Some(s) => Ok(s),
        None => {
            warn!("rejected operation: no session has been opened");
            Err(LedgerError::NoOpenSession)
        }
    }
}
