use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{PaymentMethod, SessionId, TransactionId};

/// audit events emitted by the cash register ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    SessionOpened {
        session_id: SessionId,
        operator_id: String,
        opening_balance: Money,
        timestamp: DateTime<Utc>,
    },
    PaymentRecorded {
        session_id: SessionId,
        transaction_id: TransactionId,
        method: PaymentMethod,
        nominal_amount: Money,
        rounding_adjustment: Money,
        settled_amount: Money,
        timestamp: DateTime<Utc>,
    },
    AdjustmentRecorded {
        session_id: SessionId,
        transaction_id: TransactionId,
        amount: Money,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    SessionClosed {
        session_id: SessionId,
        theoretical_total: Money,
        counted_cash: Money,
        difference: Money,
        is_balanced: bool,
        timestamp: DateTime<Utc>,
    },
}

impl LedgerEvent {
    pub fn session_id(&self) -> SessionId {
        match self {
            LedgerEvent::SessionOpened { session_id, .. }
            | LedgerEvent::PaymentRecorded { session_id, .. }
            | LedgerEvent::AdjustmentRecorded { session_id, .. }
            | LedgerEvent::SessionClosed { session_id, .. } => *session_id,
        }
    }
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LedgerEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    /// drain everything emitted so far
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_events_drains_store() {
        let session_id = Uuid::new_v4();
        let mut store = EventStore::new();
        store.emit(LedgerEvent::SessionOpened {
            session_id,
            operator_id: "op1".to_string(),
            opening_balance: Money::from_major(500),
            timestamp: Utc::now(),
        });

        assert_eq!(store.len(), 1);
        assert_eq!(store.events()[0].session_id(), session_id);

        let drained = store.take_events();
        assert_eq!(drained.len(), 1);
        assert!(store.is_empty());
    }
}
