//! end-of-day reconciliation (arqueo) view of a session
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cash::session::{CashRegisterSession, LedgerSummary};
use crate::config::LedgerConfig;
use crate::decimal::Money;
use crate::types::{PaymentMethod, SessionId, SessionStatus, TransactionKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosureReport {
    pub session_id: SessionId,
    pub operator_id: String,
    pub currency_code: String,
    pub status: SessionStatus,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub summary: LedgerSummary,
    pub reconciliation: Option<ReconciliationView>,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationView {
    pub counted_cash: Money,
    pub difference: Money,
    pub is_balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub timestamp: DateTime<Utc>,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub client_ref: Option<String>,
    pub nominal_amount: Money,
    pub rounding_adjustment: Money,
    pub settled_amount: Money,
}

impl ClosureReport {
    pub fn from_session(session: &CashRegisterSession, config: &LedgerConfig) -> Self {
        let summary = session.summary();

        // the balance verdict is the one recorded at close, not recomputed
        let reconciliation = session
            .counted_cash_at_close
            .zip(session.balanced_at_close)
            .map(|(counted_cash, is_balanced)| ReconciliationView {
                counted_cash,
                difference: counted_cash - summary.theoretical_total,
                is_balanced,
            });

        let lines = session
            .transactions()
            .iter()
            .map(|t| ReportLine {
                timestamp: t.timestamp,
                kind: t.kind,
                method: t.method,
                client_ref: t.client_ref.clone(),
                nominal_amount: t.nominal_amount,
                rounding_adjustment: t.rounding_adjustment,
                settled_amount: t.settled_amount,
            })
            .collect();

        ClosureReport {
            session_id: session.id,
            operator_id: session.operator_id.clone(),
            currency_code: config.currency_code.clone(),
            status: session.status,
            opened_at: session.opened_at,
            closed_at: session.closed_at,
            summary,
            reconciliation,
            lines,
        }
    }

    /// payments collected during the day, in order
    pub fn payments(&self) -> impl Iterator<Item = &ReportLine> {
        self.lines.iter().filter(|l| l.kind == TransactionKind::Payment)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
