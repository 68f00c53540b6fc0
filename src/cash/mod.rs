pub mod ledger;
#[cfg(test)]
mod props;
pub mod report;
pub mod repository;
pub mod rounding;
pub mod session;

pub use ledger::{CashRegisterLedger, ClosureResult};
pub use report::{ClosureReport, ReconciliationView, ReportLine};
pub use repository::{InMemorySessionRepository, SessionRepository};
pub use rounding::{CurrencyRounder, RoundingResult};
pub use session::{CashRegisterSession, LedgerSummary, Transaction};
