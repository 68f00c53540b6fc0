pub mod cash;
pub mod clients;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod schedule;
pub mod types;

// re-export key types
pub use cash::{
    CashRegisterLedger, CashRegisterSession, ClosureReport, ClosureResult, CurrencyRounder,
    InMemorySessionRepository, LedgerSummary, RoundingResult, SessionRepository, Transaction,
};
pub use clients::{ClientProfile, ContactDetails, JuridicalPerson, NaturalPerson};
pub use config::{CoreConfig, Declaration, LedgerConfig, LendingPolicy};
pub use decimal::{Money, Rate};
pub use errors::{ErrorKind, LedgerError, Result};
pub use events::{EventStore, LedgerEvent};
pub use schedule::{AmortizationCalculator, AmortizationSchedule, Installment, LoanTerms};
pub use types::{PaymentMethod, SessionId, SessionStatus, TransactionId, TransactionKind};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
