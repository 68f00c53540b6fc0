use std::collections::HashMap;

use crate::cash::session::CashRegisterSession;
use crate::errors::{LedgerError, Result};
use crate::types::SessionId;

/// durable storage for cash register sessions, supplied by the caller
pub trait SessionRepository {
    /// insert or replace the stored copy of a session
    ///
    /// Fails with `SessionAlreadyOpen` when `session` is open and a
    /// different session is already stored as open.
    fn save(&mut self, session: &CashRegisterSession) -> Result<()>;

    fn load(&self, session_id: SessionId) -> Result<Option<CashRegisterSession>>;

    /// the session currently open, if any
    fn find_open(&self) -> Result<Option<CashRegisterSession>>;
}

/// repository keeping sessions as json documents in memory
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    documents: HashMap<SessionId, String>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// load a session that must exist
    pub fn get(&self, session_id: SessionId) -> Result<CashRegisterSession> {
        self.load(session_id)?
            .ok_or(LedgerError::SessionNotFound { session_id })
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn save(&mut self, session: &CashRegisterSession) -> Result<()> {
        if session.is_open() {
            if let Some(current) = self.find_open()?.filter(|s| s.id != session.id) {
                return Err(LedgerError::SessionAlreadyOpen {
                    session_id: current.id,
                });
            }
        }

        let document = serde_json::to_string(session)?;
        self.documents.insert(session.id, document);
        Ok(())
    }

    fn load(&self, session_id: SessionId) -> Result<Option<CashRegisterSession>> {
        self.documents
            .get(&session_id)
            .map(|document| serde_json::from_str(document))
            .transpose()
            .map_err(LedgerError::from)
    }

    fn find_open(&self) -> Result<Option<CashRegisterSession>> {
        for document in self.documents.values() {
            let session: CashRegisterSession = serde_json::from_str(document)?;
            if session.is_open() {
                return Ok(Some(session));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_save_then_load() {
        let mut repository = InMemorySessionRepository::new();
        let session = CashRegisterSession::open(Money::from_major(250), "op3", Utc::now());

        repository.save(&session).unwrap();
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.load(session.id).unwrap(), Some(session.clone()));
        assert_eq!(repository.get(session.id).unwrap(), session);

        // saving again replaces the stored copy
        repository.save(&session).unwrap();
        assert_eq!(repository.len(), 1);
    }

    #[test]
    fn test_missing_session() {
        let repository = InMemorySessionRepository::new();
        let id = Uuid::new_v4();

        assert_eq!(repository.load(id).unwrap(), None);
        assert!(matches!(
            repository.get(id),
            Err(LedgerError::SessionNotFound { session_id }) if session_id == id
        ));
        assert_eq!(repository.find_open().unwrap(), None);
    }

    #[test]
    fn test_find_open_skips_closed_sessions() {
        let mut repository = InMemorySessionRepository::new();
        let now = Utc::now();

        let mut closed = CashRegisterSession::open(Money::from_major(10), "op1", now);
        closed.mark_closed(Money::from_major(10), true, now);
        let open = CashRegisterSession::open(Money::from_major(20), "op1", now);

        repository.save(&closed).unwrap();
        repository.save(&open).unwrap();

        let found = repository.find_open().unwrap().unwrap();
        assert_eq!(found.id, open.id);
    }

    #[test]
    fn test_second_open_session_is_rejected() {
        let mut repository = InMemorySessionRepository::new();
        let now = Utc::now();

        let mut first = CashRegisterSession::open(Money::from_major(100), "op1", now);
        let second = CashRegisterSession::open(Money::from_major(200), "op2", now);

        repository.save(&first).unwrap();
        let err = repository.save(&second).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::SessionAlreadyOpen { session_id } if session_id == first.id
        ));
        assert_eq!(repository.len(), 1);
        assert_eq!(repository.find_open().unwrap().unwrap().id, first.id);

        // once the first drawer is closed the second may be stored
        first.mark_closed(Money::from_major(100), true, now);
        repository.save(&first).unwrap();
        repository.save(&second).unwrap();
        assert_eq!(repository.len(), 2);
        assert_eq!(repository.find_open().unwrap().unwrap().id, second.id);
    }
}
