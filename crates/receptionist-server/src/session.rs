//! Per-call conversation storage.
//!
//! Handlers reach the store through the [`SessionStore`] trait so the
//! in-memory map can be swapped for a persistent backend, or a fake in tests.
//! Histories are never evicted; a session lives as long as the process.

use receptionist_types::ChatTurn;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no session for call {0}")]
    UnknownCall(String),
    #[error("session store lock poisoned")]
    LockPoisoned,
}

/// Conversation histories keyed by call identifier.
///
/// Each method is atomic on its own. A sequence of calls for the same call
/// identifier is not, so duplicate webhook deliveries interleave freely.
pub trait SessionStore: Send + Sync {
    /// Creates the session for `call_sid`, replacing any existing history.
    fn create(&self, call_sid: &str, turns: Vec<ChatTurn>) -> Result<(), SessionError>;

    /// Returns a snapshot of the history, or `None` for an unknown call.
    fn get(&self, call_sid: &str) -> Result<Option<Vec<ChatTurn>>, SessionError>;

    /// Appends one turn and returns the new history length.
    fn append(&self, call_sid: &str, turn: ChatTurn) -> Result<usize, SessionError>;

    /// Number of calls with a stored history.
    fn len(&self) -> Result<usize, SessionError>;

    fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.len()? == 0)
    }
}

/// Process-local [`SessionStore`].
///
/// Uses `std::sync::RwLock`: every acquisition is a short HashMap operation
/// that never spans an `.await`.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Vec<ChatTurn>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, call_sid: &str, turns: Vec<ChatTurn>) -> Result<(), SessionError> {
        self.sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?
            .insert(call_sid.to_string(), turns);
        Ok(())
    }

    fn get(&self, call_sid: &str) -> Result<Option<Vec<ChatTurn>>, SessionError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .get(call_sid)
            .cloned())
    }

    fn append(&self, call_sid: &str, turn: ChatTurn) -> Result<usize, SessionError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| SessionError::LockPoisoned)?;
        let history = sessions
            .get_mut(call_sid)
            .ok_or_else(|| SessionError::UnknownCall(call_sid.to_string()))?;
        history.push(turn);
        Ok(history.len())
    }

    fn len(&self) -> Result<usize, SessionError> {
        Ok(self
            .sessions
            .read()
            .map_err(|_| SessionError::LockPoisoned)?
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_types::ChatRole;

    #[test]
    fn create_then_append_preserves_order() {
        let store = InMemorySessionStore::new();
        store
            .create("CA1", vec![ChatTurn::system("prompt")])
            .unwrap();

        assert_eq!(store.append("CA1", ChatTurn::user("hi")).unwrap(), 2);
        assert_eq!(store.append("CA1", ChatTurn::assistant("hello")).unwrap(), 3);

        let roles: Vec<ChatRole> = store
            .get("CA1")
            .unwrap()
            .unwrap()
            .iter()
            .map(|t| t.role)
            .collect();
        assert_eq!(roles, [ChatRole::System, ChatRole::User, ChatRole::Assistant]);
    }

    #[test]
    fn create_replaces_existing_history() {
        let store = InMemorySessionStore::new();
        store.create("CA1", vec![ChatTurn::system("old")]).unwrap();
        store.append("CA1", ChatTurn::user("hi")).unwrap();

        store.create("CA1", vec![ChatTurn::system("new")]).unwrap();

        assert_eq!(
            store.get("CA1").unwrap().unwrap(),
            vec![ChatTurn::system("new")]
        );
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn append_to_unknown_call_fails() {
        let store = InMemorySessionStore::new();
        let err = store.append("missing", ChatTurn::user("hi")).unwrap_err();
        assert!(matches!(err, SessionError::UnknownCall(ref sid) if sid == "missing"));
        assert!(store.get("missing").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn calls_are_isolated() {
        let store = InMemorySessionStore::new();
        store.create("CA1", vec![ChatTurn::system("a")]).unwrap();
        store.create("CA2", vec![ChatTurn::system("b")]).unwrap();
        store.append("CA1", ChatTurn::user("only in one")).unwrap();

        assert_eq!(store.get("CA1").unwrap().unwrap().len(), 2);
        assert_eq!(store.get("CA2").unwrap().unwrap().len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let store = InMemorySessionStore::new();
        let handle = store.clone();
        handle.create("CA1", Vec::new()).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }
}
