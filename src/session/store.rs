//! Token storage
//!
//! The issuer only needs a keyed put/get. `MemoryTokenStore` is the
//! reference implementation used by tests and single-process hosts.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;

/// One issued session as recorded in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub owner_id: String,
    pub issued_at_ms: i64,
}

/// External keyed store of issued tokens
pub trait TokenStore: Send + Sync {
    fn put(&self, token: &str, owner_id: &str, issued_at_ms: i64) -> Result<(), StoreError>;
    fn get(&self, token: &str) -> Result<Option<SessionRecord>, StoreError>;
}

/// In-process token store; a token, once written, is never replaced
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TokenStore for MemoryTokenStore {
    fn put(&self, token: &str, owner_id: &str, issued_at_ms: i64) -> Result<(), StoreError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StoreError::Unavailable("token store lock poisoned".into()))?;

        if sessions.contains_key(token) {
            return Err(StoreError::Conflict("token".into()));
        }
        sessions.insert(
            token.to_string(),
            SessionRecord {
                token: token.to_string(),
                owner_id: owner_id.to_string(),
                issued_at_ms,
            },
        );
        Ok(())
    }

    fn get(&self, token: &str) -> Result<Option<SessionRecord>, StoreError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StoreError::Unavailable("token store lock poisoned".into()))?;
        Ok(sessions.get(token).cloned())
    }
}
