//! Credential storage
//!
//! Callers persist what the vault computes; the vault itself stores nothing.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;

/// Stored credential for one account; hash and salt always travel together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub account_id: String,
    pub email: String,
    pub password_hash_hex: String,
    pub salt_hex: String,
}

/// External credential store keyed by account id and email
pub trait CredentialStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] when the id or email is taken
    fn insert(&self, record: CredentialRecord) -> Result<(), StoreError>;
    fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError>;
}

#[derive(Debug, Default)]
struct Accounts {
    by_id: HashMap<String, CredentialRecord>,
    id_by_email: HashMap<String, String>,
}

/// In-process credential store with unique ids and unique emails
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    accounts: RwLock<Accounts>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.read().map(|a| a.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn insert(&self, record: CredentialRecord) -> Result<(), StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("credential store lock poisoned".into()))?;

        if accounts.by_id.contains_key(&record.account_id) {
            return Err(StoreError::Conflict(record.account_id));
        }
        if accounts.id_by_email.contains_key(&record.email) {
            return Err(StoreError::Conflict(record.email));
        }

        accounts
            .id_by_email
            .insert(record.email.clone(), record.account_id.clone());
        accounts.by_id.insert(record.account_id.clone(), record);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<CredentialRecord>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("credential store lock poisoned".into()))?;

        Ok(accounts
            .id_by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned())
    }
}
