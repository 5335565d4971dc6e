//! Session issuer
//!
//! Mints bearer tokens for authenticated owners and resolves presented
//! tokens back to their owner. Expiry runs from issuance and never slides;
//! there is no revocation, so expiry is the only way a token stops working.

use std::sync::Arc;

use log::{info, warn};

use crate::error::{AuthError, CoreError, InternalError};
use crate::random::{SecureRandom, random_bytes};
use crate::session::clock::Clock;
use crate::session::store::TokenStore;

/// Seven days
pub const TOKEN_TTL_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// Random bytes per token; hex encoding doubles this in characters
pub const TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct SessionIssuer {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn SecureRandom>,
}

impl SessionIssuer {
    pub fn new(
        store: Arc<dyn TokenStore>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn SecureRandom>,
    ) -> Self {
        Self {
            store,
            clock,
            random,
        }
    }

    /// Mint a fresh token for `owner_id` and record it with the current time
    pub fn issue(&self, owner_id: &str) -> Result<String, InternalError> {
        let token = hex::encode(random_bytes::<TOKEN_BYTES>(self.random.as_ref())?);
        let issued_at_ms = self.clock.now_ms();
        self.store.put(&token, owner_id, issued_at_ms)?;
        info!("Issued session token for {}", owner_id);
        Ok(token)
    }

    /// Resolve a presented token to its owner.
    ///
    /// Reads the store once and takes one clock reading, so a token at the
    /// edge of its lifetime is judged against a single snapshot.
    pub fn authenticate(&self, token: Option<&str>) -> Result<String, CoreError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::Missing.into()),
        };

        let record = self.store.get(token)?.ok_or(AuthError::Missing)?;
        if is_expired(record.issued_at_ms, self.clock.now_ms()) {
            warn!("Rejected expired token for {}", record.owner_id);
            return Err(AuthError::Expired.into());
        }
        Ok(record.owner_id)
    }
}

/// A token is expired once strictly more than the TTL has elapsed
pub fn is_expired(issued_at_ms: i64, now_ms: i64) -> bool {
    now_ms.saturating_sub(issued_at_ms) > TOKEN_TTL_MS
}
