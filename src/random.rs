//! Secure random source
//!
//! Salts and bearer tokens draw from one shared capability that is passed in
//! explicitly, so tests can substitute a deterministic source.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::InternalError;

/// A thread-safe cryptographically secure byte source
pub trait SecureRandom: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), InternalError>;
}

/// Operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl SecureRandom for OsRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), InternalError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| InternalError::EntropyUnavailable(e.to_string()))
    }
}

/// Fill a fresh buffer of `N` bytes from `random`
pub fn random_bytes<const N: usize>(random: &dyn SecureRandom) -> Result<[u8; N], InternalError> {
    let mut buf = [0u8; N];
    random.fill(&mut buf)?;
    Ok(buf)
}
