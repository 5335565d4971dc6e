//! Password derivation and verification
//!
//! PBKDF2-HMAC-SHA256 with a fixed work factor. The iteration count and key
//! length are part of every stored hash: changing either one invalidates all
//! existing credentials.

use std::sync::Arc;

use log::debug;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::InternalError;
use crate::random::{SecureRandom, random_bytes};
use crate::vault::results::DerivedCredential;

pub const ITERATIONS: u32 = 120_000;
pub const KEY_LENGTH_BYTES: usize = 32;
pub const SALT_BYTES: usize = 16;

/// Derives and checks password hashes; never persists anything itself
#[derive(Clone)]
pub struct CredentialVault {
    random: Arc<dyn SecureRandom>,
}

impl CredentialVault {
    pub fn new(random: Arc<dyn SecureRandom>) -> Self {
        Self { random }
    }

    /// Hash `password` under a fresh random salt.
    ///
    /// This is deliberately slow (hundreds of milliseconds); async callers
    /// must run it on a blocking worker.
    pub fn derive(&self, password: &str) -> Result<DerivedCredential, InternalError> {
        let salt: [u8; SALT_BYTES] = random_bytes(self.random.as_ref())?;
        let hash = pbkdf2_sha256(password, &salt, ITERATIONS);
        debug!("Derived credential ({} iterations)", ITERATIONS);
        Ok(DerivedCredential::new(hex::encode(hash), hex::encode(salt)))
    }

    /// Check `password` against a stored salt and hash.
    ///
    /// Malformed hex, or a hash of the wrong length, is simply `false`.
    pub fn verify(password: &str, salt_hex: &str, hash_hex: &str) -> bool {
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
            return false;
        };
        if expected.len() != KEY_LENGTH_BYTES {
            return false;
        }

        let actual = pbkdf2_sha256(password, &salt, ITERATIONS);
        actual[..].ct_eq(&expected[..]).into()
    }
}

fn pbkdf2_sha256(password: &str, salt: &[u8], rounds: u32) -> [u8; KEY_LENGTH_BYTES] {
    let mut out = [0u8; KEY_LENGTH_BYTES];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, rounds, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::OsRandom;

    fn vault() -> CredentialVault {
        CredentialVault::new(Arc::new(OsRandom))
    }

    #[test]
    fn test_known_vector() {
        // RFC 7914 section 11, first output block.
        let out = pbkdf2_sha256("passwd", b"salt", 1);
        assert_eq!(
            hex::encode(out),
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc"
        );
    }

    #[test]
    fn test_derive_then_verify() {
        let derived = vault().derive("correct horse").unwrap();
        assert_eq!(derived.hash_hex().len(), KEY_LENGTH_BYTES * 2);
        assert_eq!(derived.salt_hex().len(), SALT_BYTES * 2);

        assert!(CredentialVault::verify(
            "correct horse",
            derived.salt_hex(),
            derived.hash_hex()
        ));
        assert!(!CredentialVault::verify(
            "correct horsE",
            derived.salt_hex(),
            derived.hash_hex()
        ));
    }

    #[test]
    fn test_salts_differ_per_derivation() {
        let v = vault();
        let a = v.derive("same").unwrap();
        let b = v.derive("same").unwrap();
        assert_ne!(a.salt_hex(), b.salt_hex());
        assert_ne!(a.hash_hex(), b.hash_hex());
    }

    #[test]
    fn test_malformed_input_is_false() {
        let good_salt = "00".repeat(SALT_BYTES);
        let good_hash = "00".repeat(KEY_LENGTH_BYTES);

        assert!(!CredentialVault::verify("pw", "zz", &good_hash));
        assert!(!CredentialVault::verify("pw", "abc", &good_hash));
        assert!(!CredentialVault::verify("pw", &good_salt, "not hex"));
        assert!(!CredentialVault::verify("pw", &good_salt, ""));
        assert!(!CredentialVault::verify("pw", &good_salt, "abcd"));
        assert!(!CredentialVault::verify("pw", &good_salt, &good_hash));
    }
}
