//! Credential vault
//!
//! Computes password hashes for callers to store, and verifies candidates
//! against stored values.

pub mod operations;
pub mod results;

pub use operations::{CredentialVault, ITERATIONS, KEY_LENGTH_BYTES, SALT_BYTES};
pub use results::DerivedCredential;
