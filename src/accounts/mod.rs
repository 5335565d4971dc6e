//! Account flows
//!
//! Registration, login and request authorization built from the codec,
//! validators, vault and session issuer.

pub mod flows;
pub mod store;

pub use flows::{AuthService, Reply, respond};
pub use store::{CredentialRecord, CredentialStore, MemoryCredentialStore};
