//! CrowdTruth core
//!
//! Credential and session trust layer for the CrowdTruth API, plus the flat
//! wire codec every request and response body passes through.
//!
//! Inbound body → [`wire::decode`] → [`validate`] → [`vault`] (registration
//! and login) or [`session`] (authenticated calls) → [`wire::ObjectBuilder`].
//! [`accounts::AuthService`] strings these together.

pub mod accounts;
pub mod config;
pub mod error;
pub mod random;
pub mod session;
pub mod utils;
pub mod validate;
pub mod vault;
pub mod wire;

pub use accounts::{AuthService, Reply};
pub use config::CoreConfig;
pub use error::CoreError;
