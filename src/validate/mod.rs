//! Field validation
//!
//! Gates untrusted decoded values before they reach storage or the vault.
//! Each validator returns the accepted (possibly sanitized) value or a
//! descriptive [`ValidationError`](crate::error::ValidationError).

pub mod account;
pub mod fields;
pub mod results;

pub use account::{PasswordRule, validate_account_id, validate_email, validate_password};
pub use fields::{
    sanitize, sanitize_optional_title, validate_comment, validate_title, validate_url,
};
pub use results::{FieldKind, ValidatedField};
