//! Error types
//!
//! Defines the error kinds produced by each component of the trust layer.

use std::fmt;
use std::io;

use crate::validate::FieldKind;

/// Field validation errors
///
/// Every variant is a pure function of the input; producing one never
/// touches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Required(FieldKind),
    /// Account field missing or malformed; the client is not told which.
    Invalid(FieldKind),
    TooShort { field: FieldKind, min: usize },
    TooLong(FieldKind),
    InvalidFormat(FieldKind),
    UnsupportedScheme,
    MissingUppercase,
    MissingLowercase,
    MissingSpecialCharacter,
    MissingCredentials,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required(field) => write!(f, "{} is required", field),
            ValidationError::Invalid(field) => write!(f, "Invalid {}", field),
            ValidationError::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            ValidationError::TooLong(field) => write!(f, "{} is too long", field),
            ValidationError::InvalidFormat(field) => write!(f, "Invalid {} format", field),
            ValidationError::UnsupportedScheme => write!(f, "URL must be HTTP or HTTPS"),
            ValidationError::MissingUppercase => {
                write!(f, "Invalid Password, Must Contain at least one Capitial Letter")
            }
            ValidationError::MissingLowercase => {
                write!(f, "Invalid Password, Must Contain at least one Lowercase Letter")
            }
            ValidationError::MissingSpecialCharacter => write!(
                f,
                "Invalid Password, Must Contain at least one Special Character(!?@#$%&)"
            ),
            ValidationError::MissingCredentials => write!(f, "Missing email or password"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Session and credential failures surfaced as unauthorized outcomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Token absent, empty, or unknown to the store.
    Missing,
    Expired,
    /// Unknown email or wrong password; deliberately indistinguishable.
    InvalidCredentials,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Missing => write!(f, "Missing or invalid auth token"),
            AuthError::Expired => write!(f, "Token expired"),
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors reported by external stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key being written already exists.
    Conflict(String),
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict(key) => write!(f, "Record already exists: {}", key),
            StoreError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Failures that are fatal for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    EntropyUnavailable(String),
    Store(StoreError),
    WorkerFailed(String),
    Io(String),
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::EntropyUnavailable(msg) => {
                write!(f, "Secure random source unavailable: {}", msg)
            }
            InternalError::Store(e) => write!(f, "{}", e),
            InternalError::WorkerFailed(msg) => write!(f, "Blocking worker failed: {}", msg),
            InternalError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for InternalError {}

impl From<io::Error> for InternalError {
    fn from(error: io::Error) -> Self {
        InternalError::Io(error.to_string())
    }
}

impl From<StoreError> for InternalError {
    fn from(error: StoreError) -> Self {
        InternalError::Store(error)
    }
}

/// Wire-level request errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    BodyTooLarge { limit: usize },
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::BodyTooLarge { limit } => {
                write!(f, "Request body too large (limit {} bytes)", limit)
            }
        }
    }
}

impl std::error::Error for WireError {}

/// Top-level error that encompasses all error kinds of the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    Validation(ValidationError),
    Auth(AuthError),
    Internal(InternalError),
    Wire(WireError),
    Conflict(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Validation(e) => write!(f, "{}", e),
            CoreError::Auth(e) => write!(f, "{}", e),
            CoreError::Internal(e) => write!(f, "Internal error: {}", e),
            CoreError::Wire(e) => write!(f, "{}", e),
            CoreError::Conflict(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<ValidationError> for CoreError {
    fn from(error: ValidationError) -> Self {
        CoreError::Validation(error)
    }
}

impl From<AuthError> for CoreError {
    fn from(error: AuthError) -> Self {
        CoreError::Auth(error)
    }
}

impl From<InternalError> for CoreError {
    fn from(error: InternalError) -> Self {
        CoreError::Internal(error)
    }
}

impl From<StoreError> for CoreError {
    fn from(error: StoreError) -> Self {
        CoreError::Internal(InternalError::Store(error))
    }
}

impl From<io::Error> for CoreError {
    fn from(error: io::Error) -> Self {
        CoreError::Internal(InternalError::from(error))
    }
}

impl From<WireError> for CoreError {
    fn from(error: WireError) -> Self {
        CoreError::Wire(error)
    }
}
