//! Error handlers
//!
//! Logs errors and maps them onto the outcome class a transport should report.

use log::{error, warn};

use crate::error::types::CoreError;

pub const BAD_REQUEST: u16 = 400;
pub const UNAUTHORIZED: u16 = 401;
pub const CONFLICT: u16 = 409;
pub const PAYLOAD_TOO_LARGE: u16 = 413;
pub const SERVER_ERROR: u16 = 500;

/// Handle a core error
pub fn handle_error(err: &CoreError) {
    match err {
        CoreError::Internal(e) => error!("Internal failure: {}", e),
        CoreError::Wire(e) => warn!("Rejected request: {}", e),
        _ => {}
    }
}

/// Convert error to a status code
pub fn error_to_status(err: &CoreError) -> u16 {
    match err {
        CoreError::Validation(_) => BAD_REQUEST,
        CoreError::Auth(_) => UNAUTHORIZED,
        CoreError::Conflict(_) => CONFLICT,
        CoreError::Wire(_) => PAYLOAD_TOO_LARGE,
        CoreError::Internal(_) => SERVER_ERROR,
    }
}

/// Message that is safe to put in a response body
///
/// Internal failures collapse to a generic message so store and entropy
/// details never reach the client.
pub fn client_message(err: &CoreError) -> String {
    match err {
        CoreError::Internal(_) => "Server error".to_string(),
        other => other.to_string(),
    }
}
