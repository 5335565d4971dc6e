//! Utility functions
//!
//! Logging setup shared by hosts and tests.

pub mod logging;

pub use logging::{setup_logging, setup_test_logging};
