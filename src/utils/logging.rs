//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

use crate::config::LoggingConfig;

/// Setup logging for an embedding host.
///
/// The configured level is the default filter; `RUST_LOG` overrides it.
/// Calling this more than once is harmless.
pub fn setup_logging(config: &LoggingConfig) {
    let env = Env::default().default_filter_or(config.level.as_str());
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}

/// Logging for tests: captured by the test harness, never fails
pub fn setup_test_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
