//! Configuration management for the CrowdTruth core
//!
//! Built-in defaults, then an optional TOML file, then `CROWDTRUTH__*`
//! environment variables. The KDF work factor, salt size and token TTL are
//! compile-time constants.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use log::LevelFilter;
use serde::Deserialize;

use crate::validate::PasswordRule;

/// Default request body limit, 1 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default number of concurrent password derivations
pub const DEFAULT_KDF_CONCURRENCY: usize = 8;

const ENV_PREFIX: &str = "CROWDTRUTH";

/// Complete core configuration
#[derive(Debug, Deserialize, Clone)]
pub struct CoreConfig {
    pub auth: AuthConfig,
    pub wire: WireConfig,
    pub logging: LoggingConfig,
}

/// Credential and session settings
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Special-character rule applied at registration
    /// Environment: CROWDTRUTH__AUTH__PASSWORD_RULE
    pub password_rule: PasswordRule,

    /// Upper bound on KDF jobs running at once; each costs hundreds of
    /// milliseconds of CPU, so this bounds safe request concurrency
    /// Environment: CROWDTRUTH__AUTH__KDF_CONCURRENCY
    pub kdf_concurrency: usize,
}

/// Request body settings
#[derive(Debug, Deserialize, Clone)]
pub struct WireConfig {
    pub max_body_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default filter; `RUST_LOG` still takes precedence
    pub level: String,
}

impl CoreConfig {
    /// Load from `crowdtruth/config.toml` or `config.toml` (both optional)
    /// with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let builder = defaults()?
            .add_source(File::with_name("crowdtruth/config").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        Self::from_builder(builder)
    }

    /// Load from an in-memory TOML document layered over the defaults
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::from_builder(defaults()?.add_source(File::from_str(toml, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: CoreConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.kdf_concurrency == 0 {
            return Err(ConfigError::Message(
                "auth.kdf_concurrency must be greater than 0".into(),
            ));
        }

        if self.wire.max_body_bytes == 0 {
            return Err(ConfigError::Message(
                "wire.max_body_bytes must be greater than 0".into(),
            ));
        }

        if self.logging.level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::Message(format!(
                "logging.level '{}' is not a valid level",
                self.logging.level
            )));
        }

        Ok(())
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig {
                password_rule: PasswordRule::default(),
                kdf_concurrency: DEFAULT_KDF_CONCURRENCY,
            },
            wire: WireConfig {
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("auth.password_rule", "literal")?
        .set_default("auth.kdf_concurrency", DEFAULT_KDF_CONCURRENCY as i64)?
        .set_default("wire.max_body_bytes", DEFAULT_MAX_BODY_BYTES as i64)?
        .set_default("logging.level", "info")
}
