//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration for credential storage
//! - `environment` - Environment detection and logging configuration
//! - `mail` - SMTP relay configuration for code delivery

pub mod cache;
pub mod environment;
pub mod mail;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::SmtpConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Redis cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// SMTP delivery configuration
    #[serde(default)]
    pub mail: SmtpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            cache: CacheConfig::default(),
            mail: SmtpConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            cache: CacheConfig::default(),
            mail: SmtpConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            cache: CacheConfig::from_env().with_prefix("mailcode"),
            mail: SmtpConfig::from_env(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();
        Self {
            environment: env,
            cache: CacheConfig::from_env(),
            mail: SmtpConfig::from_env(),
            logging: LoggingConfig::for_environment(env),
        }
    }

    /// Load configuration from the environment-specific TOML file,
    /// overridden by `MAILCODE__`-prefixed environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        let env = Environment::from_env();

        let loaded = config::Config::builder()
            .add_source(config::File::with_name(env.config_file()).required(false))
            .add_source(config::Environment::with_prefix("MAILCODE").separator("__"))
            .build()?;

        let mut app: AppConfig = loaded.try_deserialize()?;
        app.environment = env;
        Ok(app)
    }
}
