//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerSettings,

    /// Catalog store configuration
    #[serde(default)]
    pub store: StoreSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty defaults to localhost
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            cors_enabled: true,
        }
    }
}

/// Catalog store connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Base URL of the REST endpoint
    #[serde(default = "default_store_url")]
    pub url: String,

    /// API key; usually supplied via SHOP_AGENT__STORE__API_KEY
    #[serde(default)]
    pub api_key: String,

    /// Table holding the phone rows
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry policy for transient store failures
    #[serde(default)]
    pub retry: RetrySettings,
}

fn default_store_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_table() -> String {
    "phones".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
            retry: RetrySettings::default(),
        }
    }
}

/// Retry policy knobs, read once at startup and immutable after
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the second attempt; doubles each retry
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Upper bound for the exponential part of the delay
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    4000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.url".to_string(),
                message: "store URL must not be empty".to_string(),
            });
        }
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.store.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.retry.max_attempts".to_string(),
                message: "at least one attempt is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from `config/default`, an optional environment-specific
/// file, and `SHOP_AGENT`-prefixed environment variables.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder = builder
            .add_source(File::with_name(&format!("config/{env_name}")).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("SHOP_AGENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.store.table, "phones");
        assert_eq!(settings.store.retry.max_attempts, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut settings = Settings::default();
        settings.store.retry.max_attempts = 0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_store_url_rejected() {
        let mut settings = Settings::default();
        settings.store.url = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
