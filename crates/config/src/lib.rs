//! Configuration management for the shopping agent
//!
//! Supports loading configuration from:
//! - TOML/JSON files under `config/`
//! - Environment variables (SHOP_AGENT__ prefix, `__` separator)
//!
//! All fields carry serde defaults, so an empty configuration is valid.

pub mod settings;

pub use settings::{
    load_settings, RetrySettings, ServerSettings, Settings, StoreSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
