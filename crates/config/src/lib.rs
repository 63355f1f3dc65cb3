//! Configuration for the voice payments pipeline
//!
//! Supports loading configuration from:
//! - YAML/TOML files
//! - Environment variables (`PAYVOICE_` prefix)
//! - Built-in defaults matching the documented limits
//!
//! Besides runtime settings, this crate carries the static language assets:
//! per-language intent phrase sets, the gambling/keyword lexicon, the
//! suspicious-recipient denylist, and localized response templates.

pub mod lexicon;
pub mod phrases;
pub mod responses;
pub mod settings;

pub use lexicon::{Lexicon, RECIPIENT_DENYLIST};
pub use phrases::IntentPhrases;
pub use responses::{ResponseKey, ResponseTemplates};
pub use settings::{load_settings, AuthLimits, RiskThresholds, Settings};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
