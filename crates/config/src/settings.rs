//! Runtime settings
//!
//! Every numeric limit the pipeline branches on is a named, typed, validated
//! field here; nothing reads ad hoc string maps at runtime.

use crate::ConfigError;
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings object supplied to the pipeline at construction.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// PIN attempt limiting.
    #[serde(default)]
    pub auth: AuthLimits,

    /// Risk evaluator thresholds.
    #[serde(default)]
    pub risk: RiskThresholds,
}

/// Attempt-limiting configuration for the authorization state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthLimits {
    /// Wrong, non-duress PIN submissions tolerated before blocking.
    /// Deliberately low: false-positive lockouts beat extended guessing.
    #[serde(default = "default_max_pin_attempts")]
    pub max_pin_attempts: u8,

    /// Ledger commit retries allowed after a `ServiceUnavailable` failure.
    #[serde(default = "default_commit_retry_limit")]
    pub commit_retry_limit: u8,
}

fn default_max_pin_attempts() -> u8 {
    2
}

fn default_commit_retry_limit() -> u8 {
    1
}

impl Default for AuthLimits {
    fn default() -> Self {
        Self {
            max_pin_attempts: default_max_pin_attempts(),
            commit_retry_limit: default_commit_retry_limit(),
        }
    }
}

/// Thresholds for the heuristic risk rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskThresholds {
    /// A transfer at or above this amount counts as "large" for the velocity rule.
    #[serde(default = "default_large_amount_threshold")]
    pub large_amount_threshold: Decimal,

    /// Trailing window for the velocity rule, in hours.
    #[serde(default = "default_velocity_window_hours")]
    pub velocity_window_hours: u32,

    /// More than this many transfers in the window is suspicious.
    #[serde(default = "default_velocity_count_limit")]
    pub velocity_count_limit: usize,

    /// More than this many *large* transfers in the window is suspicious.
    #[serde(default = "default_velocity_large_count_limit")]
    pub velocity_large_count_limit: usize,

    /// Single-transaction ceiling; amounts above 80% of it are flagged.
    #[serde(default = "default_max_transaction_ceiling")]
    pub max_transaction_ceiling: Decimal,
}

fn default_large_amount_threshold() -> Decimal {
    dec!(10_000)
}

fn default_velocity_window_hours() -> u32 {
    1
}

fn default_velocity_count_limit() -> usize {
    10
}

fn default_velocity_large_count_limit() -> usize {
    5
}

fn default_max_transaction_ceiling() -> Decimal {
    dec!(50_000)
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            large_amount_threshold: default_large_amount_threshold(),
            velocity_window_hours: default_velocity_window_hours(),
            velocity_count_limit: default_velocity_count_limit(),
            velocity_large_count_limit: default_velocity_large_count_limit(),
            max_transaction_ceiling: default_max_transaction_ceiling(),
        }
    }
}

impl Settings {
    /// Reject configurations the pipeline cannot run safely with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.max_pin_attempts == 0 {
            return Err(ConfigError::ValidationError(
                "auth.max_pin_attempts must be at least 1".into(),
            ));
        }
        if self.risk.velocity_window_hours == 0 {
            return Err(ConfigError::ValidationError(
                "risk.velocity_window_hours must be at least 1".into(),
            ));
        }
        if self.risk.large_amount_threshold <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "risk.large_amount_threshold must be positive".into(),
            ));
        }
        if self.risk.max_transaction_ceiling <= Decimal::ZERO {
            return Err(ConfigError::ValidationError(
                "risk.max_transaction_ceiling must be positive".into(),
            ));
        }
        if self.risk.max_transaction_ceiling < self.risk.large_amount_threshold {
            return Err(ConfigError::ValidationError(
                "risk.max_transaction_ceiling must be at least the large-amount threshold".into(),
            ));
        }
        Ok(())
    }
}

/// Load settings from an optional file plus `PAYVOICE_` environment overrides.
///
/// Missing file and empty environment yield the built-in defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        builder = builder.add_source(File::from(path));
    }

    let raw = builder
        .add_source(Environment::with_prefix("PAYVOICE").separator("__"))
        .build()?;

    let settings: Settings = raw.try_deserialize()?;
    settings.validate()?;

    tracing::debug!(
        max_pin_attempts = settings.auth.max_pin_attempts,
        velocity_window_hours = settings.risk.velocity_window_hours,
        "settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_documented_limits() {
        let settings = Settings::default();
        assert_eq!(settings.auth.max_pin_attempts, 2);
        assert_eq!(settings.risk.velocity_window_hours, 1);
        assert_eq!(settings.risk.velocity_count_limit, 10);
        assert_eq!(settings.risk.velocity_large_count_limit, 5);
        assert_eq!(settings.risk.large_amount_threshold, dec!(10_000));
        assert_eq!(settings.risk.max_transaction_ceiling, dec!(50_000));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut settings = Settings::default();
        settings.auth.max_pin_attempts = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut settings = Settings::default();
        settings.risk.max_transaction_ceiling = dec!(5_000);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "auth:\n  max_pin_attempts: 3\nrisk:\n  max_transaction_ceiling: 100000"
        )
        .unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.auth.max_pin_attempts, 3);
        assert_eq!(settings.risk.max_transaction_ceiling, dec!(100_000));
        // Unspecified fields keep defaults
        assert_eq!(settings.risk.velocity_count_limit, 10);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = load_settings(Some(Path::new("/nonexistent/payvoice.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
