//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all engine settings.
//! Every section is optional; a missing section takes its defaults.
//!
//! # Example
//!
//! ```no_run
//! use oddsedge::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocation::AllocationConfig;
use super::arbitrage::{ArbitrageConfig, MAX_WINDOW_SECS};
use super::kelly::KellyConfig;
use super::logging::LoggingConfig;
use super::value::ValueConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Value scanning thresholds.
    #[serde(default)]
    pub value: ValueConfig,

    /// Kelly staking defaults.
    #[serde(default)]
    pub kelly: KellyConfig,

    /// Arbitrage detection thresholds and staleness windows.
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,

    /// Stake allocation rounding.
    #[serde(default)]
    pub allocation: AllocationConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| {
            ConfigError::InvalidValue {
                field: "config",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validate configuration values.
    ///
    /// Checks that all values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be \"pretty\" or \"json\", got \"{}\"", self.logging.format),
            }
            .into());
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "logging.level",
            }
            .into());
        }

        if self.value.min_expected_value < -Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "value.min_expected_value",
                reason: "must be -1 or greater".to_string(),
            }
            .into());
        }

        let threshold = self.kelly.high_stake_threshold;
        if threshold <= Decimal::ZERO || threshold > Decimal::ONE {
            return Err(ConfigError::InvalidValue {
                field: "kelly.high_stake_threshold",
                reason: "must be between 0 (exclusive) and 1".to_string(),
            }
            .into());
        }

        let arbitrage = &self.arbitrage;
        if arbitrage.min_profit_margin < Decimal::ZERO || arbitrage.min_profit_margin >= Decimal::ONE
        {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage.min_profit_margin",
                reason: "must be between 0 and 1".to_string(),
            }
            .into());
        }
        if arbitrage.max_quote_age_secs == 0 || arbitrage.max_quote_age_secs > MAX_WINDOW_SECS {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage.max_quote_age_secs",
                reason: format!("must be between 1 and {MAX_WINDOW_SECS}"),
            }
            .into());
        }
        if arbitrage.max_quote_skew_secs > arbitrage.max_quote_age_secs {
            return Err(ConfigError::InvalidValue {
                field: "arbitrage.max_quote_skew_secs",
                reason: "must be <= max_quote_age_secs".to_string(),
            }
            .into());
        }

        if self.allocation.min_stake_unit < Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "allocation.min_stake_unit",
                reason: "must be 0 or greater".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kelly::RiskLevel;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.value.min_expected_value, dec!(0.05));
        assert_eq!(config.kelly.risk_level, RiskLevel::Moderate);
        assert_eq!(config.arbitrage.max_quote_age_secs, 300);
        assert_eq!(config.allocation.min_stake_unit, dec!(0.01));
    }

    #[test]
    fn sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
[kelly]
risk_level = "conservative"
high_stake_threshold = 0.1

[arbitrage]
min_profit_margin = 0.01
max_quote_skew_secs = 30
"#,
        )
        .unwrap();
        assert_eq!(config.kelly.risk_level, RiskLevel::Conservative);
        assert_eq!(config.kelly.high_stake_threshold, dec!(0.1));
        assert_eq!(config.arbitrage.min_profit_margin, dec!(0.01));
        assert_eq!(config.arbitrage.max_quote_skew_secs, 30);
        assert_eq!(config.arbitrage.max_quote_age_secs, 300);
    }

    #[test]
    fn rejects_bad_logging_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_skew_wider_than_age() {
        let result = Config::parse_toml(
            "[arbitrage]\nmax_quote_age_secs = 30\nmax_quote_skew_secs = 60\n",
        );
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "arbitrage.max_quote_skew_secs",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_risk_level() {
        let result = Config::parse_toml("[kelly]\nrisk_level = \"reckless\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn effective_config_renders_as_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[arbitrage]"));
        assert_eq!(Config::parse_toml(&rendered).unwrap(), Config::default());
    }
}
