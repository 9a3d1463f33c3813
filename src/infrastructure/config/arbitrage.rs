//! Arbitrage detection configuration.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::arbitrage::{ArbitrageDetector, ArbitrageLimits};

/// Arbitrage detection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArbitrageConfig {
    /// Minimum profit margin to report (e.g., 0.01 = 1%).
    #[serde(default)]
    pub min_profit_margin: Decimal,
    /// Maximum quote age in seconds (default: 300).
    #[serde(default = "default_max_quote_age_secs")]
    pub max_quote_age_secs: u64,
    /// Maximum spread between leg observation times in seconds (default: 60).
    #[serde(default = "default_max_quote_skew_secs")]
    pub max_quote_skew_secs: u64,
}

const fn default_max_quote_age_secs() -> u64 {
    300
}

const fn default_max_quote_skew_secs() -> u64 {
    60
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            min_profit_margin: Decimal::ZERO,
            max_quote_age_secs: default_max_quote_age_secs(),
            max_quote_skew_secs: default_max_quote_skew_secs(),
        }
    }
}

/// Longest window accepted by validation (one year).
pub const MAX_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

fn seconds(secs: u64) -> Duration {
    Duration::seconds(secs.min(MAX_WINDOW_SECS) as i64)
}

impl From<&ArbitrageConfig> for ArbitrageLimits {
    fn from(config: &ArbitrageConfig) -> Self {
        Self {
            min_profit_margin: config.min_profit_margin,
            max_quote_age: seconds(config.max_quote_age_secs),
            max_quote_skew: seconds(config.max_quote_skew_secs),
        }
    }
}

impl From<&ArbitrageConfig> for ArbitrageDetector {
    fn from(config: &ArbitrageConfig) -> Self {
        Self::new(ArbitrageLimits::from(config))
    }
}
