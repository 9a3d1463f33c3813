//! Kelly staking configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::kelly::{KellyStakeOptimizer, RiskLevel, DEFAULT_HIGH_STAKE_THRESHOLD};

/// Kelly staking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KellyConfig {
    /// Default risk dial when a command does not pass `--fraction`.
    #[serde(default)]
    pub risk_level: RiskLevel,
    /// Stake share of bankroll above which a warning is attached.
    #[serde(default = "default_high_stake_threshold")]
    pub high_stake_threshold: Decimal,
}

fn default_high_stake_threshold() -> Decimal {
    DEFAULT_HIGH_STAKE_THRESHOLD
}

impl Default for KellyConfig {
    fn default() -> Self {
        Self {
            risk_level: RiskLevel::default(),
            high_stake_threshold: default_high_stake_threshold(),
        }
    }
}

impl From<&KellyConfig> for KellyStakeOptimizer {
    fn from(config: &KellyConfig) -> Self {
        Self::new(config.high_stake_threshold)
    }
}
