//! Value scanning configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value::{ValueScanner, DEFAULT_MIN_EXPECTED_VALUE};

/// Value scanning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueConfig {
    /// Minimum expected value (fraction of stake) for a scan hit.
    #[serde(default = "default_min_expected_value")]
    pub min_expected_value: Decimal,
}

fn default_min_expected_value() -> Decimal {
    DEFAULT_MIN_EXPECTED_VALUE
}

impl Default for ValueConfig {
    fn default() -> Self {
        Self {
            min_expected_value: default_min_expected_value(),
        }
    }
}

impl From<&ValueConfig> for ValueScanner {
    fn from(config: &ValueConfig) -> Self {
        Self::new(config.min_expected_value)
    }
}
