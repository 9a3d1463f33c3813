//! Stake allocation configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::allocation::{StakeAllocator, DEFAULT_MIN_STAKE_UNIT};

/// Stake allocation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    /// Smallest currency unit a stake is rounded down to.
    #[serde(default = "default_min_stake_unit")]
    pub min_stake_unit: Decimal,
}

fn default_min_stake_unit() -> Decimal {
    DEFAULT_MIN_STAKE_UNIT
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            min_stake_unit: default_min_stake_unit(),
        }
    }
}

impl From<&AllocationConfig> for StakeAllocator {
    fn from(config: &AllocationConfig) -> Self {
        Self::new(config.min_stake_unit)
    }
}
