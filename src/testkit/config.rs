//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use rust_decimal::Decimal;

use crate::infrastructure::config::allocation::AllocationConfig;
use crate::infrastructure::config::arbitrage::ArbitrageConfig;
use crate::infrastructure::config::settings::Config;

/// Defaults everywhere.
pub fn defaults() -> Config {
    Config::default()
}

/// Arbitrage windows wide enough that fixture timestamps never go stale.
pub fn relaxed_arbitrage() -> ArbitrageConfig {
    ArbitrageConfig {
        max_quote_age_secs: 86_400,
        max_quote_skew_secs: 86_400,
        ..ArbitrageConfig::default()
    }
}

/// Allocation without rounding, for exact payout equality checks.
pub fn unrounded_allocation() -> AllocationConfig {
    AllocationConfig {
        min_stake_unit: Decimal::ZERO,
    }
}
