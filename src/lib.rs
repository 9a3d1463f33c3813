//! Oddsedge - probabilistic betting-edge engine.
//!
//! Turns a model's predicted probability and bookmakers' quoted odds into
//! value assessments, fractional-Kelly stakes, cross-bookmaker arbitrage
//! plans, and post-hoc calibration and accuracy reports.
//!
//! # Architecture
//!
//! - **`domain`** - Pure calculators over immutable inputs
//!   - `ValueAssessor` / `ValueScanner` - edge, expected value, recommendation tier
//!   - `KellyStakeOptimizer` - risk-bounded stake sizing
//!   - `ArbitrageDetector` / `StakeAllocator` - guaranteed-profit books
//!   - `CalibrationTracker` / `accuracy_report` - resolved-outcome scoring
//! - **`application`** - `EdgeEngine`, the configured service facade
//! - **`infrastructure`** - TOML configuration and logging setup
//! - **`adapter`** - The `oddsedge` command-line interface
//!
//! # Example
//!
//! ```
//! use oddsedge::domain::{implied_probability, KellyFraction, KellyStakeOptimizer};
//! use rust_decimal_macros::dec;
//!
//! let implied = implied_probability(dec!(2.0)).unwrap();
//! assert_eq!(implied.value(), dec!(0.5));
//!
//! let model = oddsedge::domain::Probability::try_new(dec!(0.55)).unwrap();
//! let odds = oddsedge::domain::DecimalOdds::try_new(dec!(2.0)).unwrap();
//! let rec = KellyStakeOptimizer::default()
//!     .optimal_stake(model, odds, dec!(1000), KellyFraction::FULL)
//!     .unwrap();
//! assert_eq!(rec.stake, dec!(100));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
