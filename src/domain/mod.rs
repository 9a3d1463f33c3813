//! Betting-edge domain logic.
//!
//! Every operation here is a pure function of its arguments: no I/O, no
//! shared state, safe to call from any thread.

pub mod accuracy;
pub mod allocation;
pub mod arbitrage;
pub mod calibration;
pub mod error;
pub mod factor;
pub mod kelly;
pub mod odds_math;
pub mod value;

mod id;
mod money;
mod odds;
mod outcome;
mod prediction;
mod probability;

pub use id::{Bookmaker, EventId, MarketId, PredictionId, Selection};
pub use money::{floor_to_unit, Money};
pub use odds::{best_quote, DecimalOdds, MarketQuotes, OddsQuote};
pub use outcome::{join_outcomes, BetResult, ResolvedOutcome, ResolvedPrediction};
pub use prediction::Prediction;
pub use probability::{Confidence, Probability, MAX_CONFIDENCE, MIN_CONFIDENCE};

pub use accuracy::{
    accuracy_report, AccuracyFilter, AccuracyReport, AccuracySnapshot, GroupDimension, ScopeKey,
};
pub use allocation::{AllocatedStake, StakeAllocator, StakePlan};
pub use arbitrage::{ArbitrageDetector, ArbitrageLeg, ArbitrageLimits, ArbitrageOpportunity};
pub use calibration::{calibration_report, CalibrationBin, CalibrationReport, CalibrationTracker};
pub use factor::{explain, Explanation, Factor, KnownFactor, Severity};
pub use kelly::{KellyFraction, KellyStakeOptimizer, RiskLevel, StakeRecommendation};
pub use odds_math::{implied_probability, market_efficiency, normalize_overround, overround};
pub use value::{RecommendationTier, ValueAssessment, ValueAssessor, ValueScanner};
