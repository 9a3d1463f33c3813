//! Betting-edge engine service.
//!
//! Wires the configured domain calculators together and exposes the
//! operations an outer layer (CLI, HTTP) calls. The engine holds only
//! immutable settings, so one instance can be shared across threads.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::accuracy::{accuracy_report, AccuracyFilter, AccuracyReport, GroupDimension};
use crate::domain::allocation::{StakeAllocator, StakePlan};
use crate::domain::arbitrage::{rank_by_margin, ArbitrageDetector, ArbitrageOpportunity};
use crate::domain::calibration::{calibration_report, CalibrationReport};
use crate::domain::error::DomainError;
use crate::domain::factor::{explain, Explanation};
use crate::domain::kelly::{KellyFraction, KellyStakeOptimizer, StakeRecommendation};
use crate::domain::odds_math::{market_efficiency, MarketEfficiency};
use crate::domain::value::{ValueAssessment, ValueAssessor, ValueScanner};
use crate::domain::{
    DecimalOdds, MarketQuotes, Money, OddsQuote, Prediction, Probability, ResolvedPrediction,
};
use crate::infrastructure::config::settings::Config;

/// Configured entry point to every engine operation.
#[derive(Debug, Clone, Default)]
pub struct EdgeEngine {
    scanner: ValueScanner,
    optimizer: KellyStakeOptimizer,
    default_fraction: KellyFraction,
    detector: ArbitrageDetector,
    allocator: StakeAllocator,
}

impl EdgeEngine {
    /// Build an engine from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            scanner: ValueScanner::from(&config.value),
            optimizer: KellyStakeOptimizer::from(&config.kelly),
            default_fraction: config.kelly.risk_level.into(),
            detector: ArbitrageDetector::from(&config.arbitrage),
            allocator: StakeAllocator::from(&config.allocation),
        }
    }

    /// Kelly multiplier used when a caller does not pick one.
    #[must_use]
    pub const fn default_fraction(&self) -> KellyFraction {
        self.default_fraction
    }

    /// Assess one prediction against one quote.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleInputs`] for mismatched pairs.
    pub fn assess_value(
        &self,
        prediction: &Prediction,
        quote: &OddsQuote,
    ) -> Result<ValueAssessment, DomainError> {
        let assessment = ValueAssessor.assess(prediction, quote)?;
        debug!(
            prediction_id = %assessment.prediction_id,
            bookmaker = %assessment.bookmaker,
            edge = %assessment.edge,
            tier = %assessment.recommendation_tier,
            "Value assessed"
        );
        Ok(assessment)
    }

    /// Find value bets across predictions and quotes.
    #[must_use]
    pub fn scan_value(&self, predictions: &[Prediction], quotes: &[OddsQuote]) -> Vec<ValueAssessment> {
        let hits = self.scanner.scan(predictions, quotes);
        info!(
            predictions = predictions.len(),
            quotes = quotes.len(),
            hits = hits.len(),
            min_expected_value = %self.scanner.min_expected_value(),
            "Value scan complete"
        );
        hits
    }

    /// Size a stake for a probability and price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBankroll`] when `bankroll <= 0`.
    pub fn optimal_stake(
        &self,
        probability: Probability,
        odds: DecimalOdds,
        bankroll: Money,
        fraction: Option<KellyFraction>,
    ) -> Result<StakeRecommendation, DomainError> {
        let fraction = fraction.unwrap_or(self.default_fraction);
        let rec = self.optimizer.optimal_stake(probability, odds, bankroll, fraction)?;
        self.log_stake(&rec, bankroll);
        Ok(rec)
    }

    /// Size a stake for an assessed bet.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBankroll`] when `bankroll <= 0`.
    pub fn stake_for(
        &self,
        assessment: &ValueAssessment,
        bankroll: Money,
        fraction: Option<KellyFraction>,
    ) -> Result<StakeRecommendation, DomainError> {
        let fraction = fraction.unwrap_or(self.default_fraction);
        let rec = self.optimizer.from_assessment(assessment, bankroll, fraction)?;
        self.log_stake(&rec, bankroll);
        Ok(rec)
    }

    fn log_stake(&self, rec: &StakeRecommendation, bankroll: Money) {
        if rec.high_stake_warning {
            warn!(
                stake = %rec.stake,
                bankroll = %bankroll,
                share = %rec.bankroll_fraction,
                "Stake exceeds cautionary share of bankroll"
            );
        } else {
            debug!(stake = %rec.stake, full_kelly = %rec.full_kelly, "Stake sized");
        }
    }

    /// Detect an arbitrage in one market.
    #[must_use]
    pub fn detect_arbitrage(
        &self,
        market: &MarketQuotes,
        as_of: DateTime<Utc>,
    ) -> Option<ArbitrageOpportunity> {
        match self.detector.evaluate(market, as_of) {
            Ok(opportunity) => {
                info!(
                    event_id = %opportunity.event_id,
                    market_id = %opportunity.market_id,
                    margin = %opportunity.profit_margin,
                    roi = %opportunity.roi,
                    "Arbitrage detected"
                );
                Some(opportunity)
            }
            Err(reason) => {
                debug!(
                    event_id = %market.event_id(),
                    market_id = %market.market_id(),
                    reason = %reason,
                    "Market skipped"
                );
                None
            }
        }
    }

    /// Detect across many markets, best margin first.
    #[must_use]
    pub fn scan_arbitrage(
        &self,
        markets: &[MarketQuotes],
        as_of: DateTime<Utc>,
    ) -> Vec<ArbitrageOpportunity> {
        let mut found: Vec<ArbitrageOpportunity> = markets
            .iter()
            .filter_map(|m| self.detect_arbitrage(m, as_of))
            .collect();
        rank_by_margin(&mut found);
        found
    }

    /// Split a bankroll across an opportunity's legs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NoOpportunity`] or
    /// [`DomainError::InvalidBankroll`].
    pub fn allocate_stakes(
        &self,
        opportunity: &ArbitrageOpportunity,
        bankroll: Money,
    ) -> Result<StakePlan, DomainError> {
        let plan = self.allocator.allocate(opportunity, bankroll)?;
        info!(
            market_id = %opportunity.market_id,
            total_stake = %plan.total_stake,
            guaranteed_profit = %plan.guaranteed_profit,
            "Stakes allocated"
        );
        Ok(plan)
    }

    /// Margin diagnostics for one market.
    #[must_use]
    pub fn market_efficiency(&self, market: &MarketQuotes) -> MarketEfficiency {
        market_efficiency(market)
    }

    /// Reliability curve and Brier score.
    #[must_use]
    pub fn calibration_report(&self, resolved: &[ResolvedPrediction]) -> CalibrationReport {
        let report = calibration_report(resolved);
        if report.is_empty() {
            debug!("Calibration requested over an empty resolved set");
        }
        report
    }

    /// Accuracy snapshots grouped by the given dimensions.
    #[must_use]
    pub fn accuracy_report(
        &self,
        resolved: &[ResolvedPrediction],
        group_by: &[GroupDimension],
        filter: &AccuracyFilter,
    ) -> AccuracyReport {
        accuracy_report(resolved, group_by, filter)
    }

    /// Human-readable explanation of a prediction.
    #[must_use]
    pub fn explain(&self, prediction: &Prediction) -> Explanation {
        explain(&prediction.factors)
    }
}
