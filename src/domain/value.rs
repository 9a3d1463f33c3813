//! Value assessment: model probability against market price.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{Bookmaker, EventId, MarketId, PredictionId, Selection};
use super::odds::{best_quote, DecimalOdds, OddsQuote};
use super::odds_math::implied;
use super::prediction::Prediction;
use super::probability::Probability;

/// Discrete recommendation derived from edge in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationTier {
    Avoid,
    Hold,
    Buy,
    StrongBuy,
}

impl RecommendationTier {
    /// Classify an edge. Thresholds are inclusive on the lower bound.
    #[must_use]
    pub fn from_edge(edge: Decimal) -> Self {
        let points = edge * Decimal::ONE_HUNDRED;
        if points >= dec!(10) {
            Self::StrongBuy
        } else if points >= dec!(5) {
            Self::Buy
        } else if points >= Decimal::ZERO {
            Self::Hold
        } else {
            Self::Avoid
        }
    }
}

impl fmt::Display for RecommendationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::StrongBuy => "STRONG_BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Avoid => "AVOID",
        };
        f.write_str(label)
    }
}

/// Result of comparing one prediction with one quote. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueAssessment {
    pub prediction_id: PredictionId,
    pub event_id: EventId,
    pub market_id: MarketId,
    pub selection: Selection,
    pub bookmaker: Bookmaker,
    pub decimal_odds: DecimalOdds,
    pub predicted_probability: Probability,
    pub implied_probability: Probability,
    /// `predicted - implied`.
    pub edge: Decimal,
    /// `predicted * odds - 1`, as a fraction of stake.
    pub expected_value: Decimal,
    pub recommendation_tier: RecommendationTier,
}

impl ValueAssessment {
    /// True when the model sees any positive edge.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.edge > Decimal::ZERO
    }
}

/// Stateless assessor for a single prediction/quote pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueAssessor;

impl ValueAssessor {
    /// Assess `quote` against `prediction`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleInputs`] when the two do not
    /// reference the same event, market and selection.
    pub fn assess(
        &self,
        prediction: &Prediction,
        quote: &OddsQuote,
    ) -> Result<ValueAssessment, DomainError> {
        prediction.ensure_matches(quote)?;

        let predicted = prediction.predicted_probability;
        let implied = implied(quote.decimal_odds());
        let edge = predicted.value() - implied.value();
        let expected_value = predicted.value() * quote.decimal_odds().value() - Decimal::ONE;

        Ok(ValueAssessment {
            prediction_id: prediction.id.clone(),
            event_id: prediction.event_id.clone(),
            market_id: prediction.market_id.clone(),
            selection: prediction.selection.clone(),
            bookmaker: quote.bookmaker().clone(),
            decimal_odds: quote.decimal_odds(),
            predicted_probability: predicted,
            implied_probability: implied,
            edge,
            expected_value,
            recommendation_tier: RecommendationTier::from_edge(edge),
        })
    }
}

/// Default minimum expected value for a scan hit.
pub const DEFAULT_MIN_EXPECTED_VALUE: Decimal = dec!(0.05);

/// Finds value bets across many predictions and quotes.
#[derive(Debug, Clone, Copy)]
pub struct ValueScanner {
    min_expected_value: Decimal,
}

impl Default for ValueScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_EXPECTED_VALUE)
    }
}

impl ValueScanner {
    #[must_use]
    pub const fn new(min_expected_value: Decimal) -> Self {
        Self { min_expected_value }
    }

    #[must_use]
    pub const fn min_expected_value(&self) -> Decimal {
        self.min_expected_value
    }

    /// Assess each prediction at its best available price.
    ///
    /// Predictions with no matching quote are skipped. Results at or above
    /// the expected-value floor are returned, highest expected value first.
    #[must_use]
    pub fn scan(&self, predictions: &[Prediction], quotes: &[OddsQuote]) -> Vec<ValueAssessment> {
        let assessor = ValueAssessor;
        let mut hits: Vec<ValueAssessment> = predictions
            .iter()
            .filter_map(|prediction| {
                let best = best_quote(quotes.iter().filter(|q| prediction.matches(q)))?;
                assessor.assess(prediction, best).ok()
            })
            .filter(|a| a.expected_value >= self.min_expected_value)
            .collect();

        hits.sort_by(|a, b| {
            b.expected_value
                .cmp(&a.expected_value)
                .then_with(|| a.prediction_id.cmp(&b.prediction_id))
        });
        hits
    }
}
