//! Model predictions consumed read-only by the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::factor::Factor;
use super::id::{EventId, MarketId, PredictionId, Selection};
use super::odds::OddsQuote;
use super::probability::{Confidence, Probability};

/// A model's probability estimate for one selection.
///
/// `sport` and `market_type` are carried for accuracy scoping; `factors`
/// exist only for human-readable explanation and are never read by the
/// numeric core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub id: PredictionId,
    pub event_id: EventId,
    pub market_id: MarketId,
    pub selection: Selection,
    pub predicted_probability: Probability,
    pub confidence: Confidence,
    pub model_version: String,
    #[serde(default)]
    pub sport: String,
    #[serde(default)]
    pub market_type: String,
    #[serde(default)]
    pub factors: Vec<Factor>,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    /// Check that `quote` prices the same event, market and selection.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleInputs`] naming the first mismatch.
    pub fn ensure_matches(&self, quote: &OddsQuote) -> Result<(), DomainError> {
        if &self.event_id != quote.event_id() {
            return Err(DomainError::incompatible(format!(
                "prediction event {} != quote event {}",
                self.event_id,
                quote.event_id()
            )));
        }
        if &self.market_id != quote.market_id() {
            return Err(DomainError::incompatible(format!(
                "prediction market {} != quote market {}",
                self.market_id,
                quote.market_id()
            )));
        }
        if &self.selection != quote.selection() {
            return Err(DomainError::incompatible(format!(
                "prediction selection {} != quote selection {}",
                self.selection,
                quote.selection()
            )));
        }
        Ok(())
    }

    /// True when `quote` prices this prediction's selection.
    #[must_use]
    pub fn matches(&self, quote: &OddsQuote) -> bool {
        self.ensure_matches(quote).is_ok()
    }
}
