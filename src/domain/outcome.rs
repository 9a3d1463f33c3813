//! Resolved outcomes and their join with predictions.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::PredictionId;
use super::prediction::Prediction;

/// How a bet settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BetResult {
    Won,
    Lost,
    /// Refunded; excluded from every score.
    Void,
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => write!(f, "WON"),
            Self::Lost => write!(f, "LOST"),
            Self::Void => write!(f, "VOID"),
        }
    }
}

/// Settlement of one prediction, created once when the event finishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedOutcome {
    pub prediction_id: PredictionId,
    pub actual_result: BetResult,
    pub resolved_at: DateTime<Utc>,
}

/// A prediction paired with its settlement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrediction {
    prediction: Prediction,
    outcome: ResolvedOutcome,
}

impl ResolvedPrediction {
    /// Join a prediction with its outcome.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::IncompatibleInputs`] if the outcome settles a
    /// different prediction.
    pub fn try_new(prediction: Prediction, outcome: ResolvedOutcome) -> Result<Self, DomainError> {
        if prediction.id != outcome.prediction_id {
            return Err(DomainError::incompatible(format!(
                "outcome for prediction {} joined with prediction {}",
                outcome.prediction_id, prediction.id
            )));
        }
        Ok(Self {
            prediction,
            outcome,
        })
    }

    #[must_use]
    pub const fn prediction(&self) -> &Prediction {
        &self.prediction
    }

    #[must_use]
    pub const fn outcome(&self) -> &ResolvedOutcome {
        &self.outcome
    }

    #[must_use]
    pub fn predicted(&self) -> Decimal {
        self.prediction.predicted_probability.value()
    }

    /// 1 for a win, 0 for a loss, `None` for a void.
    #[must_use]
    pub fn actual_probability(&self) -> Option<Decimal> {
        match self.outcome.actual_result {
            BetResult::Won => Some(Decimal::ONE),
            BetResult::Lost => Some(Decimal::ZERO),
            BetResult::Void => None,
        }
    }

    /// Whether this settlement counts toward any score.
    #[must_use]
    pub fn is_scored(&self) -> bool {
        self.outcome.actual_result != BetResult::Void
    }

    /// Won above 0.5 or lost below 0.5. A prediction of exactly 0.5 is
    /// never correct.
    #[must_use]
    pub fn is_correct(&self) -> bool {
        let p = self.predicted();
        match self.outcome.actual_result {
            BetResult::Won => p > dec!(0.5),
            BetResult::Lost => p < dec!(0.5),
            BetResult::Void => false,
        }
    }

    /// `1 - |predicted - actual|`, `None` for a void.
    #[must_use]
    pub fn accuracy_score(&self) -> Option<Decimal> {
        self.actual_probability()
            .map(|actual| Decimal::ONE - (self.predicted() - actual).abs())
    }

    /// Squared error against the outcome, `None` for a void.
    #[must_use]
    pub fn squared_error(&self) -> Option<Decimal> {
        self.actual_probability().map(|actual| {
            let diff = self.predicted() - actual;
            diff * diff
        })
    }
}

/// Join predictions with outcomes by prediction id.
///
/// Outcomes with no matching prediction are returned separately so the
/// caller can report them.
#[must_use]
pub fn join_outcomes(
    predictions: Vec<Prediction>,
    outcomes: Vec<ResolvedOutcome>,
) -> (Vec<ResolvedPrediction>, Vec<ResolvedOutcome>) {
    let mut by_id: std::collections::HashMap<PredictionId, Prediction> = predictions
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let mut joined = Vec::with_capacity(outcomes.len());
    let mut orphaned = Vec::new();
    for outcome in outcomes {
        match by_id.remove(&outcome.prediction_id) {
            Some(prediction) => joined.push(ResolvedPrediction {
                prediction,
                outcome,
            }),
            None => orphaned.push(outcome),
        }
    }
    (joined, orphaned)
}
