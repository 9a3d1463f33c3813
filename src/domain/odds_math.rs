//! Pure conversions between decimal odds and probabilities.
//!
//! Edge and arbitrage computations always use raw implied probabilities.
//! Normalization removes the bookmaker margin and is for diagnostics only.

use rust_decimal::Decimal;
use serde::Serialize;

use super::error::DomainError;
use super::id::Selection;
use super::odds::{best_quote, DecimalOdds, MarketQuotes};
use super::probability::Probability;

/// `1 / odds`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidOdds`] when `odds <= 1.0`.
pub fn implied_probability(odds: Decimal) -> Result<Probability, DomainError> {
    Ok(implied(DecimalOdds::try_new(odds)?))
}

/// `1 / odds` for already validated odds.
#[must_use]
pub fn implied(odds: DecimalOdds) -> Probability {
    Probability::clamped(Decimal::ONE / odds.value())
}

/// Scale probabilities so they sum to 1.
///
/// A list summing to zero is returned unchanged.
#[must_use]
pub fn normalize_overround(probabilities: &[Probability]) -> Vec<Probability> {
    let total: Decimal = probabilities.iter().map(|p| p.value()).sum();
    if total.is_zero() {
        return probabilities.to_vec();
    }
    probabilities
        .iter()
        .map(|p| Probability::clamped(p.value() / total))
        .collect()
}

/// `Σp - 1`: the bookmaker margin. Negative for an arbitrage book.
#[must_use]
pub fn overround(probabilities: &[Probability]) -> Decimal {
    probabilities.iter().map(|p| p.value()).sum::<Decimal>() - Decimal::ONE
}

/// Best-price view of a single outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePrice {
    pub selection: Selection,
    pub best_odds: DecimalOdds,
    pub implied_probability: Probability,
    pub fair_probability: Probability,
}

/// How much margin a market carries at its best prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEfficiency {
    pub outcomes: Vec<OutcomePrice>,
    pub total_implied_probability: Decimal,
    pub overround: Decimal,
    /// Declared outcomes with no quote at all.
    pub unquoted: Vec<Selection>,
}

/// Summarize a market's margin using the best price per outcome.
#[must_use]
pub fn market_efficiency(market: &MarketQuotes) -> MarketEfficiency {
    let mut quoted = Vec::with_capacity(market.outcomes().len());
    let mut unquoted = Vec::new();

    for outcome in market.outcomes() {
        match best_quote(market.quotes_for(outcome)) {
            Some(q) => quoted.push((outcome.clone(), q.decimal_odds())),
            None => unquoted.push(outcome.clone()),
        }
    }

    let raw: Vec<Probability> = quoted.iter().map(|(_, odds)| implied(*odds)).collect();
    let fair = normalize_overround(&raw);
    let total: Decimal = raw.iter().map(|p| p.value()).sum();

    let outcomes = quoted
        .into_iter()
        .zip(raw.iter().zip(fair))
        .map(|((selection, best_odds), (implied, fair))| OutcomePrice {
            selection,
            best_odds,
            implied_probability: *implied,
            fair_probability: fair,
        })
        .collect();

    MarketEfficiency {
        outcomes,
        total_implied_probability: total,
        overround: total - Decimal::ONE,
        unquoted,
    }
}
