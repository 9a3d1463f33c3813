//! Quoted prices.
//!
//! - [`DecimalOdds`] - a validated decimal price (> 1.0)
//! - [`OddsQuote`] - one bookmaker's price for one selection at one instant
//! - [`MarketQuotes`] - every known quote for one (event, market) snapshot

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{Bookmaker, EventId, MarketId, Selection};

/// Decimal odds: a winning unit stake returns `odds` units, stake included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DecimalOdds(Decimal);

impl DecimalOdds {
    /// Create decimal odds, rejecting anything at or below 1.0.
    ///
    /// Odds are never clamped: silently altering a price would corrupt
    /// every downstream figure.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidOdds`] when `odds <= 1.0`.
    pub fn try_new(odds: Decimal) -> Result<Self, DomainError> {
        if odds <= Decimal::ONE {
            return Err(DomainError::InvalidOdds { odds });
        }
        Ok(Self(odds))
    }

    /// The underlying price.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Net odds `b = odds - 1` (profit per unit staked on a win).
    #[must_use]
    pub fn net(self) -> Decimal {
        self.0 - Decimal::ONE
    }
}

impl TryFrom<Decimal> for DecimalOdds {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<DecimalOdds> for Decimal {
    fn from(odds: DecimalOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for DecimalOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single captured price. Immutable; a newer quote supersedes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OddsQuote {
    event_id: EventId,
    market_id: MarketId,
    bookmaker: Bookmaker,
    selection: Selection,
    decimal_odds: DecimalOdds,
    observed_at: DateTime<Utc>,
}

impl OddsQuote {
    /// Create a new quote.
    pub fn new(
        event_id: EventId,
        market_id: MarketId,
        bookmaker: Bookmaker,
        selection: Selection,
        decimal_odds: DecimalOdds,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            market_id,
            bookmaker,
            selection,
            decimal_odds,
            observed_at,
        }
    }

    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    #[must_use]
    pub const fn bookmaker(&self) -> &Bookmaker {
        &self.bookmaker
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub const fn decimal_odds(&self) -> DecimalOdds {
        self.decimal_odds
    }

    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// True when this quote prices the given event/market.
    #[must_use]
    pub fn is_for_market(&self, event_id: &EventId, market_id: &MarketId) -> bool {
        &self.event_id == event_id && &self.market_id == market_id
    }
}

/// Point-in-time snapshot of every known quote for one (event, market).
///
/// `outcomes` declares the full outcome set of the market; a market whose
/// outcomes are not all quoted can never be arbitraged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketQuotes {
    event_id: EventId,
    market_id: MarketId,
    outcomes: Vec<Selection>,
    quotes: Vec<OddsQuote>,
}

impl MarketQuotes {
    /// Build a snapshot, checking every quote belongs to this market.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidInput`] if `outcomes` is empty or has duplicates
    /// - [`DomainError::IncompatibleInputs`] if a quote references another
    ///   event/market or an undeclared outcome
    pub fn try_new(
        event_id: EventId,
        market_id: MarketId,
        outcomes: Vec<Selection>,
        quotes: Vec<OddsQuote>,
    ) -> Result<Self, DomainError> {
        if outcomes.is_empty() {
            return Err(DomainError::invalid_input("market declares no outcomes"));
        }

        let mut declared = HashSet::with_capacity(outcomes.len());
        for outcome in &outcomes {
            if !declared.insert(outcome) {
                return Err(DomainError::invalid_input(format!(
                    "duplicate outcome '{outcome}'"
                )));
            }
        }

        for quote in &quotes {
            if !quote.is_for_market(&event_id, &market_id) {
                return Err(DomainError::incompatible(format!(
                    "quote from {} prices {}/{}, expected {}/{}",
                    quote.bookmaker, quote.event_id, quote.market_id, event_id, market_id
                )));
            }
            if !declared.contains(&quote.selection) {
                return Err(DomainError::incompatible(format!(
                    "quote from {} prices undeclared outcome '{}'",
                    quote.bookmaker, quote.selection
                )));
            }
        }

        Ok(Self {
            event_id,
            market_id,
            outcomes,
            quotes,
        })
    }

    #[must_use]
    pub const fn event_id(&self) -> &EventId {
        &self.event_id
    }

    #[must_use]
    pub const fn market_id(&self) -> &MarketId {
        &self.market_id
    }

    /// Declared outcomes, in market order.
    #[must_use]
    pub fn outcomes(&self) -> &[Selection] {
        &self.outcomes
    }

    #[must_use]
    pub fn quotes(&self) -> &[OddsQuote] {
        &self.quotes
    }

    /// Quotes for one outcome.
    pub fn quotes_for<'a>(&'a self, selection: &'a Selection) -> impl Iterator<Item = &'a OddsQuote> {
        self.quotes.iter().filter(move |q| &q.selection == selection)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketQuotesRaw {
    event_id: EventId,
    market_id: MarketId,
    outcomes: Vec<Selection>,
    #[serde(default)]
    quotes: Vec<OddsQuote>,
}

impl<'de> Deserialize<'de> for MarketQuotes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = MarketQuotesRaw::deserialize(deserializer)?;
        Self::try_new(raw.event_id, raw.market_id, raw.outcomes, raw.quotes)
            .map_err(serde::de::Error::custom)
    }
}

/// Pick the quote with the highest odds.
///
/// Ties go to the most recently observed quote, then to the bookmaker name
/// in ascending order, so the choice is deterministic.
pub fn best_quote<'a, I>(quotes: I) -> Option<&'a OddsQuote>
where
    I: IntoIterator<Item = &'a OddsQuote>,
{
    quotes.into_iter().fold(None, |best: Option<&OddsQuote>, q| match best {
        None => Some(q),
        Some(b) => {
            let better = q
                .decimal_odds
                .cmp(&b.decimal_odds)
                .then_with(|| q.observed_at.cmp(&b.observed_at))
                .then_with(|| b.bookmaker.cmp(&q.bookmaker))
                .is_gt();
            Some(if better { q } else { b })
        }
    })
}
