//! Cross-bookmaker arbitrage detection.
//!
//! For each outcome the best (highest) price across bookmakers is chosen.
//! If the chosen prices imply a total probability below 1, backing every
//! outcome in the right proportions returns the same payout whatever
//! happens, and that payout exceeds the total stake.
//!
//! An opportunity is a snapshot of the quotes that produced it. It carries
//! no identity beyond them and must be re-detected whenever a quote moves.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{Bookmaker, EventId, MarketId, Selection};
use super::odds::{best_quote, DecimalOdds, MarketQuotes, OddsQuote};
use super::odds_math::implied;

/// Detection thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbitrageLimits {
    /// Margins at or below this are ignored. Zero accepts any positive margin.
    pub min_profit_margin: Decimal,
    /// Quotes older than this relative to `as_of` are discarded.
    pub max_quote_age: Duration,
    /// Largest allowed spread between the observation times of chosen legs.
    pub max_quote_skew: Duration,
}

impl Default for ArbitrageLimits {
    fn default() -> Self {
        Self {
            min_profit_margin: Decimal::ZERO,
            max_quote_age: Duration::seconds(300),
            max_quote_skew: Duration::seconds(60),
        }
    }
}

/// The best quote chosen for one outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageLeg {
    pub selection: Selection,
    pub bookmaker: Bookmaker,
    pub decimal_odds: DecimalOdds,
    pub observed_at: DateTime<Utc>,
}

impl From<&OddsQuote> for ArbitrageLeg {
    fn from(quote: &OddsQuote) -> Self {
        Self {
            selection: quote.selection().clone(),
            bookmaker: quote.bookmaker().clone(),
            decimal_odds: quote.decimal_odds(),
            observed_at: quote.observed_at(),
        }
    }
}

/// A guaranteed-profit combination of quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitrageOpportunity {
    pub event_id: EventId,
    pub market_id: MarketId,
    /// One leg per outcome, in the market's declared outcome order.
    pub selections: Vec<ArbitrageLeg>,
    /// `Σ 1/odds` over the legs.
    pub total_implied_probability: Decimal,
    /// `1 - total_implied_probability`.
    pub profit_margin: Decimal,
    /// `profit_margin / total_implied_probability`.
    pub roi: Decimal,
    pub detected_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ArbitrageOpportunity {
    /// True once the age window of the oldest leg has passed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// True when `quote` is a newer price for one of this opportunity's
    /// outcomes, which makes the snapshot stale.
    #[must_use]
    pub fn is_invalidated_by(&self, quote: &OddsQuote) -> bool {
        if !quote.is_for_market(&self.event_id, &self.market_id) {
            return false;
        }
        self.selections.iter().any(|leg| {
            &leg.selection == quote.selection() && quote.observed_at() > leg.observed_at
        })
    }

    /// Sum of implied probabilities recomputed from the legs.
    #[must_use]
    pub fn implied_total_from_legs(&self) -> Decimal {
        self.selections
            .iter()
            .map(|leg| implied(leg.decimal_odds).value())
            .sum()
    }
}

/// Why a market produced no opportunity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than two outcomes declared.
    TooFewOutcomes,
    /// An outcome has no fresh quote.
    MissingOutcome(Selection),
    /// Chosen quotes were observed too far apart.
    QuoteSkew { spread: Duration },
    /// Prices do not sum below one, or not by enough.
    NoMargin { profit_margin: Decimal },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewOutcomes => write!(f, "fewer than two outcomes"),
            Self::MissingOutcome(selection) => write!(f, "no fresh quote for '{selection}'"),
            Self::QuoteSkew { spread } => {
                write!(f, "quotes observed {}s apart", spread.num_seconds())
            }
            Self::NoMargin { profit_margin } => write!(f, "profit margin {profit_margin}"),
        }
    }
}

/// Detects arbitrage in market snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArbitrageDetector {
    limits: ArbitrageLimits,
}

impl ArbitrageDetector {
    #[must_use]
    pub const fn new(limits: ArbitrageLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub const fn limits(&self) -> &ArbitrageLimits {
        &self.limits
    }

    /// Detect an opportunity in one market as of `as_of`.
    ///
    /// Returns `None` (never an error) when the market is incomplete, stale
    /// or unprofitable.
    #[must_use]
    pub fn detect(&self, market: &MarketQuotes, as_of: DateTime<Utc>) -> Option<ArbitrageOpportunity> {
        self.evaluate(market, as_of).ok()
    }

    /// Like [`detect`](Self::detect) but reports why nothing was found.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] that ruled the market out.
    pub fn evaluate(
        &self,
        market: &MarketQuotes,
        as_of: DateTime<Utc>,
    ) -> Result<ArbitrageOpportunity, Rejection> {
        if market.outcomes().len() < 2 {
            return Err(Rejection::TooFewOutcomes);
        }

        let oldest_allowed = as_of - self.limits.max_quote_age;
        let mut legs = Vec::with_capacity(market.outcomes().len());
        for outcome in market.outcomes() {
            let fresh = market
                .quotes_for(outcome)
                .filter(|q| q.observed_at() >= oldest_allowed && q.observed_at() <= as_of);
            let best = best_quote(fresh).ok_or_else(|| Rejection::MissingOutcome(outcome.clone()))?;
            legs.push(ArbitrageLeg::from(best));
        }

        let (oldest, newest) = legs.iter().fold(
            (legs[0].observed_at, legs[0].observed_at),
            |(lo, hi), leg| (lo.min(leg.observed_at), hi.max(leg.observed_at)),
        );
        let spread = newest - oldest;
        if spread > self.limits.max_quote_skew {
            return Err(Rejection::QuoteSkew { spread });
        }

        let total: Decimal = legs
            .iter()
            .map(|leg| implied(leg.decimal_odds).value())
            .sum();
        let profit_margin = Decimal::ONE - total;
        if profit_margin <= Decimal::ZERO || profit_margin <= self.limits.min_profit_margin {
            return Err(Rejection::NoMargin { profit_margin });
        }

        Ok(ArbitrageOpportunity {
            event_id: market.event_id().clone(),
            market_id: market.market_id().clone(),
            selections: legs,
            total_implied_probability: total,
            profit_margin,
            roi: profit_margin / total,
            detected_at: as_of,
            expires_at: oldest + self.limits.max_quote_age,
        })
    }

    /// Detect across many markets, best margin first.
    #[must_use]
    pub fn scan(&self, markets: &[MarketQuotes], as_of: DateTime<Utc>) -> Vec<ArbitrageOpportunity> {
        let mut found: Vec<ArbitrageOpportunity> = markets
            .iter()
            .filter_map(|market| self.detect(market, as_of))
            .collect();
        rank_by_margin(&mut found);
        found
    }
}

/// Order opportunities by profit margin descending, then market id.
pub fn rank_by_margin(opportunities: &mut [ArbitrageOpportunity]) {
    opportunities.sort_by(|a, b| {
        b.profit_margin
            .cmp(&a.profit_margin)
            .then_with(|| a.market_id.cmp(&b.market_id))
    });
}
