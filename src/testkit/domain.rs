//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions so tests focus on assertions rather
//! than construction boilerplate. All fixtures share one event (`evt`),
//! one market (`1x2`) and a fixed base instant, [`at`]`(0)`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::{
    BetResult, Bookmaker, Confidence, DecimalOdds, EventId, MarketId, MarketQuotes, OddsQuote,
    Prediction, PredictionId, Probability, ResolvedOutcome, ResolvedPrediction, Selection,
};

/// Event id used by every fixture.
pub const EVENT: &str = "evt";
/// Market id used by every fixture.
pub const MARKET: &str = "1x2";

/// Fixed base instant plus `secs` seconds.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0)
        .single()
        .unwrap_or_default()
        + Duration::seconds(secs)
}

/// Validated decimal odds; panics on invalid input.
pub fn odds(value: Decimal) -> DecimalOdds {
    DecimalOdds::try_new(value).expect("fixture odds must be > 1")
}

/// Validated probability; panics on invalid input.
pub fn probability(value: Decimal) -> Probability {
    Probability::try_new(value).expect("fixture probability must be in [0, 1]")
}

/// A quote on the fixture market observed at `at(secs)`.
pub fn quote(bookmaker: &str, selection: &str, price: Decimal, secs: i64) -> OddsQuote {
    OddsQuote::new(
        EventId::from(EVENT),
        MarketId::from(MARKET),
        Bookmaker::from(bookmaker),
        Selection::from(selection),
        odds(price),
        at(secs),
    )
}

/// The fixture three-way market with the given quotes.
pub fn three_way_market(quotes: Vec<OddsQuote>) -> MarketQuotes {
    MarketQuotes::try_new(
        EventId::from(EVENT),
        MarketId::from(MARKET),
        vec!["home".into(), "draw".into(), "away".into()],
        quotes,
    )
    .expect("fixture quotes must belong to the fixture market")
}

/// Home/draw/away priced by three bookmakers at `at(0)`.
pub fn priced_market(home: Decimal, draw: Decimal, away: Decimal) -> MarketQuotes {
    three_way_market(vec![
        quote("alpha", "home", home, 0),
        quote("bravo", "draw", draw, 0),
        quote("charlie", "away", away, 0),
    ])
}

/// Builder for [`Prediction`] fixtures.
#[derive(Debug, Clone)]
pub struct PredictionBuilder {
    prediction: Prediction,
}

impl PredictionBuilder {
    /// A prediction on `selection` with probability `p`.
    pub fn new(id: &str, selection: &str, p: Decimal) -> Self {
        Self {
            prediction: Prediction {
                id: PredictionId::from(id),
                event_id: EventId::from(EVENT),
                market_id: MarketId::from(MARKET),
                selection: Selection::from(selection),
                predicted_probability: probability(p),
                confidence: Confidence::try_new(dec!(0.7)).expect("fixture confidence"),
                model_version: "v1".to_string(),
                sport: "football".to_string(),
                market_type: "match_winner".to_string(),
                factors: Vec::new(),
                created_at: at(0),
            },
        }
    }

    pub fn confidence(mut self, value: Decimal) -> Self {
        self.prediction.confidence =
            Confidence::try_new(value).expect("fixture confidence must be in [0.45, 0.95]");
        self
    }

    pub fn sport(mut self, sport: &str) -> Self {
        self.prediction.sport = sport.to_string();
        self
    }

    pub fn market_type(mut self, market_type: &str) -> Self {
        self.prediction.market_type = market_type.to_string();
        self
    }

    pub fn model_version(mut self, version: &str) -> Self {
        self.prediction.model_version = version.to_string();
        self
    }

    /// Created at `at(secs)`.
    pub fn created(mut self, secs: i64) -> Self {
        self.prediction.created_at = at(secs);
        self
    }

    pub fn market(mut self, event: &str, market: &str) -> Self {
        self.prediction.event_id = EventId::from(event);
        self.prediction.market_id = MarketId::from(market);
        self
    }

    pub fn build(self) -> Prediction {
        self.prediction
    }

    /// Resolve with `result` at `at(secs)`.
    pub fn resolved(self, result: BetResult, secs: i64) -> ResolvedPrediction {
        let outcome = ResolvedOutcome {
            prediction_id: self.prediction.id.clone(),
            actual_result: result,
            resolved_at: at(secs),
        };
        ResolvedPrediction::try_new(self.prediction, outcome).expect("ids match by construction")
    }
}

/// Shorthand for a default-shaped prediction.
pub fn prediction(id: &str, selection: &str, p: Decimal) -> Prediction {
    PredictionBuilder::new(id, selection, p).build()
}

/// Shorthand for a default-shaped resolved prediction.
pub fn resolved(id: &str, p: Decimal, result: BetResult) -> ResolvedPrediction {
    PredictionBuilder::new(id, "home", p).resolved(result, 3_600)
}
