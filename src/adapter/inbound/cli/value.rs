//! Handlers for `assess` and `scan`.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{AssessArgs, KellyArgs, ScanArgs};
use crate::adapter::inbound::cli::{input, output, stake};
use crate::application::EdgeEngine;
use crate::domain::{KellyFraction, OddsQuote, Prediction, RecommendationTier, ValueAssessment};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct ValueRow {
    #[tabled(rename = "Prediction")]
    prediction: String,
    #[tabled(rename = "Selection")]
    selection: String,
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Implied")]
    implied: String,
    #[tabled(rename = "Edge")]
    edge: String,
    #[tabled(rename = "EV")]
    expected_value: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

impl From<&ValueAssessment> for ValueRow {
    fn from(a: &ValueAssessment) -> Self {
        Self {
            prediction: a.prediction_id.to_string(),
            selection: a.selection.to_string(),
            bookmaker: a.bookmaker.to_string(),
            odds: a.decimal_odds.to_string(),
            model: output::percent(a.predicted_probability.value()),
            implied: output::percent(a.implied_probability.value()),
            edge: output::percent(a.edge),
            expected_value: output::percent(a.expected_value),
            tier: a.recommendation_tier.to_string(),
        }
    }
}

/// Resolve the Kelly dial flags into a multiplier.
pub(super) fn kelly_fraction(args: &KellyArgs) -> Result<Option<KellyFraction>> {
    if let Some(fraction) = args.fraction {
        return Ok(Some(KellyFraction::try_new(fraction)?));
    }
    Ok(args.risk.map(KellyFraction::from))
}

fn tier_label(tier: RecommendationTier) -> String {
    match tier {
        RecommendationTier::StrongBuy | RecommendationTier::Buy => output::positive(tier),
        RecommendationTier::Hold => output::highlight(tier),
        RecommendationTier::Avoid => output::negative(tier),
    }
}

/// Execute `assess`.
pub fn execute_assess(engine: &EdgeEngine, args: &AssessArgs) -> Result<()> {
    let prediction: Prediction = input::read_json(&args.prediction)?;
    let quote: OddsQuote = input::read_json(&args.quote)?;
    let assessment = engine.assess_value(&prediction, &quote)?;

    let recommendation = match args.bankroll {
        Some(bankroll) => {
            let fraction = kelly_fraction(&args.kelly)?;
            Some(engine.stake_for(&assessment, bankroll, fraction)?)
        }
        None => None,
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "assess",
            "assessment": assessment,
            "stake": recommendation,
        }));
        return Ok(());
    }

    output::section("Value Assessment");
    output::field("Prediction", &assessment.prediction_id);
    output::field("Selection", &assessment.selection);
    output::field("Bookmaker", &assessment.bookmaker);
    output::field("Odds", assessment.decimal_odds);
    output::field("Model", output::percent(assessment.predicted_probability.value()));
    output::field("Implied", output::percent(assessment.implied_probability.value()));
    output::field("Edge", output::signed(assessment.edge.round_dp(4)));
    output::field("Expected value", output::signed(assessment.expected_value.round_dp(4)));
    output::field("Recommendation", tier_label(assessment.recommendation_tier));

    if let Some(rec) = &recommendation {
        stake::print_recommendation(rec);
    } else if assessment.is_value() {
        output::hint("pass --bankroll to size a stake");
    }
    Ok(())
}

/// Execute `scan`.
pub fn execute_scan(config: &Config, args: &ScanArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(min_ev) = args.min_ev {
        config.value.min_expected_value = min_ev;
        config.validate()?;
    }
    let engine = EdgeEngine::from_config(&config);

    let predictions: Vec<Prediction> = input::read_json(&args.predictions)?;
    let quotes: Vec<OddsQuote> = input::read_json(&args.quotes)?;
    let hits = engine.scan_value(&predictions, &quotes);

    if output::is_json() {
        output::json_output(json!({
            "command": "scan",
            "minExpectedValue": config.value.min_expected_value,
            "assessments": hits,
        }));
        return Ok(());
    }

    output::section("Value Bets");
    output::field("Predictions", predictions.len());
    output::field("Quotes", quotes.len());
    output::field("Min EV", output::percent(config.value.min_expected_value));
    if hits.is_empty() {
        output::note("No value bets above the threshold");
        return Ok(());
    }
    output::table(hits.iter().map(ValueRow::from).collect());
    Ok(())
}
