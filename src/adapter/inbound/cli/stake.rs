//! Handler for `stake`.

use serde_json::json;

use crate::adapter::inbound::cli::command::StakeArgs;
use crate::adapter::inbound::cli::{output, value};
use crate::application::EdgeEngine;
use crate::domain::{DecimalOdds, Probability, StakeRecommendation};
use crate::error::Result;

/// Print a stake recommendation with its win/lose scenarios.
pub(super) fn print_recommendation(rec: &StakeRecommendation) {
    output::section("Stake");
    output::field("Full Kelly", output::percent(rec.full_kelly));
    output::field("Multiplier", rec.kelly_fraction.value());
    output::field("Stake", output::highlight(rec.stake));
    output::field("Bankroll share", output::percent(rec.bankroll_fraction));

    if !rec.should_bet() {
        output::note("No positive edge at this price; stake is zero");
        return;
    }
    if rec.high_stake_warning {
        output::warning("Stake exceeds the cautionary share of bankroll");
    }

    output::section("Scenarios");
    output::field(
        "Win",
        format!(
            "{} ({})",
            rec.scenarios.win.bankroll,
            output::signed(rec.scenarios.win.profit)
        ),
    );
    output::field(
        "Lose",
        format!(
            "{} ({})",
            rec.scenarios.lose.bankroll,
            output::signed(rec.scenarios.lose.profit)
        ),
    );
    output::field(
        "Expected",
        format!(
            "{} ({})",
            rec.scenarios.expected_bankroll.round_dp(2),
            output::signed(rec.scenarios.expected_profit.round_dp(2))
        ),
    );
}

/// Execute `stake`.
pub fn execute(engine: &EdgeEngine, args: &StakeArgs) -> Result<()> {
    let probability = Probability::try_new(args.probability)?;
    let odds = DecimalOdds::try_new(args.odds)?;
    let fraction = value::kelly_fraction(&args.kelly)?;
    let rec = engine.optimal_stake(probability, odds, args.bankroll, fraction)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "stake",
            "recommendation": rec,
        }));
        return Ok(());
    }

    output::section("Kelly Sizing");
    output::field("Probability", output::percent(probability.value()));
    output::field("Odds", odds);
    output::field("Bankroll", args.bankroll);
    print_recommendation(&rec);
    Ok(())
}
