//! Handlers for `arbitrage`, `allocate` and `efficiency`.

use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{AllocateArgs, ArbitrageArgs, EfficiencyArgs};
use crate::adapter::inbound::cli::{input, output};
use crate::application::EdgeEngine;
use crate::domain::error::DomainError;
use crate::domain::{ArbitrageOpportunity, MarketQuotes, StakePlan};
use crate::error::Result;

#[derive(Tabled)]
struct OpportunityRow {
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Legs")]
    legs: usize,
    #[tabled(rename = "Implied")]
    implied: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "ROI")]
    roi: String,
    #[tabled(rename = "Expires")]
    expires: String,
}

impl From<&ArbitrageOpportunity> for OpportunityRow {
    fn from(o: &ArbitrageOpportunity) -> Self {
        Self {
            event: o.event_id.to_string(),
            market: o.market_id.to_string(),
            legs: o.selections.len(),
            implied: o.total_implied_probability.round_dp(6).to_string(),
            margin: output::percent(o.profit_margin),
            roi: output::percent(o.roi),
            expires: o.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[derive(Tabled)]
struct StakeRow {
    #[tabled(rename = "Selection")]
    selection: String,
    #[tabled(rename = "Bookmaker")]
    bookmaker: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Stake")]
    stake: String,
    #[tabled(rename = "Payout")]
    payout: String,
}

#[derive(Tabled)]
struct EfficiencyRow {
    #[tabled(rename = "Selection")]
    selection: String,
    #[tabled(rename = "Best Odds")]
    best_odds: String,
    #[tabled(rename = "Implied")]
    implied: String,
    #[tabled(rename = "Fair")]
    fair: String,
}

fn print_plan(plan: &StakePlan) {
    let rows: Vec<StakeRow> = plan
        .per_selection_stake
        .iter()
        .map(|s| StakeRow {
            selection: s.leg.selection.to_string(),
            bookmaker: s.leg.bookmaker.to_string(),
            odds: s.leg.decimal_odds.to_string(),
            stake: s.stake.to_string(),
            payout: s.payout.round_dp(2).to_string(),
        })
        .collect();
    output::table(rows);
    output::field("Total stake", plan.total_stake);
    output::field("Guaranteed payout", plan.guaranteed_payout.round_dp(2));
    output::field("Guaranteed profit", output::signed(plan.guaranteed_profit.round_dp(2)));
    output::field("ROI", output::percent(plan.roi));
}

/// Execute `arbitrage`.
pub fn execute_arbitrage(engine: &EdgeEngine, args: &ArbitrageArgs) -> Result<()> {
    if let Some(bankroll) = args.bankroll {
        if bankroll <= Decimal::ZERO {
            return Err(DomainError::InvalidBankroll { bankroll }.into());
        }
    }
    let markets: Vec<MarketQuotes> = input::read_json(&args.markets)?;
    let as_of = args.as_of.unwrap_or_else(Utc::now);
    let found = engine.scan_arbitrage(&markets, as_of);

    let plans: Vec<Option<StakePlan>> = match args.bankroll {
        Some(bankroll) => found
            .iter()
            .map(|o| match engine.allocate_stakes(o, bankroll) {
                Ok(plan) => Ok(Some(plan)),
                Err(DomainError::NoOpportunity { .. }) => Ok(None),
                Err(err) => Err(err),
            })
            .collect::<std::result::Result<Vec<_>, DomainError>>()?,
        None => vec![None; found.len()],
    };

    if output::is_json() {
        let opportunities: Vec<_> = found
            .iter()
            .zip(&plans)
            .map(|(opportunity, plan)| json!({ "opportunity": opportunity, "plan": plan }))
            .collect();
        output::json_output(json!({
            "command": "arbitrage",
            "asOf": as_of,
            "markets": markets.len(),
            "opportunities": opportunities,
        }));
        return Ok(());
    }

    output::section("Arbitrage Scan");
    output::field("Markets", markets.len());
    output::field("As of", as_of.format("%Y-%m-%d %H:%M:%S UTC"));
    if found.is_empty() {
        output::note("No arbitrage found");
        output::hint("run with -vv to see why each market was skipped");
        return Ok(());
    }
    output::table(found.iter().map(OpportunityRow::from).collect());

    if args.bankroll.is_none() {
        return Ok(());
    }
    for (opportunity, plan) in found.iter().zip(&plans) {
        output::section(&format!(
            "Stakes for {} / {}",
            opportunity.event_id, opportunity.market_id
        ));
        match plan {
            Some(plan) => print_plan(plan),
            None => output::warning("Rounding to the stake unit removes the guaranteed profit"),
        }
    }
    Ok(())
}

/// Execute `allocate`.
pub fn execute_allocate(engine: &EdgeEngine, args: &AllocateArgs) -> Result<()> {
    let opportunity: ArbitrageOpportunity = input::read_json(&args.opportunity)?;
    let plan = engine.allocate_stakes(&opportunity, args.bankroll)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "allocate",
            "plan": plan,
        }));
        return Ok(());
    }

    output::section(&format!(
        "Stake Plan {} / {}",
        opportunity.event_id, opportunity.market_id
    ));
    output::field("Bankroll", args.bankroll);
    print_plan(&plan);
    if opportunity.is_expired(Utc::now()) {
        output::warning("Opportunity has expired; confirm prices before placing");
    }
    Ok(())
}

/// Execute `efficiency`.
pub fn execute_efficiency(engine: &EdgeEngine, args: &EfficiencyArgs) -> Result<()> {
    let markets: Vec<MarketQuotes> = input::read_json(&args.markets)?;

    if output::is_json() {
        let reports: Vec<_> = markets
            .iter()
            .map(|m| {
                json!({
                    "eventId": m.event_id(),
                    "marketId": m.market_id(),
                    "efficiency": engine.market_efficiency(m),
                })
            })
            .collect();
        output::json_output(json!({
            "command": "efficiency",
            "markets": reports,
        }));
        return Ok(());
    }

    for market in &markets {
        let report = engine.market_efficiency(market);
        output::section(&format!("{} / {}", market.event_id(), market.market_id()));
        let rows: Vec<EfficiencyRow> = report
            .outcomes
            .iter()
            .map(|o| EfficiencyRow {
                selection: o.selection.to_string(),
                best_odds: o.best_odds.to_string(),
                implied: output::percent(o.implied_probability.value()),
                fair: output::percent(o.fair_probability.value()),
            })
            .collect();
        output::table(rows);
        output::field("Total implied", report.total_implied_probability.round_dp(6));
        output::field("Overround", output::percent(report.overround));
        if !report.unquoted.is_empty() {
            let names: Vec<String> = report.unquoted.iter().map(ToString::to_string).collect();
            output::warning(&format!("Unquoted outcomes: {}", names.join(", ")));
        }
    }
    if markets.is_empty() {
        output::note("No markets in input");
    }
    Ok(())
}
