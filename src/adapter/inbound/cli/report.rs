//! Handlers for `calibration` and `accuracy`.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::{AccuracyArgs, ResolvedArgs};
use crate::adapter::inbound::cli::{input, output};
use crate::application::EdgeEngine;
use crate::domain::{AccuracyFilter, AccuracySnapshot};
use crate::error::Result;

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Samples")]
    samples: u64,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Gap")]
    gap: String,
}

#[derive(Tabled)]
struct SnapshotRow {
    #[tabled(rename = "Scope")]
    scope: String,
    #[tabled(rename = "Total")]
    total: u64,
    #[tabled(rename = "Correct")]
    correct: u64,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Avg Score")]
    average_score: String,
    #[tabled(rename = "Brier")]
    brier: String,
}

impl From<&AccuracySnapshot> for SnapshotRow {
    fn from(s: &AccuracySnapshot) -> Self {
        Self {
            scope: s.scope_key.to_string(),
            total: s.total_count,
            correct: s.correct_count,
            accuracy: format!("{:.2}%", s.accuracy),
            average_score: s.average_accuracy_score.round_dp(4).to_string(),
            brier: s.brier_score.round_dp(4).to_string(),
        }
    }
}

/// Execute `calibration`.
pub fn execute_calibration(engine: &EdgeEngine, args: &ResolvedArgs) -> Result<()> {
    let resolved = input::read_resolved(&args.predictions, &args.outcomes)?;
    let report = engine.calibration_report(&resolved);

    if output::is_json() {
        output::json_output(json!({
            "command": "calibration",
            "report": report,
        }));
        return Ok(());
    }

    output::section("Calibration");
    output::field("Samples", report.sample_count);
    if report.is_empty() {
        output::note("No scored predictions; void outcomes are excluded");
        return Ok(());
    }
    output::field("Brier score", report.brier_score.round_dp(4));
    output::field("Calibration", report.calibration_score.round_dp(4));

    let rows: Vec<BinRow> = report
        .bins
        .iter()
        .map(|bin| BinRow {
            range: format!("{:.1}-{:.1}", bin.lower_bound, bin.upper_bound),
            samples: bin.sample_count,
            predicted: output::percent(bin.average_predicted),
            actual: output::percent(bin.average_actual),
            gap: output::percent(bin.gap()),
        })
        .collect();
    output::section("Reliability");
    output::table(rows);
    Ok(())
}

/// Execute `accuracy`.
pub fn execute_accuracy(engine: &EdgeEngine, args: &AccuracyArgs) -> Result<()> {
    let resolved = input::read_resolved(&args.resolved.predictions, &args.resolved.outcomes)?;
    let filter = AccuracyFilter {
        model_version: args.model_version.clone(),
        sport: args.sport.clone(),
        market_type: args.market_type.clone(),
        resolved_from: args.from,
        resolved_to: args.to,
        created_from: args.created_from,
        created_to: args.created_to,
    };
    let report = engine.accuracy_report(&resolved, &args.group_by, &filter);

    if output::is_json() {
        output::json_output(json!({
            "command": "accuracy",
            "report": report,
        }));
        return Ok(());
    }

    output::section("Accuracy");
    if report.overall.total_count == 0 {
        output::note("No scored predictions match the filter");
        return Ok(());
    }
    let mut rows = vec![SnapshotRow::from(&report.overall)];
    rows.extend(report.groups.iter().map(SnapshotRow::from));
    output::table(rows);
    Ok(())
}
