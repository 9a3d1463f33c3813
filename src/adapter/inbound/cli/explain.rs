//! Handler for `explain`.

use serde_json::json;
use tabled::Tabled;

use crate::adapter::inbound::cli::command::ExplainArgs;
use crate::adapter::inbound::cli::{input, output};
use crate::application::EdgeEngine;
use crate::domain::error::DomainError;
use crate::domain::{Explanation, Prediction, Severity};
use crate::error::Result;

#[derive(Tabled)]
struct KeyFactorRow {
    #[tabled(rename = "Factor")]
    name: &'static str,
    #[tabled(rename = "Impact")]
    impact: String,
    #[tabled(rename = "Detail")]
    description: String,
}

fn severity_label(level: Severity) -> String {
    let label = format!("{level:?}").to_lowercase();
    match level {
        Severity::High => output::negative(label),
        Severity::Medium => output::highlight(label),
        Severity::Low => output::muted(label),
    }
}

fn print_explanation(prediction: &Prediction, explanation: &Explanation) {
    output::section(&format!(
        "{} ({} @ {})",
        prediction.id,
        prediction.selection,
        output::percent(prediction.predicted_probability.value())
    ));

    if explanation.key_factors.is_empty() {
        output::note("No key factors");
    } else {
        let rows: Vec<KeyFactorRow> = explanation
            .key_factors
            .iter()
            .map(|f| KeyFactorRow {
                name: f.name,
                impact: f.impact.to_string(),
                description: f.description.clone(),
            })
            .collect();
        output::table(rows);
    }
    for factor in &explanation.confidence_factors {
        output::field(factor.name, &factor.description);
    }
    for factor in &explanation.risk_factors {
        output::field(
            factor.name,
            format!("{} {}", severity_label(factor.level), factor.description),
        );
    }
    if !explanation.unrecognized.is_empty() {
        output::note(&format!(
            "Unrecognized factors: {}",
            explanation.unrecognized.join(", ")
        ));
    }
}

/// Execute `explain`.
pub fn execute(engine: &EdgeEngine, args: &ExplainArgs) -> Result<()> {
    let predictions: Vec<Prediction> = input::read_json(&args.predictions)?;
    let selected: Vec<&Prediction> = match &args.id {
        Some(id) => predictions.iter().filter(|p| p.id.as_str() == id.as_str()).collect(),
        None => predictions.iter().collect(),
    };
    if let (Some(id), true) = (&args.id, selected.is_empty()) {
        return Err(DomainError::invalid_input(format!("no prediction with id '{id}'")).into());
    }

    let explained: Vec<(&Prediction, Explanation)> =
        selected.into_iter().map(|p| (p, engine.explain(p))).collect();

    if output::is_json() {
        let entries: Vec<_> = explained
            .iter()
            .map(|(p, e)| json!({ "predictionId": p.id, "explanation": e }))
            .collect();
        output::json_output(json!({
            "command": "explain",
            "explanations": entries,
        }));
        return Ok(());
    }

    for (prediction, explanation) in &explained {
        print_explanation(prediction, explanation);
    }
    Ok(())
}
