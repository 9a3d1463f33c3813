//! CLI integration tests.

mod support;

use std::str::FromStr;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use support::files::Inputs;

const PREDICTIONS: &str = r#"[
  {
    "id": "p1", "eventId": "evt", "marketId": "1x2", "selection": "home",
    "predictedProbability": 0.55, "confidence": 0.7, "modelVersion": "v1",
    "sport": "football", "marketType": "match_winner",
    "createdAt": "2024-03-09T14:00:00Z",
    "factors": [{"category": "form", "impact": 0.4, "description": "Won five straight"}]
  },
  {
    "id": "p2", "eventId": "evt", "marketId": "1x2", "selection": "away",
    "predictedProbability": 0.2, "confidence": 0.6, "modelVersion": "v1",
    "sport": "football", "marketType": "match_winner",
    "createdAt": "2024-03-09T14:00:00Z"
  }
]"#;

const QUOTES: &str = r#"[
  {"eventId": "evt", "marketId": "1x2", "bookmaker": "alpha", "selection": "home",
   "decimalOdds": 2.10, "observedAt": "2024-03-09T15:00:00Z"},
  {"eventId": "evt", "marketId": "1x2", "bookmaker": "bravo", "selection": "draw",
   "decimalOdds": 3.40, "observedAt": "2024-03-09T15:00:00Z"},
  {"eventId": "evt", "marketId": "1x2", "bookmaker": "charlie", "selection": "away",
   "decimalOdds": 4.50, "observedAt": "2024-03-09T15:00:00Z"}
]"#;

const OUTCOMES: &str = r#"[
  {"predictionId": "p1", "actualResult": "WON", "resolvedAt": "2024-03-09T17:00:00Z"},
  {"predictionId": "p2", "actualResult": "LOST", "resolvedAt": "2024-03-09T17:00:00Z"},
  {"predictionId": "ghost", "actualResult": "LOST", "resolvedAt": "2024-03-09T17:00:00Z"}
]"#;

fn markets() -> String {
    format!(
        r#"[{{"eventId": "evt", "marketId": "1x2", "outcomes": ["home", "draw", "away"], "quotes": {QUOTES}}}]"#
    )
}

fn oddsedge(inputs: &Inputs) -> Command {
    let mut cmd = cargo_bin_cmd!("oddsedge");
    cmd.arg("--config").arg(inputs.path("absent.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn json_of(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().expect("run oddsedge");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is one JSON object")
}

fn decimal(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).expect("decimal string"),
        other => Decimal::from_str(&other.to_string()).expect("decimal number"),
    }
}

#[test]
fn help_lists_commands() {
    cargo_bin_cmd!("oddsedge")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("oddsedge"))
        .stdout(predicate::str::contains("arbitrage"))
        .stdout(predicate::str::contains("calibration"));
}

#[test]
fn stake_reports_kelly_sizing() {
    let inputs = Inputs::new();
    let json = json_of(oddsedge(&inputs).args([
        "stake",
        "--probability",
        "0.55",
        "--odds",
        "2.0",
        "--bankroll",
        "1000",
        "--fraction",
        "1",
    ]));
    assert_eq!(json["command"], "stake");
    assert_eq!(decimal(&json["recommendation"]["stake"]), dec!(100));
    assert_eq!(json["recommendation"]["highStakeWarning"], true);
}

#[test]
fn stake_uses_configured_risk_level() {
    let inputs = Inputs::new();
    let config = inputs.write("config.toml", "[kelly]\nrisk_level = \"conservative\"\n");
    let json = json_of(
        cargo_bin_cmd!("oddsedge")
            .arg("--config")
            .arg(&config)
            .args(["stake", "--probability", "0.55", "--odds", "2.0", "--bankroll", "1000"]),
    );
    assert_eq!(decimal(&json["recommendation"]["stake"]), dec!(25));
}

#[test]
fn stake_human_output() {
    let inputs = Inputs::new();
    oddsedge(&inputs)
        .args(["--color", "never", "stake", "--probability", "0.55", "--odds", "2.0", "--bankroll", "1000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kelly Sizing"))
        .stdout(predicate::str::contains("Scenarios"));
}

#[test]
fn stake_rejects_invalid_probability() {
    let inputs = Inputs::new();
    oddsedge(&inputs)
        .args(["stake", "--probability", "1.5", "--odds", "2.0", "--bankroll", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("probability"));
}

#[test]
fn scan_finds_value() {
    let inputs = Inputs::new();
    let predictions = inputs.write("predictions.json", PREDICTIONS);
    let quotes = inputs.write("quotes.json", QUOTES);

    let json = json_of(
        oddsedge(&inputs)
            .arg("scan")
            .arg("--predictions")
            .arg(&predictions)
            .arg("--quotes")
            .arg(&quotes),
    );
    let hits = json["assessments"].as_array().expect("array");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["predictionId"], "p1");
    assert_eq!(hits[0]["recommendationTier"], "BUY");
}

#[test]
fn arbitrage_with_allocation() {
    let inputs = Inputs::new();
    let markets = inputs.write("markets.json", &markets());

    let json = json_of(
        oddsedge(&inputs)
            .arg("arbitrage")
            .arg("--markets")
            .arg(&markets)
            .args(["--as-of", "2024-03-09T15:01:00Z", "--bankroll", "1000"]),
    );
    let found = json["opportunities"].as_array().expect("array");
    assert_eq!(found.len(), 1);
    let margin = decimal(&found[0]["opportunity"]["profitMargin"]);
    assert!(margin > dec!(0.0074) && margin < dec!(0.0076));
    assert!(decimal(&found[0]["plan"]["guaranteedProfit"]) > Decimal::ZERO);
}

#[test]
fn arbitrage_rejects_non_positive_bankroll() {
    let inputs = Inputs::new();
    let markets = inputs.write("markets.json", &markets());

    for bankroll in ["--bankroll=0", "--bankroll=-5"] {
        oddsedge(&inputs)
            .arg("arbitrage")
            .arg("--markets")
            .arg(&markets)
            .args(["--as-of", "2024-03-09T15:01:00Z", bankroll])
            .assert()
            .failure()
            .stderr(predicate::str::contains("bankroll must be positive"));
    }
}

#[test]
fn arbitrage_ignores_stale_snapshot() {
    let inputs = Inputs::new();
    let markets = inputs.write("markets.json", &markets());

    let json = json_of(
        oddsedge(&inputs)
            .arg("arbitrage")
            .arg("--markets")
            .arg(&markets)
            .args(["--as-of", "2024-03-09T16:00:00Z"]),
    );
    assert!(json["opportunities"].as_array().expect("array").is_empty());
}

#[test]
fn efficiency_reports_overround() {
    let inputs = Inputs::new();
    let markets = inputs.write("markets.json", &markets());

    let json = json_of(
        oddsedge(&inputs)
            .arg("efficiency")
            .arg("--markets")
            .arg(&markets),
    );
    let overround = decimal(&json["markets"][0]["efficiency"]["overround"]);
    assert!(overround < Decimal::ZERO);
}

#[test]
fn calibration_skips_orphaned_outcomes() {
    let inputs = Inputs::new();
    let predictions = inputs.write("predictions.json", PREDICTIONS);
    let outcomes = inputs.write("outcomes.json", OUTCOMES);

    let json = json_of(
        oddsedge(&inputs)
            .arg("calibration")
            .arg("--predictions")
            .arg(&predictions)
            .arg("--outcomes")
            .arg(&outcomes),
    );
    assert_eq!(json["report"]["sampleCount"], 2);
}

#[test]
fn accuracy_groups_by_sport() {
    let inputs = Inputs::new();
    let predictions = inputs.write("predictions.json", PREDICTIONS);
    let outcomes = inputs.write("outcomes.json", OUTCOMES);

    let json = json_of(
        oddsedge(&inputs)
            .arg("accuracy")
            .arg("--predictions")
            .arg(&predictions)
            .arg("--outcomes")
            .arg(&outcomes)
            .args(["--group-by", "sport"]),
    );
    assert_eq!(json["report"]["overall"]["totalCount"], 2);
    assert_eq!(json["report"]["overall"]["correctCount"], 2);
    assert_eq!(json["report"]["groups"][0]["scopeKey"]["sport"], "football");
}

#[test]
fn explain_single_prediction() {
    let inputs = Inputs::new();
    let predictions = inputs.write("predictions.json", PREDICTIONS);

    let json = json_of(
        oddsedge(&inputs)
            .arg("explain")
            .arg("--predictions")
            .arg(&predictions)
            .args(["--id", "p1"]),
    );
    let explanations = json["explanations"].as_array().expect("array");
    assert_eq!(explanations.len(), 1);
    assert_eq!(
        explanations[0]["explanation"]["keyFactors"][0]["name"],
        "Recent form"
    );
}

#[test]
fn malformed_input_fails_with_path() {
    let inputs = Inputs::new();
    let predictions = inputs.write("predictions.json", "[{\"id\": }]");
    let quotes = inputs.write("quotes.json", QUOTES);

    oddsedge(&inputs)
        .args(["--color", "never", "scan"])
        .arg("--predictions")
        .arg(&predictions)
        .arg("--quotes")
        .arg(&quotes)
        .assert()
        .failure()
        .stderr(predicate::str::contains("predictions.json"));
}

#[test]
fn config_init_then_validate() {
    let inputs = Inputs::new();
    let path = inputs.path("config.toml");

    cargo_bin_cmd!("oddsedge")
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    cargo_bin_cmd!("oddsedge")
        .args(["config", "validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn invalid_config_exits_nonzero() {
    let inputs = Inputs::new();
    let path = inputs.write("config.toml", "[arbitrage]\nmin_profit_margin = 1.5\n");

    let output = cargo_bin_cmd!("oddsedge")
        .args(["config", "validate", "--config"])
        .arg(&path)
        .output()
        .expect("run oddsedge");

    assert!(!output.status.success(), "Expected nonzero exit code");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("arbitrage.min_profit_margin"),
        "Expected error naming the field.\nstderr: {stderr}"
    );
}

#[test]
fn analysis_commands_refuse_invalid_config() {
    let inputs = Inputs::new();
    let path = inputs.write("config.toml", "[logging]\nformat = \"xml\"\n");

    cargo_bin_cmd!("oddsedge")
        .arg("--config")
        .arg(&path)
        .args(["stake", "--probability", "0.55", "--odds", "2.0", "--bankroll", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.format"));
}
