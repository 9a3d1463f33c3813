//! Command-line interface definitions.
//!
//! Defines the CLI structure for the oddsedge application using `clap`.
//! Every analysis subcommand reads JSON records from files and prints a
//! report; `--json` switches the report to machine-readable output.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use super::paths;
use crate::domain::accuracy::GroupDimension;
use crate::domain::kelly::RiskLevel;

/// Betting-edge analysis: value, Kelly stakes, arbitrage and calibration
#[derive(Parser, Debug)]
#[command(name = "oddsedge")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the configuration file (defaults apply when it does not exist)
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the oddsedge CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assess one prediction against one quote
    Assess(AssessArgs),

    /// Find value bets across predictions and quotes
    Scan(ScanArgs),

    /// Size a fractional-Kelly stake
    Stake(StakeArgs),

    /// Detect arbitrage across market snapshots
    Arbitrage(ArbitrageArgs),

    /// Allocate a bankroll across an arbitrage opportunity
    Allocate(AllocateArgs),

    /// Show bookmaker margin and fair probabilities per market
    Efficiency(EfficiencyArgs),

    /// Reliability curve and Brier score over resolved predictions
    Calibration(ResolvedArgs),

    /// Accuracy summaries grouped by sport, market and confidence
    Accuracy(AccuracyArgs),

    /// Explain the factors behind predictions
    Explain(ExplainArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `oddsedge config`.
///
/// Provides configuration management utilities including generation,
/// display, and validation of configuration files.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate a configuration file for correctness.
    Validate,
}

/// Arguments for the `config init` subcommand.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Output path (defaults to `--config`).
    pub path: Option<PathBuf>,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}

/// Bankroll and Kelly dial shared by staking commands.
#[derive(Parser, Debug, Clone, Default)]
pub struct KellyArgs {
    /// Kelly multiplier in (0, 1]; overrides `--risk`.
    #[arg(long, conflicts_with = "risk")]
    pub fraction: Option<Decimal>,

    /// Named risk level: conservative, moderate or aggressive.
    #[arg(long)]
    pub risk: Option<RiskLevel>,
}

/// Arguments for the `assess` subcommand.
#[derive(Parser, Debug)]
pub struct AssessArgs {
    /// JSON file holding one prediction.
    #[arg(long)]
    pub prediction: PathBuf,

    /// JSON file holding one odds quote.
    #[arg(long)]
    pub quote: PathBuf,

    /// Also size a Kelly stake against this bankroll.
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    #[command(flatten)]
    pub kelly: KellyArgs,
}

/// Arguments for the `scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// JSON file holding an array of predictions.
    #[arg(long)]
    pub predictions: PathBuf,

    /// JSON file holding an array of odds quotes.
    #[arg(long)]
    pub quotes: PathBuf,

    /// Override the minimum expected value.
    #[arg(long)]
    pub min_ev: Option<Decimal>,
}

/// Arguments for the `stake` subcommand.
#[derive(Parser, Debug)]
pub struct StakeArgs {
    /// Model probability of the selection winning.
    #[arg(long)]
    pub probability: Decimal,

    /// Decimal odds on offer.
    #[arg(long)]
    pub odds: Decimal,

    /// Bankroll to size against.
    #[arg(long)]
    pub bankroll: Decimal,

    #[command(flatten)]
    pub kelly: KellyArgs,
}

/// Arguments for the `arbitrage` subcommand.
#[derive(Parser, Debug)]
pub struct ArbitrageArgs {
    /// JSON file holding an array of market snapshots.
    #[arg(long)]
    pub markets: PathBuf,

    /// Evaluate staleness as of this instant (RFC 3339, defaults to now).
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,

    /// Also allocate this bankroll across each opportunity.
    #[arg(long)]
    pub bankroll: Option<Decimal>,
}

/// Arguments for the `allocate` subcommand.
#[derive(Parser, Debug)]
pub struct AllocateArgs {
    /// JSON file holding one arbitrage opportunity.
    #[arg(long)]
    pub opportunity: PathBuf,

    /// Bankroll to split across the legs.
    #[arg(long)]
    pub bankroll: Decimal,
}

/// Arguments for the `efficiency` subcommand.
#[derive(Parser, Debug)]
pub struct EfficiencyArgs {
    /// JSON file holding an array of market snapshots.
    #[arg(long)]
    pub markets: PathBuf,
}

/// Predictions and their settlements.
#[derive(Parser, Debug)]
pub struct ResolvedArgs {
    /// JSON file holding an array of predictions.
    #[arg(long)]
    pub predictions: PathBuf,

    /// JSON file holding an array of resolved outcomes.
    #[arg(long)]
    pub outcomes: PathBuf,
}

/// Arguments for the `accuracy` subcommand.
#[derive(Parser, Debug)]
pub struct AccuracyArgs {
    #[command(flatten)]
    pub resolved: ResolvedArgs,

    /// Comma-separated grouping: sport, market, confidence.
    #[arg(long, value_delimiter = ',')]
    pub group_by: Vec<GroupDimension>,

    /// Only predictions from this model version.
    #[arg(long)]
    pub model_version: Option<String>,

    /// Only this sport.
    #[arg(long)]
    pub sport: Option<String>,

    /// Only this market type.
    #[arg(long)]
    pub market_type: Option<String>,

    /// Only outcomes resolved at or after this instant (RFC 3339).
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// Only outcomes resolved before this instant (RFC 3339).
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    /// Only predictions created at or after this instant (RFC 3339).
    #[arg(long)]
    pub created_from: Option<DateTime<Utc>>,

    /// Only predictions created at or before this instant (RFC 3339).
    #[arg(long)]
    pub created_to: Option<DateTime<Utc>>,
}

/// Arguments for the `explain` subcommand.
#[derive(Parser, Debug)]
pub struct ExplainArgs {
    /// JSON file holding an array of predictions.
    #[arg(long)]
    pub predictions: PathBuf,

    /// Only explain this prediction.
    #[arg(long)]
    pub id: Option<String>,
}
