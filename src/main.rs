use clap::Parser;
use tracing::debug;

use oddsedge::adapter::inbound::cli::command::Cli;
use oddsedge::adapter::inbound::cli::output::{self, OutputConfig};
use oddsedge::adapter::inbound::cli::{diagnostic, dispatch, needs_config, verbosity_level};
use oddsedge::error::Result;
use oddsedge::infrastructure::config::settings::Config;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    output::apply_color(&cli.color);
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(err) = run(&cli) {
        match diagnostic::render(&err, &cli.config) {
            Some(report) if !output::is_json() => eprintln!("{report:?}"),
            _ => output::error(&err.to_string()),
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = if needs_config(&cli.command) {
        Config::load_or_default(&cli.config)?
    } else {
        Config::default()
    };
    if let Some(level) = verbosity_level(cli.verbose, cli.quiet) {
        config.logging.level = level.to_string();
    }
    config.init_logging();
    debug!(config = %cli.config.display(), "Configuration loaded");

    dispatch(cli, &config)
}
