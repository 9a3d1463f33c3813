//! Command-line adapter.
//!
//! [`dispatch`] routes a parsed [`command::Cli`] to its handler. Handlers
//! print through [`output`] and return errors for `main` to render.

pub mod arbitrage;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod explain;
pub mod input;
pub mod output;
pub mod paths;
pub mod report;
pub mod stake;
pub mod value;

use crate::application::EdgeEngine;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use command::{Cli, Commands, ConfigCommand};

/// Log filter implied by `-v` / `-q`, if any.
#[must_use]
pub fn verbosity_level(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (verbose, quiet) {
        (0, true) => Some("error"),
        (0, false) => None,
        (1, _) => Some("info"),
        (2, _) => Some("debug"),
        _ => Some("trace"),
    }
}

/// Run `cli` against an already loaded configuration.
pub fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    let engine = EdgeEngine::from_config(config);
    match &cli.command {
        Commands::Assess(args) => value::execute_assess(&engine, args),
        Commands::Scan(args) => value::execute_scan(config, args),
        Commands::Stake(args) => stake::execute(&engine, args),
        Commands::Arbitrage(args) => arbitrage::execute_arbitrage(&engine, args),
        Commands::Allocate(args) => arbitrage::execute_allocate(&engine, args),
        Commands::Efficiency(args) => arbitrage::execute_efficiency(&engine, args),
        Commands::Calibration(args) => report::execute_calibration(&engine, args),
        Commands::Accuracy(args) => report::execute_accuracy(&engine, args),
        Commands::Explain(args) => explain::execute(&engine, args),
        Commands::Config(ConfigCommand::Init(args)) => {
            config::execute_init(args.path.as_deref().unwrap_or(&cli.config), args.force)
        }
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
    }
}

/// Whether `command` needs the config file loaded before it runs.
///
/// The `config` group reads or writes the file itself.
#[must_use]
pub fn needs_config(command: &Commands) -> bool {
    !matches!(command, Commands::Config(_))
}
