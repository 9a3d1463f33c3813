//! Terminal output formatting.
//!
//! Every handler prints through these helpers so that `--json` and
//! `--quiet` behave the same across commands. Human output is indented
//! two spaces with colored status symbols; JSON mode prints one object
//! per command via [`json_output`].

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::{OwoColorize, Stream};
use serde_json::json;
use tabled::{Table, Tabled};

use super::command::ColorChoice;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
}

impl OutputConfig {
    /// Create a new output configuration.
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    config.json || config.quiet
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Force colors on or off; `Auto` leaves detection to the terminal.
pub fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Style `text` for stdout when colors are enabled.
macro_rules! paint {
    ($text:expr, $style:ident) => {
        $text.if_supports_color(Stream::Stdout, |t| t.$style())
    };
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    let label = format!("{label:<18}");
    println!("  {} {}", paint!(label, dimmed), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!("  {} {}", paint!("✓", green), message);
}

/// Print a warning line. Shown even in quiet mode.
pub fn warning(message: &str) {
    if read_config().json {
        return;
    }
    println!("  {} {}", paint!("⚠", yellow), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }
    eprintln!(
        "  {} {}",
        "×".if_supports_color(Stream::Stderr, |t| t.red()),
        message
    );
}

/// Print a section header.
pub fn section(title: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!();
    println!("{}", paint!(title, bold));
}

/// Print a dimmed note.
pub fn note(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!("  {}", paint!(message, dimmed));
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    println!("  {}: {}", paint!("hint", cyan), paint!(message, dimmed));
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if regular_output_suppressed(read_config()) {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Render rows as a table.
pub fn table<T: Tabled>(rows: Vec<T>) {
    lines(&Table::new(rows).to_string());
}

/// Emit a JSON value directly.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Format a positive value in green.
pub fn positive(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", paint!(value, green))
}

/// Format a negative value in red.
pub fn negative(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", paint!(value, red))
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", paint!(value, cyan))
}

/// Format a dimmed/muted value.
pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    format!("{}", paint!(value, dimmed))
}

/// Green when above zero, red when below, plain otherwise.
pub fn signed(value: rust_decimal::Decimal) -> String {
    if value.is_sign_positive() && !value.is_zero() {
        positive(value)
    } else if value.is_sign_negative() && !value.is_zero() {
        negative(value)
    } else {
        value.to_string()
    }
}

/// Render a fraction as a percentage with two decimals.
#[must_use]
pub fn percent(value: rust_decimal::Decimal) -> String {
    format!("{:.2}%", value * rust_decimal::Decimal::ONE_HUNDRED)
}
