//! Miette-based error diagnostics for CLI error presentation.
//!
//! Parse failures in the config file or in JSON inputs are re-rendered
//! with the offending file content and a label at the failing location.

use std::path::Path;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError as ConfigFailure, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(oddsedge::config))]
pub struct ConfigError {
    /// Human-readable error message.
    pub message: String,

    /// Source content (the configuration file).
    #[source_code]
    pub src: String,

    /// Byte offset and length of the problematic region.
    #[label("here")]
    pub span: SourceSpan,

    /// Optional help text with suggestions for fixing the error.
    #[help]
    pub help: Option<String>,
}

impl ConfigError {
    /// Create a new configuration error with source location.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        src: impl Into<String>,
        offset: usize,
        len: usize,
    ) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: (offset, len).into(),
            help: None,
        }
    }

    /// Add a help suggestion to the error.
    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Malformed JSON input file.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid input in {path}")]
#[diagnostic(
    code(oddsedge::input),
    help("inputs are JSON; decimals may be numbers or strings")
)]
pub struct InputError {
    /// File the input was read from.
    pub path: String,

    #[source_code]
    pub src: String,

    #[label("{reason}")]
    pub span: SourceSpan,

    /// Parser message without its position suffix.
    pub reason: String,
}

/// Build a rich diagnostic for `err` when its source can be re-read.
///
/// Returns `None` for errors without a location, which are reported as a
/// plain message.
pub fn render(err: &Error, config_path: &Path) -> Option<miette::Report> {
    match err {
        Error::Config(ConfigFailure::Parse(parse)) => {
            let src = std::fs::read_to_string(config_path).ok()?;
            let span = parse.span().unwrap_or(0..0);
            let diagnostic = ConfigError::new(
                format!("failed to parse {}", config_path.display()),
                src,
                span.start,
                span.end.saturating_sub(span.start),
            )
            .with_help(parse.message().to_string());
            Some(miette::Report::new(diagnostic))
        }
        Error::InvalidJson { path, source } => {
            let src = std::fs::read_to_string(path).ok()?;
            let offset = byte_offset(&src, source.line(), source.column());
            let reason = source.to_string();
            let reason = reason
                .split(" at line ")
                .next()
                .unwrap_or_default()
                .to_string();
            Some(miette::Report::new(InputError {
                path: path.clone(),
                src,
                span: (offset, 1).into(),
                reason,
            }))
        }
        _ => None,
    }
}

/// Offset of a 1-based line and column, clamped to the source length.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len().saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_offset_counts_previous_lines() {
        let src = "[\n  {\"a\": }\n]";
        assert_eq!(byte_offset(src, 1, 1), 0);
        assert_eq!(byte_offset(src, 2, 3), 4);
    }

    #[test]
    fn byte_offset_clamps_past_end() {
        assert_eq!(byte_offset("{}", 9, 9), 1);
    }

    #[test]
    fn plain_errors_have_no_diagnostic() {
        let err = Error::Io(std::io::Error::other("bad"));
        assert!(render(&err, Path::new("missing.toml")).is_none());
    }

    #[test]
    fn json_errors_point_into_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(&path, "[\n  {\"id\": }\n]").unwrap();
        let source = serde_json::from_str::<serde_json::Value>("[\n  {\"id\": }\n]").unwrap_err();
        let err = Error::InvalidJson {
            path: path.display().to_string(),
            source,
        };
        let report = render(&err, Path::new("unused.toml")).unwrap();
        assert!(report.to_string().contains("p.json"));
    }
}
