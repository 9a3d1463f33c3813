use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON in {path}: {source}")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn domain_errors_pass_through() {
        let err: Error = DomainError::InvalidBankroll { bankroll: dec!(-1) }.into();
        assert_eq!(err.to_string(), "bankroll must be positive, got -1");
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn config_errors_name_the_field() {
        let err: Error = ConfigError::InvalidValue {
            field: "kelly.high_stake_threshold",
            reason: "must be between 0 and 1".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid value for kelly.high_stake_threshold: must be between 0 and 1"
        );
    }
}
