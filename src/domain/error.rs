//! Domain validation errors for the betting-edge core.
//!
//! Every variant is a deterministic input fault: callers surface them
//! directly and never retry. "No data yet" is not represented here; empty
//! resolved sets produce zeroed reports instead.
//!
//! # Examples
//!
//! ```
//! use oddsedge::domain::error::DomainError;
//! use oddsedge::domain::DecimalOdds;
//! use rust_decimal_macros::dec;
//!
//! let result = DecimalOdds::try_new(dec!(1.00));
//! assert!(matches!(result, Err(DomainError::InvalidOdds { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Decimal odds must be strictly greater than 1.0.
    #[error("decimal odds must be greater than 1.0, got {odds}")]
    InvalidOdds {
        /// The rejected odds value.
        odds: Decimal,
    },

    /// Probabilities must lie in [0, 1].
    #[error("probability must be between 0 and 1, got {value}")]
    InvalidProbability {
        /// The rejected value.
        value: Decimal,
    },

    /// Model confidence must lie in [0.45, 0.95].
    #[error("confidence must be between 0.45 and 0.95, got {value}")]
    InvalidConfidence {
        /// The rejected value.
        value: Decimal,
    },

    /// Bankroll must be positive for stake sizing.
    #[error("bankroll must be positive, got {bankroll}")]
    InvalidBankroll {
        /// The rejected bankroll.
        bankroll: Decimal,
    },

    /// Kelly multiplier must lie in (0, 1].
    #[error("kelly fraction must be in (0, 1], got {value}")]
    InvalidKellyFraction {
        /// The rejected multiplier.
        value: Decimal,
    },

    /// Paired inputs reference different events, markets or selections.
    #[error("incompatible inputs: {reason}")]
    IncompatibleInputs {
        /// Which identifiers disagreed.
        reason: String,
    },

    /// A guaranteed-profit plan was requested for a quote set that cannot deliver one.
    #[error("no arbitrage opportunity: {reason}")]
    NoOpportunity {
        /// Why the plan was refused.
        reason: String,
    },

    /// Structurally invalid input (empty outcome list, duplicate outcomes, ...).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },
}

impl DomainError {
    pub(crate) fn incompatible(reason: impl Into<String>) -> Self {
        Self::IncompatibleInputs {
            reason: reason.into(),
        }
    }

    pub(crate) fn no_opportunity(reason: impl Into<String>) -> Self {
        Self::NoOpportunity {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            DomainError::InvalidOdds { odds: dec!(0.9) }.to_string(),
            "decimal odds must be greater than 1.0, got 0.9"
        );
        assert_eq!(
            DomainError::InvalidBankroll { bankroll: dec!(0) }.to_string(),
            "bankroll must be positive, got 0"
        );
        assert_eq!(
            DomainError::incompatible("market m1 != m2").to_string(),
            "incompatible inputs: market m1 != m2"
        );
        assert_eq!(
            DomainError::no_opportunity("margin -0.02").to_string(),
            "no arbitrage opportunity: margin -0.02"
        );
    }
}
