//! Validated probability scalars.
//!
//! - [`Probability`] - any value in [0, 1]
//! - [`Confidence`] - model confidence, restricted to [0.45, 0.95]
//!
//! Both deserialize through their validating constructors, so an
//! out-of-range JSON value is rejected at the boundary.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A probability constrained to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Probability(Decimal);

impl Probability {
    /// Certain loss.
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// Certain win.
    pub const ONE: Self = Self(Decimal::ONE);

    /// Create a probability, rejecting values outside [0, 1].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidProbability`] when out of range.
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(DomainError::InvalidProbability { value });
        }
        Ok(Self(value))
    }

    /// Create a probability, clamping into [0, 1].
    ///
    /// Only for values the core derives itself; external inputs go through
    /// [`Probability::try_new`].
    #[must_use]
    pub fn clamped(value: Decimal) -> Self {
        Self(value.clamp(Decimal::ZERO, Decimal::ONE))
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// `1 - p`.
    #[must_use]
    pub fn complement(self) -> Self {
        Self(Decimal::ONE - self.0)
    }
}

impl TryFrom<Decimal> for Probability {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Probability> for Decimal {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowest confidence a model may attach to a prediction.
pub const MIN_CONFIDENCE: Decimal = dec!(0.45);
/// Highest confidence a model may attach to a prediction.
pub const MAX_CONFIDENCE: Decimal = dec!(0.95);

/// Model confidence in a prediction, constrained to [0.45, 0.95].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Confidence(Decimal);

impl Confidence {
    /// Create a confidence value, rejecting anything outside [0.45, 0.95].
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidConfidence`] when out of range.
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value < MIN_CONFIDENCE || value > MAX_CONFIDENCE {
            return Err(DomainError::InvalidConfidence { value });
        }
        Ok(Self(value))
    }

    /// The underlying value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }

    /// Confidence decile, `floor(c * 10) / 10`.
    #[must_use]
    pub fn decile(self) -> Decimal {
        (self.0 * Decimal::TEN).floor() / Decimal::TEN
    }
}

impl TryFrom<Decimal> for Confidence {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Confidence> for Decimal {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl From<Confidence> for Probability {
    fn from(c: Confidence) -> Self {
        Self(c.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_accepts_closed_unit_interval() {
        assert!(Probability::try_new(dec!(0)).is_ok());
        assert!(Probability::try_new(dec!(0.5)).is_ok());
        assert!(Probability::try_new(dec!(1)).is_ok());
    }

    #[test]
    fn probability_rejects_out_of_range() {
        assert_eq!(
            Probability::try_new(dec!(-0.1)),
            Err(DomainError::InvalidProbability { value: dec!(-0.1) })
        );
        assert!(Probability::try_new(dec!(1.1)).is_err());
    }

    #[test]
    fn clamped_pins_to_bounds() {
        assert_eq!(Probability::clamped(dec!(1.2)), Probability::ONE);
        assert_eq!(Probability::clamped(dec!(-3)), Probability::ZERO);
        assert_eq!(Probability::clamped(dec!(0.3)).value(), dec!(0.3));
    }

    #[test]
    fn complement_sums_to_one() {
        let p = Probability::try_new(dec!(0.55)).unwrap();
        assert_eq!(p.complement().value(), dec!(0.45));
    }

    #[test]
    fn confidence_bounds_are_inclusive() {
        assert!(Confidence::try_new(dec!(0.45)).is_ok());
        assert!(Confidence::try_new(dec!(0.95)).is_ok());
        assert!(matches!(
            Confidence::try_new(dec!(0.44)),
            Err(DomainError::InvalidConfidence { .. })
        ));
        assert!(Confidence::try_new(dec!(0.96)).is_err());
    }

    #[test]
    fn confidence_decile_floors() {
        assert_eq!(Confidence::try_new(dec!(0.45)).unwrap().decile(), dec!(0.4));
        assert_eq!(Confidence::try_new(dec!(0.79)).unwrap().decile(), dec!(0.7));
        assert_eq!(Confidence::try_new(dec!(0.90)).unwrap().decile(), dec!(0.9));
    }

    #[test]
    fn deserialization_is_validated() {
        let ok: Probability = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.value(), dec!(0.25));

        assert!(serde_json::from_str::<Probability>("1.5").is_err());
        assert!(serde_json::from_str::<Confidence>("0.99").is_err());
        assert!(serde_json::from_str::<Confidence>("\"0.7\"").is_ok());
    }
}
