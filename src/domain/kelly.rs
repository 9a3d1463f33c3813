//! Fractional Kelly stake sizing.
//!
//! Full Kelly is `f* = (b·p - q) / b` with `b = odds - 1` and `q = 1 - p`,
//! clamped at zero. The applied stake is `bankroll × f* × fraction`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;
use super::odds::DecimalOdds;
use super::probability::Probability;
use super::value::ValueAssessment;

/// Multiplier applied to full Kelly, in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct KellyFraction(Decimal);

impl KellyFraction {
    /// Full Kelly.
    pub const FULL: Self = Self(Decimal::ONE);

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidKellyFraction`] outside (0, 1].
    pub fn try_new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO || value > Decimal::ONE {
            return Err(DomainError::InvalidKellyFraction { value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl Default for KellyFraction {
    fn default() -> Self {
        RiskLevel::default().into()
    }
}

impl TryFrom<Decimal> for KellyFraction {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<KellyFraction> for Decimal {
    fn from(f: KellyFraction) -> Self {
        f.0
    }
}

impl fmt::Display for KellyFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named risk dials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl From<RiskLevel> for KellyFraction {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Conservative => Self(dec!(0.25)),
            RiskLevel::Moderate => Self(dec!(0.5)),
            RiskLevel::Aggressive => Self(dec!(0.75)),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            other => Err(DomainError::invalid_input(format!(
                "unknown risk level '{other}' (expected conservative, moderate or aggressive)"
            ))),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        };
        f.write_str(name)
    }
}

/// Bankroll after a single outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub bankroll: Money,
    pub profit: Money,
}

/// Win/lose simulation of a recommended stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenarios {
    pub win: Scenario,
    pub lose: Scenario,
    /// Probability-weighted bankroll.
    pub expected_bankroll: Money,
    pub expected_profit: Money,
}

/// Recommended stake with its supporting figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeRecommendation {
    /// Clamped full-Kelly fraction `max(0, f*)`.
    pub full_kelly: Decimal,
    pub kelly_fraction: KellyFraction,
    pub stake: Money,
    /// `stake / bankroll`.
    pub bankroll_fraction: Decimal,
    pub high_stake_warning: bool,
    pub scenarios: Scenarios,
}

impl StakeRecommendation {
    /// True when Kelly recommends a bet at all.
    #[must_use]
    pub fn should_bet(&self) -> bool {
        self.stake > Decimal::ZERO
    }
}

/// Default stake share above which a warning is raised.
pub const DEFAULT_HIGH_STAKE_THRESHOLD: Decimal = dec!(0.05);

/// Kelly stake calculator.
#[derive(Debug, Clone, Copy)]
pub struct KellyStakeOptimizer {
    high_stake_threshold: Decimal,
}

impl Default for KellyStakeOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_STAKE_THRESHOLD)
    }
}

impl KellyStakeOptimizer {
    #[must_use]
    pub const fn new(high_stake_threshold: Decimal) -> Self {
        Self {
            high_stake_threshold,
        }
    }

    /// Full Kelly fraction, clamped at zero.
    #[must_use]
    pub fn full_kelly(probability: Probability, odds: DecimalOdds) -> Decimal {
        let b = odds.net();
        let p = probability.value();
        let q = probability.complement().value();
        ((b * p - q) / b).max(Decimal::ZERO)
    }

    /// Size a stake from a probability and a price.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBankroll`] when `bankroll <= 0`, and
    /// [`DomainError::InvalidInput`] when the win scenario does not fit in a
    /// `Decimal`.
    pub fn optimal_stake(
        &self,
        probability: Probability,
        odds: DecimalOdds,
        bankroll: Money,
        fraction: KellyFraction,
    ) -> Result<StakeRecommendation, DomainError> {
        if bankroll <= Decimal::ZERO {
            return Err(DomainError::InvalidBankroll { bankroll });
        }

        let full_kelly = Self::full_kelly(probability, odds);
        let stake = bankroll * full_kelly * fraction.value();
        let bankroll_fraction = stake / bankroll;

        let overflow = || DomainError::invalid_input("stake scenario exceeds decimal range");
        let win_profit = stake.checked_mul(odds.net()).ok_or_else(overflow)?;
        let win = Scenario {
            bankroll: bankroll.checked_add(win_profit).ok_or_else(overflow)?,
            profit: win_profit,
        };
        let lose = Scenario {
            bankroll: bankroll - stake,
            profit: -stake,
        };
        let p = probability.value();
        let q = probability.complement().value();
        let expected_bankroll = p
            .checked_mul(win.bankroll)
            .and_then(|w| q.checked_mul(lose.bankroll).and_then(|l| w.checked_add(l)))
            .ok_or_else(overflow)?;

        Ok(StakeRecommendation {
            full_kelly,
            kelly_fraction: fraction,
            stake,
            bankroll_fraction,
            high_stake_warning: stake > bankroll * self.high_stake_threshold,
            scenarios: Scenarios {
                win,
                lose,
                expected_bankroll,
                expected_profit: expected_bankroll - bankroll,
            },
        })
    }

    /// Size a stake from a value assessment.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBankroll`] when `bankroll <= 0`.
    pub fn from_assessment(
        &self,
        assessment: &ValueAssessment,
        bankroll: Money,
        fraction: KellyFraction,
    ) -> Result<StakeRecommendation, DomainError> {
        self.optimal_stake(
            assessment.predicted_probability,
            assessment.decimal_odds,
            bankroll,
            fraction,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(v: Decimal) -> Probability {
        Probability::try_new(v).unwrap()
    }

    fn odds(v: Decimal) -> DecimalOdds {
        DecimalOdds::try_new(v).unwrap()
    }

    #[test]
    fn full_kelly_even_money_example() {
        let rec = KellyStakeOptimizer::default()
            .optimal_stake(p(dec!(0.55)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
            .unwrap();
        assert_eq!(rec.full_kelly, dec!(0.10));
        assert_eq!(rec.stake, dec!(100.00));
        assert_eq!(rec.bankroll_fraction, dec!(0.1));
        assert!(rec.high_stake_warning);
    }

    #[test]
    fn fractional_kelly_scales_stake() {
        let rec = KellyStakeOptimizer::default()
            .optimal_stake(p(dec!(0.55)), odds(dec!(2.0)), dec!(1000), RiskLevel::Conservative.into())
            .unwrap();
        assert_eq!(rec.stake, dec!(25));
        assert!(!rec.high_stake_warning);
    }

    #[test]
    fn no_edge_means_zero_stake() {
        let rec = KellyStakeOptimizer::default()
            .optimal_stake(p(dec!(0.40)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
            .unwrap();
        assert_eq!(rec.full_kelly, Decimal::ZERO);
        assert_eq!(rec.stake, Decimal::ZERO);
        assert!(!rec.should_bet());
        assert_eq!(rec.scenarios.expected_profit, Decimal::ZERO);
    }

    #[test]
    fn fair_price_means_zero_stake() {
        let rec = KellyStakeOptimizer::default()
            .optimal_stake(p(dec!(0.5)), odds(dec!(2.0)), dec!(500), KellyFraction::FULL)
            .unwrap();
        assert_eq!(rec.stake, Decimal::ZERO);
    }

    #[test]
    fn bankroll_must_be_positive() {
        let result = KellyStakeOptimizer::default().optimal_stake(
            p(dec!(0.6)),
            odds(dec!(2.0)),
            Decimal::ZERO,
            KellyFraction::FULL,
        );
        assert_eq!(
            result,
            Err(DomainError::InvalidBankroll {
                bankroll: Decimal::ZERO
            })
        );
    }

    #[test]
    fn scenarios_follow_stake() {
        let rec = KellyStakeOptimizer::default()
            .optimal_stake(p(dec!(0.55)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
            .unwrap();
        assert_eq!(rec.scenarios.win.bankroll, dec!(1100));
        assert_eq!(rec.scenarios.lose.bankroll, dec!(900));
        assert_eq!(rec.scenarios.expected_bankroll, dec!(1010));
        assert_eq!(rec.scenarios.expected_profit, dec!(10));
    }

    #[test]
    fn oversized_win_scenario_is_an_error() {
        let result = KellyStakeOptimizer::default().optimal_stake(
            p(dec!(0.5)),
            odds(dec!(100000000000000000000)),
            dec!(10000000000),
            KellyFraction::FULL,
        );
        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));
    }

    #[test]
    fn custom_warning_threshold() {
        let rec = KellyStakeOptimizer::new(dec!(0.2))
            .optimal_stake(p(dec!(0.55)), odds(dec!(2.0)), dec!(1000), KellyFraction::FULL)
            .unwrap();
        assert!(!rec.high_stake_warning);
    }

    #[test]
    fn kelly_fraction_bounds() {
        assert!(KellyFraction::try_new(dec!(1)).is_ok());
        assert!(KellyFraction::try_new(dec!(0.01)).is_ok());
        assert!(matches!(
            KellyFraction::try_new(Decimal::ZERO),
            Err(DomainError::InvalidKellyFraction { .. })
        ));
        assert!(KellyFraction::try_new(dec!(1.5)).is_err());
        assert_eq!(KellyFraction::default().value(), dec!(0.5));
    }

    #[test]
    fn risk_levels_parse() {
        assert_eq!("Aggressive".parse::<RiskLevel>().unwrap(), RiskLevel::Aggressive);
        assert_eq!(KellyFraction::from(RiskLevel::Aggressive).value(), dec!(0.75));
        assert!("reckless".parse::<RiskLevel>().is_err());
    }
}
