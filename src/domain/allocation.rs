//! Stake allocation across the legs of an arbitrage.
//!
//! Each leg receives `bankroll × (1/odds_i) / Σ(1/odds)`, which equalizes
//! `stake_i × odds_i` across legs. Stakes are then floored to the minimum
//! currency unit and the leftover units are handed, one at a time, to the
//! leg with the lowest payout. The guaranteed payout is the smallest leg
//! payout, so rounding can shave profit but never overstate it.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::arbitrage::{ArbitrageLeg, ArbitrageOpportunity};
use super::error::DomainError;
use super::money::{floor_to_unit, Money};
use super::odds_math::implied;

/// Default minimum currency unit.
pub const DEFAULT_MIN_STAKE_UNIT: Money = dec!(0.01);

/// Stake on one leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocatedStake {
    #[serde(flatten)]
    pub leg: ArbitrageLeg,
    pub stake: Money,
    /// `stake × odds`.
    pub payout: Money,
}

/// Stakes for every leg of an opportunity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StakePlan {
    /// Aligned with the opportunity's selections.
    pub per_selection_stake: Vec<AllocatedStake>,
    pub total_stake: Money,
    /// Smallest payout across legs.
    pub guaranteed_payout: Money,
    pub guaranteed_profit: Money,
    /// `guaranteed_profit / total_stake`.
    pub roi: Decimal,
}

/// Splits a bankroll across arbitrage legs.
#[derive(Debug, Clone, Copy)]
pub struct StakeAllocator {
    min_stake_unit: Money,
}

impl Default for StakeAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_STAKE_UNIT)
    }
}

impl StakeAllocator {
    /// A non-positive unit disables rounding.
    #[must_use]
    pub const fn new(min_stake_unit: Money) -> Self {
        Self { min_stake_unit }
    }

    /// Allocate `bankroll` across the opportunity's legs.
    ///
    /// # Errors
    ///
    /// - [`DomainError::InvalidBankroll`] when `bankroll <= 0`
    /// - [`DomainError::NoOpportunity`] when two legs back the same outcome,
    ///   the legs carry no positive margin, or rounding leaves no guaranteed
    ///   profit
    pub fn allocate(
        &self,
        opportunity: &ArbitrageOpportunity,
        bankroll: Money,
    ) -> Result<StakePlan, DomainError> {
        if bankroll <= Decimal::ZERO {
            return Err(DomainError::InvalidBankroll { bankroll });
        }
        if opportunity.selections.len() < 2 {
            return Err(DomainError::no_opportunity("fewer than two legs"));
        }
        let mut seen = HashSet::with_capacity(opportunity.selections.len());
        if let Some(repeated) = opportunity
            .selections
            .iter()
            .find(|leg| !seen.insert(&leg.selection))
        {
            return Err(DomainError::no_opportunity(format!(
                "outcome {} is backed more than once",
                repeated.selection
            )));
        }

        // Never trust the serialized total.
        let total_implied = opportunity.implied_total_from_legs();
        let margin = Decimal::ONE - total_implied;
        if margin <= Decimal::ZERO {
            return Err(DomainError::no_opportunity(format!(
                "profit margin {margin} is not positive"
            )));
        }

        let mut stakes: Vec<Money> = opportunity
            .selections
            .iter()
            .map(|leg| {
                let raw = bankroll * implied(leg.decimal_odds).value() / total_implied;
                floor_to_unit(raw, self.min_stake_unit)
            })
            .collect();

        if self.min_stake_unit > Decimal::ZERO {
            self.distribute_leftover(&opportunity.selections, &mut stakes, bankroll);
        }

        let per_selection_stake: Vec<AllocatedStake> = opportunity
            .selections
            .iter()
            .zip(&stakes)
            .map(|(leg, stake)| AllocatedStake {
                leg: leg.clone(),
                stake: *stake,
                payout: *stake * leg.decimal_odds.value(),
            })
            .collect();

        let total_stake: Money = stakes.iter().copied().sum();
        let guaranteed_payout = per_selection_stake
            .iter()
            .map(|s| s.payout)
            .min()
            .unwrap_or(Decimal::ZERO);
        let guaranteed_profit = guaranteed_payout - total_stake;

        if total_stake <= Decimal::ZERO || guaranteed_profit <= Decimal::ZERO {
            return Err(DomainError::no_opportunity(format!(
                "bankroll {bankroll} is too small to lock in a profit at unit {}",
                self.min_stake_unit
            )));
        }

        Ok(StakePlan {
            per_selection_stake,
            total_stake,
            guaranteed_payout,
            guaranteed_profit,
            roi: guaranteed_profit / total_stake,
        })
    }

    /// Hand leftover units to the weakest leg while the total fits the bankroll.
    fn distribute_leftover(&self, legs: &[ArbitrageLeg], stakes: &mut [Money], bankroll: Money) {
        let mut total: Money = stakes.iter().copied().sum();
        while total + self.min_stake_unit <= bankroll {
            let weakest = legs
                .iter()
                .zip(stakes.iter())
                .enumerate()
                .min_by(|(_, (a_leg, a)), (_, (b_leg, b))| {
                    (**a * a_leg.decimal_odds.value()).cmp(&(**b * b_leg.decimal_odds.value()))
                })
                .map(|(i, _)| i);
            let Some(index) = weakest else { break };
            stakes[index] += self.min_stake_unit;
            total += self.min_stake_unit;
        }
    }
}
