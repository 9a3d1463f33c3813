//! Monetary types for bankroll and stake representation.

use rust_decimal::{Decimal, RoundingStrategy};

/// Money represented as a Decimal for precision.
pub type Money = Decimal;

/// Round `amount` down to a whole multiple of `unit`.
///
/// A non-positive unit leaves the amount untouched.
#[must_use]
pub fn floor_to_unit(amount: Money, unit: Money) -> Money {
    if unit <= Decimal::ZERO {
        return amount;
    }
    let units = (amount / unit).round_dp_with_strategy(0, RoundingStrategy::ToZero);
    units * unit
}
