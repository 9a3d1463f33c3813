//! Reliability curve and Brier score over resolved predictions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::outcome::ResolvedPrediction;

const BIN_COUNT: usize = 10;

/// One 0.1-wide bucket of predicted probability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationBin {
    pub lower_bound: Decimal,
    pub upper_bound: Decimal,
    pub average_predicted: Decimal,
    pub average_actual: Decimal,
    pub sample_count: u64,
}

impl CalibrationBin {
    /// `|average_predicted - average_actual|`.
    #[must_use]
    pub fn gap(&self) -> Decimal {
        (self.average_predicted - self.average_actual).abs()
    }
}

/// Calibration summary. All zero for an empty sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationReport {
    pub brier_score: Decimal,
    pub calibration_score: Decimal,
    pub sample_count: u64,
    /// Non-empty bins, lowest first.
    pub bins: Vec<CalibrationBin>,
}

impl CalibrationReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BinTotals {
    predicted: Decimal,
    actual: Decimal,
    count: u64,
}

/// Running sums from which a [`CalibrationReport`] is derived.
///
/// Recording in any order yields the same report as the batch
/// [`calibration_report`].
#[derive(Debug, Clone, Default)]
pub struct CalibrationTracker {
    bins: [BinTotals; BIN_COUNT],
    squared_error: Decimal,
    count: u64,
}

/// Bin index for a probability; 1.0 lands in the top bin.
fn bin_index(p: Decimal) -> usize {
    (p * Decimal::TEN)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .min(BIN_COUNT - 1)
}

impl CalibrationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one resolved prediction. Voids are ignored; returns whether the
    /// sample was counted.
    pub fn record(&mut self, resolved: &ResolvedPrediction) -> bool {
        let Some(actual) = resolved.actual_probability() else {
            return false;
        };
        let predicted = resolved.predicted();

        let bin = &mut self.bins[bin_index(predicted)];
        bin.predicted += predicted;
        bin.actual += actual;
        bin.count += 1;

        let diff = predicted - actual;
        self.squared_error += diff * diff;
        self.count += 1;
        true
    }

    #[must_use]
    pub const fn sample_count(&self) -> u64 {
        self.count
    }

    /// Build the report from the current sums.
    #[must_use]
    pub fn report(&self) -> CalibrationReport {
        if self.count == 0 {
            return CalibrationReport::default();
        }

        let bins: Vec<CalibrationBin> = self
            .bins
            .iter()
            .enumerate()
            .filter(|(_, totals)| totals.count > 0)
            .map(|(i, totals)| {
                let n = Decimal::from(totals.count);
                let lower = Decimal::from(i as u64) / Decimal::TEN;
                CalibrationBin {
                    lower_bound: lower,
                    upper_bound: lower + Decimal::new(1, 1),
                    average_predicted: totals.predicted / n,
                    average_actual: totals.actual / n,
                    sample_count: totals.count,
                }
            })
            .collect();

        let mean_gap =
            bins.iter().map(CalibrationBin::gap).sum::<Decimal>() / Decimal::from(bins.len() as u64);

        CalibrationReport {
            brier_score: self.squared_error / Decimal::from(self.count),
            calibration_score: Decimal::ONE - mean_gap,
            sample_count: self.count,
            bins,
        }
    }
}

/// Calibration over a resolved set. Void outcomes are excluded.
#[must_use]
pub fn calibration_report(resolved: &[ResolvedPrediction]) -> CalibrationReport {
    let mut tracker = CalibrationTracker::new();
    for r in resolved {
        tracker.record(r);
    }
    tracker.report()
}
