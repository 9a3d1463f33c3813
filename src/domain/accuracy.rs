//! Scope-keyed accuracy summaries.
//!
//! Resolved predictions are grouped by any combination of sport, market
//! type and confidence decile. Void outcomes are never counted.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::outcome::ResolvedPrediction;

/// A dimension to group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupDimension {
    Sport,
    Market,
    Confidence,
}

impl FromStr for GroupDimension {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sport" => Ok(Self::Sport),
            "market" | "market_type" => Ok(Self::Market),
            "confidence" => Ok(Self::Confidence),
            other => Err(DomainError::invalid_input(format!(
                "unknown group dimension '{other}' (expected sport, market or confidence)"
            ))),
        }
    }
}

/// Identifies one group. `None` parts were not grouped on.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeKey {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_bucket: Option<Decimal>,
}

impl ScopeKey {
    /// The ungrouped scope.
    #[must_use]
    pub fn overall() -> Self {
        Self::default()
    }

    fn for_prediction(resolved: &ResolvedPrediction, group_by: &[GroupDimension]) -> Self {
        let prediction = resolved.prediction();
        let mut key = Self::default();
        for dimension in group_by {
            match dimension {
                GroupDimension::Sport => key.sport = Some(label(&prediction.sport)),
                GroupDimension::Market => key.market_type = Some(label(&prediction.market_type)),
                GroupDimension::Confidence => {
                    key.confidence_bucket = Some(prediction.confidence.decile());
                }
            }
        }
        key
    }
}

fn label(value: &str) -> String {
    if value.is_empty() {
        "unknown".to_string()
    } else {
        value.to_string()
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(sport) = &self.sport {
            parts.push(format!("sport={sport}"));
        }
        if let Some(market) = &self.market_type {
            parts.push(format!("market={market}"));
        }
        if let Some(bucket) = &self.confidence_bucket {
            parts.push(format!("confidence={bucket}"));
        }
        if parts.is_empty() {
            f.write_str("overall")
        } else {
            f.write_str(&parts.join(" "))
        }
    }
}

/// Accuracy figures for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracySnapshot {
    pub scope_key: ScopeKey,
    pub total_count: u64,
    pub correct_count: u64,
    /// Percentage of correct predictions.
    pub accuracy: Decimal,
    pub average_accuracy_score: Decimal,
    pub brier_score: Decimal,
}

#[derive(Debug, Default)]
struct Tally {
    total: u64,
    correct: u64,
    score: Decimal,
    squared_error: Decimal,
}

impl Tally {
    fn add(&mut self, resolved: &ResolvedPrediction) {
        let (Some(score), Some(squared_error)) = (resolved.accuracy_score(), resolved.squared_error())
        else {
            return;
        };
        self.total += 1;
        if resolved.is_correct() {
            self.correct += 1;
        }
        self.score += score;
        self.squared_error += squared_error;
    }

    fn snapshot(self, scope_key: ScopeKey) -> AccuracySnapshot {
        if self.total == 0 {
            return AccuracySnapshot {
                scope_key,
                ..AccuracySnapshot::default()
            };
        }
        let n = Decimal::from(self.total);
        AccuracySnapshot {
            scope_key,
            total_count: self.total,
            correct_count: self.correct,
            accuracy: Decimal::from(self.correct) / n * Decimal::ONE_HUNDRED,
            average_accuracy_score: self.score / n,
            brier_score: self.squared_error / n,
        }
    }
}

/// Narrows the resolved set before aggregation. Empty fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccuracyFilter {
    pub model_version: Option<String>,
    pub sport: Option<String>,
    pub market_type: Option<String>,
    /// Inclusive lower bound on `resolved_at`.
    pub resolved_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `resolved_at`.
    pub resolved_to: Option<DateTime<Utc>>,
    /// Inclusive lower bound on the prediction's `created_at`.
    pub created_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the prediction's `created_at`.
    pub created_to: Option<DateTime<Utc>>,
}

impl AccuracyFilter {
    #[must_use]
    pub fn matches(&self, resolved: &ResolvedPrediction) -> bool {
        let prediction = resolved.prediction();
        let resolved_at = resolved.outcome().resolved_at;

        self.model_version
            .as_ref()
            .map_or(true, |v| v == &prediction.model_version)
            && self.sport.as_ref().map_or(true, |s| s == &prediction.sport)
            && self
                .market_type
                .as_ref()
                .map_or(true, |m| m == &prediction.market_type)
            && self.resolved_from.map_or(true, |from| resolved_at >= from)
            && self.resolved_to.map_or(true, |to| resolved_at < to)
            && self
                .created_from
                .map_or(true, |from| prediction.created_at >= from)
            && self.created_to.map_or(true, |to| prediction.created_at <= to)
    }
}

/// Overall snapshot plus one snapshot per group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyReport {
    pub overall: AccuracySnapshot,
    /// Ordered by scope key.
    pub groups: Vec<AccuracySnapshot>,
}

/// Aggregate accuracy over the filtered resolved set.
///
/// With an empty `group_by` only the overall snapshot is produced.
#[must_use]
pub fn accuracy_report(
    resolved: &[ResolvedPrediction],
    group_by: &[GroupDimension],
    filter: &AccuracyFilter,
) -> AccuracyReport {
    let mut overall = Tally::default();
    let mut groups: BTreeMap<ScopeKey, Tally> = BTreeMap::new();

    for r in resolved.iter().filter(|r| r.is_scored() && filter.matches(r)) {
        overall.add(r);
        if !group_by.is_empty() {
            groups
                .entry(ScopeKey::for_prediction(r, group_by))
                .or_default()
                .add(r);
        }
    }

    AccuracyReport {
        overall: overall.snapshot(ScopeKey::overall()),
        groups: groups
            .into_iter()
            .map(|(key, tally)| tally.snapshot(key))
            .collect(),
    }
}
