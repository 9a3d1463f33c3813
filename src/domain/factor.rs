//! Prediction explanation factors.
//!
//! Factors are a tagged union keyed by `category`. Known categories map to
//! typed variants; anything else is preserved verbatim in
//! [`Factor::Unrecognized`] so newer model outputs still round-trip.
//!
//! ```json
//! {"category": "injuries", "count": 2, "description": "two starters out"}
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::probability::Probability;

/// Qualitative risk level attached to a factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

/// A known feature category that influenced a prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum KnownFactor {
    /// Recent results.
    Form {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        impact: Option<Decimal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Previous meetings between the sides.
    HeadToHead {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        impact: Option<Decimal>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// What the market itself implies.
    MarketIntelligence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        implied_probability: Option<Probability>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bookmaker_margin: Option<Decimal>,
    },
    /// Injured or suspended key players.
    Injuries {
        count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Weather conditions for outdoor sports.
    Weather {
        #[serde(default)]
        risk: Severity,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// A prediction factor: a known category or an opaque one.
#[derive(Debug, Clone, PartialEq)]
pub enum Factor {
    Known(KnownFactor),
    /// Category this build does not understand, kept as raw JSON.
    Unrecognized { category: String, payload: Value },
}

const KNOWN_CATEGORIES: &[&str] = &[
    "form",
    "head_to_head",
    "market_intelligence",
    "injuries",
    "weather",
];

impl Factor {
    /// The category tag.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Known(KnownFactor::Form { .. }) => "form",
            Self::Known(KnownFactor::HeadToHead { .. }) => "head_to_head",
            Self::Known(KnownFactor::MarketIntelligence { .. }) => "market_intelligence",
            Self::Known(KnownFactor::Injuries { .. }) => "injuries",
            Self::Known(KnownFactor::Weather { .. }) => "weather",
            Self::Unrecognized { category, .. } => category,
        }
    }
}

impl From<KnownFactor> for Factor {
    fn from(factor: KnownFactor) -> Self {
        Self::Known(factor)
    }
}

impl Serialize for Factor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Known(known) => known.serialize(serializer),
            Self::Unrecognized { payload, .. } => payload.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Factor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let category = value
            .get("category")
            .and_then(Value::as_str)
            .ok_or_else(|| serde::de::Error::missing_field("category"))?
            .to_string();

        if KNOWN_CATEGORIES.contains(&category.as_str()) {
            let known = KnownFactor::deserialize(value).map_err(serde::de::Error::custom)?;
            return Ok(Self::Known(known));
        }

        Ok(Self::Unrecognized {
            category,
            payload: value,
        })
    }
}

/// A factor that pushed the probability, with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyFactor {
    pub name: &'static str,
    pub impact: Decimal,
    pub description: String,
}

/// A factor that informs how much to trust the prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidenceFactor {
    pub name: &'static str,
    pub value: Decimal,
    pub description: String,
}

/// A factor that adds uncertainty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskFactor {
    pub name: &'static str,
    pub level: Severity,
    pub description: String,
}

/// Human-readable breakdown of a prediction's factors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub key_factors: Vec<KeyFactor>,
    pub confidence_factors: Vec<ConfidenceFactor>,
    pub risk_factors: Vec<RiskFactor>,
    /// Categories that were present but not understood.
    pub unrecognized: Vec<String>,
}

fn injury_severity(count: u32) -> Severity {
    match count {
        c if c > 3 => Severity::High,
        c if c > 1 => Severity::Medium,
        _ => Severity::Low,
    }
}

/// Explain a prediction's factors.
///
/// Key factors are ordered by impact, highest first.
#[must_use]
pub fn explain(factors: &[Factor]) -> Explanation {
    let mut explanation = Explanation::default();

    for factor in factors {
        let known = match factor {
            Factor::Known(known) => known,
            Factor::Unrecognized { category, .. } => {
                explanation.unrecognized.push(category.clone());
                continue;
            }
        };

        match known {
            KnownFactor::Form {
                impact,
                description,
            } => explanation.key_factors.push(KeyFactor {
                name: "Recent form",
                impact: impact.unwrap_or(dec!(0.25)),
                description: description
                    .clone()
                    .unwrap_or_else(|| "Based on recent results".to_string()),
            }),
            KnownFactor::HeadToHead {
                impact,
                description,
            } => explanation.key_factors.push(KeyFactor {
                name: "Head to head",
                impact: impact.unwrap_or(dec!(0.20)),
                description: description
                    .clone()
                    .unwrap_or_else(|| "Results in previous meetings".to_string()),
            }),
            KnownFactor::MarketIntelligence {
                implied_probability,
                bookmaker_margin,
            } => {
                let value = implied_probability.map_or(dec!(0.5), Probability::value);
                let mut description = format!(
                    "The market implies a {}% probability",
                    (value * Decimal::ONE_HUNDRED).round_dp(0)
                );
                if let Some(margin) = bookmaker_margin {
                    description.push_str(&format!(
                        " with a {}% bookmaker margin",
                        (margin * Decimal::ONE_HUNDRED).round_dp(1)
                    ));
                }
                explanation.confidence_factors.push(ConfidenceFactor {
                    name: "Market odds",
                    value,
                    description,
                });
            }
            KnownFactor::Injuries { count, description } => {
                explanation.risk_factors.push(RiskFactor {
                    name: "Injuries and suspensions",
                    level: injury_severity(*count),
                    description: description
                        .clone()
                        .unwrap_or_else(|| format!("{count} key player(s) affected")),
                });
            }
            KnownFactor::Weather { risk, description } => {
                explanation.risk_factors.push(RiskFactor {
                    name: "Weather",
                    level: *risk,
                    description: description
                        .clone()
                        .unwrap_or_else(|| "Normal conditions".to_string()),
                });
            }
        }
    }

    explanation
        .key_factors
        .sort_by(|a, b| b.impact.cmp(&a.impact));
    explanation
}
