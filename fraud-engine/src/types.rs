//! Result types produced by the fraud engine
//!
//! Field names here (`risk_score`, `risk_level`, `suggested_action`,
//! `explanations`, `breakdown`) are the stable contract that surrounding
//! layers (CLI tables, dashboards, CSV exports) rely on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl RiskLevel {
    /// Fixed recommended action for this tier
    pub fn suggested_action(&self) -> &'static str {
        match self {
            RiskLevel::High => "BLOCK - Requires additional verification",
            RiskLevel::Medium => "WARN - Review recommended",
            RiskLevel::Low => "ALLOW - Appears legitimate",
        }
    }

    /// Wire name of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-source breakdown of the unified score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Score from the rule engine, clamped to [0, 100]
    pub rule_engine_score: f64,
    /// Scores of the external sources that were present, keyed by source
    /// name
    #[serde(flatten)]
    pub external_scores: BTreeMap<String, f64>,
}

/// Immutable risk assessment for one transaction
///
/// Created once per feature record and owned solely by the caller; the
/// engine keeps no reference to past results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Transaction identifier (caller-supplied or synthetic)
    pub transaction_id: String,

    /// Unified risk score in [0, 100]
    pub risk_score: f64,

    /// Risk tier
    pub risk_level: RiskLevel,

    /// Fixed recommended action for the tier
    pub suggested_action: String,

    /// Reasons for every triggered rule, in rule declaration order
    pub explanations: Vec<String>,

    /// Per-source score breakdown
    pub breakdown: ScoreBreakdown,

    /// Assessment timestamp
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    /// Highest-priority explanation, if any rule fired
    pub fn top_reason(&self) -> Option<&str> {
        self.explanations.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::High).unwrap(), "\"HIGH\"");
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_suggested_actions() {
        assert_eq!(
            RiskLevel::High.suggested_action(),
            "BLOCK - Requires additional verification"
        );
        assert_eq!(RiskLevel::Medium.suggested_action(), "WARN - Review recommended");
        assert_eq!(RiskLevel::Low.suggested_action(), "ALLOW - Appears legitimate");
    }

    #[test]
    fn test_breakdown_flattens_external_scores() {
        let breakdown = ScoreBreakdown {
            rule_engine_score: 70.0,
            external_scores: BTreeMap::from([("xgboost".to_string(), 55.0)]),
        };

        let value = serde_json::to_value(&breakdown).unwrap();
        assert_eq!(value["rule_engine_score"], 70.0);
        assert_eq!(value["xgboost"], 55.0);
    }
}
