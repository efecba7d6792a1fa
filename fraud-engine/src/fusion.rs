//! Score fusion across the rule engine and optional external signal sources
//!
//! External models (a learned fraud probability, an anomaly detector) are
//! modeled as a capability: a source that yields a score in [0, 100] or
//! declares itself absent. A real trained model can be substituted later
//! without touching the fusion contract.

use crate::features::FeatureRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// An optional external signal source
///
/// Implementations must pre-normalize their output to [0, 100] and return
/// `None` when they have nothing to say about a record. Sources are pure
/// with respect to shared state and may be called concurrently.
pub trait SignalSource: Send + Sync {
    /// Stable source name, used to look up its fusion weight
    fn name(&self) -> &str;

    /// Score for the record, or `None` when the source is absent
    fn score(&self, record: &FeatureRecord) -> Option<f64>;
}

/// Fusion weight for one named external source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWeight {
    /// External source name (must match `SignalSource::name`)
    pub name: String,
    /// Weight in the unified score (non-negative)
    pub weight: f64,
}

/// Weighted combination of the rule engine and external sources
///
/// Weights must sum to 1 when every source is present. When a source is
/// absent its weight is redistributed by renormalizing over the present
/// sources, so the unified score is always a proper weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionPolicy {
    /// Weight of the rule-engine score (must be positive; the rule engine
    /// is always present)
    pub rule_weight: f64,
    /// Weights of the optional external sources
    pub source_weights: Vec<SourceWeight>,
}

impl Default for FusionPolicy {
    fn default() -> Self {
        Self {
            rule_weight: 0.3,
            source_weights: vec![
                SourceWeight {
                    name: "xgboost".to_string(),
                    weight: 0.4,
                },
                SourceWeight {
                    name: "isolation_forest".to_string(),
                    weight: 0.3,
                },
            ],
        }
    }
}

impl FusionPolicy {
    /// Validate the weight vector at startup
    pub fn validate(&self) -> Result<()> {
        if self.rule_weight <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "rule engine weight must be positive, got {}",
                self.rule_weight
            )));
        }

        let mut sum = self.rule_weight;
        for source in &self.source_weights {
            if source.weight < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "fusion weight for '{}' is negative: {}",
                    source.name, source.weight
                )));
            }
            sum += source.weight;
        }

        if (sum - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidConfig(format!(
                "fusion weights must sum to 1, got {sum}"
            )));
        }

        Ok(())
    }

    /// Configured weight for a named external source
    pub fn weight_for(&self, name: &str) -> Option<f64> {
        self.source_weights
            .iter()
            .find(|source| source.name == name)
            .map(|source| source.weight)
    }

    /// Combine the rule-engine score with the present external scores
    ///
    /// Absent sources are silently excluded and the remaining weights are
    /// renormalized. With no external scores present the result is exactly
    /// the rule-engine score.
    pub fn fuse(&self, rule_score: f64, externals: &[(String, f64)]) -> f64 {
        let present: Vec<(f64, f64)> = externals
            .iter()
            .filter_map(|(name, score)| self.weight_for(name).map(|weight| (weight, *score)))
            .collect();

        if present.is_empty() {
            return rule_score;
        }

        let mut weighted = self.rule_weight * rule_score;
        let mut weight_sum = self.rule_weight;
        for (weight, score) in present {
            weighted += weight * score;
            weight_sum += weight;
        }

        weighted / weight_sum
    }
}
