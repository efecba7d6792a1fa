//! The fraud scorer: rules, fusion, and classification behind one handle
//!
//! One `FraudScorer` is built per process from validated configuration and
//! shared by every caller. It holds only immutable state after construction
//! and may be used concurrently without coordination.

use crate::classifier::RiskClassifier;
use crate::config::EngineConfig;
use crate::features::FeatureRecord;
use crate::fusion::{FusionPolicy, SignalSource};
use crate::rules::RuleSet;
use crate::types::{RiskAssessment, ScoreBreakdown};
use crate::Result;
use chrono::Utc;
use tracing::{debug, info};

/// Fraud scoring engine
pub struct FraudScorer {
    rules: RuleSet,
    fusion: FusionPolicy,
    classifier: RiskClassifier,
    sources: Vec<Box<dyn SignalSource>>,
}

impl FraudScorer {
    /// Build an engine from configuration with no external sources
    ///
    /// Fusion then reduces to the rule-engine score exactly.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_sources(config, Vec::new())
    }

    /// Build an engine from configuration plus external signal sources
    ///
    /// All configuration is validated here; a malformed rule table, weight
    /// vector, or band layout fails construction and the engine never
    /// serves a scoring request in that state. Every injected source must
    /// have a configured fusion weight.
    pub fn with_sources(
        config: EngineConfig,
        sources: Vec<Box<dyn SignalSource>>,
    ) -> Result<Self> {
        let rules = RuleSet::new(config.rules)?;
        config.fusion.validate()?;
        let classifier = RiskClassifier::new(config.bands)?;

        for source in &sources {
            if config.fusion.weight_for(source.name()).is_none() {
                return Err(crate::Error::InvalidConfig(format!(
                    "signal source '{}' has no fusion weight configured",
                    source.name()
                )));
            }
        }

        info!(
            rules = rules.rules().len(),
            sources = sources.len(),
            "fraud scorer initialized"
        );

        Ok(Self {
            rules,
            fusion: config.fusion,
            classifier,
            sources,
        })
    }

    /// Score a single record
    ///
    /// The transaction id is taken from the record itself when present.
    pub fn assess(&self, record: &FeatureRecord) -> RiskAssessment {
        let id = record
            .text("transaction_id")
            .map(str::to_string)
            .unwrap_or_else(|| crate::batch::synthetic_txn_id(0));
        self.assess_with_id(id, record)
    }

    /// Score a single record under an explicit transaction id
    pub fn assess_with_id(&self, id: impl Into<String>, record: &FeatureRecord) -> RiskAssessment {
        let id = id.into();
        let outcome = self.rules.score(record);

        let mut externals = Vec::new();
        for source in &self.sources {
            if let Some(score) = source.score(record) {
                externals.push((source.name().to_string(), score));
            }
        }

        let unified = self.fusion.fuse(outcome.score, &externals);
        let level = self.classifier.classify(unified);

        debug!(
            transaction_id = %id,
            rule_score = outcome.score,
            unified_score = unified,
            risk_level = %level,
            triggered = outcome.triggered,
            "transaction assessed"
        );

        RiskAssessment {
            transaction_id: id,
            risk_score: unified,
            risk_level: level,
            suggested_action: level.suggested_action().to_string(),
            explanations: outcome.reasons,
            breakdown: ScoreBreakdown {
                rule_engine_score: outcome.score,
                external_scores: externals.into_iter().collect(),
            },
            assessed_at: Utc::now(),
        }
    }

    /// The configured rule set
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The configured fusion policy
    pub fn fusion(&self) -> &FusionPolicy {
        &self.fusion
    }

    /// The configured classifier
    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }
}
