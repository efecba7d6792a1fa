//! Batch evaluation over ordered collections of raw transaction records
//!
//! Inputs arrive as raw JSON values (the shape CSV loaders and upload
//! handlers produce). Each record is coerced, scored, and classified; a
//! record that cannot be coerced is skipped and counted, never aborting
//! the batch. Output order always matches input order.

use crate::engine::FraudScorer;
use crate::features::FeatureRecord;
use crate::types::{RiskAssessment, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Synthetic transaction id for an input lacking one, deterministic given
/// the input position
pub fn synthetic_txn_id(index: usize) -> String {
    format!("TXN_{index:06}")
}

/// Aggregate statistics over one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of records successfully assessed
    pub total: usize,
    /// Records classified HIGH
    pub high: usize,
    /// Records classified MEDIUM
    pub medium: usize,
    /// Records classified LOW
    pub low: usize,
    /// Sum of the `amount` feature across assessed records
    pub total_amount: f64,
    /// Records skipped because they could not be coerced
    pub unprocessed: usize,
}

/// Result of a batch run: per-record assessments in input order plus
/// aggregate statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// One assessment per processable input, in input order
    pub assessments: Vec<RiskAssessment>,
    /// Aggregate statistics
    pub summary: BatchSummary,
}

impl BatchReport {
    /// The `n` highest-scored assessments, ties broken by input order
    pub fn top_risky(&self, n: usize) -> Vec<&RiskAssessment> {
        let mut ranked: Vec<&RiskAssessment> = self.assessments.iter().collect();
        // Stable sort keeps input order among equal scores
        ranked.sort_by(|a, b| b.risk_score.total_cmp(&a.risk_score));
        ranked.truncate(n);
        ranked
    }
}

/// Applies the full scoring pipeline to an ordered sequence of records
pub struct BatchAnalyzer<'a> {
    scorer: &'a FraudScorer,
}

impl<'a> BatchAnalyzer<'a> {
    /// Create an analyzer over a shared scorer
    pub fn new(scorer: &'a FraudScorer) -> Self {
        Self { scorer }
    }

    /// Assess every record in the input sequence
    ///
    /// Records lacking a `transaction_id` get a synthetic sequential one
    /// derived from their input position. Unprocessable records are
    /// skipped and counted; surviving records keep their relative order.
    pub fn analyze(&self, inputs: &[serde_json::Value]) -> BatchReport {
        let mut assessments = Vec::with_capacity(inputs.len());
        let mut unprocessed = 0usize;
        let mut total_amount = 0.0;
        let mut by_level = [0usize; 3];

        for (index, raw) in inputs.iter().enumerate() {
            let record = match FeatureRecord::from_json(raw) {
                Ok(record) => record,
                Err(error) => {
                    warn!(index, %error, "skipping unprocessable batch record");
                    unprocessed += 1;
                    continue;
                }
            };

            let id = record
                .text("transaction_id")
                .map(str::to_string)
                .unwrap_or_else(|| synthetic_txn_id(index));

            total_amount += record.number_or("amount", 0.0);
            let assessment = self.scorer.assess_with_id(id, &record);
            by_level[match assessment.risk_level {
                RiskLevel::Low => 0,
                RiskLevel::Medium => 1,
                RiskLevel::High => 2,
            }] += 1;
            assessments.push(assessment);
        }

        let summary = BatchSummary {
            total: assessments.len(),
            high: by_level[2],
            medium: by_level[1],
            low: by_level[0],
            total_amount,
            unprocessed,
        };

        info!(
            total = summary.total,
            high = summary.high,
            medium = summary.medium,
            low = summary.low,
            unprocessed = summary.unprocessed,
            "batch analysis complete"
        );

        BatchReport {
            assessments,
            summary,
        }
    }
}
