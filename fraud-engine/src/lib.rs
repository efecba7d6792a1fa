//! Fraud scoring engine for UPI-style payments
//!
//! Rule-based risk scoring with optional fusion of external model signals.
//! The engine is configured once at startup, holds no mutable state, and is
//! safe to share across threads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod batch;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod features;
pub mod fusion;
pub mod rules;
pub mod types;

pub use batch::{BatchAnalyzer, BatchReport, BatchSummary};
pub use classifier::{Band, RiskBands, RiskClassifier};
pub use config::EngineConfig;
pub use engine::FraudScorer;
pub use error::{Error, Result};
pub use features::{FeatureRecord, FeatureValue};
pub use fusion::{FusionPolicy, SignalSource, SourceWeight};
pub use rules::{default_rules, Contribution, RuleOutcome, RuleSet, SignalRule};
pub use types::{RiskAssessment, RiskLevel, ScoreBreakdown};
