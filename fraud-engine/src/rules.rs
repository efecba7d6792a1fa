//! Fraud signal rules and the additive rule set
//!
//! Each rule is a pure function of a feature record: it either fires with a
//! fixed number of points and a human-readable reason, or it stays silent.
//! Rules are configuration data, not code, so operators can retune
//! thresholds and points without a release.

use crate::features::FeatureRecord;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One triggered signal: fixed points plus the reason shown to reviewers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Points added to the rule-engine score (never negative)
    pub points: f64,
    /// Human-readable explanation of the triggered condition
    pub reason: String,
}

/// A configurable fraud signal rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalRule {
    /// Fires when `amount` exceeds the threshold
    AmountAbove {
        /// Amount threshold in rupees (exclusive)
        threshold: f64,
        /// Points contributed when the rule fires
        points: f64,
    },
    /// Fires when `hour` is earlier than the given hour of day
    HourBefore {
        /// Hour of day (0-23, exclusive upper bound of the window)
        hour: u8,
        /// Points contributed when the rule fires
        points: f64,
    },
    /// Fires when `hour` is later than the given hour of day
    HourAfter {
        /// Hour of day (0-23, exclusive lower bound of the window)
        hour: u8,
        /// Points contributed when the rule fires
        points: f64,
    },
    /// Fires when `txns_last_1h` exceeds the per-hour ceiling
    VelocityAbove {
        /// Maximum transactions per hour before the rule fires
        max_per_hour: u32,
        /// Points contributed when the rule fires
        points: f64,
    },
    /// Fires when `is_new_recipient` is set
    NewRecipient {
        /// Points contributed when the rule fires
        points: f64,
    },
}

impl SignalRule {
    /// Evaluate the rule against a record
    ///
    /// Pure function; missing fields use the rule's neutral default (amount
    /// 0, hour 12, velocity 0, new-recipient false) and never error.
    pub fn evaluate(&self, record: &FeatureRecord) -> Option<Contribution> {
        match *self {
            SignalRule::AmountAbove { threshold, points } => {
                let amount = record.number_or("amount", 0.0);
                (amount > threshold).then(|| Contribution {
                    points,
                    reason: format!("Amount > ₹{}", format_inr(threshold)),
                })
            }
            SignalRule::HourBefore { hour, points } => {
                let at = record.number_or("hour", 12.0);
                (at < f64::from(hour)).then(|| Contribution {
                    points,
                    reason: format!("Late night transaction (12AM-{hour}AM)"),
                })
            }
            SignalRule::HourAfter { hour, points } => {
                let at = record.number_or("hour", 12.0);
                (at > f64::from(hour)).then(|| Contribution {
                    points,
                    reason: format!("Suspicious hours ({}PM-12AM)", hour.saturating_sub(12)),
                })
            }
            SignalRule::VelocityAbove {
                max_per_hour,
                points,
            } => {
                let count = record.number_or("txns_last_1h", 0.0);
                (count > f64::from(max_per_hour)).then(|| Contribution {
                    points,
                    reason: format!("High velocity ({count} transactions/hour)"),
                })
            }
            SignalRule::NewRecipient { points } => {
                record.flag("is_new_recipient").then(|| Contribution {
                    points,
                    reason: "First time sending to this recipient".to_string(),
                })
            }
        }
    }

    /// Configured points for this rule
    pub fn points(&self) -> f64 {
        match *self {
            SignalRule::AmountAbove { points, .. }
            | SignalRule::HourBefore { points, .. }
            | SignalRule::HourAfter { points, .. }
            | SignalRule::VelocityAbove { points, .. }
            | SignalRule::NewRecipient { points } => points,
        }
    }
}

/// The baseline rule set
///
/// The two amount rules intentionally overlap: a transaction above ₹50,000
/// also trips the ₹10,000 rule, front-loading score for severe cases. This
/// additive behavior is a documented policy choice; switching to mutually
/// exclusive severity buckets would change scoring and needs a product
/// decision, not a code fix.
pub fn default_rules() -> Vec<SignalRule> {
    vec![
        SignalRule::AmountAbove {
            threshold: 50_000.0,
            points: 40.0,
        },
        SignalRule::AmountAbove {
            threshold: 10_000.0,
            points: 30.0,
        },
        SignalRule::HourBefore {
            hour: 6,
            points: 25.0,
        },
        SignalRule::HourAfter {
            hour: 22,
            points: 20.0,
        },
        SignalRule::VelocityAbove {
            max_per_hour: 5,
            points: 30.0,
        },
        SignalRule::NewRecipient { points: 25.0 },
    ]
}

/// Outcome of running every rule against one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Rule-engine score, clamped to [0, 100]
    pub score: f64,
    /// Reasons for every triggered rule, in rule declaration order
    pub reasons: Vec<String>,
    /// Number of rules that fired
    pub triggered: usize,
}

/// Ordered collection of signal rules owning the additive scoring policy
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<SignalRule>,
}

impl RuleSet {
    /// Create a rule set, rejecting rules with negative points
    pub fn new(rules: Vec<SignalRule>) -> Result<Self> {
        for (index, rule) in rules.iter().enumerate() {
            if rule.points() < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "rule {} has negative points {}",
                    index,
                    rule.points()
                )));
            }
        }
        Ok(Self { rules })
    }

    /// The configured rules, in declaration order
    pub fn rules(&self) -> &[SignalRule] {
        &self.rules
    }

    /// Score a record against every rule
    ///
    /// Per-rule contributions are summed unclamped; the total is clamped to
    /// [0, 100] once at the end. A record that triggers nothing scores
    /// `(0, [], 0)`.
    pub fn score(&self, record: &FeatureRecord) -> RuleOutcome {
        let mut total = 0.0;
        let mut reasons = Vec::new();

        for rule in &self.rules {
            if let Some(contribution) = rule.evaluate(record) {
                total += contribution.points;
                reasons.push(contribution.reason);
            }
        }

        let triggered = reasons.len();
        RuleOutcome {
            score: total.clamp(0.0, 100.0),
            reasons,
            triggered,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

// Indian digit grouping: last three digits, then groups of two
// (50000 -> "50,000", 100000 -> "1,00,000").
fn format_inr(value: f64) -> String {
    let digits = (value.round().abs() as i64).to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
