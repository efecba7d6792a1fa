//! Schema-less transaction feature records
//!
//! Callers (CSV loaders, web forms, batch scripts) describe a transaction as
//! a flat map of named attributes. There is no fixed schema: evaluators read
//! the fields they care about with explicit defaults, so a missing field is
//! never an error.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single feature value: number, boolean, or text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Boolean flag
    Bool(bool),
    /// Numeric value (amounts, hours, counts)
    Number(f64),
    /// Free-form text (identifiers, categories)
    Text(String),
}

impl FeatureValue {
    /// Numeric view of the value. Booleans coerce to 0/1 and numeric text
    /// parses; non-numeric text yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            FeatureValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Truthy view of the value. Numbers are true when non-zero; text is
    /// true for "true"/"yes" or a non-zero numeric string.
    pub fn as_bool(&self) -> bool {
        match self {
            FeatureValue::Bool(b) => *b,
            FeatureValue::Number(n) => *n != 0.0,
            FeatureValue::Text(s) => {
                let t = s.trim();
                t.eq_ignore_ascii_case("true")
                    || t.eq_ignore_ascii_case("yes")
                    || t.parse::<f64>().map(|n| n != 0.0).unwrap_or(false)
            }
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<i64> for FeatureValue {
    fn from(value: i64) -> Self {
        FeatureValue::Number(value as f64)
    }
}

impl From<bool> for FeatureValue {
    fn from(value: bool) -> Self {
        FeatureValue::Bool(value)
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Text(value.to_string())
    }
}

impl From<String> for FeatureValue {
    fn from(value: String) -> Self {
        FeatureValue::Text(value)
    }
}

/// Immutable mapping from feature name to value describing one transaction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureRecord {
    values: BTreeMap<String, FeatureValue>,
}

impl FeatureRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature, consuming and returning the record
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Build a record from name/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FeatureValue>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    /// Coerce a raw JSON value into a feature record
    ///
    /// The value must be an object of scalar fields. Null fields are treated
    /// as absent; nested arrays or objects fail coercion.
    pub fn from_json(raw: &serde_json::Value) -> Result<Self> {
        let object = raw.as_object().ok_or_else(|| {
            Error::RecordCoercion(format!("expected a JSON object, got {}", json_kind(raw)))
        })?;

        let mut values = BTreeMap::new();
        for (name, value) in object {
            let coerced = match value {
                serde_json::Value::Bool(b) => FeatureValue::Bool(*b),
                serde_json::Value::Number(n) => {
                    FeatureValue::Number(n.as_f64().ok_or_else(|| {
                        Error::RecordCoercion(format!(
                            "field '{name}' is not representable as a number"
                        ))
                    })?)
                }
                serde_json::Value::String(s) => FeatureValue::Text(s.clone()),
                serde_json::Value::Null => continue,
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                    return Err(Error::RecordCoercion(format!(
                        "field '{name}' has a nested type, expected a scalar"
                    )));
                }
            };
            values.insert(name.clone(), coerced);
        }

        Ok(Self { values })
    }

    /// Look up a raw feature value
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.values.get(name)
    }

    /// Numeric feature with an explicit default for absent or non-numeric
    /// values
    pub fn number_or(&self, name: &str, default: f64) -> f64 {
        self.get(name)
            .and_then(FeatureValue::as_number)
            .unwrap_or(default)
    }

    /// Boolean feature; absent means false
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).map(FeatureValue::as_bool).unwrap_or(false)
    }

    /// Text feature, if present and textual
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(FeatureValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Number of features in the record
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record carries no features at all
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
