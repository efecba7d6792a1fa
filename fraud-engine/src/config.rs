//! Engine configuration
//!
//! Everything the scoring engine needs at startup (rule table, fusion
//! weights, score bands) lives here so operators can retune without code
//! changes. The default configuration is the documented baseline.

use crate::classifier::RiskBands;
use crate::fusion::FusionPolicy;
use crate::rules::{default_rules, SignalRule};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static configuration consumed by the engine at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Signal rules in evaluation order
    pub rules: Vec<SignalRule>,
    /// Fusion weight vector
    pub fusion: FusionPolicy,
    /// Score-to-tier bands
    pub bands: RiskBands,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            fusion: FusionPolicy::default(),
            bands: RiskBands::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Load a configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::InvalidConfig(format!(
                "cannot read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&raw)
    }
}
