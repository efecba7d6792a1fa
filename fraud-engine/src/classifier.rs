//! Score bands and risk classification

use crate::types::RiskLevel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One score band mapped to a risk tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Tier assigned to scores in this band
    pub level: RiskLevel,
    /// Inclusive lower bound
    pub from: f64,
    /// Exclusive upper bound (the final band additionally includes its
    /// upper bound, so 100 classifies)
    pub to: f64,
}

/// Ordered score bands covering [0, 100]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskBands {
    /// Bands in ascending score order
    pub bands: Vec<Band>,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            bands: vec![
                Band {
                    level: RiskLevel::Low,
                    from: 0.0,
                    to: 40.0,
                },
                Band {
                    level: RiskLevel::Medium,
                    from: 40.0,
                    to: 70.0,
                },
                Band {
                    level: RiskLevel::High,
                    from: 70.0,
                    to: 100.0,
                },
            ],
        }
    }
}

impl RiskBands {
    /// Validate that the bands are contiguous, non-overlapping, and cover
    /// [0, 100] exactly
    ///
    /// A gap in the score range would leave some scores unclassifiable, so
    /// a malformed configuration is fatal.
    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(Error::InvalidConfig("no risk bands configured".to_string()));
        }

        let first = &self.bands[0];
        if first.from != 0.0 {
            return Err(Error::InvalidConfig(format!(
                "first band must start at 0, starts at {}",
                first.from
            )));
        }

        let mut previous_to = first.from;
        for band in &self.bands {
            if band.from != previous_to {
                return Err(Error::InvalidConfig(format!(
                    "band for {} starts at {} but the previous band ends at {previous_to}",
                    band.level, band.from
                )));
            }
            if band.to <= band.from {
                return Err(Error::InvalidConfig(format!(
                    "band for {} is empty or inverted ({}..{})",
                    band.level, band.from, band.to
                )));
            }
            previous_to = band.to;
        }

        if previous_to != 100.0 {
            return Err(Error::InvalidConfig(format!(
                "bands must end at 100, end at {previous_to}"
            )));
        }

        Ok(())
    }
}

/// Maps a unified score to a risk tier
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    bands: RiskBands,
}

impl RiskClassifier {
    /// Create a classifier, validating the bands at startup
    pub fn new(bands: RiskBands) -> Result<Self> {
        bands.validate()?;
        Ok(Self { bands })
    }

    /// Classify a score in [0, 100]
    ///
    /// Out-of-range inputs are clamped to the covered range so every call
    /// returns exactly one tier.
    pub fn classify(&self, score: f64) -> RiskLevel {
        let score = score.clamp(0.0, 100.0);
        for band in &self.bands.bands {
            if score >= band.from && score < band.to {
                return band.level;
            }
        }
        // score == 100: the final band includes its upper bound
        self.bands.bands[self.bands.bands.len() - 1].level
    }

    /// The validated band configuration
    pub fn bands(&self) -> &RiskBands {
        &self.bands
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self {
            bands: RiskBands::default(),
        }
    }
}
