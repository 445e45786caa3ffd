use crate::errors::{RegisterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification band derived from a numeric risk value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskBand {
    #[default]
    Low, // value <= 10
    Medium, // 10 < value <= 25
    High, // value > 25
}

impl RiskBand {
    pub const ALL: [RiskBand; 3] = [RiskBand::Low, RiskBand::Medium, RiskBand::High];

    /// Classify with the canonical thresholds.
    pub fn classify(value: f64) -> RiskBand {
        BandThresholds::default().classify(value)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low",
            RiskBand::Medium => "Medium",
            RiskBand::High => "High",
        }
    }

    /// Hex colour used by chart-oriented consumers.
    pub fn color_hint(&self) -> &'static str {
        match self {
            RiskBand::Low => "#28a745",
            RiskBand::Medium => "#ffc107",
            RiskBand::High => "#dc3545",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bounds (inclusive) of the Low and Medium bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    #[serde(default = "default_low_max")]
    pub low_max: f64,
    #[serde(default = "default_medium_max")]
    pub medium_max: f64,
}

fn default_low_max() -> f64 {
    10.0
}

fn default_medium_max() -> f64 {
    25.0
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            low_max: default_low_max(),
            medium_max: default_medium_max(),
        }
    }
}

impl BandThresholds {
    pub fn new(low_max: f64, medium_max: f64) -> Result<Self> {
        let thresholds = Self {
            low_max,
            medium_max,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.low_max.is_finite() || !self.medium_max.is_finite() {
            return Err(RegisterError::validation(
                "band thresholds must be finite numbers",
            ));
        }
        if self.low_max <= 0.0 || self.low_max >= self.medium_max {
            return Err(RegisterError::validation(format!(
                "band thresholds must satisfy 0 < low_max < medium_max (got {} and {})",
                self.low_max, self.medium_max
            )));
        }
        Ok(())
    }

    pub fn classify(&self, value: f64) -> RiskBand {
        if value <= self.low_max {
            RiskBand::Low
        } else if value <= self.medium_max {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }
}
