//! Pure scoring functions.
//!
//! Inherent risk is the product of the impact and likelihood weights;
//! residual risk scales it by a modality's mitigation factor. Nothing here
//! holds state, so recomputing a risk after an edit is just calling these
//! again with the current inputs.

pub mod bands;

pub use bands::{BandThresholds, RiskBand};

use crate::errors::{RegisterError, Result};
use crate::scales::{Level, ScaleKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of inherent risk that survives a modality, within `[0, 1]`.
///
/// `0.0` means the modality eliminates the risk, `1.0` means no mitigation.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MitigationFactor(f64);

impl MitigationFactor {
    pub const NONE: MitigationFactor = MitigationFactor(1.0);
    pub const FULL: MitigationFactor = MitigationFactor(0.0);

    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RegisterError::validation(format!(
                "mitigation factor must be within [0.0, 1.0], got {value}"
            )))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for MitigationFactor {
    fn default() -> Self {
        Self::NONE
    }
}

impl TryFrom<f64> for MitigationFactor {
    type Error = RegisterError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MitigationFactor> for f64 {
    fn from(factor: MitigationFactor) -> f64 {
        factor.0
    }
}

impl fmt::Display for MitigationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A risk value paired with its band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub value: f64,
    pub classification: RiskBand,
}

/// `impact.weight * likelihood.weight`, classified with `thresholds`.
pub fn compute_inherent_risk_with(
    impact: Level,
    likelihood: Level,
    thresholds: &BandThresholds,
) -> Assessment {
    let weight =
        ScaleKind::Impact.level(impact).weight * ScaleKind::Likelihood.level(likelihood).weight;
    let value = f64::from(weight);
    Assessment {
        value,
        classification: thresholds.classify(value),
    }
}

pub fn compute_inherent_risk(impact: Level, likelihood: Level) -> Assessment {
    compute_inherent_risk_with(impact, likelihood, &BandThresholds::default())
}

/// `inherent_risk * factor`, classified on the same bands as inherent risk.
pub fn compute_residual_risk_with(
    inherent_risk: f64,
    factor: MitigationFactor,
    thresholds: &BandThresholds,
) -> Assessment {
    let value = inherent_risk * factor.value();
    Assessment {
        value,
        classification: thresholds.classify(value),
    }
}

pub fn compute_residual_risk(inherent_risk: f64, factor: MitigationFactor) -> Assessment {
    compute_residual_risk_with(inherent_risk, factor, &BandThresholds::default())
}

/// Percentage of risk removed by a factor: `(1 - factor) * 100`.
pub fn compute_efficacy(factor: MitigationFactor) -> f64 {
    (1.0 - factor.value()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_impact_medium_likelihood_is_high() {
        let inherent = compute_inherent_risk(Level::High, Level::Medium);
        assert_eq!(inherent.value, 40.0);
        assert_eq!(inherent.classification, RiskBand::High);
    }

    #[test]
    fn test_inherent_range_endpoints() {
        assert_eq!(
            compute_inherent_risk(Level::VeryLow, Level::VeryLow).value,
            1.0
        );
        assert_eq!(
            compute_inherent_risk(Level::VeryHigh, Level::VeryHigh).value,
            100.0
        );
    }

    #[test]
    fn test_inherent_band_boundaries_on_scale_products() {
        // 5 * 2 = 10, 5 * 5 = 25
        assert_eq!(
            compute_inherent_risk(Level::Medium, Level::Low).classification,
            RiskBand::Low
        );
        assert_eq!(
            compute_inherent_risk(Level::Medium, Level::Medium).classification,
            RiskBand::Medium
        );
    }

    #[test]
    fn test_residual_of_forty_at_point_six() {
        let factor = MitigationFactor::new(0.6).unwrap();
        let residual = compute_residual_risk(40.0, factor);
        assert!((residual.value - 24.0).abs() < 1e-9);
        assert_eq!(residual.classification, RiskBand::Medium);
        assert!((compute_efficacy(factor) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_factor_extremes() {
        assert_eq!(compute_residual_risk(64.0, MitigationFactor::FULL).value, 0.0);
        assert_eq!(compute_residual_risk(64.0, MitigationFactor::NONE).value, 64.0);
        assert_eq!(compute_efficacy(MitigationFactor::FULL), 100.0);
        assert_eq!(compute_efficacy(MitigationFactor::NONE), 0.0);
    }

    #[test]
    fn test_factor_out_of_range_rejected() {
        assert!(MitigationFactor::new(-0.01).is_err());
        assert!(MitigationFactor::new(1.01).is_err());
        assert!(MitigationFactor::new(f64::NAN).is_err());
        assert!(MitigationFactor::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_factor_deserialization_validates() {
        let ok: MitigationFactor = serde_json::from_str("0.25").unwrap();
        assert_eq!(ok.value(), 0.25);
        assert!(serde_json::from_str::<MitigationFactor>("1.5").is_err());
    }
}
