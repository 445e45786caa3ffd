use super::modality::ModalityId;
use crate::scales::Level;
use crate::scoring::{
    compute_inherent_risk_with, compute_residual_risk_with, BandThresholds, MitigationFactor,
    RiskBand,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Placeholder stored for justifications missing from older registers.
pub const LEGACY_JUSTIFICATION: &str = ".";

/// Stable risk identifier. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub u64);

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// Mitigation of one risk under one modality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mitigation {
    pub factor: MitigationFactor,
    #[serde(default = "legacy_justification")]
    pub justification: String,
    /// Derived: `inherent_risk * factor`
    #[serde(default)]
    pub residual_risk: f64,
    /// Derived: band of `residual_risk`
    #[serde(default)]
    pub residual_classification: RiskBand,
}

impl Mitigation {
    pub fn new(factor: MitigationFactor, justification: impl Into<String>) -> Self {
        Self {
            factor,
            justification: justification.into(),
            residual_risk: 0.0,
            residual_classification: RiskBand::Low,
        }
    }

    fn reassess(&mut self, inherent_risk: f64, thresholds: &BandThresholds) {
        let residual = compute_residual_risk_with(inherent_risk, self.factor, thresholds);
        self.residual_risk = residual.value;
        self.residual_classification = residual.classification;
    }
}

/// One identified risk with its scores and per-modality mitigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub impact_level: Level,
    pub likelihood_level: Level,
    #[serde(default = "legacy_justification")]
    pub impact_justification: String,
    #[serde(default = "legacy_justification")]
    pub probability_justification: String,
    /// Derived: impact weight * likelihood weight
    #[serde(default)]
    pub inherent_risk: f64,
    /// Derived: band of `inherent_risk`
    #[serde(default)]
    pub classification: RiskBand,
    pub mitigation: BTreeMap<ModalityId, Mitigation>,
}

fn legacy_justification() -> String {
    LEGACY_JUSTIFICATION.to_string()
}

impl Risk {
    /// Re-derive inherent and residual values from the current levels and factors.
    pub fn recompute(&mut self, thresholds: &BandThresholds) {
        let inherent =
            compute_inherent_risk_with(self.impact_level, self.likelihood_level, thresholds);
        self.inherent_risk = inherent.value;
        self.classification = inherent.classification;
        for mitigation in self.mitigation.values_mut() {
            mitigation.reassess(inherent.value, thresholds);
        }
    }

    pub(crate) fn set_mitigation(
        &mut self,
        modality: ModalityId,
        mitigation: Mitigation,
        thresholds: &BandThresholds,
    ) {
        let mut mitigation = mitigation;
        mitigation.reassess(self.inherent_risk, thresholds);
        self.mitigation.insert(modality, mitigation);
    }

    pub(crate) fn set_factor(
        &mut self,
        modality: ModalityId,
        factor: MitigationFactor,
        thresholds: &BandThresholds,
    ) {
        let inherent_risk = self.inherent_risk;
        let entry = self
            .mitigation
            .entry(modality)
            .or_insert_with(|| Mitigation::new(factor, String::new()));
        entry.factor = factor;
        entry.reassess(inherent_risk, thresholds);
    }

    pub fn mitigation_for(&self, modality: ModalityId) -> Option<&Mitigation> {
        self.mitigation.get(&modality)
    }

    /// Residual risk under `modality`, if this risk has an entry for it.
    pub fn residual_for(&self, modality: ModalityId) -> Option<f64> {
        self.mitigation.get(&modality).map(|m| m.residual_risk)
    }

    pub fn modality_keys(&self) -> BTreeSet<ModalityId> {
        self.mitigation.keys().copied().collect()
    }
}

/// Factor supplied for one modality by name.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorInput {
    pub modality: String,
    pub factor: f64,
    pub justification: Option<String>,
}

/// Input for registering a new risk.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskDraft {
    pub name: String,
    pub description: String,
    pub impact_level: Level,
    pub likelihood_level: Level,
    pub impact_justification: String,
    pub probability_justification: String,
    pub factors: Vec<FactorInput>,
}

impl RiskDraft {
    pub fn new(name: impl Into<String>, impact_level: Level, likelihood_level: Level) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            impact_level,
            likelihood_level,
            impact_justification: String::new(),
            probability_justification: String::new(),
            factors: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn justifications(
        mut self,
        impact: impl Into<String>,
        probability: impl Into<String>,
    ) -> Self {
        self.impact_justification = impact.into();
        self.probability_justification = probability.into();
        self
    }

    pub fn factor(mut self, modality: impl Into<String>, factor: f64) -> Self {
        self.factors.push(FactorInput {
            modality: modality.into(),
            factor,
            justification: None,
        });
        self
    }

    pub fn justified_factor(
        mut self,
        modality: impl Into<String>,
        factor: f64,
        justification: impl Into<String>,
    ) -> Self {
        self.factors.push(FactorInput {
            modality: modality.into(),
            factor,
            justification: Some(justification.into()),
        });
        self
    }
}

/// Partial update of an existing risk; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub impact_level: Option<Level>,
    pub likelihood_level: Option<Level>,
    pub impact_justification: Option<String>,
    pub probability_justification: Option<String>,
    /// Only the listed modalities change
    pub factors: Vec<FactorInput>,
}

impl RiskEdit {
    pub fn is_empty(&self) -> bool {
        *self == RiskEdit::default()
    }

    pub fn levels(mut self, impact: Level, likelihood: Level) -> Self {
        self.impact_level = Some(impact);
        self.likelihood_level = Some(likelihood);
        self
    }

    pub fn factor(mut self, modality: impl Into<String>, factor: f64) -> Self {
        self.factors.push(FactorInput {
            modality: modality.into(),
            factor,
            justification: None,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_risk() -> Risk {
        let mut risk = Risk {
            id: RiskId(1),
            name: "Delivery deadline missed".into(),
            description: String::new(),
            impact_level: Level::High,
            likelihood_level: Level::Medium,
            impact_justification: "rent keeps running".into(),
            probability_justification: "complex site".into(),
            inherent_risk: 0.0,
            classification: RiskBand::Low,
            mitigation: BTreeMap::new(),
        };
        risk.mitigation.insert(
            ModalityId(1),
            Mitigation::new(MitigationFactor::new(0.6).unwrap(), ""),
        );
        risk.recompute(&BandThresholds::default());
        risk
    }

    #[test]
    fn test_recompute_derives_inherent_and_residual() {
        let risk = sample_risk();
        assert_eq!(risk.inherent_risk, 40.0);
        assert_eq!(risk.classification, RiskBand::High);
        let mitigation = risk.mitigation_for(ModalityId(1)).unwrap();
        assert!((mitigation.residual_risk - 24.0).abs() < 1e-9);
        assert_eq!(mitigation.residual_classification, RiskBand::Medium);
    }

    #[test]
    fn test_level_change_propagates_to_residuals() {
        let mut risk = sample_risk();
        risk.impact_level = Level::Low;
        risk.recompute(&BandThresholds::default());
        assert_eq!(risk.inherent_risk, 10.0);
        assert!((risk.residual_for(ModalityId(1)).unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_factor_keeps_justification() {
        let mut risk = sample_risk();
        risk.mitigation.get_mut(&ModalityId(1)).unwrap().justification = "guarantees".into();
        risk.set_factor(
            ModalityId(1),
            MitigationFactor::FULL,
            &BandThresholds::default(),
        );
        let mitigation = risk.mitigation_for(ModalityId(1)).unwrap();
        assert_eq!(mitigation.residual_risk, 0.0);
        assert_eq!(mitigation.justification, "guarantees");
    }

    #[test]
    fn test_legacy_record_gets_placeholder_justifications() {
        let json = r#"{
            "id": 3,
            "name": "Budget shortfall",
            "impact_level": "high",
            "likelihood_level": "low",
            "mitigation": {"1": {"factor": 0.5}}
        }"#;
        let risk: Risk = serde_json::from_str(json).unwrap();
        assert_eq!(risk.impact_justification, LEGACY_JUSTIFICATION);
        assert_eq!(risk.probability_justification, LEGACY_JUSTIFICATION);
        let mitigation = risk.mitigation_for(ModalityId(1)).unwrap();
        assert_eq!(mitigation.factor.value(), 0.5);
        assert_eq!(mitigation.justification, LEGACY_JUSTIFICATION);
    }

    #[test]
    fn test_empty_edit() {
        assert!(RiskEdit::default().is_empty());
        assert!(!RiskEdit::default().factor("A", 0.5).is_empty());
    }
}
