//! The risk register: risks, modalities and the operations that mutate them.
//!
//! [`RiskRegister`] owns both collections so it can keep every risk's
//! mitigation map keyed by exactly the registered modalities. Each
//! operation validates its whole input before writing anything; an `Err`
//! leaves the register as it was.

pub mod modality;
pub mod risk;
pub mod snapshot;

pub use modality::{Modality, ModalityId, ModalityRegistry};
pub use risk::{FactorInput, Mitigation, Risk, RiskDraft, RiskEdit, RiskId, LEGACY_JUSTIFICATION};
pub use snapshot::RegisterSnapshot;

use crate::errors::{RegisterError, Result};
use crate::scoring::{BandThresholds, MitigationFactor, RiskBand};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Scoring parameters shared by every risk in a register.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub thresholds: BandThresholds,
    /// Factor given to existing risks when a modality is added
    pub default_factor: MitigationFactor,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            thresholds: BandThresholds::default(),
            default_factor: MitigationFactor::NONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskRegister {
    project_name: String,
    policy: ScoringPolicy,
    modalities: ModalityRegistry,
    risks: Vec<Risk>,
    next_risk_id: u64,
}

impl RiskRegister {
    pub fn new(project_name: impl Into<String>, policy: ScoringPolicy) -> Self {
        Self {
            project_name: project_name.into(),
            policy,
            modalities: ModalityRegistry::new(),
            risks: Vec::new(),
            next_risk_id: 1,
        }
    }

    /// New register seeded with `names` in order.
    pub fn with_modalities<S: AsRef<str>>(
        project_name: impl Into<String>,
        policy: ScoringPolicy,
        names: &[S],
    ) -> Result<Self> {
        let mut register = Self::new(project_name, policy);
        for name in names {
            register.add_modality(name.as_ref())?;
        }
        Ok(register)
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn thresholds(&self) -> &BandThresholds {
        &self.policy.thresholds
    }

    pub fn modalities(&self) -> &ModalityRegistry {
        &self.modalities
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn risk(&self, id: RiskId) -> Result<&Risk> {
        self.risks
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| RegisterError::risk_not_found(id))
    }

    pub fn set_project_name(&mut self, name: &str) -> Result<()> {
        self.project_name = required_text("project name", name)?;
        info!(project = %self.project_name, "Project renamed");
        Ok(())
    }

    /// Register a new risk. Every current modality needs a factor.
    pub fn register_risk(&mut self, draft: RiskDraft) -> Result<RiskId> {
        let name = required_text("risk name", &draft.name)?;
        required_text("impact justification", &draft.impact_justification)?;
        required_text("probability justification", &draft.probability_justification)?;

        let supplied = self.resolve_factors(&draft.factors)?;
        let missing: Vec<&str> = self
            .modalities
            .iter()
            .filter(|m| !supplied.contains_key(&m.id))
            .map(|m| m.name.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(RegisterError::validation(format!(
                "missing mitigation factor for: {}",
                missing.join(", ")
            )));
        }

        let id = RiskId(self.next_risk_id);
        let mut risk = Risk {
            id,
            name,
            description: draft.description,
            impact_level: draft.impact_level,
            likelihood_level: draft.likelihood_level,
            impact_justification: draft.impact_justification,
            probability_justification: draft.probability_justification,
            inherent_risk: 0.0,
            classification: RiskBand::Low,
            mitigation: supplied
                .into_iter()
                .map(|(modality, (factor, justification))| {
                    (
                        modality,
                        Mitigation::new(factor, justification.unwrap_or_default()),
                    )
                })
                .collect(),
        };
        risk.recompute(&self.policy.thresholds);

        info!(
            risk_id = %id,
            name = %risk.name,
            inherent = risk.inherent_risk,
            classification = %risk.classification,
            "Risk registered"
        );
        self.next_risk_id += 1;
        self.risks.push(risk);
        Ok(id)
    }

    /// Apply a partial edit and recompute the risk's derived fields.
    pub fn edit_risk(&mut self, id: RiskId, edit: RiskEdit) -> Result<&Risk> {
        let index = self.risk_index(id)?;
        let supplied = self.resolve_factors(&edit.factors)?;

        let mut updated = self.risks[index].clone();
        if let Some(name) = &edit.name {
            updated.name = required_text("risk name", name)?;
        }
        if let Some(description) = edit.description {
            updated.description = description;
        }
        if let Some(text) = edit.impact_justification {
            required_text("impact justification", &text)?;
            updated.impact_justification = text;
        }
        if let Some(text) = edit.probability_justification {
            required_text("probability justification", &text)?;
            updated.probability_justification = text;
        }
        if let Some(level) = edit.impact_level {
            updated.impact_level = level;
        }
        if let Some(level) = edit.likelihood_level {
            updated.likelihood_level = level;
        }
        for (modality, (factor, justification)) in supplied {
            let entry = updated
                .mitigation
                .entry(modality)
                .or_insert_with(|| Mitigation::new(factor, String::new()));
            entry.factor = factor;
            if let Some(text) = justification {
                entry.justification = text;
            }
        }
        updated.recompute(&self.policy.thresholds);

        info!(
            risk_id = %id,
            inherent = updated.inherent_risk,
            classification = %updated.classification,
            "Risk edited"
        );
        self.risks[index] = updated;
        Ok(&self.risks[index])
    }

    pub fn remove_risk(&mut self, id: RiskId) -> Result<Risk> {
        let index = self.risk_index(id)?;
        let removed = self.risks.remove(index);
        info!(risk_id = %id, name = %removed.name, "Risk removed");
        Ok(removed)
    }

    /// Append a modality and give every existing risk the default factor for it.
    pub fn add_modality(&mut self, name: &str) -> Result<ModalityId> {
        let id = self.modalities.insert(name)?;
        let default_factor = self.policy.default_factor;
        for risk in &mut self.risks {
            risk.set_mitigation(
                id,
                Mitigation::new(default_factor, String::new()),
                &self.policy.thresholds,
            );
        }
        info!(
            modality_id = %id,
            name = name.trim(),
            default_factor = default_factor.value(),
            risks = self.risks.len(),
            "Modality added"
        );
        Ok(id)
    }

    /// Remove a modality and its mitigation entry from every risk.
    pub fn remove_modality(&mut self, name: &str) -> Result<Modality> {
        let removed = self.modalities.remove(name)?;
        for risk in &mut self.risks {
            risk.mitigation.remove(&removed.id);
        }
        info!(modality_id = %removed.id, name = %removed.name, "Modality removed");
        Ok(removed)
    }

    /// Change a modality's display name. Mitigation entries are keyed by id
    /// and stay untouched.
    pub fn rename_modality(&mut self, old: &str, new: &str) -> Result<ModalityId> {
        let id = self.modalities.rename(old, new)?;
        info!(modality_id = %id, from = old.trim(), to = new.trim(), "Modality renamed");
        Ok(id)
    }

    /// Overwrite `modality`'s factor on every risk. Returns the number of
    /// risks updated.
    pub fn apply_bulk_mitigation(&mut self, modality: &str, factor: f64) -> Result<usize> {
        self.reassess_modalities(&[(modality.to_string(), factor)])
    }

    /// Apply several bulk overwrites as one operation: either every pair is
    /// valid and all are applied, or nothing changes.
    pub fn reassess_modalities(&mut self, factors: &[(String, f64)]) -> Result<usize> {
        let mut resolved: BTreeMap<ModalityId, MitigationFactor> = BTreeMap::new();
        for (name, value) in factors {
            let id = self.modalities.resolve(name)?.id;
            let factor = MitigationFactor::new(*value)?;
            if resolved.insert(id, factor).is_some() {
                return Err(RegisterError::validation(format!(
                    "modality '{}' listed more than once",
                    name.trim()
                )));
            }
        }

        for risk in &mut self.risks {
            for (&modality, &factor) in &resolved {
                risk.set_factor(modality, factor, &self.policy.thresholds);
            }
        }
        debug!(
            modalities = resolved.len(),
            risks = self.risks.len(),
            "Bulk mitigation applied"
        );
        Ok(self.risks.len())
    }

    pub fn set_mitigation_justification(
        &mut self,
        risk: RiskId,
        modality: &str,
        justification: impl Into<String>,
    ) -> Result<()> {
        let modality_id = self.modalities.resolve(modality)?.id;
        let index = self.risk_index(risk)?;
        let entry = self.risks[index]
            .mitigation
            .get_mut(&modality_id)
            .ok_or_else(|| {
                RegisterError::invariant(format!("{risk} has no entry for {modality_id}"))
            })?;
        entry.justification = justification.into();
        Ok(())
    }

    /// Check that every risk's mitigation keys equal the registered modalities.
    pub fn check_invariants(&self) -> Result<()> {
        let expected = self.modalities.ids();
        let mut seen = BTreeSet::new();
        for risk in &self.risks {
            if !seen.insert(risk.id) {
                return Err(RegisterError::invariant(format!(
                    "risk id {} is used twice",
                    risk.id
                )));
            }
            if risk.id.0 >= self.next_risk_id {
                return Err(RegisterError::invariant(format!(
                    "risk id {} is not below the next id {}",
                    risk.id, self.next_risk_id
                )));
            }
            let keys = risk.modality_keys();
            if keys != expected {
                let stale: Vec<String> = keys
                    .difference(&expected)
                    .map(|id| id.to_string())
                    .collect();
                let missing: Vec<String> = expected
                    .difference(&keys)
                    .map(|id| id.to_string())
                    .collect();
                warn!(
                    risk_id = %risk.id,
                    ?stale,
                    ?missing,
                    "Mitigation keys diverge from registry"
                );
                return Err(RegisterError::invariant(format!(
                    "{} mitigation keys diverge from the modality registry (stale: [{}], missing: [{}])",
                    risk.id,
                    stale.join(", "),
                    missing.join(", ")
                )));
            }
        }
        Ok(())
    }

    fn risk_index(&self, id: RiskId) -> Result<usize> {
        self.risks
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| RegisterError::risk_not_found(id))
    }

    /// Resolve named factor inputs to ids, validating every value.
    fn resolve_factors(
        &self,
        inputs: &[FactorInput],
    ) -> Result<BTreeMap<ModalityId, (MitigationFactor, Option<String>)>> {
        let mut resolved = BTreeMap::new();
        for input in inputs {
            let id = self.modalities.resolve(&input.modality)?.id;
            let factor = MitigationFactor::new(input.factor)?;
            if resolved
                .insert(id, (factor, input.justification.clone()))
                .is_some()
            {
                return Err(RegisterError::validation(format!(
                    "modality '{}' listed more than once",
                    input.modality.trim()
                )));
            }
        }
        Ok(resolved)
    }
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegisterError::validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}
