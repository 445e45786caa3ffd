use super::{Modality, ModalityRegistry, Risk, RiskRegister, ScoringPolicy};
use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// Serializable form of a [`RiskRegister`], as exchanged with a session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterSnapshot {
    pub project_name: String,
    pub modalities: Vec<Modality>,
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub next_risk_id: u64,
    #[serde(default)]
    pub next_modality_id: u64,
}

impl RegisterSnapshot {
    pub fn from_register(register: &RiskRegister) -> Self {
        Self {
            project_name: register.project_name.clone(),
            modalities: register.modalities.as_slice().to_vec(),
            risks: register.risks.clone(),
            next_risk_id: register.next_risk_id,
            next_modality_id: register.modalities.next_id(),
        }
    }

    /// Rebuild a register under `policy`.
    ///
    /// Derived scores stored in the snapshot are discarded and recomputed,
    /// then the modality-completeness invariant is checked.
    pub fn into_register(self, policy: ScoringPolicy) -> Result<RiskRegister> {
        let modalities = ModalityRegistry::from_parts(self.modalities, self.next_modality_id)?;
        let floor = self.risks.iter().map(|r| r.id.0 + 1).max().unwrap_or(1);

        let mut risks = self.risks;
        for risk in &mut risks {
            risk.recompute(&policy.thresholds);
        }

        let register = RiskRegister {
            project_name: self.project_name,
            policy,
            modalities,
            risks,
            next_risk_id: self.next_risk_id.max(floor),
        };
        register.check_invariants()?;
        Ok(register)
    }
}

impl RiskRegister {
    pub fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot::from_register(self)
    }

    pub fn from_snapshot(snapshot: RegisterSnapshot, policy: ScoringPolicy) -> Result<Self> {
        snapshot.into_register(policy)
    }
}
