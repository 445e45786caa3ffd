use super::ModalityRanking;
use crate::register::{RiskId, RiskRegister};
use crate::scales::Level;
use crate::scoring::{compute_residual_risk_with, MitigationFactor, RiskBand};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BandCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl BandCounts {
    pub fn record(&mut self, band: RiskBand) {
        match band {
            RiskBand::Low => self.low += 1,
            RiskBand::Medium => self.medium += 1,
            RiskBand::High => self.high += 1,
        }
    }

    pub fn get(&self, band: RiskBand) -> usize {
        match band {
            RiskBand::Low => self.low,
            RiskBand::Medium => self.medium,
            RiskBand::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Headline figures for the executive summary of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterSummary {
    pub project_name: String,
    pub total_risks: usize,
    pub inherent_bands: BandCounts,
    pub total_inherent_risk: f64,
    pub modality_count: usize,
    pub best_modality: Option<String>,
    pub worst_modality: Option<String>,
}

impl RegisterSummary {
    pub fn from_register(register: &RiskRegister, ranking: &ModalityRanking) -> Self {
        let mut inherent_bands = BandCounts::default();
        for risk in register.risks() {
            inherent_bands.record(risk.classification);
        }
        Self {
            project_name: register.project_name().to_string(),
            total_risks: register.risks().len(),
            inherent_bands,
            total_inherent_risk: register.risks().iter().map(|r| r.inherent_risk).sum(),
            modality_count: register.modalities().len(),
            best_modality: ranking.best().map(|e| e.aggregate.modality_name.clone()),
            worst_modality: ranking.worst().map(|e| e.aggregate.modality_name.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualRow {
    pub risk_id: RiskId,
    pub risk_name: String,
    pub inherent_risk: f64,
    /// One value per modality, in registry order
    pub residuals: Vec<f64>,
}

/// Residual risk of every risk under every modality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualMatrix {
    pub modalities: Vec<String>,
    pub rows: Vec<ResidualRow>,
}

/// Build the risk x modality residual grid. A missing entry counts as
/// unmitigated.
pub fn residual_matrix(register: &RiskRegister) -> ResidualMatrix {
    let modalities = register.modalities();
    let rows = register
        .risks()
        .iter()
        .map(|risk| ResidualRow {
            risk_id: risk.id,
            risk_name: risk.name.clone(),
            inherent_risk: risk.inherent_risk,
            residuals: modalities
                .iter()
                .map(|modality| {
                    let factor = risk
                        .mitigation_for(modality.id)
                        .map_or(MitigationFactor::NONE, |m| m.factor);
                    compute_residual_risk_with(risk.inherent_risk, factor, register.thresholds())
                        .value
                })
                .collect(),
        })
        .collect();
    ResidualMatrix {
        modalities: modalities.names().into_iter().map(String::from).collect(),
        rows,
    }
}

/// Count of risks per (impact, likelihood) cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskMatrix {
    /// Indexed `[impact][likelihood]`, lowest level first
    pub cells: [[usize; 5]; 5],
}

impl RiskMatrix {
    pub fn count(&self, impact: Level, likelihood: Level) -> usize {
        self.cells[level_index(impact)][level_index(likelihood)]
    }
}

fn level_index(level: Level) -> usize {
    Level::ALL
        .iter()
        .position(|l| *l == level)
        .unwrap_or_default()
}

pub fn risk_matrix(register: &RiskRegister) -> RiskMatrix {
    let mut matrix = RiskMatrix::default();
    for risk in register.risks() {
        matrix.cells[level_index(risk.impact_level)][level_index(risk.likelihood_level)] += 1;
    }
    matrix
}
