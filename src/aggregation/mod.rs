//! Per-modality aggregation and ranking.
//!
//! Aggregates are always derived from the current risks; nothing is cached,
//! so calling these after any edit gives the up-to-date picture.

pub mod summary;

pub use summary::{
    residual_matrix, risk_matrix, BandCounts, RegisterSummary, ResidualMatrix, ResidualRow,
    RiskMatrix,
};

use crate::register::{Modality, ModalityId, Risk, RiskRegister};
use crate::scoring::{compute_residual_risk_with, BandThresholds, RiskBand};
use serde::Serialize;
use std::cmp::Ordering;

/// Totals for one modality across every risk that has an entry for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalityAggregate {
    pub modality_id: ModalityId,
    pub modality_name: String,
    pub total_residual_risk: f64,
    pub total_inherent_risk_applicable: f64,
    pub efficacy_percent: f64,
    /// Band of the total residual risk
    pub classification: RiskBand,
    /// Mean residual risk per applicable risk
    pub average_residual_risk: f64,
    /// Band of the mean, comparable with per-risk bands
    pub average_classification: RiskBand,
    pub risk_count: usize,
}

pub fn aggregate_by_modality(risks: &[Risk], modalities: &[Modality]) -> Vec<ModalityAggregate> {
    aggregate_by_modality_with(risks, modalities, &BandThresholds::default())
}

/// One aggregate per modality, in registry order.
///
/// Risks without an entry for a modality are skipped for that modality, so
/// a register caught mid-update still aggregates.
pub fn aggregate_by_modality_with(
    risks: &[Risk],
    modalities: &[Modality],
    thresholds: &BandThresholds,
) -> Vec<ModalityAggregate> {
    modalities
        .iter()
        .map(|modality| aggregate_modality(risks, modality, thresholds))
        .collect()
}

fn aggregate_modality(
    risks: &[Risk],
    modality: &Modality,
    thresholds: &BandThresholds,
) -> ModalityAggregate {
    let (total_inherent, total_residual, count) = risks
        .iter()
        .filter_map(|risk| {
            risk.mitigation_for(modality.id).map(|mitigation| {
                let residual =
                    compute_residual_risk_with(risk.inherent_risk, mitigation.factor, thresholds);
                (risk.inherent_risk, residual.value)
            })
        })
        .fold((0.0, 0.0, 0usize), |(inherent, residual, count), (i, r)| {
            (inherent + i, residual + r, count + 1)
        });

    let efficacy_percent = if total_inherent > 0.0 {
        (total_inherent - total_residual) / total_inherent * 100.0
    } else {
        0.0
    };
    let average_residual_risk = if count > 0 {
        total_residual / count as f64
    } else {
        0.0
    };

    ModalityAggregate {
        modality_id: modality.id,
        modality_name: modality.name.clone(),
        total_residual_risk: total_residual,
        total_inherent_risk_applicable: total_inherent,
        efficacy_percent,
        classification: thresholds.classify(total_residual),
        average_residual_risk,
        average_classification: thresholds.classify(average_residual_risk),
        risk_count: count,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedModality {
    /// 1-based position; 1 is the recommended modality
    pub rank: usize,
    pub is_recommended: bool,
    pub is_least_recommended: bool,
    #[serde(flatten)]
    pub aggregate: ModalityAggregate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModalityRanking {
    entries: Vec<RankedModality>,
}

impl ModalityRanking {
    pub fn entries(&self) -> &[RankedModality] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Modality with the lowest total residual risk.
    pub fn best(&self) -> Option<&RankedModality> {
        self.entries.first()
    }

    /// Modality with the highest total residual risk.
    pub fn worst(&self) -> Option<&RankedModality> {
        self.entries.last()
    }

    pub fn order(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|e| e.aggregate.modality_name.as_str())
            .collect()
    }

    pub fn rank_of(&self, modality_name: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.aggregate.modality_name == modality_name)
            .map(|e| e.rank)
    }
}

/// Total residual ascending, then efficacy descending, then name, then id.
pub fn compare_aggregates(a: &ModalityAggregate, b: &ModalityAggregate) -> Ordering {
    a.total_residual_risk
        .total_cmp(&b.total_residual_risk)
        .then_with(|| b.efficacy_percent.total_cmp(&a.efficacy_percent))
        .then_with(|| a.modality_name.cmp(&b.modality_name))
        .then_with(|| a.modality_id.cmp(&b.modality_id))
}

pub fn rank_modalities(mut aggregates: Vec<ModalityAggregate>) -> ModalityRanking {
    aggregates.sort_by(compare_aggregates);
    let last = aggregates.len();
    let entries = aggregates
        .into_iter()
        .enumerate()
        .map(|(index, aggregate)| RankedModality {
            rank: index + 1,
            is_recommended: index == 0,
            is_least_recommended: index + 1 == last,
            aggregate,
        })
        .collect();
    ModalityRanking { entries }
}

impl RiskRegister {
    pub fn aggregates(&self) -> Vec<ModalityAggregate> {
        aggregate_by_modality_with(self.risks(), self.modalities().as_slice(), self.thresholds())
    }

    pub fn ranking(&self) -> ModalityRanking {
        rank_modalities(self.aggregates())
    }
}
