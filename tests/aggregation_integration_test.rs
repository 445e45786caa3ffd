use pretty_assertions::assert_eq;
use riskmap::aggregation::{
    aggregate_by_modality, rank_modalities, residual_matrix, ModalityAggregate, RegisterSummary,
};
use riskmap::assert_approx_eq;
use riskmap::register::{ModalityId, RiskEdit, RiskId, ScoringPolicy};
use riskmap::scales::Level;
use riskmap::scoring::{BandThresholds, RiskBand};
use riskmap::testkit::{generated_register, scenario_register, RegisterBuilder};

fn totals(totals: &[(&str, f64)]) -> Vec<ModalityAggregate> {
    totals
        .iter()
        .enumerate()
        .map(|(i, (name, total))| ModalityAggregate {
            modality_id: ModalityId(i as u64 + 1),
            modality_name: name.to_string(),
            total_residual_risk: *total,
            total_inherent_risk_applicable: 60.0,
            efficacy_percent: (60.0 - total) / 60.0 * 100.0,
            classification: RiskBand::classify(*total),
            average_residual_risk: *total,
            average_classification: RiskBand::classify(*total),
            risk_count: 1,
        })
        .collect()
}

#[test]
fn test_two_risks_under_one_modality() {
    let register = RegisterBuilder::new("HQ")
        .modalities(&["X"])
        .risk("First", Level::High, Level::Medium, &[0.5])
        .risk("Second", Level::Medium, Level::Low, &[1.0])
        .build();
    let aggregates = aggregate_by_modality(register.risks(), register.modalities().as_slice());
    let x = &aggregates[0];
    assert_approx_eq!(x.total_residual_risk, 30.0);
    assert_approx_eq!(x.total_inherent_risk_applicable, 50.0);
    assert_approx_eq!(x.efficacy_percent, 40.0);
}

#[test]
fn test_ranking_by_totals() {
    let ranking = rank_modalities(totals(&[("A", 30.0), ("B", 55.0), ("C", 12.0)]));
    assert_eq!(ranking.order(), vec!["C", "A", "B"]);
    let best = ranking.best().unwrap();
    assert_eq!(best.aggregate.modality_name, "C");
    assert!(best.is_recommended);
    assert!(!best.is_least_recommended);
    let worst = ranking.worst().unwrap();
    assert_eq!(worst.aggregate.modality_name, "B");
    assert!(worst.is_least_recommended);
    assert!(!ranking.entries()[1].is_recommended && !ranking.entries()[1].is_least_recommended);
}

#[test]
fn test_equal_totals_rank_deterministically() {
    let first = rank_modalities(totals(&[("Beta", 20.0), ("Alpha", 20.0)]));
    let second = rank_modalities(totals(&[("Alpha", 20.0), ("Beta", 20.0)]));
    assert_eq!(first.order(), vec!["Alpha", "Beta"]);
    assert_eq!(second.order(), vec!["Alpha", "Beta"]);
}

#[test]
fn test_aggregates_follow_edits() {
    let mut register = scenario_register();
    assert_eq!(register.ranking().order(), vec!["B", "A", "C"]);

    // Making C fully mitigating for the largest risk flips the ranking
    register
        .edit_risk(RiskId(1), RiskEdit::default().factor("C", 0.0))
        .unwrap();
    register.apply_bulk_mitigation("B", 1.0).unwrap();
    let ranking = register.ranking();
    assert_eq!(ranking.order(), vec!["C", "A", "B"]);
    assert_approx_eq!(ranking.best().unwrap().aggregate.total_residual_risk, 28.0);
}

#[test]
fn test_removed_modality_leaves_ranking() {
    let mut register = scenario_register();
    register.remove_modality("B").unwrap();
    let ranking = register.ranking();
    assert_eq!(ranking.order(), vec!["A", "C"]);
    assert_eq!(ranking.rank_of("B"), None);
}

#[test]
fn test_renamed_modality_keeps_totals() {
    let mut register = scenario_register();
    let before = register.aggregates()[1].total_residual_risk;
    register.rename_modality("B", "Build to Suit").unwrap();
    let aggregate = &register.aggregates()[1];
    assert_eq!(aggregate.modality_name, "Build to Suit");
    assert_eq!(aggregate.total_residual_risk, before);
}

#[test]
fn test_summary_and_matrix() {
    let register = scenario_register();
    let summary = RegisterSummary::from_register(&register, &register.ranking());
    assert_eq!(summary.total_risks, 3);
    assert_eq!(summary.total_inherent_risk, 73.0);
    assert_eq!(summary.best_modality.as_deref(), Some("B"));
    assert_eq!(summary.worst_modality.as_deref(), Some("C"));

    let matrix = residual_matrix(&register);
    assert_eq!(matrix.rows.len(), 3);
    for (row, risk) in matrix.rows.iter().zip(register.risks()) {
        for (value, modality) in row.residuals.iter().zip(register.modalities().iter()) {
            assert_eq!(Some(*value), risk.residual_for(modality.id));
        }
    }
}

#[test]
fn test_custom_thresholds_change_bands_not_values() {
    let policy = ScoringPolicy {
        thresholds: BandThresholds::new(20.0, 50.0).unwrap(),
        ..ScoringPolicy::default()
    };
    let register = RegisterBuilder::new("HQ")
        .policy(policy)
        .modalities(&["A"])
        .risk("Deadline", Level::High, Level::Medium, &[0.5])
        .build();
    let risk = &register.risks()[0];
    assert_eq!(risk.inherent_risk, 40.0);
    assert_eq!(risk.classification, RiskBand::Medium);
    assert_eq!(
        risk.mitigation_for(ModalityId(1)).unwrap().residual_classification,
        RiskBand::Low
    );
    assert_eq!(register.aggregates()[0].classification, RiskBand::Low);
}

#[test]
fn test_large_register_aggregates_every_risk() {
    let register = generated_register(200, 8);
    let aggregates = register.aggregates();
    assert_eq!(aggregates.len(), 8);
    assert!(aggregates.iter().all(|a| a.risk_count == 200));
    let ranking = register.ranking();
    let totals: Vec<f64> = ranking
        .entries()
        .iter()
        .map(|e| e.aggregate.total_residual_risk)
        .collect();
    assert!(totals.windows(2).all(|w| w[0] <= w[1]));
}
