//! Factory functions for registers used across tests.

use crate::register::{RiskDraft, RiskRegister, ScoringPolicy};
use crate::scales::Level;

/// Fluent construction of a populated register.
///
/// Panics on invalid input; meant for tests and benches only.
#[derive(Debug, Clone)]
pub struct RegisterBuilder {
    project_name: String,
    policy: ScoringPolicy,
    modalities: Vec<String>,
    risks: Vec<(String, Level, Level, Vec<f64>)>,
}

impl RegisterBuilder {
    pub fn new(project_name: &str) -> Self {
        Self {
            project_name: project_name.to_string(),
            policy: ScoringPolicy::default(),
            modalities: Vec::new(),
            risks: Vec::new(),
        }
    }

    pub fn policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn modalities(mut self, names: &[&str]) -> Self {
        self.modalities = names.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Add a risk with one factor per modality, in modality order.
    pub fn risk(mut self, name: &str, impact: Level, likelihood: Level, factors: &[f64]) -> Self {
        self.risks
            .push((name.to_string(), impact, likelihood, factors.to_vec()));
        self
    }

    pub fn build(self) -> RiskRegister {
        let mut register = RiskRegister::with_modalities(
            &self.project_name,
            self.policy,
            self.modalities.as_slice(),
        )
        .unwrap_or_else(|e| panic!("invalid test modalities: {e}"));
        for (name, impact, likelihood, factors) in self.risks {
            assert_eq!(
                factors.len(),
                self.modalities.len(),
                "risk {name} needs one factor per modality"
            );
            let draft = self.modalities.iter().zip(factors).fold(
                RiskDraft::new(name.as_str(), impact, likelihood).justifications(
                    format!("impact of {name}"),
                    format!("likelihood of {name}"),
                ),
                |draft, (modality, factor)| draft.factor(modality.as_str(), factor),
            );
            register
                .register_risk(draft)
                .unwrap_or_else(|e| panic!("invalid test risk {name}: {e}"));
        }
        register
    }
}

/// Three risks under three modalities where B is clearly the best choice
/// and C the worst.
///
/// | risk | inherent | A | B | C |
/// |------|----------|---|---|---|
/// | Deadline | 40 | 0.5 | 0.2 | 1.0 |
/// | Budget | 25 | 0.6 | 0.4 | 0.8 |
/// | Market | 8 | 1.0 | 0.5 | 1.0 |
pub fn scenario_register() -> RiskRegister {
    RegisterBuilder::new("Regional HQ")
        .modalities(&["A", "B", "C"])
        .risk("Deadline", Level::High, Level::Medium, &[0.5, 0.2, 1.0])
        .risk("Budget", Level::Medium, Level::Medium, &[0.6, 0.4, 0.8])
        .risk("Market", Level::High, Level::VeryLow, &[1.0, 0.5, 1.0])
        .build()
}

/// Deterministic register of `risks` x `modalities` for benches and
/// scale tests.
pub fn generated_register(risks: usize, modalities: usize) -> RiskRegister {
    let names: Vec<String> = (0..modalities).map(|i| format!("Modality {i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
    (0..risks)
        .fold(
            RegisterBuilder::new("Generated").modalities(&name_refs),
            |builder, i| {
                let factors: Vec<f64> = (0..modalities)
                    .map(|m| ((i * 7 + m * 13) % 11) as f64 / 10.0)
                    .collect();
                builder.risk(
                    &format!("Risk {i}"),
                    Level::ALL[i % 5],
                    Level::ALL[(i / 5) % 5],
                    &factors,
                )
            },
        )
        .build()
}
