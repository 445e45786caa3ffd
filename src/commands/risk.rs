use super::{update_register, CommandContext};
use crate::cli::{FactorArg, NoteArg, RiskAddArgs, RiskCommand, RiskEditArgs};
use crate::errors::{self, RegisterError};
use crate::register::{FactorInput, ModalityRegistry, RiskDraft, RiskEdit, RiskId};
use anyhow::Result;
use comfy_table::Table;

pub fn handle_risk(ctx: &CommandContext<'_>, action: RiskCommand) -> Result<()> {
    match action {
        RiskCommand::Add(args) => add_risk(ctx, args),
        RiskCommand::Edit(args) => edit_risk(ctx, args),
        RiskCommand::Remove { id } => {
            let removed = update_register(ctx, |register| register.remove_risk(RiskId(id)))?;
            println!("Removed risk {} '{}'", removed.id, removed.name);
            Ok(())
        }
        RiskCommand::List => list_risks(ctx),
    }
}

/// Pair each factor with the note given for the same modality, if any.
fn factor_inputs(factors: Vec<FactorArg>, notes: &[NoteArg]) -> Vec<FactorInput> {
    factors
        .into_iter()
        .map(|f| {
            let justification = notes
                .iter()
                .find(|n| n.modality == f.modality)
                .map(|n| n.text.clone());
            FactorInput {
                modality: f.modality,
                factor: f.factor,
                justification,
            }
        })
        .collect()
}

/// Every note on a new risk must belong to a modality given a `--factor`.
fn check_notes(
    modalities: &ModalityRegistry,
    factors: &[FactorInput],
    notes: &[NoteArg],
) -> errors::Result<()> {
    for note in notes {
        if factors.iter().any(|f| f.modality == note.modality) {
            continue;
        }
        if modalities.find(&note.modality).is_none() {
            return Err(RegisterError::modality_not_found(note.modality.clone()));
        }
        return Err(RegisterError::validation(format!(
            "note for modality '{}' has no matching --factor",
            note.modality
        )));
    }
    Ok(())
}

fn add_risk(ctx: &CommandContext<'_>, args: RiskAddArgs) -> Result<()> {
    let mut draft = RiskDraft::new(args.name, args.impact, args.likelihood)
        .description(args.description)
        .justifications(args.impact_justification, args.likelihood_justification);
    draft.factors = factor_inputs(args.factors, &args.notes);
    let notes = args.notes;

    let (id, inherent, band) = update_register(ctx, |register| {
        check_notes(register.modalities(), &draft.factors, &notes)?;
        let id = register.register_risk(draft)?;
        let risk = register.risk(id)?;
        Ok((id, risk.inherent_risk, risk.classification))
    })?;
    println!("Registered risk {id}: inherent risk {inherent:.1} ({band})");
    Ok(())
}

fn edit_risk(ctx: &CommandContext<'_>, args: RiskEditArgs) -> Result<()> {
    let id = RiskId(args.id);
    let factored: Vec<String> = args.factors.iter().map(|f| f.modality.clone()).collect();
    // Notes for modalities whose factor is not changing are applied separately
    let loose_notes: Vec<NoteArg> = args
        .notes
        .iter()
        .filter(|n| !factored.contains(&n.modality))
        .cloned()
        .collect();
    let edit = RiskEdit {
        name: args.name,
        description: args.description,
        impact_level: args.impact,
        likelihood_level: args.likelihood,
        impact_justification: args.impact_justification,
        probability_justification: args.likelihood_justification,
        factors: factor_inputs(args.factors, &args.notes),
    };
    if edit.is_empty() && loose_notes.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one field to edit.");
    }

    let (inherent, band) = update_register(ctx, |register| {
        for note in &loose_notes {
            register.set_mitigation_justification(id, &note.modality, note.text.clone())?;
        }
        let risk = register.edit_risk(id, edit)?;
        Ok((risk.inherent_risk, risk.classification))
    })?;
    println!("Updated risk {id}: inherent risk {inherent:.1} ({band})");
    Ok(())
}

fn list_risks(ctx: &CommandContext<'_>) -> Result<()> {
    let register = ctx.load()?;
    if register.risks().is_empty() {
        println!("No risks registered.");
        return Ok(());
    }
    let mut table = Table::new();
    table.set_header(vec!["Id", "Risk", "Impact", "Likelihood", "Inherent", "Band"]);
    for risk in register.risks() {
        table.add_row(vec![
            risk.id.to_string(),
            risk.name.clone(),
            risk.impact_level.to_string(),
            risk.likelihood_level.to_string(),
            format!("{:.1}", risk.inherent_risk),
            risk.classification.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskmapConfig;
    use crate::io::{load_register, save_register};
    use crate::register::{RiskRegister, ScoringPolicy};
    use crate::scales::Level;
    use std::fs;

    fn note(modality: &str, text: &str) -> NoteArg {
        NoteArg {
            modality: modality.into(),
            text: text.into(),
        }
    }

    fn add_args(notes: Vec<NoteArg>) -> RiskAddArgs {
        RiskAddArgs {
            name: "Deadline".into(),
            description: String::new(),
            impact: Level::High,
            likelihood: Level::Medium,
            impact_justification: "i".into(),
            likelihood_justification: "p".into(),
            factors: vec![FactorArg {
                modality: "A".into(),
                factor: 0.5,
            }],
            notes,
        }
    }

    #[test]
    fn test_check_notes() {
        let register =
            RiskRegister::with_modalities("HQ", ScoringPolicy::default(), &["A", "B"]).unwrap();
        let factors = factor_inputs(
            vec![FactorArg {
                modality: "A".into(),
                factor: 0.5,
            }],
            &[],
        );
        let modalities = register.modalities();
        assert!(check_notes(modalities, &factors, &[note("A", "bond")]).is_ok());
        assert_eq!(
            check_notes(modalities, &factors, &[note("Typo", "bond")]),
            Err(RegisterError::modality_not_found("Typo"))
        );
        assert!(matches!(
            check_notes(modalities, &factors, &[note("B", "bond")]),
            Err(RegisterError::Validation(_))
        ));
    }

    #[test]
    fn test_add_with_stray_note_leaves_register_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("register.json");
        let register =
            RiskRegister::with_modalities("HQ", ScoringPolicy::default(), &["A"]).unwrap();
        save_register(&path, &register).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let config = RiskmapConfig::default();
        let ctx = CommandContext {
            register_path: &path,
            config: &config,
        };
        let err = add_risk(&ctx, add_args(vec![note("Typo", "guarantees")])).unwrap_err();
        assert_eq!(
            err.downcast_ref::<RegisterError>(),
            Some(&RegisterError::modality_not_found("Typo"))
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        add_risk(&ctx, add_args(vec![note("A", "guarantees")])).unwrap();
        let saved = load_register(&path, config.scoring_policy()).unwrap();
        let a = saved.modalities().resolve("A").unwrap().id;
        assert_eq!(
            saved.risks()[0].mitigation_for(a).unwrap().justification,
            "guarantees"
        );
    }

    #[test]
    fn test_factor_inputs_attach_matching_notes() {
        let inputs = factor_inputs(
            vec![
                FactorArg {
                    modality: "A".into(),
                    factor: 0.5,
                },
                FactorArg {
                    modality: "B".into(),
                    factor: 1.0,
                },
            ],
            &[NoteArg {
                modality: "B".into(),
                text: "no guarantees".into(),
            }],
        );
        assert_eq!(inputs[0].justification, None);
        assert_eq!(inputs[1].justification.as_deref(), Some("no guarantees"));
    }
}
