use super::{update_register, CommandContext};
use crate::cli::FactorArg;
use anyhow::Result;

pub fn handle_reassess(ctx: &CommandContext<'_>, factors: &[FactorArg]) -> Result<()> {
    let pairs: Vec<(String, f64)> = factors
        .iter()
        .map(|f| (f.modality.clone(), f.factor))
        .collect();
    let updated = update_register(ctx, |register| register.reassess_modalities(&pairs))?;
    println!(
        "Reassessed {} modalities across {updated} risks",
        pairs.len()
    );
    Ok(())
}
