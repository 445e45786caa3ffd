use super::{update_register, CommandContext};
use crate::cli::ModalityCommand;
use anyhow::Result;

pub fn handle_modality(ctx: &CommandContext<'_>, action: ModalityCommand) -> Result<()> {
    match action {
        ModalityCommand::Add { name } => {
            let (id, default_factor, risks) = update_register(ctx, |register| {
                let id = register.add_modality(&name)?;
                Ok((id, register.policy().default_factor, register.risks().len()))
            })?;
            println!("Added modality {id} '{}'", name.trim());
            if risks > 0 {
                println!(
                    "{risks} existing risks received factor {default_factor}; use `riskmap reassess` to adjust"
                );
            }
        }
        ModalityCommand::Remove { name } => {
            let removed = update_register(ctx, |register| register.remove_modality(&name))?;
            println!("Removed modality {} '{}'", removed.id, removed.name);
        }
        ModalityCommand::Rename { old, new } => {
            let id = update_register(ctx, |register| register.rename_modality(&old, &new))?;
            println!("Renamed modality {id} to '{}'", new.trim());
        }
        ModalityCommand::List => {
            let register = ctx.load()?;
            for modality in register.modalities().iter() {
                println!("{:>4}  {}", modality.id.to_string(), modality.name);
            }
        }
    }
    Ok(())
}
