use super::{update_register, CommandContext};
use anyhow::Result;

pub fn handle_project(ctx: &CommandContext<'_>, name: &str) -> Result<()> {
    update_register(ctx, |register| register.set_project_name(name))?;
    println!("Project renamed to '{}'", name.trim());
    Ok(())
}
