use super::CommandContext;
use crate::config::CONFIG_FILE_NAME;
use crate::io::{register_exists, save_register, write_file_atomic};
use crate::register::RiskRegister;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Riskmap configuration

[thresholds]
# Values up to low_max are Low, up to medium_max Medium, above that High
low_max = 10.0
medium_max = 25.0

[mitigation]
# Factor given to existing risks when a modality is added (1.0 = no mitigation)
default_factor = 1.0

[modalities]
defaults = [
    "Swap for an already-built property",
    "Swap for a building to be built (third-party land)",
    "Swap for construction works (federal land)",
    "Build to Suit (federal land)",
    "Contracting with payment in kind",
    "Conventional public works",
]

[output]
default_format = "terminal"

[report]
# analyst = ""
# unit = ""
# agency = ""
# email = ""
"#;

/// Create `.riskmap.toml` in the current directory and the register.
pub fn handle_init(ctx: &CommandContext<'_>, project: &str, force: bool) -> Result<()> {
    init_at(ctx, Path::new(CONFIG_FILE_NAME), project, force)
}

/// Both targets are checked before either is written. Without `force` an
/// existing config is kept and an existing register is an error.
pub fn init_at(
    ctx: &CommandContext<'_>,
    config_path: &Path,
    project: &str,
    force: bool,
) -> Result<()> {
    if register_exists(ctx.register_path) && !force {
        anyhow::bail!(
            "Register {} already exists. Use --force to overwrite.",
            ctx.register_path.display()
        );
    }
    let write_config = force || !config_path.exists();
    // Validate the seed before touching the disk
    let modalities = ctx.config.default_modalities();
    let register = RiskRegister::with_modalities(
        project,
        ctx.config.scoring_policy(),
        modalities.as_slice(),
    )?;

    if write_config {
        write_file_atomic(config_path, DEFAULT_CONFIG)?;
        println!("Created {} configuration file", config_path.display());
    } else {
        println!("Keeping existing {}", config_path.display());
    }
    save_register(ctx.register_path, &register)?;
    println!(
        "Created register {} with {} modalities",
        ctx.register_path.display(),
        register.modalities().len()
    );
    Ok(())
}
