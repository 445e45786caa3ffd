//! Register files on disk.

use super::write_file_atomic;
use crate::register::{RegisterSnapshot, RiskRegister, ScoringPolicy};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub fn register_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read a register snapshot and rebuild it under `policy`.
///
/// Derived scores are recomputed and the invariants checked, so a file
/// edited by hand is either accepted in a consistent state or rejected.
pub fn load_register(path: &Path, policy: ScoringPolicy) -> Result<RiskRegister> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read register {}", path.display()))?;
    let snapshot: RegisterSnapshot = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse register {}", path.display()))?;
    let register = RiskRegister::from_snapshot(snapshot, policy)
        .with_context(|| format!("Register {} is inconsistent", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        risks = register.risks().len(),
        modalities = register.modalities().len(),
        "Loaded register"
    );
    Ok(register)
}

pub fn save_register(path: &Path, register: &RiskRegister) -> Result<()> {
    let json = serde_json::to_string_pretty(&register.snapshot())?;
    write_file_atomic(path, &json)?;
    tracing::debug!(path = %path.display(), "Saved register");
    Ok(())
}
