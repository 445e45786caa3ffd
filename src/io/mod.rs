pub mod output;
pub mod snapshot;
pub mod writers;

pub use output::{create_writer, EvaluationReport, OutputFormat, OutputWriter};
pub use snapshot::{load_register, register_exists, save_register};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write `content` to a sibling temp file, then rename it over `path`, so
/// readers never see a half-written file.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("{} is not a file path", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    fs::write(&tmp, content).with_context(|| format!("Failed to write {}", tmp.display()))?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("Failed to replace {}", path.display()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_file_atomic(&path, "first").unwrap();
        write_file_atomic(&path, "second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!dir.path().join("out.json.tmp").exists());
    }
}
