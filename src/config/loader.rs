use std::fs;
use std::path::{Path, PathBuf};

use super::core::{RiskmapConfig, CONFIG_FILE_NAME};
use crate::scoring::MitigationFactor;

/// Parse config from a TOML string, replacing invalid sections with defaults.
pub fn parse_and_validate_config(contents: &str) -> Result<RiskmapConfig, String> {
    let mut config = toml::from_str::<RiskmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(thresholds) = config.thresholds {
        if let Err(e) = thresholds.validate() {
            log::warn!("Invalid band thresholds: {}. Using defaults.", e);
            config.thresholds = None;
        }
    }

    if let Some(mitigation) = &config.mitigation {
        if let Err(e) = MitigationFactor::new(mitigation.default_factor) {
            log::warn!("Invalid default mitigation factor: {}. Using 1.0.", e);
            config.mitigation = None;
        }
    }

    if let Some(modalities) = &mut config.modalities {
        let mut seen = std::collections::BTreeSet::new();
        modalities.defaults.retain(|name| {
            let name = name.trim().to_string();
            !name.is_empty() && seen.insert(name)
        });
    }

    Ok(config)
}

/// Load and validate a specific config file.
pub fn load_config_from(path: &Path) -> anyhow::Result<RiskmapConfig> {
    let contents = fs::read_to_string(path)?;
    parse_and_validate_config(&contents).map_err(anyhow::Error::msg)
}

fn try_load_config_from_path(config_path: &Path) -> Option<RiskmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read config file {}: {}", config_path.display(), e);
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// `start` followed by its ancestors, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find `.riskmap.toml` in the current directory or its ancestors.
pub fn load_config() -> RiskmapConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RiskmapConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RiskmapConfig::default()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_MODALITIES;
    use crate::scoring::BandThresholds;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config, RiskmapConfig::default());
        assert_eq!(config.thresholds(), BandThresholds::default());
        assert_eq!(config.default_factor(), MitigationFactor::NONE);
        assert_eq!(config.default_modalities().len(), DEFAULT_MODALITIES.len());
    }

    #[test]
    fn test_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [thresholds]
            low_max = 12.0
            medium_max = 30.0

            [mitigation]
            default_factor = 0.8

            [modalities]
            defaults = ["Build to Suit", "Conventional public works", "Build to Suit", " "]

            [output]
            default_format = "markdown"

            [report]
            analyst = "J. Silva"
            agency = "SPU"
        "#})
        .unwrap();
        assert_eq!(config.thresholds(), BandThresholds::new(12.0, 30.0).unwrap());
        assert_eq!(config.default_factor().value(), 0.8);
        assert_eq!(
            config.default_modalities(),
            vec!["Build to Suit", "Conventional public works"]
        );
        assert_eq!(config.default_format(), Some("markdown"));
        assert_eq!(config.report().analyst.as_deref(), Some("J. Silva"));
        assert!(config.report().unit.is_none());
    }

    #[test]
    fn test_invalid_sections_fall_back() {
        let config = parse_and_validate_config(indoc! {r#"
            [thresholds]
            low_max = 30.0
            medium_max = 20.0

            [mitigation]
            default_factor = 2.0
        "#})
        .unwrap();
        assert_eq!(config.thresholds(), BandThresholds::default());
        assert_eq!(config.default_factor(), MitigationFactor::NONE);
    }

    #[test]
    fn test_malformed_toml_is_error() {
        assert!(parse_and_validate_config("[thresholds\nlow_max = ").is_err());
    }

    #[test]
    fn test_directory_ancestors_stops_at_depth() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[mitigation]\ndefault_factor = 0.5\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.default_factor().value(), 0.5);
    }
}
