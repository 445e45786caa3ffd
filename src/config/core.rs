use crate::catalog::DEFAULT_MODALITIES;
use crate::register::ScoringPolicy;
use crate::scoring::{BandThresholds, MitigationFactor};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".riskmap.toml";

/// Root configuration structure for riskmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskmapConfig {
    /// Upper bounds of the Low and Medium bands
    #[serde(default)]
    pub thresholds: Option<BandThresholds>,

    /// Mitigation defaults
    #[serde(default)]
    pub mitigation: Option<MitigationConfig>,

    /// Modalities seeded by `riskmap init`
    #[serde(default)]
    pub modalities: Option<ModalitiesConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,

    /// Who signs the report
    #[serde(default)]
    pub report: Option<ReportConfig>,
}

impl RiskmapConfig {
    pub fn thresholds(&self) -> BandThresholds {
        self.thresholds.unwrap_or_default()
    }

    /// Factor given to existing risks when a modality is added.
    pub fn default_factor(&self) -> MitigationFactor {
        self.mitigation
            .as_ref()
            .and_then(|m| MitigationFactor::new(m.default_factor).ok())
            .unwrap_or_default()
    }

    pub fn scoring_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            thresholds: self.thresholds(),
            default_factor: self.default_factor(),
        }
    }

    pub fn default_modalities(&self) -> Vec<String> {
        self.modalities
            .as_ref()
            .map(|m| m.defaults.clone())
            .unwrap_or_else(|| DEFAULT_MODALITIES.iter().map(|s| s.to_string()).collect())
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.as_ref()?.default_format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref()?.use_color
    }

    pub fn report(&self) -> ReportConfig {
        self.report.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationConfig {
    #[serde(default = "default_factor")]
    pub default_factor: f64,
}

fn default_factor() -> f64 {
    MitigationFactor::NONE.value()
}

impl Default for MitigationConfig {
    fn default() -> Self {
        Self {
            default_factor: default_factor(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModalitiesConfig {
    #[serde(default)]
    pub defaults: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

/// Identification printed in the report header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub analyst: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub agency: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ReportConfig {
    pub fn is_empty(&self) -> bool {
        self.analyst.is_none()
            && self.unit.is_none()
            && self.agency.is_none()
            && self.email.is_none()
    }
}
