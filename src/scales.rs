//! Ordinal impact and likelihood scales.
//!
//! Both scales share the same five ranks and weights `{1, 2, 5, 8, 10}`;
//! they differ only in the rationale attached to each rank. The tables are
//! immutable reference data.

use crate::errors::{EntityKind, RegisterError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of a scale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScaleLevel {
    pub name: &'static str,
    pub weight: u32,
    pub description: &'static str,
}

/// Rank on an ordinal scale, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::VeryLow,
        Level::Low,
        Level::Medium,
        Level::High,
        Level::VeryHigh,
    ];

    fn rank(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        IMPACT_SCALE[self.rank()].name
    }

    /// Canonical weight of this rank (identical on both scales).
    pub fn weight(self) -> u32 {
        IMPACT_SCALE[self.rank()].weight
    }

    pub fn from_weight(weight: u32) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.weight() == weight)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Level {
    type Err = RegisterError;

    /// Accepts the display label ("Very high"), the snake_case key
    /// ("very_high") or the numeric weight ("10").
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        if let Ok(weight) = normalized.parse::<u32>() {
            return Level::from_weight(weight).ok_or_else(|| unknown_level(s));
        }
        Level::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == normalized)
            .ok_or_else(|| unknown_level(s))
    }
}

fn unknown_level(input: &str) -> RegisterError {
    RegisterError::Validation(format!(
        "{} '{}' does not exist (expected one of: {})",
        EntityKind::ScaleLevel,
        input,
        Level::ALL.map(Level::label).join(", ")
    ))
}

/// Which of the two scales a level is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleKind {
    Impact,
    Likelihood,
}

impl ScaleKind {
    pub fn table(self) -> &'static [ScaleLevel; 5] {
        match self {
            ScaleKind::Impact => &IMPACT_SCALE,
            ScaleKind::Likelihood => &LIKELIHOOD_SCALE,
        }
    }

    pub fn level(self, level: Level) -> &'static ScaleLevel {
        &self.table()[level.rank()]
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleKind::Impact => "Impact",
            ScaleKind::Likelihood => "Likelihood",
        }
    }
}

pub static IMPACT_SCALE: [ScaleLevel; 5] = [
    ScaleLevel {
        name: "Very low",
        weight: 1,
        description: "Degraded operations causing minimal impact on objectives",
    },
    ScaleLevel {
        name: "Low",
        weight: 2,
        description: "Degraded operations causing small impact on objectives",
    },
    ScaleLevel {
        name: "Medium",
        weight: 5,
        description: "Interrupted operations causing significant but recoverable impact",
    },
    ScaleLevel {
        name: "High",
        weight: 8,
        description: "Interrupted operations causing impact that is very hard to reverse",
    },
    ScaleLevel {
        name: "Very high",
        weight: 10,
        description: "Halted operations causing irreversible or catastrophic impact",
    },
];

pub static LIKELIHOOD_SCALE: [ScaleLevel; 5] = [
    ScaleLevel {
        name: "Very low",
        weight: 1,
        description: "Unlikely event. Nothing indicates this possibility",
    },
    ScaleLevel {
        name: "Low",
        weight: 2,
        description: "Rare event. Few elements indicate this possibility",
    },
    ScaleLevel {
        name: "Medium",
        weight: 5,
        description: "Possible event. Elements moderately indicate this possibility",
    },
    ScaleLevel {
        name: "High",
        weight: 8,
        description: "Probable event. Elements consistently indicate this possibility",
    },
    ScaleLevel {
        name: "Very high",
        weight: 10,
        description: "Practically certain event. Elements clearly indicate this possibility",
    },
];
