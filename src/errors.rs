//! Error types for risk register operations.
//!
//! Every engine operation returns [`RegisterError`] synchronously. A failed
//! operation never leaves a partially applied mutation behind: validation
//! runs before the first write.
//!
//! # Error Codes
//!
//! - E050: validation failure (bad factor, empty name, unknown scale level)
//! - E051: duplicate modality name
//! - E052: unknown risk id or modality name
//! - E053: register invariant broken (caller bug)
//!
//! # Example
//!
//! ```rust
//! use riskmap::errors::{RegisterError, ErrorCode};
//!
//! let err = RegisterError::duplicate_name("Build to Suit");
//! assert_eq!(err.code(), ErrorCode::DUPLICATE_NAME);
//! assert!(err.is_user_fixable());
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Structured error code for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorCode(&'static str);

impl ErrorCode {
    /// Input rejected at the engine boundary
    pub const VALIDATION: ErrorCode = ErrorCode("E050");
    /// Modality name already registered
    pub const DUPLICATE_NAME: ErrorCode = ErrorCode("E051");
    /// Risk id or modality name not present
    pub const NOT_FOUND: ErrorCode = ErrorCode("E052");
    /// Mitigation keys diverge from the modality registry
    pub const INVARIANT_VIOLATION: ErrorCode = ErrorCode("E053");

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of entity a [`RegisterError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Risk,
    Modality,
    ScaleLevel,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Risk => "risk",
            EntityKind::Modality => "modality",
            EntityKind::ScaleLevel => "scale level",
        };
        f.write_str(label)
    }
}

/// Error type for every register, scoring and aggregation operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegisterError {
    /// Malformed input: factor outside `[0, 1]`, empty name, bad scale level
    #[error("Validation error: {0}")]
    Validation(String),

    /// A modality with this name already exists
    #[error("Modality '{0}' already exists")]
    DuplicateName(String),

    /// Referenced risk or modality is absent from the register
    #[error("Unknown {kind}: {key}")]
    NotFound { kind: EntityKind, key: String },

    /// A risk's mitigation keys diverge from the modality registry
    #[error("Register invariant violated: {0}")]
    InvariantViolation(String),
}

impl RegisterError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn risk_not_found(key: impl fmt::Display) -> Self {
        Self::NotFound {
            kind: EntityKind::Risk,
            key: key.to_string(),
        }
    }

    pub fn modality_not_found(name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Modality,
            key: name.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Stable code for documentation lookup and structured logs.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::VALIDATION,
            Self::DuplicateName(_) => ErrorCode::DUPLICATE_NAME,
            Self::NotFound { .. } => ErrorCode::NOT_FOUND,
            Self::InvariantViolation(_) => ErrorCode::INVARIANT_VIOLATION,
        }
    }

    /// Whether the analyst can fix this by changing their input.
    ///
    /// Invariant violations point at a caller bug instead.
    pub fn is_user_fixable(&self) -> bool {
        !matches!(self, Self::InvariantViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, RegisterError>;
