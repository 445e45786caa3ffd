//! Risk scoring and contracting-modality comparison for public works.
//!
//! Analysts register the risks of a construction project, score each on
//! impact and likelihood, and estimate how much each candidate contracting
//! modality would mitigate it. The engine derives inherent and residual
//! risk, aggregates per modality, and ranks the modalities by total
//! residual risk.
//!
//! ```rust
//! use riskmap::register::{RiskDraft, RiskRegister, ScoringPolicy};
//! use riskmap::scales::Level;
//!
//! let mut register = RiskRegister::with_modalities(
//!     "Regional HQ",
//!     ScoringPolicy::default(),
//!     &["Build to Suit", "Conventional public works"],
//! )?;
//! register.register_risk(
//!     RiskDraft::new("Delivery deadline missed", Level::High, Level::Medium)
//!         .justifications("Rent keeps running", "Complex site")
//!         .factor("Build to Suit", 0.5)
//!         .factor("Conventional public works", 0.9),
//! )?;
//! let ranking = register.ranking();
//! assert_eq!(ranking.best().unwrap().aggregate.modality_name, "Build to Suit");
//! # Ok::<(), riskmap::errors::RegisterError>(())
//! ```

// Export modules for library usage
pub mod aggregation;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod io;
pub mod observability;
pub mod register;
pub mod scales;
pub mod scoring;
pub mod session;
pub mod testkit;

// Re-export commonly used types
pub use crate::aggregation::{
    aggregate_by_modality, rank_modalities, ModalityAggregate, ModalityRanking, RankedModality,
    RegisterSummary,
};
pub use crate::errors::{RegisterError, Result};
pub use crate::io::output::{create_writer, EvaluationReport, OutputFormat, OutputWriter};
pub use crate::register::{
    Modality, ModalityId, RegisterSnapshot, Risk, RiskDraft, RiskEdit, RiskId, RiskRegister,
    ScoringPolicy,
};
pub use crate::scales::Level;
pub use crate::scoring::{
    compute_efficacy, compute_inherent_risk, compute_residual_risk, BandThresholds,
    MitigationFactor, RiskBand,
};
pub use crate::session::SharedRegister;
