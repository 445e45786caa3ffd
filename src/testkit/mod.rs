//! Builders and assertions shared by unit tests, integration tests and
//! benches.
//!
//! ```rust,ignore
//! use riskmap::testkit::RegisterBuilder;
//! use riskmap::scales::Level;
//!
//! let register = RegisterBuilder::new("HQ")
//!     .modalities(&["Build to Suit", "Conventional public works"])
//!     .risk("Deadline", Level::High, Level::Medium, &[0.5, 0.9])
//!     .build();
//! ```

pub mod assertions;
pub mod helpers;

// Assertion macros are exported at crate root via #[macro_export]
pub use helpers::{generated_register, scenario_register, RegisterBuilder};
