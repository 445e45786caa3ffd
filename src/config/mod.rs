//! `.riskmap.toml` configuration.
//!
//! Every section is optional; accessors on [`RiskmapConfig`] fill in the
//! defaults so callers never deal with missing sections.

mod core;
mod loader;

pub use core::{
    MitigationConfig, ModalitiesConfig, OutputConfig, ReportConfig, RiskmapConfig,
    CONFIG_FILE_NAME,
};
pub use loader::{directory_ancestors, load_config, load_config_from, parse_and_validate_config};
