//! Logging setup and crash reporting.
//!
//! Log output always goes to stderr so report output on stdout stays clean
//! when piped.
//!
//! ```ignore
//! use riskmap::observability::{init_logging, install_panic_hook, set_operation};
//!
//! fn main() {
//!     init_logging(1);
//!     install_panic_hook();
//!     let _op = set_operation("evaluate", Some("risk-register.json".into()));
//! }
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{get_current_context, set_operation, OperationContext, OperationGuard};
pub use panic_hook::install_panic_hook;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directive for a `-v` count: warnings by default, then info,
/// debug, trace.
pub fn verbosity_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity` when set.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
