//! Logging setup
//!
//! The library crates only emit `tracing` events. Programs and test
//! harnesses call [`init`] once to print them.

use tracing_subscriber::EnvFilter;

use crate::LoggingError;

/// Filter used when neither `RUST_LOG` nor a default directive is given
pub const DEFAULT_DIRECTIVE: &str = "modcss=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to `default_directive`
///
/// Returns an error, rather than panicking, when a global subscriber is
/// already installed.
pub fn init(default_directive: Option<&str>) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive.unwrap_or(DEFAULT_DIRECTIVE)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| LoggingError(e.to_string()))
}
