use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{Result, ToolError};

/// Filter applied when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs a `fmt` subscriber writing to stderr, so stdout stays free for
/// command output. The level is read from `RUST_LOG`, falling back to
/// [`DEFAULT_FILTER`].
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}
