//! Tracing setup for the oratio CLI
//!
//! Usage:
//!   oratio --debug serve            # Debug logging to console
//!   oratio -q serve                 # Warnings and errors only
//!   RUST_LOG=oratio=debug oratio    # Fine-grained log control

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing.
///
/// `debug` raises the default level to `debug` and shows log targets,
/// `quiet` drops it to `warn` (debug wins if both are set); an explicit
/// `RUST_LOG` always wins.
pub fn init(debug: bool, quiet: bool) -> Result<()> {
    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
