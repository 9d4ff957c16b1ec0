//! Console logging for the menu programs.
//!
//! Logs go to stderr so they never interleave with menu output on stdout.
//! `RUST_LOG` takes precedence; otherwise only warnings are shown, or
//! everything down to `debug` with `--verbose`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
