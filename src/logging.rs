//! Logging bootstrap for the server binary
//!
//! Logs go to stderr; stdout carries the MCP stdio transport. `RUST_LOG`
//! overrides the level passed on the command line.

use anyhow::{Result, anyhow, bail};
use tracing_subscriber::EnvFilter;

const SUPPORTED_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validate a level name, accepting any letter case
pub fn normalize_level(level: &str) -> Result<&'static str> {
    let wanted = level.trim().to_lowercase();
    match SUPPORTED_LEVELS.iter().find(|l| **l == wanted) {
        Some(level) => Ok(*level),
        None => bail!(
            "unsupported log level '{}'; expected one of: {}",
            level,
            SUPPORTED_LEVELS.join(", ")
        ),
    }
}

/// Install the global tracing subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(normalize_level(level)?)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}
