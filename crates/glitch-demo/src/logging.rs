#![forbid(unsafe_code)]

//! Log setup.
//!
//! The terminal is in raw mode on the alternate screen, so logs only go to
//! a file. Without a log file nothing is installed and every `tracing` call
//! is a no-op.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::DemoError;

/// Variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "GLITCH_LOG";

/// Install a file subscriber. Returns whether one was installed.
pub fn init(log_file: Option<&Path>) -> Result<bool, DemoError> {
    let Some(path) = log_file else {
        return Ok(false);
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(path = %path.display(), "logging started");
    }
    Ok(installed)
}
