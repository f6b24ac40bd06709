//! Logging setup (`tracing` + `tracing-subscriber`).
//!
//! `RUST_LOG` controls the filter (default: `warn`, so CLI tables stay clean).
//! CLI commands log to stderr. The TUI owns the terminal, so it only logs when
//! `ROADCOST_LOG_FILE` names a file to append to.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::ENV_LOG_FILE;
use crate::error::AppError;

const DEFAULT_FILTER: &str = "warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the stderr subscriber used by CLI commands.
pub fn init_stderr() {
    let _ = fmt()
        .with_env_filter(filter())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install a file subscriber for the TUI if `ROADCOST_LOG_FILE` is set.
pub fn init_tui() -> Result<(), AppError> {
    let Ok(path) = std::env::var(ENV_LOG_FILE) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| AppError::new(2, format!("Failed to open log file '{path}': {e}")))?;

    let _ = fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
