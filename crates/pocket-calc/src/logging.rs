//! Logging setup
//!
//! The TUI owns the terminal, so it only logs when a file is given.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{AppError, AppResult};

/// Where log lines go when no file is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSink {
    /// Write to stderr
    Stderr,
    /// Install no subscriber
    Discard,
}

/// Parses a log filter such as `warn` or `pocket_calc=debug`
pub fn parse_filter(level: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| AppError::logging(format!("invalid log filter {level:?}: {e}")))
}

/// Installs the global tracing subscriber.
///
/// Logs go to `log_file` (appended) when given, otherwise to `fallback`.
pub fn init(level: &str, log_file: Option<&Path>, fallback: FallbackSink) -> AppResult<()> {
    let filter = parse_filter(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = match (log_file, fallback) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        (None, FallbackSink::Stderr) => builder.with_writer(std::io::stderr).try_init(),
        (None, FallbackSink::Discard) => return Ok(()),
    };

    result.map_err(|e| AppError::logging(e.to_string()))
}
