//! CLI command implementations for Survival.

pub(crate) mod batch;
pub(crate) mod play;
pub(crate) mod run;

mod output;
mod paint;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `batch` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum BatchFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Set up logging.
///
/// `RUST_LOG` picks the filter (default `warn`). When `log_file` is given
/// records go there instead of stderr; `quiet_stderr` drops them entirely
/// otherwise, so the TUI screen stays clean.
///
/// # Errors
///
/// Returns an error if the log file cannot be created.
pub(crate) fn init_logging(log_file: Option<&Path>, quiet_stderr: bool) -> Result<(), CliError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .map_err(|e| CliError::new(format!("Failed to create {}: {e}", path.display())))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if quiet_stderr {
        builder.filter_level(log::LevelFilter::Off);
    }

    // A second init (tests, embedding) keeps the first logger.
    builder.try_init().ok();
    Ok(())
}
