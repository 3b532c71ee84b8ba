//! CLI command implementations for Lagash.

pub(crate) mod board;
pub(crate) mod decide;
pub(crate) mod genome;

mod output;

use clap::ValueEnum;
use lagash::game::BoardGenError;
use lagash::{ConfigError, EngineError, GenomeError, ObservationError};
use std::error::Error;
use std::fmt;

/// Output format for the `decide` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// One command per line.
    Text,
    /// Commands and per-agent decisions as JSON.
    Json,
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
        Self::new(format!("JSON error: {e}"))
    }
}

impl From<GenomeError> for CliError {
    fn from(e: GenomeError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ObservationError> for CliError {
    fn from(e: ObservationError) -> Self {
        Self::new(format!("bad observation: {e}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<BoardGenError> for CliError {
    fn from(e: BoardGenError) -> Self {
        Self::new(e.to_string())
    }
}
