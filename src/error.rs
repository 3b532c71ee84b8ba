//! Error types.
//!
//! Expected conditions (an agent on cooldown, an agent with no valid mission,
//! all-zero genome weights) are not errors and never show up here.

use crate::mission::Mission;
use std::io;
use thiserror::Error;

/// A deserialized map whose cell count does not match its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("map of {width}x{height} cannot hold {cells} cells")]
pub struct MapShapeError {
    /// Declared width.
    pub width: u16,
    /// Declared height.
    pub height: u16,
    /// Number of cells actually supplied.
    pub cells: usize,
}

/// Errors building, decoding or storing a genome.
#[derive(Debug, Error)]
pub enum GenomeError {
    /// A flat weight sequence does not split into whole turns.
    #[error("flat genome has {actual} weights, expected {expected}")]
    Length {
        /// Expected number of weights.
        expected: usize,
        /// Number of weights supplied.
        actual: usize,
    },
    /// A weight is above the allowed maximum.
    #[error("weight {weight} at position {index} is out of range 0..={max}")]
    WeightOutOfRange {
        /// Position in the flat sequence.
        index: usize,
        /// Offending weight.
        weight: u8,
        /// Largest allowed weight.
        max: u8,
    },
    /// A genome with zero turns.
    #[error("genome has no turns")]
    Empty,
    /// A stored genome was written against a different mission vocabulary.
    #[error("genome vocabulary {found:?} does not match {expected:?}")]
    VocabularyMismatch {
        /// Vocabulary stored in the file.
        found: Vec<String>,
        /// Vocabulary this build understands.
        expected: Vec<String>,
    },
    /// A stored genome uses an unknown format version.
    #[error("unsupported genome format version: {0}")]
    UnsupportedVersion(u32),
    /// File I/O failed.
    #[error("genome I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON encoding or decoding failed.
    #[error("genome JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors parsing a text observation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservationError {
    /// The player id / map size header is missing or malformed.
    #[error("missing or malformed observation header")]
    MissingHeader,
    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        reason: String,
    },
}

/// Contract violations raised by the per-turn decision pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The genome does not cover exactly one game.
    #[error("genome covers {actual} turns but a game lasts {expected}")]
    GenomeLength {
        /// Turns in a game, from the snapshot's constants.
        expected: u32,
        /// Turns covered by the genome.
        actual: usize,
    },
    /// The genome has no row for the requested turn.
    #[error("turn {turn} is outside the genome's {turns} turns")]
    TurnOutOfRange {
        /// Requested turn.
        turn: u32,
        /// Turns covered by the genome.
        turns: usize,
    },
    /// A mission was sampled for an agent kind that has no handler for it.
    #[error("no action handler for mission `{mission}` on a {agent}")]
    MissingHandler {
        /// The sampled mission.
        mission: Mission,
        /// Kind of agent it was sampled for.
        agent: &'static str,
    },
}

/// Errors loading an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failed.
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),
    /// JSON decoding failed.
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
