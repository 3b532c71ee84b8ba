//! Versioned genome files.
//!
//! A genome file is JSON holding the format version, the mission vocabulary
//! the weights were written against, and the flat weight sequence. Loading
//! refuses files whose vocabulary differs from the compiled-in one, since the
//! field order would silently shift.

use crate::error::GenomeError;
use crate::genome::Genome;
use crate::mission::{vocabulary, Mission};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Current genome file format version.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk representation of a genome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomeFile {
    /// Format version.
    pub version: u32,
    /// Mission names in field order.
    pub missions: Vec<String>,
    /// Number of turns.
    pub turns: usize,
    /// Flat weights, `turns * missions.len()` long.
    pub weights: Vec<u8>,
}

impl GenomeFile {
    /// Wrap a genome for storage.
    #[must_use]
    pub fn encode(genome: &Genome) -> Self {
        Self {
            version: FORMAT_VERSION,
            missions: vocabulary().into_iter().map(String::from).collect(),
            turns: genome.turns(),
            weights: genome.to_flat(),
        }
    }

    /// Validate and unwrap the stored genome.
    ///
    /// # Errors
    ///
    /// Returns an error on an unknown version, a vocabulary mismatch, or
    /// weights that do not form a valid genome of `turns` turns.
    pub fn decode(self) -> Result<Genome, GenomeError> {
        if self.version != FORMAT_VERSION {
            return Err(GenomeError::UnsupportedVersion(self.version));
        }

        let expected: Vec<String> = vocabulary().into_iter().map(String::from).collect();
        if self.missions != expected {
            return Err(GenomeError::VocabularyMismatch {
                found: self.missions,
                expected,
            });
        }

        let actual = self.weights.len();
        let expected_len = self.turns.checked_mul(Mission::COUNT).ok_or(GenomeError::Length {
            expected: usize::MAX,
            actual,
        })?;
        if actual != expected_len {
            return Err(GenomeError::Length {
                expected: expected_len,
                actual,
            });
        }

        Genome::from_flat(&self.weights)
    }
}

/// Save a genome as a versioned JSON file.
///
/// # Errors
///
/// Returns an error if serialization or file I/O fails.
pub fn save_genome(genome: &Genome, path: &Path) -> Result<(), GenomeError> {
    let json = serde_json::to_string_pretty(&GenomeFile::encode(genome))?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a genome from a versioned JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or fails
/// [`GenomeFile::decode`].
pub fn load_genome(path: &Path) -> Result<Genome, GenomeError> {
    let text = fs::read_to_string(path)?;
    let file: GenomeFile = serde_json::from_str(&text)?;
    file.decode()
}

/// Conventional file name for a genome within `dir`.
#[must_use]
pub fn genome_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.genome.json"))
}
