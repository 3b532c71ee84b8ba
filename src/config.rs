//! Engine configuration.

use crate::error::ConfigError;
use crate::game::{GameConstants, GameState};
use crate::resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a decision session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the policy RNG.
    pub seed: u64,
    /// Movement resolution options.
    pub resolver: ResolverConfig,
    /// Rule constants applied to snapshots that do not carry their own.
    pub constants: GameConstants,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            resolver: ResolverConfig::default(),
            constants: GameConstants::default(),
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Decode a JSON snapshot, filling in [`Self::constants`] when the
    /// snapshot has no `constants` field of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot.
    pub fn parse_snapshot(&self, text: &str) -> Result<GameState, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let has_constants = value.get("constants").is_some();
        let mut state: GameState = serde_json::from_value(value)?;
        if !has_constants {
            state.constants = self.constants;
        }
        Ok(state)
    }

    /// Return a copy with a different seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
