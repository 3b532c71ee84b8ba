//! Turn-indexed mission weights.
//!
//! A genome holds one [`WeightRow`] per game turn. Each row has one weight in
//! `0..=MAX_WEIGHT` for every mission in the vocabulary, stored in
//! [`Mission::ALL`] order. The flat form concatenates the rows and is what an
//! outer trainer mutates and crosses over.

pub mod persistence;
pub mod policy;

pub use persistence::{genome_path, load_genome, save_genome, GenomeFile, FORMAT_VERSION};
pub use policy::GenomePolicy;

use crate::error::GenomeError;
use crate::mission::Mission;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest allowed weight.
pub const MAX_WEIGHT: u8 = 10;

/// Weights of every mission for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightRow([u8; Mission::COUNT]);

impl WeightRow {
    /// A row with the same weight for every mission (clamped to [`MAX_WEIGHT`]).
    #[must_use]
    pub const fn uniform(weight: u8) -> Self {
        let weight = if weight > MAX_WEIGHT { MAX_WEIGHT } else { weight };
        Self([weight; Mission::COUNT])
    }

    /// Weight of `mission`.
    #[must_use]
    pub const fn weight(&self, mission: Mission) -> u8 {
        self.0[mission.index()]
    }

    /// Set the weight of `mission`, clamped to [`MAX_WEIGHT`].
    pub fn set(&mut self, mission: Mission, weight: u8) {
        self.0[mission.index()] = weight.min(MAX_WEIGHT);
    }

    /// Weights in vocabulary order.
    #[must_use]
    pub const fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

/// Turn-indexed mission weights, immutable during a decision pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<WeightRow>", into = "Vec<WeightRow>")]
pub struct Genome {
    rows: Vec<WeightRow>,
}

impl TryFrom<Vec<WeightRow>> for Genome {
    type Error = GenomeError;

    fn try_from(rows: Vec<WeightRow>) -> Result<Self, Self::Error> {
        let flat: Vec<u8> = rows.iter().flat_map(|r| r.0).collect();
        Self::from_flat(&flat)
    }
}

impl From<Genome> for Vec<WeightRow> {
    fn from(genome: Genome) -> Self {
        genome.rows
    }
}

impl Genome {
    /// A genome with every weight set to `weight` for `turns` turns.
    #[must_use]
    pub fn uniform(turns: usize, weight: u8) -> Self {
        Self {
            rows: vec![WeightRow::uniform(weight); turns],
        }
    }

    /// A genome with independent uniform random weights.
    #[must_use]
    pub fn random<R: Rng>(rng: &mut R, turns: usize) -> Self {
        let rows = (0..turns)
            .map(|_| {
                let mut row = [0u8; Mission::COUNT];
                for w in &mut row {
                    *w = rng.gen_range(0..=MAX_WEIGHT);
                }
                WeightRow(row)
            })
            .collect();
        Self { rows }
    }

    /// Group a flat weight sequence into rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the sequence is empty, does not split into whole
    /// rows, or holds a weight above [`MAX_WEIGHT`].
    pub fn from_flat(weights: &[u8]) -> Result<Self, GenomeError> {
        if weights.is_empty() {
            return Err(GenomeError::Empty);
        }
        if weights.len() % Mission::COUNT != 0 {
            return Err(GenomeError::Length {
                expected: weights.len().div_ceil(Mission::COUNT) * Mission::COUNT,
                actual: weights.len(),
            });
        }
        if let Some((index, &weight)) = weights.iter().enumerate().find(|&(_, &w)| w > MAX_WEIGHT) {
            return Err(GenomeError::WeightOutOfRange {
                index,
                weight,
                max: MAX_WEIGHT,
            });
        }

        let rows = weights
            .chunks_exact(Mission::COUNT)
            .map(|chunk| {
                let mut row = [0u8; Mission::COUNT];
                row.copy_from_slice(chunk);
                WeightRow(row)
            })
            .collect();
        Ok(Self { rows })
    }

    /// Concatenate the rows into a flat sequence of `turns * Mission::COUNT` weights.
    #[must_use]
    pub fn to_flat(&self) -> Vec<u8> {
        self.rows.iter().flat_map(|r| r.0).collect()
    }

    /// Number of turns covered.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.rows.len()
    }

    /// Weights for `turn`, or `None` past the last turn.
    #[must_use]
    pub fn row(&self, turn: u32) -> Option<&WeightRow> {
        usize::try_from(turn).ok().and_then(|t| self.rows.get(t))
    }

    /// Weight of `mission` at `turn`, or `None` past the last turn.
    #[must_use]
    pub fn weight(&self, turn: u32, mission: Mission) -> Option<u8> {
        self.row(turn).map(|r| r.weight(mission))
    }

    /// Set `mission`'s weight on every turn.
    #[must_use]
    pub fn with_weight(mut self, mission: Mission, weight: u8) -> Self {
        for row in &mut self.rows {
            row.set(mission, weight);
        }
        self
    }

    /// Mean weight of each mission across all turns, in vocabulary order.
    // Weight sums stay far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_weights(&self) -> [f64; Mission::COUNT] {
        let mut sums = [0u64; Mission::COUNT];
        for row in &self.rows {
            for (sum, &w) in sums.iter_mut().zip(row.as_slice()) {
                *sum += u64::from(w);
            }
        }
        let turns = self.rows.len().max(1);
        sums.map(|s| s as f64 / turns as f64)
    }
}
