//! Weighted-random mission selection.

use crate::genome::Genome;
use crate::mission::Mission;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Samples one mission per agent from its candidates using the genome's
/// weights for the current turn.
///
/// This is the engine's only source of randomness. With the same seed,
/// genome and candidate sequence, the draws are identical.
#[derive(Debug)]
pub struct GenomePolicy<'g, R = SmallRng> {
    genome: &'g Genome,
    rng: R,
}

impl<'g> GenomePolicy<'g, SmallRng> {
    /// Create a policy with a freshly seeded RNG.
    #[must_use]
    pub fn seeded(genome: &'g Genome, seed: u64) -> Self {
        Self::new(genome, SmallRng::seed_from_u64(seed))
    }
}

impl<'g, R: Rng> GenomePolicy<'g, R> {
    /// Create a policy drawing from `rng`.
    ///
    /// Pass `&mut rng` to keep the generator's state across turns.
    #[must_use]
    pub fn new(genome: &'g Genome, rng: R) -> Self {
        Self { genome, rng }
    }

    /// The genome being sampled.
    #[must_use]
    pub fn genome(&self) -> &'g Genome {
        self.genome
    }

    /// Pick one of `candidates` for `turn`.
    ///
    /// Draws proportionally to weight; if every candidate weighs zero, draws
    /// uniformly. Returns `None` when `candidates` is empty or the genome has
    /// no row for `turn`.
    pub fn sample(&mut self, turn: u32, candidates: &[Mission]) -> Option<Mission> {
        let row = self.genome.row(turn)?;
        if candidates.is_empty() {
            return None;
        }

        let weights: Vec<u32> = candidates
            .iter()
            .map(|&m| u32::from(row.weight(m)))
            .collect();

        let pick = if weights.iter().all(|&w| w == 0) {
            self.rng.gen_range(0..candidates.len())
        } else {
            // Non-empty with a positive total, so construction cannot fail.
            match WeightedIndex::new(&weights) {
                Ok(dist) => dist.sample(&mut self.rng),
                Err(_) => self.rng.gen_range(0..candidates.len()),
            }
        };
        Some(candidates[pick])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_candidate_always_chosen() {
        let genome = Genome::uniform(4, 0);
        let mut policy = GenomePolicy::seeded(&genome, 1);
        for _ in 0..20 {
            assert_eq!(policy.sample(0, &[Mission::Research]), Some(Mission::Research));
        }
    }

    #[test]
    fn test_zero_weight_never_chosen_when_others_positive() {
        let genome = Genome::uniform(1, 0).with_weight(Mission::BuildTheCity, 3);
        let mut policy = GenomePolicy::seeded(&genome, 7);
        let candidates = [Mission::BuildTheCity, Mission::DropTheResources];
        for _ in 0..200 {
            assert_eq!(policy.sample(0, &candidates), Some(Mission::BuildTheCity));
        }
    }

    #[test]
    fn test_all_zero_falls_back_to_uniform() {
        let genome = Genome::uniform(1, 0);
        let mut policy = GenomePolicy::seeded(&genome, 42);
        let candidates = [Mission::Research, Mission::BuildWorker, Mission::BuildCart];
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let pick = policy.sample(0, &candidates).unwrap();
            let i = candidates.iter().position(|&m| m == pick).unwrap();
            counts[i] += 1;
        }
        for count in counts {
            assert!((800..=1200).contains(&count), "skewed counts: {counts:?}");
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut rng = SmallRng::seed_from_u64(5);
        let genome = Genome::random(&mut rng, 3);
        let candidates = [Mission::MineResource, Mission::BuildTheCity, Mission::PillageRoad];

        let mut a = GenomePolicy::seeded(&genome, 11);
        let mut b = GenomePolicy::seeded(&genome, 11);
        for turn in 0..3 {
            for _ in 0..10 {
                assert_eq!(a.sample(turn, &candidates), b.sample(turn, &candidates));
            }
        }
    }

    #[test]
    fn test_borrowed_rng_keeps_state() {
        let genome = Genome::uniform(1, 5);
        let candidates = [Mission::Research, Mission::BuildWorker];
        let mut rng = SmallRng::seed_from_u64(9);
        let first = GenomePolicy::new(&genome, &mut rng).sample(0, &candidates);
        let mut replay = SmallRng::seed_from_u64(9);
        assert_eq!(GenomePolicy::new(&genome, &mut replay).sample(0, &candidates), first);
        // Both generators advanced by the same draw.
        assert_eq!(rng.gen_range(0..1000), replay.gen_range(0..1000));
    }

    #[test]
    fn test_empty_or_out_of_range() {
        let genome = Genome::uniform(2, 5);
        let mut policy = GenomePolicy::seeded(&genome, 0);
        assert_eq!(policy.sample(0, &[]), None);
        assert_eq!(policy.sample(2, &[Mission::Research]), None);
    }
}
