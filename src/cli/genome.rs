//! Genome command implementations.

use super::output::format_genome;
use super::CliError;
use lagash::genome::{load_genome, save_genome};
use lagash::Genome;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;

/// Write a random genome.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn random(turns: usize, seed: u64, out: &Path) -> Result<(), CliError> {
    if turns == 0 {
        return Err(CliError::new("a genome needs at least one turn"));
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    let genome = Genome::random(&mut rng, turns);
    save_genome(&genome, out)?;
    println!("Genome ({turns} turns, seed {seed}) saved to: {}", out.display());
    Ok(())
}

/// Print per-mission mean weights of a genome file.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded.
pub(crate) fn inspect(path: &Path) -> Result<(), CliError> {
    let genome = load_genome(path)?;
    print!("{}", format_genome(&genome));
    Ok(())
}
