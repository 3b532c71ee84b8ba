//! Board command implementation.

use super::CliError;
use lagash::game::generate_board;

/// Print a generated snapshot as JSON.
///
/// # Errors
///
/// Returns an error if the board is too small.
pub(crate) fn execute(seed: u64, width: u16, height: u16) -> Result<(), CliError> {
    let board = generate_board(seed, width, height)?;
    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}
