//! Deterministic board generation for benchmarks, fuzzing and smoke runs.

use crate::game::{Coord, GameState, Map, ResourceType, Team, UnitKind};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: u16 = 6;

/// Error type for board generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("board generation error: {reason}")]
pub struct BoardGenError {
    /// Description of the error.
    pub reason: String,
}

/// Generate a mirrored two-team board at turn 0.
///
/// The left half is generated and mirrored onto the right half so both
/// teams face the same resources. Each team starts with one city tile and
/// one worker standing next to it.
///
/// # Errors
///
/// Returns an error if either dimension is below [`MIN_BOARD_SIZE`].
pub fn generate_board(seed: u64, width: u16, height: u16) -> Result<GameState, BoardGenError> {
    if width < MIN_BOARD_SIZE || height < MIN_BOARD_SIZE {
        return Err(BoardGenError {
            reason: format!(
                "board must be at least {MIN_BOARD_SIZE}x{MIN_BOARD_SIZE}, got {width}x{height}"
            ),
        });
    }

    let mut rng = SmallRng::seed_from_u64(seed);
    let map = Map::new(width, height).ok_or_else(|| BoardGenError {
        reason: "invalid board dimensions".to_string(),
    })?;
    let mut state = GameState::new(map);

    // Starting positions sit a quarter of the way in, on the middle row.
    let home = Coord::new(width / 4, height / 2);
    let mirrored_home = mirror(home, width);

    place_resources(&mut state, &mut rng, &[home, mirrored_home]);
    create_teams(&mut state, home, mirrored_home);

    Ok(state)
}

/// Mirror a coordinate across the vertical centre line.
fn mirror(coord: Coord, width: u16) -> Coord {
    Coord::new(width - 1 - coord.x, coord.y)
}

/// Scatter resources over the left half and mirror them.
///
/// Roughly 10% wood, 3% coal and 1% uranium; the 3x3 area around each
/// home tile is kept clear.
fn place_resources(state: &mut GameState, rng: &mut SmallRng, homes: &[Coord]) {
    let width = state.map.width();
    let height = state.map.height();

    for y in 0..height {
        for x in 0..width.div_ceil(2) {
            let coord = Coord::new(x, y);
            if homes.iter().any(|h| h.x.abs_diff(x) <= 1 && h.y.abs_diff(y) <= 1) {
                continue;
            }

            let noise: f64 = rng.gen_range(0.0..1.0);
            let kind = if noise < 0.01 {
                ResourceType::Uranium
            } else if noise < 0.04 {
                ResourceType::Coal
            } else if noise < 0.14 {
                ResourceType::Wood
            } else {
                continue;
            };

            let amount = match kind {
                ResourceType::Wood => rng.gen_range(300..500),
                ResourceType::Coal => rng.gen_range(350..450),
                ResourceType::Uranium => rng.gen_range(300..350),
            };

            state.map.set_resource(coord, kind, amount);
            state.map.set_resource(mirror(coord, width), kind, amount);
        }
    }
}

/// Give each team a one-tile city and a worker just south of it.
fn create_teams(state: &mut GameState, home: Coord, mirrored_home: Coord) {
    for (team, pos) in [(Team(0), home), (Team(1), mirrored_home)] {
        let city_id = format!("c_{}", team.index() + 1);
        state.add_city_tile(&city_id, team, pos);
        state.spawn_unit(UnitKind::Worker, team, Coord::new(pos.x, pos.y + 1));
    }
}
