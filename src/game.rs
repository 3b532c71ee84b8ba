//! Board model for the decision engine.
//!
//! Everything here describes one turn's snapshot as supplied by the game
//! engine:
//! - Map with resource deposits and roads
//! - Mobile units (workers, carts) and city tiles of both sides
//! - Per-side research progress
//! - Parsing of the text observation format
//! - Deterministic board generation for tests and benchmarks

mod city;
mod map;
mod mapgen;
mod observation;
mod player;
mod state;
mod unit;

pub use city::{City, CityTile, StructureId};
pub use map::{Cell, Coord, Deposit, Direction, Map, ResourceType};
pub use mapgen::{generate_board, BoardGenError, MIN_BOARD_SIZE};
pub use observation::parse_observation;
pub use player::{Player, Team};
pub use state::{GameConstants, GameState};
pub use unit::{Cargo, Unit, UnitKind};
