//! Board snapshot: the full, read-only state of one turn.

use crate::game::{City, CityTile, Coord, Map, Player, ResourceType, Team, Unit, UnitKind};
use serde::{Deserialize, Serialize};

/// Rule constants the decision engine depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConstants {
    /// Number of turns in a game.
    pub max_turns: u32,
    /// Worker cargo capacity.
    pub worker_capacity: u32,
    /// Cart cargo capacity.
    pub cart_capacity: u32,
    /// Research points needed to harvest coal.
    pub coal_research: u32,
    /// Research points needed to harvest uranium.
    pub uranium_research: u32,
}

impl Default for GameConstants {
    fn default() -> Self {
        Self {
            max_turns: 360,
            worker_capacity: 100,
            cart_capacity: 2000,
            coal_research: 50,
            uranium_research: 200,
        }
    }
}

impl GameConstants {
    /// Research points needed before `kind` can be harvested.
    #[must_use]
    pub const fn research_needed(&self, kind: ResourceType) -> u32 {
        match kind {
            ResourceType::Wood => 0,
            ResourceType::Coal => self.coal_research,
            ResourceType::Uranium => self.uranium_research,
        }
    }
}

/// Points per city tile in [`GameState::score`].
const CITY_TILE_SCORE: u64 = 10_000;

/// Complete board snapshot for one turn.
///
/// Owned by the caller. The decision engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Terrain, resources and roads.
    pub map: Map,
    /// Current turn number (0-indexed).
    pub turn: u32,
    /// Both sides, indexed by [`Team::index`].
    pub players: [Player; 2],
    /// All mobile units of both sides, in board-enumeration order.
    #[serde(default)]
    pub units: Vec<Unit>,
    /// All cities of both sides.
    #[serde(default)]
    pub cities: Vec<City>,
    /// All city tiles of both sides.
    #[serde(default)]
    pub city_tiles: Vec<CityTile>,
    /// Rule constants.
    #[serde(default)]
    pub constants: GameConstants,
}

impl GameState {
    /// Create an empty snapshot over the given map at turn 0.
    #[must_use]
    pub fn new(map: Map) -> Self {
        Self {
            map,
            turn: 0,
            players: [Player::new(Team(0)), Player::new(Team(1))],
            units: Vec::new(),
            cities: Vec::new(),
            city_tiles: Vec::new(),
            constants: GameConstants::default(),
        }
    }

    /// Get the current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Get a side's state.
    #[must_use]
    pub fn player(&self, team: Team) -> &Player {
        &self.players[team.index()]
    }

    /// Get a mutable reference to a side's state.
    #[must_use]
    pub fn player_mut(&mut self, team: Team) -> &mut Player {
        &mut self.players[team.index()]
    }

    /// Whether `team` has researched enough to harvest `kind`.
    #[must_use]
    pub fn can_harvest(&self, team: Team, kind: ResourceType) -> bool {
        self.player(team).research_points >= self.constants.research_needed(kind)
    }

    /// Add a unit and return its index.
    pub fn add_unit(&mut self, unit: Unit) -> usize {
        self.units.push(unit);
        self.units.len() - 1
    }

    /// Spawn a fresh unit with a generated id (`u_<n>`), returning its index.
    pub fn spawn_unit(&mut self, kind: UnitKind, team: Team, pos: Coord) -> usize {
        let id = format!("u_{}", self.units.len() + 1);
        self.add_unit(Unit::new(id, kind, team, pos))
    }

    /// Add a city tile, creating its city if it does not exist yet.
    /// Returns the tile's index.
    pub fn add_city_tile(&mut self, city_id: &str, team: Team, pos: Coord) -> usize {
        if !self.cities.iter().any(|c| c.id == city_id) {
            self.cities.push(City {
                id: city_id.to_string(),
                team,
                fuel: 0.0,
                light_upkeep: 0.0,
            });
        }
        self.city_tiles.push(CityTile::new(city_id, team, pos));
        self.city_tiles.len() - 1
    }

    /// Find a unit by id.
    #[must_use]
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Find a city by id.
    #[must_use]
    pub fn city(&self, id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Scalar score of a side: city tiles dominate, units break ties.
    ///
    /// This is the number an external trainer aggregates into fitness.
    #[must_use]
    pub fn score(&self, team: Team) -> u64 {
        let tiles = self.city_tiles.iter().filter(|t| t.team == team).count() as u64;
        let units = self.units.iter().filter(|u| u.team == team).count() as u64;
        tiles * CITY_TILE_SCORE + units
    }
}
