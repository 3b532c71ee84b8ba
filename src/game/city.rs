//! Cities and the structure tiles they are made of.

use crate::game::{Coord, Team};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A city: a connected group of city tiles sharing fuel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Stable identifier (e.g. `c_1`).
    pub id: String,
    /// Owning side.
    pub team: Team,
    /// Stored fuel.
    #[serde(default)]
    pub fuel: f32,
    /// Fuel burned per night turn.
    #[serde(default)]
    pub light_upkeep: f32,
}

/// One tile of a city. These are the "structure" agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTile {
    /// Id of the city this tile belongs to.
    pub city_id: String,
    /// Owning side.
    pub team: Team,
    /// Position of the tile.
    pub pos: Coord,
    /// Turns until the tile can act again.
    #[serde(default)]
    pub cooldown: f32,
}

impl CityTile {
    /// Create a city tile with no cooldown.
    #[must_use]
    pub fn new(city_id: impl Into<String>, team: Team, pos: Coord) -> Self {
        Self {
            city_id: city_id.into(),
            team,
            pos,
            cooldown: 0.0,
        }
    }

    /// Whether the tile can act this turn.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.cooldown < 1.0
    }

    /// Identity of this structure tile.
    #[must_use]
    pub fn id(&self) -> StructureId<'_> {
        StructureId {
            city: &self.city_id,
            pos: self.pos,
        }
    }
}

/// Identity of a structure tile: its city plus its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructureId<'a> {
    /// City the tile belongs to.
    pub city: &'a str,
    /// Position of the tile.
    pub pos: Coord,
}

impl fmt::Display for StructureId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.city, self.pos)
    }
}
