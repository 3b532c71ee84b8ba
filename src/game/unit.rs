//! Mobile units: workers and carts.

use crate::game::{Coord, GameConstants, ResourceType, Team};
use serde::{Deserialize, Serialize};

/// Kind of mobile unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Mines resources and builds cities.
    Worker,
    /// Hauls resources between workers and cities.
    Cart,
}

impl UnitKind {
    /// Cargo capacity for this kind.
    #[must_use]
    pub const fn capacity(self, constants: &GameConstants) -> u32 {
        match self {
            UnitKind::Worker => constants.worker_capacity,
            UnitKind::Cart => constants.cart_capacity,
        }
    }

    /// Observation code (0 = worker, 1 = cart).
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(UnitKind::Worker),
            1 => Some(UnitKind::Cart),
            _ => None,
        }
    }
}

/// Resources carried by a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    /// Wood carried.
    pub wood: u32,
    /// Coal carried.
    pub coal: u32,
    /// Uranium carried.
    pub uranium: u32,
}

impl Cargo {
    /// Total amount carried across all resource types.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.wood.saturating_add(self.coal).saturating_add(self.uranium)
    }

    /// Amount of one resource type.
    #[must_use]
    pub const fn get(&self, kind: ResourceType) -> u32 {
        match kind {
            ResourceType::Wood => self.wood,
            ResourceType::Coal => self.coal,
            ResourceType::Uranium => self.uranium,
        }
    }

    /// The resource type carried in the largest amount (first wins on ties),
    /// or `None` if the cargo is empty.
    #[must_use]
    pub fn most_abundant(&self) -> Option<(ResourceType, u32)> {
        ResourceType::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|&(_, amount)| amount > 0)
            .fold(None, |best, (kind, amount)| match best {
                Some((_, best_amount)) if best_amount >= amount => best,
                _ => Some((kind, amount)),
            })
    }
}

/// A mobile unit as seen in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Stable identifier (e.g. `u_3`).
    pub id: String,
    /// Worker or cart.
    pub kind: UnitKind,
    /// Owning side.
    pub team: Team,
    /// Current position.
    pub pos: Coord,
    /// Turns until the unit can act again.
    #[serde(default)]
    pub cooldown: f32,
    /// Carried resources.
    #[serde(default)]
    pub cargo: Cargo,
}

impl Unit {
    /// Create a unit with no cooldown and empty cargo.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: UnitKind, team: Team, pos: Coord) -> Self {
        Self {
            id: id.into(),
            kind,
            team,
            pos,
            cooldown: 0.0,
            cargo: Cargo::default(),
        }
    }

    /// Whether the unit can act this turn.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.cooldown < 1.0
    }

    /// Whether the unit is a worker.
    #[must_use]
    pub fn is_worker(&self) -> bool {
        self.kind == UnitKind::Worker
    }

    /// Whether the unit is a cart.
    #[must_use]
    pub fn is_cart(&self) -> bool {
        self.kind == UnitKind::Cart
    }

    /// Capacity left in the cargo hold.
    #[must_use]
    pub fn space_left(&self, constants: &GameConstants) -> u32 {
        self.kind.capacity(constants).saturating_sub(self.cargo.total())
    }

    /// Whether the cargo hold is full.
    #[must_use]
    pub fn is_full(&self, constants: &GameConstants) -> bool {
        self.space_left(constants) == 0
    }

    /// Whether the cargo hold is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cargo.total() == 0
    }
}
