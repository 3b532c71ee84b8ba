//! Missions: named, possibly multi-turn intents held by agents.
//!
//! The vocabulary is a closed enum. Its declaration order is the canonical
//! sorted-by-name order, which is also the field order of every genome row;
//! adding, removing or renaming a mission changes the genome file format.

mod engine;

pub use engine::{
    adjacent_cart_with_space, candidates, evaluate_unit, guard, TurnContext, UnitEvaluation,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Every mission any agent kind can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mission {
    /// Structure: queue a cart.
    BuildCart,
    /// Worker: found a city tile with a full cargo hold.
    BuildTheCity,
    /// Structure: queue a worker.
    BuildWorker,
    /// Cart: follow the nearest friendly worker to collect its cargo.
    CartHarvest,
    /// Worker or cart: bring a full hold back to a friendly city tile.
    DropTheResources,
    /// Worker: go to the nearest harvestable resource and mine it.
    MineResource,
    /// Worker: tear down a road next to an opposing city.
    PillageRoad,
    /// Structure: research.
    Research,
    /// Worker: hand cargo to an adjacent friendly cart.
    TransferToCart,
}

impl Mission {
    /// Number of missions in the vocabulary.
    pub const COUNT: usize = 9;

    /// The full vocabulary, in canonical (sorted-by-name) order.
    pub const ALL: [Mission; Mission::COUNT] = [
        Mission::BuildCart,
        Mission::BuildTheCity,
        Mission::BuildWorker,
        Mission::CartHarvest,
        Mission::DropTheResources,
        Mission::MineResource,
        Mission::PillageRoad,
        Mission::Research,
        Mission::TransferToCart,
    ];

    /// Snake-case mission name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Mission::BuildCart => "build_cart",
            Mission::BuildTheCity => "build_the_city",
            Mission::BuildWorker => "build_worker",
            Mission::CartHarvest => "cart_harvest",
            Mission::DropTheResources => "drop_the_resources",
            Mission::MineResource => "mine_resource",
            Mission::PillageRoad => "pillage_road",
            Mission::Research => "research",
            Mission::TransferToCart => "transfer_to_cart",
        }
    }

    /// Position in [`Mission::ALL`] and in every genome row.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a mission by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Mission::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mission::from_name(s).ok_or_else(|| format!("unknown mission `{s}`"))
    }
}

/// Missions a worker can hold.
pub const WORKER_MISSIONS: &[Mission] = &[
    Mission::MineResource,
    Mission::BuildTheCity,
    Mission::DropTheResources,
    Mission::TransferToCart,
    Mission::PillageRoad,
];

/// Missions a cart can hold.
pub const CART_MISSIONS: &[Mission] = &[Mission::CartHarvest, Mission::DropTheResources];

/// Missions a city tile can pick each turn.
pub const STRUCTURE_MISSIONS: &[Mission] =
    &[Mission::Research, Mission::BuildWorker, Mission::BuildCart];

/// Names of the full vocabulary in canonical order.
#[must_use]
pub fn vocabulary() -> Vec<&'static str> {
    Mission::ALL.iter().map(|m| m.name()).collect()
}

/// An agent of the controlling side, by arena index into the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Agent {
    /// Index into `GameState::units`.
    Unit(usize),
    /// Index into `GameState::city_tiles`.
    Structure(usize),
}

/// Cross-turn record of which unit is committed to which mission.
///
/// Keys are unit ids only; city tiles re-decide every turn and never appear
/// here. Clear it at the start of every game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionState {
    active: BTreeMap<String, Mission>,
}

impl MissionState {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The mission `unit_id` is committed to, if any.
    #[must_use]
    pub fn get(&self, unit_id: &str) -> Option<Mission> {
        self.active.get(unit_id).copied()
    }

    /// Commit `unit_id` to `mission`, replacing any previous commitment.
    pub fn commit(&mut self, unit_id: &str, mission: Mission) {
        self.active.insert(unit_id.to_string(), mission);
    }

    /// End `unit_id`'s mission, returning it.
    pub fn end(&mut self, unit_id: &str) -> Option<Mission> {
        self.active.remove(unit_id)
    }

    /// Drop every commitment whose unit is not in `alive`.
    ///
    /// Returns the number of entries removed.
    pub fn retain_units<'s>(&mut self, alive: impl IntoIterator<Item = &'s str>) -> usize {
        let alive: std::collections::HashSet<&str> = alive.into_iter().collect();
        let before = self.active.len();
        self.active.retain(|id, _| alive.contains(id.as_str()));
        before - self.active.len()
    }

    /// Forget all commitments (new game).
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Number of committed units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no unit is committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Iterate over `(unit id, mission)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Mission)> {
        self.active.iter().map(|(id, m)| (id.as_str(), *m))
    }
}
