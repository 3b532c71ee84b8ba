//! Turning a chosen mission into a concrete action.
//!
//! Movement claims destination tiles from a shared [`AvailablePositions`]
//! pool. Agents are resolved one at a time and earlier agents get first pick,
//! so no two moves in one turn ever share a destination.

use crate::action::Action;
use crate::error::EngineError;
use crate::game::{Coord, Direction, Unit, UnitKind};
use crate::mission::{adjacent_cart_with_space, Agent, Mission, TurnContext};
use crate::world::WorldView;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::trace;

/// Resolver options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Also keep out of tiles an opposing unit could step onto this turn.
    pub avoid_opponent_reach: bool,
}

/// Tiles still free to move onto this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailablePositions {
    free: HashSet<Coord>,
}

impl AvailablePositions {
    /// Build the turn's starting pool.
    ///
    /// Contains every tile without a unit of either side that is not an
    /// opposing city tile, plus every friendly city tile (units stack there).
    #[must_use]
    pub fn new(view: &WorldView<'_>, config: &ResolverConfig) -> Self {
        let team = view.team();
        let opponent = view.opponent();
        let mut free: HashSet<Coord> = view
            .state()
            .map
            .coords()
            .filter(|c| {
                !view.unit_position_set(team).contains(c)
                    && !view.unit_position_set(opponent).contains(c)
                    && !view.structure_position_set(opponent).contains(c)
            })
            .collect();
        free.extend(view.structure_positions(team).iter().copied());

        if config.avoid_opponent_reach {
            for &idx in view.units(opponent) {
                let unit = view.unit(idx);
                if !unit.can_act() {
                    continue;
                }
                let (neighbours, n) = unit.pos.adjacent(view.width(), view.height());
                for c in &neighbours[..usize::from(n)] {
                    free.remove(c);
                }
            }
        }

        Self { free }
    }

    /// Whether `coord` is still free.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.free.contains(&coord)
    }

    /// Take `coord` out of the pool. Returns `false` if it was not free.
    pub fn claim(&mut self, coord: Coord) -> bool {
        self.free.remove(&coord)
    }

    /// Number of free tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Whether no tile is free.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

/// Order in which to try the four directions when heading from `from` to `to`.
///
/// The order depends only on which quadrant the target lies in, so there are
/// exactly four orderings. Quadrants are half-open and turn clockwise from
/// south, which puts every axis-aligned target in the quadrant that leads
/// with its own direction:
///
/// | quadrant | dx, dy            | order      |
/// |----------|-------------------|------------|
/// | SE       | dx >= 0, dy > 0   | S, E, W, N |
/// | SW       | dx < 0, dy >= 0   | W, S, N, E |
/// | NW       | dx <= 0, dy < 0   | N, W, E, S |
/// | NE       | dx > 0, dy <= 0   | E, N, S, W |
///
/// Each order is: the quadrant's leading direction, the perpendicular
/// direction toward the target, the other perpendicular, then the opposite.
#[must_use]
pub fn direction_priority(from: Coord, to: Coord) -> [Direction; 4] {
    use Direction::{East, North, South, West};

    let dx = i32::from(to.x) - i32::from(from.x);
    let dy = i32::from(to.y) - i32::from(from.y);

    if dx < 0 && dy >= 0 {
        [West, South, North, East]
    } else if dx <= 0 && dy < 0 {
        [North, West, East, South]
    } else if dx > 0 && dy <= 0 {
        [East, North, South, West]
    } else {
        [South, East, West, North]
    }
}

/// Manhattan-nearest of `targets`; the first one wins ties.
#[must_use]
pub fn nearest(from: Coord, targets: &[Coord]) -> Option<Coord> {
    targets
        .iter()
        .copied()
        .fold(None, |best: Option<(Coord, u32)>, c| {
            let d = from.distance(c);
            match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((c, d)),
            }
        })
        .map(|(c, _)| c)
}

/// What resolving a mission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A command for the game engine.
    Act(Action),
    /// Nothing to emit; the game engine does the work (mining, waiting for a
    /// worker) or the agent is already where it wants to be.
    Hold,
    /// A move was wanted but every candidate tile was taken.
    Blocked,
}

/// Resolves missions to actions for one side during one turn.
#[derive(Debug)]
pub struct ActionResolver<'v, 'a> {
    view: &'v WorldView<'a>,
    available: AvailablePositions,
}

impl<'v, 'a> ActionResolver<'v, 'a> {
    /// Start a resolution pass with a fresh tile pool.
    #[must_use]
    pub fn new(view: &'v WorldView<'a>, config: &ResolverConfig) -> Self {
        Self {
            view,
            available: AvailablePositions::new(view, config),
        }
    }

    /// The tiles still free.
    #[must_use]
    pub fn available(&self) -> &AvailablePositions {
        &self.available
    }

    /// Resolve `mission` for `agent`.
    ///
    /// Structure builds consume the build quota in `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingHandler`] if `mission` has no handler for
    /// the agent's kind.
    pub fn resolve(
        &mut self,
        agent: Agent,
        mission: Mission,
        ctx: &mut TurnContext,
    ) -> Result<Resolution, EngineError> {
        match agent {
            Agent::Unit(idx) => self.resolve_unit(self.view.unit(idx), mission),
            Agent::Structure(idx) => {
                let pos = self.view.structure(idx).pos;
                let action = match mission {
                    Mission::Research => Action::Research { pos },
                    Mission::BuildWorker => {
                        ctx.queue_build();
                        Action::BuildWorker { pos }
                    }
                    Mission::BuildCart => {
                        ctx.queue_build();
                        Action::BuildCart { pos }
                    }
                    _ => {
                        return Err(EngineError::MissingHandler {
                            mission,
                            agent: "city tile",
                        });
                    }
                };
                Ok(Resolution::Act(action))
            }
        }
    }

    fn resolve_unit(
        &mut self,
        unit: &'a Unit,
        mission: Mission,
    ) -> Result<Resolution, EngineError> {
        let view = self.view;
        let team = view.team();

        let resolution = match (unit.kind, mission) {
            (UnitKind::Worker, Mission::MineResource) => {
                let targets = view.harvestable_tiles(team);
                if targets.iter().any(|&c| c.distance(unit.pos) <= 1) {
                    Resolution::Hold
                } else {
                    self.move_toward(unit, targets)
                }
            }
            (UnitKind::Worker, Mission::BuildTheCity) => {
                let here = view.tile(unit.pos);
                if here.is_some_and(|t| !t.is_resource() && !t.is_structure()) {
                    Resolution::Act(Action::BuildCity {
                        unit: unit.id.clone(),
                    })
                } else {
                    self.move_toward(unit, view.buildable_tiles())
                }
            }
            (UnitKind::Worker | UnitKind::Cart, Mission::DropTheResources) => {
                self.move_toward(unit, view.structure_positions(team))
            }
            (UnitKind::Worker, Mission::TransferToCart) => {
                let cart = adjacent_cart_with_space(view, unit.pos).map(|i| view.unit(i));
                match (cart, unit.cargo.most_abundant()) {
                    (Some(cart), Some((resource, carried))) => Resolution::Act(Action::Transfer {
                        source: unit.id.clone(),
                        destination: cart.id.clone(),
                        resource,
                        amount: carried.min(cart.space_left(view.constants())),
                    }),
                    _ => Resolution::Hold,
                }
            }
            (UnitKind::Worker, Mission::PillageRoad) => Resolution::Act(Action::Pillage {
                unit: unit.id.clone(),
            }),
            (UnitKind::Cart, Mission::CartHarvest) => {
                let workers: Vec<Coord> = view
                    .workers(team)
                    .iter()
                    .map(|&i| view.unit(i).pos)
                    .collect();
                if workers.iter().any(|&c| c.distance(unit.pos) == 1) {
                    Resolution::Hold
                } else {
                    self.move_toward(unit, &workers)
                }
            }
            (kind, mission) => {
                return Err(EngineError::MissingHandler {
                    mission,
                    agent: match kind {
                        UnitKind::Worker => "worker",
                        UnitKind::Cart => "cart",
                    },
                });
            }
        };
        Ok(resolution)
    }

    /// Step `unit` one tile toward the nearest of `targets`.
    fn move_toward(&mut self, unit: &Unit, targets: &[Coord]) -> Resolution {
        let Some(target) = nearest(unit.pos, targets) else {
            return Resolution::Hold;
        };
        if target == unit.pos {
            return Resolution::Hold;
        }

        let (width, height) = (self.view.width(), self.view.height());
        for direction in direction_priority(unit.pos, target) {
            let Some(next) = unit.pos.step(direction, width, height) else {
                continue;
            };
            if self.available.claim(next) {
                trace!(unit = %unit.id, from = %unit.pos, to = %next, "tile claimed");
                return Resolution::Act(Action::Move {
                    unit: unit.id.clone(),
                    direction,
                    to: next,
                });
            }
        }
        trace!(unit = %unit.id, %target, "blocked");
        Resolution::Blocked
    }
}
