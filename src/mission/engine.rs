//! Mission guards and per-agent candidate evaluation.
//!
//! Mobile units move between `Idle` and `Committed(mission)`: a committed
//! unit re-checks only its own mission's guard, while an idle unit checks
//! every mission of its kind. City tiles are always idle.

use crate::game::{Coord, Team, Unit, UnitKind};
use crate::mission::{
    Agent, Mission, MissionState, CART_MISSIONS, STRUCTURE_MISSIONS, WORKER_MISSIONS,
};
use crate::world::WorldView;
use tracing::debug;

/// Turn-scoped state shared by all structure evaluations of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnContext {
    build_quota: i64,
}

impl TurnContext {
    /// Start a turn: the quota is friendly city tiles minus friendly units.
    #[must_use]
    pub fn new(view: &WorldView<'_>) -> Self {
        let team = view.team();
        let tiles = i64::try_from(view.structures(team).len()).unwrap_or(i64::MAX);
        let units = i64::try_from(view.units(team).len()).unwrap_or(i64::MAX);
        Self {
            build_quota: tiles - units,
        }
    }

    /// Units that may still be queued this turn.
    #[must_use]
    pub const fn build_quota(&self) -> i64 {
        self.build_quota
    }

    /// Whether another build may be queued.
    #[must_use]
    pub const fn can_build(&self) -> bool {
        self.build_quota > 0
    }

    /// Record one queued build; later structures see the smaller quota.
    pub fn queue_build(&mut self) {
        self.build_quota -= 1;
    }
}

/// Outcome of evaluating a mobile unit at the start of its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitEvaluation {
    /// The unit's committed mission is still valid.
    Committed(Mission),
    /// The unit is idle and these missions are valid, in vocabulary order.
    Candidates(Vec<Mission>),
    /// The unit is idle and nothing is valid.
    NoMission,
}

fn kind_missions(agent: Agent, view: &WorldView<'_>) -> &'static [Mission] {
    match agent {
        Agent::Unit(idx) => match view.unit(idx).kind {
            UnitKind::Worker => WORKER_MISSIONS,
            UnitKind::Cart => CART_MISSIONS,
        },
        Agent::Structure(_) => STRUCTURE_MISSIONS,
    }
}

/// Whether `mission` is currently valid for `agent`.
///
/// A mission outside the agent's kind vocabulary is never valid.
#[must_use]
pub fn guard(view: &WorldView<'_>, agent: Agent, mission: Mission, ctx: &TurnContext) -> bool {
    if !kind_missions(agent, view).contains(&mission) {
        return false;
    }
    match agent {
        Agent::Unit(idx) => unit_guard(view, view.unit(idx), mission),
        Agent::Structure(_) => structure_guard(view, mission, ctx),
    }
}

fn unit_guard(view: &WorldView<'_>, unit: &Unit, mission: Mission) -> bool {
    let constants = view.constants();
    let team = view.team();
    let full = unit.is_full(constants);

    match mission {
        Mission::MineResource => !full,
        Mission::BuildTheCity => full,
        Mission::DropTheResources => {
            full && !view.structure_position_set(team).contains(&unit.pos)
                && !view.structures(team).is_empty()
        }
        Mission::TransferToCart => full && adjacent_cart_with_space(view, unit.pos).is_some(),
        Mission::PillageRoad => {
            view.tile(unit.pos).is_some_and(|tile| {
                tile.is_road()
                    && !tile.is_structure()
                    && tile.adjacent().iter().any(|&c| {
                        view.structure_position_set(view.opponent()).contains(&c)
                    })
            })
        }
        Mission::CartHarvest => !full && !view.workers(team).is_empty(),
        Mission::Research | Mission::BuildWorker | Mission::BuildCart => false,
    }
}

fn structure_guard(view: &WorldView<'_>, mission: Mission, ctx: &TurnContext) -> bool {
    match mission {
        Mission::Research => {
            view.state().player(view.team()).research_points < view.constants().uranium_research
        }
        Mission::BuildWorker | Mission::BuildCart => ctx.can_build(),
        _ => false,
    }
}

/// The first friendly cart (in unit order) next to `pos` with room left.
#[must_use]
pub fn adjacent_cart_with_space(view: &WorldView<'_>, pos: Coord) -> Option<usize> {
    let team: Team = view.team();
    let constants = view.constants();
    view.carts(team).iter().copied().find(|&idx| {
        let cart = view.unit(idx);
        cart.pos.distance(pos) == 1 && cart.space_left(constants) > 0
    })
}

/// Every mission of `agent`'s kind whose guard holds, in vocabulary order.
#[must_use]
pub fn candidates(view: &WorldView<'_>, agent: Agent, ctx: &TurnContext) -> Vec<Mission> {
    let mut valid: Vec<Mission> = kind_missions(agent, view)
        .iter()
        .copied()
        .filter(|&m| guard(view, agent, m, ctx))
        .collect();
    valid.sort_unstable();
    valid
}

/// Evaluate the mobile unit at arena index `idx`.
///
/// A committed unit whose guard fails has its entry removed from
/// `missions` and is evaluated as idle in the same call.
pub fn evaluate_unit(
    view: &WorldView<'_>,
    idx: usize,
    missions: &mut MissionState,
    ctx: &TurnContext,
) -> UnitEvaluation {
    let agent = Agent::Unit(idx);
    let unit = view.unit(idx);

    if let Some(mission) = missions.get(&unit.id) {
        if guard(view, agent, mission, ctx) {
            return UnitEvaluation::Committed(mission);
        }
        missions.end(&unit.id);
        debug!(unit = %unit.id, %mission, "mission ended");
    }

    let valid = candidates(view, agent, ctx);
    if valid.is_empty() {
        UnitEvaluation::NoMission
    } else {
        UnitEvaluation::Candidates(valid)
    }
}
