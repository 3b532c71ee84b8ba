//! The per-turn decision pass and sessions that carry it across turns.
//!
//! [`decide_turn`] is the whole engine for one side and one turn:
//! 1. Build a [`WorldView`] over the snapshot (dropped when the call returns)
//! 2. Evaluate every mobile unit that can act, in snapshot order
//! 3. Evaluate every city tile that can act, sorted by (city id, y, x)
//! 4. Sample a mission per agent and resolve it to an action
//!
//! [`Session`] owns the cross-turn state of one game; [`decide_many`] runs
//! independent sessions in parallel.

pub mod invariants;

pub use invariants::{check_turn, InvariantViolation};

use crate::action::Action;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::{GameState, Team};
use crate::genome::{Genome, GenomePolicy};
use crate::mission::{
    candidates, evaluate_unit, Agent, Mission, MissionState, TurnContext, UnitEvaluation,
};
use crate::resolver::{ActionResolver, Resolution, ResolverConfig};
use crate::world::WorldView;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, debug_span};

/// What happened to one agent this turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decision {
    /// The agent's mission produced an action.
    Acted {
        /// Mission being pursued.
        mission: Mission,
        /// Emitted command.
        action: Action,
    },
    /// The mission needs no command this turn.
    Held {
        /// Mission being pursued.
        mission: Mission,
    },
    /// The mission wanted a move but every tile was taken.
    Blocked {
        /// Mission being pursued.
        mission: Mission,
    },
    /// No mission is valid for the agent.
    NoMission,
    /// The agent is on cooldown.
    CannotAct,
}

impl Decision {
    /// The mission behind this decision, if any.
    #[must_use]
    pub fn mission(&self) -> Option<Mission> {
        match self {
            Decision::Acted { mission, .. }
            | Decision::Held { mission }
            | Decision::Blocked { mission } => Some(*mission),
            Decision::NoMission | Decision::CannotAct => None,
        }
    }
}

/// One agent's decision, labelled with the agent's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentDecision {
    /// Unit id, or `city@x,y` for a city tile.
    pub agent: String,
    /// What the agent did.
    #[serde(flatten)]
    pub decision: Decision,
}

/// Result of one decision pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TurnOutput {
    /// Commands in evaluation order.
    pub actions: Vec<Action>,
    /// Every evaluated agent, units first, then city tiles.
    pub decisions: Vec<AgentDecision>,
}

impl TurnOutput {
    /// The commands as the game engine expects them.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }
}

/// Decide one turn for `team`.
///
/// `missions` is read and updated in place. The turn index is
/// `state.turn`.
///
/// # Errors
///
/// Returns [`EngineError::GenomeLength`] if the genome does not cover
/// `state.constants.max_turns` turns, [`EngineError::TurnOutOfRange`] if it
/// has no row for the turn, and [`EngineError::MissingHandler`] if a mission
/// is sampled for an agent kind that cannot carry it out.
pub fn decide_turn<R: Rng>(
    state: &GameState,
    team: Team,
    opponent: Team,
    missions: &mut MissionState,
    policy: &mut GenomePolicy<'_, R>,
    config: &ResolverConfig,
) -> Result<TurnOutput, EngineError> {
    let turn = state.turn;
    let _span = debug_span!("turn", turn, %team).entered();

    let turns = policy.genome().turns();
    let expected = state.constants.max_turns;
    if usize::try_from(expected) != Ok(turns) {
        return Err(EngineError::GenomeLength {
            expected,
            actual: turns,
        });
    }
    if policy.genome().row(turn).is_none() {
        return Err(EngineError::TurnOutOfRange { turn, turns });
    }

    let view = WorldView::new(state, team, opponent);
    let pruned = missions.retain_units(view.unit_ids(team).iter().copied());
    if pruned > 0 {
        debug!(pruned, "dropped missions of vanished units");
    }

    let mut ctx = TurnContext::new(&view);
    let mut resolver = ActionResolver::new(&view, config);
    let mut output = TurnOutput::default();

    for &idx in view.units(team) {
        let unit = view.unit(idx);
        let mission = if unit.can_act() {
            match evaluate_unit(&view, idx, missions, &ctx) {
                UnitEvaluation::Committed(mission) => Some(mission),
                UnitEvaluation::Candidates(valid) => policy.sample(turn, &valid),
                UnitEvaluation::NoMission => None,
            }
        } else {
            None
        };

        let decision = match mission {
            None if !unit.can_act() => Decision::CannotAct,
            None => Decision::NoMission,
            Some(mission) => {
                let resolution = resolver.resolve(Agent::Unit(idx), mission, &mut ctx)?;
                let held = matches!(resolution, Resolution::Hold);
                if !held && missions.get(&unit.id) != Some(mission) {
                    missions.commit(&unit.id, mission);
                    debug!(unit = %unit.id, %mission, "mission committed");
                }
                to_decision(mission, resolution, &mut output.actions)
            }
        };
        output.decisions.push(AgentDecision {
            agent: unit.id.clone(),
            decision,
        });
    }

    for &idx in view.structure_order(team) {
        let tile = view.structure(idx);
        let decision = if tile.can_act() {
            let valid = candidates(&view, Agent::Structure(idx), &ctx);
            match policy.sample(turn, &valid) {
                Some(mission) => {
                    let resolution = resolver.resolve(Agent::Structure(idx), mission, &mut ctx)?;
                    to_decision(mission, resolution, &mut output.actions)
                }
                None => Decision::NoMission,
            }
        } else {
            Decision::CannotAct
        };
        output.decisions.push(AgentDecision {
            agent: tile.id().to_string(),
            decision,
        });
    }

    debug!(actions = output.actions.len(), committed = missions.len(), "turn decided");
    Ok(output)
}

fn to_decision(mission: Mission, resolution: Resolution, actions: &mut Vec<Action>) -> Decision {
    match resolution {
        Resolution::Act(action) => {
            actions.push(action.clone());
            Decision::Acted { mission, action }
        }
        Resolution::Hold => Decision::Held { mission },
        Resolution::Blocked => Decision::Blocked { mission },
    }
}

/// Cross-turn state of one side in one game.
///
/// Owns the mission store and the policy RNG. Seeing turn 0 starts a new
/// game: missions are cleared and the RNG is reseeded.
#[derive(Debug, Clone)]
pub struct Session {
    team: Team,
    opponent: Team,
    missions: MissionState,
    rng: SmallRng,
    config: EngineConfig,
}

impl Session {
    /// Create a session for `team` against its opponent.
    #[must_use]
    pub fn new(team: Team, config: EngineConfig) -> Self {
        Self {
            team,
            opponent: team.opponent(),
            missions: MissionState::new(),
            rng: SmallRng::seed_from_u64(config.seed),
            config,
        }
    }

    /// Resume with previously saved missions.
    #[must_use]
    pub fn with_missions(mut self, missions: MissionState) -> Self {
        self.missions = missions;
        self
    }

    /// The controlling side.
    #[must_use]
    pub fn team(&self) -> Team {
        self.team
    }

    /// Current mission commitments.
    #[must_use]
    pub fn missions(&self) -> &MissionState {
        &self.missions
    }

    /// Session configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Forget all missions and reseed the RNG.
    pub fn reset(&mut self) {
        self.missions.clear();
        self.rng = SmallRng::seed_from_u64(self.config.seed);
    }

    /// Decide one turn.
    ///
    /// # Errors
    ///
    /// Propagates [`decide_turn`] errors; the session's missions are left as
    /// they were before the failing agent.
    pub fn decide(
        &mut self,
        state: &GameState,
        genome: &Genome,
    ) -> Result<TurnOutput, EngineError> {
        if state.turn == 0 {
            self.reset();
        }
        let mut policy = GenomePolicy::new(genome, &mut self.rng);
        decide_turn(
            state,
            self.team,
            self.opponent,
            &mut self.missions,
            &mut policy,
            &self.config.resolver,
        )
    }
}

/// Decide one turn in each session, in parallel.
///
/// Session `i` sees `states[i]`; extra sessions or states are ignored.
pub fn decide_many(
    sessions: &mut [Session],
    states: &[GameState],
    genome: &Genome,
) -> Vec<Result<TurnOutput, EngineError>> {
    sessions
        .par_iter_mut()
        .zip(states.par_iter())
        .map(|(session, state)| session.decide(state, genome))
        .collect()
}
