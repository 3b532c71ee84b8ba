//! Turn output invariants - sanity checks that detect bugs.
//!
//! These should never trigger for output produced by
//! [`decide_turn`](crate::turn::decide_turn). Property tests and the fuzzer
//! run them after every decided turn.

use crate::action::Action;
use crate::game::{Coord, GameState, Team};
use crate::mission::MissionState;
use crate::turn::TurnOutput;
use std::collections::HashSet;
use thiserror::Error;

/// Invariant violation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

/// Check a decided turn against the snapshot it was decided on.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_turn(
    state: &GameState,
    team: Team,
    output: &TurnOutput,
    missions: &MissionState,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut report = |message: String| violations.push(InvariantViolation { message });

    let opposing_structures: HashSet<Coord> = state
        .city_tiles
        .iter()
        .filter(|t| t.team != team)
        .map(|t| t.pos)
        .collect();
    let unit_tiles: HashSet<Coord> = state.units.iter().map(|u| u.pos).collect();

    let mut destinations = HashSet::new();
    let mut acting_agents = HashSet::new();

    for action in &output.actions {
        let agent = match action {
            Action::Move { unit, .. }
            | Action::BuildCity { unit }
            | Action::Pillage { unit }
            | Action::Transfer { source: unit, .. } => unit.clone(),
            Action::BuildWorker { pos } | Action::BuildCart { pos } | Action::Research { pos } => {
                pos.to_string()
            }
        };
        if !acting_agents.insert(agent.clone()) {
            report(format!("agent {agent} has more than one action"));
        }

        match action {
            Action::Move { unit, to, .. } => {
                if !destinations.insert(*to) {
                    report(format!("two moves target {to}"));
                }
                match state.unit(unit) {
                    Some(u) if u.team == team && u.can_act() => {
                        if u.pos.distance(*to) != 1 || !state.map.in_bounds(*to) {
                            report(format!("{unit} moves from {} to non-adjacent {to}", u.pos));
                        }
                    }
                    _ => report(format!("move for unit {unit} that cannot act for this side")),
                }
                if opposing_structures.contains(to) {
                    report(format!("{unit} moves onto opposing city tile {to}"));
                }
                let friendly_structure = state
                    .city_tiles
                    .iter()
                    .any(|t| t.team == team && t.pos == *to);
                if unit_tiles.contains(to) && !friendly_structure {
                    report(format!("{unit} moves onto occupied tile {to}"));
                }
            }
            Action::BuildWorker { pos } | Action::BuildCart { pos } | Action::Research { pos } => {
                let owned = state
                    .city_tiles
                    .iter()
                    .any(|t| t.team == team && t.pos == *pos && t.can_act());
                if !owned {
                    report(format!("city action at {pos} without an acting friendly city tile"));
                }
            }
            Action::BuildCity { unit }
            | Action::Pillage { unit }
            | Action::Transfer { source: unit, .. } => {
                let acting_worker = state
                    .unit(unit)
                    .is_some_and(|u| u.team == team && u.is_worker() && u.can_act());
                if !acting_worker {
                    report(format!("worker action for {unit} that cannot act for this side"));
                }
            }
        }
    }

    let friendly: HashSet<&str> = state
        .units
        .iter()
        .filter(|u| u.team == team)
        .map(|u| u.id.as_str())
        .collect();
    for (id, mission) in missions.iter() {
        if !friendly.contains(id) {
            report(format!("mission {mission} stored for unknown unit {id}"));
        }
    }

    violations
}
