//! Commands handed back to the game engine.
//!
//! Each [`Action`] displays as one command in the engine's text vocabulary.
//! The engine parses them; this crate only produces them.

use crate::game::{Coord, Direction, ResourceType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A resolved command for one agent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Move a unit one tile.
    Move {
        /// Unit id.
        unit: String,
        /// Direction of travel.
        direction: Direction,
        /// Tile the unit ends up on.
        to: Coord,
    },
    /// Found a city tile where the worker stands.
    BuildCity {
        /// Worker id.
        unit: String,
    },
    /// Queue a worker at a city tile.
    BuildWorker {
        /// City tile position.
        pos: Coord,
    },
    /// Queue a cart at a city tile.
    BuildCart {
        /// City tile position.
        pos: Coord,
    },
    /// Research at a city tile.
    Research {
        /// City tile position.
        pos: Coord,
    },
    /// Remove the road under a worker.
    Pillage {
        /// Worker id.
        unit: String,
    },
    /// Hand resources to an adjacent unit.
    Transfer {
        /// Giving unit id.
        source: String,
        /// Receiving unit id.
        destination: String,
        /// Resource handed over.
        resource: ResourceType,
        /// Amount handed over.
        amount: u32,
    },
}

impl Action {
    /// Destination tile of a move, `None` for every other action.
    #[must_use]
    pub fn destination(&self) -> Option<Coord> {
        match self {
            Action::Move { to, .. } => Some(*to),
            _ => None,
        }
    }

    /// Whether the action is a move.
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { unit, direction, .. } => write!(f, "m {unit} {}", direction.code()),
            Action::BuildCity { unit } => write!(f, "bcity {unit}"),
            Action::BuildWorker { pos } => write!(f, "bw {} {}", pos.x, pos.y),
            Action::BuildCart { pos } => write!(f, "bc {} {}", pos.x, pos.y),
            Action::Research { pos } => write!(f, "r {} {}", pos.x, pos.y),
            Action::Pillage { unit } => write!(f, "p {unit}"),
            Action::Transfer {
                source,
                destination,
                resource,
                amount,
            } => write!(f, "t {source} {destination} {resource} {amount}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_strings() {
        let cases = [
            (
                Action::Move {
                    unit: "u_1".into(),
                    direction: Direction::South,
                    to: Coord::new(2, 3),
                },
                "m u_1 s",
            ),
            (Action::BuildCity { unit: "u_4".into() }, "bcity u_4"),
            (Action::BuildWorker { pos: Coord::new(5, 7) }, "bw 5 7"),
            (Action::BuildCart { pos: Coord::new(0, 1) }, "bc 0 1"),
            (Action::Research { pos: Coord::new(9, 9) }, "r 9 9"),
            (Action::Pillage { unit: "u_2".into() }, "p u_2"),
            (
                Action::Transfer {
                    source: "u_1".into(),
                    destination: "u_2".into(),
                    resource: ResourceType::Coal,
                    amount: 40,
                },
                "t u_1 u_2 coal 40",
            ),
        ];
        for (action, expected) in cases {
            assert_eq!(action.to_string(), expected);
        }
    }

    #[test]
    fn test_destination_only_for_moves() {
        let mv = Action::Move {
            unit: "u_1".into(),
            direction: Direction::East,
            to: Coord::new(1, 0),
        };
        assert_eq!(mv.destination(), Some(Coord::new(1, 0)));
        assert!(mv.is_move());
        assert_eq!(Action::Research { pos: Coord::new(0, 0) }.destination(), None);
    }
}
