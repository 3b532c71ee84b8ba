//! Sides and per-side state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Team(pub u8);

impl Team {
    /// The other side in a two-player match.
    #[must_use]
    pub const fn opponent(self) -> Team {
        Team(1 - (self.0 & 1))
    }

    /// Index into two-element per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 & 1) as usize
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State for a single side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Which side this is.
    pub team: Team,
    /// Accumulated research points.
    pub research_points: u32,
}

impl Player {
    /// Create a new player with no research.
    #[must_use]
    pub const fn new(team: Team) -> Self {
        Self {
            team,
            research_points: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Team(0).opponent(), Team(1));
        assert_eq!(Team(1).opponent(), Team(0));
        assert_eq!(Team(1).opponent().opponent(), Team(1));
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(Team(1));
        assert_eq!(player.team, Team(1));
        assert_eq!(player.research_points, 0);
    }
}
