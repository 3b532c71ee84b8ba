// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Lagash: a per-turn mission and action decision engine for grid strategy
//! games in the style of the Lux AI challenge.
//!
//! Given one turn's board snapshot, a side to play, the cross-turn mission
//! store and a genome of mission weights, the engine produces a list of
//! commands for the game engine in which no two moves share a destination.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  turn: decide_turn / Session / decide_many   │
//! ├───────────────┬───────────────┬──────────────┤
//! │ mission       │ genome        │ resolver     │
//! │ guards, store │ weights, RNG  │ tile claims  │
//! ├───────────────┴───────────────┴──────────────┤
//! │  world: WorldView + TileState (turn-scoped)  │
//! ├──────────────────────────────────────────────┤
//! │  game: snapshot, observation parser, boards  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use lagash::game::{generate_board, Team};
//! use lagash::{EngineConfig, Genome, Session};
//!
//! let board = generate_board(7, 12, 12).unwrap();
//! let genome = Genome::uniform(360, 5);
//! let mut session = Session::new(Team(0), EngineConfig::default());
//! let output = session.decide(&board, &genome).unwrap();
//! for command in output.commands() {
//!     println!("{command}");
//! }
//! ```

pub mod action;
pub mod config;
pub mod error;
pub mod game;
pub mod genome;
pub mod mission;
pub mod resolver;
pub mod turn;
pub mod world;

pub use action::Action;
pub use config::EngineConfig;
pub use error::{ConfigError, EngineError, GenomeError, ObservationError};
pub use game::{Coord, GameState, Team};
pub use genome::{Genome, GenomePolicy};
pub use mission::{Mission, MissionState};
pub use resolver::{ActionResolver, ResolverConfig};
pub use turn::{decide_many, decide_turn, Decision, Session, TurnOutput};
pub use world::{TileState, WorldView};
