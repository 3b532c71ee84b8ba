//! Output formatting utilities for CLI.

use lagash::mission::MissionState;
use lagash::turn::{AgentDecision, Decision, TurnOutput};
use lagash::{Genome, Mission, Team};
use serde::Serialize;
use std::fmt::Write;

/// JSON-serializable result of the decide command.
#[derive(Debug, Serialize)]
pub(super) struct JsonTurn<'a> {
    /// Turn decided.
    turn: u32,
    /// Controlling side.
    team: u8,
    /// Commands for the game engine.
    commands: Vec<String>,
    /// Per-agent decisions.
    decisions: &'a [AgentDecision],
    /// Mission store after the turn.
    missions: &'a MissionState,
}

impl<'a> JsonTurn<'a> {
    /// Create from a turn's output.
    pub(super) fn new(
        turn: u32,
        team: Team,
        output: &'a TurnOutput,
        missions: &'a MissionState,
    ) -> Self {
        Self {
            turn,
            team: team.0,
            commands: output.commands(),
            decisions: &output.decisions,
            missions,
        }
    }
}

/// Commands one per line, followed by a summary on comment lines.
pub(super) fn format_text(output: &TurnOutput) -> String {
    let mut text = String::new();
    for command in output.commands() {
        let _ = writeln!(text, "{command}");
    }

    let count = |pred: fn(&Decision) -> bool| {
        output.decisions.iter().filter(|d| pred(&d.decision)).count()
    };
    let _ = writeln!(
        text,
        "# acted {} held {} blocked {} idle {} cooldown {}",
        count(|d| matches!(d, Decision::Acted { .. })),
        count(|d| matches!(d, Decision::Held { .. })),
        count(|d| matches!(d, Decision::Blocked { .. })),
        count(|d| matches!(d, Decision::NoMission)),
        count(|d| matches!(d, Decision::CannotAct)),
    );
    text
}

/// Per-mission mean weights of a genome.
pub(super) fn format_genome(genome: &Genome) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "turns: {}", genome.turns());
    for (mission, mean) in Mission::ALL.iter().zip(genome.mean_weights()) {
        let _ = writeln!(text, "  {:<20} {mean:>5.2}", mission.name());
    }
    text
}
