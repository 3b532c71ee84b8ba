//! Multi-turn session behaviour.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use lagash::game::{generate_board, Cargo, Coord, Map, UnitKind};
use lagash::genome::{genome_path, load_genome, save_genome};
use lagash::{
    decide_many, Action, EngineConfig, EngineError, GameState, Genome, Mission, MissionState,
    Session, Team, TurnOutput,
};
use tempfile::TempDir;

/// Apply the emitted moves to the board and advance the turn.
fn advance(state: &mut GameState, output: &TurnOutput) {
    for action in &output.actions {
        let Action::Move { unit, to, .. } = action else {
            continue;
        };
        if let Some(u) = state.units.iter_mut().find(|u| &u.id == unit) {
            u.pos = *to;
        }
    }
    state.turn += 1;
}

#[test]
fn drop_mission_walks_home_and_ends() {
    let mut state = GameState::new(Map::new(6, 8).unwrap());
    let home = Coord::new(1, 6);
    state.add_city_tile("c_1", Team(0), home);
    let w = state.spawn_unit(UnitKind::Worker, Team(0), Coord::new(1, 1));
    state.units[w].cargo.uranium = 100;
    let genome = Genome::uniform(360, 0).with_weight(Mission::DropTheResources, 10);
    let mut session = Session::new(Team(0), EngineConfig::default());

    for _ in 0..5 {
        let output = session.decide(&state, &genome).unwrap();
        assert_eq!(output.commands()[0], "m u_1 s");
        assert_eq!(session.missions().get("u_1"), Some(Mission::DropTheResources));
        advance(&mut state, &output);
    }
    assert_eq!(state.units[w].pos, home);

    // The game engine empties the cargo into the city.
    state.units[w].cargo = Cargo::default();
    let output = session.decide(&state, &genome).unwrap();
    assert_eq!(session.missions().get("u_1"), None);
    assert_eq!(output.decisions[0].decision.mission(), Some(Mission::MineResource));
}

#[test]
fn turn_zero_starts_a_new_game() {
    let mut state = generate_board(3, 12, 12).unwrap();
    let genome = Genome::uniform(360, 5);
    let mut session = Session::new(Team(0), EngineConfig::default().with_seed(77));

    let first = session.decide(&state, &genome).unwrap();
    advance(&mut state, &first);
    session.decide(&state, &genome).unwrap();

    // Replaying turn 0 gives the same answer as a brand new session.
    let fresh = generate_board(3, 12, 12).unwrap();
    assert_eq!(session.decide(&fresh, &genome).unwrap(), first);
}

#[test]
fn saved_missions_resume() {
    let mut state = GameState::new(Map::new(8, 8).unwrap());
    state.add_city_tile("c_1", Team(0), Coord::new(6, 6));
    let w = state.spawn_unit(UnitKind::Worker, Team(0), Coord::new(1, 1));
    state.units[w].cargo.wood = 100;
    let genome = Genome::uniform(360, 0).with_weight(Mission::DropTheResources, 10);

    let mut session = Session::new(Team(0), EngineConfig::default());
    session.decide(&state, &genome).unwrap();
    let json = serde_json::to_string(session.missions()).unwrap();
    assert_eq!(json, r#"{"u_1":"drop_the_resources"}"#);

    // A new process picks the commitment back up mid-game.
    let missions: MissionState = serde_json::from_str(&json).unwrap();
    let mut resumed = Session::new(Team(0), EngineConfig::default()).with_missions(missions);
    let genome = genome.with_weight(Mission::BuildTheCity, 10);
    state.turn = 1;
    let output = resumed.decide(&state, &genome).unwrap();
    assert_eq!(output.decisions[0].decision.mission(), Some(Mission::DropTheResources));
}

#[test]
fn decide_many_reports_errors_per_session() {
    let genome = Genome::uniform(360, 5);
    let mut states: Vec<GameState> = (0..4).map(|s| generate_board(s, 10, 10).unwrap()).collect();
    states[1].turn = 360;
    states[3].constants.max_turns = 200;

    let mut sessions: Vec<Session> = (0..4)
        .map(|_| Session::new(Team(1), EngineConfig::default()))
        .collect();
    let results = decide_many(&mut sessions, &states, &genome);

    assert_eq!(results.len(), 4);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1],
        Err(EngineError::TurnOutOfRange {
            turn: 360,
            turns: 360,
        })
    );
    assert!(results[2].is_ok());
    assert_eq!(
        results[3],
        Err(EngineError::GenomeLength {
            expected: 200,
            actual: 360,
        })
    );
}

#[test]
fn sessions_only_command_their_own_side() {
    let state = generate_board(11, 14, 14).unwrap();
    let genome = Genome::uniform(360, 5);

    for team in [Team(0), Team(1)] {
        let mut session = Session::new(team, EngineConfig::default());
        let output = session.decide(&state, &genome).unwrap();
        let own: Vec<&str> = state
            .units
            .iter()
            .filter(|u| u.team == team)
            .map(|u| u.id.as_str())
            .collect();
        for decision in &output.decisions {
            let is_unit = decision.agent.starts_with("u_");
            assert!(!is_unit || own.contains(&decision.agent.as_str()));
        }
    }
}

#[test]
fn genome_file_drives_the_same_turn() {
    let temp_dir = TempDir::new().unwrap();
    let path = genome_path(temp_dir.path(), "candidate");
    let genome = Genome::uniform(360, 2)
        .with_weight(Mission::MineResource, 9)
        .with_weight(Mission::Research, 7);
    save_genome(&genome, &path).unwrap();
    let loaded = load_genome(&path).unwrap();

    let state = generate_board(5, 16, 16).unwrap();
    let mut a = Session::new(Team(0), EngineConfig::default());
    let mut b = Session::new(Team(0), EngineConfig::default());
    assert_eq!(a.decide(&state, &genome).unwrap(), b.decide(&state, &loaded).unwrap());
}
