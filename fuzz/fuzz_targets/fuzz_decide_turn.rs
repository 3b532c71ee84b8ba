#![no_main]

use arbitrary::Arbitrary;
use lagash::game::{generate_board, Coord, UnitKind};
use lagash::turn::check_turn;
use lagash::{Action, EngineConfig, Genome, Mission, Session, Team};
use libfuzzer_sys::fuzz_target;

/// A unit dropped onto the generated board.
#[derive(Arbitrary, Debug)]
struct ExtraUnit {
    x: u8,
    y: u8,
    cart: bool,
    opponent: bool,
    cargo: u16,
    cooldown: u8,
}

/// Structured input for multi-turn decision fuzzing.
#[derive(Arbitrary, Debug)]
struct DecideInput {
    /// Board seed.
    board_seed: u64,
    /// Board side, offset from the minimum size.
    size: u8,
    /// Policy seed.
    seed: u64,
    /// Raw genome weights, folded into range.
    weights: Vec<u8>,
    /// Turns to play.
    turns: u8,
    /// Play as the second team.
    second_team: bool,
    /// Avoid tiles opposing units can reach.
    avoid_opponent_reach: bool,
    /// Units added on top of the generated board.
    extras: Vec<ExtraUnit>,
}

fuzz_target!(|input: DecideInput| {
    let size = 6 + u16::from(input.size % 27);
    let Ok(mut state) = generate_board(input.board_seed, size, size) else {
        return;
    };

    // Cap inputs to keep runs short
    for extra in input.extras.iter().take(64) {
        let kind = if extra.cart { UnitKind::Cart } else { UnitKind::Worker };
        let team = Team(u8::from(extra.opponent));
        let pos = Coord::new(u16::from(extra.x) % size, u16::from(extra.y) % size);
        let idx = state.spawn_unit(kind, team, pos);
        let capacity = kind.capacity(&state.constants);
        state.units[idx].cargo.coal = u32::from(extra.cargo).min(capacity);
        state.units[idx].cooldown = f32::from(extra.cooldown % 3);
    }

    let turns = 1 + usize::from(input.turns % 8);
    state.constants.max_turns = u32::try_from(turns).unwrap_or(u32::MAX);
    let genome = if input.weights.is_empty() {
        Genome::uniform(turns, 5)
    } else {
        let flat: Vec<u8> = input
            .weights
            .iter()
            .cycle()
            .take(turns * Mission::COUNT)
            .map(|w| w % 11)
            .collect();
        let Ok(genome) = Genome::from_flat(&flat) else {
            return;
        };
        genome
    };

    let team = Team(u8::from(input.second_team));
    let mut config = EngineConfig::default().with_seed(input.seed);
    config.resolver.avoid_opponent_reach = input.avoid_opponent_reach;
    let mut session = Session::new(team, config);

    for turn in 0..turns {
        state.turn = u32::try_from(turn).unwrap_or(u32::MAX);
        let output = session.decide(&state, &genome).unwrap();

        let violations = check_turn(&state, team, &output, session.missions());
        if !violations.is_empty() {
            panic!("turn {turn} violated invariants: {violations:?}");
        }

        for action in &output.actions {
            let Action::Move { unit, to, .. } = action else {
                continue;
            };
            if let Some(u) = state.units.iter_mut().find(|u| &u.id == unit) {
                u.pos = *to;
            }
        }
    }
});
