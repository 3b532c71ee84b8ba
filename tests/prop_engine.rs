//! Property-based tests for the decision engine.
//!
//! Boards come from the deterministic generator with extra units scattered
//! on top, so every run sees crowded, contested positions.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use lagash::game::{generate_board, Coord, UnitKind};
use lagash::turn::check_turn;
use lagash::{EngineConfig, GameState, Genome, Mission, Session, Team, WorldView};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Debug, Clone)]
struct Extra {
    x: u16,
    y: u16,
    cart: bool,
    team: u8,
    cargo: u32,
    cooldown: u8,
}

fn extra_strategy() -> impl Strategy<Value = Extra> {
    (any::<u16>(), any::<u16>(), any::<bool>(), 0u8..2, 0u32..2500, 0u8..3).prop_map(
        |(x, y, cart, team, cargo, cooldown)| Extra {
            x,
            y,
            cart,
            team,
            cargo,
            cooldown,
        },
    )
}

fn crowded_board(seed: u64, size: u16, extras: &[Extra]) -> GameState {
    let mut state = generate_board(seed, size, size).unwrap();
    for extra in extras {
        let kind = if extra.cart { UnitKind::Cart } else { UnitKind::Worker };
        let pos = Coord::new(extra.x % size, extra.y % size);
        let idx = state.spawn_unit(kind, Team(extra.team), pos);
        let capacity = kind.capacity(&state.constants);
        let unit = &mut state.units[idx];
        unit.cargo.wood = extra.cargo.min(capacity);
        unit.cooldown = f32::from(extra.cooldown);
    }
    state
}

fn board_strategy() -> impl Strategy<Value = GameState> {
    (any::<u64>(), 6u16..16, prop::collection::vec(extra_strategy(), 0..24))
        .prop_map(|(seed, size, extras)| crowded_board(seed, size, &extras))
}

fn random_genome(seed: u64) -> Genome {
    Genome::random(&mut SmallRng::seed_from_u64(seed), 360)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Flat weight vectors load exactly when every weight is in range.
    #[test]
    fn genome_weights_stay_in_range(weights in prop::collection::vec(0u8..16, 1..60)) {
        let result = Genome::from_flat(&weights);
        let well_formed =
            weights.len() % Mission::COUNT == 0 && weights.iter().all(|&w| w <= 10);
        prop_assert_eq!(result.is_ok(), well_formed);
        if let Ok(genome) = result {
            prop_assert_eq!(genome.to_flat(), weights);
        }
    }

    /// No decided turn ever breaks an output invariant.
    #[test]
    fn decided_turns_are_valid(
        state in board_strategy(),
        genome_seed in any::<u64>(),
        seed in any::<u64>(),
        team in 0u8..2,
    ) {
        let genome = random_genome(genome_seed);
        let team = Team(team);
        let mut session = Session::new(team, EngineConfig::default().with_seed(seed));
        let mut state = state;

        for turn in 0..4 {
            state.turn = turn;
            let output = session.decide(&state, &genome).unwrap();
            let violations = check_turn(&state, team, &output, session.missions());
            prop_assert!(violations.is_empty(), "turn {turn}: {violations:?}");

            let agents = state.units.iter().filter(|u| u.team == team).count()
                + state.city_tiles.iter().filter(|t| t.team == team).count();
            prop_assert_eq!(output.decisions.len(), agents);
        }
    }

    /// Same seed, same genome, same boards: same commands.
    #[test]
    fn sessions_are_deterministic(
        state in board_strategy(),
        genome_seed in any::<u64>(),
        seed in any::<u64>(),
    ) {
        let genome = random_genome(genome_seed);
        let config = EngineConfig::default().with_seed(seed);
        let mut a = Session::new(Team(0), config);
        let mut b = Session::new(Team(0), config);
        let mut state = state;

        for turn in 0..3 {
            state.turn = turn;
            let (left, right) = (a.decide(&state, &genome), b.decide(&state, &genome));
            prop_assert_eq!(left.unwrap(), right.unwrap());
            prop_assert_eq!(a.missions(), b.missions());
        }
    }

    /// View accessors return identical answers on repeated calls, and the
    /// occupied and empty sets partition the board.
    #[test]
    fn world_view_is_consistent(state in board_strategy(), team in 0u8..2) {
        let team = Team(team);
        let view = WorldView::new(&state, team, team.opponent());

        let first = view.empty_tiles().to_vec();
        prop_assert_eq!(view.empty_tiles(), first.as_slice());
        prop_assert_eq!(view.occupied().len() + view.empty_tiles().len(), state.map.len());

        for &coord in view.buildable_tiles() {
            let tile = view.tile(coord).unwrap();
            prop_assert!(tile.is_empty() && !tile.is_resource());
        }

        let order = view.structure_order(team);
        prop_assert_eq!(order.len(), view.structures(team).len());
        for pair in order.windows(2) {
            let (a, b) = (view.structure(pair[0]), view.structure(pair[1]));
            let key_a = (a.city_id.as_str(), a.pos.y, a.pos.x);
            let key_b = (b.city_id.as_str(), b.pos.y, b.pos.x);
            prop_assert!(key_a <= key_b);
        }
    }
}
