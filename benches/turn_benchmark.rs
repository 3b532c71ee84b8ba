//! Benchmarks for the per-turn decision pass.
//!
//! This is the hot path a trainer runs millions of times per generation.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use lagash::game::{Coord, GameState, UnitKind, generate_board};
use lagash::resolver::ResolverConfig;
use lagash::{
    EngineConfig, Genome, GenomePolicy, MissionState, Session, Team, WorldView, decide_many,
    decide_turn,
};

/// A generated board with extra workers spread over the friendly half.
fn busy_board(seed: u64, size: u16, workers: u16) -> GameState {
    let mut state = generate_board(seed, size, size).unwrap();
    for i in 0..workers {
        let pos = Coord::new((i * 3) % (size / 2), (i * 7) % size);
        state.spawn_unit(UnitKind::Worker, Team(0), pos);
    }
    state
}

fn bench_decide_turn(c: &mut Criterion) {
    let genome = Genome::uniform(360, 5);
    let config = ResolverConfig::default();

    for (size, workers) in [(12u16, 4u16), (24, 20), (32, 60)] {
        let state = busy_board(42, size, workers);
        c.bench_function(&format!("decide_turn_{size}x{size}_{workers}w"), |b| {
            b.iter(|| {
                let mut policy = GenomePolicy::seeded(&genome, 7);
                let mut missions = MissionState::new();
                let output = decide_turn(
                    black_box(&state),
                    Team(0),
                    Team(1),
                    &mut missions,
                    &mut policy,
                    &config,
                );
                black_box(output)
            });
        });
    }
}

fn bench_world_view(c: &mut Criterion) {
    let state = busy_board(42, 32, 60);

    c.bench_function("world_view_full_scan", |b| {
        b.iter(|| {
            let view = WorldView::new(black_box(&state), Team(0), Team(1));
            black_box(view.buildable_tiles().len() + view.harvestable_tiles(Team(0)).len())
        });
    });
}

fn bench_decide_many(c: &mut Criterion) {
    let genome = Genome::uniform(360, 5);
    let states: Vec<GameState> = (0..64).map(|seed| busy_board(seed, 24, 20)).collect();

    c.bench_function("decide_many_64_sessions", |b| {
        b.iter(|| {
            let mut sessions: Vec<Session> = (0..64)
                .map(|seed| Session::new(Team(0), EngineConfig::default().with_seed(seed)))
                .collect();
            black_box(decide_many(&mut sessions, black_box(&states), &genome))
        });
    });
}

criterion_group!(benches, bench_decide_turn, bench_world_view, bench_decide_many);
criterion_main!(benches);
