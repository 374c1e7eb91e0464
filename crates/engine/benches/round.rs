//! Benchmarks for the turn loop
//!
//! Measures move enumeration, a single turn, and a full random game.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;

use azul_engine::{play_turn, Game, GameConfig, GameId, RandomAgent, Seat};

fn new_game(players: u32, seed: u64) -> Game {
    let seats = (1..=players).map(|i| Seat::new(i, format!("p{i}"))).collect();
    Game::new(GameId(1), seats, &GameConfig::with_seed(seed)).expect("valid setup")
}

fn bench_legal_draws(c: &mut Criterion) {
    let game = new_game(4, 42);

    c.bench_function("legal_draws", |b| {
        b.iter(|| black_box(black_box(&game).legal_draws()))
    });
}

fn bench_single_turn(c: &mut Criterion) {
    let game = new_game(2, 42);
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let mut agent = RandomAgent::new();

    c.bench_function("single_turn", |b| {
        b.iter(|| {
            let mut game = game.clone();
            let player = play_turn(&mut game, &mut agent, &mut rng).expect("legal turn");
            black_box((game, player))
        })
    });
}

fn bench_full_game(c: &mut Criterion) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut agent = RandomAgent::new();

    c.bench_function("full_random_game_2p", |b| {
        b.iter(|| {
            let mut game = new_game(2, 7);
            while !game.has_ended() {
                play_turn(&mut game, &mut agent, &mut rng).expect("legal turn");
            }
            black_box(game.standings())
        })
    });
}

criterion_group!(benches, bench_legal_draws, bench_single_turn, bench_full_game);
criterion_main!(benches);
