//! Benchmarks for dealing and playing a full board.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use emoji_pair::board::{self, GameState};
use emoji_pair::core::{GameRng, PairSet, Timestamp};
use emoji_pair::leaderboard::{insert_ranked, LeaderboardEntry};

fn perfect_game(state: &GameState) -> GameState {
    let deck: Vec<_> = state.deck().iter().cloned().collect();
    let mut state = state.clone();
    for (i, symbol) in deck.iter().enumerate() {
        if let Some(j) = deck.iter().skip(i + 1).position(|s| s == symbol) {
            let t = Timestamp::from_millis(i as u64);
            state = board::flip(&state, i, t);
            state = board::flip(&state, i + 1 + j, t);
        }
    }
    state
}

fn bench_board(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let pairs = PairSet::emojis();

    c.bench_function("new_game_24", |b| {
        let mut rng = GameRng::new(1);
        b.iter(|| board::new_game(black_box(&pairs), &mut rng, Timestamp::from_millis(0)));
    });

    let dealt = board::new_game(&pairs, &mut GameRng::new(2), Timestamp::from_millis(0));
    c.bench_function("perfect_game_24", |b| {
        b.iter(|| perfect_game(black_box(&dealt)));
    });

    let full: Vec<_> = (0..10).map(|i| LeaderboardEntry::new("p", i * 100)).collect();
    c.bench_function("insert_ranked_full", |b| {
        b.iter(|| insert_ranked(black_box(&full), LeaderboardEntry::new("q", 450), 10));
    });
}

criterion_group!(benches, bench_board);
criterion_main!(benches);
