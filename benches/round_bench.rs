//! Benchmarks for round simulation and scoring.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sushigo_rl::agent::Player;
use sushigo_rl::game::{score_played, Card, GameSession, SessionConfig};

fn training_round_benchmark(c: &mut Criterion) {
    let players = vec![
        Player::learning("AI1", 0.9, 0.05, 0.9),
        Player::random("Random1"),
        Player::random("Random2"),
    ];
    let config = SessionConfig::default().with_num_cards(5).with_seed(42);
    let mut session = GameSession::new(players, config).expect("valid session");

    c.bench_function("training_single_round", |b| {
        b.iter(|| {
            session.reset();
            session.deal_cards().expect("deal");
            session.play_round().expect("draft");
            session.score_round();
            black_box(session.scores()[0])
        })
    });
}

fn scoring_benchmark(c: &mut Criterion) {
    let played = vec![
        Card::Wasabi,
        Card::SquidNigiri,
        Card::Tempura,
        Card::Tempura,
        Card::Sashimi,
        Card::Sashimi,
        Card::Sashimi,
        Card::Dumpling,
        Card::Dumpling,
        Card::Maki2,
    ];

    c.bench_function("score_played", |b| {
        b.iter(|| black_box(score_played(black_box(&played))))
    });
}

criterion_group!(benches, training_round_benchmark, scoring_benchmark);
criterion_main!(benches);
