//! Benchmark suite for socratic-algo
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use socratic_algo::{batch_mastery_reports, next_state, normalize_score, DialogueState, TransitionInput};

fn bench_next_state(c: &mut Criterion) {
    let input = TransitionInput::default().with_score(1.0).with_nudges(2);
    c.bench_function("next_state(EVALUATE)", |b| {
        b.iter(|| next_state(black_box(DialogueState::Evaluate), black_box(&input)))
    });
}

fn bench_batch_mastery(c: &mut Criterion) {
    let histories: Vec<Vec<_>> = (0..1000)
        .map(|i| (0..20).map(|j| normalize_score(Some(((i + j) % 4) as f64))).collect())
        .collect();
    c.bench_function("batch_mastery_reports(1000x20)", |b| {
        b.iter(|| batch_mastery_reports(black_box(&histories)))
    });
}

criterion_group!(benches, bench_next_state, bench_batch_mastery);
criterion_main!(benches);
