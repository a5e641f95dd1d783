//! Set evaluator benchmarks.
//!
//! `can_beat_any` runs for every end-condition check and every legal-move
//! listing, over every contiguous range of a hand.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scout_engine::cards::{build_deck, Card};
use scout_engine::core::GameRng;
use scout_engine::rules::{can_beat_any, classify, is_stronger};

fn hand(len: usize, seed: u64) -> Vec<Card> {
    let mut rng = GameRng::new(seed);
    build_deck(5, &mut rng).into_iter().take(len).collect()
}

fn bench_classify(c: &mut Criterion) {
    let run: Vec<Card> = hand(45, 1)
        .into_iter()
        .filter(|card| card.value() <= 5)
        .take(5)
        .collect();
    c.bench_function("classify_5", |b| b.iter(|| classify(black_box(&run))));
}

fn bench_is_stronger(c: &mut Criterion) {
    let cards = hand(6, 2);
    let (a, b) = cards.split_at(3);
    c.bench_function("is_stronger_3v3", |bench| {
        bench.iter(|| is_stronger(black_box(a), black_box(Some(b))))
    });
}

fn bench_can_beat_any(c: &mut Criterion) {
    let mut group = c.benchmark_group("can_beat_any");
    // A high group nothing in a random hand is likely to beat.
    let table: Vec<Card> = hand(45, 3)
        .into_iter()
        .filter(|card| card.value() == 9)
        .take(3)
        .collect();

    for len in [9usize, 12, 15] {
        let cards = hand(len, 4);
        group.bench_with_input(BenchmarkId::from_parameter(len), &cards, |b, cards| {
            b.iter(|| can_beat_any(black_box(cards), Some(black_box(table.as_slice()))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_is_stronger, bench_can_beat_any);
criterion_main!(benches);
