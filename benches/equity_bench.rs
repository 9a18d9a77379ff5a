//! Benchmarks for hand evaluation and equity estimation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdem_equity::card::Card;
use holdem_equity::equity_calculator::equity;
use holdem_equity::hand_evaluator::evaluate;

fn evaluate_benchmark(c: &mut Criterion) {
    let hand = ["8S", "TS", "8H", "KS", "9S", "TH", "KH"].map(|code| code.parse::<Card>().unwrap());
    c.bench_function("evaluate_seven_cards", |b| {
        b.iter(|| evaluate(black_box(&hand)))
    });
}

fn equity_benchmark(c: &mut Criterion) {
    c.bench_function("equity_preflop_10k", |b| {
        b.iter(|| equity(black_box(&["AS", "KS"]), &[], 2, 10_000).unwrap())
    });
}

criterion_group!(benches, evaluate_benchmark, equity_benchmark);
criterion_main!(benches);
