//! Benchmark suite for moji-algo
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use moji_algo::{AdaptiveSelector, Outcome, PerformanceLedger};

fn bench_select_weighted(c: &mut Criterion) {
    let mut selector = AdaptiveSelector::with_seed(42);
    let pool: Vec<String> = (0..1000).map(|i| format!("item-{}", i)).collect();
    for (i, id) in pool.iter().enumerate() {
        selector.update_weight(id, i % 3 == 0);
    }

    c.bench_function("AdaptiveSelector::select_weighted/1000", |b| {
        b.iter(|| selector.select_weighted(&pool).unwrap())
    });
}

fn bench_compute_mastered(c: &mut Criterion) {
    let mut ledger = PerformanceLedger::new();
    for i in 0..10_000 {
        let id = format!("item-{}", i);
        for j in 0..12 {
            let outcome = if (i + j) % 7 == 0 {
                Outcome::wrong()
            } else {
                Outcome::correct()
            };
            ledger.record(&id, outcome);
        }
    }

    c.bench_function("mastery::compute_mastered/10000", |b| {
        b.iter(|| moji_algo::compute_mastered(&ledger))
    });
}

criterion_group!(benches, bench_select_weighted, bench_compute_mastered);
criterion_main!(benches);
