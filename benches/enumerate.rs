//! Benchmark for full tree enumeration.
//!
//! Run with: cargo bench --bench enumerate

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mancala_tree::{BoardConfig, Enumerator, FallbackPolicy, NullSink, PositionStore, SearchConfig};

fn benchmark_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");

    // (3, 2) visits 7179 positions, (2, 3) visits 142.
    for &(locations, tokens, positions) in &[(2usize, 3usize, 142u64), (3, 2, 7179)] {
        let board = BoardConfig::new(locations, tokens).unwrap();
        group.throughput(Throughput::Elements(positions));

        for policy in [FallbackPolicy::Fail, FallbackPolicy::HeapOnly] {
            let settings = SearchConfig::default().with_fallback(policy);
            let id = BenchmarkId::new(format!("{policy:?}"), format!("L{locations}_T{tokens}"));

            group.bench_with_input(id, &settings, |b, settings| {
                b.iter(|| {
                    let report = Enumerator::new(board, settings, NullSink)
                        .unwrap()
                        .run()
                        .unwrap();
                    black_box(report.stats.games)
                });
            });
        }
    }

    group.finish();
}

fn benchmark_clone_and_move(c: &mut Criterion) {
    let board = BoardConfig::new(6, 4).unwrap();
    let mut positions = PositionStore::new(board, 4, FallbackPolicy::Fail);
    let root = positions.initial_position().unwrap();

    c.bench_function("clone_apply_release", |b| {
        b.iter(|| {
            let mut child = positions.clone_position(&root).unwrap();
            let outcome = positions.apply_move(&mut child, black_box(2));
            positions.release(child);
            black_box(outcome)
        });
    });
}

criterion_group!(benches, benchmark_enumeration, benchmark_clone_and_move);
criterion_main!(benches);
