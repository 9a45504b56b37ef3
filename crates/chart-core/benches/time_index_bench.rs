// File: crates/chart-core/benches/time_index_bench.rs
// Purpose: Timestamp <-> bar index lookups used by crosshair and autoscale.

use chart_core::TimeIndex;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_index");
    for &n in &[10_000usize, 100_000usize] {
        let index = TimeIndex::from_times((0..n).map(|i| i as f64 * 60.0));
        group.bench_with_input(BenchmarkId::from_parameter(format!("index_of_n{n}")), &n, |b, &n| {
            b.iter(|| {
                for i in (0..n).step_by(97) {
                    black_box(index.index_of(i as f64 * 60.0));
                }
            });
        });
        group.bench_with_input(BenchmarkId::from_parameter(format!("time_at_n{n}")), &n, |b, &n| {
            b.iter(|| {
                for i in (0..n).step_by(97) {
                    black_box(index.time_at(i as f64 + 0.3));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
