//! Criterion micro-benchmarks for serial and parallel cell iteration.

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};

use criterion::{criterion_group, criterion_main, Criterion};
use fathom_bench::{reference_shape, REFERENCE_RESOLUTION};
use fathom_grid::ParallelConfig;

/// Benchmark: visit all 262K cells on the calling thread.
fn bench_serial_iteration(c: &mut Criterion) {
    let shape = reference_shape(REFERENCE_RESOLUTION);

    c.bench_function("serial_iteration_64cubed", |b| {
        b.iter(|| {
            let mut acc = 0usize;
            shape.for_each_cell_index(|i, j, k| acc = acc.wrapping_add(i ^ j ^ k));
            black_box(acc);
        });
    });
}

/// Benchmark: visit all 262K cells across the global rayon pool.
fn bench_parallel_iteration(c: &mut Criterion) {
    let shape = reference_shape(REFERENCE_RESOLUTION);
    let acc = AtomicU64::new(0);

    c.bench_function("parallel_iteration_64cubed", |b| {
        b.iter(|| {
            shape.par_for_each_cell_index(|i, j, k| {
                acc.fetch_add((i ^ j ^ k) as u64, Ordering::Relaxed);
            });
            black_box(acc.load(Ordering::Relaxed));
        });
    });
}

/// Benchmark: cell-center positions in parallel, at several chunk lengths.
fn bench_parallel_chunking(c: &mut Criterion) {
    let shape = reference_shape(REFERENCE_RESOLUTION);
    let position = shape.cell_center_position();
    let mut group = c.benchmark_group("parallel_chunk_len");

    for min_chunk_len in [1usize, 64, 4096] {
        let config = ParallelConfig {
            worker_count: None,
            min_chunk_len,
        };
        group.bench_function(min_chunk_len.to_string(), |b| {
            b.iter(|| {
                shape.par_for_each_cell_index_with(&config, |i, j, k| {
                    black_box(position(i, j, k));
                });
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_serial_iteration,
    bench_parallel_iteration,
    bench_parallel_chunking
);
criterion_main!(benches);
