//! Criterion micro-benchmarks for grid serialization.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fathom_bench::reference_shape;
use fathom_grid::{read_shape3, write_shape3, Grid3};
use fathom_test_utils::MockGrid3;

/// Benchmark: encode and decode a bare shape.
fn bench_shape_roundtrip(c: &mut Criterion) {
    let shape = reference_shape(64);

    c.bench_function("shape_encode_decode", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(80);
            write_shape3(&mut buf, &shape).unwrap();
            black_box(read_shape3(&mut buf.as_slice()).unwrap());
        });
    });
}

/// Benchmark: serialize a 32K-cell mock grid.
fn bench_mock_grid_serialize(c: &mut Criterion) {
    let grid = MockGrid3::from_fn(reference_shape(32), |i, j, k| (i + j + k) as f64);

    c.bench_function("mock_grid_serialize_32cubed", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(8 * 32 * 32 * 32 + 128);
            grid.serialize(&mut buf).unwrap();
            black_box(&buf);
        });
    });
}

/// Benchmark: deserialize a 32K-cell mock grid.
fn bench_mock_grid_deserialize(c: &mut Criterion) {
    let grid = MockGrid3::from_fn(reference_shape(32), |i, j, k| (i * j * k) as f64);
    let mut bytes = Vec::new();
    grid.serialize(&mut bytes).unwrap();

    c.bench_function("mock_grid_deserialize_32cubed", |b| {
        b.iter(|| {
            let mut restored = MockGrid3::default();
            restored.deserialize(&mut bytes.as_slice()).unwrap();
            black_box(restored);
        });
    });
}

criterion_group!(
    benches,
    bench_shape_roundtrip,
    bench_mock_grid_serialize,
    bench_mock_grid_deserialize
);
criterion_main!(benches);
