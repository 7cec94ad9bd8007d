//! Criterion micro-benchmarks for array plex construction and dispatch.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use plexmesh_buffer::{ArrayPlex, TypedArray};
use plexmesh_core::DataType;
use plexmesh_test_utils::MockForeignArray;

/// Benchmark: Allocate a zeroed 1M-element float64 plex by name.
fn bench_new_float64_1m(c: &mut Criterion) {
    c.bench_function("new_float64_1m", |b| {
        b.iter(|| {
            let plex = ArrayPlex::new(&[1000, 1000], black_box("float64")).unwrap();
            black_box(plex.nbytes());
        });
    });
}

/// Benchmark: Allocate and fill a 1M-element int32 plex.
fn bench_with_value_int32_1m(c: &mut Criterion) {
    c.bench_function("with_value_int32_1m", |b| {
        b.iter(|| {
            let plex = ArrayPlex::with_value(&[1000, 1000], black_box(-1i64), "int32").unwrap();
            black_box(plex.nbytes());
        });
    });
}

/// Benchmark: Dispatch `data_type()` and `len()` across one plex per dtype.
fn bench_dispatch_all_dtypes(c: &mut Criterion) {
    let plexes: Vec<ArrayPlex> = DataType::ALL
        .iter()
        .map(|&dtype| ArrayPlex::with_dtype(&[16], dtype).unwrap())
        .collect();

    c.bench_function("dispatch_all_dtypes", |b| {
        b.iter(|| {
            for plex in &plexes {
                black_box(plex.data_type());
                black_box(plex.len());
            }
        });
    });
}

/// Benchmark: Typed copy-out of a 1M-element float64 plex.
fn bench_typed_copy_1m(c: &mut Criterion) {
    let plex = ArrayPlex::with_value(&[1_000_000], 1.5, "float64").unwrap();

    c.bench_function("typed_copy_1m", |b| {
        b.iter(|| {
            let typed: TypedArray<f64> = plex.typed().unwrap();
            black_box(typed.len());
        });
    });
}

/// Benchmark: Wrap a 64K-element foreign float32 array without copying.
///
/// Setup (building the mock) is excluded from the measurement.
fn bench_wrap_foreign_64k(c: &mut Criterion) {
    let data = vec![0.25f32; 65_536];

    c.bench_function("wrap_foreign_64k", |b| {
        b.iter_batched(
            || MockForeignArray::from_slice(&[256, 256], "float32", &data),
            |foreign| {
                let plex = ArrayPlex::from_foreign(foreign).unwrap();
                black_box(plex.len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_new_float64_1m,
    bench_with_value_int32_1m,
    bench_dispatch_all_dtypes,
    bench_typed_copy_1m,
    bench_wrap_foreign_64k
);
criterion_main!(benches);
