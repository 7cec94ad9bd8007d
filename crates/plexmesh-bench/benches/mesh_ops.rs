//! Criterion micro-benchmarks for mesh construction and topology queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use plexmesh_bench::{reference_mesh, structured_quad_mesh};
use plexmesh_mesh::StaticMesh;

/// Benchmark: Allocate an unconnected 3-D mesh with 100K cells.
fn bench_allocate_3d_100k(c: &mut Criterion) {
    c.bench_function("allocate_3d_100k", |b| {
        b.iter(|| {
            let mesh = StaticMesh::new(3, 110_000, 320_000, 100_000, 20_000).unwrap();
            black_box(mesh.ncell());
        });
    });
}

/// Benchmark: Build and connect the 100x100 reference quad mesh.
fn bench_build_reference_mesh(c: &mut Criterion) {
    c.bench_function("build_reference_mesh", |b| {
        b.iter(|| {
            let mesh = structured_quad_mesh(black_box(100), black_box(100)).unwrap();
            black_box(mesh.nface());
        });
    });
}

/// Benchmark: Walk cell-to-face-to-cell adjacency over all 10K cells.
fn bench_neighbour_walk_10k(c: &mut Criterion) {
    let mesh = reference_mesh().unwrap();

    c.bench_function("neighbour_walk_10k", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for icl in 0..mesh.ncell() {
                for &ifc in mesh.cell_faces(icl).unwrap() {
                    total += mesh.face_cells(ifc as usize).unwrap().len();
                }
            }
            black_box(total);
        });
    });
}

/// Benchmark: Check every type tag of the reference mesh.
fn bench_validate_type_tags_10k(c: &mut Criterion) {
    let mesh = reference_mesh().unwrap();

    c.bench_function("validate_type_tags_10k", |b| {
        b.iter(|| black_box(mesh.validate_type_tags()).unwrap());
    });
}

criterion_group!(
    benches,
    bench_allocate_3d_100k,
    bench_build_reference_mesh,
    bench_neighbour_walk_10k,
    bench_validate_type_tags_10k
);
criterion_main!(benches);
