//! Benchmarks for half-edge construction and traversal.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hedge::prelude::*;

/// An n x n grid of quads, as a flat polygon soup.
fn grid_soup(n: u32) -> (Vec<u32>, Vec<u32>) {
    let mut indices = Vec::with_capacity((n * n * 4) as usize);

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            indices.extend_from_slice(&[v00, v10, v11, v01]);
        }
    }

    (indices, vec![4; (n * n) as usize])
}

fn bench_mesh_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");

    for n in [10u32, 100, 300] {
        let (indices, counts) = grid_soup(n);

        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, _| {
            let options = BuildOptions::default();
            b.iter(|| build_with_options(&indices, &counts, &options).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, _| {
            let options = BuildOptions::default().sequential();
            b.iter(|| build_with_options(&indices, &counts, &options).unwrap());
        });
    }

    group.finish();
}

fn bench_mesh_traversal(c: &mut Criterion) {
    let (indices, counts) = grid_soup(50);
    let mesh: HalfEdgeMesh = build_from_polygons(&indices, &counts).unwrap();

    c.bench_function("vertex_neighbors_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for v in mesh.vertex_ids() {
                count += mesh.vertex_neighbors(v).count();
            }
            count
        });
    });

    c.bench_function("face_loops_all", |b| {
        b.iter(|| {
            let mut count = 0;
            for f in mesh.face_ids() {
                count += mesh.face_halfedges(f).count();
            }
            count
        });
    });
}

criterion_group!(benches, bench_mesh_construction, bench_mesh_traversal);
criterion_main!(benches);
