//! Criterion micro-benchmarks for space construction and quantization.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use trek_core::Point;
use trek_space::{find_nearest_index, generate_sphere, GridSpace, IndexedSpace, SphereSpace};

/// Benchmark: generate a 10K-point golden-angle sphere.
fn bench_generate_sphere_10k(c: &mut Criterion) {
    c.bench_function("generate_sphere_10k", |b| {
        b.iter(|| black_box(generate_sphere(black_box(10_000))));
    });
}

/// Deterministic off-lattice query points on the unit sphere.
fn sphere_queries(n: u64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let a = (i.wrapping_mul(6364136223846793007) % 1000) as f64 / 1000.0;
            let b = (i.wrapping_mul(1442695040888963407) % 1000) as f64 / 1000.0;
            let theta = a * std::f64::consts::TAU;
            let z = 2.0 * b - 1.0;
            let r = (1.0 - z * z).sqrt();
            Point::new(r * theta.cos(), r * theta.sin(), z)
        })
        .collect()
}

/// Benchmark: quantize 1000 arbitrary directions onto a 1K-point sphere.
fn bench_nearest_sphere_1k(c: &mut Criterion) {
    let space = SphereSpace::new(1000).unwrap();
    let queries = sphere_queries(1000);

    c.bench_function("nearest_sphere_1k", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(find_nearest_index(&space, *q));
            }
        });
    });
}

/// Benchmark: exact reverse lookup of every point of a 1K-point sphere.
fn bench_index_of_sphere_1k(c: &mut Criterion) {
    let space = SphereSpace::new(1000).unwrap();
    let points = space.points().to_vec();

    c.bench_function("index_of_sphere_1k", |b| {
        b.iter(|| {
            for p in &points {
                black_box(space.index_of(*p));
            }
        });
    });
}

/// Benchmark: quantize 1000 planar points onto a 100x100 grid.
fn bench_nearest_grid_10k(c: &mut Criterion) {
    let space = GridSpace::new(100, 100, 1.0).unwrap();
    let queries: Vec<Point> = (0u64..1000)
        .map(|i| {
            let x = (i.wrapping_mul(6364136223846793007) % 9900) as f64 / 100.0;
            let y = (i.wrapping_mul(1442695040888963407) % 9900) as f64 / 100.0;
            Point::planar(x, y)
        })
        .collect();

    c.bench_function("nearest_grid_10k", |b| {
        b.iter(|| {
            for q in &queries {
                black_box(space.nearest_index(*q));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_generate_sphere_10k,
    bench_nearest_sphere_1k,
    bench_index_of_sphere_1k,
    bench_nearest_grid_10k
);
criterion_main!(benches);
