//! Criterion benchmarks for sequencing, agenda execution and replay.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use trek_bench::{maze_profile, profile_state, sphere_profile};
use trek_core::EntityId;
use trek_engine::{order_waypoints, run_agenda, tour_steps, SolveConfig, Waypoint};
use trek_replay::reconstruct;
use trek_space::{IndexedSpace, SphereSpace};

/// Benchmark: greedy ordering of 100 waypoints on a 1K-point sphere.
fn bench_order_waypoints_100(c: &mut Criterion) {
    let space = SphereSpace::new(1000).unwrap();
    let waypoints: Vec<Waypoint> = (0..100)
        .map(|i| Waypoint::new(format!("wp_{i}"), (i * 37) % 1000, 0))
        .collect();
    let metric = |a: usize, b: usize| space.distance(a, b).unwrap_or(f64::INFINITY);

    c.bench_function("order_waypoints_100", |b| {
        b.iter(|| black_box(order_waypoints(&waypoints, 0, metric)));
    });
}

fn tour_profile(config: &SolveConfig, name: &str, c: &mut Criterion) {
    let state = profile_state(config).unwrap();
    let walker = EntityId::from("walker");
    let order: Vec<_> = state.waypoints().map(|w| w.id.clone()).collect();

    c.bench_function(&format!("agenda_{name}"), |b| {
        b.iter(|| black_box(run_agenda(&state, tour_steps(&walker, &order)).unwrap()));
    });

    let plan = run_agenda(&state, tour_steps(&walker, &order)).unwrap();
    c.bench_function(&format!("reconstruct_{name}"), |b| {
        b.iter(|| black_box(reconstruct(&state, &plan.actions).unwrap()));
    });
}

/// Benchmark: execute and replay a 10-waypoint tour through a 30x30 comb maze.
fn bench_maze_tour(c: &mut Criterion) {
    let config = SolveConfig {
        waypoint_count: 10,
        ..maze_profile(30)
    };
    tour_profile(&config, "maze_30", c);
}

/// Benchmark: execute and replay a 10-waypoint tour on a 500-point sphere.
fn bench_sphere_tour(c: &mut Criterion) {
    let config = SolveConfig {
        waypoint_count: 10,
        ..sphere_profile(500)
    };
    tour_profile(&config, "sphere_500", c);
}

criterion_group!(
    benches,
    bench_order_waypoints_100,
    bench_maze_tour,
    bench_sphere_tour
);
criterion_main!(benches);
