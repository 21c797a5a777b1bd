//! # Route Planning Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nav_lib::{
    route::RoutePlanner,
    track::{Correction, MoveAction, TrackGraph},
};

/// Side length of the benchmark grid
const GRID_SIZE: usize = 30;

/// Build a square grid of intersections with bidirectional connections between neighbours.
///
/// Costs vary along each row and column so that shortest paths are unique.
fn build_grid(size: usize) -> TrackGraph {
    let mut track = TrackGraph::new();

    let name = |x: usize, y: usize| format!("{}_{}", x, y);

    for y in 0..size {
        for x in 0..size {
            track.node_or_insert(&name(x, y));
        }
    }

    for y in 0..size {
        for x in 0..size {
            let here = track.node_or_insert(&name(x, y));

            if x + 1 < size {
                let east = track.node_or_insert(&name(x + 1, y));
                let cost = 1.0 + (y % 3) as f64;
                track
                    .connect(here, east, cost, MoveAction::Forward, Correction::NoCorrection)
                    .unwrap();
                track
                    .connect(east, here, cost, MoveAction::Forward, Correction::NoCorrection)
                    .unwrap();
            }

            if y + 1 < size {
                let north = track.node_or_insert(&name(x, y + 1));
                let cost = 1.5 + (x % 4) as f64;
                track
                    .connect(here, north, cost, MoveAction::TurnLeft, Correction::CorrectRight)
                    .unwrap();
                track
                    .connect(north, here, cost, MoveAction::TurnRight, Correction::CorrectLeft)
                    .unwrap();
            }
        }
    }

    track
}

fn route_benchmark(c: &mut Criterion) {
    let track = build_grid(GRID_SIZE);

    let start = track.node_id("0_0").unwrap();
    let pickup = track.node_id(&format!("{}_0", GRID_SIZE - 1)).unwrap();
    let dropoff = track
        .node_id(&format!("{}_{}", GRID_SIZE / 2, GRID_SIZE - 1))
        .unwrap();

    let planner = RoutePlanner::new(&track);

    c.bench_function("find_route 30x30 grid", |b| {
        b.iter(|| {
            planner
                .find_route(black_box(start), black_box(pickup), black_box(dropoff))
                .unwrap()
        })
    });
}

criterion_group!(benches, route_benchmark);
criterion_main!(benches);
