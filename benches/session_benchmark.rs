//! Benchmarks for the session tick pipeline and level setup.
//!
//! The tick is the hot path a host calls sixty times a second.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use swarm::mapgen::{VoronoiParams, generate_walls};
use swarm::{Bounds, DeltaTime, GameSession, LevelConfig, Radius, Vec2};

const ARENA: &str = include_str!("../levels/arena.json");

fn arena() -> LevelConfig {
    serde_json::from_str(ARENA).unwrap()
}

/// Run `ticks` steps with a fixed input script.
fn drive(session: &mut GameSession, ticks: u32, dt: DeltaTime) {
    for tick in 0..ticks {
        let angle = f32::from(u16::try_from(tick % 360).unwrap()).to_radians();
        session.apply_input(Vec2::from_angle(angle), 200.0);
        session.rotate_towards_polar(angle, 1.0);
        session.fire(false, true);
        black_box(session.step(dt));
    }
}

fn bench_session_setup(c: &mut Criterion) {
    let level = arena();

    c.bench_function("session_from_config", |b| {
        b.iter(|| {
            let session = GameSession::from_config(black_box(&level), Some(42)).unwrap();
            black_box(session)
        });
    });
}

fn bench_one_minute(c: &mut Criterion) {
    let level = arena();
    let dt = DeltaTime::new(1.0 / 60.0).unwrap();

    c.bench_function("arena_3600_ticks", |b| {
        b.iter(|| {
            let mut session = GameSession::from_config(&level, Some(42)).unwrap();
            drive(&mut session, 3600, dt);
            black_box(session.aggregates())
        });
    });
}

fn bench_crowded_tick(c: &mut Criterion) {
    // Warm a session up so the population is near its working size.
    let level = arena();
    let dt = DeltaTime::new(1.0 / 60.0).unwrap();
    let mut warmed = GameSession::from_config(&level, Some(7)).unwrap();
    drive(&mut warmed, 1800, dt);

    c.bench_function("crowded_snapshot", |b| {
        b.iter(|| black_box(warmed.snapshot()));
    });
}

fn bench_wall_generation(c: &mut Criterion) {
    let params = VoronoiParams {
        start: Vec2::new(150.0, 600.0),
        end: Vec2::new(1450.0, 600.0),
        stage: Bounds::new(0.0, 0.0, 1600.0, 1200.0).unwrap(),
        seed_count: 40,
        cell_size: 40.0,
        wall_radius: Radius::new(20.0).unwrap(),
        wall_density: 0.35,
        min_wall_count: 20,
        seed: Some(42),
        corridor_width_multiplier: None,
    };

    c.bench_function("voronoi_walls", |b| {
        b.iter(|| black_box(generate_walls(black_box(&params)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_session_setup,
    bench_one_minute,
    bench_crowded_tick,
    bench_wall_generation
);
criterion_main!(benches);
