// benches/chaos_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chaos_game::generator::{ratio_for_vertices, ChaosGenerator};
use chaos_game::session::{Command, Session, SessionConfig, VertexCount};
use chaos_game::{Point2, Trail};

fn regular_polygon(vertex_count: usize, radius: f32) -> Vec<Point2> {
    (0..vertex_count)
        .map(|i| {
            let angle = (i as f32) * 2.0 * std::f32::consts::PI / (vertex_count as f32);
            Point2::new(500.0 + radius * angle.cos(), 500.0 + radius * angle.sin())
        })
        .collect()
}

fn running_session(vertex_count: usize) -> Session {
    let config = SessionConfig {
        vertex_count: VertexCount::new(vertex_count).unwrap(),
        ..SessionConfig::default()
    };
    let mut session = Session::seeded(config, 99);
    for vertex in regular_polygon(vertex_count, 400.0) {
        session.handle(Command::Click(vertex));
    }
    session.handle(Command::Click(Point2::new(500.0, 500.0)));
    session
}

fn chaos_benchmark_fn(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChaosGame");

    for vertex_count in [3, 5, 10] {
        group.bench_function(format!("tick_default_batch_{}_vertices", vertex_count), |b| {
            let mut session = running_session(vertex_count);
            b.iter(|| black_box(session.tick()))
        });
    }

    group.bench_function("generator_step_hexagon", |b| {
        let vertices = regular_polygon(6, 400.0);
        let ratio = ratio_for_vertices(6);
        let mut generator = ChaosGenerator::seeded(7);
        let mut current = Point2::new(500.0, 500.0);
        b.iter(|| {
            current = generator.step(black_box(&vertices), &current, ratio);
            current
        })
    });

    group.bench_function("trail_enforce_cap_full", |b| {
        b.iter_batched(
            || {
                let mut trail = Trail::with_seed(Point2::new(0.0, 0.0), 2_000_000, 100_000);
                for i in 0..2_000_200 {
                    trail.push(Point2::new(i as f32, 0.0));
                }
                trail
            },
            |mut trail| black_box(trail.enforce_cap()),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, chaos_benchmark_fn);
criterion_main!(benches);
