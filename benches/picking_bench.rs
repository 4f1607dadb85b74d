use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Vec2, Vec3};
use partpick::camera::Camera;
use partpick::part::{BoxGeometry, PartRecord, Position};
use partpick::scene::Scene;
use partpick::selection::{pick, DragRect};

fn grid_scene(side: u32) -> Scene {
    let mut scene = Scene::new();
    let records = (0..side * side).map(|i| {
        let (x, z) = ((i % side) as f32, (i / side) as f32);
        PartRecord::new(
            i + 1,
            format!("part-{i}"),
            BoxGeometry::new(0.8, 0.8, 0.8),
            Position::new(x - side as f32 * 0.5, 0.0, -z),
        )
    });
    let _ = scene.add_parts(records);
    scene
}

fn camera() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 20.0, 30.0),
        target: Vec3::new(0.0, 0.0, -10.0),
        up: Vec3::Y,
        aspect: 16.0 / 9.0,
        fovy: 60.0,
        znear: 0.1,
        zfar: 1000.0,
    }
}

fn ray_pick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ray_pick");
    let cam = camera();
    for side in [10, 32, 100] {
        let scene = grid_scene(side);
        group.bench_function(format!("{}_parts", side * side), |b| {
            b.iter(|| {
                black_box(pick::ray_pick(
                    &scene,
                    &cam,
                    black_box(Vec2::new(0.1, -0.2)),
                ))
            });
        });
    }
    group.finish();
}

fn area_pick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_pick");
    let cam = camera();
    let rect = DragRect {
        start: Vec2::new(-0.5, -0.4),
        end: Vec2::new(0.3, 0.6),
    };
    for side in [10, 32, 100] {
        let scene = grid_scene(side);
        group.bench_function(format!("{}_parts", side * side), |b| {
            b.iter(|| black_box(pick::area_pick(&scene, &cam, black_box(&rect))));
        });
    }
    group.finish();
}

criterion_group!(benches, ray_pick_benchmark, area_pick_benchmark);
criterion_main!(benches);
