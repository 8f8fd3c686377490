//! Benchmark for per-tick controller cost
//!
//! Measures a full rig tick while walking and while inspecting, plus curve
//! evaluation on its own.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec2, Vec3};
use interaction::*;
use std::hint::black_box;

const DT: f32 = 1.0 / 60.0;

/// One prop in front of the camera on flat ground
struct Bench {
    pose: Pose,
}

const PROP: EntityId = EntityId(1);

impl SceneQuery for Bench {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, _: LayerMask) -> Option<RayHit> {
        let along = (self.pose.position - origin).dot(direction);
        (along > 0.0 && along <= max_distance).then(|| RayHit {
            entity: PROP,
            name: "prop".to_string(),
            distance: along,
            point: origin + direction * along,
        })
    }

    fn item(&self, _: EntityId) -> Option<InspectableItem> {
        Some(InspectableItem::new("Prop", "Benchmark prop"))
    }

    fn pose(&self, _: EntityId) -> Option<Pose> {
        Some(self.pose)
    }

    fn set_pose(&mut self, _: EntityId, pose: Pose) {
        self.pose = pose;
    }
}

impl GroundProbe for Bench {
    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        center.y - radius <= 0.0
    }
}

fn bench_scene() -> Bench {
    Bench {
        pose: Pose::new(Vec3::new(0.0, 1.7, -2.0), Quat::from_rotation_y(0.4)),
    }
}

fn bench_walking_tick(c: &mut Criterion) {
    let mut rig = Rig::new(RigConfig::default(), Vec3::ZERO);
    let mut scene = bench_scene();
    let mut hud = HudState::default();
    let input = RigInput {
        movement: Vec2::new(0.3, 1.0),
        look: Vec2::new(0.5, 0.0),
        ..Default::default()
    };

    c.bench_function("rig_tick_walking", |b| {
        b.iter(|| black_box(rig.tick(DT, black_box(&input), &mut scene, &mut FreeMotor, &mut hud)));
    });
}

fn bench_inspecting_tick(c: &mut Criterion) {
    let mut config = RigConfig::default();
    config.inspection.transition.time = 0.0;
    let mut rig = Rig::new(config, Vec3::ZERO);
    let mut scene = bench_scene();
    let mut hud = HudState::default();

    let interact = RigInput {
        interact: true,
        ..Default::default()
    };
    rig.tick(DT, &interact, &mut scene, &mut FreeMotor, &mut hud);

    let input = RigInput {
        look: Vec2::new(2.0, -1.0),
        scroll: 0.01,
        ..Default::default()
    };

    c.bench_function("rig_tick_inspecting", |b| {
        b.iter(|| black_box(rig.tick(DT, black_box(&input), &mut scene, &mut FreeMotor, &mut hud)));
    });
}

fn bench_curve_evaluate(c: &mut Criterion) {
    let curve = AnimationCurve::default();

    c.bench_function("curve_evaluate", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..=100 {
                sum += curve.evaluate(black_box(i as f32 / 100.0));
            }
            black_box(sum)
        });
    });
}

criterion_group!(
    benches,
    bench_walking_tick,
    bench_inspecting_tick,
    bench_curve_evaluate,
);

criterion_main!(benches);
