//! End-to-end rig scenarios: walk, pick up, inspect, put back

use glam::{Quat, Vec2, Vec3};
use interaction::*;
use std::collections::HashMap;

const DT: f32 = 1.0 / 60.0;

/// Flat ground at y = 0 plus spherical props
struct Room {
    props: HashMap<EntityId, Prop>,
}

struct Prop {
    name: &'static str,
    pose: Pose,
    radius: f32,
    layer: u8,
    item: Option<InspectableItem>,
}

const VASE: EntityId = EntityId(7);
const CRATE: EntityId = EntityId(8);

impl Room {
    fn new() -> Self {
        let mut props = HashMap::new();
        props.insert(
            VASE,
            Prop {
                name: "vase_01",
                pose: Pose::new(Vec3::new(0.0, 1.7, -2.0), Quat::from_rotation_y(1.1)),
                radius: 0.25,
                layer: 8,
                item: Some(InspectableItem::new("Vase", "Chipped along the rim")),
            },
        );
        props.insert(
            CRATE,
            Prop {
                name: "crate",
                pose: Pose::from_position(Vec3::new(2.0, 1.7, 0.0)),
                radius: 0.5,
                layer: 0,
                item: None,
            },
        );
        Self { props }
    }

    fn pose_of(&self, entity: EntityId) -> Pose {
        self.props[&entity].pose
    }
}

impl SceneQuery for Room {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        self.props
            .iter()
            .filter(|(_, prop)| mask.contains(prop.layer))
            .filter_map(|(&entity, prop)| {
                // Ray-sphere, nearest root in front of the origin
                let to_center = prop.pose.position - origin;
                let along = to_center.dot(direction);
                let miss_sq = to_center.length_squared() - along * along;
                let radius_sq = prop.radius * prop.radius;
                if miss_sq > radius_sq {
                    return None;
                }
                let distance = along - (radius_sq - miss_sq).sqrt();
                (distance >= 0.0 && distance <= max_distance).then(|| RayHit {
                    entity,
                    name: prop.name.to_string(),
                    distance,
                    point: origin + direction * distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn item(&self, entity: EntityId) -> Option<InspectableItem> {
        self.props.get(&entity).and_then(|prop| prop.item.clone())
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        self.props.get(&entity).map(|prop| prop.pose)
    }

    fn set_pose(&mut self, entity: EntityId, pose: Pose) {
        if let Some(prop) = self.props.get_mut(&entity) {
            prop.pose = pose;
        }
    }
}

impl GroundProbe for Room {
    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        center.y - radius <= 0.0
    }
}

fn rig(transition_time: f32) -> Rig {
    let mut config = RigConfig::default();
    config.inspection.transition.time = transition_time;
    Rig::new(config, Vec3::ZERO)
}

fn idle() -> RigInput {
    RigInput::default()
}

fn interact() -> RigInput {
    RigInput {
        interact: true,
        ..Default::default()
    }
}

fn release() -> RigInput {
    RigInput {
        release: true,
        ..Default::default()
    }
}

#[test]
fn test_one_second_pickup_over_sixty_ticks() {
    let mut rig = rig(1.0);
    let mut room = Room::new();
    let mut hud = HudState::default();

    let report = rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    assert_eq!(report.phase, InspectionPhase::TransitioningIn);
    assert!(!report.locomotion_enabled);
    assert!(hud.panel_visible);
    assert_eq!(hud.name, "Vase");
    assert_eq!(hud.description, "Chipped along the rim");

    let mut phase = report.phase;
    for tick in 2..=60 {
        phase = rig.tick(DT, &idle(), &mut room, &mut FreeMotor, &mut hud).phase;
        if tick < 60 {
            assert_eq!(phase, InspectionPhase::TransitioningIn, "tick {tick}");
        }
    }
    assert_eq!(phase, InspectionPhase::Inspecting);
    assert_eq!(hud.panel_updates, 1);

    let mount = rig.inspection().mount().world_pose(&rig.camera());
    let vase = room.pose_of(VASE);
    assert!((vase.position - mount.position).length() < 1e-5);
    assert!(vase.rotation.angle_between(Quat::IDENTITY) < 1e-4);
}

#[test]
fn test_locomotion_frozen_while_engaged() {
    let mut rig = rig(0.25);
    let mut room = Room::new();
    let mut hud = HudState::default();

    rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    let orientation = rig.look().orientation();

    let walk_and_look = RigInput {
        movement: Vec2::new(0.0, 1.0),
        look: Vec2::new(5.0, 3.0),
        ..Default::default()
    };
    for _ in 0..30 {
        rig.tick(DT, &walk_and_look, &mut room, &mut FreeMotor, &mut hud);
    }
    assert_eq!(rig.inspection().phase(), InspectionPhase::Inspecting);
    assert_eq!(rig.position(), Vec3::ZERO);
    assert_eq!(rig.look().orientation(), orientation);

    // Release hands control back on the same tick
    let report = rig.tick(DT, &release(), &mut room, &mut FreeMotor, &mut hud);
    assert_eq!(report.phase, InspectionPhase::TransitioningOut);
    assert!(report.locomotion_enabled);
    assert!(!hud.panel_visible);

    rig.tick(DT, &walk_and_look, &mut room, &mut FreeMotor, &mut hud);
    assert!(rig.position().z < 0.0);
}

#[test]
fn test_round_trip_restores_original_pose() {
    let mut rig = rig(0.5);
    let mut room = Room::new();
    let original = room.pose_of(VASE);
    let mut hud = HudState::default();

    rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    for _ in 0..40 {
        rig.tick(DT, &idle(), &mut room, &mut FreeMotor, &mut hud);
    }

    let fiddle = RigInput {
        look: Vec2::new(-6.0, 2.0),
        scroll: -0.2,
        ..Default::default()
    };
    for _ in 0..25 {
        rig.tick(DT, &fiddle, &mut room, &mut FreeMotor, &mut hud);
    }

    rig.tick(DT, &release(), &mut room, &mut FreeMotor, &mut hud);
    for _ in 0..60 {
        rig.tick(DT, &idle(), &mut room, &mut FreeMotor, &mut hud);
    }

    assert_eq!(rig.inspection().phase(), InspectionPhase::Idle);
    assert_eq!(room.pose_of(VASE), original);
    assert_eq!(hud.panel_updates, 2);
}

#[test]
fn test_pickup_blocked_until_return_finishes() {
    let mut rig = rig(0.5);
    let mut room = Room::new();
    let mut hud = HudState::default();

    rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    for _ in 0..40 {
        rig.tick(DT, &idle(), &mut room, &mut FreeMotor, &mut hud);
    }
    rig.tick(DT, &release(), &mut room, &mut FreeMotor, &mut hud);

    let report = rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    assert_eq!(report.phase, InspectionPhase::TransitioningOut);
    assert!(hud.prompt.is_empty());

    for _ in 0..60 {
        rig.tick(DT, &idle(), &mut room, &mut FreeMotor, &mut hud);
    }
    assert_eq!(hud.prompt, "[E]\nvase_01");

    let report = rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    assert_eq!(report.phase, InspectionPhase::TransitioningIn);
}

#[test]
fn test_other_layers_are_not_inspectable() {
    let mut rig = rig(0.5).with_orientation(90.0, 0.0);
    let mut room = Room::new();
    let mut hud = HudState::default();

    // Facing the crate, which sits on layer 0
    let report = rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    assert_eq!(report.phase, InspectionPhase::Idle);
    assert!(hud.prompt.is_empty());
    assert_eq!(room.pose_of(CRATE), Pose::from_position(Vec3::new(2.0, 1.7, 0.0)));
}

#[test]
fn test_zoom_bounded_through_rig() {
    let mut config = RigConfig::default();
    config.inspection.transition.time = 0.0;
    config.inspection.zoom_distance = 0.6;
    let mut rig = Rig::new(config, Vec3::ZERO);
    let mut room = Room::new();
    let mut hud = HudState::default();

    rig.tick(DT, &interact(), &mut room, &mut FreeMotor, &mut hud);
    for scroll in [0.4, 0.4, 0.4, -2.0, -2.0, 1.3] {
        let input = RigInput {
            scroll,
            ..Default::default()
        };
        rig.tick(DT, &input, &mut room, &mut FreeMotor, &mut hud);
        let displacement = rig.inspection().mount().zoom_displacement();
        assert!(displacement.length() <= 0.6 + 1e-5);
    }
}

#[test]
fn test_pitch_stays_within_limit() {
    let mut rig = rig(0.5);
    let mut room = Room::new();
    let mut hud = HudState::default();

    for look_y in [50.0, 50.0, 50.0, -200.0, -200.0, 80.0] {
        let input = RigInput {
            look: Vec2::new(0.0, look_y),
            ..Default::default()
        };
        for _ in 0..20 {
            rig.tick(DT, &input, &mut room, &mut FreeMotor, &mut hud);
            let pitch = rig.look().orientation().pitch;
            assert!(pitch.abs() <= 65.0, "pitch {pitch} out of range");
        }
    }
}
