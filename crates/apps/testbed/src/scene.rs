//! Reference scene: a ground slab, box props and an item catalog
//!
//! Scenes are TOML documents:
//!
//! ```toml
//! [player]
//! spawn = [0.0, 0.0, 0.0]
//! yaw = 0.0
//!
//! [[objects]]
//! name = "vase_01"
//! position = [0.0, 1.6, -2.0]
//! half_extents = [0.15, 0.25, 0.15]
//! item = "vase"
//!
//! [items.vase]
//! name = "Vase"
//! description = "Chipped along the rim"
//! ```
//!
//! The `[rig]` table takes the same keys as a standalone rig config.

use anyhow::{ensure, Context, Result};
use glam::{EulerRot, Quat, Vec3};
use interaction::inspection::DEFAULT_INSPECT_LAYER;
use interaction::{
    CharacterMotor, EntityId, GroundProbe, InspectableItem, LayerMask, Pose, RayHit, RigConfig,
    SceneQuery,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::collision::Aabb;

// ============================================================================
// Scene file
// ============================================================================

/// Where the actor starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: Vec3,
    /// Initial yaw in degrees
    pub yaw: f32,
    /// Initial pitch in degrees
    pub pitch: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Flat ground slab whose top face is at `height`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub height: f32,
    /// Half the side length of the square slab
    pub half_extent: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            height: 0.0,
            half_extent: 50.0,
        }
    }
}

/// One box prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub position: Vec3,
    /// Euler angles in degrees (yaw, pitch, roll)
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    #[serde(default = "default_layer")]
    pub layer: u8,
    /// Key into the item catalog
    #[serde(default)]
    pub item: Option<String>,
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.25)
}

fn default_layer() -> u8 {
    DEFAULT_INSPECT_LAYER
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneFile {
    pub rig: RigConfig,
    pub player: PlayerConfig,
    pub ground: GroundConfig,
    pub objects: Vec<ObjectConfig>,
    pub items: BTreeMap<String, InspectableItem>,
}

impl SceneFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid scene {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scene: Self = toml::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn validate(&self) -> Result<()> {
        self.rig.validate()?;
        ensure!(
            self.ground.half_extent.is_finite() && self.ground.half_extent > 0.0,
            "ground.half_extent must be > 0"
        );
        ensure!(self.ground.height.is_finite(), "ground.height must be finite");
        for object in &self.objects {
            ensure!(
                object.position.is_finite() && object.rotation.is_finite(),
                "object {} has a non-finite transform",
                object.name
            );
            ensure!(object.layer < 32, "object {} layer {} out of range", object.name, object.layer);
        }
        Ok(())
    }
}

// ============================================================================
// Runtime scene
// ============================================================================

#[derive(Debug, Clone)]
pub struct SceneObject {
    pub id: EntityId,
    pub name: String,
    pub pose: Pose,
    /// Local-space bounds
    pub bounds: Aabb,
    pub layer: u8,
    pub item: Option<String>,
}

/// Scene implementing the controller collaborator traits
#[derive(Debug, Clone)]
pub struct SimScene {
    ground: Aabb,
    objects: Vec<SceneObject>,
    items: BTreeMap<String, InspectableItem>,
}

impl SimScene {
    pub fn new(file: &SceneFile) -> Self {
        let ground = &file.ground;
        let ground = Aabb::new(
            Vec3::new(-ground.half_extent, ground.height - 1.0, -ground.half_extent),
            Vec3::new(ground.half_extent, ground.height, ground.half_extent),
        );

        let objects = file
            .objects
            .iter()
            .enumerate()
            .map(|(index, object)| {
                if let Some(key) = &object.item {
                    if !file.items.contains_key(key) {
                        warn!(object = %object.name, item = %key, "item key not in catalog");
                    }
                }
                let r = object.rotation;
                let rotation = Quat::from_euler(
                    EulerRot::YXZ,
                    -r.x.to_radians(),
                    r.y.to_radians(),
                    r.z.to_radians(),
                );
                SceneObject {
                    id: EntityId(index as u32 + 1),
                    name: object.name.clone(),
                    pose: Pose::new(object.position, rotation),
                    bounds: Aabb::from_half_extents(object.half_extents),
                    layer: object.layer,
                    item: object.item.clone(),
                }
            })
            .collect();

        Self {
            ground,
            objects,
            items: file.items.clone(),
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, entity: EntityId) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.id == entity)
    }

    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.name == name)
    }

    /// Top of the ground slab
    pub fn floor(&self) -> f32 {
        self.ground.max.y
    }
}

impl SceneQuery for SimScene {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }

        self.objects
            .iter()
            .filter(|object| mask.contains(object.layer))
            .filter_map(|object| {
                // Test in object space so rotated boxes are exact
                let local_origin = object.pose.inverse().transform_point(origin);
                let local_direction = object.pose.rotation.inverse() * direction;
                let distance = object.bounds.ray_intersection(local_origin, local_direction)?;
                (distance <= max_distance).then(|| RayHit {
                    entity: object.id,
                    name: object.name.clone(),
                    distance,
                    point: origin + direction * distance,
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn item(&self, entity: EntityId) -> Option<InspectableItem> {
        let key = self.object(entity)?.item.as_ref()?;
        self.items.get(key).cloned()
    }

    fn pose(&self, entity: EntityId) -> Option<Pose> {
        self.object(entity).map(|object| object.pose)
    }

    fn set_pose(&mut self, entity: EntityId, pose: Pose) {
        if let Some(object) = self.objects.iter_mut().find(|object| object.id == entity) {
            object.pose = pose;
        }
    }
}

impl GroundProbe for SimScene {
    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.ground.intersects_sphere(center, radius)
            || self.objects.iter().any(|object| {
                object
                    .bounds
                    .to_world(object.pose.position, object.pose.rotation)
                    .intersects_sphere(center, radius)
            })
    }
}

/// Motor that keeps the actor from sinking below the floor
#[derive(Debug, Clone, Copy)]
pub struct FloorMotor {
    pub floor: f32,
}

impl CharacterMotor for FloorMotor {
    fn move_by(&mut self, position: Vec3, displacement: Vec3) -> Vec3 {
        let mut next = position + displacement;
        next.y = next.y.max(self.floor);
        next
    }
}
