//! Collaborator interfaces the controllers talk to
//!
//! The controllers never own the world. Physics queries, object transforms,
//! item metadata and character movement are reached through these traits,
//! passed in explicitly on every tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::Pose;

/// Opaque handle to a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bit set of collision layers (32 layers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask containing a single layer index (0..32)
    pub fn layer(index: u8) -> Self {
        Self(1u32.checked_shl(index as u32).unwrap_or(0))
    }

    pub fn with(self, index: u8) -> Self {
        Self(self.0 | Self::layer(index).0)
    }

    pub fn contains(self, index: u8) -> bool {
        self.0 & Self::layer(index).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Display metadata attached to an inspectable object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InspectableItem {
    pub name: String,
    pub description: String,
}

impl InspectableItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Nearest object hit by a ray query
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    /// Scene name of the hit object (shown in the look-at prompt)
    pub name: String,
    pub distance: f32,
    pub point: Vec3,
}

/// Scene access needed by the inspection controller
pub trait SceneQuery {
    /// Nearest hit along `direction` within `max_distance`, restricted to `mask`
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask)
        -> Option<RayHit>;

    /// Item metadata capability of an object, if it has one
    fn item(&self, entity: EntityId) -> Option<InspectableItem>;

    /// Current world pose of an object
    fn pose(&self, entity: EntityId) -> Option<Pose>;

    /// Overwrite the world pose of an object
    fn set_pose(&mut self, entity: EntityId, pose: Pose);
}

/// Ground contact predicate used by the look controller
pub trait GroundProbe {
    /// Whether a sphere at `center` overlaps any ground geometry
    fn overlaps_sphere(&self, center: Vec3, radius: f32) -> bool;
}

/// Applies a displacement to the controlled actor
///
/// Implementations may resolve collisions; the returned value is the
/// actor's new position.
pub trait CharacterMotor {
    fn move_by(&mut self, position: Vec3, displacement: Vec3) -> Vec3;
}

/// Motor that translates freely without collision
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeMotor;

impl CharacterMotor for FreeMotor {
    fn move_by(&mut self, position: Vec3, displacement: Vec3) -> Vec3 {
        position + displacement
    }
}
