//! Poses and the first-person view camera
//!
//! # Coordinate System
//!
//! Uses the OpenGL convention, same as the rest of the workspace:
//! - +X is right
//! - +Y is up
//! - -Z is forward (into the screen)

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

// ============================================================================
// Pose
// ============================================================================

/// World-space position and rotation of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Compose a child pose expressed in this pose's local space
    pub fn mul_pose(&self, child: Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * child.position,
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }

    /// Inverse transform, so that `p.inverse().mul_pose(p)` is identity
    pub fn inverse(&self) -> Pose {
        let rotation = self.rotation.inverse();
        Pose {
            position: rotation * -self.position,
            rotation,
        }
    }

    /// Express this world pose in the local space of `parent`
    pub fn relative_to(&self, parent: Pose) -> Pose {
        parent.inverse().mul_pose(*self)
    }

    /// Interpolate towards `target` with separate position and rotation weights
    ///
    /// Rotation uses normalized quaternion lerp along the shortest arc.
    pub fn lerp(&self, target: Pose, position_t: f32, rotation_t: f32) -> Pose {
        Pose {
            position: self.position.lerp(target.position, position_t),
            rotation: self.rotation.lerp(target.rotation, rotation_t),
        }
    }

    /// Transform a local-space point into world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point
    }
}

// ============================================================================
// Camera
// ============================================================================

/// View camera derived each tick from the actor and its look orientation
///
/// # Examples
///
/// ```
/// use interaction::camera::Camera;
/// use glam::Vec3;
///
/// let camera = Camera::from_yaw_pitch(Vec3::new(0.0, 1.7, 0.0), 0.0, 0.0);
/// assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Camera rotation (orientation) as quaternion
    pub rotation: Quat,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Create a camera at the given position looking down -Z
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// Create a camera from yaw and pitch in degrees
    ///
    /// Positive yaw turns right (clockwise seen from above), positive pitch
    /// looks up.
    pub fn from_yaw_pitch(position: Vec3, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        let rotation = Quat::from_euler(
            EulerRot::YXZ,
            -yaw_degrees.to_radians(),
            pitch_degrees.to_radians(),
            0.0,
        );
        Self { position, rotation }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// Get the forward direction vector
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Get the right direction vector
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Get the up direction vector
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}
