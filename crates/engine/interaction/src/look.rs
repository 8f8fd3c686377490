//! First-person look and grounded locomotion
//!
//! Each tick the controller:
//! 1. probes for ground contact (pure predicate, once per tick)
//! 2. turns movement axes into a horizontal displacement
//! 3. smooths the pointer delta and accumulates yaw/pitch
//! 4. integrates vertical velocity (seat bias on ground, gravity in the air)
//!
//! The controller does not move anything itself. It returns a
//! [`Locomotion`] the caller applies to the actor.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::scene::GroundProbe;

/// Configuration for the look controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Walking speed in units per second
    pub movement_speed: f32,
    /// How far the view can pitch up or down, in degrees
    pub pitch_limit: f32,
    /// Degrees of rotation per smoothed pointer unit
    pub rotation_speed: f32,
    /// Exponential smoothing rate applied to pointer input (per second)
    pub look_smoothing: f32,
    /// Gravity acceleration (positive value, applied downward)
    pub gravity: f32,
    /// Makes gravity stronger or weaker
    pub gravity_multiplier: f32,
    /// Vertical velocity held while grounded, keeps the actor seated on slopes
    pub grounded_velocity: f32,
    /// Ground probe point relative to the actor origin
    pub probe_offset: Vec3,
    /// Radius of the ground probe sphere
    pub probe_radius: f32,
    /// Extra downward offset of the probe, useful for stairs
    pub grounded_offset: f32,
    /// Squared input magnitude below which movement and look are ignored
    pub input_dead_zone: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            movement_speed: 4.0,
            pitch_limit: 65.0,
            rotation_speed: 3.0,
            look_smoothing: 10.0,
            gravity: 9.81,
            gravity_multiplier: 2.0,
            grounded_velocity: -2.0,
            probe_offset: Vec3::ZERO,
            probe_radius: 0.5,
            grounded_offset: 0.14,
            input_dead_zone: 0.0001,
        }
    }
}

impl LookConfig {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("look.movement_speed", self.movement_speed),
            ("look.pitch_limit", self.pitch_limit),
            ("look.rotation_speed", self.rotation_speed),
            ("look.look_smoothing", self.look_smoothing),
            ("look.gravity", self.gravity),
            ("look.gravity_multiplier", self.gravity_multiplier),
            ("look.probe_radius", self.probe_radius),
            ("look.input_dead_zone", self.input_dead_zone),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(field, format!("{value} must be >= 0")));
            }
        }
        if self.pitch_limit > 90.0 {
            return Err(Error::invalid(
                "look.pitch_limit",
                format!("{} exceeds 90 degrees", self.pitch_limit),
            ));
        }
        if !self.grounded_velocity.is_finite() || !self.grounded_offset.is_finite() {
            return Err(Error::invalid("look.grounded_velocity", "must be finite"));
        }
        if !self.probe_offset.is_finite() {
            return Err(Error::invalid("look.probe_offset", "must be finite"));
        }
        Ok(())
    }
}

/// Accumulated view angles in degrees
///
/// Yaw is unbounded (positive turns right), pitch is clamped to the
/// configured limit (positive looks up).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationState {
    pub yaw: f32,
    pub pitch: f32,
}

/// Per-tick input consumed by the look controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LookInput {
    /// Movement axes: x = strafe right, y = forward
    pub movement: Vec2,
    /// Raw pointer delta for this tick: x = right, y = up
    pub look: Vec2,
}

/// Result of a look controller tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Locomotion {
    /// World-space displacement to apply to the actor this tick
    pub displacement: Vec3,
    /// Actor rotation (yaw only)
    pub body_rotation: Quat,
    /// Camera rotation local to the actor (pitch only)
    pub view_rotation: Quat,
    pub grounded: bool,
}

/// First-person look and movement controller
#[derive(Debug, Clone)]
pub struct LookController {
    config: LookConfig,
    orientation: OrientationState,
    smoothed_look: Vec2,
    vertical_velocity: f32,
    is_grounded: bool,
    enabled: bool,
}

impl LookController {
    pub fn new(config: LookConfig) -> Self {
        Self {
            config,
            orientation: OrientationState::default(),
            smoothed_look: Vec2::ZERO,
            vertical_velocity: 0.0,
            is_grounded: false,
            enabled: true,
        }
    }

    /// Start from a given orientation (pitch is clamped)
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        let limit = self.config.pitch_limit;
        self.orientation = OrientationState {
            yaw,
            pitch: pitch.clamp(-limit, limit),
        };
        self
    }

    pub fn config(&self) -> &LookConfig {
        &self.config
    }

    pub fn orientation(&self) -> OrientationState {
        self.orientation
    }

    pub fn is_grounded(&self) -> bool {
        self.is_grounded
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable the controller; a disabled controller does nothing
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            trace!(enabled, "look controller toggled");
        }
        self.enabled = enabled;
    }

    /// Actor rotation from the accumulated yaw
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(-self.orientation.yaw.to_radians())
    }

    /// Camera rotation relative to the actor from the accumulated pitch
    pub fn view_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.orientation.pitch.to_radians())
    }

    /// Center of the ground probe sphere for an actor at `actor_position`
    pub fn probe_center(&self, actor_position: Vec3) -> Vec3 {
        actor_position + self.config.probe_offset + Vec3::NEG_Y * self.config.grounded_offset
    }

    /// Advance one tick
    ///
    /// # Arguments
    /// * `dt` - Frame duration in seconds
    /// * `input` - Movement axes and pointer delta for this tick
    /// * `actor_position` - Current actor origin, used for the ground probe
    /// * `ground` - Ground overlap predicate
    pub fn update<G: GroundProbe + ?Sized>(
        &mut self,
        dt: f32,
        input: &LookInput,
        actor_position: Vec3,
        ground: &G,
    ) -> Locomotion {
        if !self.enabled {
            return self.locomotion(Vec3::ZERO);
        }

        self.ground_check(actor_position, ground);

        let mut displacement = self.movement(input.movement) * dt;
        self.rotate(dt, input.look);
        displacement.y += self.apply_gravity(dt) * dt;

        self.locomotion(displacement)
    }

    fn locomotion(&self, displacement: Vec3) -> Locomotion {
        Locomotion {
            displacement,
            body_rotation: self.body_rotation(),
            view_rotation: self.view_rotation(),
            grounded: self.is_grounded,
        }
    }

    fn ground_check<G: GroundProbe + ?Sized>(&mut self, actor_position: Vec3, ground: &G) {
        let center = self.probe_center(actor_position);
        self.is_grounded = ground.overlaps_sphere(center, self.config.probe_radius);
    }

    /// Horizontal velocity in world space from the movement axes
    fn movement(&self, axes: Vec2) -> Vec3 {
        // Normalized so diagonals are not faster
        let input = axes.normalize_or_zero() * self.config.movement_speed;
        if input.length_squared() < self.config.input_dead_zone {
            return Vec3::ZERO;
        }

        let body = self.body_rotation();
        let right = body * Vec3::X;
        let forward = body * Vec3::NEG_Z;
        right * input.x + forward * input.y
    }

    fn rotate(&mut self, dt: f32, raw: Vec2) {
        let blend = (dt * self.config.look_smoothing).clamp(0.0, 1.0);
        self.smoothed_look = self.smoothed_look.lerp(raw, blend);

        let delta = self.smoothed_look * self.config.rotation_speed;
        if delta.length_squared() < self.config.input_dead_zone {
            return;
        }

        let limit = self.config.pitch_limit;
        self.orientation.yaw += delta.x;
        self.orientation.pitch = (self.orientation.pitch + delta.y).clamp(-limit, limit);
    }

    /// Update and return the vertical velocity
    fn apply_gravity(&mut self, dt: f32) -> f32 {
        if self.is_grounded {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = self.config.grounded_velocity;
            }
        } else {
            self.vertical_velocity -= self.config.gravity * self.config.gravity_multiplier * dt;
        }
        self.vertical_velocity
    }
}
