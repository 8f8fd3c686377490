//! First-person rig: actor, look controller and inspection controller
//!
//! The rig is the explicit per-tick driver. It owns the actor position and
//! both controllers, derives the camera between them, and hands locomotion
//! off to the inspection controller while an object is held.

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::camera::Camera;
use crate::config::RigConfig;
use crate::hud::Hud;
use crate::inspection::{InspectionController, InspectionInput, InspectionPhase};
use crate::look::{LookController, LookInput};
use crate::scene::{CharacterMotor, GroundProbe, SceneQuery};

/// Input for one rig tick, as polled from devices
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RigInput {
    /// Movement axes: x = strafe right, y = forward
    pub movement: Vec2,
    /// Pointer delta: x = right, y = up
    pub look: Vec2,
    /// Scroll wheel delta
    pub scroll: f32,
    /// Interact button went down this tick
    pub interact: bool,
    /// Release button went down this tick
    pub release: bool,
}

impl RigInput {
    fn look_input(&self) -> LookInput {
        LookInput {
            movement: self.movement,
            look: self.look,
        }
    }

    fn inspection_input(&self) -> InspectionInput {
        InspectionInput {
            interact: self.interact,
            release: self.release,
            look: self.look,
            scroll: self.scroll,
        }
    }
}

/// Summary of a rig tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub phase: InspectionPhase,
    pub position: Vec3,
    pub grounded: bool,
    /// Whether the look controller will run on the next tick
    pub locomotion_enabled: bool,
}

#[derive(Debug, Clone)]
pub struct Rig {
    position: Vec3,
    eye_height: f32,
    look: LookController,
    inspection: InspectionController,
}

impl Rig {
    pub fn new(config: RigConfig, position: Vec3) -> Self {
        Self {
            position,
            eye_height: config.eye_height,
            look: LookController::new(config.look),
            inspection: InspectionController::new(config.inspection),
        }
    }

    /// Start facing a given yaw and pitch, in degrees
    pub fn with_orientation(mut self, yaw: f32, pitch: f32) -> Self {
        self.look = self.look.with_orientation(yaw, pitch);
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look(&self) -> &LookController {
        &self.look
    }

    pub fn inspection(&self) -> &InspectionController {
        &self.inspection
    }

    /// Camera at eye height with body yaw and view pitch applied
    pub fn camera(&self) -> Camera {
        Camera {
            position: self.position + Vec3::Y * self.eye_height,
            rotation: (self.look.body_rotation() * self.look.view_rotation()).normalize(),
        }
    }

    /// Run one tick of `dt` seconds
    pub fn tick<S, M, H>(
        &mut self,
        dt: f32,
        input: &RigInput,
        scene: &mut S,
        motor: &mut M,
        hud: &mut H,
    ) -> TickReport
    where
        S: SceneQuery + GroundProbe + ?Sized,
        M: CharacterMotor + ?Sized,
        H: Hud + ?Sized,
    {
        if self.look.is_enabled() {
            let locomotion = self.look.update(dt, &input.look_input(), self.position, &*scene);
            if locomotion.displacement != Vec3::ZERO {
                self.position = motor.move_by(self.position, locomotion.displacement);
            }
        }

        let camera = self.camera();
        let phase = self
            .inspection
            .update(dt, &input.inspection_input(), &camera, scene, hud);

        let locomotion_enabled = phase.allows_locomotion();
        if locomotion_enabled != self.look.is_enabled() {
            debug!(enabled = locomotion_enabled, ?phase, "locomotion handed over");
            self.look.set_enabled(locomotion_enabled);
        }

        TickReport {
            phase,
            position: self.position,
            grounded: self.look.is_grounded(),
            locomotion_enabled,
        }
    }
}
