//! Object inspection: pick up, rotate, zoom, put back
//!
//! # State machine
//!
//! ```text
//! Idle --interact + ray hit--> TransitioningIn --progress 1--> Inspecting
//!  ^                                                               |
//!  +------progress 1------ TransitioningOut <------release---------+
//! ```
//!
//! Interact and release edges are ignored while a transition is running.
//! Every failure (no hit, busy, missing metadata, vanished object) degrades
//! to a no-op; the tick loop never aborts.

mod mount;
mod transition;

pub use mount::InspectionMount;
pub use transition::{Transition, TransitionBlend, TransitionConfig};

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::camera::{Camera, Pose};
use crate::error::{Error, Result};
use crate::hud::Hud;
use crate::scene::{EntityId, InspectableItem, LayerMask, RayHit, SceneQuery};

/// Layer used for inspectable objects unless configured otherwise
pub const DEFAULT_INSPECT_LAYER: u8 = 8;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the inspection controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InspectionConfig {
    /// Layers the pickup ray can hit
    pub target_layers: LayerMask,
    /// Maximum pickup distance from the camera
    pub interact_range: f32,
    /// Degrees of rotation per pointer unit per second
    pub rotate_speed: f32,
    /// Mount travel per scroll unit
    pub zoom_speed: f32,
    /// Maximum distance the mount may move from rest while zooming
    pub zoom_distance: f32,
    /// Rest position of the mount in camera-local space
    pub mount_offset: Vec3,
    /// Key label shown in the look-at prompt
    pub prompt_key: String,
    pub transition: TransitionConfig,
}

impl Default for InspectionConfig {
    fn default() -> Self {
        Self {
            target_layers: LayerMask::layer(DEFAULT_INSPECT_LAYER),
            interact_range: 3.0,
            rotate_speed: 100.0,
            zoom_speed: 1.0,
            zoom_distance: 10.0,
            mount_offset: Vec3::new(0.0, 0.0, -0.8),
            prompt_key: "E".to_string(),
            transition: TransitionConfig::default(),
        }
    }
}

impl InspectionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.interact_range.is_finite() || self.interact_range <= 0.0 {
            return Err(Error::invalid(
                "inspection.interact_range",
                format!("{} must be > 0", self.interact_range),
            ));
        }
        let non_negative = [
            ("inspection.rotate_speed", self.rotate_speed),
            ("inspection.zoom_distance", self.zoom_distance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid(field, format!("{value} must be >= 0")));
            }
        }
        if !self.zoom_speed.is_finite() {
            return Err(Error::invalid("inspection.zoom_speed", "must be finite"));
        }
        if !self.mount_offset.is_finite() {
            return Err(Error::invalid("inspection.mount_offset", "must be finite"));
        }
        self.transition.validate()
    }
}

// ============================================================================
// Phase & session
// ============================================================================

/// Lifecycle phase of the inspection controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InspectionPhase {
    #[default]
    Idle,
    TransitioningIn,
    Inspecting,
    TransitioningOut,
}

impl InspectionPhase {
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::TransitioningIn | Self::TransitioningOut)
    }

    /// The inspecting flag that drives the panel: set from pickup until release
    pub fn is_engaged(self) -> bool {
        matches!(self, Self::TransitioningIn | Self::Inspecting)
    }

    /// Whether the look controller should be running in this phase
    pub fn allows_locomotion(self) -> bool {
        !self.is_engaged()
    }
}

/// Per-tick input consumed by the inspection controller
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InspectionInput {
    /// Interact button went down this tick
    pub interact: bool,
    /// Release button went down this tick
    pub release: bool,
    /// Pointer delta for this tick
    pub look: Vec2,
    /// Scroll wheel delta for this tick
    pub scroll: f32,
}

/// State of the one object currently picked up
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionSession {
    entity: EntityId,
    original_pose: Pose,
    item: Option<InspectableItem>,
    phase: InspectionPhase,
    transition: Option<Transition>,
    /// Pose relative to the mount while attached and inspecting
    attached: Option<Pose>,
}

impl InspectionSession {
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// World pose captured at pickup, restored when the session ends
    pub fn original_pose(&self) -> Pose {
        self.original_pose
    }

    pub fn item(&self) -> Option<&InspectableItem> {
        self.item.as_ref()
    }

    pub fn phase(&self) -> InspectionPhase {
        self.phase
    }

    /// Progress of the running transition, if any
    pub fn progress(&self) -> Option<f32> {
        self.transition.as_ref().map(Transition::progress)
    }
}

// ============================================================================
// Controller
// ============================================================================

/// Pick-up-and-inspect controller
///
/// # Example
/// ```
/// use interaction::camera::Camera;
/// use interaction::hud::HudState;
/// use interaction::inspection::{InspectionConfig, InspectionController, InspectionInput};
/// # use interaction::camera::Pose;
/// # use interaction::scene::*;
/// # use glam::Vec3;
/// # struct Empty;
/// # impl SceneQuery for Empty {
/// #     fn raycast(&self, _: Vec3, _: Vec3, _: f32, _: LayerMask) -> Option<RayHit> { None }
/// #     fn item(&self, _: EntityId) -> Option<InspectableItem> { None }
/// #     fn pose(&self, _: EntityId) -> Option<Pose> { None }
/// #     fn set_pose(&mut self, _: EntityId, _: Pose) {}
/// # }
///
/// let mut controller = InspectionController::new(InspectionConfig::default());
/// let mut hud = HudState::default();
/// let camera = Camera::new(Vec3::new(0.0, 1.7, 0.0));
///
/// let input = InspectionInput { interact: true, ..Default::default() };
/// controller.update(1.0 / 60.0, &input, &camera, &mut Empty, &mut hud);
///
/// // Nothing was hit, so nothing happened
/// assert!(controller.session().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct InspectionController {
    config: InspectionConfig,
    mount: InspectionMount,
    session: Option<InspectionSession>,
    /// Last inspecting flag pushed to the HUD
    panel_shown: bool,
}

impl InspectionController {
    pub fn new(config: InspectionConfig) -> Self {
        let mount = InspectionMount::new(config.mount_offset);
        Self {
            config,
            mount,
            session: None,
            panel_shown: false,
        }
    }

    pub fn config(&self) -> &InspectionConfig {
        &self.config
    }

    pub fn mount(&self) -> &InspectionMount {
        &self.mount
    }

    pub fn session(&self) -> Option<&InspectionSession> {
        self.session.as_ref()
    }

    pub fn phase(&self) -> InspectionPhase {
        self.session
            .as_ref()
            .map_or(InspectionPhase::Idle, InspectionSession::phase)
    }

    pub fn allows_locomotion(&self) -> bool {
        self.phase().allows_locomotion()
    }

    /// Advance one tick
    ///
    /// Order within the tick: pickup, inspect/release, transition, prompt,
    /// panel edge. Returns the phase after the tick.
    pub fn update<S, H>(
        &mut self,
        dt: f32,
        input: &InspectionInput,
        camera: &Camera,
        scene: &mut S,
        hud: &mut H,
    ) -> InspectionPhase
    where
        S: SceneQuery + ?Sized,
        H: Hud + ?Sized,
    {
        let hit = if self.session.is_none() {
            scene.raycast(
                camera.position,
                camera.forward(),
                self.config.interact_range,
                self.config.target_layers,
            )
        } else {
            None
        };

        if input.interact {
            match &hit {
                Some(hit) => self.begin_pickup(hit, camera, &*scene),
                None => debug!(phase = ?self.phase(), "interact ignored"),
            }
        }

        let phase = self.phase();
        if phase == InspectionPhase::Inspecting {
            self.inspect(dt, input, camera, scene);
        } else if input.release && phase.is_transitioning() {
            debug!(?phase, "release ignored during transition");
        }

        self.advance_transition(dt, camera, scene);

        let prompt = match &hit {
            Some(hit) if self.session.is_none() => {
                format!("[{}]\n{}", self.config.prompt_key, hit.name)
            }
            _ => String::new(),
        };
        hud.set_prompt(&prompt);

        self.update_panel(hud);

        self.phase()
    }

    fn begin_pickup<S: SceneQuery + ?Sized>(&mut self, hit: &RayHit, camera: &Camera, scene: &S) {
        if self.session.is_some() {
            return;
        }
        let Some(original_pose) = scene.pose(hit.entity) else {
            debug!(entity = %hit.entity, "hit object has no pose; pickup skipped");
            return;
        };

        let item = scene.item(hit.entity);
        if item.is_none() {
            warn!(entity = %hit.entity, name = %hit.name, "no item metadata; panel text unchanged");
        }

        let target = Pose::new(self.mount.world_pose(camera).position, Quat::IDENTITY);
        let transition = Transition::new(original_pose, target, self.config.transition.time);

        info!(entity = %hit.entity, name = %hit.name, distance = hit.distance, "picked up");
        self.session = Some(InspectionSession {
            entity: hit.entity,
            original_pose,
            item,
            phase: InspectionPhase::TransitioningIn,
            transition: Some(transition),
            attached: None,
        });
    }

    fn inspect<S: SceneQuery + ?Sized>(
        &mut self,
        dt: f32,
        input: &InspectionInput,
        camera: &Camera,
        scene: &mut S,
    ) {
        let Some(entity) = self.session.as_ref().map(InspectionSession::entity) else {
            return;
        };
        if scene.pose(entity).is_none() {
            warn!(%entity, "inspected object vanished; session dropped");
            self.mount.reset_rotation();
            self.session = None;
            return;
        }

        let rotation = input.look * self.config.rotate_speed * dt;
        if rotation != Vec2::ZERO && rotation.is_finite() {
            self.mount.rotate(camera, rotation);
        }

        let zoom = input.scroll * self.config.zoom_speed;
        if zoom != 0.0 && zoom.is_finite() {
            self.mount.zoom(zoom, self.config.zoom_distance);
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(local) = session.attached {
            scene.set_pose(session.entity, self.mount.world_pose(camera).mul_pose(local));
        }

        if input.release {
            // Detached: the object keeps its world pose and heads home from there
            let current = scene
                .pose(session.entity)
                .unwrap_or(session.original_pose);
            self.mount.reset_rotation();

            session.attached = None;
            session.phase = InspectionPhase::TransitioningOut;
            session.transition = Some(Transition::new(
                current,
                session.original_pose,
                self.config.transition.time,
            ));
            info!(entity = %session.entity, "released");
        }
    }

    fn advance_transition<S: SceneQuery + ?Sized>(
        &mut self,
        dt: f32,
        camera: &Camera,
        scene: &mut S,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(transition) = session.transition.as_mut() else {
            return;
        };

        let Some(current) = scene.pose(session.entity) else {
            warn!(entity = %session.entity, "inspected object vanished; session dropped");
            self.session = None;
            return;
        };

        let pose = transition.advance(dt, current, &self.config.transition);
        scene.set_pose(session.entity, pose);

        if !transition.is_finished() {
            return;
        }

        match session.phase {
            InspectionPhase::TransitioningIn => {
                session.attached = Some(pose.relative_to(self.mount.world_pose(camera)));
                session.transition = None;
                session.phase = InspectionPhase::Inspecting;
                debug!(entity = %session.entity, "inspecting");
            }
            InspectionPhase::TransitioningOut => {
                scene.set_pose(session.entity, session.original_pose);
                debug!(entity = %session.entity, "returned to original pose");
                self.session = None;
            }
            InspectionPhase::Idle | InspectionPhase::Inspecting => {
                session.transition = None;
            }
        }
    }

    /// Push panel visibility and item text only when the inspecting flag flips
    fn update_panel<H: Hud + ?Sized>(&mut self, hud: &mut H) {
        let engaged = self.phase().is_engaged();
        if engaged == self.panel_shown {
            return;
        }

        hud.set_panel_visible(engaged);
        self.panel_shown = engaged;

        if let Some(item) = self.session.as_ref().and_then(|s| s.item.as_ref()) {
            hud.set_item_text(&item.name, &item.description);
        }
        debug!(visible = engaged, "inspection panel updated");
    }
}
