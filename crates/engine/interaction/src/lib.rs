//! First-person interaction controllers
//!
//! Two cooperating controllers driven once per tick by a [`Rig`]:
//!
//! - [`LookController`] turns movement axes and pointer deltas into body yaw,
//!   view pitch, horizontal walking and gravity.
//! - [`InspectionController`] picks up the object under the crosshair,
//!   animates it to a mount in front of the camera, lets the user spin and
//!   zoom it, and puts it back exactly where it was.
//!
//! The crate owns no scene. Raycasts, poses, ground overlap and the HUD are
//! reached through the traits in [`scene`] and [`hud`].

pub mod camera;
pub mod config;
pub mod curve;
pub mod error;
pub mod hud;
pub mod inspection;
pub mod look;
pub mod rig;
pub mod scene;

pub use camera::{Camera, Pose};
pub use config::RigConfig;
pub use curve::{AnimationCurve, Keyframe};
pub use error::{Error, Result};
pub use hud::{Hud, HudState};
pub use inspection::{
    InspectionConfig, InspectionController, InspectionInput, InspectionPhase, TransitionBlend,
    TransitionConfig,
};
pub use look::{LookConfig, LookController, LookInput, Locomotion};
pub use rig::{Rig, RigInput, TickReport};
pub use scene::{
    CharacterMotor, EntityId, FreeMotor, GroundProbe, InspectableItem, LayerMask, RayHit,
    SceneQuery,
};

// Re-export for convenience
pub use glam;
