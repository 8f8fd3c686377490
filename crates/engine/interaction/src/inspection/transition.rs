//! Timed pose transition advanced once per tick

use serde::{Deserialize, Serialize};

use crate::camera::Pose;
use crate::curve::AnimationCurve;
use crate::error::{Error, Result};

/// Progress within this distance of 1.0 counts as finished, absorbing
/// rounding from summing many small frame durations.
const PROGRESS_EPSILON: f64 = 1e-6;

/// Which pose each tick interpolates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionBlend {
    /// Re-lerp from the object's current (already interpolated) pose every
    /// tick. The easing compounds, so the motion front-loads strongly.
    #[default]
    FromCurrent,
    /// Lerp from the pose captured when the transition started, so the
    /// curve shape is followed exactly.
    FromStart,
}

/// Settings shared by the pickup and return transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionConfig {
    /// Duration of a transition in seconds
    pub time: f32,
    pub blend: TransitionBlend,
    /// Easing applied to position
    pub position_curve: AnimationCurve,
    /// Easing applied to rotation
    pub rotation_curve: AnimationCurve,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            time: 0.5,
            blend: TransitionBlend::default(),
            position_curve: AnimationCurve::default(),
            rotation_curve: AnimationCurve::default(),
        }
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(Error::invalid(
                "inspection.transition.time",
                format!("{} must be >= 0", self.time),
            ));
        }
        self.position_curve.validate()?;
        self.rotation_curve.validate()
    }
}

/// A pose transition in flight
///
/// Progress grows by `dt / duration` on each [`advance`](Self::advance) and
/// is clamped to `[0, 1]`. When it reaches 1 the returned pose is exactly
/// the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    start: Pose,
    target: Pose,
    duration: f32,
    progress: f64,
}

impl Transition {
    pub fn new(start: Pose, target: Pose, duration: f32) -> Self {
        Self {
            start,
            target,
            duration,
            progress: 0.0,
        }
    }

    /// Normalized progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        self.progress as f32
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance by `dt` seconds and return the pose for this tick
    ///
    /// `current` is the object's pose before this tick; it is the lerp origin
    /// for [`TransitionBlend::FromCurrent`].
    pub fn advance(&mut self, dt: f32, current: Pose, config: &TransitionConfig) -> Pose {
        if self.duration <= 0.0 {
            self.progress = 1.0;
        } else {
            let step = f64::from(dt.max(0.0)) / f64::from(self.duration);
            self.progress = (self.progress + step).clamp(0.0, 1.0);
            if 1.0 - self.progress < PROGRESS_EPSILON {
                self.progress = 1.0;
            }
        }

        if self.is_finished() {
            return self.target;
        }

        let t = self.progress as f32;
        let position_t = config.position_curve.evaluate(t).clamp(0.0, 1.0);
        let rotation_t = config.rotation_curve.evaluate(t).clamp(0.0, 1.0);

        let from = match config.blend {
            TransitionBlend::FromCurrent => current,
            TransitionBlend::FromStart => self.start,
        };
        from.lerp(self.target, position_t, rotation_t)
    }
}
