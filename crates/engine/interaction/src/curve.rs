//! Keyframed easing curves
//!
//! A curve is a list of keys joined by cubic Hermite segments. Evaluation
//! outside the key range clamps to the first or last value. Transitions
//! sample one curve for position and another for rotation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    pub fn new(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Easing curve sampled with a normalized progress value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationCurve {
    pub keys: Vec<Keyframe>,
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::ease_in_out(0.0, 0.0, 1.0, 1.0)
    }
}

impl AnimationCurve {
    /// Build a curve from keys, rejecting empty or unordered input
    pub fn from_keys(keys: Vec<Keyframe>) -> Result<Self> {
        let curve = Self { keys };
        curve.validate()?;
        Ok(curve)
    }

    /// Straight line between two keys
    pub fn linear(start_time: f32, start_value: f32, end_time: f32, end_value: f32) -> Self {
        let span = end_time - start_time;
        let slope = if span.abs() > f32::EPSILON {
            (end_value - start_value) / span
        } else {
            0.0
        };
        Self {
            keys: vec![
                Keyframe::new(start_time, start_value, slope, slope),
                Keyframe::new(end_time, end_value, slope, slope),
            ],
        }
    }

    /// Smooth S-curve with flat tangents at both ends
    pub fn ease_in_out(start_time: f32, start_value: f32, end_time: f32, end_value: f32) -> Self {
        Self {
            keys: vec![
                Keyframe::new(start_time, start_value, 0.0, 0.0),
                Keyframe::new(end_time, end_value, 0.0, 0.0),
            ],
        }
    }

    /// Flat curve holding a single value over the range
    pub fn constant(start_time: f32, end_time: f32, value: f32) -> Self {
        Self::ease_in_out(start_time, value, end_time, value)
    }

    /// Check that the curve has keys with finite, non-decreasing times
    pub fn validate(&self) -> Result<()> {
        if self.keys.is_empty() {
            return Err(Error::InvalidCurve("curve has no keys".into()));
        }
        for key in &self.keys {
            if !key.time.is_finite() || !key.value.is_finite() {
                return Err(Error::InvalidCurve(format!(
                    "non-finite key at time {}",
                    key.time
                )));
            }
        }
        if self.keys.windows(2).any(|pair| pair[1].time < pair[0].time) {
            return Err(Error::InvalidCurve("keys are not sorted by time".into()));
        }
        Ok(())
    }

    /// Sample the curve at `time`
    pub fn evaluate(&self, time: f32) -> f32 {
        let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
            return 0.0;
        };

        if time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; clamping above guarantees 1..len
        let next = self.keys.partition_point(|key| key.time <= time);
        let k0 = self.keys[next - 1];
        let k1 = self.keys[next];

        hermite(k0, k1, time)
    }
}

fn hermite(k0: Keyframe, k1: Keyframe, time: f32) -> f32 {
    let span = k1.time - k0.time;
    if span <= 0.0 {
        return k1.value;
    }

    // Infinite tangents mark a stepped segment
    if !k0.out_tangent.is_finite() || !k1.in_tangent.is_finite() {
        return k0.value;
    }

    let s = (time - k0.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * k0.value + h10 * k0.out_tangent * span + h01 * k1.value + h11 * k1.in_tangent * span
}
