//! Scripted input timeline
//!
//! ```toml
//! [[step]]
//! tick = 0
//! frames = 30
//! movement = [0.0, 1.0]
//!
//! [[step]]
//! tick = 40
//! interact = true
//! ```
//!
//! Axis values hold for `frames` ticks starting at `tick`. Button presses
//! fire once, on the first tick of their step. When steps overlap the later
//! one wins for axes.

use anyhow::{ensure, Context, Result};
use glam::Vec2;
use interaction::RigInput;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub tick: u64,
    #[serde(default = "default_frames")]
    pub frames: u64,
    #[serde(default)]
    pub movement: Option<Vec2>,
    #[serde(default)]
    pub look: Option<Vec2>,
    #[serde(default)]
    pub scroll: Option<f32>,
    #[serde(default)]
    pub interact: bool,
    #[serde(default)]
    pub release: bool,
}

fn default_frames() -> u64 {
    1
}

impl ScriptStep {
    fn is_active(&self, tick: u64) -> bool {
        tick >= self.tick && tick - self.tick < self.frames
    }

    /// First tick after this step
    pub fn end(&self) -> u64 {
        self.tick.saturating_add(self.frames)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl InputScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let script: Self = toml::from_str(content)?;
        for step in &script.steps {
            ensure!(step.frames > 0, "step at tick {} has zero frames", step.tick);
        }
        Ok(script)
    }

    /// Tick after the last scripted input
    pub fn duration(&self) -> u64 {
        self.steps.iter().map(ScriptStep::end).max().unwrap_or(0)
    }

    /// Input for one tick
    pub fn input_at(&self, tick: u64) -> RigInput {
        let mut input = RigInput::default();
        for step in self.steps.iter().filter(|step| step.is_active(tick)) {
            if let Some(movement) = step.movement {
                input.movement = movement;
            }
            if let Some(look) = step.look {
                input.look = look;
            }
            if let Some(scroll) = step.scroll {
                input.scroll = scroll;
            }
            if tick == step.tick {
                input.interact |= step.interact;
                input.release |= step.release;
            }
        }
        input
    }
}
