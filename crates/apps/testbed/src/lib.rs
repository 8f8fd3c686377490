//! Interaction Testbed
//!
//! Headless harness that runs the first-person rig against a reference
//! scene:
//! - Scene: ground slab, box props, item catalog (TOML)
//! - Input: scripted per-tick timeline (TOML)
//! - Output: logged HUD changes and phase transitions, plus a final report

pub mod cli;
pub mod collision;
pub mod hud;
pub mod scene;
pub mod script;

use glam::Vec3;
use interaction::{InspectionPhase, Pose, Rig, TickReport};
use std::fmt;
use tracing::{debug, info, warn};

use cli::DEFAULT_DT;
use hud::RecordingHud;
use scene::{FloorMotor, SceneFile, SimScene};
use script::InputScript;

/// Testbed state: rig, scene and HUD advanced together
pub struct Testbed {
    rig: Rig,
    scene: SimScene,
    motor: FloorMotor,
    hud: RecordingHud,
    script: InputScript,
    dt: f32,
    tick: u64,
    phase: InspectionPhase,
    pickups: u32,
}

impl Testbed {
    /// Create a testbed ticking at `dt` seconds; unusable values fall back to 60 Hz
    pub fn new(file: &SceneFile, script: InputScript, dt: f32) -> Self {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            warn!(dt, fallback = DEFAULT_DT, "invalid tick length");
            DEFAULT_DT
        };
        let scene = SimScene::new(file);
        let player = &file.player;
        let rig = Rig::new(file.rig.clone(), player.spawn).with_orientation(player.yaw, player.pitch);

        info!(
            objects = scene.objects().len(),
            steps = script.steps.len(),
            dt,
            "testbed ready"
        );

        Self {
            rig,
            motor: FloorMotor {
                floor: scene.floor(),
            },
            scene,
            hud: RecordingHud::new(),
            script,
            dt,
            tick: 0,
            phase: InspectionPhase::Idle,
            pickups: 0,
        }
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn scene(&self) -> &SimScene {
        &self.scene
    }

    pub fn hud(&self) -> &RecordingHud {
        &self.hud
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ticks covering the whole script plus one second to settle
    pub fn default_frames(&self) -> u64 {
        self.script.duration() + (1.0 / self.dt).ceil() as u64
    }

    /// Advance one tick
    pub fn step(&mut self) -> TickReport {
        let input = self.script.input_at(self.tick);
        self.hud.set_tick(self.tick);

        let report = self
            .rig
            .tick(self.dt, &input, &mut self.scene, &mut self.motor, &mut self.hud);

        if report.phase != self.phase {
            info!(tick = self.tick, from = ?self.phase, to = ?report.phase, "phase");
            if report.phase == InspectionPhase::TransitioningIn {
                self.pickups += 1;
            }
            self.phase = report.phase;
        }
        debug!(tick = self.tick, position = ?report.position, grounded = report.grounded, "tick");

        self.tick += 1;
        report
    }

    pub fn run(&mut self, frames: u64) -> RunReport {
        for _ in 0..frames {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> RunReport {
        let state = self.hud.state();
        RunReport {
            ticks: self.tick,
            seconds: self.tick as f32 * self.dt,
            phase: self.phase,
            position: self.rig.position(),
            grounded: self.rig.look().is_grounded(),
            pickups: self.pickups,
            panel_visible: state.panel_visible,
            panel_updates: state.panel_updates,
            prompt: state.prompt.clone(),
            held: self
                .rig
                .inspection()
                .session()
                .and_then(|session| self.scene.object(session.entity()))
                .map(|object| object.name.clone()),
            objects: self
                .scene
                .objects()
                .iter()
                .map(|object| (object.name.clone(), object.pose))
                .collect(),
        }
    }
}

/// Summary printed at the end of a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub ticks: u64,
    pub seconds: f32,
    pub phase: InspectionPhase,
    pub position: Vec3,
    pub grounded: bool,
    pub pickups: u32,
    pub panel_visible: bool,
    pub panel_updates: u32,
    pub prompt: String,
    pub held: Option<String>,
    pub objects: Vec<(String, Pose)>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Report ===")?;
        writeln!(f, "Ticks:     {} ({:.2}s)", self.ticks, self.seconds)?;
        writeln!(f, "Phase:     {:?}", self.phase)?;
        writeln!(
            f,
            "Actor:     ({:.2}, {:.2}, {:.2}) {}",
            self.position.x,
            self.position.y,
            self.position.z,
            if self.grounded { "GROUNDED" } else { "AIR" }
        )?;
        writeln!(f, "Pickups:   {}", self.pickups)?;
        writeln!(
            f,
            "Panel:     {} ({} updates)",
            if self.panel_visible { "shown" } else { "hidden" },
            self.panel_updates
        )?;
        writeln!(f, "Prompt:    {:?}", self.prompt)?;
        if let Some(held) = &self.held {
            writeln!(f, "Held:      {held}")?;
        }
        for (name, pose) in &self.objects {
            let p = pose.position;
            writeln!(f, "  {name}: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}
