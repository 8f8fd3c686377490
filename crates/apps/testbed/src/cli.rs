//! Command line arguments for the testbed
//!
//! [`CommonArgs`] is flattened into the binary's own parser:
//!
//! ```ignore
//! #[derive(Parser)]
//! struct Args {
//!     #[command(flatten)]
//!     common: CommonArgs,
//! }
//! ```

use clap::Args;
use std::path::PathBuf;

/// Default tick length (60 Hz)
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Load the scene from a TOML file
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Drive the rig from a TOML input script
    #[arg(long, short = 's', value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Number of ticks to run (defaults to the script length plus one second)
    #[arg(long, short = 'f', value_name = "FRAMES")]
    pub frames: Option<u64>,

    /// Tick length in seconds
    #[arg(long, value_name = "SECONDS")]
    pub dt: Option<f32>,
}

impl CommonArgs {
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.config.as_ref()
    }

    pub fn script_path(&self) -> Option<&PathBuf> {
        self.script.as_ref()
    }

    /// Tick length, falling back to 60 Hz for missing or unusable values
    pub fn tick_length(&self) -> f32 {
        match self.dt {
            Some(dt) if dt.is_finite() && dt > 0.0 => dt,
            _ => DEFAULT_DT,
        }
    }
}
