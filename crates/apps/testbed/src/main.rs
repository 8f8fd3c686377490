//! Interaction Testbed
//!
//! Runs the first-person rig headless against a TOML scene and input script.
//! Use `--config <path>` for the scene and `--script <path>` for the inputs.
//! Set `RUST_LOG=debug` to see every tick.

use anyhow::Result;
use clap::Parser;
use interaction::RigConfig;
use std::path::PathBuf;
use testbed::cli::CommonArgs;
use testbed::scene::SceneFile;
use testbed::script::InputScript;
use testbed::Testbed;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = "crates/apps/testbed/assets/scene.toml";
const DEFAULT_SCRIPT: &str = "crates/apps/testbed/assets/script.toml";

/// Interaction Testbed
///
/// Walks up to props, picks them up, spins them and puts them back.
#[derive(Parser)]
#[command(name = "testbed")]
#[command(about = "Headless first-person look and inspection testbed")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Print the default rig configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Explicit path if given, otherwise the default one when it exists
fn resolve(path: Option<&PathBuf>, default: &str) -> Option<PathBuf> {
    match path {
        Some(path) => Some(path.clone()),
        None => {
            let default = PathBuf::from(default);
            default.exists().then_some(default)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.dump_config {
        print!("{}", RigConfig::default().to_toml_string()?);
        return Ok(());
    }

    let scene = match resolve(args.common.config_path(), DEFAULT_SCENE) {
        Some(path) => {
            tracing::info!("Loading scene: {}", path.display());
            SceneFile::load(&path)?
        }
        None => SceneFile::default(),
    };
    let script = match resolve(args.common.script_path(), DEFAULT_SCRIPT) {
        Some(path) => {
            tracing::info!("Loading script: {}", path.display());
            InputScript::load(&path)?
        }
        None => InputScript::default(),
    };

    let mut testbed = Testbed::new(&scene, script, args.common.tick_length());
    let frames = args.common.frames.unwrap_or_else(|| testbed.default_frames());
    let report = testbed.run(frames);

    println!("{report}");
    Ok(())
}
