//! Orbis: headless driver for the procedural planet generator.
//!
//! Loads settings, builds the planet, then runs a fixed number of 60 Hz
//! frames of idle spin while watching `config.ron` for changes. Edited
//! planet settings are rebuilt on a background worker and swapped in
//! without resetting the planet's orientation.
//!
//! Run with: `cargo run -p orbis-app -- --resolution 100 --seed 7`

mod session;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use orbis_config::{CliArgs, Config};
use orbis_planet::{PlanetError, RenderContext};
use orbis_terrain::{NoiseSource, PerlinNoise, session_seed};
use tracing::{info, warn};

use crate::session::Session;

/// How long to wait for an in-flight rebuild before exiting.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("orbis: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), PlanetError> {
    let config_dir = args.config.clone().or_else(Config::default_dir);

    // Settings as stored on disk; CLI overrides are layered on a copy.
    let file_config = match &config_dir {
        Some(dir) => Config::load_or_create(dir)?,
        None => Config::default(),
    };
    let mut config = file_config.clone();
    config.apply_cli_overrides(args)?;

    let log_dir = config_dir.as_ref().map(|d| d.join("logs"));
    let logging =
        orbis_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    if let Err(e) = logging {
        eprintln!("orbis: logging already initialised: {e}");
    }

    info!("Orbis planet generator");
    match &config_dir {
        Some(dir) => info!("Config directory: {}", dir.display()),
        None => warn!("No config directory available, hot-reload disabled"),
    }

    let seed = session_seed(config.planet.seed);
    info!(
        seed,
        radius = config.planet.radius,
        resolution = config.planet.resolution,
        layers = config.planet.noise_layers.len(),
        "Generating planet"
    );
    let noise: Arc<dyn NoiseSource> = Arc::new(PerlinNoise::new(seed));
    let context = RenderContext::new(&config, Arc::clone(&noise))?;

    let mut session = Session::new(context, noise, config, file_config, config_dir, args)?;
    session.run(args.frames);
    if !session.settle(SETTLE_TIMEOUT) {
        warn!("Session ended with a rebuild still in flight");
    }
    session.report();
    Ok(())
}
