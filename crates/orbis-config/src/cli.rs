//! Command-line argument parsing for Orbis.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ConfigError, parse_hex_color};

/// Orbis command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orbis", about = "Procedural cube-sphere planet generator")]
pub struct CliArgs {
    /// Planet base radius.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Grid samples per face edge (2..=256).
    #[arg(long)]
    pub resolution: Option<u32>,

    /// Noise seed; omitted means a fresh random seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Base terrain colour as #rrggbb.
    #[arg(long)]
    pub color: Option<String>,

    /// Render triangle edges as lines.
    #[arg(long)]
    pub wireframe: Option<bool>,

    /// Colour each cube face distinctly.
    #[arg(long)]
    pub debug_faces: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of simulated frames to run.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// Fails only when `--color` is not a valid hex colour.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(r) = args.radius {
            self.planet.radius = r;
        }
        if let Some(res) = args.resolution {
            self.planet.resolution = res;
        }
        if let Some(seed) = args.seed {
            self.planet.seed = Some(seed);
        }
        if let Some(ref hex) = args.color {
            self.planet.color = parse_hex_color(hex)?;
        }
        if let Some(w) = args.wireframe {
            self.planet.wireframe = w;
        }
        if let Some(d) = args.debug_faces {
            self.planet.debug_faces = d;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        Ok(())
    }
}
