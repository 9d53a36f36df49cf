//! Configuration system for Orbis.
//!
//! Provides the planet, camera and spin settings read at regeneration time,
//! persisted to disk as RON files. Supports CLI overrides via clap, hot-reload
//! detection, and validation at the configuration boundary.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DEFAULT_ELEVATION_FLOOR, DebugConfig, MAX_LAYER_INTENSITY,
    MAX_RESOLUTION, MIN_RESOLUTION, NoiseLayerConfig, PlanetConfig, Rgba, SpinConfig,
    parse_hex_color,
};
pub use error::ConfigError;
pub use orbis_cubesphere::ProjectionMethod;
