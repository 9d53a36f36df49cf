//! Configuration structs with sensible defaults, validation, and RON persistence.

use std::path::Path;

use orbis_cubesphere::ProjectionMethod;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Straight (non-premultiplied) RGBA colour with components in `[0, 1]`.
pub type Rgba = [f32; 4];

/// Smallest grid resolution that still forms a quad per face.
pub const MIN_RESOLUTION: u32 = 2;

/// Largest grid resolution whose vertex indices fit in a `u16`.
pub const MAX_RESOLUTION: u32 = 256;

/// Default clipping threshold that flattens low noise into ocean basins.
pub const DEFAULT_ELEVATION_FLOOR: f64 = 0.1;

/// Largest noise layer amplitude accepted, relative to a unit radius.
pub const MAX_LAYER_INTENSITY: f64 = 1.0e3;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Planet generation settings.
    pub planet: PlanetConfig,
    /// Orbit camera settings.
    pub camera: CameraConfig,
    /// Idle spin applied every frame.
    pub spin: SpinConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// One octave of the terrain shape.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseLayerConfig {
    /// Feature size. Sample points are divided by this, so smaller values give
    /// higher-frequency detail. Layers with `scale <= 0` are disabled.
    pub scale: f64,
    /// Amplitude multiplier for this layer's noise.
    pub intensity: f64,
    /// Offset added to every sample coordinate before scaling.
    pub offset: f64,
    /// Per-layer floor shown next to the layer in editors. Terrain height is
    /// clipped by [`PlanetConfig::elevation_floor`], not by this value.
    pub elevation_floor: f64,
}

impl NoiseLayerConfig {
    /// Create a layer with zero offset and the default floor.
    pub fn new(scale: f64, intensity: f64) -> Self {
        Self {
            scale,
            intensity,
            ..Default::default()
        }
    }

    /// A layer contributes only when its scale is strictly positive.
    pub fn is_enabled(&self) -> bool {
        self.scale > 0.0
    }

    /// Reject values that would make elevation non-finite.
    ///
    /// A non-positive `scale` is allowed; the layer is simply skipped.
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("scale", self.scale),
            ("intensity", self.intensity),
            ("offset", self.offset),
        ] {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        if self.intensity.abs() > MAX_LAYER_INTENSITY {
            return Err(format!(
                "intensity must be within ±{MAX_LAYER_INTENSITY}, got {}",
                self.intensity
            ));
        }
        if !(0.0..=1.0).contains(&self.elevation_floor) {
            return Err(format!(
                "elevation_floor must be in [0, 1], got {}",
                self.elevation_floor
            ));
        }
        Ok(())
    }
}

impl Default for NoiseLayerConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            intensity: 1.0,
            offset: 0.0,
            elevation_floor: DEFAULT_ELEVATION_FLOOR,
        }
    }
}

/// Planet generation settings read at every regeneration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanetConfig {
    /// Base sphere radius.
    pub radius: f64,
    /// Grid samples per face edge (`resolution * resolution` vertices per face).
    pub resolution: u32,
    /// Base terrain colour used when face debugging is off.
    pub color: Rgba,
    /// Draw triangle edges as lines instead of filled triangles.
    pub wireframe: bool,
    /// Colour each cube face with a distinct debug colour.
    pub debug_faces: bool,
    /// Blend between the unit cube (0.0) and the unit sphere (1.0).
    pub spherity: f64,
    /// Cube-to-sphere mapping.
    pub projection: ProjectionMethod,
    /// Global clipping threshold subtracted from the summed noise.
    pub elevation_floor: f64,
    /// Noise seed. `None` draws a fresh seed at session start.
    pub seed: Option<u32>,
    /// Noise octaves, summed in order.
    pub noise_layers: Vec<NoiseLayerConfig>,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            resolution: 50,
            color: [1.0, 1.0, 1.0, 1.0],
            wireframe: false,
            debug_faces: false,
            spherity: 1.0,
            projection: ProjectionMethod::Normalize,
            elevation_floor: DEFAULT_ELEVATION_FLOOR,
            seed: None,
            noise_layers: vec![
                NoiseLayerConfig::new(0.1, 0.1),
                NoiseLayerConfig::new(0.5, 0.5),
            ],
        }
    }
}

impl PlanetConfig {
    /// Check the values that would otherwise break mesh generation.
    ///
    /// Disabled noise layers are not an error; they are skipped during
    /// generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Validation(format!(
                "radius must be positive and finite, got {}",
                self.radius
            )));
        }
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ConfigError::Validation(format!(
                "resolution must be in [{MIN_RESOLUTION}, {MAX_RESOLUTION}], got {}",
                self.resolution
            )));
        }
        if !(0.0..=1.0).contains(&self.spherity) {
            return Err(ConfigError::Validation(format!(
                "spherity must be in [0, 1], got {}",
                self.spherity
            )));
        }
        if !self.elevation_floor.is_finite() {
            return Err(ConfigError::Validation(
                "elevation_floor must be finite".to_string(),
            ));
        }
        if let Some(c) = self.color.iter().find(|c| !(0.0..=1.0).contains(*c)) {
            return Err(ConfigError::Validation(format!(
                "color components must be in [0, 1], got {c}"
            )));
        }
        for (i, layer) in self.noise_layers.iter().enumerate() {
            layer
                .validate()
                .map_err(|reason| ConfigError::Validation(format!("noise layer {i}: {reason}")))?;
        }
        let reach: f64 = self.radius
            + self
                .noise_layers
                .iter()
                .filter(|l| l.is_enabled())
                .map(|l| l.intensity.abs())
                .sum::<f64>();
        if !(reach as f32).is_finite() {
            return Err(ConfigError::Validation(format!(
                "radius plus terrain height {reach} does not fit vertex positions"
            )));
        }
        Ok(())
    }

    /// Height of the water surface handed to the shading stage.
    pub fn water_level(&self) -> f64 {
        self.radius + 0.01
    }
}

/// Orbit camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting distance from the planet centre.
    pub distance: f32,
    /// Closest allowed zoom distance.
    pub min_distance: f32,
    /// Farthest allowed zoom distance.
    pub max_distance: f32,
    /// Distance change per unit of zoom input.
    pub zoom_speed: f32,
    /// Radians of rotation per unit of drag input.
    pub drag_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl CameraConfig {
    /// Check the values the orbit camera clamps and projects with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("distance", self.distance),
            ("min_distance", self.min_distance),
            ("max_distance", self.max_distance),
            ("zoom_speed", self.zoom_speed),
            ("drag_sensitivity", self.drag_sensitivity),
            ("fov_degrees", self.fov_degrees),
            ("near", self.near),
            ("far", self.far),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Validation(format!(
                    "camera {name} must be finite, got {value}"
                )));
            }
        }
        if !(self.min_distance > 0.0 && self.min_distance <= self.max_distance) {
            return Err(ConfigError::Validation(format!(
                "camera distance limits must satisfy 0 < min <= max, got [{}, {}]",
                self.min_distance, self.max_distance
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::Validation(format!(
                "camera clip planes must satisfy 0 < near < far, got near {} far {}",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Validation(format!(
                "camera fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            min_distance: 4.0,
            max_distance: 10.0,
            zoom_speed: 0.01,
            drag_sensitivity: 0.005,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Idle rotation rates in radians per second about the X, Y and Z axes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpinConfig {
    /// Whether the planet spins on its own.
    pub enabled: bool,
    /// Angular speed per axis.
    pub rates: [f32; 3],
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rates: [0.3, 0.7, 0.4],
        }
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Parse a `#rrggbb` colour into RGBA with alpha fixed at 1.0.
///
/// The leading `#` is optional and hex digits are case-insensitive.
pub fn parse_hex_color(hex: &str) -> Result<Rgba, ConfigError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| -> Result<f32, ConfigError> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| f32::from(v) / 255.0)
            .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
    };
    Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0])
}

// --- Load / Save / Reload ---

impl Config {
    /// Validate the planet and camera sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.planet.validate()?;
        self.camera.validate()
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Default config directory (`<platform config dir>/orbis`).
    pub fn default_dir() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("orbis"))
    }
}
