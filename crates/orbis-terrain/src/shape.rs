//! Layered elevation law: sums noise octaves and clips low ground to a flat floor.

use glam::DVec3;
use orbis_config::{DEFAULT_ELEVATION_FLOOR, NoiseLayerConfig, PlanetConfig};
use tracing::debug;

use crate::NoiseSource;

/// Ordered stack of noise layers that turns a unit-sphere direction into a
/// non-negative height above the base radius.
///
/// With no layers every point gets zero displacement and the planet is a
/// perfect sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeProvider {
    layers: Vec<NoiseLayerConfig>,
    elevation_floor: f64,
}

impl ShapeProvider {
    /// Create a provider from explicit layers and floor constant.
    pub fn new(layers: Vec<NoiseLayerConfig>, elevation_floor: f64) -> Self {
        let disabled = layers.iter().filter(|l| !l.is_enabled()).count();
        if disabled > 0 {
            debug!(disabled, "Skipping noise layers with non-positive scale");
        }
        Self {
            layers,
            elevation_floor,
        }
    }

    /// Build the provider described by the planet settings.
    pub fn from_config(config: &PlanetConfig) -> Self {
        Self::new(config.noise_layers.clone(), config.elevation_floor)
    }

    /// A provider with no layers.
    pub fn empty() -> Self {
        Self::new(Vec::new(), DEFAULT_ELEVATION_FLOOR)
    }

    /// Layers in configured order, including disabled ones.
    pub fn layers(&self) -> &[NoiseLayerConfig] {
        &self.layers
    }

    /// Floor subtracted from the summed noise before clipping at zero.
    pub fn elevation_floor(&self) -> f64 {
        self.elevation_floor
    }

    /// Height above the base radius for a point on the unit sphere.
    ///
    /// Each enabled layer contributes `noise.evaluate(point, scale, offset) * intensity`.
    /// The sum is then lowered by the floor and clipped at zero, so the result
    /// is never negative.
    pub fn compute_displacement(
        &self,
        noise: &dyn NoiseSource,
        point_on_unit_sphere: DVec3,
    ) -> f64 {
        let elevation: f64 = self
            .layers
            .iter()
            .filter(|layer| layer.is_enabled())
            .map(|layer| {
                noise.evaluate(point_on_unit_sphere, layer.scale, layer.offset) * layer.intensity
            })
            .sum();

        (elevation - self.elevation_floor).max(0.0)
    }

    /// Upper bound on [`compute_displacement`](Self::compute_displacement),
    /// assuming noise stays within `[-1, 1]`.
    pub fn max_displacement(&self) -> f64 {
        let sum: f64 = self
            .layers
            .iter()
            .filter(|layer| layer.is_enabled())
            .map(|layer| layer.intensity.abs())
            .sum();
        (sum - self.elevation_floor).max(0.0)
    }
}

impl Default for ShapeProvider {
    fn default() -> Self {
        Self::empty()
    }
}
