//! Seeded 3D gradient noise used to sample terrain elevation.

use glam::DVec3;
use noise::{NoiseFn, Perlin, Seedable};
use tracing::debug;

/// A deterministic, seedable 3D noise function.
///
/// Implementations must be continuous and smooth over all of ℝ³ so that
/// neighbouring sphere samples get neighbouring elevations, and must return
/// the same value for the same seed and point on every call.
pub trait NoiseSource: Send + Sync {
    /// Seed this source was built with.
    fn seed(&self) -> u32;

    /// Raw noise at `point`, approximately in `[-1, 1]`.
    fn perlin3(&self, point: DVec3) -> f64;

    /// Noise for one terrain octave: `perlin3((point + offset) / scale)`.
    ///
    /// Smaller `scale` gives higher-frequency detail. Callers skip layers
    /// with `scale <= 0`.
    fn evaluate(&self, point: DVec3, scale: f64, offset: f64) -> f64 {
        self.perlin3((point + DVec3::splat(offset)) / scale)
    }
}

/// Classic Perlin gradient noise from the `noise` crate.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    /// Create a noise source for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn seed(&self) -> u32 {
        self.perlin.seed()
    }

    fn perlin3(&self, point: DVec3) -> f64 {
        self.perlin.get(point.to_array())
    }
}

/// Resolve the session seed: the configured one, or fresh entropy.
pub fn session_seed(configured: Option<u32>) -> u32 {
    match configured {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u32>();
            debug!(seed, "No seed configured, drew one from entropy");
            seed
        }
    }
}
