//! Procedural terrain shape: seeded gradient noise and the layered elevation law.

mod noise_source;
mod shape;

pub use noise_source::{NoiseSource, PerlinNoise, session_seed};
pub use shape::ShapeProvider;
