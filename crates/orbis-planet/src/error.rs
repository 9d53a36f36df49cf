//! Planet generation error types.

use orbis_config::ConfigError;
use orbis_mesh::MeshError;

/// Errors that end a regeneration pass.
///
/// A failed pass leaves the previously built planet untouched; the caller
/// decides whether to keep showing it or surface the error.
#[derive(Debug, thiserror::Error)]
pub enum PlanetError {
    /// Settings rejected at the configuration boundary.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A face produced an invalid mesh.
    #[error("failed to build face mesh: {0}")]
    Mesh(#[from] MeshError),

    /// Grid resolution outside `[2, 256]`.
    #[error("resolution {0} outside supported range [2, 256]")]
    InvalidResolution(u32),

    /// The background regeneration thread is gone.
    #[error("regeneration worker is not running")]
    WorkerStopped,
}
