//! Planet assembly for Orbis.
//!
//! Turns the six cube faces into displaced terrain meshes, places them as
//! instances that share one orientation, and keeps the per-session state a
//! renderer needs each frame: camera, clock, spin and uniforms. Rebuilds can
//! run inline or on a coalescing background worker.

mod assembler;
mod camera;
mod context;
mod error;
mod instance;
mod terrain_face;
mod uniforms;
mod worker;

pub use assembler::{FaceMesh, PlanetAssembler, PlanetMeshes};
pub use camera::OrbitCamera;
pub use context::RenderContext;
pub use error::PlanetError;
pub use instance::MeshInstance;
pub use terrain_face::{DEBUG_FACE_COLORS, Surface, TerrainFace, face_color};
pub use uniforms::{FrameUniforms, InstanceUniforms};
pub use worker::{RegenerationResult, RegenerationWorker};
