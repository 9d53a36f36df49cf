//! Renderer-agnostic triangle meshes: attribute streams, smooth normal derivation, and GPU layouts.

pub mod mesh;
pub mod normals;
pub mod vertex_format;

pub use mesh::{MAX_VERTICES, Mesh, MeshError, PrimitiveMode};
pub use normals::{NormalSet, calculate_normals};
pub use vertex_format::{
    COLOR_LAYOUT, INDEX_FORMAT, MESH_VERTEX_LAYOUTS, NORMAL_LAYOUT, POSITION_LAYOUT,
};
