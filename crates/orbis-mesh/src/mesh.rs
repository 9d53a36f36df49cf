//! Immutable triangle mesh with separate position, colour, normal and index streams.

use std::borrow::Cow;

use crate::normals::calculate_normals;

/// Most vertices a mesh may hold while every index still fits in a `u16`.
pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

/// Errors raised while assembling a [`Mesh`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    /// More vertices than a `u16` index can address.
    #[error("mesh has {0} vertices, at most 65536 fit u16 indices")]
    TooManyVertices(usize),

    /// Colour stream length does not match the position stream.
    #[error("mesh has {positions} positions but {colors} colors")]
    AttributeMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of colours.
        colors: usize,
    },

    /// Index count is not a multiple of three.
    #[error("index count {0} is not a whole number of triangles")]
    PartialTriangle(usize),

    /// An index refers past the end of the vertex streams.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u16,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// How a renderer should interpret a mesh's indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PrimitiveMode {
    /// Filled triangles from [`Mesh::indices`].
    #[default]
    Triangles,
    /// Triangle edges as a line list from [`Mesh::line_indices`].
    Lines,
}

impl PrimitiveMode {
    /// Pick the mode for a wireframe toggle.
    pub fn from_wireframe(wireframe: bool) -> Self {
        if wireframe { Self::Lines } else { Self::Triangles }
    }

    /// Matching `wgpu` primitive topology.
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Triangles => wgpu::PrimitiveTopology::TriangleList,
            Self::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// A triangle mesh ready to hand to a renderer.
///
/// Normals are always derived from positions and indices at construction and
/// the mesh cannot be modified afterwards; a changed planet is rebuilt from
/// scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u16>,
    fallback_normals: usize,
}

impl Mesh {
    /// Validate the streams and derive smooth normals.
    pub fn new(
        positions: Vec<[f32; 3]>,
        colors: Vec<[f32; 4]>,
        indices: Vec<u16>,
    ) -> Result<Self, MeshError> {
        if positions.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices(positions.len()));
        }
        if colors.len() != positions.len() {
            return Err(MeshError::AttributeMismatch {
                positions: positions.len(),
                colors: colors.len(),
            });
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| usize::from(i) >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count: positions.len(),
            });
        }

        let normal_set = calculate_normals(&positions, &indices);

        Ok(Self {
            positions,
            colors,
            normals: normal_set.normals,
            indices,
            fallback_normals: normal_set.fallback_count,
        })
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex RGBA colours.
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Per-vertex unit normals.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Triangle list indices.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices whose normal fell back to the radial direction.
    pub fn fallback_normal_count(&self) -> usize {
        self.fallback_normals
    }

    /// Positions as a flat `x, y, z, x, y, z, ...` slice.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colours as a flat `r, g, b, a, ...` slice.
    pub fn colors_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Normals as a flat `x, y, z, ...` slice.
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Position stream as bytes for GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Colour stream as bytes for GPU upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Normal stream as bytes for GPU upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Index stream as bytes for GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Each triangle's three edges as a line list.
    ///
    /// Edges shared by two triangles appear twice.
    pub fn line_indices(&self) -> Vec<u16> {
        self.indices
            .chunks_exact(3)
            .flat_map(|t| [t[0], t[1], t[1], t[2], t[2], t[0]])
            .collect()
    }

    /// Indices to draw for the given primitive mode.
    pub fn indices_for(&self, mode: PrimitiveMode) -> Cow<'_, [u16]> {
        match mode {
            PrimitiveMode::Triangles => Cow::Borrowed(&self.indices),
            PrimitiveMode::Lines => Cow::Owned(self.line_indices()),
        }
    }
}
