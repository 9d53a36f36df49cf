//! Canonical `wgpu` vertex buffer layouts for planet meshes.
//!
//! Meshes are uploaded as three non-interleaved streams plus a `u16` index
//! buffer, one buffer per attribute:
//!
//! | Slot | Location | Format    | Stream   |
//! |------|----------|-----------|----------|
//! | 0    | 0        | Float32x3 | position |
//! | 1    | 1        | Float32x4 | colour   |
//! | 2    | 2        | Float32x3 | normal   |

use std::mem;

use wgpu::{IndexFormat, VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

const POSITION_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 0,
}];

const COLOR_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x4,
    offset: 0,
    shader_location: 1,
}];

const NORMAL_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: 2,
}];

/// Layout of [`crate::Mesh::position_bytes`].
pub const POSITION_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<[f32; 3]>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &POSITION_ATTRIBUTES,
};

/// Layout of [`crate::Mesh::color_bytes`].
pub const COLOR_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<[f32; 4]>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &COLOR_ATTRIBUTES,
};

/// Layout of [`crate::Mesh::normal_bytes`].
pub const NORMAL_LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
    array_stride: mem::size_of::<[f32; 3]>() as u64,
    step_mode: VertexStepMode::Vertex,
    attributes: &NORMAL_ATTRIBUTES,
};

/// All three stream layouts in buffer-slot order.
pub const MESH_VERTEX_LAYOUTS: [VertexBufferLayout<'static>; 3] =
    [POSITION_LAYOUT, COLOR_LAYOUT, NORMAL_LAYOUT];

/// Index format of [`crate::Mesh::index_bytes`].
pub const INDEX_FORMAT: IndexFormat = IndexFormat::Uint16;

static_assertions::const_assert_eq!(mem::size_of::<[f32; 3]>(), 12);
static_assertions::const_assert_eq!(mem::size_of::<[f32; 4]>(), 16);
static_assertions::const_assert_eq!(mem::size_of::<u16>(), 2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_match_component_counts() {
        assert_eq!(POSITION_LAYOUT.array_stride, 12);
        assert_eq!(COLOR_LAYOUT.array_stride, 16);
        assert_eq!(NORMAL_LAYOUT.array_stride, 12);
    }

    #[test]
    fn test_shader_locations_are_unique_and_ordered() {
        let locations: Vec<u32> = MESH_VERTEX_LAYOUTS
            .iter()
            .map(|l| l.attributes[0].shader_location)
            .collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn test_attribute_formats_match_shader_expectations() {
        assert_eq!(POSITION_LAYOUT.attributes[0].format, VertexFormat::Float32x3);
        assert_eq!(COLOR_LAYOUT.attributes[0].format, VertexFormat::Float32x4);
        assert_eq!(NORMAL_LAYOUT.attributes[0].format, VertexFormat::Float32x3);
        assert_eq!(INDEX_FORMAT, IndexFormat::Uint16);
    }
}
