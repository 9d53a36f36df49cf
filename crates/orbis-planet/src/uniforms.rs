//! GPU-ready uniform blocks handed to the external shading stage.

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

/// Per-frame values shared by every face.
///
/// Layout follows std140: the trailing padding rounds the block to a
/// multiple of 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// World-to-view matrix, column-major.
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix, column-major.
    pub projection: [[f32; 4]; 4],
    /// Eye position in world space.
    pub camera_position: [f32; 3],
    /// Seconds since the session started.
    pub time: f32,
    /// Radius of the water surface.
    pub water_level: f32,
    pub _pad: [f32; 3],
}

impl FrameUniforms {
    /// Pack the per-frame values.
    pub fn new(
        view: Mat4,
        projection: Mat4,
        camera_position: glam::Vec3,
        time: f32,
        water_level: f32,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            time,
            water_level,
            _pad: [0.0; 3],
        }
    }
}

/// Per-instance matrices.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct InstanceUniforms {
    /// Model-view matrix, column-major.
    pub model_view: [[f32; 4]; 4],
    /// Normal matrix with each column padded to a vec4.
    pub normal: [[f32; 4]; 3],
}

impl InstanceUniforms {
    /// Pack a model-view and normal matrix.
    pub fn new(model_view: Mat4, normal: Mat3) -> Self {
        let pad = |c: glam::Vec3| [c.x, c.y, c.z, 0.0];
        Self {
            model_view: model_view.to_cols_array_2d(),
            normal: [pad(normal.x_axis), pad(normal.y_axis), pad(normal.z_axis)],
        }
    }
}

static_assertions::const_assert_eq!(std::mem::size_of::<FrameUniforms>(), 160);
static_assertions::const_assert_eq!(std::mem::size_of::<InstanceUniforms>(), 112);
