//! Placement of a shared mesh in the world.

use std::sync::Arc;

use glam::{Mat3, Mat4, Quat, Vec3};
use orbis_cubesphere::CubeFace;
use orbis_mesh::Mesh;

/// A mesh drawn with a world transform.
///
/// The mesh is shared and never modified; only the transform changes from
/// frame to frame.
#[derive(Clone, Debug)]
pub struct MeshInstance {
    /// Which cube face the mesh was built from.
    pub face: CubeFace,
    /// Shared geometry.
    pub mesh: Arc<Mesh>,
    /// World-space translation.
    pub position: Vec3,
    /// World-space rotation.
    pub orientation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl MeshInstance {
    /// Place `mesh` at `position` with the given orientation and scale.
    pub fn new(
        face: CubeFace,
        mesh: Arc<Mesh>,
        position: Vec3,
        orientation: Quat,
        scale: Vec3,
    ) -> Self {
        Self {
            face,
            mesh,
            position,
            orientation,
            scale,
        }
    }

    /// Model matrix: translate, then rotate, then scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }

    /// Model-view matrix for the given view matrix.
    pub fn model_view_matrix(&self, view: &Mat4) -> Mat4 {
        *view * self.model_matrix()
    }

    /// Inverse-transpose of the upper 3×3 of the model-view matrix.
    ///
    /// Transforms normals correctly under non-uniform scale.
    pub fn normal_matrix(&self, view: &Mat4) -> Mat3 {
        Mat3::from_mat4(self.model_view_matrix(view))
            .inverse()
            .transpose()
    }
}
