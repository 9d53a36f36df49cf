//! Cube-sphere geometry: the six face directions, their tangent axes and the
//! cube-to-sphere projection.

mod cube_face;
mod face_coord;
mod projection;

pub use cube_face::CubeFace;
pub use face_coord::FaceCoord;
pub use projection::{
    ProjectionMethod, cube_to_sphere_everitt, cube_to_sphere_normalized, face_coord_to_cube_point,
    project,
};
