//! Smooth per-vertex normals from triangle geometry.

use glam::Vec3;
use tracing::warn;

/// Output of [`calculate_normals`].
#[derive(Clone, Debug, PartialEq)]
pub struct NormalSet {
    /// One unit normal per vertex.
    pub normals: Vec<[f32; 3]>,
    /// Vertices whose accumulated normal had zero length and fell back to
    /// the radial direction.
    pub fallback_count: usize,
}

/// Compute area-weighted smooth normals.
///
/// Every triangle adds its unnormalized cross product `(v1 - v0) × (v2 - v0)`
/// to each of its three vertices, so larger triangles pull harder. The sums
/// are normalized at the end. A vertex with a zero-length sum (no incident
/// triangles, or only degenerate ones) gets the direction from the origin to
/// the vertex instead, or `+Y` if the vertex sits at the origin.
///
/// `indices` must hold whole triangles and stay below `positions.len()`;
/// [`crate::Mesh::new`] checks both before calling this.
pub fn calculate_normals(positions: &[[f32; 3]], indices: &[u16]) -> NormalSet {
    let mut accum = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let v0 = Vec3::from(positions[i0]);
        let v1 = Vec3::from(positions[i1]);
        let v2 = Vec3::from(positions[i2]);

        let face_normal = (v1 - v0).cross(v2 - v0);

        accum[i0] += face_normal;
        accum[i1] += face_normal;
        accum[i2] += face_normal;
    }

    let mut fallback_count = 0;
    let normals = accum
        .iter()
        .zip(positions)
        .map(|(sum, position)| {
            let n = sum.try_normalize().unwrap_or_else(|| {
                fallback_count += 1;
                Vec3::from(*position).try_normalize().unwrap_or(Vec3::Y)
            });
            n.to_array()
        })
        .collect();

    if fallback_count > 0 {
        warn!(
            fallback_count,
            vertex_count = positions.len(),
            "Degenerate vertex normals replaced with radial direction"
        );
    }

    NormalSet {
        normals,
        fallback_count,
    }
}
