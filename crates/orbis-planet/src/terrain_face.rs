//! One cube face of terrain: a curved grid displaced onto the planet surface.

use glam::DVec3;
use orbis_config::{MAX_RESOLUTION, MIN_RESOLUTION, Rgba};
use orbis_cubesphere::{CubeFace, FaceCoord, ProjectionMethod, project};
use orbis_mesh::Mesh;
use orbis_terrain::{NoiseSource, ShapeProvider};

use crate::PlanetError;

/// Colours used when face debugging is on, indexed by [`CubeFace::index`]:
/// white, red, green, blue, yellow, purple.
pub const DEBUG_FACE_COLORS: [Rgba; 6] = [
    [1.0, 1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 1.0],
    [1.0, 0.0, 1.0, 1.0],
];

/// Vertex colour for a face: its debug colour, or the shared base colour.
pub fn face_color(face: CubeFace, base: Rgba, debug_faces: bool) -> Rgba {
    if debug_faces {
        DEBUG_FACE_COLORS[face.index()]
    } else {
        base
    }
}

/// Everything that turns a cube-surface point into a planet-surface point.
#[derive(Clone, Copy)]
pub struct Surface<'a> {
    /// Elevation law.
    pub shape: &'a ShapeProvider,
    /// Noise sampled by the elevation law.
    pub noise: &'a dyn NoiseSource,
    /// Base sphere radius.
    pub radius: f64,
    /// Blend from cube (0.0) to sphere (1.0).
    pub spherity: f64,
    /// Cube-to-sphere mapping.
    pub projection: ProjectionMethod,
}

impl Surface<'_> {
    /// Map a point on the `[-1, 1]` cube to the displaced planet surface.
    ///
    /// Elevation is always sampled on the unit sphere, so it does not depend
    /// on spherity.
    pub fn point_on_planet(&self, point_on_unit_cube: DVec3) -> DVec3 {
        let point_on_unit_sphere = project(point_on_unit_cube, self.projection);
        let elevation = self
            .shape
            .compute_displacement(self.noise, point_on_unit_sphere);

        let direction = if self.spherity >= 1.0 {
            point_on_unit_sphere
        } else {
            point_on_unit_cube.lerp(point_on_unit_sphere, self.spherity)
        };
        direction * (self.radius + elevation)
    }
}

/// A `resolution × resolution` grid covering one cube face.
///
/// Column `x` runs along `axis_a` and row `y` along `axis_b`; vertex `(x, y)`
/// is stored at index `x + y * resolution`.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainFace {
    face: CubeFace,
    resolution: u32,
    local_up: DVec3,
    axis_a: DVec3,
    axis_b: DVec3,
}

impl TerrainFace {
    /// Create the grid for `face`.
    ///
    /// Fails when `resolution` is below 2 or its vertex indices would not fit
    /// in a `u16`.
    pub fn new(face: CubeFace, resolution: u32) -> Result<Self, PlanetError> {
        if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
            return Err(PlanetError::InvalidResolution(resolution));
        }
        Ok(Self {
            face,
            resolution,
            local_up: face.local_up(),
            axis_a: face.axis_a(),
            axis_b: face.axis_b(),
        })
    }

    /// Which cube face this grid covers.
    pub fn face(&self) -> CubeFace {
        self.face
    }

    /// Samples per edge.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Grid sample `(x, y)` on the surface of the `[-1, 1]` cube.
    pub fn point_on_unit_cube(&self, x: u32, y: u32) -> DVec3 {
        let (displ_x, displ_y) =
            FaceCoord::from_grid(self.face, x, y, self.resolution).displacement();
        self.local_up + displ_x * self.axis_a + displ_y * self.axis_b
    }

    /// Build the displaced mesh for this face.
    ///
    /// Each grid cell is split along its `(x, y)`–`(x + 1, y + 1)` diagonal into
    /// two outward-facing triangles.
    pub fn construct_mesh(&self, surface: &Surface<'_>, color: Rgba) -> Result<Mesh, PlanetError> {
        let res = self.resolution;
        let vertex_count = (res * res) as usize;
        let cell_count = ((res - 1) * (res - 1)) as usize;

        let mut positions = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(cell_count * 6);
        let row = res as u16;

        for y in 0..res {
            for x in 0..res {
                let point = surface.point_on_planet(self.point_on_unit_cube(x, y));
                positions.push(point.as_vec3().to_array());

                if x != res - 1 && y != res - 1 {
                    // res <= 256, so every index here is at most 65535.
                    let i = (x + y * res) as u16;
                    indices.extend_from_slice(&[
                        i,
                        i + row + 1,
                        i + row,
                        i,
                        i + 1,
                        i + row + 1,
                    ]);
                }
            }
        }

        let colors = vec![color; vertex_count];
        Ok(Mesh::new(positions, colors, indices)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orbis_config::NoiseLayerConfig;
    use orbis_cubesphere::face_coord_to_cube_point;
    use orbis_terrain::PerlinNoise;

    const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

    fn sphere_surface<'a>(shape: &'a ShapeProvider, noise: &'a PerlinNoise) -> Surface<'a> {
        Surface {
            shape,
            noise,
            radius: 1.0,
            spherity: 1.0,
            projection: ProjectionMethod::Normalize,
        }
    }

    #[test]
    fn test_rejects_out_of_range_resolution() {
        assert!(matches!(
            TerrainFace::new(CubeFace::PosY, 1),
            Err(PlanetError::InvalidResolution(1))
        ));
        assert!(matches!(
            TerrainFace::new(CubeFace::PosY, 257),
            Err(PlanetError::InvalidResolution(257))
        ));
        assert!(TerrainFace::new(CubeFace::PosY, 256).is_ok());
    }

    #[test]
    fn test_grid_matches_cubesphere_mapping() {
        let face = TerrainFace::new(CubeFace::NegX, 7).unwrap();
        for y in 0..7 {
            for x in 0..7 {
                let expected =
                    face_coord_to_cube_point(&FaceCoord::from_grid(CubeFace::NegX, x, y, 7));
                assert!((face.point_on_unit_cube(x, y) - expected).length() < 1e-12);
            }
        }
    }

    #[test]
    fn test_counts_for_resolution() {
        let shape = ShapeProvider::empty();
        let noise = PerlinNoise::new(0);
        let surface = sphere_surface(&shape, &noise);
        for res in [2, 3, 10] {
            let mesh = TerrainFace::new(CubeFace::PosZ, res)
                .unwrap()
                .construct_mesh(&surface, WHITE)
                .unwrap();
            assert_eq!(mesh.vertex_count(), (res * res) as usize);
            assert_eq!(mesh.triangle_count(), ((res - 1) * (res - 1) * 2) as usize);
        }
    }

    #[test]
    fn test_triangles_face_outward() {
        let shape = ShapeProvider::empty();
        let noise = PerlinNoise::new(0);
        let surface = sphere_surface(&shape, &noise);
        for face in CubeFace::ALL {
            let mesh = TerrainFace::new(face, 6)
                .unwrap()
                .construct_mesh(&surface, WHITE)
                .unwrap();
            let p = mesh.positions();
            for tri in mesh.indices().chunks_exact(3) {
                let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(p[tri[k] as usize]));
                let normal = (b - a).cross(c - a);
                let centroid = (a + b + c) / 3.0;
                assert!(
                    normal.dot(centroid) > 0.0,
                    "inward-facing triangle {tri:?} on {face:?}"
                );
            }
        }
    }

    #[test]
    fn test_vertex_normals_point_outward() {
        let shape = ShapeProvider::new(vec![NoiseLayerConfig::new(0.5, 0.2)], 0.1);
        let noise = PerlinNoise::new(11);
        let surface = sphere_surface(&shape, &noise);
        let mesh = TerrainFace::new(CubeFace::NegY, 12)
            .unwrap()
            .construct_mesh(&surface, WHITE)
            .unwrap();
        for (n, p) in mesh.normals().iter().zip(mesh.positions()) {
            assert!(Vec3::from(*n).dot(Vec3::from(*p)) > 0.0);
        }
    }

    #[test]
    fn test_spherity_zero_keeps_cube() {
        let shape = ShapeProvider::empty();
        let noise = PerlinNoise::new(0);
        let surface = Surface {
            spherity: 0.0,
            ..sphere_surface(&shape, &noise)
        };
        let mesh = TerrainFace::new(CubeFace::PosX, 5)
            .unwrap()
            .construct_mesh(&surface, WHITE)
            .unwrap();
        for p in mesh.positions() {
            assert!((p[0] - 1.0).abs() < 1e-6, "{p:?} left the +X cube face");
        }
    }

    #[test]
    fn test_elevation_raises_vertices() {
        let shape = ShapeProvider::new(vec![NoiseLayerConfig::new(0.3, 2.0)], 0.0);
        let noise = PerlinNoise::new(5);
        let surface = sphere_surface(&shape, &noise);
        let mesh = TerrainFace::new(CubeFace::PosY, 16)
            .unwrap()
            .construct_mesh(&surface, WHITE)
            .unwrap();
        let lengths: Vec<f32> = mesh
            .positions()
            .iter()
            .map(|p| Vec3::from(*p).length())
            .collect();
        assert!(lengths.iter().all(|&l| l >= 1.0 - 1e-6));
        assert!(lengths.iter().any(|&l| l > 1.01), "no terrain above sea level");
    }

    #[test]
    fn test_face_color_modes() {
        assert_eq!(face_color(CubeFace::NegY, WHITE, true), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(face_color(CubeFace::PosZ, WHITE, true), [1.0, 0.0, 1.0, 1.0]);
        let base = [0.2, 0.3, 0.4, 1.0];
        for face in CubeFace::ALL {
            assert_eq!(face_color(face, base, false), base);
        }
    }

    #[test]
    fn test_mesh_is_uniformly_coloured() {
        let shape = ShapeProvider::new(vec![NoiseLayerConfig::new(0.2, 0.5)], 0.1);
        let noise = PerlinNoise::new(1);
        let surface = sphere_surface(&shape, &noise);
        let color = [0.1, 0.5, 0.9, 1.0];
        let mesh = TerrainFace::new(CubeFace::NegZ, 8)
            .unwrap()
            .construct_mesh(&surface, color)
            .unwrap();
        assert!(mesh.colors().iter().all(|c| *c == color));
    }
}
