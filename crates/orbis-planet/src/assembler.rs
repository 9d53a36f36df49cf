//! Six-face planet assembly and orientation-preserving regeneration.
//!
//! Builds one [`TerrainFace`] per [`CubeFace`], turns each into a mesh, and
//! wraps the meshes in [`MeshInstance`]s that share a single orientation.

use std::sync::Arc;
use std::time::Instant;

use glam::{Quat, Vec3};
use orbis_config::PlanetConfig;
use orbis_cubesphere::CubeFace;
use orbis_mesh::Mesh;
use orbis_terrain::{NoiseSource, ShapeProvider};
use tracing::{info, warn};

use crate::PlanetError;
use crate::instance::MeshInstance;
use crate::terrain_face::{Surface, TerrainFace, face_color};

/// The mesh built for one cube face.
#[derive(Clone, Debug)]
pub struct FaceMesh {
    /// Which cube face.
    pub face: CubeFace,
    /// Immutable geometry, shared with every instance that draws it.
    pub mesh: Arc<Mesh>,
}

/// Geometry for a whole planet: six face meshes in [`CubeFace::ALL`] order.
#[derive(Clone, Debug)]
pub struct PlanetMeshes {
    faces: Vec<FaceMesh>,
}

impl PlanetMeshes {
    /// Build all six faces for the given settings.
    ///
    /// The settings are validated first; nothing is built if they are rejected.
    pub fn build(config: &PlanetConfig, noise: &dyn NoiseSource) -> Result<Self, PlanetError> {
        config.validate()?;

        let start = Instant::now();
        let shape = ShapeProvider::from_config(config);
        let surface = Surface {
            shape: &shape,
            noise,
            radius: config.radius,
            spherity: config.spherity,
            projection: config.projection,
        };

        let mut faces = Vec::with_capacity(CubeFace::ALL.len());
        for face in CubeFace::ALL {
            let terrain = TerrainFace::new(face, config.resolution)?;
            let color = face_color(face, config.color, config.debug_faces);
            let mesh = terrain.construct_mesh(&surface, color)?;
            faces.push(FaceMesh {
                face,
                mesh: Arc::new(mesh),
            });
        }

        let meshes = Self { faces };
        let fallbacks: usize = meshes
            .faces
            .iter()
            .map(|f| f.mesh.fallback_normal_count())
            .sum();
        if fallbacks > 0 {
            warn!(fallbacks, "Planet has vertices with fallback normals");
        }
        info!(
            resolution = config.resolution,
            vertices = meshes.vertex_count(),
            triangles = meshes.triangle_count(),
            max_elevation = shape.max_displacement(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Planet meshes built"
        );
        Ok(meshes)
    }

    /// Per-face meshes in assembly order.
    pub fn faces(&self) -> &[FaceMesh] {
        &self.faces
    }

    /// Total vertices across all faces.
    pub fn vertex_count(&self) -> usize {
        self.faces.iter().map(|f| f.mesh.vertex_count()).sum()
    }

    /// Total triangles across all faces.
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.mesh.triangle_count()).sum()
    }
}

/// Composes the six faces into placed instances and owns the planet's
/// current orientation.
///
/// The orientation lives here rather than on any instance, so it survives
/// a rebuild that throws every instance away.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetAssembler {
    orientation: Quat,
    position: Vec3,
    scale: Vec3,
}

impl PlanetAssembler {
    /// Assembler placing the planet at the origin with unit scale.
    pub fn new() -> Self {
        Self::with_transform(Vec3::ZERO, Vec3::ONE)
    }

    /// Assembler with a fixed offset and scale for every face instance.
    pub fn with_transform(position: Vec3, scale: Vec3) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            position,
            scale,
        }
    }

    /// Current orientation.
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Replace the orientation.
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
    }

    /// Apply a world-space rotation on top of the current orientation.
    pub fn rotate(&mut self, delta: Quat) {
        self.orientation = (delta * self.orientation).normalize();
    }

    /// Rebuild all six faces.
    ///
    /// `preserve_orientation` carries the previous orientation through the
    /// rebuild so the planet does not snap; `None` resets to identity. The
    /// assembler's orientation is only updated when the rebuild succeeds.
    pub fn regenerate(
        &mut self,
        config: &PlanetConfig,
        noise: &dyn NoiseSource,
        preserve_orientation: Option<Quat>,
    ) -> Result<Vec<MeshInstance>, PlanetError> {
        let meshes = PlanetMeshes::build(config, noise)?;
        self.orientation = preserve_orientation.unwrap_or(Quat::IDENTITY).normalize();
        Ok(self.instantiate(&meshes))
    }

    /// Wrap already-built meshes in instances at the current orientation.
    pub fn instantiate(&self, meshes: &PlanetMeshes) -> Vec<MeshInstance> {
        meshes
            .faces()
            .iter()
            .map(|f| {
                MeshInstance::new(
                    f.face,
                    Arc::clone(&f.mesh),
                    self.position,
                    self.orientation,
                    self.scale,
                )
            })
            .collect()
    }

    /// Copy the current orientation onto every instance.
    pub fn sync(&self, instances: &mut [MeshInstance]) {
        for instance in instances {
            instance.orientation = self.orientation;
        }
    }
}

impl Default for PlanetAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_terrain::PerlinNoise;

    fn small_config() -> PlanetConfig {
        PlanetConfig {
            resolution: 8,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_six_faces_built_in_order() {
        let meshes = PlanetMeshes::build(&small_config(), &PerlinNoise::new(1)).unwrap();
        assert_eq!(meshes.faces().len(), 6);
        for (i, f) in meshes.faces().iter().enumerate() {
            assert_eq!(f.face, CubeFace::ALL[i]);
        }
        assert_eq!(meshes.vertex_count(), 6 * 64);
        assert_eq!(meshes.triangle_count(), 6 * 49 * 2);
    }

    #[test]
    fn test_invalid_settings_build_nothing() {
        let config = PlanetConfig {
            resolution: 300,
            ..Default::default()
        };
        let err = PlanetMeshes::build(&config, &PerlinNoise::new(1)).unwrap_err();
        assert!(matches!(err, PlanetError::Config(_)));
    }

    #[test]
    fn test_runaway_layer_builds_nothing() {
        let config = PlanetConfig {
            resolution: 8,
            noise_layers: vec![orbis_config::NoiseLayerConfig {
                elevation_floor: 5.0,
                ..orbis_config::NoiseLayerConfig::new(0.5, 1.0e40)
            }],
            ..Default::default()
        };
        let err = PlanetMeshes::build(&config, &PerlinNoise::new(1)).unwrap_err();
        assert!(matches!(err, PlanetError::Config(_)));
    }

    #[test]
    fn test_regenerate_preserves_orientation() {
        let noise = PerlinNoise::new(3);
        let mut assembler = PlanetAssembler::new();
        let spun = Quat::from_rotation_y(1.2);
        let instances = assembler
            .regenerate(&small_config(), &noise, Some(spun))
            .unwrap();
        assert_eq!(instances.len(), 6);
        for inst in &instances {
            assert!(inst.orientation.abs_diff_eq(spun, 1e-6));
        }
        assert!(assembler.orientation().abs_diff_eq(spun, 1e-6));
    }

    #[test]
    fn test_regenerate_without_orientation_resets() {
        let noise = PerlinNoise::new(3);
        let mut assembler = PlanetAssembler::new();
        assembler.rotate(Quat::from_rotation_x(0.5));
        let instances = assembler.regenerate(&small_config(), &noise, None).unwrap();
        assert!(instances.iter().all(|i| i.orientation == Quat::IDENTITY));
    }

    #[test]
    fn test_failed_regenerate_keeps_orientation() {
        let noise = PerlinNoise::new(3);
        let mut assembler = PlanetAssembler::new();
        let q = Quat::from_rotation_z(0.7);
        assembler.set_orientation(q);
        let bad = PlanetConfig {
            radius: -1.0,
            ..Default::default()
        };
        assert!(assembler.regenerate(&bad, &noise, None).is_err());
        assert!(assembler.orientation().abs_diff_eq(q, 1e-6));
    }

    #[test]
    fn test_instances_use_fixed_transform() {
        let noise = PerlinNoise::new(3);
        let mut assembler =
            PlanetAssembler::with_transform(Vec3::new(0.0, 0.0, -4.0), Vec3::splat(1.5));
        for inst in assembler.regenerate(&small_config(), &noise, None).unwrap() {
            assert_eq!(inst.position, Vec3::new(0.0, 0.0, -4.0));
            assert_eq!(inst.scale, Vec3::splat(1.5));
        }
    }

    #[test]
    fn test_rotate_and_sync() {
        let noise = PerlinNoise::new(3);
        let mut assembler = PlanetAssembler::new();
        let mut instances = assembler.regenerate(&small_config(), &noise, None).unwrap();
        assembler.rotate(Quat::from_rotation_y(0.25));
        assembler.rotate(Quat::from_rotation_y(0.25));
        assembler.sync(&mut instances);
        let expected = Quat::from_rotation_y(0.5);
        for inst in &instances {
            assert!(inst.orientation.abs_diff_eq(expected, 1e-6));
        }
    }

    #[test]
    fn test_debug_faces_colour_each_face() {
        let config = PlanetConfig {
            debug_faces: true,
            ..small_config()
        };
        let meshes = PlanetMeshes::build(&config, &PerlinNoise::new(1)).unwrap();
        for f in meshes.faces() {
            let expected = crate::DEBUG_FACE_COLORS[f.face.index()];
            assert!(f.mesh.colors().iter().all(|c| *c == expected));
        }
    }
}
