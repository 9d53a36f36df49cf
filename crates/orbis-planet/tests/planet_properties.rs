//! End-to-end properties of planet generation.

use std::sync::Arc;

use glam::{DVec3, Vec3};
use orbis_config::{CameraConfig, Config, NoiseLayerConfig, PlanetConfig};
use orbis_cubesphere::CubeFace;
use orbis_planet::{OrbitCamera, PlanetAssembler, PlanetMeshes, RenderContext, Surface, TerrainFace};
use orbis_terrain::{NoiseSource, PerlinNoise, ShapeProvider};

fn bare_planet(resolution: u32) -> PlanetConfig {
    PlanetConfig {
        radius: 1.0,
        resolution,
        noise_layers: Vec::new(),
        ..Default::default()
    }
}

fn fibonacci_sphere(n: usize) -> impl Iterator<Item = DVec3> {
    let golden = std::f64::consts::PI * (3.0 - 5f64.sqrt());
    (0..n).map(move |i| {
        let y = 1.0 - 2.0 * (i as f64 + 0.5) / n as f64;
        let r = (1.0 - y * y).sqrt();
        let theta = golden * i as f64;
        DVec3::new(r * theta.cos(), y, r * theta.sin())
    })
}

#[test]
fn displacement_is_never_negative() {
    let configs = [
        vec![NoiseLayerConfig::new(0.1, 0.1), NoiseLayerConfig::new(0.5, 0.5)],
        vec![NoiseLayerConfig::new(0.05, 3.0)],
        vec![NoiseLayerConfig {
            scale: 0.7,
            intensity: -1.5,
            offset: 12.0,
            ..Default::default()
        }],
    ];
    for (seed, layers) in configs.into_iter().enumerate() {
        let noise = PerlinNoise::new(seed as u32);
        let shape = ShapeProvider::new(layers, 0.1);
        for p in fibonacci_sphere(4000) {
            assert!(shape.compute_displacement(&noise, p) >= 0.0);
        }
    }
}

#[test]
fn grid_corners_land_on_cube_corners() {
    let expected = 1.0 / 3f64.sqrt();
    for res in [2, 5, 50] {
        for face in CubeFace::ALL {
            let grid = TerrainFace::new(face, res).unwrap();
            for (x, y) in [(0, 0), (res - 1, res - 1)] {
                let dir = grid.point_on_unit_cube(x, y).normalize();
                for c in dir.to_array() {
                    assert!(
                        (c.abs() - expected).abs() < 1e-12,
                        "{face:?} corner ({x}, {y}) is {dir:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn regeneration_is_idempotent() {
    let config = PlanetConfig {
        resolution: 20,
        seed: Some(99),
        ..Default::default()
    };
    let a = PlanetMeshes::build(&config, &PerlinNoise::new(99)).unwrap();
    let b = PlanetMeshes::build(&config, &PerlinNoise::new(99)).unwrap();
    for (fa, fb) in a.faces().iter().zip(b.faces()) {
        assert_eq!(fa.mesh.as_ref(), fb.mesh.as_ref());
    }
}

#[test]
fn bare_planet_is_a_perfect_sphere() {
    let meshes = PlanetMeshes::build(&bare_planet(16), &PerlinNoise::new(0)).unwrap();
    for face in meshes.faces() {
        for p in face.mesh.positions() {
            assert!((Vec3::from(*p).length() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn normals_are_unit_length() {
    let config = PlanetConfig {
        resolution: 24,
        ..Default::default()
    };
    let meshes = PlanetMeshes::build(&config, &PerlinNoise::new(17)).unwrap();
    for face in meshes.faces() {
        for n in face.mesh.normals() {
            let len = Vec3::from(*n).length();
            assert!((len - 1.0).abs() < 1e-5, "normal length {len}");
            assert!(n.iter().all(|c| c.is_finite()));
        }
    }
}

#[test]
fn indices_stay_within_u16_at_max_resolution() {
    let shape = ShapeProvider::empty();
    let noise = PerlinNoise::new(0);
    let surface = Surface {
        shape: &shape,
        noise: &noise,
        radius: 1.0,
        spherity: 1.0,
        projection: Default::default(),
    };
    for res in [2u32, 17, 256] {
        let mesh = TerrainFace::new(CubeFace::NegZ, res)
            .unwrap()
            .construct_mesh(&surface, [1.0; 4])
            .unwrap();
        let max = u32::from(*mesh.indices().iter().max().unwrap());
        assert!(max < res * res);
        assert!(max < 65536);
    }
}

#[test]
fn resolution_two_scenario() {
    let meshes = PlanetMeshes::build(&bare_planet(2), &PerlinNoise::new(0)).unwrap();
    assert_eq!(meshes.faces().len(), 6);
    assert_eq!(meshes.vertex_count(), 24);
    assert_eq!(meshes.triangle_count(), 12);
    for face in meshes.faces() {
        assert_eq!(face.mesh.vertex_count(), 4);
        assert_eq!(face.mesh.triangle_count(), 2);
        for p in face.mesh.positions() {
            assert!((Vec3::from(*p).length() - 1.0).abs() < 1e-6);
        }
    }
}

#[test]
fn fixed_seed_elevation_is_reproducible() {
    let layer = NoiseLayerConfig {
        scale: 1.0,
        intensity: 1.0,
        offset: 0.0,
        elevation_floor: 0.1,
    };
    let run = || {
        let noise: Arc<dyn NoiseSource> = Arc::new(PerlinNoise::new(31337));
        ShapeProvider::new(vec![layer], 0.1).compute_displacement(noise.as_ref(), DVec3::X)
    };
    assert_eq!(run().to_bits(), run().to_bits());
}

#[test]
fn zoom_clamps_to_max_distance() {
    let mut camera = OrbitCamera::from_config(&CameraConfig::default());
    for _ in 0..1000 {
        camera.apply_zoom(10_000.0);
        assert!(camera.distance() <= 10.0);
    }
    assert_eq!(camera.distance(), 10.0);
}

#[test]
fn orientation_survives_settings_change() {
    let mut config = Config::default();
    config.planet.resolution = 6;
    let mut ctx = RenderContext::new(&config, Arc::new(PerlinNoise::new(5))).unwrap();
    for _ in 0..30 {
        ctx.tick(1.0 / 60.0);
    }
    let before = ctx.orientation();

    let planet = PlanetConfig {
        radius: 2.0,
        ..ctx.planet_config().clone()
    };
    ctx.apply_settings(&planet).unwrap();
    assert!(ctx.orientation().abs_diff_eq(before, 1e-6));

    let mut assembler = PlanetAssembler::new();
    let reset = assembler.regenerate(&planet, ctx.noise().as_ref(), None).unwrap();
    assert!(reset.iter().all(|i| i.orientation == glam::Quat::IDENTITY));
}
