//! Per-session render state: the planet, its orientation, the camera and the clock.

use std::sync::Arc;

use glam::{EulerRot, Mat4, Quat};
use orbis_config::{Config, PlanetConfig, SpinConfig};
use orbis_mesh::PrimitiveMode;
use orbis_terrain::NoiseSource;
use tracing::{info, warn};

use crate::PlanetError;
use crate::assembler::{PlanetAssembler, PlanetMeshes};
use crate::camera::OrbitCamera;
use crate::instance::MeshInstance;
use crate::uniforms::{FrameUniforms, InstanceUniforms};

/// Everything one frame needs to draw the planet.
///
/// Mutated only between frames: [`tick`](Self::tick) advances time and
/// spin, drag and zoom adjust orientation and camera, and a settings change
/// swaps the whole instance set.
pub struct RenderContext {
    assembler: PlanetAssembler,
    instances: Vec<MeshInstance>,
    planet: PlanetConfig,
    noise: Arc<dyn NoiseSource>,
    camera: OrbitCamera,
    spin: SpinConfig,
    drag_sensitivity: f32,
    elapsed: f32,
    delta: f32,
}

impl RenderContext {
    /// Build the initial planet.
    pub fn new(config: &Config, noise: Arc<dyn NoiseSource>) -> Result<Self, PlanetError> {
        config.camera.validate()?;
        let mut assembler = PlanetAssembler::new();
        let instances = assembler.regenerate(&config.planet, noise.as_ref(), None)?;
        Ok(Self {
            assembler,
            instances,
            planet: config.planet.clone(),
            noise,
            camera: OrbitCamera::from_config(&config.camera),
            spin: config.spin.clone(),
            drag_sensitivity: config.camera.drag_sensitivity,
            elapsed: 0.0,
            delta: 0.0,
        })
    }

    /// Rebuild synchronously for new planet settings, keeping the current
    /// orientation.
    ///
    /// On failure the previous planet stays in place and the error is
    /// returned.
    pub fn apply_settings(&mut self, planet: &PlanetConfig) -> Result<(), PlanetError> {
        let orientation = self.assembler.orientation();
        let instances = self
            .assembler
            .regenerate(planet, self.noise.as_ref(), Some(orientation))
            .inspect_err(|e| warn!("Regeneration failed, keeping previous planet: {e}"))?;
        self.instances = instances;
        self.planet = planet.clone();
        Ok(())
    }

    /// Swap in meshes built elsewhere, such as on the regeneration worker.
    pub fn adopt(&mut self, meshes: &PlanetMeshes, planet: PlanetConfig) {
        self.instances = self.assembler.instantiate(meshes);
        self.planet = planet;
        info!(
            vertices = meshes.vertex_count(),
            "Adopted regenerated planet"
        );
    }

    /// Replace camera and spin settings without touching the planet.
    pub fn apply_view_settings(&mut self, config: &Config) -> Result<(), PlanetError> {
        config.camera.validate()?;
        let distance = self.camera.distance();
        self.camera = OrbitCamera::from_config(&orbis_config::CameraConfig {
            distance,
            ..config.camera.clone()
        });
        self.spin = config.spin.clone();
        self.drag_sensitivity = config.camera.drag_sensitivity;
        Ok(())
    }

    /// Advance the clock by `dt` seconds and apply idle spin.
    pub fn tick(&mut self, dt: f32) {
        self.delta = dt;
        self.elapsed += dt;
        if self.spin.enabled {
            let [rx, ry, rz] = self.spin.rates;
            let step = Quat::from_euler(EulerRot::XYZ, rx * dt, ry * dt, rz * dt);
            self.assembler.rotate(step);
            self.assembler.sync(&mut self.instances);
        }
    }

    /// Rotate the planet by a pointer drag of `(dx, dy)` pixels.
    ///
    /// Horizontal motion turns about world Y, vertical about world X.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        let s = self.drag_sensitivity;
        let delta = Quat::from_rotation_y(dx * s) * Quat::from_rotation_x(dy * s);
        self.assembler.rotate(delta);
        self.assembler.sync(&mut self.instances);
    }

    /// Zoom the camera; see [`OrbitCamera::apply_zoom`].
    pub fn apply_zoom(&mut self, amount: f32) {
        self.camera.apply_zoom(amount);
    }

    /// Uniforms shared by every face this frame.
    pub fn frame_uniforms(&self, aspect: f32) -> FrameUniforms {
        FrameUniforms::new(
            self.camera.view_matrix(),
            self.camera.projection_matrix(aspect),
            self.camera.position(),
            self.elapsed,
            self.planet.water_level() as f32,
        )
    }

    /// Per-face matrices for the given view, in instance order.
    pub fn instance_uniforms(&self, view: &Mat4) -> Vec<InstanceUniforms> {
        self.instances
            .iter()
            .map(|i| InstanceUniforms::new(i.model_view_matrix(view), i.normal_matrix(view)))
            .collect()
    }

    /// How the renderer should draw the current meshes.
    pub fn primitive_mode(&self) -> PrimitiveMode {
        PrimitiveMode::from_wireframe(self.planet.wireframe)
    }

    /// Current face instances.
    pub fn instances(&self) -> &[MeshInstance] {
        &self.instances
    }

    /// Settings the current planet was built from.
    pub fn planet_config(&self) -> &PlanetConfig {
        &self.planet
    }

    /// Noise source used for every rebuild this session.
    pub fn noise(&self) -> &Arc<dyn NoiseSource> {
        &self.noise
    }

    /// Current planet orientation.
    pub fn orientation(&self) -> Quat {
        self.assembler.orientation()
    }

    /// The camera.
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Seconds accumulated by [`tick`](Self::tick).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Length of the last tick in seconds.
    pub fn delta(&self) -> f32 {
        self.delta
    }
}
