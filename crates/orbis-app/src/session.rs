//! Frame loop, config hot-reload and background rebuild hand-off.

use std::path::PathBuf;
use std::sync::Arc;

use orbis_config::{CliArgs, Config};
use orbis_planet::{PlanetError, RegenerationWorker, RenderContext};
use orbis_terrain::NoiseSource;
use tracing::{debug, info, warn};

/// Fixed simulation step.
pub const FRAME_DT: f32 = 1.0 / 60.0;

/// Frames between checks of `config.ron`.
pub const RELOAD_INTERVAL: u32 = 60;

/// Aspect ratio of the virtual viewport.
const ASPECT: f32 = 16.0 / 9.0;

/// Counters reported when the session ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames simulated.
    pub frames: u64,
    /// Primitives submitted across all frames.
    pub primitives_drawn: u64,
    /// Rebuilds swapped into the scene.
    pub rebuilds_adopted: u32,
    /// Rebuilds that failed and left the old planet in place.
    pub rebuilds_failed: u32,
}

/// One run of the generator.
pub struct Session<'a> {
    context: RenderContext,
    worker: RegenerationWorker,
    config: Config,
    file_config: Config,
    config_dir: Option<PathBuf>,
    args: &'a CliArgs,
    stats: SessionStats,
}

impl<'a> Session<'a> {
    /// Wrap a built context and start the rebuild worker.
    pub fn new(
        context: RenderContext,
        noise: Arc<dyn NoiseSource>,
        config: Config,
        file_config: Config,
        config_dir: Option<PathBuf>,
        args: &'a CliArgs,
    ) -> Result<Self, PlanetError> {
        Ok(Self {
            context,
            worker: RegenerationWorker::new(noise)?,
            config,
            file_config,
            config_dir,
            args,
            stats: SessionStats::default(),
        })
    }

    /// Simulate `frames` frames.
    pub fn run(&mut self, frames: u32) {
        for frame in 0..frames {
            if frame > 0 && frame % RELOAD_INTERVAL == 0 {
                self.check_reload();
            }
            self.poll_worker();
            self.context.tick(FRAME_DT);
            self.draw();
        }
    }

    /// Re-read `config.ron` and queue a rebuild if the planet changed.
    pub fn check_reload(&mut self) {
        let Some(dir) = &self.config_dir else {
            return;
        };
        let reloaded = match self.file_config.reload(dir) {
            Ok(Some(reloaded)) => reloaded,
            Ok(None) => return,
            Err(e) => {
                warn!("Config reload failed, keeping current settings: {e}");
                return;
            }
        };
        self.file_config = reloaded.clone();

        let mut effective = reloaded;
        if let Err(e) = effective.apply_cli_overrides(self.args) {
            warn!("Ignoring CLI overrides on reload: {e}");
        }
        if effective.planet.seed != self.config.planet.seed {
            warn!("Seed changes take effect next session");
        }
        if effective.planet != self.config.planet {
            match self.worker.submit(effective.planet.clone()) {
                Ok(generation) => debug!(generation, "Queued planet rebuild"),
                Err(e) => warn!("Could not queue rebuild: {e}"),
            }
        }
        if let Err(e) = self.context.apply_view_settings(&effective) {
            warn!("Keeping current camera: {e}");
            effective.camera = self.config.camera.clone();
            effective.spin = self.config.spin.clone();
        }
        self.config = effective;
    }

    /// Adopt the newest finished rebuild, if any.
    pub fn poll_worker(&mut self) {
        let Some(result) = self.worker.poll() else {
            return;
        };
        match result.meshes {
            Ok(meshes) => {
                self.context.adopt(&meshes, result.config);
                self.stats.rebuilds_adopted += 1;
            }
            Err(e) => {
                warn!(
                    generation = result.generation,
                    "Rebuild failed, keeping previous planet: {e}"
                );
                self.stats.rebuilds_failed += 1;
            }
        }
    }

    /// Produce everything a renderer would consume for one frame.
    fn draw(&mut self) {
        let frame = self.context.frame_uniforms(ASPECT);
        let view = glam::Mat4::from_cols_array_2d(&frame.view);
        let instances = self.context.instance_uniforms(&view);
        let mode = self.context.primitive_mode();
        let per_primitive = match mode {
            orbis_mesh::PrimitiveMode::Triangles => 3,
            orbis_mesh::PrimitiveMode::Lines => 2,
        };
        let primitives: usize = self
            .context
            .instances()
            .iter()
            .map(|i| i.mesh.indices_for(mode).len() / per_primitive)
            .sum();
        debug_assert_eq!(instances.len(), self.context.instances().len());
        self.stats.frames += 1;
        self.stats.primitives_drawn += primitives as u64;
    }

    /// Block until the worker has no rebuild in flight, polling each millisecond.
    pub fn settle(&mut self, timeout: std::time::Duration) -> bool {
        let start = std::time::Instant::now();
        while self.worker.is_pending() {
            if start.elapsed() > timeout {
                return false;
            }
            self.poll_worker();
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        true
    }

    /// Log the session summary.
    pub fn report(&self) {
        let stats = self.stats();
        let context = self.context();
        info!(
            frames = stats.frames,
            primitives = stats.primitives_drawn,
            rebuilds = stats.rebuilds_adopted,
            failed = stats.rebuilds_failed,
            elapsed = context.elapsed(),
            orientation = ?context.orientation(),
            "Session finished"
        );
    }

    /// Counters so far.
    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// The render state.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }
}
