//! Orbit camera: looks at the planet centre from a clamped distance.

use glam::{Mat4, Vec3};
use orbis_config::CameraConfig;
use tracing::warn;

/// Camera orbiting a fixed target along the +Z axis.
///
/// The planet turns under the camera; the camera itself only moves in and
/// out. Distance is always kept inside `[min_distance, max_distance]`.
#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at.
    pub target: Vec3,
    /// World up direction.
    pub up: Vec3,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    zoom_speed: f32,
    fov_y: f32,
    near: f32,
    far: f32,
}

impl OrbitCamera {
    /// Build from settings. A starting distance outside the limits is clamped.
    ///
    /// Settings rejected by [`CameraConfig::validate`] are replaced by the
    /// defaults, so a bad `config.ron` edit never leaves the camera unusable.
    pub fn from_config(config: &CameraConfig) -> Self {
        match config.validate() {
            Ok(()) => Self::from_valid(config),
            Err(e) => {
                warn!("Using default camera: {e}");
                Self::from_valid(&CameraConfig::default())
            }
        }
    }

    fn from_valid(config: &CameraConfig) -> Self {
        Self {
            target: Vec3::ZERO,
            up: Vec3::Y,
            distance: config
                .distance
                .clamp(config.min_distance, config.max_distance),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            zoom_speed: config.zoom_speed,
            fov_y: config.fov_degrees.to_radians(),
            near: config.near,
            far: config.far,
        }
    }

    /// Current distance from the target.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Allowed distance range.
    pub fn limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    /// Move in (negative) or out (positive) by `amount * zoom_speed`, clamped
    /// to the allowed range.
    pub fn apply_zoom(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.distance =
            (self.distance + amount * self.zoom_speed).clamp(self.min_distance, self.max_distance);
    }

    /// Eye position in world space.
    pub fn position(&self) -> Vec3 {
        self.target + Vec3::Z * self.distance
    }

    /// Right-handed view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, self.up)
    }

    /// Right-handed perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect, self.near, self.far)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
