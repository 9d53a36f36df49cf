//! 2D local coordinates on a cube face.

use crate::CubeFace;

/// A 2D coordinate on a cube face. `u` and `v` are in the range \[0, 1\].
///
/// `u` runs along [`CubeFace::axis_a`] and `v` along [`CubeFace::axis_b`].
/// `(0.5, 0.5)` is the face centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceCoord {
    /// Which cube face this coordinate lies on.
    pub face: CubeFace,
    /// Parameter along `axis_a` in \[0, 1\].
    pub u: f64,
    /// Parameter along `axis_b` in \[0, 1\].
    pub v: f64,
}

impl FaceCoord {
    /// Construct a `FaceCoord`, clamping `u` and `v` to \[0, 1\].
    #[must_use]
    pub fn new(face: CubeFace, u: f64, v: f64) -> Self {
        Self {
            face,
            u: u.clamp(0.0, 1.0),
            v: v.clamp(0.0, 1.0),
        }
    }

    /// Coordinate of grid sample `(x, y)` on a `resolution × resolution` grid.
    ///
    /// `resolution` must be at least 2 so that both edges are sampled.
    #[must_use]
    pub fn from_grid(face: CubeFace, x: u32, y: u32, resolution: u32) -> Self {
        debug_assert!(resolution >= 2, "resolution must be >= 2, got {resolution}");
        let last = f64::from(resolution - 1);
        Self::new(face, f64::from(x) / last, f64::from(y) / last)
    }

    /// `(u, v)` remapped from \[0, 1\] to \[-1, 1\].
    #[must_use]
    pub fn displacement(&self) -> (f64, f64) {
        ((self.u - 0.5) * 2.0, (self.v - 0.5) * 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_coord_clamping() {
        let fc = FaceCoord::new(CubeFace::PosX, -0.5, 1.5);
        assert_eq!(fc.u, 0.0);
        assert_eq!(fc.v, 1.0);
    }

    #[test]
    fn test_grid_corners() {
        let first = FaceCoord::from_grid(CubeFace::NegZ, 0, 0, 50);
        let last = FaceCoord::from_grid(CubeFace::NegZ, 49, 49, 50);
        assert_eq!((first.u, first.v), (0.0, 0.0));
        assert_eq!((last.u, last.v), (1.0, 1.0));
        assert_eq!(first.displacement(), (-1.0, -1.0));
        assert_eq!(last.displacement(), (1.0, 1.0));
    }

    #[test]
    fn test_grid_centre_of_odd_resolution() {
        let fc = FaceCoord::from_grid(CubeFace::PosY, 2, 2, 5);
        assert_eq!(fc.displacement(), (0.0, 0.0));
    }
}
