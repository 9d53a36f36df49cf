//! The six faces of a cubesphere and their basis vectors.

use glam::DVec3;

/// The six faces of the cube that forms the cubesphere.
///
/// Each variant corresponds to a face whose outward normal ("local up")
/// points along the named axis direction. Variants are declared in the order
/// the planet is assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CubeFace {
    /// +Y face
    PosY = 0,
    /// −Y face
    NegY = 1,
    /// −X face
    NegX = 2,
    /// +X face
    PosX = 3,
    /// −Z face
    NegZ = 4,
    /// +Z face
    PosZ = 5,
}

impl CubeFace {
    /// All six faces in assembly order.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::NegX,
        CubeFace::PosX,
        CubeFace::NegZ,
        CubeFace::PosZ,
    ];

    /// Position of this face in [`CubeFace::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Outward-pointing unit normal for this face.
    #[must_use]
    pub fn local_up(self) -> DVec3 {
        match self {
            CubeFace::PosX => DVec3::X,
            CubeFace::NegX => DVec3::NEG_X,
            CubeFace::PosY => DVec3::Y,
            CubeFace::NegY => DVec3::NEG_Y,
            CubeFace::PosZ => DVec3::Z,
            CubeFace::NegZ => DVec3::NEG_Z,
        }
    }

    /// First in-plane axis: local up with its components rotated `(y, z, x)`.
    ///
    /// Grid column index increases along this axis.
    #[must_use]
    pub fn axis_a(self) -> DVec3 {
        let up = self.local_up();
        DVec3::new(up.y, up.z, up.x)
    }

    /// Second in-plane axis: `local_up × axis_a`.
    ///
    /// Grid row index increases along this axis. `axis_a × axis_b` equals
    /// local up, so quads wound `(i, i + res + 1, i + res)` face outward.
    #[must_use]
    pub fn axis_b(self) -> DVec3 {
        self.local_up().cross(self.axis_a())
    }
}
