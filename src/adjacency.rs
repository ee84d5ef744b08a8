//! Face-adjacency geometry for the six-face cube.
//!
//! Every face carries a [0,1]×[0,1] UV chart (u right, v up). For each of the
//! four cardinal edges of each face there is exactly one neighboring face and
//! one affine map that extends the face's UV plane across the shared seam:
//! `(u', v') = (a·u + b·v + c, d·u + e·v + f)`. The 24 entries are the rigid
//! unfolds of the box UV unwrap, so a point on a shared seam has the same
//! physical position in both charts and the linear part of every entry is
//! orthogonal.

use kurbo::Affine;

pub const FACE_COUNT: usize = 6;

/// One of the six cube faces, in the fixed order +X, −X, +Y, −Y, +Z, −Z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Face {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::PosX,
        Face::NegX,
        Face::PosY,
        Face::NegY,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Face index in the fixed +X,−X,+Y,−Y,+Z,−Z order.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Face for an index in 0..6, `None` outside that range.
    pub fn from_index(index: usize) -> Option<Face> {
        Face::ALL.get(index).copied()
    }
}

/// Direction in which a stamp footprint leaves a face's UV chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeDir {
    /// u < 0
    Left = 0,
    /// u > 1
    Right = 1,
    /// v > 1
    Top = 2,
    /// v < 0
    Bottom = 3,
}

impl EdgeDir {
    pub const ALL: [EdgeDir; 4] = [EdgeDir::Left, EdgeDir::Right, EdgeDir::Top, EdgeDir::Bottom];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Neighbor face plus the UV-space affine across one shared edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeTransform {
    pub neighbor: Face,
    /// `[a, b, c, d, e, f]` with `u' = a·u + b·v + c`, `v' = d·u + e·v + f`.
    pub coeffs: [f64; 6],
}

impl EdgeTransform {
    /// Apply the UV affine.
    pub fn map_uv(&self, u: f64, v: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.coeffs;
        (a * u + b * v + c, d * u + e * v + f)
    }

    /// The equivalent pixel-space affine for a v-flipped raster of `size`.
    ///
    /// Pixel coordinates are `x = u·S`, `y = (1 − v)·S` (raster rows run
    /// opposite to UV's vertical axis). Conjugating the UV affine by that
    /// mapping on both sides gives
    /// `x' = a·x − b·y + S(b + c)`, `y' = −d·x + e·y + S(1 − e − f)`.
    pub fn pixel_affine(&self, size: u32) -> Affine {
        let [a, b, c, d, e, f] = self.coeffs;
        let s = f64::from(size);
        Affine::new([a, -d, -b, e, s * (b + c), s * (1.0 - e - f)])
    }
}

const fn edge(neighbor: Face, coeffs: [f64; 6]) -> EdgeTransform {
    EdgeTransform { neighbor, coeffs }
}

/// The full 6×4 table, indexed `[face][edge]` with edges in L, R, T, B order.
static TABLE: [[EdgeTransform; 4]; FACE_COUNT] = [
    // +X
    [
        edge(Face::PosZ, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
        edge(Face::NegZ, [1.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosY, [0.0, -1.0, 2.0, 1.0, 0.0, 0.0]),
        edge(Face::NegY, [0.0, 1.0, 1.0, -1.0, 0.0, 1.0]),
    ],
    // -X
    [
        edge(Face::NegZ, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosZ, [1.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosY, [0.0, 1.0, -1.0, -1.0, 0.0, 1.0]),
        edge(Face::NegY, [0.0, -1.0, 0.0, 1.0, 0.0, 0.0]),
    ],
    // +Y
    [
        edge(Face::NegX, [0.0, -1.0, 1.0, 1.0, 0.0, 1.0]),
        edge(Face::PosX, [0.0, 1.0, 0.0, -1.0, 0.0, 2.0]),
        edge(Face::NegZ, [-1.0, 0.0, 1.0, 0.0, -1.0, 2.0]),
        edge(Face::PosZ, [1.0, 0.0, 0.0, 0.0, 1.0, 1.0]),
    ],
    // -Y
    [
        edge(Face::NegX, [0.0, 1.0, 0.0, -1.0, 0.0, 0.0]),
        edge(Face::PosX, [0.0, -1.0, 1.0, 1.0, 0.0, -1.0]),
        edge(Face::PosZ, [1.0, 0.0, 0.0, 0.0, 1.0, -1.0]),
        edge(Face::NegZ, [-1.0, 0.0, 1.0, 0.0, -1.0, 0.0]),
    ],
    // +Z
    [
        edge(Face::NegX, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosX, [1.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosY, [1.0, 0.0, 0.0, 0.0, 1.0, -1.0]),
        edge(Face::NegY, [1.0, 0.0, 0.0, 0.0, 1.0, 1.0]),
    ],
    // -Z
    [
        edge(Face::PosX, [1.0, 0.0, 1.0, 0.0, 1.0, 0.0]),
        edge(Face::NegX, [1.0, 0.0, -1.0, 0.0, 1.0, 0.0]),
        edge(Face::PosY, [-1.0, 0.0, 1.0, 0.0, -1.0, 2.0]),
        edge(Face::NegY, [-1.0, 0.0, 1.0, 0.0, -1.0, 0.0]),
    ],
];

/// Immutable lookup over the 24 (face, edge) adjacency entries.
///
/// Total and pure; fixed for the process lifetime.
#[derive(Clone, Copy, Debug, Default)]
pub struct FaceAdjacencyModel;

impl FaceAdjacencyModel {
    pub fn new() -> Self {
        Self
    }

    pub fn lookup(&self, face: Face, edge: EdgeDir) -> &'static EdgeTransform {
        &TABLE[face.index()][edge.index()]
    }
}
