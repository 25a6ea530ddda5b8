//! Lattice indexing: the bijection between dense vertex ids and face-local
//! coordinates, and between arrow offset ids and their 2D offset vectors.
//!
//! Vertices are stored face-major, row-major within a face:
//! `id = face * n² + y * n + x` for a per-face side of `n` vertices. All
//! functions here are pure arithmetic; seam crossing is handled in
//! [`super::seams`].

use glam::IVec2;

use crate::geometry::Face;

/// Number of neighbor directions per vertex (local +x, +y, -x, -y).
pub const ARROWS_PER_VERTEX: usize = 4;

/// A face-local lattice coordinate, with `x, y` in `[0, resolution)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeCoord {
    /// The cube face this vertex sits on.
    pub face: Face,
    /// Column within the face.
    pub x: u32,
    /// Row within the face.
    pub y: u32,
}

impl LatticeCoord {
    /// Creates a new lattice coordinate.
    pub fn new(face: Face, x: u32, y: u32) -> Self {
        Self { face, x, y }
    }
}

/// Converts a face-local coordinate to its dense vertex id.
pub fn vertex_id(resolution: u32, coord: LatticeCoord) -> usize {
    debug_assert!(coord.x < resolution && coord.y < resolution);
    let n = resolution as usize;
    coord.face.index() * n * n + coord.y as usize * n + coord.x as usize
}

/// Converts a dense vertex id back to its face-local coordinate.
///
/// Exact inverse of [`vertex_id`].
pub fn coord(resolution: u32, id: usize) -> LatticeCoord {
    let n = resolution as usize;
    debug_assert!(id < 6 * n * n);
    let face = Face::from_index(id / (n * n)).expect("vertex id out of range");
    let rem = id % (n * n);
    LatticeCoord::new(face, (rem % n) as u32, (rem / n) as u32)
}

/// Returns the 2D offset vector for an arrow offset id.
///
/// Offset ids 0..4 map to +x, +y, -x, -y in the face-local frame; the
/// mapping is independent of grid resolution and of the vertex the offset
/// is later applied to.
pub fn offset_vector(offset_id: usize) -> IVec2 {
    debug_assert!(offset_id < ARROWS_PER_VERTEX);
    const OFFSETS: [IVec2; ARROWS_PER_VERTEX] = [
        IVec2::new(1, 0),
        IVec2::new(0, 1),
        IVec2::new(-1, 0),
        IVec2::new(0, -1),
    ];
    OFFSETS[offset_id % ARROWS_PER_VERTEX]
}

/// Returns the arrow offset id for a 2D offset vector.
///
/// Exact inverse of [`offset_vector`] over the fixed neighbor set.
pub fn offset_id(offset: IVec2) -> usize {
    2 * usize::from(offset.x + offset.y < 0) + usize::from(offset.y.abs() > offset.x.abs())
}

/// Packs a (source vertex, offset) pair into a composite arrow id.
pub fn arrow_id(source_id: usize, offset_id: usize) -> usize {
    debug_assert!(offset_id < ARROWS_PER_VERTEX);
    source_id * ARROWS_PER_VERTEX + offset_id
}

/// Returns the source vertex id of a composite arrow id.
pub fn arrow_source_id(arrow_id: usize) -> usize {
    arrow_id / ARROWS_PER_VERTEX
}

/// Returns the offset id of a composite arrow id.
pub fn arrow_offset_id(arrow_id: usize) -> usize {
    arrow_id % ARROWS_PER_VERTEX
}
