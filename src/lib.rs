//! Quad-sphere lattice indexing and geometry.
//!
//! A sphere is modeled as a cube wrapped onto it: six square faces, each
//! carrying a `resolution × resolution` lattice of cell-centered
//! vertices. Vertices get dense ids in `0..6·resolution²`, neighbors are
//! addressed by four local directions that resolve across face seams,
//! and every geometric quantity a finite-volume scheme needs (positions,
//! tangent frames, dual-cell areas, edge and flux lengths) is computed
//! on demand in O(1) from an id.
//!
//! The entry point is [`Grid`]:
//!
//! ```
//! use quadsphere::{Grid, Series};
//!
//! let grid = Grid::new(6371.0, 32)?;
//! let v = grid.nearest_vertex_id(glam::Vec3::new(1.0, 2.0, 3.0));
//! let area = grid.vertex_dual_area(v);
//! assert!(area > 0.0);
//! let positions = grid.vertex_positions();
//! assert_eq!(positions.len(), grid.vertex_count());
//! # Ok::<(), quadsphere::GridError>(())
//! ```

pub mod geometry;
pub mod grid;

pub use geometry::{Face, FaceCoord};
pub use grid::{
    Grid, GridError, LatticeCoord, Series, VertexDualAreas, VertexFaces, VertexNormals,
    VertexPositions, ARROWS_PER_VERTEX,
};
