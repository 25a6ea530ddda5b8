//! The quad-sphere lattice grid.
//!
//! [`Grid`] is a small immutable value bundling the lattice indexer, the
//! seam-aware neighbor resolver, and the derived differential-geometry
//! quantities (positions, tangent frames, dual-cell areas, arrow metrics)
//! behind one query surface. All queries are pure, O(1), and allocation
//! free; per-vertex arrays are owned by consumers, never by the grid.

pub mod lattice;
pub mod seams;
pub mod series;

use std::f32::consts::PI;

use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{face_uv_to_cube, sphere_to_face_st, spherify_point, Face};
pub use lattice::{LatticeCoord, ARROWS_PER_VERTEX};
pub use series::{Series, VertexDualAreas, VertexFaces, VertexNormals, VertexPositions};

/// Errors arising from grid construction or trust-boundary id validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("radius must be positive and finite, got {0}")]
    InvalidRadius(f32),
    #[error("resolution must be at least 1 vertex per face side, got {0}")]
    InvalidResolution(u32),
    #[error("vertex id {id} out of range for grid with {count} vertices")]
    VertexIdOutOfRange { id: usize, count: usize },
    #[error("arrow offset id {id} out of range ({max} offsets per vertex)")]
    OffsetIdOutOfRange { id: usize, max: usize },
}

/// Serialized form of [`Grid`]; deserialization re-validates so that no
/// invalid grid value can be constructed through serde either.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct GridParams {
    radius: f32,
    resolution: u32,
}

/// An immutable spherical lattice: a cube wrapped onto a sphere, with
/// `resolution²` cell-centered vertices per face.
///
/// Cheap to copy (two scalars); every per-vertex quantity is computed on
/// demand. Any number of threads may query a shared `Grid` concurrently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "GridParams", into = "GridParams")]
pub struct Grid {
    radius: f32,
    resolution: u32,
}

impl TryFrom<GridParams> for Grid {
    type Error = GridError;

    fn try_from(params: GridParams) -> Result<Self, Self::Error> {
        Grid::new(params.radius, params.resolution)
    }
}

impl From<Grid> for GridParams {
    fn from(grid: Grid) -> Self {
        GridParams {
            radius: grid.radius,
            resolution: grid.resolution,
        }
    }
}

impl Grid {
    /// Creates a grid of the given sphere radius and per-face-side vertex
    /// count.
    ///
    /// Fails fast on `radius <= 0` (or non-finite) and `resolution < 1`;
    /// no grid value with invalid parameters can exist.
    pub fn new(radius: f32, resolution: u32) -> Result<Self, GridError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GridError::InvalidRadius(radius));
        }
        if resolution < 1 {
            return Err(GridError::InvalidResolution(resolution));
        }
        let grid = Self { radius, resolution };
        log::debug!(
            "grid: radius {} resolution {} -> {} vertices, {} arrows",
            radius,
            resolution,
            grid.vertex_count(),
            grid.arrow_count()
        );
        Ok(grid)
    }

    /// Sphere radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Vertices per face side.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Total number of lattice vertices (`6 * resolution²`).
    pub fn vertex_count(&self) -> usize {
        let n = self.resolution as usize;
        6 * n * n
    }

    /// Number of neighbor directions per vertex.
    pub fn arrows_per_vertex(&self) -> usize {
        ARROWS_PER_VERTEX
    }

    /// Total number of directed arrows.
    pub fn arrow_count(&self) -> usize {
        ARROWS_PER_VERTEX * self.vertex_count()
    }

    /// Surface area of the sphere.
    pub fn total_area(&self) -> f32 {
        4.0 * PI * self.radius * self.radius
    }

    /// Circumference of a great circle.
    pub fn total_circumference(&self) -> f32 {
        2.0 * PI * self.radius
    }

    /// Distance between neighboring vertices away from seams: the equator
    /// crosses four faces of `resolution` cells each.
    pub fn characteristic_edge_length(&self) -> f32 {
        self.total_circumference() / (4.0 * self.resolution as f32)
    }

    // ------------------------------------------------------------------
    // Trust-boundary validation: validate once at the boundary, then use
    // the unchecked fast path for iteration-produced ids, which the
    // queries `debug_assert!`.
    // ------------------------------------------------------------------

    /// Validates a vertex id coming from outside the crate's control
    /// (deserialized, user-supplied).
    pub fn check_vertex_id(&self, id: usize) -> Result<(), GridError> {
        if id < self.vertex_count() {
            Ok(())
        } else {
            Err(GridError::VertexIdOutOfRange {
                id,
                count: self.vertex_count(),
            })
        }
    }

    /// Validates an arrow offset id coming from outside the crate's
    /// control.
    pub fn check_offset_id(&self, offset_id: usize) -> Result<(), GridError> {
        if offset_id < ARROWS_PER_VERTEX {
            Ok(())
        } else {
            Err(GridError::OffsetIdOutOfRange {
                id: offset_id,
                max: ARROWS_PER_VERTEX,
            })
        }
    }

    // ------------------------------------------------------------------
    // Lattice indexing
    // ------------------------------------------------------------------

    /// Face-local coordinate of a vertex id.
    pub fn coord(&self, vertex_id: usize) -> LatticeCoord {
        lattice::coord(self.resolution, vertex_id)
    }

    /// Dense vertex id of a face-local coordinate.
    pub fn vertex_id(&self, coord: LatticeCoord) -> usize {
        lattice::vertex_id(self.resolution, coord)
    }

    /// Which face a vertex sits on.
    pub fn vertex_face(&self, vertex_id: usize) -> Face {
        self.coord(vertex_id).face
    }

    // ------------------------------------------------------------------
    // Neighbor resolution
    // ------------------------------------------------------------------

    /// Id of the neighbor in the given local direction, resolved across
    /// face seams.
    pub fn arrow_target_id(&self, source_id: usize, offset_id: usize) -> usize {
        debug_assert!(offset_id < ARROWS_PER_VERTEX);
        let target = seams::neighbor(
            self.resolution,
            self.coord(source_id),
            lattice::offset_vector(offset_id),
        );
        self.vertex_id(target)
    }

    /// Packs a (source, offset) pair into a composite arrow id.
    pub fn arrow_id(&self, source_id: usize, offset_id: usize) -> usize {
        lattice::arrow_id(source_id, offset_id)
    }

    /// Source vertex of a composite arrow id.
    pub fn arrow_source_id(&self, arrow_id: usize) -> usize {
        lattice::arrow_source_id(arrow_id)
    }

    /// Offset id of a composite arrow id.
    pub fn arrow_offset_id(&self, arrow_id: usize) -> usize {
        lattice::arrow_offset_id(arrow_id)
    }

    /// Id of a nearby vertex whose arrows are metrically regular, for use
    /// by stencil operators that would otherwise produce artifacts near
    /// seams. Identity for interior vertices; idempotent everywhere.
    pub fn vertex_representative(&self, vertex_id: usize) -> usize {
        self.vertex_id(seams::representative(self.resolution, self.coord(vertex_id)))
    }

    // ------------------------------------------------------------------
    // Vertex geometry
    // ------------------------------------------------------------------

    fn unit_position(&self, coord: LatticeCoord) -> Vec3 {
        let n = self.resolution as f32;
        let u = (coord.x as f32 + 0.5) / n;
        let v = (coord.y as f32 + 0.5) / n;
        spherify_point(face_uv_to_cube(coord.face, u, v))
    }

    /// Position of a vertex on the sphere surface.
    pub fn vertex_position(&self, vertex_id: usize) -> Vec3 {
        self.unit_position(self.coord(vertex_id)) * self.radius
    }

    /// Outward unit surface normal at a vertex.
    pub fn vertex_normal(&self, vertex_id: usize) -> Vec3 {
        self.unit_position(self.coord(vertex_id))
    }

    /// Local east direction: tangent, orthogonal to both the surface
    /// normal and the caller-supplied pole.
    ///
    /// When the normal is (anti)parallel to the pole the cross product
    /// degenerates; an alternate reference axis is substituted so the
    /// result is always a finite unit vector.
    pub fn vertex_east(&self, vertex_normal: Vec3, north_pole: Vec3) -> Vec3 {
        let east = vertex_normal.cross(north_pole);
        if east.length_squared() > 1e-12 {
            return east.normalize();
        }
        let fallback = if vertex_normal.x.abs() < 0.9 {
            Vec3::X
        } else {
            Vec3::Y
        };
        vertex_normal.cross(fallback).normalize()
    }

    /// Local north direction, orthogonal to both east and the normal.
    pub fn vertex_north(&self, vertex_east: Vec3, vertex_normal: Vec3) -> Vec3 {
        vertex_east.cross(vertex_normal).normalize()
    }

    /// Orthonormal local frame at a vertex, rows (east, north, up), with
    /// east/north disambiguated by the supplied pole. The cross ordering
    /// makes the basis left-handed (determinant -1).
    pub fn vertex_frame(&self, vertex_id: usize, north_pole: Vec3) -> Mat3 {
        let up = self.vertex_normal(vertex_id);
        let east = self.vertex_east(up, north_pole);
        let north = self.vertex_north(east, up);
        Mat3::from_cols(east, north, up).transpose()
    }

    /// Area of the dual cell surrounding a vertex.
    ///
    /// The dual cell is the quadrilateral through the re-projected
    /// midpoints between the vertex and its four neighbors; summed over
    /// all vertices these tile the sphere to within a percent at coarse
    /// resolutions.
    pub fn vertex_dual_area(&self, vertex_id: usize) -> f32 {
        let origin = self.vertex_position(vertex_id);
        let corner: [Vec3; 4] = std::array::from_fn(|o| self.dual_corner(vertex_id, o) - origin);

        0.5 * (corner[0].cross(corner[1]).length()
            + corner[1].cross(corner[2]).length()
            + corner[2].cross(corner[3]).length()
            + corner[3].cross(corner[0]).length())
    }

    /// Midpoint between the neighbors at `offset_id` and `offset_id + 1`,
    /// re-projected onto the sphere: one corner of the dual cell.
    fn dual_corner(&self, vertex_id: usize, offset_id: usize) -> Vec3 {
        let a = self.vertex_position(self.arrow_target_id(vertex_id, offset_id));
        let b = self.vertex_position(
            self.arrow_target_id(vertex_id, (offset_id + 1) % ARROWS_PER_VERTEX),
        );
        (a + b).normalize() * self.radius
    }

    // ------------------------------------------------------------------
    // Arrow metrics
    // ------------------------------------------------------------------

    /// Displacement vector from a vertex to its neighbor.
    pub fn arrow_offset(&self, source_id: usize, offset_id: usize) -> Vec3 {
        self.vertex_position(self.arrow_target_id(source_id, offset_id))
            - self.vertex_position(source_id)
    }

    /// Unit direction from a vertex to its neighbor.
    pub fn arrow_normal(&self, source_id: usize, offset_id: usize) -> Vec3 {
        self.arrow_offset(source_id, offset_id).normalize()
    }

    /// Distance from a vertex to its neighbor. Close to
    /// [`Self::characteristic_edge_length`] everywhere (within ±50%).
    pub fn arrow_length(&self, source_id: usize, offset_id: usize) -> f32 {
        self.arrow_offset(source_id, offset_id).length()
    }

    /// Length of the dual-cell boundary segment this arrow crosses: the
    /// flux weight for finite-volume operators.
    pub fn arrow_dual_length(&self, source_id: usize, offset_id: usize) -> f32 {
        debug_assert!(offset_id < ARROWS_PER_VERTEX);
        let before = self.dual_corner(source_id, (offset_id + ARROWS_PER_VERTEX - 1) % ARROWS_PER_VERTEX);
        let after = self.dual_corner(source_id, offset_id);
        (after - before).length()
    }

    // ------------------------------------------------------------------
    // Spatial query
    // ------------------------------------------------------------------

    /// Id of the lattice vertex nearest to an arbitrary 3D point.
    ///
    /// O(1): projects the point through the inverse of the cube-sphere
    /// mapping and rounds to the containing cell. Satisfies
    /// `nearest_vertex_id(vertex_position(v)) == v` for every vertex.
    /// A zero-length input deterministically falls back to the +X axis.
    pub fn nearest_vertex_id(&self, point: Vec3) -> usize {
        let direction = if point.length_squared() > 0.0 && point.is_finite() {
            point.normalize()
        } else {
            Vec3::X
        };
        let (face, s, t) = sphere_to_face_st(direction);

        let n = self.resolution;
        let x = (((s + 1.0) * 0.5 * n as f32) as i32).clamp(0, n as i32 - 1) as u32;
        let y = (((t + 1.0) * 0.5 * n as f32) as i32).clamp(0, n as i32 - 1) as u32;
        self.vertex_id(LatticeCoord::new(face, x, y))
    }

    // ------------------------------------------------------------------
    // Series adapters
    // ------------------------------------------------------------------

    /// Positions as a lazily evaluated indexable sequence.
    pub fn vertex_positions(&self) -> VertexPositions {
        VertexPositions::new(*self)
    }

    /// Normals as a lazily evaluated indexable sequence.
    pub fn vertex_normals(&self) -> VertexNormals {
        VertexNormals::new(*self)
    }

    /// Dual-cell areas as a lazily evaluated indexable sequence.
    pub fn vertex_dual_areas(&self) -> VertexDualAreas {
        VertexDualAreas::new(*self)
    }

    /// Faces as a lazily evaluated indexable sequence.
    pub fn vertex_faces(&self) -> VertexFaces {
        VertexFaces::new(*self)
    }
}
