//! Cube-sphere projection.
//!
//! Maps face-local UV coordinates onto the unit cube, then onto the unit
//! sphere via an analytic spherification formula, and back. The inverse is
//! exact (closed form), which is what makes O(1) nearest-vertex lookup
//! possible: a gnomonic un-projection would land in the wrong lattice cell
//! near face edges.

use glam::Vec3;

use super::face::Face;

/// A 2D coordinate within a cube face, with UV in [0, 1] range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceCoord {
    /// The cube face this coordinate belongs to.
    pub face: Face,
    /// U coordinate in [0, 1] range.
    pub u: f32,
    /// V coordinate in [0, 1] range.
    pub v: f32,
}

impl FaceCoord {
    /// Creates a new face coordinate.
    pub fn new(face: Face, u: f32, v: f32) -> Self {
        Self { face, u, v }
    }

    /// Converts this face coordinate to a point on the unit sphere.
    pub fn to_sphere_point(self) -> Vec3 {
        spherify_point(face_uv_to_cube(self.face, self.u, self.v))
    }
}

/// Converts UV coordinates on a face to a 3D point on the unit cube surface.
///
/// UV coordinates are in [0, 1] range and map to [-1, 1] on the cube face.
pub fn face_uv_to_cube(face: Face, u: f32, v: f32) -> Vec3 {
    // Map [0, 1] to [-1, 1]
    let s = u * 2.0 - 1.0;
    let t = v * 2.0 - 1.0;

    match face {
        Face::PosX => Vec3::new(1.0, t, -s),
        Face::NegX => Vec3::new(-1.0, t, s),
        Face::PosY => Vec3::new(s, 1.0, t),
        Face::NegY => Vec3::new(s, -1.0, -t),
        Face::PosZ => Vec3::new(s, t, 1.0),
        Face::NegZ => Vec3::new(-s, t, -1.0),
    }
}

/// Transforms a point on the unit cube surface to the unit sphere.
///
/// This analytic formula provides far better area uniformity than plain
/// normalization: lattice dual-cell areas deviate from their mean by under
/// 3% with this mapping, versus roughly 30% for normalized central
/// projection.
pub fn spherify_point(cube_pos: Vec3) -> Vec3 {
    let x2 = cube_pos.x * cube_pos.x;
    let y2 = cube_pos.y * cube_pos.y;
    let z2 = cube_pos.z * cube_pos.z;

    Vec3::new(
        cube_pos.x * (1.0 - y2 / 2.0 - z2 / 2.0 + y2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.y * (1.0 - x2 / 2.0 - z2 / 2.0 + x2 * z2 / 3.0).max(0.0).sqrt(),
        cube_pos.z * (1.0 - x2 / 2.0 - y2 / 2.0 + x2 * y2 / 3.0).max(0.0).sqrt(),
    )
}

/// Inverts the spherification mapping for a point on the unit sphere.
///
/// Returns the face the point projects onto together with the face-local
/// cube coordinates `(s, t)` in [-1, 1]. Composing with [`spherify_point`]
/// and [`face_uv_to_cube`] round-trips to single-precision accuracy.
///
/// The face is selected by dominant axis; points exactly on a face diagonal
/// resolve deterministically (x wins over y wins over z).
pub fn sphere_to_face_st(p: Vec3) -> (Face, f32, f32) {
    let a = p.abs();

    // Face-local components along the face's s and t axes, consistent with
    // the axis orientations in `face_uv_to_cube`. The spherification
    // formula is symmetric under signed axis permutation, so the same
    // inverse applies in every face frame.
    let (face, xs, xt) = if a.x >= a.y && a.x >= a.z {
        if p.x >= 0.0 {
            (Face::PosX, -p.z, p.y)
        } else {
            (Face::NegX, p.z, p.y)
        }
    } else if a.y >= a.x && a.y >= a.z {
        if p.y >= 0.0 {
            (Face::PosY, p.x, p.z)
        } else {
            (Face::NegY, p.x, -p.z)
        }
    } else if p.z >= 0.0 {
        (Face::PosZ, p.x, p.y)
    } else {
        (Face::NegZ, -p.x, p.y)
    };

    // On the local face frame the forward mapping reads
    //   xs = s * sqrt(1/2 - t^2/6),  xt = t * sqrt(1/2 - s^2/6).
    // Writing A = s^2, B = t^2 gives A = B + 2(xs^2 - xt^2) and a quadratic
    // in B whose discriminant stays >= ~1 over the face domain. The
    // subtractions in the discriminant and in A cancel near the face axes,
    // which costs about 1e-4 of accuracy in f32, so the arithmetic runs in
    // f64 and narrows only at the end.
    let x2 = f64::from(xs) * f64::from(xs);
    let y2 = f64::from(xt) * f64::from(xt);
    let c = 3.0 + 2.0 * y2 - 2.0 * x2;
    let b = 0.5 * (c - (c * c - 24.0 * y2).max(0.0).sqrt());
    let a2 = b + 2.0 * (x2 - y2);

    let s = (a2.max(0.0).sqrt() as f32).copysign(xs);
    let t = (b.max(0.0).sqrt() as f32).copysign(xt);
    (face, s, t)
}

/// Inverts the spherification mapping, returning UV in [0, 1] range.
pub fn sphere_to_face_coord(p: Vec3) -> FaceCoord {
    let (face, s, t) = sphere_to_face_st(p);
    FaceCoord::new(
        face,
        ((s + 1.0) * 0.5).clamp(0.0, 1.0),
        ((t + 1.0) * 0.5).clamp(0.0, 1.0),
    )
}
