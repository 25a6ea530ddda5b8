//! Quad-sphere geometry: cube faces and the cube-to-sphere projection.
//!
//! Everything here is lattice-independent; the discrete structure built on
//! top of it lives in [`crate::grid`].

mod face;
mod projection;

pub use face::Face;
pub use projection::{
    face_uv_to_cube, sphere_to_face_coord, sphere_to_face_st, spherify_point, FaceCoord,
};
