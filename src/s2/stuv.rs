// Copyright 2014 Google Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This file implements the coordinate transforms between the three flat
//! coordinate systems used by the cell decomposition and the sphere:
//!
//!   (id)      cell id          a 64-bit encoding of a face and a Hilbert
//!                              curve position on that face
//!   (face, i, j)               leaf-cell coordinates: integer coordinates
//!                              in [0, 2^30) of a leaf cell on a face
//!   (face, s, t)  cell space   coordinates in [0,1]² on one cube face;
//!                              directly proportional to (i,j)
//!   (face, si, ti)             discrete cell-space coordinates in
//!                              [0, 2^31]; cell centers and vertices at all
//!                              levels are representable exactly
//!   (face, u, v)  cube space   coordinates in [-1,1]² on the face of the
//!                              circumscribed cube, after applying the
//!                              nonlinear projection that makes cell areas
//!                              more uniform on the sphere
//!   (x, y, z)                  direction vector; points on the same ray
//!                              through the origin are equivalent
//!
//! Every consumer of cell identifiers must use the same s↔u transform: the
//! quadratic projection below is the canonical one, and the Hilbert
//! encoding is calibrated against it.

use crate::r3::vector::{Axis, Vector};
use crate::s2::point::Point;

/// The number of subdivision levels; leaf cells live at this level.
pub const MAX_LEVEL: u64 = 30;

/// The number of leaf cells spanning one edge of a face.
pub const MAX_SIZE: u64 = 1 << MAX_LEVEL;

/// The maximum value of an si- or ti-coordinate; (si, ti) values double the
/// (i, j) resolution so that cell centers at every level are representable.
pub const MAX_SITI: u64 = MAX_SIZE << 1;

/// Projection names the defined cell-space ↔ cube-space transforms. The
/// quadratic projection is canonical: the free functions `st_to_uv` and
/// `uv_to_st` are the quadratic transform and are what every consumer of
/// cell identifiers uses. The enum exists so that the trade-off is explicit
/// and measurable, not so that the projection can be swapped per call site.
///
/// - Linear is the fastest, but cell areas on the sphere vary by a factor
///   of about 5.2.
/// - Tangent makes cell sizes nearly uniform (ratio about 1.4), but
///   requires a trigonometric call in each direction and is roughly 3x
///   slower than quadratic.
/// - Quadratic approximates the tangent projection, bounding the area
///   ratio by about 2.1 at a fraction of the cost.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Projection {
    Linear,
    Tan,
    Quadratic,
}

impl Projection {
    pub fn st_to_uv(&self, s: f64) -> f64 {
        match self {
            Projection::Linear => 2. * s - 1.,
            Projection::Tan => {
                // Unfortunately, tan(π/4) is slightly less than 1.0, which
                // means that we can't use the tangent of the angle directly:
                // the interval [0,1] would not be mapped back onto itself.
                // Correcting by the relative error of tan recovers the
                // round trip.
                let s = ((std::f64::consts::FRAC_PI_2 * s) - std::f64::consts::FRAC_PI_4).tan();
                s + (1.0 / ((1u64 << 53) as f64)) * s
            }
            Projection::Quadratic => st_to_uv(s),
        }
    }

    pub fn uv_to_st(&self, u: f64) -> f64 {
        match self {
            Projection::Linear => 0.5 * (u + 1.),
            Projection::Tan => {
                let a = u.atan();
                (2. * std::f64::consts::FRAC_1_PI) * (a + std::f64::consts::FRAC_PI_4)
            }
            Projection::Quadratic => uv_to_st(u),
        }
    }
}

/// st_to_uv converts an s- or t-value in [0,1] to the corresponding u- or
/// v-value in [-1,1] using the canonical quadratic projection.
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1. / 3.) * (4. * s * s - 1.)
    } else {
        (1. / 3.) * (1. - 4. * (1. - s) * (1. - s))
    }
}

/// uv_to_st is the inverse of st_to_uv: it converts a u- or v-value in
/// [-1,1] to the corresponding s- or t-value in [0,1].
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0. {
        0.5 * (1. + 3. * u).sqrt()
    } else {
        1. - 0.5 * (1. - 3. * u).sqrt()
    }
}

/// siti_to_st converts an si- or ti-value to the corresponding s- or
/// t-value. Values beyond the maximum are clamped to 1.
pub fn siti_to_st(si: u64) -> f64 {
    if si > MAX_SITI {
        1.
    } else {
        (si as f64) / (MAX_SITI as f64)
    }
}

/// st_to_siti converts the s- or t-value to the nearest si- or ti-
/// coordinate. The result may be outside the range of valid (si,ti) values.
pub fn st_to_siti(s: f64) -> u64 {
    (s * (MAX_SITI as f64) + 0.5) as u64
}

/// face returns which of the six cube faces the direction vector projects
/// onto: the axis of largest absolute component, offset by 3 when that
/// component is negative.
pub fn face(r: &Vector) -> u8 {
    let f = match r.largest_component() {
        Axis::X => {
            if r.x < 0. {
                return 3;
            }
            0
        }
        Axis::Y => {
            if r.y < 0. {
                return 4;
            }
            1
        }
        Axis::Z => {
            if r.z < 0. {
                return 5;
            }
            2
        }
    };
    f
}

/// valid_face_xyz_to_uv projects a point onto the given face, which must
/// already be known to contain the projection of the point (i.e. the dot
/// product of p with the face normal must be positive).
pub fn valid_face_xyz_to_uv(face: u8, r: &Vector) -> (f64, f64) {
    match face {
        0 => (r.y / r.x, r.z / r.x),
        1 => (-r.x / r.y, r.z / r.y),
        2 => (-r.x / r.z, -r.y / r.z),
        3 => (r.z / r.x, r.y / r.x),
        4 => (r.z / r.y, -r.x / r.y),
        _ => (-r.y / r.z, -r.x / r.z),
    }
}

/// xyz_to_face_uv converts a direction vector (not necessarily unit length)
/// to the face it projects onto and the (u,v) coordinates on that face.
pub fn xyz_to_face_uv(r: &Vector) -> (u8, f64, f64) {
    let f = face(r);
    let (u, v) = valid_face_xyz_to_uv(f, r);
    (f, u, v)
}

/// face_xyz_to_uv returns the (u,v) coordinates of the projection of p onto
/// the given face, or None when p does not project onto that face (the
/// component of p along the face normal is not positive).
pub fn face_xyz_to_uv(face: u8, p: &Point) -> Option<(f64, f64)> {
    let inside = match face {
        0 => p.0.x > 0.,
        1 => p.0.y > 0.,
        2 => p.0.z > 0.,
        3 => p.0.x < 0.,
        4 => p.0.y < 0.,
        _ => p.0.z < 0.,
    };
    if !inside {
        return None;
    }
    Some(valid_face_xyz_to_uv(face, &p.0))
}

/// face_uv_to_xyz turns face-and-(u,v) coordinates into a direction vector;
/// the result is not unit length.
pub fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Vector {
    match face {
        0 => Vector::new(1., u, v),
        1 => Vector::new(-u, 1., v),
        2 => Vector::new(-u, -v, 1.),
        3 => Vector::new(-1., -v, -u),
        4 => Vector::new(v, -1., -u),
        _ => Vector::new(v, u, -1.),
    }
}

/// face_siti_to_xyz transforms the (si, ti) coordinates on the given face to
/// a direction vector (not necessarily unit length).
pub fn face_siti_to_xyz(face: u8, si: u64, ti: u64) -> Point {
    Point(face_uv_to_xyz(
        face,
        st_to_uv(siti_to_st(si)),
        st_to_uv(siti_to_st(ti)),
    ))
}

/// u_norm returns the right-handed normal (not necessarily unit length) for
/// an edge in the direction of the positive v-axis at the given u-value on
/// the given face. (This vector is perpendicular to the plane through the
/// sphere origin that contains the given edge.)
pub fn u_norm(face: u8, u: f64) -> Vector {
    match face {
        0 => Vector::new(u, -1., 0.),
        1 => Vector::new(1., u, 0.),
        2 => Vector::new(1., 0., u),
        3 => Vector::new(-u, 0., 1.),
        4 => Vector::new(0., -u, 1.),
        _ => Vector::new(0., -1., -u),
    }
}

/// v_norm returns the right-handed normal (not necessarily unit length) for
/// an edge in the direction of the positive u-axis at the given v-value on
/// the given face.
pub fn v_norm(face: u8, v: f64) -> Vector {
    match face {
        0 => Vector::new(-v, 0., 1.),
        1 => Vector::new(0., -v, 1.),
        2 => Vector::new(0., -1., -v),
        3 => Vector::new(v, -1., 0.),
        4 => Vector::new(1., v, 0.),
        _ => Vector::new(1., 0., v),
    }
}

/// unit_norm returns the unit normal of the given face.
pub fn unit_norm(face: u8) -> Vector {
    match face {
        0 => Vector::new(1., 0., 0.),
        1 => Vector::new(0., 1., 0.),
        2 => Vector::new(0., 0., 1.),
        3 => Vector::new(-1., 0., 0.),
        4 => Vector::new(0., -1., 0.),
        _ => Vector::new(0., 0., -1.),
    }
}

/// u_axis returns the u-axis of the given face.
pub fn u_axis(face: u8) -> Vector {
    match face {
        0 => Vector::new(0., 1., 0.),
        1 => Vector::new(-1., 0., 0.),
        2 => Vector::new(-1., 0., 0.),
        3 => Vector::new(0., 0., -1.),
        4 => Vector::new(0., 0., -1.),
        _ => Vector::new(0., 1., 0.),
    }
}

/// v_axis returns the v-axis of the given face.
pub fn v_axis(face: u8) -> Vector {
    match face {
        0 => Vector::new(0., 0., 1.),
        1 => Vector::new(0., 0., 1.),
        2 => Vector::new(0., -1., 0.),
        3 => Vector::new(0., -1., 0.),
        4 => Vector::new(1., 0., 0.),
        _ => Vector::new(1., 0., 0.),
    }
}
