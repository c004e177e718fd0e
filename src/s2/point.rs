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

use cgmath::Matrix3;

use crate::r3::vector::Vector;
use crate::s1::angle::Angle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point represents a point on the unit sphere as a normalized 3D vector.
/// Points are guaranteed to be close to unit length by every constructor
/// that takes non-unit input, but operations that document otherwise accept
/// arbitrary direction vectors.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point(pub Vector);

impl Point {
    /// from_coords creates a new normalized point from its coordinates.
    /// The origin is mapped to an arbitrary but fixed point rather than
    /// producing NaNs.
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        if x == 0. && y == 0. && z == 0. {
            Point::ortho_origin()
        } else {
            Point(Vector::new(x, y, z).normalize())
        }
    }

    fn ortho_origin() -> Point {
        Point(Vector::new(0., 0., 1.))
    }

    /// cross returns a Point that is orthogonal to both p and op. This is
    /// the plain cross product; see point_cross for the variant that stays
    /// well-defined for nearly (anti)parallel inputs.
    pub fn cross(&self, other: &Self) -> Self {
        Point(self.0.cross(&other.0))
    }

    /// point_cross returns a vector orthogonal to both p and op:
    /// (op + p) × (op − p), which is twice the cross product but, unlike
    /// the plain cross product, remains nonzero and orthogonal even when p
    /// and op are nearly parallel. For exactly (anti)parallel inputs an
    /// arbitrary orthogonal vector is returned.
    pub fn point_cross(&self, other: &Self) -> Self {
        let v = (other.0 + self.0).cross(&(other.0 - self.0));
        if v.x == 0. && v.y == 0. && v.z == 0. {
            Point(self.0.ortho())
        } else {
            Point(v)
        }
    }

    /// distance returns the angle between two points.
    pub fn distance(&self, other: &Self) -> Angle {
        Angle(self.0.angle(&other.0))
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn normalize(&self) -> Self {
        Point(self.0.normalize())
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.0.angle(&other.0) <= crate::consts::EPSILON
    }

    /// frame returns the orthonormal frame for the given point on the unit
    /// sphere: a right-handed basis whose third column is the point itself.
    pub fn frame(&self) -> Matrix3<f64> {
        let z = *self;
        let x = Point(z.0.ortho());
        let y = z.cross(&x);
        Matrix3::from_cols(
            cgmath::Vector3::new(x.0.x, x.0.y, x.0.z),
            cgmath::Vector3::new(y.0.x, y.0.y, y.0.z),
            cgmath::Vector3::new(z.0.x, z.0.y, z.0.z),
        )
    }

    /// to_frame returns the coordinates of this point with respect to the
    /// given orthonormal basis (the inverse of from_frame).
    pub fn to_frame(&self, m: &Matrix3<f64>) -> Point {
        // The inverse of an orthonormal matrix is its transpose.
        let v = cgmath::Vector3::new(self.0.x, self.0.y, self.0.z);
        let x = m.x.x * v.x + m.x.y * v.y + m.x.z * v.z;
        let y = m.y.x * v.x + m.y.y * v.y + m.y.z * v.z;
        let z = m.z.x * v.x + m.z.y * v.y + m.z.z * v.z;
        Point(Vector::new(x, y, z))
    }

    /// from_frame maps a point in the given orthonormal basis back to
    /// standard coordinates.
    pub fn from_frame(&self, m: &Matrix3<f64>) -> Point {
        let v = self.0;
        Point(Vector::new(
            m.x.x * v.x + m.y.x * v.y + m.z.x * v.z,
            m.x.y * v.x + m.y.y * v.y + m.z.y * v.z,
            m.x.z * v.x + m.y.z * v.y + m.z.z * v.z,
        ))
    }
}

/// ordered_ccw returns true if the edges OA, OB, and OC are encountered in
/// that order while sweeping CCW around the point O.
///
/// You can think of this as testing whether A <= B <= C with respect to the
/// CCW ordering around O that starts at A, or equivalently, whether B is
/// contained in the range of angles (inclusive) that starts at A and extends
/// counterclockwise to C.
pub fn ordered_ccw(a: &Point, b: &Point, c: &Point, o: &Point) -> bool {
    let mut sum = 0;
    if crate::s2::predicates::sign(b, o, a) {
        sum += 1;
    }
    if crate::s2::predicates::sign(c, o, b) {
        sum += 1;
    }
    if crate::s2::predicates::sign(a, o, c) {
        sum += 1;
    }
    sum >= 2
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Self::Output {
        Point(self.0 + other.0)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Self::Output {
        Point(self.0 - other.0)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, m: f64) -> Self::Output {
        Point(self.0 * m)
    }
}

impl std::ops::Neg for Point {
    type Output = Point;
    fn neg(self) -> Self::Output {
        Point(-self.0)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
