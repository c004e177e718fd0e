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

use crate::consts::EPSILON;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vector represents a point in ℝ³.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Axis names the three coordinate axes.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// norm returns the vector's length.
    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// norm2 returns the vector's squared length.
    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    /// normalize returns a unit vector in the same direction. The zero
    /// vector is returned unchanged.
    pub fn normalize(&self) -> Self {
        if self.x == 0. && self.y == 0. && self.z == 0. {
            *self
        } else {
            *self * (1. / self.norm())
        }
    }

    pub fn is_unit(&self) -> bool {
        (self.norm2() - 1.).abs() <= EPSILON
    }

    /// abs returns the vector with nonnegative components.
    pub fn abs(&self) -> Self {
        Vector {
            x: self.x.abs(),
            y: self.y.abs(),
            z: self.z.abs(),
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Vector {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// distance returns the Euclidean distance between the two points.
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// angle returns the angle between the two vectors, in radians.
    pub fn angle(&self, other: &Self) -> f64 {
        self.cross(other).norm().atan2(self.dot(other))
    }

    /// ortho returns a unit vector orthogonal to this one. It is not any
    /// particular orthogonal vector, but the choice is deterministic.
    pub fn ortho(&self) -> Self {
        // Arbitrary nonzero offsets keep the cross product away from zero
        // even when two components of self vanish.
        let mut ov = Vector::new(0.012, 0.0053, 0.00457);
        match self.largest_component() {
            Axis::X => ov.z = 1.,
            Axis::Y => ov.x = 1.,
            Axis::Z => ov.y = 1.,
        }
        self.cross(&ov).normalize()
    }

    /// largest_component returns the axis whose component has the largest
    /// absolute value.
    pub fn largest_component(&self) -> Axis {
        let a = self.abs();
        if a.x > a.y {
            if a.x > a.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if a.y > a.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// smallest_component returns the axis whose component has the smallest
    /// absolute value.
    pub fn smallest_component(&self) -> Axis {
        let a = self.abs();
        if a.x < a.y {
            if a.x < a.z {
                Axis::X
            } else {
                Axis::Z
            }
        } else if a.y < a.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON
            && (self.y - other.y).abs() < EPSILON
            && (self.z - other.z).abs() < EPSILON
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;
    fn add(self, other: Vector) -> Self::Output {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;
    fn sub(self, other: Vector) -> Self::Output {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, m: f64) -> Self::Output {
        Vector::new(self.x * m, self.y * m, self.z * m)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        Vector::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.12}, {:.12}, {:.12})", self.x, self.y, self.z)
    }
}
