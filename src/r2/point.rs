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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Point represents a point in ℝ².
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// norm returns the vector's length.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// normalized returns a unit-length vector in the same direction.
    pub fn normalized(&self) -> Self {
        if self.x == 0. && self.y == 0. {
            *self
        } else {
            *self * (1. / self.norm())
        }
    }

    /// ortho returns a counterclockwise perpendicular vector of the same
    /// length.
    pub fn ortho(&self) -> Self {
        Point {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// cross returns the magnitude of the cross product of the two vectors
    /// viewed as vectors in ℝ³ with zero z-component.
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, other: Point) -> Self::Output {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Self::Output {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Point;
    fn mul(self, m: f64) -> Self::Output {
        Point::new(self.x * m, self.y * m)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({:.12}, {:.12})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(1., 2.);
        let b = Point::new(3., -1.);
        assert_eq!(a + b, Point::new(4., 1.));
        assert_eq!(a - b, Point::new(-2., 3.));
        assert_eq!(a * 2., Point::new(2., 4.));
    }

    #[test]
    fn test_dot_cross() {
        let a = Point::new(1., 0.);
        let b = Point::new(0., 1.);
        assert_eq!(a.dot(&b), 0.);
        assert_eq!(a.cross(&b), 1.);
        assert_eq!(b.cross(&a), -1.);
    }

    #[test]
    fn test_norm() {
        assert_eq!(Point::new(3., 4.).norm(), 5.);
        let n = Point::new(3., 4.).normalized();
        assert_f64_eq!(n.norm(), 1.);
        assert_eq!(Point::new(0., 0.).normalized(), Point::new(0., 0.));
    }

    #[test]
    fn test_ortho() {
        let a = Point::new(2., 1.);
        assert_eq!(a.dot(&a.ortho()), 0.);
        assert_eq!(a.ortho().norm(), a.norm());
    }
}
