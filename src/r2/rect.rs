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

use crate::r1;
use crate::r2::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rect represents a closed axis-aligned rectangle in ℝ², the product of an
/// x- and a y-interval.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub x: r1::Interval,
    pub y: r1::Interval,
}

/// The canonical empty rectangle.
pub const EMPTY: Rect = Rect {
    x: r1::interval::EMPTY,
    y: r1::interval::EMPTY,
};

impl Rect {
    pub fn from_intervals(x: r1::Interval, y: r1::Interval) -> Self {
        Rect { x, y }
    }

    /// from_points constructs the smallest rectangle containing all of the
    /// given points.
    pub fn from_points(pts: &[Point]) -> Self {
        let mut r = EMPTY;
        for p in pts {
            r = r.add_point(p);
        }
        r
    }

    /// from_center_size constructs a rectangle with the given center and
    /// size. Both dimensions of size must be non-negative.
    pub fn from_center_size(center: &Point, size: &Point) -> Self {
        Rect {
            x: r1::Interval::new(center.x - size.x / 2., center.x + size.x / 2.),
            y: r1::Interval::new(center.y - size.y / 2., center.y + size.y / 2.),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_empty() == self.y.is_empty()
    }

    /// vertices returns all four vertices of the rectangle, in CCW order
    /// starting from the lower left.
    pub fn vertices(&self) -> [Point; 4] {
        [
            Point::new(self.x.lo, self.y.lo),
            Point::new(self.x.hi, self.y.lo),
            Point::new(self.x.hi, self.y.hi),
            Point::new(self.x.lo, self.y.hi),
        ]
    }

    /// vertex_ij returns the vertex with minimal x if i == 0 and minimal y
    /// if j == 0, otherwise the corresponding maximal coordinate.
    pub fn vertex_ij(&self, i: usize, j: usize) -> Point {
        let x = if i == 0 { self.x.lo } else { self.x.hi };
        let y = if j == 0 { self.y.lo } else { self.y.hi };
        Point::new(x, y)
    }

    pub fn lo(&self) -> Point {
        Point::new(self.x.lo, self.y.lo)
    }

    pub fn hi(&self) -> Point {
        Point::new(self.x.hi, self.y.hi)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }

    pub fn size(&self) -> Point {
        Point::new(self.x.len(), self.y.len())
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y)
    }

    pub fn interior_contains_point(&self, p: &Point) -> bool {
        self.x.interior_contains(p.x) && self.y.interior_contains(p.y)
    }

    pub fn contains(&self, other: &Self) -> bool {
        self.x.contains_interval(&other.x) && self.y.contains_interval(&other.y)
    }

    pub fn interior_contains(&self, other: &Self) -> bool {
        self.x.interior_contains_interval(&other.x) && self.y.interior_contains_interval(&other.y)
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.x.intersects(&other.x) && self.y.intersects(&other.y)
    }

    pub fn interior_intersects(&self, other: &Self) -> bool {
        self.x.interior_intersects(&other.x) && self.y.interior_intersects(&other.y)
    }

    pub fn add_point(&self, p: &Point) -> Self {
        Rect {
            x: self.x + p.x,
            y: self.y + p.y,
        }
    }

    /// clamp_point returns the closest point in the rectangle to p.
    pub fn clamp_point(&self, p: &Point) -> Point {
        Point::new(self.x.clamp_point(p.x), self.y.clamp_point(p.y))
    }

    /// expanded returns a rectangle that has been expanded in the
    /// x-direction by margin.x and in the y-direction by margin.y. Either
    /// component may be negative; if the result along either axis is empty,
    /// the empty rectangle is returned.
    pub fn expanded(&self, margin: &Point) -> Self {
        let x = self.x.expanded(margin.x);
        let y = self.y.expanded(margin.y);
        if x.is_empty() || y.is_empty() {
            EMPTY
        } else {
            Rect { x, y }
        }
    }

    pub fn expanded_by_margin(&self, margin: f64) -> Self {
        self.expanded(&Point::new(margin, margin))
    }

    pub fn union(&self, other: &Self) -> Self {
        Rect {
            x: self.x.union(&other.x),
            y: self.y.union(&other.y),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.intersection(&other.x);
        let y = self.y.intersection(&other.y);
        if x.is_empty() || y.is_empty() {
            EMPTY
        } else {
            Rect { x, y }
        }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.x.approx_eq(&other.x) && self.y.approx_eq(&other.y)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[lo{}, hi{}]", self.lo(), self.hi())
    }
}
