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

/// Interval represents a closed interval [lo, hi] on the real line. The
/// interval is empty if lo > hi; the canonical empty interval is (1, 0).
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// The canonical empty interval.
pub const EMPTY: Interval = Interval { lo: 1., hi: 0. };

impl Interval {
    pub fn new(lo: f64, hi: f64) -> Self {
        Interval { lo, hi }
    }

    /// from_point returns an interval representing a single point.
    pub fn from_point(p: f64) -> Self {
        Interval { lo: p, hi: p }
    }

    /// from_point_pair returns the minimal interval containing the two
    /// given points, in either order.
    pub fn from_point_pair(a: f64, b: f64) -> Self {
        if a <= b {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// len returns the length of the interval. Empty intervals have a
    /// negative length.
    pub fn len(&self) -> f64 {
        self.hi - self.lo
    }

    /// center returns the midpoint of the interval. It is undefined for
    /// empty intervals.
    pub fn center(&self) -> f64 {
        0.5 * (self.lo + self.hi)
    }

    pub fn contains(&self, p: f64) -> bool {
        self.lo <= p && p <= self.hi
    }

    pub fn interior_contains(&self, p: f64) -> bool {
        self.lo < p && p < self.hi
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        self.lo <= other.lo && other.hi <= self.hi
    }

    pub fn interior_contains_interval(&self, other: &Self) -> bool {
        if other.is_empty() {
            return true;
        }
        self.lo < other.lo && other.hi < self.hi
    }

    pub fn intersects(&self, other: &Self) -> bool {
        if self.lo <= other.lo {
            // other.lo <= other.hi rules out the case where other is empty.
            other.lo <= self.hi && other.lo <= other.hi
        } else {
            self.lo <= other.hi && self.lo <= self.hi
        }
    }

    pub fn interior_intersects(&self, other: &Self) -> bool {
        other.lo < self.hi && self.lo < other.hi && self.lo < self.hi && other.lo <= other.hi
    }

    pub fn intersection(&self, other: &Self) -> Self {
        // The resulting interval may be empty, which is fine.
        Interval {
            lo: self.lo.max(other.lo),
            hi: self.hi.min(other.hi),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// clamp_point returns the closest point in the interval to p. The
    /// interval must be non-empty.
    pub fn clamp_point(&self, p: f64) -> f64 {
        self.lo.max(self.hi.min(p))
    }

    /// expanded returns an interval that has been expanded on each side by
    /// margin. A negative margin shrinks the interval; shrinking an interval
    /// below a point yields the empty interval. Empty intervals are
    /// unchanged.
    pub fn expanded(&self, margin: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Interval {
            lo: self.lo - margin,
            hi: self.hi + margin,
        }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        const EPSILON: f64 = 1e-15;
        if self.is_empty() {
            other.len() <= 2. * EPSILON
        } else if other.is_empty() {
            self.len() <= 2. * EPSILON
        } else {
            (other.lo - self.lo).abs() <= EPSILON && (other.hi - self.hi).abs() <= EPSILON
        }
    }
}

impl std::ops::Add<f64> for Interval {
    type Output = Interval;

    /// Expands the interval to include the given point.
    fn add(self, p: f64) -> Self::Output {
        if self.is_empty() {
            Interval { lo: p, hi: p }
        } else if p < self.lo {
            Interval { lo: p, hi: self.hi }
        } else if p > self.hi {
            Interval { lo: self.lo, hi: p }
        } else {
            self
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lo, self.hi)
    }
}
