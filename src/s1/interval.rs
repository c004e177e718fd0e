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

use std::f64::consts::PI;

use crate::consts::{remainder, DBL_EPSILON};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Interval represents a closed interval on the unit circle. Endpoints lie
/// in [-π, π] and are identified on the seam: both endpoints of the full
/// interval and single points at ±π are represented with the value π.
///
/// An interval with lo > hi is "inverted" and wraps across the ±π seam. The
/// empty and full intervals are distinguished canonical values
/// (π, −π) and (−π, π) respectively.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

/// The canonical empty interval.
pub const EMPTY: Interval = Interval { lo: PI, hi: -PI };

/// The interval covering the whole circle.
pub const FULL: Interval = Interval { lo: -PI, hi: PI };

impl Interval {
    /// new constructs an interval from its endpoints, normalizing −π to π
    /// for any endpoint that is not part of the full interval.
    pub fn new(lo: f64, hi: f64) -> Self {
        let mut i = Interval { lo, hi };
        if lo == -PI && hi != PI {
            i.lo = PI;
        }
        if hi == -PI && lo != PI {
            i.hi = PI;
        }
        i
    }

    /// from_point_pair returns the minimal interval containing both points,
    /// i.e. the pair is ordered so that the shorter of the two arcs between
    /// them is used.
    pub fn from_point_pair(mut a: f64, mut b: f64) -> Self {
        if a == -PI {
            a = PI;
        }
        if b == -PI {
            b = PI;
        }
        if positive_distance(a, b) <= PI {
            Interval { lo: a, hi: b }
        } else {
            Interval { lo: b, hi: a }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lo.abs() <= PI
            && self.hi.abs() <= PI
            && !(self.lo == -PI && self.hi != PI)
            && !(self.hi == -PI && self.lo != PI)
    }

    pub fn is_full(&self) -> bool {
        self.lo == -PI && self.hi == PI
    }

    pub fn is_empty(&self) -> bool {
        self.lo == PI && self.hi == -PI
    }

    /// is_inverted reports whether the interval wraps across the ±π seam.
    pub fn is_inverted(&self) -> bool {
        self.lo > self.hi
    }

    /// invert returns the complementary set of endpoints (the same two
    /// boundary points tracing the other arc).
    pub fn invert(&self) -> Self {
        Interval::new(self.hi, self.lo)
    }

    /// center returns the midpoint of the interval. It is undefined for
    /// full and empty intervals.
    pub fn center(&self) -> f64 {
        let c = 0.5 * (self.lo + self.hi);
        if !self.is_inverted() {
            c
        } else if c <= 0. {
            c + PI
        } else {
            c - PI
        }
    }

    /// len returns the length of the interval, which is negative for the
    /// empty interval.
    pub fn len(&self) -> f64 {
        let mut l = self.hi - self.lo;
        if l >= 0. {
            return l;
        }
        l += 2. * PI;
        if l > 0. {
            l
        } else {
            -1.
        }
    }

    /// fast_contains is contains without the −π → π remapping of the query
    /// point.
    pub fn fast_contains(&self, p: f64) -> bool {
        if self.is_inverted() {
            (p >= self.lo || p <= self.hi) && !self.is_empty()
        } else {
            p >= self.lo && p <= self.hi
        }
    }

    pub fn contains(&self, mut p: f64) -> bool {
        if p == -PI {
            p = PI;
        }
        self.fast_contains(p)
    }

    pub fn interior_contains(&self, mut p: f64) -> bool {
        if p == -PI {
            p = PI;
        }
        if self.is_inverted() {
            p > self.lo || p < self.hi
        } else {
            (p > self.lo && p < self.hi) || self.is_full()
        }
    }

    pub fn contains_interval(&self, other: &Self) -> bool {
        if self.is_inverted() {
            if other.is_inverted() {
                other.lo >= self.lo && other.hi <= self.hi
            } else {
                (other.lo >= self.lo || other.hi <= self.hi) && !self.is_empty()
            }
        } else if other.is_inverted() {
            self.is_full() || other.is_empty()
        } else {
            other.lo >= self.lo && other.hi <= self.hi
        }
    }

    pub fn interior_contains_interval(&self, other: &Self) -> bool {
        if self.is_inverted() {
            if other.is_inverted() {
                (other.lo > self.lo && other.hi < self.hi) || other.is_empty()
            } else {
                other.lo > self.lo || other.hi < self.hi
            }
        } else if other.is_inverted() {
            self.is_full() || other.is_empty()
        } else {
            (other.lo > self.lo && other.hi < self.hi) || self.is_full()
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            false
        } else if self.is_inverted() {
            other.is_inverted() || other.lo <= self.hi || other.hi >= self.lo
        } else if other.is_inverted() {
            other.lo <= self.hi || other.hi >= self.lo
        } else {
            other.lo <= self.hi && other.hi >= self.lo
        }
    }

    pub fn interior_intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() || self.lo == self.hi {
            false
        } else if self.is_inverted() {
            other.is_inverted() || other.lo < self.hi || other.hi > self.lo
        } else if other.is_inverted() {
            other.lo < self.hi || other.hi > self.lo
        } else {
            (other.lo < self.hi && other.hi > self.lo) || self.is_full()
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.fast_contains(other.lo) {
            if self.fast_contains(other.hi) {
                // Either other ⊂ self, or the union is the whole circle.
                if self.contains_interval(other) {
                    return *self;
                }
                return FULL;
            }
            return Interval {
                lo: self.lo,
                hi: other.hi,
            };
        }
        if self.fast_contains(other.hi) {
            return Interval {
                lo: other.lo,
                hi: self.hi,
            };
        }
        // Neither endpoint of other is inside self: either self ⊂ other or
        // the two intervals are disjoint.
        if self.is_empty() || other.fast_contains(self.lo) {
            return *other;
        }
        // Attach self to whichever endpoint of other is closer.
        if positive_distance(other.hi, self.lo) < positive_distance(self.hi, other.lo) {
            Interval {
                lo: other.lo,
                hi: self.hi,
            }
        } else {
            Interval {
                lo: self.lo,
                hi: other.hi,
            }
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        if other.is_empty() {
            return EMPTY;
        }
        if self.fast_contains(other.lo) {
            if self.fast_contains(other.hi) {
                // Either other ⊂ self, or self and other intersect twice.
                // In the latter case one of the intervals is inverted, and
                // the minimal interval covering the two pieces is the
                // shorter of self and other, so return the shorter interval
                // in both cases.
                if other.len() < self.len() {
                    return *other;
                }
                return *self;
            }
            return Interval {
                lo: other.lo,
                hi: self.hi,
            };
        }
        if self.fast_contains(other.hi) {
            return Interval {
                lo: self.lo,
                hi: other.hi,
            };
        }
        if other.fast_contains(self.lo) {
            return *self;
        }
        EMPTY
    }

    /// expanded returns the interval expanded by the minimum of the given
    /// margin and the distance needed to make the interval full, on each
    /// side. Negative margins shrink the interval instead. Full and empty
    /// intervals are unchanged.
    pub fn expanded(&self, margin: f64) -> Self {
        if margin >= 0. {
            if self.is_empty() {
                return *self;
            }
            // Check whether the interval will be full after expansion,
            // allowing for a rounding error in computing each endpoint.
            if self.len() + 2. * margin + 2. * DBL_EPSILON >= 2. * PI {
                return FULL;
            }
        } else {
            if self.is_full() {
                return *self;
            }
            // Check whether the interval will be empty after expansion,
            // allowing for a rounding error in computing each endpoint.
            if self.len() + 2. * margin - 2. * DBL_EPSILON <= 0. {
                return EMPTY;
            }
        }
        let mut result = Interval::new(
            remainder(self.lo - margin, 2. * PI),
            remainder(self.hi + margin, 2. * PI),
        );
        if result.lo <= -PI {
            result.lo = PI;
        }
        result
    }

    /// complement returns the interval covering the rest of the circle.
    pub fn complement(&self) -> Self {
        if self.lo == self.hi {
            // Singleton: the complement is all but one point, which we
            // approximate as full.
            FULL
        } else {
            Interval {
                lo: self.hi,
                hi: self.lo,
            }
        }
    }

    /// complement_center returns the midpoint of the complement; for full
    /// and empty intervals it is the antipode of the midpoint.
    pub fn complement_center(&self) -> f64 {
        if self.lo != self.hi {
            self.complement().center()
        } else if self.hi <= 0. {
            self.hi + PI
        } else {
            self.hi - PI
        }
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        // The intervals (-π, π] and [π, -π) are the same on the circle but
        // differ by 2π at each endpoint, so endpoint comparisons are made
        // mod 2π.
        const EPSILON: f64 = 1e-15;
        if self.is_empty() {
            other.len() <= 2. * EPSILON
        } else if other.is_empty() {
            self.len() <= 2. * EPSILON
        } else {
            remainder(other.lo - self.lo, 2. * PI).abs() <= EPSILON
                && remainder(other.hi - self.hi, 2. * PI).abs() <= EPSILON
                && (self.len() - other.len()).abs() <= 2. * EPSILON
        }
    }
}

impl std::ops::Add<f64> for Interval {
    type Output = Interval;

    /// Expands the interval to include the given point, which must lie in
    /// [-π, π]. Out-of-range points leave the interval unchanged.
    fn add(self, mut p: f64) -> Self::Output {
        if p.abs() > PI {
            return self;
        }
        if p == -PI {
            p = PI;
        }
        if self.fast_contains(p) {
            return self;
        }
        if self.is_empty() {
            return Interval { lo: p, hi: p };
        }
        // Extend toward whichever endpoint is closer.
        if positive_distance(p, self.lo) < positive_distance(self.hi, p) {
            Interval { lo: p, hi: self.hi }
        } else {
            Interval { lo: self.lo, hi: p }
        }
    }
}

/// positive_distance computes the distance from a to b in the range [0, 2π),
/// traveling counterclockwise. It is equivalent to (b − a) mod 2π but never
/// returns a negative result, even when a == π and b == −π.
fn positive_distance(a: f64, b: f64) -> f64 {
    let d = b - a;
    if d >= 0. {
        d
    } else {
        (b + PI) - (a - PI)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lo, self.hi)
    }
}
