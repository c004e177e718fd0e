// Copyright 2015 Google Inc. All rights reserved.
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

//! Utilities for geodesic edges (great-circle segments between unit
//! vectors): point-to-edge distance and edge crossing tests.

use crate::s1::angle::{Angle, Rad};
use crate::s2::point::Point;
use crate::s2::predicates::sign;

/// distance_from_segment returns the minimum spherical arc distance from
/// the unit vector x to the geodesic segment (a, b). All three vectors must
/// be unit length. The result stays accurate for small distances; for
/// distances approaching π/2 or more the error can reach the usual
/// cancellation limits.
pub fn distance_from_segment(x: &Point, a: &Point, b: &Point) -> Angle {
    let a_cross_b = a.point_cross(b);

    // The closest point lies in the edge interior iff x is inside the
    // spherical wedge bounded by the planes through (a_cross_b, a) and
    // (b, a_cross_b); otherwise it is the nearest endpoint.
    if sign(&a_cross_b, a, x) && sign(x, b, &a_cross_b) {
        // The distance from x to the great circle through (a, b) is the
        // complement of the angle between x and the circle's normal.
        let sin_dist = x.0.dot(&a_cross_b.0).abs() / a_cross_b.norm();
        return Rad(sin_dist.min(1.0).asin()).into();
    }

    // Converting the chord length |x−a| to an arc keeps full relative
    // accuracy for small distances, where acos of the dot product loses
    // half the significant digits.
    let linear_dist2 = (*x - *a).0.norm2().min((*x - *b).0.norm2());
    Rad(2. * (0.5 * linear_dist2.sqrt()).min(1.0).asin()).into()
}

/// simple_crossing reports whether the geodesic arcs AB and CD cross at a
/// point interior to both. Properly handles the case where both arcs lie on
/// the same great circle by returning false (such arcs overlap rather than
/// cross). The four points must be unit length.
pub fn simple_crossing(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    // Eliminate cases by computing the four CCW triangle tests ACB, CBD,
    // BDA and DAC from two cross products; the arcs cross iff all four have
    // the same orientation.
    let ab = a.0.cross(&b.0);
    let acb = -ab.dot(&c.0);
    let bda = ab.dot(&d.0);
    if acb * bda <= 0. {
        return false;
    }

    let cd = c.0.cross(&d.0);
    let cbd = -cd.dot(&b.0);
    let dac = cd.dot(&a.0);
    (acb * cbd > 0.) && (acb * dac > 0.)
}
