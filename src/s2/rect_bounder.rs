// Copyright 2017 Google Inc. All rights reserved.
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

use std::f64::consts::{FRAC_PI_2, PI};

use crate::consts::DBL_EPSILON;
use crate::r1;
use crate::r3::vector::Vector;
use crate::s1;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::rect::Rect;

/// RectBounder computes a bounding rectangle that contains all edges
/// defined by a vertex chain (v0, v1, v2, ...). All vertices must be unit
/// length. The bounding rectangle of an edge can be larger than the
/// bounding rectangle of its endpoints, e.g. for an edge passing near a
/// pole, so the edge interiors are bounded explicitly.
///
/// The bounds are calculated conservatively to account for numerical
/// errors when points are converted to LatLngs: if a closed edge chain L
/// contains a point P, then the computed bound contains LatLng(P) as
/// computed in floating point.
pub struct RectBounder {
    // The previous vertex in the chain and its latitude-longitude.
    a: Option<(Point, LatLng)>,
    bound: Rect,
}

impl Default for RectBounder {
    fn default() -> Self {
        Self::new()
    }
}

impl RectBounder {
    pub fn new() -> Self {
        RectBounder {
            a: None,
            bound: Rect::empty(),
        }
    }

    /// add_point extends the chain with the given vertex, growing the bound
    /// to contain the edge from the previous vertex. The point must be unit
    /// length.
    pub fn add_point(&mut self, b: &Point) {
        let b_ll = LatLng::from(b);
        self.bound = match self.a.replace((*b, b_ll)) {
            None => &self.bound + &b_ll,
            Some((a, a_ll)) => self.bound.union(&edge_bound(&a, &a_ll, b, &b_ll)),
        };
    }

    /// get_bound returns the bounding rectangle of the edge chain that
    /// connects the vertices defined so far. If the edge chain defines a
    /// loop, the bound contains the LatLng coordinates of all points
    /// contained by the loop.
    pub fn get_bound(&self) -> Rect {
        // To save time, we ignore numerical errors in the computed LatLngs
        // while accumulating the bounds and then account for them here.
        //
        // LatLng(Point) has a maximum error of 0.955 * dblEpsilon in
        // latitude; in the worst case we might have rounded "inwards" when
        // computing the bound and "outwards" when computing the latitude of
        // a contained point P, therefore we expand the latitude bounds by
        // 2 * dblEpsilon in each direction.
        //
        // Longitude is computed via a single atan2 call, whose results are
        // correctly rounded, so the longitude bounds need no expansion.
        let expansion = LatLng::from_radians(2. * DBL_EPSILON, 0.);
        self.bound.expanded(&expansion).polar_closure()
    }
}

/// Norm of the doubled edge normal below which its direction can no longer
/// be trusted. Keeping the directional error under 3.84·ε (which the
/// latitude error budget assumes) requires
///
///   ‖N‖ ≥ 8·√3 / (3.84 − 0.5 − √3) · ε = 1.91346e-15 (≈ 8.618·ε),
///
/// so anything smaller is treated as a degenerate endpoint pair.
const MIN_NORMAL_LEN: f64 = 1.91346e-15;

/// edge_bound returns a rectangle that conservatively contains every point
/// of the single edge AB, given the endpoints and their coordinates.
fn edge_bound(a: &Point, a_ll: &LatLng, b: &Point, b_ll: &LatLng) -> Rect {
    // The doubled great-circle normal (A−B)×(A+B) = 2·A×B. The expanded
    // form stays orthogonal to both inputs as they draw together, and
    // unlike point_cross it yields an exact zero for proportional inputs,
    // which is the degeneracy signal we key off below.
    let normal = (a.0 - b.0).cross(&(a.0 + b.0));
    let normal_len = normal.norm();
    if normal_len < MIN_NORMAL_LEN {
        return degenerate_edge_bound(a, a_ll, b, b_ll);
    }

    Rect {
        lat: edge_lat_span(a, a_ll, b, b_ll, &normal, normal_len),
        lng: edge_lng_span(a_ll, b_ll),
    }
}

/// degenerate_edge_bound handles endpoints within 4.309·ε of identical or
/// antipodal (about 6 nanometers on the earth's surface).
fn degenerate_edge_bound(a: &Point, a_ll: &LatLng, b: &Point, b_ll: &LatLng) -> Rect {
    if a.0.dot(&b.0) < 0. {
        // Nearly antipodal: the edge could run anywhere around the
        // sphere.
        Rect::full()
    } else {
        // Nearly identical: the endpoint bound suffices, since get_bound
        // pads it by more than the edge can wander from its endpoints.
        Rect::from_point_pair(a_ll, b_ll)
    }
}

/// edge_lng_span returns the longitude range of the edge, widening to the
/// full circle when the endpoints sit on nearly opposite meridians and the
/// side of the pole the edge passes cannot be resolved.
fn edge_lng_span(a_ll: &LatLng, b_ll: &LatLng) -> s1::Interval {
    let span = s1::Interval::from_point_pair(a_ll.lng.rad(), b_ll.lng.rad());
    if span.len() >= PI - 2. * DBL_EPSILON {
        s1::interval::FULL
    } else {
        span
    }
}

/// edge_lat_span returns the latitude range of the edge, including any
/// extremum the great circle attains in the edge interior.
fn edge_lat_span(
    a: &Point,
    a_ll: &LatLng,
    b: &Point,
    b_ll: &LatLng,
    normal: &Vector,
    normal_len: f64,
) -> r1::Interval {
    let mut span = r1::Interval::from_point_pair(a_ll.lat.rad(), b_ll.lat.rad());

    // The great circle attains its extreme latitudes in the vertical plane
    // through the normal. Project both endpoints onto the horizontal
    // direction M of the circle's own plane: the edge can pass through an
    // extremum only if the projections straddle zero. Each projection
    // carries an error of up to
    //
    //   (1 + √3)·ε·‖N‖ + 8·√3·ε² = 6.06638e-16·‖N‖ + 6.83174e-31,
    //
    // so projections within that tolerance of zero are ambiguous and are
    // treated as straddling.
    let m = normal.cross(&Vector::new(0., 0., 1.));
    let ma = m.dot(&a.0);
    let mb = m.dot(&b.0);
    let tol = 6.06638e-16 * normal_len + 6.83174e-31;
    if ma * mb >= 0. && ma.abs() > tol && mb.abs() > tol {
        return span;
    }

    // The circle's peak latitude is the complement of its normal's;
    // computing it with atan2 keeps full accuracy near the poles. The
    // 3·ε term absorbs the directional error in the normal, and
    // get_bound pads the result by another 2·ε.
    let peak =
        (normal.x.hypot(normal.y).atan2(normal.z.abs()) + 3. * DBL_EPSILON).min(FRAC_PI_2);

    // Keep the bound tight when the endpoints are close together: the
    // chord length caps the total latitude variation along the edge, and
    // whatever that allowance does not spend going from A to B caps the
    // round trip from an endpoint out to an extremum and back.
    let chord = (a.0 - b.0).norm();
    let variation = 2. * ((1. + 4. * DBL_EPSILON) * (0.5 * chord * peak.sin())).min(1.).asin();
    let slack = 0.5 * (variation - span.len()) + DBL_EPSILON;

    // Widen whichever end of the span the extremum may extend past; near
    // the tolerance the sign tests are ambiguous and both can apply.
    if ma <= tol && mb >= -tol {
        span.hi = peak.min(span.hi + slack);
    }
    if mb <= tol && ma >= -tol {
        span.lo = (-peak).max(span.lo - slack);
    }
    span
}

/// rect_bound_for_edge returns the bounding rectangle of the single
/// geodesic edge (a, b), including any latitude extrema attained in the
/// edge interior. Both points must be unit length.
pub fn rect_bound_for_edge(a: &Point, b: &Point) -> Rect {
    let mut bounder = RectBounder::new();
    bounder.add_point(a);
    bounder.add_point(b);
    bounder.get_bound()
}

/// expand_for_subregions expands a bound computed by RectBounder so that it
/// is guaranteed to contain the bounds of any subregion whose bounds are
/// computed using RectBounder. For example, consider a loop L that defines
/// a square. get_bound ensures that if a point P is contained by this
/// square, then LatLng(P) is contained by the bound. But now consider a
/// diamond-shaped loop S contained by L. It is possible that get_bound
/// returns a *larger* bound for S than it does for L, due to rounding
/// errors. This method expands the bound for L so that it is guaranteed to
/// contain the bounds of any subregion S.
pub fn expand_for_subregions(bound: &Rect) -> Rect {
    // Empty bounds don't need expansion.
    if bound.is_empty() {
        return *bound;
    }

    // First we need to check whether the bound B contains any
    // nearly-antipodal points (to within 4.309 * dblEpsilon). If so then we
    // need to return the full rectangle, since the subregion might have an
    // edge between two such points, and add_point returns full for such
    // edges. Note that this can happen even if B is not full; for example,
    // consider a loop that defines a 10km strip straddling the equator
    // extending from longitudes -100 to +100 degrees.
    //
    // It is easy to check whether B contains any antipodal points, but
    // checking for nearly-antipodal points is trickier. Essentially we
    // consider the original bound B and its reflection through the origin
    // B', and then test whether the minimum distance between B and B' is
    // less than 4.309 * dblEpsilon.

    // lng_gap is a lower bound on the longitudinal distance between B and
    // its reflection B'. (2.5 * dblEpsilon is the maximum combined error of
    // the endpoint longitude calculations and the len() call.)
    let lng_gap = 0f64.max(PI - bound.lng.len() - 2.5 * DBL_EPSILON);

    // min_abs_lat is the minimum distance from B to the equator (zero or
    // negative if B straddles the equator).
    let min_abs_lat = bound.lat.lo.max(-bound.lat.hi);

    // The minimum distance from B to the south and north poles.
    let lat_gap_south = FRAC_PI_2 + bound.lat.lo;
    let lat_gap_north = FRAC_PI_2 - bound.lat.hi;

    if min_abs_lat >= 0. {
        // The bound does not straddle the equator. In this case the
        // minimum distance is between one endpoint of the latitude edge in
        // B closest to the equator and the other endpoint of that edge in
        // B'. The latitude distance between these two points is
        // 2*min_abs_lat, and the longitude distance is lng_gap. We could
        // compute the distance exactly using the haversine formula, but
        // then we would need to bound the errors in that calculation.
        // Since we only need accuracy when the distance is very small
        // (close to 4.309 * dblEpsilon), we substitute the Euclidean
        // distance instead. This gives us a right triangle XYZ with two
        // edges of length x = 2*min_abs_lat and y ~= lng_gap. The desired
        // distance is the length of the third edge z, and we have
        //
        //   z ~= sqrt(x² + y²) >= (x + y) / sqrt(2)
        //
        // Therefore the region may contain nearly antipodal points only if
        //
        //   2*min_abs_lat + lng_gap < sqrt(2) * 4.309 * dblEpsilon
        //                           ~= 1.354e-15
        if 2. * min_abs_lat + lng_gap < 1.354e-15 {
            return Rect::full();
        }
    } else if lng_gap >= FRAC_PI_2 {
        // B spans at most π/2 in longitude. The minimum distance is always
        // between one corner of B and the diagonally opposite corner of
        // B'. Unlike the case above, lat_gap_south and lat_gap_north are
        // not lower bounds and can exceed their true values by up to
        // 0.75 * dblEpsilon. The region may contain nearly antipodal
        // points only if
        //
        //   lat_gap_south + lat_gap_north < (sqrt(2)*4.309 + 1.5)*dblEpsilon
        //                                 ~= 1.687e-15
        if lat_gap_south + lat_gap_north < 1.687e-15 {
            return Rect::full();
        }
    } else {
        // Otherwise the bound straddles the equator and spans more than
        // π/2 in longitude. The minimum distance can occur either between
        // a corner of B and the diagonally opposite corner of B' (as in
        // the case above), or between a corner of B and the opposite
        // longitudinal edge reflected in B'. It is sufficient to only
        // consider the corner-edge case, since this distance is also a
        // lower bound on the corner-corner distance when that case
        // applies. From the spherical law of sines, the region may contain
        // nearly antipodal points only if
        //
        //   max_lat_gap * lng_gap < (4.309 + 0.75) * (π/2) * dblEpsilon
        //                         ~= 1.765e-15
        if lat_gap_south.max(lat_gap_north) * lng_gap < 1.765e-15 {
            return Rect::full();
        }
    }

    // In the worst case the errors when computing the latitude bound for a
    // subregion could go in the opposite direction as the errors when
    // computing the bound for the original region, so we double the
    // maximum latitude error of add_point. For longitude, atan2 is
    // correctly rounded so no additional expansion is necessary unless the
    // subregion might contain edges spanning (π − 2·dblEpsilon) or more in
    // longitude, in which case add_point would set the longitude bound to
    // full (this corresponds to lng_gap <= 0 below).
    let lat_expansion = 9. * DBL_EPSILON;
    let lng_expansion = if lng_gap <= 0. { PI } else { 0. };
    bound
        .expanded(&LatLng::from_radians(lat_expansion, lng_expansion))
        .polar_closure()
}
