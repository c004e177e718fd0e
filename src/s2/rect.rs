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

use std::f64::consts::FRAC_PI_2;

use crate::r1;
use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Deg, Rad};
use crate::s1::interval;
use crate::s1::interval::Interval;
use crate::s2::cell::Cell;
use crate::s2::edgeutil::{distance_from_segment, simple_crossing};
use crate::s2::latlng::{longitude, LatLng};
use crate::s2::point::Point;
use crate::s2::region::Region;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rect represents a closed latitude-longitude rectangle: the product of a
/// closed latitude interval and a circular longitude interval. It can
/// represent the empty and full rectangles as well as single points, and
/// rectangles whose longitude interval crosses the ±π antimeridian.
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub lat: r1::Interval,
    pub lng: Interval,
}

/// The range of valid latitudes.
pub const VALID_RECT_LAT_RANGE: r1::Interval = r1::Interval {
    lo: -FRAC_PI_2,
    hi: FRAC_PI_2,
};

/// The range of valid longitudes.
pub const VALID_RECT_LNG_RANGE: Interval = interval::FULL;

impl Rect {
    /// empty returns the canonical empty rectangle.
    pub fn empty() -> Self {
        Rect {
            lat: r1::interval::EMPTY,
            lng: interval::EMPTY,
        }
    }

    /// full returns the rectangle covering the whole sphere.
    pub fn full() -> Self {
        Rect {
            lat: VALID_RECT_LAT_RANGE,
            lng: VALID_RECT_LNG_RANGE,
        }
    }

    /// from_center_size constructs a rectangle with the given size centered
    /// around the given point. The center must be valid, and the sizes are
    /// clamped so the result stays valid (a high latitude with a large
    /// height loses its top rather than wrapping over the pole).
    pub fn from_center_size(center: LatLng, size: LatLng) -> Self {
        let half = LatLng {
            lat: size.lat * 0.5,
            lng: size.lng * 0.5,
        };
        Rect::from(center).expanded(&half)
    }

    pub fn from_degrees(lat_lo: f64, lng_lo: f64, lat_hi: f64, lng_hi: f64) -> Self {
        Rect {
            lat: r1::Interval {
                lo: Angle::from(Deg(lat_lo)).rad(),
                hi: Angle::from(Deg(lat_hi)).rad(),
            },
            lng: Interval::new(
                Angle::from(Deg(lng_lo)).rad(),
                Angle::from(Deg(lng_hi)).rad(),
            ),
        }
    }

    /// from_point_pair constructs the minimal rectangle containing the two
    /// given (valid) coordinates.
    pub fn from_point_pair(a: &LatLng, b: &LatLng) -> Self {
        Rect {
            lat: r1::Interval::from_point_pair(a.lat.rad(), b.lat.rad()),
            lng: Interval::from_point_pair(a.lng.rad(), b.lng.rad()),
        }
    }

    /// is_valid reports whether the latitude bounds lie in [-π/2, π/2],
    /// the longitude interval is valid, and the emptiness of the two
    /// intervals agrees.
    pub fn is_valid(&self) -> bool {
        self.lat.lo.abs() <= FRAC_PI_2
            && self.lat.hi <= FRAC_PI_2
            && self.lng.is_valid()
            && self.lat.is_empty() == self.lng.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lat == VALID_RECT_LAT_RANGE && self.lng.is_full()
    }

    /// is_point reports whether the rectangle is a single point.
    pub fn is_point(&self) -> bool {
        self.lat.lo == self.lat.hi && self.lng.lo == self.lng.hi
    }

    /// vertex returns the k-th vertex of the rectangle (k = 0..3) in CCW
    /// order: lower left, lower right, upper right, upper left.
    pub fn vertex(&self, k: u8) -> LatLng {
        let (lat, lng) = match k {
            0 => (self.lat.lo, self.lng.lo),
            1 => (self.lat.lo, self.lng.hi),
            2 => (self.lat.hi, self.lng.hi),
            _ => (self.lat.hi, self.lng.lo),
        };
        LatLng::from_radians(lat, lng)
    }

    pub fn lo(&self) -> LatLng {
        self.vertex(0)
    }

    pub fn hi(&self) -> LatLng {
        self.vertex(2)
    }

    pub fn center(&self) -> LatLng {
        LatLng::from_radians(self.lat.center(), self.lng.center())
    }

    /// size returns the width and height of this rectangle in
    /// latitude-longitude space.
    pub fn size(&self) -> LatLng {
        LatLng::from_radians(self.lat.len(), self.lng.len())
    }

    /// area returns the surface area of the rectangle, in steradians.
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            0.
        } else {
            // The area of a spherical zone slice is the longitude span
            // times the difference of the sines of the latitude bounds.
            let cap_diff = (self.lat.hi.sin() - self.lat.lo.sin()).abs();
            self.lng.len() * cap_diff
        }
    }

    /// expanded returns a rectangle that has been expanded by margin.lat on
    /// each side in the latitude direction and by margin.lng in the
    /// longitude direction. The latitude is clamped to the valid range and
    /// the longitude wraps; negative margins shrink the rectangle.
    pub fn expanded(&self, margin: &LatLng) -> Self {
        let lat = self.lat.expanded(margin.lat.rad());
        let lng = self.lng.expanded(margin.lng.rad());

        if lat.is_empty() || lng.is_empty() {
            Rect::empty()
        } else {
            Rect {
                lat: lat.intersection(&VALID_RECT_LAT_RANGE),
                lng,
            }
        }
    }

    /// polar_closure returns the rectangle unmodified if it does not touch
    /// either pole, and otherwise widens its longitude to full, since a
    /// rectangle touching a pole contains all longitudes there.
    pub fn polar_closure(&self) -> Self {
        if self.lat.lo == -FRAC_PI_2 || self.lat.hi == FRAC_PI_2 {
            Rect {
                lat: self.lat,
                lng: interval::FULL,
            }
        } else {
            *self
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Rect {
            lat: self.lat.union(&other.lat),
            lng: self.lng.union(&other.lng),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        let lat = self.lat.intersection(&other.lat);
        let lng = self.lng.intersection(&other.lng);
        if lat.is_empty() || lng.is_empty() {
            Rect::empty()
        } else {
            Rect { lat, lng }
        }
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.lat.intersects(&other.lat) && self.lng.intersects(&other.lng)
    }

    /// interior_intersects reports whether the interior of this rectangle
    /// intersects the given other rectangle (including its boundary).
    pub fn interior_intersects(&self, other: &Self) -> bool {
        self.lat.interior_intersects(&other.lat) && self.lng.interior_intersects(&other.lng)
    }

    /// contains reports whether this rectangle contains the other.
    pub fn contains(&self, other: &Self) -> bool {
        self.lat.contains_interval(&other.lat) && self.lng.contains_interval(&other.lng)
    }

    /// interior_contains reports whether the interior of this rectangle
    /// contains the other rectangle (including its boundary).
    pub fn interior_contains(&self, other: &Self) -> bool {
        self.lat.interior_contains_interval(&other.lat)
            && self.lng.interior_contains_interval(&other.lng)
    }

    /// contains_latlng reports whether the given coordinate is within the
    /// rectangle. Invalid coordinates are never contained.
    pub fn contains_latlng(&self, ll: &LatLng) -> bool {
        ll.is_valid() && self.lat.contains(ll.lat.rad()) && self.lng.contains(ll.lng.rad())
    }

    /// interior_contains_latlng reports whether the given coordinate lies
    /// strictly inside the rectangle.
    pub fn interior_contains_latlng(&self, ll: &LatLng) -> bool {
        ll.is_valid()
            && self.lat.interior_contains(ll.lat.rad())
            && self.lng.interior_contains(ll.lng.rad())
    }

    pub fn approx_eq(&self, other: &Self) -> bool {
        self.lat.approx_eq(&other.lat) && self.lng.approx_eq(&other.lng)
    }

    /// distance_to_latlng returns the minimum distance (measured along the
    /// surface of the sphere) from the given valid point to the rectangle,
    /// both boundary and interior. The rectangle must be non-empty.
    pub fn distance_to_latlng(&self, ll: &LatLng) -> Angle {
        if self.lng.contains(ll.lng.rad()) {
            // The closest point lies straight north or south.
            return Rad((ll.lat.rad() - self.lat.hi)
                .max(self.lat.lo - ll.lat.rad())
                .max(0.))
            .into();
        }

        // The closest point is on whichever longitudinal edge of the
        // rectangle is nearest around the circle; find that edge and take
        // the arc distance to the geodesic segment joining its corners.
        let i = Interval::new(self.lng.hi, self.lng.complement_center());
        let rect_lng = if i.contains(ll.lng.rad()) {
            self.lng.hi
        } else {
            self.lng.lo
        };
        let lo = LatLng::from_radians(self.lat.lo, rect_lng);
        let hi = LatLng::from_radians(self.lat.hi, rect_lng);
        distance_from_segment(&Point::from(ll), &Point::from(lo), &Point::from(hi))
    }

    /// distance_to_rect returns the minimum distance (measured along the
    /// surface of the sphere) between this rectangle and the other. Both
    /// rectangles must be non-empty.
    pub fn distance_to_rect(&self, other: &Self) -> Angle {
        let a = self;
        let b = other;

        // The trivial cases: overlapping longitude intervals mean the
        // shortest path travels along a line of longitude.
        if a.lng.intersects(&b.lng) {
            if a.lat.intersects(&b.lat) {
                return Rad(0.).into();
            }
            let gap = if a.lat.lo > b.lat.hi {
                a.lat.lo - b.lat.hi
            } else {
                b.lat.lo - a.lat.hi
            };
            return Rad(gap).into();
        }

        // Otherwise the closest points occur somewhere on the pair of
        // longitudinal edges which are nearest in longitude-space.
        let lo_hi = Interval::from_point_pair(a.lng.lo, b.lng.hi);
        let hi_lo = Interval::from_point_pair(a.lng.hi, b.lng.lo);
        let (a_lng, b_lng) = if lo_hi.len() < hi_lo.len() {
            (a.lng.lo, b.lng.hi)
        } else {
            (a.lng.hi, b.lng.lo)
        };

        // The shortest distance between the two longitudinal segments
        // includes at least one segment endpoint.
        let a_lo = Point::from(LatLng::from_radians(a.lat.lo, a_lng));
        let a_hi = Point::from(LatLng::from_radians(a.lat.hi, a_lng));
        let b_lo = Point::from(LatLng::from_radians(b.lat.lo, b_lng));
        let b_hi = Point::from(LatLng::from_radians(b.lat.hi, b_lng));

        distance_from_segment(&a_lo, &b_lo, &b_hi)
            .min(distance_from_segment(&a_hi, &b_lo, &b_hi))
            .min(distance_from_segment(&b_lo, &a_lo, &a_hi))
            .min(distance_from_segment(&b_hi, &a_lo, &a_hi))
    }
}

impl std::ops::Add<&LatLng> for &Rect {
    type Output = Rect;

    /// Expands the rectangle to include the given (valid) point.
    fn add(self, ll: &LatLng) -> Self::Output {
        if !ll.is_valid() {
            *self
        } else {
            Rect {
                lat: self.lat + ll.lat.rad(),
                lng: self.lng + ll.lng.rad(),
            }
        }
    }
}

impl From<LatLng> for Rect {
    /// Constructs the single-point rectangle at the given coordinate.
    fn from(ll: LatLng) -> Self {
        Rect {
            lat: r1::Interval::from_point(ll.lat.rad()),
            lng: Interval {
                lo: ll.lng.rad(),
                hi: ll.lng.rad(),
            },
        }
    }
}

impl Region for Rect {
    /// rect_bound returns itself.
    fn rect_bound(&self) -> Rect {
        *self
    }

    /// contains_cell reports whether the cell is contained by this
    /// rectangle: true iff the rectangle contains the cell's bounding
    /// rectangle, which is exact given that the cell bound is tight.
    fn contains_cell(&self, c: &Cell) -> bool {
        self.contains(&c.rect_bound())
    }

    /// intersects_cell reports whether this rectangle intersects the given
    /// cell. This is an exact test and may be fairly expensive.
    fn intersects_cell(&self, cell: &Cell) -> bool {
        // Dispose of the cases where one region contains the other; once
        // those are out of the way the regions intersect iff their
        // boundaries do.
        if self.is_empty() {
            return false;
        }
        if self.contains_point(&Point(cell.id.raw_point())) {
            return true;
        }
        if cell.contains_point(&Point::from(self.center())) {
            return true;
        }

        // Quick rejection; not needed for correctness.
        if !self.intersects(&cell.rect_bound()) {
            return false;
        }

        // The boundary tests below only detect crossings at edge
        // interiors, so corners of either region sitting inside the other
        // need their own checks.
        let corners: [Point; 4] = std::array::from_fn(|k| cell.vertex(k));
        for (k, corner) in corners.iter().enumerate() {
            if self.contains_point(corner) {
                return true;
            }
            if cell.contains_point(&Point::from(self.vertex(k as u8))) {
                return true;
            }
        }

        boundary_intersects(self, &corners)
    }

    /// contains_point reports whether the given point is within the
    /// rectangle.
    fn contains_point(&self, p: &Point) -> bool {
        self.contains_latlng(&LatLng::from(p))
    }
}

/// boundary_intersects reports whether any cell edge (the geodesic between
/// consecutive corners) crosses the boundary of the rectangle. The
/// rectangle's boundary consists of two meridian arcs, which are geodesics,
/// and two parallels, which are curved and at least one of which is
/// concave, so each cell edge gets up to four tests.
fn boundary_intersects(rect: &Rect, corners: &[Point; 4]) -> bool {
    for k in 0..4 {
        let a = &corners[k];
        let b = &corners[(k + 1) % 4];

        // A cell edge whose endpoint longitudes stay clear of the
        // rectangle's longitude span cannot produce a boundary crossing.
        let ab_lng = Interval::from_point_pair(longitude(a).rad(), longitude(b).rad());
        if !rect.lng.intersects(&ab_lng) {
            continue;
        }

        // The parallels.
        if crosses_parallel(a, b, Rad(rect.lat.lo).into(), rect.lng)
            || crosses_parallel(a, b, Rad(rect.lat.hi).into(), rect.lng)
        {
            return true;
        }
        // The meridian arcs.
        if ab_lng.contains(rect.lng.lo)
            && crosses_meridian(a, b, rect.lat, Rad(rect.lng.lo).into())
        {
            return true;
        }
        if ab_lng.contains(rect.lng.hi)
            && crosses_meridian(a, b, rect.lat, Rad(rect.lng.hi).into())
        {
            return true;
        }
    }
    false
}

/// circle_frame returns two orthonormal directions of the great circle
/// through A and B: the apex, where the circle attains its maximum
/// latitude, and the horizon direction a quarter turn further along the
/// circle. Degenerate inputs (coincident or antipodal points, or a circle
/// lying in the equatorial plane) yield zero vectors.
fn circle_frame(a: &Point, b: &Point) -> (Vector, Vector) {
    let mut pole = a.0.cross(&b.0);
    if pole.z < 0. {
        pole = -pole;
    }
    let horizon = pole.cross(&Vector::new(0., 0., 1.)).normalize();
    let apex = horizon.cross(&pole).normalize();
    (apex, horizon)
}

/// crosses_parallel reports whether the geodesic AB meets the circle of
/// constant latitude restricted to the given longitude span. The points
/// must be unit length.
fn crosses_parallel(a: &Point, b: &Point, lat: Angle, lng: Interval) -> bool {
    // A parallel is not a geodesic: a great circle meets it at zero, one,
    // or two points, placed symmetrically about the circle's apex.
    let (apex, horizon) = circle_frame(a, b);
    let sin_lat = lat.rad().sin();
    if sin_lat.abs() >= apex.z {
        // The circle stays on one side of this parallel (or the frame is
        // degenerate).
        return false;
    }

    // Positions along the circle, as angles measured from the apex.
    let turn = |p: &Point| p.0.dot(&horizon).atan2(p.0.dot(&apex));
    let ab_span = Interval::from_point_pair(turn(a), turn(b));

    // The circle reaches the parallel at ±theta around the apex. Each
    // candidate counts only if it lies on the edge and within the
    // longitude span.
    let cos_theta = sin_lat / apex.z;
    let sin_theta = (1. - cos_theta * cos_theta).sqrt();
    let theta = cos_theta.acos();
    for side in [1., -1.] {
        if !ab_span.contains(side * theta) {
            continue;
        }
        let hit = apex * cos_theta + horizon * (side * sin_theta);
        if lng.contains(hit.y.atan2(hit.x)) {
            return true;
        }
    }
    false
}

/// crosses_meridian reports whether the geodesic AB crosses the meridian
/// arc at the given longitude spanning the given latitudes. Meridian arcs
/// are themselves geodesics, so a single crossing test decides.
fn crosses_meridian(a: &Point, b: &Point, lat: r1::Interval, lng: Angle) -> bool {
    let south = Point::from(LatLng::from_radians(lat.lo, lng.rad()));
    let north = Point::from(LatLng::from_radians(lat.hi, lng.rad()));
    simple_crossing(&south, &north, a, b)
}

impl std::fmt::Debug for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[lo{:?}, hi{:?}]", self.lo(), self.hi())
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[lo{}, hi{}]", self.lo(), self.hi())
    }
}
