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

use crate::consts::remainder;
use crate::r3::vector::Vector;
use crate::s1::angle::{Angle, Deg, Rad};
use crate::s2::point::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// LatLng represents a point on the unit sphere as a pair of angles.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
    pub lat: Angle,
    pub lng: Angle,
}

impl LatLng {
    pub fn new(lat: Angle, lng: Angle) -> Self {
        LatLng { lat, lng }
    }

    pub fn from_degrees(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Deg(lat).into(),
            lng: Deg(lng).into(),
        }
    }

    pub fn from_radians(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Rad(lat).into(),
            lng: Rad(lng).into(),
        }
    }

    /// is_valid reports whether the latitude is in [-π/2, π/2] and the
    /// longitude is in [-π, π].
    pub fn is_valid(&self) -> bool {
        self.lat.rad().abs() <= PI / 2. && self.lng.rad().abs() <= PI
    }

    /// normalized returns the normalized version of this coordinate, with
    /// the latitude clamped to [-π/2, π/2] and the longitude reduced to
    /// [-π, π].
    pub fn normalized(&self) -> Self {
        let lat = Rad(self.lat.rad().clamp(-PI / 2., PI / 2.)).into();
        let lng = Rad(remainder(self.lng.rad(), 2. * PI)).into();
        LatLng { lat, lng }
    }

    /// distance returns the angle between two points.
    pub fn distance(&self, other: &Self) -> Angle {
        // Uses the Haversine formula, which is numerically stable for both
        // large and small distances.
        let lat1 = self.lat.rad();
        let lat2 = other.lat.rad();
        let lng1 = self.lng.rad();
        let lng2 = other.lng.rad();

        let dlat = (0.5 * (lat2 - lat1)).sin();
        let dlng = (0.5 * (lng2 - lng1)).sin();
        let x = dlat * dlat + dlng * dlng * lat1.cos() * lat2.cos();

        Rad(2. * x.sqrt().atan2((1. - x).max(0.).sqrt())).into()
    }
}

/// latitude returns the latitude of the given direction vector, which need
/// not be unit length.
pub fn latitude(p: &Point) -> Angle {
    let v = p.0;
    Rad(v.z.atan2((v.x * v.x + v.y * v.y).sqrt())).into()
}

/// longitude returns the longitude of the given direction vector, which
/// need not be unit length.
pub fn longitude(p: &Point) -> Angle {
    Rad(p.0.y.atan2(p.0.x)).into()
}

impl From<LatLng> for Point {
    fn from(ll: LatLng) -> Self {
        Point::from(&ll)
    }
}

impl<'a> From<&'a LatLng> for Point {
    fn from(ll: &'a LatLng) -> Self {
        let phi = ll.lat.rad();
        let theta = ll.lng.rad();
        let cosphi = phi.cos();
        Point(Vector::new(
            theta.cos() * cosphi,
            theta.sin() * cosphi,
            phi.sin(),
        ))
    }
}

impl From<Point> for LatLng {
    fn from(p: Point) -> Self {
        LatLng::from(&p)
    }
}

impl<'a> From<&'a Point> for LatLng {
    fn from(p: &'a Point) -> Self {
        LatLng {
            lat: latitude(p),
            lng: longitude(p),
        }
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{:.7}, {:.7}]", self.lat.deg(), self.lng.deg())
    }
}
