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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Angle represents a 1-D angle, stored in radians. No normalization is
/// enforced; use `normalized` to reduce into (-π, π].
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Angle(pub f64);

/// Rad wraps a value in radians for explicit conversion into an Angle.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Rad(pub f64);

/// Deg wraps a value in degrees for explicit conversion into an Angle.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Deg(pub f64);

impl Angle {
    /// rad returns the angle in radians.
    pub fn rad(&self) -> f64 {
        self.0
    }

    /// deg returns the angle in degrees.
    pub fn deg(&self) -> f64 {
        self.0 * (180. / PI)
    }

    pub fn abs(&self) -> Self {
        Angle(self.0.abs())
    }

    /// normalized returns an equivalent angle in (-π, π].
    pub fn normalized(&self) -> Self {
        let mut r = remainder(self.0, 2. * PI);
        if r <= -PI {
            r = PI;
        }
        Angle(r)
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 < other.0 {
            other
        } else {
            self
        }
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 > other.0 {
            other
        } else {
            self
        }
    }
}

impl From<Rad> for Angle {
    fn from(r: Rad) -> Self {
        Angle(r.0)
    }
}

impl From<Deg> for Angle {
    fn from(d: Deg) -> Self {
        Angle(d.0 * (PI / 180.))
    }
}

impl From<Angle> for Deg {
    fn from(a: Angle) -> Self {
        Deg(a.deg())
    }
}

impl From<Angle> for Rad {
    fn from(a: Angle) -> Self {
        Rad(a.0)
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Self::Output {
        Angle(self.0 + other.0)
    }
}

impl std::ops::Sub for Angle {
    type Output = Angle;
    fn sub(self, other: Angle) -> Self::Output {
        Angle(self.0 - other.0)
    }
}

impl std::ops::Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, m: f64) -> Self::Output {
        Angle(self.0 * m)
    }
}

impl std::ops::Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Self::Output {
        Angle(-self.0)
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:.7}", self.deg())
    }
}
