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

//! Per-level size metrics of the cell decomposition under the canonical
//! quadratic projection. A metric relates the angular size of cells at a
//! given level to the corresponding quantity on the sphere: a 1-dimensional
//! metric measures lengths (widths, edges, diagonals) in radians, a
//! 2-dimensional metric measures areas in steradians.

use std::f64::consts::PI;

/// Metric is a measure for cells at a given level: value(level) =
/// deriv × 2^(−dim·level).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Metric {
    /// Either 1 (for lengths) or 2 (for areas).
    pub dim: u8,
    /// The value of the metric at level 0.
    pub deriv: f64,
}

impl Metric {
    /// value returns the metric's size at the given level.
    pub fn value(&self, level: u8) -> f64 {
        // This is expanding deriv * 2^(-dim * level) without powi.
        let scale = ((-(self.dim as i32) * level as i32) as f64).exp2();
        self.deriv * scale
    }

    /// min_level returns the minimum level such that the metric is at most
    /// the given value, or MAX_LEVEL if there is no such level.
    pub fn min_level(&self, val: f64) -> u64 {
        if val < 0. {
            return crate::s2::stuv::MAX_LEVEL;
        }
        let level = -((val / self.deriv).log2() / self.dim as f64).floor() as i64;
        level.clamp(0, crate::s2::stuv::MAX_LEVEL as i64) as u64
    }

    /// max_level returns the maximum level such that the metric is at least
    /// the given value, or zero if there is no such level.
    pub fn max_level(&self, val: f64) -> u64 {
        if val <= 0. {
            return crate::s2::stuv::MAX_LEVEL;
        }
        let level = ((self.deriv / val).log2() / self.dim as f64).floor() as i64;
        level.clamp(0, crate::s2::stuv::MAX_LEVEL as i64) as u64
    }

    /// closest_level returns the level at which the metric has the closest
    /// value to the one given.
    pub fn closest_level(&self, val: f64) -> u64 {
        let factor = if self.dim == 2 { 2.0f64 } else { 2.0f64.sqrt() };
        self.min_level(factor * val)
    }
}

// Width metrics bound the minimum distance between opposite edge midpoints
// of a cell at a given level.
pub const MIN_WIDTH: Metric = Metric {
    dim: 1,
    deriv: 0.9428090415820635, // 2·√2/3
};
pub const AVG_WIDTH: Metric = Metric {
    dim: 1,
    deriv: 1.434523672886099389,
};
pub const MAX_WIDTH: Metric = Metric {
    dim: 1,
    deriv: 1.704897179199218452,
};

// Edge metrics bound the length of cell edges at a given level.
pub const MIN_EDGE: Metric = Metric {
    dim: 1,
    deriv: 0.9428090415820635, // 2·√2/3
};
pub const AVG_EDGE: Metric = Metric {
    dim: 1,
    deriv: 1.459213746386106062,
};
pub const MAX_EDGE: Metric = Metric {
    dim: 1,
    deriv: 1.704897179199218452,
};

// Diagonal metrics bound the distance between opposite cell corners.
pub const MIN_DIAG: Metric = Metric {
    dim: 1,
    deriv: 1.257078722109418, // 8·√2/9
};
pub const AVG_DIAG: Metric = Metric {
    dim: 1,
    deriv: 2.060422738998471683,
};
pub const MAX_DIAG: Metric = Metric {
    dim: 1,
    deriv: 2.438654594434021032,
};

// Area metrics bound the surface area of cells at a given level.
pub const MIN_AREA: Metric = Metric {
    dim: 2,
    deriv: 1.257078722109418, // 8·√2/9
};
pub const AVG_AREA: Metric = Metric {
    dim: 2,
    deriv: 4. * PI / 6.,
};
pub const MAX_AREA: Metric = Metric {
    dim: 2,
    deriv: 2.635799256963161491,
};

/// The maximum edge aspect ratio over all cells at any level: the longest
/// edge of a cell is never more than this factor longer than its shortest
/// edge.
pub const MAX_EDGE_ASPECT: f64 = 1.44261527445268292;

/// The maximum diagonal aspect ratio over all cells at any level: √3.
pub const MAX_DIAG_ASPECT: f64 = 1.7320508075688772;
