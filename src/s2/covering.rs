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

//! Approximate region covering: enumerating the cells at a fixed level
//! that intersect a region, by flood fill over edge neighbors.

use std::collections::HashSet;

use crate::s2::cell::Cell;
use crate::s2::cellid::{CellID, MAX_LEVEL};
use crate::s2::error::{Error, Result};
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::region::Region;

/// flood_fill_covering returns the cells at the given level whose bounding
/// rectangles intersect the given rectangle, starting the fill from the
/// cell containing the rectangle's center.
///
/// The output is the connected component of the level-L grid (under edge
/// adjacency) that starts at the center seed and stays inside the
/// rectangle, in the order visited. The seed cell is always emitted, even
/// in the pathological case where rounding near the ±π seam makes its
/// bound miss the rectangle. A rectangle disconnected across the seam can
/// leave a component uncovered; callers needing more completeness can
/// repeat the fill from additional seeds with flood_fill_covering_from.
///
/// The work grows with the number of intersecting cells; callers that need
/// bounded work should compare the rectangle's area against
/// 4·AVG_AREA.value(level) first.
pub fn flood_fill_covering(rect: &Rect, level: u64) -> Result<Vec<CellID>> {
    if level > MAX_LEVEL {
        return Err(Error::InvalidLevel(format!(
            "{} exceeds the maximum level {}",
            level, MAX_LEVEL
        )));
    }
    if !rect.is_valid() {
        return Err(Error::InvalidCoordinate(format!(
            "invalid rectangle {:?}",
            rect
        )));
    }
    if rect.is_empty() {
        return Ok(Vec::new());
    }

    let seed = CellID::from(&rect.center()).parent(level);
    Ok(flood_fill_covering_from(rect, seed))
}

/// flood_fill_covering_from runs the flood fill for the given rectangle
/// from an explicit seed cell, whose level selects the output level.
pub fn flood_fill_covering_from(rect: &Rect, seed: CellID) -> Vec<CellID> {
    let mut output = Vec::new();
    let mut frontier = Vec::new();
    let mut examined = HashSet::new();

    examined.insert(seed);
    output.push(seed);
    frontier.push(seed);

    while let Some(id) = frontier.pop() {
        for nbr in id.edge_neighbors() {
            if !examined.insert(nbr) {
                continue;
            }
            if rect.intersects(&Cell::from(nbr).rect_bound()) {
                output.push(nbr);
                frontier.push(nbr);
            }
        }
    }
    output
}

/// simple_covering returns the cells at the same level as start whose
/// exact intersection test against the region succeeds, flood filling from
/// start. Unlike the rectangle fill above, cells are only emitted if they
/// actually intersect the region.
pub fn simple_covering<R: Region>(region: &R, start: &Point, level: u64) -> Vec<CellID> {
    let seed = CellID::from(start).parent(level);

    let mut output = Vec::new();
    let mut frontier = Vec::new();
    let mut examined = HashSet::new();

    examined.insert(seed);
    frontier.push(seed);

    while let Some(id) = frontier.pop() {
        if !region.intersects_cell(&Cell::from(id)) {
            continue;
        }
        output.push(id);
        for nbr in id.edge_neighbors() {
            if examined.insert(nbr) {
                frontier.push(nbr);
            }
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s2::latlng::LatLng;
    use crate::s2::metric::AVG_AREA;
    use crate::s2::random;
    use rand::Rng;
    use std::f64::consts::PI;

    #[test]
    fn test_invalid_inputs() {
        let r = Rect::from_degrees(0., 0., 1., 1.);
        assert!(matches!(
            flood_fill_covering(&r, 31),
            Err(Error::InvalidLevel(_))
        ));

        let bad = Rect {
            lat: crate::r1::Interval::new(-2., 2.),
            lng: crate::s1::Interval::new(0., 1.),
        };
        assert!(matches!(
            flood_fill_covering(&bad, 5),
            Err(Error::InvalidCoordinate(_))
        ));

        assert_eq!(flood_fill_covering(&Rect::empty(), 5).unwrap(), Vec::new());
    }

    #[test]
    fn test_all_cells_intersect_rect() {
        // Every produced cell has a bounding rectangle intersecting the
        // input (modulo the unconditional seed).
        let mut rng = random::rng();
        for _ in 0..20 {
            let rect = random::rect(&mut rng, 0.05);
            let level = rng.gen_range(4..10);
            let covering = flood_fill_covering(&rect, level).unwrap();
            assert!(!covering.is_empty());
            for id in &covering[1..] {
                assert_eq!(id.level(), level);
                assert!(rect.intersects(&Cell::from(id).rect_bound()));
            }
            // The seed contains the rectangle center by construction.
            assert!(covering[0].contains(&CellID::from(&rect.center())));
        }
    }

    #[test]
    fn test_covering_covers_rect_samples() {
        // Points sampled inside the rectangle land in some covering cell.
        let mut rng = random::rng();
        for _ in 0..10 {
            let rect = random::rect(&mut rng, 0.02);
            if rect.is_empty() {
                continue;
            }
            let level = 6;
            let covering = flood_fill_covering(&rect, level).unwrap();
            for _ in 0..20 {
                let ll = LatLng::from_radians(
                    rng.gen_range(rect.lat.lo..=rect.lat.hi),
                    rect.lng.lo + rng.gen_range(0.0..=rect.lng.len()),
                )
                .normalized();
                let leaf = CellID::from(&ll);
                assert!(
                    covering.iter().any(|c| c.contains(&leaf)),
                    "covering of {} at level {} misses {}",
                    rect,
                    level,
                    ll
                );
            }
        }
    }

    #[test]
    fn test_small_rect_at_origin() {
        // A one-degree square at the origin, covered at level 8: all cell
        // centers stay within a couple of degrees of the origin.
        let rect = Rect {
            lat: crate::r1::Interval::new(0., PI / 180.),
            lng: crate::s1::Interval::new(0., PI / 180.),
        };
        let covering = flood_fill_covering(&rect, 8).unwrap();
        assert!(!covering.is_empty());

        let origin = Point::from(LatLng::from_degrees(0., 0.));
        for id in &covering {
            let center = Point::from(id);
            assert!(
                origin.distance(&center).deg() <= 2.,
                "cell {:?} center {} is too far from the rectangle",
                id,
                LatLng::from(&center)
            );
        }

        // The covering must include the cells of the rectangle's corners.
        for k in 0..4 {
            let corner = CellID::from(&rect.vertex(k)).parent(8);
            assert!(covering.contains(&corner));
        }
    }

    #[test]
    fn test_covering_size_matches_area() {
        // The number of covering cells is within a constant factor of the
        // rectangle area divided by the cell area.
        let rect = Rect::from_degrees(10., 10., 15., 20.);
        let level = 6;
        let covering = flood_fill_covering(&rect, level).unwrap();
        let expected = rect.area() / AVG_AREA.value(level as u8);
        assert!(
            (covering.len() as f64) < 4. * expected + 16.,
            "covering has {} cells, expected about {}",
            covering.len(),
            expected
        );
    }

    #[test]
    fn test_simple_covering_matches_exact_test() {
        let rect = Rect::from_degrees(-3., -3., 3., 3.);
        let covering = simple_covering(&rect, &Point::from(rect.center()), 7);
        assert!(!covering.is_empty());
        for id in &covering {
            assert_eq!(id.level(), 7);
            assert!(rect.intersects_cell(&Cell::from(id)));
        }
        // The cell containing the center is in the output.
        let seed = CellID::from(&Point::from(rect.center())).parent(7);
        assert!(covering.contains(&seed));
    }
}
