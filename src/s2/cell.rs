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

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::consts::DBL_EPSILON;
use crate::r1;
use crate::r2;
use crate::s1;
use crate::s2::cellid::{ij_level_to_bound_uv, size_ij, CellID};
use crate::s2::latlng::{latitude, longitude, LatLng};
use crate::s2::metric::AVG_AREA;
use crate::s2::point::Point;
use crate::s2::rect::Rect;
use crate::s2::region::Region;
use crate::s2::stuv::{face_uv_to_xyz, face_xyz_to_uv, u_axis, u_norm, v_axis, v_norm};

/// The maximum error in a latitude or longitude computed from a cell
/// vertex: 2^-51 radians, absorbing the asin/atan2 roundoff.
const MAX_ERROR: f64 = 4.440892098500626e-16;

/// The latitude reached by the vertices of the two polar face cells:
/// asin(√⅓), pulled in by MAX_ERROR so the level-0 bounds stay
/// conservative.
const POLE_MIN_LAT: f64 = 0.6154797086703873 - MAX_ERROR;

/// Cell is a materialized cell of the decomposition: the cube face, the
/// subdivision level, the Hilbert curve orientation and the cube-space
/// bounds, all derived from a CellID. Unlike CellIDs, it supports efficient
/// containment and intersection tests.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Cell {
    pub face: u8,
    pub level: u8,
    pub orientation: u8,
    pub id: CellID,
    pub uv: r2::Rect,
}

impl From<&CellID> for Cell {
    fn from(id: &CellID) -> Self {
        let (face, i, j, orientation) = id.face_ij_orientation();
        let level = id.level();
        Cell {
            face,
            level: level as u8,
            orientation,
            id: *id,
            uv: ij_level_to_bound_uv(i, j, level),
        }
    }
}

impl From<CellID> for Cell {
    fn from(id: CellID) -> Self {
        Cell::from(&id)
    }
}

impl From<&Point> for Cell {
    /// Constructs the leaf cell containing the given point.
    fn from(p: &Point) -> Self {
        Cell::from(CellID::from(p))
    }
}

impl From<&LatLng> for Cell {
    /// Constructs the leaf cell containing the given coordinate.
    fn from(ll: &LatLng) -> Self {
        Cell::from(CellID::from(ll))
    }
}

impl Cell {
    pub fn id(&self) -> CellID {
        self.id
    }

    pub fn is_leaf(&self) -> bool {
        self.level as u64 == crate::s2::cellid::MAX_LEVEL
    }

    /// size_ij returns the edge length of this cell in (i,j) coordinates.
    pub fn size_ij(&self) -> u64 {
        size_ij(self.level as u64)
    }

    /// vertex_raw returns the k-th vertex of the cell (k = 0..3) in CCW
    /// order, starting from the lower left corner in (u,v)-space. The
    /// result is not unit length; see vertex.
    pub fn vertex_raw(&self, k: usize) -> Point {
        let v = self.uv.vertices()[k];
        Point(face_uv_to_xyz(self.face, v.x, v.y))
    }

    /// vertex returns the normalized k-th vertex of the cell.
    pub fn vertex(&self, k: usize) -> Point {
        Point(self.vertex_raw(k).0.normalize())
    }

    /// edge_raw returns the inward-facing normal of the great circle
    /// passing through the two vertices of the k-th edge, for k = 0..3 in
    /// bottom, right, top, left (S, E, N, W) order. The result is not unit
    /// length.
    pub fn edge_raw(&self, k: usize) -> Point {
        match k {
            0 => Point(v_norm(self.face, self.uv.y.lo)),
            1 => Point(u_norm(self.face, self.uv.x.hi)),
            2 => Point(v_norm(self.face, self.uv.y.hi) * -1.),
            _ => Point(u_norm(self.face, self.uv.x.lo) * -1.),
        }
    }

    /// edge returns the normalized edge normal; see edge_raw.
    pub fn edge(&self, k: usize) -> Point {
        Point(self.edge_raw(k).0.normalize())
    }

    /// bound_uv returns the bounds of this cell in (u,v)-space.
    pub fn bound_uv(&self) -> r2::Rect {
        self.uv
    }

    /// center returns the direction vector corresponding to the center in
    /// (s,t)-space of the cell, normalized.
    pub fn center(&self) -> Point {
        Point(self.id.raw_point().normalize())
    }

    /// children returns the four direct children of this cell in Hilbert
    /// curve order, or None for leaf cells.
    pub fn children(&self) -> Option<[Cell; 4]> {
        if self.is_leaf() {
            return None;
        }
        let ids = self.id.children();
        Some([
            Cell::from(ids[0]),
            Cell::from(ids[1]),
            Cell::from(ids[2]),
            Cell::from(ids[3]),
        ])
    }

    /// latitude returns the latitude of the cell vertex with the given
    /// (i,j) ∈ {0,1}² corner selection, in radians.
    fn latitude(&self, i: usize, j: usize) -> f64 {
        let p = Point(face_uv_to_xyz(
            self.face,
            self.uv.x.lo * ((1 - i) as f64) + self.uv.x.hi * (i as f64),
            self.uv.y.lo * ((1 - j) as f64) + self.uv.y.hi * (j as f64),
        ));
        latitude(&p).rad()
    }

    /// longitude returns the longitude of the cell vertex with the given
    /// (i,j) ∈ {0,1}² corner selection, in radians.
    fn longitude(&self, i: usize, j: usize) -> f64 {
        let p = Point(face_uv_to_xyz(
            self.face,
            self.uv.x.lo * ((1 - i) as f64) + self.uv.x.hi * (i as f64),
            self.uv.y.lo * ((1 - j) as f64) + self.uv.y.hi * (j as f64),
        ));
        longitude(&p).rad()
    }

    /// rect_bound returns the bounding latitude-longitude rectangle of this
    /// cell. The bound is conservative but not exact.
    pub fn rect_bound(&self) -> Rect {
        if self.level > 0 {
            // Except for level-0 cells, the latitude and longitude extremes
            // are attained at the vertices: the latitude range is
            // determined by one pair of diagonally opposite vertices and
            // the longitude range by the other pair.
            let u = self.uv.x.lo + self.uv.x.hi;
            let v = self.uv.y.lo + self.uv.y.hi;

            // The maximum |latitude| is attained at vertex (i, j) chosen by
            // the z-components of the face axes together with the side of
            // the face the cell lies on.
            let i = if u_axis(self.face).z == 0. {
                usize::from(u < 0.)
            } else {
                usize::from(u > 0.)
            };
            let j = if v_axis(self.face).z == 0. {
                usize::from(v < 0.)
            } else {
                usize::from(v > 0.)
            };

            let lat = r1::Interval::from_point(self.latitude(i, j))
                + self.latitude(1 - i, 1 - j);
            let lng = s1::interval::EMPTY
                + self.longitude(i, 1 - j)
                + self.longitude(1 - i, j);

            // We grow the bounds slightly to make sure that the bounding
            // rectangle contains the LatLng of any point contained by the
            // cell as computed in floating point: normalization of a
            // vertex can move it by up to 0.5·DBL_EPSILON radians, and the
            // lat/lng conversion adds asin/atan2 roundoff.
            let bound = Rect { lat, lng };
            return bound
                .expanded(&LatLng::from_radians(MAX_ERROR, MAX_ERROR))
                .polar_closure();
        }

        // The 4 cells around the equator extend to ±45° latitude at the
        // midpoints of their top and bottom edges. The two polar cells
        // extend down to ±35.26° at their vertices. The maximum error in
        // this calculation is 0.5·DBL_EPSILON.
        let bound = match self.face {
            0 => Rect {
                lat: r1::Interval::new(-FRAC_PI_4, FRAC_PI_4),
                lng: s1::Interval::new(-FRAC_PI_4, FRAC_PI_4),
            },
            1 => Rect {
                lat: r1::Interval::new(-FRAC_PI_4, FRAC_PI_4),
                lng: s1::Interval::new(FRAC_PI_4, 3. * FRAC_PI_4),
            },
            2 => Rect {
                lat: r1::Interval::new(POLE_MIN_LAT, FRAC_PI_2),
                lng: s1::interval::FULL,
            },
            3 => Rect {
                lat: r1::Interval::new(-FRAC_PI_4, FRAC_PI_4),
                lng: s1::Interval::new(3. * FRAC_PI_4, -3. * FRAC_PI_4),
            },
            4 => Rect {
                lat: r1::Interval::new(-FRAC_PI_4, FRAC_PI_4),
                lng: s1::Interval::new(-3. * FRAC_PI_4, -FRAC_PI_4),
            },
            _ => Rect {
                lat: r1::Interval::new(-FRAC_PI_2, -POLE_MIN_LAT),
                lng: s1::interval::FULL,
            },
        };

        // Expand the latitude to compensate for the error when a point is
        // converted to a LatLng for a containment test. Longitude is
        // computed via a single atan2 call, which is semi-monotonic, so no
        // longitude expansion is needed.
        bound.expanded(&LatLng::from_radians(MAX_ERROR, 0.))
    }

    /// average_area returns the average area of cells at the given level,
    /// in steradians.
    pub fn average_area(level: u8) -> f64 {
        AVG_AREA.value(level)
    }
}

impl Region for Cell {
    fn rect_bound(&self) -> Rect {
        Cell::rect_bound(self)
    }

    fn contains_point(&self, p: &Point) -> bool {
        let (u, v) = match face_xyz_to_uv(self.face, p) {
            Some(uv) => uv,
            None => return false,
        };

        // Expand the (u,v) bound so that Cell::from(&p).contains_point(&p)
        // holds despite the error converting between (u,v)- and
        // (s,t)-space.
        self.uv
            .expanded_by_margin(DBL_EPSILON)
            .contains_point(&r2::Point::new(u, v))
    }

    fn contains_cell(&self, other: &Cell) -> bool {
        self.id.contains(&other.id)
    }

    fn intersects_cell(&self, other: &Cell) -> bool {
        self.id.intersects(&other.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s2::random;
    use std::f64::consts::PI;

    #[test]
    fn test_faces() {
        use std::collections::HashMap;
        let mut edge_counts: HashMap<(i64, i64, i64), i32> = HashMap::new();
        let mut vertex_counts: HashMap<(i64, i64, i64), i32> = HashMap::new();

        let key = |p: &Point| {
            (
                (p.0.x * 1e12).round() as i64,
                (p.0.y * 1e12).round() as i64,
                (p.0.z * 1e12).round() as i64,
            )
        };

        for face in 0..6u64 {
            let id = CellID::from_face(face);
            let cell = Cell::from(id);
            assert_eq!(cell.id, id);
            assert_eq!(cell.face as u64, face);
            assert_eq!(cell.level, 0);

            // Top-level faces have alternating orientations to get RHS
            // coordinates.
            assert_eq!(cell.orientation, cell.face & 1);
            assert!(!cell.is_leaf());

            for k in 0..4 {
                *edge_counts.entry(key(&cell.edge(k))).or_insert(0) += 1;
                *vertex_counts.entry(key(&cell.vertex(k))).or_insert(0) += 1;
                // Each edge normal is orthogonal to its two vertices.
                assert_f64_eq!(cell.vertex(k).0.dot(&cell.edge(k).0), 0.);
                assert_f64_eq!(cell.vertex((k + 1) & 3).0.dot(&cell.edge(k).0), 0.);
                // Vertices wind CCW around the cell.
                assert_f64_eq!(
                    cell.vertex(k)
                        .0
                        .cross(&cell.vertex((k + 1) & 3).0)
                        .normalize()
                        .dot(&cell.edge(k).0.normalize()),
                    1.
                );
            }

            // Cells at level 0 contain their center.
            assert!(cell.contains_point(&cell.center()));
        }

        // Check that edges have multiplicity 2 and vertices have
        // multiplicity 3 on the cube.
        for (_, count) in edge_counts {
            assert_eq!(count, 2);
        }
        for (_, count) in vertex_counts {
            assert_eq!(count, 3);
        }
    }

    #[test]
    fn test_level_0_rect_bounds() {
        // The level-0 bounding rectangles are the hard-coded table.
        let want: [(f64, f64, f64, f64); 6] = [
            (-FRAC_PI_4, FRAC_PI_4, -FRAC_PI_4, FRAC_PI_4),
            (-FRAC_PI_4, FRAC_PI_4, FRAC_PI_4, 3. * FRAC_PI_4),
            (POLE_MIN_LAT, FRAC_PI_2, -PI, PI),
            (-FRAC_PI_4, FRAC_PI_4, 3. * FRAC_PI_4, -3. * FRAC_PI_4),
            (-FRAC_PI_4, FRAC_PI_4, -3. * FRAC_PI_4, -FRAC_PI_4),
            (-FRAC_PI_2, -POLE_MIN_LAT, -PI, PI),
        ];
        for face in 0..6u64 {
            let bound = Cell::from(CellID::from_face(face)).rect_bound();
            let (lat_lo, lat_hi, lng_lo, lng_hi) = want[face as usize];
            assert!((bound.lat.lo - lat_lo).abs() <= 2. * MAX_ERROR);
            assert!((bound.lat.hi - lat_hi).abs() <= 2. * MAX_ERROR);
            assert!((bound.lng.lo - lng_lo).abs() <= 2. * MAX_ERROR);
            assert!((bound.lng.hi - lng_hi).abs() <= 2. * MAX_ERROR);
            // The polar faces cover all longitudes.
            if face == 2 || face == 5 {
                assert!(bound.lng.is_full());
            }
        }
    }

    #[test]
    fn test_rect_bound_contains_vertices() {
        let mut rng = random::rng();
        for _ in 0..100 {
            let cell = Cell::from(random::cellid(&mut rng));
            let bound = cell.rect_bound();
            for k in 0..4 {
                let v = cell.vertex(k);
                assert!(
                    bound.contains_point(&v),
                    "bound {} of {:?} does not contain vertex {}",
                    bound,
                    cell.id,
                    v
                );
            }
            // The center is always strictly inside.
            assert!(bound.contains_point(&cell.center()));
        }
    }

    #[test]
    fn test_rect_bound_at_poles() {
        // Cells touching a pole must widen their longitude to full.
        let north = Cell::from(&Point(crate::r3::vector::Vector::new(0., 0., 1.)));
        assert!(north.rect_bound().lng.is_full());
        let south = Cell::from(&Point(crate::r3::vector::Vector::new(0., 0., -1.)));
        assert!(south.rect_bound().lng.is_full());
    }

    #[test]
    fn test_contains_point() {
        let mut rng = random::rng();
        for _ in 0..100 {
            let p = random::point(&mut rng);
            let cell = Cell::from(&p);
            assert!(cell.contains_point(&p));

            // Containment is inherited by ancestors.
            for level in (0..crate::s2::cellid::MAX_LEVEL).step_by(7) {
                assert!(Cell::from(cell.id.parent(level)).contains_point(&p));
            }
        }
    }

    #[test]
    fn test_contains_point_consistent_with_cellid() {
        let mut rng = random::rng();
        for _ in 0..100 {
            let cell = Cell::from(random::cellid(&mut rng));
            // The cell center maps back into the cell.
            assert!(cell.contains_point(&cell.center()));
            assert!(cell.id.contains(&CellID::from(&cell.center())));
        }
    }

    #[test]
    fn test_children() {
        let cell = Cell::from(CellID::from_face(3));
        let children = cell.children().unwrap();
        let mut child_area = 0.;
        for child in &children {
            assert_eq!(child.level, 1);
            assert!(cell.contains_cell(child));
            assert!(cell.intersects_cell(child));
            child_area += Cell::average_area(child.level);
            // Children tile the parent's uv bound.
            assert!(cell.uv.contains(&child.uv));
        }
        assert_f64_eq!(child_area, Cell::average_area(0));

        let leaf = Cell::from(CellID::from_face(0).child_begin_at_level(30));
        assert!(leaf.children().is_none());
    }

    #[test]
    fn test_leaf_to_face_bound() {
        // A point at 45°N on the Greenwich meridian projects onto face 0;
        // its leaf cell's level-0 ancestor is the face-0 cell, whose bound
        // is the quarter-sphere square.
        let p = Point::from(LatLng::from_radians(FRAC_PI_4, 0.));
        let leaf = CellID::from(&p);
        assert_eq!(leaf.face(), 0);
        assert!(leaf.is_leaf());

        let face_cell = leaf.parent(0);
        assert_eq!(face_cell.0, 0x1000000000000000);
        assert_eq!(face_cell.to_token(), "1");

        let bound = Cell::from(face_cell).rect_bound();
        assert!((bound.lat.lo - -FRAC_PI_4).abs() <= 2. * MAX_ERROR);
        assert!((bound.lat.hi - FRAC_PI_4).abs() <= 2. * MAX_ERROR);
        assert!((bound.lng.lo - -FRAC_PI_4).abs() <= 2. * MAX_ERROR);
        assert!((bound.lng.hi - FRAC_PI_4).abs() <= 2. * MAX_ERROR);
        assert!(bound.contains_point(&p));
    }

    #[test]
    fn test_size_ij() {
        assert_eq!(Cell::from(CellID::from_face(0)).size_ij(), 1 << 30);
        let leaf = Cell::from(CellID::from_face(0).child_begin_at_level(30));
        assert_eq!(leaf.size_ij(), 1);
        assert!(leaf.is_leaf());
    }
}
