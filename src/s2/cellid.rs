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

use std::str::FromStr;

use lazy_static::lazy_static;

use crate::consts::clamp;
use crate::r1;
use crate::r2;
use crate::r3::vector::Vector;
use crate::s2::error::Error;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::stuv::{face_uv_to_xyz, siti_to_st, st_to_uv, uv_to_st, xyz_to_face_uv};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use crate::s2::stuv::{MAX_LEVEL, MAX_SIZE};

/// CellID uniquely identifies a cell in the cell decomposition of the unit
/// sphere. The most significant 3 bits encode the face number (0-5); the
/// remaining 61 bits encode the position of the center of this cell along a
/// space-filling Hilbert curve on that face.
///
/// Sequentially increasing cell ids follow a continuous space-filling curve
/// over the entire sphere:
///
///  - The id of a cell at level k consists of a 3-bit face number followed
///    by k bit pairs that recursively select one of the four children of
///    each cell. The next bit is always 1 ("the lsb"), and all following
///    bits are 0. The level of a cell is therefore determined by the
///    position of its lowest set bit: 2·(MAX_LEVEL − k) for a cell at
///    level k.
///
///  - The id of a parent cell is at the midpoint of the range of ids
///    spanned by its children (or by its descendants at any level).
///
/// The zero value is invalid and compares less than every valid id, so
/// sorting ids as unsigned 64-bit integers yields a valid traversal order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellID(pub u64);

pub const FACE_BITS: u64 = 3;
pub const NUM_FACES: u8 = 6;
/// The number of bits encoding the Hilbert curve position within a face,
/// including the level sentinel.
pub const POS_BITS: u64 = 2 * MAX_LEVEL + 1;
const WRAP_OFFSET: u64 = (NUM_FACES as u64) << POS_BITS;

const MAX_SIZE_I32: i32 = MAX_SIZE as i32;

const LOOKUP_BITS: u64 = 4;
pub const SWAP_MASK: u8 = 0x01;
pub const INVERT_MASK: u8 = 0x02;

/// lsb_for_level returns the sentinel ("lowest set") bit of any cell id at
/// the given level.
pub fn lsb_for_level(level: u64) -> u64 {
    1 << (2 * (MAX_LEVEL - level))
}

/// size_ij returns the edge length of cells at the given level in (i,j)
/// leaf-cell units.
pub fn size_ij(level: u64) -> u64 {
    1 << (MAX_LEVEL - level)
}

impl CellID {
    /// from_face returns the level-0 cell covering the given cube face.
    pub fn from_face(face: u64) -> Self {
        CellID((face << POS_BITS) + lsb_for_level(0))
    }

    /// from_face_pos_level returns a cell given its face in the range
    /// [0,5], the 61-bit Hilbert curve position within that face, and the
    /// level in the range [0, MAX_LEVEL]. The position is truncated to the
    /// Hilbert curve position at the center of the returned cell.
    pub fn from_face_pos_level(face: u64, pos: u64, level: u64) -> Self {
        CellID((face << POS_BITS) + (pos | 1)).parent(level)
    }

    /// from_face_ij returns the leaf cell with the given cube face in
    /// [0,5] and (i,j) leaf coordinates in [0, 2^MAX_LEVEL).
    pub fn from_face_ij(f: u8, i: i32, j: i32) -> Self {
        // Process the (i,j) bit interleaving in 8 groups of 4 bits each,
        // from most significant to least. The lookup table maps a 10-bit
        // key "iiiijjjjoo" (4 i-bits, 4 j-bits and the current Hilbert
        // orientation) to a 10-bit value "ppppppppoo" (8 position bits and
        // the orientation entering the next group).
        let mask = (1i32 << LOOKUP_BITS) - 1;
        let mut n = (f as u64) << (POS_BITS - 1);
        let mut bits = (f & SWAP_MASK) as i32;

        for k in (0..8i32).rev() {
            bits += ((i >> (k * LOOKUP_BITS as i32)) & mask) << (LOOKUP_BITS + 2);
            bits += ((j >> (k * LOOKUP_BITS as i32)) & mask) << 2;
            bits = LOOKUP.pos[bits as usize] as i32;
            n |= ((bits as u64) >> 2) << (k as u64 * 2 * LOOKUP_BITS);
            bits &= (SWAP_MASK | INVERT_MASK) as i32;
        }

        CellID(n * 2 + 1)
    }

    /// from_face_ij_wrap handles (i,j) coordinates that may lie up to one
    /// cell outside the face: the coordinates are clamped to the cells just
    /// beyond the boundary and reprojected through 3-D space to find the
    /// corresponding leaf cell on the adjacent face.
    fn from_face_ij_wrap(f: u8, mut i: i32, mut j: i32) -> Self {
        // Convert i and j to the coordinates of a leaf cell just beyond the
        // boundary of this face. This prevents 32-bit overflow in the case
        // of finding the neighbors of a face cell.
        i = clamp(i, -1, MAX_SIZE_I32);
        j = clamp(j, -1, MAX_SIZE_I32);

        // The linear u/v mapping below is the one used by the lowest cell
        // level, scaled so that the boundary cells map just outside [-1,1].
        // The clamp limit is the next representable value beyond 1.0 so
        // that the reprojection lands cleanly inside the adjacent face.
        const SCALE: f64 = 1.0 / (MAX_SIZE as f64);
        const LIMIT: f64 = 1.0 + f64::EPSILON;

        let u = clamp(SCALE * (2. * (i as f64) + 1. - MAX_SIZE as f64), -LIMIT, LIMIT);
        let v = clamp(SCALE * (2. * (j as f64) + 1. - MAX_SIZE as f64), -LIMIT, LIMIT);

        // Find the leaf cell coordinates on the adjacent face and convert
        // them to a cell id at the appropriate level.
        let (f, u, v) = xyz_to_face_uv(&face_uv_to_xyz(f, u, v));
        CellID::from_face_ij(f, st_to_ij(0.5 * (u + 1.)), st_to_ij(0.5 * (v + 1.)))
    }

    /// from_face_ij_same chooses the direct or wrapping constructor based
    /// on whether the (i,j) coordinates are known to lie on the same face.
    fn from_face_ij_same(f: u8, i: i32, j: i32, same_face: bool) -> Self {
        if same_face {
            CellID::from_face_ij(f, i, j)
        } else {
            CellID::from_face_ij_wrap(f, i, j)
        }
    }

    /// from_token returns the cell id for a hex-encoded token, or the
    /// invalid id CellID(0) for malformed tokens.
    pub fn from_token(s: &str) -> CellID {
        if s.len() > 16 {
            return CellID(0);
        }
        match u64::from_str_radix(s, 16) {
            Err(_) => CellID(0),
            Ok(mut v) => {
                if s.len() < 16 {
                    v <<= 4 * (16 - s.len());
                }
                CellID(v)
            }
        }
    }

    /// to_token returns a hex-encoded string of the id with trailing zero
    /// nibbles stripped. The invalid id CellID(0) encodes as "X", which no
    /// valid id produces, so tokens round-trip unambiguously.
    pub fn to_token(&self) -> String {
        if self.0 == 0 {
            "X".into()
        } else {
            format!("{:016x}", self.0).trim_end_matches('0').into()
        }
    }

    /// is_valid reports whether this is a well-formed cell id: face bits
    /// below 6 and the level sentinel present in an even bit position.
    pub fn is_valid(&self) -> bool {
        self.face() < NUM_FACES && (self.lsb() & 0x1555555555555555 != 0)
    }

    /// face returns the cube face for this cell id, in the range [0,5].
    pub fn face(&self) -> u8 {
        (self.0 >> POS_BITS) as u8
    }

    /// pos returns the 61-bit Hilbert curve position of this cell id
    /// within its face.
    pub fn pos(&self) -> u64 {
        self.0 & ((!0u64) >> FACE_BITS)
    }

    /// level returns the subdivision level of this cell id, in the range
    /// [0, MAX_LEVEL]. The id must not be zero.
    pub fn level(&self) -> u64 {
        MAX_LEVEL - (self.0.trailing_zeros() as u64 >> 1)
    }

    /// is_leaf reports whether this cell id is at the deepest level.
    pub fn is_leaf(&self) -> bool {
        self.0 & 1 != 0
    }

    /// is_face reports whether this is a top-level (face) cell.
    pub fn is_face(&self) -> bool {
        self.0 & (lsb_for_level(0) - 1) == 0
    }

    /// lsb returns the level sentinel: the lowest set bit of the id.
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    /// child_position returns the position (0..3) of this cell's ancestor
    /// at the given level within its parent. The level must be in the range
    /// [1, level()].
    pub fn child_position(&self, level: u64) -> u64 {
        (self.0 >> (2 * (MAX_LEVEL - level) + 1)) & 3
    }

    /// parent returns the ancestor cell at the given level, which must be
    /// no greater than the current level.
    pub fn parent(&self, level: u64) -> Self {
        debug_assert!(level <= self.level());
        let lsb = lsb_for_level(level);
        CellID((self.0 & lsb.wrapping_neg()) | lsb)
    }

    /// immediate_parent is cheaper than parent, but requires !is_face().
    pub fn immediate_parent(&self) -> Self {
        let nlsb = self.lsb() << 2;
        CellID((self.0 & nlsb.wrapping_neg()) | nlsb)
    }

    /// children returns the four immediate children of this cell. If the
    /// cell is a leaf, it returns four identical ids that are not children.
    pub fn children(&self) -> [CellID; 4] {
        let mut lsb = self.lsb();
        let ch0 = self.0 - lsb + (lsb >> 2);
        lsb >>= 1;
        [
            CellID(ch0),
            CellID(ch0 + lsb),
            CellID(ch0 + 2 * lsb),
            CellID(ch0 + 3 * lsb),
        ]
    }

    /// face_ij_orientation decodes the id into its face, the (i,j)
    /// coordinates of a leaf cell within this cell (for non-leaf cells,
    /// one adjacent to the cell center), and the Hilbert curve orientation
    /// at this cell.
    pub fn face_ij_orientation(&self) -> (u8, i32, i32, u8) {
        let f = self.face();
        let mut i = 0i32;
        let mut j = 0i32;
        let mut orientation = (f & SWAP_MASK) as u64;
        // The first group decodes only the two position bits above the 7
        // full 4-bit groups (MAX_LEVEL = 30 = 7*4 + 2).
        let mut nbits = MAX_LEVEL - 7 * LOOKUP_BITS;

        for k in (0..8u64).rev() {
            orientation +=
                ((self.0 >> (k * 2 * LOOKUP_BITS + 1)) & ((1 << (2 * nbits)) - 1)) << 2;
            orientation = LOOKUP.ij[orientation as usize] as u64;
            i += ((orientation >> (LOOKUP_BITS + 2)) as i32) << (k * LOOKUP_BITS);
            j += (((orientation >> 2) & ((1 << LOOKUP_BITS) - 1)) as i32) << (k * LOOKUP_BITS);
            orientation &= (SWAP_MASK | INVERT_MASK) as u64;
            nbits = LOOKUP_BITS;
        }

        // The position of a non-leaf cell at level k is the center of its
        // children: its suffix below the sentinel reads 10*, and every "00"
        // pair in that suffix reverses the swap state. If the sentinel sits
        // at an odd bit pair position the net effect is one extra reversal.
        if self.lsb() & 0x1111111111111110 != 0 {
            orientation ^= SWAP_MASK as u64;
        }

        (f, i, j, orientation as u8)
    }

    /// edge_neighbors returns the four cells that are adjacent across this
    /// cell's four edges, in down, right, up, left order in face space. All
    /// neighbors are at the same level as this cell and distinct from it.
    pub fn edge_neighbors(&self) -> [CellID; 4] {
        let level = self.level();
        let size = size_ij(level) as i32;
        let (f, i, j, _) = self.face_ij_orientation();

        [
            CellID::from_face_ij_wrap(f, i, j - size).parent(level),
            CellID::from_face_ij_wrap(f, i + size, j).parent(level),
            CellID::from_face_ij_wrap(f, i, j + size).parent(level),
            CellID::from_face_ij_wrap(f, i - size, j).parent(level),
        ]
    }

    /// vertex_neighbors returns the neighboring cells at the given level
    /// (which must be no deeper than this cell's level) that share the
    /// vertex closest to this cell's center. Normally there are four, but
    /// the closest vertex may have only three neighbors if it is one of the
    /// eight cube vertices.
    pub fn vertex_neighbors(&self, level: u64) -> Vec<CellID> {
        let half_size = size_ij(level + 1) as i32;
        let size = half_size << 1;
        let (f, i, j, _) = self.face_ij_orientation();

        let (isame, ioffset) = if i & half_size != 0 {
            (i + size < MAX_SIZE_I32, size)
        } else {
            (i - size >= 0, -size)
        };
        let (jsame, joffset) = if j & half_size != 0 {
            (j + size < MAX_SIZE_I32, size)
        } else {
            (j - size >= 0, -size)
        };

        let mut results = Vec::with_capacity(4);
        results.push(self.parent(level));
        results.push(CellID::from_face_ij_same(f, i + ioffset, j, isame).parent(level));
        results.push(CellID::from_face_ij_same(f, i, j + joffset, jsame).parent(level));
        if isame || jsame {
            results.push(
                CellID::from_face_ij_same(f, i + ioffset, j + joffset, isame && jsame)
                    .parent(level),
            );
        }
        results
    }

    /// all_neighbors returns all neighbors of this cell at the given level
    /// (which must be at least this cell's level): the cells whose
    /// boundaries intersect this cell's boundary. Cells adjacent to a face
    /// vertex may be returned more than once.
    pub fn all_neighbors(&self, level: u64) -> Vec<CellID> {
        let mut neighbors = Vec::new();
        let (face, mut i, mut j, _) = self.face_ij_orientation();

        // Resolve (i,j) to the lower-left corner of this cell.
        let size = size_ij(self.level()) as i32;
        i &= -size;
        j &= -size;

        let nbr_size = size_ij(level) as i32;

        // Compute the top-bottom, left-right, and diagonal neighbors in one
        // pass along the bottom and top edges.
        let mut k = -nbr_size;
        loop {
            let same_face = if k < 0 {
                j + k >= 0
            } else if k >= size {
                j + k < MAX_SIZE_I32
            } else {
                // North and south neighbors.
                neighbors.push(
                    CellID::from_face_ij_same(face, i + k, j - nbr_size, j - size >= 0)
                        .parent(level),
                );
                neighbors.push(
                    CellID::from_face_ij_same(face, i + k, j + size, j + size < MAX_SIZE_I32)
                        .parent(level),
                );
                true
            };

            // East, west, and diagonal neighbors.
            neighbors.push(
                CellID::from_face_ij_same(face, i - nbr_size, j + k, same_face && i - size >= 0)
                    .parent(level),
            );
            neighbors.push(
                CellID::from_face_ij_same(face, i + size, j + k, same_face && i + size < MAX_SIZE_I32)
                    .parent(level),
            );

            if k >= size {
                break;
            }
            k += nbr_size;
        }

        neighbors
    }

    /// range_min returns the minimum id contained within this cell.
    pub fn range_min(&self) -> Self {
        CellID(self.0 - (self.lsb() - 1))
    }

    /// range_max returns the maximum id contained within this cell.
    pub fn range_max(&self) -> Self {
        CellID(self.0 + (self.lsb() - 1))
    }

    /// contains reports whether this cell contains the other cell.
    pub fn contains(&self, other: &CellID) -> bool {
        &self.range_min() <= other && other <= &self.range_max()
    }

    /// intersects reports whether the two cells overlap, i.e. one contains
    /// the other.
    pub fn intersects(&self, other: &CellID) -> bool {
        other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
    }

    /// child_begin returns the first child in a traversal of this cell's
    /// children in Hilbert curve order.
    pub fn child_begin(&self) -> Self {
        let ol = self.lsb();
        CellID(self.0 - ol + (ol >> 2))
    }

    /// child_begin_at_level returns the first cell in a traversal of the
    /// descendants at the given level, in Hilbert curve order. The level
    /// must be no smaller than this cell's level.
    pub fn child_begin_at_level(&self, level: u64) -> Self {
        assert!(self.level() <= level);
        CellID(self.0 - self.lsb() + lsb_for_level(level))
    }

    /// child_end returns the first cell after a traversal of this cell's
    /// children in Hilbert curve order. The returned cell may be invalid.
    pub fn child_end(&self) -> Self {
        let ol = self.lsb();
        CellID(self.0 + ol + (ol >> 2))
    }

    /// child_end_at_level returns the first cell after the last descendant
    /// at the given level. The level must be no smaller than this cell's
    /// level; the returned cell may be invalid.
    pub fn child_end_at_level(&self, level: u64) -> Self {
        assert!(self.level() <= level);
        CellID(self.0 + self.lsb() + lsb_for_level(level))
    }

    /// next returns the next cell along the Hilbert curve at this level, by
    /// base-4 increment of the level digits. Face bits are preserved but
    /// stepping past the last cell of face 5 produces an invalid id: use
    /// next_wrap to traverse the whole sphere.
    pub fn next(&self) -> Self {
        CellID(self.0.wrapping_add(self.lsb() << 1))
    }

    /// prev returns the previous cell along the Hilbert curve at this
    /// level, with the same non-wrapping caveat as next.
    pub fn prev(&self) -> Self {
        CellID(self.0.wrapping_sub(self.lsb() << 1))
    }

    /// next_wrap returns the next cell along the Hilbert curve, wrapping
    /// from the last cell on face 5 back to the first cell on face 0.
    pub fn next_wrap(&self) -> Self {
        let n = self.next();
        if n.0 < WRAP_OFFSET {
            n
        } else {
            CellID(n.0.wrapping_sub(WRAP_OFFSET))
        }
    }

    /// prev_wrap returns the previous cell along the Hilbert curve,
    /// wrapping from the first cell on face 0 to the last cell on face 5.
    pub fn prev_wrap(&self) -> Self {
        let p = self.prev();
        if p.0 < WRAP_OFFSET {
            p
        } else {
            CellID(p.0.wrapping_add(WRAP_OFFSET))
        }
    }

    /// advance advances or retreats the indicated number of steps along the
    /// Hilbert curve at the current level. The position is never advanced
    /// past child_end_at_level nor before child_begin_at_level of face 0.
    pub fn advance(&self, mut steps: i64) -> Self {
        if steps == 0 {
            return *self;
        }
        let step_shift = 2 * (MAX_LEVEL - self.level()) + 1;
        if steps < 0 {
            let min_steps = -((self.0 >> step_shift) as i64);
            if steps < min_steps {
                steps = min_steps;
            }
        } else {
            let max_steps = ((WRAP_OFFSET + self.lsb() - self.0) >> step_shift) as i64;
            if steps > max_steps {
                steps = max_steps;
            }
        }
        CellID(self.0.wrapping_add((steps << step_shift) as u64))
    }

    /// advance_wrap advances or retreats the indicated number of steps
    /// along the Hilbert curve at the current level, wrapping between the
    /// first and last faces as necessary.
    pub fn advance_wrap(&self, mut steps: i64) -> Self {
        if steps == 0 {
            return *self;
        }
        let shift = 2 * (MAX_LEVEL - self.level()) + 1;
        if steps < 0 {
            let min = -((self.0 >> shift) as i64);
            if steps < min {
                let wrap = (WRAP_OFFSET >> shift) as i64;
                steps %= wrap;
                if steps < min {
                    steps += wrap;
                }
            }
        } else {
            let max = ((WRAP_OFFSET - self.0) >> shift) as i64;
            if steps > max {
                let wrap = (WRAP_OFFSET >> shift) as i64;
                steps %= wrap;
                if steps > max {
                    steps -= wrap;
                }
            }
        }
        CellID(self.0.wrapping_add((steps as u64) << shift))
    }

    /// distance_from_begin returns the number of steps along the Hilbert
    /// curve from the first cell at this level (on face 0) to this cell.
    pub fn distance_from_begin(&self) -> i64 {
        (self.0 >> (2 * (MAX_LEVEL - self.level()) + 1)) as i64
    }

    /// common_ancestor_level returns the level of the smallest common
    /// ancestor of the two cells, or None if they are on different faces.
    pub fn common_ancestor_level(&self, other: &Self) -> Option<u64> {
        let mut bits = self.0 ^ other.0;
        if bits < self.lsb() {
            bits = self.lsb();
        }
        if bits < other.lsb() {
            bits = other.lsb();
        }

        let msb_pos = 63 - bits.leading_zeros() as u64;
        if msb_pos > 60 {
            None
        } else {
            Some((60 - msb_pos) >> 1)
        }
    }

    /// max_tile returns the largest cell with the same range_min such that
    /// range_max < limit.range_min, or limit if no such cell exists. It can
    /// be used to convert a range of leaf cells into a minimal tiling:
    ///
    /// ```text
    /// let mut id = start.max_tile(&limit);
    /// while id != limit {
    ///     ... id = id.next().max_tile(&limit);
    /// }
    /// ```
    pub fn max_tile(&self, limit: &Self) -> Self {
        let mut s = *self;
        let start = s.range_min();
        if start >= limit.range_min() {
            return *limit;
        }
        if s.range_max() >= *limit {
            // The cell is too large: shrink it. Note that when generating
            // coverings of CellID ranges, this loop usually executes only
            // once. Also because s.range_min() < limit.range_min(), we will
            // always exit the loop by the time we reach a leaf cell.
            loop {
                s = s.children()[0];
                if s.range_max() < *limit {
                    break;
                }
            }
            return s;
        }
        // The cell may be too small: grow it if necessary.
        while !s.is_face() {
            let parent = s.immediate_parent();
            if parent.range_min() != start || parent.range_max() >= *limit {
                break;
            }
            s = parent;
        }
        s
    }

    /// face_siti returns the (face, si, ti) coordinates of the center of
    /// the cell. Cell centers at every level land on exact (si, ti)
    /// coordinates, so the conversion is lossless.
    fn face_siti(&self) -> (u8, u64, u64) {
        let (face, i, j, _) = self.face_ij_orientation();
        let delta = if self.is_leaf() {
            1
        } else if ((i as i64) ^ ((self.0 >> 2) as i64)) & 1 == 1 {
            2
        } else {
            0
        };
        (face, (2 * i as u64) + delta, (2 * j as u64) + delta)
    }

    /// raw_point returns the center of the cell as a direction vector that
    /// is not necessarily unit length.
    pub fn raw_point(&self) -> Vector {
        let (face, si, ti) = self.face_siti();
        face_uv_to_xyz(face, st_to_uv(siti_to_st(si)), st_to_uv(siti_to_st(ti)))
    }

    /// center_st returns the center of the cell in (s,t)-space.
    pub fn center_st(&self) -> r2::Point {
        let (_, si, ti) = self.face_siti();
        r2::Point::new(siti_to_st(si), siti_to_st(ti))
    }

    /// size_st returns the edge length of this cell in (s,t)-space.
    pub fn size_st(&self) -> f64 {
        ij_to_stmin(size_ij(self.level()) as i32)
    }

    /// bound_st returns the bound of this cell in (s,t)-space.
    pub fn bound_st(&self) -> r2::Rect {
        let s = self.size_st();
        r2::Rect::from_center_size(&self.center_st(), &r2::Point::new(s, s))
    }

    /// center_uv returns the center of the cell in (u,v)-space. The center
    /// is where the cell is subdivided into its children, which is in
    /// general not the midpoint of the (u,v) rectangle covered by the cell.
    pub fn center_uv(&self) -> r2::Point {
        let (_, si, ti) = self.face_siti();
        r2::Point::new(st_to_uv(siti_to_st(si)), st_to_uv(siti_to_st(ti)))
    }

    /// bound_uv returns the bound of this cell in (u,v)-space.
    pub fn bound_uv(&self) -> r2::Rect {
        let (_, i, j, _) = self.face_ij_orientation();
        ij_level_to_bound_uv(i, j, self.level())
    }

    pub fn child_iter(&self) -> CellIDIter {
        CellIDIter {
            cur: self.child_begin(),
            end: self.child_end(),
        }
    }

    pub fn child_iter_at_level(&self, level: u64) -> CellIDIter {
        CellIDIter {
            cur: self.child_begin_at_level(level),
            end: self.child_end_at_level(level),
        }
    }
}

/// ij_to_stmin converts the i- or j-index of a leaf cell to the minimum
/// corresponding s- or t-value contained by that cell. The argument must be
/// in the range [0, 2^30], i.e. up to one position beyond the normal range
/// of valid leaf cell indices.
fn ij_to_stmin(i: i32) -> f64 {
    (i as f64) / (MAX_SIZE as f64)
}

/// st_to_ij converts an s- or t-value to the leaf-cell coordinate
/// containing it, clamped to the valid range.
pub(crate) fn st_to_ij(s: f64) -> i32 {
    clamp((MAX_SIZE as f64 * s).floor() as i32, 0, MAX_SIZE_I32 - 1)
}

/// ij_level_to_bound_uv returns the bounds in (u,v)-space of the cell at
/// the given level containing the leaf cell with the given (i,j)
/// coordinates.
pub fn ij_level_to_bound_uv(i: i32, j: i32, level: u64) -> r2::Rect {
    let cell_size = size_ij(level) as i32;
    let i_lo = i & -cell_size;
    let j_lo = j & -cell_size;

    r2::Rect {
        x: r1::Interval {
            lo: st_to_uv(ij_to_stmin(i_lo)),
            hi: st_to_uv(ij_to_stmin(i_lo + cell_size)),
        },
        y: r1::Interval {
            lo: st_to_uv(ij_to_stmin(j_lo)),
            hi: st_to_uv(ij_to_stmin(j_lo + cell_size)),
        },
    }
}

impl std::fmt::Debug for CellID {
    /// Formats the id as the face followed by the base-4 child digits of
    /// each level, e.g. "5/31200".
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/", self.face())?;
        for level in 1..=self.level() {
            write!(f, "{}", self.child_position(level))?;
        }
        Ok(())
    }
}

impl FromStr for CellID {
    type Err = Error;

    /// Parses a token produced by to_token, rejecting malformed tokens and
    /// tokens of structurally invalid ids.
    fn from_str(s: &str) -> Result<Self, Error> {
        let ci = CellID::from_token(s);
        if ci.0 == 0 || !ci.is_valid() {
            Err(Error::InvalidCellID(format!("bad token {:?}", s)))
        } else {
            Ok(ci)
        }
    }
}

impl From<&LatLng> for CellID {
    /// Returns the leaf cell containing the given coordinate.
    fn from(ll: &LatLng) -> Self {
        let p: Point = ll.into();
        CellID::from(&p)
    }
}

impl From<LatLng> for CellID {
    fn from(ll: LatLng) -> Self {
        CellID::from(&ll)
    }
}

impl From<&Point> for CellID {
    /// Returns the leaf cell containing the given point. Usually there is
    /// exactly one such cell, but for points along cell edges any adjacent
    /// cell may be (deterministically) chosen; cells are closed sets, so
    /// the returned cell always contains the point.
    fn from(p: &Point) -> Self {
        let (f, u, v) = xyz_to_face_uv(&p.0);
        let i = st_to_ij(uv_to_st(u));
        let j = st_to_ij(uv_to_st(v));
        CellID::from_face_ij(f, i, j)
    }
}

impl From<Point> for CellID {
    fn from(p: Point) -> Self {
        CellID::from(&p)
    }
}

impl From<&CellID> for Point {
    /// Returns the center of the cell on the sphere, normalized.
    fn from(id: &CellID) -> Self {
        Point(id.raw_point().normalize())
    }
}

impl From<CellID> for Point {
    fn from(id: CellID) -> Self {
        Point::from(&id)
    }
}

impl From<&CellID> for LatLng {
    /// Returns the center of the cell as a LatLng.
    fn from(id: &CellID) -> Self {
        LatLng::from(Point::from(id))
    }
}

impl From<CellID> for LatLng {
    fn from(id: CellID) -> Self {
        LatLng::from(&id)
    }
}

pub struct CellIDIter {
    cur: CellID,
    end: CellID,
}

impl Iterator for CellIDIter {
    type Item = CellID;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cur == self.end {
            None
        } else {
            let res = self.cur;
            self.cur = self.cur.next();
            Some(res)
        }
    }
}

// The Hilbert curve subdivision tables. For a cell with orientation o, the
// child at curve position p (0..3) occupies the (i,j) quadrant
// POS_TO_IJ[o][p] (encoded as 2*i+j), and the curve within that child has
// orientation o ^ POS_TO_ORIENTATION[p].
pub const IJ_TO_POS: [[u8; 4]; 4] = [[0, 1, 3, 2], [0, 3, 1, 2], [2, 3, 1, 0], [2, 1, 3, 0]];
pub const POS_TO_IJ: [[u8; 4]; 4] = [[0, 1, 3, 2], [0, 2, 3, 1], [3, 2, 0, 1], [3, 1, 0, 2]];
pub const POS_TO_ORIENTATION: [u8; 4] = [SWAP_MASK, 0, 0, INVERT_MASK | SWAP_MASK];

// The 10-bit lookup tables that drive the 4-bits-at-a-time encoder and
// decoder. They are generated once by expanding the recursive subdivision
// tables above through four levels, and are read-only afterwards.
struct LookupTables {
    pos: Vec<u16>,
    ij: Vec<u16>,
}

lazy_static! {
    static ref LOOKUP: LookupTables = {
        let size = 1 << (2 * LOOKUP_BITS + 2);
        let mut tables = LookupTables {
            pos: vec![0; size],
            ij: vec![0; size],
        };
        for &orientation in &[0, SWAP_MASK, INVERT_MASK, SWAP_MASK | INVERT_MASK] {
            init_lookup_cell(0, 0, 0, orientation, 0, orientation, &mut tables);
        }
        tables
    };
}

/// init_lookup_cell recursively fills in the lookup table entries reachable
/// from the given partial cell, one curve position at a time.
fn init_lookup_cell(
    level: u64,
    i: i32,
    j: i32,
    orig_orientation: u8,
    pos: usize,
    orientation: u8,
    tables: &mut LookupTables,
) {
    if level == LOOKUP_BITS {
        let ij = ((i << LOOKUP_BITS) + j) as usize;
        tables.pos[(ij << 2) + orig_orientation as usize] = ((pos << 2) + orientation as usize) as u16;
        tables.ij[(pos << 2) + orig_orientation as usize] = ((ij << 2) + orientation as usize) as u16;
        return;
    }

    let r = &POS_TO_IJ[orientation as usize];
    for idx in 0..4 {
        init_lookup_cell(
            level + 1,
            (i << 1) + (r[idx] >> 1) as i32,
            (j << 1) + (r[idx] & 1) as i32,
            orig_orientation,
            (pos << 2) + idx,
            orientation ^ POS_TO_ORIENTATION[idx],
            tables,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::s2::random;
    use rand::Rng;

    #[test]
    fn test_from_face() {
        for face in 0..6 {
            let fpl = CellID::from_face_pos_level(face, 0, 0);
            let f = CellID::from_face(face);
            assert_eq!(fpl, f);
            assert_eq!(f.face() as u64, face);
            assert_eq!(f.level(), 0);
            assert!(f.is_face());
        }
        // The level-0 cell on face 1 has only its face bits and sentinel.
        assert_eq!(CellID::from_face(1).0, 0x3000000000000000);
    }

    #[test]
    fn test_sentinel_invariants() {
        let mut rng = random::rng();
        for _ in 0..100 {
            let id = random::cellid(&mut rng);
            // Exactly one sentinel bit, in an even position, with zeros
            // below it.
            assert!(id.is_valid());
            assert_eq!(id.lsb().count_ones(), 1);
            assert_eq!(id.0 & (id.lsb() - 1), 0);
            assert_eq!(id.lsb(), lsb_for_level(id.level()));
        }
    }

    #[test]
    fn test_parent_child_relationships() {
        let ci = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);
        assert!(ci.is_valid());
        assert_eq!(ci.face(), 3);
        assert_eq!(ci.pos(), 0x12345700);
        assert_eq!(ci.level(), 26);
        assert!(!ci.is_leaf());

        assert_eq!(ci.child_begin_at_level(ci.level() + 2).pos(), 0x12345610);
        assert_eq!(ci.child_begin().pos(), 0x12345640);
        assert_eq!(ci.children()[0].pos(), 0x12345640);
        assert_eq!(ci.immediate_parent().pos(), 0x12345400);
        assert_eq!(ci.parent(ci.level() - 2).pos(), 0x12345000);

        assert!(ci.child_begin() < ci);
        assert!(ci.child_end() > ci);
        assert_eq!(
            ci.child_end(),
            ci.child_begin().next().next().next().next()
        );

        assert_eq!(ci.range_min(), ci.child_begin_at_level(MAX_LEVEL));
        assert_eq!(ci.range_max().next(), ci.child_end_at_level(MAX_LEVEL));
    }

    #[test]
    fn test_parent_contains_descendants() {
        let mut rng = random::rng();
        for _ in 0..50 {
            let id = random::cellid(&mut rng);
            for k in 0..=id.level() {
                assert!(id.parent(id.level() - k).contains(&id));
            }
        }
    }

    fn containment_case(
        x: &CellID,
        y: &CellID,
        x_contains_y: bool,
        y_contains_x: bool,
        x_intersects_y: bool,
    ) {
        assert_eq!(x.contains(y), x_contains_y);
        assert_eq!(y.contains(x), y_contains_x);
        assert_eq!(x.intersects(y), x_intersects_y);
        assert_eq!(y.intersects(x), x_intersects_y);
    }

    #[test]
    fn test_containment() {
        let a = CellID(0x80855c0000000000);
        let b = CellID(0x80855d0000000000); // child of a
        let c = CellID(0x80855dc000000000); // child of b
        let d = CellID(0x8085630000000000); // disjoint from a

        containment_case(&a, &a, true, true, true);
        containment_case(&a, &b, true, false, true);
        containment_case(&a, &c, true, false, true);
        containment_case(&a, &d, false, false, false);
        containment_case(&b, &b, true, true, true);
        containment_case(&b, &c, true, false, true);
        containment_case(&b, &d, false, false, false);
        containment_case(&c, &c, true, true, true);
        containment_case(&c, &d, false, false, false);
        containment_case(&d, &d, true, true, true);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", CellID(0xbb04000000000000)), "5/31200");
    }

    #[test]
    fn test_face_ij_roundtrip() {
        let mut rng = random::rng();
        for _ in 0..200 {
            let f = rng.gen_range(0..6u8);
            let i = rng.gen_range(0..MAX_SIZE as i32);
            let j = rng.gen_range(0..MAX_SIZE as i32);
            let id = CellID::from_face_ij(f, i, j);
            assert!(id.is_leaf());
            let (f2, i2, j2, _) = id.face_ij_orientation();
            assert_eq!((f, i, j), (f2, i2, j2));
        }
    }

    #[test]
    fn test_decode_orientation_matches_tables() {
        // Walking down from a face cell, the orientation accumulated from
        // POS_TO_ORIENTATION must match the decoded orientation.
        let mut rng = random::rng();
        for _ in 0..50 {
            let leaf = random::cellid_for_level(&mut rng, MAX_LEVEL);
            let mut orientation = (leaf.face() & SWAP_MASK) as u8;
            for level in 1..=MAX_LEVEL {
                let pos = leaf.child_position(level);
                orientation ^= POS_TO_ORIENTATION[pos as usize];
            }
            let (_, _, _, got) = leaf.face_ij_orientation();
            assert_eq!(got, orientation);
        }
    }

    fn latlng_case(ci: CellID, lat: f64, lng: f64) {
        let ll = LatLng::from_degrees(lat, lng);
        let l2 = LatLng::from(&ci);

        assert!(ll.distance(&l2).deg() < 1.0e-9);

        let ci2 = CellID::from(&ll);
        assert_eq!(ci, ci2);
    }

    #[test]
    fn test_latlng() {
        latlng_case(CellID(0x47a1cbd595522b39), 49.703498679, 11.770681595);
        latlng_case(CellID(0x46525318b63be0f9), 55.685376759, 12.588490937);
        latlng_case(CellID(0x52b30b71698e729d), 45.486546517, -93.449700022);
        latlng_case(CellID(0x46ed8886cfadda85), 58.299984854, 23.049300056);
        latlng_case(CellID(0x3663f18a24cbe857), 34.364439040, 108.330699969);
        latlng_case(CellID(0x10a06c0a948cf5d), -30.694551352, -30.048758753);
        latlng_case(CellID(0x2b2bfd076787c5df), -25.285264027, 133.823116966);
        latlng_case(CellID(0xb09dff882a7809e1), -75.000000031, 0.000000133);
        latlng_case(CellID(0x94daa3d000000001), -24.694439215, -47.537363213);
        latlng_case(CellID(0x87a1000000000001), 38.899730392, -99.901813021);
        latlng_case(CellID(0x4fc76d5000000001), 81.647200334, -55.631712940);
        latlng_case(CellID(0x3b00955555555555), 10.050986518, 78.293170610);
        latlng_case(CellID(0x1dcc469991555555), -34.055420593, 18.551140038);
        latlng_case(CellID(0xb112966aaaaaaaab), -69.219262171, 49.670072392);
    }

    #[test]
    fn test_edge_neighbors() {
        // The level-0 cell on face 1 is bordered by faces 5, 3, 2, 0 in
        // down, right, up, left order.
        let faces = [5, 3, 2, 0];
        for (i, nbr) in CellID::from_face_ij(1, 0, 0)
            .parent(0)
            .edge_neighbors()
            .iter()
            .enumerate()
        {
            assert!(nbr.is_face());
            assert_eq!(nbr.face(), faces[i]);
        }

        // Check the neighbors of the corner cell at all levels.
        let max_ij = MAX_SIZE as i32 - 1;
        for level in 1..=MAX_LEVEL {
            let id = CellID::from_face_ij(1, 0, 0).parent(level);
            let level_size_ij = size_ij(level) as i32;
            let want = [
                CellID::from_face_ij(5, max_ij, max_ij).parent(level),
                CellID::from_face_ij(1, level_size_ij, 0).parent(level),
                CellID::from_face_ij(1, 0, level_size_ij).parent(level),
                CellID::from_face_ij(0, max_ij, 0).parent(level),
            ];
            assert_eq!(want, id.edge_neighbors());
        }
    }

    #[test]
    fn test_edge_neighbors_share_an_edge() {
        let mut rng = random::rng();
        for _ in 0..50 {
            let id = random::cellid(&mut rng);
            let mut nbrs = id.edge_neighbors().to_vec();
            for nbr in &nbrs {
                assert_ne!(*nbr, id);
                assert_eq!(nbr.level(), id.level());
            }
            // All four neighbors are distinct.
            nbrs.sort();
            nbrs.dedup();
            assert_eq!(nbrs.len(), 4);
        }
    }

    #[test]
    fn test_vertex_neighbors() {
        // Check the vertex neighbors of the center of face 2 at level 5.
        let id = CellID::from(&Point(Vector::new(0., 0., 1.)));
        let mut neighbors = id.vertex_neighbors(5);
        neighbors.sort();

        for (n, nbr) in neighbors.iter().enumerate() {
            let mut i = 1 << 29;
            let mut j = 1 << 29;
            if n < 2 {
                i -= 1;
            }
            if n == 0 || n == 3 {
                j -= 1;
            }
            assert_eq!(*nbr, CellID::from_face_ij(2, i, j).parent(5));
        }

        // Check a corner case: the vertex neighbors of the corner of faces
        // 0, 4, and 5.
        let id2 = CellID::from_face_pos_level(0, 0, MAX_LEVEL);
        let mut neighbors2 = id2.vertex_neighbors(0);
        neighbors2.sort();
        assert_eq!(neighbors2.len(), 3);
        assert_eq!(neighbors2[0], CellID::from_face(0));
        assert_eq!(neighbors2[1], CellID::from_face(4));
    }

    #[test]
    fn test_all_neighbors() {
        let mut rng = random::rng();
        for _ in 0..10 {
            let mut id = random::cellid(&mut rng);
            if id.is_leaf() {
                id = id.immediate_parent();
            }

            // all_neighbors computes approximately 4*(2^(level-min_level))
            // cells, so bound the search depth.
            let mut max_diff = MAX_LEVEL - id.level() - 1;
            if max_diff > 6 {
                max_diff = 6;
            }
            let level = match max_diff {
                0 => id.level(),
                _ => id.level() + rng.gen_range(0..max_diff),
            };

            // all_neighbors at the given level must match the union of the
            // vertex neighbors of the children one level deeper.
            let mut all = id.all_neighbors(level);
            let mut want = Vec::new();
            let mut c = id.child_begin_at_level(level + 1);
            let end = id.child_end_at_level(level + 1);
            while c != end {
                all.push(c.immediate_parent());
                want.extend_from_slice(&c.vertex_neighbors(level));
                c = c.next();
            }

            all.sort();
            all.dedup();
            want.sort();
            want.dedup();
            assert_eq!(all, want);
        }
    }

    fn token_case(s: &str, id: CellID) {
        assert_eq!(CellID::from_token(s), id);
        assert_eq!(s, id.to_token());
        assert_eq!(s.parse::<CellID>().unwrap(), id);
    }

    #[test]
    fn test_tokens_nominal() {
        token_case("1", CellID(0x1000000000000000));
        token_case("3", CellID(0x3000000000000000));
        token_case("14", CellID(0x1400000000000000));
        token_case("41", CellID(0x4100000000000000));
        token_case("094", CellID(0x0940000000000000));
        token_case("537", CellID(0x5370000000000000));
        token_case("3fec", CellID(0x3fec000000000000));
        token_case("72f3", CellID(0x72f3000000000000));
        token_case("52b8c", CellID(0x52b8c00000000000));
        token_case("990ed", CellID(0x990ed00000000000));
        token_case("4476dc", CellID(0x4476dc0000000000));
        token_case("2a724f", CellID(0x2a724f0000000000));
        token_case("7d4afc4", CellID(0x7d4afc4000000000));
        token_case("b675785", CellID(0xb675785000000000));
        token_case("40cd6124", CellID(0x40cd612400000000));
        token_case("3ba32f81", CellID(0x3ba32f8100000000));
        token_case("08f569b5c", CellID(0x08f569b5c0000000));
        token_case("385327157", CellID(0x3853271570000000));
        token_case("166c4d1954", CellID(0x166c4d1954000000));
        token_case("96f48d8c39", CellID(0x96f48d8c39000000));
        token_case("0bca3c7f74c", CellID(0x0bca3c7f74c00000));
        token_case("1ae3619d12f", CellID(0x1ae3619d12f00000));
        token_case("07a77802a3fc", CellID(0x07a77802a3fc0000));
        token_case("4e7887ec1801", CellID(0x4e7887ec18010000));
        token_case("4adad7ae74124", CellID(0x4adad7ae74124000));
        token_case("90aba04afe0c5", CellID(0x90aba04afe0c5000));
        token_case("8ffc3f02af305c", CellID(0x8ffc3f02af305c00));
        token_case("6fa47550938183", CellID(0x6fa4755093818300));
        token_case("aa80a565df5e7fc", CellID(0xaa80a565df5e7fc0));
        token_case("01614b5e968e121", CellID(0x01614b5e968e1210));
        token_case("aa05238e7bd3ee7c", CellID(0xaa05238e7bd3ee7c));
        token_case("48a23db9c2963e5b", CellID(0x48a23db9c2963e5b));
    }

    #[test]
    fn test_tokens_error_cases() {
        assert_eq!("X", CellID(0).to_token());
        assert_eq!(CellID(0), CellID::from_token("X"));

        for bad in ["876b e99", "876bee99\n", "876[ee99", " 876bee99"] {
            assert_eq!(CellID(0), CellID::from_token(bad));
            assert!(bad.parse::<CellID>().is_err());
        }
        assert!("X".parse::<CellID>().is_err());
    }

    #[test]
    fn test_token_from_face_ij() {
        let id = CellID::from_face_ij(2, 123456, 654321);
        let token = id.to_token();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(CellID::from_token(&token), id);
    }

    #[test]
    fn test_token_random_roundtrip() {
        let mut rng = random::rng();
        for _ in 0..200 {
            let id = random::cellid(&mut rng);
            let token = id.to_token();
            assert!(token.len() <= 16);
            assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(CellID::from_token(&token), id);
        }
    }

    #[test]
    fn test_wrapping() {
        let id = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);

        assert_eq!(
            CellID::from_face(5).child_end_at_level(0).prev(),
            CellID::from_face(0).child_begin_at_level(0).prev_wrap()
        );
        assert_eq!(
            CellID::from_face_pos_level(5, !0u64 >> FACE_BITS, MAX_LEVEL),
            CellID::from_face(0)
                .child_begin_at_level(MAX_LEVEL)
                .prev_wrap()
        );
        assert_eq!(
            CellID::from_face_pos_level(5, !0u64 >> FACE_BITS, MAX_LEVEL),
            CellID::from_face(0)
                .child_begin_at_level(MAX_LEVEL)
                .advance_wrap(-1)
        );
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(4),
            CellID::from_face(5).child_end_at_level(4).prev().next_wrap()
        );
        assert_eq!(
            CellID::from_face_pos_level(0, 0, MAX_LEVEL),
            CellID::from_face(5)
                .child_end_at_level(MAX_LEVEL)
                .prev()
                .next_wrap()
        );

        // Basic properties of advance_wrap.
        assert_eq!(
            CellID::from_face(1),
            CellID::from_face(0).child_begin_at_level(0).advance_wrap(7)
        );
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(0),
            CellID::from_face(0)
                .child_begin_at_level(0)
                .advance_wrap(12)
        );
        assert_eq!(CellID::from_face(4), CellID::from_face(5).advance_wrap(-7));
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(0),
            CellID::from_face(0)
                .child_begin_at_level(0)
                .advance_wrap(-12000000)
        );
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(5).advance_wrap(6644),
            CellID::from_face(0)
                .child_begin_at_level(5)
                .advance_wrap(-11788)
        );
        assert_eq!(
            id.next().child_begin_at_level(MAX_LEVEL),
            id.child_begin_at_level(MAX_LEVEL).advance_wrap(256)
        );
        assert_eq!(
            CellID::from_face_pos_level(1, 0, MAX_LEVEL),
            CellID::from_face_pos_level(5, 0, MAX_LEVEL).advance_wrap(2 << (2 * MAX_LEVEL))
        );
    }

    #[test]
    fn test_advance() {
        let id = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);

        assert_eq!(
            CellID::from_face(0).child_begin_at_level(0).advance(7),
            CellID::from_face(5).child_end_at_level(0)
        );
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(0).advance(12),
            CellID::from_face(5).child_end_at_level(0)
        );
        assert_eq!(
            CellID::from_face(5).child_end_at_level(0).advance(-7),
            CellID::from_face(0).child_begin_at_level(0)
        );
        assert_eq!(
            CellID::from_face(5).child_end_at_level(0).advance(-12000000),
            CellID::from_face(0).child_begin_at_level(0)
        );
        assert_eq!(
            CellID::from_face(0).child_begin_at_level(5).advance(500),
            CellID::from_face(5)
                .child_end_at_level(5)
                .advance(500 - (6 << (2 * 5)))
        );
        assert_eq!(
            id.child_begin_at_level(MAX_LEVEL).advance(256),
            id.next().child_begin_at_level(MAX_LEVEL)
        );
        assert_eq!(
            CellID::from_face_pos_level(1, 0, MAX_LEVEL).advance(4 << (2 * MAX_LEVEL)),
            CellID::from_face_pos_level(5, 0, MAX_LEVEL)
        );
    }

    #[test]
    fn test_distance_from_begin() {
        assert_eq!(
            6,
            CellID::from_face(5)
                .child_end_at_level(0)
                .distance_from_begin()
        );
        assert_eq!(
            6 * (1i64 << (2 * MAX_LEVEL)),
            CellID::from_face(5)
                .child_end_at_level(MAX_LEVEL)
                .distance_from_begin()
        );
        assert_eq!(
            0,
            CellID::from_face(0)
                .child_begin_at_level(0)
                .distance_from_begin()
        );
        assert_eq!(
            0,
            CellID::from_face(0)
                .child_begin_at_level(MAX_LEVEL)
                .distance_from_begin()
        );

        let id = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL - 4);
        assert_eq!(
            id,
            CellID::from_face(0)
                .child_begin_at_level(id.level())
                .advance(id.distance_from_begin())
        );
    }

    #[test]
    fn test_common_ancestor_level() {
        fn case(expected: Option<u64>, c1: CellID, c2: CellID) {
            assert_eq!(expected, c1.common_ancestor_level(&c2));
            assert_eq!(expected, c2.common_ancestor_level(&c1));
        }

        case(Some(0), CellID::from_face(0), CellID::from_face(0));
        case(
            Some(30),
            CellID::from_face(0).child_begin_at_level(30),
            CellID::from_face(0).child_begin_at_level(30),
        );
        case(
            Some(0),
            CellID::from_face(0),
            CellID::from_face(0).child_begin_at_level(30),
        );
        case(
            Some(0),
            CellID::from_face(5),
            CellID::from_face(5).child_end_at_level(30).prev(),
        );
        case(None, CellID::from_face(0), CellID::from_face(5));
        case(
            None,
            CellID::from_face(2).child_begin_at_level(30),
            CellID::from_face(3).child_begin_at_level(20),
        );
        case(
            Some(8),
            CellID::from_face(5)
                .child_begin_at_level(9)
                .next()
                .child_begin_at_level(15),
            CellID::from_face(5)
                .child_begin_at_level(9)
                .child_begin_at_level(20),
        );
        case(
            Some(1),
            CellID::from_face(0)
                .child_begin_at_level(2)
                .child_begin_at_level(30),
            CellID::from_face(0)
                .child_begin_at_level(2)
                .next()
                .child_begin_at_level(5),
        );
    }

    #[test]
    fn test_face_siti() {
        let id = CellID::from_face_pos_level(3, 0x12345678, MAX_LEVEL);

        // The (si,ti) coordinates of the center end in a 1 followed by
        // (30 - level) zeros.
        for level in 0..=MAX_LEVEL {
            let l = MAX_LEVEL - level;
            let want = 1 << level;
            let mask = (1 << (level + 1)) - 1;
            let (_, si, ti) = id.parent(l).face_siti();
            assert_eq!(want, si & mask);
            assert_eq!(want, ti & mask);
        }
    }

    #[test]
    fn test_hilbert_continuity() {
        // Sequentially increasing leaf cells at a coarse level form a
        // continuous path: every step moves to an edge- or vertex-adjacent
        // cell, so consecutive centers are never farther apart than the
        // cell diagonal.
        let level = 8;
        let max_dist = crate::s2::metric::MAX_WIDTH.value(level as u8);
        let end = CellID::from_face(5).child_end_at_level(level);
        let mut id = CellID::from_face(0).child_begin_at_level(level);
        while id != end {
            let next = id.next_wrap();
            let dist = id.raw_point().angle(&next.raw_point());
            assert!(
                dist <= max_dist,
                "distance {} between {:?} and {:?} exceeds {}",
                dist,
                id,
                next,
                max_dist
            );
            assert_eq!(next, id.advance_wrap(1));
            assert_eq!(id, next.advance_wrap(-1));
            id = id.next();
        }
    }

    #[test]
    fn test_consecutive_leaf_cells_share_a_vertex() {
        // Hilbert continuity at leaf level: id and id.next() always share
        // at least one vertex, i.e. next is among the edge or corner
        // neighbors.
        let mut rng = random::rng();
        for _ in 0..50 {
            let id = random::cellid_for_level(&mut rng, MAX_LEVEL);
            let next = id.next_wrap();
            let mut nearby = id.all_neighbors(MAX_LEVEL);
            nearby.push(id);
            assert!(
                nearby.contains(&next),
                "{:?}.next() = {:?} is not adjacent",
                id,
                next
            );
        }
    }

    #[test]
    fn test_hilbert_ordering_adjacent_ij() {
        // Consecutive leaf ids along the curve on face 0: after 29 levels
        // of descent through curve position 0 the axes are swapped, so the
        // successor of leaf (0,0) steps along the i-axis.
        let c1 = CellID::from_face_ij(0, 0, 0);
        let c2 = c1.next();
        assert_eq!(c2, CellID::from_face_ij(0, 1, 0));
        // The consecutive cells share the edge between them.
        assert!(c1.edge_neighbors().contains(&c2));
    }

    #[test]
    fn test_max_tile() {
        let mut rng = random::rng();
        for _ in 0..100 {
            let id = random::cellid_for_level(&mut rng, 10);

            // limit is returned for tiles at or beyond limit.
            assert_eq!(id, id.max_tile(&id));
            assert_eq!(id, id.children()[0].max_tile(&id));
            assert_eq!(id, id.children()[1].max_tile(&id));
            assert_eq!(id, id.next().max_tile(&id));
            assert_eq!(id.children()[0], id.max_tile(&id.children()[0]));

            // The tile size is increased when possible.
            assert_eq!(id, id.children()[0].max_tile(&id.next()));
            assert_eq!(id, id.children()[0].max_tile(&id.next().children()[0]));
            assert_eq!(
                id,
                id.children()[0].max_tile(&id.next().children()[1].children()[0])
            );
            assert_eq!(id, id.children()[0].children()[0].max_tile(&id.next()));

            // The tile size is decreased when necessary.
            assert_eq!(
                id.children()[0],
                id.max_tile(&id.children()[0].next())
            );
            assert_eq!(
                id.children()[0],
                id.max_tile(&id.children()[0].next().children()[0])
            );

            // The tile size is otherwise unchanged.
            assert_eq!(id, id.max_tile(&id.next()));
            assert_eq!(id, id.max_tile(&id.next().children()[0]));
        }
    }

    #[test]
    fn test_child_iter() {
        let id = CellID::from_face(2);
        let children: Vec<_> = id.child_iter().collect();
        assert_eq!(children.len(), 4);
        assert_eq!(children[0], id.children()[0]);
        assert_eq!(children[3], id.children()[3]);

        assert_eq!(id.child_iter_at_level(2).count(), 16);
    }

    #[test]
    fn test_bound_uv_contains_center() {
        let mut rng = random::rng();
        for _ in 0..50 {
            let id = random::cellid(&mut rng);
            assert!(id.bound_uv().contains_point(&id.center_uv()));
            assert!(id.bound_st().contains_point(&id.center_st()));
        }
    }
}
