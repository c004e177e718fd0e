// Copyright 2016 Google Inc. All rights reserved.
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

//! Geometric predicates over points on the sphere.

use crate::s2::point::Point;

/// sign reports whether the points A, B, C are strictly counterclockwise:
/// "C is on the left of the directed edge AB". It returns false for
/// clockwise and for degenerate (collinear or coincident) triangles.
///
/// The computation is (c × a) · b > 0. Rotating the arguments into this
/// particular form guarantees that sign(a,b,c) == sign(b,c,a) == sign(c,a,b)
/// numerically, and that sign(a,b,c) implies !sign(c,b,a).
pub fn sign(a: &Point, b: &Point, c: &Point) -> bool {
    // The signed volume of the parallelepiped spanned by the three
    // vectors. The (c × a) · b form, rather than (a × b) · c, is what
    // makes the argument-rotation identities hold bit-for-bit.
    c.0.cross(&a.0).dot(&b.0) > 0.
}
