//! A hierarchical decomposition of the unit sphere (S²) into quadrilateral
//! cells, identified by 64-bit integers whose numeric order traces a
//! space-filling Hilbert curve over all six faces of the circumscribed cube.
//!
//! The crate is organized by the space each module operates on: `r1` (ℝ¹),
//! `r2` (ℝ²), `r3` (ℝ³), `s1` (the unit circle S¹) and `s2` (the unit
//! sphere S²). The `s2` module holds the cell hierarchy itself: cell
//! identifiers, materialized cell geometry, latitude-longitude rectangles
//! and the flood-fill region coverer.

#[macro_use]
pub mod consts;

pub mod r1;
pub mod r2;
pub mod r3;
pub mod s1;
pub mod s2;

pub use crate::s2::cell::Cell;
pub use crate::s2::cellid::CellID;
pub use crate::s2::error::{Error, Result};
pub use crate::s2::latlng::LatLng;
pub use crate::s2::point::Point;
pub use crate::s2::rect::Rect;
pub use crate::s2::region::Region;
