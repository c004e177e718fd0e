//! Random test-data helpers, available only to tests.

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::r3::vector::Vector;
use crate::s2::cellid::{CellID, MAX_LEVEL, NUM_FACES, POS_BITS};
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::rect::Rect;

pub fn rng() -> ThreadRng {
    rand::thread_rng()
}

/// cellid returns a random CellID at a randomly chosen level. The
/// distribution is uniform over the space of cell ids, but only
/// approximately uniform over the surface of the sphere.
pub fn cellid<R: Rng>(rng: &mut R) -> CellID {
    let level = rng.gen_range(0..=MAX_LEVEL);
    cellid_for_level(rng, level)
}

/// cellid_for_level returns a random CellID at the given level.
pub fn cellid_for_level<R: Rng>(rng: &mut R, level: u64) -> CellID {
    let face = rng.gen_range(0..NUM_FACES as u64);
    let pos = rng.gen::<u64>() & ((1 << POS_BITS) - 1);
    let id = CellID::from_face_pos_level(face, pos, level);
    debug_assert!(id.is_valid());
    id
}

/// point returns a random unit vector, uniformly distributed over the
/// sphere.
pub fn point<R: Rng>(rng: &mut R) -> Point {
    // Sampling a Gaussian in each component would also work, but rejection
    // sampling from the cube is simpler and unbiased.
    loop {
        let v = Vector::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let n2 = v.norm2();
        if n2 > 1e-10 && n2 <= 1. {
            return Point(v.normalize());
        }
    }
}

/// latlng returns a valid random coordinate.
pub fn latlng<R: Rng>(rng: &mut R) -> LatLng {
    LatLng::from(point(rng))
}

/// rect returns a random non-empty rectangle whose sides are at most the
/// given fraction of the sphere in each direction.
pub fn rect<R: Rng>(rng: &mut R, max_fraction: f64) -> Rect {
    let center = latlng(rng);
    let lat_size = rng.gen_range(0.0..max_fraction * std::f64::consts::PI);
    let lng_size = rng.gen_range(0.0..max_fraction * 2. * std::f64::consts::PI);
    Rect::from_center_size(
        center,
        LatLng::from_radians(lat_size, lng_size),
    )
}
