pub mod vector;

pub use self::vector::{Axis, Vector};
