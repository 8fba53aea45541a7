//! Planar geometry used to bound candidate sampling.
//!
//! - [`Point`]: immutable coordinate pair
//! - [`ConvexHull`]: hull of the demand points, with strict and inclusive containment
//! - [`BoundingBox`]: axis-aligned extent of the hull

mod hull;
mod point;

pub use hull::{BoundingBox, ConvexHull};
pub use point::Point;
