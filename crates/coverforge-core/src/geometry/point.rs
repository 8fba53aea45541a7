//! Planar points.

use std::fmt;

/// A location in the plane.
///
/// Demand points may carry arbitrary real coordinates. Candidate sites carry
/// integral coordinates once the sampler has truncated them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point at `(x, y)`.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns the point with both coordinates truncated toward zero.
    ///
    /// ```
    /// use coverforge_core::Point;
    ///
    /// assert_eq!(Point::new(3.9, -2.7).truncated(), Point::new(3.0, -2.0));
    /// ```
    #[inline]
    pub fn truncated(&self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }

    /// Z component of `(a - self) x (b - self)`.
    ///
    /// Positive when `self -> a -> b` turns counter-clockwise, zero when the
    /// three points are collinear.
    #[inline]
    pub fn cross(&self, a: &Point, b: &Point) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
