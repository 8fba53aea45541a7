//! The four-corner square.
//!
//! Demand points at (0,0), (10,0), (0,10), (10,10) and candidate sites at
//! (0,0) and (10,10). At radius 15 either site covers all four points.

use coverforge_core::{Instance, Point};

/// Demand points on the corners of a 10x10 square.
pub fn square_corners() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(0.0, 10.0),
        Point::new(10.0, 10.0),
    ]
}

/// Candidate sites on the square's diagonal corners.
pub fn square_diagonal_sites() -> Vec<Point> {
    vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]
}

/// The square as an [`Instance`] with pre-supplied candidate sites.
pub fn square_instance() -> Instance {
    Instance::new(square_corners())
        .with_name("square")
        .with_candidate_sites(square_diagonal_sites())
}
