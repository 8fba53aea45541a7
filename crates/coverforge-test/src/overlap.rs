//! Demand lines with overlapping coverage.
//!
//! Eleven demand points on the x axis at x = 0, 1, ..., 10 plus one isolated
//! point at x = 50 that no site reaches. With radius 2 (distances are
//! truncated, so a site covers points within 2 units):
//!
//! | site | x  | covers        | claimed (after lower sites) |
//! |------|----|---------------|-----------------------------|
//! | 0    | 1  | 0..=3         | 0, 1, 2, 3                  |
//! | 1    | 3  | 1..=5         | 4, 5                        |
//! | 2    | 8  | 6..=10        | 6, 7, 8, 9, 10              |
//! | 3    | 5  | 3..=7         | (none)                      |
//! | 4    | 20 | (none)        | (none)                      |

use coverforge_core::Point;

/// Radius used by the overlap fixtures.
pub const OVERLAP_RADIUS: f64 = 2.0;

/// Demand points on the x axis at integer positions 0..=10, then x = 50.
pub fn demand_line() -> Vec<Point> {
    (0..=10)
        .map(|x| Point::new(x as f64, 0.0))
        .chain(std::iter::once(Point::new(50.0, 0.0)))
        .collect()
}

/// Candidate sites with the overlap pattern described in the module docs.
pub fn overlapping_sites() -> Vec<Point> {
    [1.0, 3.0, 8.0, 5.0, 20.0]
        .iter()
        .map(|&x| Point::new(x, 0.0))
        .collect()
}

/// Expected static (claimed) score per site at [`OVERLAP_RADIUS`].
pub const EXPECTED_SCORES: [usize; 5] = [4, 2, 5, 0, 0];

/// Demand points claimed by some site at [`OVERLAP_RADIUS`] (the isolated point is not).
pub const EXPECTED_CLAIMED_TOTAL: usize = 11;
