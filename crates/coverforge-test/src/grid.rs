//! Regular grids of demand points.

use coverforge_core::Point;

/// `columns x rows` demand points spaced `spacing` apart, row-major from the origin.
pub fn demand_grid(columns: usize, rows: usize, spacing: f64) -> Vec<Point> {
    (0..rows)
        .flat_map(|r| {
            (0..columns).map(move |c| Point::new(c as f64 * spacing, r as f64 * spacing))
        })
        .collect()
}

/// Candidate sites along the horizontal line `y`, at the given x positions.
pub fn sites_on_row(xs: &[f64], y: f64) -> Vec<Point> {
    xs.iter().map(|&x| Point::new(x, y)).collect()
}
