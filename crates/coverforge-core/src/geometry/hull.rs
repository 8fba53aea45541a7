//! Convex hull and polygon containment.

use super::Point;
use crate::error::{CoverForgeError, Result};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The smallest convex polygon enclosing a point set.
///
/// Vertices are stored in counter-clockwise order with no three consecutive
/// vertices collinear.
///
/// # Examples
///
/// ```
/// use coverforge_core::{ConvexHull, Point};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(5.0, 5.0),
///     Point::new(10.0, 10.0),
///     Point::new(0.0, 10.0),
/// ];
/// let hull = ConvexHull::new(&points).unwrap();
///
/// assert_eq!(hull.vertices().len(), 4);
/// assert!(hull.contains_strict(&Point::new(5.0, 5.0)));
/// assert!(!hull.contains_strict(&Point::new(10.0, 5.0)));
/// assert!(hull.contains(&Point::new(10.0, 5.0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    vertices: Vec<Point>,
    bounds: BoundingBox,
}

impl ConvexHull {
    /// Computes the hull with Andrew's monotone chain.
    ///
    /// # Errors
    ///
    /// Returns [`CoverForgeError::DegenerateInput`] when fewer than three
    /// non-collinear points are given.
    pub fn new(points: &[Point]) -> Result<Self> {
        let degenerate = || CoverForgeError::DegenerateInput {
            point_count: points.len(),
        };

        if points.len() < 3 {
            return Err(degenerate());
        }

        let mut sorted: Vec<Point> = points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        sorted.dedup();

        let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
        for p in &sorted {
            push_turning_left(&mut lower, *p);
        }

        let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
        for p in sorted.iter().rev() {
            push_turning_left(&mut upper, *p);
        }

        // Endpoints of each chain are shared with the other chain.
        lower.pop();
        upper.pop();
        lower.extend(upper);

        if lower.len() < 3 {
            return Err(degenerate());
        }

        let bounds = bounding_box(&lower);
        Ok(Self {
            vertices: lower,
            bounds,
        })
    }

    /// Hull vertices in counter-clockwise order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Bounding box of the hull (equal to that of the input points).
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f64 {
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }

    /// Returns true if `p` lies in the interior (boundary excluded).
    pub fn contains_strict(&self, p: &Point) -> bool {
        self.edges().all(|(a, b)| a.cross(b, p) > 0.0)
    }

    /// Returns true if `p` lies in the interior or on the boundary.
    pub fn contains(&self, p: &Point) -> bool {
        self.edges().all(|(a, b)| a.cross(b, p) >= 0.0)
    }

    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }
}

// Pops vertices until appending `p` makes a strict left turn.
fn push_turning_left(chain: &mut Vec<Point>, p: Point) {
    while chain.len() >= 2 {
        let a = chain[chain.len() - 2];
        let b = chain[chain.len() - 1];
        if a.cross(&b, &p) > 0.0 {
            break;
        }
        chain.pop();
    }
    chain.push(p);
}

fn bounding_box(points: &[Point]) -> BoundingBox {
    points.iter().fold(
        BoundingBox {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        },
        |b, p| BoundingBox {
            min_x: b.min_x.min(p.x),
            min_y: b.min_y.min(p.y),
            max_x: b.max_x.max(p.x),
            max_y: b.max_y.max(p.y),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
        ]
    }

    #[test]
    fn test_square_hull() {
        let hull = ConvexHull::new(&square()).unwrap();
        assert_eq!(hull.vertices().len(), 4);
        assert_eq!(hull.area(), 100.0);
        assert_eq!(
            hull.bounding_box(),
            BoundingBox {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 10.0,
                max_y: 10.0
            }
        );
    }

    #[test]
    fn test_interior_points_are_dropped() {
        let mut points = square();
        points.push(Point::new(5.0, 5.0));
        points.push(Point::new(2.0, 8.0));
        // Collinear with the bottom edge.
        points.push(Point::new(5.0, 0.0));

        let hull = ConvexHull::new(&points).unwrap();
        assert_eq!(hull.vertices().len(), 4);
        assert!(hull.area() > 0.0);
    }

    #[test]
    fn test_vertices_are_counter_clockwise() {
        let hull = ConvexHull::new(&square()).unwrap();
        let v = hull.vertices();
        for i in 0..v.len() {
            let a = v[i];
            let b = v[(i + 1) % v.len()];
            let c = v[(i + 2) % v.len()];
            assert!(a.cross(&b, &c) > 0.0);
        }
    }

    #[test]
    fn test_boundary_containment() {
        let hull = ConvexHull::new(&square()).unwrap();
        let edge = Point::new(0.0, 5.0);
        let corner = Point::new(10.0, 10.0);
        let outside = Point::new(10.5, 5.0);

        assert!(!hull.contains_strict(&edge));
        assert!(hull.contains(&edge));
        assert!(hull.contains(&corner));
        assert!(!hull.contains(&outside));
        assert!(!hull.contains_strict(&outside));
    }

    #[test]
    fn test_triangle_excludes_far_corner() {
        let hull = ConvexHull::new(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ])
        .unwrap();
        assert!(hull.contains_strict(&Point::new(8.0, 2.0)));
        assert!(!hull.contains(&Point::new(2.0, 8.0)));
    }

    #[test]
    fn test_too_few_points() {
        let err = ConvexHull::new(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, CoverForgeError::DegenerateInput { point_count: 2 });
    }

    #[test]
    fn test_collinear_points() {
        let points: Vec<Point> = (0..6).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
        let err = ConvexHull::new(&points).unwrap_err();
        assert_eq!(err, CoverForgeError::DegenerateInput { point_count: 6 });
    }

    #[test]
    fn test_duplicates_do_not_form_a_hull() {
        let points = vec![Point::new(1.0, 1.0); 5];
        assert!(ConvexHull::new(&points).is_err());
    }
}
