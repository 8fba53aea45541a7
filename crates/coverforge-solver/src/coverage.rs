//! Distance and coverage matrices.
//!
//! Both matrices are dense, row-major and indexed `[demand][site]`. Positions
//! are identities: row `i` is demand point `i`, column `j` is candidate site
//! `j` in the order the caller supplied them.

use coverforge_core::{CoverForgeError, Point, Result};

/// Truncated Euclidean distances from every demand point to every candidate.
///
/// # Examples
///
/// ```
/// use coverforge_core::Point;
/// use coverforge_solver::DistanceMatrix;
///
/// let demand = [Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
/// let sites = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
/// let dist = DistanceMatrix::build(&demand, &sites);
///
/// assert_eq!(dist.get(1, 0), 5);
/// assert_eq!(dist.get(1, 1), 3); // sqrt(13) = 3.6 truncated
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<u64>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    /// Computes `dist[i][j] = floor(|demand[i] - sites[j]|)`.
    pub fn build(demand: &[Point], sites: &[Point]) -> Self {
        let data = demand
            .iter()
            .flat_map(|d| sites.iter().map(move |s| d.distance_to(s) as u64))
            .collect();
        Self {
            data,
            rows: demand.len(),
            cols: sites.len(),
        }
    }

    /// Number of demand points (rows).
    pub fn demand_count(&self) -> usize {
        self.rows
    }

    /// Number of candidate sites (columns).
    pub fn site_count(&self) -> usize {
        self.cols
    }

    /// Distance from demand point `demand` to candidate `site`.
    #[inline]
    pub fn get(&self, demand: usize, site: usize) -> u64 {
        debug_assert!(demand < self.rows && site < self.cols);
        self.data[demand * self.cols + site]
    }

    /// Distances from one demand point to every site.
    pub fn row(&self, demand: usize) -> &[u64] {
        &self.data[demand * self.cols..(demand + 1) * self.cols]
    }

    /// Returns the transposed matrix (`[site][demand]`).
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.cols {
            data.extend((0..self.rows).map(|i| self.get(i, j)));
        }
        Self {
            data,
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Derives the coverage matrix for `radius`.
    pub fn coverage(&self, radius: f64) -> Result<CoverageMatrix> {
        CoverageMatrix::new(self, radius)
    }
}

/// `cov[i][j] = dist[i][j] <= radius`.
///
/// Read-only once built. Changing the radius means building a new matrix from
/// the same [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMatrix {
    data: Vec<bool>,
    rows: usize,
    cols: usize,
    radius: f64,
}

impl CoverageMatrix {
    /// Thresholds `distances` at `radius`.
    ///
    /// # Errors
    ///
    /// Returns [`CoverForgeError::InvalidRadius`] when `radius` is negative or NaN.
    pub fn new(distances: &DistanceMatrix, radius: f64) -> Result<Self> {
        check_radius(radius)?;
        let data = distances.data.iter().map(|&d| d as f64 <= radius).collect();
        Ok(Self {
            data,
            rows: distances.rows,
            cols: distances.cols,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn demand_count(&self) -> usize {
        self.rows
    }

    pub fn site_count(&self) -> usize {
        self.cols
    }

    /// Whether `site` covers `demand`.
    #[inline]
    pub fn covers(&self, demand: usize, site: usize) -> bool {
        debug_assert!(demand < self.rows && site < self.cols);
        self.data[demand * self.cols + site]
    }

    /// Demand indices covered by `site`, ascending.
    pub fn covered_by(&self, site: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.rows).filter(move |&i| self.covers(i, site))
    }

    /// Number of demand points covered by at least one of `sites`.
    pub fn covered_count(&self, sites: &[usize]) -> usize {
        (0..self.rows)
            .filter(|&i| sites.iter().any(|&j| self.covers(i, j)))
            .count()
    }

    /// Total number of `true` cells.
    pub fn nonzero_count(&self) -> usize {
        self.data.iter().filter(|&&c| c).count()
    }
}

/// Rejects negative and NaN radii.
pub fn check_radius(radius: f64) -> Result<()> {
    if radius.is_nan() || radius < 0.0 {
        return Err(CoverForgeError::InvalidRadius { radius });
    }
    Ok(())
}
