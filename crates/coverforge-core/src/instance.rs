//! Problem instances.

use crate::geometry::Point;

/// One covering-location problem instance.
///
/// Holds the two tables a persisted instance carries: the population
/// (demand points) and, optionally, a pre-generated set of candidate sites.
/// Positions are identities: index `i` of `population` is demand point `i`
/// in every matrix derived from this instance, and likewise for candidate
/// sites.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    /// Instance label used in log output.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: Option<String>,

    /// Demand points, in load order.
    pub population: Vec<Point>,

    /// Candidate sites, if already generated.
    #[cfg_attr(feature = "serde", serde(default))]
    pub candidate_sites: Option<Vec<Point>>,
}

impl Instance {
    /// Creates an instance with demand points only.
    pub fn new(population: Vec<Point>) -> Self {
        Self {
            name: None,
            population,
            candidate_sites: None,
        }
    }

    /// Sets the instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attaches pre-generated candidate sites.
    pub fn with_candidate_sites(mut self, sites: Vec<Point>) -> Self {
        self.candidate_sites = Some(sites);
        self
    }

    /// Builds an instance from raw `(x, y)` pairs.
    pub fn from_coordinates(coordinates: &[(f64, f64)]) -> Self {
        Self::new(coordinates.iter().copied().map(Point::from).collect())
    }

    pub fn demand_count(&self) -> usize {
        self.population.len()
    }

    pub fn candidate_count(&self) -> Option<usize> {
        self.candidate_sites.as_ref().map(Vec::len)
    }
}
