//! Site selections.

use crate::coverage::CoverageMatrix;

/// A candidate site together with its static (claimed) score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SiteScore {
    /// Index into the candidate set.
    pub site: usize,
    /// Number of demand points claimed by this site during claim resolution.
    pub score: usize,
}

impl SiteScore {
    pub const fn new(site: usize, score: usize) -> Self {
        Self { site, score }
    }
}

/// A selection of candidate sites.
///
/// Produced by the construction heuristic and possibly superseded (never
/// mutated) by local search. The objective is the sum of the selected sites'
/// static scores. Right after construction the scores are disjoint, so the
/// objective equals the number of covered demand points; after a
/// substitution it may overcount (see [`covered_demand`](Self::covered_demand)).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    selected: Vec<SiteScore>,
    free: Vec<SiteScore>,
    objective: usize,
}

impl Solution {
    /// Creates a solution; the objective is derived from `selected`.
    pub fn new(selected: Vec<SiteScore>, free: Vec<SiteScore>) -> Self {
        let objective = selected.iter().map(|s| s.score).sum();
        Self {
            selected,
            free,
            objective,
        }
    }

    /// An empty selection with every site left free.
    pub fn empty(free: Vec<SiteScore>) -> Self {
        Self::new(Vec::new(), free)
    }

    /// Selected sites in pick order.
    pub fn selected(&self) -> &[SiteScore] {
        &self.selected
    }

    /// Unselected sites in pool order (ascending site index).
    pub fn free(&self) -> &[SiteScore] {
        &self.free
    }

    /// Selected site indices in pick order.
    pub fn selected_sites(&self) -> Vec<usize> {
        self.selected.iter().map(|s| s.site).collect()
    }

    /// Free site indices in pool order.
    pub fn free_sites(&self) -> Vec<usize> {
        self.free.iter().map(|s| s.site).collect()
    }

    /// Sum of the selected sites' static scores.
    pub fn objective(&self) -> usize {
        self.objective
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Number of distinct demand points within radius of a selected site.
    pub fn covered_demand(&self, coverage: &CoverageMatrix) -> usize {
        coverage.covered_count(&self.selected_sites())
    }

    /// [`covered_demand`](Self::covered_demand) as a percentage of all demand.
    pub fn coverage_pct(&self, coverage: &CoverageMatrix) -> f64 {
        let total = coverage.demand_count();
        if total == 0 {
            return 0.0;
        }
        self.covered_demand(coverage) as f64 / total as f64 * 100.0
    }
}
