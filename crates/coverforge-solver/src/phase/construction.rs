//! Construction heuristic phase.
//!
//! Builds the initial selection in two steps:
//!
//! 1. **Claim resolution.** Sites are visited in ascending index order; each
//!    site claims the demand points it covers that no lower-index site has
//!    claimed yet. The claimed sets partition the coverable demand, and a
//!    site's static score is the size of its claimed set.
//! 2. **Greedy pick.** The unpicked site with the highest static score is
//!    picked (lowest index on ties) until `target_count` sites are picked.
//!    Scores are never recomputed as sites are picked.
//!
//! Step 2 also stops after any pick once the total claimed in step 1 equals
//! the demand count. That total does not depend on the picks, so the check
//! either stops the loop after its first pick or never fires. This is the
//! heuristic's defined termination rule, not a marginal-gain greedy.

use coverforge_core::{CoverForgeError, Result};
use tracing::{debug, trace};

use super::{log_phase_end, log_phase_start, Phase};
use crate::coverage::CoverageMatrix;
use crate::scope::SolverScope;
use crate::solution::{SiteScore, Solution};
use crate::stats::PhaseStats;

const PHASE_TYPE: &str = "ConstructionHeuristic";

/// Disjoint assignment of demand points to the sites that claim them.
///
/// Built once per coverage matrix and read-only afterwards.
///
/// # Examples
///
/// ```
/// use coverforge_core::Point;
/// use coverforge_solver::{DistanceMatrix, SiteAssignment};
///
/// let demand = [Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(4.0, 0.0)];
/// let sites = [Point::new(1.0, 0.0), Point::new(3.0, 0.0)];
/// let coverage = DistanceMatrix::build(&demand, &sites).coverage(1.0).unwrap();
///
/// let assignment = SiteAssignment::resolve(&coverage);
/// assert_eq!(assignment.claimed(0), &[0, 1]);
/// assert_eq!(assignment.claimed(1), &[2]); // point 1 went to site 0
/// assert_eq!(assignment.claimed_total(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAssignment {
    claims: Vec<Vec<usize>>,
    claimed_total: usize,
}

impl SiteAssignment {
    /// Resolves claims in ascending site order.
    pub fn resolve(coverage: &CoverageMatrix) -> Self {
        let mut claimed = vec![false; coverage.demand_count()];
        let mut claims = Vec::with_capacity(coverage.site_count());
        let mut claimed_total = 0;

        for site in 0..coverage.site_count() {
            let mut own = Vec::new();
            for demand in coverage.covered_by(site) {
                if !claimed[demand] {
                    claimed[demand] = true;
                    own.push(demand);
                }
            }
            trace!(site = site as u64, claimed = own.len() as u64, "claims resolved");
            claimed_total += own.len();
            claims.push(own);
        }

        Self {
            claims,
            claimed_total,
        }
    }

    /// Demand indices claimed by `site`, ascending.
    pub fn claimed(&self, site: usize) -> &[usize] {
        &self.claims[site]
    }

    /// Static score of `site`.
    pub fn score(&self, site: usize) -> usize {
        self.claims[site].len()
    }

    /// Static scores of all sites, ascending by site index.
    pub fn scores(&self) -> Vec<SiteScore> {
        self.claims
            .iter()
            .enumerate()
            .map(|(site, c)| SiteScore::new(site, c.len()))
            .collect()
    }

    /// Number of demand points claimed by any site.
    pub fn claimed_total(&self) -> usize {
        self.claimed_total
    }

    pub fn site_count(&self) -> usize {
        self.claims.len()
    }

    /// The site that claimed `demand`, if any.
    pub fn owner(&self, demand: usize) -> Option<usize> {
        self.claims.iter().position(|c| c.binary_search(&demand).is_ok())
    }
}

/// Runs the construction heuristic.
///
/// `demand_count` and `candidate_count` must match the dimensions of
/// `coverage`. The returned solution lists the picks in pick order and the
/// remaining sites, with their static scores, in ascending index order.
///
/// # Errors
///
/// Returns [`CoverForgeError::InfeasibleTarget`] when `target_count` exceeds
/// `candidate_count`. The check happens before any claim is resolved.
///
/// # Examples
///
/// ```
/// use coverforge_core::Point;
/// use coverforge_solver::{select, DistanceMatrix};
///
/// let demand = [
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
/// ];
/// let sites = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
/// let coverage = DistanceMatrix::build(&demand, &sites).coverage(15.0).unwrap();
///
/// let solution = select(&coverage, 4, 2, 1).unwrap();
/// assert_eq!(solution.selected_sites(), vec![0]);
/// assert_eq!(solution.objective(), 4);
/// ```
pub fn select(
    coverage: &CoverageMatrix,
    demand_count: usize,
    candidate_count: usize,
    target_count: usize,
) -> Result<Solution> {
    let mut stats = PhaseStats::new(0, PHASE_TYPE);
    construct(coverage, demand_count, candidate_count, target_count, &mut stats)
}

fn construct(
    coverage: &CoverageMatrix,
    demand_count: usize,
    candidate_count: usize,
    target_count: usize,
    stats: &mut PhaseStats,
) -> Result<Solution> {
    if target_count > candidate_count {
        return Err(CoverForgeError::InfeasibleTarget {
            target_count,
            candidate_count,
        });
    }
    debug_assert_eq!(coverage.demand_count(), demand_count);
    debug_assert_eq!(coverage.site_count(), candidate_count);

    let assignment = SiteAssignment::resolve(coverage);
    debug!(
        claimed_total = assignment.claimed_total() as u64,
        demand_count = demand_count as u64,
        "claim resolution done"
    );
    Ok(greedy_pick(&assignment, demand_count, target_count, stats))
}

fn greedy_pick(
    assignment: &SiteAssignment,
    demand_count: usize,
    target_count: usize,
    stats: &mut PhaseStats,
) -> Solution {
    let mut pool = assignment.scores();
    if target_count == 0 || assignment.claimed_total() == 0 {
        return Solution::empty(pool);
    }

    let fully_claimed = assignment.claimed_total() == demand_count;
    let mut selected = Vec::with_capacity(target_count);

    while let Some(best) = best_position(&pool, stats) {
        let pick = pool.remove(best);
        debug!(
            step = selected.len() as u64,
            site = pick.site as u64,
            score = pick.score as u64,
            "site picked"
        );
        stats.record_step();
        selected.push(pick);

        if selected.len() == target_count || fully_claimed {
            break;
        }
    }

    Solution::new(selected, pool)
}

// Highest score wins; the pool is in ascending site order, so a strict
// comparison keeps the lowest index on ties.
fn best_position(pool: &[SiteScore], stats: &mut PhaseStats) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (pos, candidate) in pool.iter().enumerate() {
        let improves = best.map_or(true, |b| candidate.score > pool[b].score);
        stats.record_move(improves);
        if improves {
            best = Some(pos);
        }
    }
    best
}

/// Construction heuristic phase.
///
/// Wraps [`select`] for use in a solver pipeline: reads the coverage matrix
/// and target count from the scope and installs the result as the working
/// solution.
#[derive(Debug, Clone, Default)]
pub struct ConstructionPhase;

impl ConstructionPhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for ConstructionPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<()> {
        let mut stats = solver_scope.start_phase(PHASE_TYPE);
        log_phase_start(&stats);

        let coverage = solver_scope.coverage();
        let solution = construct(
            coverage,
            coverage.demand_count(),
            coverage.site_count(),
            solver_scope.target_count(),
            &mut stats,
        )?;

        let objective = solution.objective();
        solver_scope.set_constructive_objective(objective);
        solver_scope.set_working_solution(solution);

        stats.finish();
        log_phase_end(&stats, Some(objective));
        solver_scope.end_phase(stats);
        Ok(())
    }

    fn phase_type_name(&self) -> &'static str {
        PHASE_TYPE
    }
}

#[cfg(test)]
#[path = "construction_tests.rs"]
mod tests;
