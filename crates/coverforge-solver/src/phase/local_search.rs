//! Local search phase.
//!
//! A single pass of substitutions over the selection. For each position, in
//! selection order, the occupant's static score becomes the baseline for
//! that position. The free pool is then scanned in order; every free site
//! whose score is strictly above the baseline replaces the current occupant
//! and is removed from the pool. The last such site stays at the position.
//! Displaced occupants are dropped, not returned to the pool.
//!
//! Scores are the static scores from claim resolution and are not
//! recomputed after a swap, so the refined objective may overcount the
//! demand actually covered. The refined solution is kept only if its
//! objective is strictly higher; otherwise the input comes back unchanged.
//!
//! Every free site left after a pass scored at most the baseline of every
//! position, and no occupant scores below its baseline, so refining a
//! refined solution returns it as is.

use coverforge_core::Result;
use tracing::{debug, warn};

use super::{log_phase_end, log_phase_start, Phase};
use crate::scope::SolverScope;
use crate::solution::Solution;
use crate::stats::PhaseStats;

const PHASE_TYPE: &str = "LocalSearch";

/// Runs one substitution pass over `solution`.
///
/// # Examples
///
/// ```
/// use coverforge_solver::{refine, SiteScore, Solution};
///
/// let constructed = Solution::new(
///     vec![SiteScore::new(0, 3), SiteScore::new(1, 1)],
///     vec![SiteScore::new(2, 2), SiteScore::new(3, 0)],
/// );
///
/// let refined = refine(constructed);
/// assert_eq!(refined.selected_sites(), vec![0, 2]);
/// assert_eq!(refined.objective(), 5);
/// assert_eq!(refined.free_sites(), vec![3]);
/// ```
pub fn refine(solution: Solution) -> Solution {
    let mut stats = PhaseStats::new(0, PHASE_TYPE);
    substitute(solution, &mut stats)
}

fn substitute(solution: Solution, stats: &mut PhaseStats) -> Solution {
    let mut selected = solution.selected().to_vec();
    let mut pool = solution.free().to_vec();

    for (position, occupant) in selected.iter_mut().enumerate() {
        let baseline = occupant.score;
        let mut i = 0;
        while i < pool.len() {
            let improves = pool[i].score > baseline;
            stats.record_move(improves);
            if improves {
                let incoming = pool.remove(i);
                debug!(
                    position = position as u64,
                    removed = occupant.site as u64,
                    added = incoming.site as u64,
                    baseline = baseline as u64,
                    score = incoming.score as u64,
                    "site substituted"
                );
                *occupant = incoming;
            } else {
                i += 1;
            }
        }
        stats.record_step();
    }

    let candidate = Solution::new(selected, pool);
    if candidate.objective() > solution.objective() {
        candidate
    } else {
        solution
    }
}

/// Local search phase.
///
/// Wraps [`refine`] for use in a solver pipeline: replaces the scope's
/// working solution with its refinement.
#[derive(Debug, Clone, Default)]
pub struct LocalSearchPhase;

impl LocalSearchPhase {
    pub fn new() -> Self {
        Self
    }
}

impl Phase for LocalSearchPhase {
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<()> {
        let mut stats = solver_scope.start_phase(PHASE_TYPE);
        log_phase_start(&stats);

        let Some(working) = solver_scope.take_working_solution() else {
            warn!("local search started without a working solution; skipping");
            solver_scope.end_phase(stats);
            return Ok(());
        };

        let refined = substitute(working, &mut stats);
        let objective = refined.objective();
        solver_scope.set_working_solution(refined);

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
mod tests {
    use super::*;
    use crate::coverage::DistanceMatrix;
    use crate::phase::construction::{select, ConstructionPhase};
    use crate::solution::SiteScore;
    use coverforge_test::overlap::{demand_line, overlapping_sites, OVERLAP_RADIUS};

    fn scored(pairs: &[(usize, usize)]) -> Vec<SiteScore> {
        pairs.iter().map(|&(site, score)| SiteScore::new(site, score)).collect()
    }

    #[test]
    fn test_no_improvement_returns_input() {
        let solution = Solution::new(scored(&[(0, 5), (1, 4)]), scored(&[(2, 4), (3, 1)]));
        assert_eq!(refine(solution.clone()), solution);
    }

    #[test]
    fn test_last_qualifying_site_wins() {
        let solution = Solution::new(scored(&[(0, 1)]), scored(&[(1, 3), (2, 0), (3, 2)]));
        let refined = refine(solution);

        // Both 1 and 3 beat the baseline of 1; 3 comes later in the pool.
        assert_eq!(refined.selected(), &[SiteScore::new(3, 2)]);
        assert_eq!(refined.objective(), 2);
        // Site 1 was consumed on the way and site 0 is not returned.
        assert_eq!(refined.free_sites(), vec![2]);
    }

    #[test]
    fn test_baseline_is_original_occupant() {
        // After 3 moves in, 4 still beats the baseline of 1 although it does
        // not beat the new occupant.
        let solution = Solution::new(scored(&[(0, 1)]), scored(&[(3, 6), (4, 2)]));
        let refined = refine(solution);
        assert_eq!(refined.selected_sites(), vec![4]);
        assert_eq!(refined.objective(), 2);
        assert!(refined.free().is_empty());
    }

    #[test]
    fn test_consumed_sites_are_not_reused() {
        let solution = Solution::new(scored(&[(0, 1), (1, 1)]), scored(&[(2, 3)]));
        let refined = refine(solution);
        assert_eq!(refined.selected_sites(), vec![2, 1]);
        assert_eq!(refined.objective(), 4);
    }

    #[test]
    fn test_positions_keep_selection_order() {
        let solution = Solution::new(
            scored(&[(5, 4), (0, 2), (3, 0)]),
            scored(&[(1, 1), (2, 3), (4, 0)]),
        );
        let refined = refine(solution);
        assert_eq!(refined.selected_sites(), vec![5, 2, 1]);
        assert_eq!(refined.objective(), 8);
        assert_eq!(refined.free_sites(), vec![4]);
    }

    #[test]
    fn test_refine_is_idempotent() {
        let cases = [
            Solution::new(scored(&[(0, 1), (1, 0)]), scored(&[(2, 2), (3, 1), (4, 5)])),
            Solution::new(scored(&[(7, 3)]), scored(&[(1, 4), (2, 9), (3, 5)])),
            Solution::new(scored(&[(0, 2), (1, 2)]), scored(&[(2, 1), (3, 3), (4, 2)])),
        ];
        for solution in cases {
            let once = refine(solution.clone());
            assert!(once.objective() >= solution.objective());
            let twice = refine(once.clone());
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_empty_selection_is_unchanged() {
        let solution = Solution::empty(scored(&[(0, 0), (1, 0)]));
        assert_eq!(refine(solution.clone()), solution);
    }

    #[test]
    fn test_refines_constructed_solution() {
        let coverage = DistanceMatrix::build(&demand_line(), &overlapping_sites())
            .coverage(OVERLAP_RADIUS)
            .unwrap();
        // Greedy picks 2 and 0; the remaining scores are 2, 0, 0.
        let constructed = select(&coverage, coverage.demand_count(), 5, 2).unwrap();
        assert_eq!(refine(constructed.clone()), constructed);
    }

    #[test]
    fn test_phase_replaces_working_solution() {
        let coverage = DistanceMatrix::build(&demand_line(), &overlapping_sites())
            .coverage(OVERLAP_RADIUS)
            .unwrap();
        let mut scope = SolverScope::new(&coverage, 3);
        scope.set_working_solution(Solution::new(
            scored(&[(3, 0), (4, 0)]),
            scored(&[(0, 4), (1, 2), (2, 5)]),
        ));

        let mut phase = LocalSearchPhase::new();
        phase.solve(&mut scope).unwrap();

        // Position 0 consumes the whole pool; position 1 keeps its occupant.
        let refined = scope.working_solution().unwrap();
        assert_eq!(refined.selected_sites(), vec![2, 4]);
        assert_eq!(refined.objective(), 5);
        assert!(refined.free().is_empty());

        let stats = scope.stats().phase(PHASE_TYPE).unwrap();
        assert_eq!(stats.step_count, 2);
        assert_eq!(stats.moves_accepted, 3);
    }

    #[test]
    fn test_phase_without_working_solution() {
        let coverage = DistanceMatrix::build(&demand_line(), &overlapping_sites())
            .coverage(OVERLAP_RADIUS)
            .unwrap();
        let mut scope = SolverScope::new(&coverage, 1);
        LocalSearchPhase::new().solve(&mut scope).unwrap();
        assert!(scope.working_solution().is_none());

        ConstructionPhase::new().solve(&mut scope).unwrap();
        LocalSearchPhase::new().solve(&mut scope).unwrap();
        assert_eq!(scope.working_solution().unwrap().selected_sites(), vec![2]);
        assert_eq!(scope.stats().phases.len(), 3);
    }
}
