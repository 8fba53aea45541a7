//! Solver-level scope.

use crate::coverage::CoverageMatrix;
use crate::solution::Solution;
use crate::stats::{PhaseStats, SolverStats};

/// State shared by the selection phases of one solve.
///
/// Borrows the coverage matrix read-only; owns the working solution and the
/// statistics. A scope belongs to exactly one solve and is never shared.
#[derive(Debug)]
pub struct SolverScope<'a> {
    coverage: &'a CoverageMatrix,
    target_count: usize,
    working_solution: Option<Solution>,
    constructive_objective: Option<usize>,
    stats: SolverStats,
    next_phase_index: usize,
}

impl<'a> SolverScope<'a> {
    pub fn new(coverage: &'a CoverageMatrix, target_count: usize) -> Self {
        Self {
            coverage,
            target_count,
            working_solution: None,
            constructive_objective: None,
            stats: SolverStats::default(),
            next_phase_index: 0,
        }
    }

    /// Continues numbering and statistics from phases that ran before this
    /// scope existed (sampling, coverage).
    pub fn with_stats(mut self, stats: SolverStats) -> Self {
        self.next_phase_index = stats.phases.len();
        self.stats = stats;
        self
    }

    pub fn coverage(&self) -> &'a CoverageMatrix {
        self.coverage
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn working_solution(&self) -> Option<&Solution> {
        self.working_solution.as_ref()
    }

    /// Replaces the working solution.
    pub fn set_working_solution(&mut self, solution: Solution) {
        self.working_solution = Some(solution);
    }

    /// Takes the working solution out of the scope.
    pub fn take_working_solution(&mut self) -> Option<Solution> {
        self.working_solution.take()
    }

    /// Objective of the solution produced by the construction phase.
    pub fn constructive_objective(&self) -> Option<usize> {
        self.constructive_objective
    }

    pub fn set_constructive_objective(&mut self, objective: usize) {
        self.constructive_objective = Some(objective);
    }

    /// Starts statistics for the next phase.
    pub fn start_phase(&mut self, phase_type: &'static str) -> PhaseStats {
        let stats = PhaseStats::new(self.next_phase_index, phase_type);
        self.next_phase_index += 1;
        stats
    }

    /// Freezes and records a finished phase.
    pub fn end_phase(&mut self, mut stats: PhaseStats) {
        stats.finish();
        self.stats.absorb(stats);
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }

    /// Consumes the scope, returning the working solution and statistics.
    pub fn into_parts(self) -> (Option<Solution>, Option<usize>, SolverStats) {
        (
            self.working_solution,
            self.constructive_objective,
            self.stats,
        )
    }
}
