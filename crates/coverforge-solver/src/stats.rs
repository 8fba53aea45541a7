//! Solver statistics.
//!
//! Stack-allocated statistics for solver and phase performance tracking.

use std::time::{Duration, Instant};

/// Solver-level statistics.
///
/// Tracks aggregate metrics across all phases of a solve run.
///
/// # Example
///
/// ```
/// use coverforge_solver::stats::{PhaseStats, SolverStats};
///
/// let mut stats = SolverStats::default();
/// stats.start();
///
/// let mut phase = PhaseStats::new(0, "LocalSearch");
/// phase.record_step();
/// phase.record_move(true);
/// phase.record_move(false);
/// stats.absorb(phase);
///
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolverStats {
    start_time: Option<Instant>,
    end_time: Option<Instant>,
    /// Total steps taken across all phases.
    pub step_count: u64,
    /// Total moves evaluated across all phases.
    pub moves_evaluated: u64,
    /// Total moves accepted across all phases.
    pub moves_accepted: u64,
    /// Per-phase statistics, in execution order.
    pub phases: Vec<PhaseStats>,
}

impl SolverStats {
    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.end_time = None;
    }

    /// Marks the end of solving, freezing [`elapsed`](Self::elapsed).
    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Returns the elapsed time since solving started.
    pub fn elapsed(&self) -> Duration {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        }
    }

    /// Folds a finished phase into the totals.
    pub fn absorb(&mut self, phase: PhaseStats) {
        self.step_count += phase.step_count;
        self.moves_evaluated += phase.moves_evaluated;
        self.moves_accepted += phase.moves_accepted;
        self.phases.push(phase);
    }

    /// Returns the statistics of the first phase with the given type name.
    pub fn phase(&self, phase_type: &str) -> Option<&PhaseStats> {
        self.phases.iter().find(|p| p.phase_type == phase_type)
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

/// Phase-level statistics.
///
/// Tracks metrics for a single solver phase.
///
/// # Example
///
/// ```
/// use coverforge_solver::stats::PhaseStats;
///
/// let mut stats = PhaseStats::new(2, "LocalSearch");
/// stats.record_step();
/// stats.record_move(true);
/// stats.finish();
///
/// assert_eq!(stats.phase_index, 2);
/// assert_eq!(stats.phase_type, "LocalSearch");
/// assert_eq!(stats.step_count, 1);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone)]
pub struct PhaseStats {
    /// Index of this phase (0-based).
    pub phase_index: usize,
    /// Type name of the phase.
    pub phase_type: &'static str,
    start_time: Instant,
    end_time: Option<Instant>,
    /// Number of steps taken in this phase.
    pub step_count: u64,
    /// Number of moves evaluated in this phase.
    pub moves_evaluated: u64,
    /// Number of moves accepted in this phase.
    pub moves_accepted: u64,
}

impl PhaseStats {
    /// Creates new phase statistics.
    pub fn new(phase_index: usize, phase_type: &'static str) -> Self {
        Self {
            phase_index,
            phase_type,
            start_time: Instant::now(),
            end_time: None,
            step_count: 0,
            moves_evaluated: 0,
            moves_accepted: 0,
        }
    }

    /// Marks the phase as finished, freezing [`elapsed`](Self::elapsed).
    ///
    /// Only the first call has effect.
    pub fn finish(&mut self) {
        self.end_time.get_or_insert_with(Instant::now);
    }

    /// Returns the elapsed time for this phase.
    pub fn elapsed(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis() as u64
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Records several steps at once.
    pub fn record_steps(&mut self, steps: u64) {
        self.step_count += steps;
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }

    /// Returns the acceptance rate (accepted / evaluated).
    pub fn acceptance_rate(&self) -> f64 {
        if self.moves_evaluated == 0 {
            0.0
        } else {
            self.moves_accepted as f64 / self.moves_evaluated as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_sums_counters() {
        let mut solver = SolverStats::default();
        solver.start();

        let mut construction = PhaseStats::new(0, "ConstructionHeuristic");
        construction.record_steps(3);
        construction.finish();

        let mut local_search = PhaseStats::new(1, "LocalSearch");
        local_search.record_move(true);
        local_search.record_move(false);
        local_search.record_move(false);
        local_search.finish();

        solver.absorb(construction);
        solver.absorb(local_search);
        solver.finish();

        assert_eq!(solver.step_count, 3);
        assert_eq!(solver.moves_evaluated, 3);
        assert_eq!(solver.moves_accepted, 1);
        assert_eq!(solver.phases.len(), 2);
        assert!(solver.phase("LocalSearch").is_some());
        assert!(solver.phase("Exhaustive").is_none());
        assert!((solver.acceptance_rate() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_finished_phase_is_frozen() {
        let mut stats = PhaseStats::new(0, "CoverageModel");
        stats.finish();
        let first = stats.elapsed();
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(stats.elapsed(), first);
    }

    #[test]
    fn test_unstarted_solver_has_zero_elapsed() {
        assert_eq!(SolverStats::default().elapsed(), Duration::ZERO);
    }
}
