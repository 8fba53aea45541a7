//! Selection phases.
//!
//! Phases run in sequence on a [`SolverScope`]:
//! - [`ConstructionPhase`]: builds the initial selection greedily
//! - [`LocalSearchPhase`]: substitutes free sites into the selection

pub mod construction;
pub mod local_search;

use std::fmt::Debug;

use coverforge_core::Result;
use tracing::info;

use crate::scope::SolverScope;
use crate::stats::PhaseStats;

pub use construction::{select, ConstructionPhase, SiteAssignment};
pub use local_search::{refine, LocalSearchPhase};

/// A phase of the solving process.
///
/// Phases are executed in sequence by the solver. Each phase reads the
/// coverage matrix from the scope and replaces the working solution.
pub trait Phase: Send + Debug {
    /// Executes this phase.
    ///
    /// # Errors
    ///
    /// An error aborts the solve; the scope's working solution must not be
    /// reported as a result.
    fn solve(&mut self, solver_scope: &mut SolverScope<'_>) -> Result<()>;

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}

pub(crate) fn log_phase_start(stats: &PhaseStats) {
    info!(
        event = "phase_start",
        phase = stats.phase_type,
        phase_index = stats.phase_index as u64,
    );
}

pub(crate) fn log_phase_end(stats: &PhaseStats, objective: Option<usize>) {
    info!(
        event = "phase_end",
        phase = stats.phase_type,
        phase_index = stats.phase_index as u64,
        duration_ms = stats.elapsed_ms(),
        steps = stats.step_count,
        moves_speed = stats.moves_per_second(),
        objective = objective.map(|o| o as u64),
    );
}
