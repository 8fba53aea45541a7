//! CoverForge Solver Engine
//!
//! This crate provides the maximum covering location heuristic:
//! - Candidate site sampling inside the demand points' convex hull
//! - Distance and coverage matrices
//! - Phases (static greedy construction, single-pass substitution)
//! - Solver pipeline and statistics
//! - Parallel parameter sweeps (experiment module)
//! - Configuration wiring (builder module)
//!
//! Logging levels:
//! - **INFO**: Solve start/end, phase summaries, problem scale
//! - **DEBUG**: Sampling region, greedy picks, substitutions
//! - **TRACE**: Per-site claim resolution

pub mod builder;
pub mod coverage;
pub mod experiment;
pub mod phase;
pub mod sampler;
pub mod scope;
pub mod solution;
pub mod solver;
pub mod stats;

pub use builder::PhaseBuilder;
pub use coverage::{check_radius, CoverageMatrix, DistanceMatrix};
pub use experiment::{run_grid, ExperimentOutcome, ExperimentResult};
pub use phase::{
    construction::ConstructionPhase, local_search::LocalSearchPhase, refine, select, Phase,
    SiteAssignment,
};
pub use sampler::{generate_candidate_sites, CandidateSiteSampler, Sample};
pub use scope::SolverScope;
pub use solution::{SiteScore, Solution};
pub use solver::{SolveResult, Solver};
pub use stats::{PhaseStats, SolverStats};
