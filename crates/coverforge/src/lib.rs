//! CoverForge - Maximum Covering Location Heuristics in Rust
//!
//! Picks service sites so that as many demand points as possible lie within
//! a fixed radius of a picked site. Candidate sites are either supplied or
//! sampled inside the convex hull of the demand points; a static greedy
//! construction builds the selection and a single substitution pass may
//! refine it.
//!
//! # Example
//!
//! ```rust
//! use coverforge::prelude::*;
//!
//! let instance = Instance::from_coordinates(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0)])
//!     .with_candidate_sites(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
//!
//! let config = SolverConfig::new().with_radius(15.0).with_target_count(1);
//! let result = solve_with_config(&instance, config).unwrap();
//! assert_eq!(result.solution.selected_sites(), vec![0]);
//! assert_eq!(result.objective(), 4);
//! ```

// Geometry and instance data
pub use coverforge_core::{BoundingBox, ConvexHull, CoverForgeError, Instance, Point};

// Configuration
pub use coverforge_config::{ConfigError, EnvironmentMode, PhaseConfig, SolverConfig};

// Solver building blocks
pub use coverforge_solver::{
    generate_candidate_sites, refine, run_grid, select, CandidateSiteSampler, CoverageMatrix,
    DistanceMatrix, ExperimentOutcome, ExperimentResult, SiteAssignment, SiteScore, Solution,
    SolveResult, Solver, SolverStats,
};

#[cfg(feature = "console")]
pub use coverforge_console as console;

mod solver;
pub use solver::{solve, solve_with_config, Error, CONFIG_FILE};

pub mod prelude {
    pub use super::{solve, solve_with_config};
    pub use super::{Instance, Point, SolverConfig};
    pub use super::{SolveResult, Solution, Solver};
}
