//! Parameter sweeps over a fixed instance.
//!
//! One demand set and one candidate set are shared read-only across every
//! `(radius, target_count)` cell. The distance matrix is built once; each
//! cell derives its own coverage matrix and solution, so cells run in
//! parallel without sharing any mutable state.

use std::time::{Duration, Instant};

use coverforge_core::{CoverForgeError, Point, Result};
use rayon::prelude::*;
use tracing::info;

use crate::coverage::DistanceMatrix;
use crate::phase::{refine, select};
use crate::solution::Solution;

/// Solution and timings of one grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentOutcome {
    pub solution: Solution,
    /// Objective before local search.
    pub constructive_objective: usize,
    /// Distinct demand points covered by the final selection.
    pub covered_demand: usize,
    pub construction_time: Duration,
    pub local_search_time: Duration,
}

impl ExperimentOutcome {
    pub fn improved(&self) -> bool {
        self.solution.objective() > self.constructive_objective
    }
}

/// One `(radius, target_count)` cell of an experiment grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    pub radius: f64,
    pub target_count: usize,
    /// A failing cell does not affect the others.
    pub outcome: Result<ExperimentOutcome>,
}

/// Solves every `(radius, target_count)` pair over the same candidates.
///
/// Results come back in radius-major order: all target counts for
/// `radii[0]`, then for `radii[1]`, and so on.
///
/// # Examples
///
/// ```
/// use coverforge_core::Point;
/// use coverforge_solver::experiment::run_grid;
///
/// let demand = [
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
/// ];
/// let sites = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
///
/// let results = run_grid(&demand, &sites, &[0.0, 15.0], &[1, 3], true);
/// assert_eq!(results.len(), 4);
/// assert_eq!(results[2].outcome.as_ref().unwrap().solution.objective(), 4);
/// assert!(results[3].outcome.is_err()); // 3 sites out of 2
/// ```
pub fn run_grid(
    demand: &[Point],
    candidates: &[Point],
    radii: &[f64],
    target_counts: &[usize],
    local_search: bool,
) -> Vec<ExperimentResult> {
    let distances = DistanceMatrix::build(demand, candidates);
    info!(
        event = "experiment_start",
        demand_count = demand.len() as u64,
        candidate_count = candidates.len() as u64,
        cells = (radii.len() * target_counts.len()) as u64,
    );

    let cells: Vec<(f64, usize)> = radii
        .iter()
        .flat_map(|&r| target_counts.iter().map(move |&t| (r, t)))
        .collect();

    cells
        .into_par_iter()
        .map(|(radius, target_count)| ExperimentResult {
            radius,
            target_count,
            outcome: run_cell(&distances, radius, target_count, local_search),
        })
        .collect()
}

fn run_cell(
    distances: &DistanceMatrix,
    radius: f64,
    target_count: usize,
    local_search: bool,
) -> Result<ExperimentOutcome> {
    if target_count > distances.site_count() {
        return Err(CoverForgeError::InfeasibleTarget {
            target_count,
            candidate_count: distances.site_count(),
        });
    }

    let start = Instant::now();
    let coverage = distances.coverage(radius)?;
    let constructed = select(
        &coverage,
        distances.demand_count(),
        distances.site_count(),
        target_count,
    )?;
    let construction_time = start.elapsed();
    let constructive_objective = constructed.objective();

    let start = Instant::now();
    let solution = if local_search {
        refine(constructed)
    } else {
        constructed
    };
    let local_search_time = start.elapsed();

    Ok(ExperimentOutcome {
        covered_demand: solution.covered_demand(&coverage),
        solution,
        constructive_objective,
        construction_time,
        local_search_time,
    })
}
