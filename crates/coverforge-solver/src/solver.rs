//! Solver pipeline.
//!
//! Runs candidate sampling, the coverage model and the configured selection
//! phases in order, timing each one.
//!
//! Logging levels:
//! - **INFO**: Solve start/end, phase summaries, problem scale
//! - **DEBUG**: Sampling region, greedy picks, substitutions
//! - **TRACE**: Per-site claim resolution

use coverforge_config::{ConfigError, SolverConfig};
use coverforge_core::{CoverForgeError, Instance, Point, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::builder::PhaseBuilder;
use crate::coverage::{check_radius, DistanceMatrix};
use crate::phase::{log_phase_end, log_phase_start};
use crate::scope::SolverScope;
use crate::solution::Solution;
use crate::stats::{PhaseStats, SolverStats};

const SAMPLING_PHASE: &str = "CandidateSampling";
const COVERAGE_PHASE: &str = "CoverageModel";

/// Outcome of a successful solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Candidate sites the solution indexes into.
    pub candidates: Vec<Point>,
    /// Final selection after all phases.
    pub solution: Solution,
    /// Objective right after the construction phase.
    pub constructive_objective: usize,
    /// Distinct demand points within radius of a selected site.
    pub covered_demand: usize,
    /// Timing and counters, one entry per phase.
    pub stats: SolverStats,
}

impl SolveResult {
    pub fn objective(&self) -> usize {
        self.solution.objective()
    }

    /// Whether a phase after construction raised the objective.
    pub fn improved(&self) -> bool {
        self.solution.objective() > self.constructive_objective
    }

    /// Coordinates of the selected sites in selection order.
    pub fn selected_points(&self) -> Vec<Point> {
        self.solution
            .selected()
            .iter()
            .map(|s| self.candidates[s.site])
            .collect()
    }
}

/// Maximum covering location solver.
///
/// # Examples
///
/// ```
/// use coverforge_config::SolverConfig;
/// use coverforge_core::Point;
/// use coverforge_solver::Solver;
///
/// let demand = [
///     Point::new(0.0, 0.0),
///     Point::new(10.0, 0.0),
///     Point::new(0.0, 10.0),
///     Point::new(10.0, 10.0),
/// ];
/// let sites = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
///
/// let config = SolverConfig::new().with_radius(15.0).with_target_count(1);
/// let result = Solver::new(config)
///     .unwrap()
///     .solve_with_candidates(&demand, sites)
///     .unwrap();
///
/// assert_eq!(result.solution.selected_sites(), vec![0]);
/// assert_eq!(result.objective(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Creates a solver from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the configuration fails
    /// [`SolverConfig::validate`].
    pub fn new(config: SolverConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves an instance, sampling candidates only if none are supplied.
    pub fn solve_instance(&self, instance: &Instance) -> Result<SolveResult> {
        if let Some(name) = &instance.name {
            info!(instance = name.as_str(), "solving instance");
        }
        match &instance.candidate_sites {
            Some(sites) => self.solve_with_candidates(&instance.population, sites.clone()),
            None => self.solve(&instance.population),
        }
    }

    /// Samples candidates inside the hull of `demand` and solves.
    ///
    /// The random generator is seeded from the configuration when it yields
    /// a seed and from the thread-local generator otherwise.
    pub fn solve(&self, demand: &[Point]) -> Result<SolveResult> {
        let mut rng = match self.config.effective_seed() {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        self.solve_with_rng(demand, &mut rng)
    }

    /// Like [`solve`](Self::solve) with a caller-supplied generator.
    pub fn solve_with_rng<R: Rng + ?Sized>(
        &self,
        demand: &[Point],
        rng: &mut R,
    ) -> Result<SolveResult> {
        let candidate_count = self.config.sampling.candidate_count;
        self.check_inputs(candidate_count)?;

        let mut stats = SolverStats::default();
        stats.start();
        self.log_solve_start(demand.len(), candidate_count);

        let mut phase = PhaseStats::new(stats.phases.len(), SAMPLING_PHASE);
        log_phase_start(&phase);
        let sample = PhaseBuilder::sampler(&self.config.sampling).sample(
            demand,
            candidate_count,
            rng,
        )?;
        phase.record_steps(sample.sites.len() as u64);
        phase.moves_evaluated = sample.attempts;
        phase.moves_accepted = sample.sites.len() as u64;
        phase.finish();
        log_phase_end(&phase, None);
        stats.absorb(phase);

        self.run(demand, sample.sites, stats)
    }

    /// Solves over pre-supplied candidate sites.
    pub fn solve_with_candidates(
        &self,
        demand: &[Point],
        candidates: Vec<Point>,
    ) -> Result<SolveResult> {
        self.check_inputs(candidates.len())?;

        let mut stats = SolverStats::default();
        stats.start();
        self.log_solve_start(demand.len(), candidates.len());

        self.run(demand, candidates, stats)
    }

    // Rejects what can be rejected before any sampling or matrix work.
    fn check_inputs(&self, candidate_count: usize) -> Result<()> {
        if self.config.target_count > candidate_count {
            return Err(CoverForgeError::InfeasibleTarget {
                target_count: self.config.target_count,
                candidate_count,
            });
        }
        check_radius(self.config.coverage.radius)
    }

    fn log_solve_start(&self, demand_count: usize, candidate_count: usize) {
        info!(
            event = "solve_start",
            demand_count = demand_count as u64,
            candidate_count = candidate_count as u64,
            radius = self.config.coverage.radius,
            target_count = self.config.target_count as u64,
        );
    }

    fn run(
        &self,
        demand: &[Point],
        candidates: Vec<Point>,
        mut stats: SolverStats,
    ) -> Result<SolveResult> {
        let mut phase = PhaseStats::new(stats.phases.len(), COVERAGE_PHASE);
        log_phase_start(&phase);
        let coverage =
            DistanceMatrix::build(demand, &candidates).coverage(self.config.coverage.radius)?;
        phase.record_steps(coverage.nonzero_count() as u64);
        phase.finish();
        log_phase_end(&phase, None);
        stats.absorb(phase);

        let mut scope = SolverScope::new(&coverage, self.config.target_count).with_stats(stats);
        for mut phase in PhaseBuilder::build_all(&self.config) {
            phase.solve(&mut scope)?;
        }

        let (solution, constructive_objective, mut stats) = scope.into_parts();
        // `new` rejects pipelines that do not start with construction.
        let solution = solution.unwrap_or_default();
        let constructive_objective = constructive_objective.unwrap_or(solution.objective());
        let covered_demand = solution.covered_demand(&coverage);
        stats.finish();

        info!(
            event = "solve_end",
            objective = solution.objective() as u64,
            constructive_objective = constructive_objective as u64,
            improved = solution.objective() > constructive_objective,
            covered_demand = covered_demand as u64,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        Ok(SolveResult {
            candidates,
            solution,
            constructive_objective,
            covered_demand,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
