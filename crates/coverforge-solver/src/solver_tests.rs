//! Tests for the solver pipeline.

use super::*;
use coverforge_config::{ConstructionHeuristicConfig, PhaseConfig};
use coverforge_core::ConvexHull;
use coverforge_test::grid::demand_grid;
use coverforge_test::overlap::{demand_line, overlapping_sites, OVERLAP_RADIUS};
use coverforge_test::square::{square_corners, square_diagonal_sites, square_instance};

fn solver(config: SolverConfig) -> Solver {
    Solver::new(config).unwrap()
}

#[test]
fn test_square_with_candidates() {
    let result = solver(SolverConfig::new().with_radius(15.0).with_target_count(1))
        .solve_with_candidates(&square_corners(), square_diagonal_sites())
        .unwrap();

    assert_eq!(result.solution.selected_sites(), vec![0]);
    assert_eq!(result.objective(), 4);
    assert_eq!(result.constructive_objective, 4);
    assert_eq!(result.covered_demand, 4);
    assert!(!result.improved());
    assert_eq!(result.selected_points(), vec![Point::new(0.0, 0.0)]);

    let phases: Vec<_> = result
        .stats
        .phases
        .iter()
        .map(|p| (p.phase_index, p.phase_type))
        .collect();
    assert_eq!(
        phases,
        [
            (0, "CoverageModel"),
            (1, "ConstructionHeuristic"),
            (2, "LocalSearch"),
        ]
    );
}

#[test]
fn test_solve_instance_uses_supplied_sites() {
    let result = solver(SolverConfig::new().with_radius(15.0))
        .solve_instance(&square_instance())
        .unwrap();
    assert_eq!(result.candidates, square_diagonal_sites());
    assert!(result.stats.phase("CandidateSampling").is_none());
}

#[test]
fn test_solve_instance_samples_without_sites() {
    let instance = Instance::new(square_corners());
    let config = SolverConfig::new()
        .with_random_seed(5)
        .with_candidate_count(8)
        .with_radius(15.0);
    let result = solver(config).solve_instance(&instance).unwrap();

    assert_eq!(result.candidates.len(), 8);
    let sampling = result.stats.phase("CandidateSampling").unwrap();
    assert_eq!(sampling.phase_index, 0);
    assert_eq!(sampling.moves_accepted, 8);
    assert!(sampling.moves_evaluated >= 8);
}

#[test]
fn test_seeded_solve_is_reproducible() {
    let demand = demand_grid(6, 6, 10.0);
    let config = SolverConfig::new()
        .with_random_seed(11)
        .with_candidate_count(20)
        .with_radius(15.0)
        .with_target_count(3);

    let a = solver(config.clone()).solve(&demand).unwrap();
    let b = solver(config).solve(&demand).unwrap();

    assert_eq!(a.candidates, b.candidates);
    assert_eq!(a.solution, b.solution);

    let hull = ConvexHull::new(&demand).unwrap();
    assert!(a.candidates.iter().all(|c| hull.contains(c)));
    assert!(a.solution.len() <= 3);
    assert!(a.objective() >= a.constructive_objective);
}

#[test]
fn test_infeasible_target_before_sampling() {
    // Collinear demand would fail sampling; the target check comes first.
    let demand: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 0.0)).collect();
    let config = SolverConfig::new()
        .with_candidate_count(3)
        .with_target_count(5);

    assert_eq!(
        solver(config).solve(&demand).unwrap_err(),
        CoverForgeError::InfeasibleTarget {
            target_count: 5,
            candidate_count: 3,
        }
    );
}

#[test]
fn test_infeasible_target_with_candidates() {
    let err = solver(SolverConfig::new().with_target_count(3))
        .solve_with_candidates(&square_corners(), square_diagonal_sites())
        .unwrap_err();
    assert!(matches!(err, CoverForgeError::InfeasibleTarget { .. }));
}

#[test]
fn test_degenerate_demand() {
    let demand: Vec<Point> = (0..4).map(|i| Point::new(i as f64, 2.0 * i as f64)).collect();
    let err = solver(SolverConfig::new().with_random_seed(0))
        .solve(&demand)
        .unwrap_err();
    assert_eq!(err, CoverForgeError::DegenerateInput { point_count: 4 });
}

#[test]
fn test_sampling_timeout_propagates() {
    let config = SolverConfig::new()
        .with_random_seed(0)
        .with_candidate_count(50)
        .with_max_attempts(1);
    let err = solver(config).solve(&square_corners()).unwrap_err();
    assert!(matches!(err, CoverForgeError::SamplingTimeout { requested: 50, .. }));
}

#[test]
fn test_invalid_radius_is_rejected_by_config() {
    assert!(Solver::new(SolverConfig::new().with_radius(-2.0)).is_err());
    assert!(Solver::new(SolverConfig::new().with_radius(f64::NAN)).is_err());
}

#[test]
fn test_zero_radius_gives_empty_selection() {
    let sites = vec![Point::new(5.0, 5.0), Point::new(3.0, 7.0)];
    let result = solver(SolverConfig::new().with_target_count(2))
        .solve_with_candidates(&square_corners(), sites)
        .unwrap();
    assert!(result.solution.is_empty());
    assert_eq!(result.objective(), 0);
    assert_eq!(result.covered_demand, 0);
}

#[test]
fn test_construction_only_pipeline() {
    let config = SolverConfig::new()
        .with_radius(OVERLAP_RADIUS)
        .with_target_count(2)
        .with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ));
    let result = solver(config)
        .solve_with_candidates(&demand_line(), overlapping_sites())
        .unwrap();

    assert_eq!(result.solution.selected_sites(), vec![2, 0]);
    assert_eq!(result.objective(), 9);
    assert_eq!(result.covered_demand, 9);
    assert!(result.stats.phase("LocalSearch").is_none());
}

#[test]
fn test_step_totals_span_phases() {
    let config = SolverConfig::new()
        .with_radius(OVERLAP_RADIUS)
        .with_target_count(3);
    let result = solver(config)
        .solve_with_candidates(&demand_line(), overlapping_sites())
        .unwrap();

    let construction = result.stats.phase("ConstructionHeuristic").unwrap();
    let local_search = result.stats.phase("LocalSearch").unwrap();
    assert_eq!(construction.step_count, 3);
    assert_eq!(local_search.step_count, 3);
    assert!(result.stats.step_count >= 6);
    assert!(result.stats.elapsed() >= construction.elapsed());
}
