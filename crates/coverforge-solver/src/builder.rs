//! Builder module for constructing solver components from configuration
//!
//! This module provides the wiring between configuration types and
//! the actual solver implementation.

use coverforge_config::{
    ConstructionHeuristicType, LocalSearchType, PhaseConfig, SamplingConfig, SolverConfig,
};

use crate::phase::{ConstructionPhase, LocalSearchPhase, Phase};
use crate::sampler::CandidateSiteSampler;

/// Builder for constructing phases from configuration.
pub struct PhaseBuilder;

impl PhaseBuilder {
    /// Builds a phase from configuration.
    pub fn build(config: &PhaseConfig) -> Box<dyn Phase> {
        match config {
            PhaseConfig::ConstructionHeuristic(ch) => match ch.construction_heuristic_type {
                ConstructionHeuristicType::StaticGreedy => Box::new(ConstructionPhase::new()),
            },
            PhaseConfig::LocalSearch(ls) => match ls.local_search_type {
                LocalSearchType::SinglePassSubstitution => Box::new(LocalSearchPhase::new()),
            },
        }
    }

    /// Builds the phase pipeline of a solver configuration.
    pub fn build_all(config: &SolverConfig) -> Vec<Box<dyn Phase>> {
        config.effective_phases().iter().map(Self::build).collect()
    }

    /// Builds the candidate sampler.
    pub fn sampler(config: &SamplingConfig) -> CandidateSiteSampler {
        CandidateSiteSampler::from_config(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverforge_config::{ConstructionHeuristicConfig, LocalSearchConfig};

    #[test]
    fn test_default_pipeline() {
        let phases = PhaseBuilder::build_all(&SolverConfig::default());
        let names: Vec<_> = phases.iter().map(|p| p.phase_type_name()).collect();
        assert_eq!(names, ["ConstructionHeuristic", "LocalSearch"]);
    }

    #[test]
    fn test_construction_only() {
        let config = SolverConfig::new().with_phase(PhaseConfig::ConstructionHeuristic(
            ConstructionHeuristicConfig::default(),
        ));
        let phases = PhaseBuilder::build_all(&config);
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].phase_type_name(), "ConstructionHeuristic");
    }

    #[test]
    fn test_build_local_search() {
        let phase = PhaseBuilder::build(&PhaseConfig::LocalSearch(LocalSearchConfig::default()));
        assert_eq!(phase.phase_type_name(), "LocalSearch");
    }

    #[test]
    fn test_sampler_from_config() {
        let config = SolverConfig::new().with_max_attempts(12);
        assert_eq!(PhaseBuilder::sampler(&config.sampling).max_attempts(), 12);
    }
}
