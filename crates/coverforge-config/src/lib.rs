//! Configuration system for CoverForge.
//!
//! Load solver configuration from TOML or YAML files to control candidate
//! sampling, the service radius, the number of sites to select and which
//! phases run, without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use coverforge_config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!     target_count = 5
//!
//!     [sampling]
//!     candidate_count = 200
//!     seconds_spent_limit = 10
//!
//!     [coverage]
//!     radius = 12.5
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!
//!     [[phases]]
//!     type = "local_search"
//! "#).unwrap();
//!
//! assert_eq!(config.sampling.candidate_count, 200);
//! assert_eq!(config.sampling.time_limit(), Some(Duration::from_secs(10)));
//! assert_eq!(config.phases.len(), 2);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use coverforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("coverforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of candidate sites to sample.
pub const DEFAULT_CANDIDATE_COUNT: usize = 100;

/// Default cap on rejection-sampling draws.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible candidate sampling.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Candidate sampling configuration.
    #[serde(default)]
    pub sampling: SamplingConfig,

    /// Coverage configuration.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Number of sites to select.
    #[serde(default = "default_target_count")]
    pub target_count: usize,

    /// Phase configurations. Empty means construction followed by local search.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,
}

fn default_target_count() -> usize {
    1
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            random_seed: None,
            sampling: SamplingConfig::default(),
            coverage: CoverageConfig::default(),
            target_count: default_target_count(),
            phases: Vec::new(),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Sets the service radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.coverage.radius = radius;
        self
    }

    /// Sets the number of sites to select.
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count;
        self
    }

    /// Sets the number of candidate sites to sample.
    pub fn with_candidate_count(mut self, candidate_count: usize) -> Self {
        self.sampling.candidate_count = candidate_count;
        self
    }

    /// Sets the rejection-sampling attempt cap.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.sampling.max_attempts = max_attempts;
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Returns the seed sampling should use, if any.
    ///
    /// Reproducible mode without an explicit seed falls back to seed 0.
    pub fn effective_seed(&self) -> Option<u64> {
        match (self.random_seed, self.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::Reproducible) => Some(0),
            (None, EnvironmentMode::NonReproducible) => None,
        }
    }

    /// Returns the phases to run, filling in the default pipeline.
    pub fn effective_phases(&self) -> Vec<PhaseConfig> {
        if self.phases.is_empty() {
            vec![
                PhaseConfig::ConstructionHeuristic(ConstructionHeuristicConfig::default()),
                PhaseConfig::LocalSearch(LocalSearchConfig::default()),
            ]
        } else {
            self.phases.clone()
        }
    }

    /// Checks values that deserialization alone cannot reject.
    ///
    /// # Examples
    ///
    /// ```
    /// use coverforge_config::SolverConfig;
    ///
    /// assert!(SolverConfig::new().with_radius(-1.0).validate().is_err());
    /// assert!(SolverConfig::new().with_radius(3.0).validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.coverage.radius.is_nan() || self.coverage.radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "coverage.radius must be >= 0, got {}",
                self.coverage.radius
            )));
        }
        if self.sampling.candidate_count == 0 {
            return Err(ConfigError::Invalid(
                "sampling.candidate_count must be >= 1".to_string(),
            ));
        }
        if self.sampling.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "sampling.max_attempts must be >= 1".to_string(),
            ));
        }
        let phases = self.effective_phases();
        match phases.first() {
            Some(PhaseConfig::ConstructionHeuristic(_)) => {}
            _ => {
                return Err(ConfigError::Invalid(
                    "the first phase must be a construction_heuristic".to_string(),
                ))
            }
        }
        if phases
            .iter()
            .skip(1)
            .any(|p| matches!(p, PhaseConfig::ConstructionHeuristic(_)))
        {
            return Err(ConfigError::Invalid(
                "only one construction_heuristic phase is allowed".to_string(),
            ));
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Sampling seeded from the OS unless a seed is given.
    #[default]
    NonReproducible,

    /// Deterministic sampling.
    Reproducible,
}

/// Candidate site sampling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SamplingConfig {
    /// Number of candidate sites to generate.
    #[serde(default = "default_candidate_count")]
    pub candidate_count: usize,

    /// Maximum number of random draws before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,

    /// Maximum seconds to spend sampling.
    #[serde(default)]
    pub seconds_spent_limit: Option<u64>,
}

fn default_candidate_count() -> usize {
    DEFAULT_CANDIDATE_COUNT
}

fn default_max_attempts() -> u64 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seconds_spent_limit: None,
        }
    }
}

impl SamplingConfig {
    /// Returns the sampling time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.seconds_spent_limit.map(Duration::from_secs)
    }
}

/// Coverage configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CoverageConfig {
    /// Service radius of every site.
    #[serde(default)]
    pub radius: f64,
}

/// Phase configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Construction heuristic phase.
    ConstructionHeuristic(ConstructionHeuristicConfig),

    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    /// Type of construction heuristic.
    #[serde(default)]
    pub construction_heuristic_type: ConstructionHeuristicType,
}

/// Construction heuristic types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionHeuristicType {
    /// Greedy pick by precomputed, disjoint claim counts.
    #[default]
    StaticGreedy,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Type of local search.
    #[serde(default)]
    pub local_search_type: LocalSearchType,
}

/// Local search types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchType {
    /// One pass substituting free sites into selected positions.
    #[default]
    SinglePassSubstitution,
}
