//! Solver entry point that hides all internal wiring.

use coverforge_config::{ConfigError, SolverConfig};
use coverforge_core::{CoverForgeError, Instance};
use coverforge_solver::{SolveResult, Solver};
use thiserror::Error;
use tracing::warn;

/// Configuration file read by [`solve`].
pub const CONFIG_FILE: &str = "solver.toml";

/// Failure of a facade solve.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Solve(#[from] CoverForgeError),
}

/// Solves `instance` with the configuration in [`CONFIG_FILE`].
///
/// A missing or unreadable file falls back to the default configuration;
/// a file that parses but fails validation is an error.
pub fn solve(instance: &Instance) -> Result<SolveResult, Error> {
    let config = match SolverConfig::load(CONFIG_FILE) {
        Ok(config) => config,
        Err(ConfigError::Io(_)) => SolverConfig::default(),
        Err(e) => {
            warn!(file = CONFIG_FILE, error = %e, "ignoring unparsable solver config");
            SolverConfig::default()
        }
    };
    solve_with_config(instance, config)
}

/// Solves `instance` with an explicit configuration.
pub fn solve_with_config(instance: &Instance, config: SolverConfig) -> Result<SolveResult, Error> {
    #[cfg(feature = "console")]
    coverforge_console::init();

    let solver = Solver::new(config)?;
    Ok(solver.solve_instance(instance)?)
}
