//! Shared test fixtures for CoverForge crates.
//!
//! This crate provides instances with known answers for testing.
//!
//! - [`square`] - four demand points on a square with two diagonal sites
//! - [`grid`] - regular demand grids and hand-placed candidate rows
//! - [`overlap`] - coverage patterns with overlapping and disjoint sites
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! coverforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use coverforge_test::square::{square_corners, square_diagonal_sites};
//! use coverforge_test::grid::demand_grid;
//! ```

pub mod grid;
pub mod overlap;
pub mod square;

// Re-export commonly used fixtures at crate root for convenience
pub use grid::demand_grid;
pub use square::{square_corners, square_diagonal_sites, square_instance};
