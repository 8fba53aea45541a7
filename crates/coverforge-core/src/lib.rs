//! CoverForge Core - Core types for covering location problems
//!
//! This crate provides the fundamental types shared by the CoverForge crates:
//! - Planar geometry (points, convex hull, bounding boxes)
//! - Problem instances (population and candidate site tables)
//! - The error type returned by every solver operation

pub mod error;
pub mod geometry;
pub mod instance;

pub use error::{CoverForgeError, Result};
pub use geometry::{BoundingBox, ConvexHull, Point};
pub use instance::Instance;
