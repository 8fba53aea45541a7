//! Error types for CoverForge

use thiserror::Error;

/// Main error type for CoverForge operations.
///
/// Every variant is terminal for the solve attempt that raised it. Nothing is
/// retried internally and no partial solution accompanies the error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoverForgeError {
    /// The demand points do not span a two-dimensional region, so no convex
    /// hull (and therefore no sampling region) exists.
    #[error("Degenerate input: {point_count} demand points do not contain 3 non-collinear points")]
    DegenerateInput { point_count: usize },

    /// The service radius is negative or not a number.
    #[error("Invalid radius: {radius} (must be >= 0)")]
    InvalidRadius { radius: f64 },

    /// More sites were requested than there are candidates to pick from.
    #[error("Infeasible target: cannot select {target_count} sites from {candidate_count} candidates")]
    InfeasibleTarget {
        target_count: usize,
        candidate_count: usize,
    },

    /// Rejection sampling hit its attempt or time cap before collecting
    /// enough candidate sites.
    #[error("Sampling timeout: accepted {accepted} of {requested} candidate sites after {attempts} attempts")]
    SamplingTimeout {
        requested: usize,
        accepted: usize,
        attempts: u64,
    },
}

/// Result type alias for CoverForge operations
pub type Result<T> = std::result::Result<T, CoverForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_values() {
        let err = CoverForgeError::InfeasibleTarget {
            target_count: 5,
            candidate_count: 3,
        };
        assert_eq!(
            err.to_string(),
            "Infeasible target: cannot select 5 sites from 3 candidates"
        );

        let err = CoverForgeError::InvalidRadius { radius: -1.5 };
        assert!(err.to_string().contains("-1.5"));
    }
}
