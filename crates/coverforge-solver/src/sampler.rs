//! Candidate site sampling inside the convex hull of the demand points.

use std::time::{Duration, Instant};

use coverforge_config::{SamplingConfig, DEFAULT_MAX_ATTEMPTS};
use coverforge_core::{ConvexHull, CoverForgeError, Point, Result};
use rand::distr::{Distribution, Uniform};
use rand::Rng;
use tracing::debug;

// Reading the clock on every draw would dominate the loop.
const TIME_CHECK_INTERVAL: u64 = 1024;

/// Candidate sites together with the number of draws it took to find them.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Accepted sites in acceptance order, integral coordinates.
    pub sites: Vec<Point>,
    /// Total points drawn, accepted or not.
    pub attempts: u64,
}

/// Rejection sampler for candidate sites.
///
/// Draws points uniformly from the bounding box of the demand points' convex
/// hull and keeps those that fall strictly inside the hull. Kept points are
/// truncated toward zero, and a truncated point is only accepted if it still
/// lies inside or on the hull, so every produced site is contained in the
/// hull.
///
/// The loop is bounded by an attempt cap and an optional time limit; hitting
/// either fails with [`CoverForgeError::SamplingTimeout`].
///
/// # Examples
///
/// ```
/// use coverforge_core::{ConvexHull, Point};
/// use coverforge_solver::CandidateSiteSampler;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let demand = [
///     Point::new(0.0, 0.0),
///     Point::new(100.0, 0.0),
///     Point::new(50.0, 80.0),
/// ];
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let sites = CandidateSiteSampler::new()
///     .generate(&demand, 25, &mut rng)
///     .unwrap();
///
/// let hull = ConvexHull::new(&demand).unwrap();
/// assert_eq!(sites.len(), 25);
/// assert!(sites.iter().all(|s| hull.contains(s) && s.x.fract() == 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct CandidateSiteSampler {
    max_attempts: u64,
    time_limit: Option<Duration>,
}

impl Default for CandidateSiteSampler {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            time_limit: None,
        }
    }
}

impl CandidateSiteSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sampler from the `[sampling]` configuration section.
    pub fn from_config(config: &SamplingConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            time_limit: config.time_limit(),
        }
    }

    /// Caps the number of draws.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Caps the wall-clock time spent drawing.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Generates `count` candidate sites inside the hull of `demand`.
    ///
    /// # Errors
    ///
    /// - [`CoverForgeError::DegenerateInput`] if `demand` has no three
    ///   non-collinear points.
    /// - [`CoverForgeError::SamplingTimeout`] if the attempt cap or time limit
    ///   is reached first.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        demand: &[Point],
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Point>> {
        self.sample(demand, count, rng).map(|s| s.sites)
    }

    /// Like [`generate`](Self::generate), also reporting the draw count.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        demand: &[Point],
        count: usize,
        rng: &mut R,
    ) -> Result<Sample> {
        let hull = ConvexHull::new(demand)?;
        let bounds = hull.bounding_box();
        // Fails when an extent overflows to infinity.
        let (xs, ys) = match (
            Uniform::new(bounds.min_x, bounds.max_x),
            Uniform::new(bounds.min_y, bounds.max_y),
        ) {
            (Ok(xs), Ok(ys)) => (xs, ys),
            _ => {
                return Err(CoverForgeError::DegenerateInput {
                    point_count: demand.len(),
                })
            }
        };
        debug!(
            hull_vertices = hull.vertices().len(),
            min_x = bounds.min_x,
            min_y = bounds.min_y,
            max_x = bounds.max_x,
            max_y = bounds.max_y,
            "sampling region"
        );

        let start = Instant::now();
        let mut sites = Vec::with_capacity(count);
        let mut attempts = 0u64;

        while sites.len() < count {
            if attempts >= self.max_attempts || self.out_of_time(attempts, start) {
                return Err(CoverForgeError::SamplingTimeout {
                    requested: count,
                    accepted: sites.len(),
                    attempts,
                });
            }
            attempts += 1;

            let raw = Point::new(xs.sample(rng), ys.sample(rng));
            if !hull.contains_strict(&raw) {
                continue;
            }
            let site = raw.truncated();
            if hull.contains(&site) {
                sites.push(site);
            }
        }

        debug!(
            accepted = sites.len() as u64,
            attempts,
            acceptance_rate = sites.len() as f64 / attempts.max(1) as f64,
            "sampling done"
        );
        Ok(Sample { sites, attempts })
    }

    fn out_of_time(&self, attempts: u64, start: Instant) -> bool {
        match self.time_limit {
            Some(limit) if attempts % TIME_CHECK_INTERVAL == 0 => start.elapsed() >= limit,
            _ => false,
        }
    }
}

/// Generates `count` candidate sites with the default attempt cap.
pub fn generate_candidate_sites<R: Rng + ?Sized>(
    demand: &[Point],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Point>> {
    CandidateSiteSampler::default().generate(demand, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coverforge_test::grid::demand_grid;
    use coverforge_test::square::square_corners;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_sites_lie_in_hull() {
        let demand = vec![
            Point::new(3.2, 1.1),
            Point::new(40.7, 5.5),
            Point::new(55.0, 38.9),
            Point::new(20.3, 60.0),
            Point::new(-5.5, 30.0),
            Point::new(20.0, 20.0),
        ];
        let hull = ConvexHull::new(&demand).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let sites = generate_candidate_sites(&demand, 200, &mut rng).unwrap();
        assert_eq!(sites.len(), 200);
        for site in &sites {
            assert!(hull.contains(site), "{site} escaped the hull");
            assert_eq!(*site, site.truncated());
        }
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let demand = demand_grid(5, 5, 10.0);
        let a = generate_candidate_sites(&demand, 30, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = generate_candidate_sites(&demand, 30, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_reports_attempts() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let sample = CandidateSiteSampler::new()
            .sample(&square_corners(), 10, &mut rng)
            .unwrap();
        assert_eq!(sample.sites.len(), 10);
        assert!(sample.attempts >= 10);
    }

    #[test]
    fn test_collinear_demand_is_degenerate() {
        let demand: Vec<Point> = (0..5).map(|i| Point::new(i as f64, i as f64)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            generate_candidate_sites(&demand, 3, &mut rng).unwrap_err(),
            CoverForgeError::DegenerateInput { point_count: 5 }
        );
    }

    #[test]
    fn test_unbounded_extent_is_degenerate() {
        // Each coordinate is finite but the hull is wider than f64::MAX.
        let demand = vec![
            Point::new(-1e308, 0.0),
            Point::new(1e308, 0.0),
            Point::new(0.0, 1e308),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            generate_candidate_sites(&demand, 3, &mut rng).unwrap_err(),
            CoverForgeError::DegenerateInput { point_count: 3 }
        );
    }

    #[test]
    fn test_attempt_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = CandidateSiteSampler::new()
            .with_max_attempts(5)
            .generate(&square_corners(), 1000, &mut rng)
            .unwrap_err();
        match err {
            CoverForgeError::SamplingTimeout {
                requested,
                accepted,
                attempts,
            } => {
                assert_eq!(requested, 1000);
                assert_eq!(attempts, 5);
                assert!(accepted <= 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_region_without_integer_points_times_out() {
        // A sliver strictly between x = 0 and x = 1 truncates every draw to
        // x = 0, which lies outside the hull.
        let demand = vec![
            Point::new(0.2, 0.0),
            Point::new(0.8, 0.0),
            Point::new(0.5, 10.0),
        ];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = CandidateSiteSampler::new()
            .with_max_attempts(10_000)
            .generate(&demand, 1, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CoverForgeError::SamplingTimeout { accepted: 0, .. }));
    }

    #[test]
    fn test_zero_time_limit() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = CandidateSiteSampler::new()
            .with_time_limit(Duration::ZERO)
            .generate(&square_corners(), 5, &mut rng)
            .unwrap_err();
        assert!(matches!(err, CoverForgeError::SamplingTimeout { attempts: 0, .. }));
    }

    #[test]
    fn test_from_config() {
        let config = SamplingConfig {
            candidate_count: 10,
            max_attempts: 77,
            seconds_spent_limit: Some(3),
        };
        let sampler = CandidateSiteSampler::from_config(&config);
        assert_eq!(sampler.max_attempts(), 77);
        assert_eq!(sampler.time_limit(), Some(Duration::from_secs(3)));
    }
}
