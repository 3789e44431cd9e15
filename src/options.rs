use geo::GeoFloat;

use crate::Tolerance;

/// Knobs of a sweep.
///
/// ```rust
/// use geo_sweepline::SweepOptions;
/// let opts = SweepOptions::default()
///     .with_epsilon(1e-9)
///     .with_iteration_limit(10_000);
/// assert_eq!(opts.epsilon, 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOptions<T: GeoFloat> {
    /// Tolerance of every approximate comparison. Zero compares
    /// exactly.
    pub epsilon: T,

    /// Maximum number of events to handle before giving up (with a
    /// panic). Defaults to `(2n)²` for `n` segments, which no
    /// correct sweep reaches.
    pub iteration_limit: Option<usize>,
}

impl<T: GeoFloat> Default for SweepOptions<T> {
    fn default() -> Self {
        SweepOptions {
            epsilon: T::zero(),
            iteration_limit: None,
        }
    }
}

impl<T: GeoFloat> SweepOptions<T> {
    pub fn with_epsilon(mut self, epsilon: T) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }

    /// The tolerance for `epsilon`.
    ///
    /// Panics if the epsilon is negative or not finite.
    pub fn tolerance(&self) -> Tolerance<T> {
        Tolerance::new(self.epsilon)
    }

    /// The iteration limit for a sweep over `num_segments` segments.
    pub fn iteration_limit_for(&self, num_segments: usize) -> usize {
        self.iteration_limit.unwrap_or_else(|| {
            let events = num_segments.saturating_mul(2);
            events.saturating_mul(events)
        })
    }
}
