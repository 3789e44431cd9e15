use thiserror::Error;

/// Inputs the sweep refuses to process.
///
/// Broken sweep invariants are not reported here: they indicate a bug
/// and panic instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("segment {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Two segments lie on a common line and share more than a point.
    /// Reporting such overlaps is not supported.
    #[error("segments {first} and {second} overlap along a common line")]
    CollinearOverlap { first: usize, second: usize },
}
