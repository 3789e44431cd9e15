//! Computes the intersections of a set of line segments with a plane
//! sweep.
//!
//! 1. [Usage](#usage)
//! 1. [Tolerance](#tolerance)
//! 1. [Building blocks](#building-blocks)
//!
//! This is an implementation of the [Bentley-Ottman] algorithm: a
//! vertical line sweeps the plane from left to right, stopping at
//! segment end-points and at crossings. Only segments adjacent along
//! the sweep line are tested against each other, so the work grows
//! with the number of segments and crossings rather than with the
//! number of pairs.
//!
//! # Usage
//!
//! Call [`sweep_line_intersections`] with an iterator of any type
//! implementing the [`Crossable`] trait. The geo-type [`Line`]
//! implements this trait. The result lists every point where two or
//! more segments meet, including end-points touching another segment.
//!
//! ```rust
//! use geo::Line;
//! use geo_sweepline::sweep_line_intersections;
//! let input = vec![
//!     Line::from([(1., 0.), (0., 1.)]),
//!     Line::from([(0., 0.5), (1., 0.5)]),
//!     Line::from([(0., 0.), (1., 1.)]),
//! ];
//! let result = sweep_line_intersections(&input, 1e-9).unwrap();
//! // All pairs intersect, at the same point
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.intersections()[0].segments, vec![0, 1, 2]);
//! ```
//!
//! Collinear segments sharing more than a point are not supported:
//! they yield [`SweepError::CollinearOverlap`].
//! [`brute_force_intersections`] computes the same result by testing
//! every pair.
//!
//! # Tolerance
//!
//! Every comparison of coordinates goes through a [`Tolerance`]:
//! values within its epsilon are equal, and computed coordinates
//! within epsilon of an integer are snapped to it. An epsilon of zero
//! compares exactly and uses the robust predicates of [`geo`] for
//! orientation tests.
//!
//! # Building blocks
//!
//! The [`Sweep`] driver handles one event at a time, which allows
//! interleaving a long computation with other work. Its parts, the
//! [`EventQueue`] and the [`SweepStatus`], are exposed as well.
//!
//! [Bentley-Ottman]: //en.wikipedia.org/wiki/Bentley%E2%80%93Ottmann_algorithm
//! [`Line`]: geo::Line
mod tolerance;
pub use tolerance::Tolerance;

mod kernel;
pub use kernel::orientation;

mod segment;
pub use segment::{cmp_coords, LineSegment, SegmentIntersection};

mod error;
pub use error::SweepError;

mod options;
pub use options::SweepOptions;

pub mod events;
pub use events::{EventKind, EventQueue, SweepEvent, SweepPoint};

pub mod status;
pub use status::{Neighbors, StatusEntry, SweepStatus};

mod crossable;
pub use crossable::Crossable;

mod result;
pub use result::{same_points, Intersection, SweepLineResult};

mod sweep;
pub use sweep::{sweep_line_intersections, sweep_line_intersections_with, Sweep};

mod brute;
pub use brute::brute_force_intersections;

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
