use std::cmp::Ordering;

use geo::{
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat,
};

use crate::Tolerance;

/// Orientation of the triangle `(a, b, c)`.
///
/// Uses the sign of the cross product `(b - a) × (c - a)`: positive
/// is counter-clockwise, negative is clockwise. With an exact
/// tolerance the robust predicate of the geo kernel is used,
/// otherwise a cross product within the epsilon is collinear.
pub fn orientation<T: GeoFloat>(
    a: Coordinate<T>,
    b: Coordinate<T>,
    c: Coordinate<T>,
    tol: Tolerance<T>,
) -> Orientation {
    if tol.is_exact() {
        return T::Ker::orient2d(a, b, c);
    }
    let cross = cross(b - a, c - a);
    if tol.eq(cross, T::zero()) {
        Orientation::Collinear
    } else if cross > T::zero() {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}

/// 2D cross product (z-component of the 3D one).
#[inline]
pub(crate) fn cross<T: GeoFloat>(u: Coordinate<T>, v: Coordinate<T>) -> T {
    u.x * v.y - u.y * v.x
}

/// Helper to convert orientation-2d into an ordering
#[inline]
pub(crate) fn orientation_as_ordering(orientation: Orientation) -> Ordering {
    match orientation {
        Orientation::CounterClockwise => Ordering::Less,
        Orientation::Clockwise => Ordering::Greater,
        Orientation::Collinear => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate<f64> {
        Coordinate { x, y }
    }

    #[test]
    fn exact_orientation() {
        let tol = Tolerance::exact();
        assert_eq!(
            orientation(c(0., 0.), c(1., 0.), c(0., 1.), tol),
            Orientation::CounterClockwise
        );
        assert_eq!(
            orientation(c(0., 0.), c(1., 0.), c(0., -1.), tol),
            Orientation::Clockwise
        );
        assert_eq!(
            orientation(c(0., 0.), c(1., 1.), c(3., 3.), tol),
            Orientation::Collinear
        );
    }

    #[test]
    fn tolerant_orientation() {
        let tol = Tolerance::new(1e-6);
        assert_eq!(
            orientation(c(0., 0.), c(1., 0.), c(0.5, 1e-8), tol),
            Orientation::Collinear
        );
        assert_eq!(
            orientation(c(0., 0.), c(1., 0.), c(0.5, 1e-3), tol),
            Orientation::CounterClockwise
        );
        // Exact kernel still sees the tiny offset.
        assert_eq!(
            orientation(c(0., 0.), c(1., 0.), c(0.5, 1e-8), Tolerance::exact()),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn orientation_ordering() {
        assert_eq!(
            orientation_as_ordering(Orientation::CounterClockwise),
            Ordering::Less
        );
        assert_eq!(
            orientation_as_ordering(Orientation::Collinear),
            Ordering::Equal
        );
    }
}
