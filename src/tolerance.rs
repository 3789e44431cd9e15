use std::cmp::Ordering;

use geo::GeoFloat;

/// Epsilon used for every approximate comparison of a sweep.
///
/// Two values are equal if they differ by at most the epsilon. The
/// strict comparisons (`lt`, `gt`) only hold if the values are not
/// equal in this sense. An epsilon of zero gives exact comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T: GeoFloat>(T);

impl<T: GeoFloat> Tolerance<T> {
    /// Create a tolerance from a non-negative, finite epsilon.
    ///
    /// Panics if `epsilon` is negative, infinite or NaN.
    pub fn new(epsilon: T) -> Self {
        assert!(
            epsilon.is_finite() && epsilon >= T::zero(),
            "tolerance requires a finite, non-negative epsilon"
        );
        Tolerance(epsilon)
    }

    /// Tolerance that compares exactly.
    #[inline]
    pub fn exact() -> Self {
        Tolerance(T::zero())
    }

    #[inline]
    pub fn epsilon(&self) -> T {
        self.0
    }

    /// Whether comparisons are exact (epsilon is zero).
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.0 == T::zero()
    }

    #[inline]
    pub fn eq(&self, a: T, b: T) -> bool {
        a == b || (a - b).abs() <= self.0
    }

    #[inline]
    pub fn lt(&self, a: T, b: T) -> bool {
        a < b && !self.eq(a, b)
    }

    #[inline]
    pub fn gt(&self, a: T, b: T) -> bool {
        a > b && !self.eq(a, b)
    }

    #[inline]
    pub fn le(&self, a: T, b: T) -> bool {
        a < b || self.eq(a, b)
    }

    #[inline]
    pub fn ge(&self, a: T, b: T) -> bool {
        a > b || self.eq(a, b)
    }

    /// Three-way comparison that reports `Equal` for values within
    /// the epsilon.
    ///
    /// This is not transitive for a non-zero epsilon; callers that
    /// need a total order must not feed it to ordered collections.
    pub fn cmp(&self, a: T, b: T) -> Ordering {
        if self.eq(a, b) {
            Ordering::Equal
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Round `value` to the nearest integer if it is within the
    /// epsilon of it, and return it unchanged otherwise.
    pub fn snap(&self, value: T) -> T {
        let rounded = value.round();
        if self.eq(value, rounded) {
            rounded
        } else {
            value
        }
    }
}

impl<T: GeoFloat> Default for Tolerance<T> {
    fn default() -> Self {
        Self::exact()
    }
}
