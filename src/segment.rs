use std::cmp::Ordering;

use geo::{kernels::Orientation, Coordinate, GeoFloat, Line};

use crate::{
    kernel::{cross, orientation},
    Tolerance,
};

/// A line segment between two coordinates.
///
/// Segments are plain values: [`normalize`](Self::normalize) and
/// [`snapped`](Self::snapped) return new segments instead of
/// mutating in place. Most sweep operations expect a normalized
/// segment, i.e. one whose start is lexicographically (by `x`, then
/// `y`) smaller than or equal to its end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment<T: GeoFloat> {
    pub start: Coordinate<T>,
    pub end: Coordinate<T>,
}

/// Result of intersecting two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection<T: GeoFloat> {
    None,
    Point(Coordinate<T>),
    /// The segments are collinear and share more than one point.
    Overlap(LineSegment<T>),
}

impl<T: GeoFloat> SegmentIntersection<T> {
    pub fn is_none(&self) -> bool {
        matches!(self, SegmentIntersection::None)
    }
}

/// Lexicographic comparison of two coordinates within a tolerance.
pub fn cmp_coords<T: GeoFloat>(a: Coordinate<T>, b: Coordinate<T>, tol: Tolerance<T>) -> Ordering {
    tol.cmp(a.x, b.x).then_with(|| tol.cmp(a.y, b.y))
}

#[inline]
pub(crate) fn coords_eq<T: GeoFloat>(
    a: Coordinate<T>,
    b: Coordinate<T>,
    tol: Tolerance<T>,
) -> bool {
    tol.eq(a.x, b.x) && tol.eq(a.y, b.y)
}

impl<T: GeoFloat> LineSegment<T> {
    pub fn new<C: Into<Coordinate<T>>>(start: C, end: C) -> Self {
        LineSegment {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Segment with endpoints ordered so that `start <= end`
    /// lexicographically (exact comparison).
    pub fn normalize(&self) -> Self {
        let (s, e) = (self.start, self.end);
        if (e.x, e.y) < (s.x, s.y) {
            LineSegment { start: e, end: s }
        } else {
            *self
        }
    }

    pub fn is_normalized(&self) -> bool {
        (self.start.x, self.start.y) <= (self.end.x, self.end.y)
    }

    /// Segment with every coordinate snapped to the nearest integer
    /// if within the tolerance.
    pub fn snapped(&self, tol: Tolerance<T>) -> Self {
        let snap = |c: Coordinate<T>| Coordinate {
            x: tol.snap(c.x),
            y: tol.snap(c.y),
        };
        LineSegment {
            start: snap(self.start),
            end: snap(self.end),
        }
    }

    #[inline]
    pub fn direction(&self) -> Coordinate<T> {
        self.end - self.start
    }

    /// Whether all four coordinates are finite.
    pub fn is_finite(&self) -> bool {
        [self.start.x, self.start.y, self.end.x, self.end.y]
            .iter()
            .all(|v| v.is_finite())
    }

    #[inline]
    pub fn is_vertical(&self, tol: Tolerance<T>) -> bool {
        tol.eq(self.start.x, self.end.x)
    }

    #[inline]
    pub fn is_horizontal(&self, tol: Tolerance<T>) -> bool {
        tol.eq(self.start.y, self.end.y)
    }

    /// Whether both segments have the same endpoints (in the same
    /// order) within the tolerance.
    pub fn eq_within(&self, other: &Self, tol: Tolerance<T>) -> bool {
        coords_eq(self.start, other.start, tol) && coords_eq(self.end, other.end, tol)
    }

    fn min_max(a: T, b: T) -> (T, T) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Whether `point` lies on the segment: inside its bounding box
    /// and collinear with it.
    pub fn contains_point(&self, point: Coordinate<T>, tol: Tolerance<T>) -> bool {
        let (x0, x1) = Self::min_max(self.start.x, self.end.x);
        let (y0, y1) = Self::min_max(self.start.y, self.end.y);
        let inside = tol.ge(point.x, x0)
            && tol.le(point.x, x1)
            && tol.ge(point.y, y0)
            && tol.le(point.y, y1);
        if !inside {
            return false;
        }
        orientation(self.start, self.end, point, tol) == Orientation::Collinear
    }

    /// Like [`contains_point`](Self::contains_point), but with an exact
    /// tolerance `point` may be off the segment by the rounding error of
    /// a computed intersection.
    ///
    /// One crossing of three or more segments is computed pairwise, and
    /// the results may differ in the last bits; all of them must still
    /// be recognised as the same crossing.
    pub(crate) fn passes_near(&self, point: Coordinate<T>, tol: Tolerance<T>) -> bool {
        if !tol.is_exact() {
            return self.contains_point(point, tol);
        }
        let ulps: T = num_traits::cast(64.).unwrap_or_else(T::one);
        let scale = point.x.abs().max(point.y.abs()).max(T::one());
        let slack = ulps * T::epsilon() * scale;

        let (x0, x1) = Self::min_max(self.start.x, self.end.x);
        let (y0, y1) = Self::min_max(self.start.y, self.end.y);
        let outside = point.x < x0 - slack
            || point.x > x1 + slack
            || point.y < y0 - slack
            || point.y > y1 + slack;
        if outside {
            return false;
        }
        let dir = self.direction();
        let len = dir.x.hypot(dir.y);
        let dist = cross(dir, point - self.start).abs();
        dist <= len * (slack + ulps * T::epsilon() * len)
    }

    /// The `y` coordinate of the segment at `x`.
    ///
    /// Returns `None` if `x` is outside the `x`-extent of the segment,
    /// or if the segment is vertical (it has no single `y` there).
    /// Endpoints and horizontal segments yield their coordinates
    /// exactly.
    pub fn evaluate_at_x(&self, x: T, tol: Tolerance<T>) -> Option<T> {
        if self.is_vertical(tol) {
            return None;
        }
        let (s, e) = if self.start.x <= self.end.x {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        if tol.lt(x, s.x) || tol.gt(x, e.x) {
            return None;
        }
        if self.is_horizontal(tol) || tol.eq(x, s.x) {
            return Some(s.y);
        }
        if tol.eq(x, e.x) {
            return Some(e.y);
        }
        Some(s.y + (x - s.x) * (e.y - s.y) / (e.x - s.x))
    }

    /// The `x` coordinate of the segment at `y`.
    ///
    /// The counterpart of [`evaluate_at_x`](Self::evaluate_at_x) with
    /// the axes exchanged: horizontal segments yield `None`, vertical
    /// ones their constant `x`.
    pub fn evaluate_at_y(&self, y: T, tol: Tolerance<T>) -> Option<T> {
        if self.is_horizontal(tol) {
            return None;
        }
        let (s, e) = if self.start.y <= self.end.y {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        };
        if tol.lt(y, s.y) || tol.gt(y, e.y) {
            return None;
        }
        if self.is_vertical(tol) || tol.eq(y, s.y) {
            return Some(s.x);
        }
        if tol.eq(y, e.y) {
            return Some(e.x);
        }
        Some(s.x + (y - s.y) * (e.x - s.x) / (e.y - s.y))
    }

    /// Intersect two segments.
    ///
    /// The orientation of each segment's endpoints against the other
    /// segment filters out the disjoint cases first. Touching
    /// endpoints are returned exactly; collinear segments resolve to
    /// a point or an overlap; vertical and horizontal segments are
    /// solved on their constant coordinate; everything else solves
    /// the parametric line equations. Computed coordinates are
    /// snapped with the tolerance.
    pub fn intersection(&self, other: &Self, tol: Tolerance<T>) -> SegmentIntersection<T> {
        let a = self.normalize();
        let b = other.normalize();

        let o1 = orientation(a.start, a.end, b.start, tol);
        let o2 = orientation(a.start, a.end, b.end, tol);
        let o3 = orientation(b.start, b.end, a.start, tol);
        let o4 = orientation(b.start, b.end, a.end, tol);

        if o1 == o2 && o1 != Orientation::Collinear {
            return SegmentIntersection::None;
        }
        if o3 == o4 && o3 != Orientation::Collinear {
            return SegmentIntersection::None;
        }

        use Orientation::Collinear;
        if o1 == Collinear && o2 == Collinear {
            return a.collinear_intersection(&b, tol);
        }

        // Touching endpoints: report the endpoint itself.
        for (o, pt, seg) in [
            (o1, b.start, &a),
            (o2, b.end, &a),
            (o3, a.start, &b),
            (o4, a.end, &b),
        ] {
            if o == Collinear {
                return if seg.contains_point(pt, tol) {
                    SegmentIntersection::Point(pt)
                } else {
                    SegmentIntersection::None
                };
            }
        }

        // Proper crossing.
        let pt = if a.is_vertical(tol) {
            b.evaluate_at_x(a.start.x, tol)
                .map(|y| Coordinate { x: a.start.x, y })
        } else if b.is_vertical(tol) {
            a.evaluate_at_x(b.start.x, tol)
                .map(|y| Coordinate { x: b.start.x, y })
        } else if a.is_horizontal(tol) {
            b.evaluate_at_y(a.start.y, tol)
                .map(|x| Coordinate { x, y: a.start.y })
        } else if b.is_horizontal(tol) {
            a.evaluate_at_y(b.start.y, tol)
                .map(|x| Coordinate { x, y: b.start.y })
        } else {
            a.parametric_intersection(&b)
        };

        match pt {
            Some(pt) => SegmentIntersection::Point(Coordinate {
                x: tol.snap(pt.x),
                y: tol.snap(pt.y),
            }),
            None => SegmentIntersection::None,
        }
    }

    /// Solve `a.start + t·r = b.start + u·s` for the crossing point.
    ///
    /// Returns `None` for parallel segments (zero determinant).
    fn parametric_intersection(&self, other: &Self) -> Option<Coordinate<T>> {
        let r = self.direction();
        let s = other.direction();
        let denom = cross(r, s);
        if denom == T::zero() {
            return None;
        }
        let t = cross(other.start - self.start, s) / denom;
        let t = t.max(T::zero()).min(T::one());
        Some(Coordinate {
            x: self.start.x + t * r.x,
            y: self.start.y + t * r.y,
        })
    }

    /// Intersection of two normalized segments on a common line.
    ///
    /// Along a common line the lexicographic order of points agrees
    /// with their order along the line, so the shared part is
    /// `[max(starts), min(ends)]`.
    fn collinear_intersection(&self, other: &Self, tol: Tolerance<T>) -> SegmentIntersection<T> {
        let lo = match cmp_coords(self.start, other.start, tol) {
            Ordering::Less => other.start,
            _ => self.start,
        };
        let hi = match cmp_coords(self.end, other.end, tol) {
            Ordering::Greater => other.end,
            _ => self.end,
        };
        match cmp_coords(lo, hi, tol) {
            Ordering::Greater => SegmentIntersection::None,
            Ordering::Equal => SegmentIntersection::Point(lo),
            Ordering::Less => SegmentIntersection::Overlap(LineSegment { start: lo, end: hi }),
        }
    }
}

impl<T: GeoFloat> From<Line<T>> for LineSegment<T> {
    fn from(l: Line<T>) -> Self {
        LineSegment {
            start: l.start,
            end: l.end,
        }
    }
}

impl<T: GeoFloat> From<LineSegment<T>> for Line<T> {
    fn from(s: LineSegment<T>) -> Self {
        Line::new(s.start, s.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (f64, f64), b: (f64, f64)) -> LineSegment<f64> {
        LineSegment::new(a, b)
    }

    fn pt(x: f64, y: f64) -> Coordinate<f64> {
        Coordinate { x, y }
    }

    #[test]
    fn normalization_is_idempotent() {
        let s = seg((10., 0.), (0., 10.));
        let n = s.normalize();
        assert_eq!(n, seg((0., 10.), (10., 0.)));
        assert!(n.is_normalized());
        assert_eq!(n.normalize(), n);
        assert_eq!(s.normalize().normalize(), s.normalize());

        // Vertical segments order by y.
        let v = seg((3., 5.), (3., 1.)).normalize();
        assert_eq!(v, seg((3., 1.), (3., 5.)));
    }

    #[test]
    fn evaluate() {
        let tol = Tolerance::exact();
        let s = seg((0., 0.), (10., 4.));
        assert_eq!(s.evaluate_at_x(5., tol), Some(2.));
        assert_eq!(s.evaluate_at_x(0., tol), Some(0.));
        assert_eq!(s.evaluate_at_x(10., tol), Some(4.));
        assert_eq!(s.evaluate_at_x(11., tol), None);
        assert_eq!(s.evaluate_at_y(2., tol), Some(5.));
        assert_eq!(s.evaluate_at_y(-1., tol), None);

        let v = seg((3., 0.), (3., 5.));
        assert_eq!(v.evaluate_at_x(3., tol), None);
        assert_eq!(v.evaluate_at_y(2., tol), Some(3.));

        let h = seg((0., 7.), (4., 7.));
        assert_eq!(h.evaluate_at_x(1.5, tol), Some(7.));
        assert_eq!(h.evaluate_at_y(7., tol), None);
    }

    #[test]
    fn contains_point() {
        let tol = Tolerance::exact();
        let s = seg((0., 0.), (10., 10.));
        assert!(s.contains_point(pt(5., 5.), tol));
        assert!(s.contains_point(pt(0., 0.), tol));
        assert!(!s.contains_point(pt(11., 11.), tol));
        assert!(!s.contains_point(pt(5., 6.), tol));

        let loose = Tolerance::new(1e-6);
        assert!(s.contains_point(pt(5., 5. + 1e-9), loose));
        assert!(!s.contains_point(pt(5., 5. + 1e-9), tol));

        assert!(s.is_finite());
        assert!(!seg((0., f64::INFINITY), (1., 1.)).is_finite());
    }

    #[test]
    fn rounded_crossings_pass_near() {
        let tol = Tolerance::exact();
        // Both lines pass through (10/3, 7/3), which has no exact
        // representation.
        let a = seg((0., 3.), (5., 2.));
        let b = seg((3., 2.), (5., 4.));
        let p = match a.intersection(&b, tol) {
            SegmentIntersection::Point(p) => p,
            other => panic!("expected a crossing, got {:?}", other),
        };
        let nudged = pt(p.x + 4. * f64::EPSILON, p.y + 4. * f64::EPSILON);
        for s in [a, b, seg((2., 3.), (4., 2.)), seg((0., 1.), (5., 3.))] {
            assert!(s.passes_near(p, tol));
            assert!(s.passes_near(nudged, tol));
        }

        assert!(!a.passes_near(pt(p.x, p.y + 1e-9), tol));
        assert!(!a.passes_near(pt(6., 1.8), tol));

        // A real tolerance is used as is.
        let loose = Tolerance::new(1e-6);
        assert!(a.passes_near(pt(p.x, p.y + 1e-9), loose));
    }

    #[test]
    fn crossing_diagonals() {
        let tol = Tolerance::exact();
        let a = seg((0., 0.), (10., 10.));
        let b = seg((0., 10.), (10., 0.));
        assert_eq!(a.intersection(&b, tol), SegmentIntersection::Point(pt(5., 5.)));
        assert_eq!(b.intersection(&a, tol), SegmentIntersection::Point(pt(5., 5.)));
    }

    #[test]
    fn touching_and_disjoint() {
        let tol = Tolerance::exact();
        let a = seg((0., 0.), (5., 5.));
        let b = seg((5., 5.), (10., 0.));
        assert_eq!(a.intersection(&b, tol), SegmentIntersection::Point(pt(5., 5.)));

        // T-junction: endpoint of `c` in the interior of `a`.
        let c = seg((2., 2.), (4., 0.));
        assert_eq!(a.intersection(&c, tol), SegmentIntersection::Point(pt(2., 2.)));

        let far = seg((100., 100.), (200., 150.));
        assert!(a.intersection(&far, tol).is_none());

        // Parallel, not collinear.
        let p = seg((0., 1.), (5., 6.));
        assert!(a.intersection(&p, tol).is_none());

        // Collinear but apart.
        let q = seg((6., 6.), (8., 8.));
        assert!(a.intersection(&q, tol).is_none());
    }

    #[test]
    fn vertical_and_horizontal() {
        let tol = Tolerance::exact();
        let v = seg((3., -1.), (3., 9.));
        let d = seg((0., 0.), (6., 3.));
        assert_eq!(v.intersection(&d, tol), SegmentIntersection::Point(pt(3., 1.5)));

        let h = seg((1., 1.), (7., 1.));
        let z = seg((2., 2.), (4., 0.));
        assert_eq!(h.intersection(&z, tol), SegmentIntersection::Point(pt(3., 1.)));
        assert_eq!(v.intersection(&h, tol), SegmentIntersection::Point(pt(3., 1.)));
    }

    #[test]
    fn collinear_overlap() {
        let tol = Tolerance::exact();
        let a = seg((0., 0.), (10., 10.));
        let b = seg((5., 5.), (15., 15.));
        assert_eq!(
            a.intersection(&b, tol),
            SegmentIntersection::Overlap(seg((5., 5.), (10., 10.)))
        );
        let c = seg((10., 10.), (12., 12.));
        assert_eq!(a.intersection(&c, tol), SegmentIntersection::Point(pt(10., 10.)));
    }

    #[test]
    fn snapping() {
        let tol = Tolerance::new(1e-9);
        let s = seg((0.999_999_999_99, 2.), (4., 5.000_000_000_01)).snapped(tol);
        assert_eq!(s, seg((1., 2.), (4., 5.)));
    }

    #[test]
    fn line_conversion() {
        let l = Line::from([(1., 2.), (3., 4.)]);
        let s: LineSegment<f64> = l.into();
        assert_eq!(s, seg((1., 2.), (3., 4.)));
        assert_eq!(Line::from(s), l);
    }
}
