use std::{cmp::Ordering, collections::BTreeMap, ops::Bound};

use geo::{Coordinate, GeoFloat};

use crate::{
    segment::{cmp_coords, coords_eq},
    LineSegment, SweepPoint, Tolerance,
};

/// A point where two or more input segments meet.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<T: GeoFloat> {
    pub point: Coordinate<T>,
    /// Input indices of the segments through `point`, sorted.
    pub segments: Vec<usize>,
}

/// Output of a sweep (or of the brute-force checker).
///
/// Intersection points are unique within the tolerance of the run and
/// listed in discovery order.
#[derive(Debug, Clone)]
pub struct SweepLineResult<T: GeoFloat> {
    intersections: Vec<Intersection<T>>,
    line_segments: Vec<LineSegment<T>>,
    input: Vec<LineSegment<T>>,
    tol: Tolerance<T>,
}

impl<T: GeoFloat> SweepLineResult<T> {
    /// Number of distinct intersection points.
    #[inline]
    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn intersection_points(&self) -> Vec<Coordinate<T>> {
        self.intersections.iter().map(|i| i.point).collect()
    }

    /// Intersection points along with the segments meeting there.
    pub fn intersections(&self) -> &[Intersection<T>] {
        &self.intersections
    }

    /// Normalized segments that took part in an intersection, once
    /// per reported crossing (so possibly repeated).
    pub fn line_segments(&self) -> &[LineSegment<T>] {
        &self.line_segments
    }

    /// The normalized input segments, by input index.
    pub fn input_segments(&self) -> &[LineSegment<T>] {
        &self.input
    }

    /// Whether `point` is one of the intersection points (within
    /// the tolerance of the run).
    pub fn contains_point(&self, point: Coordinate<T>) -> bool {
        self.intersections
            .iter()
            .any(|i| coords_eq(i.point, point, self.tol))
    }

    /// Split every input segment at the intersection points on it.
    ///
    /// Pieces are normalized and listed by input index, then from
    /// start to end. Segments without interior intersections are
    /// returned whole.
    pub fn split_segments(&self) -> Vec<LineSegment<T>> {
        let mut cuts: Vec<Vec<Coordinate<T>>> = vec![Vec::new(); self.input.len()];
        for ixn in &self.intersections {
            for &key in &ixn.segments {
                cuts[key].push(ixn.point);
            }
        }

        let tol = self.tol;
        let mut pieces = Vec::with_capacity(self.input.len() + self.line_segments.len());
        for (segment, mut points) in self.input.iter().zip(cuts) {
            points.sort_by(|a, b| cmp_coords(*a, *b, tol));
            points.dedup_by(|a, b| coords_eq(*a, *b, tol));

            let mut start = segment.start;
            for pt in points {
                if coords_eq(pt, start, tol) || coords_eq(pt, segment.end, tol) {
                    continue;
                }
                pieces.push(LineSegment { start, end: pt });
                start = pt;
            }
            pieces.push(LineSegment {
                start,
                end: segment.end,
            });
        }
        pieces
    }
}

/// Accumulates the output of a run.
#[derive(Debug)]
pub(crate) struct Recorder<T: GeoFloat> {
    result: SweepLineResult<T>,
    index: BTreeMap<SweepPoint<T>, usize>,
}

impl<T: GeoFloat> Recorder<T> {
    pub fn new(input: Vec<LineSegment<T>>, tol: Tolerance<T>) -> Self {
        Recorder {
            result: SweepLineResult {
                intersections: Vec::new(),
                line_segments: Vec::new(),
                input,
                tol,
            },
            index: BTreeMap::new(),
        }
    }

    fn find(&self, point: SweepPoint<T>) -> Option<usize> {
        let tol = self.result.tol;
        let (lower, upper) = point.x_band(tol);
        self.index
            .range((Bound::Included(lower), Bound::Included(upper)))
            .find(|(p, _)| p.eq_within(&point, tol))
            .map(|(_, &i)| i)
    }

    /// Record that the segments at `keys` meet at `point`.
    ///
    /// Returns `true` if the point was not known yet.
    pub fn record(&mut self, point: SweepPoint<T>, keys: &[usize]) -> bool {
        let input = &self.result.input;
        self.result
            .line_segments
            .extend(keys.iter().map(|&k| input[k]));

        match self.find(point) {
            Some(i) => {
                let segments = &mut self.result.intersections[i].segments;
                for &k in keys {
                    if let Err(pos) = segments.binary_search(&k) {
                        segments.insert(pos, k);
                    }
                }
                false
            }
            None => {
                let mut segments = keys.to_vec();
                segments.sort_unstable();
                segments.dedup();
                self.index.insert(point, self.result.intersections.len());
                self.result.intersections.push(Intersection {
                    point: point.coord(),
                    segments,
                });
                true
            }
        }
    }

    pub fn finish(self) -> SweepLineResult<T> {
        self.result
    }
}

/// Compare two point sets up to the tolerance, ignoring order.
///
/// The sets agree if every point of each one is within the tolerance
/// of some point of the other. Clusters of nearby points may thus
/// differ in size. Mostly useful to check a sweep against the
/// brute-force checker.
pub fn same_points<T: GeoFloat>(
    a: &[Coordinate<T>],
    b: &[Coordinate<T>],
    tol: Tolerance<T>,
) -> bool {
    covers(a, b, tol) && covers(b, a, tol)
}

/// Whether every point of `points` is within `tol` of one of `others`.
fn covers<T: GeoFloat>(
    points: &[Coordinate<T>],
    others: &[Coordinate<T>],
    tol: Tolerance<T>,
) -> bool {
    let mut others = others.to_vec();
    others.sort_by(|p, q| p.x.partial_cmp(&q.x).unwrap_or(Ordering::Equal));
    let eps = tol.epsilon();
    points.iter().all(|p| {
        let from = others.partition_point(|q| q.x < p.x - eps);
        others[from..]
            .iter()
            .take_while(|q| q.x <= p.x + eps)
            .any(|q| coords_eq(*p, *q, tol))
    })
}
