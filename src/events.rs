use std::{cmp::Ordering, collections::BTreeMap, ops::Bound};

use geo::{Coordinate, GeoFloat};
use log::trace;
use slab::Slab;
use smallvec::SmallVec;

use crate::{
    segment::{coords_eq, LineSegment, SegmentIntersection},
    SweepError, Tolerance,
};

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to key the ordered map backing the
/// [`EventQueue`].
///
/// The ordering is exact; tolerance-aware comparisons are done by
/// [`SweepPoint::precedes`]. Only finite coordinates can be
/// converted into a sweep point.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint<T: GeoFloat>(Coordinate<T>);

impl<T: GeoFloat> SweepPoint<T> {
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }

    #[inline]
    pub fn x(&self) -> T {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.0.y
    }

    /// Whether `self` comes strictly before `other` in sweep order,
    /// treating coordinates within the tolerance as equal.
    pub fn precedes(&self, other: &Self, tol: Tolerance<T>) -> bool {
        tol.lt(self.x(), other.x()) || (tol.eq(self.x(), other.x()) && tol.lt(self.y(), other.y()))
    }

    #[inline]
    pub fn eq_within(&self, other: &Self, tol: Tolerance<T>) -> bool {
        coords_eq(self.0, other.0, tol)
    }

    /// Bounds of the points whose `x` is within the tolerance of
    /// this one's, for range queries on ordered collections.
    pub(crate) fn x_band(&self, tol: Tolerance<T>) -> (Self, Self) {
        let eps = tol.epsilon();
        (
            SweepPoint(Coordinate {
                x: self.x() - eps,
                y: T::neg_infinity(),
            }),
            SweepPoint(Coordinate {
                x: self.x() + eps,
                y: T::infinity(),
            }),
        )
    }
}

/// Implememnt lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: GeoFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => self.0.y.partial_cmp(&other.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoFloat> Eq for SweepPoint<T> {}

/// Create from `Coordinate` while checking the components are finite.
impl<T: GeoFloat> From<Coordinate<T>> for SweepPoint<T> {
    fn from(pt: Coordinate<T>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

/// Event type to associate with event.
///
/// The ordering of the variants is important for the algorithm: at
/// a common point, segments are inserted first, then removed, and
/// crossings are resolved last once the status holds every segment
/// passing through the point.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy, Hash)]
pub enum EventKind {
    Start,
    End,
    Intersection,
}

/// A sweep event.
///
/// Carries the keys of the segments relevant to it: the segments
/// starting (or ending) at the point, or the segments crossing there.
/// The keys are kept sorted and unique.
#[derive(Debug, Clone)]
pub struct SweepEvent<T: GeoFloat> {
    pub point: SweepPoint<T>,
    pub kind: EventKind,
    pub segments: SmallVec<[usize; 2]>,
    /// Insertion order; breaks ties between otherwise equal events.
    pub order: usize,
}

impl<T: GeoFloat> SweepEvent<T> {
    pub fn new<I>(point: SweepPoint<T>, kind: EventKind, segments: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let mut event = SweepEvent {
            point,
            kind,
            segments: segments.into_iter().collect(),
            order: 0,
        };
        event.segments.sort_unstable();
        event.segments.dedup();
        event
    }

    fn key(&self) -> EventKey<T> {
        (self.point, self.kind, self.order)
    }

    fn merge(&mut self, keys: &[usize]) {
        for &k in keys {
            if let Err(pos) = self.segments.binary_search(&k) {
                self.segments.insert(pos, k);
            }
        }
    }
}

type EventKey<T> = (SweepPoint<T>, EventKind, usize);

/// Min-priority queue of sweep events.
///
/// Events are ordered by `x`, then `y`, then [`EventKind`], then
/// insertion order. No two pending events share the same point
/// (within the tolerance) and kind: pushing such an event merges its
/// segments into the pending one.
///
/// The queue also owns the normalized input segments, stored under
/// their input index. Events refer to segments by that key.
#[derive(Debug)]
pub struct EventQueue<T: GeoFloat> {
    segments: Slab<LineSegment<T>>,
    events: BTreeMap<EventKey<T>, SweepEvent<T>>,
    counter: usize,
    last_popped: Option<SweepPoint<T>>,
    tol: Tolerance<T>,
}

impl<T: GeoFloat> EventQueue<T> {
    /// Normalize and snap the given segments, and seed the queue with
    /// a start and an end event for each of them.
    pub fn new<I: IntoIterator<Item = LineSegment<T>>>(segments: I, tol: Tolerance<T>) -> Self {
        let iter = segments.into_iter();
        let size = {
            let (min_size, max_size) = iter.size_hint();
            max_size.unwrap_or(min_size)
        };
        let mut queue = EventQueue {
            segments: Slab::with_capacity(size),
            events: BTreeMap::new(),
            counter: 0,
            last_popped: None,
            tol,
        };
        for segment in iter {
            let segment = segment.snapped(tol).normalize();
            let key = queue.segments.insert(segment);
            queue.push(SweepEvent::new(segment.start.into(), EventKind::Start, [key]));
            queue.push(SweepEvent::new(segment.end.into(), EventKind::End, [key]));
        }
        queue
    }

    #[inline]
    pub fn tolerance(&self) -> Tolerance<T> {
        self.tol
    }

    /// The normalized segment stored under `key`.
    ///
    /// Panics if no such segment exists.
    #[inline]
    pub fn segment(&self, key: usize) -> LineSegment<T> {
        self.segments[key]
    }

    /// Number of segments owned by the queue.
    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> impl Iterator<Item = (usize, &LineSegment<T>)> {
        self.segments.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Point of the next event, if any.
    pub fn peek_point(&self) -> Option<SweepPoint<T>> {
        self.events.keys().next().map(|k| k.0)
    }

    /// Pending events in pop order.
    pub fn iter(&self) -> impl Iterator<Item = &SweepEvent<T>> {
        self.events.values()
    }

    /// Find the pending event of the given kind at `point` (within
    /// the tolerance).
    fn find_key(&self, point: SweepPoint<T>, kind: EventKind) -> Option<EventKey<T>> {
        let (lower, upper) = point.x_band(self.tol);
        self.events
            .range((
                Bound::Included((lower, EventKind::Start, 0)),
                Bound::Included((upper, EventKind::Intersection, usize::MAX)),
            ))
            .find(|(k, _)| k.1 == kind && k.0.eq_within(&point, self.tol))
            .map(|(k, _)| *k)
    }

    /// Insert an event, or merge its segments into the pending event
    /// of the same kind at the same point.
    ///
    /// Returns `true` if a new entry was created.
    pub fn push(&mut self, mut event: SweepEvent<T>) -> bool {
        if let Some(key) = self.find_key(event.point, event.kind) {
            if let Some(existing) = self.events.get_mut(&key) {
                existing.merge(&event.segments);
            }
            return false;
        }
        event.order = self.counter;
        self.counter += 1;
        self.events.insert(event.key(), event);
        true
    }

    /// Remove and return the next event.
    ///
    /// Panics if the queue is empty: callers must check
    /// [`is_empty`](Self::is_empty) first.
    pub fn pop(&mut self) -> SweepEvent<T> {
        let event = match self.events.pop_first() {
            Some((_, event)) => event,
            None => panic!("pop called on an empty event queue"),
        };
        self.last_popped = Some(event.point);
        event
    }

    /// Intersect the segments at keys `a` and `b`, and queue the
    /// crossing if there is one.
    ///
    /// Crossings that lie behind the last popped event are ignored:
    /// they were handled already and the sweep never moves back.
    /// Returns `Ok(true)` if an event was queued or merged.
    ///
    /// Collinear overlapping segments are not supported and yield
    /// [`SweepError::CollinearOverlap`].
    pub fn add_intersection_event(&mut self, a: usize, b: usize) -> Result<bool, SweepError> {
        let (sa, sb) = (self.segments[a], self.segments[b]);
        match sa.intersection(&sb, self.tol) {
            SegmentIntersection::None => Ok(false),
            SegmentIntersection::Point(pt) => {
                let point = SweepPoint::from(pt);
                if let Some(last) = self.last_popped {
                    if point.precedes(&last, self.tol) {
                        trace!("skipping crossing of {} and {} behind sweep at {:?}", a, b, pt);
                        return Ok(false);
                    }
                }
                self.push(SweepEvent::new(point, EventKind::Intersection, [a, b]));
                Ok(true)
            }
            SegmentIntersection::Overlap(_) => Err(SweepError::CollinearOverlap {
                first: a.min(b),
                second: a.max(b),
            }),
        }
    }

    /// Remove pending intersection events between `a` and `b`.
    ///
    /// Segments are matched geometrically (within the tolerance),
    /// not by key. Returns the number of events removed.
    pub fn remove_intersection_event(&mut self, a: usize, b: usize) -> usize {
        let (sa, sb) = (self.segments[a], self.segments[b]);
        let segments = &self.segments;
        let tol = self.tol;
        let before = self.events.len();
        self.events.retain(|_, e| {
            if e.kind != EventKind::Intersection || e.segments.len() != 2 {
                return true;
            }
            let (s0, s1) = (&segments[e.segments[0]], &segments[e.segments[1]]);
            let matches = (s0.eq_within(&sa, tol) && s1.eq_within(&sb, tol))
                || (s0.eq_within(&sb, tol) && s1.eq_within(&sa, tol));
            !matches
        });
        before - self.events.len()
    }
}
