use std::cmp::Ordering;

use geo::{Coordinate, GeoFloat};
use log::{debug, trace, warn};

use crate::{
    crossable::float_segments,
    events::{EventKind, EventQueue, SweepEvent, SweepPoint},
    result::Recorder,
    status::SweepStatus,
    Crossable, LineSegment, SweepError, SweepLineResult, SweepOptions, Tolerance,
};

/// Compute every point where two or more of the given segments meet,
/// with the sweep line algorithm.
///
/// Coordinates are compared within `epsilon`; pass zero for exact
/// comparisons. Segments touching at an endpoint intersect there.
/// Collinear segments sharing more than a point are not supported and
/// yield [`SweepError::CollinearOverlap`].
///
/// Panics if `epsilon` is negative or not finite.
///
/// ```rust
/// use geo::Line;
/// use geo_sweepline::sweep_line_intersections;
///
/// let input = vec![
///     Line::from([(0., 0.), (10., 10.)]),
///     Line::from([(0., 10.), (10., 0.)]),
///     Line::from([(20., 0.), (30., 0.)]),
/// ];
/// let result = sweep_line_intersections(&input, 0.).unwrap();
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.intersection_points()[0].x, 5.);
/// ```
pub fn sweep_line_intersections<C, T, I>(
    segments: I,
    epsilon: T,
) -> Result<SweepLineResult<T>, SweepError>
where
    C: Crossable,
    T: GeoFloat,
    I: IntoIterator<Item = C>,
{
    sweep_line_intersections_with(segments, SweepOptions::default().with_epsilon(epsilon))
}

/// Same as [`sweep_line_intersections`], with explicit options.
pub fn sweep_line_intersections_with<C, T, I>(
    segments: I,
    options: SweepOptions<T>,
) -> Result<SweepLineResult<T>, SweepError>
where
    C: Crossable,
    T: GeoFloat,
    I: IntoIterator<Item = C>,
{
    let segments = float_segments(segments)?;
    Sweep::new(segments, options)?.run()
}

/// The sweep line driver.
///
/// Owns the event queue and the status of one run. Events are handled
/// one at a time by [`next_event`](Self::next_event); [`run`](Self::run)
/// handles all of them and returns the result.
#[derive(Debug)]
pub struct Sweep<T: GeoFloat> {
    queue: EventQueue<T>,
    status: SweepStatus<T>,
    recorder: Recorder<T>,
    tol: Tolerance<T>,
    iterations: usize,
    limit: usize,
    warned: bool,
}

impl<T: GeoFloat> Sweep<T> {
    /// Set up a run over `segments`.
    ///
    /// Fails with [`SweepError::NonFiniteCoordinate`] if a segment has
    /// a NaN or infinite coordinate.
    pub fn new<I>(segments: I, options: SweepOptions<T>) -> Result<Self, SweepError>
    where
        I: IntoIterator<Item = LineSegment<T>>,
    {
        let segments: Vec<_> = segments.into_iter().collect();
        if let Some(index) = segments.iter().position(|s| !s.is_finite()) {
            return Err(SweepError::NonFiniteCoordinate { index });
        }

        let tol = options.tolerance();
        let queue = EventQueue::new(segments, tol);
        let input = queue.segments().map(|(_, s)| *s).collect();
        let limit = options.iteration_limit_for(queue.num_segments());
        Ok(Sweep {
            queue,
            status: SweepStatus::new(tol),
            recorder: Recorder::new(input, tol),
            tol,
            iterations: 0,
            limit,
            warned: false,
        })
    }

    /// Number of events handled so far.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    /// Segments crossed by the sweep line, bottom to top.
    pub fn status(&self) -> &SweepStatus<T> {
        &self.status
    }

    /// Handle the next event.
    ///
    /// Returns the point of the handled event, or `None` once the
    /// queue is exhausted.
    pub fn next_event(&mut self) -> Result<Option<SweepPoint<T>>, SweepError> {
        if self.queue.is_empty() {
            return Ok(None);
        }

        self.iterations += 1;
        assert!(
            self.iterations <= self.limit,
            "sweep did not finish within {} events",
            self.limit
        );
        if !self.warned && self.iterations.saturating_mul(10) > self.limit.saturating_mul(9) {
            warn!(
                "sweep is close to its iteration limit: {} of {} events",
                self.iterations, self.limit
            );
            self.warned = true;
        }

        let event = self.queue.pop();
        trace!("handling event: {:?}", event);
        assert!(
            self.tol.ge(event.point.x(), self.status.current_x()),
            "sweep moved backwards: event at x = {:?} after x = {:?}",
            event.point.x(),
            self.status.current_x()
        );
        self.status.set_sweep_point(event.point);

        match event.kind {
            EventKind::Start => self.handle_start(&event)?,
            EventKind::End => self.handle_end(&event)?,
            EventKind::Intersection => self.handle_intersection(&event)?,
        }
        Ok(Some(event.point))
    }

    /// Handle every remaining event and return the result.
    pub fn run(mut self) -> Result<SweepLineResult<T>, SweepError> {
        while self.next_event()?.is_some() {}
        let result = self.recorder.finish();
        debug!(
            "sweep done: {} intersections in {} events",
            result.len(),
            self.iterations
        );
        Ok(result)
    }

    fn check(&mut self, a: usize, b: usize) -> Result<(), SweepError> {
        if self.queue.add_intersection_event(a, b)? {
            trace!("queued crossing of {} and {}", a, b);
        }
        Ok(())
    }

    fn handle_start(&mut self, event: &SweepEvent<T>) -> Result<(), SweepError> {
        for &key in &event.segments {
            self.status.insert(key, self.queue.segment(key));
            let nbrs = match self.status.neighbors(key) {
                Some(nbrs) => nbrs,
                None => continue,
            };
            if let (Some(below), Some(above)) = (nbrs.below, nbrs.above) {
                self.queue.remove_intersection_event(below, above);
            }
            for adj in nbrs.below.into_iter().chain(nbrs.above) {
                self.check(adj, key)?;
            }
        }
        Ok(())
    }

    fn handle_end(&mut self, event: &SweepEvent<T>) -> Result<(), SweepError> {
        for &key in &event.segments {
            let nbrs = match self.status.neighbors(key) {
                Some(nbrs) => nbrs,
                None => continue,
            };
            self.status.remove(key);
            if let (Some(below), Some(above)) = (nbrs.below, nbrs.above) {
                self.check(below, above)?;
            }
        }
        Ok(())
    }

    /// Whether the entry at `pos` passes through `pt`, allowing for the
    /// rounding of computed crossing points.
    fn passes_through(&self, pos: usize, pt: Coordinate<T>) -> bool {
        self.status
            .get(pos)
            .map_or(false, |e| e.segment.passes_near(pt, self.tol))
    }

    fn key_at(&self, pos: usize) -> Option<usize> {
        self.status.get(pos).map(|e| e.key)
    }

    fn handle_intersection(&mut self, event: &SweepEvent<T>) -> Result<(), SweepError> {
        let pt = event.point.coord();

        let mut positions = event.segments.iter().filter_map(|&k| self.status.position(k));
        let (mut lo, mut hi) = match positions.next() {
            Some(first) => positions.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))),
            None => (0, 0),
        };
        if lo == hi {
            // The other segments ended here.
            if self.recorder.record(event.point, &event.segments) {
                debug!("intersection at {:?} of {:?}", pt, event.segments);
            }
            return Ok(());
        }

        while lo > 0 && self.passes_through(lo - 1, pt) {
            lo -= 1;
        }
        while self.passes_through(hi + 1, pt) {
            hi += 1;
        }

        let mut keys: Vec<usize> = (lo..=hi).filter_map(|pos| self.key_at(pos)).collect();
        keys.extend(event.segments.iter().copied());
        if self.recorder.record(event.point, &keys) {
            debug!("intersection at {:?} of {:?}", pt, event.segments);
        }

        let (old_low, old_high) = match (self.key_at(lo), self.key_at(hi)) {
            (Some(l), Some(h)) => (l, h),
            _ => return Ok(()),
        };
        if hi - lo == 1 {
            let (a, b) = match (self.status.get(lo), self.status.get(hi)) {
                (Some(a), Some(b)) => (*a, *b),
                _ => return Ok(()),
            };
            if self.status.cmp_after(&a.segment, &b.segment) == Ordering::Greater {
                self.status.swap(a.key, b.key);
            }
        } else {
            debug!("reordering {} segments meeting at {:?}", hi - lo + 1, pt);
            self.status.sort_block(lo..=hi);
        }

        let (new_low, new_high) = match (self.key_at(lo), self.key_at(hi)) {
            (Some(l), Some(h)) => (l, h),
            _ => return Ok(()),
        };
        if let Some(below) = lo.checked_sub(1).and_then(|p| self.key_at(p)) {
            if new_low != old_low {
                self.queue.remove_intersection_event(below, old_low);
                self.check(below, new_low)?;
            }
        }
        if let Some(above) = self.key_at(hi + 1) {
            if new_high != old_high {
                self.queue.remove_intersection_event(old_high, above);
                self.check(new_high, above)?;
            }
        }
        Ok(())
    }
}
