use std::{cmp::Ordering, ops::RangeInclusive};

use geo::{Coordinate, GeoFloat};

use crate::{
    events::SweepPoint,
    kernel::{orientation, orientation_as_ordering},
    LineSegment, Tolerance,
};

/// A segment currently crossed by the sweep line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusEntry<T: GeoFloat> {
    pub key: usize,
    pub segment: LineSegment<T>,
}

/// Keys of the segments right below and above an active segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighbors {
    pub below: Option<usize>,
    pub above: Option<usize>,
}

/// Ordered sequence of the segments crossed by the sweep line,
/// bottom to top.
///
/// Segments are compared by their `y` at the current sweep position.
/// If either `y` is undefined there, or both agree within the
/// tolerance, the segment starting further left is the lower one.
/// Segments that also share their start `x` are ordered by direction,
/// i.e. by how they leave the common point.
///
/// A vertical segment at the sweep `x` sits at the sweep `y` clamped
/// to its extent: it is moved upwards past the segments it crosses as
/// the sweep advances along it.
///
/// Insertion searches the current order instead of re-sorting it,
/// so reorderings done by [`swap`](Self::swap) and
/// [`sort_block`](Self::sort_block) are kept. Both are only valid for
/// segments that meet at the current sweep point.
///
/// Positions are indexed by key, so lookups by key take constant time.
#[derive(Debug, Clone)]
pub struct SweepStatus<T: GeoFloat> {
    entries: Vec<StatusEntry<T>>,
    index: Vec<Option<usize>>,
    x: T,
    y: T,
    tol: Tolerance<T>,
}

impl<T: GeoFloat> SweepStatus<T> {
    pub fn new(tol: Tolerance<T>) -> Self {
        SweepStatus {
            entries: Vec::new(),
            index: Vec::new(),
            x: T::neg_infinity(),
            y: T::neg_infinity(),
            tol,
        }
    }

    #[inline]
    pub fn current_x(&self) -> T {
        self.x
    }

    /// Move the sweep line to `x`.
    pub fn set_current_x(&mut self, x: T) {
        self.x = x;
        self.y = T::neg_infinity();
    }

    /// Move the sweep line to the `x` of `point`, and remember its `y`
    /// for placing vertical segments.
    pub fn set_sweep_point(&mut self, point: SweepPoint<T>) {
        self.x = point.x();
        self.y = point.y();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEntry<T>> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.key)
    }

    #[inline]
    pub fn get(&self, pos: usize) -> Option<&StatusEntry<T>> {
        self.entries.get(pos)
    }

    /// Index of the segment with `key`, counted from the bottom.
    pub fn position(&self, key: usize) -> Option<usize> {
        self.index.get(key).copied().flatten()
    }

    /// Refresh the positions of the entries from `from` upwards.
    fn reindex(&mut self, from: usize) {
        for (pos, entry) in self.entries.iter().enumerate().skip(from) {
            self.index[entry.key] = Some(pos);
        }
    }

    pub fn contains(&self, key: usize) -> bool {
        self.position(key).is_some()
    }

    /// Height of `segment` at the sweep position.
    fn sweep_y(&self, segment: &LineSegment<T>) -> Option<T> {
        if segment.is_vertical(self.tol) {
            if !self.tol.eq(segment.start.x, self.x) {
                return None;
            }
            let (lo, hi) = if segment.start.y <= segment.end.y {
                (segment.start.y, segment.end.y)
            } else {
                (segment.end.y, segment.start.y)
            };
            return Some(self.y.max(lo).min(hi));
        }
        segment.evaluate_at_x(self.x, self.tol)
    }

    /// Order of two segments at the sweep position.
    pub fn compare(&self, a: &LineSegment<T>, b: &LineSegment<T>) -> Ordering {
        if let (Some(ya), Some(yb)) = (self.sweep_y(a), self.sweep_y(b)) {
            match self.tol.cmp(ya, yb) {
                Ordering::Equal => {}
                o => return o,
            }
        }
        self.tol
            .cmp(a.start.x, b.start.x)
            .then_with(|| self.cmp_after(a, b))
    }

    /// Order of two segments right after a point they both pass
    /// through. See [`cmp_leaving`].
    #[inline]
    pub fn cmp_after(&self, a: &LineSegment<T>, b: &LineSegment<T>) -> Ordering {
        cmp_leaving(a, b, self.tol)
    }

    /// Insert a segment at its position in the current order.
    ///
    /// Returns the index it was inserted at.
    pub fn insert(&mut self, key: usize, segment: LineSegment<T>) -> usize {
        let pos = self
            .entries
            .partition_point(|e| self.compare(&e.segment, &segment) == Ordering::Less);
        self.entries.insert(pos, StatusEntry { key, segment });
        if self.index.len() <= key {
            self.index.resize(key + 1, None);
        }
        self.reindex(pos);
        pos
    }

    /// Remove the segment with `key`; a no-op if it is not active.
    pub fn remove(&mut self, key: usize) -> Option<StatusEntry<T>> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        self.index[key] = None;
        self.reindex(pos);
        Some(entry)
    }

    /// Segments right below and above the segment with `key`.
    ///
    /// Returns `None` if the segment is not active.
    pub fn neighbors(&self, key: usize) -> Option<Neighbors> {
        let pos = self.position(key)?;
        Some(Neighbors {
            below: pos
                .checked_sub(1)
                .and_then(|p| self.entries.get(p))
                .map(|e| e.key),
            above: self.entries.get(pos + 1).map(|e| e.key),
        })
    }

    /// Exchange the positions of two active segments.
    ///
    /// Returns `false` (and does nothing) unless both are active.
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        match (self.position(a), self.position(b)) {
            (Some(i), Some(j)) => {
                self.entries.swap(i, j);
                self.index.swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Reorder the entries in `range` into the order they leave the
    /// point they all pass through.
    pub fn sort_block(&mut self, range: RangeInclusive<usize>) {
        let tol = self.tol;
        let from = *range.start();
        self.entries[range].sort_by(|a, b| cmp_leaving(&a.segment, &b.segment, tol));
        self.reindex(from);
    }
}

/// Order in which two segments leave a point they both pass through:
/// by direction, counter-clockwise last. Vertical segments come last.
pub fn cmp_leaving<T: GeoFloat>(
    a: &LineSegment<T>,
    b: &LineSegment<T>,
    tol: Tolerance<T>,
) -> Ordering {
    orientation_as_ordering(orientation(
        Coordinate {
            x: T::zero(),
            y: T::zero(),
        },
        a.normalize().direction(),
        b.normalize().direction(),
        tol,
    ))
}
