use geo::GeoFloat;
use itertools::Itertools;

use crate::{
    crossable::float_segments, result::Recorder, segment::SegmentIntersection, Crossable,
    SweepError, SweepLineResult, SweepPoint, Tolerance,
};

/// Compute the intersections of the given segments by testing every
/// pair.
///
/// Quadratic, but simple enough to trust: use it to check
/// [`sweep_line_intersections`](crate::sweep_line_intersections),
/// which takes the same arguments and reports the same point set.
/// Points are listed in the order the pairs are tested.
pub fn brute_force_intersections<C, T, I>(
    segments: I,
    epsilon: T,
) -> Result<SweepLineResult<T>, SweepError>
where
    C: Crossable,
    T: GeoFloat,
    I: IntoIterator<Item = C>,
{
    let tol = Tolerance::new(epsilon);
    let input: Vec<_> = float_segments(segments)?
        .into_iter()
        .map(|s| s.snapped(tol).normalize())
        .collect();

    let mut recorder = Recorder::new(input.clone(), tol);
    for ((i, a), (j, b)) in input.iter().enumerate().tuple_combinations() {
        match a.intersection(b, tol) {
            SegmentIntersection::None => {}
            SegmentIntersection::Point(pt) => {
                recorder.record(SweepPoint::from(pt), &[i, j]);
            }
            SegmentIntersection::Overlap(_) => {
                return Err(SweepError::CollinearOverlap { first: i, second: j });
            }
        }
    }
    Ok(recorder.finish())
}
