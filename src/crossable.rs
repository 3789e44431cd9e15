use geo::{CoordNum, Coordinate, GeoFloat, Line};

use crate::{LineSegment, SweepError};

/// Interface for types that can be processed to detect crossings.
///
/// The geo-type [`Line`] implements this trait for any coordinate
/// type, integer or floating point. Implement it on custom types to
/// feed them to [`sweep_line_intersections`](crate::sweep_line_intersections)
/// directly:
///
/// ```rust
/// use geo::Line;
/// use geo_sweepline::{sweep_line_intersections, Crossable};
///
/// struct Wall {
///     from: (i32, i32),
///     to: (i32, i32),
/// }
///
/// impl Crossable for Wall {
///     type Scalar = i32;
///     fn line(&self) -> Line<i32> {
///         Line::new(self.from, self.to)
///     }
/// }
///
/// let walls = vec![
///     Wall { from: (0, 0), to: (4, 4) },
///     Wall { from: (0, 4), to: (4, 0) },
/// ];
/// let result = sweep_line_intersections(&walls, 0.).unwrap();
/// assert_eq!(result.len(), 1);
/// ```
pub trait Crossable {
    type Scalar: CoordNum;
    fn line(&self) -> Line<Self::Scalar>;
}

impl<N: CoordNum> Crossable for Line<N> {
    type Scalar = N;

    #[inline]
    fn line(&self) -> Line<N> {
        *self
    }
}

impl<T: GeoFloat> Crossable for LineSegment<T> {
    type Scalar = T;

    #[inline]
    fn line(&self) -> Line<T> {
        (*self).into()
    }
}

impl<'a, C: Crossable> Crossable for &'a C {
    type Scalar = C::Scalar;

    #[inline]
    fn line(&self) -> Line<C::Scalar> {
        C::line(*self)
    }
}

/// Convert the geometry of a crossable into a float segment.
///
/// Returns `None` if a coordinate is not representable as a finite
/// `T`.
pub(crate) fn float_segment<C: Crossable, T: GeoFloat>(crossable: &C) -> Option<LineSegment<T>> {
    let line = crossable.line();
    let convert = |c: Coordinate<C::Scalar>| -> Option<Coordinate<T>> {
        let x: T = num_traits::cast(c.x)?;
        let y: T = num_traits::cast(c.y)?;
        (x.is_finite() && y.is_finite()).then(|| Coordinate { x, y })
    };
    Some(LineSegment {
        start: convert(line.start)?,
        end: convert(line.end)?,
    })
}

/// Convert every input, failing on the first one with a coordinate
/// that is not finite as a `T`.
pub(crate) fn float_segments<C, T, I>(segments: I) -> Result<Vec<LineSegment<T>>, SweepError>
where
    C: Crossable,
    T: GeoFloat,
    I: IntoIterator<Item = C>,
{
    segments
        .into_iter()
        .enumerate()
        .map(|(index, c)| float_segment(&c).ok_or(SweepError::NonFiniteCoordinate { index }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_lines_convert() {
        let line = Line::new((1, -2), (3, 4));
        let seg: LineSegment<f64> = float_segment(&line).unwrap();
        assert_eq!(seg, LineSegment::new((1., -2.), (3., 4.)));
        let seg32: LineSegment<f32> = float_segment(&&line).unwrap();
        assert_eq!(seg32.end, Coordinate { x: 3f32, y: 4f32 });
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let line = Line::new((0., f64::INFINITY), (1., 1.));
        assert!(float_segment::<_, f64>(&line).is_none());
        let line = Line::new((f64::NAN, 0.), (1., 1.));
        assert!(float_segment::<_, f64>(&line).is_none());
    }

    #[test]
    fn first_bad_input_is_reported() {
        let lines = vec![
            Line::new((0., 0.), (1., 1.)),
            Line::new((0., 0.), (f64::NEG_INFINITY, 1.)),
            Line::new((f64::NAN, 0.), (1., 1.)),
        ];
        assert_eq!(
            float_segments::<_, f64, _>(&lines),
            Err(SweepError::NonFiniteCoordinate { index: 1 })
        );
        assert_eq!(float_segments::<_, f64, _>(&lines[..1]).map(|v| v.len()), Ok(1));
    }
}
