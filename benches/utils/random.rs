#![allow(dead_code)]

use std::f64::consts::PI;

use geo::{rotate::RotatePoint, Coordinate, Line, Rect};

use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::Standard;

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

#[inline]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let line = Line::new(start, start + (length, 0.).into());
    let angle = rng.sample::<f64, _>(Standard) * 2. * PI;
    line.rotate_around_point(angle, start.into())
}

/// Reproducible set of `count` uniform lines in `bounds`.
pub fn seeded_lines(seed: u64, count: usize, bounds: Rect<f64>) -> Vec<Line<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| uniform_line(&mut rng, bounds)).collect()
}

/// Reproducible set of `count` non-degenerate lines with integer
/// endpoints in `0..=size` on both axes.
pub fn grid_lines(seed: u64, count: usize, size: i32) -> Vec<Line<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let point = |rng: &mut StdRng| {
        Coordinate::from((
            rng.gen_range(0..=size) as f64,
            rng.gen_range(0..=size) as f64,
        ))
    };
    let mut lines = Vec::with_capacity(count);
    while lines.len() < count {
        let (start, end) = (point(&mut rng), point(&mut rng));
        if start != end {
            lines.push(Line::new(start, end));
        }
    }
    lines
}
