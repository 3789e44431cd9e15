#![allow(dead_code)]

use geo::Line;
use geo_sweepline::{brute_force_intersections, sweep_line_intersections};

const EPS: f64 = 1e-9;

pub fn count_sweep(lines: &[Line<f64>]) -> usize {
    sweep_line_intersections(lines, EPS).map_or(0, |r| r.len())
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    brute_force_intersections(lines, EPS).map_or(0, |r| r.len())
}
