//! Bounded segments and exact segment/segment classification.

use crate::mesh::vector::{Vector, cross, dot, magnitude_squared};
use crate::rational_types::Rational;
use num_traits::{One, Zero};
use std::fmt;

/// A segment from `start` (`t = 0`) to `end` (`t = 1`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line {
    pub start: Vector,
    pub end: Vector,
}

impl Line {
    pub const fn new(start: Vector, end: Vector) -> Self {
        Line { start, end }
    }

    /// `start + t·(end - start)`
    pub fn interpolate(&self, t: &Rational) -> Vector {
        &self.start + &self.direction().scale(t)
    }

    /// `end - start`
    pub fn direction(&self) -> Vector {
        &self.end - &self.start
    }

    /// Squared distance from `point` to the infinite line through the segment.
    /// A zero-length segment measures the distance to `start`.
    pub fn distance_squared_to_point(&self, point: &Vector) -> Rational {
        let v = self.direction();
        let w = point - &self.start;
        let v_len = magnitude_squared(&v);
        if v_len.is_zero() {
            return magnitude_squared(&w);
        }
        let along = dot(&w, &v);
        magnitude_squared(&w) - &along * &along / v_len
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Classification of two segments `a` and `b`.
///
/// `t[0]` / `t[1]` are the parameters of the meeting point along `a` / `b`;
/// `inside_line[n]` reports whether that parameter lies in `[0, 1]`, i.e. the
/// meeting point is on the physical segment and not only on its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIntersection {
    pub t: [Rational; 2],
    pub inside_line: [bool; 2],
    /// The meeting point, present only for a single-point intersection.
    pub point: Option<Vector>,
    pub exists: bool,
    pub coplanar: bool,
    pub skew: bool,
    pub coincident: bool,
}

impl Default for LineIntersection {
    fn default() -> Self {
        LineIntersection {
            t: [Rational::zero(), Rational::zero()],
            inside_line: [false, false],
            point: None,
            exists: false,
            coplanar: false,
            skew: false,
            coincident: false,
        }
    }
}

impl LineIntersection {
    /// A single meeting point exists (the segments are not collinear).
    pub fn meets_at_point(&self) -> bool {
        self.exists && !self.coincident && self.point.is_some()
    }

    /// The meeting point lies on segment `a` itself.
    pub fn crosses_first(&self) -> bool {
        self.meets_at_point() && self.inside_line[0]
    }

    /// The meeting point is exactly the end of segment `a`.
    pub fn at_end_of_first(&self) -> bool {
        self.meets_at_point() && self.t[0].is_one()
    }

    /// The meeting point is exactly the start of segment `a`.
    pub fn at_start_of_first(&self) -> bool {
        self.meets_at_point() && self.t[0].is_zero()
    }

    /// The meeting point is strictly between the endpoints of segment `a`.
    pub fn strictly_inside_first(&self) -> bool {
        self.meets_at_point() && self.t[0] > Rational::zero() && self.t[0] < Rational::one()
    }
}

impl fmt::Display for LineIntersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exists={} coincident={} skew={} coplanar={} in_line={},{} t={},{}",
            self.exists,
            self.coincident,
            self.skew,
            self.coplanar,
            self.inside_line[0],
            self.inside_line[1],
            self.t[0],
            self.t[1]
        )?;
        if let Some(point) = &self.point {
            write!(f, " point={point}")?;
        }
        Ok(())
    }
}

fn in_unit_range(t: &Rational) -> bool {
    *t >= Rational::zero() && *t <= Rational::one()
}

/// Classify segments `a` and `b`.
///
/// Parallel segments are `coincident` (collinear, `exists`), `coplanar`, or
/// `skew`. Non-parallel segments are solved for `t` along each; if the two
/// resulting points disagree the lines pass each other in 3-D and the result is
/// downgraded to `skew` with both `inside_line` flags cleared.
pub fn line_intersection(a: &Line, b: &Line) -> LineIntersection {
    let mut result = LineIntersection::default();

    let da = a.direction();
    let db = b.direction();
    let r = &a.start - &b.start;

    let n = cross(&da, &db);
    let n_mag_sq = magnitude_squared(&n);

    if n_mag_sq.is_zero() {
        if cross(&r, &db).is_zero_direction() {
            result.coplanar = true;
            if cross(&r, &da).is_zero_direction() {
                result.coincident = true;
                result.exists = true;
            }
        } else {
            result.skew = true;
        }
        return result;
    }

    let t0 = -dot(&cross(&r, &db), &n) / &n_mag_sq;
    let t1 = -dot(&cross(&r, &da), &n) / &n_mag_sq;

    let intersection_a = a.interpolate(&t0);
    let intersection_b = b.interpolate(&t1);

    if intersection_a != intersection_b {
        result.skew = true;
        result.t = [t0, t1];
        return result;
    }

    result.exists = true;
    result.coplanar = true;
    result.inside_line = [in_unit_range(&t0), in_unit_range(&t1)];
    result.t = [t0, t1];
    result.point = Some(intersection_a);
    result
}
