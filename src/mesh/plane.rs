//! Exact planes `A·x + B·y + C·z + D = 0` and plane/plane intersection.

use crate::errors::CsgError;
use crate::mesh::line::Line;
use crate::mesh::vector::{Vector, cross, dot};
use crate::rational_types::Rational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// A plane stored as its four equation coefficients `[A, B, C, D]`.
///
/// The normal `(A, B, C)` is *not* normalized: for a triangle it is the cross
/// product of two edge vectors, for a surface the sum of its triangle normals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plane {
    pub coefficients: [Rational; 4],
}

impl Plane {
    pub fn new(a: Rational, b: Rational, c: Rational, d: Rational) -> Self {
        Plane { coefficients: [a, b, c, d] }
    }

    /// Plane with the given normal direction and constant term `d`.
    pub fn from_normal(normal: &Vector, d: Rational) -> Self {
        Plane::new(normal.x().clone(), normal.y().clone(), normal.z().clone(), d)
    }

    /// Plane through `p0`, `p1`, `p2` with normal `(p1 - p0) × (p2 - p0)`.
    ///
    /// Collinear points produce a zero-normal plane; check
    /// [`Plane::is_degenerate`] before trusting the result.
    pub fn through_points(p0: &Vector, p1: &Vector, p2: &Vector) -> Self {
        let normal = cross(&(p1 - p0), &(p2 - p0));
        let d = -dot(&normal, p0);
        Plane::from_normal(&normal, d)
    }

    /// Like [`Plane::through_points`] but rejects collinear input.
    pub fn try_through_points(p0: &Vector, p1: &Vector, p2: &Vector) -> Result<Self, CsgError> {
        let plane = Self::through_points(p0, p1, p2);
        if plane.is_degenerate() {
            return Err(CsgError::DegeneratePlane);
        }
        Ok(plane)
    }

    /// The (unnormalized) normal as a direction.
    pub fn normal(&self) -> Vector {
        let [a, b, c, _] = &self.coefficients;
        Vector::direction(a.clone(), b.clone(), c.clone())
    }

    /// The constant term `D`.
    pub fn offset(&self) -> &Rational {
        &self.coefficients[3]
    }

    /// True if the normal is the zero vector.
    pub fn is_degenerate(&self) -> bool {
        self.coefficients[..3].iter().all(Zero::is_zero)
    }

    /// `A·x + B·y + C·z + D`: the signed distance scaled by the normal's length.
    pub fn signed_distance_numerator(&self, point: &Vector) -> Rational {
        let [a, b, c, d] = &self.coefficients;
        a * point.x() + b * point.y() + c * point.z() + d
    }

    /// Exact on-plane test.
    pub fn contains_point(&self, point: &Vector) -> bool {
        self.signed_distance_numerator(point).is_zero()
    }

    /// Reverse the orientation of the plane.
    pub fn flip(&mut self) {
        for c in self.coefficients.iter_mut() {
            *c = -c.clone();
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.coefficients;
        write!(f, "[{a},{b},{c},{d}]")
    }
}

/// The line where two planes meet, as the segment `point → point + direction`.
///
/// The coordinate along which the direction is largest in magnitude is pinned
/// to zero, and the remaining 2×2 system is solved exactly for the other two.
///
/// # Errors
/// [`CsgError::DegeneratePlane`] if either plane has a zero normal,
/// [`CsgError::NoIntersection`] if the planes are parallel or identical.
pub fn plane_intersection(plane1: &Plane, plane2: &Plane) -> Result<Line, CsgError> {
    if plane1.is_degenerate() || plane2.is_degenerate() {
        return Err(CsgError::DegeneratePlane);
    }
    let direction = cross(&plane1.normal(), &plane2.normal());
    if direction.is_zero_direction() {
        return Err(CsgError::NoIntersection);
    }

    let magnitude = |axis: usize| direction.get(axis).abs();
    let i = if magnitude(0) >= magnitude(1) && magnitude(0) >= magnitude(2) {
        0
    } else if magnitude(1) >= magnitude(2) {
        1
    } else {
        2
    };
    let j = (i + 1) % 3;
    let k = (i + 2) % 3;

    let c1 = &plane1.coefficients;
    let c2 = &plane2.coefficients;
    let denominator = &c1[j] * &c2[k] - &c2[j] * &c1[k];
    if denominator.is_zero() {
        return Err(CsgError::NoIntersection);
    }

    let mut start = Vector::origin();
    start.set(i, Rational::zero());
    start.set(j, (&c1[k] * &c2[3] - &c2[k] * &c1[3]) / &denominator);
    start.set(k, (&c2[j] * &c1[3] - &c1[j] * &c2[3]) / &denominator);
    start.set(3, Rational::one());
    let end = &start + &direction;
    Ok(Line::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational_types::integer;

    #[test]
    fn normal_is_orthogonal_to_edges() {
        let p0 = Vector::point_i64(1, 0, 2);
        let p1 = Vector::point_i64(4, -1, 0);
        let p2 = Vector::point_i64(0, 3, 5);
        let plane = Plane::through_points(&p0, &p1, &p2);
        let n = plane.normal();
        assert!(dot(&n, &(&p1 - &p0)).is_zero());
        assert!(dot(&n, &(&p2 - &p1)).is_zero());
        assert!(dot(&n, &(&p0 - &p2)).is_zero());
        assert!(plane.contains_point(&p0));
        assert!(plane.contains_point(&p1));
        assert!(plane.contains_point(&p2));
    }

    #[test]
    fn collinear_points_are_rejected() {
        let p0 = Vector::point_i64(0, 0, 0);
        let p1 = Vector::point_i64(1, 1, 1);
        let p2 = Vector::point_i64(2, 2, 2);
        assert!(Plane::through_points(&p0, &p1, &p2).is_degenerate());
        assert_eq!(Plane::try_through_points(&p0, &p1, &p2), Err(CsgError::DegeneratePlane));
    }

    #[test]
    fn intersection_lies_on_both_planes() {
        let a = Plane::new(integer(1), integer(2), integer(-1), integer(3));
        let b = Plane::new(integer(0), integer(1), integer(4), integer(-2));
        let line = plane_intersection(&a, &b).unwrap();
        for p in [&line.start, &line.end] {
            assert!(a.contains_point(p));
            assert!(b.contains_point(p));
            assert!(p.is_point());
        }
    }

    #[test]
    fn parallel_planes_do_not_intersect() {
        let a = Plane::new(integer(0), integer(0), integer(1), integer(0));
        let b = Plane::new(integer(0), integer(0), integer(2), integer(-1));
        assert_eq!(plane_intersection(&a, &b), Err(CsgError::NoIntersection));
        assert_eq!(plane_intersection(&a, &a), Err(CsgError::NoIntersection));
    }
}
