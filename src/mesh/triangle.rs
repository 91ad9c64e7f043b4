//! Struct and functions for working with exact `Triangle`s.

use crate::errors::CsgError;
use crate::mesh::line::{Line, line_intersection};
use crate::mesh::plane::Plane;
use crate::mesh::vector::{Vector, cross, dot};
use crate::rational_types::{Rational, integer};
use num_traits::Zero;
use std::cell::OnceCell;
use std::fmt;

/// Three points plus a lazily computed supporting plane.
///
/// The plane is memoized on first use and dropped whenever a point is
/// replaced through [`Triangle::set_point`].
#[derive(Debug, Clone)]
pub struct Triangle {
    points: [Vector; 3],
    plane: OnceCell<Plane>,
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl Eq for Triangle {}

impl Triangle {
    /// Create a triangle without checking it; see [`Triangle::is_valid`].
    pub fn new(p0: Vector, p1: Vector, p2: Vector) -> Self {
        Triangle { points: [p0, p1, p2], plane: OnceCell::new() }
    }

    /// Create a triangle, rejecting collinear points.
    pub fn try_new(p0: Vector, p1: Vector, p2: Vector) -> Result<Self, CsgError> {
        let triangle = Self::new(p0, p1, p2);
        if triangle.is_valid() { Ok(triangle) } else { Err(CsgError::DegenerateTriangle) }
    }

    pub const fn points(&self) -> &[Vector; 3] {
        &self.points
    }

    /// Vertex `index` (0..3).
    ///
    /// # Panics
    /// If `index` is 3 or more.
    pub fn point(&self, index: usize) -> &Vector {
        &self.points[index]
    }

    /// Replace vertex `index`, invalidating the memoized plane.
    ///
    /// # Panics
    /// If `index` is 3 or more.
    pub fn set_point(&mut self, index: usize, point: Vector) {
        self.points[index] = point;
        self.plane.take();
    }

    /// The supporting plane through the three points, in winding order.
    pub fn plane(&self) -> &Plane {
        self.plane
            .get_or_init(|| Plane::through_points(&self.points[0], &self.points[1], &self.points[2]))
    }

    /// The (unnormalized) normal, `(p1 - p0) × (p2 - p0)`.
    pub fn normal(&self) -> Vector {
        self.plane().normal()
    }

    /// A triangle is valid when its points are not collinear.
    pub fn is_valid(&self) -> bool {
        !self.plane().is_degenerate()
    }

    /// Centroid of the three points.
    pub fn center(&self) -> Vector {
        let mut total = Vector::zero();
        for p in &self.points {
            total += p;
        }
        total.divide(&integer(3))
    }

    /// Edge `index` runs from vertex `index` to vertex `index + 1` (mod 3).
    pub fn edge(&self, index: usize) -> Line {
        let next = (index + 1) % 3;
        Line::new(self.points[index].clone(), self.points[next].clone())
    }

    /// Barycentric weights `(u, v, w)` of `p` for vertices 0, 2 and 1.
    ///
    /// # Errors
    /// [`CsgError::DegenerateBarycentric`] when the triangle is degenerate.
    pub fn barycentric(&self, p: &Vector) -> Result<(Rational, Rational, Rational), CsgError> {
        let v0 = &self.points[2] - &self.points[0];
        let v1 = &self.points[1] - &self.points[0];
        let v2 = p - &self.points[0];

        let d00 = dot(&v0, &v0);
        let d01 = dot(&v0, &v1);
        let d11 = dot(&v1, &v1);
        let d20 = dot(&v2, &v0);
        let d21 = dot(&v2, &v1);

        let denominator = &d00 * &d11 - &d01 * &d01;
        if denominator.is_zero() {
            return Err(CsgError::DegenerateBarycentric);
        }
        let v = (&d11 * &d20 - &d01 * &d21) / &denominator;
        let w = (&d00 * &d21 - &d01 * &d20) / &denominator;
        let u = integer(1) - &v - &w;
        Ok((u, v, w))
    }

    /// Whether `p` lies on this triangle (boundary included).
    ///
    /// Points off the supporting plane are never contained.
    pub fn contains_point(&self, p: &Vector) -> Result<bool, CsgError> {
        let (u, v, w) = self.barycentric(p)?;
        if !self.plane().contains_point(p) {
            return Ok(false);
        }
        let zero = Rational::zero();
        Ok(u >= zero && v >= zero && w >= zero)
    }

    /// True if both normals point along the same line (either direction).
    pub fn parallel_to(&self, other: &Triangle) -> bool {
        cross(&self.normal(), &other.normal()).is_zero_direction()
    }

    /// True if `other` is parallel and lies in this triangle's plane.
    pub fn coplanar_with(&self, other: &Triangle) -> bool {
        self.parallel_to(other) && self.plane().contains_point(&other.points[0])
    }

    /// Coplanar overlap: a vertex of either triangle lies in the other, or two
    /// edges cross inside both segments.
    pub fn overlaps(&self, other: &Triangle) -> Result<bool, CsgError> {
        for p in &other.points {
            if self.contains_point(p)? {
                return Ok(true);
            }
        }
        for p in &self.points {
            if other.contains_point(p)? {
                return Ok(true);
            }
        }
        for i in 0..3 {
            for j in 0..3 {
                let hit = line_intersection(&self.edge(i), &other.edge(j));
                if hit.meets_at_point() && hit.inside_line[0] && hit.inside_line[1] {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Coplanar containment: every vertex of `other` lies in this triangle.
    pub fn contains(&self, other: &Triangle) -> Result<bool, CsgError> {
        for p in &other.points {
            if !self.contains_point(p)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Same three vertices in any order or orientation.
    pub fn same_vertices(&self, other: &Triangle) -> bool {
        let [a, b, c] = &self.points;
        let permutations = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        permutations.iter().any(|[i, j, k]| {
            *a == other.points[*i] && *b == other.points[*j] && *c == other.points[*k]
        })
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = &self.points;
        write!(f, "({a} {b} {c})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational_types::rational;

    fn tri(a: (i64, i64, i64), b: (i64, i64, i64), c: (i64, i64, i64)) -> Triangle {
        Triangle::new(
            Vector::point_i64(a.0, a.1, a.2),
            Vector::point_i64(b.0, b.1, b.2),
            Vector::point_i64(c.0, c.1, c.2),
        )
    }

    #[test]
    fn collinear_triangle_is_invalid() {
        let t = tri((0, 0, 0), (1, 1, 1), (3, 3, 3));
        assert!(!t.is_valid());
        assert_eq!(
            Triangle::try_new(t.point(0).clone(), t.point(1).clone(), t.point(2).clone()),
            Err(CsgError::DegenerateTriangle)
        );
        assert_eq!(t.contains_point(&Vector::origin()), Err(CsgError::DegenerateBarycentric));
    }

    #[test]
    fn set_point_refreshes_plane() {
        let mut t = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        assert_eq!(t.normal(), Vector::direction_i64(0, 0, 1));
        t.set_point(2, Vector::point_i64(0, 0, 1));
        assert_eq!(t.normal(), Vector::direction_i64(0, -1, 0));
    }

    #[test]
    fn contains_point_is_inclusive() {
        let t = tri((0, 0, 0), (2, 0, 0), (0, 2, 0));
        assert_eq!(t.contains_point(&Vector::point_i64(0, 0, 0)), Ok(true));
        assert_eq!(t.contains_point(&Vector::point_i64(1, 1, 0)), Ok(true));
        let inner = Vector::point(rational(1, 2), rational(1, 2), rational(0, 1));
        assert_eq!(t.contains_point(&inner), Ok(true));
        assert_eq!(t.contains_point(&Vector::point_i64(2, 2, 0)), Ok(false));
        assert_eq!(t.contains_point(&Vector::point_i64(1, 0, 1)), Ok(false));
    }

    #[test]
    fn center_is_point() {
        let t = tri((0, 0, 0), (3, 0, 0), (0, 3, 3));
        assert_eq!(t.center(), Vector::point_i64(1, 1, 1));
    }

    #[test]
    fn star_overlap_without_contained_vertices() {
        let a = tri((0, 0, 0), (6, 0, 0), (3, 6, 0));
        let b = tri((0, 4, 0), (3, -2, 0), (6, 4, 0));
        assert_eq!(a.overlaps(&b), Ok(true));
        let far = tri((10, 10, 0), (11, 10, 0), (10, 11, 0));
        assert_eq!(a.overlaps(&far), Ok(false));
    }

    #[test]
    fn vertex_set_equality() {
        let a = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let b = tri((0, 1, 0), (1, 0, 0), (0, 0, 0));
        assert!(a.same_vertices(&b));
        assert_ne!(a, b);
        assert!(!a.same_vertices(&tri((0, 0, 0), (1, 0, 0), (0, 2, 0))));
    }

    #[test]
    fn coplanar_and_parallel() {
        let a = tri((0, 0, 0), (1, 0, 0), (0, 1, 0));
        let flipped = tri((5, 5, 0), (5, 6, 0), (6, 5, 0));
        let lifted = tri((0, 0, 1), (1, 0, 1), (0, 1, 1));
        assert!(a.parallel_to(&flipped) && a.coplanar_with(&flipped));
        assert!(a.parallel_to(&lifted) && !a.coplanar_with(&lifted));
    }
}
