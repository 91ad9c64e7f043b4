//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use exactcsg::{
    Body, Plane, Triangle, Vector,
    mesh::dedup_coincident,
    rational_types::{Rational, integer, rational},
};

/// Point from integer coordinates.
pub fn pt(x: i64, y: i64, z: i64) -> Vector {
    Vector::point_i64(x, y, z)
}

/// Point from `(numerator, denominator)` pairs.
pub fn ptq(x: (i64, i64), y: (i64, i64), z: (i64, i64)) -> Vector {
    Vector::point(rational(x.0, x.1), rational(y.0, y.1), rational(z.0, z.1))
}

pub fn tri(a: (i64, i64, i64), b: (i64, i64, i64), c: (i64, i64, i64)) -> Triangle {
    Triangle::new(pt(a.0, a.1, a.2), pt(b.0, b.1, b.2), pt(c.0, c.1, c.2))
}

/// Exact bounding box `[min, max]` of every triangle vertex of `body`.
pub fn bounds(body: &impl Body) -> Option<(Vec<Rational>, Vec<Rational>)> {
    let triangles = body.triangles().ok()?;
    let mut points = triangles.iter().flat_map(|t| t.points().iter());
    let first = points.next()?;
    let mut min: Vec<Rational> = (0..3).map(|i| first.get(i).clone()).collect();
    let mut max = min.clone();
    for p in points {
        for i in 0..3 {
            if p.get(i) < &min[i] {
                min[i] = p.get(i).clone();
            }
            if p.get(i) > &max[i] {
                max[i] = p.get(i).clone();
            }
        }
    }
    Some((min, max))
}

/// Planes of the deduplicated triangles, each scaled so its first non-zero
/// coefficient is `±1` and kept once per orientation.
pub fn distinct_planes(triangles: &[Triangle]) -> Vec<Plane> {
    let mut planes: Vec<Plane> = Vec::new();
    for t in dedup_coincident(triangles) {
        let plane = t.plane();
        let pivot = plane.coefficients.iter().find(|c| **c != integer(0)).cloned().unwrap_or(integer(1));
        let pivot = if pivot < integer(0) { -pivot } else { pivot };
        let normalized = Plane { coefficients: plane.coefficients.clone().map(|c| c / &pivot) };
        if !planes.contains(&normalized) {
            planes.push(normalized);
        }
    }
    planes
}

/// The six bounding planes of the unit cube with outward normals.
pub fn unit_cube_planes() -> Vec<Plane> {
    let p = |a: i64, b: i64, c: i64, d: i64| Plane::new(integer(a), integer(b), integer(c), integer(d));
    vec![
        p(0, 0, -1, 0),
        p(0, 0, 1, -1),
        p(0, -1, 0, 0),
        p(0, 1, 0, -1),
        p(-1, 0, 0, 0),
        p(1, 0, 0, -1),
    ]
}
