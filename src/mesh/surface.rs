//! `Surface`: an ordered triangle list with a memoized best-fit plane.

use crate::errors::CsgError;
use crate::mesh::plane::Plane;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::{Vector, dot};
use crate::rational_types::integer;
use std::cell::OnceCell;

#[derive(Debug, Clone, Default)]
pub struct Surface {
    triangles: Vec<Triangle>,

    /// Lazily calculated average plane; `None` inside means degenerate.
    average_plane: OnceCell<Option<Plane>>,
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.triangles == other.triangles
    }
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Surface { triangles, average_plane: OnceCell::new() }
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }

    pub fn triangle(&self, index: usize) -> Result<&Triangle, CsgError> {
        let len = self.triangles.len();
        self.triangles.get(index).ok_or(CsgError::IndexOutOfRange { index, len })
    }

    /// Mutable access to one triangle; invalidates the average plane.
    pub fn triangle_mut(&mut self, index: usize) -> Result<&mut Triangle, CsgError> {
        self.average_plane.take();
        let len = self.triangles.len();
        self.triangles.get_mut(index).ok_or(CsgError::IndexOutOfRange { index, len })
    }

    pub fn push(&mut self, triangle: Triangle) {
        self.average_plane.take();
        self.triangles.push(triangle);
    }

    /// Remove triangle `index` by moving the last triangle into its slot.
    pub fn delete_triangle(&mut self, index: usize) -> Result<Triangle, CsgError> {
        let len = self.triangles.len();
        if index >= len {
            return Err(CsgError::IndexOutOfRange { index, len });
        }
        self.average_plane.take();
        Ok(self.triangles.swap_remove(index))
    }

    /// The surface's best-fit plane.
    ///
    /// `(A, B, C)` is the *sum* of all triangle normals; `D` places the plane
    /// through the mean of every triangle's three vertices (a vertex shared by
    /// several triangles is counted once per triangle).
    ///
    /// # Errors
    /// [`CsgError::DegeneratePlane`] for an empty surface or when the normals
    /// cancel out.
    pub fn average_plane(&self) -> Result<&Plane, CsgError> {
        self.average_plane
            .get_or_init(|| self.compute_average_plane())
            .as_ref()
            .ok_or(CsgError::DegeneratePlane)
    }

    fn compute_average_plane(&self) -> Option<Plane> {
        if self.triangles.is_empty() {
            return None;
        }
        let mut normal_sum = Vector::zero();
        let mut vertex_sum = Vector::zero();
        for triangle in &self.triangles {
            normal_sum += &triangle.normal();
            for p in triangle.points() {
                vertex_sum += p;
            }
        }
        if normal_sum.is_zero_direction() {
            return None;
        }
        let vertex_count = integer(3 * self.triangles.len() as i64);
        let centroid = vertex_sum.divide(&vertex_count);
        let d = -dot(&normal_sum, &centroid);
        Some(Plane::from_normal(&normal_sum, d))
    }
}

impl FromIterator<Triangle> for Surface {
    fn from_iter<I: IntoIterator<Item = Triangle>>(iter: I) -> Self {
        Surface::from_triangles(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Surface {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

/// Drop triangles that repeat an earlier triangle's vertex set, keeping the
/// first occurrence and the original order.
pub fn dedup_coincident(triangles: &[Triangle]) -> Vec<Triangle> {
    let mut unique: Vec<Triangle> = Vec::with_capacity(triangles.len());
    for triangle in triangles {
        if !unique.iter().any(|kept| kept.same_vertices(triangle)) {
            unique.push(triangle.clone());
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational_types::rational;

    fn square() -> Surface {
        let p = |x, y| Vector::point_i64(x, y, 0);
        Surface::from_triangles(vec![
            Triangle::new(p(0, 0), p(1, 0), p(1, 1)),
            Triangle::new(p(0, 0), p(1, 1), p(0, 1)),
        ])
    }

    #[test]
    fn average_plane_sums_normals() {
        let surface = square();
        let plane = surface.average_plane().unwrap();
        assert_eq!(plane.normal(), Vector::direction_i64(0, 0, 2));
        assert_eq!(*plane.offset(), integer(0));
    }

    #[test]
    fn average_plane_is_invalidated_by_mutation() {
        let mut surface = square();
        assert_eq!(*surface.average_plane().unwrap().offset(), integer(0));
        for i in 0..surface.len() {
            let triangle = surface.triangle_mut(i).unwrap();
            for k in 0..3 {
                let mut p = triangle.point(k).clone();
                p.set(2, integer(3));
                triangle.set_point(k, p);
            }
        }
        assert_eq!(*surface.average_plane().unwrap().offset(), integer(-6));
    }

    #[test]
    fn lifted_surface_offset() {
        let p = |x, y| Vector::point(integer(x), integer(y), rational(1, 2));
        let mut surface = Surface::from_triangles(vec![Triangle::new(p(0, 0), p(3, 0), p(0, 3))]);
        surface.push(Triangle::new(p(3, 0), p(3, 3), p(0, 3)));
        let plane = surface.average_plane().unwrap();
        assert_eq!(plane.normal(), Vector::direction_i64(0, 0, 18));
        assert_eq!(*plane.offset(), integer(-9));
    }

    #[test]
    fn shared_vertices_count_once_per_triangle() {
        let o = Vector::point_i64(0, 0, 0);
        let y = Vector::point_i64(0, 1, 0);
        let a = Triangle::new(o.clone(), Vector::point_i64(1, 0, 0), y.clone());
        let b = Triangle::new(o, y, Vector::point_i64(0, 0, 1));
        let plane = Surface::from_triangles(vec![a, b]).average_plane().unwrap().clone();
        assert_eq!(plane.normal(), Vector::direction_i64(1, 0, 1));
        // Vertex mean over six corners is (1/6, 1/3, 1/6), not the mean of the four unique points.
        assert_eq!(*plane.offset(), rational(-1, 3));
    }

    #[test]
    fn empty_surface_has_no_plane() {
        assert_eq!(Surface::new().average_plane(), Err(CsgError::DegeneratePlane));
    }

    #[test]
    fn delete_swaps_last_into_place() {
        let mut surface = square();
        let first = surface.triangle(0).unwrap().clone();
        let last = surface.triangle(1).unwrap().clone();
        assert_eq!(surface.delete_triangle(0), Ok(first));
        assert_eq!(surface.triangle(0), Ok(&last));
        assert_eq!(surface.delete_triangle(5), Err(CsgError::IndexOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let surface = square();
        let mut doubled = surface.triangles().to_vec();
        let t = surface.triangle(0).unwrap();
        doubled.push(Triangle::new(t.point(2).clone(), t.point(0).clone(), t.point(1).clone()));
        assert_eq!(dedup_coincident(&doubled).len(), 2);
    }
}
