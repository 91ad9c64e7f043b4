//! Primitive solids with fixed meshes: the unit cube and the unit cylinder.

use crate::errors::CsgError;
use crate::mesh::line::{Line, line_intersection};
use crate::mesh::surface::Surface;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::Vector;
use crate::rational_circle::find_rational_angle;
use crate::rational_types::{Rational, cylinder_step, integer, is_valid_step};
use crate::solid::{Solid, SolidRef, next_stamp};
use crate::traits::Body;
use num_traits::{One, Zero};
use std::rc::Rc;

/// Index of the z = 0 cap in a cylinder's surface list.
const CYLINDER_BOTTOM: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    /// `[0, 1]³`
    Cube,
    /// Radius 1 around the z axis, `z ∈ [0, 1]`, one wall segment per `step` degrees.
    Cylinder { step: u32 },
}

/// An immutable solid whose mesh is built once, at construction.
#[derive(Debug)]
pub struct Primitive {
    kind: PrimitiveKind,
    surfaces: Rc<[Surface]>,
    stamp: u64,
}

impl Primitive {
    /// The unit cube as 6 two-triangle faces with outward normals.
    ///
    /// ```text
    ///     7-------6
    ///    /|      /|
    ///   4-------5 |
    ///   | |     | |
    ///   | 3-----|-2
    ///   |/      |/
    ///   0-------1
    /// ```
    ///
    /// - **Bottom**: [0,3,2,1] (z=0, normal -Z)
    /// - **Top**: [4,5,6,7] (z=1, normal +Z)
    /// - **Front**: [0,1,5,4] (y=0, normal -Y)
    /// - **Back**: [2,3,7,6] (y=1, normal +Y)
    /// - **Left**: [0,4,7,3] (x=0, normal -X)
    /// - **Right**: [1,2,6,5] (x=1, normal +X)
    ///
    /// Face `[a,b,c,d]` becomes triangles `(a,b,c)` and `(a,c,d)`; corners are
    /// listed counter-clockwise seen from outside.
    pub fn cube() -> Self {
        let corners = [
            (0, 0, 0),
            (1, 0, 0),
            (1, 1, 0),
            (0, 1, 0),
            (0, 0, 1),
            (1, 0, 1),
            (1, 1, 1),
            (0, 1, 1),
        ]
        .map(|(x, y, z)| Vector::point_i64(x, y, z));

        let faces: [[usize; 4]; 6] = [
            [0, 3, 2, 1],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
            [0, 4, 7, 3],
            [1, 2, 6, 5],
        ];

        let surfaces: Vec<Surface> = faces
            .iter()
            .map(|[a, b, c, d]| {
                let p = |i: &usize| corners[*i].clone();
                Surface::from_triangles(vec![
                    Triangle::new(p(a), p(b), p(c)),
                    Triangle::new(p(a), p(c), p(d)),
                ])
            })
            .collect();

        Primitive { kind: PrimitiveKind::Cube, surfaces: surfaces.into(), stamp: next_stamp() }
    }

    /// The unit cylinder with a wall segment every `step` degrees.
    ///
    /// Surfaces are, in order: the top cap (z = 1), the bottom cap (z = 0) and
    /// the side wall. Rim points come from the rational circle table, so they lie
    /// exactly on the unit circle.
    ///
    /// # Errors
    /// [`CsgError::InvalidStep`] unless `step` is in `1..=120` and divides 360.
    pub fn cylinder(step: u32) -> Result<Self, CsgError> {
        if !is_valid_step(step) {
            return Err(CsgError::InvalidStep(step));
        }
        Ok(Self::cylinder_unchecked(step))
    }

    fn cylinder_unchecked(step: u32) -> Self {
        let rim = |degrees: i32, z: i64| {
            let angle = find_rational_angle(degrees);
            Vector::point(angle.cos(), angle.sin(), integer(z))
        };
        let step = step as i32;
        let angles = (0..360).step_by(step as usize);

        let top: Surface = angles
            .clone()
            .map(|a| Triangle::new(rim(a, 1), rim(a + step, 1), Vector::point_i64(0, 0, 1)))
            .collect();

        let bottom: Surface = angles
            .clone()
            .map(|a| Triangle::new(rim(a, 0), rim(a - step, 0), Vector::origin()))
            .collect();

        let mut side = Surface::new();
        for a in angles {
            let b = a + step;
            let (a0, a1, b0, b1) = (rim(a, 0), rim(a, 1), rim(b, 0), rim(b, 1));
            side.push(Triangle::new(b1.clone(), a1, a0.clone()));
            side.push(Triangle::new(a0, b0, b1));
        }

        Primitive {
            kind: PrimitiveKind::Cylinder { step: step as u32 },
            surfaces: vec![top, bottom, side].into(),
            stamp: next_stamp(),
        }
    }

    pub const fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    fn inside_cube(point: &Vector) -> bool {
        let (zero, one) = (Rational::zero(), Rational::one());
        [point.x(), point.y(), point.z()].into_iter().all(|c| *c >= zero && *c <= one)
    }

    /// Height range first, then the circumscribed circle, then an exact test
    /// against the rim polygon: a ray from the axis towards `point` must meet
    /// the rim no nearer than `point` itself. A point exactly on a rim edge
    /// counts as inside, unlike a strict polygon test.
    fn inside_cylinder(&self, point: &Vector) -> bool {
        let (zero, one) = (Rational::zero(), Rational::one());
        if *point.z() < zero || *point.z() > one {
            return false;
        }
        let radius_squared = point.x() * point.x() + point.y() * point.y();
        if radius_squared > one {
            return false;
        }
        if radius_squared.is_zero() {
            return true;
        }

        let ray = Line::new(Vector::origin(), Vector::point(point.x().clone(), point.y().clone(), zero.clone()));
        let Some(bottom) = self.surfaces.get(CYLINDER_BOTTOM) else {
            return false;
        };
        bottom
            .iter()
            .map(|triangle| line_intersection(&ray, &triangle.edge(0)))
            .find(|hit| hit.meets_at_point() && hit.inside_line[1] && hit.t[0] > zero)
            .is_some_and(|hit| hit.t[0] >= one)
    }
}

impl Body for Primitive {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        Ok(Rc::clone(&self.surfaces))
    }

    fn inside(&self, point: &Vector) -> bool {
        match self.kind {
            PrimitiveKind::Cube => Self::inside_cube(point),
            PrimitiveKind::Cylinder { .. } => self.inside_cylinder(point),
        }
    }

    fn revision(&self) -> u64 {
        self.stamp
    }
}

/// A fresh unit cube node.
pub fn unit_cube() -> SolidRef {
    SolidRef::new(Solid::Primitive(Primitive::cube()))
}

/// A fresh unit cylinder node at the configured step, see [`cylinder_step`].
pub fn unit_cylinder() -> SolidRef {
    SolidRef::new(Solid::Primitive(Primitive::cylinder_unchecked(cylinder_step())))
}

/// A fresh unit cylinder node with an explicit step.
pub fn unit_cylinder_with_step(step: u32) -> Result<SolidRef, CsgError> {
    Ok(SolidRef::new(Solid::Primitive(Primitive::cylinder(step)?)))
}
