//! Affine transform nodes over a shared child.

use crate::affine::{self, Affine};
use crate::errors::CsgError;
use crate::mesh::surface::Surface;
use crate::mesh::vector::Vector;
use crate::solid::{Cached, SolidRef, children_revision, next_stamp};
use crate::traits::Body;
use std::cell::OnceCell;
use std::rc::Rc;
use tracing::{trace, warn};

/// Where the affine matrix came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformKind {
    /// An arbitrary matrix set directly.
    General,
    Translate { shift: Vector },
    Scale { factors: Vector },
    /// Rotation about a unit `axis` by whole degrees.
    Rotate { axis: Vector, degrees: i32 },
}

/// A child solid seen through an affine matrix.
///
/// The transformed mesh and the inverse matrix are both derived lazily; the
/// mesh is rebuilt when this node or anything below it changes, the inverse
/// when the matrix changes.
#[derive(Debug)]
pub struct Transform {
    child: Option<SolidRef>,
    kind: TransformKind,
    affine: Affine,
    inverse: OnceCell<Option<Affine>>,
    stamp: u64,
    mesh: Cached<[Surface]>,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            child: None,
            kind: TransformKind::General,
            affine: affine::identity(),
            inverse: OnceCell::new(),
            stamp: next_stamp(),
            mesh: Cached::default(),
        }
    }
}

impl Transform {
    /// General transform of `child` by `affine`.
    pub fn new(child: SolidRef, affine: Affine) -> Self {
        let mut transform = Self::default();
        transform.child = Some(child);
        transform.affine = affine;
        transform
    }

    pub fn translate(child: SolidRef, shift: Vector) -> Self {
        let mut transform = Self::default();
        transform.child = Some(child);
        transform.set_shift(shift);
        transform
    }

    pub fn scale(child: SolidRef, factors: Vector) -> Self {
        let mut transform = Self::default();
        transform.child = Some(child);
        transform.set_factors(factors);
        transform
    }

    pub fn rotate(child: SolidRef, axis: Vector, degrees: i32) -> Self {
        let mut transform = Self::default();
        transform.child = Some(child);
        transform.set_rotation(axis, degrees);
        transform
    }

    pub fn child(&self) -> Option<&SolidRef> {
        self.child.as_ref()
    }

    pub fn set_child(&mut self, child: SolidRef) {
        self.child = Some(child);
        self.stamp = next_stamp();
    }

    pub const fn kind(&self) -> &TransformKind {
        &self.kind
    }

    pub const fn affine(&self) -> &Affine {
        &self.affine
    }

    /// Replace the matrix; the node becomes a general transform.
    pub fn set_affine(&mut self, affine: Affine) {
        self.kind = TransformKind::General;
        self.replace_affine(affine);
    }

    /// Make this a translation by `shift`.
    pub fn set_shift(&mut self, shift: Vector) {
        let m = affine::translation(&shift);
        self.kind = TransformKind::Translate { shift };
        self.replace_affine(m);
    }

    /// Make this a scaling by `factors`.
    pub fn set_factors(&mut self, factors: Vector) {
        let m = affine::scaling(&factors);
        self.kind = TransformKind::Scale { factors };
        self.replace_affine(m);
    }

    /// Rotate about `axis`, keeping the current angle (0 if this was not a rotation).
    pub fn set_axis(&mut self, axis: Vector) {
        let degrees = match &self.kind {
            TransformKind::Rotate { degrees, .. } => *degrees,
            _ => 0,
        };
        self.set_rotation(axis, degrees);
    }

    /// Rotate by `degrees`, keeping the current axis (+z if this was not a rotation).
    pub fn set_angle(&mut self, degrees: i32) {
        let axis = match &self.kind {
            TransformKind::Rotate { axis, .. } => axis.clone(),
            _ => Vector::direction_i64(0, 0, 1),
        };
        self.set_rotation(axis, degrees);
    }

    fn set_rotation(&mut self, axis: Vector, degrees: i32) {
        let m = affine::rotation(&axis, degrees);
        self.kind = TransformKind::Rotate { axis, degrees };
        self.replace_affine(m);
    }

    fn replace_affine(&mut self, affine: Affine) {
        self.affine = affine;
        self.inverse = OnceCell::new();
        self.stamp = next_stamp();
    }

    /// The inverse matrix, computed on first use after each change.
    ///
    /// # Errors
    /// [`CsgError::SingularMatrix`] if the matrix has no inverse.
    pub fn inverse(&self) -> Result<&Affine, CsgError> {
        self.inverse
            .get_or_init(|| {
                trace!("inverting transform matrix");
                affine::invert(&self.affine).ok()
            })
            .as_ref()
            .ok_or(CsgError::SingularMatrix)
    }
}

impl Body for Transform {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.mesh.get_or_rebuild(self.revision(), || {
            let Some(child) = &self.child else {
                return Ok(Rc::from(Vec::new()));
            };
            trace!("rebuilding transformed mesh");
            let transformed: Vec<Surface> = child
                .surfaces()?
                .iter()
                .map(|surface| affine::transform_surface(&self.affine, surface))
                .collect();
            Ok(transformed.into())
        })
    }

    /// Maps `point` back into the child's frame; a singular matrix has no
    /// inside.
    fn inside(&self, point: &Vector) -> bool {
        let Some(child) = &self.child else {
            return false;
        };
        match self.inverse() {
            Ok(inverse) => child.inside(&affine::apply(inverse, point)),
            Err(error) => {
                warn!(%error, "containment query on a non-invertible transform");
                false
            }
        }
    }

    fn revision(&self) -> u64 {
        self.stamp.max(children_revision(&self.child))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rational_types::{integer, rational};
    use crate::solid::unit_cube;

    #[test]
    fn translated_cube_moves_every_point() {
        let t = Transform::translate(unit_cube(), Vector::direction_i64(2, 0, 0));
        let mesh = t.surfaces().unwrap();
        assert_eq!(mesh.len(), 6);
        for surface in mesh.iter() {
            for triangle in surface {
                for p in triangle.points() {
                    assert!(*p.x() >= integer(2) && *p.x() <= integer(3));
                }
            }
        }
        assert!(t.inside(&Vector::point(rational(5, 2), rational(1, 2), rational(1, 2))));
        assert!(!t.inside(&Vector::point(rational(1, 2), rational(1, 2), rational(1, 2))));
    }

    #[test]
    fn setters_refresh_mesh_and_inverse() {
        let mut t = Transform::translate(unit_cube(), Vector::direction_i64(1, 0, 0));
        let before = t.surfaces().unwrap();
        let probe = Vector::point(rational(3, 2), rational(1, 2), rational(1, 2));
        assert!(t.inside(&probe));

        t.set_shift(Vector::direction_i64(0, 5, 0));
        let after = t.surfaces().unwrap();
        assert!(!Rc::ptr_eq(&before, &after));
        assert!(!t.inside(&probe));
        assert_eq!(t.kind(), &TransformKind::Translate { shift: Vector::direction_i64(0, 5, 0) });
    }

    #[test]
    fn unchanged_node_reuses_mesh() {
        let t = Transform::scale(unit_cube(), Vector::direction_i64(2, 2, 2));
        let first = t.surfaces().unwrap();
        let second = t.surfaces().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn angle_and_axis_setters() {
        let mut t = Transform::rotate(unit_cube(), Vector::direction_i64(0, 0, 1), 0);
        t.set_angle(90);
        let probe = Vector::point(rational(-1, 2), rational(1, 2), rational(1, 2));
        assert!(t.inside(&probe));
        t.set_axis(Vector::direction_i64(1, 0, 0));
        assert_eq!(t.kind(), &TransformKind::Rotate { axis: Vector::direction_i64(1, 0, 0), degrees: 90 });
        assert!(!t.inside(&probe));
    }

    #[test]
    fn singular_transform_has_no_inside() {
        let t = Transform::scale(unit_cube(), Vector::direction_i64(1, 1, 0));
        assert_eq!(t.inverse(), Err(CsgError::SingularMatrix));
        assert!(!t.inside(&Vector::point_i64(0, 0, 0)));
        assert_eq!(t.surface_count(), Ok(6));
    }

    #[test]
    fn childless_transform_is_empty() {
        let t = Transform::default();
        assert_eq!(t.surface_count(), Ok(0));
        assert!(!t.inside(&Vector::origin()));
    }
}
