//! The solid tree: primitives, transforms, unions and boolean pairs.
//!
//! Nodes are shared through [`SolidRef`] handles, so one child may sit under
//! several parents. Every mutation takes a fresh stamp from a process-wide
//! counter; a node's revision is the largest stamp in its subtree, and derived
//! meshes are rebuilt whenever the revision they were built at is out of date.

use crate::affine::Affine;
use crate::errors::CsgError;
use crate::mesh::surface::Surface;
use crate::mesh::vector::Vector;
use crate::traits::Body;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

pub mod boolean;
pub mod collection;
pub mod shapes;
pub mod transform;

pub use boolean::{Boolean, CutSurfaces, Intersection};
pub use collection::Collection;
pub use shapes::{Primitive, PrimitiveKind, unit_cube, unit_cylinder, unit_cylinder_with_step};
pub use transform::{Transform, TransformKind};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

/// A new, strictly larger stamp.
pub fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// A derived value tagged with the revision it was computed at.
#[derive(Debug)]
pub(crate) struct Cached<T: ?Sized> {
    slot: RefCell<Option<(u64, Rc<T>)>>,
}

impl<T: ?Sized> Default for Cached<T> {
    fn default() -> Self {
        Cached { slot: RefCell::new(None) }
    }
}

impl<T: ?Sized> Cached<T> {
    /// The cached value if it was built at `revision`, otherwise the result of
    /// `build`, which then replaces it.
    pub(crate) fn get_or_rebuild(
        &self,
        revision: u64,
        build: impl FnOnce() -> Result<Rc<T>, CsgError>,
    ) -> Result<Rc<T>, CsgError> {
        if let Some((built_at, value)) = &*self.slot.borrow() {
            if *built_at == revision {
                return Ok(Rc::clone(value));
            }
        }
        let value = build()?;
        *self.slot.borrow_mut() = Some((revision, Rc::clone(&value)));
        Ok(value)
    }
}

/// Every kind of node in the tree.
#[derive(Debug)]
pub enum Solid {
    Primitive(Primitive),
    Transform(Transform),
    Collection(Collection),
    Boolean(Boolean),
    Intersection(Intersection),
}

impl Solid {
    fn as_body(&self) -> &dyn Body {
        match self {
            Solid::Primitive(p) => p,
            Solid::Transform(t) => t,
            Solid::Collection(c) => c,
            Solid::Boolean(b) => b,
            Solid::Intersection(i) => i,
        }
    }
}

impl Body for Solid {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.as_body().surfaces()
    }

    fn inside(&self, point: &Vector) -> bool {
        self.as_body().inside(point)
    }

    fn revision(&self) -> u64 {
        self.as_body().revision()
    }

    fn surface_count(&self) -> Result<usize, CsgError> {
        self.as_body().surface_count()
    }

    fn surface(&self, index: usize) -> Result<Surface, CsgError> {
        self.as_body().surface(index)
    }
}

/// Shared, mutable handle to a [`Solid`].
#[derive(Debug, Clone)]
pub struct SolidRef(Rc<RefCell<Solid>>);

impl SolidRef {
    pub fn new(solid: Solid) -> Self {
        SolidRef(Rc::new(RefCell::new(solid)))
    }

    pub fn borrow(&self) -> Ref<'_, Solid> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Solid> {
        self.0.borrow_mut()
    }

    /// True when both handles point at the same node.
    pub fn ptr_eq(&self, other: &SolidRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn as_transform_mut(&self) -> Option<RefMut<'_, Transform>> {
        RefMut::filter_map(self.borrow_mut(), |solid| match solid {
            Solid::Transform(t) => Some(t),
            _ => None,
        })
        .ok()
    }

    pub fn as_collection_mut(&self) -> Option<RefMut<'_, Collection>> {
        RefMut::filter_map(self.borrow_mut(), |solid| match solid {
            Solid::Collection(c) => Some(c),
            _ => None,
        })
        .ok()
    }

    /// The operand pair of a `Boolean` or an `Intersection` node.
    pub fn as_boolean_mut(&self) -> Option<RefMut<'_, Boolean>> {
        RefMut::filter_map(self.borrow_mut(), |solid| match solid {
            Solid::Boolean(b) => Some(b),
            Solid::Intersection(i) => Some(i.pair_mut()),
            _ => None,
        })
        .ok()
    }

    /// A new `Translate` node over this solid.
    pub fn translate(&self, shift: Vector) -> SolidRef {
        SolidRef::new(Solid::Transform(Transform::translate(self.clone(), shift)))
    }

    /// A new `Scale` node over this solid.
    pub fn scale(&self, factors: Vector) -> SolidRef {
        SolidRef::new(Solid::Transform(Transform::scale(self.clone(), factors)))
    }

    /// A new `Rotate` node over this solid; `axis` should be of unit length.
    pub fn rotate(&self, axis: Vector, degrees: i32) -> SolidRef {
        SolidRef::new(Solid::Transform(Transform::rotate(self.clone(), axis, degrees)))
    }

    /// A new general transform node applying `affine` to this solid.
    pub fn transform(&self, affine: Affine) -> SolidRef {
        SolidRef::new(Solid::Transform(Transform::new(self.clone(), affine)))
    }

    /// A new union of this solid and `other`.
    pub fn union(&self, other: &SolidRef) -> SolidRef {
        SolidRef::new(Solid::Collection(Collection::from_children(vec![self.clone(), other.clone()])))
    }

    /// A new node holding this solid and `other` cut against each other.
    pub fn slice(&self, other: &SolidRef) -> SolidRef {
        SolidRef::new(Solid::Boolean(Boolean::new(self.clone(), other.clone())))
    }

    pub fn intersection(&self, other: &SolidRef) -> SolidRef {
        SolidRef::new(Solid::Intersection(Intersection::new(self.clone(), other.clone())))
    }
}

impl From<Solid> for SolidRef {
    fn from(solid: Solid) -> Self {
        SolidRef::new(solid)
    }
}

impl Body for SolidRef {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.borrow().surfaces()
    }

    fn inside(&self, point: &Vector) -> bool {
        self.borrow().inside(point)
    }

    fn revision(&self) -> u64 {
        self.borrow().revision()
    }

    fn surface_count(&self) -> Result<usize, CsgError> {
        self.borrow().surface_count()
    }

    fn surface(&self, index: usize) -> Result<Surface, CsgError> {
        self.borrow().surface(index)
    }
}

/// Largest revision among `children`, `0` when there are none.
pub(crate) fn children_revision<'a>(children: impl IntoIterator<Item = &'a SolidRef>) -> u64 {
    children.into_iter().map(Body::revision).max().unwrap_or(0)
}
