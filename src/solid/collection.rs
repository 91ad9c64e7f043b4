//! N-ary union node.

use crate::errors::CsgError;
use crate::mesh::surface::Surface;
use crate::mesh::vector::Vector;
use crate::solid::{Cached, SolidRef, children_revision, next_stamp};
use crate::traits::Body;
use std::rc::Rc;
use tracing::trace;

/// An ordered list of children whose meshes are simply concatenated.
#[derive(Debug)]
pub struct Collection {
    children: Vec<SolidRef>,
    stamp: u64,
    mesh: Cached<[Surface]>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::from_children(Vec::new())
    }
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_children(children: Vec<SolidRef>) -> Self {
        Collection { children, stamp: next_stamp(), mesh: Cached::default() }
    }

    pub fn children(&self) -> &[SolidRef] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn push(&mut self, child: SolidRef) {
        self.children.push(child);
        self.stamp = next_stamp();
    }

    pub fn remove(&mut self, index: usize) -> Result<SolidRef, CsgError> {
        let len = self.children.len();
        if index >= len {
            return Err(CsgError::IndexOutOfRange { index, len });
        }
        self.stamp = next_stamp();
        Ok(self.children.remove(index))
    }
}

impl Body for Collection {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.mesh.get_or_rebuild(self.revision(), || {
            trace!(children = self.children.len(), "rebuilding union mesh");
            let mut surfaces = Vec::new();
            for child in &self.children {
                surfaces.extend(child.surfaces()?.iter().cloned());
            }
            Ok(surfaces.into())
        })
    }

    fn inside(&self, point: &Vector) -> bool {
        self.children.iter().any(|child| child.inside(point))
    }

    fn revision(&self) -> u64 {
        self.stamp.max(children_revision(&self.children))
    }

    fn surface_count(&self) -> Result<usize, CsgError> {
        self.children.iter().try_fold(0, |total, child| Ok(total + child.surface_count()?))
    }

    /// Walks the children in order, skipping past each child's surfaces.
    fn surface(&self, index: usize) -> Result<Surface, CsgError> {
        let mut remaining = index;
        for child in &self.children {
            let count = child.surface_count()?;
            if remaining < count {
                return child.surface(remaining);
            }
            remaining -= count;
        }
        Err(CsgError::IndexOutOfRange { index, len: index - remaining })
    }
}
