//! Binary CSG nodes: the raw two-way cut and the intersection built on it.

use crate::errors::CsgError;
use crate::mesh::slice::slice_triangles;
use crate::mesh::surface::Surface;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::Vector;
use crate::solid::{Cached, SolidRef, children_revision, next_stamp};
use crate::traits::Body;
use std::rc::Rc;
use tracing::{debug, trace};

/// Both operands' surfaces after slicing each by the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutSurfaces {
    /// Every surface of `a`, cut by all triangles of `b`.
    pub a_by_b: Vec<Surface>,
    /// Every surface of `b`, cut by all triangles of `a`.
    pub b_by_a: Vec<Surface>,
}

fn cut_by(surfaces: &[Surface], cutters: &[Triangle]) -> Result<Vec<Surface>, CsgError> {
    let mut cut = Vec::with_capacity(surfaces.len());
    for surface in surfaces {
        cut.push(Surface::from_triangles(slice_triangles(surface.triangles(), cutters)?));
    }
    Ok(cut)
}

/// Operands `a` and `b`, exposed as both meshes cut along each other.
///
/// The mesh is `a`'s cut surfaces followed by `b`'s. With either operand
/// unset the mesh is empty.
#[derive(Debug)]
pub struct Boolean {
    a: Option<SolidRef>,
    b: Option<SolidRef>,
    stamp: u64,
    cuts: Cached<CutSurfaces>,
    mesh: Cached<[Surface]>,
}

impl Default for Boolean {
    fn default() -> Self {
        Boolean { a: None, b: None, stamp: next_stamp(), cuts: Cached::default(), mesh: Cached::default() }
    }
}

impl Boolean {
    pub fn new(a: SolidRef, b: SolidRef) -> Self {
        Boolean { a: Some(a), b: Some(b), ..Self::default() }
    }

    pub fn a(&self) -> Option<&SolidRef> {
        self.a.as_ref()
    }

    pub fn b(&self) -> Option<&SolidRef> {
        self.b.as_ref()
    }

    pub fn set_a(&mut self, a: SolidRef) {
        self.a = Some(a);
        self.stamp = next_stamp();
    }

    pub fn set_b(&mut self, b: SolidRef) {
        self.b = Some(b);
        self.stamp = next_stamp();
    }

    /// Both operands, if both are set.
    pub fn operands(&self) -> Option<(&SolidRef, &SolidRef)> {
        self.a.as_ref().zip(self.b.as_ref())
    }

    /// The two-way slicing result, recomputed when either operand changed.
    pub fn cut_surfaces(&self) -> Result<Rc<CutSurfaces>, CsgError> {
        self.cuts.get_or_rebuild(self.revision(), || {
            let Some((a, b)) = self.operands() else {
                return Ok(Rc::new(CutSurfaces::default()));
            };
            let a_surfaces = a.surfaces()?;
            let b_surfaces = b.surfaces()?;
            let a_triangles: Vec<Triangle> = a.triangles()?;
            let b_triangles: Vec<Triangle> = b.triangles()?;

            let cuts = CutSurfaces { a_by_b: cut_by(&a_surfaces, &b_triangles)?, b_by_a: cut_by(&b_surfaces, &a_triangles)? };
            debug!(
                a_triangles = a_triangles.len(),
                b_triangles = b_triangles.len(),
                a_fragments = cuts.a_by_b.iter().map(Surface::len).sum::<usize>(),
                b_fragments = cuts.b_by_a.iter().map(Surface::len).sum::<usize>(),
                "cut operands against each other"
            );
            Ok(Rc::new(cuts))
        })
    }
}

impl Body for Boolean {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.mesh.get_or_rebuild(self.revision(), || {
            let cuts = self.cut_surfaces()?;
            let surfaces: Vec<Surface> = cuts.a_by_b.iter().chain(&cuts.b_by_a).cloned().collect();
            Ok(surfaces.into())
        })
    }

    /// The overlay covers whatever either operand covers.
    fn inside(&self, point: &Vector) -> bool {
        self.a.iter().chain(&self.b).any(|child| child.inside(point))
    }

    fn revision(&self) -> u64 {
        self.stamp.max(children_revision(self.a.iter().chain(&self.b)))
    }
}

/// The part of each operand's cut boundary that lies inside the other operand.
///
/// A fragment of `a` is kept when its centroid is inside the original `b`, and
/// vice versa. Surfaces left with no fragments are dropped. Coincident faces
/// of the two operands both survive; see [`crate::mesh::surface::dedup_coincident`].
#[derive(Debug, Default)]
pub struct Intersection {
    pair: Boolean,
    mesh: Cached<[Surface]>,
}

fn keep_inside(surfaces: &[Surface], other: &SolidRef) -> Vec<Surface> {
    surfaces
        .iter()
        .map(|surface| surface.iter().filter(|t| other.inside(&t.center())).cloned().collect::<Surface>())
        .filter(|surface| !surface.is_empty())
        .collect()
}

impl Intersection {
    pub fn new(a: SolidRef, b: SolidRef) -> Self {
        Intersection { pair: Boolean::new(a, b), mesh: Cached::default() }
    }

    pub const fn pair(&self) -> &Boolean {
        &self.pair
    }

    /// Operand access; changes through it invalidate this node too.
    pub fn pair_mut(&mut self) -> &mut Boolean {
        &mut self.pair
    }

    pub fn set_a(&mut self, a: SolidRef) {
        self.pair.set_a(a);
    }

    pub fn set_b(&mut self, b: SolidRef) {
        self.pair.set_b(b);
    }

    pub fn cut_surfaces(&self) -> Result<Rc<CutSurfaces>, CsgError> {
        self.pair.cut_surfaces()
    }
}

impl Body for Intersection {
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError> {
        self.mesh.get_or_rebuild(self.revision(), || {
            let Some((a, b)) = self.pair.operands() else {
                return Ok(Rc::from(Vec::new()));
            };
            let cuts = self.pair.cut_surfaces()?;
            trace!("filtering cut surfaces for intersection");
            let mut surfaces = keep_inside(&cuts.a_by_b, b);
            surfaces.extend(keep_inside(&cuts.b_by_a, a));
            Ok(surfaces.into())
        })
    }

    fn inside(&self, point: &Vector) -> bool {
        self.pair.operands().is_some_and(|(a, b)| a.inside(point) && b.inside(point))
    }

    fn revision(&self) -> u64 {
        self.pair.revision()
    }
}
