use crate::errors::CsgError;
use crate::mesh::surface::Surface;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::Vector;
use std::rc::Rc;

/// Read-only view of a solid: its boundary mesh and a containment test.
pub trait Body {
    /// The boundary surfaces, rebuilt first if anything below this node changed.
    fn surfaces(&self) -> Result<Rc<[Surface]>, CsgError>;

    /// Point containment, boundary inclusive.
    fn inside(&self, point: &Vector) -> bool;

    /// Monotonic stamp of the last change to this node or anything below it.
    fn revision(&self) -> u64;

    fn surface_count(&self) -> Result<usize, CsgError> {
        Ok(self.surfaces()?.len())
    }

    /// Surface `index` (`index < surface_count()`).
    fn surface(&self, index: usize) -> Result<Surface, CsgError> {
        let surfaces = self.surfaces()?;
        surfaces
            .get(index)
            .cloned()
            .ok_or(CsgError::IndexOutOfRange { index, len: surfaces.len() })
    }

    /// Every triangle of every surface, in enumeration order.
    fn triangles(&self) -> Result<Vec<Triangle>, CsgError> {
        Ok(self.surfaces()?.iter().flat_map(|s| s.iter().cloned()).collect())
    }

    fn triangle_count(&self) -> Result<usize, CsgError> {
        Ok(self.surfaces()?.iter().map(Surface::len).sum())
    }
}
