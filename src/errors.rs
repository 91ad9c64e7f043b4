//! Geometry and evaluation errors

/// All the possible failures of the exact geometry kernel and the solid tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsgError {
    /// (DegenerateTriangle) The three points of a triangle are collinear
    #[error("(DegenerateTriangle) The triangle's points are collinear, its normal is zero")]
    DegenerateTriangle,
    /// (DegeneratePlane) A plane has a zero normal
    #[error("(DegeneratePlane) The plane has a zero normal")]
    DegeneratePlane,
    /// (NoIntersection) Two planes are parallel or identical
    #[error("(NoIntersection) The planes are parallel or identical and have no intersection line")]
    NoIntersection,
    /// (DegenerateBarycentric) A barycentric solve hit a zero denominator
    #[error("(DegenerateBarycentric) Barycentric coordinates are undefined for a degenerate triangle")]
    DegenerateBarycentric,
    /// (SingularMatrix) An affine matrix has no inverse
    #[error("(SingularMatrix) The affine matrix is singular and cannot be inverted")]
    SingularMatrix,
    /// (IndexOutOfRange) Enumeration index past the end
    #[error("(IndexOutOfRange) Index {index} is out of range (len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// (InvalidStep) Cylinder angular step does not evenly divide a full turn
    #[error("(InvalidStep) Angular step {0} must be in 1..=120 and divide 360")]
    InvalidStep(u32),
}
