//! Exact triangle-mesh kernel: vectors, planes, segments, triangles, surfaces
//! and triangle/triangle slicing.

pub mod line;
pub mod plane;
pub mod slice;
pub mod surface;
pub mod triangle;
pub mod vector;

pub use line::{Line, LineIntersection, line_intersection};
pub use plane::{Plane, plane_intersection};
pub use slice::{slice_triangle, slice_triangles};
pub use surface::{Surface, dedup_coincident};
pub use triangle::Triangle;
pub use vector::{Vector, cross, dot, magnitude_squared};
