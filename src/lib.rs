//! **Constructive Solid Geometry (CSG)** on triangle meshes in exact rational
//! arithmetic.
//!
//! Every coordinate is a [`Rational`](rational_types::Rational), so coplanarity,
//! containment and intersection tests are decided exactly. Solids form a tree
//! of shared nodes ([`SolidRef`]):
//!
//! - **Primitives**: [`unit_cube`], [`unit_cylinder`]
//! - **Transforms**: translate, scale, rotate (whole degrees, exact sine/cosine)
//!   or an arbitrary affine matrix
//! - **Collection**: union of any number of children
//! - **Boolean**: both operands cut along each other; **Intersection** keeps
//!   the cut boundary lying inside the other operand
//!
//! Derived meshes are built on first read and rebuilt only after something
//! below the node changed.
//!
//! ```
//! use exactcsg::{Body, Vector, unit_cube};
//! use exactcsg::rational_types::rational;
//!
//! let cube = unit_cube();
//! let moved = cube.translate(Vector::direction(rational(1, 2), rational(0, 1), rational(0, 1)));
//! let both = cube.intersection(&moved);
//! assert!(both.inside(&Vector::point(rational(3, 4), rational(1, 2), rational(1, 2))));
//! assert!(!both.inside(&Vector::point(rational(1, 4), rational(1, 2), rational(1, 2))));
//! ```
//!
//! # Configuration
//! The default cylinder step (degrees per wall segment) can be set at build time
//! with `EXACTCSG_CYLINDER_STEP` or once at runtime with
//! [`set_cylinder_step`](rational_types::set_cylinder_step).

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::all)]

pub mod affine;
pub mod errors;
pub mod mesh;
pub mod rational_circle;
pub mod rational_types;
pub mod solid;
pub mod traits;

pub use errors::CsgError;
pub use mesh::{Line, Plane, Surface, Triangle, Vector};
pub use solid::{Solid, SolidRef, unit_cube, unit_cylinder, unit_cylinder_with_step};
pub use traits::Body;
