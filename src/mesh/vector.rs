//! Homogeneous rational vectors: points carry `w = 1`, directions carry `w = 0`.
//!
//! Arithmetic is component-wise over all four components, so the convention
//! survives the affine combinations the kernel performs (`point - point` is a
//! direction, `point + direction` is a point, the mean of three points is a
//! point). [`dot`], [`cross`] and [`magnitude_squared`] only read the
//! directional `x, y, z` part, and [`cross`] always yields a direction.

use crate::rational_types::{Rational, integer};
use nalgebra::Vector4;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub};

/// A homogeneous 4-component exact vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Vector(pub Vector4<Rational>);

impl Vector {
    /// A point `(x, y, z, 1)`.
    pub fn point(x: Rational, y: Rational, z: Rational) -> Self {
        Vector(Vector4::new(x, y, z, Rational::one()))
    }

    /// A direction `(x, y, z, 0)`.
    pub fn direction(x: Rational, y: Rational, z: Rational) -> Self {
        Vector(Vector4::new(x, y, z, Rational::zero()))
    }

    /// Integer-coordinate point, handy for primitives and tests.
    pub fn point_i64(x: i64, y: i64, z: i64) -> Self {
        Self::point(integer(x), integer(y), integer(z))
    }

    /// Integer-coordinate direction.
    pub fn direction_i64(x: i64, y: i64, z: i64) -> Self {
        Self::direction(integer(x), integer(y), integer(z))
    }

    /// The origin point.
    pub fn origin() -> Self {
        Self::point_i64(0, 0, 0)
    }

    /// The zero direction.
    pub fn zero() -> Self {
        Self::direction_i64(0, 0, 0)
    }

    pub fn x(&self) -> &Rational {
        &self.0[0]
    }

    pub fn y(&self) -> &Rational {
        &self.0[1]
    }

    pub fn z(&self) -> &Rational {
        &self.0[2]
    }

    pub fn w(&self) -> &Rational {
        &self.0[3]
    }

    /// Component `i` (0..4).
    ///
    /// # Panics
    /// If `i` is 4 or more.
    pub fn get(&self, i: usize) -> &Rational {
        &self.0[i]
    }

    /// # Panics
    /// If `i` is 4 or more.
    pub fn set(&mut self, i: usize, value: Rational) {
        self.0[i] = value;
    }

    pub fn is_point(&self) -> bool {
        self.w().is_one()
    }

    pub fn is_direction(&self) -> bool {
        self.w().is_zero()
    }

    /// True when the directional `x, y, z` part is the zero vector.
    pub fn is_zero_direction(&self) -> bool {
        self.x().is_zero() && self.y().is_zero() && self.z().is_zero()
    }

    /// Multiply every component (including `w`) by `t`.
    pub fn scale(&self, t: &Rational) -> Vector {
        Vector(self.0.map(|e| e * t))
    }

    /// Divide every component (including `w`) by a non-zero `t`.
    pub fn divide(&self, t: &Rational) -> Vector {
        debug_assert!(!t.is_zero(), "division of a vector by zero");
        Vector(self.0.map(|e| e / t))
    }

    /// Same directional part, forced to `w = 0`.
    pub fn as_direction(&self) -> Vector {
        Self::direction(self.x().clone(), self.y().clone(), self.z().clone())
    }

    pub fn dot(&self, other: &Vector) -> Rational {
        dot(self, other)
    }

    pub fn cross(&self, other: &Vector) -> Vector {
        cross(self, other)
    }
}

/// Dot product of the directional parts.
pub fn dot(a: &Vector, b: &Vector) -> Rational {
    a.x() * b.x() + a.y() * b.y() + a.z() * b.z()
}

/// Cross product of the directional parts; the result is a direction.
pub fn cross(a: &Vector, b: &Vector) -> Vector {
    Vector::direction(
        a.y() * b.z() - a.z() * b.y(),
        a.z() * b.x() - a.x() * b.z(),
        a.x() * b.y() - a.y() * b.x(),
    )
}

/// Squared length of the directional part.
pub fn magnitude_squared(v: &Vector) -> Rational {
    dot(v, v)
}

impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Vector {
        Vector(&self.0 + &rhs.0)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector(self.0 + rhs.0)
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        self.0 += &rhs.0;
    }
}

impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Vector {
        Vector(&self.0 - &rhs.0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector(self.0 - rhs.0)
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector(-&self.0)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{},{},{},{}>", self.x(), self.y(), self.z(), self.w())
    }
}
