//! Exact 4x4 affine matrices: construction, application and inversion.
//!
//! Matrices act on homogeneous column vectors, so a point (`w = 1`) picks up
//! the translation column and a direction (`w = 0`) does not.

use crate::errors::CsgError;
use crate::mesh::surface::Surface;
use crate::mesh::triangle::Triangle;
use crate::mesh::vector::Vector;
use crate::rational_circle::find_rational_angle;
use crate::rational_types::Rational;
use nalgebra::{Matrix4, Vector4};
use num_traits::{One, Zero};

/// A 4x4 affine matrix over exact rationals.
pub type Affine = Matrix4<Rational>;

pub fn identity() -> Affine {
    Matrix4::from_fn(|r, c| if r == c { Rational::one() } else { Rational::zero() })
}

/// Identity plus `shift` in the translation column.
pub fn translation(shift: &Vector) -> Affine {
    let mut m = identity();
    for r in 0..3 {
        m[(r, 3)] = shift.get(r).clone();
    }
    m
}

/// Diagonal scaling by `factors.x`, `factors.y`, `factors.z`.
pub fn scaling(factors: &Vector) -> Affine {
    let mut m = identity();
    for r in 0..3 {
        m[(r, r)] = factors.get(r).clone();
    }
    m
}

/// Rotation by `degrees` about `axis` (expected to be of unit length), using
/// the exact sine and cosine from the rational circle table.
pub fn rotation(axis: &Vector, degrees: i32) -> Affine {
    let angle = find_rational_angle(degrees);
    rotation_from_sin_cos(axis, &angle.sin(), &angle.cos())
}

/// Rodrigues' formula: `R = cos·I + sin·[a]× + (1 - cos)·a·aᵀ`.
pub fn rotation_from_sin_cos(axis: &Vector, sin: &Rational, cos: &Rational) -> Affine {
    let one_minus_cos = Rational::one() - cos;
    let a = [axis.x(), axis.y(), axis.z()];
    // Skew-symmetric cross-product matrix of the axis.
    let k = |r: usize, c: usize| -> Rational {
        match (r, c) {
            (0, 1) => -a[2].clone(),
            (0, 2) => a[1].clone(),
            (1, 0) => a[2].clone(),
            (1, 2) => -a[0].clone(),
            (2, 0) => -a[1].clone(),
            (2, 1) => a[0].clone(),
            _ => Rational::zero(),
        }
    };
    Matrix4::from_fn(|r, c| {
        if r == 3 || c == 3 {
            return if r == c { Rational::one() } else { Rational::zero() };
        }
        let diagonal = if r == c { cos.clone() } else { Rational::zero() };
        diagonal + sin * k(r, c) + &one_minus_cos * a[r] * a[c]
    })
}

/// `m · v` for a homogeneous vector.
pub fn apply(m: &Affine, v: &Vector) -> Vector {
    Vector(Vector4::from_fn(|r, _| {
        (0..4).fold(Rational::zero(), |sum, c| sum + &m[(r, c)] * v.get(c))
    }))
}

/// `a · b`: apply `b` first, then `a`.
pub fn compose(a: &Affine, b: &Affine) -> Affine {
    Matrix4::from_fn(|r, c| (0..4).fold(Rational::zero(), |sum, k| sum + &a[(r, k)] * &b[(k, c)]))
}

pub fn transform_triangle(m: &Affine, triangle: &Triangle) -> Triangle {
    let [p0, p1, p2] = triangle.points();
    Triangle::new(apply(m, p0), apply(m, p1), apply(m, p2))
}

pub fn transform_surface(m: &Affine, surface: &Surface) -> Surface {
    surface.iter().map(|t| transform_triangle(m, t)).collect()
}

/// Invert `m` by LU decomposition with partial pivoting followed by forward
/// and backward substitution against each unit column.
///
/// # Errors
/// [`CsgError::SingularMatrix`] when no non-zero pivot exists for some column.
pub fn invert(m: &Affine) -> Result<Affine, CsgError> {
    let mut lu = m.clone();
    let mut permutation = [0usize, 1, 2, 3];

    for k in 0..4 {
        let pivot = (k..4).find(|&r| !lu[(r, k)].is_zero()).ok_or(CsgError::SingularMatrix)?;
        if pivot != k {
            lu.swap_rows(k, pivot);
            permutation.swap(k, pivot);
        }
        for r in k + 1..4 {
            let factor = &lu[(r, k)] / &lu[(k, k)];
            for c in k + 1..4 {
                let reduced = &lu[(r, c)] - &factor * &lu[(k, c)];
                lu[(r, c)] = reduced;
            }
            lu[(r, k)] = factor;
        }
    }

    let mut inverse = identity();
    for column in 0..4 {
        // Forward substitution, L has an implicit unit diagonal.
        let mut y: [Rational; 4] = std::array::from_fn(|_| Rational::zero());
        for i in 0..4 {
            let b = if permutation[i] == column { Rational::one() } else { Rational::zero() };
            y[i] = (0..i).fold(b, |acc, c| acc - &lu[(i, c)] * &y[c]);
        }
        // Backward substitution against U.
        let mut x: [Rational; 4] = std::array::from_fn(|_| Rational::zero());
        for i in (0..4).rev() {
            let partial = (i + 1..4).fold(y[i].clone(), |acc, c| acc - &lu[(i, c)] * &x[c]);
            x[i] = partial / &lu[(i, i)];
        }
        for (row, value) in x.into_iter().enumerate() {
            inverse[(row, column)] = value;
        }
    }
    Ok(inverse)
}
