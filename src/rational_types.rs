// Our exact scalar type:
pub use num_rational::BigRational as Rational;

use num_bigint::BigInt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Build the exact fraction `numer / denom`.
///
/// # Panics
/// If `denom` is zero.
pub fn rational(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Build an integral [`Rational`].
pub fn integer(value: i64) -> Rational {
    Rational::from_integer(BigInt::from(value))
}

/// Default angular step (degrees) between cylinder wall segments.
pub const DEFAULT_CYLINDER_STEP: u32 = 5;

/// Lazily-initialized cylinder step used by [`crate::solid::shapes::unit_cylinder`].
///  1) **Build-time**: set env var `EXACTCSG_CYLINDER_STEP` (e.g. `EXACTCSG_CYLINDER_STEP=10 cargo build`)
///  2) **Runtime**: call [`set_cylinder_step`] once before building any cylinder
static CYLINDER_STEP_CELL: OnceLock<u32> = OnceLock::new();

/// A step is usable when it splits a full turn into at least 3 equal wedges.
pub const fn is_valid_step(step: u32) -> bool {
    step >= 1 && step <= 120 && 360 % step == 0
}

/// Returns the current cylinder step.
/// If not set yet, it tries `EXACTCSG_CYLINDER_STEP` and falls back to
/// [`DEFAULT_CYLINDER_STEP`].
pub fn cylinder_step() -> u32 {
    *CYLINDER_STEP_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("EXACTCSG_CYLINDER_STEP") {
            if let Ok(value) = u32::from_str(environment_variable) {
                if is_valid_step(value) {
                    return value;
                }
            }
        }
        DEFAULT_CYLINDER_STEP
    })
}

/// Set the cylinder step programmatically once (subsequent calls are ignored,
/// invalid steps are rejected).
pub fn set_cylinder_step(step: u32) -> bool {
    is_valid_step(step) && CYLINDER_STEP_CELL.set(step).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rational_is_normalized() {
        assert_eq!(rational(2, 4), rational(1, 2));
        assert_eq!(rational(3, -3), integer(-1));
    }

    #[test]
    fn step_validation() {
        assert!(is_valid_step(5));
        assert!(is_valid_step(120));
        assert!(!is_valid_step(0));
        assert!(!is_valid_step(7));
        assert!(!is_valid_step(180));
    }
}
