//! The real number contract.
//!
//! Every series and functional equation in the engine is generic over a
//! type implementing [`Real`]. The trait asks for field arithmetic, an
//! ordering, the handful of elementary functions the expansions need, and
//! a working precision that can be read and raised.

use std::f64::consts::{LOG2_10, PI};
use std::fmt;
use std::ops::Neg;

use num_traits::Num;
use polylogs_integers::{Integer, Rational};

use crate::BigFloat;

/// Number of bits needed to carry `digits` significant decimal digits.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bits_for_digits(digits: u32) -> usize {
    (f64::from(digits) * LOG2_10).ceil() as usize
}

/// A real number type the polylogarithm engine can compute with.
///
/// # Laws
///
/// - `Num` arithmetic rounds to the larger precision of the two operands
/// - `atan2` returns the principal value in (-pi, pi]; a zero imaginary
///   part is treated as +0 whatever its sign
/// - `epsilon(bits)` is never smaller than the type's own unit roundoff
pub trait Real:
    Clone + fmt::Debug + fmt::Display + PartialOrd + Num + Neg<Output = Self> + Send + Sync + 'static
{
    /// Largest precision the type can represent, `None` if unbounded.
    const MAX_BITS: Option<usize>;

    /// Decimal digits used when the caller does not ask for a precision.
    const DEFAULT_DIGITS: u32;

    /// Converts an integer at the given precision.
    fn from_i64(value: i64, bits: usize) -> Self;

    /// Converts a finite double at the given precision.
    ///
    /// Returns `None` for NaN and infinities.
    fn from_f64(value: f64, bits: usize) -> Option<Self>;

    /// Rounds an arbitrary precision value into this type.
    fn from_big(value: &BigFloat) -> Self;

    /// Converts an exact integer at the given precision.
    fn from_integer(value: &Integer, bits: usize) -> Self {
        Self::from_big(&BigFloat::from_integer(value, bits))
    }

    /// Converts an exact rational at the given precision.
    fn from_rational(value: &Rational, bits: usize) -> Self {
        Self::from_big(&BigFloat::from_rational(value, bits))
    }

    /// Rounds to the nearest double.
    fn to_f64(&self) -> f64;

    /// Current working precision in bits.
    fn precision(&self) -> usize;

    /// Sets the working precision, rounding if it shrinks.
    #[must_use]
    fn with_precision(self, bits: usize) -> Self;

    /// Absolute value.
    #[must_use]
    fn abs(&self) -> Self;

    /// Square root of a non-negative value.
    #[must_use]
    fn sqrt(&self) -> Self;

    /// `sqrt(self^2 + other^2)`.
    #[must_use]
    fn hypot(&self, other: &Self) -> Self;

    /// Natural logarithm of a positive value.
    #[must_use]
    fn ln(&self) -> Self;

    /// `ln(1 + self)`, accurate for small arguments.
    #[must_use]
    fn ln_1p(&self) -> Self;

    /// Exponential function.
    #[must_use]
    fn exp(&self) -> Self;

    /// Arc tangent.
    #[must_use]
    fn atan(&self) -> Self;

    /// Four-quadrant arc tangent of `self / x`.
    #[must_use]
    fn atan2(&self, x: &Self) -> Self;

    /// Integer power.
    #[must_use]
    fn powi(&self, exp: u32) -> Self;

    /// The constant pi at the given precision.
    fn pi(bits: usize) -> Self;

    /// Unit roundoff for the given precision.
    fn epsilon(bits: usize) -> Self;

    /// Clamps a requested precision to what the type can deliver.
    fn effective_bits(bits: usize) -> usize {
        Self::MAX_BITS.map_or(bits, |max| bits.min(max))
    }

    /// Returns true if the value is exactly zero.
    fn is_exact_zero(&self) -> bool {
        num_traits::Zero::is_zero(self)
    }

    /// Returns false for NaN and infinities.
    fn is_finite(&self) -> bool {
        true
    }
}

impl Real for f64 {
    const MAX_BITS: Option<usize> = Some(53);
    const DEFAULT_DIGITS: u32 = 17;

    #[allow(clippy::cast_precision_loss)]
    fn from_i64(value: i64, _bits: usize) -> Self {
        value as f64
    }

    fn from_f64(value: f64, _bits: usize) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    fn from_big(value: &BigFloat) -> Self {
        value.to_f64()
    }

    fn to_f64(&self) -> f64 {
        *self
    }

    fn precision(&self) -> usize {
        53
    }

    fn with_precision(self, _bits: usize) -> Self {
        self
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn sqrt(&self) -> Self {
        f64::sqrt(*self)
    }

    fn hypot(&self, other: &Self) -> Self {
        f64::hypot(*self, *other)
    }

    fn ln(&self) -> Self {
        f64::ln(*self)
    }

    fn ln_1p(&self) -> Self {
        f64::ln_1p(*self)
    }

    fn exp(&self) -> Self {
        f64::exp(*self)
    }

    fn atan(&self) -> Self {
        f64::atan(*self)
    }

    fn atan2(&self, x: &Self) -> Self {
        // -0.0 + 0.0 == +0.0, keeping the negative real axis at +pi.
        f64::atan2(*self + 0.0, *x)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn powi(&self, exp: u32) -> Self {
        f64::powi(*self, exp as i32)
    }

    fn pi(_bits: usize) -> Self {
        PI
    }

    fn epsilon(_bits: usize) -> Self {
        f64::EPSILON
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}
