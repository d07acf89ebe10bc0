//! Arbitrary precision binary floating point.
//!
//! [`BigFloat`] wraps `dashu::float::FBig` with round-half-even. Each value
//! carries its own precision and arithmetic rounds to the larger precision
//! of its operands, so a computation started at `p` bits stays at `p` bits
//! as long as every constant entering it is created with an explicit
//! precision. The constructors here always take one.
//!
//! `dashu` supplies `ln`, `exp` and `sqrt` but no circular functions; the arc
//! tangent and pi needed for complex logarithms are computed here.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};
use std::str::FromStr;

use dashu::base::{Abs, ParseError, SquareRoot};
use dashu::float::round::mode::HalfEven;
use dashu::float::{DBig, FBig};
use dashu::integer::IBig;
use num_traits::{Num, One, Zero};
use polylogs_integers::{Integer, Rational};

use crate::Real;

type Repr = FBig<HalfEven, 2>;

/// Extra bits carried by the internal series of `atan` and `pi`.
const GUARD_BITS: usize = 16;

/// Arguments are halved until they fall below 2^-ATAN_REDUCTION before
/// the Maclaurin series of the arc tangent is summed.
const ATAN_REDUCTION: isize = 8;

/// An arbitrary precision binary floating point number.
#[derive(Clone, PartialEq, PartialOrd)]
pub struct BigFloat(Repr);

impl BigFloat {
    /// Converts an exact integer, rounding to `bits`.
    #[must_use]
    pub fn from_integer(value: &Integer, bits: usize) -> Self {
        Self(Repr::from(value.as_inner().clone()).with_precision(bits).value())
    }

    /// Converts an exact rational, rounding to `bits`.
    #[must_use]
    pub fn from_rational(value: &Rational, bits: usize) -> Self {
        let num = Self::from_integer(&value.numerator(), bits);
        let den = Self::from_integer(&value.denominator(), bits);
        num / den
    }

    /// Returns `2^exp` exactly, tagged with precision `bits`.
    #[must_use]
    pub fn power_of_two(exp: isize, bits: usize) -> Self {
        Self(Repr::from_parts(IBig::ONE, exp).with_precision(bits).value())
    }

    /// Parses a decimal literal such as `"0.25"` or `"-1.5e-3"`, rounding
    /// to `bits`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid decimal number.
    pub fn parse_decimal(src: &str, bits: usize) -> Result<Self, ParseError> {
        let decimal = DBig::from_str(src)?;
        let binary = decimal.with_base_and_precision::<2>(bits).value();
        Ok(Self(binary.with_rounding::<HalfEven>()))
    }

    /// Returns true if the value is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Repr::ZERO
    }

    /// Returns the inner `dashu` float.
    #[must_use]
    pub fn as_inner(&self) -> &FBig<HalfEven, 2> {
        &self.0
    }

    fn zero_at(bits: usize) -> Self {
        Self(Repr::ZERO.with_precision(bits).value())
    }

    /// Maclaurin series of atan(t) for |t| well below one.
    fn atan_series(t: &Self, bits: usize) -> Self {
        let eps = Self::power_of_two(-(bits as isize), bits);
        let t2 = t.clone() * t.clone();
        let mut power = t.clone();
        let mut sum = t.clone();
        let mut k: i64 = 1;
        loop {
            power = -(power * t2.clone());
            let term = power.clone() / Self::from_i64(2 * k + 1, bits);
            if term.abs() <= eps.clone() * sum.abs() {
                return sum;
            }
            sum = sum + term;
            k += 1;
        }
    }

    /// atan(1/m) for an integer m > 1, by its series in 1/m^2.
    fn atan_recip(m: i64, bits: usize) -> Self {
        let eps = Self::power_of_two(-(bits as isize), bits);
        let m2 = Self::from_i64(m * m, bits);
        let mut power = Self::from_i64(1, bits) / Self::from_i64(m, bits);
        let mut sum = power.clone();
        let mut k: i64 = 1;
        loop {
            power = power / m2.clone();
            let term = power.clone() / Self::from_i64(2 * k + 1, bits);
            if term <= eps.clone() * sum.clone() {
                return sum;
            }
            sum = if k % 2 == 1 { sum - term } else { sum + term };
            k += 1;
        }
    }
}

impl Zero for BigFloat {
    fn zero() -> Self {
        Self(Repr::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.repr().is_zero()
    }
}

impl One for BigFloat {
    fn one() -> Self {
        Self(Repr::ONE)
    }
}

impl Num for BigFloat {
    type FromStrRadixErr = ParseError;

    fn from_str_radix(src: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        match radix {
            10 => {
                // Keep as many bits as the literal has decimal digits.
                let digits = DBig::from_str(src)?.precision();
                let bits = crate::bits_for_digits(u32::try_from(digits).unwrap_or(u32::MAX));
                Self::parse_decimal(src, bits.max(1))
            }
            2 => Repr::from_str(src).map(Self),
            _ => Err(ParseError::UnsupportedRadix),
        }
    }
}

macro_rules! bigfloat_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: BigFloat) -> BigFloat {
                BigFloat($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&BigFloat> for BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: &BigFloat) -> BigFloat {
                BigFloat($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait for &BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: &BigFloat) -> BigFloat {
                BigFloat($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

bigfloat_binop!(Add, add);
bigfloat_binop!(Sub, sub);
bigfloat_binop!(Mul, mul);
bigfloat_binop!(Div, div);
bigfloat_binop!(Rem, rem);

impl Neg for BigFloat {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> Self::Output {
        BigFloat(-&self.0)
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFloat({self} @ {} bits)", self.0.precision())
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_decimal().value())
    }
}

impl Real for BigFloat {
    const MAX_BITS: Option<usize> = None;
    const DEFAULT_DIGITS: u32 = 34;

    fn from_i64(value: i64, bits: usize) -> Self {
        Self(Repr::from(value).with_precision(bits).value())
    }

    fn from_f64(value: f64, bits: usize) -> Option<Self> {
        Repr::try_from(value)
            .ok()
            .map(|v| Self(v.with_precision(bits).value()))
    }

    fn from_big(value: &BigFloat) -> Self {
        value.clone()
    }

    fn to_f64(&self) -> f64 {
        self.0.to_f64().value()
    }

    fn precision(&self) -> usize {
        self.0.precision()
    }

    fn with_precision(self, bits: usize) -> Self {
        Self(self.0.with_precision(bits).value())
    }

    fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    fn sqrt(&self) -> Self {
        Self(self.0.sqrt())
    }

    fn hypot(&self, other: &Self) -> Self {
        (self * self + other * other).sqrt()
    }

    fn ln(&self) -> Self {
        let bits = self.precision();
        // ln(1) comes back as an exact zero without a precision.
        Self(self.0.ln()).with_precision(bits)
    }

    fn ln_1p(&self) -> Self {
        let bits = self.precision();
        Self(self.0.ln_1p()).with_precision(bits)
    }

    fn exp(&self) -> Self {
        let bits = self.precision();
        Self(self.0.exp()).with_precision(bits)
    }

    fn atan(&self) -> Self {
        let bits = self.precision();
        if self.is_zero() {
            return self.clone();
        }
        let work = bits + GUARD_BITS;
        let threshold = Self::power_of_two(-ATAN_REDUCTION, work);
        let one = Self::from_i64(1, work);
        let mut t = self.clone().with_precision(work);
        let mut halvings: isize = 0;
        // atan(t) = 2 atan(t / (1 + sqrt(1 + t^2)))
        while t.abs() > threshold {
            let root = (one.clone() + t.clone() * t.clone()).sqrt();
            t = t / (one.clone() + root);
            halvings += 1;
        }
        let scale = Self::power_of_two(halvings, work);
        (Self::atan_series(&t, work) * scale).with_precision(bits)
    }

    fn atan2(&self, x: &Self) -> Self {
        let bits = self.precision().max(x.precision());
        if self.is_zero() {
            return if x.is_negative() {
                Self::pi(bits)
            } else {
                Self::zero_at(bits)
            };
        }
        let r = self.hypot(x);
        let two = Self::from_i64(2, bits);
        // Half-angle form: no division by a vanishing r + x near the
        // negative real axis.
        let half = if x.is_negative() {
            ((r - x) / self).atan()
        } else {
            (self / &(r + x)).atan()
        };
        two * half
    }

    fn powi(&self, exp: u32) -> Self {
        Self(self.0.powi(IBig::from(exp)))
    }

    fn pi(bits: usize) -> Self {
        // Machin: pi = 16 atan(1/5) - 4 atan(1/239)
        let work = bits + GUARD_BITS;
        let a = Self::atan_recip(5, work) * Self::from_i64(16, work);
        let b = Self::atan_recip(239, work) * Self::from_i64(4, work);
        (a - b).with_precision(bits)
    }

    fn epsilon(bits: usize) -> Self {
        Self::power_of_two(-(bits as isize), bits)
    }
}
