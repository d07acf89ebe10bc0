//! Complex helpers on top of `num_complex::Complex<R>`.
//!
//! `num_complex` only offers transcendental functions for `Float` types;
//! the engine needs the principal logarithm for any [`Real`].

use num_complex::Complex;

use crate::Real;

/// Extension methods for complex numbers over a [`Real`].
pub trait ComplexExt<R: Real>: Sized {
    /// Embeds a real value, with a zero imaginary part at the same precision.
    fn from_real(re: R) -> Self;

    /// Builds a complex number from doubles at the given precision.
    ///
    /// Returns `None` if either part is not finite.
    fn from_f64_parts(re: f64, im: f64, bits: usize) -> Option<Self>;

    /// |z|.
    fn modulus(&self) -> R;

    /// Principal logarithm, imaginary part in (-pi, pi].
    ///
    /// # Panics
    ///
    /// May panic for z = 0 when `R` cannot represent -infinity.
    #[must_use]
    fn principal_ln(&self) -> Self;

    /// Both parts raised (or rounded) to `bits` of precision.
    #[must_use]
    fn lifted(&self, bits: usize) -> Self;

    /// Working precision of the number.
    fn precision(&self) -> usize;
}

impl<R: Real> ComplexExt<R> for Complex<R> {
    fn from_real(re: R) -> Self {
        let im = R::from_i64(0, re.precision());
        Complex::new(re, im)
    }

    fn from_f64_parts(re: f64, im: f64, bits: usize) -> Option<Self> {
        Some(Complex::new(R::from_f64(re, bits)?, R::from_f64(im, bits)?))
    }

    fn modulus(&self) -> R {
        self.re.hypot(&self.im)
    }

    fn principal_ln(&self) -> Self {
        Complex::new(self.modulus().ln(), self.im.atan2(&self.re))
    }

    fn lifted(&self, bits: usize) -> Self {
        Complex::new(
            self.re.clone().with_precision(bits),
            self.im.clone().with_precision(bits),
        )
    }

    fn precision(&self) -> usize {
        self.re.precision().max(self.im.precision())
    }
}
