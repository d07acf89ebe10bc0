//! # polylogs-numeric
//!
//! The numeric capability set the polylogarithm engine is written against.
//!
//! - [`Real`]: the real component type. Realized by `f64` (fixed double
//!   precision) and by [`BigFloat`] (binary floating point with a per-value
//!   working precision, backed by `dashu`).
//! - [`ComplexExt`]: principal-branch logarithm, modulus and precision
//!   control on `num_complex::Complex<R>`.
//!
//! Precision is always expressed in bits. `f64` ignores requests for more
//! than its 53-bit significand.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bigfloat;
pub mod complex;
pub mod real;

#[cfg(test)]
mod proptests;

pub use bigfloat::BigFloat;
pub use complex::ComplexExt;
pub use num_complex::Complex;
pub use real::{bits_for_digits, Real};
