//! # polylogs-constants
//!
//! The constant table behind the polylogarithm engine.
//!
//! A [`ConstantTable`] is built once for a maximum weight and a working
//! precision and never changes afterwards. It holds:
//!
//! - exact Bernoulli numbers and factorials
//! - zeta values at the positive integers ([`zeta`])
//! - the Bernoulli series coefficients of every Li_n
//! - the coefficients of the expansion of Li_n around 1
//! - the correction coefficients of the inversion formula
//!
//! All floating point entries are computed in [`BigFloat`] with guard bits
//! and rounded once into the engine's number type.
//!
//! [`BigFloat`]: polylogs_numeric::BigFloat

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod table;
pub mod zeta;

#[cfg(test)]
mod proptests;

pub use table::{ConstantTable, TableError};
pub use zeta::zeta_value;
