//! # polylogs-integers
//!
//! Exact arithmetic underneath the polylogarithm constant tables.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`)
//! - The combinatorial sequences the series expansions are built from:
//!   factorials, binomial rows, Bernoulli and harmonic numbers, and the
//!   integer weights of Borwein's zeta algorithm
//!
//! Everything here is exact. Rounding to a working precision happens one
//! layer up, in `polylogs-numeric`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod combinatorics;
pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use combinatorics::{
    bernoulli_numbers, binomial_row, borwein_weights, factorials, harmonic_number,
};
pub use integer::Integer;
pub use rational::Rational;
