//! # polylogs-engine
//!
//! Numerical evaluation of the classical polylogarithms Li_n(x) and of the
//! depth-two multiple polylogarithm Li_{2,2}(x, y) for complex arguments.
//!
//! The engine is generic over the real type of the complex numbers it
//! works with: `f64` for double precision, or
//! [`BigFloat`](polylogs_numeric::BigFloat) for any number of digits.
//!
//! ## Evaluation
//!
//! Every call classifies its argument ([`Region`]) and sums one of three
//! series using constants tabulated at construction:
//!
//! - the power series near 0,
//! - a series in -ln(1 - x) with Bernoulli-number coefficients,
//! - the expansion around 1 in ln x,
//!
//! after mapping |x| > 1 into the unit disc with the inversion formula.
//! Li_{2,2} is reduced by the stuffle and reflection identities to a
//! residual double series and single-variable polylogarithms
//! ([`Strategy`], [`Kernel`]). Where no reduction converges fast enough,
//! including the torus |x| = |y| = 1, the residual is evaluated from its
//! one-dimensional integral representation by tanh-sinh quadrature.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod engine;
pub mod error;
mod li22;
mod polylog;
mod quadrature;
pub mod region;
mod series;

#[cfg(test)]
mod proptests;

pub use config::{EngineConfig, Precision};
pub use engine::Engine;
pub use error::{PolylogError, Result};
pub use region::{Classification, Expansion, Kernel, Region, Strategy, Thresholds};
