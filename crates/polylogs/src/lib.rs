//! # polylogs
//!
//! Polylogarithms at double or arbitrary precision.
//!
//! ## Features
//!
//! - **Li_n(x)** for complex x and every weight up to a maximum fixed at
//!   construction, continued below the cut x in (1, inf)
//! - **Li_{2,2}(x, y)** over the whole product of planes, the torus
//!   |x| = |y| = 1 included
//! - **Generic precision**: `f64`, or [`BigFloat`] with any number of
//!   decimal digits
//! - **Shared engines**: evaluation takes `&self`, batches run on rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use polylogs::prelude::*;
//!
//! let engine = Engine::<BigFloat>::with_precision(10, 34).unwrap();
//! let x = engine.complex_from_f64(0.25, 0.25).unwrap();
//! let li5 = engine.li(5, &x).unwrap();
//! assert!((li5.re.to_f64() - 0.249_854_927_859_315_33).abs() < 1e-15);
//! ```
//!
//! [`BigFloat`]: polylogs_numeric::BigFloat

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use polylogs_constants as constants;
pub use polylogs_engine as engine;
pub use polylogs_integers as integers;
pub use polylogs_numeric as numeric;

pub use polylogs_engine::{Engine, EngineConfig, PolylogError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use num_complex::Complex;
    pub use polylogs_constants::ConstantTable;
    pub use polylogs_engine::{Engine, EngineConfig, PolylogError, Region, Strategy};
    pub use polylogs_integers::{Integer, Rational};
    pub use polylogs_numeric::{BigFloat, ComplexExt, Real};
}
