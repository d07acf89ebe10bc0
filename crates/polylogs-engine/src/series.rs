//! Geometric series accumulation with the shared stopping rule.
//!
//! A series with convergence ratio rho stops once two consecutive terms
//! satisfy |t| / (1 - rho) <= eps |S|, which bounds the geometric tail by
//! the target accuracy. The test is done on squared moduli.

use num_complex::Complex;
use polylogs_numeric::Real;
use tracing::{trace, warn};

use crate::error::{PolylogError, Result};

/// Number of consecutive small terms that ends a series.
const QUIET_TERMS: u8 = 2;

/// A running complex sum.
pub(crate) struct Series<R> {
    name: &'static str,
    tolerance_sq: R,
    limit: usize,
    sum: Complex<R>,
    quiet: u8,
    terms: usize,
}

impl<R: Real> Series<R> {
    /// Starts a series with ratio `rho < 1`, relative accuracy `eps` and at
    /// most `limit` terms.
    pub(crate) fn new(name: &'static str, rho: &R, eps: &R, limit: usize) -> Self {
        let bits = rho.precision().max(eps.precision());
        let one = R::from_i64(1, bits);
        let scaled = eps.clone() * (one - rho.clone());
        Self {
            name,
            tolerance_sq: scaled.clone() * scaled,
            limit,
            sum: Complex::new(R::from_i64(0, bits), R::from_i64(0, bits)),
            quiet: 0,
            terms: 0,
        }
    }

    /// Adds a term without testing for convergence.
    pub(crate) fn add_leading(&mut self, term: Complex<R>) -> Result<()> {
        self.count()?;
        self.sum = self.sum.clone() + term;
        Ok(())
    }

    /// Adds a term; returns true once the series has converged.
    pub(crate) fn add(&mut self, term: Complex<R>) -> Result<bool> {
        self.count()?;
        let small_sq = term.norm_sqr();
        self.sum = self.sum.clone() + term;
        if small_sq <= self.tolerance_sq.clone() * self.sum.norm_sqr() {
            self.quiet += 1;
        } else {
            self.quiet = 0;
        }
        let done = self.quiet >= QUIET_TERMS;
        if done {
            trace!(series = self.name, terms = self.terms, "series converged");
        }
        Ok(done)
    }

    /// The sum so far.
    pub(crate) fn into_sum(self) -> Complex<R> {
        self.sum
    }

    fn count(&mut self) -> Result<()> {
        if self.terms >= self.limit {
            warn!(series = self.name, terms = self.terms, "term budget exhausted");
            return Err(PolylogError::ConvergenceFailure {
                series: self.name,
                iterations: self.terms,
            });
        }
        self.terms += 1;
        Ok(())
    }
}
