//! The polylogarithm engine.

use std::time::Instant;

use num_complex::Complex;
use polylogs_constants::ConstantTable;
use polylogs_numeric::{ComplexExt, Real};
use rayon::prelude::*;
use tracing::debug;

use crate::config::{EngineConfig, Precision};
use crate::error::{PolylogError, Result};
use crate::polylog::{Evaluator, Tolerance};
use crate::region::Thresholds;

/// Smallest maximum weight that supports Li_{2,2}.
pub const LI22_MIN_WEIGHT: usize = 4;

/// Evaluates Li_n(x) and Li_{2,2}(x, y) over the real type `R`.
///
/// Construction builds the constant table once; evaluation takes `&self`
/// and never mutates the engine, so one engine can serve many threads.
///
/// ```
/// use polylogs_engine::Engine;
/// use num_complex::Complex;
///
/// let engine = Engine::<f64>::new(4).unwrap();
/// let li2 = engine.li(2, &Complex::new(-1.0, 0.0)).unwrap();
/// assert!((li2.re + std::f64::consts::PI.powi(2) / 12.0).abs() < 1e-15);
/// ```
#[derive(Clone, Debug)]
pub struct Engine<R: Real = f64> {
    config: EngineConfig,
    precision: Precision,
    cap: usize,
    table: ConstantTable<R>,
    thresholds: Thresholds<R>,
    normal: Tolerance<R>,
    boosted: Tolerance<R>,
}

impl<R: Real> Engine<R> {
    /// Creates an engine at the default precision of `R`.
    ///
    /// # Errors
    ///
    /// Returns [`PolylogError::Configuration`] if `max_weight` is zero.
    pub fn new(max_weight: usize) -> Result<Self> {
        Self::with_config(EngineConfig::with_max_weight(max_weight))
    }

    /// Creates an engine carrying `digits` significant decimal digits.
    ///
    /// # Errors
    ///
    /// Returns [`PolylogError::Configuration`] if `max_weight` or `digits`
    /// is zero, or if `R` cannot carry `digits`.
    pub fn with_precision(max_weight: usize, digits: u32) -> Result<Self> {
        Self::with_config(EngineConfig {
            digits: Some(digits),
            ..EngineConfig::with_max_weight(max_weight)
        })
    }

    /// Creates an engine from a full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PolylogError::Configuration`] for invalid settings.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate::<R>()?;
        let started = Instant::now();
        let precision = config.precision::<R>();
        let bits = precision.boosted_bits;

        let table = ConstantTable::new(config.max_weight, bits)?;
        let thresholds = Thresholds::new(config.taylor_radius, config.boundary_tolerance, bits)
            .ok_or_else(|| PolylogError::Configuration("thresholds must be finite".to_string()))?;
        let normal = Tolerance {
            eps: R::epsilon(precision.working_bits).with_precision(bits),
        };
        let boosted = Tolerance {
            eps: R::epsilon(precision.boosted_bits),
        };
        let cap = config.iteration_cap(bits);

        debug!(
            max_weight = config.max_weight,
            digits = precision.digits,
            bits = precision.bits,
            table_bits = bits,
            table_terms = table.terms(),
            cap,
            elapsed_ms = started.elapsed().as_millis(),
            "constructed polylogarithm engine"
        );

        Ok(Self {
            config,
            precision,
            cap,
            table,
            thresholds,
            normal,
            boosted,
        })
    }

    pub(crate) fn evaluator(&self) -> Evaluator<'_, R> {
        Evaluator {
            table: &self.table,
            thresholds: &self.thresholds,
            normal: &self.normal,
            boosted: &self.boosted,
            cap: self.cap,
        }
    }

    /// Li_n(x).
    ///
    /// # Errors
    ///
    /// - [`PolylogError::InvalidArgument`] if `n` is not in `1..=max_weight`
    ///   or `x` is not finite
    /// - [`PolylogError::Domain`] for n = 1 at x = 1
    /// - [`PolylogError::ConvergenceFailure`] if a series exceeds its cap
    pub fn li(&self, n: usize, x: &Complex<R>) -> Result<Complex<R>> {
        self.check_weight(n)?;
        let x = self.argument(x)?;
        let value = self.evaluator().li(n, &x)?;
        Ok(value.lifted(self.precision.bits))
    }

    /// Li_{2,2}(x, y).
    ///
    /// # Errors
    ///
    /// - [`PolylogError::InvalidArgument`] if the engine was built with a
    ///   maximum weight below 4, or an argument is not finite
    /// - [`PolylogError::ConvergenceFailure`] if a series or the quadrature
    ///   of the integral form exceeds its cap
    pub fn li22(&self, x: &Complex<R>, y: &Complex<R>) -> Result<Complex<R>> {
        if self.config.max_weight < LI22_MIN_WEIGHT {
            return Err(PolylogError::InvalidArgument(format!(
                "Li_{{2,2}} needs weights up to {LI22_MIN_WEIGHT}, engine supports {}",
                self.config.max_weight
            )));
        }
        let x = self.argument(x)?;
        let y = self.argument(y)?;
        let value = self.evaluator().li22(&x, &y)?;
        Ok(value.lifted(self.precision.bits))
    }

    /// Li_n at every point of `xs`, in order.
    ///
    /// Batches of at least `parallel_threshold` points are split across the
    /// rayon thread pool.
    pub fn li_many(&self, n: usize, xs: &[Complex<R>]) -> Vec<Result<Complex<R>>> {
        if xs.len() >= self.config.parallel_threshold {
            xs.par_iter().map(|x| self.li(n, x)).collect()
        } else {
            xs.iter().map(|x| self.li(n, x)).collect()
        }
    }

    /// Raises a value to the engine's internal precision.
    #[must_use]
    pub fn lift(&self, x: &Complex<R>) -> Complex<R> {
        x.lifted(self.table.bits())
    }

    /// Builds an argument from doubles at the engine's internal precision.
    ///
    /// Returns `None` if either part is not finite.
    #[must_use]
    pub fn complex_from_f64(&self, re: f64, im: f64) -> Option<Complex<R>> {
        Complex::from_f64_parts(re, im, self.table.bits())
    }

    /// Largest supported weight.
    #[must_use]
    pub fn max_weight(&self) -> usize {
        self.config.max_weight
    }

    /// Significant decimal digits of the results.
    #[must_use]
    pub fn digits(&self) -> u32 {
        self.precision.digits
    }

    /// Precision of the results in bits.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.precision.bits
    }

    /// The resolved precisions.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// The configuration the engine was built with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The constant table.
    #[must_use]
    pub fn table(&self) -> &ConstantTable<R> {
        &self.table
    }

    fn check_weight(&self, n: usize) -> Result<()> {
        if n == 0 || n > self.config.max_weight {
            return Err(PolylogError::InvalidArgument(format!(
                "weight {n} outside 1..={}",
                self.config.max_weight
            )));
        }
        Ok(())
    }

    fn argument(&self, x: &Complex<R>) -> Result<Complex<R>> {
        if !(x.re.is_finite() && x.im.is_finite()) {
            return Err(PolylogError::InvalidArgument(
                "argument is not finite".to_string(),
            ));
        }
        Ok(self.lift(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use polylogs_numeric::BigFloat;

    #[test]
    fn test_construction_errors() {
        assert!(Engine::<f64>::new(0).unwrap_err().is_configuration());
        assert!(Engine::<f64>::with_precision(4, 40).is_err());
        assert!(Engine::<BigFloat>::with_precision(4, 0).is_err());
    }

    #[test]
    fn test_weight_checks() {
        let engine = Engine::<f64>::new(3).unwrap();
        let x = Complex::new(0.5, 0.0);
        assert!(matches!(engine.li(0, &x), Err(PolylogError::InvalidArgument(_))));
        assert!(matches!(engine.li(4, &x), Err(PolylogError::InvalidArgument(_))));
        assert!(matches!(engine.li22(&x, &x), Err(PolylogError::InvalidArgument(_))));
        let nan = Complex::new(f64::NAN, 0.0);
        assert!(matches!(engine.li(2, &nan), Err(PolylogError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_for_every_weight() {
        let engine = Engine::<f64>::new(10).unwrap();
        for n in 1..=10 {
            assert_eq!(engine.li(n, &Complex::new(0.0, 0.0)).unwrap(), Complex::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_weights_beyond_series_terms() {
        // 53 bits tabulate 50 series terms; Li_60(x) differs from x by about x^2 / 2^60.
        let engine = Engine::<f64>::new(60).unwrap();
        for x in [Complex::new(0.9, 0.0), Complex::new(0.6, 0.3), Complex::new(0.3, 0.4)] {
            let v = engine.li(60, &x).unwrap();
            assert_abs_diff_eq!(v.re, x.re, epsilon = 1e-15);
            assert_abs_diff_eq!(v.im, x.im, epsilon = 1e-15);
        }
        let v = engine.li(60, &Complex::new(-3.0, 0.0)).unwrap();
        assert_abs_diff_eq!(v.re, -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        let v = engine.li(55, &Complex::new(1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(v.re, 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_accessors() {
        let engine = Engine::<BigFloat>::with_precision(5, 34).unwrap();
        assert_eq!(engine.max_weight(), 5);
        assert_eq!(engine.digits(), 34);
        assert_eq!(engine.bits(), 113);
        assert_eq!(engine.table().bits(), 161);
        let x = engine.complex_from_f64(0.5, -0.25).unwrap();
        assert_eq!(ComplexExt::precision(&x), 161);
        assert!(engine.complex_from_f64(f64::INFINITY, 0.0).is_none());
    }

    #[test]
    fn test_results_are_rounded_to_requested_bits() {
        let engine = Engine::<BigFloat>::with_precision(3, 30).unwrap();
        let x = engine.complex_from_f64(0.25, 0.25).unwrap();
        let v = engine.li(2, &x).unwrap();
        assert_eq!(v.re.precision(), engine.bits());
        assert_abs_diff_eq!(v.re.to_f64(), 0.245_409_404_038_396_43, epsilon = 1e-16);
    }

    #[test]
    fn test_li_many_matches_single_calls() {
        let engine = Engine::<f64>::with_config(EngineConfig {
            parallel_threshold: 2,
            ..EngineConfig::with_max_weight(4)
        })
        .unwrap();
        let xs: Vec<_> = (0..8)
            .map(|k| Complex::new(0.3 * f64::from(k) - 1.0, 0.2))
            .collect();
        let batch = engine.li_many(3, &xs);
        for (x, value) in xs.iter().zip(batch) {
            assert_eq!(value.unwrap(), engine.li(3, x).unwrap());
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = Engine::<f64>::new(6).unwrap();
        let x = Complex::new(0.01, (9899.0f64).sqrt() / 100.0);
        assert_eq!(engine.li(6, &x).unwrap(), engine.li(6, &x).unwrap());
    }

    #[test]
    fn test_pathological_cap() {
        let engine = Engine::<BigFloat>::with_config(EngineConfig {
            digits: Some(60),
            max_iterations: Some(4),
            ..EngineConfig::with_max_weight(3)
        })
        .unwrap();
        let i = engine.complex_from_f64(0.0, 1.0).unwrap();
        assert!(engine.li(3, &i).unwrap_err().is_convergence_failure());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine<f64>>();
        assert_send_sync::<Engine<BigFloat>>();
    }
}
