//! Engine configuration.

use polylogs_numeric::{bits_for_digits, Real};

use crate::error::{PolylogError, Result};

/// Guard bits carried on top of the requested precision.
pub const GUARD_BITS: usize = 16;

/// Settings for an [`Engine`](crate::Engine).
///
/// Every field has a usable default; construct with struct update syntax:
///
/// ```
/// use polylogs_engine::EngineConfig;
///
/// let config = EngineConfig { max_weight: 20, digits: Some(34), ..EngineConfig::default() };
/// assert_eq!(config.taylor_radius, 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Largest weight the engine can evaluate.
    pub max_weight: usize,
    /// Significant decimal digits; `None` uses the number type's default.
    pub digits: Option<u32>,
    /// Per-series term cap; `None` uses `64 * bits + 1000`.
    pub max_iterations: Option<usize>,
    /// Radius of the disc around 0 summed with the plain power series.
    pub taylor_radius: f64,
    /// Arguments with ||x| - 1| or |1 - x| below this are evaluated with
    /// extra precision.
    pub boundary_tolerance: f64,
    /// Bits added near the unit circle and near 1.
    pub boost_bits: usize,
    /// Batches at least this long are evaluated in parallel.
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_weight: 10,
            digits: None,
            max_iterations: None,
            taylor_radius: 0.25,
            boundary_tolerance: 1.0 / 16.0,
            boost_bits: 32,
            parallel_threshold: 16,
        }
    }
}

/// Precisions derived from a validated configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precision {
    /// Requested significant digits.
    pub digits: u32,
    /// Bits returned to the caller.
    pub bits: usize,
    /// Bits the stopping rule targets for ordinary arguments.
    pub working_bits: usize,
    /// Bits the stopping rule targets near the unit circle and near 1, and
    /// the precision of the constant table.
    pub boosted_bits: usize,
}

impl EngineConfig {
    /// Creates the default configuration with another maximum weight.
    #[must_use]
    pub fn with_max_weight(max_weight: usize) -> Self {
        Self {
            max_weight,
            ..Self::default()
        }
    }

    /// Checks the settings against the number type `R`.
    ///
    /// # Errors
    ///
    /// Returns [`PolylogError::Configuration`] naming the first offending
    /// field.
    pub fn validate<R: Real>(&self) -> Result<()> {
        if self.max_weight == 0 {
            return Err(invalid("max_weight must be at least 1"));
        }
        if let Some(digits) = self.digits {
            if digits == 0 {
                return Err(invalid("digits must be at least 1"));
            }
            if R::MAX_BITS.is_some() && digits > R::DEFAULT_DIGITS {
                return Err(PolylogError::Configuration(format!(
                    "{digits} digits requested but the number type carries at most {}",
                    R::DEFAULT_DIGITS
                )));
            }
        }
        if self.max_iterations == Some(0) {
            return Err(invalid("max_iterations must be positive"));
        }
        if !(self.taylor_radius > 0.0 && self.taylor_radius < 1.0) {
            return Err(invalid("taylor_radius must lie in (0, 1)"));
        }
        if !(self.boundary_tolerance >= 0.0 && self.boundary_tolerance < 1.0) {
            return Err(invalid("boundary_tolerance must lie in [0, 1)"));
        }
        Ok(())
    }

    /// Resolves the precisions for the number type `R`.
    #[must_use]
    pub fn precision<R: Real>(&self) -> Precision {
        let digits = self.digits.unwrap_or(R::DEFAULT_DIGITS);
        let bits = R::effective_bits(bits_for_digits(digits));
        let working_bits = R::effective_bits(bits + GUARD_BITS);
        let boosted_bits = R::effective_bits(working_bits + self.boost_bits);
        Precision {
            digits,
            bits,
            working_bits,
            boosted_bits,
        }
    }

    /// The per-series term cap at `bits` of precision.
    #[must_use]
    pub fn iteration_cap(&self, bits: usize) -> usize {
        self.max_iterations.unwrap_or(64 * bits + 1000)
    }
}

fn invalid(message: &str) -> PolylogError {
    PolylogError::Configuration(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polylogs_numeric::BigFloat;

    #[test]
    fn test_default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate::<f64>().is_ok());
        assert!(config.validate::<BigFloat>().is_ok());
        assert_eq!(config.iteration_cap(53), 4392);
    }

    #[test]
    fn test_double_precision_is_clamped() {
        let p = EngineConfig::default().precision::<f64>();
        assert_eq!(p.digits, 17);
        assert_eq!((p.bits, p.working_bits, p.boosted_bits), (53, 53, 53));
    }

    #[test]
    fn test_arbitrary_precision_adds_guard_and_boost() {
        let config = EngineConfig {
            digits: Some(34),
            ..EngineConfig::default()
        };
        let p = config.precision::<BigFloat>();
        assert_eq!(p.bits, 113);
        assert_eq!(p.working_bits, 129);
        assert_eq!(p.boosted_bits, 161);
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cases = [
            EngineConfig::with_max_weight(0),
            EngineConfig {
                digits: Some(0),
                ..EngineConfig::default()
            },
            EngineConfig {
                max_iterations: Some(0),
                ..EngineConfig::default()
            },
            EngineConfig {
                taylor_radius: 1.0,
                ..EngineConfig::default()
            },
            EngineConfig {
                boundary_tolerance: f64::NAN,
                ..EngineConfig::default()
            },
        ];
        for config in cases {
            assert!(config.validate::<BigFloat>().unwrap_err().is_configuration());
        }
    }

    #[test]
    fn test_double_rejects_too_many_digits() {
        let config = EngineConfig {
            digits: Some(30),
            ..EngineConfig::default()
        };
        assert!(config.validate::<f64>().is_err());
        assert!(config.validate::<BigFloat>().is_ok());
    }
}
