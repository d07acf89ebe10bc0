//! Evaluation of Li_n(x).
//!
//! Every argument is mapped to one of three series:
//!
//! - `Taylor`: sum_k x^k / k^n, ratio |x|;
//! - `Bernoulli`: sum_k a_{n,k} u^(k+1) with u = -ln(1 - x), ratio |u| / 2pi;
//! - `UnitExpansion`: sum_{k != n-1} c_{n,k} L^k + L^(n-1) / (n-1)! (H_{n-1} - ln(-L))
//!   with L = ln x, ratio |L| / 2pi.
//!
//! Arguments outside the unit disc go through the inversion formula
//!
//! ```text
//! Li_n(x) = (-1)^(n-1) Li_n(1/x) - sum_{k=0}^{n} beta_k (2 pi i)^k w^(n-k) / (n-k)!
//! w = ln(-x) + i pi
//! ```
//!
//! which, with the principal logarithm, gives the value below the cut
//! x in (1, inf): Im Li_n(x - i0) = -pi ln^(n-1)(x) / (n-1)!.

use num_complex::Complex;
use polylogs_constants::ConstantTable;
use polylogs_numeric::{ComplexExt, Real};
use tracing::trace;

use crate::error::{PolylogError, Result};
use crate::region::{Classification, Expansion, Region, Thresholds};
use crate::series::Series;

/// Relative accuracy targeted by a series.
#[derive(Clone, Debug)]
pub(crate) struct Tolerance<R> {
    pub(crate) eps: R,
}

/// Borrowed view of an engine used for one evaluation.
pub(crate) struct Evaluator<'a, R> {
    pub(crate) table: &'a ConstantTable<R>,
    pub(crate) thresholds: &'a Thresholds<R>,
    pub(crate) normal: &'a Tolerance<R>,
    pub(crate) boosted: &'a Tolerance<R>,
    pub(crate) cap: usize,
}

impl<R: Real> Evaluator<'_, R> {
    /// Li_n(x) for 1 <= n <= max weight; `x` at table precision.
    pub(crate) fn li(&self, n: usize, x: &Complex<R>) -> Result<Complex<R>> {
        let Classification {
            region,
            near_boundary,
        } = Region::classify(x, self.thresholds);
        let tolerance = if near_boundary {
            self.boosted
        } else {
            self.normal
        };
        trace!(n, ?region, near_boundary, "li");

        if n == 1 {
            return self.li1(x, region, tolerance);
        }
        match region {
            Region::Zero => Ok(self.zero()),
            Region::One => self.zeta(n).map(Complex::from_real),
            Region::Series(expansion) => self.sum(n, x, expansion, tolerance),
            Region::Inversion(expansion) => self.invert(n, x, expansion, tolerance),
        }
    }

    fn bits(&self) -> usize {
        self.table.bits()
    }

    fn constant(&self, value: i64) -> R {
        R::from_i64(value, self.bits())
    }

    fn zero(&self) -> Complex<R> {
        Complex::new(self.constant(0), self.constant(0))
    }

    fn zeta(&self, n: usize) -> Result<R> {
        self.table
            .zeta(n)
            .cloned()
            .ok_or_else(|| missing("zeta value", n))
    }

    /// Li_1(x) = -ln(1 - x), summed as a power series near 0.
    fn li1(&self, x: &Complex<R>, region: Region, tolerance: &Tolerance<R>) -> Result<Complex<R>> {
        match region {
            Region::Zero => Ok(self.zero()),
            Region::One => Err(PolylogError::Domain(
                "Li_1 has a logarithmic pole at x = 1".to_string(),
            )),
            Region::Series(Expansion::Taylor) => self.taylor(1, x, tolerance),
            Region::Series(_) | Region::Inversion(_) => {
                let gap = Complex::new(self.constant(1) - x.re.clone(), -x.im.clone());
                Ok(-gap.principal_ln())
            }
        }
    }

    fn sum(
        &self,
        n: usize,
        x: &Complex<R>,
        expansion: Expansion,
        tolerance: &Tolerance<R>,
    ) -> Result<Complex<R>> {
        match expansion {
            Expansion::Taylor => self.taylor(n, x, tolerance),
            Expansion::Bernoulli => self.bernoulli(n, x, tolerance),
            Expansion::UnitExpansion => self.unit_expansion(n, x, tolerance),
        }
    }

    fn taylor(&self, n: usize, x: &Complex<R>, tolerance: &Tolerance<R>) -> Result<Complex<R>> {
        let exponent = u32::try_from(n).map_err(|_| missing("weight", n))?;
        let mut series = Series::new("taylor", &x.modulus(), &tolerance.eps, self.cap);
        let mut power = x.clone();
        let mut k: i64 = 1;
        loop {
            let term = power.unscale(self.constant(k).powi(exponent));
            if series.add(term)? {
                return Ok(series.into_sum());
            }
            power = &power * x;
            k += 1;
        }
    }

    fn two_pi(&self) -> R {
        self.table.pi().clone() * self.constant(2)
    }

    fn bernoulli(&self, n: usize, x: &Complex<R>, tolerance: &Tolerance<R>) -> Result<Complex<R>> {
        let coefficients = self
            .table
            .origin_coefficients(n)
            .ok_or_else(|| missing("Bernoulli coefficients for weight", n))?;
        let gap = Complex::new(self.constant(1) - x.re.clone(), -x.im.clone());
        let u = -gap.principal_ln();
        let rho = u.modulus() / self.two_pi();
        let limit = self.cap.min(coefficients.len());

        let mut series = Series::new("bernoulli", &rho, &tolerance.eps, limit);
        let mut power = u.clone();
        for a in coefficients {
            if series.add(power.scale(a.clone()))? {
                return Ok(series.into_sum());
            }
            power = &power * &u;
        }
        Err(PolylogError::ConvergenceFailure {
            series: "bernoulli",
            iterations: coefficients.len(),
        })
    }

    fn unit_expansion(
        &self,
        n: usize,
        x: &Complex<R>,
        tolerance: &Tolerance<R>,
    ) -> Result<Complex<R>> {
        let coefficients = self
            .table
            .unit_coefficients(n)
            .ok_or_else(|| missing("unit expansion coefficients for weight", n))?;
        let harmonic = self
            .table
            .harmonic(n)
            .ok_or_else(|| missing("harmonic number for weight", n))?;
        let inv_factorial = self
            .table
            .inv_factorial(n - 1)
            .ok_or_else(|| missing("inverse factorial", n - 1))?;

        let log = x.principal_ln();
        let rho = log.modulus() / self.two_pi();
        let limit = self.cap.min(coefficients.len());
        let mut series = Series::new("unit expansion", &rho, &tolerance.eps, limit);

        let mut power = Complex::new(self.constant(1), self.constant(0));
        for (k, c) in coefficients.iter().enumerate() {
            if k + 1 == n {
                // The L^(n-1) term carries the logarithmic singularity at 1.
                let singular = Complex::from_real(harmonic.clone()) - (-&log).principal_ln();
                series.add_leading((&power * &singular).scale(inv_factorial.clone()))?;
            } else if k < n {
                series.add_leading(power.scale(c.clone()))?;
            } else if series.add(power.scale(c.clone()))? {
                return Ok(series.into_sum());
            }
            power = &power * &log;
        }
        Err(PolylogError::ConvergenceFailure {
            series: "unit expansion",
            iterations: coefficients.len(),
        })
    }

    fn invert(
        &self,
        n: usize,
        x: &Complex<R>,
        expansion: Expansion,
        tolerance: &Tolerance<R>,
    ) -> Result<Complex<R>> {
        let coefficients = self
            .table
            .inversion_coefficients(n)
            .ok_or_else(|| missing("inversion coefficients for weight", n))?;

        let reflected = self.sum(n, &x.inv(), expansion, tolerance)?;
        let w = (-x).principal_ln() + Complex::new(self.constant(0), self.table.pi().clone());

        // sum_k beta_k (2 pi i)^k w^(n-k) / (n-k)!, from k = n down to 0.
        let mut correction = self.zero();
        let mut power = Complex::new(self.constant(1), self.constant(0));
        for (j, ic) in coefficients.iter().rev().enumerate() {
            let scale = self
                .table
                .inv_factorial(j)
                .ok_or_else(|| missing("inverse factorial", j))?;
            correction = correction + (ic * &power).scale(scale.clone());
            power = &power * &w;
        }

        let signed = if n % 2 == 1 { reflected } else { -reflected };
        Ok(signed - correction)
    }
}

fn missing(what: &str, index: usize) -> PolylogError {
    PolylogError::InvalidArgument(format!("no tabulated {what} {index}"))
}
