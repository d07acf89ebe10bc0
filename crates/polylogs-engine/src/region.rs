//! Region classification.
//!
//! # Li_n
//!
//! ```text
//!              |x| <= 1                      |x| > 1
//!   +-------------------------------+  +--------------------+
//!   | x = 0          Zero           |  |                    |
//!   | x = 1          One            |  |  Inversion(e),     |
//!   | |x| <= r0      Taylor         |  |  e classifies 1/x  |
//!   | Re x < 1/2     Bernoulli      |  |                    |
//!   | Re x >= 1/2    UnitExpansion  |  |                    |
//!   +-------------------------------+  +--------------------+
//! ```
//!
//! # Li_{2,2}
//!
//! A pair (x, y) is reduced by at most one stuffle and one reflection to a
//! residual double series Li_{s,t}(u, v). Each [`Strategy`] leads to a
//! different (u, v); the one whose residual converges fastest wins.

use num_complex::Complex;
use polylogs_numeric::{ComplexExt, Real};
use smallvec::SmallVec;

/// The series summed for an argument of modulus at most one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// Sum of x^k / k^n.
    Taylor,
    /// Series in u = -ln(1 - x) with Bernoulli-number coefficients.
    Bernoulli,
    /// Series in L = ln x around x = 1.
    UnitExpansion,
}

impl Expansion {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Expansion::Taylor => "taylor",
            Expansion::Bernoulli => "bernoulli",
            Expansion::UnitExpansion => "unit expansion",
        }
    }
}

/// Where an argument of Li_n lies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// x = 0.
    Zero,
    /// x = 1.
    One,
    /// |x| <= 1, summed directly.
    Series(Expansion),
    /// |x| > 1; 1/x is summed with the given expansion.
    Inversion(Expansion),
}

/// A region together with the boundary flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// The region of the argument.
    pub region: Region,
    /// Set when ||x| - 1| or |1 - x| is below the boundary tolerance.
    pub near_boundary: bool,
}

/// Squared thresholds of the classifier, at the engine precision.
#[derive(Clone, Debug)]
pub struct Thresholds<R> {
    taylor_sq: R,
    half: R,
    inner_sq: R,
    outer_sq: R,
    tolerance_sq: R,
}

impl<R: Real> Thresholds<R> {
    /// Builds the thresholds for a Taylor radius and a boundary tolerance.
    ///
    /// Returns `None` if a value is not finite.
    #[must_use]
    pub fn new(taylor_radius: f64, boundary_tolerance: f64, bits: usize) -> Option<Self> {
        let r0 = R::from_f64(taylor_radius, bits)?;
        let tol = R::from_f64(boundary_tolerance, bits)?;
        let one = R::from_i64(1, bits);
        let inner = one.clone() - tol.clone();
        let outer = one + tol.clone();
        Some(Self {
            taylor_sq: r0.clone() * r0,
            half: R::from_i64(1, bits) / R::from_i64(2, bits),
            inner_sq: inner.clone() * inner,
            outer_sq: outer.clone() * outer,
            tolerance_sq: tol.clone() * tol,
        })
    }
}

impl Region {
    /// Classifies an argument of Li_n.
    pub fn classify<R: Real>(x: &Complex<R>, thresholds: &Thresholds<R>) -> Classification {
        let norm_sq = x.norm_sqr();
        let one = R::from_i64(1, ComplexExt::precision(x));
        let gap = Complex::new(one.clone() - x.re.clone(), x.im.clone());

        let near_circle = norm_sq > thresholds.inner_sq && norm_sq < thresholds.outer_sq;
        let near_boundary = near_circle || gap.norm_sqr() < thresholds.tolerance_sq;

        let region = if x.re.is_exact_zero() && x.im.is_exact_zero() {
            Region::Zero
        } else if x.im.is_exact_zero() && x.re == one {
            Region::One
        } else if norm_sq > one {
            // 1/x has squared modulus 1/|x|^2 and real part Re x / |x|^2.
            let inv_sq = one.clone() / norm_sq.clone();
            let inv_re = x.re.clone() / norm_sq;
            Region::Inversion(Self::expansion(&inv_sq, &inv_re, thresholds))
        } else {
            Region::Series(Self::expansion(&norm_sq, &x.re, thresholds))
        };

        Classification {
            region,
            near_boundary,
        }
    }

    fn expansion<R: Real>(norm_sq: &R, re: &R, thresholds: &Thresholds<R>) -> Expansion {
        if *norm_sq <= thresholds.taylor_sq {
            Expansion::Taylor
        } else if *re < thresholds.half {
            Expansion::Bernoulli
        } else {
            Expansion::UnitExpansion
        }
    }
}

/// How Li_{2,2}(x, y) is reduced to a residual double series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Li_{2,2}(x, y) itself.
    Direct,
    /// The stuffle product: Li_{2,2}(y, x) is summed.
    Swapped,
    /// Reflection y -> 1/y: Li_{2,2}(1/y, xy) and Li_{3,1}(1/y, xy).
    Reflected,
    /// Stuffle, then reflection of the swapped pair.
    SwapReflected,
}

impl Strategy {
    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Swapped => "swapped",
            Strategy::Reflected => "reflected",
            Strategy::SwapReflected => "swap-reflected",
        }
    }

    /// Picks the strategy with the smallest convergence rate.
    ///
    /// Candidates are tried in declaration order and a later one only wins
    /// with a strictly smaller rate. Returns `None` if no candidate
    /// converges (both arguments on the unit circle).
    pub fn select<R: Real>(x: &Complex<R>, y: &Complex<R>) -> Option<(Strategy, R)> {
        let z = x * y;
        let mut candidates: SmallVec<[(Strategy, Option<R>); 4]> = SmallVec::new();
        candidates.push((Strategy::Direct, residual_rate(x, y)));
        candidates.push((Strategy::Swapped, residual_rate(y, x)));

        let bits = ComplexExt::precision(x).max(ComplexExt::precision(y));
        let one = R::from_i64(1, bits);
        if y.norm_sqr() > one {
            candidates.push((Strategy::Reflected, residual_rate(&y.inv(), &z)));
        }
        if x.norm_sqr() > one {
            candidates.push((Strategy::SwapReflected, residual_rate(&x.inv(), &z)));
        }

        let mut best: Option<(Strategy, R)> = None;
        for (strategy, rate) in candidates {
            let Some(rate) = rate else { continue };
            if best.as_ref().map_or(true, |(_, r)| rate < *r) {
                best = Some((strategy, rate));
            }
        }
        best.filter(|(_, rate)| *rate < one)
    }
}

/// Geometric convergence rate of the residual series Li_{s,t}(u, v).
///
/// `None` stands for divergence.
pub fn residual_rate<R: Real>(u: &Complex<R>, v: &Complex<R>) -> Option<R> {
    let bits = ComplexExt::precision(u).max(ComplexExt::precision(v));
    let one = R::from_i64(1, bits);
    let u_abs = u.modulus();
    if u_abs > one {
        return None;
    }
    if v.modulus() >= one {
        return (u_abs < one).then_some(u_abs);
    }
    Some((u * v).modulus())
}

/// The summation scheme for a residual series Li_{s,t}(u, v).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// The defining sum over m > k >= 1.
    Nested,
    /// Outer sum over powers of u with coefficients in c = uv.
    ProductSeries,
    /// Sum over powers of v with tails of Li_s(u).
    TailSeries,
}

impl Kernel {
    /// Short name used in logs and errors.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kernel::Nested => "nested double",
            Kernel::ProductSeries => "product",
            Kernel::TailSeries => "tail",
        }
    }

    /// Chooses the kernel for Li_{s,t}(u, v) and returns its rate.
    pub fn select<R: Real>(u: &Complex<R>, v: &Complex<R>) -> (Kernel, R) {
        let bits = ComplexExt::precision(u).max(ComplexExt::precision(v));
        let one = R::from_i64(1, bits);
        let half = one.clone() / R::from_i64(2, bits);
        let u_abs = u.modulus();
        let c_abs = (u * v).modulus();

        let outer = if u_abs > c_abs { u_abs.clone() } else { c_abs.clone() };
        if outer <= half {
            (Kernel::Nested, outer)
        } else if v.modulus() >= one {
            (Kernel::ProductSeries, u_abs)
        } else {
            (Kernel::TailSeries, c_abs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds<f64> {
        Thresholds::new(0.25, 1.0 / 16.0, 53).unwrap()
    }

    fn classify(re: f64, im: f64) -> Classification {
        Region::classify(&Complex::new(re, im), &thresholds())
    }

    #[test]
    fn test_special_points() {
        assert_eq!(classify(0.0, 0.0).region, Region::Zero);
        assert_eq!(classify(1.0, 0.0).region, Region::One);
        assert!(classify(1.0, 0.0).near_boundary);
        assert_eq!(classify(1.0, -0.0).region, Region::One);
    }

    #[test]
    fn test_bounded_regions() {
        assert_eq!(classify(0.25, 0.0).region, Region::Series(Expansion::Taylor));
        assert_eq!(classify(0.25, 0.25).region, Region::Series(Expansion::Bernoulli));
        assert_eq!(classify(0.75, 0.25).region, Region::Series(Expansion::UnitExpansion));
        assert_eq!(classify(-0.9, 0.0).region, Region::Series(Expansion::Bernoulli));
        assert!(!classify(0.25, 0.25).near_boundary);
    }

    #[test]
    fn test_inversion_reclassifies_reciprocal() {
        assert_eq!(classify(2.0, 4.0).region, Region::Inversion(Expansion::Taylor));
        assert_eq!(classify(2.0, 0.0).region, Region::Inversion(Expansion::UnitExpansion));
        assert_eq!(classify(-1.5, 0.0).region, Region::Inversion(Expansion::Bernoulli));
    }

    #[test]
    fn test_boundary_flag() {
        let unit = classify(0.01, (9899.0f64).sqrt() / 100.0);
        assert_eq!(unit.region, Region::Series(Expansion::Bernoulli));
        assert!(unit.near_boundary);
        assert!(classify(1.03, 0.0).near_boundary);
        assert!(!classify(1.2, 0.0).near_boundary);
    }

    #[test]
    fn test_strategy_selection() {
        let c = |re: f64, im: f64| Complex::new(re, im);
        let pick = |x: Complex<f64>, y: Complex<f64>| Strategy::select(&x, &y).map(|(s, _)| s);
        assert_eq!(pick(c(0.125, 0.125), c(0.125, 0.125)), Some(Strategy::Direct));
        assert_eq!(pick(c(2.0, 0.125), c(0.125, 0.125)), Some(Strategy::Swapped));
        assert_eq!(pick(c(2.0, 0.125), c(2.0, 0.125)), Some(Strategy::Reflected));
        assert_eq!(pick(c(0.5, 0.5), c(2.0, 2.0)), Some(Strategy::Reflected));
        assert_eq!(pick(c(2.0, 0.0), c(0.5, 0.0)), Some(Strategy::Swapped));
        assert_eq!(pick(c(0.5, 0.0), c(2.0, 0.0)), Some(Strategy::Direct));
        assert_eq!(pick(c(0.0, 1.0), c(-1.0, 0.0)), None);
    }

    #[test]
    fn test_kernel_selection() {
        let c = |re: f64, im: f64| Complex::new(re, im);
        let kernel = |u: Complex<f64>, v: Complex<f64>| Kernel::select(&u, &v).0;
        assert_eq!(kernel(c(0.125, 0.125), c(0.125, 0.125)), Kernel::Nested);
        assert_eq!(kernel(c(0.2, -0.9), c(0.2, -0.9)), Kernel::TailSeries);
        assert_eq!(kernel(c(0.5, 0.0), c(2.0, 0.0)), Kernel::ProductSeries);
        let (_, rate) = Kernel::select(&c(0.5, 0.0), &c(2.0, 0.0));
        assert!((rate - 0.5).abs() < 1e-15);
    }
}
