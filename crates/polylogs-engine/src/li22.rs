//! Evaluation of Li_{2,2}(x, y) = sum_{m > k >= 1} x^m y^k / (m^2 k^2).
//!
//! The pair is first reduced by the identities
//!
//! ```text
//! stuffle:    Li_{2,2}(x, y) = Li_2(x) Li_2(y) - Li_4(xy) - Li_{2,2}(y, x)
//! reflection: Li_{2,2}(x, y) = Li_2(z) [Li_2(x) + Li_2(1/y)]
//!                            + 2 Li_1(z) [Li_3(1/y) - Li_3(x)] - 3 Li_4(x)
//!                            - Li_{2,2}(1/y, z) - 2 Li_{3,1}(1/y, z),   z = xy
//! ```
//!
//! and the residual Li_{s,t}(u, v) with (s, t) in {(2, 2), (3, 1)} is summed
//! by one of three kernels, c = uv:
//!
//! - `Nested`: sum_m u^m / m^s Q_{m-1}, Q_j = sum_{k<=j} v^k / k^t;
//! - `ProductSeries`: sum_j u^j G_j(c), valid for |u| < 1 whatever |v|,
//!   where G_j is built from T_{s,j} = c^-j (Li_s(c) - sum_{m<=j} c^m / m^s)
//!   and D_j = D_{j-1} / c + kappa - 1/j, kappa = -(1 - c) ln(1 - c) / c;
//! - `TailSeries`: sum_k v^k / k^t (Li_s(u) - sum_{m<=k} u^m / m^s).
//!
//! When the best kernel converges too slowly for the term cap, and on the
//! unit torus |x| = |y| = 1 where no reduction converges geometrically,
//! the residual comes from its integral form instead
//!
//! ```text
//! Li_{s,t}(u, v) = u / (s-1)! int_0^1 (-ln t)^(s-1) Li_t(c t) / (1 - u t) dt,   |u| <= 1
//! ```
//!
//! summed by tanh-sinh quadrature. For c on (1, inf) the point t = 1/c,
//! where Li_t(c t) stops being analytic, is made an end of two subintervals.

use num_complex::Complex;
use polylogs_numeric::{ComplexExt, Real};
use tracing::trace;

use crate::error::{PolylogError, Result};
use crate::polylog::Evaluator;
use crate::quadrature::{Node, TanhSinh};
use crate::region::{Kernel, Strategy};
use crate::series::Series;

/// Name reported by the integral form of a residual.
const INTEGRAL: &str = "tanh-sinh";

/// Depth-two weights of a residual series.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Weights {
    /// Li_{2,2}.
    TwoTwo,
    /// Li_{3,1}.
    ThreeOne,
}

impl Weights {
    fn outer(self) -> u32 {
        match self {
            Weights::TwoTwo => 2,
            Weights::ThreeOne => 3,
        }
    }

    fn inner(self) -> u32 {
        match self {
            Weights::TwoTwo => 2,
            Weights::ThreeOne => 1,
        }
    }
}

/// Where the integrand of the integral form loses analyticity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
    /// Nowhere on the interval.
    Clear,
    /// At the end of the interval, t = 1/c.
    AtEnd,
    /// At the start of the interval, t = 1/c.
    AtStart,
}

impl<R: Real> Evaluator<'_, R> {
    /// Li_{2,2}(x, y); both arguments at table precision.
    pub(crate) fn li22(&self, x: &Complex<R>, y: &Complex<R>) -> Result<Complex<R>> {
        let zero = R::from_i64(0, self.table.bits());
        if (x.re.is_exact_zero() && x.im.is_exact_zero())
            || (y.re.is_exact_zero() && y.im.is_exact_zero())
        {
            return Ok(Complex::new(zero.clone(), zero));
        }

        let Some((strategy, rate)) = Strategy::select(x, y) else {
            trace!("li22 on the unit torus");
            return self.integral(Weights::TwoTwo, x, y);
        };
        trace!(strategy = strategy.name(), rate = rate.to_f64(), "li22");
        self.li22_by(strategy, x, y)
    }

    /// Li_{2,2}(x, y) through the given reduction, which must be admissible
    /// for (x, y).
    pub(crate) fn li22_by(
        &self,
        strategy: Strategy,
        x: &Complex<R>,
        y: &Complex<R>,
    ) -> Result<Complex<R>> {
        let z = x * y;
        match strategy {
            Strategy::Direct => self.residual(Weights::TwoTwo, x, y),
            Strategy::Swapped => {
                let swapped = self.residual(Weights::TwoTwo, y, x)?;
                self.stuffle(x, y, &z, swapped)
            }
            Strategy::Reflected => self.reflect(x, y, &z),
            Strategy::SwapReflected => {
                let swapped = self.reflect(y, x, &z)?;
                self.stuffle(x, y, &z, swapped)
            }
        }
    }

    /// Whether a geometric series of this rate reaches the table precision
    /// within the term cap.
    #[allow(clippy::cast_precision_loss)]
    fn within_budget(&self, rate: &R) -> bool {
        let rate = rate.to_f64();
        if rate <= 0.0 {
            return true;
        }
        let needed = self.table.bits() as f64 * std::f64::consts::LN_2 / -rate.ln();
        rate < 1.0 && needed.is_finite() && needed <= self.cap as f64
    }

    /// Li_2(x) Li_2(y) - Li_4(z) - swapped.
    fn stuffle(
        &self,
        x: &Complex<R>,
        y: &Complex<R>,
        z: &Complex<R>,
        swapped: Complex<R>,
    ) -> Result<Complex<R>> {
        let product = self.li(2, x)? * self.li(2, y)?;
        Ok(product - self.li(4, z)? - swapped)
    }

    /// The reflection y -> 1/y.
    fn reflect(&self, x: &Complex<R>, y: &Complex<R>, z: &Complex<R>) -> Result<Complex<R>> {
        let bits = self.table.bits();
        let iy = y.inv();
        let two = R::from_i64(2, bits);
        let three = R::from_i64(3, bits);

        let li2_z = self.li(2, z)?;
        let li2_x = self.li(2, x)?;
        let li2_iy = self.li(2, &iy)?;
        let li4_x = self.li(4, x)?;
        let a = self.residual(Weights::TwoTwo, &iy, z)?;
        let b = self.residual(Weights::ThreeOne, &iy, z)?;

        let mut value = li2_z * (li2_x + li2_iy) - li4_x.scale(three) - a - b.scale(two.clone());
        // Li_1 has its pole at z = 1, where the bracket vanishes.
        if !(z.im.is_exact_zero() && z.re == R::from_i64(1, bits)) {
            let bracket = self.li(3, &iy)? - self.li(3, x)?;
            value = value + (self.li(1, z)? * bracket).scale(two);
        }
        Ok(value)
    }

    /// Li_{s,t}(u, v) with the kernel suited to (u, v).
    fn residual(&self, weights: Weights, u: &Complex<R>, v: &Complex<R>) -> Result<Complex<R>> {
        let (kernel, rate) = Kernel::select(u, v);
        if !self.within_budget(&rate) {
            trace!(
                kernel = kernel.name(),
                ?weights,
                rate = rate.to_f64(),
                "series too slow, integrating"
            );
            return self.integral(weights, u, v);
        }
        trace!(kernel = kernel.name(), ?weights, rate = rate.to_f64(), "residual series");
        match kernel {
            Kernel::Nested => self.nested(weights, u, v, &rate),
            Kernel::ProductSeries => self.product_series(weights, u, v, &rate),
            Kernel::TailSeries => self.tail_series(weights, u, v, &rate),
        }
    }

    fn power_of(&self, k: i64, exponent: u32) -> R {
        R::from_i64(k, self.table.bits()).powi(exponent)
    }

    fn nested(&self, weights: Weights, u: &Complex<R>, v: &Complex<R>, rate: &R) -> Result<Complex<R>> {
        let mut series = Series::new(Kernel::Nested.name(), rate, &self.normal.eps, self.cap);
        let mut inner = Complex::new(R::from_i64(0, self.table.bits()), R::from_i64(0, self.table.bits()));
        let mut v_power = Complex::new(R::from_i64(1, self.table.bits()), R::from_i64(0, self.table.bits()));
        let mut u_power = u.clone();
        let mut m: i64 = 2;
        loop {
            v_power = &v_power * v;
            inner = inner + v_power.unscale(self.power_of(m - 1, weights.inner()));
            u_power = &u_power * u;
            let term = (&u_power * &inner).unscale(self.power_of(m, weights.outer()));
            if series.add(term)? {
                return Ok(series.into_sum());
            }
            m += 1;
        }
    }

    fn product_series(
        &self,
        weights: Weights,
        u: &Complex<R>,
        v: &Complex<R>,
        rate: &R,
    ) -> Result<Complex<R>> {
        let bits = self.table.bits();
        let one = Complex::new(R::from_i64(1, bits), R::from_i64(0, bits));
        let two = R::from_i64(2, bits);
        let c = u * v;
        let c_is_one = c.im.is_exact_zero() && c.re == one.re;

        let li2_c = self.li(2, &c)?;
        let mut tail2 = li2_c.clone();
        let mut tail3 = match weights {
            Weights::ThreeOne => Some(self.li(3, &c)?),
            Weights::TwoTwo => None,
        };
        let kappa = if c_is_one {
            Complex::new(R::from_i64(0, bits), R::from_i64(0, bits))
        } else {
            let gap = &one - &c;
            -(&gap * &gap.principal_ln()) / &c
        };

        let mut delta = Complex::new(R::from_i64(0, bits), R::from_i64(0, bits));
        let mut series = Series::new(Kernel::ProductSeries.name(), rate, &self.normal.eps, self.cap);
        let mut u_power = one.clone();
        let mut j: i64 = 1;
        loop {
            let jj = R::from_i64(j, bits);
            let j2 = jj.clone() * jj.clone();
            let j3 = j2.clone() * jj.clone();
            tail2 = &tail2 / &c - Complex::from_real(R::from_i64(1, bits) / j2.clone());
            delta = &delta / &c + &kappa - Complex::from_real(R::from_i64(1, bits) / jj.clone());

            let g = match tail3.as_mut() {
                None => (&li2_c + &tail2).unscale(j2) + delta.scale(two.clone()).unscale(j3),
                Some(t3) => {
                    *t3 = &*t3 / &c - Complex::from_real(R::from_i64(1, bits) / j3.clone());
                    -(delta.unscale(j3) + tail2.unscale(j2) + t3.unscale(jj))
                }
            };

            u_power = &u_power * u;
            if series.add(&u_power * &g)? {
                return Ok(series.into_sum());
            }
            j += 1;
        }
    }

    fn tail_series(
        &self,
        weights: Weights,
        u: &Complex<R>,
        v: &Complex<R>,
        rate: &R,
    ) -> Result<Complex<R>> {
        let bits = self.table.bits();
        let mut remainder = self.li(weights.outer() as usize, u)?;
        let mut u_power = Complex::new(R::from_i64(1, bits), R::from_i64(0, bits));
        let mut v_power = u_power.clone();
        let mut series = Series::new(Kernel::TailSeries.name(), rate, &self.normal.eps, self.cap);
        let mut k: i64 = 1;
        loop {
            u_power = &u_power * u;
            v_power = &v_power * v;
            remainder = remainder - u_power.unscale(self.power_of(k, weights.outer()));
            let term = (&v_power * &remainder).unscale(self.power_of(k, weights.inner()));
            if series.add(term)? {
                return Ok(series.into_sum());
            }
            k += 1;
        }
    }

    /// Li_{s,t}(u, v) from its integral form; needs |u| <= 1.
    fn integral(&self, weights: Weights, u: &Complex<R>, v: &Complex<R>) -> Result<Complex<R>> {
        let bits = self.table.bits();
        let zero = R::from_i64(0, bits);
        let one = R::from_i64(1, bits);
        let slack = self.normal.eps.clone() * R::from_i64(256, bits);
        if u.norm_sqr() > one.clone() + slack {
            return Err(PolylogError::ConvergenceFailure {
                series: INTEGRAL,
                iterations: 0,
            });
        }

        let c = u * v;
        let rule = TanhSinh::new(INTEGRAL, self.table.pi(), &self.normal.eps, self.cap);
        let value = if c.im.is_exact_zero() && c.re > one {
            let pole = one.clone() / c.re.clone();
            let below = rule.integrate(&zero, &pole, |node| {
                self.integrand(weights, u, &c, &pole, node, Branch::AtEnd)
            })?;
            let above = rule.integrate(&pole, &one, |node| {
                self.integrand(weights, u, &c, &one, node, Branch::AtStart)
            })?;
            below + above
        } else {
            rule.integrate(&zero, &one, |node| {
                self.integrand(weights, u, &c, &one, node, Branch::Clear)
            })?
        };
        Ok(value * u)
    }

    /// (-ln t)^(s-1) / (s-1)! Li_t(c t) / (1 - u t) at a node of [_, end].
    fn integrand(
        &self,
        weights: Weights,
        u: &Complex<R>,
        c: &Complex<R>,
        end: &R,
        node: &Node<R>,
        branch: Branch,
    ) -> Result<Complex<R>> {
        let bits = self.table.bits();
        let one = R::from_i64(1, bits);
        let half = one.clone() / R::from_i64(2, bits);
        // 1 - t, exact near t = 1.
        let gap = (one.clone() - end.clone()) + node.to_end.clone();
        let log = if gap < half {
            -(-gap.clone()).ln_1p()
        } else {
            -node.t.ln()
        };

        let (power, inner) = match weights {
            Weights::TwoTwo => (log, self.li(2, &c.scale(node.t.clone()))?),
            Weights::ThreeOne => {
                // 1 - c t, measured from t = 1/c when that is an end.
                let rest = match branch {
                    Branch::Clear => (Complex::from_real(one.clone()) - c) + c.scale(gap.clone()),
                    Branch::AtEnd => c.scale(node.to_end.clone()),
                    // c is real here; a +0 imaginary part keeps Li_1 below the cut.
                    Branch::AtStart => {
                        Complex::from_real(-(c.re.clone() * node.from_start.clone()))
                    }
                };
                let square = log.clone() * log / R::from_i64(2, bits);
                (square, -rest.principal_ln())
            }
        };
        let denominator = (Complex::from_real(one) - u) + u.scale(gap);
        Ok((inner / denominator).scale(power))
    }
}
