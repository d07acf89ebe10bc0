//! Tanh-sinh quadrature over a subinterval of [0, 1].
//!
//! The substitution tau = (1 + tanh((pi/2) sinh u)) / 2 maps the real line
//! onto (0, 1) and makes the transformed integrand decay double
//! exponentially, so integrable singularities at either end cost nothing
//! extra. With q = exp(-pi sinh u):
//!
//! ```text
//! tau = 1 / (1 + q)    1 - tau = q / (1 + q)    dtau/du = pi cosh(u) tau (1 - tau)
//! ```
//!
//! Both tau and 1 - tau are formed without cancellation and every node
//! carries its distance to both ends, so an integrand that is singular at
//! an end sees the true gap rather than a rounded difference. The
//! trapezoidal step starts at 1/2 and is halved, reusing every earlier
//! node, until two successive estimates agree.

use num_complex::Complex;
use polylogs_numeric::Real;
use tracing::{trace, warn};

use crate::error::{PolylogError, Result};

/// Halvings of the initial step before the rule gives up.
const MAX_LEVELS: u32 = 10;

/// Nodes within `eps / EDGE_SCALE` of an end (in units of the width) are
/// dropped; the same factor loosens the agreement test, whose error is
/// roughly squared at the next level.
const EDGE_SCALE: i64 = 256;

/// An abscissa of the rule on [a, b].
pub(crate) struct Node<R> {
    /// The point itself.
    pub(crate) t: R,
    /// t - a.
    pub(crate) from_start: R,
    /// b - t.
    pub(crate) to_end: R,
}

/// A tanh-sinh rule at a fixed relative accuracy.
pub(crate) struct TanhSinh<'a, R> {
    name: &'static str,
    pi: &'a R,
    eps: &'a R,
    limit: usize,
}

impl<'a, R: Real> TanhSinh<'a, R> {
    /// A rule targeting relative accuracy `eps` with at most `limit`
    /// integrand evaluations.
    pub(crate) fn new(name: &'static str, pi: &'a R, eps: &'a R, limit: usize) -> Self {
        Self {
            name,
            pi,
            eps,
            limit,
        }
    }

    /// Integrates `f` over [a, b].
    pub(crate) fn integrate<F>(&self, a: &R, b: &R, mut f: F) -> Result<Complex<R>>
    where
        F: FnMut(&Node<R>) -> Result<Complex<R>>,
    {
        let bits = self.pi.precision();
        let width = b.clone() - a.clone();
        let scale = R::from_i64(EDGE_SCALE, bits);
        let edge = self.eps.clone() / scale.clone();
        let agreement = self.eps.clone() * scale;
        let half = R::from_i64(1, bits) / R::from_i64(2, bits);

        let mut evaluations = 0usize;
        let mut at = |tau: &R, rest: &R| -> Result<Complex<R>> {
            if evaluations >= self.limit {
                warn!(quadrature = self.name, evaluations, "evaluation budget exhausted");
                return Err(PolylogError::ConvergenceFailure {
                    series: self.name,
                    iterations: evaluations,
                });
            }
            evaluations += 1;
            let from_start = width.clone() * tau.clone();
            let node = Node {
                t: a.clone() + from_start.clone(),
                from_start,
                to_end: width.clone() * rest.clone(),
            };
            f(&node)
        };

        // u = 0: tau = 1/2 with weight pi/4.
        let centre = self.pi.clone() / R::from_i64(4, bits);
        let mut sum = at(&half, &half)?.scale(centre);
        let mut step = half.clone();
        let mut estimate: Option<Complex<R>> = None;

        for level in 0..=MAX_LEVELS {
            if level > 0 {
                step = step * half.clone();
            }
            // The first level takes every multiple of the step, later ones
            // only the new odd multiples.
            let stride = if level == 0 { 1 } else { 2 };
            let mut k: i64 = 1;
            loop {
                let u = step.clone() * R::from_i64(k, bits);
                let Some((tau, rest, weight)) = self.abscissa(&u, &edge) else {
                    break;
                };
                // u and -u swap tau with 1 - tau.
                let pair = at(&tau, &rest)? + at(&rest, &tau)?;
                sum = sum + pair.scale(weight);
                k += stride;
            }

            let next = sum.scale(step.clone());
            if let Some(previous) = estimate {
                let change = (&next - &previous).norm_sqr();
                if change <= agreement.clone() * agreement.clone() * next.norm_sqr() {
                    trace!(quadrature = self.name, level, "quadrature converged");
                    return Ok(next);
                }
            }
            estimate = Some(next);
        }

        warn!(quadrature = self.name, evaluations, "step refinement exhausted");
        Err(PolylogError::ConvergenceFailure {
            series: self.name,
            iterations: evaluations,
        })
    }

    /// (tau, 1 - tau, weight) at u > 0, or `None` once the node is within
    /// `edge` of the end.
    fn abscissa(&self, u: &R, edge: &R) -> Option<(R, R, R)> {
        let bits = u.precision();
        let one = R::from_i64(1, bits);
        let two = R::from_i64(2, bits);
        let grow = u.exp();
        let shrink = one.clone() / grow.clone();
        let sinh = (grow.clone() - shrink.clone()) / two.clone();
        let cosh = (grow + shrink) / two;

        let q = (-(self.pi.clone() * sinh)).exp();
        let denominator = one.clone() + q.clone();
        let rest = q / denominator.clone();
        if rest < *edge {
            return None;
        }
        let tau = one / denominator;
        let weight = self.pi.clone() * cosh * tau.clone() * rest.clone();
        Some((tau, rest, weight))
    }
}
