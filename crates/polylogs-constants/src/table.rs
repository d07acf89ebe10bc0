//! The constant table.
//!
//! For a maximum weight N and a precision of p bits the table stores, with
//! K = p/2 + 24 tabulated series terms:
//!
//! | entry | range | use |
//! |-------|-------|-----|
//! | B_m (exact, build only) | m <= N+1 | seeds beta_m, B_1 = -1/2 |
//! | zeta(s) | 2 <= s <= max(N, K+1) | values at 1, expansion around 1 |
//! | beta_m = B_m / m! | m <= max(N, K+1) | Bernoulli series, inversion |
//! | a_{n,k} | n <= N, k <= K | Li_n(x) = sum_k a_{n,k} u^(k+1), u = -ln(1-x) |
//! | c_{n,k} | n <= N, k <= n+K | Li_n(e^L) = sum_{k != n-1} c_{n,k} L^k + log term |
//! | H_{n-1} | n <= N | log term of the expansion around 1 |
//! | 1/k! | k <= K+N | |
//! | beta_k (2 pi i)^k | k <= N | inversion formula |
//!
//! The Bernoulli series coefficients follow from Li_{n}' = Li_{n-1} / x
//! written in u: a_{1,k} = [k = 0] and
//! a_{n,k} = 1/(k+1) * sum_{j<=k} a_{n-1,j} beta_{k-j}.
//! Beyond the exact range, beta_{2j} = (-1)^(j+1) 2 zeta(2j) / (2 pi)^(2j).

use std::time::Instant;

use num_complex::Complex;
use num_traits::Zero;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use polylogs_integers::{bernoulli_numbers, factorials, harmonic_number, Integer, Rational};
use polylogs_numeric::{BigFloat, Real};

use crate::zeta::zeta_value;

/// Guard bits carried while the table is computed in `BigFloat`.
const TABLE_GUARD_BITS: usize = 32;

/// Smallest working precision a table can be built for.
pub const MIN_BITS: usize = 8;

/// Errors raised while building a constant table.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// The maximum weight was zero.
    #[error("maximum weight must be at least 1, got {0}")]
    InvalidWeight(usize),

    /// The precision was too small to carry any accuracy.
    #[error("working precision of {0} bits is below the supported minimum of {min}", min = MIN_BITS)]
    InvalidPrecision(usize),
}

/// Precomputed constants for polylogarithms of weight up to `max_weight`.
///
/// Immutable after construction; share it freely between threads.
#[derive(Clone, Debug)]
pub struct ConstantTable<R> {
    max_weight: usize,
    bits: usize,
    terms: usize,
    zeta: Vec<R>,
    beta: Vec<R>,
    origin: Vec<Vec<R>>,
    unit: Vec<Vec<R>>,
    harmonic: Vec<R>,
    inv_factorial: Vec<R>,
    inversion: Vec<Complex<R>>,
    pi: R,
}

/// Number of tabulated series terms for a precision of `bits`.
#[must_use]
pub fn series_terms(bits: usize) -> usize {
    bits / 2 + 24
}

impl<R: Real> ConstantTable<R> {
    /// Builds the table for weights `1..=max_weight` at `bits` of precision.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_weight` is zero or `bits < MIN_BITS`.
    pub fn new(max_weight: usize, bits: usize) -> Result<Self, TableError> {
        if max_weight == 0 {
            return Err(TableError::InvalidWeight(max_weight));
        }
        if bits < MIN_BITS {
            return Err(TableError::InvalidPrecision(bits));
        }

        let started = Instant::now();
        let work = bits + TABLE_GUARD_BITS;
        let terms = series_terms(bits);
        let n_max = max_weight;

        let bernoulli = bernoulli_numbers(n_max + 1);
        let factorials = factorials(n_max + 1);

        // zeta[s] for s in 2..=max(N, K+1); slots 0 and 1 stay zero.
        let zeta_top = n_max.max(terms + 1);
        let mut zeta_big = vec![BigFloat::from_i64(0, work); 2];
        zeta_big.extend(
            (2..=zeta_top)
                .into_par_iter()
                .map(|s| zeta_value(s, work))
                .collect::<Vec<_>>(),
        );

        let pi = BigFloat::pi(work);
        let beta_top = (terms + 1).max(n_max);
        let beta_big = Self::beta_values(&bernoulli, &factorials, &zeta_big, &pi, beta_top, work);

        let mut inv_fact_big = Vec::with_capacity(terms + n_max + 1);
        inv_fact_big.push(BigFloat::from_i64(1, work));
        for k in 1..=terms + n_max {
            let prev = &inv_fact_big[k - 1];
            inv_fact_big.push(prev / &BigFloat::from_i64(index(k), work));
        }

        let origin_big = Self::build_origin(&beta_big, n_max, terms, work);
        let unit_big = Self::build_unit(&zeta_big, &beta_big, &inv_fact_big, n_max, terms, work);

        let harmonic_big: Vec<BigFloat> = (0..=n_max)
            .map(|n| BigFloat::from_rational(&harmonic_number(n.saturating_sub(1)), work))
            .collect();

        let inversion_big = Self::build_inversion(&beta_big, &pi, n_max, work);

        let round = |v: &BigFloat| R::from_big(&v.clone().with_precision(bits));
        let round_all = |v: &[BigFloat]| v.iter().map(round).collect::<Vec<R>>();

        let table = Self {
            max_weight,
            bits,
            terms,
            zeta: round_all(&zeta_big),
            beta: round_all(&beta_big),
            origin: origin_big.iter().map(|row| round_all(row)).collect(),
            unit: unit_big.iter().map(|row| round_all(row)).collect(),
            harmonic: round_all(&harmonic_big),
            inv_factorial: round_all(&inv_fact_big),
            inversion: inversion_big
                .iter()
                .map(|(re, im)| Complex::new(round(re), round(im)))
                .collect(),
            pi: round(&pi),
        };

        debug!(
            max_weight,
            bits,
            terms,
            elapsed_ms = started.elapsed().as_millis(),
            "built polylogarithm constant table"
        );
        Ok(table)
    }

    /// beta_m = B_m / m! for m = 0..=top.
    fn beta_values(
        bernoulli: &[Rational],
        factorials: &[Integer],
        zeta: &[BigFloat],
        pi: &BigFloat,
        top: usize,
        work: usize,
    ) -> Vec<BigFloat> {
        let two_pi = pi * &BigFloat::from_i64(2, work);
        let mut power = BigFloat::from_i64(1, work);
        let mut beta = Vec::with_capacity(top + 1);
        for m in 0..=top {
            if m > 0 {
                power = power * &two_pi;
            }
            let value = if m < bernoulli.len() {
                let exact = bernoulli[m].clone() / Rational::from_integer(factorials[m].clone());
                BigFloat::from_rational(&exact, work)
            } else if m % 2 == 1 {
                BigFloat::from_i64(0, work)
            } else {
                let magnitude = &(&zeta[m] * &BigFloat::from_i64(2, work)) / &power;
                if (m / 2) % 2 == 1 {
                    magnitude
                } else {
                    -magnitude
                }
            };
            beta.push(value);
        }
        beta
    }

    /// a_{n,k}: rows 0..=N, row 0 unused.
    fn build_origin(
        beta: &[BigFloat],
        n_max: usize,
        terms: usize,
        work: usize,
    ) -> Vec<Vec<BigFloat>> {
        let zero = BigFloat::from_i64(0, work);
        let mut rows = vec![Vec::new()];
        let mut first = vec![zero.clone(); terms + 1];
        first[0] = BigFloat::from_i64(1, work);
        rows.push(first);

        for n in 2..=n_max {
            let prev = &rows[n - 1];
            let row: Vec<BigFloat> = (0..=terms)
                .map(|k| {
                    let mut acc = zero.clone();
                    for j in 0..=k {
                        if !prev[j].is_zero() && !beta[k - j].is_zero() {
                            acc = acc + &prev[j] * &beta[k - j];
                        }
                    }
                    acc / BigFloat::from_i64(index(k + 1), work)
                })
                .collect();
            rows.push(row);
        }
        rows
    }

    /// c_{n,k} for k = 0..=n+K: the coefficient of L^k in Li_n(e^L), with the
    /// k = n-1 slot left at zero (that term carries the logarithm). The first
    /// n entries are summed unconditionally, so every row keeps K tail terms.
    fn build_unit(
        zeta: &[BigFloat],
        beta: &[BigFloat],
        inv_factorial: &[BigFloat],
        n_max: usize,
        terms: usize,
        work: usize,
    ) -> Vec<Vec<BigFloat>> {
        let mut rows = vec![Vec::new()];
        for n in 1..=n_max {
            let row = (0..=n + terms)
                .map(|k| {
                    if k + 1 < n {
                        &zeta[n - k] * &inv_factorial[k]
                    } else if k + 1 == n {
                        BigFloat::from_i64(0, work)
                    } else {
                        // zeta(-m) = -B_{m+1} / (m+1) for m >= 1, zeta(0) = -1/2.
                        let m = k - n;
                        let zeta_neg = if m == 0 {
                            beta[1].clone()
                        } else {
                            -(&beta[m + 1] / &inv_factorial[m])
                        };
                        zeta_neg * &inv_factorial[k]
                    }
                })
                .collect();
            rows.push(row);
        }
        rows
    }

    /// beta_k (2 pi i)^k as (re, im) pairs for k = 0..=N.
    fn build_inversion(
        beta: &[BigFloat],
        pi: &BigFloat,
        n_max: usize,
        work: usize,
    ) -> Vec<(BigFloat, BigFloat)> {
        let zero = BigFloat::from_i64(0, work);
        let two_pi = pi * &BigFloat::from_i64(2, work);
        let mut power = BigFloat::from_i64(1, work);
        let mut out = Vec::with_capacity(n_max + 1);
        for k in 0..=n_max {
            if k > 0 {
                power = power * &two_pi;
            }
            let v = &beta[k] * &power;
            // i^k cycles through 1, i, -1, -i.
            out.push(match k % 4 {
                0 => (v, zero.clone()),
                1 => (zero.clone(), v),
                2 => (-v, zero.clone()),
                _ => (zero.clone(), -v),
            });
        }
        out
    }

    /// Largest supported weight.
    #[must_use]
    pub fn max_weight(&self) -> usize {
        self.max_weight
    }

    /// Precision the entries were rounded to.
    #[must_use]
    pub fn bits(&self) -> usize {
        self.bits
    }

    /// Number of tabulated series terms K (indices 0..=K).
    #[must_use]
    pub fn terms(&self) -> usize {
        self.terms
    }

    /// zeta(s) for 2 <= s <= max(N, K+1).
    #[must_use]
    pub fn zeta(&self, s: usize) -> Option<&R> {
        if s < 2 {
            return None;
        }
        self.zeta.get(s)
    }

    /// beta_m = B_m / m! for m <= max(N, K+1).
    #[must_use]
    pub fn beta(&self, m: usize) -> Option<&R> {
        self.beta.get(m)
    }

    /// Bernoulli series coefficients a_{n,0..=K} of Li_n.
    #[must_use]
    pub fn origin_coefficients(&self, n: usize) -> Option<&[R]> {
        self.row(&self.origin, n)
    }

    /// Coefficients c_{n,0..=n+K} of the expansion of Li_n around 1.
    #[must_use]
    pub fn unit_coefficients(&self, n: usize) -> Option<&[R]> {
        self.row(&self.unit, n)
    }

    /// H_{n-1}, the harmonic number in the log term of weight n.
    #[must_use]
    pub fn harmonic(&self, n: usize) -> Option<&R> {
        if n == 0 {
            return None;
        }
        self.harmonic.get(n)
    }

    /// 1/k! for k <= K+N.
    #[must_use]
    pub fn inv_factorial(&self, k: usize) -> Option<&R> {
        self.inv_factorial.get(k)
    }

    /// beta_k (2 pi i)^k for k = 0..=n.
    #[must_use]
    pub fn inversion_coefficients(&self, n: usize) -> Option<&[Complex<R>]> {
        if n == 0 || n > self.max_weight {
            return None;
        }
        Some(&self.inversion[..=n])
    }

    /// Pi at the table precision.
    #[must_use]
    pub fn pi(&self) -> &R {
        &self.pi
    }

    fn row<'a>(&self, rows: &'a [Vec<R>], n: usize) -> Option<&'a [R]> {
        if n == 0 || n > self.max_weight {
            return None;
        }
        rows.get(n).map(Vec::as_slice)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn index(k: usize) -> i64 {
    k as i64
}
