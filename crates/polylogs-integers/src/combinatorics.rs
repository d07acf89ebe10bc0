//! Exact combinatorial sequences.
//!
//! These feed the polylogarithm constant table:
//!
//! - factorials and binomial rows for the Taylor and inversion coefficients
//! - Bernoulli numbers B_m with the convention B_1 = -1/2
//! - harmonic numbers for the logarithmic term of the expansion around 1
//! - the partial sums d_k of Borwein's zeta algorithm

use num_traits::{One, Zero};

use crate::{Integer, Rational};

/// Returns `[0!, 1!, ..., n!]`.
#[must_use]
pub fn factorials(n: usize) -> Vec<Integer> {
    let mut out = Vec::with_capacity(n + 1);
    let mut acc = Integer::one();
    out.push(acc.clone());
    for k in 1..=n {
        acc = acc * Integer::from_usize(k);
        out.push(acc.clone());
    }
    out
}

/// Returns the row `[C(n, 0), C(n, 1), ..., C(n, n)]` of Pascal's triangle.
#[must_use]
pub fn binomial_row(n: usize) -> Vec<Integer> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = Integer::one();
    row.push(c.clone());
    for k in 1..=n {
        // C(n, k) = C(n, k-1) * (n - k + 1) / k, exact at every step.
        c = c * Integer::from_usize(n - k + 1) / Integer::from_usize(k);
        row.push(c.clone());
    }
    row
}

/// Returns the Bernoulli numbers `[B_0, B_1, ..., B_max]`.
///
/// Uses the recurrence `sum_{j=0}^{m} C(m+1, j) B_j = 0` for m >= 1, which
/// gives B_1 = -1/2. Odd indices above 1 vanish and are not summed.
#[must_use]
pub fn bernoulli_numbers(max: usize) -> Vec<Rational> {
    let mut b: Vec<Rational> = Vec::with_capacity(max + 1);
    b.push(Rational::one());
    for m in 1..=max {
        if m > 1 && m % 2 == 1 {
            b.push(Rational::zero());
            continue;
        }
        let row = binomial_row(m + 1);
        let mut acc = Rational::zero();
        for (j, bj) in b.iter().enumerate() {
            if !bj.is_zero() {
                acc = acc + &(Rational::from_integer(row[j].clone()) * bj);
            }
        }
        let scale = Rational::new(Integer::new(-1), Integer::from_usize(m + 1));
        b.push(acc * scale);
    }
    b
}

/// Computes the harmonic number H_n = 1 + 1/2 + ... + 1/n (H_0 = 0).
#[must_use]
pub fn harmonic_number(n: usize) -> Rational {
    (1..=n).fold(Rational::zero(), |acc, i| {
        acc + Rational::new(Integer::one(), Integer::from_usize(i))
    })
}

/// Returns the Borwein partial sums `[d_0, ..., d_n]` for an n-term zeta
/// evaluation.
///
/// `d_k = n * sum_{i<=k} (n+i-1)! 4^i / ((n-i)! (2i)!)`, all integers.
/// The successive summands satisfy
/// `t_i = t_{i-1} * 2(n+i-1)(n-i+1) / (i(2i-1))` with `t_0 = 1`.
///
/// # Panics
///
/// Panics if `n` is zero.
#[must_use]
pub fn borwein_weights(n: usize) -> Vec<Integer> {
    assert!(n > 0, "Borwein's algorithm needs at least one term");
    let mut d = Vec::with_capacity(n + 1);
    let mut t = Integer::one();
    let mut acc = t.clone();
    d.push(acc.clone());
    for i in 1..=n {
        let num = Integer::from_usize(2 * (n + i - 1) * (n - i + 1));
        let den = Integer::from_usize(i * (2 * i - 1));
        t = t * num / den;
        acc = acc + &t;
        d.push(acc.clone());
    }
    d
}
