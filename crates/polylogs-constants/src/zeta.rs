//! Riemann zeta values at the integers s >= 2.
//!
//! Small s use Borwein's acceleration of the alternating series
//!
//! ```text
//! zeta(s) = -1 / (d_n (1 - 2^(1-s))) * sum_{k<n} (-1)^k (d_k - d_n) / (k+1)^s
//! ```
//!
//! whose relative error is about 3 / (3 + sqrt 8)^n, so n = 0.3933 * bits
//! terms suffice. Once 2^(bits / (s-1)) is small the plain Dirichlet series
//! is cheaper.

use polylogs_integers::borwein_weights;
use polylogs_numeric::{BigFloat, Real};

/// Dirichlet summation is used when `10 (s - 1) >= bits`, i.e. at most
/// about 2^10 terms.
const DIRECT_SUM_RATIO: usize = 10;

/// Computes zeta(s) to `bits` of precision.
///
/// # Panics
///
/// Panics if `s < 2` (the pole and the non-positive integers are not
/// handled here).
#[must_use]
pub fn zeta_value(s: usize, bits: usize) -> BigFloat {
    assert!(s >= 2, "zeta_value needs s >= 2, got {s}");
    if DIRECT_SUM_RATIO * (s - 1) >= bits {
        dirichlet_sum(s, bits)
    } else {
        borwein(s, bits)
    }
}

fn exponent(s: usize) -> u32 {
    u32::try_from(s).unwrap_or(u32::MAX)
}

fn dirichlet_sum(s: usize, bits: usize) -> BigFloat {
    let eps = BigFloat::epsilon(bits);
    let one = BigFloat::from_i64(1, bits);
    let mut sum = one.clone();
    let mut i: i64 = 2;
    loop {
        let base = BigFloat::from_i64(i, bits);
        let term = &one / &base.powi(exponent(s));
        // The tail after term i is below i^(1-s) / (s-1) <= term * i.
        if &term * &base <= eps {
            return sum + term;
        }
        sum = sum + term;
        i += 1;
    }
}

#[allow(clippy::cast_possible_wrap)]
fn borwein(s: usize, bits: usize) -> BigFloat {
    let n = bits * 3933 / 10_000 + 4;
    let d = borwein_weights(n);
    let dn = BigFloat::from_integer(&d[n], bits);

    let mut sum = BigFloat::from_i64(0, bits);
    for (k, dk) in d.iter().take(n).enumerate() {
        let diff = BigFloat::from_integer(&(dk - &d[n]), bits);
        let denom = BigFloat::from_i64(k as i64 + 1, bits).powi(exponent(s));
        let term = diff / denom;
        sum = if k % 2 == 0 { sum + term } else { sum - term };
    }

    let one = BigFloat::from_i64(1, bits);
    let two_pow = BigFloat::power_of_two(1 - s as isize, bits);
    -(sum / (dn * (one - two_pow)))
}
