//! Property-based tests for the exact combinatorial sequences.

#[cfg(test)]
mod tests {
    use num_traits::Zero;
    use proptest::prelude::*;

    use crate::{
        bernoulli_numbers, binomial_row, borwein_weights, factorials, harmonic_number,
        Integer, Rational,
    };

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    proptest! {
        #[test]
        fn rational_sub_then_add(a in small_int(), b in non_zero_int(), c in small_int(), d in non_zero_int()) {
            let x = Rational::from_i64(a, b);
            let y = Rational::from_i64(c, d);
            prop_assert_eq!(&(&x - &y) + &y, x);
        }

        #[test]
        fn rational_denominator_positive(a in small_int(), b in non_zero_int()) {
            let r = Rational::from_i64(a, b);
            prop_assert!(!r.denominator().is_negative());
            prop_assert!(!r.denominator().is_zero());
        }

        #[test]
        fn binomial_row_matches_factorials(n in 0usize..40) {
            let f = factorials(n);
            for (k, c) in binomial_row(n).iter().enumerate() {
                prop_assert_eq!(c, &(&f[n] / &(&f[k] * &f[n - k])));
            }
        }

        #[test]
        fn binomial_row_sums_to_power_of_two(n in 0usize..80) {
            let sum = binomial_row(n).into_iter().fold(Integer::zero(), |acc, c| acc + c);
            let power = (0..n).fold(Integer::new(1), |acc, _| acc * Integer::new(2));
            prop_assert_eq!(sum, power);
        }

        #[test]
        fn pascal_rule(n in 1usize..70, k in 1usize..70) {
            prop_assume!(k <= n);
            let row = binomial_row(n);
            let prev = binomial_row(n - 1);
            let below = prev.get(k).cloned().unwrap_or_else(Integer::zero);
            prop_assert_eq!(&row[k], &(&prev[k - 1] + &below));
        }

        #[test]
        fn harmonic_step(n in 1usize..60) {
            let step = Rational::new(Integer::new(1), Integer::from_usize(n));
            prop_assert_eq!(harmonic_number(n), harmonic_number(n - 1) + step);
        }

        #[test]
        fn borwein_weights_increase(n in 1usize..60) {
            let d = borwein_weights(n);
            prop_assert_eq!(d.len(), n + 1);
            for w in d.windows(2) {
                prop_assert!(w[0] < w[1]);
            }
        }
    }

    #[test]
    fn bernoulli_generating_identity() {
        // sum_{j=0}^{m} C(m+1, j) B_j = 0 for every m >= 1.
        let b = bernoulli_numbers(30);
        for m in 1..=30 {
            let row = binomial_row(m + 1);
            let sum = (0..=m).fold(Rational::zero(), |acc, j| {
                acc + Rational::from_integer(row[j].clone()) * b[j].clone()
            });
            assert!(sum.is_zero(), "identity fails at m = {m}");
        }
    }
}
