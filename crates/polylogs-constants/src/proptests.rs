//! Property-based tests for the constant table.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::table::series_terms;
    use crate::ConstantTable;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn origin_rows_start_with_one(weight in 1usize..12) {
            let table = ConstantTable::<f64>::new(weight, 53).unwrap();
            for n in 1..=weight {
                let row = table.origin_coefficients(n).unwrap();
                prop_assert_eq!(row.len(), series_terms(53) + 1);
                prop_assert!((row[0] - 1.0).abs() < 1e-15);
            }
        }

        #[test]
        fn origin_recurrence_holds(n in 2usize..10, k in 0usize..20) {
            // (k+1) a_{n,k} = sum_j a_{n-1,j} beta_{k-j}
            let table = ConstantTable::<f64>::new(10, 53).unwrap();
            let prev = table.origin_coefficients(n - 1).unwrap();
            let row = table.origin_coefficients(n).unwrap();
            let sum: f64 = (0..=k).map(|j| prev[j] * table.beta(k - j).unwrap()).sum();
            prop_assert!((row[k] * (k as f64 + 1.0) - sum).abs() < 1e-14);
        }

        #[test]
        fn zeta_decreases_to_one(s in 2usize..40) {
            let table = ConstantTable::<f64>::new(2, 53).unwrap();
            let a = *table.zeta(s).unwrap();
            let b = *table.zeta(s + 1).unwrap();
            prop_assert!(a >= b);
            prop_assert!(b >= 1.0);
        }

        #[test]
        fn unit_rows_reproduce_zeta(n in 2usize..10) {
            let table = ConstantTable::<f64>::new(10, 53).unwrap();
            let row = table.unit_coefficients(n).unwrap();
            prop_assert_eq!(row.len(), n + series_terms(53) + 1);
            prop_assert_eq!(row[0], *table.zeta(n).unwrap());
            prop_assert_eq!(row[n - 1], 0.0);
        }

        #[test]
        fn odd_beta_vanish(j in 1usize..25) {
            let table = ConstantTable::<f64>::new(3, 53).unwrap();
            prop_assert_eq!(*table.beta(2 * j + 1).unwrap(), 0.0);
        }
    }
}
