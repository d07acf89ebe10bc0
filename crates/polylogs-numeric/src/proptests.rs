//! Property-based tests: the arbitrary precision realization agrees with
//! `f64` wherever double precision is meaningful.

#[cfg(test)]
mod tests {
    use num_complex::Complex;
    use proptest::prelude::*;

    use crate::{BigFloat, ComplexExt, Real};

    fn finite() -> impl Strategy<Value = f64> {
        prop_oneof![-1e6f64..1e6, -2.0f64..2.0]
    }

    proptest! {
        #[test]
        fn atan_agrees_with_f64(x in finite()) {
            let big = BigFloat::from_f64(x, 96).unwrap();
            prop_assert!((big.atan().to_f64() - x.atan()).abs() <= 4.0 * f64::EPSILON);
        }

        #[test]
        fn atan2_agrees_with_f64(y in finite(), x in finite()) {
            prop_assume!(y != 0.0 || x != 0.0);
            let by = BigFloat::from_f64(y, 96).unwrap();
            let bx = BigFloat::from_f64(x, 96).unwrap();
            let expected = (y + 0.0).atan2(x);
            prop_assert!((by.atan2(&bx).to_f64() - expected).abs() <= 8.0 * f64::EPSILON);
        }

        #[test]
        fn principal_ln_agrees_with_f64(re in finite(), im in finite()) {
            prop_assume!(re.hypot(im) > 1e-3);
            let z = Complex::<BigFloat>::from_f64_parts(re, im, 96).unwrap();
            let l = z.principal_ln();
            let expected = Complex::<f64>::from_f64_parts(re, im, 53).unwrap().principal_ln();
            prop_assert!((l.re.to_f64() - expected.re).abs() <= 1e-14);
            prop_assert!((l.im.to_f64() - expected.im).abs() <= 1e-14);
        }

        #[test]
        fn precision_is_inherited(bits in 24usize..400, v in -1000i64..1000) {
            let a = BigFloat::from_i64(v, bits);
            let b = BigFloat::from_i64(3, 8);
            prop_assert_eq!((a.clone() / b.clone()).precision(), bits);
            prop_assert_eq!((b * a).precision(), bits);
        }
    }
}
