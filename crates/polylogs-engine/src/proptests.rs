//! Property-based tests: closed forms and functional equations.

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use std::sync::OnceLock;

    use num_complex::Complex;
    use proptest::prelude::*;

    use crate::region::Strategy as Reduction;
    use crate::Engine;

    fn engine() -> &'static Engine<f64> {
        static ENGINE: OnceLock<Engine<f64>> = OnceLock::new();
        ENGINE.get_or_init(|| Engine::new(6).unwrap())
    }

    fn close(a: Complex<f64>, b: Complex<f64>, tol: f64) -> bool {
        (a - b).norm() <= tol * (1.0 + b.norm())
    }

    fn off_axis(max: f64) -> impl Strategy<Value = Complex<f64>> {
        (-max..max, 0.01f64..max, prop::bool::ANY)
            .prop_map(|(re, im, flip)| Complex::new(re, if flip { -im } else { im }))
    }

    fn disc(max_radius: f64) -> impl Strategy<Value = Complex<f64>> {
        annulus(0.05, max_radius)
    }

    fn annulus(inner: f64, outer: f64) -> impl Strategy<Value = Complex<f64>> {
        (inner..outer, -PI..PI).prop_map(|(r, theta)| Complex::from_polar(r, theta))
    }

    /// Points of the unit circle kept away from 1.
    fn circle() -> impl Strategy<Value = Complex<f64>> {
        (0.3f64..2.0 * PI - 0.3).prop_map(|theta| Complex::from_polar(1.0, theta))
    }

    proptest! {
        #[test]
        fn li1_is_minus_log(x in off_axis(3.0)) {
            let expected = -(Complex::new(1.0, 0.0) - x).ln();
            prop_assert!(close(engine().li(1, &x).unwrap(), expected, 1e-14));
        }

        #[test]
        fn dilog_inversion(x in off_axis(4.0)) {
            prop_assume!(x.norm() > 1.05);
            // Li_2(x) + Li_2(1/x) = -pi^2/6 - ln^2(-x)/2
            let log = (-x).ln();
            let expected = Complex::new(-PI * PI / 6.0, 0.0) - log * log / 2.0;
            let sum = engine().li(2, &x).unwrap() + engine().li(2, &x.inv()).unwrap();
            prop_assert!(close(sum, expected, 1e-13));
        }

        #[test]
        fn trilog_inversion(x in off_axis(4.0)) {
            prop_assume!(x.norm() > 1.05);
            // Li_3(x) - Li_3(1/x) = -pi^2/6 ln(-x) - ln^3(-x)/6
            let log = (-x).ln();
            let expected = -log * (PI * PI / 6.0) - log * log * log / 6.0;
            let diff = engine().li(3, &x).unwrap() - engine().li(3, &x.inv()).unwrap();
            prop_assert!(close(diff, expected, 1e-13));
        }

        #[test]
        fn conjugate_symmetry(x in off_axis(3.0), n in 1usize..=6) {
            let a = engine().li(n, &x).unwrap();
            let b = engine().li(n, &x.conj()).unwrap();
            prop_assert!(close(a.conj(), b, 1e-12));
        }

        #[test]
        fn continuous_across_expansions(im in 0.3f64..0.8, n in 2usize..=6) {
            // Re x = 1/2 separates the Bernoulli series from the expansion at 1.
            let below = engine().li(n, &Complex::new(0.5 - 1e-9, im)).unwrap();
            let above = engine().li(n, &Complex::new(0.5, im)).unwrap();
            prop_assert!((below - above).norm() < 1e-7);

            // |x| = 1/4 separates the power series from the Bernoulli series.
            let theta = im * PI;
            let inside = engine().li(n, &Complex::from_polar(0.25, theta)).unwrap();
            let outside = engine().li(n, &Complex::from_polar(0.25 + 1e-9, theta)).unwrap();
            prop_assert!((inside - outside).norm() < 1e-7);
        }

        #[test]
        fn li22_stuffle(x in disc(0.9), y in disc(0.9)) {
            let e = engine();
            let lhs = e.li22(&x, &y).unwrap() + e.li22(&y, &x).unwrap();
            let rhs = e.li(2, &x).unwrap() * e.li(2, &y).unwrap() - e.li(4, &(x * y)).unwrap();
            prop_assert!(close(lhs, rhs, 1e-12));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn reflection_matches_product_series(x in annulus(0.2, 0.8), y in annulus(1.1, 3.0)) {
            let eval = engine().evaluator();
            let reflected = eval.li22_by(Reduction::Reflected, &x, &y).unwrap();
            let direct = eval.li22_by(Reduction::Direct, &x, &y).unwrap();
            prop_assert!(close(reflected, direct, 1e-11));
        }

        #[test]
        fn swapped_reflection_matches_swapped(x in annulus(1.1, 3.0), y in annulus(0.2, 0.8)) {
            let eval = engine().evaluator();
            let reflected = eval.li22_by(Reduction::SwapReflected, &x, &y).unwrap();
            let swapped = eval.li22_by(Reduction::Swapped, &x, &y).unwrap();
            prop_assert!(close(reflected, swapped, 1e-11));
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(12))]

        #[test]
        fn li22_stuffle_on_the_torus(x in circle(), y in circle()) {
            let e = engine();
            let lhs = e.li22(&x, &y).unwrap() + e.li22(&y, &x).unwrap();
            let rhs = e.li(2, &x).unwrap() * e.li(2, &y).unwrap() - e.li(4, &(x * y)).unwrap();
            prop_assert!(close(lhs, rhs, 1e-11));
        }
    }
}
