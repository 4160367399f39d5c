//! Property-based tests for the t-tests and the OLS estimator.

use ndarray::{Array1, Array2};
use proptest::prelude::*;
use statkit::{Alternative, Ols, OneSampleTTest, StatsError, TTestConfig, TestType, TwoSampleTTest};

fn sample(min_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-100.0f64..100.0, min_len..40)
}

fn valid_p(p: f64) -> bool {
    p.is_nan() || (0.0..=1.0).contains(&p)
}

proptest! {
    /// p-values stay within [0, 1] (or NaN for degenerate samples).
    #[test]
    fn one_sample_p_value_in_range(a in sample(2), popmean in -100.0f64..100.0) {
        let test = OneSampleTTest::new(&Array1::from_vec(a), popmean, &TTestConfig::default()).unwrap();
        prop_assert!(valid_p(test.p_val), "p = {}", test.p_val);
    }

    /// One-sided alternatives report exactly half the two-sided p-value.
    #[test]
    fn one_sided_is_half_of_two_sided(a in sample(2), popmean in -100.0f64..100.0) {
        let a = Array1::from_vec(a);
        let two = OneSampleTTest::new(&a, popmean, &TTestConfig::default()).unwrap();
        for alternative in [Alternative::Less, Alternative::Greater] {
            let one = OneSampleTTest::new(&a, popmean, &TTestConfig::new(alternative, None)).unwrap();
            prop_assert_eq!(one.t_stat.to_bits(), two.t_stat.to_bits());
            if two.p_val.is_nan() {
                prop_assert!(one.p_val.is_nan());
            } else {
                prop_assert_eq!(one.p_val, two.p_val / 2.0);
            }
        }
    }

    /// Shifting the data and the hypothesized mean together leaves t unchanged.
    #[test]
    fn one_sample_shift_invariance(a in sample(3), popmean in -10.0f64..10.0, shift in -50.0f64..50.0) {
        let a = Array1::from_vec(a);
        let base = OneSampleTTest::new(&a, popmean, &TTestConfig::default()).unwrap();
        let moved = OneSampleTTest::new(&a.mapv(|v| v + shift), popmean + shift, &TTestConfig::default()).unwrap();
        prop_assume!(base.t_stat.is_finite() && base.t_stat.abs() < 1e6);
        prop_assert!((base.t_stat - moved.t_stat).abs() < 1e-6 * (1.0 + base.t_stat.abs()),
            "{} vs {}", base.t_stat, moved.t_stat);
    }

    /// Swapping the samples negates t and keeps p.
    #[test]
    fn two_sample_antisymmetry(a in sample(2), b in sample(2), equal_var in any::<bool>()) {
        let (a, b) = (Array1::from_vec(a), Array1::from_vec(b));
        let config = TTestConfig::default().with_equal_var(equal_var);
        let ab = TwoSampleTTest::new(&a, &b, &config).unwrap();
        let ba = TwoSampleTTest::new(&b, &a, &config).unwrap();
        prop_assume!(ab.t_stat.is_finite());
        prop_assert!((ab.t_stat + ba.t_stat).abs() < 1e-9 * (1.0 + ab.t_stat.abs()));
        prop_assert!((ab.p_val - ba.p_val).abs() < 1e-9);
        prop_assert!(valid_p(ab.p_val));
    }

    /// The paired test equals a one-sample test of the differences against 0.
    #[test]
    fn related_matches_one_sample_of_differences(pairs in prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 2..40)) {
        let a: Array1<f64> = pairs.iter().map(|p| p.0).collect();
        let b: Array1<f64> = pairs.iter().map(|p| p.1).collect();
        let config = TTestConfig::default().with_test_type(TestType::Related);
        let rel = TwoSampleTTest::new(&a, &b, &config).unwrap();
        let one = OneSampleTTest::new(&(&a - &b), 0.0, &TTestConfig::default()).unwrap();
        prop_assert_eq!(rel.t_stat.to_bits(), one.t_stat.to_bits());
        prop_assert_eq!(rel.df, one.df);
    }

    /// OLS residuals are orthogonal to the design and R² never exceeds 1.
    #[test]
    fn ols_residuals_orthogonal(rows in prop::collection::vec((0u8..20, -50.0f64..50.0), 4..40)) {
        let n = rows.len();
        let x = Array2::from_shape_vec((n, 1), rows.iter().map(|r| r.0 as f64).collect()).unwrap();
        let y: Array1<f64> = rows.iter().map(|r| r.1).collect();

        match Ols::new(&x, &y) {
            Ok(reg) => {
                let xe = reg.x.t().dot(&reg.e);
                let scale = 1.0 + reg.x.iter().map(|v| v.abs()).sum::<f64>() * y.iter().map(|v| v.abs()).fold(0.0, f64::max);
                prop_assert!(xe.iter().all(|v| v.abs() < 1e-9 * scale), "X'e = {:?}", xe);
                prop_assert!(reg.r_squared <= 1.0 + 1e-12);
                prop_assert!(reg.p.iter().all(|&p| valid_p(p)));
                prop_assert!(valid_p(reg.f_p_val));
            }
            // constant regressor
            Err(StatsError::SingularMatrix) => {
                prop_assert!(x.iter().all(|&v| v == x[[0, 0]]));
            }
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }
}
