//! Tail probabilities for the reference distributions used by the tests.
//!
//! Thin wrappers around `statrs`. Non-finite statistics are resolved here
//! before they reach the distribution: NaN stays NaN, `+inf` has no upper
//! tail and `-inf` has all of it.

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal, StudentsT};

use crate::error::{Result, StatsError};

fn survival<D: ContinuousCDF<f64, f64>>(dist: &D, x: f64) -> f64 {
    if x.is_nan() {
        f64::NAN
    } else if x == f64::INFINITY {
        0.0
    } else if x == f64::NEG_INFINITY {
        1.0
    } else {
        dist.sf(x).clamp(0.0, 1.0)
    }
}

// `f64::min` would swallow a NaN tail.
fn double_tail(upper: f64) -> f64 {
    if upper.is_nan() {
        upper
    } else {
        (2.0 * upper).min(1.0)
    }
}

/// Two-sided p-value of a t statistic with `df` degrees of freedom.
pub fn students_t_two_sided(t: f64, df: f64) -> Result<f64> {
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution {
        name: "Student's t",
        reason: e.to_string(),
    })?;
    Ok(double_tail(survival(&dist, t.abs())))
}

/// Upper-tail probability of an F statistic.
pub fn fisher_sf(f: f64, df_num: f64, df_den: f64) -> Result<f64> {
    let dist = FisherSnedecor::new(df_num, df_den).map_err(|e| StatsError::Distribution {
        name: "Fisher-Snedecor",
        reason: e.to_string(),
    })?;
    Ok(survival(&dist, f))
}

/// Upper-tail probability of a chi-squared statistic.
pub fn chi_squared_sf(x: f64, df: f64) -> Result<f64> {
    let dist = ChiSquared::new(df).map_err(|e| StatsError::Distribution {
        name: "chi-squared",
        reason: e.to_string(),
    })?;
    Ok(survival(&dist, x))
}

/// Two-sided p-value of a standard normal z score.
pub fn normal_two_sided(z: f64) -> f64 {
    // N(0, 1) parameters are always valid.
    match Normal::new(0.0, 1.0) {
        Ok(dist) => double_tail(survival(&dist, z.abs())),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_two_sided_reference_value() {
        // t = 0.5477.. with 8 df (one-sample test of 1..9 against 4.5)
        let p = students_t_two_sided(0.547_722_557_505_166_1, 8.0).unwrap();
        assert!((p - 0.598_827_136_697_289).abs() < 1e-9, "p = {}", p);
    }

    #[test]
    fn test_non_finite_statistics() {
        assert_eq!(students_t_two_sided(f64::INFINITY, 5.0).unwrap(), 0.0);
        assert_eq!(students_t_two_sided(f64::NEG_INFINITY, 5.0).unwrap(), 0.0);
        assert!(students_t_two_sided(f64::NAN, 5.0).unwrap().is_nan());
        assert_eq!(fisher_sf(f64::INFINITY, 1.0, 8.0).unwrap(), 0.0);
        assert!(chi_squared_sf(f64::NAN, 2.0).unwrap().is_nan());
    }

    #[test]
    fn test_chi_squared_two_df_is_exponential() {
        // chi2 with 2 df has survival exp(-x / 2)
        let p = chi_squared_sf(3.0, 2.0).unwrap();
        assert!((p - (-1.5f64).exp()).abs() < 1e-10);
    }

    #[test]
    fn test_normal_two_sided() {
        assert!((normal_two_sided(0.0) - 1.0).abs() < 1e-12);
        assert!((normal_two_sided(1.959_963_984_540_054) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_degrees_of_freedom() {
        assert!(students_t_two_sided(1.0, 0.0).is_err());
        assert!(fisher_sf(1.0, 0.0, 3.0).is_err());
    }
}
