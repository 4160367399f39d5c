//! Descriptive statistics on one-dimensional arrays.
//!
//! Moments are the biased (population) estimates unless a `ddof` is given,
//! which is what the residual diagnostics expect.

use ndarray::{Array1, ArrayBase, Data, Ix1};

/// Arithmetic mean. NaN for an empty array.
pub fn mean<S>(x: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    if x.is_empty() {
        return f64::NAN;
    }
    x.sum() / x.len() as f64
}

/// Variance with `ddof` delta degrees of freedom (0 for population, 1 for sample).
///
/// NaN when `len <= ddof`.
pub fn variance<S>(x: &ArrayBase<S, Ix1>, ddof: usize) -> f64
where
    S: Data<Elem = f64>,
{
    let n = x.len();
    if n <= ddof {
        return f64::NAN;
    }
    let m = mean(x);
    let ss: f64 = x.iter().map(|&v| (v - m).powi(2)).sum();
    ss / (n - ddof) as f64
}

/// k-th central moment about the mean.
pub fn central_moment<S>(x: &ArrayBase<S, Ix1>, k: i32) -> f64
where
    S: Data<Elem = f64>,
{
    if x.is_empty() {
        return f64::NAN;
    }
    let m = mean(x);
    x.iter().map(|&v| (v - m).powi(k)).sum::<f64>() / x.len() as f64
}

/// Biased sample skewness `m3 / m2^1.5`.
pub fn skewness<S>(x: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    let m2 = central_moment(x, 2);
    let m3 = central_moment(x, 3);
    m3 / m2.powf(1.5)
}

/// Biased excess (Fisher) kurtosis `m4 / m2^2 - 3`.
pub fn excess_kurtosis<S>(x: &ArrayBase<S, Ix1>) -> f64
where
    S: Data<Elem = f64>,
{
    let m2 = central_moment(x, 2);
    let m4 = central_moment(x, 4);
    m4 / m2.powi(2) - 3.0
}

/// First-order difference `x[i + 1] - x[i]`.
pub fn diff<S>(x: &ArrayBase<S, Ix1>) -> Array1<f64>
where
    S: Data<Elem = f64>,
{
    if x.len() < 2 {
        return Array1::zeros(0);
    }
    x.windows(2).into_iter().map(|w| w[1] - w[0]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_mean_and_variance() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        assert_eq!(mean(&x), 5.0);
        assert!((variance(&x, 0) - 60.0 / 9.0).abs() < 1e-12);
        assert!((variance(&x, 1) - 7.5).abs() < 1e-12);
        assert!(variance(&array![1.0], 1).is_nan());
        assert!(mean(&Array1::<f64>::zeros(0)).is_nan());
    }

    #[test]
    fn test_symmetric_data_has_no_skew() {
        let x = array![-2.0, -1.0, 0.0, 1.0, 2.0];
        assert!(skewness(&x).abs() < 1e-12);
        // uniform-like data is platykurtic
        assert!(excess_kurtosis(&x) < 0.0);
    }

    #[test]
    fn test_skew_sign() {
        let right_tail = array![1.0, 1.0, 1.0, 2.0, 10.0];
        assert!(skewness(&right_tail) > 0.0);
        let left_tail = right_tail.mapv(|v| -v);
        assert!(skewness(&left_tail) < 0.0);
    }

    #[test]
    fn test_diff() {
        let x = array![1.0, 4.0, 9.0, 16.0];
        assert_eq!(diff(&x), array![3.0, 5.0, 7.0]);
        assert_eq!(diff(&array![1.0]).len(), 0);
    }
}
