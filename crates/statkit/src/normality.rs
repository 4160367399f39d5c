//! Normality diagnostics for regression residuals.
//!
//! Implements D'Agostino's skewness and kurtosis z-tests, their omnibus
//! combination (D'Agostino-Pearson K²), and the Jarque-Bera test.

use ndarray::{ArrayBase, Data, Ix1};
use serde::Serialize;

use crate::descriptive::{excess_kurtosis, skewness};
use crate::distributions::{chi_squared_sf, normal_two_sided};
use crate::error::{Result, StatsError};

/// Smallest sample the skewness z-test is defined for.
pub const MIN_SKEWTEST_OBS: usize = 8;
/// Smallest sample the kurtosis z-test is defined for.
pub const MIN_KURTOSISTEST_OBS: usize = 5;

/// A z statistic with its two-sided p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZTest {
    pub z: f64,
    pub p_val: f64,
}

/// D'Agostino-Pearson omnibus statistic and its chi-squared (2 df) p-value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalityTest {
    pub stat: f64,
    pub p_val: f64,
}

/// Jarque-Bera statistic along with the moments it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JarqueBera {
    pub stat: f64,
    pub p_val: f64,
    pub skew: f64,
    /// Pearson kurtosis (3 for a normal distribution).
    pub kurtosis: f64,
}

/// Test whether the skewness differs from that of a normal distribution.
pub fn skewtest<S>(x: &ArrayBase<S, Ix1>) -> Result<ZTest>
where
    S: Data<Elem = f64>,
{
    let n = x.len();
    if n < MIN_SKEWTEST_OBS {
        return Err(StatsError::InsufficientData(format!(
            "skewtest needs at least {} observations, got {}",
            MIN_SKEWTEST_OBS, n
        )));
    }
    let n = n as f64;
    let b2 = skewness(x);

    let y = b2 * (((n + 1.0) * (n + 3.0)) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = 3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0)
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let z = delta * (y / alpha).asinh();

    Ok(ZTest {
        z,
        p_val: normal_two_sided(z),
    })
}

/// Test whether the kurtosis differs from that of a normal distribution.
pub fn kurtosistest<S>(x: &ArrayBase<S, Ix1>) -> Result<ZTest>
where
    S: Data<Elem = f64>,
{
    let n = x.len();
    if n < MIN_KURTOSISTEST_OBS {
        return Err(StatsError::InsufficientData(format!(
            "kurtosistest needs at least {} observations, got {}",
            MIN_KURTOSISTEST_OBS, n
        )));
    }
    if n < 20 {
        log::debug!("kurtosistest is only valid for n >= 20, continuing with n = {}", n);
    }
    let n = n as f64;
    let b2 = excess_kurtosis(x) + 3.0;

    let e = 3.0 * (n - 1.0) / (n + 1.0);
    let var_b2 = 24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0).powi(2) * (n + 3.0) * (n + 5.0));
    let xs = (b2 - e) / var_b2.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * ((6.0 * (n + 3.0) * (n + 5.0)) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + xs * (2.0 / (a - 4.0)).sqrt();
    let term2 = if denom == 0.0 {
        f64::NAN
    } else {
        denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt()
    };
    let z = (term1 - term2) / (2.0 / (9.0 * a)).sqrt();

    Ok(ZTest {
        z,
        p_val: normal_two_sided(z),
    })
}

/// D'Agostino-Pearson omnibus test. `None` below eight observations.
pub fn normaltest<S>(x: &ArrayBase<S, Ix1>) -> Result<Option<NormalityTest>>
where
    S: Data<Elem = f64>,
{
    if x.len() < MIN_SKEWTEST_OBS {
        return Ok(None);
    }
    let s = skewtest(x)?;
    let k = kurtosistest(x)?;
    let stat = s.z * s.z + k.z * k.z;
    Ok(Some(NormalityTest {
        stat,
        p_val: chi_squared_sf(stat, 2.0)?,
    }))
}

/// Jarque-Bera test `n/6 (S² + (K - 3)²/4)` against chi-squared with 2 df.
pub fn jarque_bera<S>(x: &ArrayBase<S, Ix1>) -> Result<JarqueBera>
where
    S: Data<Elem = f64>,
{
    let n = x.len() as f64;
    let skew = skewness(x);
    let kurtosis = excess_kurtosis(x) + 3.0;
    let stat = (n / 6.0) * (skew.powi(2) + 0.25 * (kurtosis - 3.0).powi(2));
    Ok(JarqueBera {
        stat,
        p_val: chi_squared_sf(stat, 2.0)?,
        skew,
        kurtosis,
    })
}
