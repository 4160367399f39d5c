//! Ordinary least squares regression.
//!
//! `Ols` fits `y = X b + e` with an intercept prepended to the regressors and
//! computes the usual coefficient inference (standard errors, t statistics,
//! two-sided p-values) and model fit statistics (R², adjusted R², F test).
//! Residual diagnostics (Durbin-Watson, omnibus and Jarque-Bera normality
//! tests, log-likelihood with AIC/BIC) are computed on demand.

use std::fmt;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2};

use crate::descriptive::{diff, variance};
use crate::distributions::{fisher_sf, students_t_two_sided};
use crate::error::{Result, StatsError};
use crate::math::{inverse, with_intercept};
use crate::normality::{jarque_bera, normaltest, JarqueBera, NormalityTest};
use crate::report::{self, EstimateReport, OlsReport, RULE};

/// Naming options for an OLS fit.
#[derive(Debug, Clone)]
pub struct OlsOptions {
    /// Names of the regressors, one per column of `x`. Generated when `None` or empty.
    pub x_names: Option<Vec<String>>,
    /// Name of the dependent variable.
    pub y_name: String,
}

impl Default for OlsOptions {
    fn default() -> Self {
        Self {
            x_names: None,
            y_name: "y".to_string(),
        }
    }
}

/// Log-likelihood of the fitted model and the per-observation information criteria.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLikelihood {
    pub ll: f64,
    pub aic: f64,
    pub bic: f64,
}

/// A fitted OLS model.
#[derive(Debug, Clone)]
pub struct Ols {
    /// Design matrix, intercept column first.
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    /// Variable names, `const` first.
    pub x_names: Vec<String>,
    pub y_name: String,
    /// `(X'X)^-1`
    pub inv_xx: Array2<f64>,
    /// Coefficient estimates, intercept first.
    pub b: Array1<f64>,
    pub nobs: usize,
    pub ncoef: usize,
    /// Error degrees of freedom, `nobs - ncoef`.
    pub df_e: usize,
    /// Regression degrees of freedom, `ncoef - 1`.
    pub df_r: usize,
    /// Residuals.
    pub e: Array1<f64>,
    /// Residual variance estimate `e.e / df_e`.
    pub error_variance: f64,
    pub se: Array1<f64>,
    pub t: Array1<f64>,
    pub p: Array1<f64>,
    pub r_squared: f64,
    pub r_squared_adj: f64,
    pub f_stat: f64,
    pub f_p_val: f64,
}

impl Ols {
    /// Fit `y` on the columns of `x` with default variable names.
    pub fn new<S1, S2>(x: &ArrayBase<S1, Ix2>, y: &ArrayBase<S2, Ix1>) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        Self::with_options(x, y, OlsOptions::default())
    }

    /// Fit `y` on a single regressor.
    pub fn simple<S1, S2>(x: &ArrayBase<S1, Ix1>, y: &ArrayBase<S2, Ix1>) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        Self::new(&x.view().insert_axis(Axis(1)), y)
    }

    pub fn with_options<S1, S2>(
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix1>,
        options: OlsOptions,
    ) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        let (rows, cols) = x.dim();
        if rows != y.len() {
            return Err(StatsError::LengthMismatch {
                left: rows,
                right: y.len(),
            });
        }
        if cols == 0 {
            return Err(StatsError::InsufficientData(
                "at least one independent variable is required".to_string(),
            ));
        }
        let x_names = variable_names(cols, options.x_names)?;

        let x = with_intercept(x);
        let y = y.to_owned();

        // Solve the normal equations X'X b = X'y via the explicit inverse,
        // which is needed again for the standard errors.
        let xtx = x.t().dot(&x);
        let xty = x.t().dot(&y);
        let inv_xx = inverse(&xtx)?;
        let mut b = inv_xx.dot(&xty);
        // One round of iterative refinement.
        let residual = &xty - &xtx.dot(&b);
        b += &inv_xx.dot(&residual);

        let nobs = y.len();
        let ncoef = x.ncols();
        if nobs <= ncoef {
            return Err(StatsError::InsufficientData(format!(
                "{} observations leave no error degrees of freedom for {} coefficients",
                nobs, ncoef
            )));
        }
        let df_e = nobs - ncoef;
        let df_r = ncoef - 1;

        let e = &y - &x.dot(&b);
        let error_variance = e.dot(&e) / df_e as f64;
        let se = inv_xx.diag().mapv(|v| (error_variance * v).sqrt());
        let t = &b / &se;
        let p = t
            .iter()
            .map(|&t| students_t_two_sided(t, df_e as f64))
            .collect::<Result<Array1<f64>>>()?;

        let var_y = variance(&y, 0);
        if var_y == 0.0 {
            log::warn!("Dependent variable '{}' is constant; R-squared is undefined", options.y_name);
        }
        let r_squared = 1.0 - variance(&e, 0) / var_y;
        let r_squared_adj =
            1.0 - (1.0 - r_squared) * ((nobs as f64 - 1.0) / (nobs as f64 - ncoef as f64));
        let f_stat = (r_squared / df_r as f64) / ((1.0 - r_squared) / df_e as f64);
        let f_p_val = fisher_sf(f_stat, df_r as f64, df_e as f64)?;

        log::debug!(
            "Fitted OLS on {} observations and {} coefficients (R-squared {:.6})",
            nobs,
            ncoef,
            r_squared
        );

        Ok(Self {
            x,
            y,
            x_names,
            y_name: options.y_name,
            inv_xx,
            b,
            nobs,
            ncoef,
            df_e,
            df_r,
            e,
            error_variance,
            se,
            t,
            p,
            r_squared,
            r_squared_adj,
            f_stat,
            f_p_val,
        })
    }

    /// Durbin-Watson statistic of the residuals. Near 2 when there is no
    /// first-order autocorrelation.
    pub fn durbin_watson(&self) -> f64 {
        let de = diff(&self.e);
        de.dot(&de) / self.e.dot(&self.e)
    }

    /// D'Agostino-Pearson omnibus normality test of the residuals.
    ///
    /// `None` with fewer than eight observations.
    pub fn omnibus(&self) -> Result<Option<NormalityTest>> {
        normaltest(&self.e)
    }

    /// Jarque-Bera normality test of the residuals.
    pub fn jarque_bera(&self) -> Result<JarqueBera> {
        jarque_bera(&self.e)
    }

    pub fn log_likelihood(&self) -> LogLikelihood {
        let n = self.nobs as f64;
        let k = self.ncoef as f64;
        let ll = -(n / 2.0) * (1.0 + (2.0 * std::f64::consts::PI).ln())
            - (n / 2.0) * (self.e.dot(&self.e) / n).ln();
        LogLikelihood {
            ll,
            aic: -2.0 * ll / n + (2.0 * k / n),
            bic: -2.0 * ll / n + (k * n.ln()) / n,
        }
    }

    /// Text summary stamped with the current local time.
    pub fn summary(&self) -> Result<String> {
        self.summary_at(&Local::now())
    }

    pub fn summary_at(&self, at: &DateTime<Local>) -> Result<String> {
        let ll = self.log_likelihood();
        let jb = self.jarque_bera()?;
        let (omni, omni_p) = split_omnibus(self.omnibus()?);

        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "Dependent Variable: {}", self.y_name);
        let _ = writeln!(out, "Method: Least Squares");
        let _ = writeln!(out, "Date:  {}", report::format_date(at));
        let _ = writeln!(out, "Time:  {}", report::format_time(at));
        let _ = writeln!(out, "# obs:               {:>5}", self.nobs);
        let _ = writeln!(out, "# variables:     {:>5}", self.ncoef);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(
            out,
            "variable     coefficient     std. Error      t-statistic     prob."
        );
        let _ = writeln!(out, "{}", RULE);
        for (i, name) in self.x_names.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:<5}          {}     {}     {}     {}",
                name,
                fmt_stat(self.b[i]),
                fmt_stat(self.se[i]),
                fmt_stat(self.t[i]),
                fmt_stat(self.p[i])
            );
        }
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "Models stats                         Residual stats");
        let _ = writeln!(out, "{}", RULE);
        let rows = [
            ("R-squared", self.r_squared, "Durbin-Watson stat", self.durbin_watson()),
            ("Adjusted R-squared", self.r_squared_adj, "Omnibus stat", omni),
            ("F-statistic", self.f_stat, "Prob(Omnibus stat)", omni_p),
            ("Prob (F-statistic)", self.f_p_val, "JB stat", jb.stat),
            ("Log likelihood", ll.ll, "Prob(JB)", jb.p_val),
            ("AIC criterion", ll.aic, "Skew", jb.skew),
            ("BIC criterion", ll.bic, "Kurtosis", jb.kurtosis),
        ];
        for (left, lv, right, rv) in rows {
            let _ = writeln!(
                out,
                "{:<21}{:<18}{:<20}{}",
                left,
                fmt_stat(lv),
                right,
                fmt_stat(rv)
            );
        }
        let _ = writeln!(out, "{}", RULE);
        Ok(out)
    }

    pub fn report(&self) -> Result<OlsReport> {
        self.report_at(&Local::now())
    }

    pub fn report_at(&self, at: &DateTime<Local>) -> Result<OlsReport> {
        let ll = self.log_likelihood();
        let jb = self.jarque_bera()?;
        let omni = self.omnibus()?;

        let estimates = self
            .x_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                (
                    name.clone(),
                    EstimateReport {
                        estimate: self.b[i],
                        std_error: self.se[i],
                        t_stat: self.t[i],
                        p_val: self.p[i],
                    },
                )
            })
            .collect();

        Ok(OlsReport {
            dependent_var: self.y_name.clone(),
            method: "least squares".to_string(),
            date: report::format_date(at),
            time: report::format_time(at),
            obs_count: self.nobs,
            var_count: self.ncoef,
            estimates,
            r_squared: self.r_squared,
            r_squared_adj: self.r_squared_adj,
            durbin_watson: self.durbin_watson(),
            omnibus_stat: omni.map(|o| o.stat),
            omnibus_p_val: omni.map(|o| o.p_val),
            f_stat: self.f_stat,
            f_stat_p_val: self.f_p_val,
            jb_stat: jb.stat,
            jb_stat_p_val: jb.p_val,
            skew: jb.skew,
            kurtosis: jb.kurtosis,
            aic_stat: ll.aic,
            bic_stat: ll.bic,
            log_likelihood: ll.ll,
        })
    }

    /// Save the report as JSON. Without a path, a timestamped file name is used.
    pub fn to_file(&self, path: Option<&Path>) -> Result<PathBuf> {
        let at = Local::now();
        report::write_report(&self.report_at(&at)?, path, &at)
    }
}

impl fmt::Display for Ols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OLS Regression on {} Observations", self.x.nrows())
    }
}

fn variable_names(cols: usize, names: Option<Vec<String>>) -> Result<Vec<String>> {
    let mut out = vec!["const".to_string()];
    match names {
        Some(names) if !names.is_empty() => {
            if names.len() != cols {
                return Err(StatsError::NameCountMismatch {
                    expected: cols,
                    actual: names.len(),
                });
            }
            out.extend(names);
        }
        _ if cols == 1 => out.push("x".to_string()),
        _ => out.extend((1..=cols).map(|i| format!("x{}", i))),
    }
    Ok(out)
}

fn split_omnibus(omni: Option<NormalityTest>) -> (f64, f64) {
    omni.map_or((f64::NAN, f64::NAN), |o| (o.stat, o.p_val))
}

/// Six decimals with a leading space in place of a plus sign.
pub(crate) fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        " nan".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { " inf" } else { "-inf" }.to_string()
    } else if v.is_sign_negative() && v != 0.0 {
        format!("{:.6}", v)
    } else {
        format!(" {:.6}", v.abs())
    }
}
