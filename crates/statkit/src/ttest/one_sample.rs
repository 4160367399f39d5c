use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::config::{Alternative, TTestConfig};
use crate::descriptive::{mean, variance};
use crate::distributions::students_t_two_sided;
use crate::error::{Result, StatsError};
use crate::report::{self, TTestReport};
use crate::ttest::{sided_p_value, Decision, Outline};

/// t-test of the mean of one sample against a hypothesized population mean.
#[derive(Debug, Clone)]
pub struct OneSampleTTest {
    pub a: Array1<f64>,
    pub popmean: f64,
    pub alternative: Alternative,
    pub alpha: Option<f64>,
    pub df: f64,
    pub t_stat: f64,
    pub p_val: f64,
}

impl OneSampleTTest {
    /// Run the test. Only `alternative` and `alpha` of `config` are used.
    pub fn new<S>(a: &ArrayBase<S, Ix1>, popmean: f64, config: &TTestConfig) -> Result<Self>
    where
        S: Data<Elem = f64>,
    {
        config.validate()?;
        let (t_stat, df) = one_sample_statistic(a, popmean)?;
        let p_val = sided_p_value(students_t_two_sided(t_stat, df)?, config.alternative);

        log::debug!(
            "1-sample t-test: n = {}, popmean = {}, t = {}, p = {}",
            a.len(),
            popmean,
            t_stat,
            p_val
        );

        Ok(Self {
            a: a.to_owned(),
            popmean,
            alternative: config.alternative,
            alpha: config.alpha,
            df,
            t_stat,
            p_val,
        })
    }

    pub fn decision(&self) -> Decision {
        Decision::new(self.alternative, self.alpha, self.t_stat, self.p_val)
    }

    fn outline(&self) -> Outline {
        Outline {
            assumptions: vec!["Independent Observations"],
            data_size: vec![self.a.len()],
            pop_mean: Some(self.popmean),
            null_hyp: format!("Mean 1 == {}", self.popmean),
            alt_hyp: format!("Mean 1 {} {}", self.alternative.operator(), self.popmean),
            alternative: self.alternative,
            alpha: self.alpha,
            t_stat: self.t_stat,
            p_val: self.p_val,
        }
    }

    pub fn summary(&self) -> String {
        self.summary_at(&Local::now())
    }

    pub fn summary_at(&self, at: &DateTime<Local>) -> String {
        self.outline().render(at)
    }

    pub fn report(&self) -> TTestReport {
        self.outline().report(&Local::now())
    }

    pub fn to_file(&self, path: Option<&Path>) -> Result<PathBuf> {
        let at = Local::now();
        report::write_report(&self.outline().report(&at), path, &at)
    }
}

impl fmt::Display for OneSampleTTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1-Sample T-Test on Data of Size {}, Hypothesized Population Mean of {}",
            self.a.len(),
            self.popmean
        )
    }
}

/// t statistic and degrees of freedom of `a` against `popmean`.
pub(crate) fn one_sample_statistic<S>(a: &ArrayBase<S, Ix1>, popmean: f64) -> Result<(f64, f64)>
where
    S: Data<Elem = f64>,
{
    let n = a.len();
    if n < 2 {
        return Err(StatsError::InsufficientData(format!(
            "a t-test needs at least 2 observations per sample, got {}",
            n
        )));
    }
    let d = mean(a) - popmean;
    let denom = (variance(a, 1) / n as f64).sqrt();
    if denom == 0.0 {
        log::warn!("Sample has zero variance; the t statistic is not finite");
    }
    Ok((d / denom, (n - 1) as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ndarray::{array, Array};

    const EXPECTED_T: f64 = 0.547_722_557_505_166_1;
    const EXPECTED_P: f64 = 0.598_827_136_697_289;

    fn one_to_nine() -> Array1<f64> {
        Array::range(1.0, 10.0, 1.0)
    }

    #[test]
    fn test_reference_values() {
        let test = OneSampleTTest::new(&one_to_nine(), 4.5, &TTestConfig::default()).unwrap();
        assert!((test.t_stat - EXPECTED_T).abs() < 1e-12);
        assert!((test.p_val - EXPECTED_P).abs() < 1e-9);
        assert_eq!(test.df, 8.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let a = one_to_nine();
        for alpha in [-1.0, 2.0] {
            let config = TTestConfig::new(Alternative::Unequal, Some(alpha));
            assert!(matches!(
                OneSampleTTest::new(&a, 5.0, &config),
                Err(StatsError::InvalidAlpha(_))
            ));
        }
        let config = TTestConfig::default();
        assert!(matches!(
            OneSampleTTest::new(&array![1.0], 5.0, &config),
            Err(StatsError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_constant_sample() {
        let a = array![3.0, 3.0, 3.0];
        let test = OneSampleTTest::new(&a, 3.0, &TTestConfig::default()).unwrap();
        assert!(test.t_stat.is_nan());
        assert!(test.p_val.is_nan());
        assert!(!test.decision().reject_null);

        let test = OneSampleTTest::new(&a, 1.0, &TTestConfig::default()).unwrap();
        assert_eq!(test.t_stat, f64::INFINITY);
        assert_eq!(test.p_val, 0.0);
    }

    #[test]
    fn test_display() {
        let test = OneSampleTTest::new(&one_to_nine(), 4.5, &TTestConfig::default()).unwrap();
        assert_eq!(
            test.to_string(),
            "1-Sample T-Test on Data of Size 9, Hypothesized Population Mean of 4.5"
        );
    }

    #[test]
    fn test_summary() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 59).unwrap();
        let config = TTestConfig::new(Alternative::Less, Some(0.01));
        let test = OneSampleTTest::new(&one_to_nine(), 10.0, &config).unwrap();
        let text = test.summary_at(&at);

        assert!(text.contains("Significance Test: T-Test (one-sided)"));
        assert!(text.contains("Date: Mon, 19 Oct 2026"));
        assert!(text.contains("   Independent Observations"));
        assert!(text.contains("Data Size: 9"));
        assert!(text.contains("Population Mean: 10"));
        assert!(text.contains("Null Hypothesis:        Mean 1 == 10"));
        assert!(text.contains("Alternative Hypothesis: Mean 1 < 10"));
        assert!(text.contains("Alpha: 0.01"));
        assert!(text.contains("Reject Null Hypothesis: Yes"));
        assert!(text.contains("Accept Alternative Hypothesis: Yes"));
    }

    #[test]
    fn test_report() {
        let config = TTestConfig::new(Alternative::Greater, Some(0.5));
        let test = OneSampleTTest::new(&one_to_nine(), 4.5, &config).unwrap();
        let report = test.report();
        assert_eq!(report.sig_test, "T-Test (one-sided)");
        assert_eq!(report.assumptions, vec!["Independent Observations"]);
        assert_eq!(report.data_size, vec![9]);
        assert_eq!(report.pop_mean, Some(4.5));
        assert_eq!(report.alt_hyp, "Mean 1 > 4.5");
        assert!((report.p_val - EXPECTED_P / 2.0).abs() < 1e-9);
        assert!(report.reject_null);
        assert!(report.accept_alt);
    }
}
