use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use ndarray::{Array1, ArrayBase, Data, Ix1};

use crate::config::{Alternative, TTestConfig, TestType};
use crate::descriptive::{mean, variance};
use crate::distributions::students_t_two_sided;
use crate::error::{Result, StatsError};
use crate::report::{self, TTestReport};
use crate::ttest::one_sample::one_sample_statistic;
use crate::ttest::{sided_p_value, Decision, Outline};

/// t-test comparing the means of two samples.
#[derive(Debug, Clone)]
pub struct TwoSampleTTest {
    pub a: Array1<f64>,
    pub b: Array1<f64>,
    pub test_type: TestType,
    pub equal_var: bool,
    pub alternative: Alternative,
    pub alpha: Option<f64>,
    pub df: f64,
    pub t_stat: f64,
    pub p_val: f64,
}

impl TwoSampleTTest {
    pub fn new<S1, S2>(
        a: &ArrayBase<S1, Ix1>,
        b: &ArrayBase<S2, Ix1>,
        config: &TTestConfig,
    ) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        config.validate()?;

        let (t_stat, df) = match config.test_type {
            TestType::Independent if config.equal_var => pooled_statistic(a, b)?,
            TestType::Independent => welch_statistic(a, b)?,
            TestType::Related => {
                if a.len() != b.len() {
                    return Err(StatsError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                let d = a.to_owned() - b;
                one_sample_statistic(&d, 0.0)?
            }
        };
        let p_val = sided_p_value(students_t_two_sided(t_stat, df)?, config.alternative);

        log::debug!(
            "2-sample t-test ({}, equal_var = {}): t = {}, df = {}, p = {}",
            config.test_type,
            config.equal_var,
            t_stat,
            df,
            p_val
        );

        Ok(Self {
            a: a.to_owned(),
            b: b.to_owned(),
            test_type: config.test_type,
            equal_var: config.equal_var,
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

    fn assumptions(&self) -> Vec<&'static str> {
        match self.test_type {
            TestType::Independent if self.equal_var => {
                vec!["Independent Samples", "Equal Variances"]
            }
            TestType::Independent => vec!["Independent Samples", "Unequal Variances"],
            TestType::Related => vec!["Related Samples"],
        }
    }

    fn outline(&self) -> Outline {
        Outline {
            assumptions: self.assumptions(),
            data_size: vec![self.a.len(), self.b.len()],
            pop_mean: None,
            null_hyp: "Mean 1 == Mean 2".to_string(),
            alt_hyp: format!("Mean 1 {} Mean 2", self.alternative.operator()),
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

impl fmt::Display for TwoSampleTTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2-Sample T-Test on Data of Size {}", self.a.len())
    }
}

fn check_sizes(n1: usize, n2: usize) -> Result<()> {
    if n1 < 2 || n2 < 2 {
        return Err(StatsError::InsufficientData(format!(
            "a t-test needs at least 2 observations per sample, got {} and {}",
            n1, n2
        )));
    }
    Ok(())
}

/// Student's t with the pooled variance estimate.
fn pooled_statistic<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>) -> Result<(f64, f64)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let (n1, n2) = (a.len(), b.len());
    check_sizes(n1, n2)?;
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    let df = n1f + n2f - 2.0;
    let svar = ((n1f - 1.0) * variance(a, 1) + (n2f - 1.0) * variance(b, 1)) / df;
    let denom = (svar * (1.0 / n1f + 1.0 / n2f)).sqrt();
    Ok(((mean(a) - mean(b)) / denom, df))
}

/// Welch's t with Welch-Satterthwaite degrees of freedom.
fn welch_statistic<S1, S2>(a: &ArrayBase<S1, Ix1>, b: &ArrayBase<S2, Ix1>) -> Result<(f64, f64)>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    let (n1, n2) = (a.len(), b.len());
    check_sizes(n1, n2)?;
    let (n1f, n2f) = (n1 as f64, n2 as f64);

    let vn1 = variance(a, 1) / n1f;
    let vn2 = variance(b, 1) / n2f;
    let mut df = (vn1 + vn2).powi(2) / (vn1.powi(2) / (n1f - 1.0) + vn2.powi(2) / (n2f - 1.0));
    // Both samples constant: 0 / 0.
    if df.is_nan() {
        df = 1.0;
    }
    let denom = (vn1 + vn2).sqrt();
    Ok(((mean(a) - mean(b)) / denom, df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};

    fn one_to_nine() -> Array1<f64> {
        Array::range(1.0, 10.0, 1.0)
    }

    fn shifted() -> Array1<f64> {
        array![1.5, 2.1, 3.4, 4.0, 5.8, 6.2, 7.1, 8.9, 9.3]
    }

    #[test]
    fn test_pooled_reference() {
        let test =
            TwoSampleTTest::new(&one_to_nine(), &shifted(), &TTestConfig::default()).unwrap();
        assert!((test.t_stat - -0.280_305_955_290_693_74).abs() < 1e-12);
        assert_eq!(test.df, 16.0);
        assert!(test.p_val > 0.5);
    }

    #[test]
    fn test_welch_and_pooled_differ_for_unequal_sizes() {
        let b = array![2.0, 4.0, 6.0, 9.0];
        let pooled = TwoSampleTTest::new(&one_to_nine(), &b, &TTestConfig::default()).unwrap();
        assert!((pooled.t_stat - -0.148_143_016_569_992_6).abs() < 1e-12);
        assert_eq!(pooled.df, 11.0);

        let config = TTestConfig::default().with_equal_var(false);
        let welch = TwoSampleTTest::new(&one_to_nine(), &b, &config).unwrap();
        assert!((welch.t_stat - -0.142_857_142_857_142_85).abs() < 1e-12);
        assert!((welch.df - 5.380_280_521_205_08).abs() < 1e-9);
    }

    #[test]
    fn test_related_reference() {
        let config = TTestConfig::default().with_test_type(TestType::Related);
        let test = TwoSampleTTest::new(&one_to_nine(), &shifted(), &config).unwrap();
        assert!((test.t_stat - -3.478_505_426_185_217_5).abs() < 1e-12);
        assert_eq!(test.df, 8.0);
        assert!(test.p_val < 0.01);
    }

    #[test]
    fn test_related_requires_equal_lengths() {
        let config = TTestConfig::default().with_test_type(TestType::Related);
        let err = TwoSampleTTest::new(&one_to_nine(), &array![1.0, 2.0], &config).unwrap_err();
        assert!(matches!(err, StatsError::LengthMismatch { left: 9, right: 2 }));
    }

    #[test]
    fn test_constant_samples_use_one_degree_of_freedom() {
        let config = TTestConfig::default().with_equal_var(false);
        let test = TwoSampleTTest::new(&array![1.0, 1.0], &array![2.0, 2.0], &config).unwrap();
        assert_eq!(test.df, 1.0);
        assert_eq!(test.t_stat, f64::NEG_INFINITY);
    }

    #[test]
    fn test_assumptions() {
        let a = one_to_nine();
        let b = shifted();
        let ind = TwoSampleTTest::new(&a, &b, &TTestConfig::default()).unwrap();
        assert_eq!(ind.report().assumptions, vec!["Independent Samples", "Equal Variances"]);

        let welch =
            TwoSampleTTest::new(&a, &b, &TTestConfig::default().with_equal_var(false)).unwrap();
        assert_eq!(welch.report().assumptions, vec!["Independent Samples", "Unequal Variances"]);

        let rel = TwoSampleTTest::new(
            &a,
            &b,
            &TTestConfig::default().with_test_type(TestType::Related),
        )
        .unwrap();
        assert_eq!(rel.report().assumptions, vec!["Related Samples"]);
    }

    #[test]
    fn test_summary_and_display() {
        let config = TTestConfig::new(Alternative::Greater, Some(0.01));
        let b = one_to_nine().mapv(|v| v + 30.0);
        let test = TwoSampleTTest::new(&one_to_nine(), &b, &config).unwrap();
        assert_eq!(test.to_string(), "2-Sample T-Test on Data of Size 9");

        let text = test.summary();
        assert!(text.contains("Null Hypothesis:        Mean 1 == Mean 2"));
        assert!(text.contains("Alternative Hypothesis: Mean 1 > Mean 2"));
        assert!(text.contains("Data Size: 9, 9"));
        assert!(!text.contains("Population Mean"));
        // the samples differ hugely, but in the opposite direction
        assert!(text.contains("Reject Null Hypothesis: Yes"));
        assert!(text.contains("Accept Alternative Hypothesis: No"));
    }
}
