//! Student t-tests for the mean of one sample or the means of two samples.
//!
//! Both tests report the two-sided p-value for `Alternative::Unequal` and
//! half of it for the one-sided alternatives. The direction of a one-sided
//! alternative is taken into account by [`Decision`]: the null hypothesis
//! can be rejected while the alternative is still not accepted when the
//! statistic points the other way.
pub mod one_sample;
pub mod two_sample;

pub use one_sample::OneSampleTTest;
pub use two_sample::TwoSampleTTest;

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::config::Alternative;
use crate::report::{self, TTestReport, RULE};

/// Outcome of a t-test at the configured significance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub reject_null: bool,
    pub accept_alt: bool,
}

impl Decision {
    pub fn new(alternative: Alternative, alpha: Option<f64>, t_stat: f64, p_val: f64) -> Self {
        // NaN p-values compare false and never reject.
        let reject_null = matches!(alpha, Some(alpha) if p_val < alpha);
        let accept_alt = reject_null
            && match alternative {
                Alternative::Unequal => true,
                Alternative::Less => t_stat < 0.0,
                Alternative::Greater => t_stat > 0.0,
            };
        Self {
            reject_null,
            accept_alt,
        }
    }
}

/// Halve the two-sided p-value for one-sided alternatives.
pub(crate) fn sided_p_value(two_sided: f64, alternative: Alternative) -> f64 {
    if alternative.is_two_sided() {
        two_sided
    } else {
        two_sided / 2.0
    }
}

/// Everything the summary and the JSON report print for a t-test.
pub(crate) struct Outline {
    pub assumptions: Vec<&'static str>,
    pub data_size: Vec<usize>,
    pub pop_mean: Option<f64>,
    pub null_hyp: String,
    pub alt_hyp: String,
    pub alternative: Alternative,
    pub alpha: Option<f64>,
    pub t_stat: f64,
    pub p_val: f64,
}

impl Outline {
    fn sig_test(&self) -> String {
        format!("T-Test ({})", self.alternative.sidedness())
    }

    fn decision(&self) -> Decision {
        Decision::new(self.alternative, self.alpha, self.t_stat, self.p_val)
    }

    pub fn render(&self, at: &DateTime<Local>) -> String {
        let yes_no = |b: bool| if b { "Yes" } else { "No" };
        let decision = self.decision();
        let sizes = self
            .data_size
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", RULE);
        let _ = writeln!(out, "Significance Test: {}", self.sig_test());
        let _ = writeln!(out, "Date: {}", report::format_date(at));
        let _ = writeln!(out, "Time: {}", report::format_time(at));
        let _ = writeln!(out);
        let _ = writeln!(out, "Assumptions: ");
        for assumption in &self.assumptions {
            let _ = writeln!(out, "   {}", assumption);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Data Size: {}", sizes);
        if let Some(pop_mean) = self.pop_mean {
            let _ = writeln!(out, "Population Mean: {}", pop_mean);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Null Hypothesis:        {}", self.null_hyp);
        let _ = writeln!(out, "Alternative Hypothesis: {}", self.alt_hyp);
        let _ = writeln!(out);
        let _ = writeln!(out, "T-Statistic: {}", self.t_stat);
        let _ = writeln!(out, "P-Value: {}", self.p_val);
        match self.alpha {
            Some(alpha) => {
                let _ = writeln!(out, "Alpha: {}", alpha);
            }
            None => {
                let _ = writeln!(out, "Alpha: None");
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Reject Null Hypothesis: {}", yes_no(decision.reject_null));
        let _ = writeln!(
            out,
            "Accept Alternative Hypothesis: {}",
            yes_no(decision.accept_alt)
        );
        let _ = writeln!(out, "{}", RULE);
        out
    }

    pub fn report(&self, at: &DateTime<Local>) -> TTestReport {
        let decision = self.decision();
        TTestReport {
            sig_test: self.sig_test(),
            date: report::format_date(at),
            time: report::format_time(at),
            assumptions: self.assumptions.iter().map(|s| s.to_string()).collect(),
            data_size: self.data_size.clone(),
            pop_mean: self.pop_mean,
            null_hyp: self.null_hyp.clone(),
            alt_hyp: self.alt_hyp.clone(),
            t_stat: self.t_stat,
            p_val: self.p_val,
            alpha: self.alpha,
            reject_null: decision.reject_null,
            accept_alt: decision.accept_alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_without_alpha_never_rejects() {
        let d = Decision::new(Alternative::Unequal, None, 10.0, 1e-12);
        assert!(!d.reject_null);
        assert!(!d.accept_alt);
    }

    #[test]
    fn test_decision_respects_direction() {
        let d = Decision::new(Alternative::Less, Some(0.05), 3.0, 0.01);
        assert!(d.reject_null);
        assert!(!d.accept_alt);

        let d = Decision::new(Alternative::Greater, Some(0.05), 3.0, 0.01);
        assert!(d.reject_null && d.accept_alt);

        let d = Decision::new(Alternative::Unequal, Some(0.05), -3.0, 0.01);
        assert!(d.reject_null && d.accept_alt);
    }

    #[test]
    fn test_decision_boundaries() {
        assert!(!Decision::new(Alternative::Unequal, Some(0.05), 1.0, 0.05).reject_null);
        assert!(!Decision::new(Alternative::Unequal, Some(0.0), 1.0, 0.0).reject_null);
        assert!(!Decision::new(Alternative::Unequal, Some(0.05), f64::NAN, f64::NAN).reject_null);
    }

    #[test]
    fn test_sided_p_value() {
        assert_eq!(sided_p_value(0.4, Alternative::Unequal), 0.4);
        assert_eq!(sided_p_value(0.4, Alternative::Less), 0.2);
        assert_eq!(sided_p_value(0.4, Alternative::Greater), 0.2);
    }
}
