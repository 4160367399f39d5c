//! statkit: ordinary least squares regression and Student t-tests.
//!
//! This crate provides an OLS estimator with coefficient inference and
//! residual diagnostics, one- and two-sample t-tests with a configurable
//! alternative hypothesis, and text/JSON reporting for both.
//!
//! Everything is computed eagerly at construction on `ndarray` inputs, so a
//! successfully built `Ols` or t-test value is always fully populated.
pub mod config;
pub mod descriptive;
pub mod distributions;
pub mod error;
pub mod math;
pub mod normality;
pub mod ols;
pub mod report;
pub mod ttest;

pub use config::{Alternative, TTestConfig, TestType};
pub use error::{Result, StatsError};
pub use ols::{Ols, OlsOptions};
pub use ttest::{Decision, OneSampleTTest, TwoSampleTTest};
