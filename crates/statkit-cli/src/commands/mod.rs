//! Analyses run by the `statkit` binary.
pub mod ols;
pub mod ttest;
