//! Dense linear algebra for the small normal-equation systems of OLS.
//!
//! The systems are `k x k` with `k` the number of regressors plus one, so a
//! pure-Rust Gauss-Jordan inverse is enough and keeps the crate free of
//! BLAS/LAPACK.
pub mod linalg;

pub use linalg::{inverse, with_intercept};
