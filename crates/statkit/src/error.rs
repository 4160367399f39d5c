use thiserror::Error;

/// Errors raised while validating inputs or computing statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Invalid alternative hypothesis. Expected 'less', 'unequal', or 'greater' but got: '{0}'")]
    InvalidAlternative(String),

    #[error("Invalid t-test type. Expected 'ind' or 'rel' but got: '{0}'")]
    InvalidTestType(String),

    #[error("Invalid alpha data value. Expected somewhere in range [0, 1] but got a value of: {0}")]
    InvalidAlpha(f64),

    #[error("Length mismatch: {left} observations vs {right} observations")]
    LengthMismatch { left: usize, right: usize },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error(
        "Your matrix of independent observations is singular! \
         Unfortunately, that means we cannot compute an OLS model for your provided data."
    )]
    SingularMatrix,

    #[error("Expected {expected} variable names but got {actual}")]
    NameCountMismatch { expected: usize, actual: usize },

    #[error("Failed to build {name} distribution: {reason}")]
    Distribution { name: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StatsError>;
