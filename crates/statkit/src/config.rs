use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, StatsError};

/// Alternative hypothesis of a t-test.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alternative {
    /// The means differ (two-sided).
    #[default]
    Unequal,
    /// The first mean is below the second (or below the population mean).
    Less,
    /// The first mean is above the second (or above the population mean).
    Greater,
}

impl Alternative {
    pub fn is_two_sided(&self) -> bool {
        matches!(self, Alternative::Unequal)
    }

    pub fn sidedness(&self) -> &'static str {
        if self.is_two_sided() {
            "two-sided"
        } else {
            "one-sided"
        }
    }

    /// Relational operator used when printing the hypothesis.
    pub fn operator(&self) -> &'static str {
        match self {
            Alternative::Unequal => "!=",
            Alternative::Less => "<",
            Alternative::Greater => ">",
        }
    }
}

impl FromStr for Alternative {
    type Err = StatsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unequal" => Ok(Alternative::Unequal),
            "less" => Ok(Alternative::Less),
            "greater" => Ok(Alternative::Greater),
            _ => Err(StatsError::InvalidAlternative(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Alternative {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alternative::Unequal => "unequal",
            Alternative::Less => "less",
            Alternative::Greater => "greater",
        };
        f.write_str(name)
    }
}

/// How the two samples of a two-sample t-test relate to each other.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestType {
    /// Samples drawn independently of each other.
    #[default]
    #[serde(rename = "ind")]
    Independent,
    /// Paired observations (e.g. before/after on the same subjects).
    #[serde(rename = "rel")]
    Related,
}

impl FromStr for TestType {
    type Err = StatsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ind" => Ok(TestType::Independent),
            "rel" => Ok(TestType::Related),
            _ => Err(StatsError::InvalidTestType(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for TestType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestType::Independent => f.write_str("ind"),
            TestType::Related => f.write_str("rel"),
        }
    }
}

/// Parameters shared by the one- and two-sample t-tests.
///
/// `test_type` and `equal_var` only matter for the two-sample test.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TTestConfig {
    pub alternative: Alternative,
    /// Significance level. When unset, the null hypothesis is never rejected.
    pub alpha: Option<f64>,
    pub test_type: TestType,
    pub equal_var: bool,
}

impl Default for TTestConfig {
    fn default() -> Self {
        Self {
            alternative: Alternative::Unequal,
            alpha: None,
            test_type: TestType::Independent,
            equal_var: true,
        }
    }
}

impl TTestConfig {
    pub fn new(alternative: Alternative, alpha: Option<f64>) -> Self {
        Self {
            alternative,
            alpha,
            ..Default::default()
        }
    }

    pub fn with_test_type(mut self, test_type: TestType) -> Self {
        self.test_type = test_type;
        self
    }

    pub fn with_equal_var(mut self, equal_var: bool) -> Self {
        self.equal_var = equal_var;
        self
    }

    /// Check that alpha, when given, lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if let Some(alpha) = self.alpha {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(StatsError::InvalidAlpha(alpha));
            }
        }
        Ok(())
    }

    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TTestConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
