use std::any::Any;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use statkit::{Alternative, TTestConfig, TestType};

/// Run configuration read from a JSON file and overridden from the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub ttest: TTestConfig,
    /// Directory that receives timestamped JSON reports when no explicit
    /// output file is given.
    pub output_dir: Option<PathBuf>,
}

/// Look up an argument that only some subcommands define.
fn arg<'a, T: Any + Clone + Send + Sync + 'static>(matches: &'a ArgMatches, id: &str) -> Option<&'a T> {
    matches.try_get_one::<T>(id).ok().flatten()
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        let config: RunConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
        config.ttest.validate()?;
        Ok(config)
    }

    /// Load `--config` when given (defaults otherwise) and apply the t-test
    /// overrides present on this subcommand.
    pub fn from_arguments(matches: &ArgMatches) -> Result<Self> {
        let mut config = match arg::<PathBuf>(matches, "config") {
            Some(path) => {
                log::info!("[statkit] Using config: {:?}", path);
                RunConfig::load(path)?
            }
            None => RunConfig::default(),
        };

        if let Some(alternative) = arg::<String>(matches, "alternative") {
            config.ttest.alternative = Alternative::from_str(alternative)?;
        }
        if let Some(alpha) = arg::<f64>(matches, "alpha") {
            config.ttest.alpha = Some(*alpha);
        }
        if let Some(test_type) = arg::<String>(matches, "test_type") {
            config.ttest.test_type = TestType::from_str(test_type)?;
        }
        if arg::<bool>(matches, "unequal_var").copied().unwrap_or(false) {
            config.ttest.equal_var = false;
        }

        config.ttest.validate()?;
        Ok(config)
    }

    /// Where to write the JSON report, if anywhere.
    pub fn report_path(&self, output: Option<&PathBuf>) -> Option<PathBuf> {
        match (output, &self.output_dir) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(dir)) => Some(statkit::report::timestamped_path(dir)),
            (None, None) => None,
        }
    }
}
