use std::path::PathBuf;

use anyhow::{Context, Result};

use statkit::{Ols, OlsOptions};

use crate::input::RunConfig;
use crate::load_data::read_table;

/// Inputs of an OLS run.
#[derive(Debug, Clone)]
pub struct OlsParams {
    pub data: PathBuf,
    pub y: String,
    /// Regressor columns; all other columns when empty.
    pub x: Vec<String>,
    pub output: Option<PathBuf>,
    pub print_summary: bool,
}

/// Fit the regression, print the summary and write the report if requested.
pub fn run_ols(params: &OlsParams, config: &RunConfig) -> Result<Ols> {
    let table = read_table(&params.data)?;
    let (x, y, x_names) = table.regression_data(&params.y, &params.x)?;
    log::info!(
        "[statkit::ols] Regressing '{}' on {} over {} rows",
        params.y,
        x_names.join(", "),
        y.len()
    );

    let options = OlsOptions {
        x_names: Some(x_names),
        y_name: params.y.clone(),
    };
    let reg = Ols::with_options(&x, &y, options).context("OLS regression failed")?;

    if params.print_summary {
        print!("{}", reg.summary()?);
    }
    if let Some(path) = config.report_path(params.output.as_ref()) {
        let written = reg.to_file(Some(&path))?;
        log::info!("[statkit::ols] Report written to {}", written.display());
    }
    Ok(reg)
}
