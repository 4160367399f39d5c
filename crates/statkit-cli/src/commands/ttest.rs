use std::path::PathBuf;

use anyhow::{Context, Result};

use statkit::{OneSampleTTest, TestType, TwoSampleTTest};

use crate::input::RunConfig;
use crate::load_data::read_table;

#[derive(Debug, Clone)]
pub struct OneSampleParams {
    pub data: PathBuf,
    pub column: String,
    pub popmean: f64,
    pub output: Option<PathBuf>,
    pub print_summary: bool,
}

#[derive(Debug, Clone)]
pub struct TwoSampleParams {
    pub data: PathBuf,
    pub a: String,
    pub b: String,
    pub output: Option<PathBuf>,
    pub print_summary: bool,
}

pub fn run_one_sample(params: &OneSampleParams, config: &RunConfig) -> Result<OneSampleTTest> {
    let table = read_table(&params.data)?;
    let a = table.column(&params.column)?;
    log::info!(
        "[statkit::ttest] 1-sample test of '{}' ({} values) against {}",
        params.column,
        a.len(),
        params.popmean
    );

    let test = OneSampleTTest::new(&a, params.popmean, &config.ttest)
        .with_context(|| format!("t-test on column '{}' failed", params.column))?;

    if params.print_summary {
        print!("{}", test.summary());
    }
    if let Some(path) = config.report_path(params.output.as_ref()) {
        test.to_file(Some(&path))?;
    }
    Ok(test)
}

pub fn run_two_sample(params: &TwoSampleParams, config: &RunConfig) -> Result<TwoSampleTTest> {
    let table = read_table(&params.data)?;
    let (a, b) = match config.ttest.test_type {
        TestType::Related => table.paired_columns(&params.a, &params.b)?,
        TestType::Independent => (table.column(&params.a)?, table.column(&params.b)?),
    };
    log::info!(
        "[statkit::ttest] 2-sample {} test of '{}' vs '{}'",
        config.ttest.test_type,
        params.a,
        params.b
    );

    let test = TwoSampleTTest::new(&a, &b, &config.ttest)
        .with_context(|| format!("t-test of '{}' vs '{}' failed", params.a, params.b))?;

    if params.print_summary {
        print!("{}", test.summary());
    }
    if let Some(path) = config.report_path(params.output.as_ref()) {
        test.to_file(Some(&path))?;
    }
    Ok(test)
}
