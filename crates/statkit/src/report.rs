//! Serializable analysis reports and the JSON file writer.
//!
//! Each analysis turns into one of the report structs below; `write_report`
//! persists it. Non-finite floats are written as `null`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

use crate::error::Result;

/// Rule printed above and below each summary block.
pub const RULE: &str =
    "==============================================================================";

pub fn format_date(at: &DateTime<Local>) -> String {
    at.format("%a, %d %b %Y").to_string()
}

pub fn format_time(at: &DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// Name used when no output path is supplied, e.g. `Mon_19_Oct_2026_14_03_59.json`.
pub fn default_file_name(at: &DateTime<Local>) -> String {
    at.format("%a_%d_%b_%Y_%H_%M_%S.json").to_string()
}

/// Timestamped report path inside `dir`.
pub fn timestamped_path(dir: &Path) -> PathBuf {
    dir.join(default_file_name(&Local::now()))
}

/// Per-variable estimate in an [`OlsReport`].
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub estimate: f64,
    pub std_error: f64,
    pub t_stat: f64,
    pub p_val: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OlsReport {
    pub dependent_var: String,
    pub method: String,
    pub date: String,
    pub time: String,
    pub obs_count: usize,
    pub var_count: usize,
    /// Written as a JSON object keyed by variable name, in design-column order.
    #[serde(serialize_with = "serialize_in_order")]
    pub estimates: Vec<(String, EstimateReport)>,
    pub r_squared: f64,
    pub r_squared_adj: f64,
    pub durbin_watson: f64,
    pub omnibus_stat: Option<f64>,
    pub omnibus_p_val: Option<f64>,
    pub f_stat: f64,
    pub f_stat_p_val: f64,
    pub jb_stat: f64,
    pub jb_stat_p_val: f64,
    pub skew: f64,
    pub kurtosis: f64,
    pub aic_stat: f64,
    pub bic_stat: f64,
    pub log_likelihood: f64,
}

fn serialize_in_order<S>(
    estimates: &[(String, EstimateReport)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(estimates.iter().map(|(name, estimate)| (name, estimate)))
}

#[derive(Debug, Clone, Serialize)]
pub struct TTestReport {
    pub sig_test: String,
    pub date: String,
    pub time: String,
    pub assumptions: Vec<String>,
    /// Observations per sample, in argument order.
    pub data_size: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pop_mean: Option<f64>,
    pub null_hyp: String,
    pub alt_hyp: String,
    pub t_stat: f64,
    pub p_val: f64,
    pub alpha: Option<f64>,
    pub reject_null: bool,
    pub accept_alt: bool,
}

/// Write `report` as JSON to `path`, or to a timestamped file in the working
/// directory when `path` is `None`. Returns the path written.
pub fn write_report<T: Serialize>(
    report: &T,
    path: Option<&Path>,
    at: &DateTime<Local>,
) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(default_file_name(at)),
    };
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::info!("Wrote report to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_formats() {
        let at = Local.with_ymd_and_hms(2026, 10, 19, 14, 3, 59).unwrap();
        assert_eq!(format_date(&at), "Mon, 19 Oct 2026");
        assert_eq!(format_time(&at), "14:03:59");
        assert_eq!(default_file_name(&at), "Mon_19_Oct_2026_14_03_59.json");
    }

    #[test]
    fn test_non_finite_values_serialize_as_null() {
        #[derive(Serialize)]
        struct Row {
            v: f64,
        }
        let json = serde_json::to_string(&Row { v: f64::NAN }).unwrap();
        assert_eq!(json, r#"{"v":null}"#);
    }
}
