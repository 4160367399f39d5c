//! CSV/TSV loading into numeric columns.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use ndarray::{Array1, Array2};

/// A header row plus numeric columns. Empty cells are `None`.
#[derive(Debug, Clone)]
pub struct DataTable {
    pub headers: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl DataTable {
    pub fn nrows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found. Available columns: {}", name, self.headers.join(", ")))
    }

    /// Non-empty values of one column, in file order.
    pub fn column(&self, name: &str) -> Result<Array1<f64>> {
        let idx = self.index_of(name)?;
        Ok(self.columns[idx].iter().flatten().copied().collect())
    }

    /// Two columns restricted to the rows where both cells are present.
    pub fn paired_columns(&self, a: &str, b: &str) -> Result<(Array1<f64>, Array1<f64>)> {
        let (a_idx, b_idx) = (self.index_of(a)?, self.index_of(b)?);
        let mut left = Vec::with_capacity(self.nrows());
        let mut right = Vec::with_capacity(self.nrows());
        for (row, cells) in self.columns[a_idx].iter().zip(&self.columns[b_idx]).enumerate() {
            match cells {
                (Some(x), Some(y)) => {
                    left.push(*x);
                    right.push(*y);
                }
                _ => log::warn!("Skipping unpaired row {}", row + 1),
            }
        }
        Ok((Array1::from_vec(left), Array1::from_vec(right)))
    }

    /// Design matrix and response from rows where every requested cell is present.
    ///
    /// When `x_names` is empty, every column other than `y_name` is a regressor.
    pub fn regression_data(&self, y_name: &str, x_names: &[String]) -> Result<(Array2<f64>, Array1<f64>, Vec<String>)> {
        let y_idx = self.index_of(y_name)?;
        let x_names: Vec<String> = if x_names.is_empty() {
            self.headers.iter().filter(|h| h.as_str() != y_name).cloned().collect()
        } else {
            x_names.to_vec()
        };
        if x_names.is_empty() {
            return Err(anyhow!("No independent variable columns besides '{}'", y_name));
        }
        let x_idx = x_names
            .iter()
            .map(|name| self.index_of(name))
            .collect::<Result<Vec<_>>>()?;

        let mut x_data = Vec::with_capacity(self.nrows() * x_idx.len());
        let mut y_data = Vec::with_capacity(self.nrows());
        for row in 0..self.nrows() {
            let y = self.columns[y_idx][row];
            let xs: Option<Vec<f64>> = x_idx.iter().map(|&c| self.columns[c][row]).collect();
            match (y, xs) {
                (Some(y), Some(xs)) => {
                    y_data.push(y);
                    x_data.extend(xs);
                }
                _ => log::warn!("Skipping incomplete row {}", row + 1),
            }
        }

        let n = y_data.len();
        let x = Array2::from_shape_vec((n, x_idx.len()), x_data)
            .context("Failed to assemble the design matrix")?;
        Ok((x, Array1::from_vec(y_data), x_names))
    }
}

/// Check that the path exists and carries a `.csv` or `.tsv` extension.
pub fn validate_tsv_or_csv_file(path: &Path) -> Result<()> {
    let ext = path.extension().and_then(|s| s.to_str()).map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("tsv") | Some("csv") => {}
        _ => anyhow::bail!("File must have a .tsv or .csv extension: {}", path.display()),
    }

    if !path.exists() {
        anyhow::bail!("File does not exist: {}", path.display());
    }

    Ok(())
}

/// Read a delimited file with a header row; the delimiter follows the extension.
pub fn read_table(path: &PathBuf) -> Result<DataTable> {
    validate_tsv_or_csv_file(path)?;
    let delimiter = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => b'\t',
        _ => b',',
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open data file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read header row")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); headers.len()];

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        for (col_idx, column) in columns.iter_mut().enumerate() {
            let cell = record.get(col_idx).unwrap_or("");
            if cell.is_empty() {
                column.push(None);
                continue;
            }
            let value = cell.parse::<f64>().with_context(|| {
                format!(
                    "Invalid number '{}' in column '{}' at row {}",
                    cell,
                    headers[col_idx],
                    row_idx + 1
                )
            })?;
            column.push(Some(value));
        }
    }

    log::debug!("Loaded {} columns from {}", headers.len(), path.display());
    Ok(DataTable { headers, columns })
}
