use ndarray::{s, Array1, Array2, ArrayBase, Axis, Data, Ix2};

use crate::error::{Result, StatsError};

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// Rows and then columns are scaled to a largest magnitude of one before
/// elimination, so the singularity check does not depend on the units of
/// each variable. A scaled pivot no larger than `n * EPSILON` is treated as
/// zero and the matrix is reported as singular.
pub fn inverse<S>(a: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
where
    S: Data<Elem = f64>,
{
    let (n, m) = a.dim();
    if n != m {
        return Err(StatsError::InsufficientData(format!(
            "cannot invert a non-square {}x{} matrix",
            n, m
        )));
    }
    if n == 0 {
        return Err(StatsError::SingularMatrix);
    }

    let row_scale = a
        .rows()
        .into_iter()
        .map(|row| reciprocal_max(row.iter()))
        .collect::<Result<Array1<f64>>>()?;
    let mut work = a.to_owned() * &row_scale.view().insert_axis(Axis(1));
    let col_scale = work
        .columns()
        .into_iter()
        .map(|col| reciprocal_max(col.iter()))
        .collect::<Result<Array1<f64>>>()?;
    work *= &col_scale;

    let tol = n as f64 * f64::EPSILON;
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        // Partial pivoting: largest magnitude at or below the diagonal.
        let mut pivot_row = col;
        let mut pivot_abs = work[[col, col]].abs();
        for row in (col + 1)..n {
            let candidate = work[[row, col]].abs();
            if candidate > pivot_abs {
                pivot_abs = candidate;
                pivot_row = row;
            }
        }
        if pivot_abs <= tol {
            return Err(StatsError::SingularMatrix);
        }

        if pivot_row != col {
            swap_rows(&mut work, col, pivot_row);
            swap_rows(&mut inv, col, pivot_row);
        }

        let pivot = work[[col, col]];
        work.row_mut(col).mapv_inplace(|v| v / pivot);
        inv.row_mut(col).mapv_inplace(|v| v / pivot);

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                let (w, i) = (work[[col, k]], inv[[col, k]]);
                work[[row, k]] -= factor * w;
                inv[[row, k]] -= factor * i;
            }
        }
    }

    // inv(R A C) = C^-1 inv(A) R^-1, so inv(A) = C inv(RAC) R.
    inv *= &col_scale.view().insert_axis(Axis(1));
    inv *= &row_scale;
    Ok(inv)
}

/// `1 / max|v|`, or singular when the vector is zero or not finite.
fn reciprocal_max<'a, I>(values: I) -> Result<f64>
where
    I: Iterator<Item = &'a f64>,
{
    let mut max = 0.0f64;
    for v in values {
        if !v.is_finite() {
            return Err(StatsError::SingularMatrix);
        }
        max = max.max(v.abs());
    }
    if max == 0.0 {
        return Err(StatsError::SingularMatrix);
    }
    Ok(1.0 / max)
}

fn swap_rows(a: &mut Array2<f64>, i: usize, j: usize) {
    for k in 0..a.ncols() {
        a.swap([i, k], [j, k]);
    }
}

/// Prepend a column of ones to `x`.
pub fn with_intercept<S>(x: &ArrayBase<S, Ix2>) -> Array2<f64>
where
    S: Data<Elem = f64>,
{
    let (rows, cols) = x.dim();
    let mut out = Array2::<f64>::ones((rows, cols + 1));
    out.slice_mut(s![.., 1..]).assign(x);
    out
}
