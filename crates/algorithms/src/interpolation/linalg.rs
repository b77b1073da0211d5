//! Dense linear solves for the trend-surface and thin plate spline systems.
//!
//! LU factorization with partial pivoting. A pivot that is negligible
//! relative to its row's original magnitude is treated as singular and
//! reported as [`Error::DegenerateGeometry`], since every system solved
//! here becomes singular exactly when the sample geometry is degenerate
//! (collinear or duplicate points).

use ndarray::{Array1, Array2};
use surfit_core::{Error, Result};
use tracing::trace;

/// Relative pivot threshold below which the system is considered singular.
const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve `mat · x = rhs` for `x`.
///
/// `context` names the system in error messages.
pub(crate) fn solve(mut mat: Array2<f64>, mut rhs: Array1<f64>, context: &str) -> Result<Array1<f64>> {
    let n = rhs.len();
    debug_assert_eq!(mat.dim(), (n, n), "system matrix must be square");

    // Row magnitudes before elimination, carried along with row swaps
    let mut scale: Vec<f64> = mat
        .rows()
        .into_iter()
        .map(|row| row.iter().fold(0.0_f64, |m, v| m.max(v.abs())))
        .collect();

    if let Some(i) = scale.iter().position(|&s| s == 0.0) {
        return Err(Error::DegenerateGeometry(format!(
            "{}: singular system (row {} is zero)",
            context, i
        )));
    }

    for col in 0..n {
        // Find pivot (max absolute value in column)
        let mut max_val = mat[[col, col]].abs();
        let mut max_row = col;
        for row in (col + 1)..n {
            let val = mat[[row, col]].abs();
            if val > max_val {
                max_val = val;
                max_row = row;
            }
        }

        if max_val <= PIVOT_TOLERANCE * scale[max_row] {
            trace!(col, max_val, "negligible pivot");
            return Err(Error::DegenerateGeometry(format!(
                "{}: singular system (points may be collinear or duplicate)",
                context
            )));
        }

        if max_row != col {
            for j in 0..n {
                mat.swap([col, j], [max_row, j]);
            }
            rhs.swap(col, max_row);
            scale.swap(col, max_row);
        }

        // Eliminate below
        let pivot = mat[[col, col]];
        for row in (col + 1)..n {
            let factor = mat[[row, col]] / pivot;
            if factor == 0.0 {
                continue;
            }
            mat[[row, col]] = 0.0;
            for j in (col + 1)..n {
                mat[[row, j]] -= factor * mat[[col, j]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut x = Array1::<f64>::zeros(n);
    for col in (0..n).rev() {
        let mut sum = rhs[col];
        for j in (col + 1)..n {
            sum -= mat[[col, j]] * x[j];
        }
        x[col] = sum / mat[[col, col]];
    }

    Ok(x)
}
