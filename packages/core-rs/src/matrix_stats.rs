//! Column-wise statistics over a [`Matrix`] whose rows are observations and
//! whose columns are variables.
//!
//! Two second-moment matrices are provided:
//!
//! - [`covariance`] sums `x_ki * x_kj` about zero and divides by `n - 1`.
//!   No column means are subtracted, so for non-centred data this is a
//!   scaled Gram (cross-moment) matrix rather than the textbook covariance.
//! - [`centered_covariance`] subtracts each column mean first and is the
//!   usual unbiased sample covariance.
//!
//! For data whose columns already have zero mean the two agree.

use crate::accumulator::StreamingAccumulator;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::CoreResult;
use tracing::debug;

fn require_rows(op: &'static str, m: &Matrix, required: usize) -> CoreResult<()> {
    if m.rows() < required {
        return Err(Error::empty(op, required, m.rows()));
    }
    Ok(())
}

/// `1 x cols` matrix holding the mean of each column.
pub fn column_mean(m: &Matrix) -> CoreResult<Matrix> {
    require_rows("column_mean", m, 1)?;
    let (rows, cols) = m.shape();
    let mut sums = Matrix::zeros(1, cols)?;
    let mut totals = vec![0.0; cols];
    for i in 0..rows {
        for (total, &v) in totals.iter_mut().zip(m.row(i)?) {
            *total += v;
        }
    }
    for (j, total) in totals.into_iter().enumerate() {
        sums.set(0, j, total / rows as f64)?;
    }
    debug!(rows, cols, "column_mean");
    Ok(sums)
}

/// `1 x cols` matrix of per-column sample variances.
pub fn column_variance(m: &Matrix) -> CoreResult<Matrix> {
    require_rows("column_variance", m, 2)?;
    let (rows, cols) = m.shape();
    let mut accs = vec![StreamingAccumulator::new(); cols];
    for i in 0..rows {
        for (acc, &v) in accs.iter_mut().zip(m.row(i)?) {
            acc.push(v);
        }
    }
    let mut out = Matrix::zeros(1, cols)?;
    for (j, acc) in accs.iter().enumerate() {
        out.set(0, j, acc.variance())?;
    }
    debug!(rows, cols, "column_variance");
    Ok(out)
}

/// `cols x cols` second-moment matrix about zero, `Σ_k m[k,i] m[k,j] / (rows - 1)`.
///
/// Only the upper triangle is accumulated; the lower one is mirrored, so the
/// result is exactly symmetric. See the module docs for how this differs
/// from [`centered_covariance`].
pub fn covariance(m: &Matrix) -> CoreResult<Matrix> {
    require_rows("covariance", m, 2)?;
    let out = cross_moment(m, None)?;
    debug!(rows = m.rows(), cols = m.cols(), "covariance");
    Ok(out)
}

/// Unbiased sample covariance, `Σ_k (m[k,i] - μ_i)(m[k,j] - μ_j) / (rows - 1)`.
pub fn centered_covariance(m: &Matrix) -> CoreResult<Matrix> {
    require_rows("centered_covariance", m, 2)?;
    let means = column_mean(m)?;
    let out = cross_moment(m, Some(means.as_slice()))?;
    debug!(rows = m.rows(), cols = m.cols(), "centered_covariance");
    Ok(out)
}

fn cross_moment(m: &Matrix, center: Option<&[f64]>) -> CoreResult<Matrix> {
    let (rows, cols) = m.shape();
    let data = m.as_slice();
    let shift = |k: usize, j: usize| -> f64 {
        let v = data[k * cols + j];
        match center {
            Some(means) => v - means[j],
            None => v,
        }
    };
    let divisor = (rows - 1) as f64;
    let mut out = Matrix::zeros(cols, cols)?;
    for i in 0..cols {
        for j in i..cols {
            let mut sum = 0.0;
            for k in 0..rows {
                sum += shift(k, i) * shift(k, j);
            }
            sum /= divisor;
            out.set(i, j, sum)?;
            out.set(j, i, sum)?;
        }
    }
    Ok(out)
}
