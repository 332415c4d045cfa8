use crate::error::Error;
use crate::metrics::record_alloc_bytes;
use crate::threading;
use crate::CoreResult;
use ndarray::Array2;
use tracing::{debug, trace};

/// Dense row-major matrix of `f64`.
///
/// A `Matrix` always has at least one row and one column and its storage
/// holds exactly `rows * cols` values; element `(r, c)` lives at
/// `r * cols + c`. The shape is fixed at construction. Dropping the value
/// releases the storage, and every duplicate is a deep copy.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Reserve `rows * cols` slots filled with `value`, reporting allocation
/// failure instead of aborting.
fn alloc_storage(rows: usize, cols: usize, value: f64) -> CoreResult<Vec<f64>> {
    let len = rows
        .checked_mul(cols)
        .ok_or(Error::Alloc {
            elements: rows.saturating_mul(cols),
        })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::Alloc { elements: len })?;
    data.resize(len, value);
    let bytes = len * std::mem::size_of::<f64>();
    record_alloc_bytes(bytes);
    trace!(rows, cols, bytes, "allocated matrix storage");
    Ok(data)
}

fn ensure_non_empty(op: &'static str, rows: usize, cols: usize) -> CoreResult<()> {
    if rows == 0 || cols == 0 {
        return Err(Error::empty(op, 1, rows.min(cols)));
    }
    Ok(())
}

impl Matrix {
    /// Zero-initialised `rows x cols` matrix. Either dimension being zero is
    /// an error, not an empty matrix.
    pub fn zeros(rows: usize, cols: usize) -> CoreResult<Self> {
        Self::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> CoreResult<Self> {
        ensure_non_empty("create", rows, cols)?;
        let data = alloc_storage(rows, cols, value)?;
        Ok(Self { rows, cols, data })
    }

    /// Take ownership of row-major `data`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> CoreResult<Self> {
        ensure_non_empty("from_vec", rows, cols)?;
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::invalid_argument(format!(
                "data length {} does not match {rows}x{cols} shape",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from a list of equally sized rows.
    ///
    /// ```
    /// use numstat_core::Matrix;
    /// let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    /// assert_eq!(m.get(1, 0).unwrap(), 3.0);
    /// ```
    pub fn from_rows<const N: usize>(rows: &[[f64; N]]) -> CoreResult<Self> {
        let mut matrix = Self::zeros(rows.len(), N)?;
        for (dst, src) in matrix.data.chunks_exact_mut(N).zip(rows) {
            dst.copy_from_slice(src);
        }
        Ok(matrix)
    }

    /// Release the storage now. Equivalent to dropping the value.
    pub fn free(self) {}

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> CoreResult<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::Bounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> CoreResult<f64> {
        let idx = self.index(row, col)?;
        Ok(self.data[idx])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> CoreResult<()> {
        let idx = self.index(row, col)?;
        self.data[idx] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Deep copy into freshly allocated storage.
    ///
    /// Unlike `clone`, running out of memory is reported as
    /// [`Error::Alloc`].
    pub fn copy(&self) -> CoreResult<Self> {
        let mut data = alloc_storage(self.rows, self.cols, 0.0)?;
        data.copy_from_slice(&self.data);
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Row-major view of every element.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn row(&self, row: usize) -> CoreResult<&[f64]> {
        let start = self.index(row, 0)?;
        Ok(&self.data[start..start + self.cols])
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn to_array2(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows, self.cols), |(r, c)| {
            self.data[r * self.cols + c]
        })
    }
}

impl TryFrom<Array2<f64>> for Matrix {
    type Error = Error;

    fn try_from(array: Array2<f64>) -> Result<Self, Self::Error> {
        let (rows, cols) = array.dim();
        // `iter` walks in logical row-major order whatever the memory layout.
        let data: Vec<f64> = array.iter().copied().collect();
        Matrix::from_vec(rows, cols, data)
    }
}

fn ensure_same_shape(op: &'static str, a: &Matrix, b: &Matrix) -> CoreResult<()> {
    if a.shape() != b.shape() {
        return Err(Error::DimMismatch {
            op,
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(())
}

/// Element-wise sum of two equally shaped matrices.
pub fn add(a: &Matrix, b: &Matrix) -> CoreResult<Matrix> {
    ensure_same_shape("add", a, b)?;
    let mut out = Matrix::zeros(a.rows, a.cols)?;
    for ((dst, &x), &y) in out.data.iter_mut().zip(&a.data).zip(&b.data) {
        *dst = x + y;
    }
    debug!(rows = a.rows, cols = a.cols, "add");
    Ok(out)
}

/// Matrix product `a * b`, shape `a.rows x b.cols`.
///
/// Each output cell sums `a[i, k] * b[k, j]` in increasing `k` with a plain
/// `f64` accumulator, so results are reproducible bit for bit whether or not
/// rows are computed in parallel.
pub fn matmul(a: &Matrix, b: &Matrix) -> CoreResult<Matrix> {
    if a.cols != b.rows {
        return Err(Error::DimMismatch {
            op: "matmul",
            left: a.shape(),
            right: b.shape(),
        });
    }
    let mut out = Matrix::zeros(a.rows, b.cols)?;
    let (m, n, k) = (a.rows, b.cols, a.cols);

    #[cfg(feature = "parallel")]
    {
        if threading::should_parallelize(m, n, k) {
            use rayon::prelude::*;
            threading::ensure_rayon_pool();
            debug!(m, n, k, "matmul: row-parallel path");
            out.data
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, dst)| product_row(a, b, i, dst));
            return Ok(out);
        }
    }
    #[cfg(not(feature = "parallel"))]
    {
        if threading::should_parallelize(m, n, k) {
            trace!(m, n, k, "matmul: large product, built without `parallel`");
        }
    }

    for (i, dst) in out.data.chunks_exact_mut(n).enumerate() {
        product_row(a, b, i, dst);
    }
    debug!(m, n, k, "matmul");
    Ok(out)
}

#[inline]
fn product_row(a: &Matrix, b: &Matrix, i: usize, dst: &mut [f64]) {
    let lhs = &a.data[i * a.cols..(i + 1) * a.cols];
    for (j, cell) in dst.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (k, &x) in lhs.iter().enumerate() {
            sum += x * b.data[k * b.cols + j];
        }
        *cell = sum;
    }
}
