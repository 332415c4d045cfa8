//! Small batch-trained models: linear and logistic regression by gradient
//! descent, and k-means clustering.
//!
//! Training data is a [`Matrix`] with one observation per row. The
//! [`Model::train`] / [`Model::predict_buffer`] pair accepts flat
//! [`TypedBuffer`]s plus a shape instead, and narrows predictions back into
//! the feature buffer's kind.
//!
//! Regression models have no intercept term: the prediction is `w · x`.

use crate::buffer::TypedBuffer;
use crate::dtype::DType;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::CoreResult;
use std::str::FromStr;
use tracing::debug;

const LINEAR_LEARNING_RATE: f64 = 0.001;
const LINEAR_ITERATIONS: usize = 500;
const LOGISTIC_LEARNING_RATE: f64 = 0.01;
const LOGISTIC_ITERATIONS: usize = 400;
pub const DEFAULT_CLUSTERS: usize = 3;
const KMEANS_ITERATIONS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelKind {
    LinearRegression,
    LogisticRegression,
    KMeans,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "linear_regression" => Ok(ModelKind::LinearRegression),
            "logistic_regression" => Ok(ModelKind::LogisticRegression),
            "kmeans" => Ok(ModelKind::KMeans),
            other => Err(Error::invalid_argument(format!("unknown model '{other}'"))),
        }
    }
}

/// A trained model. Owns its parameters; dropping it releases them.
#[derive(Clone, Debug, PartialEq)]
pub enum Model {
    Linear { weights: Vec<f64> },
    Logistic { weights: Vec<f64> },
    /// `k x features` matrix, one centre per row.
    KMeans { centers: Matrix },
}

fn identity(z: f64) -> f64 {
    z
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn dot(weights: &[f64], row: &[f64]) -> f64 {
    weights.iter().zip(row).map(|(w, x)| w * x).sum()
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest centre; ties go to the lower index.
fn nearest(centers: &Matrix, row: &[f64]) -> usize {
    let cols = centers.cols();
    let mut best = f64::INFINITY;
    let mut best_id = 0;
    for (c, center) in centers.as_slice().chunks_exact(cols).enumerate() {
        let d = squared_distance(row, center);
        if d < best {
            best = d;
            best_id = c;
        }
    }
    best_id
}

/// Coordinate-wise batch gradient descent. Each weight is updated in turn,
/// and later coordinates within the same sweep see the earlier updates.
fn gradient_descent(
    x: &Matrix,
    y: &[f64],
    learning_rate: f64,
    iterations: usize,
    link: fn(f64) -> f64,
) -> Vec<f64> {
    let (rows, cols) = x.shape();
    let data = x.as_slice();
    let mut weights = vec![0.0; cols];
    for _ in 0..iterations {
        for j in 0..cols {
            let mut grad = 0.0;
            for (row, &target) in data.chunks_exact(cols).zip(y) {
                grad += (link(dot(&weights, row)) - target) * row[j];
            }
            weights[j] -= learning_rate * grad / rows as f64;
        }
    }
    weights
}

fn ensure_targets<'a>(x: &Matrix, y: Option<&'a [f64]>) -> CoreResult<&'a [f64]> {
    let y = y.ok_or_else(|| Error::invalid_argument("train: regression requires targets"))?;
    if y.len() != x.rows() {
        return Err(Error::DimMismatch {
            op: "train",
            left: x.shape(),
            right: (y.len(), 1),
        });
    }
    Ok(y)
}

impl Model {
    /// Fit a model of `kind` to the rows of `x`. Regression needs one
    /// target per row; k-means ignores `y` and uses [`DEFAULT_CLUSTERS`].
    pub fn fit(kind: ModelKind, x: &Matrix, y: Option<&[f64]>) -> CoreResult<Self> {
        let model = match kind {
            ModelKind::LinearRegression => Model::Linear {
                weights: gradient_descent(
                    x,
                    ensure_targets(x, y)?,
                    LINEAR_LEARNING_RATE,
                    LINEAR_ITERATIONS,
                    identity,
                ),
            },
            ModelKind::LogisticRegression => Model::Logistic {
                weights: gradient_descent(
                    x,
                    ensure_targets(x, y)?,
                    LOGISTIC_LEARNING_RATE,
                    LOGISTIC_ITERATIONS,
                    sigmoid,
                ),
            },
            ModelKind::KMeans => return Self::fit_kmeans(x, DEFAULT_CLUSTERS),
        };
        debug!(?kind, rows = x.rows(), cols = x.cols(), "model trained");
        Ok(model)
    }

    /// Lloyd's algorithm seeded with the first `k` rows.
    ///
    /// A cluster that loses every member has its centre reset to the origin.
    pub fn fit_kmeans(x: &Matrix, k: usize) -> CoreResult<Self> {
        if k == 0 {
            return Err(Error::invalid_argument("kmeans: k must be greater than zero"));
        }
        let (rows, cols) = x.shape();
        if rows < k {
            return Err(Error::empty("kmeans", k, rows));
        }
        let data = x.as_slice();
        let mut centers = Matrix::from_vec(k, cols, data[..k * cols].to_vec())?;
        let mut labels = vec![0usize; rows];
        for _ in 0..KMEANS_ITERATIONS {
            for (label, row) in labels.iter_mut().zip(data.chunks_exact(cols)) {
                *label = nearest(&centers, row);
            }
            let mut sums = vec![0.0; k * cols];
            let mut counts = vec![0usize; k];
            for (&label, row) in labels.iter().zip(data.chunks_exact(cols)) {
                counts[label] += 1;
                for (acc, &v) in sums[label * cols..(label + 1) * cols].iter_mut().zip(row) {
                    *acc += v;
                }
            }
            for (center, &count) in sums.chunks_exact_mut(cols).zip(&counts) {
                if count > 0 {
                    center.iter_mut().for_each(|v| *v /= count as f64);
                }
            }
            centers = Matrix::from_vec(k, cols, sums)?;
        }
        debug!(k, rows, cols, "kmeans trained");
        Ok(Model::KMeans { centers })
    }

    /// Typed entry point: `x` holds `rows * cols` features row-major and
    /// `y`, when present, one target per row.
    pub fn train(
        kind: ModelKind,
        x: &TypedBuffer,
        y: Option<&TypedBuffer>,
        rows: usize,
        cols: usize,
    ) -> CoreResult<Self> {
        let features = Matrix::from_vec(rows, cols, x.to_f64_vec())?;
        let targets = y.map(TypedBuffer::to_f64_vec);
        Self::fit(kind, &features, targets.as_deref())
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Model::Linear { .. } => ModelKind::LinearRegression,
            Model::Logistic { .. } => ModelKind::LogisticRegression,
            Model::KMeans { .. } => ModelKind::KMeans,
        }
    }

    /// Number of input features the model was trained on.
    pub fn features(&self) -> usize {
        match self {
            Model::Linear { weights } | Model::Logistic { weights } => weights.len(),
            Model::KMeans { centers } => centers.cols(),
        }
    }

    pub fn weights(&self) -> Option<&[f64]> {
        match self {
            Model::Linear { weights } | Model::Logistic { weights } => Some(weights),
            Model::KMeans { .. } => None,
        }
    }

    pub fn centers(&self) -> Option<&Matrix> {
        match self {
            Model::KMeans { centers } => Some(centers),
            _ => None,
        }
    }

    /// One raw output per row of `x`: the linear score, the logistic
    /// probability, or the nearest cluster index.
    pub fn predict(&self, x: &Matrix) -> CoreResult<Vec<f64>> {
        if x.cols() != self.features() {
            let right = match self {
                Model::KMeans { centers } => centers.shape(),
                _ => (self.features(), 1),
            };
            return Err(Error::DimMismatch {
                op: "predict",
                left: x.shape(),
                right,
            });
        }
        let rows = x.as_slice().chunks_exact(x.cols());
        let out: Vec<f64> = match self {
            Model::Linear { weights } => rows.map(|row| dot(weights, row)).collect(),
            Model::Logistic { weights } => rows.map(|row| sigmoid(dot(weights, row))).collect(),
            Model::KMeans { centers } => rows.map(|row| nearest(centers, row) as f64).collect(),
        };
        Ok(out)
    }

    /// Typed prediction. Regression output takes the feature buffer's kind;
    /// logistic output into a non-float kind is thresholded at `0.5` to a
    /// class label. Cluster indices are always `i32`.
    pub fn predict_buffer(&self, x: &TypedBuffer, rows: usize, cols: usize) -> CoreResult<TypedBuffer> {
        let features = Matrix::from_vec(rows, cols, x.to_f64_vec())?;
        let raw = self.predict(&features)?;
        let dtype = x.dtype();
        let out = match self {
            Model::Linear { .. } => TypedBuffer::from_f64_iter(dtype, raw),
            Model::Logistic { .. } if !dtype.is_float() => TypedBuffer::from_f64_iter(
                dtype,
                raw.into_iter().map(|p| if p >= 0.5 { 1.0 } else { 0.0 }),
            ),
            Model::Logistic { .. } => TypedBuffer::from_f64_iter(dtype, raw),
            Model::KMeans { .. } => TypedBuffer::from_f64_iter(DType::I32, raw),
        };
        Ok(out)
    }
}
