//! Feature scaling for numeric buffers and categorical encoding for labels.

use crate::buffer::TypedBuffer;
use crate::error::Error;
use crate::matrix::Matrix;
use crate::CoreResult;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleMethod {
    /// `(v - min) / (max - min)`, mapping the data onto `[0, 1]`.
    MinMax,
    /// `(v - mean) / std` with the population standard deviation.
    ZScore,
}

impl FromStr for ScaleMethod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "minmax" => Ok(ScaleMethod::MinMax),
            "zscore" => Ok(ScaleMethod::ZScore),
            other => Err(Error::invalid_argument(format!(
                "unknown scale method '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeMethod {
    Label,
    /// Category index per element; [`one_hot`] expands it into a matrix.
    OneHot,
}

impl FromStr for EncodeMethod {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "label" => Ok(EncodeMethod::Label),
            "onehot" => Ok(EncodeMethod::OneHot),
            other => Err(Error::invalid_argument(format!(
                "unknown encode method '{other}'"
            ))),
        }
    }
}

/// Rescale every value and store the result in the input's scalar kind.
///
/// A constant input has zero range (or zero spread); the divisor then falls
/// back to `1` so the output is all zeros instead of NaN. An empty input
/// yields an empty output.
pub fn scale(input: &TypedBuffer, method: ScaleMethod) -> CoreResult<TypedBuffer> {
    let dtype = input.dtype();
    if input.is_empty() {
        return Ok(input.clone());
    }
    if !dtype.is_numeric() {
        return Err(Error::UnsupportedDType { op: "scale", dtype });
    }

    let values = input.to_f64_vec();
    let n = values.len() as f64;
    let (mut lo, mut hi, mut sum) = (values[0], values[0], 0.0);
    for &v in &values {
        lo = lo.min(v);
        hi = hi.max(v);
        sum += v;
    }
    let mean = sum / n;

    let (offset, divisor) = match method {
        ScaleMethod::MinMax => (lo, non_zero(hi - lo)),
        ScaleMethod::ZScore => {
            let spread: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
            (mean, non_zero((spread / n).sqrt()))
        }
    };
    debug!(%dtype, len = values.len(), ?method, "scale");
    Ok(TypedBuffer::from_f64_iter(
        dtype,
        values.into_iter().map(|v| (v - offset) / divisor),
    ))
}

fn non_zero(divisor: f64) -> f64 {
    if divisor == 0.0 {
        1.0
    } else {
        divisor
    }
}

/// Map each label to the index of its first occurrence among distinct labels.
///
/// ```
/// use numstat_core::transform::label_encode;
/// assert_eq!(label_encode(&["red", "blue", "red", "green"]), vec![0, 1, 0, 2]);
/// ```
pub fn label_encode<S: AsRef<str>>(labels: &[S]) -> Vec<usize> {
    let mut dictionary: HashMap<&str, usize> = HashMap::new();
    labels
        .iter()
        .map(|label| {
            let next = dictionary.len();
            *dictionary.entry(label.as_ref()).or_insert(next)
        })
        .collect()
}

/// Category index per label. Both methods share the same index assignment.
pub fn encode<S: AsRef<str>>(labels: &[S], method: EncodeMethod) -> Vec<usize> {
    let codes = label_encode(labels);
    debug!(?method, len = labels.len(), "encode");
    codes
}

/// `labels.len() x categories` indicator matrix: row `i` has a single `1.0`
/// in the column of label `i`'s category.
pub fn one_hot<S: AsRef<str>>(labels: &[S]) -> CoreResult<Matrix> {
    if labels.is_empty() {
        return Err(Error::empty("one_hot", 1, 0));
    }
    let codes = label_encode(labels);
    let categories = codes.iter().max().map_or(0, |&max| max + 1);
    let mut out = Matrix::zeros(labels.len(), categories)?;
    for (row, &col) in codes.iter().enumerate() {
        out.set(row, col, 1.0)?;
    }
    Ok(out)
}
