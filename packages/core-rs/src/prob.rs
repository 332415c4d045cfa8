//! Moments of typed buffers and random sampling into a requested scalar kind.
//!
//! Samples are drawn as `f64` and narrowed with
//! [`Element::from_f64`](crate::element::Element::from_f64), so an
//! unsigned target clamps negative draws to zero and integer targets
//! truncate.

use crate::buffer::TypedBuffer;
use crate::dtype::DType;
use crate::error::Error;
use crate::tensor;
use crate::CoreResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution, Normal};
use std::str::FromStr;
use tracing::debug;

/// Arithmetic mean of any buffer kind.
pub fn mean(input: &TypedBuffer) -> CoreResult<f64> {
    tensor::mean(input)
}

/// Population standard deviation (`n` divisor).
pub fn std_dev(input: &TypedBuffer) -> CoreResult<f64> {
    let mean = tensor::mean(input)?;
    let spread: f64 = input
        .to_f64_vec()
        .into_iter()
        .map(|v| (v - mean) * (v - mean))
        .sum();
    Ok((spread / input.len() as f64).sqrt())
}

/// Supported sampling distributions with their parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dist {
    /// `low + u * (high - low)` for `u` uniform on `[0, 1)`.
    Uniform { low: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
    /// Success count of `trials` Bernoulli draws with probability `p`.
    Binomial { trials: u64, p: f64 },
}

/// Distribution names accepted by [`Dist::with_params`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistKind {
    Uniform,
    Normal,
    Binomial,
}

impl FromStr for DistKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "uniform" => Ok(DistKind::Uniform),
            "normal" => Ok(DistKind::Normal),
            "binomial" => Ok(DistKind::Binomial),
            other => Err(Error::invalid_argument(format!(
                "unknown distribution '{other}'"
            ))),
        }
    }
}

impl Dist {
    /// Pair a distribution name with two positional parameters:
    /// `(low, high)`, `(mean, std_dev)` or `(trials, p)`.
    pub fn with_params(kind: DistKind, a: f64, b: f64) -> CoreResult<Self> {
        let dist = match kind {
            DistKind::Uniform => Dist::Uniform { low: a, high: b },
            DistKind::Normal => Dist::Normal { mean: a, std_dev: b },
            DistKind::Binomial => {
                if !(a >= 0.0 && a.fract() == 0.0 && a <= u64::MAX as f64) {
                    return Err(Error::invalid_argument(format!(
                        "binomial trials must be a non-negative integer, got {a}"
                    )));
                }
                Dist::Binomial {
                    trials: a as u64,
                    p: b,
                }
            }
        };
        Ok(dist)
    }
}

/// Draw `count` values from `dist` into a fresh buffer of kind `dtype`.
pub fn sample_with<R: Rng>(
    rng: &mut R,
    dist: Dist,
    dtype: DType,
    count: usize,
) -> CoreResult<TypedBuffer> {
    let draws: Vec<f64> = match dist {
        Dist::Uniform { low, high } => {
            if !(low.is_finite() && high.is_finite()) || low > high {
                return Err(Error::invalid_argument(format!(
                    "uniform bounds must be finite with low <= high, got [{low}, {high}]"
                )));
            }
            (0..count)
                .map(|_| low + rng.gen::<f64>() * (high - low))
                .collect()
        }
        Dist::Normal { mean, std_dev } => {
            let normal = Normal::new(mean, std_dev)
                .map_err(|err| Error::invalid_argument(format!("normal: {err}")))?;
            (0..count).map(|_| normal.sample(rng)).collect()
        }
        Dist::Binomial { trials, p } => {
            let binomial = Binomial::new(trials, p)
                .map_err(|err| Error::invalid_argument(format!("binomial: {err}")))?;
            (0..count).map(|_| binomial.sample(rng) as f64).collect()
        }
    };
    debug!(?dist, %dtype, count, "sample");
    Ok(TypedBuffer::from_f64_iter(dtype, draws))
}

/// [`sample_with`] on an entropy-seeded generator, or a reproducible one
/// when `seed` is given.
pub fn sample(dist: Dist, dtype: DType, count: usize, seed: Option<u64>) -> CoreResult<TypedBuffer> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    sample_with(&mut rng, dist, dtype, count)
}
