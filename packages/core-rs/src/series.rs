//! Sequence transforms over [`TypedBuffer`]s. Arithmetic runs in `f64` and
//! every output value is narrowed back into the input's scalar kind, so an
//! `i32` series yields an `i32` series with truncated results.

use crate::buffer::TypedBuffer;
use crate::error::Error;
use crate::CoreResult;
use tracing::debug;

/// Running total: element `i` of the output is `x[0] + … + x[i]`.
pub fn cumsum(input: &TypedBuffer) -> CoreResult<TypedBuffer> {
    if input.is_empty() {
        return Err(Error::empty("cumsum", 1, 0));
    }
    let mut sum = 0.0;
    let running = input.to_f64_vec().into_iter().map(|v| {
        sum += v;
        sum
    });
    let out = TypedBuffer::from_f64_iter(input.dtype(), running);
    debug!(dtype = %input.dtype(), len = input.len(), "cumsum");
    Ok(out)
}

/// Trailing mean over at most `window` values. The first `window - 1`
/// outputs average everything seen so far.
pub fn rolling_mean(input: &TypedBuffer, window: usize) -> CoreResult<TypedBuffer> {
    if input.is_empty() {
        return Err(Error::empty("rolling_mean", 1, 0));
    }
    if window == 0 {
        return Err(Error::invalid_argument(
            "rolling_mean: window must be greater than zero",
        ));
    }
    let values = input.to_f64_vec();
    let mut sum = 0.0;
    let mut means = Vec::with_capacity(values.len());
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let denom = (i + 1).min(window);
        means.push(sum / denom as f64);
    }
    let out = TypedBuffer::from_f64_iter(input.dtype(), means);
    debug!(dtype = %input.dtype(), len = input.len(), window, "rolling_mean");
    Ok(out)
}
