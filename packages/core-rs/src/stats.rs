//! Descriptive statistics over flat `f64` slices.

use crate::accumulator::StreamingAccumulator;
use crate::error::Error;
use crate::CoreResult;

fn require_len(op: &'static str, x: &[f64], required: usize) -> CoreResult<()> {
    if x.len() < required {
        return Err(Error::empty(op, required, x.len()));
    }
    Ok(())
}

/// Arithmetic mean by direct summation.
pub fn mean(x: &[f64]) -> CoreResult<f64> {
    require_len("mean", x, 1)?;
    let sum: f64 = x.iter().sum();
    Ok(sum / x.len() as f64)
}

/// Sample variance (`n - 1` divisor), computed through a
/// [`StreamingAccumulator`] so it matches the streaming result exactly.
pub fn variance(x: &[f64]) -> CoreResult<f64> {
    require_len("variance", x, 2)?;
    let acc: StreamingAccumulator = x.iter().copied().collect();
    Ok(acc.variance())
}

pub fn stddev(x: &[f64]) -> CoreResult<f64> {
    variance(x).map(f64::sqrt)
}

/// Smallest and largest value in one pass.
pub fn minmax(x: &[f64]) -> CoreResult<(f64, f64)> {
    let (&first, rest) = x.split_first().ok_or(Error::empty("minmax", 1, 0))?;
    let mut lo = first;
    let mut hi = first;
    for &v in rest {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    Ok((lo, hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_minmax_of_small_range() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&x).unwrap(), 3.0);
        assert_eq!(minmax(&x).unwrap(), (1.0, 5.0));
    }

    #[test]
    fn minmax_is_order_independent() {
        assert_eq!(minmax(&[3.0, -1.0, 3.0, 8.0, -1.0]).unwrap(), (-1.0, 8.0));
        assert_eq!(minmax(&[2.5]).unwrap(), (2.5, 2.5));
    }

    #[test]
    fn variance_matches_accumulator() {
        let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let mut acc = StreamingAccumulator::new();
        x.iter().for_each(|&v| acc.push(v));
        assert_eq!(variance(&x).unwrap(), acc.variance());
        assert_eq!(stddev(&x).unwrap(), acc.stddev());
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(mean(&[]), Err(Error::empty("mean", 1, 0)));
        assert_eq!(minmax(&[]), Err(Error::empty("minmax", 1, 0)));
        assert_eq!(variance(&[1.0]), Err(Error::empty("variance", 2, 1)));
        assert_eq!(stddev(&[1.0]), Err(Error::empty("variance", 2, 1)));
    }
}
