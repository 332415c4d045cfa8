//! Plain-text charts of a [`TypedBuffer`], returned as strings so callers
//! decide where they go.

use crate::buffer::TypedBuffer;
use crate::error::Error;
use crate::CoreResult;
use std::fmt::Write;

pub const LINE_WIDTH: usize = 60;
pub const LINE_HEIGHT: usize = 15;
const BAR_WIDTH: usize = 40;

/// Values widened to f64 with their bounds. A zero range is reported as `1`.
fn prepare(op: &'static str, input: &TypedBuffer) -> CoreResult<(Vec<f64>, f64, f64, f64)> {
    let values = input.to_f64_vec();
    let (&first, rest) = values.split_first().ok_or(Error::empty(op, 1, 0))?;
    let (min, max) = rest.iter().fold((first, first), |(lo, hi), &v| {
        (if v < lo { v } else { lo }, if v > hi { v } else { hi })
    });
    let range = if max - min == 0.0 { 1.0 } else { max - min };
    Ok((values, min, max, range))
}

fn footer(out: &mut String, min: f64, max: f64, n: usize) {
    let _ = writeln!(out, "min: {min:.3}  max: {max:.3}  n={n}");
}

/// Column chart sampled at [`LINE_WIDTH`] points over [`LINE_HEIGHT`]
/// rows; a cell is filled when the sampled value reaches that row's level.
pub fn line(input: &TypedBuffer, title: Option<&str>) -> CoreResult<String> {
    let (values, min, max, range) = prepare("plot_line", input)?;
    let count = values.len();
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", title.filter(|t| !t.is_empty()).unwrap_or("line plot"));
    for row in 0..LINE_HEIGHT {
        let threshold = max - range * row as f64 / (LINE_HEIGHT - 1) as f64;
        out.extend((0..LINE_WIDTH).map(|col| {
            if values[col * count / LINE_WIDTH] >= threshold {
                '*'
            } else {
                ' '
            }
        }));
        out.push('\n');
    }
    footer(&mut out, min, max, count);
    Ok(out)
}

fn bin_counts(values: &[f64], min: f64, range: f64, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    for &v in values {
        let bin = ((v - min) / range * bins as f64) as usize;
        counts[bin.min(bins - 1)] += 1;
    }
    counts
}

fn ensure_bins(bins: usize) -> CoreResult<()> {
    if bins == 0 {
        return Err(Error::invalid_argument("histogram: bins must be greater than zero"));
    }
    Ok(())
}

/// Counts per equal-width bin over `[min, max]`; the maximum lands in the
/// last bin.
pub fn histogram_counts(input: &TypedBuffer, bins: usize) -> CoreResult<Vec<usize>> {
    ensure_bins(bins)?;
    let (values, min, _, range) = prepare("plot_histogram", input)?;
    Ok(bin_counts(&values, min, range, bins))
}

/// One `[low - high] | ####### (count)` line per bin, bars scaled to the
/// fullest bin.
pub fn histogram(input: &TypedBuffer, bins: usize, title: Option<&str>) -> CoreResult<String> {
    ensure_bins(bins)?;
    let (values, min, max, range) = prepare("plot_histogram", input)?;
    let counts = bin_counts(&values, min, range, bins);
    let fullest = counts.iter().copied().max().unwrap_or(0).max(1);
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", title.filter(|t| !t.is_empty()).unwrap_or("histogram"));
    for (i, &count) in counts.iter().enumerate() {
        let low = min + range * i as f64 / bins as f64;
        let high = min + range * (i + 1) as f64 / bins as f64;
        let bar = "#".repeat(count * BAR_WIDTH / fullest);
        let _ = writeln!(out, "[{low:8.3} - {high:8.3}] | {bar} ({count})");
    }
    footer(&mut out, min, max, values.len());
    Ok(out)
}
