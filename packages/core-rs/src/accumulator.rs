/// Running mean and variance over a stream of samples (Welford's method).
///
/// Holds only the count, the running mean and the sum of squared deviations
/// (`m2`), so memory stays constant however many values are pushed.
///
/// ```
/// use numstat_core::StreamingAccumulator;
///
/// let acc: StreamingAccumulator = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]
///     .into_iter()
///     .collect();
/// assert!((acc.mean() - 5.0).abs() < 1e-12);
/// assert!((acc.variance() - 32.0 / 7.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StreamingAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl StreamingAccumulator {
    pub const fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        // Second deviation is taken against the updated mean.
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// `0.0` until at least one value has been pushed.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.mean
        }
    }

    /// Sample variance (`n - 1` divisor); `0.0` with fewer than two values.
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        self.m2 / (self.count - 1) as f64
    }

    pub fn stddev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl Extend<f64> for StreamingAccumulator {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl FromIterator<f64> for StreamingAccumulator {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut acc = Self::new();
        acc.extend(iter);
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_sequence() {
        let mut acc = StreamingAccumulator::new();
        for v in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            acc.push(v);
        }
        assert_eq!(acc.count(), 8);
        assert!((acc.mean() - 5.0).abs() < 1e-12);
        assert!((acc.variance() - 4.571_428_571_428_571).abs() < 1e-12);
        assert!((acc.stddev() - 4.571_428_571_428_571_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_counts_return_zero() {
        let mut acc = StreamingAccumulator::default();
        assert_eq!(acc.mean(), 0.0);
        assert_eq!(acc.variance(), 0.0);
        acc.push(3.5);
        assert_eq!(acc.mean(), 3.5);
        assert_eq!(acc.variance(), 0.0);
        assert_eq!(acc.stddev(), 0.0);
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut acc: StreamingAccumulator = [1.0, 2.0, 3.0].into_iter().collect();
        acc.reset();
        assert_eq!(acc, StreamingAccumulator::new());
    }

    #[test]
    fn large_offset_stays_stable() {
        // Naive sum-of-squares loses every significant digit here.
        let offset = 1e9;
        let acc: StreamingAccumulator = [4.0, 7.0, 13.0, 16.0]
            .into_iter()
            .map(|v| v + offset)
            .collect();
        assert!((acc.variance() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn m2_never_goes_negative() {
        let acc: StreamingAccumulator = std::iter::repeat(0.1).take(1000).collect();
        assert!(acc.variance() >= 0.0);
    }
}
