//! Descriptive statistics over a numeric series.
//!
//! One snapshot of summary statistics per call; the input is never mutated.

/// Summary statistics for a numeric series.
///
/// All fields are zero for an empty series (policy, not a failure).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation (n denominator).
    pub std_dev: f64,
    /// 50th percentile.
    pub median: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Interquartile range (q3 - q1).
    pub iqr: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Computes summary statistics for a series.
///
/// Variance uses the population (n) denominator, not the sample (n-1)
/// denominator; Z-score and Grubbs severities in [`crate::detection`]
/// depend on this choice. Percentiles use linear interpolation between
/// order statistics (the R-7 method).
///
/// # Examples
///
/// ```
/// use minewatch::stats::compute_statistics;
///
/// let stats = compute_statistics(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert!((stats.mean - 3.0).abs() < 1e-10);
/// assert!((stats.median - 3.0).abs() < 1e-10);
/// assert!((stats.iqr - 2.0).abs() < 1e-10);
/// ```
pub fn compute_statistics(values: &[f64]) -> Statistics {
    let n = values.len();
    if n == 0 {
        return Statistics::default();
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    let median = percentile(&sorted, 50.0);
    let q1 = percentile(&sorted, 25.0);
    let q3 = percentile(&sorted, 75.0);

    Statistics {
        mean,
        std_dev: variance.sqrt(),
        median,
        q1,
        q3,
        iqr: q3 - q1,
        min: sorted[0],
        max: sorted[n - 1],
    }
}

/// Percentile of an ascending-sorted non-empty slice by linear
/// interpolation between bracketing order statistics.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let pos = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;

    if lower == upper {
        return sorted[lower];
    }

    let frac = pos - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_sample_odd_length() {
        let stats = compute_statistics(&[1.0, 2.0, 3.0, 4.0, 5.0]);

        assert_relative_eq!(stats.mean, 3.0, epsilon = 1e-10);
        // Population variance of [1..5] is 2.0
        assert_relative_eq!(stats.std_dev, 2.0_f64.sqrt(), epsilon = 1e-10);
        assert_relative_eq!(stats.median, 3.0, epsilon = 1e-10);
        assert_relative_eq!(stats.q1, 2.0, epsilon = 1e-10);
        assert_relative_eq!(stats.q3, 4.0, epsilon = 1e-10);
        assert_relative_eq!(stats.iqr, 2.0, epsilon = 1e-10);
        assert_relative_eq!(stats.min, 1.0, epsilon = 1e-10);
        assert_relative_eq!(stats.max, 5.0, epsilon = 1e-10);
    }

    #[test]
    fn known_sample_even_length() {
        // Quartile positions fall between order statistics and interpolate
        let stats = compute_statistics(&[1.0, 2.0, 3.0, 4.0]);

        assert_relative_eq!(stats.median, 2.5, epsilon = 1e-10);
        assert_relative_eq!(stats.q1, 1.75, epsilon = 1e-10);
        assert_relative_eq!(stats.q3, 3.25, epsilon = 1e-10);
        assert_relative_eq!(stats.iqr, 1.5, epsilon = 1e-10);
    }

    #[test]
    fn empty_series_is_all_zero() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, Statistics::default());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.iqr, 0.0);
    }

    #[test]
    fn single_element() {
        let stats = compute_statistics(&[42.0]);
        assert_relative_eq!(stats.mean, 42.0, epsilon = 1e-10);
        assert_relative_eq!(stats.std_dev, 0.0, epsilon = 1e-10);
        assert_relative_eq!(stats.median, 42.0, epsilon = 1e-10);
        assert_relative_eq!(stats.q1, 42.0, epsilon = 1e-10);
        assert_relative_eq!(stats.q3, 42.0, epsilon = 1e-10);
        assert_relative_eq!(stats.min, 42.0, epsilon = 1e-10);
        assert_relative_eq!(stats.max, 42.0, epsilon = 1e-10);
    }

    #[test]
    fn constant_series_has_zero_spread() {
        let stats = compute_statistics(&[7.0; 30]);
        assert_relative_eq!(stats.std_dev, 0.0, epsilon = 1e-10);
        assert_relative_eq!(stats.iqr, 0.0, epsilon = 1e-10);
        assert_relative_eq!(stats.min, stats.max, epsilon = 1e-10);
    }

    #[test]
    fn unsorted_input_not_mutated() {
        let values = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        let stats = compute_statistics(&values);

        assert_relative_eq!(stats.median, 3.0, epsilon = 1e-10);
        assert_relative_eq!(stats.min, 1.0, epsilon = 1e-10);
        assert_relative_eq!(stats.max, 5.0, epsilon = 1e-10);
        assert_eq!(values, vec![5.0, 1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn population_not_sample_variance() {
        // Sample variance of [2, 4, 6] is 4; population variance is 8/3
        let stats = compute_statistics(&[2.0, 4.0, 6.0]);
        assert_relative_eq!(stats.std_dev, (8.0_f64 / 3.0).sqrt(), epsilon = 1e-10);
    }
}
