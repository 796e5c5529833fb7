//! Descriptive statistics over a sample.
//!
//! A [`Summary`] is computed once per analysis, before any distribution is
//! chosen, and never depends on the fitted model. All quantile-style
//! fields use linear interpolation between order statistics.

use serde::Serialize;

/// Percentile levels published in every summary.
pub const PERCENTILE_LEVELS: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

/// Descriptive statistics for one sample.
///
/// Variance uses the n−1 divisor; skewness and kurtosis are the
/// bias-corrected standardized moments, kurtosis in excess form (−3
/// already applied). With n < 2 the spread fields are NaN — callers are
/// expected to gate on sample size before reading them.
///
/// # Example
///
/// ```
/// use distfit::Summary;
///
/// let s = Summary::from_sample(&[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(s.n, 5);
/// assert!((s.mean - 3.0).abs() < 1e-12);
/// assert!((s.std_dev - 2.5_f64.sqrt()).abs() < 1e-12);
/// assert!((s.median - 3.0).abs() < 1e-12);
/// assert!((s.q1 - 2.0).abs() < 1e-12);
/// assert!((s.q3 - 4.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of observations.
    pub n: usize,
    /// Σ xᵢ.
    pub sum: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample variance (n−1 divisor).
    pub variance: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Smallest observation.
    pub min: f64,
    /// Largest observation.
    pub max: f64,
    /// max − min.
    pub range: f64,
    /// 50th percentile.
    pub median: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Interquartile range q3 − q1.
    pub iqr: f64,
    /// Bias-corrected sample skewness.
    pub skewness: f64,
    /// Bias-corrected excess kurtosis.
    pub kurtosis: f64,
    /// (level, value) pairs at [`PERCENTILE_LEVELS`].
    pub percentiles: Vec<(f64, f64)>,
}

impl Summary {
    /// Compute the summary of `sample`. Pure and deterministic: the same
    /// sample always yields the identical summary.
    pub fn from_sample(sample: &[f64]) -> Self {
        let n = sample.len();
        let nf = n as f64;
        let sum: f64 = sample.iter().sum();
        let mean = sum / nf;

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite sample"));
        let min = sorted.first().copied().unwrap_or(f64::NAN);
        let max = sorted.last().copied().unwrap_or(f64::NAN);

        let variance = if n > 1 {
            sample.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
        } else {
            f64::NAN
        };
        let std_dev = variance.sqrt();

        let (skewness, kurtosis) = if n > 3 && std_dev > 0.0 {
            let m3: f64 = sample.iter().map(|x| ((x - mean) / std_dev).powi(3)).sum();
            let m4: f64 = sample.iter().map(|x| ((x - mean) / std_dev).powi(4)).sum();
            let skew = nf / ((nf - 1.0) * (nf - 2.0)) * m3;
            let kurt = nf * (nf + 1.0) / ((nf - 1.0) * (nf - 2.0) * (nf - 3.0)) * m4
                - 3.0 * (nf - 1.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0));
            (skew, kurt)
        } else {
            (f64::NAN, f64::NAN)
        };

        let median = percentile_sorted(&sorted, 50.0);
        let q1 = percentile_sorted(&sorted, 25.0);
        let q3 = percentile_sorted(&sorted, 75.0);
        let percentiles = PERCENTILE_LEVELS
            .iter()
            .map(|&p| (p, percentile_sorted(&sorted, p)))
            .collect();

        Summary {
            n,
            sum,
            mean,
            variance,
            std_dev,
            min,
            max,
            range: max - min,
            median,
            q1,
            q3,
            iqr: q3 - q1,
            skewness,
            kurtosis,
            percentiles,
        }
    }
}

/// Percentile of a sorted slice by linear interpolation between order
/// statistics: rank = p/100 · (n−1).
pub(crate) fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}
