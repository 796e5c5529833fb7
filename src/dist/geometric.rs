use super::{discrete_quantile, DistError, Distribution, QuantileResult};

/// Search cap for the geometric quantile.
const SEARCH_CAP: u64 = 100_000;

/// Geometric distribution with success probability p, counting the
/// number of trials until the first success.
///
/// P(X = k) = p (1−p)^{k−1} for k = 1, 2, 3, …
///
/// # Example
///
/// ```
/// use distfit::dist::{Geometric, Distribution};
///
/// let g = Geometric::new(0.25).unwrap();
/// assert!((g.mean() - 4.0).abs() < 1e-12);
/// assert!((g.pdf(1.0) - 0.25).abs() < 1e-12);
/// assert_eq!(g.pdf(0.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Geometric {
    p: f64,
}

impl Geometric {
    /// Create a geometric distribution with success probability `p`.
    /// Requires `0 < p ≤ 1`.
    pub fn new(p: f64) -> Result<Self, DistError> {
        if !(p > 0.0) || p > 1.0 {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { p })
    }

    /// Probability mass P(X = k) for k ≥ 1.
    pub fn pmf(&self, k: u64) -> f64 {
        if k == 0 {
            return 0.0;
        }
        self.p * (1.0 - self.p).powi((k - 1) as i32)
    }
}

impl Distribution for Geometric {
    fn pdf(&self, x: f64) -> f64 {
        if x < 1.0 || x.floor() != x {
            return 0.0;
        }
        self.pmf(x as u64)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x < 1.0 {
            return 0.0;
        }
        let k = x.floor();
        1.0 - (1.0 - self.p).powf(k)
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        if p <= 0.0 {
            return QuantileResult::exact(1.0);
        }
        if p >= 1.0 {
            return QuantileResult::exact(f64::INFINITY);
        }
        discrete_quantile(p, |k| self.pmf(k), 1, SEARCH_CAP)
    }

    fn mean(&self) -> f64 {
        1.0 / self.p
    }

    fn variance(&self) -> f64 {
        (1.0 - self.p) / (self.p * self.p)
    }
}
