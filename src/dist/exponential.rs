use super::{DistError, Distribution, QuantileResult};

/// Exponential distribution with rate λ.
///
/// # Example
///
/// ```
/// use distfit::dist::{Exponential, Distribution};
///
/// let e = Exponential::new(1.0 / 3.0).unwrap();
/// assert!((e.cdf(3.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-12);
/// assert_eq!(e.quantile(0.0), 0.0);
/// assert_eq!(e.quantile(1.0), f64::INFINITY);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Create an exponential distribution with rate `rate`. Requires
    /// `rate > 0`.
    pub fn new(rate: f64) -> Result<Self, DistError> {
        if !(rate > 0.0) || !rate.is_finite() {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { rate })
    }
}

impl Distribution for Exponential {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        self.rate * (-self.rate * x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        self.rate.ln() - self.rate * x
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        1.0 - (-self.rate * x).exp()
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        if p <= 0.0 {
            return QuantileResult::exact(0.0);
        }
        if p >= 1.0 {
            return QuantileResult::exact(f64::INFINITY);
        }
        QuantileResult::exact(-(1.0 - p).ln() / self.rate)
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    fn variance(&self) -> f64 {
        1.0 / (self.rate * self.rate)
    }
}
