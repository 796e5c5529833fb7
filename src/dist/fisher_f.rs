use crate::special::{beta_inc, lbeta};

use super::{newton_quantile, DistError, Distribution, QuantileResult};

/// Newton iteration cap for the F quantile.
const MAX_ITER: usize = 50;

/// Fisher's F-distribution with d1 numerator and d2 denominator degrees
/// of freedom.
///
/// # Example
///
/// ```
/// use distfit::dist::{FisherF, Distribution};
///
/// let f = FisherF::new(5.0, 10.0).unwrap();
/// // Mean is d2/(d2−2) for d2 > 2
/// assert!((f.mean() - 1.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FisherF {
    d1: f64,
    d2: f64,
}

impl FisherF {
    /// Create an F-distribution with `d1` and `d2` degrees of freedom.
    /// Requires both > 0.
    pub fn new(d1: f64, d2: f64) -> Result<Self, DistError> {
        if !(d1 > 0.0) || !(d2 > 0.0) || !d1.is_finite() || !d2.is_finite() {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { d1, d2 })
    }
}

impl Distribution for FisherF {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            return if self.d1 == 2.0 {
                1.0
            } else if self.d1 > 2.0 {
                0.0
            } else {
                f64::INFINITY
            };
        }
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return self.pdf(x).ln();
        }
        let (d1, d2) = (self.d1, self.d2);
        0.5 * d1 * (d1 / d2).ln() + (0.5 * d1 - 1.0) * x.ln()
            - 0.5 * (d1 + d2) * (1.0 + d1 * x / d2).ln()
            - lbeta(0.5 * d1, 0.5 * d2)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        let t = self.d1 * x / (self.d1 * x + self.d2);
        beta_inc(t, 0.5 * self.d1, 0.5 * self.d2)
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        if p <= 0.0 {
            return QuantileResult::exact(0.0);
        }
        if p >= 1.0 {
            return QuantileResult::exact(f64::INFINITY);
        }
        // Seed at the mean where defined, else at 1
        let x0 = if self.d2 > 2.0 {
            self.d2 / (self.d2 - 2.0)
        } else {
            1.0
        };
        newton_quantile(
            |x| self.cdf(x),
            |x| self.pdf(x),
            p,
            x0,
            0.0,
            1e9,
            MAX_ITER,
        )
    }

    fn mean(&self) -> f64 {
        if self.d2 > 2.0 {
            self.d2 / (self.d2 - 2.0)
        } else {
            f64::NAN
        }
    }

    fn variance(&self) -> f64 {
        if self.d2 > 4.0 {
            let (d1, d2) = (self.d1, self.d2);
            2.0 * d2 * d2 * (d1 + d2 - 2.0) / (d1 * (d2 - 2.0) * (d2 - 2.0) * (d2 - 4.0))
        } else {
            f64::NAN
        }
    }
}
