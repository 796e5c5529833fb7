use crate::special::{beta_inc, lgamma};

use super::{newton_quantile, normal_quantile_std, DistError, Distribution, QuantileResult};

/// Newton iteration cap for the t quantile.
const MAX_ITER: usize = 20;

/// Student's t-distribution with ν degrees of freedom.
///
/// # Example
///
/// ```
/// use distfit::dist::{StudentT, Distribution};
///
/// let t = StudentT::new(10.0).unwrap();
/// assert!((t.cdf(0.0) - 0.5).abs() < 1e-10);
/// assert!((t.variance() - 1.25).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    /// Create a Student's t-distribution with `df` degrees of freedom.
    /// Requires `df > 0`.
    pub fn new(df: f64) -> Result<Self, DistError> {
        if !(df > 0.0) || !df.is_finite() {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { df })
    }
}

impl Distribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        self.ln_pdf(x).exp()
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let v = self.df;
        lgamma(0.5 * (v + 1.0))
            - lgamma(0.5 * v)
            - 0.5 * (v * core::f64::consts::PI).ln()
            - 0.5 * (v + 1.0) * (1.0 + x * x / v).ln()
    }

    fn cdf(&self, x: f64) -> f64 {
        let t = self.df / (self.df + x * x);
        let ib = beta_inc(t, 0.5 * self.df, 0.5);
        if x >= 0.0 {
            1.0 - 0.5 * ib
        } else {
            0.5 * ib
        }
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        if p <= 0.0 {
            return QuantileResult::exact(f64::NEG_INFINITY);
        }
        if p >= 1.0 {
            return QuantileResult::exact(f64::INFINITY);
        }
        // Seed from the normal quantile, scaled toward the t's heavier tails
        let z = normal_quantile_std(p);
        let x0 = if self.df > 2.0 {
            z * (self.df / (self.df - 2.0)).sqrt()
        } else {
            z
        };
        newton_quantile(
            |x| self.cdf(x),
            |x| self.pdf(x),
            p,
            x0,
            -1e6,
            1e6,
            MAX_ITER,
        )
    }

    fn mean(&self) -> f64 {
        if self.df > 1.0 {
            0.0
        } else {
            f64::NAN
        }
    }

    fn variance(&self) -> f64 {
        if self.df > 2.0 {
            self.df / (self.df - 2.0)
        } else if self.df > 1.0 {
            f64::INFINITY
        } else {
            f64::NAN
        }
    }
}
