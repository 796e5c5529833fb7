use crate::special::{gamma_p, lgamma};

use super::{newton_quantile, normal_quantile_std, DistError, Distribution, QuantileResult};

/// Newton iteration cap for the chi-squared quantile.
const MAX_ITER: usize = 50;

/// Chi-squared distribution with k degrees of freedom.
///
/// # Example
///
/// ```
/// use distfit::dist::{ChiSquared, Distribution};
///
/// // χ²(2) CDF has the closed form 1 − e^{−x/2}
/// let chi2 = ChiSquared::new(2.0).unwrap();
/// assert!((chi2.cdf(2.0) - (1.0 - (-1.0_f64).exp())).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ChiSquared {
    df: f64,
}

impl ChiSquared {
    /// Create a chi-squared distribution with `df` degrees of freedom.
    /// Requires `df > 0`.
    pub fn new(df: f64) -> Result<Self, DistError> {
        if !(df > 0.0) || !df.is_finite() {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { df })
    }
}

impl Distribution for ChiSquared {
    fn pdf(&self, x: f64) -> f64 {
        if x < 0.0 {
            return 0.0;
        }
        if x == 0.0 {
            // density at the origin depends on the shape k/2
            return if self.df == 2.0 {
                0.5
            } else if self.df > 2.0 {
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
        let half_df = 0.5 * self.df;
        (half_df - 1.0) * x.ln() - 0.5 * x - half_df * core::f64::consts::LN_2 - lgamma(half_df)
    }

    fn cdf(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        gamma_p(0.5 * self.df, 0.5 * x)
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        if p <= 0.0 {
            return QuantileResult::exact(0.0);
        }
        if p >= 1.0 {
            return QuantileResult::exact(f64::INFINITY);
        }
        // Wilson-Hilferty starting point
        let z = normal_quantile_std(p);
        let c = 2.0 / (9.0 * self.df);
        let wh = self.df * (1.0 - c + z * c.sqrt()).powi(3);
        let x0 = if wh > 0.0 { wh } else { self.df };
        let hi = self.mean() + 40.0 * self.std_dev();
        newton_quantile(
            |x| self.cdf(x),
            |x| self.pdf(x),
            p,
            x0,
            0.0,
            hi,
            MAX_ITER,
        )
    }

    fn mean(&self) -> f64 {
        self.df
    }

    fn variance(&self) -> f64 {
        2.0 * self.df
    }
}
