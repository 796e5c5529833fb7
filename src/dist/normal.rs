use super::{normal_cdf_std, normal_quantile_std, DistError, Distribution, QuantileResult};

/// Normal (Gaussian) distribution N(μ, σ²).
///
/// # Example
///
/// ```
/// use distfit::dist::{Normal, Distribution};
///
/// let n = Normal::new(0.0, 1.0).unwrap();
/// assert!((n.cdf(0.0) - 0.5).abs() < 1e-12);
/// assert!((n.quantile(0.975) - 1.96).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normal {
    mean: f64,
    std: f64,
}

impl Normal {
    /// Create a normal distribution with mean `mean` and standard
    /// deviation `std`. Requires `std > 0`.
    pub fn new(mean: f64, std: f64) -> Result<Self, DistError> {
        if !(std > 0.0) || !mean.is_finite() {
            return Err(DistError::InvalidParameter);
        }
        Ok(Self { mean, std })
    }
}

impl Distribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std;
        (-0.5 * z * z).exp() / (self.std * core::f64::consts::TAU.sqrt())
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std;
        -self.std.ln() - 0.5 * core::f64::consts::TAU.ln() - 0.5 * z * z
    }

    fn cdf(&self, x: f64) -> f64 {
        normal_cdf_std((x - self.mean) / self.std)
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        QuantileResult::exact(self.mean + self.std * normal_quantile_std(p))
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.std * self.std
    }
}
