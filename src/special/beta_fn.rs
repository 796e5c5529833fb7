//! Beta and log-beta functions.

use super::gamma_fn::{gamma, lgamma};

/// Beta function B(a, b) = Γ(a)Γ(b) / Γ(a+b).
///
/// # Example
///
/// ```
/// use distfit::special::beta;
///
/// // B(1, 1) = 1
/// assert!((beta(1.0, 1.0) - 1.0).abs() < 1e-13);
/// // B(2, 3) = 1/12
/// assert!((beta(2.0, 3.0) - 1.0 / 12.0).abs() < 1e-13);
/// ```
pub fn beta(a: f64, b: f64) -> f64 {
    gamma(a) * gamma(b) / gamma(a + b)
}

/// Log-beta ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a+b).
///
/// Preferred inside density computations where B(a, b) would overflow
/// or underflow for large shape parameters.
pub fn lbeta(a: f64, b: f64) -> f64 {
    lgamma(a) + lgamma(b) - lgamma(a + b)
}
