//! Confidence intervals for the fitted distribution's value space and for
//! its parameters.
//!
//! Value-space intervals invert the fitted CDF directly. Parameter
//! intervals use analytic formulas where one is derived (Normal mean and
//! std, Exponential rate, Gamma/Beta large-sample approximations) and the
//! bootstrap percentile method everywhere else.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::describe::percentile_sorted;
use crate::dist::{ChiSquared, Distribution, StudentT};
use crate::model::{FittedModel, Kind};

/// The three canonical confidence levels.
pub const CONFIDENCE_LEVELS: [f64; 3] = [0.90, 0.95, 0.99];

/// Bootstrap resample count for parameter intervals without an analytic
/// formula.
pub const BOOTSTRAP_SAMPLES: usize = 1000;

/// One confidence interval at one level.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceInterval {
    /// Confidence level, e.g. 0.95.
    pub level: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// upper − lower.
    pub width: f64,
}

impl ConfidenceInterval {
    fn new(level: f64, lower: f64, upper: f64) -> Self {
        Self {
            level,
            lower,
            upper,
            width: upper - lower,
        }
    }
}

/// How a parameter's intervals were derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CiMethod {
    /// Closed-form interval.
    Analytic,
    /// Bootstrap percentile method.
    Bootstrap,
}

/// Confidence intervals for one fitted parameter, one per level.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterInterval {
    /// Parameter name from [`Kind::param_names`].
    pub name: &'static str,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error of the estimate (bootstrap std when bootstrapped).
    pub std_error: f64,
    /// Derivation method.
    pub method: CiMethod,
    /// Intervals at [`CONFIDENCE_LEVELS`].
    pub intervals: Vec<ConfidenceInterval>,
}

/// Intervals on the fitted distribution's value space: the central
/// `level` mass between the `α/2` and `1−α/2` quantiles.
pub fn value_space_intervals(fitted: &FittedModel) -> Vec<ConfidenceInterval> {
    CONFIDENCE_LEVELS
        .iter()
        .map(|&level| {
            let alpha = 1.0 - level;
            let lower = fitted.model.quantile(alpha / 2.0);
            let upper = fitted.model.quantile(1.0 - alpha / 2.0);
            ConfidenceInterval::new(level, lower, upper)
        })
        .collect()
}

/// Confidence intervals for each fitted parameter.
pub fn parameter_intervals<R: Rng>(
    fitted: &FittedModel,
    sample: &[f64],
    bootstrap_samples: usize,
    rng: &mut R,
) -> Vec<ParameterInterval> {
    let n = sample.len() as f64;
    let names = fitted.kind.param_names();

    match fitted.kind {
        Kind::Normal => {
            let mean = fitted.params[0];
            let std = fitted.params[1];
            let t_dist = StudentT::new(n - 1.0).expect("n ≥ 3");
            let chi2 = ChiSquared::new(n - 1.0).expect("n ≥ 3");

            let mean_se = std / n.sqrt();
            let mean_ci = CONFIDENCE_LEVELS
                .iter()
                .map(|&level| {
                    let t = t_dist.quantile(1.0 - (1.0 - level) / 2.0);
                    ConfidenceInterval::new(level, mean - t * mean_se, mean + t * mean_se)
                })
                .collect();

            // Std interval from (n−1)s²/σ² ~ χ²_{n−1}
            let std_ci = CONFIDENCE_LEVELS
                .iter()
                .map(|&level| {
                    let alpha = 1.0 - level;
                    let hi_q = chi2.quantile(1.0 - alpha / 2.0);
                    let lo_q = chi2.quantile(alpha / 2.0);
                    ConfidenceInterval::new(
                        level,
                        std * ((n - 1.0) / hi_q).sqrt(),
                        std * ((n - 1.0) / lo_q).sqrt(),
                    )
                })
                .collect();

            vec![
                ParameterInterval {
                    name: names[0],
                    estimate: mean,
                    std_error: mean_se,
                    method: CiMethod::Analytic,
                    intervals: mean_ci,
                },
                ParameterInterval {
                    name: names[1],
                    estimate: std,
                    std_error: std / (2.0 * (n - 1.0)).sqrt(),
                    method: CiMethod::Analytic,
                    intervals: std_ci,
                },
            ]
        }
        Kind::Exponential => {
            // 2nλ·x̄ ~ χ²_{2n} gives an exact interval for the rate
            let rate = fitted.params[0];
            let total: f64 = sample.iter().sum();
            let chi2 = ChiSquared::new(2.0 * n).expect("n ≥ 3");
            let intervals = CONFIDENCE_LEVELS
                .iter()
                .map(|&level| {
                    let alpha = 1.0 - level;
                    ConfidenceInterval::new(
                        level,
                        chi2.quantile(alpha / 2.0) / (2.0 * total),
                        chi2.quantile(1.0 - alpha / 2.0) / (2.0 * total),
                    )
                })
                .collect();
            vec![ParameterInterval {
                name: names[0],
                estimate: rate,
                std_error: rate / n.sqrt(),
                method: CiMethod::Analytic,
                intervals,
            }]
        }
        Kind::Gamma | Kind::Beta => {
            // Large-sample normal approximation: SE ≈ θ̂/√n, bounds kept
            // inside the positive support
            fitted
                .params
                .iter()
                .zip(names)
                .map(|(&estimate, &name)| {
                    let se = estimate / n.sqrt();
                    let intervals = CONFIDENCE_LEVELS
                        .iter()
                        .map(|&level| {
                            let z = crate::dist::Normal::new(0.0, 1.0)
                                .expect("unit normal")
                                .quantile(1.0 - (1.0 - level) / 2.0);
                            ConfidenceInterval::new(
                                level,
                                (estimate - z * se).max(0.0),
                                estimate + z * se,
                            )
                        })
                        .collect();
                    ParameterInterval {
                        name,
                        estimate,
                        std_error: se,
                        method: CiMethod::Analytic,
                        intervals,
                    }
                })
                .collect()
        }
        _ => bootstrap_intervals(fitted, sample, bootstrap_samples, rng),
    }
}

/// Bootstrap percentile intervals: resample with replacement, re-estimate
/// per resample, and read the empirical `[α/2, 1−α/2]` percentiles of
/// each parameter's bootstrap distribution. The bootstrap standard
/// deviation doubles as the standard error.
fn bootstrap_intervals<R: Rng>(
    fitted: &FittedModel,
    sample: &[f64],
    bootstrap_samples: usize,
    rng: &mut R,
) -> Vec<ParameterInterval> {
    let n = sample.len();
    let names = fitted.kind.param_names();
    let n_params = fitted.params.len();

    let mut draws: Vec<Vec<f64>> = vec![Vec::with_capacity(bootstrap_samples); n_params];
    let mut resample = vec![0.0; n];
    let mut failures = 0usize;

    for _ in 0..bootstrap_samples {
        for slot in resample.iter_mut() {
            *slot = sample[rng.gen_range(0..n)];
        }
        match fitted.kind.estimate_params(&resample) {
            Ok(params) => {
                for (dest, value) in draws.iter_mut().zip(params) {
                    dest.push(value);
                }
            }
            // Degenerate resamples (all-equal draws) happen; drop them
            Err(_) => failures += 1,
        }
    }
    if failures > 0 {
        debug!(
            kind = fitted.kind.as_str(),
            failures, "bootstrap resamples rejected by the estimator"
        );
    }
    if draws[0].len() < bootstrap_samples / 10 {
        warn!(
            kind = fitted.kind.as_str(),
            kept = draws[0].len(),
            "too few successful bootstrap resamples; intervals unreliable"
        );
    }

    draws
        .into_iter()
        .enumerate()
        .map(|(i, mut values)| {
            values.sort_by(|a, b| a.partial_cmp(b).expect("finite estimates"));
            let estimate = fitted.params[i];
            let (std_error, intervals) = if values.is_empty() {
                (f64::NAN, Vec::new())
            } else {
                let m = values.iter().sum::<f64>() / values.len() as f64;
                let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>()
                    / (values.len() as f64 - 1.0).max(1.0);
                let intervals = CONFIDENCE_LEVELS
                    .iter()
                    .map(|&level| {
                        let alpha = 1.0 - level;
                        ConfidenceInterval::new(
                            level,
                            percentile_sorted(&values, 100.0 * alpha / 2.0),
                            percentile_sorted(&values, 100.0 * (1.0 - alpha / 2.0)),
                        )
                    })
                    .collect();
                (var.sqrt(), intervals)
            };
            ParameterInterval {
                name: names[i],
                estimate,
                std_error,
                method: CiMethod::Bootstrap,
                intervals,
            }
        })
        .collect()
}
