//! Distribution registry: the closed [`Kind`] enumeration, per-kind
//! parameter metadata and method-of-moments estimators, and [`Model`] —
//! a kind bound to concrete parameters, dispatched through an exhaustive
//! `match` so adding a kind is a compile error until every table below
//! handles it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::dist::{
    Bernoulli, Beta, Binomial, ChiSquared, DistError, Distribution, Exponential, FisherF, Gamma,
    Geometric, Normal, Poisson, QuantileResult, StudentT, Uniform,
};

/// Errors from the registry and fitting layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// The distribution key is not one of the twelve supported kinds.
    #[error("unknown distribution '{0}'")]
    UnknownKind(String),
    /// Wrong number of parameters for the kind.
    #[error("{kind} takes {expected} parameter(s), got {actual}")]
    ParamCount {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },
    /// Parameters outside the kind's valid ranges.
    #[error("invalid parameters for {0}")]
    InvalidParams(&'static str),
    /// The sample is degenerate for this kind's estimator.
    #[error("sample is degenerate for {kind}: {reason}")]
    DegenerateSample {
        kind: &'static str,
        reason: &'static str,
    },
}

/// The twelve supported distribution kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Normal,
    StudentT,
    ChiSquared,
    FisherF,
    Exponential,
    Gamma,
    Beta,
    Uniform,
    Bernoulli,
    Binomial,
    Poisson,
    Geometric,
}

impl Kind {
    /// All kinds, in canonical order.
    pub const ALL: [Kind; 12] = [
        Kind::Normal,
        Kind::StudentT,
        Kind::ChiSquared,
        Kind::FisherF,
        Kind::Exponential,
        Kind::Gamma,
        Kind::Beta,
        Kind::Uniform,
        Kind::Bernoulli,
        Kind::Binomial,
        Kind::Poisson,
        Kind::Geometric,
    ];

    /// The stable key used by callers (chat commands, configs).
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Normal => "normal",
            Kind::StudentT => "t",
            Kind::ChiSquared => "chiSquare",
            Kind::FisherF => "f",
            Kind::Exponential => "exponential",
            Kind::Gamma => "gamma",
            Kind::Beta => "beta",
            Kind::Uniform => "uniform",
            Kind::Bernoulli => "bernoulli",
            Kind::Binomial => "binomial",
            Kind::Poisson => "poisson",
            Kind::Geometric => "geometric",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Kind::Normal => "Normal",
            Kind::StudentT => "Student's t",
            Kind::ChiSquared => "Chi-Square",
            Kind::FisherF => "F",
            Kind::Exponential => "Exponential",
            Kind::Gamma => "Gamma",
            Kind::Beta => "Beta",
            Kind::Uniform => "Uniform",
            Kind::Bernoulli => "Bernoulli",
            Kind::Binomial => "Binomial",
            Kind::Poisson => "Poisson",
            Kind::Geometric => "Geometric",
        }
    }

    /// Ordered parameter names.
    pub fn param_names(&self) -> &'static [&'static str] {
        match self {
            Kind::Normal => &["mean", "std"],
            Kind::StudentT => &["df"],
            Kind::ChiSquared => &["df"],
            Kind::FisherF => &["d1", "d2"],
            Kind::Exponential => &["rate"],
            Kind::Gamma => &["shape", "scale"],
            Kind::Beta => &["alpha", "beta"],
            Kind::Uniform => &["min", "max"],
            Kind::Bernoulli => &["p"],
            Kind::Binomial => &["n", "p"],
            Kind::Poisson => &["lambda"],
            Kind::Geometric => &["p"],
        }
    }

    /// Fallback parameter values.
    pub fn default_params(&self) -> &'static [f64] {
        match self {
            Kind::Normal => &[0.0, 1.0],
            Kind::StudentT => &[10.0],
            Kind::ChiSquared => &[5.0],
            Kind::FisherF => &[5.0, 10.0],
            Kind::Exponential => &[1.0],
            Kind::Gamma => &[2.0, 1.0],
            Kind::Beta => &[2.0, 2.0],
            Kind::Uniform => &[0.0, 1.0],
            Kind::Bernoulli => &[0.5],
            Kind::Binomial => &[10.0, 0.5],
            Kind::Poisson => &[3.0],
            Kind::Geometric => &[0.5],
        }
    }

    /// Number of free parameters (the k in AIC/BIC).
    pub fn n_params(&self) -> usize {
        self.param_names().len()
    }

    /// Whether the kind is supported on a discrete lattice.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Kind::Bernoulli | Kind::Binomial | Kind::Poisson | Kind::Geometric
        )
    }

    /// Typical application note, surfaced in reports.
    pub fn use_cases(&self) -> &'static str {
        match self {
            Kind::Normal => "measurement errors, heights, test scores",
            Kind::StudentT => "small-sample means, regression coefficients",
            Kind::ChiSquared => "variances, goodness-of-fit statistics",
            Kind::FisherF => "variance ratios, ANOVA",
            Kind::Exponential => "waiting times, equipment lifetimes",
            Kind::Gamma => "rainfall, insurance claims, service times",
            Kind::Beta => "proportions, rates, probabilities",
            Kind::Uniform => "rounding errors, random number generation",
            Kind::Bernoulli => "single yes/no trials",
            Kind::Binomial => "successes in repeated trials",
            Kind::Poisson => "event counts per interval",
            Kind::Geometric => "trials until first success",
        }
    }

    /// Method-of-moments parameter estimates for `sample`.
    ///
    /// Estimates are clamped to each kind's support — probabilities to
    /// [0.01, 0.99], shapes/scales/rates to ≥ 0.01 — and samples that a
    /// kind's estimator cannot digest (zero variance, non-positive mean
    /// for rate estimators) are rejected rather than allowed to produce
    /// NaN parameters.
    pub fn estimate_params(&self, sample: &[f64]) -> Result<Vec<f64>, ModelError> {
        let name = self.display_name();
        let n = sample.len() as f64;
        let mean = sample.iter().sum::<f64>() / n;
        let var = if sample.len() > 1 {
            sample.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        match self {
            Kind::Normal => {
                if var <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "zero variance",
                    });
                }
                Ok(vec![mean, var.sqrt()])
            }
            Kind::StudentT => {
                // Var(T) = ν/(ν−2) ⇒ ν = 2v/(v−1); v ≤ 1 looks normal-tailed
                let df = if var > 1.0 {
                    (2.0 * var / (var - 1.0)).clamp(1.0, 1000.0)
                } else {
                    30.0
                };
                Ok(vec![df])
            }
            Kind::ChiSquared => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                Ok(vec![clamp_pos(mean)])
            }
            Kind::FisherF => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                // Mean = d2/(d2−2) pins d2; variance then pins d1
                let d2 = if mean > 1.0 {
                    (2.0 * mean / (mean - 1.0)).clamp(4.5, 1000.0)
                } else {
                    10.0
                };
                let c = 2.0 * d2 * d2 / ((d2 - 2.0) * (d2 - 2.0) * (d2 - 4.0));
                let d1 = if var > c {
                    ((d2 - 2.0) / (var / c - 1.0)).clamp(1.0, 1000.0)
                } else {
                    5.0
                };
                Ok(vec![d1, d2])
            }
            Kind::Exponential => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                Ok(vec![clamp_pos(1.0 / mean)])
            }
            Kind::Gamma => {
                if mean <= 0.0 || var <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean or zero variance",
                    });
                }
                Ok(vec![clamp_pos(mean * mean / var), clamp_pos(var / mean)])
            }
            Kind::Beta => {
                if var <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "zero variance",
                    });
                }
                let m = mean.clamp(0.01, 0.99);
                let common = m * (1.0 - m) / var - 1.0;
                Ok(vec![clamp_pos(m * common), clamp_pos((1.0 - m) * common)])
            }
            Kind::Uniform => {
                let min = sample.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = sample.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                if min >= max {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "zero range",
                    });
                }
                Ok(vec![min, max])
            }
            Kind::Bernoulli => Ok(vec![mean.clamp(0.01, 0.99)]),
            Kind::Binomial => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                let p = (1.0 - var / mean).clamp(0.01, 0.99);
                let trials = (mean / p).round().max(1.0);
                Ok(vec![trials, p])
            }
            Kind::Poisson => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                Ok(vec![clamp_pos(mean)])
            }
            Kind::Geometric => {
                if mean <= 0.0 {
                    return Err(ModelError::DegenerateSample {
                        kind: name,
                        reason: "non-positive mean",
                    });
                }
                Ok(vec![(1.0 / mean).clamp(0.01, 0.99)])
            }
        }
    }
}

fn clamp_pos(v: f64) -> f64 {
    v.max(0.01)
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Kind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "gaussian" => Ok(Kind::Normal),
            "t" | "studentT" | "student" => Ok(Kind::StudentT),
            "chiSquare" | "chisquare" | "chi2" => Ok(Kind::ChiSquared),
            "f" | "fisher" => Ok(Kind::FisherF),
            "exponential" => Ok(Kind::Exponential),
            "gamma" => Ok(Kind::Gamma),
            "beta" => Ok(Kind::Beta),
            "uniform" => Ok(Kind::Uniform),
            "bernoulli" => Ok(Kind::Bernoulli),
            "binomial" => Ok(Kind::Binomial),
            "poisson" => Ok(Kind::Poisson),
            "geometric" => Ok(Kind::Geometric),
            other => Err(ModelError::UnknownKind(other.to_string())),
        }
    }
}

/// A distribution kind bound to concrete parameters.
///
/// The enum-per-kind representation gives compile-time exhaustiveness:
/// every [`Distribution`] method dispatches through a single `match`.
#[derive(Debug, Clone, Copy)]
pub enum Model {
    Normal(Normal),
    StudentT(StudentT),
    ChiSquared(ChiSquared),
    FisherF(FisherF),
    Exponential(Exponential),
    Gamma(Gamma),
    Beta(Beta),
    Uniform(Uniform),
    Bernoulli(Bernoulli),
    Binomial(Binomial),
    Poisson(Poisson),
    Geometric(Geometric),
}

impl Model {
    /// Bind `kind` to `params` (in the order of [`Kind::param_names`]),
    /// validating count and support.
    pub fn new(kind: Kind, params: &[f64]) -> Result<Self, ModelError> {
        let expected = kind.n_params();
        if params.len() != expected {
            return Err(ModelError::ParamCount {
                kind: kind.display_name(),
                expected,
                actual: params.len(),
            });
        }
        let invalid = |_e: DistError| ModelError::InvalidParams(kind.display_name());
        match kind {
            Kind::Normal => Normal::new(params[0], params[1]).map(Model::Normal).map_err(invalid),
            Kind::StudentT => StudentT::new(params[0]).map(Model::StudentT).map_err(invalid),
            Kind::ChiSquared => ChiSquared::new(params[0]).map(Model::ChiSquared).map_err(invalid),
            Kind::FisherF => FisherF::new(params[0], params[1]).map(Model::FisherF).map_err(invalid),
            Kind::Exponential => Exponential::new(params[0]).map(Model::Exponential).map_err(invalid),
            Kind::Gamma => Gamma::new(params[0], params[1]).map(Model::Gamma).map_err(invalid),
            Kind::Beta => Beta::new(params[0], params[1]).map(Model::Beta).map_err(invalid),
            Kind::Uniform => Uniform::new(params[0], params[1]).map(Model::Uniform).map_err(invalid),
            Kind::Bernoulli => Bernoulli::new(params[0]).map(Model::Bernoulli).map_err(invalid),
            Kind::Binomial => {
                if !(params[0] >= 1.0) || params[0].fract() != 0.0 {
                    return Err(ModelError::InvalidParams(kind.display_name()));
                }
                Binomial::new(params[0] as u64, params[1])
                    .map(Model::Binomial)
                    .map_err(invalid)
            }
            Kind::Poisson => Poisson::new(params[0]).map(Model::Poisson).map_err(invalid),
            Kind::Geometric => Geometric::new(params[0]).map(Model::Geometric).map_err(invalid),
        }
    }

    /// The kind this model instantiates.
    pub fn kind(&self) -> Kind {
        match self {
            Model::Normal(_) => Kind::Normal,
            Model::StudentT(_) => Kind::StudentT,
            Model::ChiSquared(_) => Kind::ChiSquared,
            Model::FisherF(_) => Kind::FisherF,
            Model::Exponential(_) => Kind::Exponential,
            Model::Gamma(_) => Kind::Gamma,
            Model::Beta(_) => Kind::Beta,
            Model::Uniform(_) => Kind::Uniform,
            Model::Bernoulli(_) => Kind::Bernoulli,
            Model::Binomial(_) => Kind::Binomial,
            Model::Poisson(_) => Kind::Poisson,
            Model::Geometric(_) => Kind::Geometric,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $d:ident => $body:expr) => {
        match $self {
            Model::Normal($d) => $body,
            Model::StudentT($d) => $body,
            Model::ChiSquared($d) => $body,
            Model::FisherF($d) => $body,
            Model::Exponential($d) => $body,
            Model::Gamma($d) => $body,
            Model::Beta($d) => $body,
            Model::Uniform($d) => $body,
            Model::Bernoulli($d) => $body,
            Model::Binomial($d) => $body,
            Model::Poisson($d) => $body,
            Model::Geometric($d) => $body,
        }
    };
}

impl Distribution for Model {
    fn pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.pdf(x))
    }

    fn ln_pdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.ln_pdf(x))
    }

    fn cdf(&self, x: f64) -> f64 {
        dispatch!(self, d => d.cdf(x))
    }

    fn quantile_with_status(&self, p: f64) -> QuantileResult {
        dispatch!(self, d => d.quantile_with_status(p))
    }

    fn mean(&self) -> f64 {
        dispatch!(self, d => d.mean())
    }

    fn variance(&self) -> f64 {
        dispatch!(self, d => d.variance())
    }
}

/// A distribution fitted to a sample: parameters plus the information
/// criteria derived from the sample's log-likelihood.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FittedModel {
    /// Fitted kind.
    pub kind: Kind,
    /// Parameter values in [`Kind::param_names`] order.
    pub params: Vec<f64>,
    /// Whether the parameters were estimated (false when supplied).
    pub estimated: bool,
    /// Σ ln pdf(xᵢ); observations with non-positive density are skipped,
    /// which understates the likelihood under support violations.
    pub log_likelihood: f64,
    /// Akaike information criterion: 2k − 2·logL.
    pub aic: f64,
    /// Bayesian information criterion: k·ln(n) − 2·logL.
    pub bic: f64,
    /// The bound model, for downstream probability queries.
    #[serde(skip)]
    pub model: Model,
}

/// Fit `kind` to `sample`.
///
/// When `params` is supplied the estimation step is skipped, allowing a
/// hypothesized model to be scored against the data instead of the
/// best-fitting one. Otherwise parameters come from
/// [`Kind::estimate_params`].
pub fn fit(kind: Kind, sample: &[f64], params: Option<&[f64]>) -> Result<FittedModel, ModelError> {
    let (params, estimated) = match params {
        Some(p) => (p.to_vec(), false),
        None => (kind.estimate_params(sample)?, true),
    };
    let model = Model::new(kind, &params)?;

    let mut log_likelihood = 0.0;
    let mut skipped = 0usize;
    for &x in sample {
        let density = model.pdf(x);
        if density > 0.0 {
            log_likelihood += density.ln();
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        debug!(
            kind = kind.as_str(),
            skipped, "observations outside fitted support excluded from log-likelihood"
        );
    }

    let k = kind.n_params() as f64;
    let n = sample.len() as f64;
    Ok(FittedModel {
        kind,
        params,
        estimated,
        log_likelihood,
        aic: 2.0 * k - 2.0 * log_likelihood,
        bic: k * n.ln() - 2.0 * log_likelihood,
        model,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip_keys() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>().unwrap(), kind);
        }
    }

    #[test]
    fn kind_unknown_key() {
        let err = "weibull".parse::<Kind>().unwrap_err();
        assert!(matches!(err, ModelError::UnknownKind(_)));
    }

    #[test]
    fn param_metadata_consistent() {
        for kind in Kind::ALL {
            assert_eq!(kind.param_names().len(), kind.default_params().len());
            // Defaults must construct a valid model
            assert!(Model::new(kind, kind.default_params()).is_ok(), "{kind}");
        }
    }

    #[test]
    fn estimate_normal() {
        let sample = [23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0];
        let params = Kind::Normal.estimate_params(&sample).unwrap();
        assert!((params[0] - 25.5).abs() < 1e-12);
        assert!((params[1] - 3.02765).abs() < 1e-4);
    }

    #[test]
    fn estimate_exponential() {
        let params = Kind::Exponential
            .estimate_params(&[1.0, 2.0, 3.0, 4.0, 5.0])
            .unwrap();
        assert!((params[0] - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn estimate_gamma_moments() {
        // shape = mean²/var, scale = var/mean
        let sample = [2.0, 3.0, 4.0, 5.0, 6.0];
        let params = Kind::Gamma.estimate_params(&sample).unwrap();
        assert!((params[0] - 16.0 / 2.5).abs() < 1e-10);
        assert!((params[1] - 2.5 / 4.0).abs() < 1e-10);
    }

    #[test]
    fn estimate_beta_stays_in_support() {
        // Adversarial: variance too large for moment matching
        let sample = [0.01, 0.99, 0.01, 0.99, 0.5];
        let params = Kind::Beta.estimate_params(&sample).unwrap();
        assert!(params[0] >= 0.01);
        assert!(params[1] >= 0.01);
    }

    #[test]
    fn estimate_binomial_clamps_probability() {
        // Overdispersed: var > mean would push p below 0
        let sample = [0.0, 10.0, 0.0, 10.0, 5.0];
        let params = Kind::Binomial.estimate_params(&sample).unwrap();
        assert!((0.01..=0.99).contains(&params[1]));
        assert!(params[0] >= 1.0);
    }

    #[test]
    fn estimate_rejects_degenerate() {
        let flat = [4.0, 4.0, 4.0, 4.0];
        assert!(matches!(
            Kind::Normal.estimate_params(&flat),
            Err(ModelError::DegenerateSample { .. })
        ));
        assert!(matches!(
            Kind::Uniform.estimate_params(&flat),
            Err(ModelError::DegenerateSample { .. })
        ));
        let negative = [-1.0, -2.0, -3.0];
        assert!(matches!(
            Kind::Exponential.estimate_params(&negative),
            Err(ModelError::DegenerateSample { .. })
        ));
    }

    #[test]
    fn model_param_count_checked() {
        let err = Model::new(Kind::Normal, &[1.0]).unwrap_err();
        assert!(matches!(err, ModelError::ParamCount { expected: 2, actual: 1, .. }));
    }

    #[test]
    fn fit_exponential_reference() {
        let fitted = fit(Kind::Exponential, &[1.0, 2.0, 3.0, 4.0, 5.0], None).unwrap();
        assert!((fitted.params[0] - 1.0 / 3.0).abs() < 1e-12);
        assert!((fitted.model.cdf(3.0) - 0.6321).abs() < 1e-3);
        assert!(fitted.estimated);
    }

    #[test]
    fn fit_with_supplied_params_skips_estimation() {
        let fitted = fit(Kind::Normal, &[1.0, 2.0, 3.0], Some(&[100.0, 15.0])).unwrap();
        assert_eq!(fitted.params, vec![100.0, 15.0]);
        assert!(!fitted.estimated);
    }

    #[test]
    fn fit_information_criteria() {
        let sample = [2.1, 2.9, 3.4, 4.2, 5.0, 5.8];
        let fitted = fit(Kind::Normal, &sample, None).unwrap();
        let k = 2.0;
        let n = sample.len() as f64;
        assert!((fitted.aic - (2.0 * k - 2.0 * fitted.log_likelihood)).abs() < 1e-12);
        assert!((fitted.bic - (k * n.ln() - 2.0 * fitted.log_likelihood)).abs() < 1e-12);
    }
}
