//! The fit engine: one linear pipeline per [`analyze`] call.
//!
//! ```text
//! validate → describe → fit → value-space CIs → parameter CIs
//!          → goodness-of-fit → hypothesis test? → comparison?
//!          → target analysis? → report
//! ```
//!
//! Every stage is pure; the only non-determinism is the bootstrap
//! resampler, which takes an injectable RNG ([`analyze_with_rng`]) so
//! tests can pin a seed. Each call builds its results from scratch — no
//! state is shared across calls.
//!
//! # Example
//!
//! ```
//! use distfit::{analyze, AnalysisConfig, Kind};
//!
//! let mut config = AnalysisConfig::new(Kind::Exponential, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
//! config.target_value = Some(3.0);
//! let analysis = analyze(&config).unwrap();
//!
//! assert!((analysis.fit.params[0] - 1.0 / 3.0).abs() < 1e-12);
//! let target = analysis.target.unwrap();
//! assert!((target.prob_less - 0.6321).abs() < 1e-3);
//! ```

mod compare;
mod gof;
mod hypothesis;
mod intervals;
mod target;


pub use compare::{CandidateFit, Comparison};
pub use gof::{GofTest, GoodnessOfFit};
pub use hypothesis::{HypothesisOutcome, HypothesisTest};
pub use intervals::{
    CiMethod, ConfidenceInterval, ParameterInterval, BOOTSTRAP_SAMPLES, CONFIDENCE_LEVELS,
};
pub use target::{Significance, TargetAnalysis};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::describe::Summary;
use crate::model::{fit, FittedModel, Kind, ModelError};
use crate::report::{self, Report};

/// Minimum sample size the engine accepts.
pub const MIN_SAMPLE_SIZE: usize = 3;

/// Errors from the analysis pipeline. Domain violations are explicit
/// values; numerical non-convergence never lands here (solvers warn and
/// return their best iterate instead).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Fewer observations than the engine supports.
    #[error("need at least {min} observations, got {actual}")]
    SampleTooSmall { min: usize, actual: usize },
    /// The sample contains NaN or infinite values.
    #[error("sample contains non-finite values")]
    NonFiniteSample,
    /// Observations fall outside the distribution's support.
    #[error("sample outside the support of {kind}: {reason}")]
    SampleOutsideSupport {
        kind: &'static str,
        reason: &'static str,
    },
    /// The target value lies outside a bounded support.
    #[error("target value {target} outside the support of {kind}")]
    TargetOutsideSupport { target: f64, kind: &'static str },
    /// The significance level is not in (0, 1).
    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidAlpha(f64),
    /// A hypothesized test value is outside its valid range.
    #[error("hypothesis value {name} = {value} is out of range")]
    InvalidHypothesisValue { name: &'static str, value: f64 },
    /// Paired tests need samples of equal length.
    #[error("paired test requires a second sample of equal length")]
    SampleLengthMismatch,
    /// Registry or estimator failure.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Input to one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Which distribution to fit.
    pub distribution: Kind,
    /// The sample; at least [`MIN_SAMPLE_SIZE`] finite values.
    pub samples: Vec<f64>,
    /// Use these parameters instead of estimating (hypothesized model).
    pub params: Option<Vec<f64>>,
    /// Threshold for target analysis.
    pub target_value: Option<f64>,
    /// Hypothesis test to run.
    pub hypothesis_test: Option<HypothesisTest>,
    /// Candidate kinds to compare against on the same sample.
    pub compare: Vec<Kind>,
    /// Significance level for tests. Default 0.05.
    pub alpha: f64,
    /// Bootstrap resample count for parameter intervals.
    /// Default [`BOOTSTRAP_SAMPLES`].
    pub bootstrap_samples: usize,
}

impl AnalysisConfig {
    /// Config with defaults: no hypothesized params, no target, no
    /// hypothesis test, no comparison, α = 0.05.
    pub fn new(distribution: Kind, samples: Vec<f64>) -> Self {
        Self {
            distribution,
            samples,
            params: None,
            target_value: None,
            hypothesis_test: None,
            compare: Vec::new(),
            alpha: 0.05,
            bootstrap_samples: BOOTSTRAP_SAMPLES,
        }
    }
}

/// Everything one analysis run produced. All intermediate artifacts are
/// exposed so external renderers consume them without re-deriving.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// The analyzed kind.
    pub kind: Kind,
    /// Descriptive statistics, independent of the fitted model.
    pub statistics: Summary,
    /// The fitted model with its information criteria.
    pub fit: FittedModel,
    /// Central-mass intervals on the value space, one per level.
    pub value_intervals: Vec<ConfidenceInterval>,
    /// Per-parameter intervals (analytic or bootstrap).
    pub parameter_intervals: Vec<ParameterInterval>,
    /// The goodness-of-fit battery.
    pub goodness_of_fit: GoodnessOfFit,
    /// Hypothesis test outcome, when one was requested.
    pub hypothesis: Option<HypothesisOutcome>,
    /// Candidate comparison, when one was requested.
    pub comparison: Option<Comparison>,
    /// Target analysis, when a target was supplied.
    pub target: Option<TargetAnalysis>,
    /// The assembled report.
    pub report: Report,
}

/// Run the pipeline with a thread-local RNG for the bootstrap.
pub fn analyze(config: &AnalysisConfig) -> Result<Analysis, AnalysisError> {
    analyze_with_rng(config, &mut StdRng::from_entropy())
}

/// Run the pipeline with a caller-supplied RNG, making bootstrap
/// intervals reproducible under a seeded generator.
pub fn analyze_with_rng<R: Rng>(
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<Analysis, AnalysisError> {
    validate(config)?;
    let kind = config.distribution;
    let sample = &config.samples;
    debug!(kind = kind.as_str(), n = sample.len(), "analysis started");

    let statistics = Summary::from_sample(sample);
    let fitted = fit(kind, sample, config.params.as_deref())?;

    let value_intervals = intervals::value_space_intervals(&fitted);
    let parameter_intervals =
        intervals::parameter_intervals(&fitted, sample, config.bootstrap_samples, rng);
    let goodness_of_fit = gof::run_tests(&fitted, sample);

    let hypothesis = match &config.hypothesis_test {
        Some(test) => Some(hypothesis::run_test(test, &fitted, sample, config.alpha)?),
        None => None,
    };

    let comparison = if config.compare.is_empty() {
        None
    } else {
        Some(compare::compare(&config.compare, sample)?)
    };

    let target = match config.target_value {
        Some(t) => Some(target::analyze_target(&fitted, t)?),
        None => None,
    };

    let report = report::assemble(
        &statistics,
        &fitted,
        &value_intervals,
        &parameter_intervals,
        &goodness_of_fit,
        hypothesis.as_ref(),
        comparison.as_ref(),
        target.as_ref(),
    );

    Ok(Analysis {
        kind,
        statistics,
        fit: fitted,
        value_intervals,
        parameter_intervals,
        goodness_of_fit,
        hypothesis,
        comparison,
        target,
        report,
    })
}

/// Boundary validation: sample size, finiteness, support, alpha.
fn validate(config: &AnalysisConfig) -> Result<(), AnalysisError> {
    let sample = &config.samples;
    if sample.len() < MIN_SAMPLE_SIZE {
        return Err(AnalysisError::SampleTooSmall {
            min: MIN_SAMPLE_SIZE,
            actual: sample.len(),
        });
    }
    if sample.iter().any(|x| !x.is_finite()) {
        return Err(AnalysisError::NonFiniteSample);
    }
    if !(0.0 < config.alpha && config.alpha < 1.0) {
        return Err(AnalysisError::InvalidAlpha(config.alpha));
    }
    if let Some(test) = &config.hypothesis_test {
        let other = match test {
            HypothesisTest::TwoSampleMean { other }
            | HypothesisTest::Paired { other }
            | HypothesisTest::VarianceRatio { other } => Some(other),
            _ => None,
        };
        if let Some(other) = other {
            if other.iter().any(|x| !x.is_finite()) {
                return Err(AnalysisError::NonFiniteSample);
            }
        }
    }

    let kind = config.distribution;
    let name = kind.display_name();
    let violation = match kind {
        Kind::Exponential | Kind::Gamma | Kind::ChiSquared | Kind::FisherF => sample
            .iter()
            .any(|&x| x < 0.0)
            .then_some("negative observations"),
        Kind::Beta => sample
            .iter()
            .any(|&x| !(0.0..=1.0).contains(&x))
            .then_some("observations outside [0, 1]"),
        Kind::Bernoulli => sample
            .iter()
            .any(|&x| x != 0.0 && x != 1.0)
            .then_some("observations other than 0 and 1"),
        Kind::Binomial | Kind::Poisson => sample
            .iter()
            .any(|&x| x < 0.0 || x.fract() != 0.0)
            .then_some("non-integer or negative counts"),
        Kind::Geometric => sample
            .iter()
            .any(|&x| x < 1.0 || x.fract() != 0.0)
            .then_some("trial counts below 1 or non-integer"),
        Kind::Normal | Kind::StudentT | Kind::Uniform => None,
    };
    if let Some(reason) = violation {
        return Err(AnalysisError::SampleOutsideSupport { kind: name, reason });
    }
    Ok(())
}
