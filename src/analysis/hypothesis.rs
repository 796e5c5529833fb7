//! Hypothesis tests: sample-level tests (means, proportions, variances)
//! and distribution-parameter tests against hypothesized values.
//!
//! Mean-style tests use Student's t below 30 observations and the normal
//! approximation above. Parameter tests use a likelihood-ratio χ² for
//! Gamma and Beta, a variance-ratio F-test for the F kind, and
//! large-sample Z approximations on the estimator elsewhere.

use serde::Serialize;

use crate::dist::{ChiSquared, Distribution, FisherF, Normal, StudentT};
use crate::model::{fit, FittedModel, Kind};

use super::AnalysisError;

/// Sample size at which mean-style tests switch from t to z.
const LARGE_SAMPLE: usize = 30;

/// Requested hypothesis test.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum HypothesisTest {
    /// One-sample mean against `mu0`.
    OneSampleMean { mu0: f64 },
    /// Two-sample (Welch) mean comparison against a second sample.
    TwoSampleMean { other: Vec<f64> },
    /// Paired mean comparison against a second sample of equal length.
    Paired { other: Vec<f64> },
    /// One-sample proportion against `p0`; observations are 0/1.
    Proportion { p0: f64 },
    /// One-sample variance against `sigma_sq0`.
    Variance { sigma_sq0: f64 },
    /// Ratio of variances against a second sample (F-test).
    VarianceRatio { other: Vec<f64> },
    /// Test the fitted distribution's parameters against `null_params`.
    DistributionParam { null_params: Vec<f64> },
}

/// Outcome of a hypothesis test.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HypothesisOutcome {
    /// Test label.
    pub test: &'static str,
    /// Test statistic.
    pub statistic: f64,
    /// Two-sided p-value (NaN for unsupported parameter tests).
    pub p_value: f64,
    /// Degrees of freedom where applicable.
    pub df: Option<f64>,
    /// Significance level the decision was made at.
    pub alpha: f64,
    /// Whether the null hypothesis is rejected at `alpha`.
    pub reject: bool,
    /// Prose summary of the decision.
    pub conclusion: String,
}

fn mean_and_var(sample: &[f64]) -> (f64, f64) {
    let n = sample.len() as f64;
    let mean = sample.iter().sum::<f64>() / n;
    let var = sample.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    (mean, var)
}

/// Two-sided p-value for a t- or z-style statistic: t below
/// [`LARGE_SAMPLE`] observations, normal at or above.
fn two_sided_p(statistic: f64, n: usize, df: f64) -> f64 {
    let cdf = if n < LARGE_SAMPLE {
        StudentT::new(df).expect("df > 0").cdf(statistic.abs())
    } else {
        Normal::new(0.0, 1.0).expect("unit normal").cdf(statistic.abs())
    };
    (2.0 * (1.0 - cdf)).clamp(0.0, 1.0)
}

fn verdict(reject: bool, alpha: f64, p_value: f64, null_desc: &str) -> String {
    if reject {
        format!(
            "reject the null hypothesis ({null_desc}) at α = {alpha}: p = {p_value:.4}"
        )
    } else {
        format!(
            "fail to reject the null hypothesis ({null_desc}) at α = {alpha}: p = {p_value:.4}"
        )
    }
}

/// Dispatch `test` for the analyzed sample.
pub fn run_test(
    test: &HypothesisTest,
    fitted: &FittedModel,
    sample: &[f64],
    alpha: f64,
) -> Result<HypothesisOutcome, AnalysisError> {
    match test {
        HypothesisTest::OneSampleMean { mu0 } => Ok(one_sample_mean(sample, *mu0, alpha)),
        HypothesisTest::TwoSampleMean { other } => {
            if other.len() < 2 {
                return Err(AnalysisError::SampleTooSmall {
                    min: 2,
                    actual: other.len(),
                });
            }
            Ok(two_sample_mean(sample, other, alpha))
        }
        HypothesisTest::Paired { other } => {
            if other.len() != sample.len() {
                return Err(AnalysisError::SampleLengthMismatch);
            }
            let diffs: Vec<f64> = sample.iter().zip(other).map(|(a, b)| a - b).collect();
            let mut outcome = one_sample_mean(&diffs, 0.0, alpha);
            outcome.test = "paired t-test";
            outcome.conclusion = outcome
                .conclusion
                .replace("mean =", "mean difference =");
            Ok(outcome)
        }
        HypothesisTest::Proportion { p0 } => proportion(sample, *p0, alpha),
        HypothesisTest::Variance { sigma_sq0 } => variance(sample, *sigma_sq0, alpha),
        HypothesisTest::VarianceRatio { other } => {
            if other.len() < 2 {
                return Err(AnalysisError::SampleTooSmall {
                    min: 2,
                    actual: other.len(),
                });
            }
            Ok(variance_ratio(sample, other, alpha))
        }
        HypothesisTest::DistributionParam { null_params } => {
            distribution_param(fitted, sample, null_params, alpha)
        }
    }
}

fn one_sample_mean(sample: &[f64], mu0: f64, alpha: f64) -> HypothesisOutcome {
    let n = sample.len();
    let (mean, var) = mean_and_var(sample);
    let se = (var / n as f64).sqrt();
    let statistic = (mean - mu0) / se;
    let df = (n - 1) as f64;
    let p_value = two_sided_p(statistic, n, df);
    let reject = p_value < alpha;
    HypothesisOutcome {
        test: "one-sample mean",
        statistic,
        p_value,
        df: (n < LARGE_SAMPLE).then_some(df),
        alpha,
        reject,
        conclusion: verdict(reject, alpha, p_value, &format!("mean = {mu0}")),
    }
}

fn two_sample_mean(a: &[f64], b: &[f64], alpha: f64) -> HypothesisOutcome {
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (mean_a, var_a) = mean_and_var(a);
    let (mean_b, var_b) = mean_and_var(b);
    let se_sq = var_a / na + var_b / nb;
    let statistic = (mean_a - mean_b) / se_sq.sqrt();
    // Welch-Satterthwaite degrees of freedom
    let df = se_sq * se_sq
        / ((var_a / na) * (var_a / na) / (na - 1.0) + (var_b / nb) * (var_b / nb) / (nb - 1.0));
    let n_small = a.len().min(b.len());
    let p_value = two_sided_p(statistic, n_small, df);
    let reject = p_value < alpha;
    HypothesisOutcome {
        test: "two-sample mean (Welch)",
        statistic,
        p_value,
        df: (n_small < LARGE_SAMPLE).then_some(df),
        alpha,
        reject,
        conclusion: verdict(reject, alpha, p_value, "equal means"),
    }
}

fn proportion(sample: &[f64], p0: f64, alpha: f64) -> Result<HypothesisOutcome, AnalysisError> {
    if !(0.0 < p0 && p0 < 1.0) {
        return Err(AnalysisError::InvalidHypothesisValue {
            name: "p0",
            value: p0,
        });
    }
    let n = sample.len() as f64;
    let p_hat = sample.iter().sum::<f64>() / n;
    let se = (p0 * (1.0 - p0) / n).sqrt();
    let statistic = (p_hat - p0) / se;
    let normal = Normal::new(0.0, 1.0).expect("unit normal");
    let p_value = (2.0 * (1.0 - normal.cdf(statistic.abs()))).clamp(0.0, 1.0);
    let reject = p_value < alpha;
    Ok(HypothesisOutcome {
        test: "one-sample proportion",
        statistic,
        p_value,
        df: None,
        alpha,
        reject,
        conclusion: verdict(reject, alpha, p_value, &format!("p = {p0}")),
    })
}

fn variance(sample: &[f64], sigma_sq0: f64, alpha: f64) -> Result<HypothesisOutcome, AnalysisError> {
    if sigma_sq0 <= 0.0 {
        return Err(AnalysisError::InvalidHypothesisValue {
            name: "sigma_sq0",
            value: sigma_sq0,
        });
    }
    let n = sample.len();
    let (_, var) = mean_and_var(sample);
    let df = (n - 1) as f64;
    let statistic = df * var / sigma_sq0;
    let chi2 = ChiSquared::new(df).expect("df > 0");
    let cdf = chi2.cdf(statistic);
    let p_value = (2.0 * cdf.min(1.0 - cdf)).clamp(0.0, 1.0);
    let reject = p_value < alpha;
    Ok(HypothesisOutcome {
        test: "one-sample variance",
        statistic,
        p_value,
        df: Some(df),
        alpha,
        reject,
        conclusion: verdict(reject, alpha, p_value, &format!("variance = {sigma_sq0}")),
    })
}

fn variance_ratio(a: &[f64], b: &[f64], alpha: f64) -> HypothesisOutcome {
    let (_, var_a) = mean_and_var(a);
    let (_, var_b) = mean_and_var(b);
    let statistic = var_a / var_b;
    let d1 = (a.len() - 1) as f64;
    let d2 = (b.len() - 1) as f64;
    let f_dist = FisherF::new(d1, d2).expect("df > 0");
    let cdf = f_dist.cdf(statistic);
    let p_value = (2.0 * cdf.min(1.0 - cdf)).clamp(0.0, 1.0);
    let reject = p_value < alpha;
    HypothesisOutcome {
        test: "variance ratio (F)",
        statistic,
        p_value,
        df: Some(d1),
        alpha,
        reject,
        conclusion: verdict(reject, alpha, p_value, "equal variances"),
    }
}

/// Test the fitted kind's parameters against `null_params`.
fn distribution_param(
    fitted: &FittedModel,
    sample: &[f64],
    null_params: &[f64],
    alpha: f64,
) -> Result<HypothesisOutcome, AnalysisError> {
    let kind = fitted.kind;
    let expected = kind.n_params();
    if null_params.len() != expected {
        return Err(AnalysisError::Model(crate::model::ModelError::ParamCount {
            kind: kind.display_name(),
            expected,
            actual: null_params.len(),
        }));
    }

    let n = sample.len() as f64;
    match kind {
        // Normal null on the mean reduces to the one-sample t-test
        Kind::Normal => Ok(one_sample_mean(sample, null_params[0], alpha)),
        Kind::Gamma | Kind::Beta => {
            // Likelihood ratio: 2(logL_full − logL_null) ~ χ² with df =
            // number of constrained parameters
            let null_fit = fit(kind, sample, Some(null_params))?;
            let statistic = (2.0 * (fitted.log_likelihood - null_fit.log_likelihood)).max(0.0);
            let df = expected as f64;
            let chi2 = ChiSquared::new(df).expect("df > 0");
            let p_value = (1.0 - chi2.cdf(statistic)).clamp(0.0, 1.0);
            let reject = p_value < alpha;
            Ok(HypothesisOutcome {
                test: "likelihood ratio",
                statistic,
                p_value,
                df: Some(df),
                alpha,
                reject,
                conclusion: verdict(
                    reject,
                    alpha,
                    p_value,
                    &format!("{} params = {:?}", kind.display_name(), null_params),
                ),
            })
        }
        Kind::FisherF => Ok(HypothesisOutcome {
            test: "distribution parameter",
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: None,
            alpha,
            reject: false,
            conclusion: "F parameter tests need a second sample; use the variance-ratio test"
                .to_string(),
        }),
        Kind::Uniform => Ok(HypothesisOutcome {
            test: "distribution parameter",
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: None,
            alpha,
            reject: false,
            conclusion: "no parameter test is defined for the Uniform distribution".to_string(),
        }),
        // Large-sample Z approximation on the primary estimator
        _ => {
            let estimate = fitted.params[primary_param_index(kind)];
            let null = null_params[primary_param_index(kind)];
            let se = estimator_std_error(kind, estimate, n);
            let statistic = (estimate - null) / se;
            let normal = Normal::new(0.0, 1.0).expect("unit normal");
            let p_value = (2.0 * (1.0 - normal.cdf(statistic.abs()))).clamp(0.0, 1.0);
            let reject = p_value < alpha;
            let name = kind.param_names()[primary_param_index(kind)];
            Ok(HypothesisOutcome {
                test: "large-sample Z",
                statistic,
                p_value,
                df: None,
                alpha,
                reject,
                conclusion: verdict(reject, alpha, p_value, &format!("{name} = {null}")),
            })
        }
    }
}

/// Index of the parameter the Z approximation targets.
fn primary_param_index(kind: Kind) -> usize {
    match kind {
        // Binomial tests p, the second parameter
        Kind::Binomial => 1,
        _ => 0,
    }
}

/// Large-sample standard error of the method-of-moments estimator.
fn estimator_std_error(kind: Kind, estimate: f64, n: f64) -> f64 {
    match kind {
        // Var(λ̂) = λ²/n for the exponential MLE
        Kind::Exponential => estimate / n.sqrt(),
        // Var(λ̂) = λ/n for the Poisson MLE
        Kind::Poisson => (estimate / n).sqrt(),
        // Proportion estimators: p(1−p)/n
        Kind::Bernoulli | Kind::Binomial => (estimate * (1.0 - estimate) / n).sqrt(),
        // Var(p̂) ≈ p²(1−p)/n for the geometric MLE
        Kind::Geometric => (estimate * estimate * (1.0 - estimate) / n).sqrt(),
        // Sample mean of χ²(k) has variance 2k/n
        Kind::ChiSquared => (2.0 * estimate / n).sqrt(),
        // Moment estimator of ν has no tidy variance; scale-based guess
        Kind::StudentT => estimate * (2.0 / n).sqrt(),
        _ => estimate / n.sqrt(),
    }
}
