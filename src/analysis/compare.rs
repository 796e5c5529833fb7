//! Candidate-distribution comparison ranked by AIC.

use serde::Serialize;
use tracing::debug;

use crate::model::{fit, FittedModel, Kind, ModelError};

use super::gof;

/// ΔAIC below which two candidates are treated as statistically tied.
const NEAR_TIE_DELTA: f64 = 2.0;

/// One candidate's fit quality on the shared sample.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFit {
    /// Candidate kind.
    pub kind: Kind,
    /// Estimated parameters.
    pub params: Vec<f64>,
    /// Log-likelihood on the sample.
    pub log_likelihood: f64,
    /// Akaike information criterion.
    pub aic: f64,
    /// Bayesian information criterion.
    pub bic: f64,
    /// Kolmogorov-Smirnov statistic against the candidate's own fit.
    pub ks_statistic: f64,
    /// KS p-value.
    pub ks_p_value: f64,
    /// 1-based rank by ascending AIC.
    pub rank: usize,
    /// AIC distance from the best candidate.
    pub delta_aic: f64,
}

/// Ranked comparison across candidate kinds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    /// Candidates in ascending-AIC order.
    pub candidates: Vec<CandidateFit>,
    /// The minimum-AIC kind.
    pub best: Kind,
    /// Whether the runner-up sits within ΔAIC < 2 of the best.
    pub near_tie: bool,
    /// Prose recommendation.
    pub recommendation: String,
}

/// Re-estimate each candidate on `sample` and rank by ascending AIC.
///
/// Candidates whose estimator rejects the sample are skipped; the error
/// of the last skip is returned only if no candidate survives.
pub fn compare(kinds: &[Kind], sample: &[f64]) -> Result<Comparison, ModelError> {
    let mut fits: Vec<(FittedModel, f64, f64)> = Vec::with_capacity(kinds.len());
    let mut last_err = None;

    for &kind in kinds {
        match fit(kind, sample, None) {
            Ok(fitted) => {
                let ks = gof::run_tests(&fitted, sample).ks;
                fits.push((fitted, ks.statistic, ks.p_value));
            }
            Err(e) => {
                debug!(kind = kind.as_str(), error = %e, "candidate skipped");
                last_err = Some(e);
            }
        }
    }

    if fits.is_empty() {
        return Err(last_err.unwrap_or(ModelError::UnknownKind("empty candidate list".to_string())));
    }

    fits.sort_by(|a, b| a.0.aic.partial_cmp(&b.0.aic).expect("finite AIC"));
    let best_aic = fits[0].0.aic;
    let best = fits[0].0.kind;

    let candidates: Vec<CandidateFit> = fits
        .into_iter()
        .enumerate()
        .map(|(i, (fitted, ks_statistic, ks_p_value))| CandidateFit {
            kind: fitted.kind,
            params: fitted.params,
            log_likelihood: fitted.log_likelihood,
            aic: fitted.aic,
            bic: fitted.bic,
            ks_statistic,
            ks_p_value,
            rank: i + 1,
            delta_aic: fitted.aic - best_aic,
        })
        .collect();

    let near_tie = candidates
        .get(1)
        .is_some_and(|second| second.delta_aic < NEAR_TIE_DELTA);

    let recommendation = if near_tie {
        format!(
            "{} fits best by AIC, but {} is within ΔAIC < {NEAR_TIE_DELTA}; \
             the data do not clearly separate them",
            best.display_name(),
            candidates[1].kind.display_name(),
        )
    } else {
        format!("{} fits best by AIC", best.display_name())
    };

    Ok(Comparison {
        candidates,
        best,
        near_tie,
        recommendation,
    })
}
