//! Goodness-of-fit tests against the fitted distribution.
//!
//! Four tests per analysis: Kolmogorov-Smirnov, Anderson-Darling,
//! chi-square binning, and Shapiro-Wilk (Normal fits only — other kinds
//! receive an explanatory note instead of a result). Each reports its
//! statistic, an approximate p-value, and reject flags at the 0.05, 0.01,
//! and 0.001 levels.

use serde::Serialize;

use crate::dist::{normal_cdf_std, normal_quantile_std, ChiSquared, Distribution};
use crate::model::{FittedModel, Kind};

/// Result of one goodness-of-fit test.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GofTest {
    /// Test name.
    pub name: &'static str,
    /// Test statistic (NaN when the test does not apply).
    pub statistic: f64,
    /// Approximate p-value (NaN when the test does not apply).
    pub p_value: f64,
    /// Reject the fitted distribution at α = 0.05.
    pub reject_at_5pct: bool,
    /// Reject at α = 0.01.
    pub reject_at_1pct: bool,
    /// Reject at α = 0.001.
    pub reject_at_01pct: bool,
    /// Caveat or non-applicability note.
    pub note: Option<String>,
}

/// The full goodness-of-fit battery.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodnessOfFit {
    /// Kolmogorov-Smirnov.
    pub ks: GofTest,
    /// Anderson-Darling.
    pub anderson_darling: GofTest,
    /// Chi-square binning.
    pub chi_square: GofTest,
    /// Shapiro-Wilk (Normal only).
    pub shapiro_wilk: GofTest,
}

/// Run the full battery for `fitted` on `sample`.
pub fn run_tests(fitted: &FittedModel, sample: &[f64]) -> GoodnessOfFit {
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite sample"));

    GoodnessOfFit {
        ks: ks_test(fitted, &sorted),
        anderson_darling: anderson_darling_test(fitted, &sorted),
        chi_square: chi_square_test(fitted, &sorted),
        shapiro_wilk: shapiro_wilk_test(fitted, &sorted),
    }
}

// ======================== Kolmogorov-Smirnov ========================

/// Two-sided KS statistic D against the fitted CDF, with the asymptotic
/// critical values 1.36/√n, 1.63/√n, and 1.95/√n and a Kolmogorov-series
/// p-value.
fn ks_test(fitted: &FittedModel, sorted: &[f64]) -> GofTest {
    let n = sorted.len() as f64;
    let mut d = 0.0_f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f = fitted.model.cdf(x);
        let above = (i + 1) as f64 / n - f;
        let below = f - i as f64 / n;
        d = d.max(above).max(below);
    }

    let sqrt_n = n.sqrt();
    let p_value = kolmogorov_p(d, n);

    GofTest {
        name: "Kolmogorov-Smirnov",
        statistic: d,
        p_value,
        reject_at_5pct: d > 1.36 / sqrt_n,
        reject_at_1pct: d > 1.63 / sqrt_n,
        reject_at_01pct: d > 1.95 / sqrt_n,
        note: None,
    }
}

/// Asymptotic Kolmogorov distribution tail: P(D > d) with the small-n
/// correction λ = (√n + 0.12 + 0.11/√n)·d.
fn kolmogorov_p(d: f64, n: f64) -> f64 {
    if d <= 0.0 {
        return 1.0;
    }
    let sqrt_n = n.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;
    let mut sum = 0.0;
    let mut sign = 1.0;
    for j in 1..=100 {
        let jf = j as f64;
        let term = (-2.0 * jf * jf * lambda * lambda).exp();
        sum += sign * term;
        sign = -sign;
        if term < 1e-12 {
            break;
        }
    }
    (2.0 * sum).clamp(0.0, 1.0)
}

// ======================== Anderson-Darling ========================

/// A² critical values for {0.05, 0.01, 0.001}. A single case-zero table
/// is applied to every distribution, which overstates confidence when
/// parameters were estimated from the same data; the note records this.
const AD_CRITICAL: [f64; 3] = [2.492, 3.857, 6.000];

fn anderson_darling_test(fitted: &FittedModel, sorted: &[f64]) -> GofTest {
    let n = sorted.len();
    let nf = n as f64;

    let mut sum = 0.0;
    for (i, &x) in sorted.iter().enumerate() {
        let f_lo = fitted.model.cdf(x).clamp(1e-10, 1.0 - 1e-10);
        let f_hi = fitted.model.cdf(sorted[n - 1 - i]).clamp(1e-10, 1.0 - 1e-10);
        sum += (2.0 * i as f64 + 1.0) * (f_lo.ln() + (1.0 - f_hi).ln());
    }
    let a2 = -nf - sum / nf;

    // D'Agostino-Stephens p-value on the size-adjusted statistic
    let a2_star = a2 * (1.0 + 0.75 / nf + 2.25 / (nf * nf));
    let p_value = if a2_star >= 0.6 {
        (1.2937 - 5.709 * a2_star + 0.0186 * a2_star * a2_star).exp()
    } else if a2_star > 0.34 {
        (0.9177 - 4.279 * a2_star - 1.38 * a2_star * a2_star).exp()
    } else if a2_star > 0.2 {
        1.0 - (-8.318 + 42.796 * a2_star - 59.938 * a2_star * a2_star).exp()
    } else {
        1.0 - (-13.436 + 101.14 * a2_star - 223.73 * a2_star * a2_star).exp()
    }
    .clamp(0.0, 1.0);

    GofTest {
        name: "Anderson-Darling",
        statistic: a2,
        p_value,
        reject_at_5pct: a2 > AD_CRITICAL[0],
        reject_at_1pct: a2 > AD_CRITICAL[1],
        reject_at_01pct: a2 > AD_CRITICAL[2],
        note: Some("critical values are not distribution-specific".to_string()),
    }
}

// ======================== Chi-square binning ========================

fn chi_square_test(fitted: &FittedModel, sorted: &[f64]) -> GofTest {
    let n = sorted.len();
    let nf = n as f64;
    let bins = (nf.sqrt().ceil() as usize).clamp(5, 10);
    let min = sorted[0];
    let max = sorted[n - 1];
    let width = (max - min) / bins as f64;

    let mut statistic = 0.0;
    for b in 0..bins {
        let lo = min + b as f64 * width;
        let hi = if b + 1 == bins { max } else { lo + width };
        let observed = sorted
            .iter()
            .filter(|&&x| {
                if b + 1 == bins {
                    x >= lo && x <= hi
                } else {
                    x >= lo && x < hi
                }
            })
            .count() as f64;
        let expected = nf * (fitted.model.cdf(hi) - fitted.model.cdf(lo));
        if expected > 1e-10 {
            statistic += (observed - expected) * (observed - expected) / expected;
        }
    }

    let df = (bins as f64 - 1.0 - fitted.kind.n_params() as f64).max(1.0);
    let chi2 = ChiSquared::new(df).expect("df ≥ 1");
    let p_value = 1.0 - chi2.cdf(statistic);

    GofTest {
        name: "Chi-Square",
        statistic,
        p_value,
        reject_at_5pct: p_value < 0.05,
        reject_at_1pct: p_value < 0.01,
        reject_at_01pct: p_value < 0.001,
        note: None,
    }
}

// ======================== Shapiro-Wilk ========================

/// Shapiro-Wilk normality test, implemented for Normal fits only. Uses
/// the expected normal order statistics as weights with Royston's
/// p-value transform; dependable for roughly n ≤ 50.
fn shapiro_wilk_test(fitted: &FittedModel, sorted: &[f64]) -> GofTest {
    if fitted.kind != Kind::Normal {
        return GofTest {
            name: "Shapiro-Wilk",
            statistic: f64::NAN,
            p_value: f64::NAN,
            reject_at_5pct: false,
            reject_at_1pct: false,
            reject_at_01pct: false,
            note: Some(format!(
                "normality test; not applicable to the {} distribution",
                fitted.kind.display_name()
            )),
        };
    }

    let n = sorted.len();
    let nf = n as f64;

    // Expected normal order statistics, normalized to unit length
    let m: Vec<f64> = (0..n)
        .map(|i| normal_quantile_std(((i + 1) as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let m_norm = m.iter().map(|v| v * v).sum::<f64>().sqrt();

    let mean = sorted.iter().sum::<f64>() / nf;
    let numerator: f64 = sorted
        .iter()
        .zip(&m)
        .map(|(&x, &mi)| mi / m_norm * x)
        .sum();
    let denominator: f64 = sorted.iter().map(|&x| (x - mean) * (x - mean)).sum();
    let w = (numerator * numerator / denominator).clamp(0.0, 1.0);

    // Royston (1992) normalizing transform
    let z = if n < 12 {
        let g = -2.273 + 0.459 * nf;
        let mu = 0.5440 - 0.39978 * nf + 0.025054 * nf * nf - 0.0006714 * nf * nf * nf;
        let sigma = (1.3822 - 0.77857 * nf + 0.062767 * nf * nf - 0.0020322 * nf * nf * nf).exp();
        (-((g - (1.0 - w).ln()).ln()) - mu) / sigma
    } else {
        let ln_n = nf.ln();
        let mu = -1.5861 - 0.31082 * ln_n - 0.083751 * ln_n * ln_n + 0.0038915 * ln_n * ln_n * ln_n;
        let sigma = (-0.4803 - 0.082676 * ln_n + 0.0030302 * ln_n * ln_n).exp();
        ((1.0 - w).ln() - mu) / sigma
    };
    let p_value = (1.0 - normal_cdf_std(z)).clamp(0.0, 1.0);

    let note = if n > 50 {
        Some("p-value approximation is calibrated for n ≤ 50".to_string())
    } else {
        None
    };

    GofTest {
        name: "Shapiro-Wilk",
        statistic: w,
        p_value,
        reject_at_5pct: p_value < 0.05,
        reject_at_1pct: p_value < 0.01,
        reject_at_01pct: p_value < 0.001,
        note,
    }
}
