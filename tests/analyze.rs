//! End-to-end scenarios through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use distfit::{
    analyze, analyze_with_rng, AnalysisConfig, CellKind, Distribution, Kind, Summary,
};

fn rng() -> StdRng {
    StdRng::seed_from_u64(1234)
}

#[test]
fn normal_fit_publishes_descriptives() {
    let config = AnalysisConfig::new(
        Kind::Normal,
        vec![23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0],
    );
    let analysis = analyze_with_rng(&config, &mut rng()).unwrap();

    assert!((analysis.fit.params[0] - 25.5).abs() < 1e-12);
    assert!((analysis.fit.params[1] - 3.0277).abs() < 1e-3);

    let report = &analysis.report;
    let titles = report.section_titles();
    assert!(titles.contains(&"DESCRIPTIVE STATISTICS"));
    let row = report
        .rows
        .iter()
        .find(|r| r[0].value == "Sample Size (n)")
        .expect("sample size row");
    assert_eq!(row[1].value, "10");
    assert_eq!(row[1].kind, CellKind::Result);
}

#[test]
fn exponential_fit_reference_numbers() {
    let config = AnalysisConfig::new(Kind::Exponential, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
    let analysis = analyze_with_rng(&config, &mut rng()).unwrap();

    assert!((analysis.statistics.mean - 3.0).abs() < 1e-12);
    assert!((analysis.fit.params[0] - 0.3333).abs() < 1e-3);
    assert!((analysis.fit.model.cdf(3.0) - 0.6321).abs() < 1e-3);
}

#[test]
fn target_analysis_on_hypothesized_normal() {
    let mut config = AnalysisConfig::new(
        Kind::Normal,
        vec![95.0, 102.0, 108.0, 99.0, 87.0, 112.0, 105.0, 93.0],
    );
    config.params = Some(vec![100.0, 15.0]);
    config.target_value = Some(115.0);
    let analysis = analyze_with_rng(&config, &mut rng()).unwrap();

    let target = analysis.target.expect("target analysis");
    assert!((target.effect_size - 1.0).abs() < 1e-9);
    assert!((target.prob_less - 0.8413).abs() < 1e-3);
}

#[test]
fn exponential_wins_its_own_pattern() {
    let base = distfit::dist::Exponential::new(0.5).unwrap();
    let sample: Vec<f64> = (0..40)
        .map(|i| base.quantile((i as f64 + 0.5) / 40.0))
        .collect();

    let mut config = AnalysisConfig::new(Kind::Exponential, sample);
    config.compare = vec![Kind::Exponential, Kind::Gamma];
    let analysis = analyze_with_rng(&config, &mut rng()).unwrap();

    let comparison = analysis.comparison.expect("comparison");
    assert_eq!(comparison.best, comparison.candidates[0].kind);
    let exp = comparison
        .candidates
        .iter()
        .find(|c| c.kind == Kind::Exponential)
        .unwrap();
    assert!(exp.rank == 1 || exp.delta_aic < 2.0);
}

#[test]
fn all_kinds_run_end_to_end() {
    let continuous = vec![0.12, 0.35, 0.47, 0.55, 0.61, 0.72, 0.78, 0.83, 0.88, 0.93];
    let counts = vec![1.0, 2.0, 3.0, 2.0, 4.0, 1.0, 3.0, 2.0, 5.0, 2.0];
    let zero_one = vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0];
    let positive = vec![0.8, 1.3, 2.1, 2.9, 3.4, 4.2, 5.5, 6.1, 7.8, 9.0];
    let spread = vec![23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0];

    let cases: Vec<(Kind, &Vec<f64>)> = vec![
        (Kind::Normal, &spread),
        (Kind::StudentT, &spread),
        (Kind::ChiSquared, &positive),
        (Kind::FisherF, &positive),
        (Kind::Exponential, &positive),
        (Kind::Gamma, &positive),
        (Kind::Beta, &continuous),
        (Kind::Uniform, &spread),
        (Kind::Bernoulli, &zero_one),
        (Kind::Binomial, &counts),
        (Kind::Poisson, &counts),
        (Kind::Geometric, &counts),
    ];

    for (kind, sample) in cases {
        let mut config = AnalysisConfig::new(kind, sample.clone());
        config.bootstrap_samples = 200;
        let analysis = analyze_with_rng(&config, &mut rng())
            .unwrap_or_else(|e| panic!("{kind} failed: {e}"));

        assert_eq!(analysis.kind, kind);
        assert_eq!(analysis.fit.params.len(), kind.n_params(), "{kind}");
        assert!(analysis.fit.aic.is_finite(), "{kind}");
        assert_eq!(analysis.value_intervals.len(), 3, "{kind}");
        assert_eq!(analysis.parameter_intervals.len(), kind.n_params(), "{kind}");
        assert!(!analysis.report.rows.is_empty(), "{kind}");

        // Every parameter the fit produced is inside its kind's support
        for (&value, &name) in analysis.fit.params.iter().zip(kind.param_names()) {
            assert!(value.is_finite(), "{kind} {name}");
        }
    }
}

#[test]
fn summary_matches_fit_input() {
    let sample = vec![4.0, 8.0, 15.0, 16.0, 23.0, 42.0];
    let standalone = Summary::from_sample(&sample);
    let analysis = analyze_with_rng(
        &AnalysisConfig::new(Kind::Normal, sample),
        &mut rng(),
    )
    .unwrap();
    assert_eq!(standalone.mean, analysis.statistics.mean);
    assert_eq!(standalone.variance, analysis.statistics.variance);
    assert_eq!(standalone.median, analysis.statistics.median);
}

#[test]
fn analyze_without_seed_still_completes() {
    // The entropy-seeded entry point; bootstrap bounds differ run to run
    // but the analytic pieces stay fixed
    let config = AnalysisConfig::new(
        Kind::Normal,
        vec![23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0],
    );
    let analysis = analyze(&config).unwrap();
    assert!((analysis.fit.params[0] - 25.5).abs() < 1e-12);
}

#[test]
fn serialization_exposes_artifacts() {
    let mut config = AnalysisConfig::new(
        Kind::Normal,
        vec![23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0],
    );
    config.target_value = Some(26.0);
    let analysis = analyze_with_rng(&config, &mut rng()).unwrap();

    let json = serde_json::to_string(&analysis).unwrap();
    assert!(json.contains("\"statistics\""));
    assert!(json.contains("\"valueIntervals\""));
    assert!(json.contains("\"goodnessOfFit\""));
    assert!(json.contains("\"logLikelihood\""));
    assert!(json.contains("\"report\""));
    assert!(json.contains("\"target\""));
}
