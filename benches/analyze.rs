use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use distfit::{analyze_with_rng, AnalysisConfig, Distribution, Kind};

// ---------------------------------------------------------------------------
// Helpers: deterministic samples from the distributions' own quantiles
// ---------------------------------------------------------------------------

fn normal_sample(n: usize) -> Vec<f64> {
    let base = distfit::dist::Normal::new(50.0, 8.0).unwrap();
    (0..n)
        .map(|i| base.quantile((i as f64 + 0.5) / n as f64))
        .collect()
}

fn exponential_sample(n: usize) -> Vec<f64> {
    let base = distfit::dist::Exponential::new(0.4).unwrap();
    (0..n)
        .map(|i| base.quantile((i as f64 + 0.5) / n as f64))
        .collect()
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

fn analyze_normal(c: &mut Criterion) {
    let mut g = c.benchmark_group("analyze_normal");

    for &n in &[10usize, 100, 1000] {
        let sample = normal_sample(n);
        g.bench_function(format!("n={n}"), |b| {
            let config = AnalysisConfig::new(Kind::Normal, sample.clone());
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                std::hint::black_box(analyze_with_rng(&config, &mut rng).unwrap())
            })
        });
    }

    g.finish();
}

fn analyze_bootstrap_heavy(c: &mut Criterion) {
    let mut g = c.benchmark_group("analyze_bootstrap");
    g.sample_size(20);

    // Poisson parameter intervals go through the bootstrap path
    let sample: Vec<f64> = (0..100).map(|i| ((i % 7) + 1) as f64).collect();
    g.bench_function("poisson_n=100", |b| {
        let config = AnalysisConfig::new(Kind::Poisson, sample.clone());
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            std::hint::black_box(analyze_with_rng(&config, &mut rng).unwrap())
        })
    });

    g.finish();
}

fn compare_candidates(c: &mut Criterion) {
    let mut g = c.benchmark_group("compare_candidates");

    let sample = exponential_sample(200);
    g.bench_function("exp_vs_gamma_vs_normal", |b| {
        let mut config = AnalysisConfig::new(Kind::Exponential, sample.clone());
        config.compare = vec![Kind::Exponential, Kind::Gamma, Kind::Normal];
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            std::hint::black_box(analyze_with_rng(&config, &mut rng).unwrap())
        })
    });

    g.finish();
}

criterion_group!(benches, analyze_normal, analyze_bootstrap_heavy, compare_candidates);
criterion_main!(benches);
