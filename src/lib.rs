//! # distfit
//!
//! Distribution fitting and statistical analysis on in-memory samples of
//! `f64`. Given a sample and one of twelve supported distribution kinds,
//! the engine estimates (or accepts) parameters, then derives descriptive
//! statistics, confidence intervals, goodness-of-fit tests, hypothesis
//! tests, and an ordered report ready for rendering.
//!
//! ## Quick start
//!
//! ```
//! use distfit::{analyze, AnalysisConfig, Kind};
//!
//! let config = AnalysisConfig::new(
//!     Kind::Normal,
//!     vec![23.0, 25.0, 28.0, 22.0, 30.0, 27.0, 24.0, 26.0, 29.0, 21.0],
//! );
//! let analysis = analyze(&config).unwrap();
//!
//! assert!((analysis.statistics.mean - 25.5).abs() < 1e-12);
//! assert_eq!(analysis.fit.params.len(), 2);
//! assert!(!analysis.report.rows.is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`special`] — Special-function kernel: gamma and log-gamma (Lanczos
//!   approximation), beta, the lower incomplete gamma series, and the
//!   regularized incomplete beta continued fraction. Every distribution
//!   CDF without a closed form reduces to these.
//!
//! - [`dist`] — Per-distribution density, cumulative, and quantile
//!   functions for Normal, Student's t, chi-squared, Fisher's F,
//!   Exponential, Gamma, Beta, Uniform, Bernoulli, Binomial, Poisson, and
//!   Geometric. Quantiles without closed forms use Newton-Raphson or
//!   bisection and expose their convergence status.
//!
//! - [`model`] — The closed [`Kind`] enumeration with per-kind parameter
//!   metadata and method-of-moments estimators, plus [`Model`] (a kind
//!   bound to concrete parameters) and [`fit`](model::fit) which derives
//!   log-likelihood, AIC, and BIC.
//!
//! - [`describe`] — Descriptive statistics: moments, quartiles,
//!   percentiles, bias-corrected skewness and excess kurtosis.
//!
//! - [`analysis`] — The fit engine: one linear pipeline per
//!   [`analyze`] call producing confidence intervals (analytic or
//!   bootstrap), goodness-of-fit tests (KS, Anderson-Darling, chi-square
//!   binning, Shapiro-Wilk), hypothesis tests, candidate comparison, and
//!   target-value analysis.
//!
//! - [`report`] — Assembles the analysis artifacts into an ordered table
//!   of typed cells for external renderers. No computation happens here.
//!
//! ## Error model
//!
//! Domain violations (unknown kind, sample outside a distribution's
//! support, degenerate samples) surface as [`AnalysisError`] values.
//! Iterative solvers never fail: on hitting their iteration cap they log a
//! warning through `tracing` and return the best current iterate, with
//! convergence status available through the `quantile_with_status` path.

pub mod analysis;
pub mod describe;
pub mod dist;
pub mod model;
pub mod report;
pub mod special;

pub use analysis::{
    analyze, analyze_with_rng, Analysis, AnalysisConfig, AnalysisError, HypothesisTest,
    Significance,
};
pub use describe::Summary;
pub use dist::Distribution;
pub use model::{fit, FittedModel, Kind, Model, ModelError};
pub use report::{Cell, CellKind, Report};
