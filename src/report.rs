//! Report assembly: a pure structural mapping of analysis artifacts into
//! an ordered table of typed cells.
//!
//! No computation happens here. The row order and cell content decide
//! which artifacts are published to the user, so the tests pin every
//! section down: each computed artifact appears exactly once.

use serde::Serialize;

use crate::analysis::{
    Comparison, ConfidenceInterval, GofTest, GoodnessOfFit, HypothesisOutcome, ParameterInterval,
    TargetAnalysis,
};
use crate::describe::Summary;
use crate::model::FittedModel;

/// Every row is padded to this many cells.
pub const ROW_WIDTH: usize = 4;

/// Rendering role of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    /// Report title.
    Header,
    /// Section divider.
    Section,
    /// Name of the value in the adjacent result cell.
    Label,
    /// A computed value.
    Result,
    /// The formula behind a result.
    Formula,
    /// Free-form supporting content.
    Data,
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Rendered text.
    pub value: String,
    /// Rendering role.
    #[serde(rename = "type")]
    pub kind: CellKind,
}

impl Cell {
    fn new(value: impl Into<String>, kind: CellKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }
}

/// The assembled report: ordered rows of fixed width.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Rows in publication order, each [`ROW_WIDTH`] cells.
    pub rows: Vec<Vec<Cell>>,
}

impl Report {
    /// All rows whose first cell is a section divider.
    pub fn section_titles(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.first().map(|c| c.kind) == Some(CellKind::Section))
            .map(|row| row[0].value.as_str())
            .collect()
    }
}

struct Builder {
    rows: Vec<Vec<Cell>>,
}

impl Builder {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn push(&mut self, mut cells: Vec<Cell>) {
        while cells.len() < ROW_WIDTH {
            cells.push(Cell::new("", CellKind::Data));
        }
        cells.truncate(ROW_WIDTH);
        self.rows.push(cells);
    }

    fn header(&mut self, title: String) {
        self.push(vec![Cell::new(title, CellKind::Header)]);
    }

    fn section(&mut self, title: &str) {
        self.push(vec![Cell::new(title, CellKind::Section)]);
    }

    fn result(&mut self, label: &str, value: String) {
        self.push(vec![
            Cell::new(label, CellKind::Label),
            Cell::new(value, CellKind::Result),
        ]);
    }

    fn result_with_formula(&mut self, label: &str, value: String, formula: &str) {
        self.push(vec![
            Cell::new(label, CellKind::Label),
            Cell::new(value, CellKind::Result),
            Cell::new(formula, CellKind::Formula),
        ]);
    }

    fn note(&mut self, text: String) {
        self.push(vec![Cell::new(text, CellKind::Data)]);
    }
}

fn num(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "∞".to_string() } else { "−∞".to_string() }
    } else if v == v.trunc() && v.abs() < 1e12 {
        format!("{v}")
    } else {
        format!("{v:.4}")
    }
}

fn interval(ci: &ConfidenceInterval) -> String {
    format!("[{}, {}]", num(ci.lower), num(ci.upper))
}

fn gof_row(b: &mut Builder, test: &GofTest) {
    if test.statistic.is_nan() {
        b.push(vec![
            Cell::new(test.name, CellKind::Label),
            Cell::new(
                test.note.clone().unwrap_or_else(|| "not applicable".to_string()),
                CellKind::Data,
            ),
        ]);
        return;
    }
    b.push(vec![
        Cell::new(test.name, CellKind::Label),
        Cell::new(num(test.statistic), CellKind::Result),
        Cell::new(format!("p = {}", num(test.p_value)), CellKind::Result),
        Cell::new(
            if test.reject_at_5pct {
                "reject at 0.05"
            } else {
                "no rejection at 0.05"
            },
            CellKind::Data,
        ),
    ]);
    if let Some(note) = &test.note {
        b.note(note.clone());
    }
}

/// Assemble the report from the pipeline's artifacts.
#[allow(clippy::too_many_arguments)]
pub(crate) fn assemble(
    statistics: &Summary,
    fitted: &FittedModel,
    value_intervals: &[ConfidenceInterval],
    parameter_intervals: &[ParameterInterval],
    gof: &GoodnessOfFit,
    hypothesis: Option<&HypothesisOutcome>,
    comparison: Option<&Comparison>,
    target: Option<&TargetAnalysis>,
) -> Report {
    let mut b = Builder::new();
    b.header(format!(
        "{} DISTRIBUTION ANALYSIS",
        fitted.kind.display_name().to_uppercase()
    ));

    // -- Descriptive statistics ------------------------------------------
    b.section("DESCRIPTIVE STATISTICS");
    b.result("Sample Size (n)", format!("{}", statistics.n));
    b.result("Sum", num(statistics.sum));
    b.result("Mean", num(statistics.mean));
    b.result("Variance", num(statistics.variance));
    b.result("Standard Deviation", num(statistics.std_dev));
    b.result("Minimum", num(statistics.min));
    b.result("Maximum", num(statistics.max));
    b.result("Range", num(statistics.range));
    b.result("Median", num(statistics.median));
    b.result("Q1", num(statistics.q1));
    b.result("Q3", num(statistics.q3));
    b.result("IQR", num(statistics.iqr));
    b.result("Skewness", num(statistics.skewness));
    b.result("Kurtosis (excess)", num(statistics.kurtosis));
    for &(level, value) in &statistics.percentiles {
        b.result(&format!("P{level:.0}"), num(value));
    }

    // -- Fit --------------------------------------------------------------
    b.section("DISTRIBUTION FIT");
    b.push(vec![
        Cell::new("Distribution", CellKind::Label),
        Cell::new(fitted.kind.display_name(), CellKind::Result),
        Cell::new(fitted.kind.use_cases(), CellKind::Data),
    ]);
    let origin = if fitted.estimated {
        "method of moments"
    } else {
        "supplied"
    };
    for (name, value) in fitted.kind.param_names().iter().zip(&fitted.params) {
        b.result_with_formula(name, num(*value), origin);
    }
    b.result("Log-Likelihood", num(fitted.log_likelihood));
    b.result_with_formula("AIC", num(fitted.aic), "2k − 2·ln L");
    b.result_with_formula("BIC", num(fitted.bic), "k·ln n − 2·ln L");

    // -- Value-space intervals --------------------------------------------
    b.section("CONFIDENCE INTERVALS");
    for ci in value_intervals {
        b.push(vec![
            Cell::new(format!("{:.0}% Interval", 100.0 * ci.level), CellKind::Label),
            Cell::new(interval(ci), CellKind::Result),
            Cell::new(format!("width {}", num(ci.width)), CellKind::Data),
        ]);
    }

    // -- Parameter intervals ----------------------------------------------
    b.section("PARAMETER CONFIDENCE INTERVALS");
    for pi in parameter_intervals {
        let method = match pi.method {
            crate::analysis::CiMethod::Analytic => "analytic",
            crate::analysis::CiMethod::Bootstrap => "bootstrap percentile",
        };
        b.push(vec![
            Cell::new(pi.name, CellKind::Label),
            Cell::new(num(pi.estimate), CellKind::Result),
            Cell::new(format!("SE {}", num(pi.std_error)), CellKind::Result),
            Cell::new(method, CellKind::Data),
        ]);
        for ci in &pi.intervals {
            b.push(vec![
                Cell::new(format!("  {:.0}%", 100.0 * ci.level), CellKind::Label),
                Cell::new(interval(ci), CellKind::Result),
            ]);
        }
    }

    // -- Goodness of fit --------------------------------------------------
    b.section("GOODNESS OF FIT");
    gof_row(&mut b, &gof.ks);
    gof_row(&mut b, &gof.anderson_darling);
    gof_row(&mut b, &gof.chi_square);
    gof_row(&mut b, &gof.shapiro_wilk);

    // -- Hypothesis test --------------------------------------------------
    if let Some(h) = hypothesis {
        b.section("HYPOTHESIS TEST");
        b.result("Test", h.test.to_string());
        b.result("Statistic", num(h.statistic));
        b.result("P-Value", num(h.p_value));
        if let Some(df) = h.df {
            b.result("Degrees of Freedom", num(df));
        }
        b.result(
            "Decision",
            if h.reject { "reject H0" } else { "fail to reject H0" }.to_string(),
        );
        b.note(h.conclusion.clone());
    }

    // -- Comparison -------------------------------------------------------
    if let Some(c) = comparison {
        b.section("DISTRIBUTION COMPARISON");
        for candidate in &c.candidates {
            b.push(vec![
                Cell::new(
                    format!("#{} {}", candidate.rank, candidate.kind.display_name()),
                    CellKind::Label,
                ),
                Cell::new(format!("AIC {}", num(candidate.aic)), CellKind::Result),
                Cell::new(format!("ΔAIC {}", num(candidate.delta_aic)), CellKind::Result),
                Cell::new(format!("KS p = {}", num(candidate.ks_p_value)), CellKind::Data),
            ]);
        }
        b.note(c.recommendation.clone());
    }

    // -- Target analysis --------------------------------------------------
    if let Some(t) = target {
        b.section("TARGET ANALYSIS");
        b.result("Target Value", num(t.target));
        b.result("P(X ≤ target)", num(t.prob_less));
        b.result("P(X > target)", num(t.prob_greater));
        b.result_with_formula("Effect Size", num(t.effect_size), t.effect_label);
        b.result(
            "Practical Significance",
            format!("{:?}", t.significance).to_lowercase(),
        );
        b.note(t.recommendation.clone());
    }

    Report { rows: b.rows }
}
