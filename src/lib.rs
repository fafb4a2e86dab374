//! Testcharts - summarize software-testing metrics as charts
//!
//! Testcharts takes one test run's numbers (execution outcomes, open defects
//! by severity and pass rate per module) and turns them into display-ready
//! statistics, PNG charts and a summary report.
//!
//! # Overview
//!
//! A [`Dataset`] is built once, either from the built-in sample or from a
//! TOML/JSON file, and validated. [`AnalyticsSummary::compute`] derives
//! everything shown to the reader from it: percentages, defect totals,
//! performance tiers, best and worst module. The [`chart`] and [`report`]
//! modules only ever read that summary.
//!
//! # Quick Start
//!
//! ```no_run
//! use testcharts::{chart, AnalyticsSummary, Dataset};
//!
//! let dataset = Dataset::sample();
//! let summary = AnalyticsSummary::compute(&dataset)?;
//!
//! println!("Pass rate: {:.1}%", summary.pass_rate());
//! println!("Best module: {}", summary.modules.best.name);
//!
//! let options = chart::RenderOptions::new().with_output_dir("charts");
//! chart::render_all(&chart::ChartKind::ALL, &summary, &options, |_, _| {})?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Performance Tiers
//!
//! | Pass rate | Tier |
//! |-----------|------|
//! | ≥ 90% | Excellent |
//! | 80-89% | Good |
//! | 70-79% | Acceptable |
//! | < 70% | Needs Improvement |
//!
//! # Modules
//!
//! - [`dataset`]: Input data model, sample data, file loading and validation
//! - [`analytics`]: Percentages, tiers, best/worst module and the derived summary
//! - [`palette`]: Colours for every chart element
//! - [`chart`]: PNG rendering of the three charts
//! - [`report`]: Output formatters (text, JSON, CSV)

pub mod analytics;
pub mod chart;
pub mod dataset;
pub mod error;
pub mod palette;
pub mod report;

pub use analytics::{
    best_module, classify_pass_rate, percentage, total_defects, worst_module, AnalyticsSummary,
    ColorClass,
};
pub use dataset::{Dataset, DefectSeverityBucket, ModulePassRate, Severity, TestExecutionCounts};
pub use error::{Error, Result};

#[cfg(test)]
mod tests {
    use super::*;

    // ==========================================================================
    // PUBLIC API TESTS
    // ==========================================================================
    //
    // These tests verify the public API surface is re-exported from the root.
    // ==========================================================================

    #[test]
    fn test_public_exports() {
        let _: ColorClass = classify_pass_rate(75.0);
        let _: Severity = Severity::Medium;
        assert_eq!(percentage(1, 2).unwrap(), 50.0);
    }

    #[test]
    fn test_sample_summary_end_to_end() {
        let dataset = Dataset::sample();
        let summary = AnalyticsSummary::compute(&dataset).unwrap();

        assert_eq!(summary.modules.best.name, best_module(&dataset.modules).unwrap().name);
        assert_eq!(summary.modules.worst.name, worst_module(&dataset.modules).unwrap().name);
        assert_eq!(summary.defects.total_defects, total_defects(&dataset.defects));
    }

    #[test]
    fn test_error_is_reexported() {
        let err: Error = Error::invalid("x");
        let _: Result<()> = Err(err);
    }
}
