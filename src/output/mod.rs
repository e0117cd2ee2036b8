//! Rendering of a finished [`ValidationReport`].
//!
//! Every format carries the same information: which phases ran, the phase
//! that stopped the run if any, and the findings of each phase that ran.
//! Only the presentation differs.
//!
//! The pretty renderer groups findings under a heading per phase. JSON keeps
//! the phase nesting. SARIF has no notion of phases and gets one flat result
//! list.

pub mod json;
pub mod pretty;
pub mod sarif;

use crate::finding::ValidationReport;

/// How `validate` prints its report, selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Colored text: phase table, findings per failing phase, summary line.
    Pretty,
    /// The report as pretty-printed JSON, phases and findings nested.
    Json,
    /// [SARIF 2.1.0](https://sarifweb.azurewebsites.net/), one error-level result per finding.
    Sarif,
}

/// Renders `report` as `format`.
///
/// # Examples
///
/// ```rust,no_run
/// use oxidized_registry::{config::Config, output, pipeline};
///
/// let report = pipeline::run_validation(&Config::default()).unwrap();
/// if let Some(phase) = report.failed_phase {
///     eprintln!("stopped at {phase}");
/// }
/// print!("{}", output::format_report(&report, &output::OutputFormat::Sarif));
/// ```
pub fn format_report(report: &ValidationReport, format: &OutputFormat) -> String {
    match format {
        OutputFormat::Pretty => pretty::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::Sarif => sarif::format(report),
    }
}
