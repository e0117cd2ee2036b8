//! JSON output formatter.
//!
//! Produces a pretty-printed JSON document with run metadata, a summary, and
//! the findings of every phase that ran.

use crate::finding::{Phase, PhaseReport, ValidationReport};

#[derive(serde::Serialize)]
struct JsonOutput<'a> {
    root: &'a str,
    validated_at: &'a str,
    passed: bool,
    failed_phase: Option<Phase>,
    summary: Summary,
    phases: &'a [PhaseReport],
}

#[derive(serde::Serialize)]
struct Summary {
    errors: usize,
    files: usize,
    contributors: usize,
    resources: usize,
}

/// Formats a [`ValidationReport`] as pretty-printed JSON.
///
/// # Panics
///
/// Panics if the report cannot be serialized (should not happen with valid data).
pub fn format(report: &ValidationReport) -> String {
    let output = JsonOutput {
        root: &report.root,
        validated_at: &report.validated_at,
        passed: report.passed,
        failed_phase: report.failed_phase,
        summary: Summary {
            errors: report.finding_count(),
            files: report.files_scanned,
            contributors: report.contributors,
            resources: report.resources,
        },
        phases: &report.phases,
    };

    serde_json::to_string_pretty(&output).expect("JSON serialization failed")
}
