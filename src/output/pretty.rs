//! Human-readable colored text formatter.
//!
//! Shows which phases ran, every finding grouped under the phase that
//! reported it, and a one-line summary. Findings keep the `path:line:`
//! prefix so editors and terminals can jump to them.

use crate::finding::{Phase, ValidationReport};
use colored::Colorize;

/// Formats a [`ValidationReport`] as human-readable, ANSI-colored text.
///
/// Sections rendered (in order):
/// 1. **Header** with the registry root and timestamp.
/// 2. **Phases** with pass/fail/skip status for all five phases.
/// 3. **Findings** grouped by the phase that reported them.
/// 4. **Summary** with the overall result and counts.
pub fn format(report: &ValidationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{}\n",
        format!("  Registry Validation: {}  ", report.root)
            .bold()
            .on_blue()
            .white()
    ));
    out.push_str(&format!("  Timestamp: {}\n\n", report.validated_at));

    out.push_str(&format!("{}\n", "Phases".bold().underline()));
    for phase in Phase::ALL {
        let (icon, detail) = match report.phase(phase) {
            None => ("SKIP".dimmed().to_string(), "not run".dimmed().to_string()),
            Some(p) if p.is_clean() => ("PASS".green().bold().to_string(), String::new()),
            Some(p) => (
                "FAIL".red().bold().to_string(),
                format!("{} errors", p.findings.len()),
            ),
        };
        out.push_str(&format!(
            "  [{icon}] {name:<28} {detail}\n",
            name = phase.to_string(),
        ));
    }
    out.push('\n');

    for phase in report.phases.iter().filter(|p| !p.is_clean()) {
        out.push_str(&format!(
            "{}\n",
            format!("{} errors", phase.phase).bold().underline()
        ));
        for finding in &phase.findings {
            out.push_str(&format!(
                "  [{}] {}\n",
                finding.rule_id.dimmed(),
                finding
            ));
        }
        out.push('\n');
    }

    let status_str = if report.passed {
        "PASSED".green().bold().to_string()
    } else {
        "FAILED".red().bold().to_string()
    };
    out.push_str(&format!(
        "Result: {status_str}  |  {} errors, {} files, {} contributors, {} resources\n",
        report.finding_count(),
        report.files_scanned,
        report.contributors,
        report.resources,
    ));

    out
}
