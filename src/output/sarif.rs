use crate::finding::{Finding, ValidationReport};
use crate::validators::find_rule;
use serde_sarif::sarif::{
    ArtifactLocation, Location, Message, MultiformatMessageString, PhysicalLocation, Region,
    ReportingDescriptor, Result as SarifResult, ResultLevel, Run, Sarif, Tool, ToolComponent,
};
use std::collections::{BTreeSet, HashMap};

/// Formats a [`ValidationReport`] as SARIF 2.1.0.
///
/// Every finding is reported at `error` level. The rule table only lists
/// rules that produced at least one result.
pub fn format(report: &ValidationReport) -> String {
    let findings: Vec<&Finding> = report.findings().collect();

    let rule_ids: Vec<&str> = findings
        .iter()
        .map(|f| f.rule_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let rule_index: HashMap<&str, i64> = rule_ids
        .iter()
        .enumerate()
        .map(|(i, id)| (*id, i as i64))
        .collect();

    let rules: Vec<ReportingDescriptor> = rule_ids
        .iter()
        .map(|id| {
            let mut rule = ReportingDescriptor::builder().id(id.to_string()).build();
            if let Some(info) = find_rule(id) {
                rule.short_description = Some(
                    MultiformatMessageString::builder()
                        .text(info.message.to_string())
                        .build(),
                );
                rule.help = Some(
                    MultiformatMessageString::builder()
                        .text(info.remediation.to_string())
                        .build(),
                );
            }
            rule
        })
        .collect();

    let results: Vec<SarifResult> = findings
        .iter()
        .map(|f| {
            let mut result = SarifResult::builder()
                .message(Message::builder().text(f.message.clone()).build())
                .build();

            result.rule_id = Some(f.rule_id.clone());
            result.level = Some(ResultLevel::Error);
            result.rule_index = rule_index.get(f.rule_id.as_str()).copied();

            if let Some(ref file) = f.file {
                let uri = file.to_string_lossy().replace('\\', "/");

                let mut location = Location::builder().build();
                let mut physical = PhysicalLocation::builder().build();

                physical.artifact_location = Some(ArtifactLocation::builder().uri(uri).build());

                if let Some(line) = f.line {
                    physical.region = Some(Region::builder().start_line(line as i64).build());
                }

                location.physical_location = Some(physical);
                result.locations = Some(vec![location]);
            }

            result
        })
        .collect();

    let driver = ToolComponent::builder()
        .name("oxidized-registry")
        .version(env!("CARGO_PKG_VERSION").to_string())
        .rules(rules)
        .build();

    let tool = Tool::builder().driver(driver).build();

    let run = Run::builder().tool(tool).results(results).build();

    let sarif = Sarif::builder().version("2.1.0").runs(vec![run]).build();

    serde_json::to_string_pretty(&sarif).expect("SARIF serialization failed")
}
