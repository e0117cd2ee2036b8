use oxidized_registry::config::Config;
use oxidized_registry::finding::ValidationReport;
use oxidized_registry::output;
use oxidized_registry::output::OutputFormat;
use oxidized_registry::pipeline;

fn report_for(fixture: &str) -> ValidationReport {
    let mut config = Config::default();
    config.registry.root = format!("tests/fixtures/{fixture}/registry").into();
    config.registry.icons_dir = format!("tests/fixtures/{fixture}/.icons").into();
    pipeline::run_validation(&config).expect("fixture registry should be readable")
}

#[test]
fn json_output_is_valid() {
    let report = report_for("invalid");
    let json = output::format_report(&report, &OutputFormat::Json);

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON should be valid");
    assert!(parsed["root"].is_string());
    assert!(parsed["phases"].is_array());
    assert_eq!(parsed["summary"]["errors"], 1);
    assert_eq!(parsed["failed_phase"], "cross-reference");
    assert!(!parsed["passed"].as_bool().unwrap());
}

#[test]
fn json_findings_carry_rule_ids() {
    let report = report_for("invalid");
    let json = output::format_report(&report, &OutputFormat::Json);

    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let phases = parsed["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 5);
    let last = phases.last().unwrap();
    assert_eq!(last["phase"], "cross-reference");
    assert_eq!(last["findings"][0]["rule_id"], "crossref/missing-employer");
}

#[test]
fn json_valid_registry_passes() {
    let report = report_for("valid");
    let json = output::format_report(&report, &OutputFormat::Json);

    let parsed: serde_json::Value = serde_json::from_str(&json).expect("JSON should be valid");
    assert!(parsed["passed"].as_bool().unwrap());
    assert!(parsed["failed_phase"].is_null());
    assert_eq!(parsed["summary"]["contributors"], 2);
    assert_eq!(parsed["summary"]["resources"], 2);
    assert_eq!(parsed["summary"]["files"], 4);
}

#[test]
fn sarif_output_is_valid() {
    let report = report_for("invalid");
    let sarif = output::format_report(&report, &OutputFormat::Sarif);

    let parsed: serde_json::Value =
        serde_json::from_str(&sarif).expect("SARIF JSON should be valid");
    assert_eq!(parsed["version"], "2.1.0");
    assert!(parsed["runs"].is_array());
    assert!(parsed["runs"][0]["tool"]["driver"]["name"] == "oxidized-registry");
    let results = parsed["runs"][0]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["ruleId"], "crossref/missing-employer");
    assert_eq!(results[0]["level"], "error");
}

#[test]
fn sarif_valid_registry_has_no_results() {
    let report = report_for("valid");
    let sarif = output::format_report(&report, &OutputFormat::Sarif);

    let parsed: serde_json::Value = serde_json::from_str(&sarif).unwrap();
    assert!(parsed["runs"][0]["results"].as_array().unwrap().is_empty());
}

#[test]
fn pretty_output_contains_findings() {
    colored::control::set_override(false);
    let report = report_for("invalid");
    let pretty = output::format_report(&report, &OutputFormat::Pretty);

    assert!(pretty.contains("Registry Validation"));
    assert!(pretty.contains("FAILED"));
    assert!(pretty.contains("Cross-referencing errors"));
    assert!(pretty.contains("ghost-co"));
}

#[test]
fn pretty_output_valid_registry_passes() {
    colored::control::set_override(false);
    let report = report_for("valid");
    let pretty = output::format_report(&report, &OutputFormat::Pretty);

    assert!(pretty.contains("PASSED"));
    assert!(pretty.contains("README parsing"));
    assert!(!pretty.contains("SKIP"));
}

#[test]
fn every_format_reports_the_failing_phase_finding() {
    colored::control::set_override(false);
    let report = report_for("invalid");
    for format in [OutputFormat::Pretty, OutputFormat::Json, OutputFormat::Sarif] {
        let text = output::format_report(&report, &format);
        assert!(text.contains("crossref/missing-employer"), "{format:?}");
        assert!(text.contains("ghost-co"), "{format:?}");
    }
}
