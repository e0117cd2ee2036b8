use oxidized_registry::document::DocumentKind;
use oxidized_registry::finding::Finding;
use oxidized_registry::validators::body::{validate_body, BodyRules};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check(body: &str) -> Vec<Finding> {
    validate_body(body, 1, BodyRules::default())
}

fn check_as(kind: DocumentKind, body: &str) -> Vec<Finding> {
    validate_body(body, 1, BodyRules::for_kind(kind))
}

fn ids(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.rule_id.as_str()).collect()
}

const MODULE_BODY: &str = r#"# tmux

Installs tmux in the workspace.

```tf
module "tmux" {
  source   = "registry.coder.com/alice/tmux/coder"
  version  = "1.0.0"
  agent_id = coder_agent.example.id
}
```

## Variables

| Name | Default |
|------|---------|
| `sessions` | `["default"]` |
"#;

// ---------------------------------------------------------------------------
// Leading h1
// ---------------------------------------------------------------------------

#[test]
fn empty_body_is_reported() {
    assert_eq!(ids(&check("  \n")), ["body/empty"]);
}

#[test]
fn body_must_open_with_h1_and_stops_otherwise() {
    for body in ["## Not an h1\n\n### deeper\n", "#Title\n", "Plain text\n# Title\n"] {
        assert_eq!(ids(&check(body)), ["body/missing-h1"], "{body:?}");
    }
}

#[test]
fn valid_bodies_have_no_findings() {
    let bodies = [
        "# Alice\n\nBio text.\n",
        "# T\n\ntext\n\n## A\n\n### B\n\n## C\n",
        "# T\n\n> [!NOTE]\n> Remember this.\n\nMore text.\n",
        "# T\n\n```sh\n# not a heading\n```\n",
        MODULE_BODY,
    ];
    for body in bodies {
        assert!(check(body).is_empty(), "{body:?}: {:?}", check(body));
    }
    assert!(check_as(DocumentKind::Module, MODULE_BODY).is_empty());
}

// ---------------------------------------------------------------------------
// Heading hierarchy
// ---------------------------------------------------------------------------

#[test]
fn skipped_level_is_reported_once_and_depth_is_not_mis_tracked() {
    let findings = check("# A\n\ntext\n\n### C\n\n## B\n\n### C2\n\n#### D\n");
    assert_eq!(ids(&findings), ["body/skipped-heading-level"]);
    assert_eq!(findings[0].line, Some(5));
}

#[test]
fn second_h1_is_fatal() {
    let findings = check("# A\n\ntext\n\n# B\n\n#### skipped but unreachable\n");
    assert_eq!(ids(&findings), ["body/multiple-h1"]);
    assert_eq!(findings[0].line, Some(5));
}

#[test]
fn headings_beyond_level_six_are_fatal() {
    let findings = check("# A\n\ntext\n\n####### seven\n\n#### unreachable\n");
    assert_eq!(ids(&findings), ["body/heading-too-deep"]);
}

#[test]
fn heading_without_space_is_not_fatal() {
    let findings = check("# A\n\ntext\n\n##Usage\n\n#### skip\n");
    assert_eq!(
        ids(&findings),
        ["body/heading-missing-space", "body/skipped-heading-level"]
    );
}

// ---------------------------------------------------------------------------
// Code fences
// ---------------------------------------------------------------------------

#[test]
fn odd_number_of_fences_is_unterminated() {
    for fences in 1..=7 {
        let mut body = String::from("# T\n\ntext\n");
        for i in 0..fences {
            body.push_str(&format!("```\nline {i}\n"));
        }
        let unterminated = ids(&check(&body)).contains(&"body/unterminated-code-block");
        assert_eq!(unterminated, fences % 2 == 1, "{fences} fences");
    }
}

#[test]
fn unterminated_block_points_at_its_opening_fence() {
    let findings = check("# T\n\ntext\n\n```sh\necho hi\n");
    assert_eq!(findings[0].line, Some(5));
}

#[test]
fn hcl_fence_is_always_reported() {
    let body = "# T\n\ntext\n\n## Example\n\n```hcl\nresource \"x\" \"y\" {}\n```\n";
    assert_eq!(ids(&check(body)), ["body/hcl-language"]);
}

// ---------------------------------------------------------------------------
// First-section evidence
// ---------------------------------------------------------------------------

#[test]
fn images_and_html_are_not_paragraphs() {
    let body = "# T\n\n![logo](./logo.png)\n<div align=\"center\"></div>\n\n## Details\n\nText.\n";
    assert_eq!(
        ids(&check_as(DocumentKind::Template, body)),
        ["body/missing-paragraph"]
    );
    assert!(check(body).is_empty());
}

#[test]
fn module_needs_a_terraform_block_in_the_h1_section() {
    let body = "# T\n\ntext\n\n## Usage\n\n```tf\nmodule \"x\" {\n  version = \"1.0.0\"\n}\n```\n";
    assert_eq!(
        ids(&check_as(DocumentKind::Module, body)),
        ["body/missing-terraform-block"]
    );
}

#[test]
fn module_cannot_have_two_terraform_blocks() {
    let body = "# T\n\ntext\n\n```tf\nversion = \"1\"\n```\n\n```tf\nversion = \"2\"\n```\n";
    assert_eq!(
        ids(&check_as(DocumentKind::Module, body)),
        ["body/multiple-terraform-blocks"]
    );
}

#[test]
fn module_block_must_pin_a_version() {
    let body = "# T\n\ntext\n\n```tf\nmodule \"x\" {\n  source = \"y\"\n}\n```\n";
    assert_eq!(
        ids(&check_as(DocumentKind::Module, body)),
        ["body/missing-terraform-version"]
    );
}

#[test]
fn hcl_block_does_not_satisfy_module_requirement() {
    let body = "# T\n\ntext\n\n```hcl\nversion = \"1\"\n```\n";
    assert_eq!(
        ids(&check_as(DocumentKind::Module, body)),
        ["body/hcl-language", "body/missing-terraform-block"]
    );
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[test]
fn nested_alert_reports_only_the_nesting() {
    let findings = check("# T\n\ntext\n\n> [!NOTE]\n> [!NOTE]\n> content\n");
    assert_eq!(ids(&findings), ["alert/nested"]);
    assert_eq!(findings[0].line, Some(6));
}

#[test]
fn nested_alert_skips_checks_on_the_inner_line() {
    let findings = check("# T\n\ntext\n\n> [!NOTE]\n>  [!danger] trailing\n> content\n");
    assert_eq!(ids(&findings), ["alert/nested"]);
}

#[test]
fn non_quote_line_ends_an_alert() {
    let body = "# T\n\ntext\n\n> [!NOTE]\n> first\n\n> [!TIP]\n> second\n";
    assert!(check(body).is_empty());
}

#[test]
fn alert_header_rules() {
    let cases = [
        (">  [!NOTE]\n> x\n", "alert/spacing"),
        (">[!NOTE]\n> x\n", "alert/spacing"),
        ("> [!note]\n> x\n", "alert/lowercase-type"),
        ("> [!DANGER]\n> x\n", "alert/unknown-type"),
        ("> [!NOTE] inline text\n> x\n", "alert/trailing-content"),
        ("> [!NOTE\n> x\n", "alert/malformed-header"),
    ];
    for (alert, expected) in cases {
        let body = format!("# T\n\ntext\n\n{alert}");
        assert_eq!(ids(&check(&body)), [expected], "{alert:?}");
    }
}

#[test]
fn alert_header_on_the_last_line_is_unterminated() {
    let findings = check("# T\n\ntext\n\n> [!WARNING]\n");
    assert_eq!(ids(&findings), ["alert/unterminated"]);
}

// ---------------------------------------------------------------------------
// General properties
// ---------------------------------------------------------------------------

#[test]
fn validation_is_idempotent() {
    let body = "# T\n\n### skip\n\n```hcl\nx\n```\n\n> [!note]\n> [!TIP]\n\n```\n";
    let first = check_as(DocumentKind::Module, body);
    let second = check_as(DocumentKind::Module, body);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn line_numbers_are_offset_by_body_start() {
    let findings = validate_body("# T\n\ntext\n\n### skip\n", 20, BodyRules::default());
    assert_eq!(findings[0].line, Some(24));
}
