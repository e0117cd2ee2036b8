//! README body validator.
//!
//! Bodies are rendered by the registry site in a fixed layout, so they must
//! stick to a constrained subset of GitHub-flavored markdown. Validation is a
//! single pass over the lines with a small amount of state:
//!
//! | State | Meaning |
//! |-------|---------|
//! | `header_level` | depth of the last accepted heading |
//! | `in_code_block` / `code_lang` | inside a fenced block, and its language tag |
//! | `in_first_section` | still inside the h1 section (no second heading seen) |
//! | `found_paragraph`, `terraform_blocks`, `found_version` | evidence gathered in the h1 section |
//! | `in_alert` | inside a `> [!TYPE]` alert quote |
//!
//! Every problem is collected. Only two conditions stop the scan: a body
//! that does not open with an h1, and a heading that cannot be placed in the
//! hierarchy at all (a second h1, or depth beyond 6).
//!
//! Code blocks are skipped for heading detection because Terraform and shell
//! both use `#` for comments.

use super::{RuleInfo, SUPPORTED_ALERT_TYPES};
use crate::document::DocumentKind;
use crate::finding::{Finding, Phase};
use regex::Regex;
use std::sync::LazyLock;

const CODE_FENCE: &str = "```";

/// Language tag required for Terraform snippets.
const TERRAFORM_LANG: &str = "tf";

/// Deprecated tag that must be rewritten to [`TERRAFORM_LANG`].
const DEPRECATED_TERRAFORM_LANG: &str = "hcl";

static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#+)(\s*)").unwrap());

/// A `version = "..."` pin inside a Terraform module block.
static RE_TERRAFORM_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\bversion\s+=").unwrap());

/// `> [!TYPE] trailing`, with the spacing, keyword, and remainder captured.
static RE_ALERT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>(\s*)\[!([A-Za-z]+)\](.*)$").unwrap());

/// Anything that starts out like an alert header.
static RE_ALERT_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^>\s*\[!").unwrap());

/// Which section-level requirements apply on top of the structural checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BodyRules {
    /// The h1 section must contain at least one paragraph line.
    pub require_paragraph: bool,
    /// The h1 section must contain exactly one `tf` block with a version pin.
    pub require_terraform_block: bool,
}

impl BodyRules {
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Contributor => BodyRules::default(),
            DocumentKind::Template => BodyRules {
                require_paragraph: true,
                require_terraform_block: false,
            },
            DocumentKind::Module => BodyRules {
                require_paragraph: true,
                require_terraform_block: true,
            },
        }
    }
}

enum Flow {
    Continue,
    Halt,
}

struct BodyScanner {
    rules: BodyRules,
    first_line: usize,
    findings: Vec<Finding>,

    header_level: usize,
    in_first_section: bool,

    in_code_block: bool,
    code_lang: String,
    code_block_opened_at: usize,

    found_paragraph: bool,
    terraform_blocks: usize,
    found_version: bool,

    in_alert: bool,
    alert_opened_at: Option<usize>,
}

impl BodyScanner {
    fn new(rules: BodyRules, first_line: usize) -> Self {
        BodyScanner {
            rules,
            first_line,
            findings: Vec::new(),
            header_level: 0,
            in_first_section: true,
            in_code_block: false,
            code_lang: String::new(),
            code_block_opened_at: 0,
            found_paragraph: false,
            terraform_blocks: 0,
            found_version: false,
            in_alert: false,
            alert_opened_at: None,
        }
    }

    fn emit(&mut self, rule_id: &str, message: impl Into<String>, idx: usize) {
        self.findings
            .push(Finding::new(rule_id, message).at_line(Some(self.first_line + idx)));
    }

    fn run(mut self, body: &str) -> Vec<Finding> {
        let mut halted = false;
        let mut last_idx = 0;

        for (idx, line) in body.lines().enumerate() {
            last_idx = idx;

            // Line 1 was already confirmed to be "# ..." by the caller.
            if idx == 0 {
                self.header_level = 1;
                continue;
            }

            if line.starts_with(CODE_FENCE) {
                self.in_alert = false;
                self.toggle_fence(line, idx);
                continue;
            }

            if self.in_code_block {
                if self.in_first_section
                    && self.code_lang == TERRAFORM_LANG
                    && RE_TERRAFORM_VERSION.is_match(line)
                {
                    self.found_version = true;
                }
                continue;
            }

            self.check_alert(line, idx);

            if let Some(caps) = RE_HEADER.captures(line) {
                let level = caps[1].len();
                let has_space = !caps[2].is_empty();
                match self.heading(level, has_space, idx) {
                    Flow::Continue => continue,
                    Flow::Halt => {
                        halted = true;
                        break;
                    }
                }
            }

            if self.in_first_section {
                let trimmed = line.trim();
                let is_paragraph =
                    !trimmed.is_empty() && !trimmed.starts_with("![") && !trimmed.starts_with('<');
                self.found_paragraph |= is_paragraph;
            }
        }

        self.finish(halted, last_idx);
        self.findings
    }

    fn toggle_fence(&mut self, line: &str, idx: usize) {
        if self.in_code_block {
            self.in_code_block = false;
            self.code_lang.clear();
            return;
        }

        self.in_code_block = true;
        self.code_block_opened_at = idx;
        self.code_lang = line[CODE_FENCE.len()..]
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_string();

        if self.code_lang == DEPRECATED_TERRAFORM_LANG {
            self.emit(
                "body/hcl-language",
                "all .hcl language references must be converted to .tf",
                idx,
            );
        }
        if self.in_first_section && self.code_lang == TERRAFORM_LANG {
            self.terraform_blocks += 1;
        }
    }

    fn heading(&mut self, level: usize, has_space: bool, idx: usize) -> Flow {
        if !has_space {
            self.emit(
                "body/heading-missing-space",
                "header does not have space between header characters and main header text",
                idx,
            );
        }

        // Any heading after the h1 ends the h1 section.
        self.in_first_section = false;

        if level == 1 {
            self.emit(
                "body/multiple-h1",
                "READMEs cannot contain more than one h1 header",
                idx,
            );
            return Flow::Halt;
        }
        if level > 6 {
            self.emit(
                "body/heading-too-deep",
                format!("README/HTML files cannot have headers exceed level 6 (found level {level})"),
                idx,
            );
            return Flow::Halt;
        }

        // Leave the level untouched on a skip so one bad heading does not
        // cascade into errors on every heading after it.
        if level > self.header_level && level != self.header_level + 1 {
            self.emit(
                "body/skipped-heading-level",
                format!(
                    "headers are not allowed to increase more than 1 level at a time (h{} followed by h{level})",
                    self.header_level
                ),
                idx,
            );
            return Flow::Continue;
        }

        self.header_level = level;
        Flow::Continue
    }

    fn check_alert(&mut self, line: &str, idx: usize) {
        if self.in_alert && !line.starts_with("> ") {
            self.in_alert = false;
        }

        let Some(caps) = RE_ALERT.captures(line) else {
            if RE_ALERT_OPEN.is_match(line) {
                self.emit(
                    "alert/malformed-header",
                    format!("alert header {line:?} is incomplete; expected `> [!TYPE]`"),
                    idx,
                );
            }
            return;
        };

        if self.in_alert {
            self.emit(
                "alert/nested",
                "alert blocks cannot be nested inside another alert block",
                idx,
            );
            return;
        }
        self.in_alert = true;
        self.alert_opened_at = Some(idx);

        if &caps[1] != " " {
            self.emit(
                "alert/spacing",
                "alert header must have exactly one space between `>` and `[`",
                idx,
            );
        }

        let keyword = &caps[2];
        let upper = keyword.to_ascii_uppercase();
        if !SUPPORTED_ALERT_TYPES.contains(&upper.as_str()) {
            self.emit(
                "alert/unknown-type",
                format!(
                    "alert type {keyword:?} is not supported; expected one of [{}]",
                    SUPPORTED_ALERT_TYPES.join(", ")
                ),
                idx,
            );
        } else if keyword != upper {
            self.emit(
                "alert/lowercase-type",
                format!("alert type {keyword:?} must be written in upper case ({upper:?})"),
                idx,
            );
        }

        if !caps[3].trim().is_empty() {
            self.emit(
                "alert/trailing-content",
                "alert header cannot have content on the same line after the closing bracket",
                idx,
            );
        }
    }

    fn finish(&mut self, halted: bool, last_idx: usize) {
        if self.rules.require_terraform_block {
            let blocks = self.terraform_blocks;
            match blocks {
                0 => self.emit_unlocated(
                    "body/missing-terraform-block",
                    "did not find Terraform code block within h1 section",
                ),
                1 if !self.found_version => self.emit_unlocated(
                    "body/missing-terraform-version",
                    "did not find Terraform code block that specifies 'version' field",
                ),
                1 => {}
                _ => self.emit_unlocated(
                    "body/multiple-terraform-blocks",
                    "cannot have more than one Terraform code block in h1 section",
                ),
            }
        }
        if self.rules.require_paragraph && !self.found_paragraph {
            self.emit_unlocated(
                "body/missing-paragraph",
                "did not find paragraph within h1 section",
            );
        }
        if halted {
            return;
        }
        if self.in_code_block {
            self.emit(
                "body/unterminated-code-block",
                "code block is never closed before end of file",
                self.code_block_opened_at,
            );
        }
        if self.in_alert && self.alert_opened_at == Some(last_idx) {
            self.emit(
                "alert/unterminated",
                "alert header is the last line of the README and has no content",
                last_idx,
            );
        }
    }

    fn emit_unlocated(&mut self, rule_id: &str, message: &str) {
        self.findings.push(Finding::new(rule_id, message));
    }
}

/// Validates a README body, returning every violation found.
///
/// `first_line` is the file line the body starts on; findings are labelled
/// with file line numbers. Pass `1` when validating a standalone body.
///
/// # Examples
///
/// ```
/// use oxidized_registry::validators::body::{validate_body, BodyRules};
///
/// let findings = validate_body("# Title\n\nSome text.\n\n### Too deep\n", 1, BodyRules::default());
/// assert_eq!(findings.len(), 1);
/// assert_eq!(findings[0].rule_id, "body/skipped-heading-level");
/// assert_eq!(findings[0].line, Some(5));
/// ```
pub fn validate_body(body: &str, first_line: usize, rules: BodyRules) -> Vec<Finding> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return vec![Finding::new("body/empty", "README body is empty")];
    }
    let first_line = first_line + body[..body.len() - body.trim_start().len()].matches('\n').count();

    // Nothing else can be checked reliably without a known starting point.
    if !trimmed.starts_with("# ") {
        return vec![Finding::new(
            "body/missing-h1",
            "README body must start with ATX-style h1 header (i.e., \"# \")",
        )
        .at_line(Some(first_line))];
    }

    BodyScanner::new(rules, first_line).run(trimmed)
}

/// Returns the [`RuleInfo`] catalogue for body and alert rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::FieldValidation,
        message,
        remediation,
    };
    vec![
        rule(
            "body/empty",
            "README body is empty",
            "Add a body below the frontmatter starting with an h1 header",
        ),
        rule(
            "body/missing-h1",
            "README body must start with an ATX-style h1 header",
            "Make the first body line a '# Title' header",
        ),
        rule(
            "body/multiple-h1",
            "README contains more than one h1 header",
            "Demote every header after the first to h2 or deeper",
        ),
        rule(
            "body/heading-too-deep",
            "Header is deeper than h6",
            "Restructure the section so headers stay within h1-h6",
        ),
        rule(
            "body/heading-missing-space",
            "Header has no space after the '#' characters",
            "Insert a space between the '#' characters and the header text",
        ),
        rule(
            "body/skipped-heading-level",
            "Header level increases by more than one",
            "Add the missing intermediate header level (e.g. h2 before h3)",
        ),
        rule(
            "body/hcl-language",
            "Code block uses the deprecated 'hcl' language tag",
            "Change ```hcl to ```tf",
        ),
        rule(
            "body/unterminated-code-block",
            "Code block is never closed",
            "Close the code block with a ``` line",
        ),
        rule(
            "body/missing-paragraph",
            "No paragraph found in the h1 section",
            "Add a short description paragraph directly below the h1 header",
        ),
        rule(
            "body/missing-terraform-block",
            "No ```tf code block found in the h1 section",
            "Add a ```tf usage example directly below the h1 description",
        ),
        rule(
            "body/multiple-terraform-blocks",
            "More than one ```tf code block in the h1 section",
            "Keep a single usage example in the h1 section and move the rest under h2 headers",
        ),
        rule(
            "body/missing-terraform-version",
            "The h1 section's ```tf block does not pin a version",
            "Add a 'version = \"x.y.z\"' line to the module block",
        ),
        rule(
            "alert/malformed-header",
            "Alert header is incomplete",
            "Write alert headers as '> [!TYPE]'",
        ),
        rule(
            "alert/nested",
            "Alert block nested inside another alert block",
            "End the first alert with a non-quote line before starting another",
        ),
        rule(
            "alert/spacing",
            "Alert header does not have exactly one space between '>' and '['",
            "Write alert headers as '> [!TYPE]'",
        ),
        rule(
            "alert/unknown-type",
            "Alert type is not supported",
            "Use one of NOTE, IMPORTANT, CAUTION, WARNING, TIP",
        ),
        rule(
            "alert/lowercase-type",
            "Alert type is not upper case",
            "Write the alert type in upper case (e.g. [!NOTE])",
        ),
        rule(
            "alert/trailing-content",
            "Alert header has content after the closing bracket",
            "Move the alert text to the next '> ' line",
        ),
        rule(
            "alert/unterminated",
            "README ends on an alert header with no content",
            "Add the alert text on '> ' lines below the header",
        ),
    ]
}
