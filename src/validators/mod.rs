//! README validators.
//!
//! - [`fields`]: one function per frontmatter field.
//! - [`body`]: the markdown body state machine, including alert blocks.
//! - [`contributor`] / [`resource`]: the declarative lists of checks run
//!   against each entity kind.
//!
//! The fixed vocabularies the registry site understands live here as named
//! constants so every check agrees on them. [`all_rules`] lists every rule
//! identifier a run can report.

pub mod body;
pub mod contributor;
pub mod fields;
pub mod resource;

use crate::finding::Phase;

/// Image formats the registry site can render for avatars and icons.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpeg", ".jpg", ".gif", ".svg"];

/// Values accepted for a contributor's `status`.
pub const SUPPORTED_STATUSES: &[&str] = &["official", "partner", "community"];

/// GitHub-flavored markdown alert keywords (`> [!NOTE]`).
pub const SUPPORTED_ALERT_TYPES: &[&str] = &["NOTE", "IMPORTANT", "CAUTION", "WARNING", "TIP"];

/// Values accepted in a resource's `supported_os` list.
pub const SUPPORTED_OS: &[&str] = &["windows", "macos", "linux"];

/// Metadata for a single validation rule.
///
/// Returned by [`all_rules`] and used by the `list-rules` and `explain`
/// CLI commands and by the SARIF rule table.
#[derive(Debug, Clone, Copy)]
pub struct RuleInfo {
    /// Unique rule identifier (e.g., `"body/skipped-heading-level"`).
    pub id: &'static str,
    /// Phase in which the rule is checked.
    pub phase: Phase,
    /// Short description of what the rule checks.
    pub message: &'static str,
    /// Guidance on how to fix a violation.
    pub remediation: &'static str,
}

/// Aggregates [`RuleInfo`] from every module that reports findings, in
/// phase order.
pub fn all_rules() -> Vec<RuleInfo> {
    let mut rules = Vec::new();
    rules.extend(crate::structure::rules());
    rules.extend(crate::loader::rules());
    rules.extend(crate::entity::rules());
    rules.extend(contributor::rules());
    rules.extend(resource::rules());
    rules.extend(body::rules());
    rules.extend(crate::crossref::rules());
    rules
}

/// Looks up a rule by identifier.
pub fn find_rule(id: &str) -> Option<RuleInfo> {
    all_rules().into_iter().find(|r| r.id == id)
}
