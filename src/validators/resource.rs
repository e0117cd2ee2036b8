//! Field-validation checks for module and template READMEs.

use super::body::{validate_body, BodyRules};
use super::fields;
use super::RuleInfo;
use crate::entity::CoderResource;
use crate::finding::{Finding, Phase};
use std::path::{Path, PathBuf};

/// Settings shared by every resource check in a run.
#[derive(Debug, Clone)]
pub struct ResourceContext {
    /// Shared icons directory that relative icon URLs may point into.
    pub icons_dir: PathBuf,
}

impl ResourceContext {
    pub fn new(icons_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons_dir: icons_dir.into(),
        }
    }
}

type Check = (&'static str, fn(&CoderResource, &ResourceContext) -> Vec<Finding>);

const CHECKS: &[Check] = &[
    ("display_name", |r: &CoderResource, _: &ResourceContext| {
        fields::validate_optional_display_name(r.display_name.as_deref())
    }),
    ("description", |r: &CoderResource, _: &ResourceContext| {
        fields::validate_description(r.description.as_deref())
    }),
    ("icon", |r: &CoderResource, ctx: &ResourceContext| validate_icon(r, &ctx.icons_dir)),
    ("tags", |r: &CoderResource, _: &ResourceContext| {
        fields::validate_tags(r.tags.as_deref())
    }),
    ("supported_os", |r: &CoderResource, _: &ResourceContext| {
        fields::validate_supported_os(r.supported_os.as_deref())
    }),
];

fn validate_icon(resource: &CoderResource, icons_dir: &Path) -> Vec<Finding> {
    let icon = resource.icon.as_deref();
    let mut findings = fields::validate_icon_present(icon);
    findings.extend(fields::validate_image_url("resource/invalid-icon", "icon", icon));

    let Some(icon) = icon.filter(|i| !i.is_empty()) else {
        return findings;
    };
    if fields::is_relative_url(icon) {
        findings.extend(fields::validate_icon_scope(icon, resource.source.dir(), icons_dir));
    } else if let Err(e) = fields::parse_request_uri(icon) {
        findings.push(Finding::new(
            "resource/invalid-icon",
            format!("absolute icon URL {icon:?} is not valid: {e}"),
        ));
    }
    findings
}

/// Runs every check for one module or template.
pub fn validate_resource(resource: &CoderResource, ctx: &ResourceContext) -> Vec<Finding> {
    let source = &resource.source;
    let mut findings: Vec<Finding> = CHECKS
        .iter()
        .flat_map(|(key, check)| {
            check(resource, ctx)
                .into_iter()
                .map(move |f| f.in_file(&source.path).at_line(source.line_of(key)))
        })
        .collect();

    findings.extend(
        validate_body(&source.body, source.body_line, BodyRules::for_kind(resource.kind))
            .into_iter()
            .map(|f| f.in_file(&source.path)),
    );
    findings
}

/// Returns the [`RuleInfo`] catalogue for resource field rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::FieldValidation,
        message,
        remediation,
    };
    vec![
        rule(
            "resource/empty-display-name",
            "Resource display_name is present but blank",
            "Give 'display_name' a value or remove the key",
        ),
        rule(
            "resource/missing-description",
            "Resource has no description",
            "Add a one-line 'description' shown on the registry site",
        ),
        rule(
            "resource/invalid-icon",
            "Icon is missing, malformed, has a query string, or an unsupported extension",
            "Point 'icon' at a .png, .jpeg, .jpg, .gif, or .svg image",
        ),
        rule(
            "resource/icon-out-of-scope",
            "Relative icon escapes both the resource directory and the shared icons directory",
            "Store the icon next to the README or in the shared icons directory",
        ),
        rule(
            "resource/invalid-tags",
            "Tags are missing or contain characters that need query escaping",
            "Declare 'tags' (use [] for none) and stick to letters, digits, '-', '_', '.', '~'",
        ),
        rule(
            "resource/unsupported-os",
            "supported_os lists an unknown operating system",
            "Use only windows, macos, or linux",
        ),
    ]
}
