//! Field-validation checks for contributor profiles.

use super::body::{validate_body, BodyRules};
use super::fields;
use super::RuleInfo;
use crate::document::DocumentKind;
use crate::entity::ContributorProfile;
use crate::finding::{Finding, Phase};

/// One frontmatter check: the key whose line the findings point at, and the
/// function producing them.
type Check = (&'static str, fn(&ContributorProfile) -> Vec<Finding>);

const CHECKS: &[Check] = &[
    ("github", |p: &ContributorProfile| {
        fields::validate_github_username(p.github.as_deref())
    }),
    ("display_name", |p: &ContributorProfile| {
        fields::validate_display_name(p.display_name.as_deref())
    }),
    ("linkedin", |p: &ContributorProfile| {
        fields::validate_absolute_url("linkedin", p.linkedin.as_deref())
    }),
    ("website", |p: &ContributorProfile| {
        fields::validate_absolute_url("website", p.website.as_deref())
    }),
    ("support_email", |p: &ContributorProfile| {
        fields::validate_support_email(p.support_email.as_deref())
    }),
    ("employer_github", |p: &ContributorProfile| {
        fields::validate_employer_username(p.employer_github.as_deref(), p.github.as_deref())
    }),
    ("status", |p: &ContributorProfile| {
        fields::validate_status(p.status.as_deref())
    }),
    ("avatar", |p: &ContributorProfile| {
        fields::validate_image_url("contributor/invalid-avatar", "avatar", p.avatar.as_deref())
    }),
];

/// Runs every contributor check and returns the union of their findings.
///
/// No check short-circuits another. The body only gets structural checks,
/// and only when the profile has one.
pub fn validate_contributor(profile: &ContributorProfile) -> Vec<Finding> {
    let source = &profile.source;
    tracing::debug!(path = %source.path.display(), status = %profile.status(), "validating contributor");
    let mut findings: Vec<Finding> = CHECKS
        .iter()
        .flat_map(|(key, check)| {
            check(profile)
                .into_iter()
                .map(move |f| f.in_file(&source.path).at_line(source.line_of(key)))
        })
        .collect();

    if !source.body.is_empty() {
        findings.extend(
            validate_body(
                &source.body,
                source.body_line,
                BodyRules::for_kind(DocumentKind::Contributor),
            )
            .into_iter()
            .map(|f| f.in_file(&source.path)),
        );
    }
    findings
}

/// Returns the [`RuleInfo`] catalogue for contributor field rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::FieldValidation,
        message,
        remediation,
    };
    vec![
        rule(
            "contributor/invalid-github",
            "GitHub username is missing or not usable as a URL path segment",
            "Set 'github' to the contributor's GitHub username",
        ),
        rule(
            "contributor/missing-display-name",
            "Contributor profile has no display_name",
            "Add a non-empty 'display_name'",
        ),
        rule(
            "contributor/invalid-url",
            "LinkedIn or website URL is not an absolute URL",
            "Use a full URL including the scheme, e.g. https://",
        ),
        rule(
            "contributor/invalid-email",
            "Support email is not shaped like local@domain.tld",
            "Use a plain address with one '@', a domain, and a top-level domain",
        ),
        rule(
            "contributor/invalid-employer",
            "employer_github is empty, not a valid username, or the profile itself",
            "Set 'employer_github' to the GitHub username of another namespace",
        ),
        rule(
            "contributor/invalid-status",
            "Contributor status is not official, partner, or community",
            "Remove 'status' or use one of the supported values",
        ),
        rule(
            "contributor/invalid-avatar",
            "Avatar URL is empty, malformed, has a query string, or an unsupported extension",
            "Point 'avatar' at a .png, .jpeg, .jpg, .gif, or .svg image, or remove it",
        ),
    ]
}
