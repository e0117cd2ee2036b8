//! Cross-reference phase: checks that need the whole parsed registry or the
//! filesystem beyond a single README.
//!
//! - every `employer_github` must name a contributor that exists
//! - relative avatars must stay inside their namespace and point at a file
//! - relative icons must point at a file

use crate::entity::{Entity, Source};
use crate::finding::{Finding, Phase};
use crate::validators::fields::{is_relative_url, normalize_path, resolve_relative};
use crate::validators::RuleInfo;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};

/// Runs every cross-reference check over the parsed registry.
pub fn validate_cross_references(entities: &[Entity], root: &Path) -> Vec<Finding> {
    let mut findings = validate_employers(entities, root);
    findings.extend(
        entities
            .par_iter()
            .flat_map_iter(validate_assets)
            .collect::<Vec<_>>(),
    );
    findings
}

/// One finding per missing employer, listing every profile that names it.
///
/// A reference resolves if it matches either a contributor's GitHub username
/// or a namespace directory name.
pub fn validate_employers(entities: &[Entity], root: &Path) -> Vec<Finding> {
    let mut known: BTreeSet<&str> = BTreeSet::new();
    let mut referenced: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entity in entities {
        let Entity::Contributor(profile) = entity else {
            continue;
        };
        known.insert(profile.source.key.as_str());
        if let Some(github) = profile.github.as_deref() {
            known.insert(github);
        }
        if let Some(employer) = profile.employer_github.as_deref().filter(|e| !e.is_empty()) {
            referenced
                .entry(employer)
                .or_default()
                .push(profile.source.key.as_str());
        }
    }

    referenced
        .into_iter()
        .filter(|(employer, _)| !known.contains(employer))
        .map(|(employer, mut profiles)| {
            profiles.sort_unstable();
            Finding::new(
                "crossref/missing-employer",
                format!(
                    "company {employer:?} does not exist in {:?} directory but is referenced by these profiles: [{}]",
                    root.display().to_string(),
                    profiles.join(", ")
                ),
            )
        })
        .collect()
}

fn validate_assets(entity: &Entity) -> Vec<Finding> {
    match entity {
        Entity::Contributor(profile) => match profile.avatar.as_deref() {
            Some(avatar) => validate_relative_asset(&profile.source, "avatar", avatar, true),
            None => vec![],
        },
        Entity::Resource(resource) => match resource.icon.as_deref() {
            Some(icon) => validate_relative_asset(&resource.source, "icon", icon, false),
            None => vec![],
        },
    }
}

/// Resolves a relative `url` against the README's directory and checks the
/// file behind it. Absolute URLs are not fetched.
fn validate_relative_asset(source: &Source, field: &str, url: &str, contained: bool) -> Vec<Finding> {
    if url.is_empty() || !is_relative_url(url) {
        return vec![];
    }
    let line = source.line_of(field);
    let dir = source.dir();
    let resolved = resolve_relative(dir, url);

    let escapes = Path::new(url).components().next() == Some(Component::ParentDir)
        || url.starts_with('/')
        || !resolved.starts_with(normalize_path(dir));
    if contained && escapes {
        return vec![Finding::new(
            "crossref/avatar-outside-namespace",
            format!("relative {field} URLs cannot be placed outside a user's namespaced directory"),
        )
        .in_file(&source.path)
        .at_line(line)];
    }

    if resolved.is_file() && std::fs::File::open(&resolved).is_ok() {
        return vec![];
    }
    vec![Finding::new(
        "crossref/missing-asset",
        format!(
            "relative {field} path {url:?} does not point to a readable image in the file system (resolved to {})",
            resolved.display()
        ),
    )
    .in_file(&source.path)
    .at_line(line)]
}

/// Returns the [`RuleInfo`] catalogue for cross-reference rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::CrossReference,
        message,
        remediation,
    };
    vec![
        rule(
            "crossref/missing-employer",
            "employer_github names a contributor that has no namespace",
            "Add the employer's namespace or fix the username",
        ),
        rule(
            "crossref/avatar-outside-namespace",
            "Relative avatar URL points outside the contributor's namespace",
            "Store the avatar inside the namespace, e.g. ./.images/avatar.png",
        ),
        rule(
            "crossref/missing-asset",
            "Relative avatar or icon does not resolve to a readable file",
            "Add the image file or correct the path",
        ),
    ]
}
