//! Typed README entities.
//!
//! [`decode`] turns a [`ProfileDocument`] into a [`ContributorProfile`] or a
//! [`CoderResource`]: it splits the frontmatter, parses it, rejects keys the
//! schema does not know, and checks the shape (scalar, list, boolean) of each
//! value. Field *contents* are not judged here; that happens in
//! [`validators`](crate::validators).

use crate::document::{split_frontmatter, DocumentKind, ProfileDocument};
use crate::finding::{Finding, Phase};
use crate::frontmatter::{parse_frontmatter, FieldValue, FrontmatterMap};
use crate::validators::RuleInfo;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Keys allowed in a contributor profile's frontmatter.
pub const CONTRIBUTOR_KEYS: &[&str] = &[
    "display_name",
    "bio",
    "github",
    "avatar",
    "linkedin",
    "website",
    "support_email",
    "employer_github",
    "status",
];

/// Keys allowed in a module or template README's frontmatter.
pub const RESOURCE_KEYS: &[&str] = &[
    "display_name",
    "description",
    "icon",
    "verified",
    "tags",
    "supported_os",
];

/// How official a contributor is. Absent means community.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributorStatus {
    #[default]
    Community,
    Partner,
    Official,
}

impl ContributorStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "community" => Some(ContributorStatus::Community),
            "partner" => Some(ContributorStatus::Partner),
            "official" => Some(ContributorStatus::Official),
            _ => None,
        }
    }
}

impl fmt::Display for ContributorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContributorStatus::Community => write!(f, "community"),
            ContributorStatus::Partner => write!(f, "partner"),
            ContributorStatus::Official => write!(f, "official"),
        }
    }
}

/// Where a README came from and what its body looks like. Shared by both
/// entity kinds.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub key: String,
    pub body: String,
    pub body_line: usize,
    lines: BTreeMap<String, usize>,
}

impl Source {
    /// Frontmatter line on which `key` was defined.
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.lines.get(key).copied()
    }

    /// Directory holding the README.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// A `<namespace>/README.md` profile.
#[derive(Debug, Clone)]
pub struct ContributorProfile {
    pub source: Source,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub github: Option<String>,
    /// `None` means the registry site backfills the GitHub avatar.
    pub avatar: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub support_email: Option<String>,
    pub employer_github: Option<String>,
    pub status: Option<String>,
}

impl ContributorProfile {
    /// The parsed status, falling back to community when absent or invalid.
    pub fn status(&self) -> ContributorStatus {
        self.status
            .as_deref()
            .and_then(ContributorStatus::parse)
            .unwrap_or_default()
    }
}

/// A module or template README.
#[derive(Debug, Clone)]
pub struct CoderResource {
    pub source: Source,
    pub kind: DocumentKind,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub verified: Option<bool>,
    /// `None` when the key is absent, which is distinct from an empty list.
    pub tags: Option<Vec<String>>,
    pub supported_os: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub enum Entity {
    Contributor(ContributorProfile),
    Resource(CoderResource),
}

impl Entity {
    pub fn source(&self) -> &Source {
        match self {
            Entity::Contributor(c) => &c.source,
            Entity::Resource(r) => &r.source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source().path
    }

    /// Uniqueness key: the GitHub username for profiles (if present), the
    /// namespace-relative path for resources.
    pub fn identity(&self) -> Option<&str> {
        match self {
            Entity::Contributor(c) => c.github.as_deref().filter(|g| !g.is_empty()),
            Entity::Resource(r) => Some(r.source.key.as_str()),
        }
    }
}

/// Collects typed values out of a [`FrontmatterMap`], recording every shape
/// mismatch instead of stopping at the first.
struct Fields<'a> {
    map: &'a FrontmatterMap,
    path: &'a Path,
    errors: Vec<Finding>,
}

impl<'a> Fields<'a> {
    fn type_error(&mut self, key: &str, expected: &str, found: &FieldValue) {
        let line = self.map.get(key).map(|e| e.line);
        self.errors.push(
            Finding::new(
                "parse/invalid-type",
                format!("{key:?} must be a {expected}, found {}", found.kind()),
            )
            .in_file(self.path)
            .at_line(line),
        );
    }

    fn string(&mut self, key: &str) -> Option<String> {
        match self.map.get(key).map(|e| &e.value) {
            None | Some(FieldValue::Null) => None,
            Some(FieldValue::Scalar(s)) => Some(s.clone()),
            Some(other) => {
                let other = other.clone();
                self.type_error(key, "string", &other);
                None
            }
        }
    }

    fn list(&mut self, key: &str) -> Option<Vec<String>> {
        match self.map.get(key).map(|e| &e.value) {
            None | Some(FieldValue::Null) => None,
            Some(FieldValue::List(items)) => Some(items.clone()),
            Some(other) => {
                let other = other.clone();
                self.type_error(key, "list", &other);
                None
            }
        }
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        match self.map.get(key).map(|e| &e.value) {
            None | Some(FieldValue::Null) => None,
            Some(FieldValue::Scalar(s)) if s == "true" => Some(true),
            Some(FieldValue::Scalar(s)) if s == "false" => Some(false),
            Some(other) => {
                let other = other.clone();
                self.type_error(key, "boolean (true or false)", &other);
                None
            }
        }
    }
}

/// Parses one README into an [`Entity`].
///
/// # Errors
///
/// Returns every parse-phase finding for the document: splitter failures,
/// frontmatter syntax errors, unknown keys, and shape mismatches.
pub fn decode(doc: &ProfileDocument) -> Result<Entity, Vec<Finding>> {
    let split = split_frontmatter(&doc.raw).map_err(|e| {
        vec![Finding::new(e.rule_id(), format!("failed to parse frontmatter: {e}")).in_file(&doc.path)]
    })?;

    let map = parse_frontmatter(&split.frontmatter, split.frontmatter_line).map_err(|errs| {
        errs.into_iter()
            .map(|e| {
                Finding::new("parse/invalid-frontmatter", e.message)
                    .in_file(&doc.path)
                    .at_line(Some(e.line))
            })
            .collect::<Vec<_>>()
    })?;

    let allowed = match doc.kind {
        DocumentKind::Contributor => CONTRIBUTOR_KEYS,
        DocumentKind::Module | DocumentKind::Template => RESOURCE_KEYS,
    };
    let unknown: Vec<Finding> = map
        .iter()
        .filter(|e| !allowed.contains(&e.key.as_str()))
        .map(|e| {
            Finding::new(
                "parse/unknown-key",
                format!(
                    "unsupported frontmatter key {:?} for {} README; allowed keys: [{}]",
                    e.key,
                    doc.kind,
                    allowed.join(", ")
                ),
            )
            .in_file(&doc.path)
            .at_line(Some(e.line))
        })
        .collect();
    if !unknown.is_empty() {
        return Err(unknown);
    }

    let source = Source {
        path: doc.path.clone(),
        key: doc.key.clone(),
        body: split.body,
        body_line: split.body_line,
        lines: map.iter().map(|e| (e.key.clone(), e.line)).collect(),
    };
    let mut fields = Fields {
        map: &map,
        path: &doc.path,
        errors: Vec::new(),
    };

    let entity = match doc.kind {
        DocumentKind::Contributor => Entity::Contributor(ContributorProfile {
            display_name: fields.string("display_name"),
            bio: fields.string("bio"),
            github: fields.string("github"),
            avatar: fields.string("avatar"),
            linkedin: fields.string("linkedin"),
            website: fields.string("website"),
            support_email: fields.string("support_email"),
            employer_github: fields.string("employer_github"),
            status: fields.string("status"),
            source,
        }),
        kind @ (DocumentKind::Module | DocumentKind::Template) => {
            Entity::Resource(CoderResource {
                kind,
                display_name: fields.string("display_name"),
                description: fields.string("description"),
                icon: fields.string("icon"),
                verified: fields.boolean("verified"),
                tags: fields.list("tags"),
                supported_os: fields.list("supported_os"),
                source,
            })
        }
    };

    if fields.errors.is_empty() {
        Ok(entity)
    } else {
        Err(fields.errors)
    }
}

/// Returns the [`RuleInfo`] catalogue for parse-phase rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::Parse,
        message,
        remediation,
    };
    vec![
        rule(
            "parse/empty-document",
            "README is empty",
            "Add frontmatter and a body to the README",
        ),
        rule(
            "parse/missing-opening-fence",
            "README does not start with a '---' frontmatter fence",
            "Make '---' the very first line of the README",
        ),
        rule(
            "parse/unterminated-frontmatter",
            "README does not have two '---' frontmatter fences",
            "Close the frontmatter block with a '---' line",
        ),
        rule(
            "parse/empty-frontmatter",
            "Frontmatter fences contain no content",
            "Add the required frontmatter keys between the fences",
        ),
        rule(
            "parse/invalid-frontmatter",
            "Frontmatter line is not a valid key/value pair or list item",
            "Use 'key: value' pairs, '- item' lists, or '[a, b]' flow lists",
        ),
        rule(
            "parse/unknown-key",
            "Frontmatter contains a key the schema does not define",
            "Remove the key or correct its spelling",
        ),
        rule(
            "parse/invalid-type",
            "Frontmatter value has the wrong shape (string, list, or boolean)",
            "Change the value to the documented type",
        ),
        rule(
            "parse/duplicate-identity",
            "Two READMEs declare the same identity",
            "Give each contributor profile a distinct GitHub username",
        ),
    ]
}
