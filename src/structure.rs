//! Repository layout checks.
//!
//! This is not an exhaustive audit of the repository. It checks exactly the
//! parts of the tree the later phases rely on:
//!
//! ```text
//! <root>/
//!   <namespace>/            name matches [A-Za-z0-9] with internal hyphens
//!     README.md
//!     modules/<name>/       README.md + main.tf
//!     templates/<name>/     README.md + main.tf
//!     .images/
//! <icons_dir>/
//! ```

use crate::document::DocumentKind;
use crate::error::RegistryError;
use crate::finding::{Finding, Phase};
use crate::validators::RuleInfo;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Namespace and resource directory names.
static RE_VALID_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?$").unwrap());

/// Sub-directories allowed directly under a namespace.
pub const NAMESPACE_SUBDIRS: &[&str] = &["modules", "templates", ".images"];

/// Test tooling sometimes leaves these behind inside resource directories.
pub const IGNORED_DIR: &str = ".coder";

pub const README_FILE: &str = "README.md";

pub const MAIN_TERRAFORM_FILE: &str = "main.tf";

/// Returns `true` if `name` may be used for a namespace or resource.
pub fn is_valid_name(name: &str) -> bool {
    RE_VALID_NAME.is_match(name)
}

/// Direct children of `dir`, sorted by name. Entries that cannot be read are
/// reported rather than skipped.
fn children(dir: &Path, findings: &mut Vec<Finding>) -> Vec<walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                let path = e.path().unwrap_or(dir).to_path_buf();
                findings.push(
                    Finding::new("structure/unreadable-entry", format!("cannot read entry: {e}"))
                        .in_file(path),
                );
                None
            }
        })
        .collect()
}

/// Checks the registry layout under `root` and the shared icons directory.
///
/// # Errors
///
/// Returns [`RegistryError::RootUnreadable`] when `root` itself cannot be
/// listed; nothing else can be checked in that case.
pub fn validate_structure(root: &Path, icons_dir: &Path) -> Result<Vec<Finding>, RegistryError> {
    std::fs::read_dir(root).map_err(|source| RegistryError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut findings = Vec::new();
    for entry in children(root, &mut findings) {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_dir() {
            findings.push(
                Finding::new(
                    "structure/non-directory-entry",
                    "detected non-directory file at base of main registry directory",
                )
                .in_file(path),
            );
            continue;
        }
        if !is_valid_name(&name) {
            findings.push(
                Finding::new(
                    "structure/invalid-namespace-name",
                    "namespace name contains invalid characters (only alphanumeric characters and hyphens are allowed)",
                )
                .in_file(path),
            );
            continue;
        }
        validate_namespace(path, &mut findings);
    }

    if !icons_dir.is_dir() {
        findings.push(
            Finding::new(
                "structure/missing-icons-dir",
                "missing top-level icons directory (used for storing reusable resource icons)",
            )
            .in_file(icons_dir),
        );
    }
    Ok(findings)
}

fn validate_namespace(namespace: &Path, findings: &mut Vec<Finding>) {
    let readme = namespace.join(README_FILE);
    if !readme.is_file() {
        findings.push(
            Finding::new("structure/missing-readme", "namespace has no README.md profile")
                .in_file(readme),
        );
    }

    for entry in children(namespace, findings) {
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !NAMESPACE_SUBDIRS.contains(&&*name) {
            findings.push(
                Finding::new(
                    "structure/unsupported-subdirectory",
                    format!(
                        "only these sub-directories are allowed at top of namespace: [{}]",
                        NAMESPACE_SUBDIRS.join(", ")
                    ),
                )
                .in_file(entry.path()),
            );
            continue;
        }
        let is_resource_dir = DocumentKind::RESOURCES
            .iter()
            .any(|k| k.dir_name() == Some(&*name));
        if is_resource_dir {
            validate_resource_dir(entry.path(), findings);
        }
    }
}

fn validate_resource_dir(dir: &Path, findings: &mut Vec<Finding>) {
    for entry in children(dir, findings) {
        let name = entry.file_name().to_string_lossy();
        if !entry.file_type().is_dir() || name == IGNORED_DIR {
            continue;
        }
        if !is_valid_name(&name) {
            findings.push(
                Finding::new(
                    "structure/invalid-resource-name",
                    "name contains invalid characters (only alphanumeric characters and hyphens are allowed)",
                )
                .in_file(entry.path()),
            );
            continue;
        }

        let readme = entry.path().join(README_FILE);
        if !readme.is_file() {
            findings.push(
                Finding::new("structure/missing-readme", "'README.md' does not exist").in_file(readme),
            );
        }
        let main_tf = entry.path().join(MAIN_TERRAFORM_FILE);
        if !main_tf.is_file() {
            findings.push(
                Finding::new("structure/missing-main-tf", "'main.tf' file does not exist")
                    .in_file(main_tf),
            );
        }
    }
}

/// Returns the [`RuleInfo`] catalogue for structure rules.
pub fn rules() -> Vec<RuleInfo> {
    let rule = |id, message, remediation| RuleInfo {
        id,
        phase: Phase::Structure,
        message,
        remediation,
    };
    vec![
        rule(
            "structure/non-directory-entry",
            "A plain file sits at the top of the registry directory",
            "Move the file into a namespace or out of the registry",
        ),
        rule(
            "structure/invalid-namespace-name",
            "Namespace directory name is not alphanumeric with internal hyphens",
            "Rename the directory, e.g. 'my-company'",
        ),
        rule(
            "structure/missing-readme",
            "Namespace or resource directory has no README.md",
            "Add a README.md with frontmatter and a body",
        ),
        rule(
            "structure/unsupported-subdirectory",
            "Namespace contains a sub-directory other than modules, templates, or .images",
            "Move the directory's contents under modules/ or templates/",
        ),
        rule(
            "structure/invalid-resource-name",
            "Module or template directory name is not alphanumeric with internal hyphens",
            "Rename the directory, e.g. 'code-server'",
        ),
        rule(
            "structure/missing-main-tf",
            "Module or template directory has no main.tf",
            "Add the resource's Terraform entry point as main.tf",
        ),
        rule(
            "structure/missing-icons-dir",
            "The shared icons directory does not exist",
            "Create the icons directory or point 'icons_dir' at it",
        ),
        rule(
            "structure/unreadable-entry",
            "A directory entry could not be read",
            "Check file permissions inside the registry",
        ),
    ]
}
