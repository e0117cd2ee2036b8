//! File-load phase: finds every README in the registry and reads it.
//!
//! Discovery walks the tree in name order; reading is spread over the
//! current rayon pool. Documents come back sorted by path whatever order the
//! reads finished in.

use crate::document::{DocumentKind, ProfileDocument};
use crate::finding::{Finding, Phase};
use crate::structure::{IGNORED_DIR, README_FILE};
use crate::validators::RuleInfo;
use rayon::prelude::*;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A README that has been located but not read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeLocation {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// `alice` for a profile, `alice/modules/tmux` for a resource.
    pub key: String,
}

fn subdirs(dir: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && e.file_name() != OsStr::new(IGNORED_DIR))
}

/// Lists every README the later phases should parse.
///
/// Only READMEs that exist are returned; missing ones were already reported
/// by the structure phase.
pub fn discover_readmes(root: &Path) -> Vec<ReadmeLocation> {
    let mut found = Vec::new();
    for namespace in subdirs(root) {
        let ns = namespace.file_name().to_string_lossy().to_string();
        let profile = namespace.path().join(README_FILE);
        if profile.is_file() {
            found.push(ReadmeLocation {
                path: profile,
                kind: DocumentKind::Contributor,
                key: ns.clone(),
            });
        }

        for kind in DocumentKind::RESOURCES {
            let Some(dir_name) = kind.dir_name() else {
                continue;
            };
            for resource in subdirs(&namespace.path().join(dir_name)) {
                let readme = resource.path().join(README_FILE);
                if readme.is_file() {
                    found.push(ReadmeLocation {
                        path: readme,
                        kind,
                        key: format!("{ns}/{dir_name}/{}", resource.file_name().to_string_lossy()),
                    });
                }
            }
        }
    }
    found
}

/// Reads every located README in parallel.
///
/// Returns the documents that were read and a finding for each that was not.
pub fn load_documents(locations: &[ReadmeLocation]) -> (Vec<ProfileDocument>, Vec<Finding>) {
    let results: Vec<Result<ProfileDocument, Finding>> = locations
        .par_iter()
        .map(|loc| {
            tracing::debug!(path = %loc.path.display(), kind = %loc.kind, "reading README");
            std::fs::read_to_string(&loc.path)
                .map(|raw| ProfileDocument {
                    path: loc.path.clone(),
                    kind: loc.kind,
                    key: loc.key.clone(),
                    raw,
                })
                .map_err(|e| {
                    Finding::new("load/unreadable-file", format!("failed to read README: {e}"))
                        .in_file(&loc.path)
                })
        })
        .collect();

    let mut documents = Vec::with_capacity(results.len());
    let mut findings = Vec::new();
    for result in results {
        match result {
            Ok(doc) => documents.push(doc),
            Err(f) => findings.push(f),
        }
    }
    documents.sort_by(|a, b| a.path.cmp(&b.path));
    (documents, findings)
}

/// Returns the [`RuleInfo`] catalogue for file-load rules.
pub fn rules() -> Vec<RuleInfo> {
    vec![RuleInfo {
        id: "load/unreadable-file",
        phase: Phase::FileLoad,
        message: "README exists but could not be read as UTF-8 text",
        remediation: "Check the file's permissions and encoding",
    }]
}
