//! Error types for conditions that cannot be reported as findings.
//!
//! Ordinary violations are collected as [`Finding`](crate::finding::Finding)
//! values. The types here cover the two places where a typed failure is more
//! useful: splitting a README into frontmatter and body, and problems that
//! stop a run outright (unreadable configuration, missing registry root).

use std::path::PathBuf;

/// Why a README could not be split into frontmatter and body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("README is empty")]
    EmptyDocument,

    #[error("README does not start with a frontmatter fence (\"---\")")]
    MissingOpeningFence,

    #[error("README does not have two sets of frontmatter fences")]
    UnterminatedFrontmatter,

    #[error("README has frontmatter fences but no frontmatter content")]
    EmptyFrontmatter,
}

impl SplitError {
    /// Rule identifier used when the error is reported as a finding.
    pub fn rule_id(&self) -> &'static str {
        match self {
            SplitError::EmptyDocument => "parse/empty-document",
            SplitError::MissingOpeningFence => "parse/missing-opening-fence",
            SplitError::UnterminatedFrontmatter => "parse/unterminated-frontmatter",
            SplitError::EmptyFrontmatter => "parse/empty-frontmatter",
        }
    }
}

/// A failure that aborts the whole validation run.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot read registry root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
