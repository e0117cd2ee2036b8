//! README documents and the frontmatter splitter.
//!
//! A [`ProfileDocument`] is the raw text of one README plus where it came
//! from. [`split_frontmatter`] separates the `---` fenced metadata block from
//! the markdown body without interpreting either.

use crate::error::SplitError;
use std::fmt;
use std::path::PathBuf;

/// The line that opens and closes a frontmatter block.
pub const FENCE: &str = "---";

/// What a README describes, which decides the schema and body rules applied.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `<root>/<namespace>/README.md`
    Contributor,
    /// `<root>/<namespace>/modules/<name>/README.md`
    Module,
    /// `<root>/<namespace>/templates/<name>/README.md`
    Template,
}

impl DocumentKind {
    /// Resource kinds in the order they are discovered.
    pub const RESOURCES: [DocumentKind; 2] = [DocumentKind::Module, DocumentKind::Template];

    /// Directory name holding resources of this kind, or `None` for profiles.
    pub fn dir_name(&self) -> Option<&'static str> {
        match self {
            DocumentKind::Contributor => None,
            DocumentKind::Module => Some("modules"),
            DocumentKind::Template => Some("templates"),
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Contributor => write!(f, "contributor"),
            DocumentKind::Module => write!(f, "module"),
            DocumentKind::Template => write!(f, "template"),
        }
    }
}

/// One README file, read but not yet parsed.
#[derive(Debug, Clone)]
pub struct ProfileDocument {
    pub path: PathBuf,
    pub kind: DocumentKind,
    /// Namespace-relative identity, e.g. `alice` or `alice/modules/tmux`.
    pub key: String,
    pub raw: String,
}

/// A README split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitDocument {
    /// Metadata lines, each trimmed, newline-terminated.
    pub frontmatter: String,
    /// 1-based file line of the first metadata line.
    pub frontmatter_line: usize,
    /// Markdown body, trimmed at both ends only.
    pub body: String,
    /// 1-based file line where `body` starts.
    pub body_line: usize,
}

/// Separates frontmatter from body.
///
/// The document is trimmed as a whole, then its first line must be exactly
/// `---`. Everything up to the second fence is frontmatter; the rest is body,
/// including any later `---` lines.
///
/// # Errors
///
/// See [`SplitError`] for the four ways a README can be rejected.
///
/// # Examples
///
/// ```
/// use oxidized_registry::document::split_frontmatter;
///
/// let doc = split_frontmatter("---\ngithub: alice\n---\n\n# Alice\n").unwrap();
/// assert_eq!(doc.frontmatter, "github: alice\n");
/// assert_eq!(doc.body, "# Alice");
/// assert_eq!(doc.body_line, 5);
/// ```
pub fn split_frontmatter(text: &str) -> Result<SplitDocument, SplitError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SplitError::EmptyDocument);
    }
    let leading_lines = text[..text.len() - text.trim_start().len()]
        .matches('\n')
        .count();

    let mut frontmatter = String::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut fence_count = 0;
    let mut body_index = 0;

    for (idx, line) in trimmed.lines().enumerate() {
        if fence_count < 2 && line == FENCE {
            fence_count += 1;
            body_index = idx + 1;
            continue;
        }
        if fence_count == 0 {
            return Err(SplitError::MissingOpeningFence);
        }

        // Indentation carries no meaning in the metadata block, but it does in
        // the body, which is only trimmed as a whole below.
        if fence_count >= 2 {
            body_lines.push(line);
        } else {
            frontmatter.push_str(line.trim());
            frontmatter.push('\n');
        }
    }

    if fence_count < 2 {
        return Err(SplitError::UnterminatedFrontmatter);
    }
    if frontmatter.trim().is_empty() {
        return Err(SplitError::EmptyFrontmatter);
    }

    let joined = body_lines.join("\n");
    let body_trimmed_lines = joined[..joined.len() - joined.trim_start().len()]
        .matches('\n')
        .count();

    Ok(SplitDocument {
        frontmatter,
        frontmatter_line: leading_lines + 2,
        body: joined.trim().to_string(),
        body_line: leading_lines + body_index + body_trimmed_lines + 1,
    })
}
