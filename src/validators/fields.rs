//! Field-level frontmatter checks.
//!
//! Every function here inspects one value (occasionally with a sibling for
//! context) and returns all of its problems. Callers attach the README path
//! and frontmatter line. Absence is handled per field: most optional fields
//! are simply skipped when missing.

use super::{SUPPORTED_IMAGE_EXTENSIONS, SUPPORTED_OS, SUPPORTED_STATUSES};
use crate::entity::ContributorStatus;
use crate::finding::Finding;
use std::path::{Component, Path, PathBuf};

// ---------------------------------------------------------------------------
// URL helpers
// ---------------------------------------------------------------------------

/// Returns `true` if `s` survives percent-encoding as a URL path segment
/// unchanged, i.e. it only contains unreserved characters and the sub-delims
/// that are legal inside one segment.
pub fn is_path_segment_safe(s: &str) -> bool {
    s.bytes().all(|b| {
        b.is_ascii_alphanumeric()
            || matches!(b, b'-' | b'_' | b'.' | b'~' | b'$' | b'&' | b'+' | b':' | b'=' | b'@')
    })
}

/// Returns `true` if `s` survives query-component encoding unchanged.
pub fn is_query_safe(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

/// Splits off a leading `scheme:` if present.
///
/// A scheme starts with a letter and continues with letters, digits, `+`,
/// `-`, or `.`. Returns `Err` for a URL that begins with `:`.
fn split_scheme(url: &str) -> Result<(Option<&str>, &str), String> {
    for (i, c) in url.char_indices() {
        match c {
            c if c.is_ascii_alphabetic() => {}
            '0'..='9' | '+' | '-' | '.' if i > 0 => {}
            ':' if i == 0 => return Err("missing protocol scheme".to_string()),
            ':' => return Ok((Some(&url[..i]), &url[i + 1..])),
            _ => return Ok((None, url)),
        }
    }
    Ok((None, url))
}

fn check_common(url: &str) -> Result<(), String> {
    if url.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err("URL contains ASCII control character".to_string());
    }
    let bytes = url.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                // `%` is ASCII, so `i` is a char boundary; the next two bytes may not be.
                let end = url[i..]
                    .char_indices()
                    .nth(3)
                    .map_or(url.len(), |(j, _)| i + j);
                return Err(format!("invalid URL escape {:?}", &url[i..end]));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn check_authority(rest: &str) -> Result<(), String> {
    if let Some(after) = rest.strip_prefix("//") {
        let authority = after.split(['/', '?', '#']).next().unwrap_or("");
        let host = authority.rsplit('@').next().unwrap_or("");
        if let Some(bad) = host.chars().find(|c| c.is_whitespace()) {
            return Err(format!("invalid character {bad:?} in host name"));
        }
    }
    Ok(())
}

/// Validates an absolute URL the way an HTTP request target is validated:
/// it must carry a scheme or be an absolute path, and may not be relative.
///
/// # Examples
///
/// ```
/// use oxidized_registry::validators::fields::parse_request_uri;
///
/// assert!(parse_request_uri("https://www.linkedin.com/in/alice").is_ok());
/// assert!(parse_request_uri("linkedin.com/in/alice").is_err());
/// ```
pub fn parse_request_uri(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("empty url".to_string());
    }
    check_common(url)?;
    if url.starts_with('/') {
        return Ok(());
    }
    match split_scheme(url)? {
        (Some(_), rest) => check_authority(rest),
        (None, _) => Err("invalid URI for request".to_string()),
    }
}

/// Validates a URL reference that may be relative (e.g. `./avatar.png`).
pub fn parse_url_reference(url: &str) -> Result<(), String> {
    check_common(url)?;
    match split_scheme(url)? {
        (Some(_), rest) => check_authority(rest),
        (None, rest) => {
            let first_segment = rest.split('/').next().unwrap_or("");
            if first_segment.contains(':') {
                return Err("first path segment in URL cannot contain colon".to_string());
            }
            check_authority(rest)
        }
    }
}

/// Returns `true` for URLs that resolve against the README's directory.
pub fn is_relative_url(url: &str) -> bool {
    !url.starts_with("//") && matches!(split_scheme(url), Ok((None, _)))
}

/// Lexically normalizes `path`, making it absolute first when possible so
/// that paths given relative to the working directory compare correctly.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolves a relative URL against `dir`, dropping any query or fragment.
pub fn resolve_relative(dir: &Path, url: &str) -> PathBuf {
    let path_part = url.split(['?', '#']).next().unwrap_or("");
    normalize_path(&dir.join(path_part))
}

// ---------------------------------------------------------------------------
// Identity fields
// ---------------------------------------------------------------------------

/// The contributor's GitHub username: required, usable as a URL path segment.
pub fn validate_github_username(username: Option<&str>) -> Vec<Finding> {
    let Some(name) = username.filter(|n| !n.trim().is_empty()) else {
        return vec![Finding::new(
            "contributor/invalid-github",
            "missing GitHub username",
        )];
    };

    let lower = name.to_lowercase();
    if is_path_segment_safe(&lower) {
        vec![]
    } else {
        vec![Finding::new(
            "contributor/invalid-github",
            format!("GitHub username {name:?} is not a valid URL path segment"),
        )]
    }
}

/// `employer_github`: optional, but if set it must be a usable username and
/// must not point back at the profile itself.
pub fn validate_employer_username(employer: Option<&str>, own: Option<&str>) -> Vec<Finding> {
    let Some(employer) = employer else {
        return vec![];
    };
    if employer.is_empty() {
        return vec![Finding::new(
            "contributor/invalid-employer",
            "employer_github field is defined but has empty value",
        )];
    }

    let mut problems = Vec::new();
    let lower = employer.to_lowercase();
    if !is_path_segment_safe(&lower) {
        problems.push(Finding::new(
            "contributor/invalid-employer",
            format!("GitHub company username {employer:?} is not a valid URL path segment"),
        ));
    }
    if own == Some(employer) {
        problems.push(Finding::new(
            "contributor/invalid-employer",
            format!("cannot list own GitHub name ({employer:?}) as employer"),
        ));
    }
    problems
}

pub fn validate_display_name(display_name: Option<&str>) -> Vec<Finding> {
    match display_name {
        Some(name) if !name.trim().is_empty() => vec![],
        _ => vec![Finding::new("contributor/missing-display-name", "missing display_name")],
    }
}

// ---------------------------------------------------------------------------
// Contact fields
// ---------------------------------------------------------------------------

/// An optional absolute URL such as `linkedin` or `website`.
pub fn validate_absolute_url(field: &str, url: Option<&str>) -> Vec<Finding> {
    let Some(url) = url else {
        return vec![];
    };
    match parse_request_uri(url) {
        Ok(()) => vec![],
        Err(e) => vec![Finding::new(
            "contributor/invalid-url",
            format!("{field} URL {url:?} is not valid: {e}"),
        )],
    }
}

/// Best-effort structural check of a support email.
///
/// Without sending mail, the most that can be verified is the general shape:
/// `local@domain.tld` with every part non-empty and no query string.
pub fn validate_support_email(email: Option<&str>) -> Vec<Finding> {
    let Some(email) = email else {
        return vec![];
    };
    let rule = "contributor/invalid-email";

    let Some((local, server)) = email.split_once('@') else {
        return vec![Finding::new(
            rule,
            format!("email address {email:?} is missing @ symbol"),
        )];
    };

    let mut problems = Vec::new();
    if local.is_empty() {
        problems.push(Finding::new(
            rule,
            format!("email address {email:?} is missing username"),
        ));
    }
    if server.contains('@') {
        problems.push(Finding::new(
            rule,
            format!("email address {email:?} contains more than one @ symbol"),
        ));
    }

    let Some((domain, tld)) = server.split_once('.') else {
        problems.push(Finding::new(
            rule,
            format!("email address {email:?} is missing period for server segment"),
        ));
        return problems;
    };

    if domain.is_empty() {
        problems.push(Finding::new(
            rule,
            format!("email address {email:?} is missing domain"),
        ));
    }
    if tld.is_empty() {
        problems.push(Finding::new(
            rule,
            format!("email address {email:?} is missing top-level domain"),
        ));
    }
    if email.contains('?') {
        problems.push(Finding::new(
            rule,
            "email is not allowed to contain query parameters",
        ));
    }
    problems
}

/// `status` defaults to community when absent.
pub fn validate_status(status: Option<&str>) -> Vec<Finding> {
    match status {
        Some(s) if ContributorStatus::parse(s).is_none() => vec![Finding::new(
            "contributor/invalid-status",
            format!(
                "contributor status {s:?} is not valid; expected one of [{}]",
                SUPPORTED_STATUSES.join(", ")
            ),
        )],
        _ => vec![],
    }
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Shape checks shared by contributor avatars and resource icons.
///
/// Relative URLs are allowed here; whether they point somewhere sensible is
/// checked separately. `label` names the field in messages.
pub fn validate_image_url(rule: &str, label: &str, url: Option<&str>) -> Vec<Finding> {
    let Some(url) = url else {
        return vec![];
    };
    if url.is_empty() {
        return vec![Finding::new(
            rule,
            format!("{label} URL must be omitted or non-empty string"),
        )];
    }

    let mut problems = Vec::new();
    if let Err(e) = parse_url_reference(url) {
        problems.push(Finding::new(
            rule,
            format!("{label} URL {url:?} is not a valid relative or absolute URL: {e}"),
        ));
    }
    if url.contains('?') {
        problems.push(Finding::new(
            rule,
            format!("{label} URL is not allowed to contain search parameters"),
        ));
    }
    if !SUPPORTED_IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        let extension = url
            .rsplit_once('.')
            .map(|(_, ext)| format!("'.{ext}'"))
            .unwrap_or_else(|| "(no extension)".to_string());
        problems.push(Finding::new(
            rule,
            format!(
                "{label} URL {extension} does not end in a supported file format: [{}]",
                SUPPORTED_IMAGE_EXTENSIONS.join(", ")
            ),
        ));
    }
    problems
}

/// A relative icon must stay inside the resource's own directory or resolve
/// into the shared icons directory.
pub fn validate_icon_scope(icon: &str, resource_dir: &Path, icons_dir: &Path) -> Vec<Finding> {
    if icon.is_empty() || !is_relative_url(icon) {
        return vec![];
    }
    let resolved = resolve_relative(resource_dir, icon);
    if resolved.starts_with(normalize_path(resource_dir))
        || resolved.starts_with(normalize_path(icons_dir))
    {
        return vec![];
    }
    vec![Finding::new(
        "resource/icon-out-of-scope",
        format!(
            "relative icon URL {icon:?} must either be scoped to the resource's directory, or the shared {} directory",
            icons_dir.display()
        ),
    )]
}

// ---------------------------------------------------------------------------
// Resource fields
// ---------------------------------------------------------------------------

pub fn validate_description(description: Option<&str>) -> Vec<Finding> {
    match description {
        Some(d) if !d.trim().is_empty() => vec![],
        _ => vec![Finding::new(
            "resource/missing-description",
            "frontmatter description cannot be empty",
        )],
    }
}

/// Resource `display_name` is optional but may not be blank.
pub fn validate_optional_display_name(display_name: Option<&str>) -> Vec<Finding> {
    match display_name {
        Some(name) if name.trim().is_empty() => vec![Finding::new(
            "resource/empty-display-name",
            "if defined, display_name must not be empty string",
        )],
        _ => vec![],
    }
}

/// Resource icons are mandatory.
pub fn validate_icon_present(icon: Option<&str>) -> Vec<Finding> {
    match icon {
        Some(_) => vec![],
        None => vec![Finding::new("resource/invalid-icon", "icon URL cannot be empty")],
    }
}

/// Tags feed the registry site's filter controls, so each must be usable
/// verbatim in a query string. A missing list is an error; `tags: []` is fine.
pub fn validate_tags(tags: Option<&[String]>) -> Vec<Finding> {
    let Some(tags) = tags else {
        return vec![Finding::new(
            "resource/invalid-tags",
            "tags must be defined (use `tags: []` for no tags)",
        )];
    };

    let invalid: Vec<&str> = tags
        .iter()
        .filter(|t| !is_query_safe(t))
        .map(String::as_str)
        .collect();
    if invalid.is_empty() {
        vec![]
    } else {
        vec![Finding::new(
            "resource/invalid-tags",
            format!(
                "found invalid tags (tags that cannot be used for filter state in the registry website): [{}]",
                invalid.join(", ")
            ),
        )]
    }
}

pub fn validate_supported_os(supported_os: Option<&[String]>) -> Vec<Finding> {
    supported_os
        .unwrap_or_default()
        .iter()
        .filter(|os| !SUPPORTED_OS.contains(&os.as_str()))
        .map(|os| {
            Finding::new(
                "resource/unsupported-os",
                format!(
                    "supported_os entry {os:?} is not one of [{}]",
                    SUPPORTED_OS.join(", ")
                ),
            )
        })
        .collect()
}
