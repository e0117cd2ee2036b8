//! Lightweight YAML-subset parser for README frontmatter.
//!
//! Registry frontmatter only ever uses a tiny slice of YAML: scalar
//! `key: value` pairs, block sequences (`- item`), and flow sequences
//! (`[item, item]`). Parsing exactly that subset keeps error messages precise
//! and avoids pulling in a full YAML implementation.
//!
//! The splitter trims every metadata line, so block-sequence items arrive
//! unindented and are attached to the most recent key. For the same reason
//! values must fit on one line: block scalars (`|`, `>`) are reported once
//! on the key's line, and a plain scalar continued onto the next line is an
//! invalid line of its own.

use std::fmt;

/// The decoded value of one frontmatter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// `key:` with no value and no list items, or an explicit `null`/`~`.
    Null,
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Human-readable name of the value's shape, for type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Scalar(_) => "scalar",
            FieldValue::List(_) => "list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterEntry {
    pub key: String,
    pub value: FieldValue,
    /// 1-based line in the README file.
    pub line: usize,
}

/// Frontmatter keys in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontmatterMap {
    entries: Vec<FrontmatterEntry>,
}

impl FrontmatterMap {
    pub fn get(&self, key: &str) -> Option<&FrontmatterEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrontmatterEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A line the parser could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for SyntaxError {}

/// Parses the metadata block produced by
/// [`split_frontmatter`](crate::document::split_frontmatter).
///
/// `first_line` is the file line number of the block's first line and is
/// only used to label entries and errors. Every malformed line is reported,
/// not just the first.
///
/// # Examples
///
/// ```
/// use oxidized_registry::frontmatter::{parse_frontmatter, FieldValue};
///
/// let map = parse_frontmatter("tags: [aws, gcp]\ndescription: \"Hi\"\n", 2).unwrap();
/// assert_eq!(
///     map.get("tags").unwrap().value,
///     FieldValue::List(vec!["aws".into(), "gcp".into()])
/// );
/// assert_eq!(map.get("description").unwrap().line, 3);
/// ```
pub fn parse_frontmatter(text: &str, first_line: usize) -> Result<FrontmatterMap, Vec<SyntaxError>> {
    let mut entries: Vec<FrontmatterEntry> = Vec::new();
    let mut errors = Vec::new();
    // Index of the most recent entry; block-sequence items attach to it.
    let mut open_key: Option<usize> = None;
    // Set after a rejected `|`/`>` value so its continuation lines are not
    // reported one by one.
    let mut in_block_scalar = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_num = first_line + idx;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let list_item = if line == "-" {
            Some("")
        } else {
            line.strip_prefix("- ")
        };
        if let Some(item) = list_item {
            if in_block_scalar {
                continue;
            }
            let Some(entry) = open_key.and_then(|i| entries.get_mut(i)) else {
                errors.push(SyntaxError {
                    line: line_num,
                    message: "list item does not belong to any key".to_string(),
                });
                continue;
            };
            let item = unquote(strip_comment(item.trim()));
            if let FieldValue::List(items) = &mut entry.value {
                items.push(item);
            } else if entry.value == FieldValue::Null {
                entry.value = FieldValue::List(vec![item]);
            } else {
                errors.push(SyntaxError {
                    line: line_num,
                    message: format!("key {:?} already has a scalar value", entry.key),
                });
            }
            continue;
        }

        let Some((key, raw_value)) = parse_kv(line) else {
            if in_block_scalar {
                continue;
            }
            errors.push(SyntaxError {
                line: line_num,
                message: format!("expected `key: value`, found {line:?}"),
            });
            open_key = None;
            continue;
        };

        if let Some(prev) = entries.iter().find(|e| e.key == key) {
            errors.push(SyntaxError {
                line: line_num,
                message: format!("duplicate key {:?} (first defined on line {})", key, prev.line),
            });
            open_key = None;
            continue;
        }

        in_block_scalar = false;
        if is_block_scalar(raw_value.trim()) {
            errors.push(SyntaxError {
                line: line_num,
                message: format!(
                    "key {key:?} uses a YAML block scalar; write the value on a single line"
                ),
            });
            in_block_scalar = true;
            open_key = None;
            continue;
        }

        let value = parse_value(raw_value.trim());
        open_key = Some(entries.len());
        entries.push(FrontmatterEntry {
            key,
            value,
            line: line_num,
        });
    }

    if errors.is_empty() {
        Ok(FrontmatterMap { entries })
    } else {
        Err(errors)
    }
}

/// Split a `key: value` line. Keys are restricted to letters, digits,
/// hyphens, and underscores.
fn parse_kv(line: &str) -> Option<(String, &str)> {
    let colon_pos = line.find(':')?;
    let key = line[..colon_pos].trim();
    let valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_key {
        return None;
    }
    let after = &line[colon_pos + 1..];
    // `key:value` without a space is a plain scalar in YAML, not a mapping.
    if !after.is_empty() && !after.starts_with(char::is_whitespace) {
        return None;
    }
    Some((key.to_string(), after))
}

/// `|`, `>`, and their chomping/indentation variants such as `|-` or `>2`.
fn is_block_scalar(value: &str) -> bool {
    let value = strip_comment(value);
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| matches!(c, '-' | '+') || c.is_ascii_digit())
}

fn parse_value(value: &str) -> FieldValue {
    let value = strip_comment(value);
    if value.is_empty() || value == "~" || value == "null" {
        return FieldValue::Null;
    }
    if value.starts_with('[') && value.ends_with(']') {
        let inner = &value[1..value.len() - 1];
        return FieldValue::List(
            split_flow_sequence(inner)
                .into_iter()
                .map(unquote)
                .collect(),
        );
    }
    FieldValue::Scalar(unquote(value))
}

/// Drop a trailing ` # comment` from an unquoted value.
fn strip_comment(value: &str) -> &str {
    if value.starts_with('"') || value.starts_with('\'') {
        return value;
    }
    match value.find(" #") {
        Some(pos) => value[..pos].trim_end(),
        None => value,
    }
}

fn unquote(value: &str) -> String {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == b'"' && last == b'"' {
            return value[1..value.len() - 1]
                .replace("\\\"", "\"")
                .replace("\\\\", "\\");
        }
        if first == b'\'' && last == b'\'' {
            return value[1..value.len() - 1].replace("''", "'");
        }
    }
    value.to_string()
}

/// Split a flow-sequence inner string on commas that are not inside quotes.
///
/// `["a, b", c]` → `["\"a, b\"", "c"]`
fn split_flow_sequence(inner: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '"' | '\'' if quote == Some(c) => quote = None,
            '"' | '\'' if quote.is_none() => quote = Some(c),
            ',' if quote.is_none() => {
                items.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        items.push(last);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_sequence_respects_quotes() {
        assert_eq!(split_flow_sequence(r#""a, b", c"#), vec![r#""a, b""#, "c"]);
        assert!(split_flow_sequence("").is_empty());
    }

    #[test]
    fn comments_are_stripped_outside_quotes() {
        assert_eq!(parse_value("community # default"), FieldValue::Scalar("community".into()));
        assert_eq!(parse_value("\"a # b\""), FieldValue::Scalar("a # b".into()));
    }

    #[test]
    fn url_value_is_not_split_on_scheme_colon() {
        let map = parse_frontmatter("website: https://example.com\n", 1).unwrap();
        assert_eq!(
            map.get("website").unwrap().value,
            FieldValue::Scalar("https://example.com".into())
        );
    }
}
