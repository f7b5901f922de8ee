//! Per-file descriptors.
//!
//! A descriptor carries a source file's `name`, `requires`, `provides`,
//! `license` and `authors`. It is read from a front-matter block embedded
//! in the file's first matching block comment:
//!
//! ```text
//! /*
//! ---
//! name: Element
//! requires: [Core, Browser]
//! provides: Element
//! ...
//! */
//! ```
//!
//! The block opens with a `---` line and closes with a `---` or `...` line
//! directly before the comment terminator. When a file has no such block, a
//! descriptor declared inline next to the path in the manifest is used
//! instead, provided it is a mapping.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

/// Matches the first front-matter block comment; group 1 is the YAML body.
static FRONT_MATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)/\*\s*^---(.*?)^(?:\.\.\.|---)\s*\*/").expect("front matter regex is valid")
});

/// Keys lifted into typed descriptor fields.
const KNOWN_KEYS: [&str; 4] = ["name", "requires", "provides", "license"];

/// Structured metadata for one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Descriptor {
    /// Explicit file name
    pub name: Option<String>,

    /// Raw requirement entries, not yet qualified
    pub requires: Vec<String>,

    /// Provided component names
    pub provides: Vec<String>,

    /// File-level license
    pub license: Option<String>,

    /// Normalized file-level authors
    pub authors: Vec<String>,

    /// Every other descriptor field
    pub extra: Map<String, Value>,
}

/// Where a descriptor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorOrigin {
    FrontMatter,
    Manifest,
    None,
}

impl Descriptor {
    /// Build a descriptor from a decoded document. Non-mappings yield an empty descriptor.
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Descriptor::default();
        };

        let extra = fields
            .iter()
            .filter(|(key, _)| !KNOWN_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Descriptor {
            name: fields.get("name").and_then(non_empty_str).map(String::from),
            requires: string_list(fields.get("requires")),
            provides: string_list(fields.get("provides")),
            license: fields.get("license").and_then(non_empty_str).map(String::from),
            authors: normalize_authors(fields.get("authors"), fields.get("author")),
            extra,
        }
    }

    /// Extract the descriptor for a source file.
    ///
    /// Front matter in `source` wins; otherwise a mapping `inline` descriptor
    /// from the manifest is used. A front-matter block that fails to decode is
    /// logged and treated as empty.
    pub fn extract(source: &str, inline: Option<&Value>, path: &Path) -> (Self, DescriptorOrigin) {
        if let Some(body) = front_matter(source) {
            let descriptor = match serde_yaml::from_str::<Value>(body) {
                Ok(value) => Descriptor::from_value(&value),
                Err(e) => {
                    tracing::warn!(
                        "unable to parse front matter in {}: {}",
                        path.display(),
                        e
                    );
                    Descriptor::default()
                }
            };
            return (descriptor, DescriptorOrigin::FrontMatter);
        }

        match inline {
            Some(value) if value.is_object() => {
                (Descriptor::from_value(value), DescriptorOrigin::Manifest)
            }
            _ => (Descriptor::default(), DescriptorOrigin::None),
        }
    }
}

/// Return the YAML body of the first front-matter block in `source`.
pub fn front_matter(source: &str) -> Option<&str> {
    FRONT_MATTER
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|body| body.as_str())
}

/// Treat empty strings and null as absent.
pub(crate) fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Number(_) => false,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a scalar-or-list field to a list of strings; empty values become an empty list.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(v) if is_empty(v) => Vec::new(),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(v) => scalar_to_string(v).into_iter().collect(),
    }
}

/// Normalize author fields to a list.
///
/// `authors` wins over `author` unless it is empty. A list is taken as is,
/// a scalar becomes a singleton and anything empty yields no authors.
pub fn normalize_authors(authors: Option<&Value>, author: Option<&Value>) -> Vec<String> {
    let chosen = match authors {
        Some(v) if !is_empty(v) => Some(v),
        _ => author,
    };
    string_list(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FILE: &str = r#"/*
---
name: Element
description: DOM helpers
requires: [Core, more/Browser]
provides: Element
license: MIT
authors: [A, B]
...
*/

var Element = {};
"#;

    #[test]
    fn test_front_matter_extraction() {
        let (descriptor, origin) = Descriptor::extract(FILE, None, Path::new("Element.js"));
        assert_eq!(origin, DescriptorOrigin::FrontMatter);
        assert_eq!(descriptor.name.as_deref(), Some("Element"));
        assert_eq!(descriptor.requires, vec!["Core", "more/Browser"]);
        assert_eq!(descriptor.provides, vec!["Element"]);
        assert_eq!(descriptor.license.as_deref(), Some("MIT"));
        assert_eq!(descriptor.authors, vec!["A", "B"]);
        assert_eq!(descriptor.extra.get("description"), Some(&json!("DOM helpers")));
        assert!(!descriptor.extra.contains_key("requires"));
    }

    #[test]
    fn test_front_matter_closed_with_dashes() {
        let source = "/*\n---\nprovides: [X]\n---\n*/\ncode();";
        let (descriptor, _) = Descriptor::extract(source, None, Path::new("x.js"));
        assert_eq!(descriptor.provides, vec!["X"]);
    }

    #[test]
    fn test_front_matter_takes_precedence_over_inline() {
        let inline = json!({"provides": ["Inline"]});
        let (descriptor, origin) = Descriptor::extract(FILE, Some(&inline), Path::new("e.js"));
        assert_eq!(origin, DescriptorOrigin::FrontMatter);
        assert_eq!(descriptor.provides, vec!["Element"]);
    }

    #[test]
    fn test_inline_descriptor_fallback() {
        let inline = json!({"provides": "Inline", "requires": ["Core"]});
        let (descriptor, origin) =
            Descriptor::extract("plain();", Some(&inline), Path::new("i.js"));
        assert_eq!(origin, DescriptorOrigin::Manifest);
        assert_eq!(descriptor.provides, vec!["Inline"]);
        assert_eq!(descriptor.requires, vec!["Core"]);
    }

    #[test]
    fn test_scalar_inline_descriptor_is_ignored() {
        let inline = json!("not a map");
        let (descriptor, origin) =
            Descriptor::extract("plain();", Some(&inline), Path::new("i.js"));
        assert_eq!(origin, DescriptorOrigin::None);
        assert_eq!(descriptor, Descriptor::default());
    }

    #[test]
    fn test_front_matter_must_open_the_comment() {
        let source = "/* just a comment\n---\nprovides: [X]\n---\n*/\ncode();";
        assert!(front_matter(source).is_none());
    }

    #[test]
    fn test_front_matter_must_end_at_comment_close() {
        let source = "/*\n---\nprovides: [X]\n...\n still comment */";
        assert!(front_matter(source).is_none());
    }

    #[test]
    fn test_empty_values_become_empty_lists() {
        let descriptor = Descriptor::from_value(&json!({"requires": "", "provides": null}));
        assert!(descriptor.requires.is_empty());
        assert!(descriptor.provides.is_empty());
    }

    #[test]
    fn test_normalize_authors() {
        assert_eq!(
            normalize_authors(Some(&json!(["A", "B"])), Some(&json!("C"))),
            vec!["A", "B"]
        );
        assert_eq!(normalize_authors(Some(&json!([])), Some(&json!("C"))), vec!["C"]);
        assert_eq!(normalize_authors(None, Some(&json!("C"))), vec!["C"]);
        assert!(normalize_authors(None, None).is_empty());
        assert!(normalize_authors(Some(&json!("")), None).is_empty());
    }
}
