use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

/// Key/value metadata attached to a transaction. Carried in the transaction
/// comment as `key: value` lines.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    /// Creates empty `Metadata`.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Starts declarative creation of `Metadata`.
    pub fn builder() -> MetadataBuilder {
        MetadataBuilder {
            meta: Metadata::new(),
        }
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, k: K, v: V) {
        self.0.insert(k.into(), v.into());
    }

    pub fn get(&self, k: &str) -> Option<&str> {
        self.0.get(k).map(String::as_str)
    }

    /// Returns true if `k` is present with a truthy value.
    pub fn is_flagged(&self, k: &str) -> bool {
        self.get(k).map(is_truthy).unwrap_or(false)
    }

    /// Parses the `key: value` lines of a transaction comment. Other lines
    /// are ignored.
    pub fn from_opt_comment(comment: Option<&str>) -> Self {
        lazy_static! {
            static ref VALUE_RX: Regex = Regex::new(r"^[ ]*([^: ]+):(?:[ ]+(.*))?$").unwrap();
        }

        let mut result = Metadata::new();
        for line in comment.unwrap_or("").split('\n') {
            if let Some(kv) = VALUE_RX.captures(line) {
                let value = kv.get(2).map(|c| c.as_str().trim()).unwrap_or("");
                result.insert(&kv[1], value);
            }
        }
        result
    }

    /// Formats the entries as comment lines, in key order. Line breaks inside
    /// values are folded into spaces, as a value cannot span lines.
    pub fn into_opt_comment(self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        let lines: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| {
                let v = v.split_whitespace().collect::<Vec<&str>>().join(" ");
                if v.is_empty() {
                    format!("{}:", k.trim())
                } else {
                    format!("{}: {}", k.trim(), v)
                }
            })
            .collect();
        Some(lines.join("\n"))
    }
}

/// Interprets a metadata value as a boolean flag.
pub fn is_truthy(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

/// Helper to declaratively define `Metadata`.
#[derive(Clone)]
pub struct MetadataBuilder {
    meta: Metadata,
}

impl MetadataBuilder {
    pub fn build(self) -> Metadata {
        self.meta
    }

    pub fn with_value<K: Into<String>, V: Into<String>>(mut self, k: K, v: V) -> Self {
        self.meta.insert(k, v);
        self
    }

    /// Adds the value only if it is present and not blank.
    pub fn with_nonempty_value<K: Into<String>>(mut self, k: K, v: &str) -> Self {
        if !v.trim().is_empty() {
            self.meta.insert(k, v.trim());
        }
        self
    }
}
