//! HTML attribute maps and the merge rules between them.
//!
//! Each control computes a default [`Attrs`] map and the caller may pass
//! another one on top. Caller keys replace default keys, except `class`,
//! whose whitespace-separated tokens are unioned in first-appearance order.
//!
//! Rendering is deterministic: `type`, `name` and `value` come first in that
//! order, then every other key alphabetically. Values are always escaped.

use std::collections::{BTreeMap, HashMap};

use formsmith_core::escape_html;

/// Attributes rendered as bare keywords when their value is `"true"` and
/// omitted entirely when their value is `"false"`.
pub const BOOLEAN_ATTRS: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "checked",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "multiple",
    "novalidate",
    "readonly",
    "required",
    "selected",
];

/// Keys floated to the front of the rendered attribute list, in this order.
const LEADING_KEYS: [&str; 3] = ["type", "name", "value"];

/// An ordered map of HTML attributes.
///
/// Build one with the chain methods or from an array of pairs:
///
/// ```
/// use formsmith_forms::Attrs;
///
/// let attrs = Attrs::new().set("id", "email").class("wide").flag("required");
/// assert_eq!(attrs.render(), r#" class="wide" id="email" required"#);
///
/// let same: Attrs = [("id", "email"), ("class", "wide"), ("required", "true")].into();
/// assert_eq!(attrs, same);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    inner: BTreeMap<String, String>,
}

impl Attrs {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self {
            inner: BTreeMap::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a boolean attribute (rendered as a bare keyword).
    #[must_use]
    pub fn flag(self, key: impl Into<String>) -> Self {
        self.set(key, "true")
    }

    /// Adds class tokens, keeping any already present.
    #[must_use]
    pub fn class(mut self, classes: &str) -> Self {
        self.add_class(classes);
        self
    }

    /// Sets an attribute in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), value.into());
    }

    /// Removes an attribute and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.inner.remove(key)
    }

    /// Returns the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).map(String::as_str)
    }

    /// Returns `true` if the attribute is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns `true` if the attribute is present and not set to `"false"`.
    pub fn is_flag_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v != "false")
    }

    /// Returns the number of attributes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Unions class tokens into the `class` attribute.
    ///
    /// Blank input leaves the map untouched.
    pub fn add_class(&mut self, classes: &str) {
        if classes.split_whitespace().next().is_none() {
            return;
        }
        let merged = match self.inner.get("class") {
            Some(existing) => union_classes(existing, classes),
            None => union_classes("", classes),
        };
        self.inner.insert("class".to_string(), merged);
    }

    /// Returns a fresh map with `overrides` layered on top of `self`.
    ///
    /// Keys in `overrides` win, except `class`, which is the token union of
    /// both sides. Neither input is modified.
    #[must_use]
    pub fn merge(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        for (key, value) in &overrides.inner {
            if key == "class" {
                let base = merged.inner.get("class").map_or("", String::as_str);
                let union = union_classes(base, value);
                merged.inner.insert(key.clone(), union);
            } else {
                merged.inner.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    /// Renders the attributes as ` key="value"` pairs with a leading space.
    ///
    /// Keys that are not valid attribute names are skipped.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for key in LEADING_KEYS {
            if let Some(value) = self.inner.get(key) {
                push_attr(&mut out, key, value);
            }
        }
        for (key, value) in &self.inner {
            if LEADING_KEYS.contains(&key.as_str()) {
                continue;
            }
            if !is_valid_attr_name(key) {
                tracing::warn!(attribute = %key, "skipping invalid attribute name");
                continue;
            }
            push_attr(&mut out, key, value);
        }
        out
    }
}

/// Merges caller-supplied maps over a default map, left to right.
///
/// Later maps win for ordinary keys; `class` tokens accumulate across all maps.
pub fn merge_attrs(defaults: &Attrs, overrides: &[&Attrs]) -> Attrs {
    overrides
        .iter()
        .fold(defaults.clone(), |acc, layer| acc.merge(layer))
}

/// Tokenizes two class lists on whitespace and unions them, preserving the
/// order in which each token first appears.
pub fn union_classes(base: &str, extra: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    for token in base.split_whitespace().chain(extra.split_whitespace()) {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
    tokens.join(" ")
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    if BOOLEAN_ATTRS.contains(&key) {
        match value {
            "true" => {
                out.push(' ');
                out.push_str(key);
                return;
            }
            "false" => return,
            _ => {}
        }
    }
    out.push(' ');
    out.push_str(key);
    out.push_str("=\"");
    out.push_str(&escape_html(value));
    out.push('"');
}

fn is_valid_attr_name(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.' | '@'))
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attrs {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for Attrs {
    fn from(map: HashMap<String, String>) -> Self {
        Self {
            inner: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
