//! Previously submitted form values.
//!
//! [`OldInput`] is the multi-map a request handler hands back to the form
//! builder after a failed submission, so every control can be repopulated
//! with what the user typed. A key may appear several times (multi-selects,
//! checkbox groups, or a checkbox plus its hidden companion).

use std::collections::hash_map;
use std::collections::HashMap;

/// A dictionary that maps field names to the ordered list of submitted values.
///
/// Unlike a query-string dictionary that favours the last value,
/// [`get`](OldInput::get) returns the **first** value, which is the one a
/// single-valued control repopulates from.
///
/// # Examples
///
/// ```
/// use formsmith_core::OldInput;
///
/// let mut old = OldInput::new();
/// old.append("role", "admin");
/// old.append("role", "editor");
///
/// assert_eq!(old.get("role"), Some("admin"));
/// assert_eq!(old.get_list("role"), Some(&["admin".to_string(), "editor".to_string()][..]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OldInput {
    inner: HashMap<String, Vec<String>>,
}

impl OldInput {
    /// Creates an empty `OldInput`.
    pub fn new() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }

    /// Parses an `application/x-www-form-urlencoded` body, keeping the
    /// submission order of repeated keys.
    pub fn from_urlencoded(body: &str) -> Self {
        url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Returns the **first** value submitted for the key.
    ///
    /// Returns `None` when the key is absent or was submitted with no values.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Returns every value submitted for the key, in submission order.
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.inner.get(key).map(Vec::as_slice)
    }

    /// Sets the value for a key, replacing any existing values.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(key.into(), vec![value.into()]);
    }

    /// Replaces all values for a key.
    pub fn set_list(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.inner.insert(key.into(), values);
    }

    /// Appends a value to the list for the given key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(key.into()).or_default().push(value.into());
    }

    /// Returns an iterator over the field names.
    pub fn keys(&self) -> hash_map::Keys<'_, String, Vec<String>> {
        self.inner.keys()
    }

    /// Returns the number of distinct field names.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns `true` if the field was submitted, even with no values.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Returns an iterator over (field name, value list) pairs.
    pub fn iter(&self) -> hash_map::Iter<'_, String, Vec<String>> {
        self.inner.iter()
    }
}

impl From<HashMap<String, Vec<String>>> for OldInput {
    fn from(inner: HashMap<String, Vec<String>>) -> Self {
        Self { inner }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OldInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut old = Self::new();
        for (k, v) in iter {
            old.append(k, v);
        }
        old
    }
}

impl IntoIterator for OldInput {
    type Item = (String, Vec<String>);
    type IntoIter = hash_map::IntoIter<String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a OldInput {
    type Item = (&'a String, &'a Vec<String>);
    type IntoIter = hash_map::Iter<'a, String, Vec<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let old = OldInput::new();
        assert!(old.is_empty());
        assert_eq!(old.len(), 0);
        assert_eq!(old.get("name"), None);
    }

    #[test]
    fn test_get_returns_first() {
        let mut old = OldInput::new();
        old.append("tag", "a");
        old.append("tag", "b");
        assert_eq!(old.get("tag"), Some("a"));
        assert_eq!(old.get_list("tag").unwrap().len(), 2);
    }

    #[test]
    fn test_set_replaces() {
        let mut old = OldInput::new();
        old.append("tag", "a");
        old.set("tag", "z");
        assert_eq!(old.get_list("tag"), Some(&["z".to_string()][..]));
    }

    #[test]
    fn test_empty_list_is_present_but_has_no_first() {
        let mut old = OldInput::new();
        old.set_list("tags", Vec::new());
        assert!(old.contains_key("tags"));
        assert_eq!(old.get("tags"), None);
    }

    #[test]
    fn test_from_urlencoded_keeps_order_and_decodes() {
        let old = OldInput::from_urlencoded("name=Jane+Doe&role=2&role=3&note=a%26b");
        assert_eq!(old.get("name"), Some("Jane Doe"));
        assert_eq!(
            old.get_list("role"),
            Some(&["2".to_string(), "3".to_string()][..])
        );
        assert_eq!(old.get("note"), Some("a&b"));
    }

    #[test]
    fn test_from_iterator() {
        let old: OldInput = [("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(old.len(), 2);
        assert_eq!(old.get_list("a").unwrap().len(), 2);
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), vec!["Jane".to_string()]);
        let old = OldInput::from(map);
        assert_eq!(old.get("name"), Some("Jane"));
    }
}
