//! Value resolution: deciding which string a control renders.
//!
//! For every field the resolver walks a fixed priority order and stops at
//! the first source that has the field:
//!
//! 1. old input (the previous submission),
//! 2. the bound model,
//! 3. the explicit default passed by the caller,
//! 4. the empty string.
//!
//! Sources are never mixed. Models are bound through `serde`: a record is
//! serialized once into a map and fields are looked up by their serialized
//! name, so `#[serde(rename = "...")]` acts as the form-binding tag and
//! un-renamed fields are found under their Rust name.

use std::fmt;

use formsmith_core::{FormResult, OldInput};
use serde::Serialize;
use serde_json::Value;

/// A record bound to a form, as a serialized value.
///
/// ```
/// use formsmith_forms::Model;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Profile {
///     #[serde(rename = "name")]
///     full_name: String,
///     age: u32,
/// }
///
/// let model = Model::from_serialize(&Profile { full_name: "Ada".into(), age: 36 }).unwrap();
/// assert_eq!(model.field("name", false), Some(&serde_json::json!("Ada")));
/// assert_eq!(model.field("full_name", false), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    value: Value,
}

impl Model {
    /// Serializes a record for field lookup.
    pub fn from_serialize<T: Serialize + ?Sized>(record: &T) -> FormResult<Self> {
        let value = serde_json::to_value(record)?;
        Ok(Self::from_value(value))
    }

    /// Wraps an already-serialized value.
    pub fn from_value(value: Value) -> Self {
        if !value.is_object() {
            tracing::warn!(
                kind = json_kind(&value),
                "bound model is not a record; field lookups will miss"
            );
        }
        Self { value }
    }

    /// Returns the underlying value.
    pub const fn as_value(&self) -> &Value {
        &self.value
    }

    /// Returns `true` if the model serialized to a map of named fields.
    pub fn is_record(&self) -> bool {
        self.value.is_object()
    }

    /// Returns `true` if the model has no fields to offer.
    pub fn is_empty(&self) -> bool {
        self.value.as_object().map_or(true, serde_json::Map::is_empty)
    }

    /// Looks up a top-level field by its form name (case-sensitive).
    ///
    /// With `nested` set, a miss on a dotted name such as `address.city` or
    /// `tags.0` falls back to walking nested maps and sequences.
    pub fn field(&self, name: &str, nested: bool) -> Option<&Value> {
        let map = self.value.as_object()?;
        if let Some(found) = map.get(name) {
            return Some(found);
        }
        if !nested || !name.contains('.') {
            return None;
        }
        name.split('.').try_fold(&self.value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The previous submission.
    OldInput,
    /// The bound model.
    Model,
    /// The caller's explicit default.
    Default,
    /// Nothing matched.
    Empty,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OldInput => "old_input",
            Self::Model => "model",
            Self::Default => "default",
            Self::Empty => "empty",
        })
    }
}

/// A field's value in the shape its source provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A scalar rendered as a string.
    Text(String),
    /// A boolean from the model.
    Bool(bool),
    /// A sequence from the model.
    List(Vec<String>),
    /// Every value submitted for the field, in submission order.
    Submitted(Vec<String>),
}

impl FieldValue {
    /// Converts a model value. `null` yields `None`; maps are a type
    /// mismatch and convert to the empty string.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Array(items) => Some(Self::List(items.iter().map(scalar_to_string).collect())),
            other => Some(Self::Text(scalar_to_string(other))),
        }
    }

    /// The string a text-like control renders.
    ///
    /// Submissions render their first value; model sequences are joined with commas.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::List(items) => items.join(","),
            Self::Submitted(items) => items.first().cloned().unwrap_or_default(),
        }
    }

    /// Every value, for multi-selects.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::Text(s) => vec![s.clone()],
            Self::Bool(b) => vec![b.to_string()],
            Self::List(items) | Self::Submitted(items) => items.clone(),
        }
    }

    /// Whether a checkbox or radio with the given declared value is checked.
    ///
    /// Booleans check `"1"`, `"true"` and `"on"` when true, and `"0"`,
    /// `"false"` and `"off"` when false.
    pub fn checks(&self, declared: &str) -> bool {
        match self {
            Self::Text(s) => s == declared,
            Self::Bool(true) => matches!(declared, "1" | "true" | "on"),
            Self::Bool(false) => matches!(declared, "0" | "false" | "off"),
            Self::List(items) | Self::Submitted(items) => items.iter().any(|v| v == declared),
        }
    }
}

/// The outcome of resolving one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The source that supplied the value.
    pub source: Source,
    /// The value itself.
    pub value: FieldValue,
}

impl Resolved {
    /// An empty resolution.
    pub const fn empty() -> Self {
        Self {
            source: Source::Empty,
            value: FieldValue::Text(String::new()),
        }
    }

    /// See [`FieldValue::as_text`].
    pub fn as_text(&self) -> String {
        self.value.as_text()
    }
}

/// Resolves field values against one form's old input and model.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    old_input: &'a OldInput,
    model: Option<&'a Model>,
    nested: bool,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver. `nested` enables dotted-path model lookups.
    pub const fn new(old_input: &'a OldInput, model: Option<&'a Model>, nested: bool) -> Self {
        Self {
            old_input,
            model,
            nested,
        }
    }

    /// Resolves `name` by priority: old input, model, `default`, empty.
    pub fn resolve(&self, name: &str, default: Option<&str>) -> Resolved {
        let resolved = self.lookup(name, default);
        tracing::trace!(field = name, source = %resolved.source, "resolved field value");
        resolved
    }

    /// Resolves `name` to the string a text-like control renders.
    pub fn text(&self, name: &str, default: Option<&str>) -> String {
        self.resolve(name, default).as_text()
    }

    /// Resolves `name` to every value, for multi-value controls.
    pub fn list(&self, name: &str, default: Option<&str>) -> Vec<String> {
        let resolved = self.resolve(name, default);
        match resolved.source {
            Source::Empty => Vec::new(),
            _ => resolved.value.to_list(),
        }
    }

    fn lookup(&self, name: &str, default: Option<&str>) -> Resolved {
        if let Some(values) = self.old_input.get_list(name) {
            return Resolved {
                source: Source::OldInput,
                value: FieldValue::Submitted(values.to_vec()),
            };
        }

        if let Some(value) = self
            .model
            .filter(|m| !m.is_empty())
            .and_then(|m| m.field(name, self.nested))
            .and_then(FieldValue::from_json)
        {
            return Resolved {
                source: Source::Model,
                value,
            };
        }

        match default {
            Some(default) => Resolved {
                source: Source::Default,
                value: FieldValue::Text(default.to_string()),
            },
            None => Resolved::empty(),
        }
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map(|f| f.to_string()).unwrap_or_default()
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "record",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(value: Value) -> Model {
        Model::from_value(value)
    }

    #[test]
    fn test_old_input_wins_over_model() {
        let mut old = OldInput::new();
        old.set("name", "Jane Doe");
        let m = model(json!({"name": "John Doe"}));
        let r = Resolver::new(&old, Some(&m), false).resolve("name", Some("x"));
        assert_eq!(r.source, Source::OldInput);
        assert_eq!(r.as_text(), "Jane Doe");
    }

    #[test]
    fn test_model_wins_over_default() {
        let old = OldInput::new();
        let m = model(json!({"name": "John Doe"}));
        let r = Resolver::new(&old, Some(&m), false).resolve("name", Some("x"));
        assert_eq!(r.source, Source::Model);
        assert_eq!(r.as_text(), "John Doe");
    }

    #[test]
    fn test_model_shape_checks() {
        assert!(model(json!({"name": "Ada"})).is_record());
        assert!(model(json!({})).is_record());
        assert!(!model(json!(["Ada"])).is_record());
        assert!(!model(Value::Null).is_record());
    }

    #[test]
    fn test_default_then_empty() {
        let old = OldInput::new();
        let resolver = Resolver::new(&old, None, false);
        assert_eq!(resolver.resolve("name", Some("x")).source, Source::Default);
        assert_eq!(resolver.text("name", Some("x")), "x");
        assert_eq!(resolver.resolve("name", None), Resolved::empty());
    }

    #[test]
    fn test_old_input_empty_list_is_a_hit() {
        let mut old = OldInput::new();
        old.set_list("name", Vec::new());
        let m = model(json!({"name": "John"}));
        let r = Resolver::new(&old, Some(&m), false).resolve("name", None);
        assert_eq!(r.source, Source::OldInput);
        assert_eq!(r.as_text(), "");
    }

    #[test]
    fn test_null_model_field_falls_through() {
        let old = OldInput::new();
        let m = model(json!({"nickname": null}));
        let r = Resolver::new(&old, Some(&m), false).resolve("nickname", Some("none"));
        assert_eq!(r.source, Source::Default);
    }

    #[test]
    fn test_map_model_field_is_empty_string() {
        let old = OldInput::new();
        let m = model(json!({"address": {"city": "Oslo"}}));
        let r = Resolver::new(&old, Some(&m), false).resolve("address", Some("x"));
        assert_eq!(r.source, Source::Model);
        assert_eq!(r.as_text(), "");
    }

    #[test]
    fn test_number_and_bool_conversion() {
        let old = OldInput::new();
        let m = model(json!({"age": 42, "score": 3.5, "neg": -7, "whole": 2.0, "active": true}));
        let resolver = Resolver::new(&old, Some(&m), false);
        assert_eq!(resolver.text("age", None), "42");
        assert_eq!(resolver.text("score", None), "3.5");
        assert_eq!(resolver.text("neg", None), "-7");
        assert_eq!(resolver.text("whole", None), "2");
        assert_eq!(resolver.text("active", None), "true");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let old = OldInput::new();
        let m = model(json!({"Name": "John"}));
        assert_eq!(Resolver::new(&old, Some(&m), false).text("name", None), "");
    }

    #[test]
    fn test_nested_lookup_only_when_enabled() {
        let old = OldInput::new();
        let m = model(json!({"address": {"city": "Oslo"}, "tags": ["a", "b"]}));
        assert_eq!(Resolver::new(&old, Some(&m), false).text("address.city", None), "");
        let nested = Resolver::new(&old, Some(&m), true);
        assert_eq!(nested.text("address.city", None), "Oslo");
        assert_eq!(nested.text("tags.1", None), "b");
        assert_eq!(nested.text("tags.9", Some("d")), "d");
    }

    #[test]
    fn test_non_record_model_misses() {
        let old = OldInput::new();
        let m = model(json!("just a string"));
        assert!(!m.is_record());
        assert_eq!(Resolver::new(&old, Some(&m), false).text("name", Some("d")), "d");
    }

    #[test]
    fn test_list_resolution() {
        let mut old = OldInput::new();
        old.append("roles", "1");
        old.append("roles", "3");
        let m = model(json!({"tags": ["x", 2], "single": "y"}));
        let resolver = Resolver::new(&old, Some(&m), false);
        assert_eq!(resolver.list("roles", None), vec!["1", "3"]);
        assert_eq!(resolver.list("tags", None), vec!["x", "2"]);
        assert_eq!(resolver.list("single", None), vec!["y"]);
        assert!(resolver.list("missing", None).is_empty());
    }

    #[test]
    fn test_checks() {
        assert!(FieldValue::Text("1".into()).checks("1"));
        assert!(!FieldValue::Text("1".into()).checks("2"));
        assert!(FieldValue::Bool(true).checks("1"));
        assert!(FieldValue::Bool(true).checks("true"));
        assert!(!FieldValue::Bool(true).checks("yes"));
        assert!(FieldValue::Bool(false).checks("false"));
        assert!(!FieldValue::Bool(false).checks("1"));
        assert!(FieldValue::Submitted(vec!["0".into(), "1".into()]).checks("1"));
        assert!(FieldValue::List(vec!["a".into()]).checks("a"));
    }

    #[test]
    fn test_as_text_shapes() {
        assert_eq!(FieldValue::List(vec!["a".into(), "b".into()]).as_text(), "a,b");
        assert_eq!(
            FieldValue::Submitted(vec!["first".into(), "second".into()]).as_text(),
            "first"
        );
        assert_eq!(FieldValue::Bool(false).as_text(), "false");
    }

    #[test]
    fn test_model_from_serialize_rename() {
        #[derive(Serialize)]
        struct Account {
            #[serde(rename = "email")]
            email_address: String,
        }
        let m = Model::from_serialize(&Account {
            email_address: "a@b.c".into(),
        })
        .unwrap();
        assert_eq!(m.field("email", false), Some(&json!("a@b.c")));
    }
}
