//! Reading template function arguments.

use std::collections::HashMap;

use formsmith_core::{FormError, FormResult};
use formsmith_forms::{Attrs, SelectOption};
use serde_json::Value;

/// The keyword arguments of one function call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Args<'a> {
    function: &'static str,
    inner: &'a HashMap<String, Value>,
}

impl<'a> Args<'a> {
    pub(crate) const fn new(function: &'static str, inner: &'a HashMap<String, Value>) -> Self {
        Self { function, inner }
    }

    fn error(&self, message: impl std::fmt::Display) -> FormError {
        FormError::Template(format!("{}: {message}", self.function))
    }

    /// A required scalar argument, rendered as a string.
    pub(crate) fn string(&self, key: &str) -> FormResult<String> {
        match self.inner.get(key) {
            None | Some(Value::Null) => Err(self.error(format!("missing `{key}` argument"))),
            Some(value) => {
                scalar(value).ok_or_else(|| self.error(format!("`{key}` must be a string")))
            }
        }
    }

    /// Caller attributes from the `attrs` map plus every keyword outside
    /// `reserved`.
    ///
    /// Keyword names have `_` replaced by `-`, so `data_id="7"` renders
    /// `data-id="7"`. Keywords win over `attrs` entries of the same name.
    /// `null` values are skipped; `true`/`false` follow the boolean attribute
    /// rules.
    pub(crate) fn attrs(&self, reserved: &[&str]) -> FormResult<Attrs> {
        let mut attrs = Attrs::new();

        match self.inner.get("attrs") {
            None | Some(Value::Null) => {}
            Some(Value::Object(map)) => {
                for (key, value) in map {
                    self.put(&mut attrs, key.clone(), value)?;
                }
            }
            Some(_) => return Err(self.error("`attrs` must be a map")),
        }

        let mut keywords: Vec<_> = self
            .inner
            .iter()
            .filter(|(key, _)| key.as_str() != "attrs" && !reserved.contains(&key.as_str()))
            .collect();
        keywords.sort_by(|a, b| a.0.cmp(b.0));
        for (key, value) in keywords {
            self.put(&mut attrs, key.replace('_', "-"), value)?;
        }

        Ok(attrs)
    }

    fn put(&self, attrs: &mut Attrs, key: String, value: &Value) -> FormResult<()> {
        if value.is_null() {
            return Ok(());
        }
        let value = scalar(value)
            .ok_or_else(|| self.error(format!("attribute `{key}` must be a scalar")))?;
        attrs.insert(key, value);
        Ok(())
    }

    /// The `options` argument: a list of `{value, text, group}` maps,
    /// `[value, text]` pairs, or bare scalars used as both value and text.
    pub(crate) fn options(&self) -> FormResult<Vec<SelectOption>> {
        let items = match self.inner.get("options") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.error("`options` must be a list")),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                option(item).ok_or_else(|| self.error(format!("option {i} is malformed")))
            })
            .collect()
    }
}

fn option(item: &Value) -> Option<SelectOption> {
    match item {
        Value::Object(_) => serde_json::from_value(item.clone()).ok(),
        Value::Array(pair) => match pair.as_slice() {
            [value, text] => Some(SelectOption::new(scalar(value)?, scalar(text)?)),
            _ => None,
        },
        other => scalar(other).map(|v| SelectOption::new(v.clone(), v)),
    }
}

/// Renders a string, number, or boolean as text.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
