//! Choices offered by selects and radio groups.

use serde::{Deserialize, Serialize};

/// One `<option>` of a select, optionally inside an `<optgroup>`.
///
/// Consecutive options sharing a non-empty `group` render inside a single
/// `<optgroup label="...">`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value, compared against the field's resolved value.
    pub value: String,
    /// Display text.
    pub text: String,
    /// Optgroup label; empty for ungrouped options.
    #[serde(default)]
    pub group: String,
}

impl SelectOption {
    /// Creates an ungrouped option.
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            group: String::new(),
        }
    }

    /// Places the option in an optgroup.
    #[must_use]
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }
}

impl<V: Into<String>, T: Into<String>> From<(V, T)> for SelectOption {
    fn from((value, text): (V, T)) -> Self {
        Self::new(value, text)
    }
}

/// Builds a list of options from `(value, text)` pairs.
pub fn options<V, T, I>(pairs: I) -> Vec<SelectOption>
where
    V: Into<String>,
    T: Into<String>,
    I: IntoIterator<Item = (V, T)>,
{
    pairs.into_iter().map(SelectOption::from).collect()
}

/// Splits options into runs that share a group, preserving order.
///
/// Ungrouped options form runs with an empty label.
pub(crate) fn group_runs(options: &[SelectOption]) -> Vec<(&str, &[SelectOption])> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=options.len() {
        if i == options.len() || options[i].group != options[start].group {
            runs.push((options[start].group.as_str(), &options[start..i]));
            start = i;
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_from_pairs() {
        let opts = options([("1", "Admin"), ("2", "User")]);
        assert_eq!(opts.len(), 2);
        assert_eq!(opts[1], SelectOption::new("2", "User"));
        assert!(opts[0].group.is_empty());
    }

    #[test]
    fn test_group_runs_collapse_consecutive() {
        let opts = vec![
            SelectOption::new("a", "A").group("G1"),
            SelectOption::new("b", "B").group("G1"),
            SelectOption::new("c", "C"),
            SelectOption::new("d", "D").group("G1"),
        ];
        let runs = group_runs(&opts);
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, "G1");
        assert_eq!(runs[0].1.len(), 2);
        assert_eq!(runs[1].0, "");
        assert_eq!(runs[2].0, "G1");
    }

    #[test]
    fn test_group_runs_empty() {
        assert!(group_runs(&[]).is_empty());
    }

    #[test]
    fn test_deserialize_without_group() {
        let opt: SelectOption = serde_json::from_str(r#"{"value":"1","text":"One"}"#).unwrap();
        assert_eq!(opt, SelectOption::new("1", "One"));
    }
}
