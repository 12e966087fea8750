//! Form names of record fields.
//!
//! `validator` reports failures under Rust field names, while forms, old
//! input and bound models use the serialized names. [`FormFields`] carries a
//! record's `#[serde(rename)]` and `#[serde(rename_all)]` choices so the two
//! line up:
//!
//! ```
//! use formsmith_forms::{FormFields, RenameAll};
//!
//! #[derive(serde::Serialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Signup {
//!     #[serde(rename = "login")]
//!     user_name: String,
//!     first_name: String,
//! }
//!
//! impl FormFields for Signup {
//!     const RENAME_ALL: Option<RenameAll> = Some(RenameAll::CamelCase);
//!
//!     fn renamed(field: &str) -> Option<&'static str> {
//!         match field {
//!             "user_name" => Some("login"),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Signup::form_name("user_name").as_deref(), Some("login"));
//! assert_eq!(Signup::form_name("first_name").as_deref(), Some("firstName"));
//! ```

use serde_json::{Map, Value};

/// A `#[serde(rename_all = "...")]` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenameAll {
    /// `lowercase`
    LowerCase,
    /// `UPPERCASE`
    UpperCase,
    /// `PascalCase`
    PascalCase,
    /// `camelCase`
    CamelCase,
    /// `snake_case`
    SnakeCase,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnakeCase,
    /// `kebab-case`
    KebabCase,
    /// `SCREAMING-KEBAB-CASE`
    ScreamingKebabCase,
}

impl RenameAll {
    /// Every rule, in the order names are inferred.
    pub const ALL: [Self; 8] = [
        Self::CamelCase,
        Self::PascalCase,
        Self::KebabCase,
        Self::ScreamingSnakeCase,
        Self::ScreamingKebabCase,
        Self::UpperCase,
        Self::LowerCase,
        Self::SnakeCase,
    ];

    /// Parses the attribute value serde accepts (`"camelCase"`, ...).
    pub fn parse(rule: &str) -> Option<Self> {
        Some(match rule {
            "lowercase" => Self::LowerCase,
            "UPPERCASE" => Self::UpperCase,
            "PascalCase" => Self::PascalCase,
            "camelCase" => Self::CamelCase,
            "snake_case" => Self::SnakeCase,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnakeCase,
            "kebab-case" => Self::KebabCase,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebabCase,
            _ => return None,
        })
    }

    /// Applies the rule to a snake_case Rust field name.
    pub fn transform(self, field: &str) -> String {
        match self {
            Self::LowerCase | Self::SnakeCase => field.to_string(),
            Self::UpperCase | Self::ScreamingSnakeCase => field.to_ascii_uppercase(),
            Self::PascalCase => pascal_case(field),
            Self::CamelCase => {
                let pascal = pascal_case(field);
                let mut chars = pascal.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_lowercase().chain(chars).collect()
                })
            }
            Self::KebabCase => field.replace('_', "-"),
            Self::ScreamingKebabCase => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn pascal_case(field: &str) -> String {
    field
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

/// The serde naming of a validated record's fields.
///
/// Records without renames need only an empty impl.
pub trait FormFields {
    /// The record's `#[serde(rename_all)]` rule, if any.
    const RENAME_ALL: Option<RenameAll> = None;

    /// The `#[serde(rename)]` of one field, keyed by Rust field name.
    fn renamed(field: &str) -> Option<&'static str> {
        let _ = field;
        None
    }

    /// The declared form name of a field, or `None` when it is not renamed.
    fn form_name(field: &str) -> Option<String> {
        Self::renamed(field)
            .map(str::to_string)
            .or_else(|| Self::RENAME_ALL.map(|rule| rule.transform(field)))
    }
}

/// Maps a reported field name to the key it serializes under.
///
/// A declared name wins. Otherwise the name is checked against the
/// serialized record: kept if present, else the first [`RenameAll`] rule
/// producing a present key is used. Unresolved names pass through.
pub(crate) fn form_key(
    field: &str,
    declared: Option<String>,
    record: Option<&Map<String, Value>>,
) -> String {
    if let Some(name) = declared {
        return name;
    }
    let Some(record) = record else {
        return field.to_string();
    };
    if record.contains_key(field) {
        return field.to_string();
    }
    RenameAll::ALL
        .iter()
        .map(|rule| rule.transform(field))
        .find(|candidate| record.contains_key(candidate))
        .unwrap_or_else(|| {
            tracing::debug!(field, "no serialized key for reported field");
            field.to_string()
        })
}
