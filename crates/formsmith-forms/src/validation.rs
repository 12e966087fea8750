//! Validation adapter.
//!
//! Records declare their rules with `#[derive(validator::Validate)]`.
//! [`FormValidator`] runs them and reshapes the result for re-rendering:
//! one message per failed field (the first rule that failed), keyed by the
//! field's form name, plus a flag saying whether anything failed.
//!
//! Rule failures are data, not errors. The only error is structural: the
//! record must serialize to a map of named fields.
//!
//! `validator` names fields as Rust declares them; the record's
//! [`FormFields`] impl translates them to their serialized names, so a
//! failure lands on the same key the form and the bound model use.
//!
//! ```
//! use formsmith_forms::validation::validate;
//! use formsmith_forms::{FormFields, RenameAll};
//! use serde::Serialize;
//! use validator::Validate;
//!
//! #[derive(Serialize, Validate)]
//! #[serde(rename_all = "camelCase")]
//! struct Signup {
//!     #[validate(length(min = 1, message = "Name is required"))]
//!     full_name: String,
//!     #[validate(email)]
//!     email: String,
//! }
//!
//! impl FormFields for Signup {
//!     const RENAME_ALL: Option<RenameAll> = Some(RenameAll::CamelCase);
//! }
//!
//! let outcome = validate(&Signup { full_name: String::new(), email: "nope".into() }).unwrap();
//! assert!(outcome.failed);
//! assert_eq!(outcome.errors["fullName"], "Name is required");
//! assert_eq!(outcome.errors["email"], "Enter a valid email address.");
//! ```

use std::collections::HashMap;

use formsmith_core::{FormError, FormResult};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::names::{form_key, FormFields};
use crate::FieldErrors;

/// The outcome of validating one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// One message per failed field, keyed by form name.
    pub errors: FieldErrors,
    /// Whether any field failed.
    pub failed: bool,
}

impl Validation {
    /// Returns `true` if every rule passed.
    pub const fn is_valid(&self) -> bool {
        !self.failed
    }

    /// Consumes the outcome, returning the error map for a form config.
    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// Runs `validator` rules and flattens their report into form errors.
///
/// A validator holds only message overrides and is immutable once built,
/// so a single instance serves every request.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    messages: HashMap<String, String>,
}

impl FormValidator {
    /// Creates a validator with the built-in default messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the fallback message for a rule code (e.g. `"email"`).
    ///
    /// Messages declared on the rule itself still take precedence.
    #[must_use]
    pub fn with_message(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(code.into(), message.into());
        self
    }

    /// Validates a record.
    ///
    /// Errors are keyed by serialized field name. Nested records
    /// (`#[validate(nested)]`) report under dotted names such as
    /// `address.city` or `items.0.name`; their segments are matched against
    /// the serialized nested value.
    pub fn validate<T>(&self, record: &T) -> FormResult<Validation>
    where
        T: Validate + Serialize + FormFields + ?Sized,
    {
        let shape = serde_json::to_value(record)?;
        if !shape.is_object() {
            let found = match shape {
                Value::Null => "null",
                Value::Bool(_) => "boolean",
                Value::Number(_) => "number",
                Value::String(_) => "string",
                Value::Array(_) => "array",
                Value::Object(_) => "record",
            };
            tracing::warn!(found, "validation target is not a record");
            return Err(FormError::NotARecord { found });
        }

        let mut errors = FieldErrors::new();
        if let Err(report) = record.validate() {
            self.collect("", &report, Some(&shape), &T::form_name, &mut errors);
        }
        let failed = !errors.is_empty();
        tracing::debug!(failed_fields = errors.len(), "record validated");
        Ok(Validation { errors, failed })
    }

    fn collect(
        &self,
        prefix: &str,
        report: &ValidationErrors,
        shape: Option<&Value>,
        declared: &dyn Fn(&str) -> Option<String>,
        out: &mut FieldErrors,
    ) {
        let record = shape.and_then(Value::as_object);
        for (field, kind) in report.errors() {
            let field: &str = field;
            let key = form_key(field, declared(field), record);
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            let child = record.and_then(|r| r.get(&key));
            match kind {
                ValidationErrorsKind::Field(failures) => {
                    if let Some(first) = failures.first() {
                        out.insert(path, self.message(first));
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    self.collect(&path, nested, child, &|_| None, out);
                }
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        let item = child.and_then(|c| c.get(*index));
                        self.collect(&format!("{path}.{index}"), nested, item, &|_| None, out);
                    }
                }
            }
        }
    }

    fn message(&self, failure: &ValidationError) -> String {
        if let Some(message) = &failure.message {
            return message.to_string();
        }
        if let Some(message) = self.messages.get(failure.code.as_ref()) {
            return message.clone();
        }
        default_message(failure)
    }
}

/// The process-wide validator behind [`validate`].
pub static VALIDATOR: Lazy<FormValidator> = Lazy::new(FormValidator::new);

/// Validates a record with the process-wide validator.
pub fn validate<T>(record: &T) -> FormResult<Validation>
where
    T: Validate + Serialize + FormFields + ?Sized,
{
    VALIDATOR.validate(record)
}

fn default_message(failure: &ValidationError) -> String {
    let param = |key: &str| failure.params.get(key).map(param_to_string);
    match failure.code.as_ref() {
        "required" => "This field is required.".to_string(),
        "email" => "Enter a valid email address.".to_string(),
        "url" => "Enter a valid URL.".to_string(),
        "length" => match (param("equal"), param("min"), param("max")) {
            (Some(equal), _, _) => format!("Ensure this value has exactly {equal} characters."),
            (None, Some(min), Some(max)) => {
                format!("Ensure this value has between {min} and {max} characters.")
            }
            (None, Some(min), None) => format!("Ensure this value has at least {min} characters."),
            (None, None, Some(max)) => format!("Ensure this value has at most {max} characters."),
            (None, None, None) => "Ensure this value has a valid length.".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Ensure this value is between {min} and {max}."),
            (Some(min), None) => format!("Ensure this value is greater than or equal to {min}."),
            (None, Some(max)) => format!("Ensure this value is less than or equal to {max}."),
            (None, None) => "Ensure this value is within range.".to_string(),
        },
        "must_match" => "The two fields do not match.".to_string(),
        "contains" => param("needle").map_or_else(
            || "Enter a valid value.".to_string(),
            |needle| format!("This value must contain \"{needle}\"."),
        ),
        "does_not_contain" => param("needle").map_or_else(
            || "Enter a valid value.".to_string(),
            |needle| format!("This value must not contain \"{needle}\"."),
        ),
        "credit_card" => "Enter a valid card number.".to_string(),
        "ip" => "Enter a valid IP address.".to_string(),
        _ => "Enter a valid value.".to_string(),
    }
}

fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
