//! # formsmith-forms
//!
//! The form builder. A handler describes a form with a [`Config`] (action,
//! method, CSRF token, bound model, previous submission, field errors) and
//! hands a [`Builder`] to its template, which calls one operation per
//! control and interpolates the returned [`Html`] verbatim.
//!
//! ## Modules
//!
//! - [`attrs`] - Attribute maps, merge rules, deterministic rendering
//! - [`value`] - Value resolution (old input, model, default, empty)
//! - [`choices`] - Select and radio options
//! - [`widgets`] - HTML emission per control kind
//! - [`method`] - HTTP method spoofing
//! - [`names`] - Serialized names of record fields
//! - [`builder`] - The builder façade
//! - [`validation`] - Adapter over `validator` producing form errors

use std::collections::HashMap;

pub mod attrs;
pub mod builder;
pub mod choices;
pub mod method;
pub mod names;
pub mod validation;
pub mod value;
pub mod widgets;

pub use attrs::{merge_attrs, Attrs};
pub use builder::{field_errors, Builder, Config};
pub use choices::{options, SelectOption};
pub use formsmith_core::{FormError, FormResult, FormSettings, Html, OldInput};
pub use names::{FormFields, RenameAll};
pub use validation::{validate, FormValidator, Validation};
pub use value::{FieldValue, Model, Resolved, Resolver, Source};
pub use widgets::InputKind;

/// One error message per field, keyed by form name.
pub type FieldErrors = HashMap<String, String>;
