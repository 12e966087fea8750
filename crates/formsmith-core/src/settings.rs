//! Settings for the form builder.
//!
//! [`FormSettings`] holds the class names and reserved field names the
//! builder writes into its markup. The defaults produce Bootstrap 5 markup.
//! [`LazySettings`] provides a process-wide instance that builders fall back
//! to when they are not handed explicit settings.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{FormError, FormResult};

/// Theme and naming configuration for rendered forms.
///
/// Every field has a default, so partial documents (see
/// [`settings_loader`](crate::settings_loader)) only need to name what they change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Form field carrying the CSRF token when a config leaves it blank.
    pub csrf_field: String,
    /// Form field carrying the spoofed HTTP method.
    pub method_field: String,
    /// Default class of text-like inputs and textareas.
    pub input_class: String,
    /// Default class of `<select>` elements.
    pub select_class: String,
    /// Default class of checkboxes and radio buttons.
    pub check_class: String,
    /// Default class of `<label>` elements. Empty means no class attribute.
    pub label_class: String,
    /// Class token appended to controls whose field has an error.
    pub invalid_class: String,
    /// Class of the element carrying a field's error message.
    pub feedback_class: String,
    /// Default class of submit buttons.
    pub submit_class: String,
    /// Default class of plain buttons.
    pub button_class: String,
    /// Value of the hidden input rendered before each checkbox.
    pub unchecked_value: String,
    /// Whether model lookups may follow dotted paths (`address.city`).
    pub nested_lookup: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            csrf_field: "_csrf".to_string(),
            method_field: "_method".to_string(),
            input_class: "form-control".to_string(),
            select_class: "form-select".to_string(),
            check_class: "form-check-input".to_string(),
            label_class: String::new(),
            invalid_class: "is-invalid".to_string(),
            feedback_class: "invalid-feedback".to_string(),
            submit_class: "btn btn-primary".to_string(),
            button_class: "btn btn-secondary".to_string(),
            unchecked_value: "0".to_string(),
            nested_lookup: false,
        }
    }
}

/// A lazily-initialized, globally-accessible settings holder.
///
/// Call [`configure`](LazySettings::configure) once at startup. Reading the
/// settings before that freezes the defaults in place.
pub struct LazySettings {
    inner: OnceLock<Arc<FormSettings>>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings. Succeeds only once.
    pub fn configure(&self, settings: FormSettings) -> FormResult<()> {
        self.inner.set(Arc::new(settings)).map_err(|_| {
            FormError::Configuration("form settings have already been configured".to_string())
        })
    }

    /// Returns the configured settings, or the defaults if none were configured.
    pub fn get(&self) -> Arc<FormSettings> {
        Arc::clone(self.inner.get_or_init(|| Arc::new(FormSettings::default())))
    }

    /// Returns `true` if settings have been configured or read.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();
