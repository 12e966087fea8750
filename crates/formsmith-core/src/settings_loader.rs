//! Settings loading from configuration files.
//!
//! This module provides functions to load [`FormSettings`] from TOML and JSON
//! documents, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON document (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! Each setting maps to `FORMSMITH_<SETTING_NAME>`, e.g. `FORMSMITH_CSRF_FIELD`
//! for `csrf_field` or `FORMSMITH_NESTED_LOOKUP` for `nested_lookup`.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formsmith_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/forms.toml").unwrap();
//! let settings = settings_loader::from_toml_file_with_env("config/forms.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::{FormError, FormResult};
use crate::settings::FormSettings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
pub fn from_toml_str(toml_str: &str) -> FormResult<FormSettings> {
    toml::from_str(toml_str)
        .map_err(|e| FormError::Configuration(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> FormResult<FormSettings> {
    from_toml_str(&read_file(path.as_ref())?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> FormResult<FormSettings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
pub fn from_json_str(json_str: &str) -> FormResult<FormSettings> {
    serde_json::from_str(json_str)
        .map_err(|e| FormError::Configuration(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> FormResult<FormSettings> {
    from_json_str(&read_file(path.as_ref())?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> FormSettings {
    let mut settings = FormSettings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `FORMSMITH_*` environment variable overrides to a settings struct.
///
/// `FORMSMITH_NESTED_LOOKUP` accepts "true"/"1"/"yes"; anything else disables it.
pub fn apply_env_overrides(settings: &mut FormSettings) {
    let string_fields: [(&str, &mut String); 11] = [
        ("FORMSMITH_CSRF_FIELD", &mut settings.csrf_field),
        ("FORMSMITH_METHOD_FIELD", &mut settings.method_field),
        ("FORMSMITH_INPUT_CLASS", &mut settings.input_class),
        ("FORMSMITH_SELECT_CLASS", &mut settings.select_class),
        ("FORMSMITH_CHECK_CLASS", &mut settings.check_class),
        ("FORMSMITH_LABEL_CLASS", &mut settings.label_class),
        ("FORMSMITH_INVALID_CLASS", &mut settings.invalid_class),
        ("FORMSMITH_FEEDBACK_CLASS", &mut settings.feedback_class),
        ("FORMSMITH_SUBMIT_CLASS", &mut settings.submit_class),
        ("FORMSMITH_BUTTON_CLASS", &mut settings.button_class),
        ("FORMSMITH_UNCHECKED_VALUE", &mut settings.unchecked_value),
    ];
    for (var, field) in string_fields {
        if let Ok(val) = std::env::var(var) {
            tracing::debug!(var, "applying form settings override");
            *field = val;
        }
    }

    if let Ok(val) = std::env::var("FORMSMITH_NESTED_LOOKUP") {
        settings.nested_lookup = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }
}

fn read_file(path: &Path) -> FormResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        FormError::Configuration(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_partial() {
        let settings = from_toml_str(
            r#"
            input_class = "input"
            nested_lookup = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.input_class, "input");
        assert!(settings.nested_lookup);
        assert_eq!(settings.csrf_field, "_csrf");
    }

    #[test]
    fn test_from_toml_str_empty_is_default() {
        assert_eq!(from_toml_str("").unwrap(), FormSettings::default());
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str("nested_lookup = \"maybe\"").unwrap_err();
        assert!(matches!(err, FormError::Configuration(_)));
    }

    #[test]
    fn test_from_json_str_partial() {
        let settings = from_json_str(r#"{"csrf_field": "authenticity_token"}"#).unwrap();
        assert_eq!(settings.csrf_field, "authenticity_token");
        assert_eq!(settings.method_field, "_method");
    }

    #[test]
    fn test_from_json_str_malformed() {
        assert!(from_json_str("{").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/forms.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/forms.toml"));
    }

    #[test]
    fn test_from_toml_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "formsmith-settings-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "submit_class = \"button\"\n").unwrap();
        let settings = from_toml_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(settings.submit_class, "button");
    }

    #[test]
    fn test_apply_env_overrides() {
        std::env::set_var("FORMSMITH_FEEDBACK_CLASS", "error-text");
        let mut settings = FormSettings::default();
        apply_env_overrides(&mut settings);
        std::env::remove_var("FORMSMITH_FEEDBACK_CLASS");
        assert_eq!(settings.feedback_class, "error-text");
    }
}
