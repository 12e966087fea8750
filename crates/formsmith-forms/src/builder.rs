//! The form builder handed to templates.
//!
//! A request handler fills in a [`Config`], builds a [`Builder`] from it and
//! passes the builder to the template. Every operation returns an [`Html`]
//! fragment and reads the frozen config only, so a builder can be shared
//! across threads and repeated calls render byte-identical markup.
//!
//! ```
//! use formsmith_forms::{Builder, Config, OldInput};
//!
//! let mut old = OldInput::new();
//! old.set("name", "Jane Doe");
//!
//! let form = Builder::new(
//!     Config::new("/users/1", "PUT")
//!         .csrf_token("abc")
//!         .old_input(old)
//!         .error("email", "Enter a valid email address."),
//! );
//!
//! let open = form.open().into_string();
//! assert!(open.contains(r#"name="_method" value="PUT""#));
//! assert!(form.text("name").as_str().contains(r#"value="Jane Doe""#));
//! assert!(form.email("email").as_str().contains("is-invalid"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use formsmith_core::{FormResult, FormSettings, Html, OldInput, SETTINGS};
use serde::Serialize;

use crate::attrs::Attrs;
use crate::choices::SelectOption;
use crate::method;
use crate::value::{Model, Resolver};
use crate::widgets::{self, Checkbox, Input, InputKind, Radio, Select, Textarea, Widget};
use crate::FieldErrors;

/// A snapshot of one form's context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// The form's target URL.
    pub action: String,
    /// The logical HTTP method (`GET`, `POST`, `PUT`, `PATCH`, `DELETE`).
    pub method: String,
    /// The CSRF token to embed. Empty suppresses the hidden input.
    pub csrf_token: String,
    /// The form field name for the token. Empty means the settings default.
    pub csrf_field: String,
    /// The record whose fields prefill controls.
    pub model: Option<Model>,
    /// The previous submission.
    pub old_input: OldInput,
    /// One message per invalid field.
    pub errors: FieldErrors,
    /// Whether the form submits as `multipart/form-data`.
    pub multipart: bool,
}

impl Config {
    /// Creates a config for the given action and logical method.
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Sets the CSRF token.
    #[must_use]
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = token.into();
        self
    }

    /// Sets the CSRF field name.
    #[must_use]
    pub fn csrf_field(mut self, field: impl Into<String>) -> Self {
        self.csrf_field = field.into();
        self
    }

    /// Binds an already-built model.
    #[must_use]
    pub fn model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    /// Serializes and binds a record.
    pub fn bind<T: Serialize + ?Sized>(self, record: &T) -> FormResult<Self> {
        Ok(self.model(Model::from_serialize(record)?))
    }

    /// Sets the previous submission.
    #[must_use]
    pub fn old_input(mut self, old_input: OldInput) -> Self {
        self.old_input = old_input;
        self
    }

    /// Replaces the error map.
    #[must_use]
    pub fn errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Adds one field error.
    #[must_use]
    pub fn error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.insert(field.into(), message.into());
        self
    }

    /// Sets multipart encoding.
    #[must_use]
    pub const fn multipart(mut self, multipart: bool) -> Self {
        self.multipart = multipart;
        self
    }
}

/// Renders the controls of one form.
#[derive(Debug, Clone)]
pub struct Builder {
    config: Config,
    settings: Arc<FormSettings>,
}

impl Builder {
    /// Creates a builder using the process-wide settings.
    pub fn new(config: Config) -> Self {
        Self::with_settings(config, SETTINGS.get())
    }

    /// Creates a builder with explicit settings.
    pub fn with_settings(mut config: Config, settings: Arc<FormSettings>) -> Self {
        if config.csrf_field.is_empty() {
            config.csrf_field.clone_from(&settings.csrf_field);
        }
        tracing::debug!(
            action = %config.action,
            method = method::transport(&config.method),
            spoofed = ?method::spoofed(&config.method),
            multipart = config.multipart,
            old_input = config.old_input.len(),
            errors = config.errors.len(),
            "form builder created"
        );
        Self { config, settings }
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The frozen config.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The settings in effect.
    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// The CSRF field name.
    pub fn csrf_field(&self) -> &str {
        &self.config.csrf_field
    }

    /// The CSRF token.
    pub fn csrf_token(&self) -> &str {
        &self.config.csrf_token
    }

    /// All field errors.
    pub const fn errors(&self) -> &FieldErrors {
        &self.config.errors
    }

    /// The previous submission.
    pub const fn old_input(&self) -> &OldInput {
        &self.config.old_input
    }

    /// Returns `true` if the field has a non-empty error message.
    pub fn has_error(&self, name: &str) -> bool {
        self.error(name).is_some()
    }

    /// The field's error message, if non-empty.
    pub fn error(&self, name: &str) -> Option<&str> {
        self.config
            .errors
            .get(name)
            .map(String::as_str)
            .filter(|m| !m.is_empty())
    }

    /// The first submitted value for the field, or `default`.
    pub fn old(&self, name: &str, default: &str) -> String {
        self.config
            .old_input
            .get(name)
            .unwrap_or(default)
            .to_string()
    }

    /// The value a text control for the field would render.
    pub fn value(&self, name: &str, default: Option<&str>) -> String {
        self.resolver().text(name, default)
    }

    /// Every value for the field, as multi-value controls match them.
    pub fn values(&self, name: &str) -> Vec<String> {
        self.resolver().list(name, None)
    }

    // ── Form tag ─────────────────────────────────────────────────────

    /// Opens the form: the `<form>` tag, then the method override and CSRF
    /// hidden inputs when they apply.
    pub fn open(&self) -> Html {
        self.open_with(&Attrs::new())
    }

    /// Opens the form with extra attributes on the `<form>` tag.
    ///
    /// `action`, `method` and `enctype` always come from the config.
    pub fn open_with(&self, attrs: &Attrs) -> Html {
        let mut tag = attrs.clone();
        tag.insert("action", self.config.action.as_str());
        tag.insert("method", method::transport(&self.config.method));
        if self.config.multipart {
            tag.insert("enctype", "multipart/form-data");
        } else {
            tag.remove("enctype");
        }

        let mut html = Html::from_trusted(format!("<form{}>", tag.render()));
        if let Some(spoofed) = method::spoofed(&self.config.method) {
            html.push(&widgets::hidden_input(&self.settings.method_field, &spoofed));
        }
        if !self.config.csrf_token.is_empty() {
            html.push(&widgets::hidden_input(
                &self.config.csrf_field,
                &self.config.csrf_token,
            ));
        }
        html
    }

    /// Closes the form.
    pub fn close(&self) -> Html {
        Html::from_trusted("</form>")
    }

    // ── Labels and buttons ───────────────────────────────────────────

    /// Renders `<label for="name">text</label>`.
    pub fn label(&self, name: &str, text: &str) -> Html {
        self.label_with(name, text, &Attrs::new())
    }

    /// Renders a label with extra attributes.
    pub fn label_with(&self, name: &str, text: &str, attrs: &Attrs) -> Html {
        let defaults = Attrs::new().set("for", name).class(&self.settings.label_class);
        widgets::label(&defaults.merge(attrs), text)
    }

    /// Renders a submit button.
    pub fn submit(&self, text: &str) -> Html {
        self.submit_with(text, &Attrs::new())
    }

    /// Renders a submit button with extra attributes.
    pub fn submit_with(&self, text: &str, attrs: &Attrs) -> Html {
        let defaults = Attrs::new()
            .set("type", "submit")
            .class(&self.settings.submit_class);
        widgets::button(&defaults.merge(attrs), text)
    }

    /// Renders a plain button.
    pub fn button(&self, text: &str) -> Html {
        self.button_with(text, &Attrs::new())
    }

    /// Renders a plain button with extra attributes.
    pub fn button_with(&self, text: &str, attrs: &Attrs) -> Html {
        let defaults = Attrs::new()
            .set("type", "button")
            .class(&self.settings.button_class);
        widgets::button(&defaults.merge(attrs), text)
    }

    /// Renders the field's error message, or nothing.
    pub fn field_error(&self, name: &str) -> Html {
        widgets::feedback(&self.settings.feedback_class, self.error(name).unwrap_or(""))
    }

    // ── Inputs ───────────────────────────────────────────────────────

    /// Renders an input of any kind.
    pub fn input(&self, kind: InputKind, name: &str) -> Html {
        self.input_with(kind, name, &Attrs::new())
    }

    /// Renders an input of any kind with extra attributes.
    ///
    /// A `value` attribute is the field's explicit default.
    pub fn input_with(&self, kind: InputKind, name: &str, attrs: &Attrs) -> Html {
        if kind == InputKind::File && !self.config.multipart {
            tracing::warn!(
                field = name,
                "file input rendered in a form that is not multipart"
            );
        }
        self.render_widget(&Input { kind }, name, attrs)
    }

    /// Renders `<input type="text">`.
    pub fn text(&self, name: &str) -> Html {
        self.input(InputKind::Text, name)
    }

    /// Renders `<input type="text">` with extra attributes.
    pub fn text_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.input_with(InputKind::Text, name, attrs)
    }

    /// Renders `<input type="email">`.
    pub fn email(&self, name: &str) -> Html {
        self.input(InputKind::Email, name)
    }

    /// Renders `<input type="email">` with extra attributes.
    pub fn email_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.input_with(InputKind::Email, name, attrs)
    }

    /// Renders `<input type="password">`, always with an empty value.
    pub fn password(&self, name: &str) -> Html {
        self.input(InputKind::Password, name)
    }

    /// Renders `<input type="password">` with extra attributes.
    pub fn password_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.input_with(InputKind::Password, name, attrs)
    }

    /// Renders `<input type="hidden">`.
    pub fn hidden(&self, name: &str) -> Html {
        self.input(InputKind::Hidden, name)
    }

    /// Renders `<input type="hidden">` with extra attributes.
    pub fn hidden_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.input_with(InputKind::Hidden, name, attrs)
    }

    /// Renders `<input type="file">`. The config must already be multipart.
    pub fn file(&self, name: &str) -> Html {
        self.input(InputKind::File, name)
    }

    /// Renders `<input type="file">` with extra attributes.
    pub fn file_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.input_with(InputKind::File, name, attrs)
    }

    /// Renders a `<textarea>`.
    pub fn textarea(&self, name: &str) -> Html {
        self.textarea_with(name, &Attrs::new())
    }

    /// Renders a `<textarea>` with extra attributes.
    pub fn textarea_with(&self, name: &str, attrs: &Attrs) -> Html {
        self.render_widget(&Textarea, name, attrs)
    }

    // ── Choices ──────────────────────────────────────────────────────

    /// Renders a `<select>`.
    pub fn select(&self, name: &str, options: &[SelectOption]) -> Html {
        self.select_with(name, options, &Attrs::new())
    }

    /// Renders a `<select>` with extra attributes; `multiple` makes it a
    /// multi-select.
    pub fn select_with(&self, name: &str, options: &[SelectOption], attrs: &Attrs) -> Html {
        self.render_widget(&Select { options }, name, attrs)
    }

    /// Renders a checkbox and its hidden companion.
    pub fn checkbox(&self, name: &str, value: &str) -> Html {
        self.checkbox_with(name, value, &Attrs::new())
    }

    /// Renders a checkbox with extra attributes.
    pub fn checkbox_with(&self, name: &str, value: &str, attrs: &Attrs) -> Html {
        self.render_widget(&Checkbox { value }, name, attrs)
    }

    /// Renders a radio button.
    pub fn radio(&self, name: &str, value: &str) -> Html {
        self.radio_with(name, value, &Attrs::new())
    }

    /// Renders a radio button with extra attributes.
    pub fn radio_with(&self, name: &str, value: &str, attrs: &Attrs) -> Html {
        self.render_widget(&Radio { value }, name, attrs)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn resolver(&self) -> Resolver<'_> {
        Resolver::new(
            &self.config.old_input,
            self.config.model.as_ref(),
            self.settings.nested_lookup,
        )
    }

    fn render_widget<W: Widget>(&self, widget: &W, name: &str, attrs: &Attrs) -> Html {
        let mut caller = attrs.clone();
        let default = if widget.value_is_default() {
            caller.remove("value")
        } else {
            None
        };
        let resolved = self.resolver().resolve(name, default.as_deref());

        let mut merged = widget.default_attrs(&self.settings).merge(&caller);
        if self.has_error(name) {
            merged.add_class(&self.settings.invalid_class);
        }
        widget.render(name, &resolved, merged)
    }
}

impl From<Config> for Builder {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}

/// Builds an error map from `(field, message)` pairs.
pub fn field_errors<K, V, I>(pairs: I) -> FieldErrors
where
    K: Into<String>,
    V: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect::<HashMap<_, _>>()
}
