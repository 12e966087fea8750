//! Widgets: the HTML emitted for each kind of control.
//!
//! A [`Widget`] knows its default attributes and how to turn a resolved
//! value plus merged attributes into markup. The builder does the
//! resolution, merging and error decoration; widgets only emit. Elements
//! that are not bound to a field value (labels, buttons, error messages,
//! hidden companions) are plain functions at the bottom of this module.

use std::fmt;

use formsmith_core::{escape_html, FormSettings, Html};

use crate::attrs::Attrs;
use crate::choices::{group_runs, SelectOption};
use crate::value::{Resolved, Source};

/// A control bound to a field.
pub trait Widget: fmt::Debug {
    /// Attributes the control starts from before caller attributes are merged.
    fn default_attrs(&self, settings: &FormSettings) -> Attrs;

    /// Whether a caller-supplied `value` attribute is the field's explicit default.
    fn value_is_default(&self) -> bool {
        true
    }

    /// Renders the control.
    ///
    /// `attrs` are the merged, error-decorated attributes. Widgets set
    /// `type`, `name` and `value` themselves.
    fn render(&self, name: &str, value: &Resolved, attrs: Attrs) -> Html;
}

/// The `type` of an `<input>` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// `<input type="text">`.
    Text,
    /// `<input type="email">`.
    Email,
    /// `<input type="password">`. Never prefilled.
    Password,
    /// `<input type="hidden">`.
    Hidden,
    /// `<input type="file">`. Carries no value.
    File,
    /// `<input type="number">`.
    Number,
    /// `<input type="tel">`.
    Tel,
    /// `<input type="url">`.
    Url,
    /// `<input type="search">`.
    Search,
    /// `<input type="date">`.
    Date,
    /// `<input type="datetime-local">`.
    DateTimeLocal,
    /// `<input type="time">`.
    Time,
    /// `<input type="month">`.
    Month,
    /// `<input type="week">`.
    Week,
    /// `<input type="color">`.
    Color,
    /// `<input type="range">`.
    Range,
}

impl InputKind {
    /// The value of the `type` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Hidden => "hidden",
            Self::File => "file",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Search => "search",
            Self::Date => "date",
            Self::DateTimeLocal => "datetime-local",
            Self::Time => "time",
            Self::Month => "month",
            Self::Week => "week",
            Self::Color => "color",
            Self::Range => "range",
        }
    }

    /// Parses a `type` attribute value.
    pub fn parse(kind: &str) -> Option<Self> {
        Some(match kind.trim().to_ascii_lowercase().as_str() {
            "text" => Self::Text,
            "email" => Self::Email,
            "password" => Self::Password,
            "hidden" => Self::Hidden,
            "file" => Self::File,
            "number" => Self::Number,
            "tel" => Self::Tel,
            "url" => Self::Url,
            "search" => Self::Search,
            "date" => Self::Date,
            "datetime-local" => Self::DateTimeLocal,
            "time" => Self::Time,
            "month" => Self::Month,
            "week" => Self::Week,
            "color" => Self::Color,
            "range" => Self::Range,
            _ => return None,
        })
    }

    /// Whether the input gets the text-control class by default.
    pub const fn takes_input_class(self) -> bool {
        !matches!(self, Self::Hidden | Self::File | Self::Color | Self::Range)
    }

    /// Whether the input carries a `value` attribute at all.
    pub const fn renders_value(self) -> bool {
        !matches!(self, Self::File)
    }

    /// Whether the input is repopulated from the resolver.
    pub const fn prefills(self) -> bool {
        !matches!(self, Self::Password | Self::File)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Field widgets
// ---------------------------------------------------------------------------

/// A void `<input>` of the text family.
#[derive(Debug, Clone, Copy)]
pub struct Input {
    /// The input type.
    pub kind: InputKind,
}

impl Widget for Input {
    fn default_attrs(&self, settings: &FormSettings) -> Attrs {
        if self.kind.takes_input_class() {
            Attrs::new().class(&settings.input_class)
        } else {
            Attrs::new()
        }
    }

    fn value_is_default(&self) -> bool {
        self.kind.prefills()
    }

    fn render(&self, name: &str, value: &Resolved, mut attrs: Attrs) -> Html {
        attrs.insert("type", self.kind.as_str());
        attrs.insert("name", name);
        if !self.kind.renders_value() {
            attrs.remove("value");
        } else if self.kind.prefills() {
            attrs.insert("value", value.as_text());
        } else {
            attrs.insert("value", "");
        }
        Html::from_trusted(format!("<input{}>", attrs.render()))
    }
}

/// A `<textarea>` whose body is the escaped value.
#[derive(Debug, Clone, Copy)]
pub struct Textarea;

impl Widget for Textarea {
    fn default_attrs(&self, settings: &FormSettings) -> Attrs {
        Attrs::new().class(&settings.input_class)
    }

    fn render(&self, name: &str, value: &Resolved, mut attrs: Attrs) -> Html {
        attrs.remove("value");
        attrs.insert("name", name);
        Html::from_trusted(format!(
            "<textarea{}>{}</textarea>",
            attrs.render(),
            escape_html(&value.as_text())
        ))
    }
}

/// A `<select>`, single or multiple (attribute `multiple`).
#[derive(Debug, Clone, Copy)]
pub struct Select<'a> {
    /// The options in display order.
    pub options: &'a [SelectOption],
}

impl Widget for Select<'_> {
    fn default_attrs(&self, settings: &FormSettings) -> Attrs {
        Attrs::new().class(&settings.select_class)
    }

    fn render(&self, name: &str, value: &Resolved, mut attrs: Attrs) -> Html {
        attrs.remove("value");
        attrs.insert("name", name);

        let multiple = attrs.is_flag_set("multiple");
        let chosen: Vec<String> = match value.source {
            Source::Empty => Vec::new(),
            _ if multiple => value.value.to_list(),
            _ => vec![value.as_text()],
        };

        let mut body = String::new();
        let mut selected_one = false;
        for (group, run) in group_runs(self.options) {
            if !group.is_empty() {
                body.push_str(&format!(r#"<optgroup label="{}">"#, escape_html(group)));
            }
            for option in run {
                let selected = if multiple {
                    chosen.contains(&option.value)
                } else if !selected_one && chosen.first() == Some(&option.value) {
                    selected_one = true;
                    true
                } else {
                    false
                };
                body.push_str(&render_option(option, selected));
            }
            if !group.is_empty() {
                body.push_str("</optgroup>");
            }
        }

        Html::from_trusted(format!("<select{}>{body}</select>", attrs.render()))
    }
}

/// A checkbox, preceded by a hidden companion carrying the unchecked value.
///
/// The reserved attribute `unchecked` replaces the companion's value, or
/// drops the companion when set to `"false"`. It is never emitted.
#[derive(Debug, Clone, Copy)]
pub struct Checkbox<'a> {
    /// The value submitted when checked.
    pub value: &'a str,
}

impl Widget for Checkbox<'_> {
    fn default_attrs(&self, settings: &FormSettings) -> Attrs {
        Attrs::new()
            .class(&settings.check_class)
            .set("unchecked", settings.unchecked_value.as_str())
    }

    fn value_is_default(&self) -> bool {
        false
    }

    fn render(&self, name: &str, value: &Resolved, mut attrs: Attrs) -> Html {
        let companion = attrs.remove("unchecked").filter(|v| v != "false");
        let checked = render_checked(value, self.value, &mut attrs);
        attrs.insert("type", "checkbox");
        attrs.insert("name", name);
        attrs.insert("value", self.value);
        if checked {
            attrs.insert("checked", "true");
        }

        let mut html = companion.map_or_else(Html::empty, |v| hidden_input(name, &v));
        html.push(&Html::from_trusted(format!("<input{}>", attrs.render())));
        html
    }
}

/// A single radio button.
#[derive(Debug, Clone, Copy)]
pub struct Radio<'a> {
    /// The value submitted when selected.
    pub value: &'a str,
}

impl Widget for Radio<'_> {
    fn default_attrs(&self, settings: &FormSettings) -> Attrs {
        Attrs::new().class(&settings.check_class)
    }

    fn value_is_default(&self) -> bool {
        false
    }

    fn render(&self, name: &str, value: &Resolved, mut attrs: Attrs) -> Html {
        let checked = render_checked(value, self.value, &mut attrs);
        attrs.insert("type", "radio");
        attrs.insert("name", name);
        attrs.insert("value", self.value);
        if checked {
            attrs.insert("checked", "true");
        }
        Html::from_trusted(format!("<input{}>", attrs.render()))
    }
}

/// Decides the checked state: a submission or model value decides it,
/// otherwise the caller's own `checked` attribute does.
fn render_checked(value: &Resolved, declared: &str, attrs: &mut Attrs) -> bool {
    let caller_checked = attrs.is_flag_set("checked");
    attrs.remove("checked");
    match value.source {
        Source::OldInput | Source::Model => value.value.checks(declared),
        Source::Default | Source::Empty => caller_checked,
    }
}

fn render_option(option: &SelectOption, selected: bool) -> String {
    let mut attrs = Attrs::new().set("value", option.value.as_str());
    if selected {
        attrs.insert("selected", "true");
    }
    format!(
        "<option{}>{}</option>",
        attrs.render(),
        escape_html(&option.text)
    )
}

// ---------------------------------------------------------------------------
// Unbound elements
// ---------------------------------------------------------------------------

/// Renders `<input type="hidden" name="..." value="...">`.
pub fn hidden_input(name: &str, value: &str) -> Html {
    let attrs = Attrs::new()
        .set("type", "hidden")
        .set("name", name)
        .set("value", value);
    Html::from_trusted(format!("<input{}>", attrs.render()))
}

/// Renders a `<label>` with escaped text.
pub fn label(attrs: &Attrs, text: &str) -> Html {
    Html::from_trusted(format!(
        "<label{}>{}</label>",
        attrs.render(),
        escape_html(text)
    ))
}

/// Renders a `<button>` with escaped text.
pub fn button(attrs: &Attrs, text: &str) -> Html {
    Html::from_trusted(format!(
        "<button{}>{}</button>",
        attrs.render(),
        escape_html(text)
    ))
}

/// Renders the feedback element for an error message, or nothing when the
/// message is empty.
pub fn feedback(class: &str, message: &str) -> Html {
    if message.is_empty() {
        return Html::empty();
    }
    let attrs = Attrs::new().class(class);
    Html::from_trusted(format!(
        "<div{}>{}</div>",
        attrs.render(),
        escape_html(message)
    ))
}
