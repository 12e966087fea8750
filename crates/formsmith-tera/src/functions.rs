//! One Tera function per builder operation.

use std::collections::HashMap;
use std::sync::Arc;

use formsmith_core::{FormError, FormResult, Html};
use formsmith_forms::{Builder, InputKind};
use serde_json::Value;
use tera::{Function, Result as TeraResult};

use crate::args::Args;

/// The builder operation a function forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Open,
    Close,
    Label,
    Field(InputKind),
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Submit,
    Button,
    Error,
    HasError,
    CsrfField,
    CsrfToken,
}

impl Op {
    /// Arguments consumed by the operation itself rather than passed
    /// through as attributes.
    const fn reserved(self) -> &'static [&'static str] {
        match self {
            Self::Open | Self::Close | Self::CsrfField | Self::CsrfToken => &[],
            Self::Label => &["name", "text"],
            Self::Field(_) | Self::Textarea | Self::Error | Self::HasError => &["name"],
            Self::Input => &["name", "kind"],
            Self::Select => &["name", "options"],
            Self::Checkbox | Self::Radio => &["name", "value"],
            Self::Submit | Self::Button => &["text"],
        }
    }

    /// Whether the output is markup that autoescaping must leave alone.
    const fn is_markup(self) -> bool {
        !matches!(self, Self::HasError | Self::CsrfField | Self::CsrfToken)
    }
}

/// Every function name with the operation behind it.
pub(crate) const FUNCTIONS: &[(&str, Op)] = &[
    ("form_open", Op::Open),
    ("form_close", Op::Close),
    ("form_label", Op::Label),
    ("form_text", Op::Field(InputKind::Text)),
    ("form_email", Op::Field(InputKind::Email)),
    ("form_password", Op::Field(InputKind::Password)),
    ("form_hidden", Op::Field(InputKind::Hidden)),
    ("form_file", Op::Field(InputKind::File)),
    ("form_input", Op::Input),
    ("form_textarea", Op::Textarea),
    ("form_select", Op::Select),
    ("form_checkbox", Op::Checkbox),
    ("form_radio", Op::Radio),
    ("form_submit", Op::Submit),
    ("form_button", Op::Button),
    ("form_error", Op::Error),
    ("form_has_error", Op::HasError),
    ("csrf_field", Op::CsrfField),
    ("csrf_token", Op::CsrfToken),
];

/// A registered template function bound to one builder.
#[derive(Debug, Clone)]
pub struct FormFunction {
    name: &'static str,
    op: Op,
    builder: Arc<Builder>,
}

impl FormFunction {
    pub(crate) fn new(name: &'static str, op: Op, builder: Arc<Builder>) -> Self {
        Self { name, op, builder }
    }

    /// The name the function is registered under.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    fn dispatch(&self, args: &HashMap<String, Value>) -> FormResult<Value> {
        let args = Args::new(self.name, args);
        let attrs = args.attrs(self.op.reserved())?;
        let b = &self.builder;

        let html: Html = match self.op {
            Op::Open => b.open_with(&attrs),
            Op::Close => b.close(),
            Op::Label => b.label_with(&args.string("name")?, &args.string("text")?, &attrs),
            Op::Field(kind) => b.input_with(kind, &args.string("name")?, &attrs),
            Op::Input => {
                let kind = args.string("kind")?;
                let kind = InputKind::parse(&kind).ok_or_else(|| {
                    FormError::Template(format!("{}: unknown input kind `{kind}`", self.name))
                })?;
                b.input_with(kind, &args.string("name")?, &attrs)
            }
            Op::Textarea => b.textarea_with(&args.string("name")?, &attrs),
            Op::Select => b.select_with(&args.string("name")?, &args.options()?, &attrs),
            Op::Checkbox => {
                b.checkbox_with(&args.string("name")?, &args.string("value")?, &attrs)
            }
            Op::Radio => b.radio_with(&args.string("name")?, &args.string("value")?, &attrs),
            Op::Submit => b.submit_with(&args.string("text")?, &attrs),
            Op::Button => b.button_with(&args.string("text")?, &attrs),
            Op::Error => b.field_error(&args.string("name")?),
            Op::HasError => return Ok(Value::Bool(b.has_error(&args.string("name")?))),
            Op::CsrfField => return Ok(Value::String(b.csrf_field().to_string())),
            Op::CsrfToken => return Ok(Value::String(b.csrf_token().to_string())),
        };

        Ok(Value::String(html.into_string()))
    }
}

impl Function for FormFunction {
    fn call(&self, args: &HashMap<String, Value>) -> TeraResult<Value> {
        self.dispatch(args).map_err(|err| {
            tracing::warn!(function = self.name, error = %err, "Form function failed");
            tera::Error::msg(err.to_string())
        })
    }

    fn is_safe(&self) -> bool {
        self.op.is_markup()
    }
}
