//! # formsmith-tera
//!
//! Exposes a [`Builder`] to Tera templates. [`register`] installs one
//! function per builder operation; functions that return markup are marked
//! safe, so autoescaping leaves their output alone while still escaping
//! everything else in the template.
//!
//! ```
//! use std::sync::Arc;
//!
//! use formsmith_forms::{Builder, Config};
//! use tera::{Context, Tera};
//!
//! let builder = Builder::new(Config::new("/signup", "POST").error("email", "Taken"));
//! let mut tera = Tera::default();
//! formsmith_tera::register(&mut tera, Arc::new(builder));
//! tera.add_raw_template(
//!     "signup.html",
//!     r#"{{ form_open() }}{{ form_email(name="email") }}{{ form_error(name="email") }}{{ form_close() }}"#,
//! )
//! .unwrap();
//!
//! let html = tera.render("signup.html", &Context::new()).unwrap();
//! assert!(html.contains(r#"<div class="invalid-feedback">Taken</div>"#));
//! ```
//!
//! Arguments are keywords. `name`, `text`, `value` (checkboxes and radios),
//! `kind` (`form_input`), and `options` (`form_select`) are consumed by the
//! operation; any other keyword, plus the entries of an optional `attrs` map,
//! becomes an HTML attribute.

mod args;
pub mod functions;

use std::sync::Arc;

use formsmith_forms::Builder;
use tera::Tera;

pub use functions::FormFunction;

/// Registers every form function on `tera`, bound to `builder`.
///
/// Registering again replaces the previous bindings, which is how a shared
/// `Tera` instance is pointed at the next request's form.
pub fn register(tera: &mut Tera, builder: Arc<Builder>) {
    for &(name, op) in functions::FUNCTIONS {
        tera.register_function(name, FormFunction::new(name, op, Arc::clone(&builder)));
    }
    tracing::debug!(count = functions::FUNCTIONS.len(), "Registered form functions");
}

/// The names [`register`] installs.
pub fn function_names() -> impl Iterator<Item = &'static str> {
    functions::FUNCTIONS.iter().map(|(name, _)| *name)
}
