//! # formsmith
//!
//! Server-side HTML form building for template-rendered web applications.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `formsmith` for everything, or on individual crates for finer-grained
//! control.
//!
//! ```
//! use formsmith::prelude::*;
//!
//! let form = Builder::new(
//!     Config::new("/u/1", "PUT")
//!         .csrf_token("abc")
//!         .error("name", "Name is required"),
//! );
//! let open = form.open();
//! assert!(open.as_str().contains(r#"<input type="hidden" name="_method" value="PUT">"#));
//! assert!(form.text("name").as_str().contains("is-invalid"));
//! ```

/// Errors, safe HTML, settings, and submitted-value maps.
pub use formsmith_core as core;

/// The form builder, value resolution, widgets, and validation.
pub use formsmith_forms as forms;

/// CSRF token generation, masking, and per-session storage.
#[cfg(feature = "csrf")]
pub use formsmith_csrf as csrf;

/// Tera template functions backed by a builder.
#[cfg(feature = "tera")]
pub use formsmith_tera as tera;

// Third-party re-exports
pub use serde;
pub use serde_json;
pub use tracing;
pub use validator;

/// The types most handlers and templates need.
pub mod prelude {
    pub use formsmith_core::{FormError, FormResult, FormSettings, Html, OldInput, SETTINGS};
    pub use formsmith_forms::{
        field_errors, options, validate, Attrs, Builder, Config, FormFields, InputKind, Model,
        RenameAll, SelectOption, Validation,
    };

    #[cfg(feature = "csrf")]
    pub use formsmith_csrf::{CsrfTokens, MemoryTokenStore, TokenStore};
}
