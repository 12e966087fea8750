//! Error types for formsmith.
//!
//! Rendering never fails: every builder operation degrades to a sensible
//! fragment on odd input. The errors here cover the edges around rendering,
//! namely validation of records that are not record-shaped, settings loading,
//! template registration, and the CSRF token store.

use thiserror::Error;

/// The primary error type for formsmith.
///
/// Field-level rule failures from validation are *not* represented here.
/// They are returned as data (a field-to-message map) so the form can be
/// re-rendered with them. Only structural problems surface as a `FormError`.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Validation ───────────────────────────────────────────────────

    /// The value handed to the validation adapter does not serialize to a
    /// map of named fields (e.g. a bare string, a number, or a sequence).
    #[error("Expected a record with named fields, found {found}")]
    NotARecord {
        /// The shape that was found instead (`"string"`, `"array"`, ...).
        found: &'static str,
    },

    /// A record or model could not be serialized for field lookup.
    #[error("Serialization error: {0}")]
    Serialization(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A settings document is malformed or has values of the wrong type.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Templates ────────────────────────────────────────────────────

    /// A template function was called with missing or mistyped arguments.
    #[error("Template error: {0}")]
    Template(String),

    // ── CSRF ─────────────────────────────────────────────────────────

    /// The CSRF token store failed.
    #[error("CSRF error: {0}")]
    Csrf(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;
