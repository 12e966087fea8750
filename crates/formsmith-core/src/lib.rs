//! # formsmith-core
//!
//! Core types shared by every formsmith crate. This crate has no framework
//! dependencies and provides the foundation the form builder is written on.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy and result alias
//! - [`html`] - Pre-escaped HTML fragments and escaping helpers
//! - [`settings`] - Theme and naming settings with a process-wide instance
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`utils`] - Utility types (`OldInput`)

pub mod error;
pub mod html;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{FormError, FormResult};
pub use html::{escape_html, Html};
pub use settings::{FormSettings, SETTINGS};
pub use utils::OldInput;
