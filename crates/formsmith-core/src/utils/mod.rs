//! Utility types.
//!
//! - [`OldInput`]: previously submitted form values, one or more per field

pub mod old_input;

pub use old_input::OldInput;
