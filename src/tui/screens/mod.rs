//! TUI screen implementations.

pub mod contact_form;
pub mod help;

pub use contact_form::{ContactFormState, draw_contact_form};
pub use help::{HelpState, draw_help};
