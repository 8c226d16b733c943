//! Reusable TUI widgets.

pub mod form;
pub mod nav_bar;

pub use form::{ERROR_MARKER, Form, FormField, draw_form};
pub use nav_bar::{NAV_TITLE, draw_nav_bar};
