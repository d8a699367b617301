//! Utility functions.
//!
//! - Diagnostic text sanitization and credential redaction
//! - CSS selector parsing for static selectors

mod sanitize;
mod selector;

pub use sanitize::{page_excerpt, Redactor};
pub use selector::{parse_selector_unsafe, parse_selectors};
